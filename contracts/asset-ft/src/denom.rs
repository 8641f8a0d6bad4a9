use cosmwasm_std::{Addr, Decimal};

use crate::error::ContractError;

const MAX_SYMBOL_LEN: usize = 32;
const MAX_SUBUNIT_LEN: usize = 51;
const MAX_PRECISION: u32 = 20;

/// Canonical denom of a token: lower-cased subunit, a dash, then the
/// issuer's bech32 address. Bech32 never contains a dash, so the denom
/// splits back unambiguously on the last one.
pub fn build_denom(subunit: &str, issuer: &Addr) -> String {
    format!("{}-{}", subunit.to_lowercase(), issuer)
}

pub fn parse_denom(denom: &str) -> Result<(&str, &str), ContractError> {
    denom
        .rsplit_once('-')
        .filter(|(subunit, issuer)| !subunit.is_empty() && !issuer.is_empty())
        .ok_or(ContractError::InvalidDenom {})
}

// ^[a-zA-Z][a-zA-Z0-9]{0,31}$
pub fn validate_symbol(symbol: &str) -> Result<(), ContractError> {
    let mut chars = symbol.chars();
    let valid = match chars.next() {
        Some(first) => {
            symbol.len() <= MAX_SYMBOL_LEN
                && first.is_ascii_alphabetic()
                && chars.all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    };
    if !valid {
        return Err(ContractError::invalid_input(format!(
            "invalid symbol: {symbol}"
        )));
    }
    Ok(())
}

// ^[a-z][a-z0-9]{0,50}$
pub fn validate_subunit(subunit: &str) -> Result<(), ContractError> {
    let mut chars = subunit.chars();
    let valid = match chars.next() {
        Some(first) => {
            subunit.len() <= MAX_SUBUNIT_LEN
                && first.is_ascii_lowercase()
                && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        None => false,
    };
    if !valid {
        return Err(ContractError::invalid_input(format!(
            "invalid subunit: {subunit}"
        )));
    }
    Ok(())
}

pub fn validate_precision(precision: u32) -> Result<(), ContractError> {
    if precision > MAX_PRECISION {
        return Err(ContractError::invalid_input(format!(
            "precision must not exceed {MAX_PRECISION}"
        )));
    }
    Ok(())
}

pub fn validate_burn_rate(burn_rate: Decimal) -> Result<(), ContractError> {
    if burn_rate > Decimal::one() {
        return Err(ContractError::invalid_input(
            "burn rate must be between 0 and 1",
        ));
    }
    Ok(())
}
