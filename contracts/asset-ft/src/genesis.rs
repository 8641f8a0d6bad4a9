use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, Coin, Order, StdResult, Storage, Uint128};
use cw_storage_plus::Map;

use crate::bank::{self, DenomMetadata};
use crate::denom;
use crate::error::ContractError;
use crate::msg::Balance;
use crate::state::{Token, FROZEN_BALANCES, SYMBOLS, TOKENS, WHITELISTED_BALANCES};

#[cw_serde]
#[derive(Default)]
pub struct GenesisState {
    pub tokens: Vec<Token>,
    pub frozen_balances: Vec<Balance>,
    pub whitelisted_balances: Vec<Balance>,
}

/// Re-populates the token registry, symbol index, frozen and whitelisted
/// ledgers, and denom metadata from an exported state.
pub fn init(
    storage: &mut dyn Storage,
    api: &dyn Api,
    state: &GenesisState,
) -> Result<(), ContractError> {
    for token in &state.tokens {
        denom::validate_symbol(&token.symbol)?;
        denom::validate_subunit(&token.subunit)?;
        denom::validate_precision(token.precision)?;
        denom::validate_burn_rate(token.burn_rate)?;
        let (subunit, issuer) = denom::parse_denom(&token.denom)?;
        if subunit != token.subunit || issuer != token.issuer.as_str() {
            return Err(ContractError::InvalidDenom {});
        }
        if TOKENS.has(storage, &token.denom) {
            return Err(ContractError::AlreadyExists {});
        }
        TOKENS.save(storage, &token.denom, token)?;
        SYMBOLS.save(storage, (&token.issuer, &token.symbol.to_lowercase()), &true)?;
        bank::set_denom_metadata(
            storage,
            &DenomMetadata {
                denom: token.denom.clone(),
                symbol: token.symbol.clone(),
                description: token.description.clone(),
                precision: token.precision,
            },
        )?;
    }
    restore_balances(storage, api, &FROZEN_BALANCES, &state.frozen_balances)?;
    restore_balances(storage, api, &WHITELISTED_BALANCES, &state.whitelisted_balances)?;
    Ok(())
}

pub fn export(storage: &dyn Storage) -> StdResult<GenesisState> {
    let tokens = TOKENS
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, token)| token))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(GenesisState {
        tokens,
        frozen_balances: collect_balances(storage, &FROZEN_BALANCES)?,
        whitelisted_balances: collect_balances(storage, &WHITELISTED_BALANCES)?,
    })
}

fn restore_balances(
    storage: &mut dyn Storage,
    api: &dyn Api,
    ledger: &Map<(&Addr, &str), Uint128>,
    balances: &[Balance],
) -> Result<(), ContractError> {
    for balance in balances {
        let account = api.addr_validate(&balance.address)?;
        for coin in &balance.coins {
            if coin.amount.is_zero() {
                continue;
            }
            ledger.save(storage, (&account, &coin.denom), &coin.amount)?;
        }
    }
    Ok(())
}

fn collect_balances(
    storage: &dyn Storage,
    ledger: &Map<(&Addr, &str), Uint128>,
) -> StdResult<Vec<Balance>> {
    let mut balances: Vec<Balance> = Vec::new();
    for item in ledger.range(storage, None, None, Order::Ascending) {
        let ((account, denom), amount) = item?;
        let coin = Coin {
            denom,
            amount,
        };
        match balances.last_mut() {
            Some(last) if last.address == account.as_str() => last.coins.push(coin),
            _ => balances.push(Balance {
                address: account.into_string(),
                coins: vec![coin],
            }),
        }
    }
    Ok(balances)
}
