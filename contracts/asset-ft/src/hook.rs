use cosmwasm_std::{Addr, Coin, StdError, Storage, Uint128};

use crate::bank;
use crate::error::ContractError;
use crate::state::{TokenFeature, FROZEN_BALANCES, TOKENS, WHITELISTED_BALANCES};

/// Burn-rate semantics differ between the two bank entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendMode {
    /// Single sender and recipient; no burn when either side is the issuer.
    Direct,
    /// Multi-send; burn is charged per output portion and only the sending
    /// side is exempt.
    /// TODO: collapse into the Direct rules once per-output charging is
    /// dropped from the bank multi-send path.
    Multi,
}

/// Pre-commit policy check for every bank transfer. Denoms without a token
/// record pass through untouched. Returns the burn charges (sender, coin)
/// the transfer must apply on top of the sent amounts.
///
/// Checks run in a fixed order: global freeze, frozen balance (spendable
/// must cover sent plus burn), whitelist cap per recipient. The hook only
/// reads; the caller commits.
pub fn before_send(
    storage: &dyn Storage,
    inputs: &[(Addr, Vec<Coin>)],
    outputs: &[(Addr, Vec<Coin>)],
    mode: SendMode,
) -> Result<Vec<(Addr, Coin)>, ContractError> {
    for (_, coins) in inputs {
        for coin in coins {
            let token = match TOKENS.may_load(storage, &coin.denom)? {
                Some(token) => token,
                None => continue,
            };
            if token.globally_frozen {
                return Err(ContractError::GloballyFrozen {
                    denom: coin.denom.clone(),
                });
            }
        }
    }

    let burns = compute_burns(storage, inputs, outputs, mode)?;

    let mut outgoing = Vec::new();
    for (sender, coins) in inputs {
        for coin in coins {
            bank::accumulate(&mut outgoing, sender, &coin.denom, coin.amount)?;
        }
    }
    for (sender, denom, amount) in &outgoing {
        let token = match TOKENS.may_load(storage, denom)? {
            Some(token) => token,
            None => continue,
        };
        if !token.has_feature(TokenFeature::Freeze) {
            continue;
        }
        let balance = bank::get_balance(storage, sender, denom)?;
        let frozen = FROZEN_BALANCES
            .may_load(storage, (sender, denom))?
            .unwrap_or_default();
        let spendable = balance.saturating_sub(frozen);
        let charged = amount
            .checked_add(charged_burn(&burns, sender, denom))
            .map_err(StdError::overflow)?;
        if charged > spendable {
            return Err(ContractError::InsufficientFunds {});
        }
    }

    let mut incoming = Vec::new();
    for (recipient, coins) in outputs {
        for coin in coins {
            bank::accumulate(&mut incoming, recipient, &coin.denom, coin.amount)?;
        }
    }
    for (recipient, denom, amount) in &incoming {
        let token = match TOKENS.may_load(storage, denom)? {
            Some(token) => token,
            None => continue,
        };
        if !token.has_feature(TokenFeature::Whitelist) || *recipient == token.issuer {
            continue;
        }
        let limit = WHITELISTED_BALANCES
            .may_load(storage, (recipient, denom))?
            .unwrap_or_default();
        let after = bank::get_balance(storage, recipient, denom)?
            .checked_add(*amount)
            .map_err(StdError::overflow)?;
        if after > limit {
            return Err(ContractError::WhitelistedLimitExceeded {});
        }
    }

    let burns = burns
        .into_iter()
        .map(|(sender, denom, amount)| (sender, Coin { denom, amount }))
        .collect();
    Ok(burns)
}

fn charged_burn(burns: &[(Addr, String, Uint128)], sender: &Addr, denom: &str) -> Uint128 {
    burns
        .iter()
        .find(|(a, d, _)| a == sender && d == denom)
        .map(|(_, _, amount)| *amount)
        .unwrap_or_default()
}

fn compute_burns(
    storage: &dyn Storage,
    inputs: &[(Addr, Vec<Coin>)],
    outputs: &[(Addr, Vec<Coin>)],
    mode: SendMode,
) -> Result<Vec<(Addr, String, Uint128)>, ContractError> {
    let mut burns = Vec::new();
    for (sender, recipient, coin) in match_output_legs(inputs, outputs)? {
        let token = match TOKENS.may_load(storage, &coin.denom)? {
            Some(token) => token,
            None => continue,
        };
        if token.burn_rate.is_zero() || sender == token.issuer {
            continue;
        }
        if mode == SendMode::Direct && recipient == token.issuer {
            continue;
        }
        // truncation toward zero at the integer-coin level
        let burn_amount = coin.amount.mul_floor(token.burn_rate);
        if !burn_amount.is_zero() {
            bank::accumulate(&mut burns, &sender, &coin.denom, burn_amount)?;
        }
    }
    Ok(burns)
}

/// Attributes output portions to inputs by consuming both lists in message
/// order. A single-input transfer yields one leg per output portion.
fn match_output_legs(
    inputs: &[(Addr, Vec<Coin>)],
    outputs: &[(Addr, Vec<Coin>)],
) -> Result<Vec<(Addr, Addr, Coin)>, ContractError> {
    let mut queue: Vec<(Addr, String, Uint128)> = Vec::new();
    for (recipient, coins) in outputs {
        for coin in coins {
            queue.push((recipient.clone(), coin.denom.clone(), coin.amount));
        }
    }

    let mut legs = Vec::new();
    for (sender, coins) in inputs {
        for coin in coins {
            let mut needed = coin.amount;
            for (recipient, denom, available) in queue.iter_mut() {
                if needed.is_zero() {
                    break;
                }
                if *denom != coin.denom || available.is_zero() {
                    continue;
                }
                let take = needed.min(*available);
                *available -= take;
                needed -= take;
                legs.push((
                    sender.clone(),
                    recipient.clone(),
                    Coin {
                        denom: coin.denom.clone(),
                        amount: take,
                    },
                ));
            }
            if !needed.is_zero() {
                return Err(ContractError::invalid_input(format!(
                    "input and output amounts of {} do not match",
                    coin.denom
                )));
            }
        }
    }
    Ok(legs)
}
