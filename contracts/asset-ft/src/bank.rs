use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, StdResult, Storage, Uint128};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::hook::{self, SendMode};

#[cw_serde]
pub struct DenomMetadata {
    pub denom: String,
    pub symbol: String,
    pub description: String,
    pub precision: u32,
}

// (account, denom) -> amount; zero balances are stored as absent keys
pub const BALANCES: Map<(&Addr, &str), Uint128> = Map::new("balances");
pub const SUPPLIES: Map<&str, Uint128> = Map::new("supplies");
pub const DENOM_METADATA: Map<&str, DenomMetadata> = Map::new("denom_metadata");

pub fn get_balance(storage: &dyn Storage, addr: &Addr, denom: &str) -> StdResult<Uint128> {
    Ok(BALANCES.may_load(storage, (addr, denom))?.unwrap_or_default())
}

pub fn get_supply(storage: &dyn Storage, denom: &str) -> StdResult<Uint128> {
    Ok(SUPPLIES.may_load(storage, denom)?.unwrap_or_default())
}

pub fn set_denom_metadata(storage: &mut dyn Storage, metadata: &DenomMetadata) -> StdResult<()> {
    DENOM_METADATA.save(storage, &metadata.denom, metadata)
}

pub fn get_denom_metadata(storage: &dyn Storage, denom: &str) -> StdResult<Option<DenomMetadata>> {
    DENOM_METADATA.may_load(storage, denom)
}

/// Creates coins out of thin air. Does not traverse the send hook.
pub fn mint(
    storage: &mut dyn Storage,
    recipient: &Addr,
    coin: &Coin,
) -> Result<(), ContractError> {
    SUPPLIES.update(storage, &coin.denom, |supply: Option<Uint128>| -> StdResult<_> {
        Ok(supply.unwrap_or_default().checked_add(coin.amount)?)
    })?;
    credit(storage, recipient, coin)?;
    Ok(())
}

/// Destroys coins held by `from` and reduces total supply. Does not
/// traverse the send hook.
pub fn burn(storage: &mut dyn Storage, from: &Addr, coin: &Coin) -> Result<(), ContractError> {
    deduct(storage, from, coin)?;
    reduce_supply(storage, coin)?;
    Ok(())
}

/// Moves coins from the sender to the recipient, mediated by the
/// before-send hook.
pub fn send(
    storage: &mut dyn Storage,
    sender: &Addr,
    recipient: &Addr,
    amount: &[Coin],
) -> Result<Vec<Coin>, ContractError> {
    let inputs = vec![(sender.clone(), amount.to_vec())];
    let outputs = vec![(recipient.clone(), amount.to_vec())];
    transfer(storage, &inputs, &outputs, SendMode::Direct)
}

/// Bank-style multi-send, mediated by the before-send hook.
pub fn multi_send(
    storage: &mut dyn Storage,
    inputs: &[(Addr, Vec<Coin>)],
    outputs: &[(Addr, Vec<Coin>)],
) -> Result<Vec<Coin>, ContractError> {
    transfer(storage, inputs, outputs, SendMode::Multi)
}

/// Runs every check (coin validity, per-denom conservation, the policy
/// hook, debit coverage) before the first write, so a rejected transfer
/// leaves storage untouched. Returns the burned amounts per denom.
fn transfer(
    storage: &mut dyn Storage,
    inputs: &[(Addr, Vec<Coin>)],
    outputs: &[(Addr, Vec<Coin>)],
    mode: SendMode,
) -> Result<Vec<Coin>, ContractError> {
    if inputs.is_empty() || outputs.is_empty() {
        return Err(ContractError::invalid_input(
            "transfer requires at least one input and one output",
        ));
    }
    for (_, coins) in inputs.iter().chain(outputs.iter()) {
        validate_coins(coins)?;
    }

    let mut sent = Vec::new();
    for (sender, coins) in inputs {
        for coin in coins {
            accumulate(&mut sent, sender, &coin.denom, coin.amount)?;
        }
    }
    let mut received = Vec::new();
    for (recipient, coins) in outputs {
        for coin in coins {
            accumulate(&mut received, recipient, &coin.denom, coin.amount)?;
        }
    }
    for denom in sent
        .iter()
        .map(|(_, d, _)| d)
        .chain(received.iter().map(|(_, d, _)| d))
    {
        let sent_total = denom_total(&sent, denom);
        let received_total = denom_total(&received, denom);
        if sent_total != received_total {
            return Err(ContractError::invalid_input(format!(
                "input and output amounts of {denom} do not match"
            )));
        }
    }

    let burns = hook::before_send(storage, inputs, outputs, mode)?;

    // every debit (sent + burned) must be covered before anything moves
    let mut debits = sent.clone();
    for (sender, coin) in &burns {
        accumulate(&mut debits, sender, &coin.denom, coin.amount)?;
    }
    for (sender, denom, amount) in &debits {
        if get_balance(storage, sender, denom)? < *amount {
            return Err(ContractError::InsufficientFunds {});
        }
    }

    for (sender, denom, amount) in &debits {
        deduct(
            storage,
            sender,
            &Coin {
                denom: denom.clone(),
                amount: *amount,
            },
        )?;
    }
    for (recipient, coins) in outputs {
        for coin in coins {
            credit(storage, recipient, coin)?;
        }
    }

    let mut burned = Vec::<Coin>::new();
    for (_, coin) in &burns {
        reduce_supply(storage, coin)?;
        match burned.iter_mut().find(|b| b.denom == coin.denom) {
            Some(total) => total.amount += coin.amount,
            None => burned.push(coin.clone()),
        }
    }
    Ok(burned)
}

fn credit(storage: &mut dyn Storage, addr: &Addr, coin: &Coin) -> StdResult<()> {
    BALANCES.update(
        storage,
        (addr, &coin.denom),
        |balance: Option<Uint128>| -> StdResult<_> {
            Ok(balance.unwrap_or_default().checked_add(coin.amount)?)
        },
    )?;
    Ok(())
}

fn deduct(storage: &mut dyn Storage, addr: &Addr, coin: &Coin) -> Result<(), ContractError> {
    let balance = get_balance(storage, addr, &coin.denom)?;
    let updated = balance
        .checked_sub(coin.amount)
        .map_err(|_| ContractError::InsufficientFunds {})?;
    if updated.is_zero() {
        BALANCES.remove(storage, (addr, &coin.denom));
    } else {
        BALANCES.save(storage, (addr, &coin.denom), &updated)?;
    }
    Ok(())
}

fn reduce_supply(storage: &mut dyn Storage, coin: &Coin) -> Result<(), ContractError> {
    let supply = get_supply(storage, &coin.denom)?;
    let updated = supply
        .checked_sub(coin.amount)
        .map_err(|_| ContractError::InsufficientFunds {})?;
    if updated.is_zero() {
        SUPPLIES.remove(storage, &coin.denom);
    } else {
        SUPPLIES.save(storage, &coin.denom, &updated)?;
    }
    Ok(())
}

pub(crate) fn validate_coins(coins: &[Coin]) -> Result<(), ContractError> {
    if coins.is_empty() {
        return Err(ContractError::invalid_input("empty coin list"));
    }
    for (i, coin) in coins.iter().enumerate() {
        if coin.amount.is_zero() {
            return Err(ContractError::invalid_input(format!(
                "zero amount of {}",
                coin.denom
            )));
        }
        if coins[..i].iter().any(|c| c.denom == coin.denom) {
            return Err(ContractError::invalid_input(format!(
                "duplicate denom {}",
                coin.denom
            )));
        }
    }
    Ok(())
}

pub(crate) fn accumulate(
    totals: &mut Vec<(Addr, String, Uint128)>,
    addr: &Addr,
    denom: &str,
    amount: Uint128,
) -> StdResult<()> {
    match totals.iter_mut().find(|(a, d, _)| a == addr && d == denom) {
        Some((_, _, total)) => *total = total.checked_add(amount)?,
        None => totals.push((addr.clone(), denom.to_string(), amount)),
    }
    Ok(())
}

fn denom_total(totals: &[(Addr, String, Uint128)], denom: &str) -> Uint128 {
    totals
        .iter()
        .filter(|(_, d, _)| d == denom)
        .map(|(_, _, a)| *a)
        .sum()
}
