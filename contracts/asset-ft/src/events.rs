use cosmwasm_std::{Addr, Coin, Event, Uint128};

use crate::state::Token;

pub fn token_issued(token: &Token, initial_amount: Uint128) -> Event {
    let features = token
        .features
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(",");
    Event::new("token_issued")
        .add_attribute("denom", &token.denom)
        .add_attribute("issuer", token.issuer.as_str())
        .add_attribute("symbol", &token.symbol)
        .add_attribute("subunit", &token.subunit)
        .add_attribute("precision", token.precision.to_string())
        .add_attribute("initial_amount", initial_amount)
        .add_attribute("description", &token.description)
        .add_attribute("features", features)
        .add_attribute("burn_rate", token.burn_rate.to_string())
}

pub fn frozen_amount_changed(account: &Addr, previous: Coin, current: Coin) -> Event {
    Event::new("frozen_amount_changed")
        .add_attribute("account", account.as_str())
        .add_attribute("previous_amount", previous.to_string())
        .add_attribute("current_amount", current.to_string())
}

pub fn whitelisted_amount_changed(account: &Addr, previous: Coin, current: Coin) -> Event {
    Event::new("whitelisted_amount_changed")
        .add_attribute("account", account.as_str())
        .add_attribute("previous_amount", previous.to_string())
        .add_attribute("current_amount", current.to_string())
}
