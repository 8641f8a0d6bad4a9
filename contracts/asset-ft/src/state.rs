use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal, Storage, Uint128};
use cw_storage_plus::Map;

use crate::error::ContractError;

/// Capability declared once at issuance. There is no way to extend the
/// feature set of an existing token.
#[cw_serde]
#[derive(Copy)]
pub enum TokenFeature {
    Mint,
    Burn,
    Freeze,
    Whitelist,
}

impl TokenFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenFeature::Mint => "mint",
            TokenFeature::Burn => "burn",
            TokenFeature::Freeze => "freeze",
            TokenFeature::Whitelist => "whitelist",
        }
    }
}

#[cw_serde]
pub struct Token {
    pub denom: String,
    pub issuer: Addr,
    pub symbol: String,
    pub subunit: String,
    pub precision: u32,
    pub description: String,
    pub features: Vec<TokenFeature>,
    pub burn_rate: Decimal,
    pub globally_frozen: bool,
}

impl Token {
    pub fn has_feature(&self, feature: TokenFeature) -> bool {
        self.features.contains(&feature)
    }
}

pub const TOKENS: Map<&str, Token> = Map::new("tokens");

// (issuer, lower-cased symbol) index enforcing per-issuer symbol uniqueness
pub const SYMBOLS: Map<(&Addr, &str), bool> = Map::new("symbols");

// (account, denom) -> amount; zero amounts are stored as absent keys
pub const FROZEN_BALANCES: Map<(&Addr, &str), Uint128> = Map::new("frozen_balances");
pub const WHITELISTED_BALANCES: Map<(&Addr, &str), Uint128> = Map::new("whitelisted_balances");

pub fn load_token(storage: &dyn Storage, denom: &str) -> Result<Token, ContractError> {
    TOKENS
        .may_load(storage, denom)?
        .ok_or_else(|| ContractError::TokenNotFound {
            denom: denom.to_string(),
        })
}
