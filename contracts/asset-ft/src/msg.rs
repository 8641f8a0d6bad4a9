use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Decimal, Uint128};

use crate::genesis::GenesisState;
use crate::state::{Token, TokenFeature};

#[cw_serde]
pub struct InstantiateMsg {
    /// Module state imported at genesis, if any.
    pub genesis: Option<GenesisState>,
}

/// An address together with the coins it sends or receives. Used for
/// multi-send entries and genesis balances alike.
#[cw_serde]
pub struct Balance {
    pub address: String,
    pub coins: Vec<Coin>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Create a new fungible token denominated `subunit-{issuer}` and mint
    /// `initial_amount` of it to the issuer (the message sender).
    Issue {
        symbol: String,
        subunit: String,
        precision: u32,
        initial_amount: Uint128,
        description: String,
        features: Vec<TokenFeature>,
        burn_rate: Option<Decimal>,
    },
    /// Only with the "mint" feature. Issuer-only: mints to the issuer.
    Mint { coin: Coin },
    /// Only with the "burn" feature. Issuer-only: burns from the issuer.
    Burn { coin: Coin },
    /// Only with the "freeze" feature. Issuer-only: increases the frozen
    /// amount on the account. May exceed the account's current balance.
    Freeze { account: String, coin: Coin },
    /// Only with the "freeze" feature. Issuer-only: decreases the frozen
    /// amount on the account.
    Unfreeze { account: String, coin: Coin },
    /// Only with the "freeze" feature. Issuer-only: halts all transfers of
    /// the denom. Idempotent.
    GloballyFreeze { denom: String },
    /// Only with the "freeze" feature. Issuer-only: lifts a global freeze.
    /// Idempotent.
    GloballyUnfreeze { denom: String },
    /// Only with the "whitelist" feature. Issuer-only: sets the absolute
    /// holding cap for the account. Zero revokes the entry.
    SetWhitelistedLimit { account: String, coin: Coin },
    /// Transfer coins from the sender to the recipient, subject to the
    /// freeze/whitelist policies and the burn rate.
    Send { recipient: String, amount: Vec<Coin> },
    /// Bank-style multi-send. Every input address must be the message
    /// sender; per-denom input and output totals must match.
    MultiSend {
        inputs: Vec<Balance>,
        outputs: Vec<Balance>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(TokenResponse)]
    Token { denom: String },
    /// Tokens issued by the given issuer. Supports pagination.
    #[returns(TokensResponse)]
    Tokens {
        issuer: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(FrozenBalanceResponse)]
    FrozenBalance { account: String, denom: String },
    /// All frozen balances of the account. Supports pagination.
    #[returns(FrozenBalancesResponse)]
    FrozenBalances {
        account: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(WhitelistedBalanceResponse)]
    WhitelistedBalance { account: String, denom: String },
    /// All whitelisted limits of the account. Supports pagination.
    #[returns(WhitelistedBalancesResponse)]
    WhitelistedBalances {
        account: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Bank balance of the address, 0 if unset.
    #[returns(BalanceResponse)]
    Balance { address: String, denom: String },
    /// Total supply of the denom, 0 if unset.
    #[returns(TotalSupplyResponse)]
    TotalSupply { denom: String },
    /// Exports the module state in genesis form.
    #[returns(GenesisState)]
    GenesisState {},
}

#[cw_serde]
pub struct TokenResponse {
    pub token: Token,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<Token>,
}

#[cw_serde]
pub struct FrozenBalanceResponse {
    pub balance: Coin,
}

#[cw_serde]
pub struct FrozenBalancesResponse {
    pub balances: Vec<Coin>,
}

#[cw_serde]
pub struct WhitelistedBalanceResponse {
    pub balance: Coin,
}

#[cw_serde]
pub struct WhitelistedBalancesResponse {
    pub balances: Vec<Coin>,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Coin,
}

#[cw_serde]
pub struct TotalSupplyResponse {
    pub amount: Coin,
}
