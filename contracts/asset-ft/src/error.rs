use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("Invalid denom")]
    InvalidDenom {},
    #[error("Token not found: {denom}")]
    TokenNotFound { denom: String },
    #[error("Already exists")]
    AlreadyExists {},
    #[error("Unauthorized")]
    Unauthorized {},
    #[error("Feature not active")]
    FeatureNotActive {},
    #[error("Not enough balance")]
    NotEnoughBalance {},
    #[error("Insufficient funds")]
    InsufficientFunds {},
    #[error("Globally frozen: {denom}")]
    GloballyFrozen { denom: String },
    #[error("Whitelisted limit exceeded")]
    WhitelistedLimitExceeded {},
}

impl ContractError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        ContractError::InvalidInput {
            reason: reason.into(),
        }
    }
}
