use crate::error::ContractError;
use crate::{bank, denom, events, genesis, msg::*, state::*};

use cosmwasm_std::{
    attr, to_json_binary, Addr, Binary, Coin, Decimal, Deps, DepsMut, Env, MessageInfo, Order,
    Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

// version info for migration info
const CONTRACT_NAME: &str = "asset-ft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if let Some(genesis_state) = &msg.genesis {
        genesis::init(deps.storage, deps.api, genesis_state)?;
    }

    Ok(Response::default())
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Issue {
            symbol,
            subunit,
            precision,
            initial_amount,
            description,
            features,
            burn_rate,
        } => execute::issue(
            deps,
            env,
            info,
            symbol,
            subunit,
            precision,
            initial_amount,
            description,
            features,
            burn_rate,
        ),
        ExecuteMsg::Mint { coin } => execute::mint(deps, env, info, coin),
        ExecuteMsg::Burn { coin } => execute::burn(deps, env, info, coin),
        ExecuteMsg::Freeze { account, coin } => execute::freeze(deps, env, info, account, coin),
        ExecuteMsg::Unfreeze { account, coin } => {
            execute::unfreeze(deps, env, info, account, coin)
        }
        ExecuteMsg::GloballyFreeze { denom } => execute::globally_freeze(deps, env, info, denom),
        ExecuteMsg::GloballyUnfreeze { denom } => {
            execute::globally_unfreeze(deps, env, info, denom)
        }
        ExecuteMsg::SetWhitelistedLimit { account, coin } => {
            execute::set_whitelisted_limit(deps, env, info, account, coin)
        }
        ExecuteMsg::Send { recipient, amount } => execute::send(deps, env, info, recipient, amount),
        ExecuteMsg::MultiSend { inputs, outputs } => {
            execute::multi_send(deps, env, info, inputs, outputs)
        }
    }
}

pub mod execute {
    use super::*;

    #[allow(clippy::too_many_arguments)]
    pub fn issue(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        symbol: String,
        subunit: String,
        precision: u32,
        initial_amount: Uint128,
        description: String,
        features: Vec<TokenFeature>,
        burn_rate: Option<Decimal>,
    ) -> Result<Response, ContractError> {
        denom::validate_symbol(&symbol)?;
        denom::validate_subunit(&subunit)?;
        denom::validate_precision(precision)?;
        let burn_rate = burn_rate.unwrap_or_default();
        denom::validate_burn_rate(burn_rate)?;

        let issuer = info.sender;
        let token_denom = denom::build_denom(&subunit, &issuer);
        if TOKENS.has(deps.storage, &token_denom) {
            return Err(ContractError::AlreadyExists {});
        }
        let symbol_key = symbol.to_lowercase();
        if SYMBOLS.has(deps.storage, (&issuer, &symbol_key)) {
            return Err(ContractError::invalid_input(format!(
                "duplicate symbol {symbol}"
            )));
        }

        let token = Token {
            denom: token_denom.clone(),
            issuer: issuer.clone(),
            symbol: symbol.clone(),
            subunit,
            precision,
            description: description.clone(),
            features: dedup_features(features),
            burn_rate,
            globally_frozen: false,
        };
        TOKENS.save(deps.storage, &token_denom, &token)?;
        SYMBOLS.save(deps.storage, (&issuer, &symbol_key), &true)?;
        bank::set_denom_metadata(
            deps.storage,
            &bank::DenomMetadata {
                denom: token_denom.clone(),
                symbol,
                description,
                precision,
            },
        )?;

        if !initial_amount.is_zero() {
            bank::mint(
                deps.storage,
                &issuer,
                &Coin {
                    denom: token_denom.clone(),
                    amount: initial_amount,
                },
            )?;
        }

        let res = Response::new()
            .add_attribute("action", "issue")
            .add_attribute("denom", &token_denom)
            .add_event(events::token_issued(&token, initial_amount));
        Ok(res)
    }

    pub fn mint(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        coin: Coin,
    ) -> Result<Response, ContractError> {
        let token = load_token(deps.storage, &coin.denom)?;
        authorize_issuer(&token, &info.sender)?;
        require_feature(&token, TokenFeature::Mint)?;
        ensure_positive(&coin)?;

        bank::mint(deps.storage, &token.issuer, &coin)?;

        let res = Response::new()
            .add_attribute("action", "mint")
            .add_attribute("denom", coin.denom)
            .add_attribute("amount", coin.amount);
        Ok(res)
    }

    pub fn burn(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        coin: Coin,
    ) -> Result<Response, ContractError> {
        let token = load_token(deps.storage, &coin.denom)?;
        authorize_issuer(&token, &info.sender)?;
        require_feature(&token, TokenFeature::Burn)?;
        ensure_positive(&coin)?;

        bank::burn(deps.storage, &token.issuer, &coin)?;

        let res = Response::new()
            .add_attribute("action", "burn")
            .add_attribute("denom", coin.denom)
            .add_attribute("amount", coin.amount);
        Ok(res)
    }

    pub fn freeze(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        account: String,
        coin: Coin,
    ) -> Result<Response, ContractError> {
        let token = load_token(deps.storage, &coin.denom)?;
        authorize_issuer(&token, &info.sender)?;
        require_feature(&token, TokenFeature::Freeze)?;
        ensure_positive(&coin)?;

        let account = deps.api.addr_validate(&account)?;
        let previous = FROZEN_BALANCES
            .may_load(deps.storage, (&account, &coin.denom))?
            .unwrap_or_default();
        // frozen amount may exceed the account's balance; inbound coins are
        // then locked up to the recorded amount
        let current = FROZEN_BALANCES.update(
            deps.storage,
            (&account, &coin.denom),
            |frozen: Option<Uint128>| -> StdResult<_> {
                Ok(frozen.unwrap_or_default().checked_add(coin.amount)?)
            },
        )?;

        let res = Response::new()
            .add_attribute("action", "freeze")
            .add_event(events::frozen_amount_changed(
                &account,
                Coin {
                    denom: coin.denom.clone(),
                    amount: previous,
                },
                Coin {
                    denom: coin.denom,
                    amount: current,
                },
            ));
        Ok(res)
    }

    pub fn unfreeze(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        account: String,
        coin: Coin,
    ) -> Result<Response, ContractError> {
        let token = load_token(deps.storage, &coin.denom)?;
        authorize_issuer(&token, &info.sender)?;
        require_feature(&token, TokenFeature::Freeze)?;
        ensure_positive(&coin)?;

        let account = deps.api.addr_validate(&account)?;
        let previous = FROZEN_BALANCES
            .may_load(deps.storage, (&account, &coin.denom))?
            .unwrap_or_default();
        let current = previous
            .checked_sub(coin.amount)
            .map_err(|_| ContractError::NotEnoughBalance {})?;
        if current.is_zero() {
            FROZEN_BALANCES.remove(deps.storage, (&account, &coin.denom));
        } else {
            FROZEN_BALANCES.save(deps.storage, (&account, &coin.denom), &current)?;
        }

        let res = Response::new()
            .add_attribute("action", "unfreeze")
            .add_event(events::frozen_amount_changed(
                &account,
                Coin {
                    denom: coin.denom.clone(),
                    amount: previous,
                },
                Coin {
                    denom: coin.denom,
                    amount: current,
                },
            ));
        Ok(res)
    }

    pub fn globally_freeze(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        token_denom: String,
    ) -> Result<Response, ContractError> {
        let mut token = load_token(deps.storage, &token_denom)?;
        authorize_issuer(&token, &info.sender)?;
        require_feature(&token, TokenFeature::Freeze)?;

        if !token.globally_frozen {
            token.globally_frozen = true;
            TOKENS.save(deps.storage, &token_denom, &token)?;
        }

        let res = Response::new()
            .add_attribute("action", "globally_freeze")
            .add_attribute("denom", token_denom);
        Ok(res)
    }

    pub fn globally_unfreeze(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        token_denom: String,
    ) -> Result<Response, ContractError> {
        let mut token = load_token(deps.storage, &token_denom)?;
        authorize_issuer(&token, &info.sender)?;
        require_feature(&token, TokenFeature::Freeze)?;

        if token.globally_frozen {
            token.globally_frozen = false;
            TOKENS.save(deps.storage, &token_denom, &token)?;
        }

        let res = Response::new()
            .add_attribute("action", "globally_unfreeze")
            .add_attribute("denom", token_denom);
        Ok(res)
    }

    pub fn set_whitelisted_limit(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        account: String,
        coin: Coin,
    ) -> Result<Response, ContractError> {
        let token = load_token(deps.storage, &coin.denom)?;
        authorize_issuer(&token, &info.sender)?;
        require_feature(&token, TokenFeature::Whitelist)?;

        let account = deps.api.addr_validate(&account)?;
        let previous = WHITELISTED_BALANCES
            .may_load(deps.storage, (&account, &coin.denom))?
            .unwrap_or_default();
        // a cap below the current balance is allowed; it only constrains
        // subsequent inbound transfers
        if coin.amount.is_zero() {
            WHITELISTED_BALANCES.remove(deps.storage, (&account, &coin.denom));
        } else {
            WHITELISTED_BALANCES.save(deps.storage, (&account, &coin.denom), &coin.amount)?;
        }

        let res = Response::new()
            .add_attribute("action", "set_whitelisted_limit")
            .add_event(events::whitelisted_amount_changed(
                &account,
                Coin {
                    denom: coin.denom.clone(),
                    amount: previous,
                },
                coin,
            ));
        Ok(res)
    }

    pub fn send(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        recipient: String,
        amount: Vec<Coin>,
    ) -> Result<Response, ContractError> {
        let recipient = deps.api.addr_validate(&recipient)?;
        let burned = bank::send(deps.storage, &info.sender, &recipient, &amount)?;

        let mut attrs = vec![
            attr("action", "send"),
            attr("from", info.sender.as_str()),
            attr("to", recipient.as_str()),
            attr("amount", format_coins(&amount)),
        ];
        for coin in &burned {
            attrs.push(attr("burn_amount", coin.to_string()));
        }
        Ok(Response::new().add_attributes(attrs))
    }

    pub fn multi_send(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        inputs: Vec<Balance>,
        outputs: Vec<Balance>,
    ) -> Result<Response, ContractError> {
        // the host verifies exactly one signature per message, so every
        // input must belong to the sender
        let mut checked_inputs = Vec::with_capacity(inputs.len());
        for input in inputs {
            let address = deps.api.addr_validate(&input.address)?;
            if address != info.sender {
                return Err(ContractError::Unauthorized {});
            }
            checked_inputs.push((address, input.coins));
        }
        let mut checked_outputs = Vec::with_capacity(outputs.len());
        for output in outputs {
            let address = deps.api.addr_validate(&output.address)?;
            checked_outputs.push((address, output.coins));
        }

        let burned = bank::multi_send(deps.storage, &checked_inputs, &checked_outputs)?;

        let mut attrs = vec![attr("action", "multi_send"), attr("from", info.sender.as_str())];
        for coin in &burned {
            attrs.push(attr("burn_amount", coin.to_string()));
        }
        Ok(Response::new().add_attributes(attrs))
    }

    fn dedup_features(features: Vec<TokenFeature>) -> Vec<TokenFeature> {
        let mut deduped = Vec::with_capacity(features.len());
        for feature in features {
            if !deduped.contains(&feature) {
                deduped.push(feature);
            }
        }
        deduped
    }

    fn authorize_issuer(token: &Token, sender: &Addr) -> Result<(), ContractError> {
        if *sender != token.issuer {
            return Err(ContractError::Unauthorized {});
        }
        Ok(())
    }

    fn require_feature(token: &Token, feature: TokenFeature) -> Result<(), ContractError> {
        if !token.has_feature(feature) {
            return Err(ContractError::FeatureNotActive {});
        }
        Ok(())
    }

    fn ensure_positive(coin: &Coin) -> Result<(), ContractError> {
        if coin.amount.is_zero() {
            return Err(ContractError::invalid_input(format!(
                "zero amount of {}",
                coin.denom
            )));
        }
        Ok(())
    }

    fn format_coins(coins: &[Coin]) -> String {
        coins
            .iter()
            .map(|coin| coin.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Token { denom } => to_json_binary(&query::token(deps, denom)?),
        QueryMsg::Tokens {
            issuer,
            start_after,
            limit,
        } => to_json_binary(&query::tokens(deps, issuer, start_after, limit)?),
        QueryMsg::FrozenBalance { account, denom } => {
            to_json_binary(&query::frozen_balance(deps, account, denom)?)
        }
        QueryMsg::FrozenBalances {
            account,
            start_after,
            limit,
        } => to_json_binary(&query::frozen_balances(deps, account, start_after, limit)?),
        QueryMsg::WhitelistedBalance { account, denom } => {
            to_json_binary(&query::whitelisted_balance(deps, account, denom)?)
        }
        QueryMsg::WhitelistedBalances {
            account,
            start_after,
            limit,
        } => to_json_binary(&query::whitelisted_balances(
            deps,
            account,
            start_after,
            limit,
        )?),
        QueryMsg::Balance { address, denom } => {
            to_json_binary(&query::balance(deps, address, denom)?)
        }
        QueryMsg::TotalSupply { denom } => to_json_binary(&query::total_supply(deps, denom)?),
        QueryMsg::GenesisState {} => to_json_binary(&genesis::export(deps.storage)?),
    }
}

pub mod query {
    use super::*;

    pub fn token(deps: Deps, denom: String) -> StdResult<TokenResponse> {
        let token = TOKENS.load(deps.storage, &denom)?;
        Ok(TokenResponse { token })
    }

    pub fn tokens(
        deps: Deps,
        issuer: String,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> StdResult<TokensResponse> {
        let issuer = deps.api.addr_validate(&issuer)?;
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
        let start = start_after.as_deref().map(Bound::exclusive);
        let tokens = TOKENS
            .range(deps.storage, start, None, Order::Ascending)
            .filter(|item| match item {
                Ok((_, token)) => token.issuer == issuer,
                Err(_) => true,
            })
            .take(limit)
            .map(|item| item.map(|(_, token)| token))
            .collect::<StdResult<Vec<_>>>()?;
        Ok(TokensResponse { tokens })
    }

    pub fn frozen_balance(
        deps: Deps,
        account: String,
        denom: String,
    ) -> StdResult<FrozenBalanceResponse> {
        let account = deps.api.addr_validate(&account)?;
        let amount = FROZEN_BALANCES
            .may_load(deps.storage, (&account, &denom))?
            .unwrap_or_default();
        Ok(FrozenBalanceResponse {
            balance: Coin { denom, amount },
        })
    }

    pub fn frozen_balances(
        deps: Deps,
        account: String,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> StdResult<FrozenBalancesResponse> {
        let account = deps.api.addr_validate(&account)?;
        let balances = paginate_ledger(deps, &FROZEN_BALANCES, &account, start_after, limit)?;
        Ok(FrozenBalancesResponse { balances })
    }

    pub fn whitelisted_balance(
        deps: Deps,
        account: String,
        denom: String,
    ) -> StdResult<WhitelistedBalanceResponse> {
        let account = deps.api.addr_validate(&account)?;
        let amount = WHITELISTED_BALANCES
            .may_load(deps.storage, (&account, &denom))?
            .unwrap_or_default();
        Ok(WhitelistedBalanceResponse {
            balance: Coin { denom, amount },
        })
    }

    pub fn whitelisted_balances(
        deps: Deps,
        account: String,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> StdResult<WhitelistedBalancesResponse> {
        let account = deps.api.addr_validate(&account)?;
        let balances = paginate_ledger(deps, &WHITELISTED_BALANCES, &account, start_after, limit)?;
        Ok(WhitelistedBalancesResponse { balances })
    }

    pub fn balance(deps: Deps, address: String, denom: String) -> StdResult<BalanceResponse> {
        let address = deps.api.addr_validate(&address)?;
        let amount = bank::get_balance(deps.storage, &address, &denom)?;
        Ok(BalanceResponse {
            balance: Coin { denom, amount },
        })
    }

    pub fn total_supply(deps: Deps, denom: String) -> StdResult<TotalSupplyResponse> {
        let amount = bank::get_supply(deps.storage, &denom)?;
        Ok(TotalSupplyResponse {
            amount: Coin { denom, amount },
        })
    }

    fn paginate_ledger(
        deps: Deps,
        ledger: &cw_storage_plus::Map<(&Addr, &str), Uint128>,
        account: &Addr,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> StdResult<Vec<Coin>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
        let start = start_after.as_deref().map(Bound::exclusive);
        ledger
            .prefix(account)
            .range(deps.storage, start, None, Order::Ascending)
            .take(limit)
            .map(|item| item.map(|(denom, amount)| Coin { denom, amount }))
            .collect()
    }
}
