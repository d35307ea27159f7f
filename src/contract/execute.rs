#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use blackjack::seed::genesis_seed;
use cosmwasm_std::{
    BankMsg, Coin, DepsMut, Env, HexBinary, MessageInfo, Response, StdError, Storage, Uint128,
};

use crate::auth::{require, require_admin};
use crate::contract::play::{
    execute_double_down, execute_hit, execute_insurance, execute_split, execute_stand,
    execute_start_round, execute_surrender,
};
use crate::contract::settle::execute_settle;
use crate::error::ContractError;
use crate::events;
use crate::msg::ExecuteMsg;
use crate::state::{Bankroll, Capability, PrivilegeTier, BANKROLLS, CAPABILITIES};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateBankroll {
            denom,
            min_bet,
            max_bet,
        } => execute_create_bankroll(deps, env, info, denom, min_bet, max_bet),
        ExecuteMsg::TopUp { denom } => execute_top_up(deps, info, denom),
        ExecuteMsg::Withdraw { denom, amount } => execute_withdraw(deps, info, denom, amount),
        ExecuteMsg::SetMinBet { denom, amount } => {
            execute_set_bet_limit(deps, info, denom, BetLimit::Min, amount)
        }
        ExecuteMsg::SetMaxBet { denom, amount } => {
            execute_set_bet_limit(deps, info, denom, BetLimit::Max, amount)
        }
        ExecuteMsg::GrantCapability {
            holder,
            tier,
            bankroll,
        } => execute_grant_capability(deps, info, holder, tier, bankroll),
        ExecuteMsg::RevokeCapability { holder } => execute_revoke_capability(deps, info, holder),
        ExecuteMsg::StartRound { denom, bet } => execute_start_round(deps, env, info, denom, bet),
        ExecuteMsg::Split { denom, round_id } => execute_split(deps, env, info, denom, round_id),
        ExecuteMsg::DoubleDown { denom, round_id } => {
            execute_double_down(deps, env, info, denom, round_id)
        }
        ExecuteMsg::Insurance { denom, round_id } => {
            execute_insurance(deps, info, denom, round_id)
        }
        ExecuteMsg::Surrender { denom, round_id } => {
            execute_surrender(deps, env, info, denom, round_id)
        }
        ExecuteMsg::Hit { denom, round_id } => execute_hit(deps, env, info, denom, round_id),
        ExecuteMsg::Stand { denom, round_id } => execute_stand(deps, info, denom, round_id),
        ExecuteMsg::Settle {
            denom,
            beacon_round,
            signature,
            previous_signature,
            max_count,
        } => execute_settle(
            deps,
            info,
            denom,
            beacon_round,
            signature,
            previous_signature,
            max_count,
        ),
    }
}

pub fn load_bankroll(storage: &dyn Storage, denom: &str) -> Result<Bankroll, ContractError> {
    BANKROLLS
        .may_load(storage, denom)?
        .ok_or_else(|| ContractError::BankrollNotFound {
            denom: denom.to_string(),
        })
}

/// Funds must be exactly one coin of `denom` for exactly `amount`.
pub fn must_pay_exact(
    info: &MessageInfo,
    denom: &str,
    amount: Uint128,
) -> Result<(), ContractError> {
    let paid = match info.funds.as_slice() {
        [coin] if coin.denom == denom => Uint128::try_from(coin.amount).ok(),
        _ => None,
    };
    if paid != Some(amount) {
        return Err(ContractError::InvalidFunds {
            expected: format!("{amount}{denom}"),
        });
    }
    Ok(())
}

/// Funds must be a single non-zero coin of `denom`. Returns its amount.
fn must_pay_one(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    let invalid = || ContractError::InvalidFunds {
        expected: format!("a single non-zero {denom} coin"),
    };
    match info.funds.as_slice() {
        [coin] if coin.denom == denom => {
            let amount = Uint128::try_from(coin.amount).map_err(|_| invalid())?;
            if amount.is_zero() {
                return Err(invalid());
            }
            Ok(amount)
        }
        _ => Err(invalid()),
    }
}

fn validate_bet_limits(min_bet: Uint128, max_bet: Uint128) -> Result<(), ContractError> {
    if min_bet.is_zero() {
        return Err(ContractError::InvalidBetAmount {
            reason: "min bet must be positive".to_string(),
        });
    }
    if min_bet > max_bet {
        return Err(ContractError::InvalidBetAmount {
            reason: format!("min bet {min_bet} exceeds max bet {max_bet}"),
        });
    }
    Ok(())
}

pub fn execute_create_bankroll(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    denom: String,
    min_bet: Uint128,
    max_bet: Uint128,
) -> Result<Response, ContractError> {
    require_admin(deps.storage, &info.sender)?;

    if BANKROLLS.has(deps.storage, &denom) {
        return Err(ContractError::BankrollExists { denom });
    }
    validate_bet_limits(min_bet, max_bet)?;

    let deposit = if info.funds.is_empty() {
        Uint128::zero()
    } else {
        must_pay_one(&info, &denom)?
    };

    let seed = genesis_seed(
        &denom,
        env.contract.address.as_str(),
        env.block.height,
        env.block.time.nanos(),
    );
    let bankroll = Bankroll {
        denom: denom.clone(),
        balance: deposit,
        risk: Uint128::zero(),
        min_bet,
        max_bet,
        round_counter: 0,
        seed: HexBinary::from(seed.as_slice()),
        pending: vec![],
    };
    BANKROLLS.save(deps.storage, &denom, &bankroll)?;

    let mut response = Response::new()
        .add_attribute("action", "create_bankroll")
        .add_attribute("denom", &denom)
        .add_attribute("min_bet", min_bet)
        .add_attribute("max_bet", max_bet);
    if !deposit.is_zero() {
        response = response.add_event(events::bankroll_funds(
            &denom,
            "deposit",
            deposit,
            bankroll.balance,
        ));
    }
    Ok(response)
}

pub fn execute_top_up(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
) -> Result<Response, ContractError> {
    require(
        deps.storage,
        &info.sender,
        PrivilegeTier::Owner,
        Some(denom.as_str()),
    )?;
    let mut bankroll = load_bankroll(deps.storage, &denom)?;
    let amount = must_pay_one(&info, &denom)?;

    bankroll.balance = bankroll.balance.checked_add(amount)?;
    BANKROLLS.save(deps.storage, &denom, &bankroll)?;

    Ok(Response::new()
        .add_attribute("action", "top_up")
        .add_attribute("denom", &denom)
        .add_attribute("amount", amount)
        .add_event(events::bankroll_funds(
            &denom,
            "deposit",
            amount,
            bankroll.balance,
        )))
}

pub fn execute_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    amount: Option<Uint128>,
) -> Result<Response, ContractError> {
    require(
        deps.storage,
        &info.sender,
        PrivilegeTier::Owner,
        Some(denom.as_str()),
    )?;
    let mut bankroll = load_bankroll(deps.storage, &denom)?;

    let available = bankroll.available();
    let amount = amount.unwrap_or(available);
    if amount.is_zero() {
        return Err(ContractError::Std(StdError::msg("Nothing to withdraw")));
    }
    if amount > available {
        return Err(ContractError::InsufficientBankroll {
            balance: bankroll.balance.to_string(),
            risk: bankroll.risk.to_string(),
            requested: amount.to_string(),
        });
    }

    bankroll.balance = bankroll.balance.checked_sub(amount)?;
    BANKROLLS.save(deps.storage, &denom, &bankroll)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: vec![Coin::new(amount, &denom)],
        })
        .add_attribute("action", "withdraw")
        .add_attribute("denom", &denom)
        .add_attribute("amount", amount)
        .add_event(events::bankroll_funds(
            &denom,
            "withdraw",
            amount,
            bankroll.balance,
        )))
}

enum BetLimit {
    Min,
    Max,
}

fn execute_set_bet_limit(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    limit: BetLimit,
    amount: Uint128,
) -> Result<Response, ContractError> {
    require_admin(deps.storage, &info.sender)?;
    let mut bankroll = load_bankroll(deps.storage, &denom)?;

    let action = match limit {
        BetLimit::Min => {
            validate_bet_limits(amount, bankroll.max_bet)?;
            bankroll.min_bet = amount;
            "set_min_bet"
        }
        BetLimit::Max => {
            validate_bet_limits(bankroll.min_bet, amount)?;
            bankroll.max_bet = amount;
            "set_max_bet"
        }
    };
    BANKROLLS.save(deps.storage, &denom, &bankroll)?;

    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("denom", denom)
        .add_attribute("amount", amount))
}

pub fn execute_grant_capability(
    deps: DepsMut,
    info: MessageInfo,
    holder: String,
    tier: PrivilegeTier,
    bankroll: Option<String>,
) -> Result<Response, ContractError> {
    require_admin(deps.storage, &info.sender)?;
    let holder = deps.api.addr_validate(&holder)?;

    if tier == PrivilegeTier::Admin {
        return Err(ContractError::InvalidConfig {
            reason: "the admin capability is minted once at instantiation".to_string(),
        });
    }
    if let Some(existing) = CAPABILITIES.may_load(deps.storage, &holder)? {
        if existing.tier == PrivilegeTier::Admin {
            return Err(ContractError::InvalidConfig {
                reason: "the admin capability cannot be replaced".to_string(),
            });
        }
    }
    let denom = bankroll.ok_or_else(|| ContractError::InvalidConfig {
        reason: "capability must be bound to a bankroll".to_string(),
    })?;
    load_bankroll(deps.storage, &denom)?;

    let capability = Capability {
        tier,
        bankroll: Some(denom.clone()),
    };
    CAPABILITIES.save(deps.storage, &holder, &capability)?;

    Ok(Response::new()
        .add_attribute("action", "grant_capability")
        .add_attribute("holder", holder)
        .add_attribute("tier", (tier as u8).to_string())
        .add_attribute("bankroll", denom))
}

pub fn execute_revoke_capability(
    deps: DepsMut,
    info: MessageInfo,
    holder: String,
) -> Result<Response, ContractError> {
    require_admin(deps.storage, &info.sender)?;
    let holder = deps.api.addr_validate(&holder)?;

    if let Some(capability) = CAPABILITIES.may_load(deps.storage, &holder)? {
        if capability.tier == PrivilegeTier::Admin {
            return Err(ContractError::InvalidConfig {
                reason: "the admin capability cannot be revoked".to_string(),
            });
        }
    }
    CAPABILITIES.remove(deps.storage, &holder);

    Ok(Response::new()
        .add_attribute("action", "revoke_capability")
        .add_attribute("holder", holder))
}
