#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use blackjack::{is_soft, Card};
use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{
    BankrollResponse, CapabilityResponse, HandResponse, PendingRoundsResponse, QueryMsg,
    RoundListItem, RoundResponse,
};
use crate::contract::execute;
use crate::state::{Bankroll, Config, Hand, CAPABILITIES, CONFIG, ROUNDS};

const DEFAULT_LIMIT: u32 = 30;
const MAX_LIMIT: u32 = 100;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Bankroll { denom } => to_json_binary(&query_bankroll(deps, denom)?),
        QueryMsg::Round { denom, round_id } => {
            to_json_binary(&query_round(deps, denom, round_id)?)
        }
        QueryMsg::ListRounds {
            denom,
            start_after,
            limit,
        } => to_json_binary(&query_list_rounds(deps, denom, start_after, limit)?),
        QueryMsg::PendingRounds { denom } => to_json_binary(&query_pending(deps, denom)?),
        QueryMsg::Capability { holder } => to_json_binary(&query_capability(deps, holder)?),
    }
}

fn query_config(deps: Deps) -> StdResult<Config> {
    CONFIG.load(deps.storage)
}

fn load_bankroll(deps: Deps, denom: &str) -> StdResult<Bankroll> {
    execute::load_bankroll(deps.storage, denom).map_err(|err| StdError::msg(err.to_string()))
}

fn query_bankroll(deps: Deps, denom: String) -> StdResult<BankrollResponse> {
    let bankroll = load_bankroll(deps, &denom)?;
    Ok(BankrollResponse {
        available: bankroll.available(),
        denom: bankroll.denom,
        balance: bankroll.balance,
        risk: bankroll.risk,
        min_bet: bankroll.min_bet,
        max_bet: bankroll.max_bet,
        round_counter: bankroll.round_counter,
        seed: bankroll.seed,
        pending: bankroll.pending,
    })
}

fn hand_response(hand: Hand) -> HandResponse {
    HandResponse {
        bet: hand.bet,
        double_down: hand.double_down,
        insurance: hand.insurance,
        seed: hand.seed,
        score: hand.score,
        soft: is_soft(&hand.cards),
        display: hand.cards.iter().map(|&c| Card(c).to_display()).collect(),
        cards: hand.cards,
    }
}

fn query_round(deps: Deps, denom: String, round_id: u64) -> StdResult<RoundResponse> {
    let round = ROUNDS
        .may_load(deps.storage, (denom.as_str(), round_id))?
        .ok_or_else(|| StdError::msg(format!("Round {round_id} not found")))?;

    Ok(RoundResponse {
        round_id,
        owner: round.owner.to_string(),
        stage: round.stage,
        total_risk: round.total_risk,
        started_at: round.started_at,
        dealer: hand_response(round.dealer),
        player: hand_response(round.player),
        split: hand_response(round.split),
    })
}

fn query_list_rounds(
    deps: Deps,
    denom: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<RoundListItem>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    ROUNDS
        .prefix(denom.as_str())
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            item.map(|(round_id, round)| RoundListItem {
                round_id,
                owner: round.owner.to_string(),
                stage: round.stage,
                bet: round.player.bet,
                total_risk: round.total_risk,
            })
        })
        .collect()
}

fn query_pending(deps: Deps, denom: String) -> StdResult<PendingRoundsResponse> {
    let bankroll = load_bankroll(deps, &denom)?;
    Ok(PendingRoundsResponse {
        round_ids: bankroll.pending,
    })
}

fn query_capability(deps: Deps, holder: String) -> StdResult<CapabilityResponse> {
    let holder = deps.api.addr_validate(&holder)?;
    Ok(CapabilityResponse {
        capability: CAPABILITIES.may_load(deps.storage, &holder)?,
    })
}
