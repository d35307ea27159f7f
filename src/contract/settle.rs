use blackjack::payout::{settle, HandStake, Settlement};
use blackjack::seed::Entropy;
use cosmwasm_std::{
    BankMsg, Coin, CosmosMsg, DepsMut, Event, HexBinary, MessageInfo, Response, Uint128,
};

use crate::auth::require;
use crate::beacon::{beacon_entropy, verify_beacon};
use crate::contract::execute::load_bankroll;
use crate::contract::play::play_dealer;
use crate::error::ContractError;
use crate::events;
use crate::state::{Bankroll, Hand, PrivilegeTier, Round, Stage, BANKROLLS, CONFIG, ROUNDS};

/// Funds movement of one settled round.
struct RoundPayout {
    message: Option<CosmosMsg>,
    payout: Uint128,
    retained: Uint128,
}

/// Stake of `hand`, backed by the funds it held. The held wager must cover
/// exactly the bet and double-down.
fn held_stake(
    hand: &Hand,
    held: Uint128,
    round_id: u64,
) -> Result<HandStake<'_>, ContractError> {
    let stake = HandStake {
        cards: &hand.cards,
        bet: hand.bet.u128(),
        double_down: hand.double_down.u128(),
    };
    let staked = Uint128::new(stake.stake()?);
    if held != staked {
        return Err(ContractError::WagerMismatch {
            round_id,
            held: held.to_string(),
            staked: staked.to_string(),
        });
    }
    Ok(stake)
}

fn outcome(settlement: &Settlement) -> &'static str {
    let hands = std::iter::once(&settlement.main).chain(settlement.split.iter());
    let (mut wins, mut ties, mut count) = (0, 0, 0);
    for hand in hands {
        count += 1;
        if hand.is_win() {
            wins += 1;
        } else if hand.tie {
            ties += 1;
        }
    }
    match (wins, ties) {
        (w, _) if w == count => "win",
        (0, t) if t == count => "push",
        (0, 0) => "loss",
        _ => "mixed",
    }
}

/// Play the dealer out, resolve every hand and route the staked funds.
fn settle_round(
    round: &mut Round,
    bankroll: &mut Bankroll,
    entropy: &Entropy,
    decks: u8,
    log: &mut Vec<Event>,
) -> Result<RoundPayout, ContractError> {
    let dealer_natural = play_dealer(round, bankroll, entropy, decks, log)?;

    // held funds are released to settlement exactly once
    let main_held = round.player.take_wager();
    let split_held = round.split.take_wager();
    let insurance = round.player.take_insurance();

    let main = held_stake(&round.player, main_held, round.round_number)?;
    let split = if round.has_split() {
        Some(held_stake(&round.split, split_held, round.round_number)?)
    } else {
        None
    };
    let settlement = settle(
        &main,
        split.as_ref(),
        insurance.u128(),
        &round.dealer.cards,
        dealer_natural,
    )?;

    let payout = Uint128::new(settlement.payout);
    let retained = Uint128::new(settlement.retained);
    let to_player = Uint128::new(settlement.to_player);

    bankroll.balance = bankroll.balance.checked_add(retained)?.checked_sub(payout)?;
    bankroll.release_risk(round.total_risk);

    log.push(events::round_result(
        &bankroll.denom,
        round.round_number,
        outcome(&settlement),
        payout,
        retained,
        round.dealer.score,
    ));

    let message = (!to_player.is_zero()).then(|| {
        BankMsg::Send {
            to_address: round.owner.to_string(),
            amount: vec![Coin::new(to_player, &bankroll.denom)],
        }
        .into()
    });

    Ok(RoundPayout {
        message,
        payout,
        retained,
    })
}

/// Settle up to `max_count` concluded rounds against one verified beacon
/// round, most recently concluded first.
pub fn execute_settle(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    beacon_round: u64,
    signature: HexBinary,
    previous_signature: HexBinary,
    max_count: u32,
) -> Result<Response, ContractError> {
    require(
        deps.storage,
        &info.sender,
        PrivilegeTier::Operator,
        Some(denom.as_str()),
    )?;
    let config = CONFIG.load(deps.storage)?;
    let mut bankroll = load_bankroll(deps.storage, &denom)?;

    let verified = verify_beacon(
        deps.as_ref(),
        &config.beacon_verifier,
        beacon_round,
        &signature,
        &previous_signature,
    )?;
    if !verified {
        return Err(ContractError::BeaconUnverified {
            round: beacon_round,
        });
    }
    let entropy = beacon_entropy(&signature);

    let batch = bankroll.take_pending(max_count);
    let mut log = vec![];
    let mut messages = vec![];
    let mut total_payout = Uint128::zero();
    let mut total_retained = Uint128::zero();

    for round_id in &batch {
        let mut round = ROUNDS
            .may_load(deps.storage, (denom.as_str(), *round_id))?
            .ok_or(ContractError::QueueCorrupted {
                round_id: *round_id,
            })?;
        if round.stage != Stage::ConcludeHands {
            return Err(ContractError::QueueCorrupted {
                round_id: *round_id,
            });
        }

        let result = settle_round(&mut round, &mut bankroll, &entropy, config.decks, &mut log)?;
        deps.api.debug(&format!(
            "pooljack: settled {denom}/{round_id} payout={} retained={} dealer={:?}",
            result.payout, result.retained, round.dealer.cards
        ));

        total_payout = total_payout.checked_add(result.payout)?;
        total_retained = total_retained.checked_add(result.retained)?;
        messages.extend(result.message);
        ROUNDS.remove(deps.storage, (denom.as_str(), *round_id));
    }

    BANKROLLS.save(deps.storage, &denom, &bankroll)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "settle")
        .add_attribute("denom", &denom)
        .add_attribute("beacon_round", beacon_round.to_string())
        .add_attribute("settled", batch.len().to_string())
        .add_attribute(
            "round_ids",
            batch
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        )
        .add_attribute("total_payout", total_payout)
        .add_attribute("total_retained", total_retained)
        .add_attribute("randomness", hex::encode(entropy.as_bytes()))
        .add_events(log))
}
