//! Typed events emitted alongside response attributes.
//!
//! Events are observational only. Nothing in the contract reads them back.

use blackjack::{Card, HandRole};
use cosmwasm_std::{Event, Uint128};

use crate::state::Stage;

pub fn bet_placed(denom: &str, round_id: u64, owner: &str, kind: &str, amount: Uint128) -> Event {
    Event::new("pooljack_bet_placed")
        .add_attribute("denom", denom)
        .add_attribute("round_id", round_id.to_string())
        .add_attribute("owner", owner)
        .add_attribute("kind", kind)
        .add_attribute("amount", amount)
}

pub fn card_drawn(denom: &str, round_id: u64, hand: HandRole, card: u16) -> Event {
    Event::new("pooljack_card_drawn")
        .add_attribute("denom", denom)
        .add_attribute("round_id", round_id.to_string())
        .add_attribute("hand", hand.label())
        .add_attribute("card", card.to_string())
        .add_attribute("display", Card(card).to_display())
}

pub fn stage_changed(denom: &str, round_id: u64, from: &Stage, to: &Stage) -> Event {
    Event::new("pooljack_stage_changed")
        .add_attribute("denom", denom)
        .add_attribute("round_id", round_id.to_string())
        .add_attribute("from", from.as_str())
        .add_attribute("to", to.as_str())
}

pub fn round_result(
    denom: &str,
    round_id: u64,
    outcome: &str,
    payout: Uint128,
    retained: Uint128,
    dealer_score: u8,
) -> Event {
    Event::new("pooljack_round_result")
        .add_attribute("denom", denom)
        .add_attribute("round_id", round_id.to_string())
        .add_attribute("outcome", outcome)
        .add_attribute("payout", payout)
        .add_attribute("retained", retained)
        .add_attribute("dealer_score", dealer_score.to_string())
}

pub fn bankroll_funds(denom: &str, direction: &str, amount: Uint128, balance: Uint128) -> Event {
    Event::new("pooljack_bankroll_funds")
        .add_attribute("denom", denom)
        .add_attribute("direction", direction)
        .add_attribute("amount", amount)
        .add_attribute("balance", balance)
}
