//! Round state machine.
//!
//! A round moves strictly forward through
//! `Bet -> PlayHand -> PlaySplitHand -> ConcludeHands`, skipping the split
//! stage when the player never split. Reaching `ConcludeHands` queues the
//! round for beacon settlement, except for a surrender which settles inline.

use blackjack::rules::{DOUBLE_DOWN_RISK, INITIAL_RISK, INSURANCE_RATIO};
use blackjack::seed::{draw_in_place, hand_seed, Entropy, HandRole, Seed};
use blackjack::{card_value, is_busted, play_out, same_value, surrender_refund};
use cosmwasm_std::{
    Addr, BankMsg, Coin, DepsMut, Env, Event, HexBinary, MessageInfo, Response, StdResult,
    Storage, Uint128,
};

use crate::contract::execute::{load_bankroll, must_pay_exact};
use crate::error::ContractError;
use crate::events;
use crate::risk::apply_ratio;
use crate::state::{Bankroll, Hand, Round, Stage, BANKROLLS, CONFIG, ROUNDS};

impl Round {
    pub fn hand(&self, role: HandRole) -> &Hand {
        match role {
            HandRole::Dealer => &self.dealer,
            HandRole::Player => &self.player,
            HandRole::Split => &self.split,
        }
    }

    pub fn hand_mut(&mut self, role: HandRole) -> &mut Hand {
        match role {
            HandRole::Dealer => &mut self.dealer,
            HandRole::Player => &mut self.player,
            HandRole::Split => &mut self.split,
        }
    }

    /// Hand the player is acting on in the current stage.
    fn active_role(&self) -> Option<HandRole> {
        match self.stage {
            Stage::PlayHand => Some(HandRole::Player),
            Stage::PlaySplitHand => Some(HandRole::Split),
            Stage::Bet | Stage::ConcludeHands => None,
        }
    }
}

fn invalid_stage(round: &Round) -> ContractError {
    ContractError::InvalidStage {
        stage: round.stage.as_str().to_string(),
    }
}

fn require_play_hand(round: &Round) -> Result<(), ContractError> {
    if round.stage != Stage::PlayHand {
        return Err(invalid_stage(round));
    }
    Ok(())
}

/// Load the bankroll and a round owned by `sender`.
fn load_owned(
    storage: &dyn Storage,
    sender: &Addr,
    denom: &str,
    round_id: u64,
) -> Result<(Bankroll, Round), ContractError> {
    let bankroll = load_bankroll(storage, denom)?;
    let round = ROUNDS
        .may_load(storage, (denom, round_id))?
        .ok_or(ContractError::RoundNotFound { round_id })?;
    if round.owner != *sender {
        return Err(ContractError::Unauthorized {});
    }
    Ok((bankroll, round))
}

fn save(storage: &mut dyn Storage, bankroll: &Bankroll, round: &Round) -> StdResult<()> {
    BANKROLLS.save(storage, &bankroll.denom, bankroll)?;
    ROUNDS.save(storage, (bankroll.denom.as_str(), round.round_number), round)
}

/// Draw one card into `role`'s hand, advancing the hand and bankroll seeds.
fn deal(
    round: &mut Round,
    bankroll: &mut Bankroll,
    role: HandRole,
    entropy: &Entropy,
    decks: u8,
    log: &mut Vec<Event>,
) -> StdResult<u16> {
    let card = round
        .hand_mut(role)
        .draw(&mut bankroll.seed, entropy, decks)?;
    log.push(events::card_drawn(
        &bankroll.denom,
        round.round_number,
        role,
        card,
    ));
    Ok(card)
}

fn set_stage(round: &mut Round, denom: &str, to: Stage, log: &mut Vec<Event>) {
    log.push(events::stage_changed(
        denom,
        round.round_number,
        &round.stage,
        &to,
    ));
    round.stage = to;
}

/// Step to the next stage. Entering `ConcludeHands` queues the round.
fn advance(round: &mut Round, bankroll: &mut Bankroll, log: &mut Vec<Event>) {
    let next = match round.stage {
        Stage::Bet => Stage::PlayHand,
        Stage::PlayHand if round.has_split() => Stage::PlaySplitHand,
        Stage::PlayHand | Stage::PlaySplitHand => Stage::ConcludeHands,
        Stage::ConcludeHands => return,
    };
    let concluded = next == Stage::ConcludeHands;
    set_stage(round, &bankroll.denom, next, log);
    if concluded {
        bankroll.enqueue(round.round_number);
    }
}

/// Play the dealer hand out. Returns whether the dealer ends on a natural.
pub(crate) fn play_dealer(
    round: &mut Round,
    bankroll: &mut Bankroll,
    entropy: &Entropy,
    decks: u8,
    log: &mut Vec<Event>,
) -> StdResult<bool> {
    let players_busted = is_busted(&round.player.cards)
        && (!round.has_split() || is_busted(&round.split.cards));

    let mut dealer_seed = round.dealer.seed_bytes()?;
    let mut global_seed: Seed = bankroll.seed.to_array()?;
    let mut cards = round.dealer.cards.clone();
    let mut drawn = vec![];
    let natural = play_out(&mut cards, players_busted, || {
        let card = draw_in_place(&mut dealer_seed, &mut global_seed, entropy, decks);
        drawn.push(card);
        card
    });

    round.dealer.seed = HexBinary::from(dealer_seed.as_slice());
    round.dealer.set_cards(cards);
    bankroll.seed = HexBinary::from(global_seed.as_slice());
    for card in drawn {
        log.push(events::card_drawn(
            &bankroll.denom,
            round.round_number,
            HandRole::Dealer,
            card,
        ));
    }
    Ok(natural)
}

fn play_response(action: &str, round: &Round, denom: &str, log: Vec<Event>) -> Response {
    Response::new()
        .add_attribute("action", action)
        .add_attribute("denom", denom)
        .add_attribute("round_id", round.round_number.to_string())
        .add_attribute("stage", round.stage.as_str())
        .add_events(log)
}

pub fn execute_start_round(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    denom: String,
    bet: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut bankroll = load_bankroll(deps.storage, &denom)?;

    if bet < bankroll.min_bet || bet > bankroll.max_bet {
        return Err(ContractError::InvalidBetAmount {
            reason: format!(
                "bet {bet} outside [{}, {}]",
                bankroll.min_bet, bankroll.max_bet
            ),
        });
    }
    must_pay_exact(&info, &denom, bet)?;

    let risk = apply_ratio(INITIAL_RISK, bet)?;
    bankroll.add_risk(risk)?;

    let round_id = bankroll.round_counter;
    bankroll.round_counter += 1;

    let global: Seed = bankroll.seed.to_array()?;
    let owner = info.sender.as_str();
    let mut round = Round {
        owner: info.sender.clone(),
        stage: Stage::Bet,
        round_number: round_id,
        total_risk: risk,
        started_at: env.block.time,
        dealer: Hand::new(hand_seed(HandRole::Dealer, owner, round_id, &global)),
        player: Hand::new(hand_seed(HandRole::Player, owner, round_id, &global)),
        split: Hand::new(hand_seed(HandRole::Split, owner, round_id, &global)),
    };
    round.player.bet = bet;
    round.player.wager = bet;

    let entropy = Entropy::from_timestamp(env.block.time.nanos());
    let mut log = vec![events::bet_placed(&denom, round_id, owner, "bet", bet)];
    for role in [HandRole::Player, HandRole::Dealer, HandRole::Player] {
        deal(&mut round, &mut bankroll, role, &entropy, config.decks, &mut log)?;
    }
    advance(&mut round, &mut bankroll, &mut log);

    save(deps.storage, &bankroll, &round)?;

    Ok(play_response("start_round", &round, &denom, log)
        .add_attribute("owner", info.sender)
        .add_attribute("bet", bet)
        .add_attribute("risk", risk))
}

pub fn execute_split(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    denom: String,
    round_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let (mut bankroll, mut round) = load_owned(deps.storage, &info.sender, &denom, round_id)?;
    require_play_hand(&round)?;

    let invalid = |reason: &str| ContractError::InvalidSplit {
        reason: reason.to_string(),
    };
    let cards = &round.player.cards;
    if cards.len() != 2 || !same_value(cards[0], cards[1]) {
        return Err(invalid("hand must be two cards of equal value"));
    }
    if !round.player.double_down.is_zero() || !round.player.insurance.is_zero() {
        return Err(invalid("double down or insurance already taken"));
    }
    if round.has_split() {
        return Err(invalid("hand already split"));
    }

    let bet = round.player.bet;
    must_pay_exact(&info, &denom, bet)?;
    let risk = apply_ratio(INITIAL_RISK, bet)?;
    bankroll.add_risk(risk)?;
    round.total_risk = round.total_risk.checked_add(risk)?;

    if let Some(card) = round.player.pop_card() {
        round.split.push_card(card);
    }
    round.split.bet = bet;
    round.split.wager = bet;

    let entropy = Entropy::from_timestamp(env.block.time.nanos());
    let mut log = vec![events::bet_placed(
        &denom,
        round_id,
        info.sender.as_str(),
        "split",
        bet,
    )];
    deal(&mut round, &mut bankroll, HandRole::Player, &entropy, config.decks, &mut log)?;
    deal(&mut round, &mut bankroll, HandRole::Split, &entropy, config.decks, &mut log)?;

    save(deps.storage, &bankroll, &round)?;
    Ok(play_response("split", &round, &denom, log))
}

pub fn execute_double_down(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    denom: String,
    round_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let (mut bankroll, mut round) = load_owned(deps.storage, &info.sender, &denom, round_id)?;
    require_play_hand(&round)?;

    let invalid = |reason: &str| ContractError::InvalidDoubleDown {
        reason: reason.to_string(),
    };
    if round.player.cards.len() != 2 {
        return Err(invalid("hand must be exactly two cards"));
    }
    if round.player.score == 21 {
        return Err(invalid("hand is a natural"));
    }
    if !round.player.double_down.is_zero() {
        return Err(invalid("already doubled"));
    }
    if round.has_split() {
        return Err(invalid("hand was split"));
    }

    let bet = round.player.bet;
    must_pay_exact(&info, &denom, bet)?;
    let risk = apply_ratio(DOUBLE_DOWN_RISK, bet)?;
    bankroll.add_risk(risk)?;
    round.total_risk = round.total_risk.checked_add(risk)?;
    round.player.double_down = bet;
    round.player.wager = round.player.wager.checked_add(bet)?;

    let entropy = Entropy::from_timestamp(env.block.time.nanos());
    let mut log = vec![events::bet_placed(
        &denom,
        round_id,
        info.sender.as_str(),
        "double_down",
        bet,
    )];
    deal(&mut round, &mut bankroll, HandRole::Player, &entropy, config.decks, &mut log)?;
    advance(&mut round, &mut bankroll, &mut log);

    save(deps.storage, &bankroll, &round)?;
    Ok(play_response("double_down", &round, &denom, log))
}

pub fn execute_insurance(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    round_id: u64,
) -> Result<Response, ContractError> {
    let (bankroll, mut round) = load_owned(deps.storage, &info.sender, &denom, round_id)?;
    require_play_hand(&round)?;

    let invalid = |reason: &str| ContractError::InvalidInsurance {
        reason: reason.to_string(),
    };
    if round.player.cards.len() != 2 {
        return Err(invalid("hand must be exactly two cards"));
    }
    if !round.player.double_down.is_zero() || round.has_split() {
        return Err(invalid("double down or split already taken"));
    }
    if !round.player.insurance.is_zero() {
        return Err(invalid("already insured"));
    }
    match round.dealer.cards.first() {
        Some(&up) if card_value(up) == 11 => {}
        _ => return Err(invalid("dealer does not show an ace")),
    }

    let amount = apply_ratio(INSURANCE_RATIO, round.player.bet)?;
    if amount.is_zero() {
        return Err(invalid("bet too small to insure"));
    }
    must_pay_exact(&info, &denom, amount)?;
    round.player.insurance = amount;

    let log = vec![events::bet_placed(
        &denom,
        round_id,
        info.sender.as_str(),
        "insurance",
        amount,
    )];
    save(deps.storage, &bankroll, &round)?;
    Ok(play_response("insurance", &round, &denom, log).add_attribute("amount", amount))
}

/// Settles inline: half the bet goes back to the player whatever the dealer
/// draws. The dealer still plays out so the seed chain advances as usual.
pub fn execute_surrender(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    denom: String,
    round_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let (mut bankroll, mut round) = load_owned(deps.storage, &info.sender, &denom, round_id)?;
    require_play_hand(&round)?;

    let invalid = |reason: &str| ContractError::InvalidSurrender {
        reason: reason.to_string(),
    };
    if round.player.cards.len() != 2 {
        return Err(invalid("hand must be exactly two cards"));
    }
    if !round.player.double_down.is_zero()
        || !round.player.insurance.is_zero()
        || round.has_split()
    {
        return Err(invalid("double down, insurance or split already taken"));
    }

    let mut log = vec![];
    set_stage(&mut round, &denom, Stage::ConcludeHands, &mut log);

    let entropy = Entropy::from_timestamp(env.block.time.nanos());
    play_dealer(&mut round, &mut bankroll, &entropy, config.decks, &mut log)?;

    let wager = round.player.take_wager();
    let (refund, forfeit) = surrender_refund(wager.u128())?;
    let (refund, forfeit) = (Uint128::new(refund), Uint128::new(forfeit));

    bankroll.balance = bankroll.balance.checked_add(forfeit)?;
    bankroll.release_risk(round.total_risk);
    log.push(events::round_result(
        &denom,
        round_id,
        "surrender",
        Uint128::zero(),
        forfeit,
        round.dealer.score,
    ));

    BANKROLLS.save(deps.storage, &denom, &bankroll)?;
    ROUNDS.remove(deps.storage, (denom.as_str(), round_id));

    let mut response = play_response("surrender", &round, &denom, log)
        .add_attribute("refund", refund)
        .add_attribute("retained", forfeit);
    if !refund.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: round.owner.to_string(),
            amount: vec![Coin::new(refund, &denom)],
        });
    }
    Ok(response)
}

pub fn execute_hit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    denom: String,
    round_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let (mut bankroll, mut round) = load_owned(deps.storage, &info.sender, &denom, round_id)?;
    let role = round.active_role().ok_or_else(|| invalid_stage(&round))?;

    if round.hand(role).score >= 21 {
        return Err(ContractError::InvalidHit {
            reason: "hand is already at 21 or more".to_string(),
        });
    }
    let split_ace = round
        .player
        .cards
        .first()
        .is_some_and(|&card| card_value(card) == 11);
    if role == HandRole::Player && round.has_split() && split_ace {
        return Err(ContractError::InvalidHit {
            reason: "split aces cannot be hit".to_string(),
        });
    }

    let entropy = Entropy::from_timestamp(env.block.time.nanos());
    let mut log = vec![];
    deal(&mut round, &mut bankroll, role, &entropy, config.decks, &mut log)?;
    if round.hand(role).score >= 21 {
        advance(&mut round, &mut bankroll, &mut log);
    }

    save(deps.storage, &bankroll, &round)?;
    Ok(play_response("hit", &round, &denom, log))
}

pub fn execute_stand(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    round_id: u64,
) -> Result<Response, ContractError> {
    let (mut bankroll, mut round) = load_owned(deps.storage, &info.sender, &denom, round_id)?;
    if round.active_role().is_none() {
        return Err(invalid_stage(&round));
    }

    let mut log = vec![];
    advance(&mut round, &mut bankroll, &mut log);

    save(deps.storage, &bankroll, &round)?;
    Ok(play_response("stand", &round, &denom, log))
}
