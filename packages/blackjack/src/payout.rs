//! Round settlement arithmetic.
//!
//! Resolves up to two player hands against the dealer and works out how the
//! staked funds are routed between the player and the bankroll.

use thiserror::Error;

use crate::hand::{is_busted, is_natural, score};
use crate::rules::{BLACKJACK_PAYOUT, INSURANCE_PAYOUT_MULTIPLIER, SURRENDER_REFUND};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PayoutError {
    #[error("payout {payout} exceeds cap {cap}")]
    ExceedsCap { payout: u128, cap: u128 },

    #[error("payout arithmetic overflow")]
    Overflow,
}

/// A player hand as seen by settlement.
#[derive(Debug, Clone, Copy)]
pub struct HandStake<'a> {
    pub cards: &'a [u16],
    pub bet: u128,
    pub double_down: u128,
}

impl HandStake<'_> {
    /// Funds the player put behind this hand.
    pub fn stake(&self) -> Result<u128, PayoutError> {
        self.bet
            .checked_add(self.double_down)
            .ok_or(PayoutError::Overflow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandResolution {
    /// Winnings on top of the returned stake. Zero on a loss or a tie.
    pub payout: u128,
    pub tie: bool,
}

impl HandResolution {
    const LOSS: Self = Self { payout: 0, tie: false };
    const TIE: Self = Self { payout: 0, tie: true };

    pub fn is_win(&self) -> bool {
        self.payout > 0
    }
}

/// Outcome of a full round and its fund routing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settlement {
    pub main: HandResolution,
    pub split: Option<HandResolution>,
    pub insurance_payout: u128,
    /// Winnings drawn from the bankroll, hands plus insurance.
    pub payout: u128,
    /// Stakes forfeited to the bankroll.
    pub retained: u128,
    /// Everything sent back to the player: returned stakes plus winnings.
    pub to_player: u128,
}

/// Resolve one hand against the final dealer hand.
///
/// Hands produced by a split never count as naturals.
pub fn resolve_hand(
    hand: &HandStake,
    dealer_cards: &[u16],
    dealer_natural: bool,
    has_split: bool,
) -> Result<HandResolution, PayoutError> {
    let player_natural = !has_split && is_natural(hand.cards);

    if player_natural || dealer_natural {
        return Ok(match (player_natural, dealer_natural) {
            (true, true) => HandResolution::TIE,
            (true, false) => HandResolution {
                payout: BLACKJACK_PAYOUT
                    .apply(hand.bet)
                    .ok_or(PayoutError::Overflow)?,
                tie: false,
            },
            _ => HandResolution::LOSS,
        });
    }

    if is_busted(hand.cards) {
        return Ok(HandResolution::LOSS);
    }

    let player = score(hand.cards);
    let dealer = score(dealer_cards);
    if is_busted(dealer_cards) || player > dealer {
        Ok(HandResolution {
            payout: hand.stake()?,
            tie: false,
        })
    } else if player == dealer {
        Ok(HandResolution::TIE)
    } else {
        Ok(HandResolution::LOSS)
    }
}

/// Hard cap on the hand payouts of a round.
pub fn payout_cap(bet: u128, has_split: bool) -> Result<u128, PayoutError> {
    let factor = if has_split { 3 } else { 2 };
    bet.checked_mul(factor).ok_or(PayoutError::Overflow)
}

/// Settle a round: insurance first, then the main hand and the split hand.
pub fn settle(
    main: &HandStake,
    split: Option<&HandStake>,
    insurance: u128,
    dealer_cards: &[u16],
    dealer_natural: bool,
) -> Result<Settlement, PayoutError> {
    let mut settlement = Settlement::default();

    if insurance > 0 {
        if dealer_natural {
            settlement.insurance_payout = insurance
                .checked_mul(INSURANCE_PAYOUT_MULTIPLIER)
                .ok_or(PayoutError::Overflow)?;
            settlement.to_player = add(insurance, settlement.insurance_payout)?;
        } else {
            settlement.retained = insurance;
        }
    }

    let has_split = split.is_some();
    let resolution = resolve_hand(main, dealer_cards, dealer_natural, has_split)?;
    route(&mut settlement, main, resolution)?;
    settlement.main = resolution;

    let mut hand_payouts = resolution.payout;
    if let Some(split) = split {
        let resolution = resolve_hand(split, dealer_cards, dealer_natural, has_split)?;
        route(&mut settlement, split, resolution)?;
        hand_payouts = add(hand_payouts, resolution.payout)?;
        settlement.split = Some(resolution);
    }

    let cap = payout_cap(main.bet, has_split)?;
    if hand_payouts > cap {
        return Err(PayoutError::ExceedsCap {
            payout: hand_payouts,
            cap,
        });
    }

    settlement.payout = add(hand_payouts, settlement.insurance_payout)?;
    Ok(settlement)
}

/// Surrender hands back half the bet. Returns `(refund, forfeited)`.
pub fn surrender_refund(bet: u128) -> Result<(u128, u128), PayoutError> {
    let refund = SURRENDER_REFUND.apply(bet).ok_or(PayoutError::Overflow)?;
    Ok((refund, bet - refund))
}

fn route(
    settlement: &mut Settlement,
    hand: &HandStake,
    resolution: HandResolution,
) -> Result<(), PayoutError> {
    let stake = hand.stake()?;
    if resolution.is_win() {
        settlement.to_player = add(settlement.to_player, add(stake, resolution.payout)?)?;
    } else if resolution.tie {
        settlement.to_player = add(settlement.to_player, stake)?;
    } else {
        settlement.retained = add(settlement.retained, stake)?;
    }
    Ok(())
}

fn add(a: u128, b: u128) -> Result<u128, PayoutError> {
    a.checked_add(b).ok_or(PayoutError::Overflow)
}
