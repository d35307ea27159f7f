use crate::card::card_value;
use crate::hand::{is_natural, score};

/// Dealer stands on 17 or more, except a two-card soft 17 which draws once.
///
/// Only the original two cards are inspected: after a third card the soft-17
/// clause no longer applies even if the hand returns to soft 17.
pub fn should_draw(cards: &[u16]) -> bool {
    let total = score(cards);
    if total < 17 {
        return true;
    }
    total == 17 && cards.len() == 2 && cards.iter().any(|&c| card_value(c) == 11)
}

/// Play the dealer hand to completion.
///
/// When every player hand is busted the dealer draws exactly one card and
/// stops. Returns whether the final dealer hand is a natural.
pub fn play_out<F>(cards: &mut Vec<u16>, players_busted: bool, mut draw: F) -> bool
where
    F: FnMut() -> u16,
{
    if players_busted {
        cards.push(draw());
    } else {
        while should_draw(cards) {
            cards.push(draw());
        }
    }
    is_natural(cards)
}
