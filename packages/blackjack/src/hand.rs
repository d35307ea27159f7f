use crate::card::card_value;

/// Calculate the value of a blackjack hand.
///
/// Aces count 11 and are demoted to 1, one at a time, while the total is
/// over 21.
pub fn score(cards: &[u16]) -> u8 {
    let mut total: u16 = 0;
    let mut aces = 0;

    for &card in cards {
        let value = card_value(card);
        if value == 11 {
            aces += 1;
        }
        total += value as u16;
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total.min(u8::MAX as u16) as u8
}

/// Check if a hand still counts an ace as 11
pub fn is_soft(cards: &[u16]) -> bool {
    let hard_total: u16 = cards
        .iter()
        .map(|&c| match card_value(c) {
            11 => 1,
            v => v as u16,
        })
        .sum();
    let has_ace = cards.iter().any(|&c| card_value(c) == 11);
    has_ace && hard_total + 10 == score(cards) as u16
}

pub fn is_busted(cards: &[u16]) -> bool {
    score(cards) > 21
}

/// A natural is 21 on exactly two cards.
pub fn is_natural(cards: &[u16]) -> bool {
    cards.len() == 2 && score(cards) == 21
}

/// Split predicate: the two cards carry the same blackjack value.
pub fn same_value(first: u16, second: u16) -> bool {
    card_value(first) == card_value(second)
}
