use serde::{Deserialize, Serialize};

/// Cards in a single deck. Shoe indices run over `decks * CARDS_PER_DECK`.
pub const CARDS_PER_DECK: u16 = 52;

/// Blackjack value per rank, indexed by `card % 13` (ace first).
pub const RANK_VALUES: [u8; 13] = [11, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

const RANK_LABELS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    fn symbol(&self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }
}

/// Blackjack value of a shoe index.
pub fn card_value(card: u16) -> u8 {
    RANK_VALUES[(card % 13) as usize]
}

/// A card drawn from the shoe, identified by its shoe index.
///
/// Every deck in the shoe is laid out spades, hearts, diamonds, clubs, each
/// suit running ace to king, so `index % 13` is the rank and
/// `(index % 52) / 13` the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card(pub u16);

impl Card {
    /// Rank position, 0 = ace through 12 = king.
    pub fn rank(&self) -> u8 {
        (self.0 % 13) as u8
    }

    pub fn value(&self) -> u8 {
        card_value(self.0)
    }

    pub fn is_ace(&self) -> bool {
        self.rank() == 0
    }

    pub fn suit(&self) -> Suit {
        match (self.0 % CARDS_PER_DECK) / 13 {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            _ => Suit::Clubs,
        }
    }

    pub fn to_display(&self) -> String {
        format!("{}{}", RANK_LABELS[self.rank() as usize], self.suit().symbol())
    }
}

impl From<u16> for Card {
    fn from(index: u16) -> Self {
        Card(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_values_follow_table() {
        assert_eq!(card_value(0), 11); // ace of spades
        assert_eq!(card_value(1), 2);
        assert_eq!(card_value(8), 9);
        assert_eq!(card_value(9), 10);
        assert_eq!(card_value(12), 10); // king
    }

    #[test]
    fn test_rank_repeats_across_suits_and_decks() {
        // ace of hearts, ace of clubs, ace of spades in the second deck
        for index in [13u16, 39, 52, 104] {
            assert!(Card(index).is_ace());
            assert_eq!(Card(index).value(), 11);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Card(0).to_display(), "A♠");
        assert_eq!(Card(22).to_display(), "10♥");
        assert_eq!(Card(38).to_display(), "K♦");
        assert_eq!(Card(49).to_display(), "J♣");
        assert_eq!(Card(52 + 49).to_display(), "J♣");
    }

    #[test]
    fn test_suit_layout() {
        assert_eq!(Card(12).suit(), Suit::Spades);
        assert_eq!(Card(13).suit(), Suit::Hearts);
        assert_eq!(Card(26).suit(), Suit::Diamonds);
        assert_eq!(Card(51).suit(), Suit::Clubs);
    }
}
