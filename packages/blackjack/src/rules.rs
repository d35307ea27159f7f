use serde::{Deserialize, Serialize};

/// Fixed-point scale of every [`Ratio`].
pub const RATIO_SCALE: u128 = 1_000_000_000;

/// Payout or risk multiplier stored as a scaled integer (`value * 10^9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    pub scaled: u128,
}

impl Ratio {
    pub const fn from_scaled(scaled: u128) -> Self {
        Self { scaled }
    }

    /// Ratio of two integers, truncated to the fixed-point scale.
    pub fn new(numerator: u128, denominator: u128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        numerator
            .checked_mul(RATIO_SCALE)
            .map(|n| Self::from_scaled(n / denominator))
    }

    /// `amount * ratio`, truncating. `None` on overflow.
    pub fn apply(&self, amount: u128) -> Option<u128> {
        amount
            .checked_mul(self.scaled)
            .map(|scaled| scaled / RATIO_SCALE)
    }
}

/// 3:2 premium on a player natural.
pub const BLACKJACK_PAYOUT: Ratio = Ratio::from_scaled(1_500_000_000);

/// Risk reserved at round start, the worst case of a natural premium.
pub const INITIAL_RISK: Ratio = Ratio::from_scaled(1_500_000_000);

/// Risk added on double-down, bringing the round to 2x its bet.
pub const DOUBLE_DOWN_RISK: Ratio = Ratio::from_scaled(500_000_000);

/// Insurance side wager relative to the main bet.
pub const INSURANCE_RATIO: Ratio = Ratio::from_scaled(500_000_000);

/// Share of the bet handed back on surrender.
pub const SURRENDER_REFUND: Ratio = Ratio::from_scaled(500_000_000);

/// Insurance pays 2:1 against a dealer natural.
pub const INSURANCE_PAYOUT_MULTIPLIER: u128 = 2;

/// Bounds on the number of decks in the shoe.
pub const MIN_DECKS: u8 = 1;
pub const MAX_DECKS: u8 = 8;
