use blackjack::seed::{draw_in_place, Entropy, Seed};
use blackjack::score;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, StdResult, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Decks in the virtual shoe, 1..=8.
    pub decks: u8,
    /// Contract answering `BeaconQueryMsg::VerifyBeacon`.
    pub beacon_verifier: Addr,
}

/// Pooled funds of one denom backing every round played in it.
#[cw_serde]
pub struct Bankroll {
    pub denom: String,
    pub balance: Uint128,
    /// Sum of `total_risk` over all live rounds.
    pub risk: Uint128,
    pub min_bet: Uint128,
    pub max_bet: Uint128,
    pub round_counter: u64,
    /// Global seed, advanced on every draw from any round.
    pub seed: HexBinary,
    /// Concluded rounds waiting for a beacon, most recent last.
    pub pending: Vec<u64>,
}

#[cw_serde]
pub enum Stage {
    Bet,
    PlayHand,
    PlaySplitHand,
    ConcludeHands,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Bet => "bet",
            Stage::PlayHand => "play_hand",
            Stage::PlaySplitHand => "play_split_hand",
            Stage::ConcludeHands => "conclude_hands",
        }
    }
}

#[cw_serde]
pub struct Hand {
    pub bet: Uint128,
    pub double_down: Uint128,
    pub insurance: Uint128,
    pub seed: HexBinary,
    /// Cached `blackjack::score` of `cards`.
    pub score: u8,
    pub cards: Vec<u16>,
    /// Player funds held by this hand until settlement.
    pub wager: Uint128,
}

impl Hand {
    pub fn new(seed: Seed) -> Self {
        Hand {
            bet: Uint128::zero(),
            double_down: Uint128::zero(),
            insurance: Uint128::zero(),
            seed: HexBinary::from(seed.as_slice()),
            score: 0,
            cards: vec![],
            wager: Uint128::zero(),
        }
    }

    pub fn seed_bytes(&self) -> StdResult<Seed> {
        self.seed.to_array()
    }

    pub fn push_card(&mut self, card: u16) {
        self.cards.push(card);
        self.score = score(&self.cards);
    }

    pub fn pop_card(&mut self) -> Option<u16> {
        let card = self.cards.pop();
        self.score = score(&self.cards);
        card
    }

    pub fn set_cards(&mut self, cards: Vec<u16>) {
        self.score = score(&cards);
        self.cards = cards;
    }

    /// Draw one card into this hand, advancing the hand seed and `global_seed`.
    pub fn draw(
        &mut self,
        global_seed: &mut HexBinary,
        entropy: &Entropy,
        decks: u8,
    ) -> StdResult<u16> {
        let mut hand = self.seed_bytes()?;
        let mut global: Seed = global_seed.to_array()?;
        let card = draw_in_place(&mut hand, &mut global, entropy, decks);
        self.seed = HexBinary::from(hand.as_slice());
        *global_seed = HexBinary::from(global.as_slice());
        self.push_card(card);
        Ok(card)
    }

    /// Hand the held wager over to settlement. Returns zero once consumed.
    pub fn take_wager(&mut self) -> Uint128 {
        std::mem::take(&mut self.wager)
    }

    pub fn take_insurance(&mut self) -> Uint128 {
        std::mem::take(&mut self.insurance)
    }

    pub fn is_split(&self) -> bool {
        !self.bet.is_zero()
    }
}

#[cw_serde]
pub struct Round {
    pub owner: Addr,
    pub stage: Stage,
    pub round_number: u64,
    /// Risk this round added to its bankroll, released as-is on settlement.
    pub total_risk: Uint128,
    pub started_at: Timestamp,
    pub dealer: Hand,
    pub player: Hand,
    pub split: Hand,
}

impl Round {
    pub fn has_split(&self) -> bool {
        self.split.is_split()
    }
}

#[cw_serde]
#[derive(Copy, Eq, PartialOrd, Ord)]
pub enum PrivilegeTier {
    Admin = 0,
    Owner = 1,
    Operator = 2,
}

#[cw_serde]
pub struct Capability {
    pub tier: PrivilegeTier,
    /// Bankroll denom the capability is bound to. `None` only for the admin.
    pub bankroll: Option<String>,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const BANKROLLS: Map<&str, Bankroll> = Map::new("bankrolls");
pub const ROUNDS: Map<(&str, u64), Round> = Map::new("rounds");
pub const CAPABILITIES: Map<&Addr, Capability> = Map::new("capabilities");
