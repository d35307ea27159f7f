//! Seeded card-draw chain.
//!
//! A card is derived from a hand-local seed, the bankroll-wide seed and a
//! 256-bit entropy value. Every draw rehashes both seeds with the drawn card
//! and the entropy, so the next draw from either chain starts from fresh
//! state.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::card::CARDS_PER_DECK;

pub type Seed = [u8; 32];

/// Which hand of a round a seed belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandRole {
    Dealer,
    Player,
    Split,
}

impl HandRole {
    pub fn label(&self) -> &'static str {
        match self {
            HandRole::Dealer => "dealer",
            HandRole::Player => "player",
            HandRole::Split => "split",
        }
    }
}

/// 256-bit entropy mixed into a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entropy([u8; 32]);

impl Entropy {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Block time in nanoseconds, big-endian in the low 8 bytes.
    pub fn from_timestamp(nanos: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&nanos.to_be_bytes());
        Self(bytes)
    }

    /// Beacon randomness is the SHA-256 of the round signature.
    pub fn from_beacon(signature: &[u8]) -> Self {
        Self(Sha256::digest(signature).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Result of a single draw: the card and both evolved seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub card: u16,
    pub hand_seed: Seed,
    pub global_seed: Seed,
}

/// SHA-256 over the concatenation of `parts`.
pub fn derive_seed(parts: &[&[u8]]) -> Seed {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Initial global seed of a bankroll.
pub fn genesis_seed(denom: &str, contract: &str, height: u64, time_nanos: u64) -> Seed {
    derive_seed(&[
        b"bankroll",
        denom.as_bytes(),
        contract.as_bytes(),
        &height.to_be_bytes(),
        &time_nanos.to_be_bytes(),
    ])
}

/// Initial seed of one hand in a round.
pub fn hand_seed(role: HandRole, owner: &str, round_number: u64, global_seed: &Seed) -> Seed {
    derive_seed(&[
        role.label().as_bytes(),
        owner.as_bytes(),
        &round_number.to_be_bytes(),
        global_seed,
    ])
}

/// One-way step of a seed after `card` was drawn under `entropy`.
pub fn evolve(seed: &Seed, card: u16, entropy: &Entropy) -> Seed {
    derive_seed(&[seed, &card.to_be_bytes(), entropy.as_bytes()])
}

/// `((hand XOR global) + entropy) mod decks * 52`, the sum wrapping at 2^256.
pub fn card_index(hand_seed: &Seed, global_seed: &Seed, entropy: &Entropy, decks: u8) -> u16 {
    let modulus = decks.max(1) as u32 * CARDS_PER_DECK as u32;
    let entropy = entropy.as_bytes();

    let mut mixed = [0u8; 32];
    let mut carry = 0u16;
    for i in (0..32).rev() {
        let sum = (hand_seed[i] ^ global_seed[i]) as u16 + entropy[i] as u16 + carry;
        mixed[i] = sum as u8;
        carry = sum >> 8;
    }

    mixed
        .iter()
        .fold(0u32, |acc, &byte| (acc * 256 + byte as u32) % modulus) as u16
}

pub fn draw(hand_seed: &Seed, global_seed: &Seed, entropy: &Entropy, decks: u8) -> Draw {
    let card = card_index(hand_seed, global_seed, entropy, decks);
    Draw {
        card,
        hand_seed: evolve(hand_seed, card, entropy),
        global_seed: evolve(global_seed, card, entropy),
    }
}

/// Draw and advance both seeds in place.
pub fn draw_in_place(hand_seed: &mut Seed, global_seed: &mut Seed, entropy: &Entropy, decks: u8) -> u16 {
    let next = draw(hand_seed, global_seed, entropy, decks);
    *hand_seed = next.hand_seed;
    *global_seed = next.global_seed;
    next.card
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds() -> (Seed, Seed) {
        (derive_seed(&[b"hand"]), derive_seed(&[b"global"]))
    }

    #[test]
    fn test_draw_deterministic() {
        let (hand, global) = seeds();
        let entropy = Entropy::from_timestamp(1_700_000_000_000_000_000);

        let a = draw(&hand, &global, &entropy, 1);
        let b = draw(&hand, &global, &entropy, 1);
        assert_eq!(a, b);
        assert!(a.card < 52);
    }

    #[test]
    fn test_draw_evolves_both_seeds() {
        let (hand, global) = seeds();
        let entropy = Entropy::from_timestamp(42);

        let next = draw(&hand, &global, &entropy, 1);
        assert_ne!(next.hand_seed, hand);
        assert_ne!(next.global_seed, global);
        assert_ne!(next.hand_seed, next.global_seed);
    }

    #[test]
    fn test_changing_entropy_changes_cards() {
        let (hand, global) = seeds();

        // Over a handful of entropy values the card sequence cannot stay constant.
        let cards: Vec<u16> = (0..16u64)
            .map(|t| draw(&hand, &global, &Entropy::from_timestamp(t * 7_919), 6).card)
            .collect();
        assert!(cards.iter().any(|&c| c != cards[0]));

        let a = draw(&hand, &global, &Entropy::from_beacon(b"round-1"), 6);
        let b = draw(&hand, &global, &Entropy::from_beacon(b"round-2"), 6);
        assert_ne!(a.hand_seed, b.hand_seed);
    }

    #[test]
    fn test_card_index_respects_shoe_size() {
        let (mut hand, mut global) = seeds();
        let entropy = Entropy::from_beacon(b"sig");
        for decks in 1..=8u8 {
            for _ in 0..64 {
                let card = draw_in_place(&mut hand, &mut global, &entropy, decks);
                assert!(card < decks as u16 * 52);
            }
        }
    }

    #[test]
    fn test_chain_never_repeats_seed_state() {
        let (mut hand, mut global) = seeds();
        let entropy = Entropy::from_timestamp(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..256 {
            draw_in_place(&mut hand, &mut global, &entropy, 1);
            assert!(seen.insert(hand));
            assert!(seen.insert(global));
        }
    }

    #[test]
    fn test_card_index_wraps_entropy_addition() {
        // XOR of identical seeds is zero, so the card is entropy mod 52.
        let seed = [0xAB; 32];
        let entropy = Entropy::from_timestamp(105);
        assert_eq!(card_index(&seed, &seed, &entropy, 1), 105 % 52);

        // all-ones plus one wraps to zero
        let ones = [0xFF; 32];
        let zero = [0u8; 32];
        assert_eq!(card_index(&ones, &zero, &Entropy::from_timestamp(1), 1), 0);
    }

    #[test]
    fn test_hand_seeds_differ_per_role() {
        let (_, global) = seeds();
        let dealer = hand_seed(HandRole::Dealer, "owner", 0, &global);
        let player = hand_seed(HandRole::Player, "owner", 0, &global);
        let split = hand_seed(HandRole::Split, "owner", 0, &global);
        assert_ne!(dealer, player);
        assert_ne!(player, split);
        assert_ne!(player, hand_seed(HandRole::Player, "owner", 1, &global));
    }
}
