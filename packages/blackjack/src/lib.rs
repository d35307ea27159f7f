pub mod card;
pub mod dealer;
pub mod hand;
pub mod payout;
pub mod rules;
pub mod seed;

pub use card::{card_value, Card, Suit, CARDS_PER_DECK};
pub use dealer::{play_out, should_draw};
pub use hand::{is_busted, is_natural, is_soft, same_value, score};
pub use payout::{
    resolve_hand, settle, surrender_refund, HandResolution, HandStake, PayoutError, Settlement,
};
pub use rules::Ratio;
pub use seed::{draw, draw_in_place, hand_seed, Draw, Entropy, HandRole, Seed};
