use blackjack::PayoutError;
use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Insufficient bankroll: risk {risk} + {requested} exceeds balance {balance}")]
    InsufficientBankroll {
        balance: String,
        risk: String,
        requested: String,
    },

    #[error("Action not allowed in stage {stage}")]
    InvalidStage { stage: String },

    #[error("Invalid bet amount: {reason}")]
    InvalidBetAmount { reason: String },

    #[error("Split not allowed: {reason}")]
    InvalidSplit { reason: String },

    #[error("Double down not allowed: {reason}")]
    InvalidDoubleDown { reason: String },

    #[error("Insurance not allowed: {reason}")]
    InvalidInsurance { reason: String },

    #[error("Surrender not allowed: {reason}")]
    InvalidSurrender { reason: String },

    #[error("Hit not allowed: {reason}")]
    InvalidHit { reason: String },

    #[error("Invalid funds: expected exactly {expected}")]
    InvalidFunds { expected: String },

    #[error("Invalid payout: {0}")]
    InvalidPayout(#[from] PayoutError),

    #[error("Pending queue corrupted: round {round_id} is not concluded")]
    QueueCorrupted { round_id: u64 },

    #[error("Round {round_id} holds {held} but staked {staked}")]
    WagerMismatch {
        round_id: u64,
        held: String,
        staked: String,
    },

    #[error("Round {round_id} not found")]
    RoundNotFound { round_id: u64 },

    #[error("Bankroll {denom} not found")]
    BankrollNotFound { denom: String },

    #[error("Bankroll {denom} already exists")]
    BankrollExists { denom: String },

    #[error("Beacon round {round} failed verification")]
    BeaconUnverified { round: u64 },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}
