use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{HexBinary, Timestamp, Uint128};

pub use crate::state::{Capability, Config, PrivilegeTier, Stage};

#[cw_serde]
pub struct InstantiateMsg {
    /// Decks in the virtual shoe, 1..=8.
    pub decks: u8,
    pub beacon_verifier: String,
    /// Holder of the admin capability. Defaults to the instantiator.
    pub admin: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // Bankroll management
    CreateBankroll {
        denom: String,
        min_bet: Uint128,
        max_bet: Uint128,
    },
    TopUp {
        denom: String,
    },
    Withdraw {
        denom: String,
        amount: Option<Uint128>,
    },
    SetMinBet {
        denom: String,
        amount: Uint128,
    },
    SetMaxBet {
        denom: String,
        amount: Uint128,
    },
    GrantCapability {
        holder: String,
        tier: PrivilegeTier,
        bankroll: Option<String>,
    },
    RevokeCapability {
        holder: String,
    },
    // Round play, sender must own the round
    StartRound {
        denom: String,
        bet: Uint128,
    },
    Split { denom: String, round_id: u64 },
    DoubleDown { denom: String, round_id: u64 },
    Insurance { denom: String, round_id: u64 },
    Surrender { denom: String, round_id: u64 },
    Hit { denom: String, round_id: u64 },
    Stand { denom: String, round_id: u64 },
    // Batched settlement against a beacon round
    Settle {
        denom: String,
        beacon_round: u64,
        signature: HexBinary,
        previous_signature: HexBinary,
        max_count: u32,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(BankrollResponse)]
    Bankroll { denom: String },
    #[returns(RoundResponse)]
    Round { denom: String, round_id: u64 },
    #[returns(Vec<RoundListItem>)]
    ListRounds {
        denom: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(PendingRoundsResponse)]
    PendingRounds { denom: String },
    #[returns(CapabilityResponse)]
    Capability { holder: String },
}

#[cw_serde]
pub struct BankrollResponse {
    pub denom: String,
    pub balance: Uint128,
    pub risk: Uint128,
    pub available: Uint128,
    pub min_bet: Uint128,
    pub max_bet: Uint128,
    pub round_counter: u64,
    pub seed: HexBinary,
    pub pending: Vec<u64>,
}

#[cw_serde]
pub struct HandResponse {
    pub bet: Uint128,
    pub double_down: Uint128,
    pub insurance: Uint128,
    pub seed: HexBinary,
    pub score: u8,
    pub soft: bool,
    pub cards: Vec<u16>,
    pub display: Vec<String>,
}

#[cw_serde]
pub struct RoundResponse {
    pub round_id: u64,
    pub owner: String,
    pub stage: Stage,
    pub total_risk: Uint128,
    pub started_at: Timestamp,
    pub dealer: HandResponse,
    pub player: HandResponse,
    pub split: HandResponse,
}

#[cw_serde]
pub struct RoundListItem {
    pub round_id: u64,
    pub owner: String,
    pub stage: Stage,
    pub bet: Uint128,
    pub total_risk: Uint128,
}

#[cw_serde]
pub struct PendingRoundsResponse {
    pub round_ids: Vec<u64>,
}

#[cw_serde]
pub struct CapabilityResponse {
    pub capability: Option<Capability>,
}
