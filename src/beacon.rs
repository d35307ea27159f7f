use blackjack::Entropy;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Deps, HexBinary, StdResult};

/// Query understood by the beacon verifier contract.
#[cw_serde]
pub enum BeaconQueryMsg {
    VerifyBeacon {
        round: u64,
        signature: HexBinary,
        previous_signature: HexBinary,
    },
}

#[cw_serde]
pub struct BeaconVerifyResponse {
    pub verified: bool,
}

/// Ask the verifier whether `signature` is the beacon output for `round`.
pub fn verify_beacon(
    deps: Deps,
    verifier: &Addr,
    round: u64,
    signature: &HexBinary,
    previous_signature: &HexBinary,
) -> StdResult<bool> {
    let response: BeaconVerifyResponse = deps.querier.query_wasm_smart(
        verifier,
        &BeaconQueryMsg::VerifyBeacon {
            round,
            signature: signature.clone(),
            previous_signature: previous_signature.clone(),
        },
    )?;
    Ok(response.verified)
}

/// Randomness of a verified round.
pub fn beacon_entropy(signature: &HexBinary) -> Entropy {
    Entropy::from_beacon(signature.as_slice())
}
