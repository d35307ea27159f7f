#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use blackjack::rules::{MAX_DECKS, MIN_DECKS};
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::InstantiateMsg;
use crate::state::{Capability, Config, CAPABILITIES, CONFIG};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:pooljack";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stores the shoe size and beacon verifier, and mints the single admin
/// capability.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if !(MIN_DECKS..=MAX_DECKS).contains(&msg.decks) {
        return Err(ContractError::InvalidConfig {
            reason: format!("decks must be within {MIN_DECKS}..={MAX_DECKS}"),
        });
    }

    let config = Config {
        decks: msg.decks,
        beacon_verifier: deps.api.addr_validate(&msg.beacon_verifier)?,
    };
    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    CAPABILITIES.save(deps.storage, &admin, &Capability::admin())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("decks", config.decks.to_string())
        .add_attribute("beacon_verifier", config.beacon_verifier))
}
