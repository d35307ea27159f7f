use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::state::{Capability, PrivilegeTier, CAPABILITIES};

impl Capability {
    pub fn admin() -> Self {
        Capability {
            tier: PrivilegeTier::Admin,
            bankroll: None,
        }
    }

    /// The admin matches every bankroll, other tiers only the one they are bound to.
    pub fn covers(&self, denom: Option<&str>) -> bool {
        match (self.tier, denom) {
            (PrivilegeTier::Admin, _) => true,
            (_, Some(denom)) => self.bankroll.as_deref() == Some(denom),
            (_, None) => false,
        }
    }
}

/// Load the sender's capability and check it is at least `required` and bound
/// to `denom`.
pub fn require(
    storage: &dyn Storage,
    sender: &Addr,
    required: PrivilegeTier,
    denom: Option<&str>,
) -> Result<Capability, ContractError> {
    let capability = CAPABILITIES
        .may_load(storage, sender)?
        .ok_or(ContractError::Unauthorized {})?;

    if capability.tier > required || !capability.covers(denom) {
        return Err(ContractError::Unauthorized {});
    }
    Ok(capability)
}

pub fn require_admin(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    require(storage, sender, PrivilegeTier::Admin, None).map(|_| ())
}
