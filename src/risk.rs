//! Aggregate exposure of a bankroll.
//!
//! `Bankroll::risk` is the sum of the worst-case obligations of every live
//! round. A new wager is only accepted when that sum still fits the balance.

use blackjack::{PayoutError, Ratio};
use cosmwasm_std::Uint128;

use crate::error::ContractError;
use crate::state::Bankroll;

impl Bankroll {
    /// Reserve `amount` of exposure, failing if it would exceed the balance.
    pub fn add_risk(&mut self, amount: Uint128) -> Result<(), ContractError> {
        let total = self.risk.checked_add(amount)?;
        if total > self.balance {
            return Err(ContractError::InsufficientBankroll {
                balance: self.balance.to_string(),
                risk: self.risk.to_string(),
                requested: amount.to_string(),
            });
        }
        self.risk = total;
        Ok(())
    }

    /// Release a round's recorded contribution, saturating at zero.
    pub fn release_risk(&mut self, amount: Uint128) {
        self.risk = self.risk.saturating_sub(amount);
    }

    /// Funds not backing any live round.
    pub fn available(&self) -> Uint128 {
        self.balance.saturating_sub(self.risk)
    }
}

/// `amount * ratio` on chain amounts.
pub fn apply_ratio(ratio: Ratio, amount: Uint128) -> Result<Uint128, ContractError> {
    ratio
        .apply(amount.u128())
        .map(Uint128::new)
        .ok_or(ContractError::InvalidPayout(PayoutError::Overflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack::rules::{DOUBLE_DOWN_RISK, INITIAL_RISK};
    use cosmwasm_std::HexBinary;

    fn bankroll(balance: u128) -> Bankroll {
        Bankroll {
            denom: "utoken".to_string(),
            balance: Uint128::new(balance),
            risk: Uint128::zero(),
            min_bet: Uint128::new(1),
            max_bet: Uint128::new(50),
            round_counter: 0,
            seed: HexBinary::from([0u8; 32].as_slice()),
            pending: vec![],
        }
    }

    #[test]
    fn test_risk_sums_and_releases() {
        let mut b = bankroll(1_000);
        let risks = [15u128, 30, 75];
        for r in risks {
            b.add_risk(Uint128::new(r)).unwrap();
        }
        assert_eq!(b.risk, Uint128::new(120));

        b.release_risk(Uint128::new(30));
        assert_eq!(b.risk, Uint128::new(90));
        assert_eq!(b.available(), Uint128::new(910));
    }

    #[test]
    fn test_release_saturates() {
        let mut b = bankroll(100);
        b.add_risk(Uint128::new(10)).unwrap();
        b.release_risk(Uint128::new(25));
        assert_eq!(b.risk, Uint128::zero());
    }

    #[test]
    fn test_add_risk_rejects_over_balance() {
        let mut b = bankroll(100);
        b.add_risk(Uint128::new(90)).unwrap();
        let err = b.add_risk(Uint128::new(11)).unwrap_err();
        assert!(matches!(err, ContractError::InsufficientBankroll { .. }));
        // untouched on failure
        assert_eq!(b.risk, Uint128::new(90));
        b.add_risk(Uint128::new(10)).unwrap();
        assert_eq!(b.available(), Uint128::zero());
    }

    #[test]
    fn test_apply_ratio() {
        assert_eq!(apply_ratio(INITIAL_RISK, Uint128::new(10)).unwrap(), Uint128::new(15));
        assert_eq!(apply_ratio(DOUBLE_DOWN_RISK, Uint128::new(10)).unwrap(), Uint128::new(5));
        assert!(apply_ratio(INITIAL_RISK, Uint128::MAX).is_err());
    }
}
