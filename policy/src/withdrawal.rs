use serde::{Deserialize, Serialize};

use crate::types::{Balance, round2};

/// Marker reported when part of the balance exceeds the maximum cashout.
pub const VOID_EXCEEDS_MAX_CASHOUT: &str = "EXCEEDS_MAX_CASHOUT";

/// Per-game bounds on a withdrawal, as multiples of the last approved deposit
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierPolicy {
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for MultiplierPolicy {
    fn default() -> Self {
        Self {
            min_multiplier: 1.0,
            max_multiplier: 3.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WithdrawalPolicy {
    pub multipliers: MultiplierPolicy,
    /// Whether bonus funds count toward the minimum-cashout eligibility
    /// check. The payout always draws from the full (real + bonus) total.
    pub bonus_counts_toward_eligibility: bool,
}

impl Default for WithdrawalPolicy {
    fn default() -> Self {
        Self {
            multipliers: MultiplierPolicy::default(),
            bonus_counts_toward_eligibility: true,
        }
    }
}

/// Snapshot of the account state a preview is computed from
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WithdrawalInputs {
    pub balance: Balance,
    pub withdraw_locked: bool,
    /// Amount of the most recent approved deposit, if any.
    pub last_deposit: Option<f64>,
}

/// Computed preview; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalOutcome {
    pub can_withdraw: bool,
    pub block_reason: Option<String>,
    pub last_deposit_amount: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    pub min_cashout: f64,
    pub max_cashout: f64,
    pub payout_amount: f64,
    pub void_amount: f64,
    pub void_reason: Option<String>,
    pub explanation: String,
}

impl WithdrawalPolicy {
    /// Evaluates eligibility and payout bounds for a withdrawal.
    ///
    /// Block checks are mutually exclusive and applied in order: account
    /// lock, missing deposit, balance below minimum cashout. A blocked
    /// outcome is a normal result, not an error, and reports a zero payout.
    pub fn evaluate(&self, inputs: &WithdrawalInputs) -> WithdrawalOutcome {
        let MultiplierPolicy {
            min_multiplier,
            max_multiplier,
        } = self.multipliers;

        let total_balance = inputs.balance.total();
        let eligible_balance = if self.bonus_counts_toward_eligibility {
            total_balance
        } else {
            inputs.balance.real
        };

        let last_deposit = inputs.last_deposit.unwrap_or(0.0);
        let min_cashout = last_deposit * min_multiplier;
        let max_cashout = last_deposit * max_multiplier;

        let block_reason = if inputs.withdraw_locked {
            Some("Withdrawals are locked for this account".to_string())
        } else if last_deposit <= 0.0 {
            Some("No approved deposit found. You must deposit first.".to_string())
        } else if eligible_balance < min_cashout {
            Some(format!(
                "Balance ${eligible_balance:.2} is below minimum cashout ${min_cashout:.2} ({min_multiplier}x of last deposit)"
            ))
        } else {
            None
        };

        let can_withdraw = block_reason.is_none();
        let (payout_amount, void_amount) = if can_withdraw {
            (
                total_balance.min(max_cashout),
                (total_balance - max_cashout).max(0.0),
            )
        } else {
            (0.0, 0.0)
        };

        WithdrawalOutcome {
            can_withdraw,
            block_reason,
            last_deposit_amount: round2(last_deposit),
            min_multiplier,
            max_multiplier,
            min_cashout: round2(min_cashout),
            max_cashout: round2(max_cashout),
            payout_amount: round2(payout_amount),
            void_amount: round2(void_amount),
            void_reason: (void_amount > 0.0).then(|| VOID_EXCEEDS_MAX_CASHOUT.to_string()),
            explanation: format!(
                "Minimum cashout is {min_multiplier}x your last deposit. Maximum cashout is {max_multiplier}x your last deposit. Any amount above {max_multiplier}x will be voided."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(real: f64, bonus: f64, locked: bool, last_deposit: Option<f64>) -> WithdrawalInputs {
        WithdrawalInputs {
            balance: Balance { real, bonus },
            withdraw_locked: locked,
            last_deposit,
        }
    }

    #[test]
    fn balance_within_bounds_pays_out_in_full() {
        let outcome = WithdrawalPolicy::default().evaluate(&inputs(250.0, 0.0, false, Some(100.0)));

        assert!(outcome.can_withdraw);
        assert_eq!(outcome.block_reason, None);
        assert_eq!(outcome.min_cashout, 100.0);
        assert_eq!(outcome.max_cashout, 300.0);
        assert_eq!(outcome.payout_amount, 250.0);
        assert_eq!(outcome.void_amount, 0.0);
        assert_eq!(outcome.void_reason, None);
    }

    #[test]
    fn balance_below_minimum_is_blocked_with_templated_reason() {
        let outcome = WithdrawalPolicy::default().evaluate(&inputs(50.0, 0.0, false, Some(100.0)));

        assert!(!outcome.can_withdraw);
        let reason = outcome.block_reason.expect("should carry a block reason");
        assert!(reason.contains("below minimum cashout $100"), "{reason}");
        assert!(reason.contains("Balance $50.00"), "{reason}");
        assert!(reason.contains("1x of last deposit"), "{reason}");
        assert_eq!(outcome.payout_amount, 0.0);
        assert_eq!(outcome.void_amount, 0.0);
    }

    #[test]
    fn balance_above_maximum_voids_the_excess() {
        let outcome = WithdrawalPolicy::default().evaluate(&inputs(400.0, 0.0, false, Some(100.0)));

        assert!(outcome.can_withdraw);
        assert_eq!(outcome.payout_amount, 300.0);
        assert_eq!(outcome.void_amount, 100.0);
        assert_eq!(
            outcome.void_reason.as_deref(),
            Some(VOID_EXCEEDS_MAX_CASHOUT)
        );
    }

    #[test]
    fn locked_account_blocks_regardless_of_balance() {
        let outcome = WithdrawalPolicy::default().evaluate(&inputs(5000.0, 0.0, true, Some(100.0)));

        assert!(!outcome.can_withdraw);
        assert_eq!(
            outcome.block_reason.as_deref(),
            Some("Withdrawals are locked for this account")
        );
    }

    #[test]
    fn lock_check_precedes_missing_deposit_check() {
        let outcome = WithdrawalPolicy::default().evaluate(&inputs(0.0, 0.0, true, None));

        assert_eq!(
            outcome.block_reason.as_deref(),
            Some("Withdrawals are locked for this account")
        );
    }

    #[test]
    fn missing_deposit_blocks_before_any_balance_check() {
        let outcome = WithdrawalPolicy::default().evaluate(&inputs(1000.0, 0.0, false, None));

        assert!(!outcome.can_withdraw);
        assert_eq!(
            outcome.block_reason.as_deref(),
            Some("No approved deposit found. You must deposit first.")
        );
        assert_eq!(outcome.min_cashout, 0.0);
        assert_eq!(outcome.max_cashout, 0.0);
    }

    #[test]
    fn bonus_funds_count_toward_payout_and_eligibility_by_default() {
        let outcome = WithdrawalPolicy::default().evaluate(&inputs(60.0, 60.0, false, Some(100.0)));

        assert!(outcome.can_withdraw);
        assert_eq!(outcome.payout_amount, 120.0);
    }

    #[test]
    fn bonus_funds_can_be_excluded_from_eligibility() {
        let policy = WithdrawalPolicy {
            bonus_counts_toward_eligibility: false,
            ..WithdrawalPolicy::default()
        };

        // Real balance alone is below the minimum cashout.
        let outcome = policy.evaluate(&inputs(60.0, 60.0, false, Some(100.0)));
        assert!(!outcome.can_withdraw);
        assert!(
            outcome
                .block_reason
                .expect("should carry a block reason")
                .contains("Balance $60.00")
        );

        // Once the real balance clears the bar, the payout still draws
        // from the full total.
        let outcome = policy.evaluate(&inputs(150.0, 200.0, false, Some(100.0)));
        assert!(outcome.can_withdraw);
        assert_eq!(outcome.payout_amount, 300.0);
        assert_eq!(outcome.void_amount, 50.0);
    }

    #[test]
    fn evaluation_is_idempotent_for_unchanged_inputs() {
        let policy = WithdrawalPolicy::default();
        let snapshot = inputs(212.34, 17.66, false, Some(80.0));

        assert_eq!(policy.evaluate(&snapshot), policy.evaluate(&snapshot));
    }

    #[test]
    fn custom_multipliers_scale_the_cashout_window() {
        let policy = WithdrawalPolicy {
            multipliers: MultiplierPolicy {
                min_multiplier: 2.0,
                max_multiplier: 5.0,
            },
            ..WithdrawalPolicy::default()
        };
        let outcome = policy.evaluate(&inputs(600.0, 0.0, false, Some(100.0)));

        assert_eq!(outcome.min_cashout, 200.0);
        assert_eq!(outcome.max_cashout, 500.0);
        assert_eq!(outcome.payout_amount, 500.0);
        assert_eq!(outcome.void_amount, 100.0);
    }
}
