use serde::{Deserialize, Serialize};

/// Rounds a monetary amount to 2 decimal places.
///
/// Only applied at the output edge; eligibility comparisons always use the
/// raw stored values.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A user balance split into real (withdrawable) and bonus funds
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub real: f64,
    pub bonus: f64,
}

impl Balance {
    pub fn total(&self) -> f64 {
        self.real + self.bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_to_two_decimals() {
        assert_eq!(round2(10.006), 10.01);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn balance_total_sums_real_and_bonus() {
        let balance = Balance {
            real: 150.0,
            bonus: 25.5,
        };
        assert_eq!(balance.total(), 175.5);
    }
}
