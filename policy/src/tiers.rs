use serde::{Deserialize, Serialize};

/// A commission bracket unlocked by reaching a referral-count threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    #[serde(rename = "tier")]
    pub level: u8,
    pub name: String,
    pub min_refs: u32,
    pub commission: u32,
}

/// Ordered commission tier table, ascending by referral threshold.
///
/// The table is fixed configuration data: built once at startup and only
/// queried afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Panics if the table is empty, doesn't start at a 0 threshold, or the
    /// thresholds are not strictly increasing.
    pub fn new(tiers: Vec<Tier>) -> Self {
        assert!(!tiers.is_empty(), "tier table must not be empty");
        assert_eq!(tiers[0].min_refs, 0, "lowest tier threshold must be 0");
        assert!(
            tiers.windows(2).all(|w| w[0].min_refs < w[1].min_refs),
            "tier thresholds must be strictly increasing"
        );

        Self { tiers }
    }

    /// Resolves the tier for an active-referral count.
    ///
    /// Scans from the highest threshold down, first match wins. Every
    /// count maps to exactly one tier since the lowest threshold is 0.
    pub fn resolve(&self, active_referrals: u32) -> &Tier {
        self.tiers
            .iter()
            .rev()
            .find(|tier| active_referrals >= tier.min_refs)
            .unwrap_or(&self.tiers[0])
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}

impl Default for TierTable {
    fn default() -> Self {
        let tier = |level: u8, name: &str, min_refs: u32, commission: u32| Tier {
            level,
            name: name.to_string(),
            min_refs,
            commission,
        };

        Self::new(vec![
            tier(0, "Starter", 0, 5),
            tier(1, "Bronze", 10, 10),
            tier(2, "Silver", 25, 15),
            tier(3, "Gold", 50, 20),
            tier(4, "Platinum", 100, 25),
            tier(5, "Diamond", 200, 30),
        ])
    }
}
