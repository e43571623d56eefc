pub mod tiers;
pub mod token;
pub mod types;
pub mod withdrawal;
