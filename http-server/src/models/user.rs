use chrono::{DateTime, Utc};
use policy::withdrawal::MultiplierPolicy;
use serde::{Deserialize, Serialize};

/// Account row as written by the provisioning system; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub real_balance: f64,
    pub bonus_balance: f64,
    pub withdraw_locked: bool,
    pub referral_code: String,
    /// Referral code of the user who referred this one, if any.
    pub referred_by: Option<String>,
    pub active_referrals: u32,
    pub pending_earnings: f64,
    pub confirmed_earnings: f64,
}

/// One provisioned in-game account per (user, game) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameAccount {
    pub user_id: String,
    pub game_id: String,
    pub game_name: String,
    pub display_name: String,
    pub game_username: String,
    pub game_password: String,
    pub balance: f64,
}

/// Per-game configuration row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub game_name: String,
    pub display_name: String,
    pub multipliers: MultiplierPolicy,
}

/// An approved deposit, as recorded by the order pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositRecord {
    pub user_id: String,
    pub game_name: String,
    pub amount: f64,
    pub approved_at: DateTime<Utc>,
}

/// Stored magic-link record. Holds only the token hash, never the raw token;
/// `consumed` flips to true on first successful verification and the record
/// is never updated otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicLink {
    pub link_id: String,
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}
