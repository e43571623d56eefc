use policy::withdrawal::MultiplierPolicy;
use serde::Deserialize;

/// Error returned when deserializing a [`Config`] from environment variables,
/// see [`Config::from_env()`].
pub use envy::Error as EnvError;

/// Process-wide configuration snapshot, read-only after startup.
///
/// Deserialized from `BOT_API_*` environment variables; only the two secrets
/// are required.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Shared secret the bot integration must present on every request
    /// (`BOT_API_TOKEN`).
    pub token: String,
    /// Secret used to sign magic-link tokens (`BOT_API_SIGNING_SECRET`).
    pub signing_secret: String,
    /// Base URL magic links point at (`BOT_API_PORTAL_URL`).
    #[serde(default = "default_portal_url")]
    pub portal_url: String,
    /// The port on which the bot REST API will be accessible.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Fallback minimum withdrawal multiplier for games without their own.
    #[serde(default = "default_min_multiplier")]
    pub min_multiplier: f64,
    /// Fallback maximum withdrawal multiplier for games without their own.
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: f64,
    /// Whether bonus funds count toward withdrawal eligibility.
    #[serde(default = "default_true")]
    pub bonus_counts_toward_eligibility: bool,
}

fn default_portal_url() -> String {
    "https://portal.example.com".to_string()
}

fn default_port() -> u16 {
    6957
}

fn default_min_multiplier() -> f64 {
    1.0
}

fn default_max_multiplier() -> f64 {
    3.0
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_env() -> Result<Self, EnvError> {
        envy::prefixed("BOT_API_").from_env()
    }

    pub fn default_multipliers(&self) -> MultiplierPolicy {
        MultiplierPolicy {
            min_multiplier: self.min_multiplier,
            max_multiplier: self.max_multiplier,
        }
    }
}
