pub mod database;
pub mod user;

pub use database::{InMemoryStorage, StorageError};
pub use user::{DepositRecord, GameAccount, GameConfig, MagicLink, UserAccount};
