use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{DepositRecord, GameAccount, GameConfig, MagicLink, UserAccount};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("magic-link store unavailable")]
    LinkStoreUnavailable,
    #[error("magic link not found")]
    LinkNotFound,
}

/// Explicitly constructed persistence handle, cloned into each component.
///
/// Simple in-memory storage implementation. Game names are matched
/// case-insensitively throughout, mirroring the backing store's collation.
#[derive(Clone)]
pub struct InMemoryStorage {
    users: Arc<Mutex<HashMap<String, UserAccount>>>,
    game_accounts: Arc<Mutex<Vec<GameAccount>>>,
    games: Arc<Mutex<HashMap<String, GameConfig>>>,
    deposits: Arc<Mutex<Vec<DepositRecord>>>,
    /// `None` means no link table exists; magic-link issuance then runs in
    /// stateless mode.
    magic_links: Option<Arc<Mutex<Vec<MagicLink>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            game_accounts: Arc::new(Mutex::new(Vec::new())),
            games: Arc::new(Mutex::new(HashMap::new())),
            deposits: Arc::new(Mutex::new(Vec::new())),
            magic_links: Some(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// Storage without a magic-link table.
    pub fn without_link_store() -> Self {
        Self {
            magic_links: None,
            ..Self::new()
        }
    }

    pub fn upsert_user(&self, user: UserAccount) {
        let mut users = self.users.lock().unwrap();
        users.insert(user.user_id.clone(), user);
    }

    pub fn get_user(&self, user_id: &str) -> Option<UserAccount> {
        let users = self.users.lock().unwrap();
        users.get(user_id).cloned()
    }

    pub fn insert_game(&self, game: GameConfig) {
        let mut games = self.games.lock().unwrap();
        games.insert(game.game_name.to_lowercase(), game);
    }

    pub fn get_game(&self, game_name: &str) -> Option<GameConfig> {
        let games = self.games.lock().unwrap();
        games.get(&game_name.to_lowercase()).cloned()
    }

    pub fn add_game_account(&self, account: GameAccount) {
        let mut accounts = self.game_accounts.lock().unwrap();
        accounts.push(account);
    }

    /// Game accounts for a user, optionally filtered by game name.
    pub fn credentials_for(&self, user_id: &str, game_name: Option<&str>) -> Vec<GameAccount> {
        let accounts = self.game_accounts.lock().unwrap();
        accounts
            .iter()
            .filter(|account| account.user_id == user_id)
            .filter(|account| match game_name {
                Some(name) => account.game_name.eq_ignore_ascii_case(name),
                None => true,
            })
            .cloned()
            .collect()
    }

    pub fn record_deposit(&self, deposit: DepositRecord) {
        let mut deposits = self.deposits.lock().unwrap();
        deposits.push(deposit);
    }

    /// The most recent approved deposit for a user, optionally scoped to one
    /// game.
    pub fn last_approved_deposit(
        &self,
        user_id: &str,
        game_name: Option<&str>,
    ) -> Option<DepositRecord> {
        let deposits = self.deposits.lock().unwrap();
        deposits
            .iter()
            .filter(|deposit| deposit.user_id == user_id)
            .filter(|deposit| match game_name {
                Some(name) => deposit.game_name.eq_ignore_ascii_case(name),
                None => true,
            })
            .max_by_key(|deposit| deposit.approved_at)
            .cloned()
    }

    pub fn insert_magic_link(&self, link: MagicLink) -> Result<(), StorageError> {
        let store = self
            .magic_links
            .as_ref()
            .ok_or(StorageError::LinkStoreUnavailable)?;

        store.lock().unwrap().push(link);
        Ok(())
    }

    /// Marks the link matching `token_hash` as consumed, enforcing single
    /// use. Consumed or expired links are treated as absent.
    pub fn consume_magic_link(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<MagicLink, StorageError> {
        let store = self
            .magic_links
            .as_ref()
            .ok_or(StorageError::LinkStoreUnavailable)?;

        let mut links = store.lock().unwrap();
        let link = links
            .iter_mut()
            .find(|link| link.token_hash == token_hash && !link.consumed && link.expires_at > now)
            .ok_or(StorageError::LinkNotFound)?;

        link.consumed = true;
        Ok(link.clone())
    }

    pub fn magic_links_for(&self, user_id: &str) -> Vec<MagicLink> {
        match &self.magic_links {
            Some(store) => store
                .lock()
                .unwrap()
                .iter()
                .filter(|link| link.user_id == user_id)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}
