use axum::{
    Json,
    extract::{Path, Query, State},
};
use policy::types::round2;
use serde::{Deserialize, Serialize};

use crate::{AppState, middleware::BotAuth, models::GameAccount, response::ResponseError};

#[derive(Deserialize)]
pub struct CredentialsQuery {
    pub game_name: Option<String>,
}

#[derive(Serialize)]
pub struct CredentialEntry {
    pub game_id: String,
    pub game_name: String,
    pub display_name: String,
    pub game_username: String,
    pub game_password: String,
    pub balance: f64,
}

impl From<GameAccount> for CredentialEntry {
    fn from(account: GameAccount) -> Self {
        CredentialEntry {
            game_id: account.game_id,
            game_name: account.game_name,
            display_name: account.display_name,
            game_username: account.game_username,
            game_password: account.game_password,
            balance: round2(account.balance),
        }
    }
}

#[derive(Serialize)]
pub struct CredentialsResponse {
    pub success: bool,
    pub credentials: Vec<CredentialEntry>,
}

/// Game credentials for a user, optionally filtered by game name.
///
/// An unknown user id is a not-found error; a known user without game
/// accounts gets an empty list.
pub async fn get_credentials(
    State(state): State<AppState>,
    _auth: BotAuth,
    Path(user_id): Path<String>,
    Query(query): Query<CredentialsQuery>,
) -> Result<Json<CredentialsResponse>, ResponseError> {
    if state.storage.get_user(&user_id).is_none() {
        return Err(ResponseError::NotFound("User not found".to_string()));
    }

    let credentials = state
        .storage
        .credentials_for(&user_id, query.game_name.as_deref())
        .into_iter()
        .map(CredentialEntry::from)
        .collect();

    Ok(Json(CredentialsResponse {
        success: true,
        credentials,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let state = test_util::state();

        let result = get_credentials(
            State(state),
            BotAuth,
            Path("ghost".to_string()),
            Query(CredentialsQuery { game_name: None }),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(ResponseError::NotFound("User not found".to_string()))
        );
    }

    #[tokio::test]
    async fn known_user_without_accounts_gets_an_empty_list() {
        let state = test_util::state();
        state.storage.upsert_user(test_util::sample_user("u-1"));

        let response = get_credentials(
            State(state),
            BotAuth,
            Path("u-1".to_string()),
            Query(CredentialsQuery { game_name: None }),
        )
        .await
        .unwrap();

        assert!(response.0.success);
        assert!(response.0.credentials.is_empty());
    }

    #[tokio::test]
    async fn game_name_filter_returns_only_matching_rows() {
        let state = test_util::state();
        state.storage.upsert_user(test_util::sample_user("u-1"));
        state
            .storage
            .add_game_account(test_util::sample_game_account("u-1", "fortune-gems"));
        state
            .storage
            .add_game_account(test_util::sample_game_account("u-1", "super-ace"));

        let filtered = get_credentials(
            State(state.clone()),
            BotAuth,
            Path("u-1".to_string()),
            Query(CredentialsQuery {
                game_name: Some("Fortune-Gems".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(filtered.0.credentials.len(), 1);
        assert_eq!(filtered.0.credentials[0].game_name, "fortune-gems");

        let all = get_credentials(
            State(state),
            BotAuth,
            Path("u-1".to_string()),
            Query(CredentialsQuery { game_name: None }),
        )
        .await
        .unwrap();
        assert_eq!(all.0.credentials.len(), 2);
    }
}
