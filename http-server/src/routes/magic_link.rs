use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use policy::token::{self, Claims, MAGIC_LINK_TTL_SECONDS};
use serde::{Deserialize, Serialize};

use crate::{AppState, middleware::BotAuth, models::MagicLink, response::ResponseError};

#[derive(Deserialize)]
pub struct MagicLinkRequest {
    pub user_id: String,
}

#[derive(Serialize)]
pub struct MagicLinkResponse {
    pub success: bool,
    pub magic_link: String,
    pub expires_in_seconds: i64,
    pub message: String,
}

/// Mints a short-lived signed login token for a user and returns the portal
/// URL embedding it.
///
/// A pure write: issuance never reads prior link history, so repeated calls
/// produce independent tokens and older unconsumed links stay valid. The
/// stored record only holds the token hash; without a link store issuance
/// still succeeds since the token itself carries the expiry.
pub async fn create_magic_link(
    State(state): State<AppState>,
    _auth: BotAuth,
    Json(payload): Json<MagicLinkRequest>,
) -> Result<Json<MagicLinkResponse>, ResponseError> {
    if payload.user_id.is_empty() {
        return Err(ResponseError::BadRequest("user_id is required".to_string()));
    }

    let user = state
        .storage
        .get_user(&payload.user_id)
        .ok_or_else(|| ResponseError::NotFound("User not found".to_string()))?;

    let issued_at = Utc::now();
    let claims = Claims::magic_link(&user.user_id, &user.username, issued_at);
    let magic_token = token::sign(state.config.signing_secret.as_bytes(), &claims)?;

    let link = MagicLink {
        link_id: claims.jti.clone(),
        user_id: user.user_id.clone(),
        token_hash: token::token_hash(&magic_token),
        expires_at: issued_at + Duration::seconds(MAGIC_LINK_TTL_SECONDS),
        consumed: false,
    };
    if let Err(err) = state.storage.insert_magic_link(link) {
        // Stateless mode: the signed token alone carries the expiry.
        tracing::debug!("could not store magic link: {err}");
    }

    Ok(Json(MagicLinkResponse {
        success: true,
        magic_link: format!(
            "{}/auth/magic?token={}",
            state.config.portal_url, magic_token
        ),
        expires_in_seconds: MAGIC_LINK_TTL_SECONDS,
        message: "Magic link generated successfully".to_string(),
    }))
}
