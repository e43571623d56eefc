use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use crate::{AppState, response::ResponseError};

const BOT_TOKEN_HEADER: &str = "x-bot-token";

/// Axum extractor proving the request carried the shared bot secret.
///
/// Accepts `Authorization: Bot <token>` or `X-Bot-Token: <token>`. Runs
/// before any body extractor, so business payloads are never parsed for
/// unauthenticated requests.
pub struct BotAuth;

impl FromRequestParts<AppState> for BotAuth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = authorization_bot_token(parts).or_else(|| {
            parts
                .headers
                .get(BOT_TOKEN_HEADER)
                .and_then(|value| value.to_str().ok())
        });

        match presented {
            Some(token) if constant_time_eq(token.as_bytes(), state.config.token.as_bytes()) => {
                Ok(BotAuth)
            }
            _ => Err(ResponseError::Unauthorized.into_response()),
        }
    }
}

/// Extracts the token from an `Authorization: Bot <token>` header.
///
/// No trimming: a near-match with surrounding whitespace must not pass.
fn authorization_bot_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bot ")
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
