use axum::{Json, extract::State};
use policy::{
    types::{Balance, round2},
    withdrawal::{WithdrawalInputs, WithdrawalPolicy},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, middleware::BotAuth, response::ResponseError};

#[derive(Deserialize)]
pub struct WithdrawalPreviewRequest {
    pub user_id: String,
    /// Defaults to the game of the user's most recent approved deposit.
    pub game_name: Option<String>,
}

#[derive(Serialize)]
pub struct BalanceBreakdown {
    pub real: f64,
    pub bonus: f64,
    pub total: f64,
}

#[derive(Serialize)]
pub struct WithdrawalPreviewResponse {
    pub success: bool,
    pub can_withdraw: bool,
    pub block_reason: Option<String>,
    pub current_balance: BalanceBreakdown,
    pub last_deposit_amount: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    pub min_cashout: f64,
    pub max_cashout: f64,
    pub payout_amount: f64,
    pub void_amount: f64,
    pub void_reason: Option<String>,
    pub explanation: String,
    pub game_name: String,
    pub game_display_name: String,
}

/// Previews what would happen if the user withdrew now.
///
/// Ineligibility is a normal response carrying `can_withdraw: false`, never
/// an error.
pub async fn preview_withdrawal(
    State(state): State<AppState>,
    _auth: BotAuth,
    Json(payload): Json<WithdrawalPreviewRequest>,
) -> Result<Json<WithdrawalPreviewResponse>, ResponseError> {
    if payload.user_id.is_empty() {
        return Err(ResponseError::BadRequest("user_id is required".to_string()));
    }

    let user = state
        .storage
        .get_user(&payload.user_id)
        .ok_or_else(|| ResponseError::NotFound("User not found".to_string()))?;

    // Resolve the game: explicit name, or the one the user last deposited to.
    let game_name = match payload.game_name {
        Some(name) if !name.is_empty() => name,
        _ => state
            .storage
            .last_approved_deposit(&user.user_id, None)
            .map(|deposit| deposit.game_name)
            .unwrap_or_default(),
    };

    let game = state.storage.get_game(&game_name);
    let multipliers = game
        .as_ref()
        .map(|game| game.multipliers)
        .unwrap_or_else(|| state.config.default_multipliers());
    let game_display_name = game
        .map(|game| game.display_name)
        .unwrap_or_else(|| game_name.clone());

    let last_deposit = if game_name.is_empty() {
        None
    } else {
        state
            .storage
            .last_approved_deposit(&user.user_id, Some(&game_name))
            .map(|deposit| deposit.amount)
    };

    let balance = Balance {
        real: user.real_balance,
        bonus: user.bonus_balance,
    };
    let outcome = WithdrawalPolicy {
        multipliers,
        bonus_counts_toward_eligibility: state.config.bonus_counts_toward_eligibility,
    }
    .evaluate(&WithdrawalInputs {
        balance,
        withdraw_locked: user.withdraw_locked,
        last_deposit,
    });

    Ok(Json(WithdrawalPreviewResponse {
        success: true,
        can_withdraw: outcome.can_withdraw,
        block_reason: outcome.block_reason,
        current_balance: BalanceBreakdown {
            real: round2(balance.real),
            bonus: round2(balance.bonus),
            total: round2(balance.total()),
        },
        last_deposit_amount: outcome.last_deposit_amount,
        min_multiplier: outcome.min_multiplier,
        max_multiplier: outcome.max_multiplier,
        min_cashout: outcome.min_cashout,
        max_cashout: outcome.max_cashout,
        payout_amount: outcome.payout_amount,
        void_amount: outcome.void_amount,
        void_reason: outcome.void_reason,
        explanation: outcome.explanation,
        game_name,
        game_display_name,
    }))
}
