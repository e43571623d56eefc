use axum::{
    Json,
    extract::{Path, State},
};
use policy::{tiers::TierTable, types::round2};
use serde::Serialize;

use crate::{AppState, middleware::BotAuth, response::ResponseError};

#[derive(Serialize)]
pub struct ReferralResponse {
    pub success: bool,
    pub referral_code: String,
    pub commission_percent: u32,
    pub tier_name: String,
    pub tier_level: u8,
    pub active_referrals: u32,
    pub pending_earnings: f64,
    pub confirmed_earnings: f64,
    pub total_earnings: f64,
    pub tiers: TierTable,
    pub rules: Vec<String>,
}

/// Referral program snapshot for a user.
///
/// The tier is derived from the active-referral count on every request,
/// never stored.
pub async fn get_referral(
    State(state): State<AppState>,
    _auth: BotAuth,
    Path(user_id): Path<String>,
) -> Result<Json<ReferralResponse>, ResponseError> {
    let user = state
        .storage
        .get_user(&user_id)
        .ok_or_else(|| ResponseError::NotFound("User not found".to_string()))?;

    let tier = state.tiers.resolve(user.active_referrals);
    let pending_earnings = round2(user.pending_earnings);
    let confirmed_earnings = round2(user.confirmed_earnings);

    Ok(Json(ReferralResponse {
        success: true,
        referral_code: user.referral_code,
        commission_percent: tier.commission,
        tier_name: tier.name.clone(),
        tier_level: tier.level,
        active_referrals: user.active_referrals,
        pending_earnings,
        confirmed_earnings,
        total_earnings: round2(pending_earnings + confirmed_earnings),
        tiers: state.tiers.as_ref().clone(),
        rules: referral_rules(tier.commission),
    }))
}

fn referral_rules(commission: u32) -> Vec<String> {
    vec![
        "Share your referral code with friends".to_string(),
        "They enter it when signing up".to_string(),
        "Once they make their first deposit, they become 'active'".to_string(),
        format!("You earn {commission}% of ALL their future deposits"),
        "Earnings are automatic and lifetime".to_string(),
        "Get more active referrals to unlock higher commission tiers".to_string(),
    ]
}
