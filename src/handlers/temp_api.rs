use axum::{extract::Query, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::{jwt::JWT_KEYS, utils::AppError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    user_id: String,
    name: Option<String>,
}

/// Generate token
///
/// Generate a bearer token for a given userId, only for debugging
#[utoipa::path(
    get,
    path = "/api/v1/temp/token",
    params(
        ("userId" = String, Query, description = "User id to issue the token for"),
        ("name" = Option<String>, Query, description = "Optional display name")
    ),
    responses(
        (status = 200, description = "Token generated successfully")
    ),
    tag = "Debugging API"
)]
pub async fn temp_api_get_token(params: Query<Params>) -> Result<Json<JsonValue>, AppError> {
    let token = JWT_KEYS.generate_token(&params.user_id, params.name.clone())?;
    let res = json!({"success": true, "token": token});
    Ok(Json(res))
}
