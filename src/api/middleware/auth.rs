//! API key authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::api_key::{authorize, GateDecision, GateRejection};

/// Extractor that requires a valid API key in `Authorization: <scheme> <key>`.
///
/// Rejections use 400 for anything short of a recognised-but-inactive key,
/// which gets 401.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                ApiError::bad_request(GateRejection::MalformedCredential.message())
            })?),
            None => None,
        };

        match authorize(header, state.api_keys.as_ref()).await {
            GateDecision::Allow => Ok(RequireApiKey),
            GateDecision::BadRequest(reason) => Err(ApiError::bad_request(reason.message())),
            GateDecision::Unauthorized => Err(ApiError::unauthorized("Invalid API key")),
        }
    }
}
