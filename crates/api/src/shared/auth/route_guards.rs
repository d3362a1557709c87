use super::Session;
use crate::error::BeaconError;
use actix_web::HttpRequest;
use beacon_domain::ID;
use beacon_infra::BeaconContext;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims of the session tokens issued by the authentication service
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub exp: usize,      // Expiration time (as UTC timestamp)
    pub iat: usize,      // Issued at (as UTC timestamp)
    pub user_id: String, // Subject (whom token refers to)
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;

    Ok(claims)
}

/// Verifies a raw session token
pub fn session_from_token(token: &str, ctx: &BeaconContext) -> Result<Session, BeaconError> {
    let claims = decode_token(token, &ctx.config.session_secret).map_err(|e| {
        BeaconError::Unauthorized(format!("Invalid session token provided. Error: {}", e))
    })?;
    let owner_id = claims.user_id.parse::<ID>().map_err(|_| {
        BeaconError::Unauthorized("Session token does not refer to a valid user".into())
    })?;

    Ok(Session { owner_id })
}

pub fn protect_route(req: &HttpRequest, ctx: &BeaconContext) -> Result<Session, BeaconError> {
    let token = match req.headers().get("authorization") {
        Some(token) => match token.to_str() {
            Ok(token) => parse_authtoken_header(token),
            Err(_) => {
                return Err(BeaconError::Unauthorized(
                    "Malformed authorization header provided".into(),
                ))
            }
        },
        None => {
            return Err(BeaconError::Unauthorized(
                "Unable to find session token in authorization header".into(),
            ))
        }
    };

    session_from_token(&token, ctx)
}

/// Routes used by other subsystems (billing, post publishing, budget evaluators ..)
/// to act on behalf of any user
pub fn protect_producer_route(req: &HttpRequest, ctx: &BeaconContext) -> Result<(), BeaconError> {
    let api_key = match req.headers().get("x-api-key") {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(BeaconError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(BeaconError::Unauthorized(
                "Unable to find api-key in x-api-key header".to_string(),
            ))
        }
    };

    if api_key == ctx.config.producer_api_key {
        Ok(())
    } else {
        Err(BeaconError::Unauthorized(
            "Invalid api-key provided in x-api-key header".to_string(),
        ))
    }
}
