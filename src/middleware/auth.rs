use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::database::models::{Account, Role};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity decoded from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Middleware state: the app handles plus the roles allowed through.
/// An empty role list admits any authenticated account.
#[derive(Clone)]
pub struct AuthGate {
    state: AppState,
    roles: &'static [Role],
}

impl AuthGate {
    pub fn any(state: AppState) -> Self {
        Self { state, roles: &[] }
    }

    pub fn roles(state: AppState, roles: &'static [Role]) -> Self {
        Self { state, roles }
    }
}

/// Validates the bearer token, loads the account and enforces the role list.
/// Injects [`AuthUser`] and the loaded [`Account`] into request extensions.
pub async fn auth_gate_middleware(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(ApiError::unauthorized)?;

    let claims = validate_jwt(&token, &gate.state.config.security.jwt_secret).map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        ApiError::unauthorized("You are not authorized!")
    })?;

    let account = gate
        .state
        .store
        .find_account(claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token references missing account {}", claims.sub);
            ApiError::unauthorized("You are not authorized!")
        })?;

    check_role(&account, gate.roles)?;

    tracing::debug!("Authorized account {} ({:?})", account.id, account.role);

    request.extensions_mut().insert(AuthUser::from(claims));
    request.extensions_mut().insert(account);

    Ok(next.run(request).await)
}

/// Role check against the stored account, not the token, so profile setup
/// takes effect without a fresh login.
fn check_role(account: &Account, roles: &[Role]) -> Result<(), ApiError> {
    if roles.is_empty() {
        return Ok(());
    }
    match account.role {
        Some(role) if roles.contains(&role) => Ok(()),
        _ => {
            tracing::warn!(
                "Account {} with role {:?} denied; requires one of {:?}",
                account.id,
                account.role,
                roles
            );
            Err(ApiError::forbidden("Forbidden!"))
        }
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "You are not authorized!".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
