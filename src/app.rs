use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::database::models::Role;
use crate::handlers::{agencies, auth, contracts, landlords, maintenance, properties, root, tenants, users};
use crate::middleware::{auth_gate_middleware, AuthGate};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);
    let body_limit = DefaultBodyLimit::max(state.config.api.max_request_size_bytes);

    Router::new()
        // Public
        .route("/", get(root::root))
        .route("/health", get(root::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        // Authenticated, per-route role gates
        .merge(authenticated_routes(&state))
        .merge(landlord_routes(&state))
        .merge(tenant_routes(&state))
        .merge(agency_routes(&state))
        .merge(maintenance_write_routes(&state))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any account with a valid token
fn authenticated_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users/me", get(users::me))
        .route("/landlords", post(landlords::landlord_setup))
        .route("/tenants", post(tenants::tenant_setup))
        .route("/agencies", post(agencies::agency_setup))
        .route("/properties", get(properties::property_list))
        .route("/properties/:id", get(properties::property_show))
        .route(
            "/contracts",
            get(contracts::contract_list).post(contracts::contract_create),
        )
        .route(
            "/contracts/:id",
            get(contracts::contract_show).delete(contracts::contract_delete),
        )
        .route("/maintenance", get(maintenance::maintenance_list))
        .route("/maintenance/:id", get(maintenance::maintenance_show))
        .route(
            "/maintenance/property/:id",
            get(maintenance::maintenance_by_property),
        )
        .route_layer(middleware::from_fn_with_state(
            AuthGate::any(state.clone()),
            auth_gate_middleware,
        ))
}

fn landlord_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/landlords/me",
            get(landlords::landlord_me).patch(landlords::landlord_update),
        )
        .route("/properties", post(properties::property_create))
        .route("/properties/mine", get(properties::property_mine))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::roles(state.clone(), &[Role::Landlord]),
            auth_gate_middleware,
        ))
}

fn tenant_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/tenants/me", get(tenants::tenant_me))
        .route("/contracts/mine", get(contracts::contract_mine))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::roles(state.clone(), &[Role::Tenant]),
            auth_gate_middleware,
        ))
}

fn agency_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/agencies/me", get(agencies::agency_me))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::roles(state.clone(), &[Role::Agency]),
            auth_gate_middleware,
        ))
}

fn maintenance_write_routes(state: &AppState) -> Router<AppState> {
    let raise = Router::new()
        .route("/maintenance", post(maintenance::maintenance_create))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::roles(state.clone(), &[Role::Tenant, Role::Landlord]),
            auth_gate_middleware,
        ));

    let complete = Router::new()
        .route(
            "/maintenance/:id/complete",
            patch(maintenance::maintenance_complete),
        )
        .route_layer(middleware::from_fn_with_state(
            AuthGate::roles(state.clone(), &[Role::Landlord, Role::Agency]),
            auth_gate_middleware,
        ));

    raise.merge(complete)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if security.cors_origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(origins))
}
