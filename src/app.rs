use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::require_token;
use crate::state::AppState;

/// Builds the full router over `state`.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(catalog_routes())
        .merge(profile_routes(&state))
        .merge(protected_routes(&state))
        .layer(DefaultBodyLimit::max(state.config().server.max_request_size_bytes))
        .layer(TraceLayer::new_for_http());

    if state.config().server.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/tools", get(public::tools_get))
        .route("/reviews", get(public::reviews_get))
}

/// Profile and user-upsert routes, public unless
/// `security.require_auth_for_profiles` is set.
fn profile_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/profile/:email", get(public::profile_get).put(public::profile_put))
        .route("/user/:email", put(public::user_put));

    if state.config().security.require_auth_for_profiles {
        router.route_layer(from_fn_with_state(state.clone(), require_token))
    } else {
        router
    }
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/reviews", post(protected::reviews_post))
        .route(
            "/purchase/:id",
            get(protected::purchase_get).patch(protected::purchase_patch),
        )
        .route("/orders", get(protected::orders_get).post(protected::orders_post))
        .route("/order/:id", delete(protected::order_delete))
        .route("/admin/:email", get(protected::admin_get))
        .route_layer(from_fn_with_state(state.clone(), require_token))
}
