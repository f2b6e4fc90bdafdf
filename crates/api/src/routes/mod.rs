pub mod pets;

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Routes served outside the `/api` prefix.
pub fn root_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health))
}

/// Build the `/api` route tree.
///
/// ```text
/// /pets                  list (paginated, ?trait= filter), create
/// /pets/{id}             get, partial update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/pets", pets::router())
}
