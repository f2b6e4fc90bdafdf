use axum::routing::get;
use axum::Router;

use crate::handlers::pets;
use crate::state::AppState;

/// Pet routes mounted at `/pets`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pets::list).post(pets::create))
        .route(
            "/{id}",
            get(pets::get_by_id)
                .patch(pets::update)
                .delete(pets::delete),
        )
}
