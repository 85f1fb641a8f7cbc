use axum::{routing::get, Router};

use crate::handlers::matches;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // GET /api/matches - Every match, in storage order
        // POST /api/matches - Create a match
        .route("/", get(matches::get_matches).post(matches::create_match))
        // GET /api/matches/:id - One match
        // PUT /api/matches/:id - Field-by-field update as the game progresses
        .route(
            "/:id",
            get(matches::get_match_by_id).put(matches::update_match),
        )
}
