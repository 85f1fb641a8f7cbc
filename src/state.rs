use std::sync::Arc;

use crate::repository::match_repository::MatchRepository;

#[derive(Clone)]
pub struct AppState {
    pub matches: Arc<dyn MatchRepository>,
}

impl AppState {
    pub fn new(matches: Arc<dyn MatchRepository>) -> Self {
        AppState { matches }
    }
}
