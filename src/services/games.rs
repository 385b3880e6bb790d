//! Catalog client: search and per-game media.

#[cfg(test)]
#[path = "games_test.rs"]
mod tests;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::types::{Game, GameDetails, ScreenshotList, TrailerList};

#[derive(Clone)]
pub struct GamesClient {
    api: ApiClient,
}

impl GamesClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /games?search=<query>`. An empty query is forwarded as-is.
    ///
    /// # Errors
    ///
    /// Propagates pipeline and decode errors.
    pub async fn search_games(&self, query: &str) -> Result<Vec<Game>, ApiError> {
        self.api.get_list("/games", &[("search", query)]).await
    }

    /// `GET /games/{id}/details`.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for a non-positive id, otherwise pipeline errors.
    pub async fn game_details(&self, game_id: i64) -> Result<GameDetails, ApiError> {
        let path = game_path(game_id, "details")?;
        self.api.get_json(&path, &[]).await
    }

    /// `GET /games/{id}/trailers`.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for a non-positive id, otherwise pipeline errors.
    pub async fn game_trailers(&self, game_id: i64) -> Result<TrailerList, ApiError> {
        let path = game_path(game_id, "trailers")?;
        self.api.get_json(&path, &[]).await
    }

    /// `GET /games/{id}/screenshots`.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for a non-positive id, otherwise pipeline errors.
    pub async fn game_screenshots(&self, game_id: i64) -> Result<ScreenshotList, ApiError> {
        let path = game_path(game_id, "screenshots")?;
        self.api.get_json(&path, &[]).await
    }
}

fn game_path(game_id: i64, section: &str) -> Result<String, ApiError> {
    if game_id <= 0 {
        return Err(ApiError::Validation(format!("a game id is required to fetch {section}")));
    }
    Ok(format!("/games/{game_id}/{section}"))
}
