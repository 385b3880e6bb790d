//! Collection client: owned games and their platform assignments.

#[cfg(test)]
#[path = "collection_test.rs"]
mod tests;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::types::{NewUserGame, Platform, UserGame};

const GAMES_PATH: &str = "/collections/games";
const PLATFORMS_PATH: &str = "/collections/platforms";

#[derive(Clone)]
pub struct CollectionClient {
    api: ApiClient,
}

impl CollectionClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /collections/games`. No content yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates pipeline and decode errors.
    pub async fn user_collection(&self) -> Result<Vec<UserGame>, ApiError> {
        self.api.get_list(GAMES_PATH, &[]).await
    }

    /// `POST /collections/games`. Returns the stored entry as the server
    /// echoes it (`null` when it answers without a body).
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for a non-positive `api_id` or blank title,
    /// otherwise pipeline errors (409 for duplicates, 404 for unknown
    /// platforms).
    pub async fn add_game(&self, game: &NewUserGame) -> Result<serde_json::Value, ApiError> {
        if game.api_id <= 0 {
            return Err(ApiError::Validation("apiId must be a positive catalog id".into()));
        }
        if game.title.trim().is_empty() {
            return Err(ApiError::Validation("title is required".into()));
        }
        if let Some(platform_id) = game.platform_id {
            require_id(platform_id, "platform id")?;
        }
        self.api.post_json(GAMES_PATH, game).await
    }

    /// `DELETE /collections/games/{id}`.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for a non-positive id, otherwise pipeline errors.
    pub async fn remove_game(&self, game_id: i64) -> Result<(), ApiError> {
        require_id(game_id, "game id")?;
        self.api.delete(&format!("{GAMES_PATH}/{game_id}")).await
    }

    /// `GET /collections/platforms`. No content yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates pipeline and decode errors.
    pub async fn all_platforms(&self) -> Result<Vec<Platform>, ApiError> {
        self.api.get_list(PLATFORMS_PATH, &[]).await
    }

    /// `PUT /collections/games/{id}/platform` with the bare platform id as
    /// the JSON body.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for non-positive ids, otherwise pipeline errors.
    pub async fn update_game_platform(&self, user_game_id: i64, platform_id: i64) -> Result<serde_json::Value, ApiError> {
        require_id(user_game_id, "collection entry id")?;
        require_id(platform_id, "platform id")?;
        self.api
            .put_json(&format!("{GAMES_PATH}/{user_game_id}/platform"), &platform_id)
            .await
    }
}

fn require_id(id: i64, what: &str) -> Result<(), ApiError> {
    if id <= 0 {
        return Err(ApiError::Validation(format!("a positive {what} is required")));
    }
    Ok(())
}
