//! Wire types exchanged with the gateway.
//!
//! Auth and collection payloads use camelCase keys. Catalog detail payloads
//! are passed through from the upstream catalog and keep its snake_case keys.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

/// Username/password body for `/auth/register` and `/auth/login`.
#[derive(Clone, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from the auth service. Every field is optional on the wire so
/// the client can tell "missing" apart from a falsy value such as `0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
}

// =============================================================================
// CATALOG
// =============================================================================

/// A catalog search hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default)]
    pub id: Option<i64>,
    pub api_id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// `{ id, name }` pair used for catalog platforms, genres, and studios.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

/// Full catalog entry for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameDetails {
    pub id: i64,
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description_raw: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub ratings_count: u32,
    #[serde(default)]
    pub playtime: u32,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub platforms: Vec<NamedRef>,
    #[serde(default)]
    pub genres: Vec<NamedRef>,
    #[serde(default)]
    pub developers: Vec<NamedRef>,
    #[serde(default)]
    pub publishers: Vec<NamedRef>,
}

/// Video URLs for one trailer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerData {
    #[serde(rename = "480", default)]
    pub video_480p: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trailer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub data: TrailerData,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerList {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub results: Vec<Trailer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: i64,
    pub image: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotList {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Screenshot>,
}

// =============================================================================
// COLLECTION
// =============================================================================

/// An owned game in the user's collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGame {
    pub id: i64,
    #[serde(default)]
    pub api_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    /// Name of the assigned platform.
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// Body for adding a catalog game to the collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserGame {
    pub api_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub platform_id: Option<i64>,
}

/// A platform a collection entry can be assigned to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: i64,
    pub name: String,
}
