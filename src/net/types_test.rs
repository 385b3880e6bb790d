use super::*;
use serde_json::json;

#[test]
fn auth_response_distinguishes_zero_from_missing() {
    let zero: AuthResponse = serde_json::from_value(json!({"token": "t", "userId": 0})).unwrap();
    assert_eq!(zero.user_id, Some(0));

    let missing: AuthResponse = serde_json::from_value(json!({"token": "t"})).unwrap();
    assert_eq!(missing.user_id, None);
}

#[test]
fn auth_response_null_fields_are_absent() {
    let resp: AuthResponse = serde_json::from_value(json!({"token": null, "userId": null})).unwrap();
    assert_eq!(resp, AuthResponse::default());
}

#[test]
fn credentials_serialize_as_username_password() {
    let body = serde_json::to_value(Credentials { username: "alice", password: "pw" }).unwrap();
    assert_eq!(body, json!({"username": "alice", "password": "pw"}));
}

#[test]
fn game_parses_camel_case_search_hit() {
    let game: Game = serde_json::from_value(json!({
        "id": null,
        "apiId": 3498,
        "title": "Grand Theft Auto V",
        "releaseDate": "2013-09-17",
        "imagePath": "https://img/gta.jpg",
        "platform": null
    }))
    .unwrap();
    assert_eq!(game.api_id, 3498);
    assert_eq!(game.release_date.as_deref(), Some("2013-09-17"));
    assert!(game.platform.is_none());
}

#[test]
fn game_details_tolerates_missing_optional_sections() {
    let details: GameDetails = serde_json::from_value(json!({"id": 1, "name": "Portal"})).unwrap();
    assert_eq!(details.name, "Portal");
    assert!(details.genres.is_empty());
    assert_eq!(details.ratings_count, 0);
}

#[test]
fn trailer_data_reads_numeric_480_key() {
    let list: TrailerList = serde_json::from_value(json!({
        "count": 1,
        "results": [{"id": 5, "name": "Launch", "preview": "p.jpg", "data": {"480": "a.mp4", "max": "b.mp4"}}]
    }))
    .unwrap();
    assert_eq!(list.results[0].data.video_480p.as_deref(), Some("a.mp4"));
    assert_eq!(list.results[0].data.max.as_deref(), Some("b.mp4"));
}

#[test]
fn user_game_reads_active_flag() {
    let game: UserGame = serde_json::from_value(json!({
        "id": 11,
        "apiId": 3498,
        "title": "GTA V",
        "platform": "PC",
        "active": true
    }))
    .unwrap();
    assert!(game.active);
    assert_eq!(game.platform.as_deref(), Some("PC"));
}

#[test]
fn new_user_game_omits_unset_optionals() {
    let body = serde_json::to_value(NewUserGame {
        api_id: 1,
        title: "Portal".into(),
        release_date: None,
        image_path: None,
        platform_id: Some(4),
    })
    .unwrap();
    assert_eq!(body, json!({"apiId": 1, "title": "Portal", "platformId": 4}));
}
