#![allow(dead_code)]

use std::path::PathBuf;

use reqwest::Client;
use serde_json::{json, Value};
use spotlight_core::{BookmarkStore, Spotlight, SpotlightConfig, UnsplashClient};
use wiremock::MockServer;

pub const ACCESS_KEY: &str = "test-key";

pub fn config_for(server: &MockServer) -> SpotlightConfig {
    SpotlightConfig {
        access_key: ACCESS_KEY.into(),
        api_base_url: server.uri(),
        ..SpotlightConfig::default()
    }
}

pub fn spotlight(server: &MockServer, bookmarks: BookmarkStore) -> Spotlight {
    let config = config_for(server);
    let client = UnsplashClient::new(Client::new(), &config).unwrap();
    Spotlight::new(client, bookmarks, &config)
}

pub fn photo_json(id: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2024-10-21T07:28:00Z",
        "width": 4000,
        "height": 3000,
        "color": "#262626",
        "likes": 12,
        "description": null,
        "alt_description": format!("photo {id}"),
        "urls": {
            "raw": format!("https://images.example.com/{id}?raw"),
            "full": format!("https://images.example.com/{id}?full"),
            "regular": format!("https://images.example.com/{id}?regular"),
            "small": format!("https://images.example.com/{id}?small"),
            "thumb": format!("https://images.example.com/{id}?thumb")
        },
        "links": {
            "self": format!("https://api.example.com/photos/{id}"),
            "html": format!("https://example.com/photos/{id}"),
            "download": format!("https://example.com/photos/{id}/download"),
            "download_location": format!("https://api.example.com/photos/{id}/download")
        },
        "user": { "id": "u1", "username": "alice", "name": "Alice" },
        "topics": []
    })
}

pub fn photos_json(ids: &[&str]) -> Value {
    Value::Array(ids.iter().map(|id| photo_json(id)).collect())
}

pub fn user_json(username: &str) -> Value {
    json!({
        "id": format!("id-{username}"),
        "username": username,
        "name": format!("{username} doe"),
        "bio": "Landscapes",
        "total_photos": 45,
        "total_likes": 10,
        "profile_image": { "small": "s", "medium": "m", "large": "l" }
    })
}

pub fn temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "spotlight_{}_{}_{}",
        prefix,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}
