mod common;

use spotlight_core::{BookmarkStore, Photo};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{photo_json, spotlight, temp_dir};

#[tokio::test]
async fn bookmarks_survive_a_restart_byte_for_byte() {
    let dir = temp_dir("restart");
    let file = BookmarkStore::default_path(&dir);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photo_json("p1")))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = spotlight(&server, BookmarkStore::load_from(&file).await);
    assert!(app.switch_bookmark("p1").await.unwrap());
    let saved = tokio::fs::read(&file).await.unwrap();

    // Reload as a fresh process would
    let reloaded = BookmarkStore::load_from(&file).await;
    assert_eq!(reloaded.list(), app.bookmarks());
    assert_eq!(reloaded.list()[0].id, "p1");
    assert!(reloaded.list()[0].extra.contains_key("topics"));

    reloaded.persist().await.unwrap();
    let rewritten = tokio::fs::read(&file).await.unwrap();
    assert_eq!(saved, rewritten);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn removing_a_bookmark_is_persisted() {
    let dir = temp_dir("remove");
    let file = BookmarkStore::default_path(&dir);

    let mut store = BookmarkStore::load_from(&file).await;
    store.add(Photo::new("a"));
    store.add(Photo::new("b"));
    store.persist().await.unwrap();

    let server = MockServer::start().await;
    let mut app = spotlight(&server, BookmarkStore::load_from(&file).await);
    assert!(!app.switch_bookmark("a").await.unwrap());

    let reloaded = BookmarkStore::load_from(&file).await;
    let ids: Vec<_> = reloaded.list().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["b"]);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn load_preserves_order_and_drops_duplicates() {
    let dir = temp_dir("order");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let file = BookmarkStore::default_path(&dir);
    let raw = serde_json::to_vec(&vec![
        Photo::new("x").with_bookmark(true),
        Photo::new("y").with_bookmark(true),
        Photo::new("x").with_bookmark(true),
    ])
    .unwrap();
    tokio::fs::write(&file, raw).await.unwrap();

    let store = BookmarkStore::load_from(&file).await;
    let ids: Vec<_> = store.list().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["x", "y"]);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn load_uses_tmp_fallback_on_corrupted_json() {
    let dir = temp_dir("corrupt");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let file = BookmarkStore::default_path(&dir);
    tokio::fs::write(&file, b"[{ this is not json ").await.unwrap();

    let tmp = dir.join("spotlight_bookmarks.json.tmp");
    let bytes = serde_json::to_vec(&vec![Photo::new("kept").with_bookmark(true)]).unwrap();
    tokio::fs::write(&tmp, bytes).await.unwrap();

    let store = BookmarkStore::load_from(&file).await;
    assert_eq!(store.len(), 1, "should fall back to tmp file when main is corrupted");
    assert!(store.contains("kept"));

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn missing_file_starts_empty() {
    let dir = temp_dir("missing");
    let store = BookmarkStore::load_from(BookmarkStore::default_path(&dir)).await;
    assert!(store.is_empty());
}

#[tokio::test]
async fn unreadable_bookmark_file_is_never_overwritten() {
    let dir = temp_dir("unreadable");
    let file = BookmarkStore::default_path(&dir);
    // A directory where the file should be makes every read fail
    tokio::fs::create_dir_all(&file).await.unwrap();

    let mut store = BookmarkStore::load_from(&file).await;
    assert!(store.is_empty());
    assert!(store.path().is_none());

    store.add(Photo::new("a"));
    store.persist().await.unwrap();
    assert!(tokio::fs::metadata(&file).await.unwrap().is_dir());
    assert!(!dir.join("spotlight_bookmarks.json.tmp").exists());

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn corrupted_file_and_tmp_start_empty_but_stay_on_disk() {
    let dir = temp_dir("corrupt_both");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let file = BookmarkStore::default_path(&dir);
    tokio::fs::write(&file, b"not json").await.unwrap();
    tokio::fs::write(dir.join("spotlight_bookmarks.json.tmp"), b"also not json")
        .await
        .unwrap();

    let store = BookmarkStore::load_from(&file).await;
    assert!(store.is_empty());
    assert_eq!(store.path(), Some(file.as_path()));

    let _ = tokio::fs::remove_dir_all(&dir).await;
}
