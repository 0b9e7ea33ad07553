/// Integration tests across the ftpdeck crates: config, message helpers,
/// folder filters and the local high-score board on disk.
use std::io::Write;
use std::sync::Arc;

use ftpdeck_message::{image_urls, parse_message, sanitize_message, SegmentKind};
use ftpdeck_store::filters::{accept_string, is_file_allowed};
use ftpdeck_store::{
    ActivityLogStore, ApiClient, HighScoreStore, JsonFileStorage, ScoreStorage, SCORES_SLOT,
};

#[test]
fn chat_message_parses_then_sanitizes_text_segments() {
    let segments = parse_message("<b>see</b> https://cdn.example.com/cat.PNG & more");
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[1].kind, SegmentKind::Image);

    let escaped: Vec<String> = segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Text)
        .map(|s| sanitize_message(&s.content))
        .collect();
    assert_eq!(escaped, vec!["&lt;b&gt;see&lt;/b&gt; ", " &amp; more"]);
}

#[test]
fn image_urls_skip_plain_links() {
    let urls = image_urls("a https://x.io/1.gif b https://x.io/page c https://x.io/2.webp.");
    assert_eq!(urls, vec!["https://x.io/1.gif", "https://x.io/2.webp"]);
}

#[test]
fn high_scores_survive_a_new_store_on_the_same_directory() {
    let dir = tempfile::tempdir().unwrap();

    let first = HighScoreStore::new(Arc::new(JsonFileStorage::new(dir.path())));
    first.add_score("ann", 12);
    first.add_score("ann", 40);
    first.add_score("bob", 7);

    let second = HighScoreStore::new(Arc::new(JsonFileStorage::new(dir.path())));
    second.restore().unwrap();
    let ann = second.scores_for("ann").unwrap();
    assert_eq!(ann.all_time, vec![40, 12]);
    assert_eq!(ann.current_session, 0);
    assert_eq!(second.scores_for("bob").unwrap().all_time, vec![7]);

    second.reset();
    let storage = JsonFileStorage::new(dir.path());
    assert!(storage.read(SCORES_SLOT).unwrap().is_none());
}

#[test]
fn config_file_drives_client_and_storage() {
    let dir = tempfile::tempdir().unwrap();
    let scores = dir.path().join("scores");
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        f,
        "[api]\nbase_url = \"http://127.0.0.1:1/\"\n\n[storage]\nscores_dir = \"{}\"\n",
        scores.display()
    )
    .unwrap();

    let config = ftpdeck_config::load(Some(f.path())).unwrap();
    let client = ApiClient::from_config(&config.api);
    assert_eq!(client.base_url(), "http://127.0.0.1:1");
    assert_eq!(config.storage.resolved_scores_dir(), scores);
}

#[test]
fn media_folder_filters() {
    assert!(is_file_allowed("song.OGG", "music"));
    assert!(!is_file_allowed("clip.mp4", "Pictures"));
    assert!(is_file_allowed("notes.txt", "Documents"));
    assert!(accept_string("Audio Books").contains(".m4b"));
}

#[tokio::test]
async fn fresh_network_store_is_idle() {
    let store = ActivityLogStore::new(ApiClient::new("http://127.0.0.1:1"));
    let state = store.state().get();
    assert!(state.items.is_empty());
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}
