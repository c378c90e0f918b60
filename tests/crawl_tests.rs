//! End-to-end crawl tests against a local mock server

use hece::config::{
    Config, CrawlerConfig, OutputConfig, ScopeConfig, TextConfig, UserAgentConfig,
};
use hece::crawler::{run_crawl, Coordinator};
use hece::storage::{FrontierStore, SessionStatus, SessionStore, SqliteStorage, TallyStore};
use hece::text::UnitKind;
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(seeds: Vec<String>, db_path: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            workers: 2,
            request_timeout_secs: 5,
            host_delay_ms: 0,
            idle_wait_ms: 50,
            max_links_per_page: 50,
            max_pages: 0,
            stop_when_drained: true,
        },
        user_agent: UserAgentConfig {
            crawler_name: "HeceTestBot".to_string(),
            crawler_version: "0.1".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            export_path: "./hece.json".to_string(),
            export_top: 20,
            export_sample_words: 50,
        },
        text: TextConfig::default(),
        scope: ScopeConfig {
            seeds,
            allowed_domains: vec![],
            blocked_domains: vec![],
            follow_turkish_hints: true,
        },
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>Deneme</title></head><body>{}</body></html>",
            body
        ),
        "text/html; charset=utf-8",
    )
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_counts_words_and_follows_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<p>elma elma armut</p>
        <a href="/sayfa1">Sayfa</a>
        <a href="/eksik">Eksik</a>
        <a href="https://baska.example.com/yazi">Dış</a>
        <script>var gizli = "kelime";</script>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/sayfa1",
        r#"<p>elma kitap</p><a href="/">Ana</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/eksik"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("hece.db");
    let config = create_test_config(vec![format!("{}/", base_url)], &db_path);

    let report = run_crawl(config, "test-hash", false)
        .await
        .expect("Crawl failed");

    assert_eq!(report.status, SessionStatus::Completed);
    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.pages_failed, 1);

    let storage = SqliteStorage::new(&db_path).expect("Failed to open DB");

    // Each page counts a word once
    let e = storage
        .get_record(UnitKind::Monograph, "e")
        .unwrap()
        .expect("monograph e");
    assert_eq!(e.frequency, 2);
    let a = storage.get_record(UnitKind::Monograph, "a").unwrap().unwrap();
    assert_eq!(a.frequency, 4);

    let el = storage.get_record(UnitKind::Syllable, "el").unwrap().unwrap();
    assert_eq!(el.frequency, 2);
    assert_eq!(el.last_word, "elma");
    let ar = storage.get_record(UnitKind::Syllable, "ar").unwrap().unwrap();
    assert_eq!(ar.frequency, 1);
    assert_eq!(ar.last_url, format!("{}/", base_url));
    let tap = storage.get_record(UnitKind::Syllable, "tap").unwrap().unwrap();
    assert_eq!(tap.last_url, format!("{}/sayfa1", base_url));

    // Script contents and capitalized link text are not words
    assert!(storage
        .get_record(UnitKind::Syllable, "giz")
        .unwrap()
        .is_none());
    assert_eq!(storage.count_words().unwrap(), 3);

    assert!(storage
        .is_visited(&format!("{}/sayfa1", base_url))
        .unwrap());
    assert!(storage.is_visited(&format!("{}/eksik", base_url)).unwrap());
    assert!(!storage.is_queued("https://baska.example.com/yazi").unwrap());
    assert!(!storage.is_visited("https://baska.example.com/yazi").unwrap());
    assert_eq!(storage.queued_len().unwrap(), 0);
    assert_eq!(storage.visited_len().unwrap(), 3);

    let session = storage.latest_session().unwrap().unwrap();
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.config_hash, "test-hash");
    assert_eq!(session.pages_crawled, 3);
    assert!(session.finished_at.is_some());
}

#[tokio::test]
async fn test_page_limit_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<p>bir</p><a href="/iki">iki</a>"#).await;
    mount_page(&mock_server, "/iki", r#"<p>iki</p><a href="/uc">üç</a>"#).await;
    mount_page(&mock_server, "/uc", r#"<p>üç</p><a href="/dort">dört</a>"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("hece.db");
    let mut config = create_test_config(vec![format!("{}/", base_url)], &db_path);
    config.crawler.workers = 1;
    config.crawler.max_pages = 2;
    config.crawler.stop_when_drained = false;

    let report = run_crawl(config, "hash", false).await.expect("Crawl failed");

    assert_eq!(report.status, SessionStatus::Completed);
    assert_eq!(report.pages_crawled, 2);

    let storage = SqliteStorage::new(&db_path).expect("Failed to open DB");
    assert_eq!(storage.visited_len().unwrap(), 2);
    assert!(storage.is_queued(&format!("{}/uc", base_url)).unwrap());
    assert!(!storage.is_visited(&format!("{}/uc", base_url)).unwrap());
}

#[tokio::test]
async fn test_second_run_resumes_without_recounting() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "<p>kalem defter</p>").await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("hece.db");
    let seeds = vec![format!("{}/", base_url)];

    let first = run_crawl(create_test_config(seeds.clone(), &db_path), "hash", false)
        .await
        .expect("First crawl failed");
    assert_eq!(first.pages_crawled, 1);

    // The seed is already visited, so there is nothing left to do
    let second = run_crawl(create_test_config(seeds, &db_path), "hash", true)
        .await
        .expect("Second crawl failed");
    assert_eq!(second.pages_crawled, 0);
    assert_ne!(first.session_id, second.session_id);

    let storage = SqliteStorage::new(&db_path).expect("Failed to open DB");
    let lem = storage
        .get_record(UnitKind::Syllable, "lem")
        .unwrap()
        .unwrap();
    assert_eq!(lem.frequency, 1);
    assert_eq!(storage.visited_len().unwrap(), 1);
}

#[tokio::test]
async fn test_redirect_target_is_marked_visited() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/eski"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/yeni", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/yeni", r#"<p>kapı</p><a href="/yeni">yeni</a>"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("hece.db");
    let config = create_test_config(vec![format!("{}/eski", base_url)], &db_path);

    let storage = SqliteStorage::new(&db_path).expect("Failed to open DB");
    let coordinator =
        Coordinator::with_storage(config, storage, "hash", false).expect("Coordinator failed");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.pages_crawled, 1);

    let storage = SqliteStorage::new(&db_path).expect("Failed to reopen DB");
    assert!(storage.is_visited(&format!("{}/eski", base_url)).unwrap());
    assert!(storage.is_visited(&format!("{}/yeni", base_url)).unwrap());
    let ka = storage.get_record(UnitKind::Syllable, "ka").unwrap().unwrap();
    assert_eq!(ka.last_url, format!("{}/yeni", base_url));
}

#[tokio::test]
async fn test_redirect_to_visited_page_is_not_counted_again() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/b">b</a><a href="/a">a</a>"#,
    )
    .await;
    mount_page(&mock_server, "/b", "<p>kapı</p>").await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/b", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("hece.db");
    let mut config = create_test_config(vec![format!("{}/", base_url)], &db_path);
    config.crawler.workers = 1;

    let report = run_crawl(config, "hash", false).await.expect("Crawl failed");
    assert_eq!(report.pages_crawled, 3);

    let storage = SqliteStorage::new(&db_path).expect("Failed to open DB");
    let ka = storage.get_record(UnitKind::Syllable, "ka").unwrap().unwrap();
    assert_eq!(ka.frequency, 1);
    assert!(storage.is_visited(&format!("{}/a", base_url)).unwrap());
    assert_eq!(storage.visited_len().unwrap(), 3);
}

#[tokio::test]
async fn test_page_limit_holds_with_many_workers() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (1..=6)
        .map(|i| format!(r#"<a href="/s{}">s</a>"#, i))
        .collect();
    mount_page(&mock_server, "/", &links).await;
    for i in 1..=6 {
        Mock::given(method("GET"))
            .and(path(format!("/s{}", i)))
            .respond_with(html_page("<p>deniz</p>").set_delay(Duration::from_millis(100)))
            .mount(&mock_server)
            .await;
    }

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("hece.db");
    let mut config = create_test_config(vec![format!("{}/", base_url)], &db_path);
    config.crawler.workers = 4;
    config.crawler.max_pages = 3;
    config.crawler.stop_when_drained = false;

    let report = run_crawl(config, "hash", false).await.expect("Crawl failed");
    assert_eq!(report.status, SessionStatus::Completed);
    assert_eq!(report.pages_crawled, 3);

    let storage = SqliteStorage::new(&db_path).expect("Failed to open DB");
    assert_eq!(storage.visited_len().unwrap(), 3);
    assert_eq!(storage.queued_len().unwrap(), 4);
}
