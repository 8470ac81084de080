//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the e-paper site and run the
//! full page walk end-to-end with no request delay.

use epaper_harvest::config::{Config, ImageNaming, PageErrorPolicy};
use epaper_harvest::crawler::{harvest, resolve_first_id, CrawlDate, CrawlTarget, Session};
use epaper_harvest::output::read_archive;
use epaper_harvest::HarvestError;
use wiremock::matchers::{header_exists, method, path, path_regex};
use std::time::{Duration, Instant};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const DATE: &str = "05-03-2025";

/// Creates a fast test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.publication.base_url = base_url.to_string();
    config.crawler.miss_threshold = 3;
    config.crawler.request_delay_ms = 0;
    config.http.transport_retries = 0;
    config.http.timeout_secs = 5;
    config
}

fn date() -> CrawlDate {
    CrawlDate::parse(DATE).expect("valid test date")
}

fn page_path(page: u32) -> String {
    format!("/view_article/ahmedabad/{}/{}", DATE, page)
}

fn article_path(page: u32, article_id: u64) -> String {
    format!("{}/{}", page_path(page), article_id)
}

fn article_html(images: &[&str]) -> String {
    let tags: String = images
        .iter()
        .map(|src| format!(r#"<img src="{}">"#, src))
        .collect();
    format!(
        "<html><head><title>Article</title></head><body>{}</body></html>",
        tags
    )
}

/// Page locator redirecting to an absolute location
async fn mount_redirect(server: &MockServer, page: u32, location: String) {
    Mock::given(method("GET"))
        .and(path(page_path(page)))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", location.as_str()))
        .mount(server)
        .await;
}

/// Page locator redirecting to the page's first article
async fn mount_page(server: &MockServer, page: u32, first_id: u64) {
    let location = format!("{}{}", server.uri(), article_path(page, first_id));
    mount_redirect(server, page, location).await;
}

async fn mount_article(server: &MockServer, page: u32, article_id: u64, images: &[&str]) {
    Mock::given(method("GET"))
        .and(path(article_path(page, article_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_html(images))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, image_path: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}

/// Redirects any page locator to article 1 of that page
struct RedirectToFirstArticle {
    base_url: String,
}

impl Respond for RedirectToFirstArticle {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(302).insert_header(
            "Location",
            format!("{}{}/1", self.base_url, request.url.path()).as_str(),
        )
    }
}

/// Article IDs requested on a page, in request order
async fn requested_article_ids(server: &MockServer, page: u32) -> Vec<u64> {
    let prefix = format!("{}/", page_path(page));
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .filter_map(|r| r.url.path().strip_prefix(prefix.as_str()).map(str::to_string))
        .filter_map(|id| id.parse().ok())
        .collect()
}

#[tokio::test]
async fn test_full_harvest_two_pages() {
    let server = MockServer::start().await;

    // Page 1: a gap of one missing article between two hits
    mount_page(&server, 1, 100).await;
    mount_article(&server, 1, 100, &["/img/p1a.jpg", "/img/p1b.png", "/img/skip.gif"]).await;
    mount_article(&server, 1, 102, &["/img/p1c.jpg"]).await;

    // Page 2
    mount_page(&server, 2, 200).await;
    mount_article(&server, 2, 200, &["/img/p2.jpg"]).await;

    // Page 3 resolves but every article is missing: end of edition
    mount_redirect(&server, 3, format!("{}/landing/300", server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/landing/300"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    mount_image(&server, "/img/p1a.jpg", b"p1a").await;
    mount_image(&server, "/img/p1b.png", b"p1b").await;
    mount_image(&server, "/img/p1c.jpg", b"p1c").await;
    mount_image(&server, "/img/p2.jpg", b"p2").await;

    let config = create_test_config(&server.uri());
    let result = harvest(&config, date()).await.expect("harvest failed");

    assert_eq!(result.stats.pages_completed, 2);
    assert_eq!(result.stats.total_images, 4);
    // Page 1: 100..=105, page 2: 200..=203, page 3: 300..=302
    assert_eq!(result.stats.total_articles_searched, 6 + 4 + 3);
    assert!(result.stats.failed_pages.is_empty());
    assert!(result.failures.is_empty());

    let archive = result.archive.expect("archive should be produced");
    assert_eq!(archive.file_name, "gujarat_samachar_05-03-2025.zip");

    let entries = read_archive(&archive.bytes).unwrap();
    assert_eq!(
        entries,
        vec![
            ("05-03-2025_1_100_1.jpeg".to_string(), b"p1a".to_vec()),
            ("05-03-2025_1_100_2.jpeg".to_string(), b"p1b".to_vec()),
            ("05-03-2025_1_102_1.jpeg".to_string(), b"p1c".to_vec()),
            ("05-03-2025_2_200_1.jpeg".to_string(), b"p2".to_vec()),
        ]
    );
}

#[tokio::test]
async fn test_article_ids_probed_sequentially() {
    let server = MockServer::start().await;

    mount_page(&server, 1, 100).await;
    mount_article(&server, 1, 100, &["/img/a.jpg"]).await;
    mount_article(&server, 1, 103, &["/img/b.jpg"]).await;
    mount_image(&server, "/img/a.jpg", b"a").await;
    mount_image(&server, "/img/b.jpg", b"b").await;

    let mut config = create_test_config(&server.uri());
    config.crawler.max_pages = 1;
    let result = harvest(&config, date()).await.unwrap();

    assert_eq!(result.stats.total_images, 2);
    assert_eq!(result.stats.total_articles_searched, 7);

    // The first 100 comes from following the page redirect
    assert_eq!(
        requested_article_ids(&server, 1).await,
        vec![100, 100, 101, 102, 103, 104, 105, 106]
    );
}

#[tokio::test]
async fn test_first_page_without_images_stops_run() {
    let server = MockServer::start().await;

    mount_redirect(&server, 1, format!("{}/landing/500", server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/landing/500"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(page_path(2)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri());
    let result = harvest(&config, date()).await.unwrap();

    assert_eq!(result.stats.pages_completed, 0);
    assert_eq!(result.stats.total_images, 0);
    assert_eq!(result.stats.total_articles_searched, 3);
    assert!(result.failures.is_empty());
    assert!(result.archive.is_none());
}

#[tokio::test]
async fn test_failed_page_discards_images_and_aborts() {
    let server = MockServer::start().await;

    mount_page(&server, 1, 100).await;
    mount_article(&server, 1, 100, &["/img/a.jpg"]).await;
    mount_image(&server, "/img/a.jpg", b"a").await;
    Mock::given(method("GET"))
        .and(path(article_path(1, 101)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(page_path(2)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri());
    let result = harvest(&config, date()).await.unwrap();

    assert_eq!(result.stats.pages_completed, 0);
    assert_eq!(result.stats.total_images, 0);
    assert_eq!(result.stats.failed_pages.iter().copied().collect::<Vec<_>>(), vec![1]);
    assert!(result.archive.is_none());

    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].page, 1);
    assert!(matches!(
        result.failures[0].error,
        HarvestError::Http { status: 500, .. }
    ));
}

#[tokio::test]
async fn test_skip_policy_continues_after_failed_page() {
    let server = MockServer::start().await;

    mount_page(&server, 1, 100).await;
    Mock::given(method("GET"))
        .and(path(article_path(1, 100)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    mount_page(&server, 2, 200).await;
    mount_article(&server, 2, 200, &["/img/p2.jpg"]).await;
    mount_image(&server, "/img/p2.jpg", b"p2").await;

    let mut config = create_test_config(&server.uri());
    config.crawler.on_page_error = PageErrorPolicy::Skip;
    config.crawler.max_pages = 3;
    let result = harvest(&config, date()).await.unwrap();

    // Page 1 fails while resolving (its first article answers 503),
    // page 3 has no locator at all
    assert_eq!(result.stats.pages_completed, 1);
    assert_eq!(result.stats.total_images, 1);
    assert_eq!(
        result.stats.failed_pages.iter().copied().collect::<Vec<_>>(),
        vec![1, 3]
    );

    let entries = read_archive(&result.archive.unwrap().bytes).unwrap();
    assert_eq!(entries, vec![("05-03-2025_2_200_1.jpeg".to_string(), b"p2".to_vec())]);
}

#[tokio::test]
async fn test_missing_page_locator_is_resolution_error() {
    let server = MockServer::start().await;

    let config = create_test_config(&server.uri());
    let result = harvest(&config, date()).await.unwrap();

    assert!(result.archive.is_none());
    assert_eq!(result.failures.len(), 1);
    assert!(matches!(
        result.failures[0].error,
        HarvestError::Resolution { .. }
    ));
}

#[tokio::test]
async fn test_resolve_first_id_from_redirect() {
    let server = MockServer::start().await;
    mount_page(&server, 77, 4213).await;
    mount_article(&server, 77, 4213, &[]).await;

    let config = create_test_config(&server.uri());
    let mut session = Session::new(&config).unwrap();
    let target = CrawlTarget::new(date(), 77);

    let id = resolve_first_id(&mut session, &target).await.unwrap();
    assert_eq!(id, 4213);
}

#[tokio::test]
async fn test_resolve_without_trailing_id_fails() {
    let server = MockServer::start().await;
    mount_redirect(&server, 1, format!("{}/home", server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri());
    let mut session = Session::new(&config).unwrap();
    let target = CrawlTarget::new(date(), 1);

    let err = resolve_first_id(&mut session, &target).await.unwrap_err();
    assert!(matches!(err, HarvestError::Resolution { .. }));
    assert!(err.to_string().contains("no trailing article id"));
}

#[tokio::test]
async fn test_failed_image_is_skipped() {
    let server = MockServer::start().await;

    mount_page(&server, 1, 10).await;
    mount_article(&server, 1, 10, &["/img/gone.jpg", "/img/ok.jpg"]).await;
    mount_image(&server, "/img/ok.jpg", b"ok").await;

    let mut config = create_test_config(&server.uri());
    config.crawler.max_pages = 1;
    let result = harvest(&config, date()).await.unwrap();

    assert_eq!(result.stats.pages_completed, 1);
    assert_eq!(result.stats.total_images, 1);
    assert_eq!(result.stats.assets_skipped, 1);

    // The surviving image keeps its position in the article
    let entries = read_archive(&result.archive.unwrap().bytes).unwrap();
    assert_eq!(entries, vec![("05-03-2025_1_10_2.jpeg".to_string(), b"ok".to_vec())]);
}

#[tokio::test]
async fn test_per_article_naming_keeps_last_image() {
    let server = MockServer::start().await;

    mount_page(&server, 1, 10).await;
    mount_article(&server, 1, 10, &["/img/first.jpg", "/img/second.jpg"]).await;
    mount_image(&server, "/img/first.jpg", b"first").await;
    mount_image(&server, "/img/second.jpg", b"second").await;

    let mut config = create_test_config(&server.uri());
    config.crawler.max_pages = 1;
    config.crawler.image_naming = ImageNaming::PerArticle;
    let result = harvest(&config, date()).await.unwrap();

    assert_eq!(result.stats.total_images, 2);

    let archive = result.archive.unwrap();
    assert_eq!(archive.entries, 1);
    let entries = read_archive(&archive.bytes).unwrap();
    assert_eq!(entries, vec![("05-03-2025_1_10.jpeg".to_string(), b"second".to_vec())]);
}

#[tokio::test]
async fn test_page_cap_bounds_page_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/view_article/ahmedabad/05-03-2025/\d+$"))
        .respond_with(RedirectToFirstArticle {
            base_url: server.uri(),
        })
        .expect(30)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/view_article/ahmedabad/05-03-2025/\d+/1$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(&["/img/x.jpg"])))
        .mount(&server)
        .await;
    mount_image(&server, "/img/x.jpg", b"x").await;

    let mut config = create_test_config(&server.uri());
    config.crawler.miss_threshold = 1;
    let result = harvest(&config, date()).await.unwrap();

    assert_eq!(result.stats.pages_completed, 30);
    assert_eq!(result.stats.total_images, 30);
    assert_eq!(read_archive(&result.archive.unwrap().bytes).unwrap().len(), 30);
}

#[tokio::test]
async fn test_browser_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(page_path(1)))
        .and(header_exists("accept-language"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(302).insert_header(
            "Location",
            format!("{}{}", server.uri(), article_path(1, 5)).as_str(),
        ))
        .expect(1)
        .mount(&server)
        .await;
    mount_article(&server, 1, 5, &[]).await;

    let config = create_test_config(&server.uri());
    let mut session = Session::new(&config).unwrap();

    let id = resolve_first_id(&mut session, &CrawlTarget::new(date(), 1))
        .await
        .unwrap();
    assert_eq!(id, 5);
}

/// Number of received requests whose path equals `request_path`
async fn request_count(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .filter(|r| r.url.path() == request_path)
        .count()
}

#[tokio::test]
async fn test_delay_follows_slow_image_download() {
    let server = MockServer::start().await;

    mount_page(&server, 1, 100).await;
    mount_article(&server, 1, 100, &["/img/slow.jpg"]).await;
    Mock::given(method("GET"))
        .and(path("/img/slow.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"slow".to_vec())
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let mut config = create_test_config(&server.uri());
    config.crawler.miss_threshold = 1;
    config.crawler.max_pages = 1;
    config.crawler.request_delay_ms = 300;

    let start = Instant::now();
    let result = harvest(&config, date()).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(result.stats.total_images, 1);
    // page locator, pause, article 100 + slow image, pause, article 101
    assert!(
        elapsed >= Duration::from_millis(1000),
        "run finished after {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_transport_failure_mid_page_fails_page() {
    let server = MockServer::start().await;

    mount_page(&server, 1, 100).await;
    mount_article(&server, 1, 100, &["/img/a.jpg"]).await;
    mount_image(&server, "/img/a.jpg", b"a").await;
    Mock::given(method("GET"))
        .and(path(article_path(1, 101)))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let mut config = create_test_config(&server.uri());
    config.http.timeout_secs = 1;
    let result = harvest(&config, date()).await.unwrap();

    assert_eq!(result.stats.pages_completed, 0);
    assert_eq!(result.stats.total_images, 0);
    assert!(result.archive.is_none());
    assert_eq!(result.failures.len(), 1);
    assert!(matches!(
        result.failures[0].error,
        HarvestError::Transport { .. }
    ));
}

#[tokio::test]
async fn test_transient_transport_failure_is_retried() {
    let server = MockServer::start().await;

    mount_page(&server, 1, 100).await;
    mount_article(&server, 1, 100, &["/img/flaky.jpg"]).await;
    // First attempt times out, the second one succeeds
    Mock::given(method("GET"))
        .and(path("/img/flaky.jpg"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_image(&server, "/img/flaky.jpg", b"flaky").await;

    let mut config = create_test_config(&server.uri());
    config.crawler.max_pages = 1;
    config.http.timeout_secs = 1;
    config.http.transport_retries = 1;
    config.http.retry_backoff_ms = 10;
    let result = harvest(&config, date()).await.unwrap();

    assert_eq!(result.stats.total_images, 1);
    assert_eq!(result.stats.assets_skipped, 0);
    assert_eq!(request_count(&server, "/img/flaky.jpg").await, 2);
}

#[tokio::test]
async fn test_http_errors_are_not_retried() {
    let server = MockServer::start().await;

    mount_page(&server, 1, 100).await;
    mount_article(&server, 1, 100, &["/img/missing.jpg"]).await;
    Mock::given(method("GET"))
        .and(path(article_path(1, 101)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = create_test_config(&server.uri());
    config.http.transport_retries = 2;
    config.http.retry_backoff_ms = 10;
    let result = harvest(&config, date()).await.unwrap();

    assert!(matches!(
        result.failures[0].error,
        HarvestError::Http { status: 500, .. }
    ));
    assert_eq!(request_count(&server, &article_path(1, 101)).await, 1);
    // The image 404 is skipped after a single attempt
    assert_eq!(request_count(&server, "/img/missing.jpg").await, 1);
}

#[tokio::test]
async fn test_page_locator_is_sent_once_despite_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(page_path(1)))
        .respond_with(ResponseTemplate::new(302).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let mut config = create_test_config(&server.uri());
    config.http.timeout_secs = 1;
    config.http.transport_retries = 2;
    config.http.retry_backoff_ms = 10;
    let result = harvest(&config, date()).await.unwrap();

    assert!(matches!(
        result.failures[0].error,
        HarvestError::Resolution { .. }
    ));
    assert_eq!(request_count(&server, &page_path(1)).await, 1);
}
