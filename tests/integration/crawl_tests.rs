//! Integration tests for the crawler
//!
//! Fixture graphs exercise deduplication, depth bounds and completion
//! tracking under real multi-threaded scheduling. The HTTP tests use
//! wiremock to serve pages and check request counts end-to-end.

use ripple_crawl::config::FetcherConfig;
use ripple_crawl::{crawl, Crawler, FetchError, FixtureFetcher, HttpFetcher, MemorySink};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A->{B,C}, B->{A,D}, C->{A}, D->{}
fn diamond_fixture() -> FixtureFetcher {
    FixtureFetcher::new()
        .with_page("A", "Page A", ["B", "C"])
        .with_page("B", "Page B", ["A", "D"])
        .with_page("C", "Page C", ["A"])
        .with_page("D", "Page D", Vec::<String>::new())
}

/// Every node links to every node, itself included
fn complete_graph(nodes: usize) -> FixtureFetcher {
    let names: Vec<String> = (0..nodes).map(|i| format!("n{}", i)).collect();
    names.iter().fold(FixtureFetcher::new(), |fixture, name| {
        fixture.with_page(name, &format!("Node {}", name), names.clone())
    })
}

/// n0 -> n1 -> ... -> n{len-1}
fn chain(len: usize) -> FixtureFetcher {
    (0..len).fold(FixtureFetcher::new(), |fixture, i| {
        let links = if i + 1 < len {
            vec![format!("n{}", i + 1)]
        } else {
            vec![]
        };
        fixture.with_page(&format!("n{}", i), &format!("Node {}", i), links)
    })
}

/// 200 response carrying an HTML body
fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html")
}

async fn with_deadline<T>(fut: impl std::future::Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(10), fut)
        .await
        .expect("crawl did not terminate")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_diamond_graph_fetches_each_page_once() {
    let fixture = Arc::new(diamond_fixture());
    let sink = Arc::new(MemorySink::new());

    let report = with_deadline(crawl("A", 4, fixture.clone(), sink.clone())).await;

    assert_eq!(sink.found_urls(), vec!["A", "B", "C", "D"]);
    assert!(sink.failed_urls().is_empty());
    assert_eq!(report.pages_found, 4);
    for url in ["A", "B", "C", "D"] {
        assert_eq!(fixture.calls_for(url), 1, "{} fetched more than once", url);
    }
    // A is linked from B and C; C's link and one of them are duplicates.
    assert!(report.duplicates_skipped >= 2);
    assert_eq!(report.completions, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_zero_depth_returns_without_fetching() {
    let fixture = Arc::new(diamond_fixture());
    let sink = Arc::new(MemorySink::new());

    let report = with_deadline(crawl("A", 0, fixture.clone(), sink.clone())).await;

    assert_eq!(fixture.total_calls(), 0);
    assert!(sink.is_empty());
    assert_eq!(report.pages_found, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unknown_root_reports_one_failure() {
    let fixture = Arc::new(diamond_fixture());
    let sink = Arc::new(MemorySink::new());

    let report = with_deadline(crawl("Z", 4, fixture.clone(), sink.clone())).await;

    assert!(sink.found_urls().is_empty());
    assert_eq!(sink.failed_urls(), vec!["Z"]);
    assert_eq!(report.fetch_failures, 1);
    assert_eq!(report.tasks_spawned, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_depth_bound_on_chain() {
    let fixture = Arc::new(chain(10));
    let sink = Arc::new(MemorySink::new());

    with_deadline(crawl("n0", 5, fixture.clone(), sink.clone())).await;

    assert_eq!(sink.found_urls(), vec!["n0", "n1", "n2", "n3", "n4"]);
    for i in 5..10 {
        assert_eq!(fixture.calls_for(&format!("n{}", i)), 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_dense_graph_under_contention() {
    let nodes = 40;
    let fixture = Arc::new(complete_graph(nodes).with_latency(Duration::from_millis(2)));
    let sink = Arc::new(MemorySink::new());

    let report = with_deadline(crawl("n0", 3, fixture.clone(), sink.clone())).await;

    assert_eq!(report.pages_found, nodes);
    assert_eq!(sink.len(), nodes);
    for (url, calls) in fixture.call_counts() {
        assert_eq!(calls, 1, "{} fetched {} times", url, calls);
    }
    assert_eq!(report.completions, 1);
    assert_eq!(
        report.tasks_spawned,
        report.pages_found
            + report.fetch_failures
            + report.duplicates_skipped
            + report.depth_exhausted
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_crawls_do_not_share_state() {
    let fixture = Arc::new(FixtureFetcher::tour().with_latency(Duration::from_millis(5)));
    let first_sink = Arc::new(MemorySink::new());
    let second_sink = Arc::new(MemorySink::new());

    let first = Crawler::new(fixture.clone(), first_sink.clone());
    let second = Crawler::new(fixture.clone(), second_sink.clone());

    let (a, b) = with_deadline(async {
        tokio::join!(
            first.run("http://golang.org/", 4),
            second.run("http://golang.org/", 4)
        )
    })
    .await;

    assert_eq!(a.pages_found, 4);
    assert_eq!(b.pages_found, 4);
    assert_eq!((a.completions, b.completions), (1, 1));
    assert_eq!(first_sink.found_urls(), second_sink.found_urls());
    // Each crawl fetched every URL once on its own.
    assert_eq!(fixture.calls_for("http://golang.org/pkg/"), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_http_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Index links to both pages; page1 links back and to page2.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><head><title>Home</title></head><body>
                    <a href="{}/page1">Page 1</a>
                    <a href="/page2">Page 2</a>
                    </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(
            r#"<html><head><title>Page 1</title></head><body>
                    <a href="/">Home</a>
                    <a href="/page2">Page 2</a>
                    </body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html(
            r#"<html><head><title>Page 2</title></head><body>Content 2</body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = Arc::new(HttpFetcher::new(&FetcherConfig::default()).expect("client"));
    let sink = Arc::new(MemorySink::new());

    let report = with_deadline(crawl(&format!("{}/", base_url), 3, fetcher, sink.clone())).await;

    assert_eq!(report.pages_found, 3);
    assert_eq!(
        sink.found_urls(),
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );

    let home = sink
        .records()
        .into_iter()
        .find(|r| r.url() == format!("{}/", base_url))
        .expect("home record");
    assert!(matches!(home, ripple_crawl::CrawlRecord::Found { ref body, .. } if body == "Home"));

    // Wiremock verifies the expect(1) counts when mock_server drops
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_http_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Chain: / -> level1 -> level2
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body><a href="{}/level1">Level 1</a></body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level1"))
        .respond_with(html(format!(
            r#"<html><body><a href="{}/level2">Level 2</a></body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    // Two hops of budget: level2 is out of reach
    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(html(""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = Arc::new(HttpFetcher::new(&FetcherConfig::default()).expect("client"));
    let sink = Arc::new(MemorySink::new());

    let report = with_deadline(crawl(&format!("{}/", base_url), 2, fetcher, sink.clone())).await;

    assert_eq!(report.pages_found, 2);
    assert_eq!(report.depth_exhausted, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_http_missing_page_is_reported_not_retried() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Both links point at the same missing page
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body>
                    <a href="/gone">Gone</a>
                    <a href="/broken">Broken</a>
                    </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(html(r#"<html><body><a href="/gone">Gone</a></body></html>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = Arc::new(HttpFetcher::new(&FetcherConfig::default()).expect("client"));
    let sink = Arc::new(MemorySink::new());

    let report = with_deadline(crawl(&format!("{}/", base_url), 4, fetcher, sink.clone())).await;

    assert_eq!(report.pages_found, 2);
    assert_eq!(report.fetch_failures, 1);

    let failures: Vec<_> = sink
        .records()
        .into_iter()
        .filter(|r| !r.is_found())
        .collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        &failures[0],
        ripple_crawl::CrawlRecord::Failed { error: FetchError::NotFound { url }, .. }
            if *url == format!("{}/gone", base_url)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_http_server_error_is_local_to_branch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/bad">Bad</a><a href="/good">Good</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(html("<title>Good</title>"))
        .mount(&mock_server)
        .await;

    let fetcher = Arc::new(HttpFetcher::new(&FetcherConfig::default()).expect("client"));
    let sink = Arc::new(MemorySink::new());

    let report = with_deadline(crawl(
        &format!("{}/", mock_server.uri()),
        3,
        fetcher,
        sink.clone(),
    ))
    .await;

    assert_eq!(report.pages_found, 2);
    assert_eq!(report.fetch_failures, 1);
    let failed = sink.failed_urls();
    assert_eq!(failed, vec![format!("{}/bad", mock_server.uri())]);
}
