//! Integration tests for single asset requests.

use std::time::Duration;

use release_probe_core::probe::{
    BaseUrl, Checksum, ProbeClient, ProbeConfig, ProbeOutcome, ProbeResult, ProbeTarget,
};
use release_probe_core::release::VersionTag;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::{closed_local_port, start_mock_server_or_skip};

const ASSET_PATH: &str = "/static/dist/admin/AdminInterface-2024.1.0.js";

fn config() -> ProbeConfig {
    ProbeConfig::default().with_timeout(Duration::from_secs(5))
}

async fn request_once(client: &ProbeClient, server: &MockServer) -> ProbeResult {
    let base = BaseUrl::parse(&server.uri()).unwrap();
    let version = VersionTag::new("2024.1.0").unwrap();
    client.probe(&ProbeTarget::new(&base, &version)).await
}

#[tokio::test]
async fn test_range_request_accepts_206() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .and(header("range", "bytes=0-1023"))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(b"partial".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProbeClient::new(&config()).unwrap();
    let result = request_once(&client, &server).await;

    assert_eq!(
        result.outcome,
        ProbeOutcome::Hit {
            status: 206,
            checksum: Checksum::of(b"partial"),
            bytes: 7,
        }
    );
    assert_eq!(result.url, format!("{}{ASSET_PATH}", server.uri()));
}

#[tokio::test]
async fn test_no_range_header_when_disabled() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .and(header_exists("range"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"full body".to_vec()))
        .mount(&server)
        .await;

    let client = ProbeClient::new(&config().with_range_bytes(0)).unwrap();
    assert_eq!(client.range_header(), None);
    let result = request_once(&client, &server).await;
    assert!(result.outcome.is_hit());
    assert_eq!(result.outcome.bytes(), 9);
}

#[tokio::test]
async fn test_404_is_miss_with_body_checksum() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_bytes(b"not here".to_vec()))
        .mount(&server)
        .await;

    let client = ProbeClient::new(&config()).unwrap();
    let result = request_once(&client, &server).await;
    assert_eq!(
        result.outcome,
        ProbeOutcome::Miss {
            status: 404,
            checksum: Some(Checksum::of(b"not here")),
            bytes: 8,
        }
    );
}

#[tokio::test]
async fn test_timeout_is_transport_failure() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = ProbeClient::new(&config().with_timeout(Duration::from_millis(200))).unwrap();
    let result = request_once(&client, &server).await;
    assert_eq!(result.outcome, ProbeOutcome::transport_failure("timeout"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    let Some(port) = closed_local_port() else {
        return;
    };
    let base = BaseUrl::parse(&format!("http://127.0.0.1:{port}")).unwrap();
    let version = VersionTag::new("1.0").unwrap();

    let client = ProbeClient::new(&config()).unwrap();
    let result = client.probe(&ProbeTarget::new(&base, &version)).await;
    assert!(matches!(
        result.outcome,
        ProbeOutcome::TransportFailure { .. }
    ));
    assert_eq!(result.outcome.bytes(), 0);
}

#[tokio::test]
async fn test_redirect_followed_by_default() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "/moved/AdminInterface.js"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/moved/AdminInterface.js"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"js".to_vec()))
        .mount(&server)
        .await;

    let client = ProbeClient::new(&config()).unwrap();
    let result = request_once(&client, &server).await;
    assert!(result.outcome.is_hit());
    assert_eq!(result.outcome.status(), Some(200));
}

#[tokio::test]
async fn test_redirect_is_miss_when_not_following() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login/"))
        .mount(&server)
        .await;

    let client = ProbeClient::new(&config().with_follow_redirects(false)).unwrap();
    let result = request_once(&client, &server).await;
    assert_eq!(result.outcome.status(), Some(302));
    assert!(!result.outcome.is_hit());
}

#[tokio::test]
async fn test_same_target_twice_is_stable() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"stable".to_vec()))
        .expect(2)
        .mount(&server)
        .await;

    let client = ProbeClient::new(&config()).unwrap();
    let first = request_once(&client, &server).await;
    let second = request_once(&client, &server).await;
    assert_eq!(first, second);
}
