//! End-to-end evaluation against a mock API.

use posture_dash::api::ApiClient;
use posture_dash::config::ApiConfig;
use posture_dash::posture::{self, CheckId, NO_DATA};

mod common;
use common::MockRoutes;

fn client(addr: std::net::SocketAddr) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: common::base_url(addr),
        timeout_secs: 2,
        ..ApiConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_hardened_service_passes() {
    let addr = common::start_mock_api(MockRoutes::hardened()).await;

    let report = posture::collect(&client(addr)).await;

    assert!(report.all_passed(), "{:?}", report.checks);
    assert_eq!(report.raw.info.data["env"]["HOSTNAME"], "api-1");
}

#[tokio::test]
async fn test_root_service_fails_with_details() {
    let addr = common::start_mock_api(MockRoutes::root()).await;

    let report = posture::collect(&client(addr)).await;

    assert!(report.get(CheckId::Health).pass);
    assert_eq!(report.get(CheckId::NonRoot).badge(), "FAIL: uid=0");
    assert_eq!(report.get(CheckId::ReadOnlyFs).badge(), "FAIL");
    assert_eq!(report.get(CheckId::NoNewPrivs).badge(), "FAIL: NoNewPrivs=0");
}

#[tokio::test]
async fn test_info_endpoint_error_means_no_data() {
    let addr = common::start_mock_api(MockRoutes::with_info(503, common::HARDENED_INFO)).await;

    let report = posture::collect(&client(addr)).await;

    assert!(report.get(CheckId::Health).pass);
    for id in [CheckId::NonRoot, CheckId::ReadOnlyFs, CheckId::NoNewPrivs] {
        assert_eq!(report.get(id).detail.as_deref(), Some(NO_DATA));
        assert!(!report.get(id).pass);
    }
    assert_eq!(report.raw.info.status, 503);
}

#[tokio::test]
async fn test_unhealthy_api_with_good_info() {
    let mut routes = MockRoutes::hardened();
    routes.health = (500, r#"{"ok": false, "error": "db down"}"#.into());
    let addr = common::start_mock_api(routes).await;

    let report = posture::collect(&client(addr)).await;

    assert_eq!(report.get(CheckId::Health).badge(), "FAIL");
    assert!(report.get(CheckId::NonRoot).pass);
    assert!(report.get(CheckId::ReadOnlyFs).pass);
    assert!(report.get(CheckId::NoNewPrivs).pass);
}

#[tokio::test]
async fn test_created_status_is_not_healthy() {
    let mut routes = MockRoutes::hardened();
    routes.health = (201, r#"{"ok": true}"#.into());
    let addr = common::start_mock_api(routes).await;

    let report = posture::collect(&client(addr)).await;

    assert!(report.raw.health.ok);
    assert!(!report.get(CheckId::Health).pass);
}

#[tokio::test]
async fn test_unreachable_api_fails_everything() {
    let addr = common::unused_addr().await;

    let report = posture::collect(&client(addr)).await;

    assert_eq!(report.failures().count(), 4);
    assert_eq!(report.get(CheckId::NoNewPrivs).detail.as_deref(), Some(NO_DATA));
}
