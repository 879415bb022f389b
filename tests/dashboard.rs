//! Dashboard server tests against a mock API.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tokio::sync::mpsc;
use tower::ServiceExt;

use posture_dash::config::DashboardConfig;
use posture_dash::http::{DashboardServer, X_REQUEST_ID};
use posture_dash::lifecycle::Shutdown;
use posture_dash::posture::{CheckId, PostureReport};

mod common;
use common::MockRoutes;

fn config_for(addr: std::net::SocketAddr) -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.api.base_url = common::base_url(addr);
    config.api.timeout_secs = 2;
    config
}

async fn get(server: &DashboardServer, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = server
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let request_id = response
        .headers()
        .get(X_REQUEST_ID)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, request_id, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_page_renders_all_panes() {
    let addr = common::start_mock_api(MockRoutes::root()).await;
    let server = DashboardServer::new(config_for(addr)).unwrap();

    let (status, request_id, page) = get(&server, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(request_id.is_some());
    assert!(page.contains(r#"<pre id="healthOut">"#));
    assert!(page.contains("rotate keys"));
    assert!(page.contains(r#"<li id="sec-health" class="ok">"#));
    assert!(page.contains(r#"<li id="sec-nonroot" class="bad">"#));
    assert!(page.contains("FAIL: uid=0"));
    assert!(page.contains("FAIL: NoNewPrivs=0"));
    assert!(page.contains("CapEff: <code>00000000a80425fb</code>"));
}

#[tokio::test]
async fn test_security_json() {
    let addr = common::start_mock_api(MockRoutes::hardened()).await;
    let server = DashboardServer::new(config_for(addr)).unwrap();

    let (status, _, body) = get(&server, "/api/security").await;
    assert_eq!(status, StatusCode::OK);

    let report: PostureReport = serde_json::from_str(&body).unwrap();
    assert!(report.all_passed());

    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["checks"][1]["id"], "sec-nonroot");
    assert_eq!(value["checks"][1]["detail"], "uid=1000");
    assert_eq!(value["raw"]["health"]["status"], 200);
}

#[tokio::test]
async fn test_health_and_tasks_json() {
    let addr = common::start_mock_api(MockRoutes::hardened()).await;
    let server = DashboardServer::new(config_for(addr)).unwrap();

    let (_, _, health) = get(&server, "/api/health").await;
    let health: serde_json::Value = serde_json::from_str(&health).unwrap();
    assert_eq!(health["ok"], true);
    assert_eq!(health["status"], 200);

    let (_, _, tasks) = get(&server, "/api/tasks").await;
    let tasks: serde_json::Value = serde_json::from_str(&tasks).unwrap();
    assert_eq!(tasks["data"][0]["id"], 1);
}

#[tokio::test]
async fn test_unreachable_api_still_renders() {
    let addr = common::unused_addr().await;
    let server = DashboardServer::new(config_for(addr)).unwrap();

    let (status, _, page) = get(&server, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains(r#"<li id="sec-health" class="bad">"#));
    assert!(page.contains("FAIL: no data"));
}

#[tokio::test]
async fn test_config_reload_switches_api() {
    let root_api = common::start_mock_api(MockRoutes::root()).await;
    let hardened_api = common::start_mock_api(MockRoutes::hardened()).await;

    let server = DashboardServer::new(config_for(root_api)).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dashboard = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_rx) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, config_rx, server_shutdown).await });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    let url = format!("http://{}/api/security", dashboard);

    let report: PostureReport = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert!(!report.get(CheckId::NonRoot).pass);

    config_tx.send(config_for(hardened_api)).unwrap();

    let mut reloaded = false;
    for _ in 0..20 {
        let report: PostureReport = client.get(&url).send().await.unwrap().json().await.unwrap();
        if report.all_passed() {
            reloaded = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(reloaded, "dashboard should pick up the new API base URL");

    drop(client);
    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}
