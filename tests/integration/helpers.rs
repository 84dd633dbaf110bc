use faucet_finder::{
    config::{Config, WorkflowTransport},
    infrastructure::inference::RoboflowClient,
    presentation::http::{routes::create_router, state::AppState},
};
use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
    routing::post,
};
use serde::de::DeserializeOwned;
use std::{
    io::Cursor,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tower::ServiceExt;
use uuid::Uuid;

/// One request recorded by the stub workflow endpoint.
#[derive(Clone)]
pub struct CapturedCall {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// In-process stand-in for the hosted workflow endpoint. Serves
/// `POST /workflow/{workspace}/{workflow_id}` with a canned reply and records
/// what the client sent.
pub struct RemoteWorkflow {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    captured: Arc<Mutex<Option<CapturedCall>>>,
}

impl RemoteWorkflow {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn captured_call(&self) -> Option<CapturedCall> {
        self.captured
            .lock()
            .expect("captured call lock poisoned")
            .clone()
    }
}

pub async fn spawn_remote(status: StatusCode, body: &'static str) -> RemoteWorkflow {
    spawn_remote_with_delay(status, body, Duration::ZERO).await
}

pub async fn spawn_remote_with_delay(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> RemoteWorkflow {
    let hits = Arc::new(AtomicUsize::new(0));
    let captured: Arc<Mutex<Option<CapturedCall>>> = Arc::new(Mutex::new(None));

    let route_hits = hits.clone();
    let route_captured = captured.clone();
    let app = Router::new().route(
        "/workflow/{workspace}/{workflow_id}",
        post(move |headers: HeaderMap, payload: Bytes| {
            let hits = route_hits.clone();
            let captured = route_captured.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                *captured.lock().expect("captured call lock poisoned") = Some(CapturedCall {
                    content_type,
                    body: payload.to_vec(),
                });
                tokio::time::sleep(delay).await;
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub workflow listener");
    let addr = listener
        .local_addr()
        .expect("stub workflow listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("stub workflow server failed");
    });

    RemoteWorkflow {
        base_url: format!("http://{}", addr),
        hits,
        captured,
    }
}

/// Local address nothing is listening on, so connections are refused fast.
pub async fn unused_local_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to reserve local port");
    let addr = listener
        .local_addr()
        .expect("reserved listener has no address");
    drop(listener);
    format!("http://{}", addr)
}

pub struct TestApp {
    pub app: Router,
    pub staging_dir: PathBuf,
}

pub fn build_config(
    remote_base_url: &str,
    transport: WorkflowTransport,
    staging_dir: PathBuf,
    timeout_seconds: u64,
) -> Config {
    Config {
        roboflow_api_key: "test-api-key".to_string(),
        roboflow_workspace: "plumbing-lab".to_string(),
        roboflow_workflow_id: "find-faucets".to_string(),
        roboflow_api_url: remote_base_url.to_string(),
        workflow_transport: transport,
        workflow_timeout_seconds: timeout_seconds,
        workflow_use_cache: true,
        staging_dir,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

pub fn app_for(config: Config) -> Router {
    let workflow =
        Arc::new(RoboflowClient::new(&config).expect("failed to build workflow client"));
    create_router(AppState {
        workflow,
        config,
    })
}

pub fn spawn_app(remote: &RemoteWorkflow, transport: WorkflowTransport) -> TestApp {
    spawn_app_with_timeout(remote, transport, 30)
}

pub fn spawn_app_with_timeout(
    remote: &RemoteWorkflow,
    transport: WorkflowTransport,
    timeout_seconds: u64,
) -> TestApp {
    let staging_dir = unique_staging_dir();
    std::fs::create_dir_all(&staging_dir).expect("failed to create staging dir");
    let config = build_config(&remote.base_url, transport, staging_dir.clone(), timeout_seconds);
    TestApp {
        app: app_for(config),
        staging_dir,
    }
}

pub fn unique_staging_dir() -> PathBuf {
    std::env::temp_dir().join(format!("faucet-staging-{}", Uuid::now_v7()))
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

pub fn assert_status(status: StatusCode, expected: StatusCode) {
    assert_eq!(status, expected, "expected {}, got {}", expected, status);
}

pub fn tiny_jpeg_bytes() -> Vec<u8> {
    let uuid_bytes = *Uuid::now_v7().as_bytes();
    let raw = vec![
        uuid_bytes[0],
        uuid_bytes[1],
        uuid_bytes[2],
        uuid_bytes[3],
        uuid_bytes[4],
        uuid_bytes[5],
        uuid_bytes[6],
        uuid_bytes[7],
        uuid_bytes[8],
        uuid_bytes[9],
        uuid_bytes[10],
        uuid_bytes[11],
    ];
    let image = image::RgbImage::from_raw(2, 2, raw).expect("failed to create image");
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .expect("failed to encode jpeg");
    bytes
}

pub fn multipart_image_body(filename: &str, image_bytes: &[u8]) -> (String, Vec<u8>) {
    let boundary = format!("----faucet-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    body.extend_from_slice(image_bytes);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (boundary, body)
}

pub fn detect_request(boundary: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/detect")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .expect("failed to build detect request")
}
