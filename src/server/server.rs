mod server_config;
mod error;

use server_config::AppConfig;
use error::ServerError;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response as HttpResponse},
    routing::{get, post},
    Json, Router
};
use clap::Parser;
use log::info;
use serde::Deserialize;

use scheduler::{Response, SchedulerContract, backend::{JsonStore, LedgerStore}};

const SERVER_CONFIG: &str = "resources/server.toml";

type SharedStore = Arc<Mutex<Box<dyn LedgerStore + Send>>>;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Path to the server configuration file
    #[arg(short, long, default_value = SERVER_CONFIG)]
    config: PathBuf
}

#[derive(Clone)]
struct AppState {
    contract: SchedulerContract,
    store: SharedStore
}

#[derive(Debug, Deserialize)]
struct Invocation {
    function: String,
    #[serde(default)]
    args: Vec<String>
}

fn into_http(response: Response) -> Result<HttpResponse, ServerError> {
    match response {
        Response::Success(payload) if payload.is_empty() => Ok(StatusCode::OK.into_response()),
        Response::Success(payload) =>
            Ok(([(header::CONTENT_TYPE, "application/json")], payload).into_response()),
        Response::Error(message) => Err(ServerError::Rejected(message))
    }
}

async fn index() -> &'static str {
    "scheduler contract host"
}

async fn init(State(state): State<AppState>) -> Result<HttpResponse, ServerError> {
    into_http(state.contract.init())
}

async fn invoke(State(state): State<AppState>, Json(invocation): Json<Invocation>) -> Result<HttpResponse, ServerError> {
    // Stores do blocking file I/O under the lock; keep it off the async workers.
    let response = tokio::task::spawn_blocking(move || {
        let mut store = state.store.lock()
            .map_err(|_| anyhow!("ledger store lock poisoned"))?;
        Ok::<_, anyhow::Error>(state.contract.invoke(&mut **store, &invocation.function, &invocation.args))
    }).await??;
    into_http(response)
}

fn app(contract: SchedulerContract, store: Box<dyn LedgerStore + Send>) -> Router {
    let state = AppState { contract, store: Arc::new(Mutex::new(store)) };
    Router::new()
        .route("/", get(index))
        .route("/init", post(init))
        .route("/invoke", post(invoke))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let config = AppConfig::read(&opts.config)
        .with_context(|| format!("failed to load {}", opts.config.display()))?;
    let store = JsonStore::open(&config.store)?;
    let contract = SchedulerContract::new(config.failure_policy);

    let listener = tokio::net::TcpListener::bind(config.bind).await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("serving {} on {} ({:?})", config.store.display(), config.bind, contract.policy());

    axum::serve(listener, app(contract, Box::new(store))).await?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::app;

    use axum::{body::{self, Body}, http::{Request, StatusCode}, Router};
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tower::ServiceExt;

    use scheduler::{FailurePolicy, SchedulerContract, backend::MemoryStore};

    #[fixture]
    fn router() -> Router {
        app(SchedulerContract::new(FailurePolicy::Permissive), Box::new(MemoryStore::new()))
    }

    async fn call(router: &Router, function: &str, args: &[&str]) -> (StatusCode, Vec<u8>) {
        let body = json!({"function": function, "args": args}).to_string();
        let request = Request::builder()
            .method("POST")
            .uri("/invoke")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[rstest]
    #[tokio::test]
    async fn create_update_query(router: Router) {
        let (status, body) = call(&router, "createOrUpdateDisplay",
            &["display1", "http://example.com/sched.json", "abc123"]).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let (status, _) = call(&router, "updateScheduleHash", &["display1", "def456"]).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&router, "queryDisplay", &["display1"]).await;
        assert_eq!(status, StatusCode::OK);
        let record: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(record, json!({
            "scheduleURL": "http://example.com/sched.json",
            "scheduleHash": "def456"
        }));
    }

    #[rstest]
    #[tokio::test]
    async fn contract_errors_are_bad_requests(router: Router) {
        let (status, body) = call(&router, "queryDisplay", &[]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, b"Incorrect number of arguments. Expecting 1");

        let (status, body) = call(&router, "dropDisplay", &["display1"]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, b"Invalid Smart Contract function name.");
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_invocations_all_land(router: Router) {
        let calls = (0..8).map(|i| {
            let router = router.clone();
            tokio::spawn(async move {
                let key = format!("display{}", i);
                call(&router, "createOrUpdateDisplay", &[key.as_str(), "http://example.com/sched.json", "abc123"]).await
            })
        });
        for handle in calls.collect::<Vec<_>>() {
            let (status, _) = handle.await.unwrap();
            assert_eq!(status, StatusCode::OK);
        }

        for i in 0..8 {
            let key = format!("display{}", i);
            let (status, body) = call(&router, "queryDisplay", &[key.as_str()]).await;
            assert_eq!(status, StatusCode::OK);
            assert!(!body.is_empty());
        }
    }

    #[rstest]
    #[tokio::test]
    async fn init_route(router: Router) {
        let request = Request::builder()
            .method("POST")
            .uri("/init")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
