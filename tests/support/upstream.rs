use std::{collections::HashMap, mem, net::SocketAddr, sync::Arc};

use async_cell::sync::AsyncCell;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

/// Stand-in for the movie catalog API. Echoes every request back as JSON
/// and remembers it. `/movie/0` always fails.
pub struct FakeTmdb {
    pub addr: SocketAddr,
    requests: Arc<AsyncCell<Vec<RecordedRequest>>>,
}

impl FakeTmdb {
    pub async fn start() -> FakeTmdb {
        let requests = AsyncCell::<Vec<RecordedRequest>>::new().into_shared();
        requests.set(Vec::new());

        let app = Router::new()
            .fallback(record)
            .with_state(requests.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        mem::forget(tokio::spawn(async move {
            axum::serve(listener, app).await
        }));

        FakeTmdb { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/3", self.addr)
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        let requests = self.requests.take().await;
        self.requests.set(requests.clone());
        requests
    }

    pub async fn last_request(&self) -> RecordedRequest {
        self.requests()
            .await
            .pop()
            .expect("Catalog was never called")
    }
}

async fn record(
    State(requests): State<Arc<AsyncCell<Vec<RecordedRequest>>>>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/3")
        .unwrap_or(uri.path())
        .to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut recorded = requests.take().await;
    recorded.push(RecordedRequest {
        path: path.clone(),
        query: query.clone(),
        authorization,
    });
    requests.set(recorded);

    if path == "/movie/0" {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "status_code": 34 })),
        )
            .into_response();
    }
    Json(serde_json::json!({ "path": path, "query": query })).into_response()
}
