#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Binds an ephemeral port and serves `app` in the background.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().expect("Should have local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server failed");
    });
    format!("http://{}", addr)
}

/// Stand-in for SerpAPI that always answers with the same status and body.
pub struct MockSearch {
    status: StatusCode,
    body: Value,
    hits: AtomicUsize,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

impl MockSearch {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }
}

async fn search_handler(
    State(mock): State<Arc<MockSearch>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    mock.queries.lock().unwrap().push(params);
    (mock.status, Json(mock.body.clone()))
}

/// Starts a mock search endpoint; returns its full `search.json` URL.
pub async fn mock_search(status: StatusCode, body: Value) -> (String, Arc<MockSearch>) {
    let mock = Arc::new(MockSearch {
        status,
        body,
        hits: AtomicUsize::new(0),
        queries: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/search.json", get(search_handler))
        .with_state(mock.clone());
    let base = serve(app).await;
    (format!("{}/search.json", base), mock)
}

pub fn organic(items: &[(&str, &str, &str)]) -> Value {
    let results: Vec<Value> = items
        .iter()
        .map(|(title, link, snippet)| {
            json!({
                "position": 1,
                "title": title,
                "link": link,
                "snippet": snippet,
                "displayed_link": link
            })
        })
        .collect();
    json!({
        "search_metadata": { "status": "Success" },
        "organic_results": results
    })
}

/// Stand-in for a chat completions endpoint that replays scripted replies.
pub struct MockChat {
    replies: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<(Option<String>, Value)>>,
}

impl MockChat {
    pub fn requests(&self) -> Vec<(Option<String>, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

async fn chat_handler(
    State(mock): State<Arc<MockChat>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    mock.requests.lock().unwrap().push((auth, body));
    match mock.replies.lock().unwrap().pop_front() {
        Some(reply) => (StatusCode::OK, Json(reply)),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "no scripted reply left" } })),
        ),
    }
}

/// Starts a mock chat endpoint; returns the base URL to use as `BASE_URL`.
pub async fn mock_chat(replies: Vec<Value>) -> (String, Arc<MockChat>) {
    let mock = Arc::new(MockChat {
        replies: Mutex::new(replies.into()),
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_handler))
        .with_state(mock.clone());
    let base = serve(app).await;
    (format!("{}/v1", base), mock)
}

pub fn completion_text(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

pub fn completion_tool_call(id: &str, name: &str, arguments: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": id,
                    "type": "function",
                    "function": { "name": name, "arguments": arguments }
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
}
