//! In-process fake of the MediaWiki Action API
//!
//! Serves canned replies for the three queries the pipeline issues and
//! records the query string of every request it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

/// Canned reply: status + raw body text
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self {
            status: 200,
            body: value.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Replies per query kind; `None` answers 404
#[derive(Debug, Clone, Default)]
pub struct FakeReplies {
    pub sections: Option<Reply>,
    pub revisions: Option<Reply>,
    pub imageinfo: Option<Reply>,
}

#[derive(Clone)]
struct FakeState {
    replies: FakeReplies,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// Running fake API server
pub struct FakeWiktionary {
    pub api_url: String,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl FakeWiktionary {
    /// Start the fake on an ephemeral port
    pub async fn start(replies: FakeReplies) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            replies,
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/w/api.php", get(api_php))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake wiktionary");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake wiktionary server");
        });

        Self {
            api_url: format!("http://{}/w/api.php", addr),
            requests,
        }
    }

    /// All recorded query strings, in arrival order
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests whose `prop` parameter equals `prop`
    pub fn requests_for(&self, prop: &str) -> Vec<HashMap<String, String>> {
        self.requests()
            .into_iter()
            .filter(|params| params.get("prop").map(String::as_str) == Some(prop))
            .collect()
    }
}

async fn api_php(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.lock().unwrap().push(params.clone());

    let reply = match (
        params.get("action").map(String::as_str),
        params.get("prop").map(String::as_str),
    ) {
        (Some("parse"), Some("sections")) => state.replies.sections.clone(),
        (Some("query"), Some("revisions")) => state.replies.revisions.clone(),
        (Some("query"), Some("imageinfo")) => state.replies.imageinfo.clone(),
        _ => None,
    };

    match reply {
        Some(reply) => (
            StatusCode::from_u16(reply.status).unwrap(),
            [("content-type", "application/json")],
            reply.body,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "no canned reply").into_response(),
    }
}

/// `action=parse&prop=sections` body for the given (title, index) pairs
pub fn sections_json(sections: &[(&str, &str)]) -> Value {
    let sections: Vec<Value> = sections
        .iter()
        .map(|(line, index)| {
            json!({
                "toclevel": 1,
                "level": "3",
                "line": line,
                "number": index,
                "index": index,
                "fromtitle": "potato",
                "anchor": line,
            })
        })
        .collect();

    json!({ "parse": { "title": "potato", "pageid": 24573, "sections": sections } })
}

/// `action=query&prop=revisions` body carrying `markup` in the main slot
pub fn revisions_json(markup: &str) -> Value {
    json!({
        "batchcomplete": "",
        "query": {
            "pages": {
                "24573": {
                    "pageid": 24573,
                    "ns": 0,
                    "title": "potato",
                    "revisions": [{
                        "slots": {
                            "main": {
                                "contentmodel": "wikitext",
                                "contentformat": "text/x-wiki",
                                "*": markup
                            }
                        }
                    }]
                }
            }
        }
    })
}

/// `action=query&prop=imageinfo` body resolving to `url`
pub fn imageinfo_json(url: &str) -> Value {
    json!({
        "batchcomplete": "",
        "query": {
            "pages": {
                "-1": {
                    "ns": 6,
                    "title": "File:example.wav",
                    "missing": "",
                    "known": "",
                    "imagerepository": "shared",
                    "imageinfo": [{
                        "url": url,
                        "descriptionurl": "https://commons.example/wiki/File:example.wav"
                    }]
                }
            }
        }
    })
}
