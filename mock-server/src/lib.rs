use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// API version reported by the `version` action and `GET /`.
pub const API_VERSION: u32 = 6;

/// An AnkiConnect action request.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    pub version: u32,
    #[serde(default)]
    pub params: Value,
}

/// The envelope every action answers with. Action failures are reported in
/// `error` with a 200 status, the way AnkiConnect does it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub result: Value,
    pub error: Option<String>,
}

impl Envelope {
    fn ok(result: Value) -> Self {
        Self {
            result,
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            result: Value::Null,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug)]
pub struct Decks {
    by_name: BTreeMap<String, i64>,
    next_id: i64,
}

impl Default for Decks {
    fn default() -> Self {
        Self {
            by_name: BTreeMap::from([("Default".to_string(), 1)]),
            next_id: 2,
        }
    }
}

pub type Db = Arc<RwLock<Decks>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Decks::default()));
    Router::new()
        .route("/", get(banner).post(dispatch))
        .route("/status/{code}", get(forced_status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn banner() -> String {
    format!("AnkiConnect v.{API_VERSION}")
}

/// Answers with whatever status the path names.
async fn forced_status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    tracing::debug!(%status, "forced status");
    Ok((status, format!("forced status {code}")))
}

async fn dispatch(State(db): State<Db>, Json(req): Json<ActionRequest>) -> Json<Envelope> {
    tracing::info!(action = %req.action, version = req.version, "action");
    let envelope = match req.action.as_str() {
        "version" => Envelope::ok(json!(API_VERSION)),
        "deckNames" => {
            let decks = db.read().await;
            let names: Vec<&String> = decks.by_name.keys().collect();
            Envelope::ok(json!(names))
        }
        "deckNamesAndIds" => {
            let decks = db.read().await;
            Envelope::ok(json!(&decks.by_name))
        }
        "createDeck" => match req.params.get("deck").and_then(Value::as_str) {
            Some(name) => {
                let mut decks = db.write().await;
                let existing = decks.by_name.get(name).copied();
                let id = match existing {
                    Some(id) => id,
                    None => {
                        let id = decks.next_id;
                        decks.next_id += 1;
                        decks.by_name.insert(name.to_string(), id);
                        id
                    }
                };
                Envelope::ok(json!(id))
            }
            None => Envelope::err("missing param: deck"),
        },
        "deleteDecks" => match req.params.get("decks").and_then(Value::as_array) {
            Some(names) => {
                let mut decks = db.write().await;
                for name in names.iter().filter_map(Value::as_str) {
                    decks.by_name.remove(name);
                }
                Envelope::ok(Value::Null)
            }
            None => Envelope::err("missing param: decks"),
        },
        other => {
            tracing::warn!(action = other, "unsupported action");
            Envelope::err("unsupported action")
        }
    };
    Json(envelope)
}
