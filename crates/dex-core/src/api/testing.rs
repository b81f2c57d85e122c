//! In-memory [`Transport`] and document fixtures for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::transport::Transport;
use crate::error::{CoreError, CoreResult};

pub(crate) const BASE: &str = "https://dex.test/api/v2";

#[derive(Debug, Clone)]
enum Route {
    Body { body: String, delay_ms: u64 },
    Fail,
}

/// Serves canned bodies by URL. Trailing slashes are ignored when matching.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

fn key(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(
            key(url),
            Route::Body {
                body: body.to_owned(),
                delay_ms: 0,
            },
        );
        self
    }

    pub fn with_json(self, url: &str, value: Value) -> Self {
        self.with_body(url, &value.to_string())
    }

    /// Delays the response of an already registered URL.
    pub fn with_delay(mut self, url: &str, ms: u64) -> Self {
        if let Some(Route::Body { delay_ms, .. }) = self.routes.get_mut(&key(url)) {
            *delay_ms = ms;
        }
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.routes.insert(key(url), Route::Fail);
        self
    }

    /// URLs requested so far, in issue order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_text(&self, url: &str) -> CoreResult<String> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_owned());
        }
        match self.routes.get(&key(url)).cloned() {
            Some(Route::Body { body, delay_ms }) => {
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Ok(body)
            }
            Some(Route::Fail) => Err(CoreError::remote(url, "HTTP 500 Internal Server Error")),
            None => Err(CoreError::remote(url, "HTTP 404 Not Found")),
        }
    }
}

pub(crate) fn core_doc(id: u32, types: &[&str]) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t, "url": ""}}))
        .collect();
    json!({
        "id": id,
        "name": format!("mon-{id}"),
        "height": 7,
        "weight": 69,
        "types": types,
        "sprites": {"front_default": format!("https://img.test/{id}.png")},
        "stats": [{"base_stat": 45, "stat": {"name": "hp", "url": ""}}],
        "abilities": [{"ability": {"name": "overgrow", "url": ""}, "is_hidden": false}]
    })
}

pub(crate) fn species_doc(id: u32) -> Value {
    json!({
        "names": [
            {"name": format!("Mon {id}"), "language": {"name": "en", "url": ""}},
            {"name": format!("モン{id}"), "language": {"name": "ja", "url": ""}}
        ],
        "flavor_text_entries": [
            {"flavor_text": format!("Flavor for {id}."), "language": {"name": "ja", "url": ""}}
        ],
        "genera": [{"genus": "テストポケモン", "language": {"name": "ja", "url": ""}}],
        "generation": {"name": "generation-i", "url": ""}
    })
}

pub(crate) fn species_doc_with_chain(id: u32, chain_url: &str) -> Value {
    let mut doc = species_doc(id);
    doc["evolution_chain"] = json!({ "url": chain_url });
    doc
}

/// A chain document with one stage per id, each evolving into the next.
pub(crate) fn linear_chain(ids: &[u32]) -> Value {
    let mut link = Value::Null;
    for id in ids.iter().rev() {
        let evolves_to = if link.is_null() { json!([]) } else { json!([link]) };
        link = json!({
            "species": {"name": format!("mon-{id}"), "url": format!("{BASE}/pokemon-species/{id}/")},
            "evolves_to": evolves_to
        });
    }
    json!({ "chain": link })
}

/// A transport serving an index of `n` grass/poison items plus their
/// core and species documents.
pub(crate) fn catalog(n: u32) -> FakeTransport {
    let results: Vec<Value> = (1..=n)
        .map(|id| json!({"name": format!("mon-{id}"), "url": format!("{BASE}/pokemon/{id}/")}))
        .collect();
    let mut transport = FakeTransport::new().with_json(
        &format!("{BASE}/pokemon?limit={n}&offset=0"),
        json!({ "count": n, "results": results }),
    );
    for id in 1..=n {
        transport = transport
            .with_json(&format!("{BASE}/pokemon/{id}/"), core_doc(id, &["grass", "poison"]))
            .with_json(&format!("{BASE}/pokemon-species/{id}"), species_doc(id));
    }
    transport
}
