// SPDX-License-Identifier: MIT OR Apache-2.0

//! An in-memory transport that behaves like the `/v1/kv/` endpoints.
//!
//! Writes are base64-encoded on the "server" side, CAS and session locks are
//! enforced, and every request is recorded so tests can inspect what the
//! client actually sent.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use consulkv::domain::{KvEntry, QueryOptions, Result};
use consulkv::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use consulkv::service::KeyValueClient;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use url::Url;

const KV_PREFIX: &str = "/v1/kv/";

#[derive(Debug, Clone, Default)]
struct Stored {
    value: String,
    flags: u64,
    create_index: u64,
    modify_index: u64,
    lock_index: u64,
    session: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    entries: BTreeMap<String, Stored>,
    index: u64,
    requests: Vec<HttpRequest>,
    scripted: VecDeque<HttpResponse>,
}

/// In-memory stand-in for a Consul agent.
#[derive(Debug, Default)]
pub struct MockKvTransport {
    state: Mutex<State>,
}

impl MockKvTransport {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `raw` as the already-encoded payload of `key`, bypassing
    /// base64 encoding.
    pub fn insert_raw(&self, key: &str, raw: &str) {
        let mut state = self.state.lock().unwrap();
        state.index += 1;
        let index = state.index;
        state.entries.insert(
            key.to_string(),
            Stored {
                value: raw.to_string(),
                create_index: index,
                modify_index: index,
                ..Stored::default()
            },
        );
    }

    /// Makes the next request answer with `status` and `body`, whatever it is.
    pub fn fail_next(&self, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .scripted
            .push_back(HttpResponse::new(status, body));
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> HttpRequest {
        self.requests()
            .pop()
            .expect("no request has been sent yet")
    }

    /// Returns the stored keys in order.
    pub fn stored_keys(&self) -> Vec<String> {
        self.state.lock().unwrap().entries.keys().cloned().collect()
    }

    fn entry_json(key: &str, stored: &Stored) -> KvEntry {
        KvEntry {
            key: key.to_string(),
            value: Some(stored.value.clone()),
            flags: stored.flags,
            create_index: stored.create_index,
            modify_index: stored.modify_index,
            lock_index: stored.lock_index,
            session: stored.session.clone(),
        }
    }

    fn get(state: &State, key: &str, request: &HttpRequest) -> HttpResponse {
        let params = &request.params;
        if params.get("keys") == Some("true") {
            let keys: Vec<&String> = state
                .entries
                .keys()
                .filter(|k| k.starts_with(key))
                .collect();
            return Self::json_or_404(&keys, keys.is_empty());
        }

        let entries: Vec<KvEntry> = if params.get("recurse") == Some("true") {
            state
                .entries
                .iter()
                .filter(|(k, _)| k.starts_with(key))
                .map(|(k, v)| Self::entry_json(k, v))
                .collect()
        } else {
            state
                .entries
                .get(key)
                .map(|v| vec![Self::entry_json(key, v)])
                .unwrap_or_default()
        };
        Self::json_or_404(&entries, entries.is_empty())
    }

    fn put(state: &mut State, key: &str, request: &HttpRequest) -> HttpResponse {
        let params = &request.params;
        let existing = state.entries.get(key).cloned();

        if let Some(cas) = params.get("cas") {
            let cas: u64 = match cas.parse() {
                Ok(cas) => cas,
                Err(_) => return HttpResponse::new(400, "Invalid cas value"),
            };
            let current = existing.as_ref().map(|e| e.modify_index).unwrap_or(0);
            if cas != current {
                return HttpResponse::new(200, "false");
            }
        }

        let mut stored = existing.clone().unwrap_or_default();

        if let Some(session) = params.get("acquire") {
            match &stored.session {
                Some(holder) if holder != session => return HttpResponse::new(200, "false"),
                Some(_) => {}
                None => {
                    stored.session = Some(session.to_string());
                    stored.lock_index += 1;
                }
            }
        }

        if let Some(session) = params.get("release") {
            if stored.session.as_deref() != Some(session) {
                return HttpResponse::new(200, "false");
            }
            stored.session = None;
        }

        state.index += 1;
        let index = state.index;
        if existing.is_none() {
            stored.create_index = index;
        }
        stored.modify_index = index;
        stored.flags = match params.get("flags") {
            Some(flags) => match flags.parse() {
                Ok(flags) => flags,
                Err(_) => return HttpResponse::new(400, "Invalid flags value"),
            },
            None => 0,
        };
        stored.value = STANDARD.encode(request.body.as_deref().unwrap_or_default());
        state.entries.insert(key.to_string(), stored);

        HttpResponse::new(200, "true")
    }

    fn delete(state: &mut State, key: &str, request: &HttpRequest) -> HttpResponse {
        if request.params.get("recurse") == Some("true") {
            state.entries.retain(|k, _| !k.starts_with(key));
        } else {
            state.entries.remove(key);
        }
        HttpResponse::new(200, "true")
    }

    fn json_or_404<S: serde::Serialize>(value: &S, empty: bool) -> HttpResponse {
        if empty {
            return HttpResponse::new(404, "");
        }
        match serde_json::to_string(value) {
            Ok(body) => HttpResponse::new(200, body),
            Err(e) => HttpResponse::new(500, e.to_string()),
        }
    }
}

impl HttpTransport for MockKvTransport {
    fn name(&self) -> &str {
        "mock-kv"
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if let Some(response) = state.scripted.pop_front() {
            return Ok(response);
        }

        let key = match request.url.path().strip_prefix(KV_PREFIX) {
            Some(key) => key.to_string(),
            None => return Ok(HttpResponse::new(404, "")),
        };

        Ok(match request.method {
            HttpMethod::Get => Self::get(&state, &key, request),
            HttpMethod::Put => Self::put(&mut state, &key, request),
            HttpMethod::Delete => Self::delete(&mut state, &key, request),
        })
    }
}

/// Creates a client wired to a fresh mock store.
pub fn mock_client() -> (KeyValueClient<Arc<MockKvTransport>>, Arc<MockKvTransport>) {
    let transport = Arc::new(MockKvTransport::new());
    let base = Url::parse("http://127.0.0.1:8500/v1/kv/").unwrap();
    (KeyValueClient::new(base, Arc::clone(&transport)), transport)
}

/// Blank read options, spelled out for readability at call sites.
pub fn blank() -> QueryOptions {
    QueryOptions::default()
}
