//! Remote document collection client.
//!
//! CRUD over HTTP against `{base}/collections/{name}/documents`, keyed by
//! the owner id. The remote store assigns ids on create and merges partial
//! updates, so [`ThoughtPatch`] serializes straight into the PATCH body.
//!
//! List views use [`RemoteStore::watch`]: a background polling loop that
//! sends a fresh snapshot over a channel whenever the remote list changes.
//! The returned [`Watch`] must be cancelled (explicitly or by drop) when the
//! view goes away, otherwise the poll thread keeps running and stale-screen
//! snapshots pile up in the channel. Poll failures are logged and skipped;
//! nothing in this module retries a failed mutation.

use super::ThoughtStore;
use crate::config::RemoteConfig;
use crate::error::{Result, ThoughtzError};
use crate::model::{sort_by_date_desc, Thought, ThoughtPatch};
use log::warn;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Clone)]
pub struct RemoteStore {
    http: Client,
    base_url: String,
    collection: String,
    api_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    documents: Vec<Thought>,
}

impl RemoteStore {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            api_token: config.api_token.clone(),
        })
    }

    fn documents_url(&self) -> String {
        format!("{}/collections/{}/documents", self.base_url, self.collection)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// One-shot filtered read, newest first.
    fn fetch_documents(&self, query: &[(&str, &str)]) -> Result<Vec<Thought>> {
        let resp = self
            .authorize(self.http.get(self.documents_url()))
            .query(query)
            .send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(ThoughtzError::Remote(format!(
                "list query returned {}: {}",
                status, body
            )));
        }
        decode_documents(&body)
    }

    /// Spawn a polling subscription for `owner`'s thoughts. Each time the
    /// remote list differs from the last snapshot, the new one is sent over
    /// the channel.
    pub fn watch(&self, owner: &str, interval: Duration) -> Watch {
        let store = self.clone();
        let owner = owner.to_string();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let poll = interval.max(Duration::from_millis(100));
            let mut last: Option<Vec<Thought>> = None;
            while !stop_flag.load(Ordering::Relaxed) {
                match store.fetch_documents(&[
                    ("userId", owner.as_str()),
                    ("orderBy", "date"),
                    ("direction", "desc"),
                ]) {
                    Ok(snapshot) => {
                        if last.as_ref() != Some(&snapshot) {
                            if tx.send(snapshot.clone()).is_err() {
                                break;
                            }
                            last = Some(snapshot);
                        }
                    }
                    Err(e) => warn!("watch poll failed for {}: {}", owner, e),
                }
                // Sleep in short ticks so cancel() is prompt
                let mut slept = Duration::ZERO;
                while slept < poll && !stop_flag.load(Ordering::Relaxed) {
                    let tick = Duration::from_millis(50).min(poll - slept);
                    thread::sleep(tick);
                    slept += tick;
                }
            }
        });

        Watch {
            rx,
            stop,
            handle: Some(handle),
        }
    }
}

impl ThoughtStore for RemoteStore {
    fn create(&mut self, thought: &Thought) -> Result<String> {
        let resp = self
            .authorize(self.http.post(self.documents_url()))
            .json(thought)
            .send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(ThoughtzError::Remote(format!(
                "create returned {}: {}",
                status, body
            )));
        }
        decode_create(&body)
    }

    fn get(&self, id: &str) -> Result<Thought> {
        let resp = self.authorize(self.http.get(self.document_url(id))).send()?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ThoughtzError::ThoughtNotFound(id.to_string()));
        }
        let body = resp.text()?;
        if !status.is_success() {
            return Err(ThoughtzError::Remote(format!(
                "get {} returned {}: {}",
                id, status, body
            )));
        }
        serde_json::from_str(&body).map_err(ThoughtzError::Serialization)
    }

    fn list(&self, owner: &str) -> Result<Vec<Thought>> {
        self.fetch_documents(&[("userId", owner), ("orderBy", "date"), ("direction", "desc")])
    }

    fn update(&mut self, id: &str, patch: &ThoughtPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let resp = self
            .authorize(self.http.patch(self.document_url(id)))
            .json(patch)
            .send()?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ThoughtzError::ThoughtNotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(ThoughtzError::Remote(format!(
                "update {} returned {}",
                id, status
            )));
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let resp = self
            .authorize(self.http.delete(self.document_url(id)))
            .send()?;
        let status = resp.status();
        // Deleting an already-deleted document is a no-op
        if status == StatusCode::NOT_FOUND || status.is_success() {
            return Ok(());
        }
        Err(ThoughtzError::Remote(format!(
            "delete {} returned {}",
            id, status
        )))
    }

    fn list_public(&self) -> Result<Vec<Thought>> {
        self.fetch_documents(&[("public", "true"), ("orderBy", "date"), ("direction", "desc")])
    }
}

fn decode_create(body: &str) -> Result<String> {
    let resp: CreateResponse = serde_json::from_str(body).map_err(ThoughtzError::Serialization)?;
    Ok(resp.id)
}

fn decode_documents(body: &str) -> Result<Vec<Thought>> {
    let resp: ListResponse = serde_json::from_str(body).map_err(ThoughtzError::Serialization)?;
    let mut documents = resp.documents;
    sort_by_date_desc(&mut documents);
    Ok(documents)
}

/// Handle for an active polling subscription.
///
/// Snapshots arrive on [`Watch::snapshots`]. Dropping the handle cancels the
/// poll thread.
pub struct Watch {
    rx: Receiver<Vec<Thought>>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Watch {
    pub fn snapshots(&self) -> &Receiver<Vec<Thought>> {
        &self.rx
    }

    /// Drain the channel and return the most recent snapshot, if any.
    pub fn try_latest(&self) -> Option<Vec<Thought>> {
        let mut latest = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            latest = Some(snapshot);
        }
        latest
    }

    /// Stop the poll thread and wait for it to exit.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Watch {
    fn drop(&mut self) {
        self.cancel();
    }
}
