//! Test doubles shared by the command tests.
//!
//! `MockTheme` and `RecordingReporter` append to the same `EventLog`, so a
//! test can assert on how notifications interleave with remote calls.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use themectl::Reporter;
use themectl_client::{AssetEntry, AssetPage, ThemeApi};

#[derive(Debug, thiserror::Error)]
#[error("mock theme failure: {0}")]
pub struct MockError(pub String);

/// Errors are shared so tests can check they come back by identity.
pub type SharedError = Arc<MockError>;

pub fn mock_error(message: &str) -> SharedError {
    Arc::new(MockError(message.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    Info,
    Status,
    Success,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Remove(String),
    Compile,
    Put(String, Vec<u8>),
    List {
        prefix: Option<String>,
        page_token: Option<String>,
    },
    Notify(Note, String),
}

#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn removals(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Remove(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Put(key, contents) => Some((key, contents)),
                _ => None,
            })
            .collect()
    }

    pub fn compile_calls(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Compile))
            .count()
    }

    pub fn api_calls(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| !matches!(e, Event::Notify(..)))
            .count()
    }

    pub fn notes(&self, kind: Note) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notify(k, message) if k == kind => Some(message),
                _ => None,
            })
            .collect()
    }
}

/// In-memory theme that can be told to fail specific calls.
#[derive(Default)]
pub struct MockTheme {
    log: EventLog,
    fail_remove: Option<(String, SharedError)>,
    fail_put: Option<(String, SharedError)>,
    fail_compile: Option<SharedError>,
    fail_list: Option<SharedError>,
    pages: Vec<Vec<AssetEntry>>,
    repeat_token: bool,
}

impl MockTheme {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            ..Self::default()
        }
    }

    pub fn fail_remove(mut self, path: &str, error: SharedError) -> Self {
        self.fail_remove = Some((path.to_string(), error));
        self
    }

    pub fn fail_put(mut self, key: &str, error: SharedError) -> Self {
        self.fail_put = Some((key.to_string(), error));
        self
    }

    pub fn fail_compile(mut self, error: SharedError) -> Self {
        self.fail_compile = Some(error);
        self
    }

    pub fn fail_list(mut self, error: SharedError) -> Self {
        self.fail_list = Some(error);
        self
    }

    /// Serve `pages` in order; page `n` is requested with token `page-n`.
    pub fn with_pages(mut self, pages: Vec<Vec<AssetEntry>>) -> Self {
        self.pages = pages;
        self
    }

    /// Answer every page request with `page-1` as the next token.
    pub fn repeat_token(mut self) -> Self {
        self.repeat_token = true;
        self
    }
}

#[async_trait]
impl ThemeApi for MockTheme {
    type Error = SharedError;

    async fn remove_asset(&self, path: &str) -> Result<(), SharedError> {
        self.log.push(Event::Remove(path.to_string()));
        match &self.fail_remove {
            Some((failing, error)) if failing == path => Err(Arc::clone(error)),
            _ => Ok(()),
        }
    }

    async fn compile_assets(&self) -> Result<(), SharedError> {
        self.log.push(Event::Compile);
        match &self.fail_compile {
            Some(error) => Err(Arc::clone(error)),
            None => Ok(()),
        }
    }

    async fn put_asset(&self, key: &str, contents: &[u8]) -> Result<(), SharedError> {
        self.log.push(Event::Put(key.to_string(), contents.to_vec()));
        match &self.fail_put {
            Some((failing, error)) if failing == key => Err(Arc::clone(error)),
            _ => Ok(()),
        }
    }

    async fn list_assets(
        &self,
        prefix: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<AssetPage, SharedError> {
        self.log.push(Event::List {
            prefix: prefix.map(str::to_string),
            page_token: page_token.map(str::to_string),
        });
        if let Some(error) = &self.fail_list {
            return Err(Arc::clone(error));
        }

        let index = page_token
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        let assets = self.pages.get(index).cloned().unwrap_or_default();
        let next_page_token = if self.repeat_token {
            Some("page-1".to_string())
        } else {
            (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1))
        };
        Ok(AssetPage {
            assets,
            next_page_token,
        })
    }
}

/// Reporter double that records every notification.
#[derive(Default)]
pub struct RecordingReporter {
    log: EventLog,
}

impl RecordingReporter {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.log.push(Event::Notify(Note::Info, message.to_string()));
    }

    fn status(&self, message: &str) {
        self.log.push(Event::Notify(Note::Status, message.to_string()));
    }

    fn success(&self, message: &str) {
        self.log.push(Event::Notify(Note::Success, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.log.push(Event::Notify(Note::Warn, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.log.push(Event::Notify(Note::Error, message.to_string()));
    }
}

pub fn sources(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

pub fn asset(key: &str, size: u64) -> AssetEntry {
    AssetEntry {
        key: key.to_string(),
        size,
        updated_at: None,
    }
}
