// src/term_store.rs
use crate::error::{GlossaryResult, Unavailable};
use crate::glossary_data::{LessonContext, TermEntry};
use crate::glossary_parser::parse_lesson_terms;
use crate::selection::is_space;
use gloo_net::http::Request;
use std::collections::HashMap;
use web_sys::RequestCache;

/// Canonical lookup key: trimmed, whitespace runs collapsed to one space,
/// lowercased.
pub fn normalize(text: &str) -> String {
    text.split(is_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Definitions for exactly one lesson. Written once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermStore {
    entries: HashMap<String, TermEntry>,
    ready: bool,
}

impl TermStore {
    /// Index `entries`; later duplicates of a key replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = TermEntry>) -> Self {
        let mut map = HashMap::new();
        for entry in entries {
            map.insert(entry.normalized_key.clone(), entry);
        }
        let ready = !map.is_empty();
        Self {
            entries: map,
            ready,
        }
    }

    /// Fetch the glossary and index the terms for `context`. Never fails:
    /// any problem is logged and yields an empty, unready store.
    pub async fn load(context: Option<&LessonContext>, source_url: &str) -> Self {
        if context.is_none() {
            return Self::unavailable(Unavailable::MissingContext);
        }
        match fetch_body(source_url).await {
            Ok((status, ok, body)) => Self::from_response(status, ok, &body, context),
            Err(reason) => Self::unavailable(reason),
        }
    }

    /// Build the store from a completed glossary response.
    pub fn from_response(
        status: u16,
        ok: bool,
        body: &str,
        context: Option<&LessonContext>,
    ) -> Self {
        let entries = context
            .ok_or(Unavailable::MissingContext)
            .and_then(|context| {
                if !ok {
                    return Err(Unavailable::Status(status));
                }
                parse_lesson_terms(body, context)
            });

        match entries {
            Ok(entries) => {
                let store = Self::from_entries(entries);
                log::info!("Glossary ready: {} terms", store.len());
                store
            }
            Err(reason) => Self::unavailable(reason),
        }
    }

    fn unavailable(reason: Unavailable) -> Self {
        log::warn!("Glossary unavailable: {}", reason);
        Self::default()
    }

    pub fn lookup(&self, raw_text: &str) -> Option<&TermEntry> {
        if !self.ready {
            return None;
        }
        self.entries.get(&normalize(raw_text))
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Status, success flag and body. The body of a failed response is not read.
async fn fetch_body(source_url: &str) -> GlossaryResult<(u16, bool, String)> {
    let resp = Request::get(source_url)
        .cache(RequestCache::NoStore)
        .send()
        .await
        .map_err(|e| Unavailable::Transport(e.to_string()))?;
    if !resp.ok() {
        return Ok((resp.status(), false, String::new()));
    }
    let body = resp
        .text()
        .await
        .map_err(|e| Unavailable::Transport(e.to_string()))?;
    Ok((resp.status(), true, body))
}
