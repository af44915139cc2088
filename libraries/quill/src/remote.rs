//! The contract the store expects from whatever talks to the remote resource.
//!
//! Implementations only move data. They must not touch store state, and they report failure as a
//! [`TransportError`]. A call that completed is `Ok`, even when the payload shows the remote did
//! not really apply the write: working that out is the store's job.

use std::fmt;

use crate::data_model::{PostId, RawPost};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(String),
    #[error("{code}: {reason}")]
    Status { code: u16, reason: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

/// What the remote said about a delete. It sends no body back, only a status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteResponse {
    pub status_code: u16,
    pub status_text: String,
}

impl DeleteResponse {
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200, "OK")
    }

    /// Only an explicit 200 counts. Anything else may be the remote pretending.
    pub fn is_confirmed(&self) -> bool {
        self.status_code == 200
    }
}

impl fmt::Display for DeleteResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status_code, self.status_text)
    }
}

// The store is single-threaded, so these futures don't need to be `Send`.
#[allow(async_fn_in_trait)]
pub trait PostsRemote {
    async fn fetch_all(&self) -> Result<Vec<RawPost>, TransportError>;

    async fn create(&self, post: RawPost) -> Result<RawPost, TransportError>;

    async fn update(&self, id: &PostId, post: RawPost) -> Result<RawPost, TransportError>;

    async fn delete(&self, id: &PostId) -> Result<DeleteResponse, TransportError>;
}
