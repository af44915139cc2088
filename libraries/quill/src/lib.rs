//! A client-side store for posts that live on a REST resource.
//!
//! The remote is not trustworthy: it accepts writes for posts it has never stored and answers as
//! if they succeeded, and it hands out the same id to every post it "creates". This crate keeps a
//! local collection consistent anyway.
//!
//! How it works:
//! 1. [`Posts`] owns the state and a [`PostsRemote`]. The application creates one and passes it to
//!    whatever needs to read or change posts. There is no global instance.
//! 2. Each network operation runs in phases: mark pending, await the remote, then apply exactly one
//!    reducer for the outcome. Reducers never suspend, so every completion is applied in full
//!    before anything else can observe the state.
//! 3. Responses are checked before they are merged. A fetch drops posts it can't use, a create
//!    that comes back with a taken id gets a local one, an update without an id changes nothing,
//!    and a delete only removes on an explicit 200.
//! 4. Listeners registered with [`Posts::subscribe`] are told after each phase that changed
//!    something.

pub mod data_model;
mod error;
mod listeners;
mod posts;
pub mod remote;

pub use data_model::{
    DeleteOutcome, FetchOutcome, FetchStatus, ListenerKey, Post, PostId, RawPost, ReactionKind,
    Reactions, UpdateOutcome,
};
pub use error::StoreError;
pub use posts::Posts;
pub use remote::{DeleteResponse, PostsRemote, TransportError};
