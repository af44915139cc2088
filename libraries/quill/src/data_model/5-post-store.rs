//! # PostStore
//! The state behind the presentation layer: the collection of posts in insertion order, plus the
//! status and error of the last bulk fetch.
//!
//! Every network operation is split into phases, and each phase has a reducer here. Reducers are
//! synchronous and run to completion, so whatever order completions arrive in, the collection is
//! consistent after each one:
//! - ids are unique (the collection is keyed by id)
//! - a failed or unconfirmed operation leaves the collection untouched
//!
//! Reducers are crate-private. The only way in from outside is through [`crate::Posts`].

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;

use crate::StoreError;
use crate::data_model::{FetchStatus, NewPost, Post, PostId, RawPost, ReactionKind};
use crate::remote::DeleteResponse;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched { added: usize },
    /// A fetch was already in flight. No state was touched and no request was sent.
    AlreadyInFlight,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Post),
    /// The remote said yes but the payload shows it stored nothing. The collection is unchanged.
    NotPersisted { diagnostic: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed(PostId),
    /// The remote answered without confirming. The collection is unchanged.
    NotConfirmed { diagnostic: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostStore {
    posts: IndexMap<PostId, Post>,
    fetch_status: FetchStatus,
    /// Only `Some` while `fetch_status` is `Failed`.
    fetch_error: Option<String>,
    dirty: bool,
}

impl PostStore {
    pub fn posts(&self) -> impl ExactSizeIterator<Item = &Post> + '_ {
        self.posts.values()
    }

    pub fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.get(id)
    }

    pub fn contains(&self, id: &PostId) -> bool {
        self.posts.contains_key(id)
    }

    pub fn fetch_status(&self) -> FetchStatus {
        self.fetch_status
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Most recent first. Posts with equal timestamps keep their insertion order.
    pub fn ordered_posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.values().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    /// Returns true (and resets) if anything changed since the last call.
    pub(crate) fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

// =======
// fetch all
// =======

impl PostStore {
    /// Returns false if a fetch is already in flight, in which case nothing changes.
    pub(crate) fn fetch_pending(&mut self) -> bool {
        if self.fetch_status.is_in_flight() {
            return false;
        }
        self.fetch_status = FetchStatus::InFlight;
        self.fetch_error = None;
        self.dirty = true;
        true
    }

    /// Appends everything usable from the remote collection. The k-th accepted post is stamped k
    /// minutes before `now`, so a single fetch has a stable newest-first order.
    pub(crate) fn fetch_fulfilled(&mut self, raw_posts: Vec<RawPost>, now: DateTime<Utc>) -> usize {
        self.fetch_status = FetchStatus::Succeeded;
        self.fetch_error = None;
        self.dirty = true;

        let mut added = 0;
        for raw in raw_posts {
            let created_at = now - Duration::minutes(added as i64 + 1);
            let post = match Post::from_remote(raw, created_at) {
                Ok(post) => post,
                Err(e) => {
                    log::warn!("Dropping malformed post from fetch: {e}");
                    continue;
                }
            };
            if self.posts.contains_key(&post.id) {
                // the local copy may carry reactions the remote never saw
                log::warn!("Fetched post {} is already in the store, keeping local copy", post.id);
                continue;
            }
            self.posts.insert(post.id.clone(), post);
            added += 1;
        }
        log::debug!("Fetch appended {added} posts, {} total", self.posts.len());
        added
    }

    pub(crate) fn fetch_rejected(&mut self, error: String) {
        self.fetch_status = FetchStatus::Failed;
        self.fetch_error = Some(error);
        self.dirty = true;
    }
}

// =======
// create / update / delete
// =======

impl PostStore {
    /// Appends the post the remote created. The remote's echo is trusted for content, but it
    /// frequently hands out an id it already handed out (or none at all), so those get a local id.
    pub(crate) fn post_created(
        &mut self,
        response: RawPost,
        submitted: &NewPost,
        now: DateTime<Utc>,
    ) -> Post {
        let id = match response.valid_id() {
            Some(id) if !self.posts.contains_key(id) => id.clone(),
            Some(id) => {
                log::warn!("Remote reused id {id} for a new post, assigning a local id");
                self.fresh_local_id()
            }
            None => {
                log::warn!("Remote created a post without an id, assigning a local id");
                self.fresh_local_id()
            }
        };

        let post = Post {
            id: id.clone(),
            title: non_empty_or(response.title, &submitted.title, "title", &id),
            body: non_empty_or(response.body, &submitted.body, "body", &id),
            author_id: response.user_id.unwrap_or(submitted.author_id),
            created_at: now,
            reactions: Default::default(),
        };
        self.posts.insert(id, post.clone());
        self.dirty = true;
        post
    }

    /// Replaces the post with the remote's version, moving it to the end of the collection. Reactions
    /// are kept from the stored post.
    pub(crate) fn post_updated(
        &mut self,
        submitted: &Post,
        response: RawPost,
        now: DateTime<Utc>,
    ) -> Result<UpdateOutcome, StoreError> {
        let Some(id) = response.valid_id().cloned() else {
            let diagnostic = format!("Update of post {} could not complete", submitted.id);
            log::warn!("{diagnostic}: remote returned {response:?}");
            return Ok(UpdateOutcome::NotPersisted { diagnostic });
        };
        if id != submitted.id {
            let diagnostic = format!(
                "Update of post {} could not complete: remote answered for post {id}",
                submitted.id
            );
            log::warn!("{diagnostic}");
            return Ok(UpdateOutcome::NotPersisted { diagnostic });
        }
        // removed while the request was in flight
        let Some(current) = self.posts.shift_remove(&id) else {
            return Err(StoreError::NotFound(id));
        };

        let post = Post {
            id: id.clone(),
            title: non_empty_or(response.title, &submitted.title, "title", &id),
            body: non_empty_or(response.body, &submitted.body, "body", &id),
            author_id: response.user_id.unwrap_or(submitted.author_id),
            created_at: now,
            // local-only, so whatever landed while the request was in flight is kept
            reactions: current.reactions,
        };
        self.posts.insert(id, post.clone());
        self.dirty = true;
        Ok(UpdateOutcome::Updated(post))
    }

    pub(crate) fn post_deleted(
        &mut self,
        id: &PostId,
        response: &DeleteResponse,
    ) -> Result<DeleteOutcome, StoreError> {
        if !response.is_confirmed() {
            let diagnostic = response.to_string();
            log::warn!("Delete of post {id} could not complete: {diagnostic}");
            return Ok(DeleteOutcome::NotConfirmed { diagnostic });
        }
        match self.posts.shift_remove(id) {
            Some(_) => {
                self.dirty = true;
                Ok(DeleteOutcome::Removed(id.clone()))
            }
            None => Err(StoreError::NotFound(id.clone())),
        }
    }

    /// Missing posts are ignored: the reaction raced a removal.
    pub(crate) fn reaction_added(&mut self, id: &PostId, kind: ReactionKind) -> bool {
        let Some(post) = self.posts.get_mut(id) else {
            return false;
        };
        post.reactions.increment(kind);
        self.dirty = true;
        true
    }

    fn fresh_local_id(&self) -> PostId {
        loop {
            let id = PostId::new_local();
            if !self.posts.contains_key(&id) {
                return id;
            }
        }
    }
}

/// The remote's echo wins, except where it came back blank.
fn non_empty_or(value: String, fallback: &str, field: &str, id: &PostId) -> String {
    if value.trim().is_empty() {
        log::warn!("Remote echoed an empty {field} for post {id}, keeping the submitted one");
        fallback.to_string()
    } else {
        value
    }
}
