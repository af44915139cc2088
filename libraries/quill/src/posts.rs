use std::cell::RefCell;

use chrono::Utc;

use crate::StoreError;
use crate::data_model::{
    DeleteOutcome, FetchOutcome, FetchStatus, ListenerKey, NewPost, Post, PostId, PostStore,
    RawPost, ReactionKind, UpdateOutcome,
};
use crate::listeners::Listeners;
use crate::remote::PostsRemote;

/// Owns the post collection and drives each operation through its phases.
///
/// Operations suspend only while waiting on the remote. We never hold a borrow of the state across
/// an `.await`, which is what lets any number of operations be in flight at once without
/// "already borrowed" panics.
pub struct Posts<R> {
    store: RefCell<PostStore>,
    listeners: RefCell<Listeners>,
    remote: R,
}

impl<R> Posts<R> {
    pub fn new(remote: R) -> Self {
        Self {
            store: RefCell::new(PostStore::default()),
            listeners: RefCell::new(Listeners::default()),
            remote,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    // =======
    // reads
    // =======

    /// All posts, in the order they were added.
    pub fn all_posts(&self) -> Vec<Post> {
        self.store.borrow().posts().cloned().collect()
    }

    pub fn post_by_id(&self, id: &PostId) -> Option<Post> {
        self.store.borrow().post(id).cloned()
    }

    pub fn fetch_status(&self) -> FetchStatus {
        self.store.borrow().fetch_status()
    }

    pub fn fetch_error(&self) -> Option<String> {
        self.store.borrow().fetch_error().map(str::to_string)
    }

    /// All posts, most recent first.
    pub fn ordered_posts(&self) -> Vec<Post> {
        self.store
            .borrow()
            .ordered_posts()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }

    // =======
    // listeners
    // =======

    /// The listener is invoked after any operation phase that changed the store.
    pub fn subscribe(&self, listener: impl Fn(ListenerKey) + 'static) -> ListenerKey {
        self.listeners.borrow_mut().register(listener)
    }

    pub fn unsubscribe(&self, key: ListenerKey) -> bool {
        self.listeners.borrow_mut().unregister(key)
    }

    fn flush_notifications(&self) {
        if !self.store.borrow_mut().take_dirty() {
            return;
        }
        // listeners may call straight back into us, so no borrow can be alive while they run
        let notifications = self.listeners.borrow().due_notifications();
        for notification in notifications {
            notification();
        }
    }

    // =======
    // local mutations
    // =======

    pub fn reaction_added(&self, id: &PostId, kind: ReactionKind) {
        let _flusher = FlushLater::new(self);
        if !self.store.borrow_mut().reaction_added(id, kind) {
            log::debug!("Ignoring {kind:?} reaction for missing post {id}");
        }
    }
}

impl<R: PostsRemote> Posts<R> {
    /// Callers should only fetch while the status is `NotStarted`. Calling again while a fetch is
    /// in flight is harmless: nothing is sent and the state is left alone.
    ///
    /// A failure is returned and also kept in the store, see [`Posts::fetch_error`].
    pub async fn fetch_all(&self) -> Result<FetchOutcome, StoreError> {
        let _flusher = FlushLater::new(self);

        if !self.store.borrow_mut().fetch_pending() {
            log::debug!("Fetch already in flight, not starting another");
            return Ok(FetchOutcome::AlreadyInFlight);
        }
        self.flush_notifications();

        match self.remote.fetch_all().await {
            Ok(raw_posts) => {
                let added = self
                    .store
                    .borrow_mut()
                    .fetch_fulfilled(raw_posts, Utc::now());
                log::info!("Fetched {added} posts");
                Ok(FetchOutcome::Fetched { added })
            }
            Err(e) => {
                log::error!("Fetching posts failed: {e}");
                self.store.borrow_mut().fetch_rejected(e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        author_id: u64,
    ) -> Result<Post, StoreError> {
        let _flusher = FlushLater::new(self);
        let new_post = NewPost::new(title, content, author_id)?;

        let response = self
            .remote
            .create(new_post.to_raw())
            .await
            .inspect_err(|e| log::error!("Creating post failed: {e}"))?;

        let post = self
            .store
            .borrow_mut()
            .post_created(response, &new_post, Utc::now());
        log::info!("Created post {}", post.id);
        Ok(post)
    }

    /// `post` is the edited version of a post that is already in the store.
    pub async fn update_post(&self, post: &Post) -> Result<UpdateOutcome, StoreError> {
        let _flusher = FlushLater::new(self);
        if !self.store.borrow().contains(&post.id) {
            return Err(StoreError::NotFound(post.id.clone()));
        }

        let response = self
            .remote
            .update(&post.id, RawPost::from(post))
            .await
            .inspect_err(|e| log::error!("Updating post {} failed: {e}", post.id))?;

        let outcome = self
            .store
            .borrow_mut()
            .post_updated(post, response, Utc::now())?;
        Ok(outcome)
    }

    pub async fn delete_post(&self, post: &Post) -> Result<DeleteOutcome, StoreError> {
        let _flusher = FlushLater::new(self);
        if !self.store.borrow().contains(&post.id) {
            return Err(StoreError::NotFound(post.id.clone()));
        }

        let response = self
            .remote
            .delete(&post.id)
            .await
            .inspect_err(|e| log::error!("Deleting post {} failed: {e}", post.id))?;

        let outcome = self.store.borrow_mut().post_deleted(&post.id, &response)?;
        Ok(outcome)
    }
}

/// Flushes listeners when dropped, so no return path can forget to.
struct FlushLater<'a, R> {
    posts: &'a Posts<R>,
}

impl<'a, R> FlushLater<'a, R> {
    fn new(posts: &'a Posts<R>) -> Self {
        Self { posts }
    }
}

impl<'a, R> Drop for FlushLater<'a, R> {
    fn drop(&mut self) {
        self.posts.flush_notifications();
    }
}
