pub mod config;
pub mod http;

use std::sync::LazyLock;

use quill::{FetchStatus, Posts, PostsRemote, StoreError};

use crate::config::ClientConfig;
use crate::http::HttpRemote;

// keeps the logger from being initialized more than once
static LOGGER: LazyLock<()> = LazyLock::new(|| {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Logging initialized");
});

pub fn init_logging() {
    LazyLock::force(&LOGGER);
}

/// The root of the application. It owns the one post store for the session and hands out
/// references to it.
pub struct App<R = HttpRemote> {
    posts: Posts<R>,
}

impl App {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_remote(HttpRemote::new(config))
    }
}

impl<R: PostsRemote> App<R> {
    pub fn with_remote(remote: R) -> Self {
        Self {
            posts: Posts::new(remote),
        }
    }

    pub fn posts(&self) -> &Posts<R> {
        &self.posts
    }

    /// Fetches posts unless a fetch has already been started this session.
    pub async fn load(&self) -> Result<(), StoreError> {
        if self.posts.fetch_status() != FetchStatus::NotStarted {
            return Ok(());
        }
        self.posts.fetch_all().await?;
        Ok(())
    }

    /// One line per post, most recent first.
    pub fn summary_lines(&self) -> Vec<String> {
        self.posts
            .ordered_posts()
            .into_iter()
            .map(|post| {
                format!(
                    "{}  {}  (user {}, {} reactions)",
                    post.created_at.format("%Y-%m-%d %H:%M"),
                    post.title,
                    post.author_id,
                    post.reactions.total()
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;
    use quill::{DeleteResponse, PostId, RawPost, ReactionKind, TransportError};

    use super::*;

    #[derive(Default)]
    struct Counting {
        fetches: Cell<usize>,
    }

    impl PostsRemote for Counting {
        async fn fetch_all(&self) -> Result<Vec<RawPost>, TransportError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(vec![RawPost {
                id: Some(PostId::Remote(1)),
                title: "hello".to_string(),
                body: "world".to_string(),
                user_id: Some(3),
                reactions: None,
            }])
        }

        async fn create(&self, post: RawPost) -> Result<RawPost, TransportError> {
            Ok(post)
        }

        async fn update(&self, _id: &PostId, post: RawPost) -> Result<RawPost, TransportError> {
            Ok(post)
        }

        async fn delete(&self, _id: &PostId) -> Result<DeleteResponse, TransportError> {
            Ok(DeleteResponse::ok())
        }
    }

    #[test]
    fn test_load_only_fetches_once() {
        let app = App::with_remote(Counting::default());

        block_on(app.load()).unwrap();
        block_on(app.load()).unwrap();

        assert_eq!(app.posts().remote().fetches.get(), 1);
        assert_eq!(app.posts().len(), 1);
    }

    #[test]
    fn test_summary_lists_title_author_and_reactions() {
        let app = App::with_remote(Counting::default());
        block_on(app.load()).unwrap();
        app.posts()
            .reaction_added(&PostId::Remote(1), ReactionKind::Coffee);

        let lines = app.summary_lines();

        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("  hello  (user 3, 1 reactions)"), "{}", lines[0]);
    }
}
