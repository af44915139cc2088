use std::cell::RefCell;
use std::collections::VecDeque;

use futures::executor::block_on;
use quill::{
    DeleteOutcome, DeleteResponse, FetchOutcome, FetchStatus, PostId, Posts, PostsRemote, RawPost,
    ReactionKind, TransportError, UpdateOutcome,
};

/// Behaves like jsonplaceholder: everything "succeeds", creates always come back as post 101, and
/// updates of posts it never stored fail.
#[derive(Default)]
struct Placeholder {
    collection: Vec<RawPost>,
    deletes: RefCell<VecDeque<DeleteResponse>>,
}

impl PostsRemote for Placeholder {
    async fn fetch_all(&self) -> Result<Vec<RawPost>, TransportError> {
        Ok(self.collection.clone())
    }

    async fn create(&self, post: RawPost) -> Result<RawPost, TransportError> {
        Ok(RawPost {
            id: Some(PostId::Remote(101)),
            ..post
        })
    }

    async fn update(&self, id: &PostId, post: RawPost) -> Result<RawPost, TransportError> {
        let known = self.collection.iter().any(|p| p.id.as_ref() == Some(id));
        if known {
            Ok(post)
        } else {
            Err(TransportError::Status {
                code: 500,
                reason: "Internal Server Error".to_string(),
            })
        }
    }

    async fn delete(&self, _id: &PostId) -> Result<DeleteResponse, TransportError> {
        Ok(self
            .deletes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(DeleteResponse::ok))
    }
}

fn raw(id: u64, title: &str, user_id: u64) -> RawPost {
    RawPost {
        id: Some(PostId::Remote(id)),
        title: title.to_string(),
        body: format!("{title}, but longer"),
        user_id: Some(user_id),
        reactions: None,
    }
}

#[test]
fn test_fetch_create_delete_round() {
    let remote = Placeholder {
        collection: vec![raw(1, "first", 1), raw(2, "second", 1)],
        ..Default::default()
    };
    let posts = Posts::new(remote);
    assert_eq!(posts.fetch_status(), FetchStatus::NotStarted);

    let fetched = block_on(posts.fetch_all()).unwrap();
    assert_eq!(fetched, FetchOutcome::Fetched { added: 2 });
    assert_eq!(posts.fetch_status(), FetchStatus::Succeeded);
    assert_eq!(posts.fetch_error(), None);
    let all = posts.all_posts();
    assert_eq!(all.len(), 2);
    assert!(all[1].created_at < all[0].created_at);

    let created = block_on(posts.create_post("T", "C", 7)).unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(created.author_id, 7);
    assert_eq!(posts.all_posts()[2], created);

    let third = posts.all_posts()[2].clone();
    let deleted = block_on(posts.delete_post(&third)).unwrap();
    assert_eq!(deleted, DeleteOutcome::Removed(third.id.clone()));
    assert_eq!(posts.len(), 2);
    assert_eq!(posts.post_by_id(&third.id), None);
}

#[test]
fn test_refetching_appends_instead_of_replacing() {
    let remote = Placeholder {
        collection: vec![raw(1, "first", 1), raw(2, "second", 2)],
        ..Default::default()
    };
    let posts = Posts::new(remote);
    block_on(posts.create_post("mine", "local only", 3)).unwrap();

    block_on(posts.fetch_all()).unwrap();

    assert_eq!(posts.len(), 3);
    // newest first: the created post, then the fetched ones in remote order
    let titles: Vec<_> = posts.ordered_posts().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["mine", "first", "second"]);
}

#[test]
fn test_editing_a_locally_created_post_fails_cleanly() {
    let posts = Posts::new(Placeholder::default());
    let mut created = block_on(posts.create_post("T", "C", 7)).unwrap();
    posts.reaction_added(&created.id, ReactionKind::Rocket);
    let before = posts.all_posts();

    created.title = "edited".to_string();
    let result = block_on(posts.update_post(&created));

    assert!(result.is_err());
    assert_eq!(posts.all_posts(), before);
}

#[test]
fn test_editing_a_fetched_post_moves_it_to_the_end() {
    let remote = Placeholder {
        collection: vec![raw(1, "first", 1), raw(2, "second", 1)],
        ..Default::default()
    };
    let posts = Posts::new(remote);
    block_on(posts.fetch_all()).unwrap();

    let mut first = posts.post_by_id(&PostId::Remote(1)).unwrap();
    first.title = "first, edited".to_string();
    let outcome = block_on(posts.update_post(&first)).unwrap();

    assert!(matches!(outcome, UpdateOutcome::Updated(_)));
    let titles: Vec<_> = posts.all_posts().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["second", "first, edited"]);
    // the edit is the newest thing in the store
    assert_eq!(posts.ordered_posts()[0].title, "first, edited");
}

#[test]
fn test_unconfirmed_delete_keeps_the_post() {
    let remote = Placeholder {
        collection: vec![raw(1, "first", 1)],
        ..Default::default()
    };
    remote
        .deletes
        .borrow_mut()
        .push_back(DeleteResponse::new(503, "Service Unavailable"));
    let posts = Posts::new(remote);
    block_on(posts.fetch_all()).unwrap();
    let before = posts.all_posts();

    let outcome = block_on(posts.delete_post(&before[0])).unwrap();

    assert_eq!(
        outcome,
        DeleteOutcome::NotConfirmed {
            diagnostic: "503: Service Unavailable".to_string()
        }
    );
    assert_eq!(posts.all_posts(), before);
}
