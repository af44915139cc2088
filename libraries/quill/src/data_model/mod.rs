#[path = "1-post-id.rs"]
mod post_id;

#[path = "2-reactions.rs"]
mod reactions;

#[path = "3-post.rs"]
mod post;

#[path = "4-fetch-status.rs"]
mod fetch_status;

#[path = "5-post-store.rs"]
mod post_store;

pub use fetch_status::*;
pub use post::*;
pub use post_id::*;
pub use post_store::*;
pub use reactions::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ListenerKey(pub(crate) slotmap::DefaultKey);
