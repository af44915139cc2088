//! # PostId
//! Posts that came from the remote resource carry the numeric id it assigned. Posts that the remote
//! did not give a usable id get a local one from `eyedee`. Local ids always carry a prefix, so the
//! two spaces can't collide by accident, but the store still checks for uniqueness on every insert.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Remote(u64),
    Local(String),
}

impl PostId {
    pub fn new_local() -> Self {
        PostId::Local(eyedee::local_id())
    }

    /// Only ids minted by [`PostId::new_local`]. A remote may use string ids too.
    pub fn is_local(&self) -> bool {
        match self {
            PostId::Remote(_) => false,
            PostId::Local(id) => eyedee::is_local_id(id),
        }
    }

    /// The remote reports `0` or `""` when it has not actually stored anything.
    pub fn is_valid(&self) -> bool {
        match self {
            PostId::Remote(id) => *id != 0,
            PostId::Local(id) => !id.trim().is_empty(),
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Remote(id) => write!(f, "{id}"),
            PostId::Local(id) => f.write_str(id),
        }
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        PostId::Remote(id)
    }
}
