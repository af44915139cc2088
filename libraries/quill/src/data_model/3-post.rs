//! # Post
//! [`RawPost`] is the shape the remote resource speaks. It is deliberately loose: every field may be
//! missing, and the author id may come back as a number or as a numeric string. Nothing reaches the
//! store's collection without passing through [`RawPost::validate`] or an explicit fallback.
//!
//! [`Post`] is what the store holds. Its timestamp and reaction counters are local-only: the remote
//! never persists them, so they are (re)assigned whenever a post is received.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::StoreError;
use crate::data_model::{PostId, Reactions};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub author_id: u64,
    pub created_at: DateTime<Utc>,
    pub reactions: Reactions,
}

impl Post {
    /// Builds a post from a remote payload, with zeroed reactions.
    pub fn from_remote(raw: RawPost, created_at: DateTime<Utc>) -> Result<Post, MalformedPost> {
        let (id, author_id) = raw.validate()?;
        Ok(Post {
            id,
            title: raw.title,
            body: raw.body,
            author_id,
            created_at,
            reactions: Reactions::default(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "content")]
    pub body: String,
    #[serde(
        default,
        deserialize_with = "lenient_author_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedPost {
    #[error("missing or invalid id")]
    MissingId,
    #[error("empty title")]
    EmptyTitle,
    #[error("empty body")]
    EmptyBody,
    #[error("missing author id")]
    MissingAuthor,
}

impl RawPost {
    /// The id, if the remote gave one that can be used.
    pub fn valid_id(&self) -> Option<&PostId> {
        self.id.as_ref().filter(|id| id.is_valid())
    }

    /// Checks everything a freshly received post needs, returning its id and author.
    pub fn validate(&self) -> Result<(PostId, u64), MalformedPost> {
        let id = self.valid_id().ok_or(MalformedPost::MissingId)?;
        if self.title.trim().is_empty() {
            return Err(MalformedPost::EmptyTitle);
        }
        if self.body.trim().is_empty() {
            return Err(MalformedPost::EmptyBody);
        }
        let author_id = self.user_id.ok_or(MalformedPost::MissingAuthor)?;
        Ok((id.clone(), author_id))
    }
}

impl From<&Post> for RawPost {
    fn from(post: &Post) -> Self {
        RawPost {
            id: Some(post.id.clone()),
            title: post.title.clone(),
            body: post.body.clone(),
            user_id: Some(post.author_id),
            reactions: Some(post.reactions),
        }
    }
}

/// A post the user asked to create, before the remote has seen it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub author_id: u64,
}

impl NewPost {
    pub fn new(title: &str, body: &str, author_id: u64) -> Result<Self, StoreError> {
        if title.trim().is_empty() {
            return Err(StoreError::EmptyField("title"));
        }
        if body.trim().is_empty() {
            return Err(StoreError::EmptyField("content"));
        }
        if author_id == 0 {
            return Err(StoreError::EmptyField("author"));
        }
        Ok(Self {
            title: title.to_string(),
            body: body.to_string(),
            author_id,
        })
    }

    pub fn to_raw(&self) -> RawPost {
        RawPost {
            id: None,
            title: self.title.clone(),
            body: self.body.clone(),
            user_id: Some(self.author_id),
            reactions: None,
        }
    }
}

/// Form inputs hand the author over as a string, and the remote echoes it back unchanged.
fn lenient_author_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(u64),
        Text(String),
    }

    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Number(id)) => Ok(Some(id)),
        Some(Loose::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Loose::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
