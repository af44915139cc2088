use quill::{DeleteResponse, PostId, PostsRemote, RawPost, TransportError};
use reqwest::StatusCode;

use crate::config::ClientConfig;

/// Talks to a jsonplaceholder-style `/posts` resource.
#[derive(Clone, Debug)]
pub struct HttpRemote {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpRemote {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl PostsRemote for HttpRemote {
    async fn fetch_all(&self) -> Result<Vec<RawPost>, TransportError> {
        let response = self
            .client
            .get(self.config.posts_url())
            .send()
            .await
            .map_err(request_error)?;
        let values: Vec<serde_json::Value> =
            successful(response)?.json().await.map_err(decode_error)?;
        Ok(decode_posts(values))
    }

    async fn create(&self, post: RawPost) -> Result<RawPost, TransportError> {
        let response = self
            .client
            .post(self.config.posts_url())
            .json(&post)
            .send()
            .await
            .map_err(request_error)?;
        successful(response)?.json().await.map_err(decode_error)
    }

    async fn update(&self, id: &PostId, post: RawPost) -> Result<RawPost, TransportError> {
        let response = self
            .client
            .put(self.config.post_url(id))
            .json(&post)
            .send()
            .await
            .map_err(request_error)?;
        successful(response)?.json().await.map_err(decode_error)
    }

    async fn delete(&self, id: &PostId) -> Result<DeleteResponse, TransportError> {
        let response = self
            .client
            .delete(self.config.post_url(id))
            .send()
            .await
            .map_err(request_error)?;
        // the store decides what a non-200 means, so don't turn it into an error here
        Ok(delete_response(response.status()))
    }
}

fn request_error(e: reqwest::Error) -> TransportError {
    TransportError::Request(e.to_string())
}

fn decode_error(e: reqwest::Error) -> TransportError {
    TransportError::Decode(e.to_string())
}

fn reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

fn successful(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TransportError::Status {
            code: status.as_u16(),
            reason: reason(status),
        })
    }
}

pub(crate) fn delete_response(status: StatusCode) -> DeleteResponse {
    DeleteResponse::new(status.as_u16(), reason(status))
}

/// One bad element shouldn't cost us the whole collection.
pub(crate) fn decode_posts(values: Vec<serde_json::Value>) -> Vec<RawPost> {
    values
        .into_iter()
        .filter_map(|value| {
            serde_json::from_value::<RawPost>(value)
                .inspect_err(|e| log::warn!("Skipping undecodable post: {e}"))
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_response_keeps_status_and_reason() {
        let ok = delete_response(StatusCode::OK);
        assert!(ok.is_confirmed());
        assert_eq!(ok.to_string(), "200: OK");

        let missing = delete_response(StatusCode::NOT_FOUND);
        assert!(!missing.is_confirmed());
        assert_eq!(missing.to_string(), "404: Not Found");
    }

    #[test]
    fn test_decode_posts_skips_bad_elements() {
        let values = vec![
            serde_json::json!({"userId": 1, "id": 1, "title": "a", "body": "b"}),
            serde_json::json!({"userId": 1, "id": true, "title": "a", "body": "b"}),
            serde_json::json!("not a post"),
            serde_json::json!({"userId": "2", "id": 3, "title": "c", "body": "d"}),
        ];

        let posts = decode_posts(values);

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, Some(PostId::Remote(1)));
        assert_eq!(posts[1].user_id, Some(2));
    }
}
