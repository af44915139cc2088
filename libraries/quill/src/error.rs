use crate::data_model::PostId;
use crate::remote::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The remote call itself failed. Nothing in the store was changed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("post {0} is not in the store")]
    NotFound(PostId),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}
