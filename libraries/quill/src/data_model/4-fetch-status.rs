//! # FetchStatus
//! Lifecycle of the bulk fetch, as observed by the presentation layer.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchStatus {
    #[default]
    NotStarted,
    InFlight,
    Succeeded,
    Failed,
}

impl FetchStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, FetchStatus::InFlight)
    }
}
