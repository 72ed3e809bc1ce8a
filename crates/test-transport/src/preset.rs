use serde::{Deserialize, Serialize};

/// How the test transport answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// Resolve with this reply text.
    #[serde(rename = "reply")]
    Reply(String),
    /// Fail as if the backend could not be reached. The string is only
    /// used for the error message.
    #[serde(rename = "failure")]
    Failure(String),
}

impl PresetReply {
    /// Creates a successful preset.
    #[inline]
    pub fn reply<S: Into<String>>(text: S) -> Self {
        Self::Reply(text.into())
    }

    /// Creates a failing preset.
    #[inline]
    pub fn failure<S: Into<String>>(reason: S) -> Self {
        Self::Failure(reason.into())
    }
}
