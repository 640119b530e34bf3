/// Convenience result type used across the crate.
pub type XenftResult<T> = Result<T, XenftError>;

/// Top-level error taxonomy used by decode, classification, composition and their collaborators.
///
/// Core entry points never surface these to callers of the total APIs; they are converted into a
/// safe default (all-zero record, `Unknown` rarity, error image). The `try_*` variants expose them.
#[derive(thiserror::Error, Debug)]
pub enum XenftError {
    /// The packed mint record could not be read as a non-negative integer.
    #[error("decode error: {0}")]
    Decode(String),

    /// Class flags were absent or out of range.
    #[error("classification error: {0}")]
    Classification(String),

    /// The asset is missing fields required to build an image.
    #[error("composition error: {0}")]
    Composition(String),

    /// Invalid user-provided settings or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Chain session misuse or a failed chain read.
    #[error("session error: {0}")]
    Session(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl XenftError {
    /// Build a [`XenftError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`XenftError::Classification`] value.
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    /// Build a [`XenftError::Composition`] value.
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    /// Build a [`XenftError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`XenftError::Session`] value.
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Build a [`XenftError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for XenftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
