//! Errors raised while coercing leaf text into typed values.
//!
//! Loaders wrap these with the file and element they came from; on their own
//! they only know the text and the declared type.

/// A leaf could not be turned into the value its `type` attribute asks for.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    /// The `type` attribute names something outside the closed tag set.
    #[error("unknown type '{tag}' for value '{text}'")]
    UnknownType { tag: String, text: String },

    /// The text is not a valid literal for the declared type.
    #[error("invalid {tag} literal '{text}': {reason}")]
    InvalidLiteral {
        tag: &'static str,
        text: String,
        reason: String,
    },
}

impl CoercionError {
    pub(crate) fn invalid(tag: &'static str, text: &str, reason: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            tag,
            text: text.to_owned(),
            reason: reason.into(),
        }
    }

    /// Returns the offending source text.
    pub fn text(&self) -> &str {
        match self {
            Self::UnknownType { text, .. } | Self::InvalidLiteral { text, .. } => text,
        }
    }

    /// Returns a static string identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownType { .. } => "COERCION_UNKNOWN_TYPE",
            Self::InvalidLiteral { .. } => "COERCION_INVALID_LITERAL",
        }
    }
}
