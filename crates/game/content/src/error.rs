//! Errors raised by the content loaders.

use std::path::PathBuf;

use crystals_core::CoercionError;
use thiserror::Error;

/// Errors surfaced while loading a descriptor file.
///
/// Every variant names the file it came from. Loaders return the first error
/// they hit; there are no partial descriptors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{file}: malformed XML: {source}")]
    Parse {
        file: String,
        source: roxmltree::Error,
    },

    #[error("{file}: <{parent}> is missing required element <{element}>")]
    MissingElement {
        file: String,
        parent: String,
        element: &'static str,
    },

    #[error("{file}: <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        file: String,
        element: String,
        attribute: &'static str,
    },

    #[error("{file}: <{element}>: {source}")]
    Coercion {
        file: String,
        element: String,
        source: CoercionError,
    },

    #[error("{file}: unknown tag <{tag}> inside <{parent}>")]
    UnknownTag {
        file: String,
        parent: String,
        tag: String,
    },

    #[error("{file}: expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot {
        file: String,
        expected: &'static str,
        found: String,
    },

    #[error("'{filename}' points outside the content directory")]
    PathEscapesBase { filename: String },

    #[cfg(feature = "config")]
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Broad classification of [`LoadError`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The file could not be read.
    Io,
    /// The file is not well-formed XML.
    Parse,
    /// A required element or attribute is missing, or a tag is not allowed.
    Structural,
    /// A typed leaf failed to coerce.
    Coercion,
    /// The requested filename is not a safe relative path.
    Path,
    /// A configuration file could not be parsed.
    Config,
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        use LoadError::*;
        match self {
            Io { .. } => ErrorKind::Io,
            Parse { .. } => ErrorKind::Parse,
            MissingElement { .. }
            | MissingAttribute { .. }
            | UnknownTag { .. }
            | UnexpectedRoot { .. } => ErrorKind::Structural,
            Coercion { .. } => ErrorKind::Coercion,
            PathEscapesBase { .. } => ErrorKind::Path,
            #[cfg(feature = "config")]
            Config { .. } => ErrorKind::Config,
        }
    }

    /// Returns a static string identifier for this error variant.
    pub fn error_code(&self) -> &'static str {
        use LoadError::*;
        match self {
            Io { .. } => "CONTENT_IO",
            Parse { .. } => "CONTENT_PARSE",
            MissingElement { .. } => "CONTENT_MISSING_ELEMENT",
            MissingAttribute { .. } => "CONTENT_MISSING_ATTRIBUTE",
            Coercion { .. } => "CONTENT_COERCION",
            UnknownTag { .. } => "CONTENT_UNKNOWN_TAG",
            UnexpectedRoot { .. } => "CONTENT_UNEXPECTED_ROOT",
            PathEscapesBase { .. } => "CONTENT_PATH_ESCAPES_BASE",
            #[cfg(feature = "config")]
            Config { .. } => "CONTENT_CONFIG",
        }
    }
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let missing = LoadError::MissingElement {
            file: "mill.xml".into(),
            parent: "map".into(),
            element: "ground",
        };
        assert_eq!(missing.kind(), ErrorKind::Structural);
        assert_eq!(
            missing.to_string(),
            "mill.xml: <map> is missing required element <ground>"
        );

        let coercion = LoadError::Coercion {
            file: "mill.xml".into(),
            element: "position".into(),
            source: CoercionError::UnknownType {
                tag: "list".into(),
                text: "[1]".into(),
            },
        };
        assert_eq!(coercion.kind(), ErrorKind::Coercion);
        assert_eq!(coercion.error_code(), "CONTENT_COERCION");
        assert_eq!(ErrorKind::Structural.to_string(), "structural");
    }
}
