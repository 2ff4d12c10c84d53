//! Typed leaf values.
//!
//! Descriptor files mark leaves with an optional `type` attribute:
//!
//! ```xml
//! <name>Old Mill</name>
//! <player_start_position type="tuple">(4, 12)</player_start_position>
//! ```
//!
//! The tag set is closed. Each tag has its own literal parser and anything
//! outside the set is rejected, so a data file can never ask for more than a
//! plain value.

mod literal;

use core::fmt;
use core::str::FromStr;

use crate::error::CoercionError;

/// Declared type of a leaf, taken from its `type` attribute.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TypeTag {
    /// Raw text (the default when no `type` attribute is present).
    #[default]
    Str,
    Int,
    Float,
    Bool,
    /// Parenthesized literal such as `(4, 12)`.
    Tuple,
}

impl TypeTag {
    /// Resolves an optional `type` attribute. Absence means [`TypeTag::Str`].
    pub fn resolve(tag: Option<&str>, text: &str) -> Result<Self, CoercionError> {
        match tag {
            None => Ok(Self::Str),
            Some(name) => Self::from_str(name).map_err(|_| CoercionError::UnknownType {
                tag: name.to_owned(),
                text: text.to_owned(),
            }),
        }
    }

    /// Coerces `text` into a value of this type.
    pub fn coerce(self, text: &str) -> Result<TypedValue, CoercionError> {
        let name: &'static str = self.into();
        match self {
            Self::Str => Ok(TypedValue::String(text.to_owned())),
            Self::Int => text
                .trim()
                .parse::<i64>()
                .map(TypedValue::Integer)
                .map_err(|e| CoercionError::invalid(name, text, e.to_string())),
            Self::Float => text
                .trim()
                .parse::<f64>()
                .map(TypedValue::Float)
                .map_err(|e| CoercionError::invalid(name, text, e.to_string())),
            Self::Bool => parse_bool(text.trim())
                .map(TypedValue::Boolean)
                .ok_or_else(|| CoercionError::invalid(name, text, "expected true or false")),
            Self::Tuple => literal::parse_tuple(text)
                .map(TypedValue::Tuple)
                .map_err(|reason| CoercionError::invalid(name, text, reason)),
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}

/// A leaf value after coercion.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypedValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Tuple(Vec<TypedValue>),
}

impl TypedValue {
    /// Coerces leaf text using its optional declared type name.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError::UnknownType`] when `tag` is not one of
    /// `str`, `int`, `float`, `bool`, `tuple`, and
    /// [`CoercionError::InvalidLiteral`] when `text` does not parse as that type.
    pub fn coerce(text: &str, tag: Option<&str>) -> Result<Self, CoercionError> {
        TypeTag::resolve(tag, text)?.coerce(text)
    }

    /// Returns the tag this value would have been declared with.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::String(_) => TypeTag::Str,
            Self::Integer(_) => TypeTag::Int,
            Self::Float(_) => TypeTag::Float,
            Self::Boolean(_) => TypeTag::Bool,
            Self::Tuple(_) => TypeTag::Tuple,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[TypedValue]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Interprets a two-element numeric tuple as an `(x, y)` point.
    ///
    /// Positions in map files are authored this way.
    pub fn as_point(&self) -> Option<(f64, f64)> {
        match self.as_tuple()? {
            [x, y] => Some((x.as_float()?, y.as_float()?)),
            _ => None,
        }
    }

    fn write_literal(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Self::String(s) if nested => {
                f.write_str("'")?;
                for ch in s.chars() {
                    match ch {
                        '\\' => f.write_str("\\\\")?,
                        '\'' => f.write_str("\\'")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        _ => write!(f, "{ch}")?,
                    }
                }
                f.write_str("'")
            }
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_literal(f, true)?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Top-level strings print raw; strings inside tuples print quoted.
impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_literal(f, false)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Vec<TypedValue>> for TypedValue {
    fn from(value: Vec<TypedValue>) -> Self {
        Self::Tuple(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tag_keeps_raw_text() {
        let value = TypedValue::coerce("  Old Mill ", None).unwrap();
        assert_eq!(value, TypedValue::String("  Old Mill ".into()));
    }

    #[test]
    fn test_explicit_str_tag() {
        assert_eq!(
            TypedValue::coerce("42", Some("str")).unwrap(),
            TypedValue::String("42".into())
        );
    }

    #[test]
    fn test_int_and_float() {
        assert_eq!(
            TypedValue::coerce(" -17 ", Some("int")).unwrap(),
            TypedValue::Integer(-17)
        );
        assert_eq!(
            TypedValue::coerce("2.5", Some("float")).unwrap(),
            TypedValue::Float(2.5)
        );
        assert_eq!(
            TypedValue::coerce("3", Some("float")).unwrap(),
            TypedValue::Float(3.0)
        );
    }

    #[test]
    fn test_int_rejects_non_numeric() {
        let err = TypedValue::coerce("twelve", Some("int")).unwrap_err();
        assert!(matches!(
            err,
            CoercionError::InvalidLiteral { tag: "int", ref text, .. } if text == "twelve"
        ));
        assert!(TypedValue::coerce("1.5", Some("int")).is_err());
    }

    #[test]
    fn test_bool_literals() {
        for (text, expected) in [
            ("true", true),
            ("True", true),
            ("1", true),
            ("false", false),
            ("FALSE", false),
            ("0", false),
        ] {
            assert_eq!(
                TypedValue::coerce(text, Some("bool")).unwrap(),
                TypedValue::Boolean(expected),
                "bool literal {text}"
            );
        }
        assert!(TypedValue::coerce("yes", Some("bool")).is_err());
    }

    #[test]
    fn test_tuple_of_ints() {
        let value = TypedValue::coerce("(1, 2)", Some("tuple")).unwrap();
        assert_eq!(
            value,
            TypedValue::Tuple(vec![TypedValue::Integer(1), TypedValue::Integer(2)])
        );
        assert_eq!(value.as_point(), Some((1.0, 2.0)));
    }

    #[test]
    fn test_unbalanced_tuple_fails() {
        let err = TypedValue::coerce("(1, 2", Some("tuple")).unwrap_err();
        assert_eq!(err.error_code(), "COERCION_INVALID_LITERAL");
        assert_eq!(err.text(), "(1, 2");
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = TypedValue::coerce("__import__('os')", Some("eval")).unwrap_err();
        assert_eq!(
            err,
            CoercionError::UnknownType {
                tag: "eval".into(),
                text: "__import__('os')".into(),
            }
        );
        // Tags are case-sensitive.
        assert!(TypedValue::coerce("1", Some("Int")).is_err());
    }

    #[test]
    fn test_type_tag_round_trips_through_name() {
        for tag in [
            TypeTag::Str,
            TypeTag::Int,
            TypeTag::Float,
            TypeTag::Bool,
            TypeTag::Tuple,
        ] {
            assert_eq!(TypeTag::from_str(tag.as_ref()).unwrap(), tag);
        }
        assert_eq!(TypeTag::Tuple.to_string(), "tuple");
    }

    #[test]
    fn test_display_uses_literal_syntax() {
        let value = TypedValue::coerce("('gate', (1, 2.0), 'it\\'s')", Some("tuple")).unwrap();
        assert_eq!(value.to_string(), "('gate', (1, 2.0), 'it\\'s')");
        assert_eq!(TypedValue::from("plain").to_string(), "plain");
        assert_eq!(TypedValue::Tuple(vec![1i64.into()]).to_string(), "(1,)");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(TypedValue::from(3i64).as_float(), Some(3.0));
        assert_eq!(TypedValue::from("x").as_int(), None);
        assert_eq!(TypedValue::from(true).as_bool(), Some(true));
        assert_eq!(TypedValue::from(vec![1i64.into()]).as_point(), None);
        assert_eq!(TypedValue::from(2.5).type_tag(), TypeTag::Float);
    }
}
