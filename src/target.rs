//! Jump targets and scroll containers.
//!
//! A jump can aim at three kinds of target, decided once at the call
//! boundary: a relative pixel delta, an element reference, or a selector
//! string that the host resolves to an element.  Scroll containers are
//! either an element reference or a selector.
//!
//! [`TargetSpec`] is the host-independent wire form used by config files
//! and the command line: a JSON number is a delta, a JSON string a selector.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// What a jump scrolls to.
#[derive(Debug, Clone, PartialEq)]
pub enum JumpTarget<E> {
    /// Scroll by this many pixels from the current offset.  No element is
    /// associated, so accessibility focus never applies.
    Delta(f64),
    /// Scroll to the top of this element.
    Element(E),
    /// Scroll to the first element matching this selector.
    Selector(String),
}

impl<E> JumpTarget<E> {
    /// Short human-readable label for logs.
    pub fn describe(&self) -> String {
        match self {
            JumpTarget::Delta(px) => format!("{:+}px", px),
            JumpTarget::Element(_) => "element".to_string(),
            JumpTarget::Selector(s) => format!("{:?}", s),
        }
    }
}

impl<E> From<f64> for JumpTarget<E> {
    fn from(px: f64) -> Self {
        JumpTarget::Delta(px)
    }
}

impl<E> From<&str> for JumpTarget<E> {
    fn from(selector: &str) -> Self {
        JumpTarget::Selector(selector.to_string())
    }
}

impl<E> From<String> for JumpTarget<E> {
    fn from(selector: String) -> Self {
        JumpTarget::Selector(selector)
    }
}

/// An alternate scroll root.  Absence means the document viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerRef<E> {
    /// A scrollable element the caller already holds.
    Element(E),
    /// A selector resolved through the host when the jump starts.
    Selector(String),
}

impl<E> From<&str> for ContainerRef<E> {
    fn from(selector: &str) -> Self {
        ContainerRef::Selector(selector.to_string())
    }
}

/// Host-independent jump target: `123.0` / `-40` or `"#section-2"`.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSpec {
    Delta(f64),
    Selector(String),
}

impl TargetSpec {
    /// Parse a command-line argument: anything that parses as a number is a
    /// delta, everything else is a selector.
    pub fn parse_arg(arg: &str) -> Self {
        match arg.trim().parse::<f64>() {
            Ok(px) if px.is_finite() => TargetSpec::Delta(px),
            _ => TargetSpec::Selector(arg.to_string()),
        }
    }

    /// Convert into a [`JumpTarget`] for any host element type.
    pub fn into_target<E>(self) -> JumpTarget<E> {
        match self {
            TargetSpec::Delta(px) => JumpTarget::Delta(px),
            TargetSpec::Selector(s) => JumpTarget::Selector(s),
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::Delta(px) => write!(f, "{:+}px", px),
            TargetSpec::Selector(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for TargetSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TargetSpec::Delta(px) => serializer.serialize_f64(*px),
            TargetSpec::Selector(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for TargetSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = TargetSpec;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "pixel delta (number) or selector (string)")
            }
            fn visit_f64<E>(self, px: f64) -> Result<TargetSpec, E> {
                Ok(TargetSpec::Delta(px))
            }
            fn visit_i64<E>(self, px: i64) -> Result<TargetSpec, E> {
                Ok(TargetSpec::Delta(px as f64))
            }
            fn visit_u64<E>(self, px: u64) -> Result<TargetSpec, E> {
                Ok(TargetSpec::Delta(px as f64))
            }
            fn visit_str<E>(self, s: &str) -> Result<TargetSpec, E>
            where
                E: DeError,
            {
                if s.trim().is_empty() {
                    return Err(DeError::custom("target: selector must not be empty"));
                }
                Ok(TargetSpec::Selector(s.to_string()))
            }
        }
        deserializer.deserialize_any(V)
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arg_numbers_are_deltas() {
        assert_eq!(TargetSpec::parse_arg("100"), TargetSpec::Delta(100.0));
        assert_eq!(TargetSpec::parse_arg("-42.5"), TargetSpec::Delta(-42.5));
    }

    #[test]
    fn parse_arg_everything_else_is_a_selector() {
        assert_eq!(
            TargetSpec::parse_arg("#section-2"),
            TargetSpec::Selector("#section-2".into())
        );
        assert_eq!(TargetSpec::parse_arg("NaN"), TargetSpec::Selector("NaN".into()));
    }

    #[test]
    fn deserialize_number_and_string() {
        let d: TargetSpec = serde_json::from_str("250").unwrap();
        assert_eq!(d, TargetSpec::Delta(250.0));
        let d: TargetSpec = serde_json::from_str("-12.5").unwrap();
        assert_eq!(d, TargetSpec::Delta(-12.5));
        let s: TargetSpec = serde_json::from_str(r#"".footer""#).unwrap();
        assert_eq!(s, TargetSpec::Selector(".footer".into()));
    }

    #[test]
    fn deserialize_rejects_empty_selector_and_objects() {
        assert!(serde_json::from_str::<TargetSpec>(r#""  ""#).is_err());
        assert!(serde_json::from_str::<TargetSpec>(r#"{"x": 1}"#).is_err());
    }

    #[test]
    fn into_target_keeps_shape() {
        let t: JumpTarget<u32> = TargetSpec::Delta(5.0).into_target();
        assert_eq!(t, JumpTarget::Delta(5.0));
        let t: JumpTarget<u32> = TargetSpec::Selector("#a".into()).into_target();
        assert_eq!(t, JumpTarget::Selector("#a".into()));
    }

    #[test]
    fn describe_labels() {
        assert_eq!(JumpTarget::<u32>::Delta(-40.0).describe(), "-40px");
        assert_eq!(JumpTarget::<u32>::Element(7).describe(), "element");
        assert_eq!(JumpTarget::<u32>::from("#top").describe(), "\"#top\"");
    }
}
