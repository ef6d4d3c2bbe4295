#![forbid(unsafe_code)]

//! Deterministic, JSON-friendly input schema.
//!
//! The host (browser/JS) is expected to provide:
//! - DOM `key` strings for keyboard events, normalized here into [`KeyCode`],
//! - pointer coordinates already translated into the target element's local
//!   space, plus the target's rendered size where the effect needs it,
//! - the focused element's tag name, folded into [`FocusTarget`].
//!
//! The schema stays stable across hosts so event streams can be recorded on
//! one page and replayed in native tests.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during an input event.
    ///
    /// Encoded as a compact `u8` bitset in JSON (`mods`).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Normalized key code.
///
/// Only the keys the controllers act on get dedicated variants; everything
/// else is carried verbatim so replay logs stay lossless.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KeyCode {
    Escape,
    Enter,
    Space,
    Char(char),
    Other(Box<str>),
}

impl KeyCode {
    /// Normalize a DOM `KeyboardEvent.key` string.
    ///
    /// The DOM encodes the space bar as a literal `" "`.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" => Self::Escape,
            "Enter" => Self::Enter,
            " " => Self::Space,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(other.into()),
                }
            }
        }
    }

    /// 1-based choice position for digit keys `1`..=`9`, `None` otherwise.
    ///
    /// `0` is deliberately excluded; choices are 1-indexed.
    #[must_use]
    pub fn digit(&self) -> Option<u8> {
        match self {
            Self::Char(c @ '1'..='9') => Some(*c as u8 - b'0'),
            _ => None,
        }
    }

    /// Whether this key submits the current form when a choice is selected.
    #[must_use]
    pub const fn is_submit_key(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// What kind of element held focus when a key event fired.
///
/// Enter/Space submission is suppressed while a form control owns focus so
/// typing and native button activation are not hijacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    Input,
    Button,
    TextArea,
    Other,
}

impl FocusTarget {
    /// Fold a DOM tag name (any case) into a focus target.
    #[must_use]
    pub fn from_tag_name(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("input") {
            Self::Input
        } else if tag.eq_ignore_ascii_case("button") {
            Self::Button
        } else if tag.eq_ignore_ascii_case("textarea") {
            Self::TextArea
        } else {
            Self::Other
        }
    }

    /// True when key-driven form submission must be suppressed.
    #[must_use]
    pub const fn swallows_submit_keys(self) -> bool {
        matches!(self, Self::Input | Self::Button | Self::TextArea)
    }
}

/// Normalized key event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub code: KeyCode,
    #[serde(default, with = "mods_u8")]
    pub mods: Modifiers,
    pub focus: FocusTarget,
}

impl KeyInput {
    /// Plain key press with no modifiers, focus on page body.
    #[must_use]
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::empty(),
            focus: FocusTarget::Other,
        }
    }
}

/// Pointer event payload in the target element's local coordinates.
///
/// `width`/`height` are the target's rendered size; ripple placement needs
/// them and other consumers ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

mod mods_u8 {
    //! Serialize [`Modifiers`](super::Modifiers) as its raw `u8` bitset.

    use super::Modifiers;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(mods: &Modifiers, ser: S) -> Result<S::Ok, S::Error> {
        mods.bits().serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Modifiers, D::Error> {
        Ok(Modifiers::from_bits_truncate(u8::deserialize(de)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_normalization() {
        assert_eq!(KeyCode::from_dom_key("Escape"), KeyCode::Escape);
        assert_eq!(KeyCode::from_dom_key("Enter"), KeyCode::Enter);
        assert_eq!(KeyCode::from_dom_key(" "), KeyCode::Space);
        assert_eq!(KeyCode::from_dom_key("3"), KeyCode::Char('3'));
        assert_eq!(KeyCode::from_dom_key("a"), KeyCode::Char('a'));
        assert_eq!(
            KeyCode::from_dom_key("ArrowDown"),
            KeyCode::Other("ArrowDown".into())
        );
    }

    #[test]
    fn digit_range_is_one_through_nine() {
        assert_eq!(KeyCode::Char('1').digit(), Some(1));
        assert_eq!(KeyCode::Char('9').digit(), Some(9));
        assert_eq!(KeyCode::Char('0').digit(), None);
        assert_eq!(KeyCode::Char('a').digit(), None);
        assert_eq!(KeyCode::Enter.digit(), None);
    }

    #[test]
    fn submit_keys() {
        assert!(KeyCode::Enter.is_submit_key());
        assert!(KeyCode::Space.is_submit_key());
        assert!(!KeyCode::Escape.is_submit_key());
        assert!(!KeyCode::Char('1').is_submit_key());
    }

    #[test]
    fn focus_target_folding() {
        assert_eq!(FocusTarget::from_tag_name("INPUT"), FocusTarget::Input);
        assert_eq!(FocusTarget::from_tag_name("button"), FocusTarget::Button);
        assert_eq!(FocusTarget::from_tag_name("TextArea"), FocusTarget::TextArea);
        assert_eq!(FocusTarget::from_tag_name("DIV"), FocusTarget::Other);
        assert!(FocusTarget::Input.swallows_submit_keys());
        assert!(!FocusTarget::Other.swallows_submit_keys());
    }

    #[test]
    fn key_input_json_roundtrip() {
        let input = KeyInput {
            code: KeyCode::Char('3'),
            mods: Modifiers::SHIFT | Modifiers::CTRL,
            focus: FocusTarget::Other,
        };
        let json = serde_json::to_string(&input).unwrap();
        let back: KeyInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
        assert!(json.contains("\"mods\":5"));
    }
}
