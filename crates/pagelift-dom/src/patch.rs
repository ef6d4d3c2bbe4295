#![forbid(unsafe_code)]

//! DOM patch operations.
//!
//! Controllers express every page mutation as a [`DomPatch`]. The host
//! applies a batch in emission order; the ordering inside one batch is part
//! of the contract (a `Wrap` must land before a `Create` that targets the
//! wrapper as parent).
//!
//! The set is deliberately small and page-agnostic. Two operations carry
//! host-side scheduling semantics:
//!
//! - [`DomPatch::RemoveAfter`] asks the host to remove a node after a delay
//!   (transient effects like ripples); the controller does not track it.
//! - [`DomPatch::KeyListener`] bounds the lifetime of the document key
//!   listener to the interval between `attach: true` and `attach: false`.

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// One DOM mutation for the host to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomPatch {
    /// Create an element and append it to `parent`.
    Create {
        node: NodeId,
        tag: String,
        class: String,
        parent: NodeId,
        #[serde(default)]
        text: Option<String>,
    },
    /// Create `wrapper` in `node`'s place and move `node` inside it.
    Wrap {
        node: NodeId,
        wrapper: NodeId,
        class: String,
    },
    /// Remove an element from the document.
    Remove { node: NodeId },
    /// Remove an element after `delay_ms` (host-owned timeout).
    RemoveAfter { node: NodeId, delay_ms: u32 },
    AddClass { node: NodeId, class: String },
    RemoveClass { node: NodeId, class: String },
    SetStyle {
        node: NodeId,
        property: String,
        value: String,
    },
    SetAttr {
        node: NodeId,
        name: String,
        value: String,
    },
    SetText { node: NodeId, text: String },
    /// Set a choice input's checked state (radio semantics on the page side).
    SetChecked { node: NodeId, checked: bool },
    ScrollIntoView { node: NodeId },
    /// Trigger native submission of a form via its submit button.
    SubmitForm { node: NodeId },
    /// Append a hidden input to `form`.
    AppendHiddenInput {
        form: NodeId,
        name: String,
        value: String,
    },
    /// Lock or unlock page scrolling (body overflow).
    SetPageScroll { locked: bool },
    /// Attach or detach the document-level key listener.
    KeyListener { attach: bool },
}

impl DomPatch {
    /// Shorthand for [`DomPatch::AddClass`].
    #[must_use]
    pub fn add_class(node: NodeId, class: &str) -> Self {
        Self::AddClass {
            node,
            class: class.to_string(),
        }
    }

    /// Shorthand for [`DomPatch::RemoveClass`].
    #[must_use]
    pub fn remove_class(node: NodeId, class: &str) -> Self {
        Self::RemoveClass {
            node,
            class: class.to_string(),
        }
    }

    /// Shorthand for [`DomPatch::SetStyle`].
    #[must_use]
    pub fn set_style(node: NodeId, property: &str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            node,
            property: property.to_string(),
            value: value.into(),
        }
    }
}

/// Encode a patch batch for JS transport or replay logs.
#[must_use]
pub fn batch_to_json(patches: &[DomPatch]) -> String {
    // Patch payloads contain no non-string keys or non-finite floats, so
    // serialization cannot fail.
    serde_json::to_string(patches).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn patch_json_shape_is_tagged() {
        let patch = DomPatch::add_class(NodeId(5), "selected");
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"op":"add_class","node":5,"class":"selected"}"#);
    }

    #[test]
    fn batch_roundtrip() {
        let batch = vec![
            DomPatch::Wrap {
                node: NodeId(1),
                wrapper: NodeId(9),
                class: "diagram-container".into(),
            },
            DomPatch::Create {
                node: NodeId(10),
                tag: "div".into(),
                class: "diagram-controls".into(),
                parent: NodeId(9),
                text: None,
            },
            DomPatch::set_style(NodeId(1), "width", "120px"),
            DomPatch::SetPageScroll { locked: true },
        ];
        let json = batch_to_json(&batch);
        let back: Vec<DomPatch> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, batch);
    }

    #[test]
    fn remove_after_carries_delay() {
        let json = serde_json::to_string(&DomPatch::RemoveAfter {
            node: NodeId(7),
            delay_ms: 600,
        })
        .unwrap();
        assert_eq!(json, r#"{"op":"remove_after","node":7,"delay_ms":600}"#);
    }
}
