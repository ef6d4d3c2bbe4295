#![forbid(unsafe_code)]

//! Page snapshots.
//!
//! The host scans the live document exactly once per controller and hands the
//! result over as a snapshot. Controllers own all state derived from it; they
//! never query the page again. Snapshots serialize to JSON so a scan recorded
//! in a browser can seed native tests.
//!
//! Optional page features are `Option`s here. An absent feature means the
//! corresponding enhancement is skipped, never that initialization fails.

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Rendered or intrinsic size in whole CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PxSize {
    pub width: u32,
    pub height: u32,
}

impl PxSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One diagram image discovered in the designated diagram region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    /// The image element.
    pub image: NodeId,
    /// Existing wrapping container, if the markup already provides one.
    pub container: Option<NodeId>,
    /// Image source URL, shown again in the lightbox.
    pub src: String,
    /// Alt text; doubles as caption and lightbox caption. May be empty.
    #[serde(default)]
    pub alt: String,
    /// Optional `data-description`; presence enables the tooltip.
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit rendered size, when the markup sets one.
    #[serde(default)]
    pub rendered: Option<PxSize>,
    /// Natural intrinsic size, the fallback for zoom arithmetic.
    pub natural: PxSize,
    /// Whether the existing container already holds a caption element.
    #[serde(default)]
    pub has_caption: bool,
}

impl DiagramNode {
    /// The size zoom and reset operate from: explicit rendered size when the
    /// markup sets one, natural intrinsic size otherwise.
    #[must_use]
    pub fn effective_size(&self) -> PxSize {
        self.rendered.unwrap_or(self.natural)
    }
}

/// Scan result for the diagram region of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramSnapshot {
    pub diagrams: Vec<DiagramNode>,
    /// First id free for controller-created elements.
    pub node_watermark: u32,
}

/// One selectable answer: a choice input and its associated label.
///
/// The association is resolved by the scanner (label `for` attribute against
/// the input id) exactly once; controllers only ever see the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceNode {
    pub input: NodeId,
    /// Absent when no label points at the input; such a choice still works,
    /// it just never shows selection highlighting.
    #[serde(default)]
    pub label: Option<NodeId>,
    /// Checked state at scan time.
    #[serde(default)]
    pub checked: bool,
}

/// Timer display discovered on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerNode {
    /// Element whose text content shows the remaining seconds.
    pub element: NodeId,
    /// Bar element whose width visualizes the remaining fraction.
    pub bar: NodeId,
    /// Total time in seconds (`data-total-time`, scanner defaults to 60).
    pub total_time: u32,
}

/// Scan result for a quiz question page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizSnapshot {
    /// The question form. Absent on non-question pages; every form-related
    /// enhancement degrades to a no-op.
    #[serde(default)]
    pub form: Option<NodeId>,
    /// The form's submit button, target of key-driven submission.
    #[serde(default)]
    pub submit_button: Option<NodeId>,
    pub choices: Vec<ChoiceNode>,
    #[serde(default)]
    pub timer: Option<TimerNode>,
    /// `data-current-question`; malformed or absent values scan as 0.
    #[serde(default)]
    pub current_question: u32,
    /// `data-total-questions`; malformed or absent values scan as 0.
    #[serde(default)]
    pub total_questions: u32,
    /// First id free for controller-created elements.
    pub node_watermark: u32,
}

impl QuizSnapshot {
    /// Whether this page shows the final question.
    ///
    /// Zero counters (the malformed-markup default) never count as final.
    #[must_use]
    pub const fn is_final_question(&self) -> bool {
        self.total_questions > 0 && self.current_question == self.total_questions
    }
}

/// Snapshot decoding failure.
///
/// The only fallible surface on the boundary; controllers themselves never
/// signal errors.
#[derive(Debug)]
pub enum SnapshotError {
    /// The snapshot JSON did not parse or did not match the schema.
    Decode(serde_json::Error),
}

impl core::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "snapshot decode: {err}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
        }
    }
}

impl DiagramSnapshot {
    /// Decode a snapshot from its JSON transport form.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Decode)
    }
}

impl QuizSnapshot {
    /// Decode a snapshot from its JSON transport form.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Decode)
    }
}
