#![forbid(unsafe_code)]

//! Shared DOM vocabulary for pagelift.
//!
//! The pagelift controllers are host-driven: the embedding environment scans
//! the page once into a snapshot, pushes normalized input events in, and
//! applies the [`DomPatch`] batches the controllers emit. This crate defines
//! that boundary:
//!
//! - [`NodeId`] handles and the [`IdAllocator`] for controller-created nodes,
//! - a deterministic, JSON-friendly input schema ([`KeyCode`], [`Modifiers`]),
//! - page snapshot types ([`DiagramSnapshot`], [`QuizSnapshot`]),
//! - the [`DomPatch`] operation set,
//! - the [`CountdownSource`] contract for the external timer collaborator,
//! - CSS class and style-property names shared with the page stylesheet.
//!
//! Everything here serializes to JSON so event/patch streams can be recorded
//! and replayed across the JS boundary.

pub mod classes;
pub mod countdown;
pub mod input;
pub mod node;
pub mod patch;
pub mod snapshot;

pub use countdown::{CountdownSource, ScriptedCountdown};
pub use input::{FocusTarget, KeyCode, KeyInput, Modifiers, PointerInput};
pub use node::{IdAllocator, NodeId};
pub use patch::DomPatch;
pub use snapshot::{
    ChoiceNode, DiagramNode, DiagramSnapshot, PxSize, QuizSnapshot, SnapshotError, TimerNode,
};
