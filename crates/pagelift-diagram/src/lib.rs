#![forbid(unsafe_code)]

//! Diagram viewer controller.
//!
//! Turns static documentation images into interactive diagrams: a control
//! bar (zoom in/out, reset, fullscreen), a caption from the alt text, an
//! optional pointer-following tooltip, and a single shared lightbox overlay
//! for focused full-page viewing.
//!
//! The controller is host-driven and deterministic: it is seeded with a
//! [`DiagramSnapshot`](pagelift_dom::DiagramSnapshot), consumes
//! [`DiagramEvent`]s, and emits [`DomPatch`](pagelift_dom::DomPatch) batches.
//! It holds no live DOM references and performs no I/O.
//!
//! # Invariants
//!
//! 1. Exactly one lightbox overlay exists; it is built once in
//!    [`DiagramViewer::new`] and reused for every diagram.
//! 2. Original dimensions are captured once per image and never overwritten
//!    by zoom operations; reset restores them exactly.
//! 3. An image that already has a record is never re-initialized (no
//!    duplicate controls).
//! 4. The document key listener is attached while the lightbox is open and
//!    detached when it closes; keys arriving while closed are ignored.

pub mod event;
pub mod lightbox;
pub mod viewer;

pub use event::{Control, DiagramEvent};
pub use lightbox::Lightbox;
pub use viewer::{ControlBinding, DiagramViewer, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
