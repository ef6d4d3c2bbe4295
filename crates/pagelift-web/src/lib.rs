#![forbid(unsafe_code)]

//! Browser glue for pagelift.
//!
//! This crate is intentionally host-specific (web/WASM). It provides a
//! stable `wasm-bindgen` API surface for:
//! - scanning the live document into controller snapshots,
//! - forwarding normalized browser events into the controllers,
//! - applying the emitted [`DomPatch`](pagelift_dom::DomPatch) batches,
//! - owning host-side scheduling (ripple timeouts, the 1 Hz timer interval,
//!   the bounded lightbox key listener).
//!
//! The controllers themselves live in `pagelift-diagram` and `pagelift-quiz`
//! and are tested natively; everything here is a thin, stateless-as-possible
//! bridge.

pub mod scan_util;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{DiagramViewerWeb, QuizEnhancerWeb, scan_diagram_snapshot, scan_quiz_snapshot};

/// Native builds compile this crate as stubs so `cargo check --workspace`
/// stays green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct DiagramViewerWeb;

#[cfg(not(target_arch = "wasm32"))]
impl DiagramViewerWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

/// See [`DiagramViewerWeb`].
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct QuizEnhancerWeb;

#[cfg(not(target_arch = "wasm32"))]
impl QuizEnhancerWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
