#![forbid(unsafe_code)]

//! Canonical diagram-viewer events.
//!
//! The host translates raw browser events into these before handing them to
//! the controller. Pointer coordinates arrive already translated into the
//! diagram container's local space; the controller only adds its fixed
//! tooltip offset.

use pagelift_dom::{KeyInput, NodeId};

/// Control-bar button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    ZoomIn,
    ZoomOut,
    Reset,
    Fullscreen,
}

/// One normalized event for the diagram viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramEvent {
    /// The diagram image itself was clicked (opens the lightbox).
    ImageClicked { image: NodeId },
    /// A control-bar button was clicked.
    ControlClicked { image: NodeId, control: Control },
    /// The lightbox backdrop (outside the content) was clicked.
    BackdropClicked,
    /// The lightbox close button was clicked.
    CloseClicked,
    /// A key arrived on the document listener.
    Key(KeyInput),
    /// Pointer entered a diagram container.
    PointerEntered { image: NodeId },
    /// Pointer moved inside a diagram container (container-local coordinates).
    PointerMoved { image: NodeId, x: f64, y: f64 },
    /// Pointer left a diagram container.
    PointerLeft { image: NodeId },
}
