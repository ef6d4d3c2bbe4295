#![forbid(unsafe_code)]

//! Canonical quiz-enhancer events.

use pagelift_dom::{KeyInput, NodeId, PointerInput};

/// One normalized event for the quiz enhancer.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    /// The question form is about to submit (native submission proceeds
    /// regardless; this is the hook for exit styling and the completion
    /// flag).
    SubmitIntent,
    /// Pointer pressed down on a choice label.
    ChoicePressed { label: NodeId, pointer: PointerInput },
    /// A choice input reported a checked-state change.
    ChoiceChanged { input: NodeId },
    /// A key arrived on the document listener.
    Key(KeyInput),
    /// Pointer entered a choice label.
    PointerEntered { label: NodeId },
    /// Pointer left a choice label.
    PointerLeft { label: NodeId },
    /// One-second timer tick carrying the currently displayed remaining
    /// time, sampled from the external countdown collaborator.
    TimerTick { time_left: i64 },
}
