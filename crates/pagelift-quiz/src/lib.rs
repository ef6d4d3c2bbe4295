#![forbid(unsafe_code)]

//! Quiz page enhancer.
//!
//! Cosmetic interactivity for a single-question quiz page: ripple feedback
//! on choice presses, single-selection highlighting, a timer-bar countdown
//! animation, digit-key choice selection with Enter/Space submission, hover
//! emphasis, and the hidden completion flag injected on the final question's
//! submission.
//!
//! Quiz logic itself (scoring, grading, question sequencing) is owned by the
//! server that renders each page; this controller never touches it. Like its
//! diagram sibling, the enhancer is host-driven: seeded from a
//! [`QuizSnapshot`](pagelift_dom::QuizSnapshot), fed [`QuizEvent`]s, emitting
//! [`DomPatch`](pagelift_dom::DomPatch) batches.
//!
//! # Invariants
//!
//! 1. At most one choice label carries the `selected` class after any
//!    selection change.
//! 2. The input-to-label association is built once from the snapshot;
//!    handlers never re-query the page.
//! 3. The timer only ever reads the displayed remaining time (decremented by
//!    an external collaborator); once it observes zero it reports done and
//!    the host stops the interval.
//! 4. A page without a form, timer, or choices degrades feature-by-feature
//!    to no-ops; nothing fails.

pub mod enhancer;
pub mod event;
pub mod timer;

pub use enhancer::{QuizEnhancer, RIPPLE_LIFETIME_MS};
pub use event::QuizEvent;
pub use timer::TimerAnimation;
