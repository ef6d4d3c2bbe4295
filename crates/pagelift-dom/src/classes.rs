#![forbid(unsafe_code)]

//! CSS class and style-property names shared with the page stylesheet.
//!
//! These are the strings the stylesheet keys its rules on; renaming one here
//! without touching the CSS silently disables the corresponding effect.

// Diagram viewer.
pub const DIAGRAM_CONTAINER: &str = "diagram-container";
pub const DIAGRAM_CONTROLS: &str = "diagram-controls";
pub const ZOOM_IN_BTN: &str = "zoom-in-btn";
pub const ZOOM_OUT_BTN: &str = "zoom-out-btn";
pub const RESET_BTN: &str = "reset-btn";
pub const FULLSCREEN_BTN: &str = "fullscreen-btn";
pub const DIAGRAM_CAPTION: &str = "diagram-caption";
pub const DIAGRAM_TOOLTIP: &str = "diagram-tooltip";
pub const DIAGRAM_LIGHTBOX: &str = "diagram-lightbox";
pub const LIGHTBOX_CONTENT: &str = "lightbox-content";
pub const LIGHTBOX_CAPTION: &str = "lightbox-caption";
pub const LIGHTBOX_CLOSE: &str = "lightbox-close";

// Quiz enhancer.
pub const QUESTION_FORM: &str = "question-form";
pub const CHOICE_INPUT: &str = "choice-input";
pub const QUIZ_TIMER: &str = "quiz-timer";
pub const TIMER_BAR: &str = "timer-bar";
pub const QUESTION_TRANSITION: &str = "question-transition";
pub const QUESTION_EXIT: &str = "question-exit";
pub const CHOICE_RIPPLE: &str = "choice-ripple";
pub const SELECTED: &str = "selected";
pub const CHOICE_HOVER: &str = "choice-hover";
pub const TIMER_WARNING: &str = "timer-warning";
pub const TIMER_CRITICAL: &str = "timer-critical";
pub const TIMER_PULSE: &str = "timer-pulse";

// Style properties the controllers write.
pub const STYLE_WIDTH: &str = "width";
pub const STYLE_HEIGHT: &str = "height";
pub const STYLE_LEFT: &str = "left";
pub const STYLE_TOP: &str = "top";
pub const STYLE_DISPLAY: &str = "display";
pub const STYLE_TRANSFORM: &str = "transform";

/// Hidden form field appended on final-question submission.
pub const CELEBRATE_FIELD: &str = "celebrate";
