#![forbid(unsafe_code)]

//! Timer-bar countdown animation.
//!
//! The remaining time is decremented elsewhere (the countdown collaborator);
//! this component only reads the sampled value once per second, resizes the
//! bar to the remaining percentage, and escalates urgency classes.
//!
//! Escalation mirrors the page contract exactly:
//!
//! - below 25%: add `timer-critical` and pulse the numeric readout;
//! - otherwise below 50%: add `timer-warning`, drop `timer-critical` and the
//!   pulse.
//!
//! `timer-warning` is never removed by the critical branch, so once the bar
//! has passed through the 25-50% band both classes coexist below 25%. Time
//! is assumed monotonically decreasing, so the missing de-escalation path is
//! unreachable in practice.

use tracing::debug;

use pagelift_dom::classes;
use pagelift_dom::{DomPatch, TimerNode};

/// Percentage below which the warning state applies.
pub const WARNING_BELOW_PCT: f64 = 50.0;
/// Percentage below which the critical state applies.
pub const CRITICAL_BELOW_PCT: f64 = 25.0;

/// Fallback total when the markup does not declare one.
const DEFAULT_TOTAL_TIME: u32 = 60;

/// Countdown animation state for one timer display.
#[derive(Debug)]
pub struct TimerAnimation {
    timer: TimerNode,
    total_time: u32,
    done: bool,
}

impl TimerAnimation {
    #[must_use]
    pub fn new(timer: TimerNode) -> Self {
        let total_time = if timer.total_time == 0 {
            DEFAULT_TOTAL_TIME
        } else {
            timer.total_time
        };
        Self {
            timer,
            total_time,
            done: false,
        }
    }

    /// Whether the countdown has been observed at zero; the host stops
    /// rescheduling the interval once this is true.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Apply one tick with the currently displayed remaining time.
    ///
    /// A non-positive value marks the animation done and emits nothing.
    pub fn tick(&mut self, time_left: i64, patches: &mut Vec<DomPatch>) {
        if self.done {
            return;
        }
        if time_left <= 0 {
            self.done = true;
            debug!(time_left, "countdown reached zero, stopping timer animation");
            return;
        }

        let percentage = time_left as f64 / f64::from(self.total_time) * 100.0;
        patches.push(DomPatch::set_style(
            self.timer.bar,
            classes::STYLE_WIDTH,
            format_percentage(percentage),
        ));

        if percentage < CRITICAL_BELOW_PCT {
            patches.push(DomPatch::add_class(self.timer.bar, classes::TIMER_CRITICAL));
            patches.push(DomPatch::add_class(self.timer.element, classes::TIMER_PULSE));
        } else if percentage < WARNING_BELOW_PCT {
            patches.push(DomPatch::add_class(self.timer.bar, classes::TIMER_WARNING));
            patches.push(DomPatch::remove_class(
                self.timer.bar,
                classes::TIMER_CRITICAL,
            ));
            patches.push(DomPatch::remove_class(
                self.timer.element,
                classes::TIMER_PULSE,
            ));
        }
    }
}

/// Format a percentage for a CSS width: at most two decimals, no trailing
/// zeros, so round values render the way the page always wrote them
/// (`50%`, not `50.00%`).
fn format_percentage(percentage: f64) -> String {
    let fixed = format!("{percentage:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelift_dom::NodeId;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn timer(total: u32) -> TimerAnimation {
        TimerAnimation::new(TimerNode {
            element: NodeId(1),
            bar: NodeId(2),
            total_time: total,
        })
    }

    /// Replay class patches into per-node class sets.
    fn applied_classes(patches: &[DomPatch]) -> BTreeSet<(u32, String)> {
        let mut classes = BTreeSet::new();
        for patch in patches {
            match patch {
                DomPatch::AddClass { node, class } => {
                    classes.insert((node.0, class.clone()));
                }
                DomPatch::RemoveClass { node, class } => {
                    classes.remove(&(node.0, class.clone()));
                }
                _ => {}
            }
        }
        classes
    }

    #[test]
    fn bar_width_tracks_remaining_percentage() {
        let mut timer = timer(60);
        let mut patches = Vec::new();
        timer.tick(30, &mut patches);
        assert!(patches.contains(&DomPatch::set_style(NodeId(2), "width", "50%")));
    }

    #[test]
    fn ten_of_sixty_is_critical_and_width_is_16_67() {
        let mut timer = timer(60);
        let mut patches = Vec::new();
        timer.tick(10, &mut patches);
        assert!(patches.contains(&DomPatch::set_style(NodeId(2), "width", "16.67%")));
        assert!(patches.contains(&DomPatch::add_class(NodeId(2), "timer-critical")));
        assert!(patches.contains(&DomPatch::add_class(NodeId(1), "timer-pulse")));
    }

    #[test]
    fn warning_survives_the_transition_into_critical() {
        // Pass through the warning band, then into critical: both classes
        // coexist, matching the page contract (critical never removes
        // warning).
        let mut timer = timer(60);
        let mut patches = Vec::new();
        timer.tick(40, &mut patches); // 66.67%: no classes
        timer.tick(25, &mut patches); // 41.67%: warning
        timer.tick(10, &mut patches); // 16.67%: critical + pulse

        let classes = applied_classes(&patches);
        assert!(classes.contains(&(2, "timer-warning".into())));
        assert!(classes.contains(&(2, "timer-critical".into())));
        assert!(classes.contains(&(1, "timer-pulse".into())));
    }

    #[test]
    fn warning_band_clears_critical_and_pulse() {
        let mut timer = timer(60);
        let mut patches = Vec::new();
        timer.tick(25, &mut patches);
        let classes = applied_classes(&patches);
        assert_eq!(
            classes,
            BTreeSet::from([(2, "timer-warning".to_string())])
        );
    }

    #[test]
    fn above_half_emits_width_only() {
        let mut timer = timer(60);
        let mut patches = Vec::new();
        timer.tick(45, &mut patches); // 75%
        assert_eq!(
            patches,
            vec![DomPatch::set_style(NodeId(2), "width", "75%")]
        );
    }

    #[test]
    fn width_drops_trailing_zeros() {
        let mut timer = timer(80);
        let mut patches = Vec::new();
        timer.tick(20, &mut patches); // 25%
        assert!(patches.contains(&DomPatch::set_style(NodeId(2), "width", "25%")));
        timer.tick(10, &mut patches); // 12.5%
        assert!(patches.contains(&DomPatch::set_style(NodeId(2), "width", "12.5%")));
    }

    #[test]
    fn zero_stops_the_animation() {
        let mut timer = timer(60);
        let mut patches = Vec::new();
        timer.tick(0, &mut patches);
        assert!(patches.is_empty());
        assert!(timer.is_done());

        // Further ticks stay silent even with a positive reading.
        timer.tick(10, &mut patches);
        assert!(patches.is_empty());
    }

    #[test]
    fn zero_total_falls_back_to_sixty() {
        let mut timer = timer(0);
        let mut patches = Vec::new();
        timer.tick(10, &mut patches);
        assert!(patches.contains(&DomPatch::set_style(NodeId(2), "width", "16.67%")));
    }
}
