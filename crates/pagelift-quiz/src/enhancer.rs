#![forbid(unsafe_code)]

//! The `QuizEnhancer` controller.
//!
//! All state is controller-owned: the choice list in page order (digit keys
//! index into it), the input-to-label map built once from the snapshot, the
//! timer animation, and the final-question flag. Handlers never query the
//! page.

use std::collections::HashMap;

use tracing::debug;

use pagelift_dom::classes;
use pagelift_dom::{
    ChoiceNode, DomPatch, IdAllocator, KeyInput, NodeId, PointerInput, QuizSnapshot,
};

use crate::event::QuizEvent;
use crate::timer::TimerAnimation;

/// How long a ripple lives before the host removes it, in milliseconds.
pub const RIPPLE_LIFETIME_MS: u32 = 600;

/// Host-driven controller for one quiz question page.
#[derive(Debug)]
pub struct QuizEnhancer {
    form: Option<NodeId>,
    submit_button: Option<NodeId>,
    /// Choices in page order; digit key N selects index N-1.
    choices: Vec<ChoiceNode>,
    /// Input-to-label association, resolved once at scan time.
    label_of: HashMap<NodeId, NodeId>,
    timer: Option<TimerAnimation>,
    final_question: bool,
    ids: IdAllocator,
}

impl QuizEnhancer {
    /// Build the enhancer from a page scan.
    ///
    /// The initialization batch adds the form transition class and restores
    /// highlighting for an initially checked choice.
    #[must_use]
    pub fn new(snapshot: &QuizSnapshot) -> (Self, Vec<DomPatch>) {
        let mut patches = Vec::new();

        if let Some(form) = snapshot.form {
            patches.push(DomPatch::add_class(form, classes::QUESTION_TRANSITION));
        }
        for choice in &snapshot.choices {
            if choice.checked
                && let Some(label) = choice.label
            {
                patches.push(DomPatch::add_class(label, classes::SELECTED));
            }
        }

        let label_of = snapshot
            .choices
            .iter()
            .filter_map(|c| c.label.map(|label| (c.input, label)))
            .collect();
        let final_question = snapshot.is_final_question();
        debug!(
            choices = snapshot.choices.len(),
            final_question,
            has_timer = snapshot.timer.is_some(),
            "quiz enhancer attached"
        );

        let enhancer = Self {
            form: snapshot.form,
            submit_button: snapshot.submit_button,
            choices: snapshot.choices.clone(),
            label_of,
            timer: snapshot.timer.map(TimerAnimation::new),
            final_question,
            ids: IdAllocator::starting_at(snapshot.node_watermark.max(1)),
        };
        (enhancer, patches)
    }

    /// Whether the countdown animation has stopped (host drops the 1 Hz
    /// interval once true). Pages without a timer report true immediately.
    #[must_use]
    pub fn timer_done(&self) -> bool {
        self.timer.as_ref().is_none_or(TimerAnimation::is_done)
    }

    /// The input currently checked, if any.
    #[must_use]
    pub fn selected_choice(&self) -> Option<NodeId> {
        self.choices.iter().find(|c| c.checked).map(|c| c.input)
    }

    /// Handle one normalized event.
    #[must_use]
    pub fn handle(&mut self, event: QuizEvent) -> Vec<DomPatch> {
        let mut patches = Vec::new();
        match event {
            QuizEvent::SubmitIntent => self.on_submit(&mut patches),
            QuizEvent::ChoicePressed { label, pointer } => {
                self.spawn_ripple(label, pointer, &mut patches);
            }
            QuizEvent::ChoiceChanged { input } => self.select_input(input, &mut patches),
            QuizEvent::Key(key) => self.on_key(&key, &mut patches),
            QuizEvent::PointerEntered { label } => {
                if self.is_choice_label(label) {
                    patches.push(DomPatch::add_class(label, classes::CHOICE_HOVER));
                }
            }
            QuizEvent::PointerLeft { label } => {
                if self.is_choice_label(label) {
                    patches.push(DomPatch::remove_class(label, classes::CHOICE_HOVER));
                }
            }
            QuizEvent::TimerTick { time_left } => {
                if let Some(timer) = &mut self.timer {
                    timer.tick(time_left, &mut patches);
                }
            }
        }
        patches
    }

    fn on_submit(&mut self, patches: &mut Vec<DomPatch>) {
        let Some(form) = self.form else {
            return;
        };
        // Purely cosmetic: native submission proceeds, the exit class just
        // styles the short grace period before navigation.
        patches.push(DomPatch::add_class(form, classes::QUESTION_EXIT));
        if self.final_question {
            debug!("final question submitted, injecting completion flag");
            patches.push(DomPatch::AppendHiddenInput {
                form,
                name: classes::CELEBRATE_FIELD.into(),
                value: "true".into(),
            });
        }
    }

    fn spawn_ripple(&mut self, label: NodeId, pointer: PointerInput, patches: &mut Vec<DomPatch>) {
        if !self.is_choice_label(label) {
            return;
        }
        let ripple = self.ids.alloc();
        let size = pointer.width.max(pointer.height);
        patches.push(DomPatch::Create {
            node: ripple,
            tag: "span".into(),
            class: classes::CHOICE_RIPPLE.into(),
            parent: label,
            text: None,
        });
        patches.push(DomPatch::set_style(
            ripple,
            classes::STYLE_WIDTH,
            format!("{size}px"),
        ));
        patches.push(DomPatch::set_style(
            ripple,
            classes::STYLE_HEIGHT,
            format!("{size}px"),
        ));
        patches.push(DomPatch::set_style(
            ripple,
            classes::STYLE_LEFT,
            format!("{}px", pointer.x - size / 2.0),
        ));
        patches.push(DomPatch::set_style(
            ripple,
            classes::STYLE_TOP,
            format!("{}px", pointer.y - size / 2.0),
        ));
        patches.push(DomPatch::RemoveAfter {
            node: ripple,
            delay_ms: RIPPLE_LIFETIME_MS,
        });
    }

    /// Mark `input` checked and move the `selected` highlight to its label.
    ///
    /// Clears the highlight from every label first, so at most one label
    /// carries it afterwards. Unknown inputs are ignored.
    fn select_input(&mut self, input: NodeId, patches: &mut Vec<DomPatch>) {
        if !self.choices.iter().any(|c| c.input == input) {
            return;
        }
        for choice in &mut self.choices {
            choice.checked = choice.input == input;
        }
        for label in self.label_of.values() {
            patches.push(DomPatch::remove_class(*label, classes::SELECTED));
        }
        if let Some(label) = self.label_of.get(&input) {
            patches.push(DomPatch::add_class(*label, classes::SELECTED));
        }
    }

    fn on_key(&mut self, key: &KeyInput, patches: &mut Vec<DomPatch>) {
        if let Some(digit) = key.code.digit() {
            let index = usize::from(digit) - 1;
            let Some(choice) = self.choices.get(index).copied() else {
                return;
            };
            patches.push(DomPatch::SetChecked {
                node: choice.input,
                checked: true,
            });
            self.select_input(choice.input, patches);
            if let Some(label) = choice.label {
                patches.push(DomPatch::ScrollIntoView { node: label });
            }
            return;
        }

        if key.code.is_submit_key()
            && !key.focus.swallows_submit_keys()
            && self.selected_choice().is_some()
            && let Some(button) = self.submit_button
        {
            patches.push(DomPatch::SubmitForm { node: button });
        }
    }

    fn is_choice_label(&self, label: NodeId) -> bool {
        self.label_of.values().any(|l| *l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelift_dom::{FocusTarget, KeyCode, Modifiers, TimerNode};
    use pretty_assertions::assert_eq;

    fn choice(input: u32, label: u32) -> ChoiceNode {
        ChoiceNode {
            input: NodeId(input),
            label: Some(NodeId(label)),
            checked: false,
        }
    }

    fn snapshot(choices: Vec<ChoiceNode>) -> QuizSnapshot {
        QuizSnapshot {
            form: Some(NodeId(1)),
            submit_button: Some(NodeId(2)),
            choices,
            timer: None,
            current_question: 3,
            total_questions: 5,
            node_watermark: 100,
        }
    }

    fn four_choices() -> Vec<ChoiceNode> {
        vec![
            choice(10, 11),
            choice(20, 21),
            choice(30, 31),
            choice(40, 41),
        ]
    }

    fn key(code: KeyCode) -> QuizEvent {
        QuizEvent::Key(KeyInput::plain(code))
    }

    fn selected_labels(history: &[DomPatch]) -> Vec<u32> {
        let mut selected = std::collections::BTreeSet::new();
        for patch in history {
            match patch {
                DomPatch::AddClass { node, class } if class == classes::SELECTED => {
                    selected.insert(node.0);
                }
                DomPatch::RemoveClass { node, class } if class == classes::SELECTED => {
                    selected.remove(&node.0);
                }
                _ => {}
            }
        }
        selected.into_iter().collect()
    }

    #[test]
    fn init_adds_transition_class_to_form() {
        let (_, patches) = QuizEnhancer::new(&snapshot(four_choices()));
        assert_eq!(
            patches,
            vec![DomPatch::add_class(NodeId(1), classes::QUESTION_TRANSITION)]
        );
    }

    #[test]
    fn init_highlights_initially_checked_choice() {
        let mut choices = four_choices();
        choices[1].checked = true;
        let (enhancer, patches) = QuizEnhancer::new(&snapshot(choices));
        assert!(patches.contains(&DomPatch::add_class(NodeId(21), classes::SELECTED)));
        assert_eq!(enhancer.selected_choice(), Some(NodeId(20)));
    }

    #[test]
    fn formless_page_degrades_to_no_ops() {
        let snap = QuizSnapshot {
            form: None,
            submit_button: None,
            ..snapshot(Vec::new())
        };
        let (mut enhancer, patches) = QuizEnhancer::new(&snap);
        assert!(patches.is_empty());
        assert!(enhancer.handle(QuizEvent::SubmitIntent).is_empty());
        assert!(enhancer.handle(key(KeyCode::Enter)).is_empty());
        assert!(enhancer.timer_done());
    }

    #[test]
    fn exactly_one_label_selected_after_changes() {
        let (mut enhancer, mut history) = QuizEnhancer::new(&snapshot(four_choices()));
        history.extend(enhancer.handle(QuizEvent::ChoiceChanged { input: NodeId(10) }));
        assert_eq!(selected_labels(&history), vec![11]);

        history.extend(enhancer.handle(QuizEvent::ChoiceChanged { input: NodeId(30) }));
        assert_eq!(selected_labels(&history), vec![31]);
        assert_eq!(enhancer.selected_choice(), Some(NodeId(30)));
    }

    #[test]
    fn change_for_unknown_input_is_ignored() {
        let (mut enhancer, _) = QuizEnhancer::new(&snapshot(four_choices()));
        assert!(enhancer
            .handle(QuizEvent::ChoiceChanged { input: NodeId(99) })
            .is_empty());
    }

    #[test]
    fn digit_three_selects_third_choice() {
        let (mut enhancer, _) = QuizEnhancer::new(&snapshot(four_choices()));
        let patches = enhancer.handle(key(KeyCode::Char('3')));
        assert!(patches.contains(&DomPatch::SetChecked {
            node: NodeId(30),
            checked: true,
        }));
        assert!(patches.contains(&DomPatch::add_class(NodeId(31), classes::SELECTED)));
        assert!(patches.contains(&DomPatch::ScrollIntoView { node: NodeId(31) }));
        assert_eq!(enhancer.selected_choice(), Some(NodeId(30)));
    }

    #[test]
    fn digit_nine_with_four_choices_is_a_no_op() {
        let (mut enhancer, _) = QuizEnhancer::new(&snapshot(four_choices()));
        assert!(enhancer.handle(key(KeyCode::Char('9'))).is_empty());
        assert_eq!(enhancer.selected_choice(), None);
    }

    #[test]
    fn enter_submits_only_with_a_selection() {
        let (mut enhancer, _) = QuizEnhancer::new(&snapshot(four_choices()));
        assert!(enhancer.handle(key(KeyCode::Enter)).is_empty());

        let _ = enhancer.handle(QuizEvent::ChoiceChanged { input: NodeId(10) });
        let patches = enhancer.handle(key(KeyCode::Enter));
        assert_eq!(patches, vec![DomPatch::SubmitForm { node: NodeId(2) }]);

        let patches = enhancer.handle(key(KeyCode::Space));
        assert_eq!(patches, vec![DomPatch::SubmitForm { node: NodeId(2) }]);
    }

    #[test]
    fn submit_keys_are_swallowed_while_a_form_control_has_focus() {
        let (mut enhancer, _) = QuizEnhancer::new(&snapshot(four_choices()));
        let _ = enhancer.handle(QuizEvent::ChoiceChanged { input: NodeId(10) });
        for focus in [FocusTarget::Input, FocusTarget::Button, FocusTarget::TextArea] {
            let patches = enhancer.handle(QuizEvent::Key(KeyInput {
                code: KeyCode::Enter,
                mods: Modifiers::empty(),
                focus,
            }));
            assert!(patches.is_empty());
        }
    }

    #[test]
    fn ripple_is_sized_to_label_and_centered_on_pointer() {
        let (mut enhancer, _) = QuizEnhancer::new(&snapshot(four_choices()));
        let patches = enhancer.handle(QuizEvent::ChoicePressed {
            label: NodeId(11),
            pointer: PointerInput {
                x: 30.0,
                y: 20.0,
                width: 200.0,
                height: 48.0,
            },
        });

        let ripple = match patches.first() {
            Some(DomPatch::Create {
                node,
                tag,
                class,
                parent,
                ..
            }) => {
                assert_eq!(tag, "span");
                assert_eq!(class, classes::CHOICE_RIPPLE);
                assert_eq!(*parent, NodeId(11));
                *node
            }
            other => panic!("expected ripple create, got {other:?}"),
        };
        assert!(patches.contains(&DomPatch::set_style(ripple, "width", "200px")));
        assert!(patches.contains(&DomPatch::set_style(ripple, "height", "200px")));
        assert!(patches.contains(&DomPatch::set_style(ripple, "left", "-70px")));
        assert!(patches.contains(&DomPatch::set_style(ripple, "top", "-80px")));
        assert!(patches.contains(&DomPatch::RemoveAfter {
            node: ripple,
            delay_ms: RIPPLE_LIFETIME_MS,
        }));
    }

    #[test]
    fn hover_classes_toggle_per_label() {
        let (mut enhancer, _) = QuizEnhancer::new(&snapshot(four_choices()));
        assert_eq!(
            enhancer.handle(QuizEvent::PointerEntered { label: NodeId(21) }),
            vec![DomPatch::add_class(NodeId(21), classes::CHOICE_HOVER)]
        );
        assert_eq!(
            enhancer.handle(QuizEvent::PointerLeft { label: NodeId(21) }),
            vec![DomPatch::remove_class(NodeId(21), classes::CHOICE_HOVER)]
        );
        // Not a choice label: ignored.
        assert!(enhancer
            .handle(QuizEvent::PointerEntered { label: NodeId(1) })
            .is_empty());
    }

    #[test]
    fn final_question_submission_appends_completion_flag() {
        let mut snap = snapshot(four_choices());
        snap.current_question = 5;
        let (mut enhancer, _) = QuizEnhancer::new(&snap);
        let patches = enhancer.handle(QuizEvent::SubmitIntent);
        assert_eq!(
            patches,
            vec![
                DomPatch::add_class(NodeId(1), classes::QUESTION_EXIT),
                DomPatch::AppendHiddenInput {
                    form: NodeId(1),
                    name: "celebrate".into(),
                    value: "true".into(),
                },
            ]
        );
    }

    #[test]
    fn mid_quiz_submission_adds_exit_class_only() {
        let (mut enhancer, _) = QuizEnhancer::new(&snapshot(four_choices()));
        let patches = enhancer.handle(QuizEvent::SubmitIntent);
        assert_eq!(
            patches,
            vec![DomPatch::add_class(NodeId(1), classes::QUESTION_EXIT)]
        );
    }

    #[test]
    fn malformed_counters_never_trigger_completion() {
        let mut snap = snapshot(four_choices());
        snap.current_question = 0;
        snap.total_questions = 0;
        let (mut enhancer, _) = QuizEnhancer::new(&snap);
        let patches = enhancer.handle(QuizEvent::SubmitIntent);
        assert_eq!(
            patches,
            vec![DomPatch::add_class(NodeId(1), classes::QUESTION_EXIT)]
        );
    }

    #[test]
    fn timer_ticks_route_to_the_animation() {
        let mut snap = snapshot(four_choices());
        snap.timer = Some(TimerNode {
            element: NodeId(50),
            bar: NodeId(51),
            total_time: 60,
        });
        let (mut enhancer, _) = QuizEnhancer::new(&snap);
        assert!(!enhancer.timer_done());

        let patches = enhancer.handle(QuizEvent::TimerTick { time_left: 10 });
        assert!(patches.contains(&DomPatch::set_style(NodeId(51), "width", "16.67%")));

        let patches = enhancer.handle(QuizEvent::TimerTick { time_left: 0 });
        assert!(patches.is_empty());
        assert!(enhancer.timer_done());
    }
}
