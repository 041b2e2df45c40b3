//! Wizard navigation: one step per layer, `next` wraps, `back` clamps.

use tracing::{debug, warn};

use super::preview::PreviewPresenter;
use super::state::SessionState;
use crate::render::RenderSink;

/// Forward button labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardLabels {
    /// Label on every step but the last
    pub continue_label: String,
    /// Label on the last step
    pub finish_label: String,
}

/// Moves the wizard between steps and refreshes the step chrome.
#[derive(Debug, Clone)]
pub struct WizardNavigator {
    labels: WizardLabels,
    presenter: PreviewPresenter,
}

impl WizardNavigator {
    /// Creates a navigator that rebuilds galleries through `presenter`.
    pub fn new(labels: WizardLabels, presenter: PreviewPresenter) -> Self {
        Self { labels, presenter }
    }

    /// Renders the current step without moving.
    pub fn show_initial(&self, state: &mut SessionState, sink: &mut dyn RenderSink) {
        let index = state.wizard.active_step();
        self.activate(state, index, sink);
    }

    /// Goes one step back. Returns `false` (and renders nothing) on the first step.
    pub fn back(&self, state: &mut SessionState, sink: &mut dyn RenderSink) -> bool {
        if state.wizard.is_first() || state.wizard.step_count() == 0 {
            return false;
        }
        let index = state.wizard.active_step() - 1;
        self.activate(state, index, sink);
        true
    }

    /// Goes one step forward, wrapping from the last step to the first.
    pub fn next(&self, state: &mut SessionState, sink: &mut dyn RenderSink) {
        let count = state.wizard.step_count();
        if count == 0 {
            return;
        }
        let index = if state.wizard.is_last() {
            0
        } else {
            state.wizard.active_step() + 1
        };
        self.activate(state, index, sink);
    }

    /// Jumps straight to `index`. Out-of-range indices are ignored.
    pub fn go_to(&self, state: &mut SessionState, index: usize, sink: &mut dyn RenderSink) -> bool {
        if index >= state.wizard.step_count() {
            warn!(index, steps = state.wizard.step_count(), "step index out of range");
            return false;
        }
        self.activate(state, index, sink);
        true
    }

    /// Indicator text for a step, e.g. `Step 2 of 3: T-Shirt`.
    pub fn indicator_text(&self, state: &SessionState, index: usize) -> String {
        let label = state
            .registry
            .descriptor_at(index)
            .map_or("", |d| d.display_label.as_str());
        format!(
            "Step {} of {}: {}",
            index + 1,
            state.wizard.step_count(),
            label
        )
    }

    fn activate(&self, state: &mut SessionState, index: usize, sink: &mut dyn RenderSink) {
        let count = state.wizard.step_count();
        if index >= count {
            return;
        }
        state.wizard.set_active(index);
        debug!(step = index, "wizard step shown");

        sink.show_step(index, count);
        sink.set_back_enabled(index != 0);
        let label = if index == count - 1 {
            &self.labels.finish_label
        } else {
            &self.labels.continue_label
        };
        sink.set_next_label(label);
        let indicator = self.indicator_text(state, index);
        sink.set_step_indicator(&indicator);
        self.presenter.render_for_step(state, index, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LayerDescriptor;
    use crate::render::{HeadlessSink, SinkCall};
    use crate::session::preview::PreviewLabels;

    fn navigator() -> WizardNavigator {
        WizardNavigator::new(
            WizardLabels {
                continue_label: "Next".to_string(),
                finish_label: "Finish".to_string(),
            },
            PreviewPresenter::new(PreviewLabels {
                loading: "Loading".to_string(),
                unavailable: "Unavailable".to_string(),
            }),
        )
    }

    fn three_steps() -> SessionState {
        SessionState::new(vec![
            LayerDescriptor::new("shoes", "Shoes", "shoes.json", "assets/shoes-"),
            LayerDescriptor::new("shirt", "T-Shirt", "shirt.json", "assets/shirt-"),
            LayerDescriptor::new("pants", "Pants", "pants.json", "assets/pants-"),
        ])
    }

    #[test]
    fn test_next_wraps_around() {
        let mut state = three_steps();
        let mut sink = HeadlessSink::new();
        let nav = navigator();

        nav.next(&mut state, &mut sink);
        assert_eq!(state.wizard.active_step(), 1);
        nav.next(&mut state, &mut sink);
        assert_eq!(state.wizard.active_step(), 2);
        assert_eq!(sink.next_label, "Finish");
        nav.next(&mut state, &mut sink);
        assert_eq!(state.wizard.active_step(), 0);
        assert_eq!(sink.next_label, "Next");
    }

    #[test]
    fn test_back_at_first_step_is_noop() {
        let mut state = three_steps();
        let mut sink = HeadlessSink::new();

        assert!(!navigator().back(&mut state, &mut sink));
        assert_eq!(state.wizard.active_step(), 0);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_back_moves_one_step() {
        let mut state = three_steps();
        let mut sink = HeadlessSink::new();
        let nav = navigator();

        nav.go_to(&mut state, 2, &mut sink);
        assert!(nav.back(&mut state, &mut sink));
        assert_eq!(state.wizard.active_step(), 1);
        assert!(sink.back_enabled);
    }

    #[test]
    fn test_transition_side_effect_order() {
        let mut state = three_steps();
        let mut sink = HeadlessSink::new();

        navigator().next(&mut state, &mut sink);

        assert_eq!(
            sink.calls,
            vec![
                SinkCall::ShowStep(1),
                SinkCall::BackEnabled(true),
                SinkCall::NextLabel("Next".to_string()),
                SinkCall::StepIndicator("Step 2 of 3: T-Shirt".to_string()),
                SinkCall::RenderGallery("shirt".to_string()),
            ]
        );
    }

    #[test]
    fn test_go_to_out_of_range() {
        let mut state = three_steps();
        let mut sink = HeadlessSink::new();
        assert!(!navigator().go_to(&mut state, 3, &mut sink));
        assert_eq!(state.wizard.active_step(), 0);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_initial_render_disables_back() {
        let mut state = three_steps();
        let mut sink = HeadlessSink::new();
        navigator().show_initial(&mut state, &mut sink);
        assert_eq!(sink.active_step, Some(0));
        assert!(!sink.back_enabled);
        assert_eq!(sink.step_indicator, "Step 1 of 3: Shoes");
    }

    #[test]
    fn test_single_step_wizard_finishes_immediately() {
        let mut state = SessionState::new(vec![LayerDescriptor::new(
            "shirt",
            "T-Shirt",
            "shirt.json",
            "assets/shirt-",
        )]);
        let mut sink = HeadlessSink::new();
        let nav = navigator();
        nav.show_initial(&mut state, &mut sink);
        assert_eq!(sink.next_label, "Finish");
        nav.next(&mut state, &mut sink);
        assert_eq!(state.wizard.active_step(), 0);
    }
}
