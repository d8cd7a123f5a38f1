//! Wizard step state and navigation-control visibility.

/// Horizontal placement of the navigation button row.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAlignment {
    /// Flush right, used on the first step
    End,
    /// Space between previous and next, used on later steps
    Between,
}

/// Visibility of the navigation controls for the current step.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavControls {
    pub prev_visible: bool,
    pub next_visible: bool,
    pub finish_visible: bool,
    pub alignment: ButtonAlignment,
}

/// Holds the current step index over the ordered step sequence. The
/// index moves by ±1 per navigation operation and never leaves
/// `0..step_count`; out-of-range requests are silent no-ops.
///
#[derive(Clone, Copy, Debug)]
pub struct StepNavigator {
    current: usize,
    count: usize,
}

impl StepNavigator {
    pub fn new(count: usize) -> StepNavigator {
        StepNavigator { current: 0, count }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.count
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.count == 0 || self.current == self.count - 1
    }

    /// Move to the next step. Returns false at the last step.
    ///
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move to the previous step. Returns false at the first step.
    ///
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Navigation-control visibility for the current step: previous is
    /// hidden on the first step, next is hidden on the last, finish is
    /// shown only on the last.
    ///
    pub fn controls(&self) -> NavControls {
        NavControls {
            prev_visible: !self.is_first(),
            next_visible: !self.is_last(),
            finish_visible: self.is_last(),
            alignment: if self.is_first() {
                ButtonAlignment::End
            } else {
                ButtonAlignment::Between
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_step_walkthrough_matches_the_button_rules() {
        let mut navigator = StepNavigator::new(3);

        let controls = navigator.controls();
        assert!(!controls.prev_visible);
        assert!(controls.next_visible);
        assert!(!controls.finish_visible);
        assert_eq!(controls.alignment, ButtonAlignment::End);

        assert!(navigator.advance());
        let controls = navigator.controls();
        assert!(controls.prev_visible);
        assert!(controls.next_visible);
        assert!(!controls.finish_visible);
        assert_eq!(controls.alignment, ButtonAlignment::Between);

        assert!(navigator.advance());
        let controls = navigator.controls();
        assert!(controls.prev_visible);
        assert!(!controls.next_visible);
        assert!(controls.finish_visible);
    }

    #[test]
    fn navigation_is_silent_at_the_bounds() {
        let mut navigator = StepNavigator::new(2);
        assert!(!navigator.retreat());
        assert_eq!(navigator.current_index(), 0);

        assert!(navigator.advance());
        assert!(!navigator.advance());
        assert_eq!(navigator.current_index(), 1);
    }

    #[test]
    fn single_step_shows_only_finish() {
        let navigator = StepNavigator::new(1);
        let controls = navigator.controls();
        assert!(!controls.prev_visible);
        assert!(!controls.next_visible);
        assert!(controls.finish_visible);
    }
}
