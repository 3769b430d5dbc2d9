//! Modal visibility states and the open→closed edge detector.

use serde::Serialize;

/// Whether the modal is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalState {
    Open,
    #[default]
    Closed,
}

/// Two-state edge detector over visibility events.
///
/// Fires once per `Open → Closed` transition. Repeated `Closed` events do
/// not fire again until the modal has been opened in between.
#[derive(Debug, Default, Clone, Copy)]
pub struct VisibilityEdge {
    previous: ModalState,
}

impl VisibilityEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current`; returns true when it completes an open→closed edge.
    pub fn observe(&mut self, current: ModalState) -> bool {
        let fired = self.previous == ModalState::Open && current == ModalState::Closed;
        self.previous = current;
        fired
    }

    pub fn previous(&self) -> ModalState {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ModalState::{Closed, Open};

    #[test]
    fn test_fires_only_on_open_to_closed() {
        let mut edge = VisibilityEdge::new();
        assert!(!edge.observe(Open));
        assert!(edge.observe(Closed));
    }

    #[test]
    fn test_does_not_refire_while_closed() {
        let mut edge = VisibilityEdge::new();
        edge.observe(Open);
        assert!(edge.observe(Closed));
        assert!(!edge.observe(Closed));
        assert!(!edge.observe(Closed));
    }

    #[test]
    fn test_initial_closed_does_not_fire() {
        let mut edge = VisibilityEdge::new();
        assert!(!edge.observe(Closed));
        assert_eq!(edge.previous(), Closed);
    }

    #[test]
    fn test_each_cycle_fires() {
        let mut edge = VisibilityEdge::new();
        let fired = [Open, Closed, Open, Open, Closed, Open, Closed]
            .into_iter()
            .filter(|state| edge.observe(*state))
            .count();
        assert_eq!(fired, 3);
    }
}
