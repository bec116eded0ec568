//! Pure toggle transition
//!
//! Event handlers don't decide anything themselves: they hand the current
//! marker state and the activated target to [`transition`] and apply what
//! comes back.

/// What the user activated on a menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// The expand/collapse stub next to the label
    ExpandStub,
    /// A section header link without a destination
    HeaderLink,
}

/// Outcome of one activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// New expanded state, to be applied to the marker and persisted
    pub expanded: bool,
    /// Keep ancestor handlers (e.g. the site theme's own toggle) out of it
    pub stop_propagation: bool,
    /// Suppress the browser's default action for the target
    pub prevent_default: bool,
}

pub fn transition(expanded: bool, affordance: Affordance) -> Transition {
    Transition {
        expanded: !expanded,
        stop_propagation: true,
        prevent_default: affordance == Affordance::HeaderLink,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, Affordance::ExpandStub, true, false)]
    #[case(true, Affordance::ExpandStub, false, false)]
    #[case(false, Affordance::HeaderLink, true, true)]
    #[case(true, Affordance::HeaderLink, false, true)]
    fn test_transition(
        #[case] expanded: bool,
        #[case] affordance: Affordance,
        #[case] next: bool,
        #[case] prevent_default: bool,
    ) {
        let t = transition(expanded, affordance);
        assert_eq!(t.expanded, next);
        assert!(t.stop_propagation);
        assert_eq!(t.prevent_default, prevent_default);
    }
}
