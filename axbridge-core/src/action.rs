//! The action catalog: enumerated operation identifiers, invocation, and
//! introspection.
//!
//! [`Action`] is a closed enumeration with a mandatory `Unknown` sentinel
//! absorbing any identifier string outside the known set.  Listing never
//! drops an entry: the returned catalog has exactly one [`Action`] per raw
//! identifier, in service order.

use crate::element::Element;
use crate::errors::AxError;

/// A well-known operation a node may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Simulate pressing the cancel button.
    Cancel,
    /// Simulate pressing Return.
    Confirm,
    /// Decrement the node's value by its declared increment step.
    Decrement,
    /// Simulate pressing the delete button.
    Delete,
    /// Increment the node's value by its declared increment step.
    Increment,
    /// Select the node, e.g. a menu item.
    Pick,
    /// Simulate a single click, e.g. pressing a button.
    Press,
    /// Bring a window as far forward as the application allows.
    Raise,
    /// Show the alternate UI, as on pointer hover.
    ShowAlternateUi,
    /// Show the default UI, as on pointer hover end.
    ShowDefaultUi,
    /// Open the node's context menu.
    ShowMenu,
    ScrollToVisible,
    ScrollLeftByPage,
    ScrollRightByPage,
    ScrollUpByPage,
    ScrollDownByPage,
    ZoomWindow,
    /// Absorbs any identifier outside the known set.
    Unknown,
}

impl Action {
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let action = match identifier {
            "AXCancel" => Action::Cancel,
            "AXConfirm" => Action::Confirm,
            "AXDecrement" => Action::Decrement,
            "AXDelete" => Action::Delete,
            "AXIncrement" => Action::Increment,
            "AXPick" => Action::Pick,
            "AXPress" => Action::Press,
            "AXRaise" => Action::Raise,
            "AXShowAlternateUI" => Action::ShowAlternateUi,
            "AXShowDefaultUI" => Action::ShowDefaultUi,
            "AXShowMenu" => Action::ShowMenu,
            "AXScrollToVisible" => Action::ScrollToVisible,
            "AXScrollLeftByPage" => Action::ScrollLeftByPage,
            "AXScrollRightByPage" => Action::ScrollRightByPage,
            "AXScrollUpByPage" => Action::ScrollUpByPage,
            "AXScrollDownByPage" => Action::ScrollDownByPage,
            "AXZoomWindow" => Action::ZoomWindow,
            "AXUnknown" => Action::Unknown,
            _ => return None,
        };
        Some(action)
    }

    pub fn identifier(self) -> &'static str {
        match self {
            Action::Cancel => "AXCancel",
            Action::Confirm => "AXConfirm",
            Action::Decrement => "AXDecrement",
            Action::Delete => "AXDelete",
            Action::Increment => "AXIncrement",
            Action::Pick => "AXPick",
            Action::Press => "AXPress",
            Action::Raise => "AXRaise",
            Action::ShowAlternateUi => "AXShowAlternateUI",
            Action::ShowDefaultUi => "AXShowDefaultUI",
            Action::ShowMenu => "AXShowMenu",
            Action::ScrollToVisible => "AXScrollToVisible",
            Action::ScrollLeftByPage => "AXScrollLeftByPage",
            Action::ScrollRightByPage => "AXScrollRightByPage",
            Action::ScrollUpByPage => "AXScrollUpByPage",
            Action::ScrollDownByPage => "AXScrollDownByPage",
            Action::ZoomWindow => "AXZoomWindow",
            Action::Unknown => "AXUnknown",
        }
    }
}

impl Element {
    /// List the actions the node supports.
    ///
    /// Unknown identifiers map to [`Action::Unknown`] -- never raised, never
    /// dropped, so the result length equals the raw identifier count.  An
    /// absent action list yields an empty vector.
    pub fn actions(&self) -> Result<Vec<Action>, AxError> {
        match self.driver().action_names(self.handle()) {
            Ok(names) => Ok(names
                .iter()
                .map(|name| {
                    Action::from_identifier(name).unwrap_or_else(|| {
                        log::warn!("unknown accessibility action: {name}");
                        Action::Unknown
                    })
                })
                .collect()),
            Err(status) if status.is_absent() => Ok(Vec::new()),
            Err(status) => Err(AxError::native("action names", status)),
        }
    }

    /// Invoke an action.  Returns whether the native call reported success;
    /// no failure detail is exposed at this layer.
    pub fn perform(&self, action: Action) -> bool {
        self.driver()
            .perform_action(self.handle(), action.identifier())
            .is_success()
    }

    /// Human-readable description of an action.
    ///
    /// `None` when the action has no description, and also `None` when the
    /// node does not support the action at all; other failures are explicit
    /// errors.
    pub fn describe(&self, action: Action) -> Result<Option<String>, AxError> {
        match self
            .driver()
            .action_description(self.handle(), action.identifier())
        {
            Ok(text) => Ok(Some(text)),
            Err(status) if status.is_absent() => Ok(None),
            Err(status) => Err(AxError::native(action.identifier(), status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::errors::AxStatus;
    use crate::replay::{NodeSpec, ReplayDriver};
    use crate::role::Role;

    fn element(spec: NodeSpec) -> Element {
        let driver = ReplayDriver::new();
        let node = driver.add_node(spec);
        Element::new(Arc::new(driver), node)
    }

    #[test]
    fn test_unknown_identifier_maps_to_unknown_in_place() {
        let el = element(
            NodeSpec::role(Role::Button)
                .action(Action::Press)
                .action_raw("AXWeirdCustom"),
        );

        assert_eq!(el.actions().unwrap(), vec![Action::Press, Action::Unknown]);
    }

    #[test]
    fn test_actions_absent_is_empty() {
        let el = element(NodeSpec::role(Role::StaticText));
        assert!(el.actions().unwrap().is_empty());
    }

    #[test]
    fn test_actions_failure_is_error() {
        let el = element(NodeSpec::role(Role::Button).fail_actions(AxStatus::CannotComplete));
        assert!(matches!(el.actions(), Err(AxError::Native { .. })));
    }

    #[test]
    fn test_perform_reports_success() {
        let driver = ReplayDriver::new();
        let node = driver.add_node(NodeSpec::role(Role::Button).action(Action::Press));
        let driver = Arc::new(driver);
        let el = Element::new(
            Arc::clone(&driver) as Arc<dyn crate::driver::AccessibilityDriver>,
            node,
        );

        assert!(el.perform(Action::Press));
        assert!(!el.perform(Action::Cancel));
        assert_eq!(driver.journal(), vec![(node, "AXPress".to_string())]);
    }

    #[test]
    fn test_describe_fallbacks() {
        let el = element(
            NodeSpec::role(Role::Button)
                .action(Action::Press)
                .describe_action(Action::Press, "press the button")
                .action(Action::Cancel),
        );

        assert_eq!(
            el.describe(Action::Press).unwrap().as_deref(),
            Some("press the button")
        );
        // Supported but undescribed.
        assert_eq!(el.describe(Action::Cancel).unwrap(), None);
        // Unsupported entirely.
        assert_eq!(el.describe(Action::Delete).unwrap(), None);
    }

    #[test]
    fn test_identifier_roundtrip() {
        for action in [Action::Press, Action::ShowMenu, Action::Unknown] {
            assert_eq!(Action::from_identifier(action.identifier()), Some(action));
        }
        assert_eq!(Action::from_identifier("AXWeirdCustom"), None);
    }
}
