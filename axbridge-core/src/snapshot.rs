//! Owned, serializable snapshots of element subtrees.
//!
//! [`ElementSnapshot`] is a driver-free copy of every commonly inspected
//! property of one node, captured with the same guards as the live walks in
//! [`tree`](crate::tree).  Snapshots are what the diagnostic CLI prints and
//! what replay fixtures are compared against in tests.
//!
//! Capture uses the tolerant read path throughout: a node that fails to
//! answer one property still appears in the snapshot with that property
//! defaulted, and a node whose children cannot be fetched is recorded as a
//! leaf.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::attribute::keys;
use crate::driver::NodeId;
use crate::element::Element;
use crate::geometry::Rect;
use crate::tree::WalkConfig;

/// One captured node and its captured subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub role: String,
    pub subrole: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub identifier: Option<String>,
    pub enabled: bool,
    pub hidden: bool,
    pub focused: bool,
    pub frame: Option<Rect>,
    pub actions: Vec<String>,
    pub depth: usize,
    pub children: Vec<ElementSnapshot>,
}

struct CaptureState {
    seen: HashSet<NodeId>,
    remaining: usize,
    max_depth: usize,
}

/// Capture the subtree rooted at `root` as an owned snapshot.
pub fn capture(root: &Element, config: WalkConfig) -> ElementSnapshot {
    let mut state = CaptureState {
        seen: HashSet::new(),
        remaining: config.max_nodes,
        max_depth: config.max_depth,
    };
    capture_node(root, 0, &mut state)
}

fn capture_node(element: &Element, depth: usize, state: &mut CaptureState) -> ElementSnapshot {
    state.seen.insert(element.handle());
    state.remaining = state.remaining.saturating_sub(1);

    let actions = element
        .actions()
        .unwrap_or_default()
        .iter()
        .map(|action| action.identifier().to_owned())
        .collect();

    let mut children = Vec::new();
    if depth < state.max_depth {
        for child in element.children().unwrap_or_default() {
            if state.remaining == 0 {
                break;
            }
            if state.seen.contains(&child.handle()) {
                continue;
            }
            children.push(capture_node(&child, depth + 1, state));
        }
    }

    ElementSnapshot {
        role: element.role().identifier().to_owned(),
        subrole: element
            .read(&keys::SUBROLE)
            .map(|subrole| subrole.identifier().to_owned()),
        title: element.title(),
        description: element.description(),
        identifier: element.identifier(),
        enabled: element.read(&keys::ENABLED).unwrap_or(false),
        hidden: element.read(&keys::HIDDEN).unwrap_or(false),
        focused: element.read(&keys::FOCUSED).unwrap_or(false),
        frame: element.frame(),
        actions,
        depth,
        children,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::action::Action;
    use crate::driver::AccessibilityDriver;
    use crate::replay::{NodeSpec, ReplayDriver};
    use crate::role::{Role, Subrole};
    use crate::value::{Geometry, RawValue};

    fn sample() -> Element {
        let driver = ReplayDriver::new();
        let root = driver.add_node(NodeSpec::role(Role::Window).title("Demo").enabled(true));
        let ok = driver.add_node(
            NodeSpec::role(Role::Button)
                .title("OK")
                .enabled(true)
                .action(Action::Press)
                .attribute(
                    "AXFrame",
                    RawValue::Geometry(Geometry::Rect(Rect::new(10.0, 10.0, 80.0, 20.0))),
                ),
        );
        let close = driver.add_node(
            NodeSpec::role(Role::Button)
                .subrole(Subrole::CloseButton)
                .action(Action::Press),
        );
        driver.set_children(root, &[ok, close]);
        Element::new(
            Arc::new(driver) as Arc<dyn AccessibilityDriver>,
            root,
        )
    }

    #[test]
    fn test_capture_shape() {
        let snapshot = capture(&sample(), WalkConfig::default());

        assert_eq!(snapshot.role, "AXWindow");
        assert_eq!(snapshot.title.as_deref(), Some("Demo"));
        assert_eq!(snapshot.depth, 0);
        assert_eq!(snapshot.children.len(), 2);

        let ok = &snapshot.children[0];
        assert_eq!(ok.title.as_deref(), Some("OK"));
        assert_eq!(ok.depth, 1);
        assert_eq!(ok.actions, vec!["AXPress"]);
        assert_eq!(ok.frame, Some(Rect::new(10.0, 10.0, 80.0, 20.0)));

        let close = &snapshot.children[1];
        assert_eq!(close.subrole.as_deref(), Some("AXCloseButton"));
        assert_eq!(close.title, None);
    }

    #[test]
    fn test_capture_respects_depth_budget() {
        let config = WalkConfig {
            max_depth: 0,
            max_nodes: 50_000,
        };
        let snapshot = capture(&sample(), config);
        assert!(snapshot.children.is_empty());
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let snapshot = capture(&sample(), WalkConfig::default());
        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let back: ElementSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_capture_missing_flags_default_false() {
        let driver = ReplayDriver::new();
        let node = driver.add_node(NodeSpec::role(Role::Group));
        let el = Element::new(Arc::new(driver) as Arc<dyn AccessibilityDriver>, node);

        let snapshot = capture(&el, WalkConfig::default());
        assert!(!snapshot.enabled);
        assert!(!snapshot.hidden);
        assert!(!snapshot.focused);
    }
}
