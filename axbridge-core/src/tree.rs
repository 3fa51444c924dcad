//! Depth-first search and diagnostic traversal over live element trees.
//!
//! The native protocol guarantees neither acyclicity nor finiteness, so both
//! walks are iterative with an explicit stack, guarded by a visited-set keyed
//! on the handle token plus configurable depth and node budgets.  When a
//! budget is exceeded the walk fails closed: it stops and reports truncation
//! instead of crashing.
//!
//! Traversal order is pre-order: the current node is tested before its
//! children, children in the order the service returns them, depth first,
//! left to right.  A node whose children cannot be fetched is treated as a
//! leaf, never as an error.

use std::collections::HashSet;

use crate::element::Element;

/// Budgets for one walk over a live tree.
#[derive(Debug, Clone, Copy)]
pub struct WalkConfig {
    /// Nodes deeper than this are not descended into.
    pub max_depth: usize,
    /// Hard cap on visited nodes; the walk stops when it is reached.
    pub max_nodes: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        // Real UI trees rarely exceed depth 30; the node cap is a backstop
        // against cyclic or degenerate trees the visited-set cannot bound.
        Self {
            max_depth: 50,
            max_nodes: 50_000,
        }
    }
}

/// Outcome of [`visit`]: how many nodes were reached, which callbacks failed,
/// and whether a budget cut the walk short.
#[derive(Debug)]
pub struct VisitReport<E> {
    pub visited: usize,
    /// Callback failures, in visit order.  A failing node never aborts the
    /// walk: its children and later siblings are still visited.
    pub failures: Vec<(Element, E)>,
    /// Whether a depth or node budget stopped the walk before exhaustion.
    pub truncated: bool,
}

fn children_or_leaf(element: &Element) -> Vec<Element> {
    match element.children() {
        Ok(children) => children,
        Err(err) => {
            log::debug!("treating {element:?} as leaf: {err}");
            Vec::new()
        }
    }
}

/// Pre-order depth-first search for the first element satisfying `predicate`.
///
/// Returns `None` when no node in the reachable, budget-bounded subtree
/// matches.
pub fn find<P>(root: &Element, config: WalkConfig, mut predicate: P) -> Option<Element>
where
    P: FnMut(&Element) -> bool,
{
    let mut seen: HashSet<crate::driver::NodeId> = HashSet::new();
    let mut stack: Vec<(Element, usize)> = vec![(root.clone(), 0)];
    let mut visited = 0usize;

    while let Some((element, depth)) = stack.pop() {
        if !seen.insert(element.handle()) {
            continue;
        }
        visited += 1;
        if visited > config.max_nodes {
            return None;
        }

        if predicate(&element) {
            return Some(element);
        }

        if depth < config.max_depth {
            let children = children_or_leaf(&element);
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    None
}

/// Invoke `callback(element, depth)` on every reachable node in pre-order.
///
/// Callback failures are accumulated in the report rather than aborting the
/// walk or being printed, so partial-failure information stays inspectable.
pub fn visit<E, F>(root: &Element, config: WalkConfig, mut callback: F) -> VisitReport<E>
where
    F: FnMut(&Element, usize) -> Result<(), E>,
{
    let mut report = VisitReport {
        visited: 0,
        failures: Vec::new(),
        truncated: false,
    };
    let mut seen: HashSet<crate::driver::NodeId> = HashSet::new();
    let mut stack: Vec<(Element, usize)> = vec![(root.clone(), 0)];

    while let Some((element, depth)) = stack.pop() {
        if !seen.insert(element.handle()) {
            continue;
        }
        if report.visited >= config.max_nodes {
            report.truncated = true;
            break;
        }
        report.visited += 1;

        if let Err(err) = callback(&element, depth) {
            report.failures.push((element.clone(), err));
        }

        if depth < config.max_depth {
            let children = children_or_leaf(&element);
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        } else if !children_or_leaf(&element).is_empty() {
            report.truncated = true;
        }
    }

    report
}

impl Element {
    /// [`find`] with default budgets.
    pub fn find<P>(&self, predicate: P) -> Option<Element>
    where
        P: FnMut(&Element) -> bool,
    {
        find(self, WalkConfig::default(), predicate)
    }

    /// [`visit`] with default budgets.
    pub fn visit<E, F>(&self, callback: F) -> VisitReport<E>
    where
        F: FnMut(&Element, usize) -> Result<(), E>,
    {
        visit(self, WalkConfig::default(), callback)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::driver::{AccessibilityDriver, NodeId};
    use crate::errors::AxStatus;
    use crate::replay::{NodeSpec, ReplayDriver};
    use crate::role::Role;
    use crate::value::RawValue;

    /// Window with two buttons A and B.
    fn small_tree() -> (Arc<ReplayDriver>, NodeId, NodeId, NodeId) {
        let driver = ReplayDriver::new();
        let root = driver.add_node(NodeSpec::role(Role::Window).title("root"));
        let a = driver.add_node(NodeSpec::role(Role::Button).title("A"));
        let b = driver.add_node(NodeSpec::role(Role::Button).title("B"));
        driver.set_children(root, &[a, b]);
        (Arc::new(driver), root, a, b)
    }

    fn element(driver: &Arc<ReplayDriver>, node: NodeId) -> Element {
        Element::new(Arc::clone(driver) as Arc<dyn AccessibilityDriver>, node)
    }

    #[test]
    fn test_find_tests_nodes_in_preorder() {
        let (driver, root, _, _) = small_tree();
        let root = element(&driver, root);

        let mut tested = Vec::new();
        let found = root.find(|el| {
            tested.push(el.title().unwrap_or_default());
            el.title().as_deref() == Some("B")
        });

        assert_eq!(found.unwrap().title().as_deref(), Some("B"));
        // R and A are confirmed non-matching before B is returned.
        assert_eq!(tested, vec!["root", "A", "B"]);
    }

    #[test]
    fn test_find_returns_none_when_nothing_matches() {
        let (driver, root, _, _) = small_tree();
        let root = element(&driver, root);

        assert!(root.find(|el| el.title().as_deref() == Some("C")).is_none());
    }

    #[test]
    fn test_find_unknown_role_node() {
        let driver = ReplayDriver::new();
        let root = driver.add_node(NodeSpec::role(Role::Window));
        let odd = driver.add_node(NodeSpec::new().attribute("AXRole", RawValue::string("AXFooBar")));
        driver.set_children(root, &[odd]);
        let driver = Arc::new(driver);
        let root = element(&driver, root);

        let found = root.find(|el| el.role() == Role::Unknown).unwrap();
        assert_eq!(found.handle(), odd);
    }

    #[test]
    fn test_find_depth_first_left_to_right() {
        // root -> [left -> [leaf], right]; the leaf under `left` is reached
        // before `right`.
        let driver = ReplayDriver::new();
        let root = driver.add_node(NodeSpec::role(Role::Window).title("root"));
        let left = driver.add_node(NodeSpec::role(Role::Group).title("left"));
        let right = driver.add_node(NodeSpec::role(Role::Group).title("right"));
        let leaf = driver.add_node(NodeSpec::role(Role::Button).title("leaf"));
        driver.set_children(root, &[left, right]);
        driver.set_children(left, &[leaf]);
        let driver = Arc::new(driver);
        let root = element(&driver, root);

        let mut order = Vec::new();
        let report = root.visit(|el, _depth| -> Result<(), ()> {
            order.push(el.title().unwrap_or_default());
            Ok(())
        });

        assert_eq!(order, vec!["root", "left", "leaf", "right"]);
        assert_eq!(report.visited, 4);
        assert!(!report.truncated);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_visit_reports_depths() {
        let driver = ReplayDriver::new();
        let root = driver.add_node(NodeSpec::role(Role::Window));
        let child = driver.add_node(NodeSpec::role(Role::Group));
        let grandchild = driver.add_node(NodeSpec::role(Role::Button));
        driver.set_children(root, &[child]);
        driver.set_children(child, &[grandchild]);
        let driver = Arc::new(driver);
        let root = element(&driver, root);

        let mut depths = Vec::new();
        root.visit(|_el, depth| -> Result<(), ()> {
            depths.push(depth);
            Ok(())
        });

        assert_eq!(depths, vec![0, 1, 2]);
    }

    #[test]
    fn test_visit_isolates_callback_failures() {
        // Failing on `left` must not prevent visiting its child or the next
        // sibling: the visited count equals the reachable node count.
        let driver = ReplayDriver::new();
        let root = driver.add_node(NodeSpec::role(Role::Window).title("root"));
        let left = driver.add_node(NodeSpec::role(Role::Group).title("left"));
        let right = driver.add_node(NodeSpec::role(Role::Group).title("right"));
        let leaf = driver.add_node(NodeSpec::role(Role::Button).title("leaf"));
        driver.set_children(root, &[left, right]);
        driver.set_children(left, &[leaf]);
        let driver = Arc::new(driver);
        let root = element(&driver, root);

        let report = root.visit(|el, _depth| {
            if el.title().as_deref() == Some("left") {
                Err("boom")
            } else {
                Ok(())
            }
        });

        assert_eq!(report.visited, 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0.title().as_deref(), Some("left"));
        assert_eq!(report.failures[0].1, "boom");
    }

    #[test]
    fn test_cyclic_tree_terminates() {
        let (driver, root_id, _, b) = small_tree();
        // Make B's children point back at the root.
        driver.set_children(b, &[root_id]);
        let root = element(&driver, root_id);

        let report = root.visit(|_el, _depth| -> Result<(), ()> { Ok(()) });
        assert_eq!(report.visited, 3);

        assert!(root.find(|el| el.title().as_deref() == Some("C")).is_none());
    }

    #[test]
    fn test_depth_budget_stops_descent() {
        let driver = ReplayDriver::new();
        let root = driver.add_node(NodeSpec::role(Role::Window));
        let child = driver.add_node(NodeSpec::role(Role::Group));
        let grandchild = driver.add_node(NodeSpec::role(Role::Button).title("deep"));
        driver.set_children(root, &[child]);
        driver.set_children(child, &[grandchild]);
        let driver = Arc::new(driver);
        let root = element(&driver, root);

        let config = WalkConfig {
            max_depth: 1,
            max_nodes: 50_000,
        };
        let report = visit(&root, config, |_el, _depth| -> Result<(), ()> { Ok(()) });
        assert_eq!(report.visited, 2);
        assert!(report.truncated);

        assert!(find(&root, config, |el| el.title().as_deref() == Some("deep")).is_none());
    }

    #[test]
    fn test_node_budget_fails_closed() {
        let (driver, root_id, _, _) = small_tree();
        let root = element(&driver, root_id);

        let config = WalkConfig {
            max_depth: 50,
            max_nodes: 2,
        };
        let report = visit(&root, config, |_el, _depth| -> Result<(), ()> { Ok(()) });
        assert_eq!(report.visited, 2);
        assert!(report.truncated);
    }

    #[test]
    fn test_unfetchable_children_is_leaf() {
        let driver = ReplayDriver::new();
        let root = driver.add_node(NodeSpec::role(Role::Window).title("root"));
        let broken = driver.add_node(
            NodeSpec::role(Role::Group)
                .title("broken")
                .fail_attribute("AXChildren", AxStatus::CannotComplete),
        );
        let after = driver.add_node(NodeSpec::role(Role::Button).title("after"));
        driver.set_children(root, &[broken, after]);
        let driver = Arc::new(driver);
        let root = element(&driver, root);

        let mut order = Vec::new();
        root.visit(|el, _depth| -> Result<(), ()> {
            order.push(el.title().unwrap_or_default());
            Ok(())
        });

        assert_eq!(order, vec!["root", "broken", "after"]);
    }
}
