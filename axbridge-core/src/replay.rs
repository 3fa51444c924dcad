//! In-memory scripted driver for tests and diagnostics.
//!
//! [`ReplayDriver`] implements [`AccessibilityDriver`] over a node arena that
//! is either built programmatically with [`NodeSpec`] or loaded from a JSON
//! fixture ([`FixtureDocument`]).  It supports everything the adapter layer
//! exercises: attribute get/set with per-node settability, action listing and
//! invocation (journaled so tests can assert on what was performed), scripted
//! failure statuses for fault-injection tests, and arbitrary child wiring --
//! including cycles, to exercise the traversal guards.
//!
//! Node tokens are arena indices, so the same underlying node always yields
//! the same [`NodeId`], as the driver contract requires.

use std::collections::{BTreeMap, HashMap, HashSet};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::driver::{AccessibilityDriver, NodeId};
use crate::errors::{AxError, AxStatus};
use crate::geometry::Rect;
use crate::role::{Role, Subrole};
use crate::value::{Geometry, RawValue};

/// Declarative description of one scripted node.
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    attributes: HashMap<String, RawValue>,
    settable: HashSet<String>,
    actions: Vec<String>,
    action_descriptions: HashMap<String, String>,
    attribute_faults: HashMap<String, AxStatus>,
    action_fault: Option<AxStatus>,
}

impl NodeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node with the given role.
    pub fn role(role: Role) -> Self {
        Self::new().attribute("AXRole", RawValue::string(role.identifier()))
    }

    pub fn subrole(self, subrole: Subrole) -> Self {
        self.attribute("AXSubrole", RawValue::string(subrole.identifier()))
    }

    pub fn title(self, title: &str) -> Self {
        self.attribute("AXTitle", RawValue::string(title))
    }

    pub fn description(self, description: &str) -> Self {
        self.attribute("AXDescription", RawValue::string(description))
    }

    pub fn identifier(self, identifier: &str) -> Self {
        self.attribute("AXIdentifier", RawValue::string(identifier))
    }

    pub fn enabled(self, enabled: bool) -> Self {
        self.attribute("AXEnabled", RawValue::flag(enabled))
    }

    pub fn frame(self, frame: Rect) -> Self {
        self.attribute("AXFrame", RawValue::Geometry(Geometry::Rect(frame)))
            .attribute(
                "AXPosition",
                RawValue::Geometry(Geometry::Point(frame.origin())),
            )
            .attribute("AXSize", RawValue::Geometry(Geometry::Size(frame.size())))
    }

    pub fn attribute(mut self, name: &str, value: RawValue) -> Self {
        self.attributes.insert(name.to_owned(), value);
        self
    }

    /// Declare an attribute writable through `set_attribute`.
    pub fn settable(mut self, name: &str) -> Self {
        self.settable.insert(name.to_owned());
        self
    }

    pub fn action(self, action: Action) -> Self {
        self.action_raw(action.identifier())
    }

    /// Support an action by raw identifier, known to the catalog or not.
    pub fn action_raw(mut self, identifier: &str) -> Self {
        self.actions.push(identifier.to_owned());
        self
    }

    pub fn describe_action(mut self, action: Action, text: &str) -> Self {
        self.action_descriptions
            .insert(action.identifier().to_owned(), text.to_owned());
        self
    }

    /// Script a failure status for reads and writes of one attribute.
    pub fn fail_attribute(mut self, name: &str, status: AxStatus) -> Self {
        self.attribute_faults.insert(name.to_owned(), status);
        self
    }

    /// Script a failure status for every action-related call on the node.
    pub fn fail_actions(mut self, status: AxStatus) -> Self {
        self.action_fault = Some(status);
        self
    }
}

#[derive(Debug, Clone, Default)]
struct NodeState {
    attributes: HashMap<String, RawValue>,
    settable: HashSet<String>,
    actions: Vec<String>,
    action_descriptions: HashMap<String, String>,
    attribute_faults: HashMap<String, AxStatus>,
    action_fault: Option<AxStatus>,
    pid: Option<u32>,
}

impl From<NodeSpec> for NodeState {
    fn from(spec: NodeSpec) -> Self {
        NodeState {
            attributes: spec.attributes,
            settable: spec.settable,
            actions: spec.actions,
            action_descriptions: spec.action_descriptions,
            attribute_faults: spec.attribute_faults,
            action_fault: spec.action_fault,
            pid: None,
        }
    }
}

#[derive(Default)]
struct Store {
    nodes: Vec<NodeState>,
    applications: BTreeMap<u32, NodeId>,
    journal: Vec<(NodeId, String)>,
}

impl Store {
    fn node(&self, id: NodeId) -> Result<&NodeState, AxStatus> {
        self.nodes.get(id.0 as usize).ok_or(AxStatus::InvalidHandle)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeState, AxStatus> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(AxStatus::InvalidHandle)
    }

    /// Nodes reachable from `root` through the children attribute.
    fn reachable(&self, root: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        let mut out = Vec::new();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Ok(node) = self.node(id) else { continue };
            out.push(id);
            if let Some(RawValue::HandleList(children)) = node.attributes.get("AXChildren") {
                stack.extend(children.iter().copied());
            }
        }
        out
    }
}

/// Scripted in-memory accessibility driver.
#[derive(Default)]
pub struct ReplayDriver {
    store: Mutex<Store>,
}

impl ReplayDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the arena and return its token.
    pub fn add_node(&self, spec: NodeSpec) -> NodeId {
        let mut store = self.store.lock();
        let id = NodeId(store.nodes.len() as u64);
        store.nodes.push(spec.into());
        id
    }

    /// Wire `children` under `parent`: sets the children attribute on the
    /// parent and the parent attribute on each child.  Nothing prevents
    /// wiring a cycle; the traversal guards are expected to cope.
    pub fn set_children(&self, parent: NodeId, children: &[NodeId]) {
        let mut store = self.store.lock();
        if let Ok(node) = store.node_mut(parent) {
            node.attributes.insert(
                "AXChildren".to_owned(),
                RawValue::HandleList(children.to_vec()),
            );
        }
        for &child in children {
            if let Ok(node) = store.node_mut(child) {
                node.attributes
                    .insert("AXParent".to_owned(), RawValue::Handle(parent));
            }
        }
    }

    /// Register `root` as the application root for `pid` and stamp the pid
    /// on every node currently reachable from it.
    pub fn register_application(&self, pid: u32, root: NodeId) {
        let mut store = self.store.lock();
        store.applications.insert(pid, root);
        for id in store.reachable(root) {
            if let Ok(node) = store.node_mut(id) {
                node.pid = Some(pid);
            }
        }
    }

    /// Registered application pids, ascending.
    pub fn applications(&self) -> Vec<u32> {
        self.store.lock().applications.keys().copied().collect()
    }

    /// Every action performed so far, in invocation order.
    pub fn journal(&self) -> Vec<(NodeId, String)> {
        self.store.lock().journal.clone()
    }

    /// Build a driver from a JSON fixture.
    pub fn from_json(text: &str) -> Result<Self, AxError> {
        let doc: FixtureDocument =
            serde_json::from_str(text).map_err(|err| AxError::Fixture(err.to_string()))?;
        Self::from_fixture(&doc)
    }

    /// Build a driver from a parsed fixture document.
    pub fn from_fixture(doc: &FixtureDocument) -> Result<Self, AxError> {
        let node_count = doc.nodes.len();
        if doc.root >= node_count {
            return Err(AxError::Fixture(format!(
                "root index {} out of bounds ({node_count} nodes)",
                doc.root
            )));
        }

        let driver = Self::new();
        for fixture in &doc.nodes {
            for &child in &fixture.children {
                if child >= node_count {
                    return Err(AxError::Fixture(format!(
                        "child index {child} out of bounds ({node_count} nodes)"
                    )));
                }
            }
            driver.add_node(fixture.to_spec());
        }

        for (index, fixture) in doc.nodes.iter().enumerate() {
            if !fixture.children.is_empty() {
                let children: Vec<NodeId> =
                    fixture.children.iter().map(|&i| NodeId(i as u64)).collect();
                driver.set_children(NodeId(index as u64), &children);
            }
        }

        // Application-level sugar: the root's windows are its window-role
        // children, the way real application nodes report them.
        let root = NodeId(doc.root as u64);
        let windows: Vec<NodeId> = doc.nodes[doc.root]
            .children
            .iter()
            .filter(|&&i| doc.nodes[i].role.as_deref() == Some("AXWindow"))
            .map(|&i| NodeId(i as u64))
            .collect();
        if !windows.is_empty() {
            let mut store = driver.store.lock();
            if let Ok(node) = store.node_mut(root) {
                node.attributes
                    .insert("AXWindows".to_owned(), RawValue::HandleList(windows));
            }
        }

        driver.register_application(doc.pid, root);
        Ok(driver)
    }
}

impl AccessibilityDriver for ReplayDriver {
    fn attribute_names(&self, node: NodeId) -> Result<Vec<String>, AxStatus> {
        let store = self.store.lock();
        let mut names: Vec<String> = store.node(node)?.attributes.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn attribute_value(&self, node: NodeId, name: &str) -> Result<RawValue, AxStatus> {
        let store = self.store.lock();
        let state = store.node(node)?;
        if let Some(&status) = state.attribute_faults.get(name) {
            return Err(status);
        }
        state
            .attributes
            .get(name)
            .cloned()
            .ok_or(AxStatus::AttributeUnsupported)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: RawValue) -> AxStatus {
        let mut store = self.store.lock();
        let state = match store.node_mut(node) {
            Ok(state) => state,
            Err(status) => return status,
        };
        if let Some(&status) = state.attribute_faults.get(name) {
            return status;
        }
        if !state.settable.contains(name) {
            return AxStatus::AttributeUnsupported;
        }
        state.attributes.insert(name.to_owned(), value);
        AxStatus::Success
    }

    fn action_names(&self, node: NodeId) -> Result<Vec<String>, AxStatus> {
        let store = self.store.lock();
        let state = store.node(node)?;
        if let Some(status) = state.action_fault {
            return Err(status);
        }
        Ok(state.actions.clone())
    }

    fn perform_action(&self, node: NodeId, action: &str) -> AxStatus {
        let mut store = self.store.lock();
        let supported = match store.node(node) {
            Ok(state) => {
                if let Some(status) = state.action_fault {
                    return status;
                }
                state.actions.iter().any(|a| a == action)
            }
            Err(status) => return status,
        };
        if !supported {
            return AxStatus::ActionUnsupported;
        }
        store.journal.push((node, action.to_owned()));
        AxStatus::Success
    }

    fn action_description(&self, node: NodeId, action: &str) -> Result<String, AxStatus> {
        let store = self.store.lock();
        let state = store.node(node)?;
        if let Some(status) = state.action_fault {
            return Err(status);
        }
        if !state.actions.iter().any(|a| a == action) {
            return Err(AxStatus::ActionUnsupported);
        }
        state
            .action_descriptions
            .get(action)
            .cloned()
            .ok_or(AxStatus::NoValue)
    }

    fn application_root(&self, pid: u32) -> Result<NodeId, AxStatus> {
        self.store
            .lock()
            .applications
            .get(&pid)
            .copied()
            .ok_or(AxStatus::CannotComplete)
    }

    fn process_id(&self, node: NodeId) -> Option<u32> {
        self.store.lock().node(node).ok().and_then(|state| state.pid)
    }
}

// ---------------------------------------------------------------------------
// Fixture format
// ---------------------------------------------------------------------------

/// One recorded accessibility tree: a node arena, a root index, and the pid
/// the tree belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureDocument {
    pub pid: u32,
    pub root: usize,
    pub nodes: Vec<FixtureNode>,
}

/// One node of a fixture.
///
/// Common properties have sugared fields; anything else goes through the
/// `attributes` map as raw values.  Explicit raw attributes take precedence
/// over the sugared fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureNode {
    pub role: Option<String>,
    pub subrole: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub identifier: Option<String>,
    pub enabled: Option<bool>,
    pub hidden: Option<bool>,
    pub focused: Option<bool>,
    pub frame: Option<Rect>,
    pub actions: Vec<String>,
    pub action_descriptions: HashMap<String, String>,
    pub settable: Vec<String>,
    pub attributes: HashMap<String, RawValue>,
    pub children: Vec<usize>,
}

impl FixtureNode {
    fn to_spec(&self) -> NodeSpec {
        let mut spec = NodeSpec::new();
        if let Some(role) = &self.role {
            spec = spec.attribute("AXRole", RawValue::string(role.as_str()));
        }
        if let Some(subrole) = &self.subrole {
            spec = spec.attribute("AXSubrole", RawValue::string(subrole.as_str()));
        }
        if let Some(title) = &self.title {
            spec = spec.attribute("AXTitle", RawValue::string(title.as_str()));
        }
        if let Some(description) = &self.description {
            spec = spec.attribute("AXDescription", RawValue::string(description.as_str()));
        }
        if let Some(identifier) = &self.identifier {
            spec = spec.attribute("AXIdentifier", RawValue::string(identifier.as_str()));
        }
        if let Some(enabled) = self.enabled {
            spec = spec.attribute("AXEnabled", RawValue::flag(enabled));
        }
        if let Some(hidden) = self.hidden {
            spec = spec.attribute("AXHidden", RawValue::flag(hidden));
        }
        if let Some(focused) = self.focused {
            spec = spec.attribute("AXFocused", RawValue::flag(focused));
        }
        if let Some(frame) = self.frame {
            spec = spec.frame(frame);
        }
        for action in &self.actions {
            spec = spec.action_raw(action);
        }
        for (action, text) in &self.action_descriptions {
            spec.action_descriptions
                .insert(action.clone(), text.clone());
        }
        for name in &self.settable {
            spec = spec.settable(name);
        }
        for (name, value) in &self.attributes {
            spec = spec.attribute(name, value.clone());
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::element::Element;

    const FIXTURE: &str = r#"{
        "pid": 7001,
        "root": 0,
        "nodes": [
            {
                "role": "AXApplication",
                "title": "Demo",
                "children": [1]
            },
            {
                "role": "AXWindow",
                "title": "Main",
                "subrole": "AXStandardWindow",
                "enabled": true,
                "frame": { "x": 0.0, "y": 0.0, "width": 800.0, "height": 600.0 },
                "children": [2]
            },
            {
                "role": "AXButton",
                "title": "OK",
                "enabled": true,
                "actions": ["AXPress"],
                "action_descriptions": { "AXPress": "press the button" },
                "settable": ["AXValue"],
                "attributes": { "AXValue": { "String": "" } }
            }
        ]
    }"#;

    #[test]
    fn test_fixture_loads_and_wires_tree() {
        let driver = Arc::new(ReplayDriver::from_json(FIXTURE).unwrap());
        assert_eq!(driver.applications(), vec![7001]);

        let root = driver.application_root(7001).unwrap();
        let app = Element::new(
            Arc::clone(&driver) as Arc<dyn AccessibilityDriver>,
            root,
        );

        assert_eq!(app.title().as_deref(), Some("Demo"));
        assert_eq!(app.process_id(), Some(7001));

        let windows = app.windows().unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].title().as_deref(), Some("Main"));

        let children = app.children().unwrap();
        assert_eq!(children.len(), 1);
        let window = &children[0];
        assert_eq!(window.parent().unwrap(), app);

        let ok = &window.children().unwrap()[0];
        assert_eq!(ok.title().as_deref(), Some("OK"));
        assert!(ok.enabled().unwrap());
        assert!(ok.set_value("typed"));
        assert_eq!(ok.value(), Some(RawValue::string("typed")));
    }

    #[test]
    fn test_fixture_bad_root_index() {
        let text = r#"{ "pid": 1, "root": 3, "nodes": [ {} ] }"#;
        assert!(matches!(
            ReplayDriver::from_json(text),
            Err(AxError::Fixture(_))
        ));
    }

    #[test]
    fn test_fixture_bad_child_index() {
        let text = r#"{ "pid": 1, "root": 0, "nodes": [ { "children": [9] } ] }"#;
        assert!(matches!(
            ReplayDriver::from_json(text),
            Err(AxError::Fixture(_))
        ));
    }

    #[test]
    fn test_fixture_malformed_json() {
        assert!(matches!(
            ReplayDriver::from_json("{ not json"),
            Err(AxError::Fixture(_))
        ));
    }

    #[test]
    fn test_invalid_handle_status() {
        let driver = ReplayDriver::new();
        assert_eq!(
            driver.attribute_value(NodeId(99), "AXTitle"),
            Err(AxStatus::InvalidHandle)
        );
        assert_eq!(
            driver.set_attribute(NodeId(99), "AXTitle", RawValue::string("x")),
            AxStatus::InvalidHandle
        );
        assert_eq!(driver.process_id(NodeId(99)), None);
    }

    #[test]
    fn test_explicit_attribute_overrides_sugar() {
        let fixture = FixtureNode {
            title: Some("sugar".to_owned()),
            attributes: HashMap::from([(
                "AXTitle".to_owned(),
                RawValue::string("explicit"),
            )]),
            ..FixtureNode::default()
        };
        let driver = ReplayDriver::new();
        let node = driver.add_node(fixture.to_spec());
        assert_eq!(
            driver.attribute_value(node, "AXTitle"),
            Ok(RawValue::string("explicit"))
        );
    }

    #[test]
    fn test_journal_records_in_order() {
        let driver = ReplayDriver::new();
        let a = driver.add_node(NodeSpec::new().action(Action::Press));
        let b = driver.add_node(NodeSpec::new().action(Action::Cancel));

        assert!(driver.perform_action(a, "AXPress").is_success());
        assert!(driver.perform_action(b, "AXCancel").is_success());
        assert!(!driver.perform_action(a, "AXCancel").is_success());

        assert_eq!(
            driver.journal(),
            vec![(a, "AXPress".to_owned()), (b, "AXCancel".to_owned())]
        );
    }

    #[test]
    fn test_attribute_names_sorted() {
        let driver = ReplayDriver::new();
        let node = driver.add_node(
            NodeSpec::new()
                .title("x")
                .attribute("AXValue", RawValue::Number(1.0)),
        );
        assert_eq!(
            driver.attribute_names(node).unwrap(),
            vec!["AXTitle".to_owned(), "AXValue".to_owned()]
        );
    }

    #[test]
    fn test_register_application_stamps_reachable_pids() {
        let driver = ReplayDriver::new();
        let root = driver.add_node(NodeSpec::new());
        let child = driver.add_node(NodeSpec::new());
        let stray = driver.add_node(NodeSpec::new());
        driver.set_children(root, &[child]);
        driver.register_application(55, root);

        assert_eq!(driver.process_id(root), Some(55));
        assert_eq!(driver.process_id(child), Some(55));
        assert_eq!(driver.process_id(stray), None);
    }
}
