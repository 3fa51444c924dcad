//! Element: a typed, non-owning wrapper around one node handle.
//!
//! Every accessor is a thin binding of [`Element::read`] /
//! [`Element::read_required`] to one key from the
//! [`keys`](crate::attribute::keys) catalog.  Nothing is cached: each call is
//! a fresh round trip through the driver, and the tree seen through
//! `children`/`parent`/`windows` is a live view that may change between two
//! reads.
//!
//! Equality and hashing derive from the driver's handle token, so wrapping
//! the same underlying node twice yields elements that compare equal.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::attribute::{keys, AttributeKey};
use crate::driver::{AccessibilityDriver, NodeId};
use crate::errors::AxError;
use crate::geometry::{Point, Rect, Size};
use crate::role::{Role, Subrole};
use crate::value::RawValue;

/// One node of the target's accessibility tree.
#[derive(Clone)]
pub struct Element {
    driver: Arc<dyn AccessibilityDriver>,
    handle: NodeId,
}

impl Element {
    pub fn new(driver: Arc<dyn AccessibilityDriver>, handle: NodeId) -> Self {
        Self { driver, handle }
    }

    pub fn handle(&self) -> NodeId {
        self.handle
    }

    pub fn driver(&self) -> &Arc<dyn AccessibilityDriver> {
        &self.driver
    }

    /// Wrap another handle from the same driver.
    pub(crate) fn with_handle(&self, handle: NodeId) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            handle,
        }
    }

    // -----------------------------------------------------------------------
    // Read policy
    // -----------------------------------------------------------------------

    /// Fetch the raw value behind a key, applying the tolerant policy:
    /// absent statuses and origin-kind mismatches yield `None`; any other
    /// failure status is logged and yields `None` as well.
    fn fetch_raw<T>(&self, key: &AttributeKey<T>) -> Option<RawValue> {
        match self.driver.attribute_value(self.handle, key.name) {
            Ok(raw) => {
                if !raw.matches(key.origin) {
                    log::error!(
                        "attribute `{}`: expected {:?}, got {:?}",
                        key.name,
                        key.origin,
                        raw.kind()
                    );
                    return None;
                }
                Some(raw)
            }
            Err(status) if status.is_absent() => {
                log::debug!("attribute `{}` absent: {status}", key.name);
                None
            }
            Err(status) => {
                log::error!("reading attribute `{}` failed: {status}", key.name);
                None
            }
        }
    }

    /// Optional read: never fails the caller.
    ///
    /// Returns `None` when the attribute is absent, when the raw value's kind
    /// does not match the key's declared origin, when conversion fails, and
    /// when the native call fails outright (logged).
    pub fn read<T>(&self, key: &AttributeKey<T>) -> Option<T> {
        self.fetch_raw(key).and_then(|raw| (key.convert)(raw))
    }

    /// Required read: a non-absent failure status is an explicit error; an
    /// absent or unconvertible value substitutes the key's default silently,
    /// or raises the logic error when no default exists.
    pub fn read_required<T: Clone>(&self, key: &AttributeKey<T>) -> Result<T, AxError> {
        let converted = match self.driver.attribute_value(self.handle, key.name) {
            Ok(raw) => {
                if raw.matches(key.origin) {
                    (key.convert)(raw)
                } else {
                    log::error!(
                        "attribute `{}`: expected {:?}, got {:?}",
                        key.name,
                        key.origin,
                        raw.kind()
                    );
                    None
                }
            }
            Err(status) if status.is_absent() => None,
            Err(status) => return Err(AxError::native(key.name, status)),
        };

        match converted {
            Some(value) => Ok(value),
            None => match &key.default {
                Some(default) => Ok(default.clone()),
                None => Err(AxError::MissingAttribute(key.name)),
            },
        }
    }

    /// Required read for sequence-typed targets: an absent attribute yields
    /// an empty vector rather than an error.
    ///
    /// This deliberately cannot distinguish "attribute absent" from
    /// "attribute present but empty"; callers that need the distinction can
    /// use [`Element::read`] with the same key.
    pub fn read_required_list<T>(&self, key: &AttributeKey<Vec<T>>) -> Result<Vec<T>, AxError> {
        match self.driver.attribute_value(self.handle, key.name) {
            Ok(raw) => {
                if !raw.matches(key.origin) {
                    log::error!(
                        "attribute `{}`: expected {:?}, got {:?}",
                        key.name,
                        key.origin,
                        raw.kind()
                    );
                    return Ok(Vec::new());
                }
                Ok((key.convert)(raw).unwrap_or_default())
            }
            Err(status) if status.is_absent() => Ok(Vec::new()),
            Err(status) => Err(AxError::native(key.name, status)),
        }
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Names of every attribute the node declares.  Absent yields empty.
    pub fn attributes(&self) -> Result<Vec<String>, AxError> {
        match self.driver.attribute_names(self.handle) {
            Ok(names) => Ok(names),
            Err(status) if status.is_absent() => Ok(Vec::new()),
            Err(status) => Err(AxError::native("attribute names", status)),
        }
    }

    /// Process id of the owning application, if the service can resolve it.
    pub fn process_id(&self) -> Option<u32> {
        self.driver.process_id(self.handle)
    }

    // -----------------------------------------------------------------------
    // Typed accessors
    // -----------------------------------------------------------------------

    pub fn enabled(&self) -> Result<bool, AxError> {
        self.read_required(&keys::ENABLED)
    }

    pub fn hidden(&self) -> Result<bool, AxError> {
        self.read_required(&keys::HIDDEN)
    }

    pub fn focused(&self) -> Result<bool, AxError> {
        self.read_required(&keys::FOCUSED)
    }

    pub fn title(&self) -> Option<String> {
        self.read(&keys::TITLE)
    }

    pub fn description(&self) -> Option<String> {
        self.read(&keys::DESCRIPTION)
    }

    pub fn help(&self) -> Option<String> {
        self.read(&keys::HELP)
    }

    pub fn identifier(&self) -> Option<String> {
        self.read(&keys::IDENTIFIER)
    }

    pub fn label(&self) -> Option<String> {
        self.read(&keys::LABEL)
    }

    pub fn role_description(&self) -> Option<String> {
        self.read(&keys::ROLE_DESCRIPTION)
    }

    pub fn value_description(&self) -> Option<String> {
        self.read(&keys::VALUE_DESCRIPTION)
    }

    /// Role of the node.  Classification always succeeds: unknown identifiers
    /// and failed reads both degrade to [`Role::Unknown`].
    pub fn role(&self) -> Role {
        match self.read_required(&keys::ROLE) {
            Ok(role) => role,
            Err(err) => {
                log::error!("reading role failed: {err}");
                Role::Unknown
            }
        }
    }

    pub fn subrole(&self) -> Result<Subrole, AxError> {
        self.read_required(&keys::SUBROLE)
    }

    pub fn position(&self) -> Option<Point> {
        self.read(&keys::POSITION)
    }

    pub fn size(&self) -> Option<Size> {
        self.read(&keys::SIZE)
    }

    pub fn frame(&self) -> Option<Rect> {
        self.read(&keys::FRAME)
    }

    pub fn value(&self) -> Option<RawValue> {
        self.read(&keys::VALUE)
    }

    pub fn allowed_values(&self) -> Result<Vec<RawValue>, AxError> {
        self.read_required_list(&keys::ALLOWED_VALUES)
    }

    /// Write the value attribute.  Every failure mode collapses into `false`;
    /// no cause is reported at this layer.
    pub fn set_value(&self, value: &str) -> bool {
        self.driver
            .set_attribute(self.handle, keys::VALUE.name, RawValue::string(value))
            .is_success()
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Children of this node, in the order the service returns them.  A live
    /// query: every call re-issues the underlying fetch.
    pub fn children(&self) -> Result<Vec<Element>, AxError> {
        Ok(self
            .read_required_list(&keys::CHILDREN)?
            .into_iter()
            .map(|handle| self.with_handle(handle))
            .collect())
    }

    /// Windows of this node (meaningful on application-level nodes).
    pub fn windows(&self) -> Result<Vec<Element>, AxError> {
        Ok(self
            .read_required_list(&keys::WINDOWS)?
            .into_iter()
            .map(|handle| self.with_handle(handle))
            .collect())
    }

    pub fn parent(&self) -> Result<Element, AxError> {
        self.read_required(&keys::PARENT)
            .map(|handle| self.with_handle(handle))
    }

    pub fn focused_element(&self) -> Option<Element> {
        self.read(&keys::FOCUSED_ELEMENT)
            .map(|handle| self.with_handle(handle))
    }

    pub fn top_level_element(&self) -> Option<Element> {
        self.read(&keys::TOP_LEVEL_ELEMENT)
            .map(|handle| self.with_handle(handle))
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle && Arc::ptr_eq(&self.driver, &other.driver)
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.handle).finish()
    }
}
