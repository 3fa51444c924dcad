//! The boundary to the native accessibility service.
//!
//! The service itself is out of scope for this crate: only its contract
//! matters.  [`AccessibilityDriver`] captures that contract as an object-safe
//! trait so the adapter can be injected with any backend -- a platform
//! binding in an embedding application, or the in-memory
//! [`ReplayDriver`](crate::replay::ReplayDriver) shipped here for tests and
//! diagnostics.
//!
//! Every method is a synchronous, blocking round trip to the target
//! application's event loop.  There is no built-in timeout: a non-responsive
//! target stalls the caller.  Drivers report raw [`AxStatus`] codes and leave
//! all fallback policy (absent vs. error, defaults) to the adapter layer.

use serde::{Deserialize, Serialize};

use crate::errors::AxStatus;
use crate::value::RawValue;

/// Opaque token for one node in the target's accessibility tree.
///
/// Tokens are driver-scoped.  A driver MUST mint the same token for the same
/// underlying node every time it hands it out: element equality and hashing
/// derive from this token, so an unstable token would make "the same node
/// fetched twice" compare unequal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

/// Contract of the native accessibility service.
///
/// Implementations must be shareable across threads; each call is an
/// independent round trip with no internal locking or caching expected of the
/// adapter.  Two attributes read "together" may reflect two different moments
/// of the target's state.
pub trait AccessibilityDriver: Send + Sync {
    /// List the attribute names the node declares.
    fn attribute_names(&self, node: NodeId) -> Result<Vec<String>, AxStatus>;

    /// Fetch one attribute value by name.
    ///
    /// Absent values are reported via [`AxStatus::NoValue`] /
    /// [`AxStatus::AttributeUnsupported`], never as a success with a dummy
    /// payload.
    fn attribute_value(&self, node: NodeId, name: &str) -> Result<RawValue, AxStatus>;

    /// Write one attribute value by name.
    fn set_attribute(&self, node: NodeId, name: &str, value: RawValue) -> AxStatus;

    /// List the action identifiers the node supports.
    fn action_names(&self, node: NodeId) -> Result<Vec<String>, AxStatus>;

    /// Invoke an action by identifier.
    ///
    /// Success means the service accepted the request; actions that trigger
    /// asynchronous behavior in the target provide no completion signal.
    fn perform_action(&self, node: NodeId, action: &str) -> AxStatus;

    /// Human-readable description of an action, if the service provides one.
    fn action_description(&self, node: NodeId, action: &str) -> Result<String, AxStatus>;

    /// Root node of the application owning the given process id.
    fn application_root(&self, pid: u32) -> Result<NodeId, AxStatus>;

    /// Process id owning the node, if the service can resolve it.
    fn process_id(&self, node: NodeId) -> Option<u32>;
}
