//! `axbridge_core` -- typed adapter over an accessibility object graph.
//!
//! The host operating system exposes a target application's UI as a graph of
//! untyped node handles whose attributes are fetched by string name and
//! arrive as loosely-typed values.  This crate wraps that surface in a typed
//! API: attribute keys with declared shapes and conversions, an element
//! wrapper with typed accessors and live tree navigation, guarded
//! depth-first search and diagnostic traversal, and a closed action catalog.
//!
//! The native service itself is consumed behind the
//! [`AccessibilityDriver`](driver::AccessibilityDriver) trait and is not
//! reimplemented here; the in-memory [`replay`] driver backs tests and the
//! diagnostic CLI tools.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `AxError` / `AxStatus` via `thiserror` |
//! | [`driver`] | The driver trait and opaque node tokens |
//! | [`value`] | Closed `RawValue` enum with `RawKind` shape tags |
//! | [`geometry`] | `Point` / `Size` / `Rect` value types |
//! | [`attribute`] | `AttributeKey` descriptors and the `keys` catalog |
//! | [`element`] | `Element` wrapper with typed accessors |
//! | [`role`] | `Role` / `Subrole` closed classifications |
//! | [`action`] | `Action` catalog: listing, invocation, descriptions |
//! | [`tree`] | Guarded pre-order `find` / `visit` walks |
//! | [`snapshot`] | Owned serializable subtree captures |
//! | [`application`] | Process resolution to root elements |
//! | [`replay`] | Scripted in-memory driver and JSON fixtures |

pub mod action;
pub mod application;
pub mod attribute;
pub mod driver;
pub mod element;
pub mod errors;
pub mod geometry;
pub mod replay;
pub mod role;
pub mod snapshot;
pub mod tree;
pub mod value;

pub use action::Action;
pub use application::Application;
pub use attribute::{keys, AttributeKey};
pub use driver::{AccessibilityDriver, NodeId};
pub use element::Element;
pub use errors::{AxError, AxStatus};
pub use geometry::{Point, Rect, Size};
pub use replay::{FixtureDocument, FixtureNode, NodeSpec, ReplayDriver};
pub use role::{Role, Subrole};
pub use snapshot::{capture, ElementSnapshot};
pub use tree::{find, visit, VisitReport, WalkConfig};
pub use value::{Geometry, RawKind, RawValue};
