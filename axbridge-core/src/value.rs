//! The closed set of dynamic values the native protocol can deliver.
//!
//! Raw attribute values arrive untyped from the service.  [`RawValue`] is the
//! adapter's rendition of that dynamic surface: a small closed enum, one
//! variant per value shape the protocol actually uses, each tagged by a
//! [`RawKind`] so attribute keys can declare the shape they expect and reject
//! anything else before conversion.
//!
//! Geometric values are boxed: the service wraps points, sizes and rectangles
//! in a single opaque container and the consumer unpacks the kind it asked
//! for.  [`Geometry`] models that container.

use serde::{Deserialize, Serialize};

use crate::driver::NodeId;
use crate::geometry::{Point, Rect, Size};

/// A boxed geometric value, as delivered by geometry-typed attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    Size(Size),
    Rect(Rect),
}

/// One untyped value from the native service.
///
/// Numbers carry both numeric attributes and boolean-ish flags (the protocol
/// reports booleans as numbers).  `Array` is the heterogeneous escape hatch
/// used by attributes such as the allowed-values list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Number(f64),
    String(String),
    Geometry(Geometry),
    Handle(NodeId),
    HandleList(Vec<NodeId>),
    Array(Vec<RawValue>),
}

/// Shape tag for [`RawValue`], used as the declared origin type of an
/// attribute key.
///
/// `Any` matches every shape; it exists for the generic value attribute whose
/// payload type depends on the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawKind {
    Number,
    String,
    Geometry,
    Handle,
    HandleList,
    Array,
    Any,
}

impl RawValue {
    pub fn kind(&self) -> RawKind {
        match self {
            RawValue::Number(_) => RawKind::Number,
            RawValue::String(_) => RawKind::String,
            RawValue::Geometry(_) => RawKind::Geometry,
            RawValue::Handle(_) => RawKind::Handle,
            RawValue::HandleList(_) => RawKind::HandleList,
            RawValue::Array(_) => RawKind::Array,
        }
    }

    /// Whether this value satisfies the declared origin kind.
    pub fn matches(&self, kind: RawKind) -> bool {
        kind == RawKind::Any || self.kind() == kind
    }

    /// Convenience constructor for boolean-ish flags.
    pub fn flag(value: bool) -> Self {
        RawValue::Number(if value { 1.0 } else { 0.0 })
    }

    pub fn string(value: impl Into<String>) -> Self {
        RawValue::String(value.into())
    }
}
