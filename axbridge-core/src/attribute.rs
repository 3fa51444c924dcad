//! The attribute-key/conversion framework.
//!
//! An [`AttributeKey`] binds one raw attribute name to the raw-value shape it
//! is expected to arrive as, a partial conversion into the typed result, and
//! an optional default used on the required read path.  Keys are process-wide
//! constants with no mutable state; the whole catalog lives in [`keys`].
//!
//! The fallback policy -- what happens when the attribute is absent, the
//! shape is wrong, or conversion fails -- is implemented by the read methods
//! on [`Element`](crate::element::Element), not here.  Keys only describe.

use crate::driver::NodeId;
use crate::geometry::{Point, Rect, Size};
use crate::role::{Role, Subrole};
use crate::value::{Geometry, RawKind, RawValue};

/// Typed descriptor for one attribute of the native protocol.
///
/// `origin` is checked against the fetched value's kind before `convert` is
/// applied, so conversions may assume the matching variant in the common
/// case but must still fail gracefully (return `None`) on anything else.
pub struct AttributeKey<T: 'static> {
    /// Attribute name in the native protocol.
    pub name: &'static str,
    /// Expected shape of the raw value.
    pub origin: RawKind,
    /// Partial conversion from the raw value to the typed result.
    pub convert: fn(RawValue) -> Option<T>,
    /// Substituted when the required read path finds nothing.
    pub default: Option<T>,
}

fn truthy(raw: RawValue) -> Option<bool> {
    match raw {
        RawValue::Number(n) => Some(n != 0.0),
        _ => None,
    }
}

fn string(raw: RawValue) -> Option<String> {
    match raw {
        RawValue::String(s) => Some(s),
        _ => None,
    }
}

// Geometry extraction: the origin kind already guarantees a boxed geometry
// value, so receiving the wrong boxed kind is a programmer-visible contract
// violation, not a data condition.

fn point(raw: RawValue) -> Option<Point> {
    match raw {
        RawValue::Geometry(Geometry::Point(p)) => Some(p),
        RawValue::Geometry(other) => {
            debug_assert!(false, "expected boxed point, got {other:?}");
            None
        }
        _ => None,
    }
}

fn size(raw: RawValue) -> Option<Size> {
    match raw {
        RawValue::Geometry(Geometry::Size(s)) => Some(s),
        RawValue::Geometry(other) => {
            debug_assert!(false, "expected boxed size, got {other:?}");
            None
        }
        _ => None,
    }
}

fn rect(raw: RawValue) -> Option<Rect> {
    match raw {
        RawValue::Geometry(Geometry::Rect(r)) => Some(r),
        RawValue::Geometry(other) => {
            debug_assert!(false, "expected boxed rect, got {other:?}");
            None
        }
        _ => None,
    }
}

fn handle(raw: RawValue) -> Option<NodeId> {
    match raw {
        RawValue::Handle(h) => Some(h),
        _ => None,
    }
}

fn handle_list(raw: RawValue) -> Option<Vec<NodeId>> {
    match raw {
        RawValue::HandleList(hs) => Some(hs),
        _ => None,
    }
}

fn array(raw: RawValue) -> Option<Vec<RawValue>> {
    match raw {
        RawValue::Array(values) => Some(values),
        _ => None,
    }
}

fn any(raw: RawValue) -> Option<RawValue> {
    Some(raw)
}

/// Classification must always succeed: unrecognized identifiers degrade to
/// the `Unknown` sentinel with a logged warning instead of failing the read.
fn role(raw: RawValue) -> Option<Role> {
    match raw {
        RawValue::String(s) => Some(Role::from_identifier(&s).unwrap_or_else(|| {
            log::warn!("unknown accessibility role: {s}");
            Role::Unknown
        })),
        _ => None,
    }
}

fn subrole(raw: RawValue) -> Option<Subrole> {
    match raw {
        RawValue::String(s) => Some(Subrole::from_identifier(&s).unwrap_or_else(|| {
            log::warn!("unknown accessibility subrole: {s}");
            Subrole::Unknown
        })),
        _ => None,
    }
}

/// The process-wide attribute catalog.
pub mod keys {
    use super::*;

    // Boolean flags arrive as numbers and convert via truthiness.

    pub const ENABLED: AttributeKey<bool> = AttributeKey {
        name: "AXEnabled",
        origin: RawKind::Number,
        convert: truthy,
        default: None,
    };

    pub const HIDDEN: AttributeKey<bool> = AttributeKey {
        name: "AXHidden",
        origin: RawKind::Number,
        convert: truthy,
        default: None,
    };

    pub const FOCUSED: AttributeKey<bool> = AttributeKey {
        name: "AXFocused",
        origin: RawKind::Number,
        convert: truthy,
        default: None,
    };

    // String attributes.

    pub const TITLE: AttributeKey<String> = AttributeKey {
        name: "AXTitle",
        origin: RawKind::String,
        convert: string,
        default: None,
    };

    pub const DESCRIPTION: AttributeKey<String> = AttributeKey {
        name: "AXDescription",
        origin: RawKind::String,
        convert: string,
        default: None,
    };

    pub const HELP: AttributeKey<String> = AttributeKey {
        name: "AXHelp",
        origin: RawKind::String,
        convert: string,
        default: None,
    };

    pub const IDENTIFIER: AttributeKey<String> = AttributeKey {
        name: "AXIdentifier",
        origin: RawKind::String,
        convert: string,
        default: None,
    };

    pub const LABEL: AttributeKey<String> = AttributeKey {
        name: "AXLabelValue",
        origin: RawKind::String,
        convert: string,
        default: None,
    };

    pub const ROLE_DESCRIPTION: AttributeKey<String> = AttributeKey {
        name: "AXRoleDescription",
        origin: RawKind::String,
        convert: string,
        default: None,
    };

    pub const VALUE_DESCRIPTION: AttributeKey<String> = AttributeKey {
        name: "AXValueDescription",
        origin: RawKind::String,
        convert: string,
        default: None,
    };

    // Classification.  ROLE carries a default: every node must classify, so
    // the required read degrades to Unknown instead of erroring.

    pub const ROLE: AttributeKey<Role> = AttributeKey {
        name: "AXRole",
        origin: RawKind::String,
        convert: role,
        default: Some(Role::Unknown),
    };

    pub const SUBROLE: AttributeKey<Subrole> = AttributeKey {
        name: "AXSubrole",
        origin: RawKind::String,
        convert: subrole,
        default: None,
    };

    // Boxed geometry.

    pub const POSITION: AttributeKey<Point> = AttributeKey {
        name: "AXPosition",
        origin: RawKind::Geometry,
        convert: point,
        default: None,
    };

    pub const SIZE: AttributeKey<Size> = AttributeKey {
        name: "AXSize",
        origin: RawKind::Geometry,
        convert: size,
        default: None,
    };

    pub const FRAME: AttributeKey<Rect> = AttributeKey {
        name: "AXFrame",
        origin: RawKind::Geometry,
        convert: rect,
        default: None,
    };

    // Handles and handle lists.  Wrapping into Elements happens in the typed
    // accessors, which have the driver in hand.

    pub const PARENT: AttributeKey<NodeId> = AttributeKey {
        name: "AXParent",
        origin: RawKind::Handle,
        convert: handle,
        default: None,
    };

    pub const FOCUSED_ELEMENT: AttributeKey<NodeId> = AttributeKey {
        name: "AXFocusedUIElement",
        origin: RawKind::Handle,
        convert: handle,
        default: None,
    };

    pub const TOP_LEVEL_ELEMENT: AttributeKey<NodeId> = AttributeKey {
        name: "AXTopLevelUIElement",
        origin: RawKind::Handle,
        convert: handle,
        default: None,
    };

    pub const CHILDREN: AttributeKey<Vec<NodeId>> = AttributeKey {
        name: "AXChildren",
        origin: RawKind::HandleList,
        convert: handle_list,
        default: None,
    };

    pub const WINDOWS: AttributeKey<Vec<NodeId>> = AttributeKey {
        name: "AXWindows",
        origin: RawKind::HandleList,
        convert: handle_list,
        default: None,
    };

    // The generic value attribute: payload shape depends on the node, so the
    // raw value passes through untouched.

    pub const VALUE: AttributeKey<RawValue> = AttributeKey {
        name: "AXValue",
        origin: RawKind::Any,
        convert: any,
        default: None,
    };

    pub const ALLOWED_VALUES: AttributeKey<Vec<RawValue>> = AttributeKey {
        name: "AXAllowedValues",
        origin: RawKind::Array,
        convert: array,
        default: None,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_conversion() {
        assert_eq!((keys::ENABLED.convert)(RawValue::Number(1.0)), Some(true));
        assert_eq!((keys::ENABLED.convert)(RawValue::Number(0.0)), Some(false));
        assert_eq!((keys::ENABLED.convert)(RawValue::string("yes")), None);
    }

    #[test]
    fn test_role_conversion_falls_back_to_unknown() {
        assert_eq!(
            (keys::ROLE.convert)(RawValue::string("AXButton")),
            Some(Role::Button)
        );
        assert_eq!(
            (keys::ROLE.convert)(RawValue::string("AXFooBar")),
            Some(Role::Unknown)
        );
        assert_eq!((keys::ROLE.convert)(RawValue::Number(3.0)), None);
    }

    #[test]
    fn test_geometry_conversions() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(
            (keys::POSITION.convert)(RawValue::Geometry(Geometry::Point(p))),
            Some(p)
        );
        let r = Rect::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(
            (keys::FRAME.convert)(RawValue::Geometry(Geometry::Rect(r))),
            Some(r)
        );
    }

    #[test]
    fn test_handle_list_conversion() {
        let raw = RawValue::HandleList(vec![NodeId(1), NodeId(2)]);
        assert_eq!(
            (keys::CHILDREN.convert)(raw),
            Some(vec![NodeId(1), NodeId(2)])
        );
        assert_eq!((keys::CHILDREN.convert)(RawValue::Number(1.0)), None);
    }

    #[test]
    fn test_value_passthrough() {
        let raw = RawValue::string("hello");
        assert_eq!((keys::VALUE.convert)(raw.clone()), Some(raw));
    }
}
