//! Error types for `axbridge_core`.
//!
//! All Rust-side failures are funnelled through [`AxError`], which uses
//! `thiserror` for `Display` and `Error` derives.  [`AxStatus`] mirrors the
//! status codes of the native accessibility protocol and is what drivers
//! speak; the adapter decides which statuses are errors and which merely mean
//! "the attribute is not there".

use std::fmt;

use thiserror::Error;

/// Status codes reported by the native accessibility service.
///
/// Modeled on the closed status set of the underlying protocol.  Drivers must
/// map their platform's codes onto these; anything without a better match
/// becomes [`AxStatus::Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxStatus {
    Success,
    /// The attribute exists but currently has no value.
    NoValue,
    /// The node does not support the requested attribute.
    AttributeUnsupported,
    /// The node does not support the requested action.
    ActionUnsupported,
    /// The handle no longer refers to a live node.
    InvalidHandle,
    /// The target application did not respond or the request was dropped.
    CannotComplete,
    /// The target application does not implement the accessibility protocol
    /// for this request.
    NotImplemented,
    /// Accessibility access is disabled for this client.
    ApiDisabled,
    /// Any other non-success status.
    Failure,
}

impl AxStatus {
    /// Whether the native call succeeded.
    pub fn is_success(self) -> bool {
        self == AxStatus::Success
    }

    /// Statuses meaning "there is nothing here" rather than "the call failed".
    ///
    /// These degrade to `None`/empty/default in the adapter and are never
    /// surfaced as errors.
    pub fn is_absent(self) -> bool {
        matches!(
            self,
            AxStatus::NoValue | AxStatus::AttributeUnsupported | AxStatus::ActionUnsupported
        )
    }
}

impl fmt::Display for AxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AxStatus::Success => "success",
            AxStatus::NoValue => "no value",
            AxStatus::AttributeUnsupported => "attribute unsupported",
            AxStatus::ActionUnsupported => "action unsupported",
            AxStatus::InvalidHandle => "invalid handle",
            AxStatus::CannotComplete => "cannot complete",
            AxStatus::NotImplemented => "not implemented",
            AxStatus::ApiDisabled => "accessibility API disabled",
            AxStatus::Failure => "failure",
        };
        f.write_str(text)
    }
}

/// Top-level error type for the `axbridge_core` library.
#[derive(Debug, Error)]
pub enum AxError {
    /// The native service reported a non-success, non-absent status.
    #[error("native call for `{name}` failed: {status}")]
    Native { name: String, status: AxStatus },

    /// A required attribute with no declared default produced no value.
    ///
    /// This is a contract violation in the caller: code expected a mandatory
    /// attribute that the target does not provide.
    #[error("missing required attribute `{0}`")]
    MissingAttribute(&'static str),

    /// A replay fixture could not be parsed or is internally inconsistent.
    #[error("fixture error: {0}")]
    Fixture(String),
}

impl AxError {
    pub(crate) fn native(name: impl Into<String>, status: AxStatus) -> Self {
        AxError::Native {
            name: name.into(),
            status,
        }
    }
}
