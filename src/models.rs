//! Data models for hostparam.
//!
//! This module defines the core data structures:
//! - `DesiredState` - The caller's declaration of what the parameter should be
//! - `ObservedState` - The parameter's actual state as read from the store
//! - `HostCheck` - Existence/authentication precondition for the target host
//! - `Decision` - Output of the reconciliation decision procedure
//! - `Report` - Caller-facing result of one convergence pass

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the parameter should exist on the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    #[default]
    Present,
    Absent,
}

/// The caller's declared desired state for one parameter on one host.
#[derive(Debug, Clone)]
pub struct DesiredState {
    /// Host (FQDN) carrying the parameter
    pub host: String,

    /// Parameter name
    pub param: String,

    /// Desired value; required when `intent` is `Present`
    pub value: Option<String>,

    /// Should the parameter exist or not
    pub intent: Intent,
}

/// The parameter's state as read from the store at the start of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObservedState {
    /// Whether the parameter is currently set on the host
    pub exists: bool,

    /// Current value, when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,

    /// Store-assigned identifier; needed to address update requests.
    /// Only populated when `exists` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

impl ObservedState {
    /// The steady-state observation for a parameter that has never been set.
    pub fn absent() -> Self {
        Self::default()
    }
}

/// Precondition gate: the target host record must exist and the caller must
/// be authenticated before any parameter operation is attempted.
#[derive(Debug, Clone, Copy)]
pub struct HostCheck {
    pub found: bool,
    pub authenticated: bool,
}

/// The minimal change that reconciles observed state with desired state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Delete,
    NoOp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
            Action::NoOp => write!(f, "no-op"),
        }
    }
}

/// Pure output of the decision procedure.
///
/// Invariant: `action == NoOp` exactly when `changed == false`. Dry-run
/// suppression happens downstream and does not alter the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub changed: bool,
}

/// Caller-facing result of one convergence pass.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Whether observed state diverged from desired state
    pub changed: bool,

    /// Whether the run failed (write rejected, precondition unmet, ...)
    pub failed: bool,

    /// The action the decision procedure selected
    pub action: Action,

    /// Human-oriented summary of what happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl Report {
    /// A failure report. Never claims a change: a rejected write reports
    /// `changed = false` regardless of what the decision was.
    pub fn failure(msg: String) -> Self {
        Self {
            changed: false,
            failed: true,
            action: Action::NoOp,
            msg: Some(msg),
        }
    }
}
