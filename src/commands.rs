//! Command implementations for the hostparam CLI.
//!
//! Each convergence pass walks the same path: check the host precondition,
//! read the observed state, run the decision procedure, apply the decided
//! action unless running in check mode, and report.

use log::debug;

use crate::models::{Action, Decision, DesiredState, Intent, ObservedState, Report};
use crate::reconcile::decide;
use crate::store::{ParamStore, StoreConfig};
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

impl Output for Report {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        match &self.msg {
            Some(msg) => format!("changed={} {}", self.changed, msg),
            None => format!("changed={}", self.changed),
        }
    }
}

impl Output for ObservedState {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        match (&self.current_value, &self.remote_id) {
            (Some(value), Some(id)) => format!("value={} (id {})", value, id),
            _ => "absent".to_string(),
        }
    }
}

/// Run one convergence pass for the given desired state.
///
/// With `check_mode` set, the decision is computed and reported but no write
/// is issued.
pub fn converge(config: &StoreConfig, desired: &DesiredState, check_mode: bool) -> Result<Report> {
    if desired.intent == Intent::Present && desired.value.is_none() {
        return Err(Error::MissingValue);
    }

    let store = ParamStore::new(config)?;
    ensure_host(&store, &desired.host)?;

    let observed = store.read_param(&desired.host, &desired.param)?;
    let decision = decide(desired, &observed);
    debug!(
        "decided {} for {}/{} (changed={})",
        decision.action, desired.host, desired.param, decision.changed
    );

    if decision.changed && !check_mode {
        apply(&store, desired, &observed, decision)?;
    }

    Ok(Report {
        changed: decision.changed,
        failed: false,
        action: decision.action,
        msg: Some(summary(desired, decision, check_mode)),
    })
}

/// Read and return the observed state of a parameter without converging it.
pub fn observe(config: &StoreConfig, host: &str, param: &str) -> Result<ObservedState> {
    let store = ParamStore::new(config)?;
    ensure_host(&store, host)?;
    store.read_param(host, param)
}

/// Fail fast when the target host is missing or the credentials are
/// rejected; no parameter operation is meaningful past this point.
fn ensure_host(store: &ParamStore, host: &str) -> Result<()> {
    let check = store.check_host(host)?;
    if !check.authenticated {
        return Err(Error::AuthRejected);
    }
    if !check.found {
        return Err(Error::HostNotFound(host.to_string()));
    }
    Ok(())
}

fn apply(
    store: &ParamStore,
    desired: &DesiredState,
    observed: &ObservedState,
    decision: Decision,
) -> Result<()> {
    match decision.action {
        Action::Create => {
            let value = desired.value.as_deref().ok_or(Error::MissingValue)?;
            store.create_param(&desired.host, &desired.param, value)
        }
        Action::Update => {
            let value = desired.value.as_deref().ok_or(Error::MissingValue)?;
            // An existing parameter always carries its store id; losing it
            // between read and decide would be a bug in this crate.
            debug_assert!(observed.remote_id.is_some());
            let id = observed
                .remote_id
                .as_deref()
                .ok_or_else(|| Error::Other("update decided without a remote id".to_string()))?;
            store.update_param(&desired.host, id, value)
        }
        Action::Delete => store.delete_param(&desired.host, &desired.param),
        Action::NoOp => Ok(()),
    }
}

fn summary(desired: &DesiredState, decision: Decision, check_mode: bool) -> String {
    let verb = match (decision.action, check_mode) {
        (Action::Create, false) => "created",
        (Action::Create, true) => "would be created",
        (Action::Update, false) => "updated",
        (Action::Update, true) => "would be updated",
        (Action::Delete, false) => "deleted",
        (Action::Delete, true) => "would be deleted",
        (Action::NoOp, _) => "already converged",
    };
    format!("parameter {} {}", desired.param, verb)
}
