//! The reconciliation decision procedure.
//!
//! A pure function over the desired and observed states. No network
//! dependency, so the full decision table is unit-testable in isolation;
//! executing the decided action is the store's job.

use crate::models::{Action, Decision, DesiredState, Intent, ObservedState};

/// Decide the minimal change that reconciles `observed` with `desired`.
///
/// The table, evaluated in order:
///
/// | intent  | exists | values match | action | changed |
/// |---------|--------|--------------|--------|---------|
/// | absent  | no     | -            | NoOp   | false   |
/// | absent  | yes    | -            | Delete | true    |
/// | present | no     | -            | Create | true    |
/// | present | yes    | yes          | NoOp   | false   |
/// | present | yes    | no           | Update | true    |
///
/// Values are compared by string equality.
pub fn decide(desired: &DesiredState, observed: &ObservedState) -> Decision {
    let decision = match (desired.intent, observed.exists) {
        (Intent::Absent, false) => Decision {
            action: Action::NoOp,
            changed: false,
        },
        (Intent::Absent, true) => Decision {
            action: Action::Delete,
            changed: true,
        },
        (Intent::Present, false) => Decision {
            action: Action::Create,
            changed: true,
        },
        (Intent::Present, true) => {
            if observed.current_value == desired.value {
                Decision {
                    action: Action::NoOp,
                    changed: false,
                }
            } else {
                Decision {
                    action: Action::Update,
                    changed: true,
                }
            }
        }
    };

    debug_assert_eq!(decision.action == Action::NoOp, !decision.changed);
    decision
}
