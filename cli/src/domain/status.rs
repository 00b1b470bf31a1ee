//! Lifecycle state machine.
//!
//! `next_status` is the single source of truth for which status an operation
//! leads to. `Restart` is not in the table: it is `Stop` then `Start`, composed
//! by the entity.
//!
//! Note the asymmetry: `Stop` from `Starting` succeeds while `Start` from
//! `Starting` is refused, and `Start` from `Stopping` succeeds. In-flight
//! markers block a duplicate request in the same direction but never block
//! recovery.

use applife_common::{AppStatus, Operation};

use crate::domain::error::TransitionError;

/// Status reached by applying `op` to an application in `current`.
///
/// # Errors
///
/// Returns the [`TransitionError`] describing why the transition is refused.
pub fn next_status(current: AppStatus, op: &Operation) -> Result<AppStatus, TransitionError> {
    use AppStatus::{Deploying, Error, Maintenance, Running, Starting, Stopped, Stopping};

    let not_allowed = || TransitionError::NotAllowed {
        operation: op.verb(),
        status: current,
    };

    match (op, current) {
        (Operation::Start, Stopped | Error | Stopping) => Ok(Running),
        (Operation::Start, Running) => Err(TransitionError::AlreadyRunning),
        (Operation::Start, Starting) => Err(TransitionError::AlreadyStarting),
        (Operation::Start, Maintenance | Deploying) => Err(not_allowed()),

        (Operation::Stop, Running | Starting | Error) => Ok(Stopped),
        (Operation::Stop, Stopped) => Err(TransitionError::AlreadyStopped),
        (Operation::Stop, Stopping) => Err(TransitionError::AlreadyStopping),
        (Operation::Stop, Maintenance | Deploying) => Err(not_allowed()),

        (Operation::BeginStart, Stopped | Error) => Ok(Starting),
        (Operation::BeginStart, Running) => Err(TransitionError::AlreadyRunning),
        (Operation::BeginStart, Starting) => Err(TransitionError::AlreadyStarting),
        (Operation::BeginStart, Stopping | Maintenance | Deploying) => Err(not_allowed()),

        (Operation::BeginStop, Running | Starting) => Ok(Stopping),
        (Operation::BeginStop, Stopped) => Err(TransitionError::AlreadyStopped),
        (Operation::BeginStop, Stopping) => Err(TransitionError::AlreadyStopping),
        (Operation::BeginStop, Error | Maintenance | Deploying) => Err(not_allowed()),

        (Operation::Fail { .. }, Maintenance) => Err(not_allowed()),
        (Operation::Fail { .. }, _) => Ok(Error),

        (Operation::EnterMaintenance, Stopped | Error) => Ok(Maintenance),
        (Operation::EnterMaintenance, _) => Err(not_allowed()),

        (Operation::ExitMaintenance, Maintenance) => Ok(Stopped),
        (Operation::ExitMaintenance, _) => Err(not_allowed()),

        (Operation::BeginDeploy, Stopped) => Ok(Deploying),
        (Operation::BeginDeploy, _) => Err(not_allowed()),

        (Operation::FinishDeploy { success: true }, Deploying) => Ok(Stopped),
        (Operation::FinishDeploy { success: false }, Deploying) => Ok(Error),
        (Operation::FinishDeploy { .. }, _) => Err(not_allowed()),

        (Operation::Restart, _) => {
            let stopped = next_status(current, &Operation::Stop)?;
            next_status(stopped, &Operation::Start)
        }
    }
}

/// `true` when `start` would be accepted from `status`.
#[must_use]
pub fn can_start(status: AppStatus) -> bool {
    next_status(status, &Operation::Start).is_ok()
}

/// `true` when `stop` would be accepted from `status`.
#[must_use]
pub fn can_stop(status: AppStatus) -> bool {
    next_status(status, &Operation::Stop).is_ok()
}

/// `true` when `restart` would be accepted from `status`.
#[must_use]
pub fn can_restart(status: AppStatus) -> bool {
    next_status(status, &Operation::Restart).is_ok()
}
