//! Application service: command layer for create / start / stop.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Every public operation returns an [`Outcome`]; nothing escapes as a panic.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use applife_common::{CreateAppRequest, Operation};

use crate::application::ports::{Clock, IdGenerator};
use crate::domain::validate::{validate_fields, validate_host, validate_name, validate_port};
use crate::domain::{Application, Failure, FailureKind, Metrics, Outcome, ValidationError};

/// Validates preconditions and drives entity transitions on behalf of callers.
///
/// Field rules are checked here before an entity is built, and business rules
/// are re-checked on the entity before any transition, so an entity
/// deserialized from elsewhere never reaches a transition unchecked.
pub struct ApplicationHandler<G, C> {
    ids: G,
    clock: C,
}

impl<G: IdGenerator, C: Clock> ApplicationHandler<G, C> {
    pub fn new(ids: G, clock: C) -> Self {
        Self { ids, clock }
    }

    /// Validate the fields and build a new `STOPPED` application.
    ///
    /// The failure message lists every violated field, e.g.
    /// `"name cannot be empty; Port must be between 1 and 65535 (got 0)"`.
    pub fn create(&self, name: &str, port: i64, host: &str) -> Outcome<Application> {
        guarded("create", || {
            if let Err(err) = validate_fields(name, host, port) {
                tracing::warn!(name, host, port, reason = %err, "create rejected");
                return Outcome::from_error(err);
            }
            let id = match self.ids.next_id() {
                Ok(id) => id,
                Err(err) => return Outcome::Failure(Failure::internal(format!("{err:#}"))),
            };
            let outcome = Outcome::from(Application::new(id, name, host, port, self.clock.now()));
            if let Some(app) = outcome.value() {
                tracing::debug!(app = %app.id(), name, host, port, "application created");
            }
            outcome
        })
    }

    /// Like [`ApplicationHandler::create`] but from a wire request, reporting
    /// missing fields by name alongside invalid ones.
    pub fn create_from(&self, request: &CreateAppRequest) -> Outcome<Application> {
        let mut errors = Vec::new();
        match request.name.as_deref() {
            None => errors.push(ValidationError::MissingField("name")),
            Some(name) => errors.extend(validate_name(name).err()),
        }
        match request.host.as_deref() {
            None => errors.push(ValidationError::MissingField("host")),
            Some(host) => errors.extend(validate_host(host).err()),
        }
        match request.port {
            None => errors.push(ValidationError::MissingField("port")),
            Some(port) => errors.extend(validate_port(port).err()),
        }
        if let Some(err) = ValidationError::collect(errors) {
            tracing::warn!(reason = %err, "create rejected");
            return Outcome::from_error(err);
        }
        match (&request.name, &request.host, request.port) {
            (Some(name), Some(host), Some(port)) => self.create(name, port, host),
            _ => Outcome::fail(FailureKind::Internal, "create request lost a field"),
        }
    }

    /// Return a deleted application's id to the id source.
    pub fn release_id(&self, app: &Application) {
        self.ids.release(app.id());
    }

    pub fn start(&self, app: &Application) -> Outcome<Application> {
        self.apply(app, &Operation::Start)
    }

    pub fn stop(&self, app: &Application) -> Outcome<Application> {
        self.apply(app, &Operation::Stop)
    }

    pub fn restart(&self, app: &Application) -> Outcome<Application> {
        self.apply(app, &Operation::Restart)
    }

    /// Re-check business rules, then delegate the transition to the entity.
    ///
    /// A business-rule failure is returned verbatim.
    pub fn apply(&self, app: &Application, op: &Operation) -> Outcome<Application> {
        let outcome = guarded(op.verb(), || {
            app.validate_business_rules()
                .flat_map(|()| app.apply(op, self.clock.now()))
        });
        log_transition(app, op.verb(), &outcome);
        outcome
    }

    /// Merge `metrics` into a new revision of `app`.
    pub fn update_metrics(&self, app: &Application, metrics: Metrics) -> Outcome<Application> {
        let outcome = guarded("update metrics", || {
            app.validate_business_rules()
                .flat_map(|()| app.with_metrics(metrics, self.clock.now()))
        });
        log_transition(app, "update metrics", &outcome);
        outcome
    }
}

fn log_transition(app: &Application, operation: &str, outcome: &Outcome<Application>) {
    match outcome {
        Outcome::Success(next) => tracing::debug!(
            app = %app.id(),
            operation,
            from = %app.status(),
            to = %next.status(),
            version = next.version(),
            "transition accepted"
        ),
        Outcome::Failure(failure) => tracing::warn!(
            app = %app.id(),
            operation,
            status = %app.status(),
            reason = %failure,
            "transition rejected"
        ),
    }
}

/// Run `f`, converting a panic into an internal failure carrying its message.
fn guarded<T>(operation: &str, f: impl FnOnce() -> Outcome<T>) -> Outcome<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(operation, %message, "internal error converted to failure");
            Outcome::Failure(Failure::internal(message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown internal error".to_string())
}
