//! Application service: in-process registry of live applications.
//!
//! Imports only from `crate::domain`, `crate::application::ports` and the
//! handler. The registry is an explicitly constructed value; there is no
//! process-wide instance.
//!
//! Transitions are read-modify-write with a compare-and-swap on the stored
//! revision's `version`: the handler runs without any lock held, and the write
//! is rejected when another caller committed in between.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use applife_common::{CreateAppRequest, Operation, RegistryConfig};

use crate::application::ports::{Clock, IdGenerator};
use crate::application::services::handler::ApplicationHandler;
use crate::domain::{AppId, Application, Metrics, Outcome, RegistryError};

/// Keyed store mapping application id to its current revision.
pub struct ApplicationRegistry<G, C> {
    handler: ApplicationHandler<G, C>,
    config: RegistryConfig,
    apps: RwLock<HashMap<AppId, Application>>,
}

impl<G: IdGenerator, C: Clock> ApplicationRegistry<G, C> {
    pub fn new(handler: ApplicationHandler<G, C>, config: RegistryConfig) -> Self {
        Self {
            handler,
            config,
            apps: RwLock::new(HashMap::new()),
        }
    }

    /// Validate and register a new application.
    ///
    /// Fails when a field is invalid, the name is already taken by a live
    /// application, or `max_applications` is reached.
    pub fn create_app(&self, request: &CreateAppRequest) -> Outcome<Application> {
        self.handler
            .create_from(request)
            .flat_map(|app| self.insert(app))
    }

    pub fn get_app(&self, id: &AppId) -> Outcome<Application> {
        match self.read().get(id) {
            Some(app) => Outcome::ok(app.clone()),
            None => Outcome::from_error(RegistryError::NotFound(id.to_string())),
        }
    }

    /// Look an application up by its (unique) name.
    pub fn find_by_name(&self, name: &str) -> Outcome<Application> {
        match self.read().values().find(|app| app.name() == name) {
            Some(app) => Outcome::ok(app.clone()),
            None => Outcome::from_error(RegistryError::NotFound(name.to_string())),
        }
    }

    /// Snapshot of every application, oldest first.
    ///
    /// The returned vector is a copy; changing it never touches the registry.
    pub fn list_apps(&self) -> Outcome<Vec<Application>> {
        let mut apps: Vec<Application> = self.read().values().cloned().collect();
        apps.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Outcome::ok(apps)
    }

    pub fn start_app(&self, id: &AppId) -> Outcome<Application> {
        self.apply_app(id, &Operation::Start)
    }

    pub fn stop_app(&self, id: &AppId) -> Outcome<Application> {
        self.apply_app(id, &Operation::Stop)
    }

    pub fn restart_app(&self, id: &AppId) -> Outcome<Application> {
        self.apply_app(id, &Operation::Restart)
    }

    /// Fetch the current revision, run `op` through the handler, and store the
    /// result only on success.
    pub fn apply_app(&self, id: &AppId, op: &Operation) -> Outcome<Application> {
        self.get_app(id).flat_map(|current| {
            let expected = current.version();
            self.handler
                .apply(&current, op)
                .flat_map(|next| self.commit(id, expected, next))
        })
    }

    /// Merge `metrics` into the stored revision.
    pub fn update_metrics(&self, id: &AppId, metrics: Metrics) -> Outcome<Application> {
        self.get_app(id).flat_map(|current| {
            let expected = current.version();
            self.handler
                .update_metrics(&current, metrics)
                .flat_map(|next| self.commit(id, expected, next))
        })
    }

    /// Remove an application, returning its last revision.
    pub fn delete_app(&self, id: &AppId) -> Outcome<Application> {
        match self.write().remove(id) {
            Some(app) => {
                self.handler.release_id(&app);
                tracing::info!(app = %id, name = app.name(), "application deleted");
                Outcome::ok(app)
            }
            None => Outcome::from_error(RegistryError::NotFound(id.to_string())),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn insert(&self, app: Application) -> Outcome<Application> {
        let mut apps = self.write();
        if !self.config.has_capacity_for(apps.len()) {
            let limit = self.config.max_applications.unwrap_or(apps.len());
            tracing::warn!(name = app.name(), limit, "registry is full");
            return Outcome::from_error(RegistryError::CapacityReached { limit });
        }
        if apps.contains_key(app.id()) {
            tracing::error!(app = %app.id(), name = app.name(), "id generator repeated an id");
            return Outcome::from_error(RegistryError::DuplicateId(app.id().to_string()));
        }
        if apps.values().any(|existing| existing.name() == app.name()) {
            tracing::warn!(name = app.name(), "duplicate application name");
            return Outcome::from_error(RegistryError::DuplicateName(app.name().to_string()));
        }
        tracing::info!(app = %app.id(), name = app.name(), url = %app.url(), "application registered");
        apps.insert(app.id().clone(), app.clone());
        Outcome::ok(app)
    }

    /// Store `next` only if the stored revision is still `expected`.
    fn commit(&self, id: &AppId, expected: u64, next: Application) -> Outcome<Application> {
        let mut apps = self.write();
        let Some(stored) = apps.get_mut(id) else {
            return Outcome::from_error(RegistryError::NotFound(id.to_string()));
        };
        if stored.version() != expected {
            tracing::warn!(
                app = %id,
                expected,
                found = stored.version(),
                "concurrent modification detected"
            );
            return Outcome::from_error(RegistryError::ConcurrentModification { id: id.to_string() });
        }
        tracing::info!(app = %id, status = %next.status(), version = next.version(), "revision stored");
        *stored = next.clone();
        Outcome::ok(next)
    }

    // The map only ever holds whole revisions, so a panic while a guard was
    // held cannot leave it half-updated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<AppId, Application>> {
        self.apps.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<AppId, Application>> {
        self.apps.write().unwrap_or_else(PoisonError::into_inner)
    }
}
