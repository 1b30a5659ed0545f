//! The project registry: sole owner of the project collection.
//!
//! # Contract
//!
//! - Hydrate once on construction; a missing or malformed stored value yields
//!   an empty collection and is never reported to the caller.
//! - Every mutation runs to completion in memory, then the whole collection is
//!   serialized and written under the configured key, then observers are
//!   notified. No batching, no deltas.
//! - `status` is derived from `step_current` after every update merge and wins
//!   over any status the caller passed.
//!
//! Ids are `1 + max(existing)`, not a free-running counter. Collection
//! replacement can therefore hand out an id that was used before.

use std::fmt::Write as _;

use chrono::Local;

use crate::config::{OutOfRangeStep, RegistryConfig, DEFAULT_DATE_FORMAT};
use crate::error::RegistryError;
use crate::store::KeyValueStore;
use crate::types::{Project, ProjectId, ProjectStatus, ProjectUpdate};

// ---------------------------------------------------------------------------
// 1. Observation + outcomes
// ---------------------------------------------------------------------------

/// Receives the post-change collection after every mutation.
///
/// Called after the persistence write is attempted, whether or not it
/// succeeded, so observers always match [`ProjectRegistry::projects`].
pub trait ChangeObserver {
    fn on_change(&self, projects: &[Project]);
}

impl<F> ChangeObserver for F
where
    F: Fn(&[Project]),
{
    fn on_change(&self, projects: &[Project]) {
        self(projects)
    }
}

/// Result of [`ProjectRegistry::update_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The merged, re-derived record.
    Updated(Project),
    /// No record has that id. Nothing was mutated or written.
    NotFound,
}

impl UpdateOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpdateOutcome::NotFound)
    }
}

// ---------------------------------------------------------------------------
// 2. Registry
// ---------------------------------------------------------------------------

pub struct ProjectRegistry<S: KeyValueStore> {
    store: S,
    config: RegistryConfig,
    projects: Vec<Project>,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl<S: KeyValueStore> ProjectRegistry<S> {
    /// Load the collection stored under `config.storage_key`.
    ///
    /// Falls back to an empty collection when the key is absent, the store
    /// cannot be read, or the stored value does not parse. The bad value is
    /// left in the store until the next mutation overwrites it.
    pub fn hydrate(store: S, config: RegistryConfig) -> Self {
        let key = config.storage_key.as_str();
        let projects = match store.read(key) {
            Ok(None) => {
                tracing::debug!(key, "no stored projects; starting empty");
                Vec::new()
            }
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Project>>(&raw) {
                Ok(projects) => {
                    tracing::info!(key, count = projects.len(), "hydrated projects");
                    projects
                }
                Err(err) => {
                    tracing::error!(key, error = %err, "stored projects are malformed; starting empty");
                    Vec::new()
                }
            },
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read stored projects; starting empty");
                Vec::new()
            }
        };

        Self {
            store,
            config,
            projects,
            observers: Vec::new(),
        }
    }

    /// `hydrate` with [`RegistryConfig::default`].
    pub fn with_defaults(store: S) -> Self {
        Self::hydrate(store, RegistryConfig::default())
    }

    /// Register an observer, notified after every mutation.
    pub fn subscribe(&mut self, observer: impl ChangeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The live collection, newest first.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a draft project at the front of the collection.
    ///
    /// An empty `description` is replaced by the configured placeholder. If
    /// the persistence write fails the record stays in memory and the error
    /// is returned. Fails with [`RegistryError::IdExhausted`] without
    /// inserting anything when the current max id is `u64::MAX`.
    pub fn create_project(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Project, RegistryError> {
        let id = self.next_id()?;
        let description = description.into();
        let project = Project {
            id,
            title: title.into(),
            description: if description.is_empty() {
                self.config.placeholder_description.clone()
            } else {
                description
            },
            status: ProjectStatus::Draft,
            step_current: 1,
            step_total: self.config.default_step_total,
            date: self.today(),
            image_url: self.config.placeholder_image_url.clone(),
        };

        self.projects.insert(0, project.clone());
        tracing::info!(id = %project.id, title = %project.title, "created project");
        self.persist()?;
        Ok(project)
    }

    /// Merge `update` over the project with `id`, then re-derive its status.
    ///
    /// An unknown id is not an error: it returns [`UpdateOutcome::NotFound`]
    /// without touching the collection or the store.
    pub fn update_project(
        &mut self,
        id: ProjectId,
        update: ProjectUpdate,
    ) -> Result<UpdateOutcome, RegistryError> {
        let Some(index) = self.projects.iter().position(|p| p.id == id) else {
            tracing::debug!(%id, "update for unknown project ignored");
            return Ok(UpdateOutcome::NotFound);
        };

        let mut merged = self.projects[index].clone();
        let step_supplied = update.step_current.is_some();
        update.apply_to(&mut merged);
        self.derive_status(&mut merged, step_supplied)?;

        self.projects[index] = merged.clone();
        tracing::info!(%id, step = merged.step_current, status = %merged.status, "updated project");
        self.persist()?;
        Ok(UpdateOutcome::Updated(merged))
    }

    /// Replace the whole collection. This is the only way records are removed.
    pub fn replace_all(&mut self, projects: Vec<Project>) -> Result<(), RegistryError> {
        tracing::info!(count = projects.len(), "replacing project collection");
        self.projects = projects;
        self.persist()
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn next_id(&self) -> Result<ProjectId, RegistryError> {
        let max = self.projects.iter().map(|p| p.id.0).max().unwrap_or(0);
        max.checked_add(1)
            .map(ProjectId)
            .ok_or(RegistryError::IdExhausted { max: ProjectId(max) })
    }

    fn today(&self) -> String {
        let now = Local::now();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.config.date_format)).is_err() {
            tracing::warn!(format = %self.config.date_format, "invalid date_format; using default");
            out = now.format(DEFAULT_DATE_FORMAT).to_string();
        }
        out
    }

    /// `step_supplied` is whether the update itself set `step_current`; only
    /// then can [`OutOfRangeStep::Reject`] refuse it.
    fn derive_status(&self, project: &mut Project, step_supplied: bool) -> Result<(), RegistryError> {
        if let Some(status) = ProjectStatus::from_step(project.step_current) {
            project.status = status;
            return Ok(());
        }

        match self.config.out_of_range {
            // status keeps its post-merge value
            OutOfRangeStep::Unchanged => Ok(()),
            OutOfRangeStep::Clamp => {
                project.step_current = project.step_current.clamp(1, project.step_total.max(1));
                if let Some(status) = ProjectStatus::from_step(project.step_current) {
                    project.status = status;
                }
                Ok(())
            }
            OutOfRangeStep::Reject if step_supplied => Err(RegistryError::StepOutOfRange {
                id: project.id,
                step: project.step_current,
                total: project.step_total,
            }),
            // already out of range before this update
            OutOfRangeStep::Reject => Ok(()),
        }
    }

    fn persist(&mut self) -> Result<(), RegistryError> {
        let written = self.write_collection();
        for observer in &self.observers {
            observer.on_change(&self.projects);
        }
        written
    }

    fn write_collection(&mut self) -> Result<(), RegistryError> {
        let raw = serde_json::to_string(&self.projects)?;
        self.store.write(&self.config.storage_key, &raw)?;
        tracing::debug!(key = %self.config.storage_key, count = self.projects.len(), "persisted projects");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
