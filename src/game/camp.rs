//! Camp session
//!
//! The between-runs hub: owns the store, the catalog and the in-memory
//! record. Every change is computed as a new record first and persisted
//! before it replaces the current one.

use rand::Rng;

use super::bootstrap::Run;
use super::run::RunOutcome;
use crate::progression::{BuildingId, BuildingView, CampCatalog};
use crate::save::{ProgressionRecord, ProgressionStore, SaveError, Storage};

pub struct CampSession<S: Storage> {
    store: ProgressionStore<S>,
    catalog: CampCatalog,
    record: ProgressionRecord,
}

impl<S: Storage> CampSession<S> {
    /// Load the record and fit it to the catalog
    pub fn open(store: ProgressionStore<S>, catalog: CampCatalog) -> Self {
        let record = catalog.clamp_levels(&store.load());
        Self { store, catalog, record }
    }

    pub fn record(&self) -> &ProgressionRecord {
        &self.record
    }

    pub fn catalog(&self) -> &CampCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ProgressionStore<S> {
        &self.store
    }

    pub fn views(&self) -> Vec<BuildingView<'_>> {
        self.catalog.views(&self.record)
    }

    /// Buy one level of a building.
    ///
    /// Returns `Ok(false)` when nothing was bought; the record is only
    /// saved when a purchase went through.
    pub fn upgrade(&mut self, id: BuildingId) -> Result<bool, SaveError> {
        let next = self.catalog.purchase(id, &self.record);
        if next == self.record {
            return Ok(false);
        }

        self.store.save(&next)?;
        self.record = next;
        Ok(true)
    }

    /// Fold a finished run into the record and save it
    pub fn settle_run(&mut self, outcome: &RunOutcome) -> Result<(), SaveError> {
        let next = self.record.settle(outcome);
        self.store.save(&next)?;
        self.record = next;
        Ok(())
    }

    pub fn start_run(&self, chapter: u32, rng: &mut impl Rng) -> Run {
        Run::start(&self.record, &self.catalog, chapter, rng)
    }
}
