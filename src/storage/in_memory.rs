use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::bronze::BronzeTables;
use crate::domain::RefreshRun;
use crate::error::{Result, WarehouseError};
use crate::silver::SilverSnapshot;

use super::traits::WarehouseStore;

/// In-memory warehouse store. Each layer lives behind its own mutex and is
/// swapped as a whole `Arc`, which gives the atomic-replacement discipline
/// the refresh requires without any finer-grained locking.
pub struct InMemoryStore {
    bronze: Mutex<Arc<BronzeTables>>,
    silver: Mutex<Option<Arc<SilverSnapshot>>>,
    refresh_runs: Mutex<HashMap<Uuid, RefreshRun>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            bronze: Mutex::new(Arc::new(BronzeTables::default())),
            silver: Mutex::new(None),
            refresh_runs: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl WarehouseStore for InMemoryStore {
    async fn replace_bronze(&self, tables: BronzeTables) -> Result<()> {
        let rows = tables.row_count();
        *self.bronze.lock().unwrap() = Arc::new(tables);
        debug!(rows, "Replaced Bronze layer");
        Ok(())
    }

    async fn bronze(&self) -> Result<Arc<BronzeTables>> {
        Ok(self.bronze.lock().unwrap().clone())
    }

    async fn swap_silver(&self, snapshot: SilverSnapshot) -> Result<()> {
        let rows = snapshot.row_count();
        *self.silver.lock().unwrap() = Some(Arc::new(snapshot));
        debug!(rows, "Swapped Silver snapshot");
        Ok(())
    }

    async fn silver(&self) -> Result<Option<Arc<SilverSnapshot>>> {
        Ok(self.silver.lock().unwrap().clone())
    }

    async fn create_refresh_run(&self, run: &mut RefreshRun) -> Result<()> {
        let id = Uuid::new_v4();
        run.id = Some(id);

        let mut runs = self.refresh_runs.lock().unwrap();
        runs.insert(id, run.clone());

        debug!("Created refresh run with id {}", id);
        Ok(())
    }

    async fn update_refresh_run(&self, run: &RefreshRun) -> Result<()> {
        let run_id = run.id.ok_or_else(|| {
            WarehouseError::Store("Cannot update refresh run without ID".to_string())
        })?;

        let mut runs = self.refresh_runs.lock().unwrap();
        runs.insert(run_id, run.clone());

        debug!("Updated refresh run with id {}", run_id);
        Ok(())
    }
}
