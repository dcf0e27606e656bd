use std::sync::Arc;

use async_trait::async_trait;

use crate::bronze::BronzeTables;
use crate::domain::RefreshRun;
use crate::error::Result;
use crate::silver::SilverSnapshot;

/// Storage abstraction for the warehouse layers.
///
/// Both layers are replaced wholesale per refresh, never patched row by
/// row: `replace_bronze` swaps the six raw tables as one unit and
/// `swap_silver` publishes a complete Silver rebuild atomically, so a
/// reader holding the previous snapshot keeps a consistent view and a new
/// reader only ever sees the new one. Gold has no storage presence; it is
/// computed on read from the current Silver snapshot.
#[async_trait]
pub trait WarehouseStore: Send + Sync {
    /// Replace the entire Bronze layer with freshly loaded extracts.
    async fn replace_bronze(&self, tables: BronzeTables) -> Result<()>;

    /// Read the current Bronze layer.
    async fn bronze(&self) -> Result<Arc<BronzeTables>>;

    /// Atomically publish a complete Silver rebuild.
    async fn swap_silver(&self, snapshot: SilverSnapshot) -> Result<()>;

    /// Read the current Silver snapshot, if a refresh has published one.
    async fn silver(&self) -> Result<Option<Arc<SilverSnapshot>>>;

    /// Record the start of a refresh run (assigns the run id).
    async fn create_refresh_run(&self, run: &mut RefreshRun) -> Result<()>;

    /// Update a refresh run with its final counts and finish time.
    async fn update_refresh_run(&self, run: &RefreshRun) -> Result<()>;
}
