//! Refresh orchestrator: the one place that sequences the layers.
//!
//! Stage order is a hard contract (cleaning completes before modeling
//! starts, modeling before validation) because each stage's output is the
//! next stage's entire input. A failed refresh is simply re-run wholesale
//! by the caller; there is no partial recovery.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::bronze::extract;
use crate::config::Config;
use crate::domain::RefreshRun;
use crate::error::Result;
use crate::gold::{self, GoldViews};
use crate::quality::{self, ValidationReport};
use crate::silver::audit::Finding;
use crate::silver::{audit, CleaningEngine};
use crate::storage::WarehouseStore;

/// Outcome of one full refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshSummary {
    pub run_id: Uuid,
    pub bronze_rows: usize,
    pub silver_rows: usize,
    pub customer_dim_rows: usize,
    pub product_dim_rows: usize,
    pub fact_rows: usize,
    pub validation: ValidationReport,
    pub duration_ms: u128,
}

impl RefreshSummary {
    /// The release gate: a refresh only passes when both validator result
    /// sets came back empty.
    pub fn gate_passed(&self) -> bool {
        self.validation.is_clean()
    }
}

/// Orchestrates a full Bronze → Silver → Gold → validation refresh against
/// a warehouse store.
pub struct Refresh {
    store: Arc<dyn WarehouseStore>,
    config: Config,
}

impl Refresh {
    pub fn new(store: Arc<dyn WarehouseStore>, config: Config) -> Self {
        Self { store, config }
    }

    /// Run one complete refresh. Each refresh fully replaces the previous
    /// Bronze and Silver state; Gold is computed from the snapshot just
    /// published.
    pub async fn run(&self) -> Result<RefreshSummary> {
        let started = Instant::now();
        let mut run = RefreshRun::started_now();
        self.store.create_refresh_run(&mut run).await?;
        let run_id = run.id.unwrap_or_default();

        let bronze = {
            let span = info_span!("bronze_load");
            let _enter = span.enter();
            extract::load_bronze(&self.config.sources)?
        };
        run.bronze_rows = bronze.row_count();
        self.store.replace_bronze(bronze).await?;

        let bronze = self.store.bronze().await?;
        let snapshot = {
            let span = info_span!("silver_rebuild");
            let _enter = span.enter();
            CleaningEngine::new(self.config.effective_as_of_date()).run(&bronze)
        };
        run.silver_rows = snapshot.row_count();
        self.store.swap_silver(snapshot).await?;

        // The store is the single source of truth from here on; Gold reads
        // the snapshot that was just published, not a local copy.
        let silver = self.store.silver().await?.ok_or_else(|| {
            crate::error::WarehouseError::Store("silver snapshot missing after swap".to_string())
        })?;

        let views = {
            let span = info_span!("gold_build");
            let _enter = span.enter();
            gold::build_views(&silver)
        };

        let validation = {
            let span = info_span!("quality_checks");
            let _enter = span.enter();
            quality::validate(&silver, &views)
        };

        if let Some(output) = &self.config.output {
            export_views(&views, Path::new(&output.dir))?;
        }

        run.fact_rows = views.sales.len();
        run.violations = validation.violation_count();
        run.finished_at = Some(Utc::now());
        self.store.update_refresh_run(&run).await?;

        let summary = RefreshSummary {
            run_id,
            bronze_rows: run.bronze_rows,
            silver_rows: run.silver_rows,
            customer_dim_rows: views.customers.len(),
            product_dim_rows: views.products.len(),
            fact_rows: views.sales.len(),
            validation,
            duration_ms: started.elapsed().as_millis(),
        };

        info!(
            run_id = %run_id,
            gate_passed = summary.gate_passed(),
            duration_ms = summary.duration_ms,
            "Refresh finished"
        );
        Ok(summary)
    }

    /// Run only the Gold validator: rebuild Silver and Gold in memory from
    /// freshly loaded extracts and report violations. Nothing is published
    /// to the store and nothing is exported.
    pub fn run_check(&self) -> Result<ValidationReport> {
        let bronze = extract::load_bronze(&self.config.sources)?;
        let snapshot = CleaningEngine::new(self.config.effective_as_of_date()).run(&bronze);
        let views = gold::build_views(&snapshot);
        Ok(quality::validate(&snapshot, &views))
    }

    /// Run only the detection queries against freshly loaded extracts.
    /// Findings are reported, never applied.
    pub fn run_audit(&self) -> Result<Vec<Finding>> {
        let bronze = extract::load_bronze(&self.config.sources)?;
        Ok(audit::audit_bronze(
            &bronze,
            self.config.effective_as_of_date(),
        ))
    }
}

/// Export the Gold views as JSON files for BI consumers.
fn export_views(views: &GoldViews, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(
        dir.join("dim_customers.json"),
        serde_json::to_string_pretty(&views.customers)?,
    )?;
    fs::write(
        dir.join("dim_products.json"),
        serde_json::to_string_pretty(&views.products)?,
    )?;
    fs::write(
        dir.join("fact_sales.json"),
        serde_json::to_string_pretty(&views.sales)?,
    )?;
    info!(dir = %dir.display(), "Exported Gold views");
    Ok(())
}
