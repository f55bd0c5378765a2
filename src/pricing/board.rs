use crate::pricing::models::ComboOptions;
use crate::pricing::service::{ComboPriceService, UpdateReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The combos shown to the user, shared between the UI and refresh tasks
#[derive(Clone)]
pub struct ComboBoard {
    service: Arc<ComboPriceService>,
    combos: Arc<RwLock<Vec<ComboOptions>>>,
}

impl ComboBoard {
    pub fn new(service: Arc<ComboPriceService>, combos: Vec<ComboOptions>) -> Self {
        Self {
            service,
            combos: Arc::new(RwLock::new(combos)),
        }
    }

    pub fn service(&self) -> &Arc<ComboPriceService> {
        &self.service
    }

    /// Copy of the combos with their current prices
    pub async fn snapshot(&self) -> Vec<ComboOptions> {
        self.combos.read().await.clone()
    }

    /// Update prices, using the cached catalog when fresh.
    ///
    /// The combos are only locked after the catalog is in hand, so readers
    /// keep seeing the previous prices while a fetch is in flight.
    pub async fn update(&self) -> UpdateReport {
        let catalog = match self.service.batch_catalog().await {
            Ok(catalog) => catalog,
            Err(report) => return report,
        };

        let mut combos = self.combos.write().await;
        self.service.apply(&catalog, &mut combos)
    }

    /// Drop the cached catalog and update prices
    pub async fn refresh(&self) -> UpdateReport {
        self.service.invalidate().await;
        self.update().await
    }

    /// Update prices in the background; await the handle to observe the result
    pub fn spawn_update(&self) -> JoinHandle<UpdateReport> {
        let board = self.clone();
        tokio::spawn(async move { board.update().await })
    }
}

/// Periodically refreshes a board's prices
pub struct PriceRefresher {
    board: ComboBoard,
    refresh_interval: Duration,
}

impl PriceRefresher {
    pub fn new(board: ComboBoard, refresh_interval: Duration) -> Self {
        Self {
            board,
            refresh_interval,
        }
    }

    /// Start the background task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Starting combo price refresher (interval: {:?})",
                self.refresh_interval
            );

            let mut interval = tokio::time::interval(self.refresh_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                // First tick completes immediately
                interval.tick().await;

                let report = self.board.update().await;
                if let Some(e) = &report.catalog_error {
                    error!(error = %e, "Combo price refresh failed");
                } else {
                    info!(
                        updated = report.updated,
                        failed = report.failed.len(),
                        "Combo prices refreshed"
                    );
                }
            }
        })
    }
}
