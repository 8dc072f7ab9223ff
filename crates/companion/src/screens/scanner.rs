//! AR product scanner.
//!
//! There is no camera pipeline: a scan waits for the configured scan delay and
//! then shows whatever the catalog provider reports as the scan result.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use smartcart_core::{CameraFacing, Product};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::catalog::{CatalogProvider, ScannedProduct};
use crate::error::ScanError;
use crate::scheduler::Scheduler;

/// Where the scanner is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanPhase {
    #[default]
    Idle,
    Scanning,
    Showing,
}

impl std::fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Scanning => write!(f, "scanning"),
            Self::Showing => write!(f, "showing a product"),
        }
    }
}

/// Observable scanner state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ScannerState {
    pub phase: ScanPhase,
    /// Set only while `phase` is `Showing`.
    pub product: Option<ScannedProduct>,
    pub facing: CameraFacing,
    pub closed: bool,
}

/// Controller for the AR scan screen.
pub struct ScannerSession {
    state: Arc<watch::Sender<ScannerState>>,
    scheduler: Scheduler,
    catalog: Arc<dyn CatalogProvider>,
    scan_delay: Duration,
}

impl std::fmt::Debug for ScannerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScannerSession")
            .field("state", &*self.state.borrow())
            .field("scan_delay", &self.scan_delay)
            .finish_non_exhaustive()
    }
}

impl ScannerSession {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogProvider>, scan_delay: Duration) -> Self {
        let (state, _) = watch::channel(ScannerState::default());
        Self {
            state: Arc::new(state),
            scheduler: Scheduler::new(),
            catalog,
            scan_delay,
        }
    }

    #[must_use]
    pub fn state(&self) -> ScannerState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn phase(&self) -> ScanPhase {
        self.state.borrow().phase
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScannerState> {
        self.state.subscribe()
    }

    /// Start a scan. Any product on screen is dismissed.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Rejected while a scan is already running or after disposal.
    pub fn start_scan(&self) -> Result<(), ScanError> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|state| {
            outcome = if state.closed {
                Err(ScanError::Disposed)
            } else if state.phase == ScanPhase::Scanning {
                Err(ScanError::AlreadyScanning)
            } else {
                state.phase = ScanPhase::Scanning;
                state.product = None;
                Ok(())
            };
            outcome.is_ok()
        });
        if let Err(err) = outcome {
            warn!(error = %err, "Scan rejected");
            return Err(err);
        }

        debug!(delay_ms = self.scan_delay.as_millis(), "Scanning");
        let state = Arc::clone(&self.state);
        let catalog = Arc::clone(&self.catalog);
        self.scheduler.schedule(self.scan_delay, move || {
            let scanned = catalog.scan_result();
            let name = scanned.product.name.clone();
            let shown = state.send_if_modified(|state| {
                if state.closed || state.phase != ScanPhase::Scanning {
                    return false;
                }
                state.phase = ScanPhase::Showing;
                state.product = Some(scanned);
                true
            });
            if shown {
                info!(product = %name, "Product recognised");
            }
        });
        Ok(())
    }

    /// Dismiss the product card.
    pub fn close_product(&self) {
        self.state.send_if_modified(|state| {
            if state.closed || state.phase != ScanPhase::Showing {
                return false;
            }
            state.phase = ScanPhase::Idle;
            state.product = None;
            true
        });
    }

    /// Add the product on screen to `cart`.
    ///
    /// # Errors
    ///
    /// Rejected unless a product is being shown.
    pub fn add_to_cart(&self, cart: &mut Cart) -> Result<Product, ScanError> {
        let product = {
            let state = self.state.borrow();
            match (&state.product, state.phase) {
                (Some(scanned), ScanPhase::Showing) if !state.closed => scanned.product.clone(),
                (_, phase) => return Err(ScanError::NothingShown(phase)),
            }
        };
        cart.add_or_increment(&product);
        info!(product = %product.name, "Added scanned product to cart");
        Ok(product)
    }

    /// Switch between front and back cameras.
    pub fn flip_camera(&self) {
        self.state.send_if_modified(|state| {
            if state.closed {
                return false;
            }
            state.facing = state.facing.flipped();
            true
        });
    }

    /// Cancel any pending scan and freeze the state.
    pub fn dispose(&self) {
        self.scheduler.dispose();
        self.state.send_if_modified(|state| {
            let changed = !state.closed;
            state.closed = true;
            changed
        });
    }
}

impl Drop for ScannerSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
