//! Plugin-based solver registry
//!
//! The controller addresses solvers by name (the `solverName` in its issuer
//! configuration). The registry keeps that routing table so the process
//! hosting solvers never hardcodes an if-else chain over providers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dns01_core::{ChallengeRequest, SolverRegistry};
//!
//! let registry = SolverRegistry::new();
//! dns01_provider_cloudns::register(&registry, &config)?;
//!
//! let request = ChallengeRequest::new("_acme-challenge.example.com.", "token");
//! registry.present("cloudns", &request).await?;
//! ```

use crate::error::{Error, Result};
use crate::traits::{ChallengeRequest, HostConfig, Solver};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::oneshot;

/// Solver registry for name-based challenge routing
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes. Locks are never held across an `.await`.
#[derive(Default)]
pub struct SolverRegistry {
    /// Registered solvers, keyed by `Solver::name()`
    solvers: RwLock<HashMap<String, Arc<dyn Solver>>>,
}

/// Stop signal senders for initialized solvers
///
/// Calling [`SolverShutdown::shutdown`] or dropping the handle resolves the
/// receivers handed to every solver's `initialize`.
#[derive(Debug, Default)]
pub struct SolverShutdown {
    senders: Vec<oneshot::Sender<()>>,
}

impl SolverShutdown {
    /// Signal every initialized solver to stop
    pub fn shutdown(self) {
        for sender in self.senders {
            // A solver that already dropped its receiver needs no signal
            let _ = sender.send(());
        }
    }
}

impl SolverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a solver under its own name
    ///
    /// Registering a second solver with the same name replaces the first.
    pub fn register(&self, solver: Arc<dyn Solver>) {
        let name = solver.name().to_string();
        tracing::debug!("Registering solver: {}", name);
        let mut solvers = self.solvers.write().unwrap_or_else(|e| e.into_inner());
        solvers.insert(name, solver);
    }

    /// Get a registered solver
    ///
    /// # Returns
    ///
    /// - `Ok(Arc<dyn Solver>)`: The solver
    /// - `Err(Error::UnknownSolver)`: If nothing is registered under `name`
    pub fn get(&self, name: &str) -> Result<Arc<dyn Solver>> {
        let solvers = self.solvers.read().unwrap_or_else(|e| e.into_inner());
        solvers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownSolver(name.to_string()))
    }

    /// Check if a solver is registered
    pub fn has_solver(&self, name: &str) -> bool {
        let solvers = self.solvers.read().unwrap_or_else(|e| e.into_inner());
        solvers.contains_key(name)
    }

    /// List all registered solver names, sorted
    pub fn names(&self) -> Vec<String> {
        let solvers = self.solvers.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = solvers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Route a `present` call to the named solver
    pub async fn present(&self, name: &str, request: &ChallengeRequest) -> Result<()> {
        self.get(name)?.present(request).await
    }

    /// Route a `clean_up` call to the named solver
    pub async fn clean_up(&self, name: &str, request: &ChallengeRequest) -> Result<()> {
        self.get(name)?.clean_up(request).await
    }

    /// Run every solver's `initialize` hook
    ///
    /// Stops at the first failing solver. The returned handle carries the
    /// stop signal for the solvers initialized so far.
    pub async fn initialize_all(&self, host: &HostConfig) -> Result<SolverShutdown> {
        let solvers: Vec<Arc<dyn Solver>> = {
            let solvers = self.solvers.read().unwrap_or_else(|e| e.into_inner());
            solvers.values().cloned().collect()
        };

        let mut shutdown = SolverShutdown::default();
        for solver in solvers {
            let (tx, rx) = oneshot::channel();
            shutdown.senders.push(tx);
            solver.initialize(host, rx).await?;
            tracing::info!("Initialized solver: {}", solver.name());
        }

        Ok(shutdown)
    }
}
