use tracing::{error, info};

use crate::clients::SimulationClient;

/// Owns the running simulation actor.
pub struct CdrSystem {
    /// Client for interacting with the simulation actor
    pub simulation_client: SimulationClient,

    /// Task handles of running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CdrSystem {
    /// Spawns the simulation actor. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (simulation_actor, simulation_client) = crate::simulation_actor::new();
        let simulation_handle = tokio::spawn(simulation_actor.run(()));

        Self {
            simulation_client,
            handles: vec![simulation_handle],
        }
    }

    /// Drops the client and waits for every actor task to finish.
    ///
    /// Returns an error if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.simulation_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for CdrSystem {
    fn default() -> Self {
        Self::new()
    }
}
