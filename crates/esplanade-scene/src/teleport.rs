//! Teleportation registrar seam
//!
//! The XR subsystem that actually consumes teleport destinations lives
//! outside this repository; assembly only needs something to hand each
//! floor anchor to, exactly once, before that entity starts moving.

use tracing::info;

use esplanade_core::Positionable;

/// Records floor-anchor entities as valid teleport destinations
pub trait TeleportRegistrar: Send + Sync {
    /// Called once per floor anchor during assembly
    fn register_floor(&self, entity: &dyn Positionable);
}

/// Registrar for headless runs: logs each floor and nothing more
#[derive(Debug, Default)]
pub struct LogTeleport;

impl TeleportRegistrar for LogTeleport {
    fn register_floor(&self, entity: &dyn Positionable) {
        info!(entity = %entity.name(), kind = %entity.kind(), "Registered teleport floor");
    }
}
