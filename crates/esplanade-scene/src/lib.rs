//! Esplanade Scene - assembly of a loaded world into a living scene
//!
//! Consumes the node graph produced by `esplanade-assets`, classifies every
//! entity by naming convention, registers teleport floors, randomizes prop
//! placement, and hands each moving prop to the motion scheduler.

pub mod assemble;
pub mod config;
pub mod teleport;

pub use assemble::{assemble, Scene};
pub use config::{load_config, SceneConfig};
pub use teleport::{LogTeleport, TeleportRegistrar};
