//! Esplanade Motion - perpetual per-entity motion tasks
//!
//! One tokio task per moving prop, each owning its oscillator state
//! exclusively and waking on a fixed interval for as long as the scene
//! lives.

pub mod scheduler;

pub use scheduler::{MotionEvent, MotionHandle, MotionScheduler, SchedulerConfig};
