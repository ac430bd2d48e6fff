//! Esplanade Core - entity capability, classification, and oscillator state
//!
//! This crate provides the foundational types for the Esplanade system:
//! - The positionable-entity capability shared by mesh and transform nodes
//! - Name-based role classification driven by an explicit rule table
//! - The bounded-oscillation state advanced by the motion scheduler

pub mod classify;
pub mod entity;
pub mod motion;

pub use classify::{PropClass, Role, RoleRule, RoleSet, RuleTable};
pub use entity::{NodeKind, Positionable, Vec3};
pub use motion::{AxisBounds, Direction, MotionError, MotionState};
