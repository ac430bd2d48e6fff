//! Esplanade Assets - world asset loading
//!
//! Imports a composite glTF/GLB world file and flattens it into the named,
//! positionable node collections the scene assembler consumes.

pub mod loader;
pub mod node;

pub use loader::{load_world, AssetError, WorldAsset};
pub use node::{MeshNode, TransformNode};
