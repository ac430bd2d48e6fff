//! Scene entity types and the positionable capability

use serde::{Deserialize, Serialize};

/// Position in 3D space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Kind of scene node produced by the asset loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Node with mesh geometry attached
    Mesh,
    /// Empty grouping node carrying only a transform
    TransformNode,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Mesh => write!(f, "mesh"),
            NodeKind::TransformNode => write!(f, "transform node"),
        }
    }
}

/// A named scene entity with a mutable position
///
/// Both mesh nodes and transform nodes expose this capability, so one
/// motion scheduler implementation drives either kind. Implementors use
/// interior mutability for the position; setters take `&self`.
pub trait Positionable: Send + Sync {
    /// Entity name as authored in the world asset
    fn name(&self) -> &str;

    /// Node kind
    fn kind(&self) -> NodeKind;

    /// Current position
    fn position(&self) -> Vec3;

    /// Overwrite the position
    fn set_position(&self, position: Vec3);

    /// Current coordinate on the motion axis
    fn axis_position(&self) -> f32 {
        self.position().x
    }

    /// Move the entity along the motion axis, leaving other axes untouched
    fn set_axis_position(&self, x: f32) {
        let mut position = self.position();
        position.x = x;
        self.set_position(position);
    }
}
