//! Loaded scene nodes
//!
//! Both node kinds keep their position in an interior-mutable cell so a
//! motion task can move an entity through a shared reference. The lock is
//! held only for the duration of a single read or write, never across an
//! await point.

use std::sync::RwLock;

use esplanade_core::{NodeKind, Positionable, Vec3};

/// A scene node with mesh geometry attached
#[derive(Debug)]
pub struct MeshNode {
    name: String,
    position: RwLock<Vec3>,
    primitive_count: usize,
}

impl MeshNode {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position: RwLock::new(position),
            primitive_count: 0,
        }
    }

    /// Node with its imported primitive count
    pub fn with_primitives(
        name: impl Into<String>,
        position: Vec3,
        primitive_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            position: RwLock::new(position),
            primitive_count,
        }
    }

    /// Number of geometry primitives imported for this mesh
    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }
}

impl Positionable for MeshNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Mesh
    }

    fn position(&self) -> Vec3 {
        *self.position.read().unwrap()
    }

    fn set_position(&self, position: Vec3) {
        *self.position.write().unwrap() = position;
    }
}

/// An empty grouping node carrying only a transform
///
/// The world asset uses these to gather multi-mesh props (a car body and
/// its wheels) under one movable parent.
#[derive(Debug)]
pub struct TransformNode {
    name: String,
    position: RwLock<Vec3>,
    children: Vec<String>,
}

impl TransformNode {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position: RwLock::new(position),
            children: Vec::new(),
        }
    }

    /// Attach the names of the node's children
    pub fn with_children(mut self, children: Vec<String>) -> Self {
        self.children = children;
        self
    }

    /// Names of child nodes grouped under this transform
    pub fn children(&self) -> &[String] {
        &self.children
    }
}

impl Positionable for TransformNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::TransformNode
    }

    fn position(&self) -> Vec3 {
        *self.position.read().unwrap()
    }

    fn set_position(&self, position: Vec3) {
        *self.position.write().unwrap() = position;
    }
}
