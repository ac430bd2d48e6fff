//! World asset import
//!
//! Loads a single composite glTF/GLB world file and flattens its node
//! hierarchy into flat mesh and transform-node collections. The blocking
//! parse runs on the blocking pool; the load resolves once, and failure is
//! fatal to scene startup (no partial scene is produced).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use esplanade_core::{Positionable, Vec3};

use crate::node::{MeshNode, TransformNode};

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("world asset not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to import world asset: {0}")]
    Import(#[from] gltf::Error),
    #[error("import task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// The loaded scene node graph
///
/// Owns every entity through `Arc`; everything downstream (classifier,
/// scheduler, registrar) holds shared or weak references only, so dropping
/// the asset tears the scene's entities down.
#[derive(Debug)]
pub struct WorldAsset {
    root_name: Option<String>,
    meshes: Vec<Arc<MeshNode>>,
    transform_nodes: Vec<Arc<TransformNode>>,
}

impl WorldAsset {
    pub fn new(meshes: Vec<Arc<MeshNode>>, transform_nodes: Vec<Arc<TransformNode>>) -> Self {
        Self {
            root_name: None,
            meshes,
            transform_nodes,
        }
    }

    /// Record the name of the world's root node
    pub fn with_root(mut self, name: impl Into<String>) -> Self {
        self.root_name = Some(name.into());
        self
    }

    /// Name of the root node, when the asset declares one
    pub fn root_name(&self) -> Option<&str> {
        self.root_name.as_deref()
    }

    pub fn meshes(&self) -> &[Arc<MeshNode>] {
        &self.meshes
    }

    pub fn transform_nodes(&self) -> &[Arc<TransformNode>] {
        &self.transform_nodes
    }

    pub fn node_count(&self) -> usize {
        self.meshes.len() + self.transform_nodes.len()
    }

    /// All entities, meshes first, as shared positionable references
    pub fn entities(&self) -> impl Iterator<Item = Arc<dyn Positionable>> + '_ {
        let meshes = self
            .meshes
            .iter()
            .map(|m| Arc::clone(m) as Arc<dyn Positionable>);
        let nodes = self
            .transform_nodes
            .iter()
            .map(|n| Arc::clone(n) as Arc<dyn Positionable>);
        meshes.chain(nodes)
    }

    /// Look up an entity by name
    pub fn find(&self, name: &str) -> Option<Arc<dyn Positionable>> {
        self.entities().find(|e| e.name() == name)
    }
}

/// Load a world asset from disk
///
/// Resolves once with the flattened node graph, or with [`AssetError`] if
/// the file cannot be resolved or parsed.
pub async fn load_world(path: impl AsRef<Path>) -> Result<WorldAsset, AssetError> {
    let path = path.as_ref().to_path_buf();
    if !path.exists() {
        return Err(AssetError::NotFound(path));
    }

    let import_path = path.clone();
    let (document, _buffers, _images) =
        tokio::task::spawn_blocking(move || gltf::import(&import_path)).await??;

    let mut meshes = Vec::new();
    let mut transform_nodes = Vec::new();

    for node in document.nodes() {
        let (translation, _rotation, _scale) = node.transform().decomposed();
        let position = Vec3::from_array(translation);
        let name = node
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("node_{}", node.index()));

        match node.mesh() {
            Some(mesh) => {
                debug!(node = %name, "Imported mesh node");
                meshes.push(Arc::new(MeshNode::with_primitives(
                    name,
                    position,
                    mesh.primitives().count(),
                )));
            }
            None => {
                let children: Vec<String> = node
                    .children()
                    .map(|c| {
                        c.name()
                            .map(str::to_owned)
                            .unwrap_or_else(|| format!("node_{}", c.index()))
                    })
                    .collect();
                debug!(node = %name, children = children.len(), "Imported transform node");
                transform_nodes.push(Arc::new(
                    TransformNode::new(name, position).with_children(children),
                ));
            }
        }
    }

    // The first root of the default scene names the world
    let root_name = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .and_then(|scene| scene.nodes().next())
        .map(|node| {
            node.name()
                .map(str::to_owned)
                .unwrap_or_else(|| format!("node_{}", node.index()))
        });

    info!(
        path = %path.display(),
        meshes = meshes.len(),
        transform_nodes = transform_nodes.len(),
        "World asset loaded"
    );

    let mut world = WorldAsset::new(meshes, transform_nodes);
    if let Some(root) = root_name {
        world = world.with_root(root);
    }
    Ok(world)
}
