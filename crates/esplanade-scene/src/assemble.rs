//! Scene assembly pipeline
//!
//! Walks every loaded node, classifies it by name, registers floor
//! anchors, randomizes prop placement, and spawns one motion task per
//! moving prop. Classification, registration, and placement run
//! synchronously; motion tasks begin ticking as they are spawned.

use anyhow::Result;
use rand::Rng;
use tracing::{debug, info};

use esplanade_assets::WorldAsset;
use esplanade_core::RuleTable;
use esplanade_motion::{MotionEvent, MotionScheduler};
use tokio::sync::broadcast;

use crate::config::SceneConfig;
use crate::teleport::TeleportRegistrar;

/// An assembled scene
///
/// Owns the node graph and the motion scheduler; dropping the scene (or
/// calling [`Scene::shutdown`]) tears down every motion task.
pub struct Scene {
    world: WorldAsset,
    scheduler: MotionScheduler,
    floor_count: usize,
    prop_count: usize,
}

impl Scene {
    /// The owned node graph
    pub fn world(&self) -> &WorldAsset {
        &self.world
    }

    /// The motion scheduler driving this scene's props
    pub fn scheduler(&self) -> &MotionScheduler {
        &self.scheduler
    }

    /// Subscribe to motion events
    pub fn subscribe_motion(&self) -> broadcast::Receiver<MotionEvent> {
        self.scheduler.subscribe()
    }

    /// Number of teleport floors registered during assembly
    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    /// Number of moving props animated by this scene
    pub fn prop_count(&self) -> usize {
        self.prop_count
    }

    /// Tear the scene down, aborting every motion task
    pub fn shutdown(mut self) {
        self.scheduler.shutdown();
    }
}

/// Assemble a scene from a loaded world
///
/// Fails only if the configured bounds are invalid; an empty or all-static
/// world assembles into a scene with nothing to animate.
pub fn assemble(
    world: WorldAsset,
    config: &SceneConfig,
    registrar: &dyn TeleportRegistrar,
    rng: &mut impl Rng,
) -> Result<Scene> {
    let rules = RuleTable::default();
    let mut scheduler = MotionScheduler::new(config.to_scheduler_config()?);

    let mut floor_count = 0;
    let mut prop_count = 0;
    let mut static_count = 0;

    for entity in world.entities() {
        let roles = rules.classify(entity.name());
        if roles.is_static() {
            static_count += 1;
            continue;
        }

        // One placement per entity, before its motion starts
        let start_x = rng.gen_range(0..=config.placement.max_offset) as f32;
        entity.set_axis_position(start_x);
        debug!(entity = %entity.name(), x = start_x, "Placed entity");

        if roles.floor_anchor {
            registrar.register_floor(entity.as_ref());
            floor_count += 1;
        }

        if let Some(class) = roles.moving_prop {
            scheduler.spawn(entity.clone(), config.speed_for(class));
            prop_count += 1;
        }
    }

    info!(
        nodes = world.node_count(),
        floors = floor_count,
        props = prop_count,
        statics = static_count,
        "Scene assembled"
    );

    Ok(Scene {
        world,
        scheduler,
        floor_count,
        prop_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use esplanade_assets::{MeshNode, TransformNode};
    use esplanade_core::{Positionable, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingRegistrar {
        floors: Mutex<Vec<String>>,
    }

    impl TeleportRegistrar for RecordingRegistrar {
        fn register_floor(&self, entity: &dyn Positionable) {
            self.floors.lock().unwrap().push(entity.name().to_string());
        }
    }

    fn sample_world() -> WorldAsset {
        WorldAsset::new(
            vec![
                Arc::new(MeshNode::new("Platform1", Vec3::new(-7.0, 0.0, 0.0))),
                Arc::new(MeshNode::new("BoatLeft", Vec3::default())),
                Arc::new(MeshNode::new("Lighthouse", Vec3::new(99.0, 0.0, 0.0))),
            ],
            vec![
                Arc::new(TransformNode::new("CarLeft", Vec3::default())),
                Arc::new(TransformNode::new("repairCar", Vec3::new(5.0, 0.0, 0.0))),
                Arc::new(TransformNode::new("Bus2", Vec3::default())),
            ],
        )
    }

    #[tokio::test]
    async fn test_assembly_pipeline() {
        let world = sample_world();
        let registrar = RecordingRegistrar::default();
        let mut rng = StdRng::seed_from_u64(42);

        let scene = assemble(world, &SceneConfig::default(), &registrar, &mut rng).unwrap();

        // Floors registered exactly once each, meshes walked first
        let floors = registrar.floors.lock().unwrap().clone();
        assert_eq!(floors, ["Platform1", "BoatLeft"]);
        assert_eq!(scene.floor_count(), 2);

        // Boat, car, and bus animate; repair scenery and the lighthouse don't
        assert_eq!(scene.prop_count(), 3);
        assert_eq!(scene.scheduler().spawned(), 3);

        scene.shutdown();
    }

    #[tokio::test]
    async fn test_placement_range_and_statics() {
        let world = sample_world();
        let registrar = RecordingRegistrar::default();
        let mut rng = StdRng::seed_from_u64(7);

        let scene = assemble(world, &SceneConfig::default(), &registrar, &mut rng).unwrap();

        for name in ["Platform1", "BoatLeft", "CarLeft", "Bus2"] {
            let x = scene.world().find(name).unwrap().axis_position();
            assert!((0.0..=30.0).contains(&x), "{name} placed at {x}");
            assert_eq!(x.fract(), 0.0, "{name} placement is an integer");
        }

        // Static entities keep their authored positions
        assert_eq!(scene.world().find("Lighthouse").unwrap().axis_position(), 99.0);
        assert_eq!(scene.world().find("repairCar").unwrap().axis_position(), 5.0);

        scene.shutdown();
    }

    #[tokio::test]
    async fn test_props_animate_after_assembly() {
        let world = sample_world();
        let registrar = RecordingRegistrar::default();
        let mut rng = StdRng::seed_from_u64(3);

        let mut config = SceneConfig::default();
        config.motion.tick_ms = 2;

        let scene = assemble(world, &config, &registrar, &mut rng).unwrap();
        let car = scene.world().find("CarLeft").unwrap();
        let start = car.axis_position();

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        // "CarLeft" travels negative
        assert!(car.axis_position() < start);

        scene.shutdown();
    }

    #[tokio::test]
    async fn test_empty_world_assembles() {
        let world = WorldAsset::new(Vec::new(), Vec::new());
        let registrar = RecordingRegistrar::default();
        let mut rng = StdRng::seed_from_u64(0);

        let scene = assemble(world, &SceneConfig::default(), &registrar, &mut rng).unwrap();
        assert_eq!(scene.floor_count(), 0);
        assert_eq!(scene.prop_count(), 0);
    }
}
