//! Motion scheduler driving bounded oscillation
//!
//! Every moving prop gets one perpetual task. A task holds only a weak
//! reference to its entity and exclusively owns its direction state, so
//! tasks never share mutable state and an entity torn down mid-scene stops
//! exactly one task. Dropping the scheduler aborts every task it spawned.

use std::sync::{Arc, Weak};

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant};
use tracing::{debug, info};

use esplanade_core::{AxisBounds, Direction, MotionState, Positionable};

/// Immutable scheduler configuration, injected at construction
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Axis bounds shared by all props
    pub bounds: AxisBounds,
    /// Tick cadence
    pub tick: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            bounds: AxisBounds::default(),
            tick: Duration::from_millis(16),
        }
    }
}

/// Motion lifecycle event
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MotionEvent {
    /// A task started ticking for an entity
    Started { entity: String, direction: Direction },
    /// An entity reversed direction at a bound
    Reversed {
        entity: String,
        direction: Direction,
        position: f32,
    },
    /// An entity was dropped; its task stopped, siblings unaffected
    TargetLost { entity: String },
}

/// Handle to one prop's perpetual task
pub struct MotionHandle {
    entity: String,
    task: JoinHandle<()>,
}

impl MotionHandle {
    /// Name of the entity this task drives
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// True once the task has stopped (target lost or aborted)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop this task alone; sibling props keep ticking
    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Drives perpetual bounded oscillation for every registered prop
pub struct MotionScheduler {
    config: SchedulerConfig,
    handles: Vec<MotionHandle>,
    event_tx: broadcast::Sender<MotionEvent>,
}

impl MotionScheduler {
    /// Create a scheduler with the given configuration
    pub fn new(config: SchedulerConfig) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            config,
            handles: Vec::new(),
            event_tx,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Subscribe to motion events
    pub fn subscribe(&self) -> broadcast::Receiver<MotionEvent> {
        self.event_tx.subscribe()
    }

    /// Handles of every spawned task, in spawn order
    pub fn handles(&self) -> &[MotionHandle] {
        &self.handles
    }

    /// Number of tasks spawned over the scheduler's lifetime
    pub fn spawned(&self) -> usize {
        self.handles.len()
    }

    /// Number of tasks still ticking
    pub fn active(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Spawn the perpetual task for one prop
    ///
    /// Returns immediately; the task ticks on the runtime until the entity
    /// is dropped or the scheduler shuts down. Initial direction follows
    /// the entity naming convention. Must be called from within a tokio
    /// runtime.
    pub fn spawn(&mut self, entity: Arc<dyn Positionable>, speed: f32) {
        let name = entity.name().to_string();
        let state = MotionState::for_entity(&name, self.config.bounds);
        let target = Arc::downgrade(&entity);
        // The task must not keep the entity alive
        drop(entity);

        debug!(
            entity = %name,
            direction = ?state.direction(),
            speed,
            "Motion task started"
        );
        let _ = self.event_tx.send(MotionEvent::Started {
            entity: name.clone(),
            direction: state.direction(),
        });

        let tick = self.config.tick;
        let event_tx = self.event_tx.clone();
        let task_entity = name.clone();
        let task = tokio::spawn(async move {
            run_motion(task_entity, target, state, speed, tick, event_tx).await;
        });

        self.handles.push(MotionHandle { entity: name, task });
    }

    /// Abort every outstanding task
    pub fn shutdown(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
        info!(tasks = self.handles.len(), "Motion scheduler shut down");
        self.handles.clear();
    }
}

impl Drop for MotionScheduler {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

/// One prop's tick loop: suspend, step, check the target is still there
async fn run_motion(
    entity: String,
    target: Weak<dyn Positionable>,
    mut state: MotionState,
    speed: f32,
    tick: Duration,
    event_tx: broadcast::Sender<MotionEvent>,
) {
    // First tick fires after one full interval, not immediately
    let mut ticker = interval_at(Instant::now() + tick, tick);

    loop {
        ticker.tick().await;

        let Some(node) = target.upgrade() else {
            debug!(entity = %entity, "Motion target gone, stopping task");
            let _ = event_tx.send(MotionEvent::TargetLost { entity });
            return;
        };

        let before = state.direction();
        let next = state.advance(node.axis_position(), speed);
        node.set_axis_position(next);

        if state.direction() != before {
            debug!(
                entity = %entity,
                position = next,
                direction = ?state.direction(),
                "Reversed at bound"
            );
            let _ = event_tx.send(MotionEvent::Reversed {
                entity: entity.clone(),
                direction: state.direction(),
                position: next,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esplanade_core::{NodeKind, Vec3};
    use std::sync::RwLock;
    use tokio::time::{sleep, timeout};

    struct TestProp {
        name: String,
        position: RwLock<Vec3>,
    }

    impl TestProp {
        fn new(name: &str, x: f32) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                position: RwLock::new(Vec3::new(x, 0.0, 0.0)),
            })
        }
    }

    impl Positionable for TestProp {
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

    fn fast_config() -> SchedulerConfig {
        SchedulerConfig {
            bounds: AxisBounds::default(),
            tick: Duration::from_millis(2),
        }
    }

    #[tokio::test]
    async fn test_task_advances_position() {
        let mut scheduler = MotionScheduler::new(fast_config());
        let prop = TestProp::new("Bus1", 0.0);

        scheduler.spawn(prop.clone(), 1.0);
        sleep(Duration::from_millis(50)).await;

        assert!(prop.axis_position() > 0.0);
        assert_eq!(scheduler.active(), 1);
    }

    #[tokio::test]
    async fn test_left_name_travels_negative() {
        let mut scheduler = MotionScheduler::new(fast_config());
        let prop = TestProp::new("BusLeft", 0.0);

        scheduler.spawn(prop.clone(), 1.0);
        sleep(Duration::from_millis(50)).await;

        assert!(prop.axis_position() < 0.0);
    }

    #[tokio::test]
    async fn test_tasks_are_independent() {
        let mut scheduler = MotionScheduler::new(fast_config());
        let props = [
            TestProp::new("Car1", 0.0),
            TestProp::new("Car2", 0.0),
            TestProp::new("Car3", 0.0),
        ];
        for prop in &props {
            scheduler.spawn(prop.clone(), 1.0);
        }
        sleep(Duration::from_millis(20)).await;

        // Tear one task down; the others keep ticking
        scheduler.handles()[1].abort();
        sleep(Duration::from_millis(10)).await;
        let frozen = props[1].axis_position();
        let moving = [props[0].axis_position(), props[2].axis_position()];

        sleep(Duration::from_millis(50)).await;
        assert_eq!(props[1].axis_position(), frozen);
        assert!(props[0].axis_position() > moving[0]);
        assert!(props[2].axis_position() > moving[1]);
        assert_eq!(scheduler.active(), 2);
    }

    #[tokio::test]
    async fn test_target_loss_stops_only_that_task() {
        let mut scheduler = MotionScheduler::new(fast_config());
        let mut events = scheduler.subscribe();

        let doomed = TestProp::new("CarDoomed", 0.0);
        let survivor = TestProp::new("CarSurvivor", 0.0);
        scheduler.spawn(doomed.clone(), 1.0);
        scheduler.spawn(survivor.clone(), 1.0);

        drop(doomed);
        sleep(Duration::from_millis(50)).await;

        assert!(scheduler.handles()[0].is_finished());
        assert!(!scheduler.handles()[1].is_finished());
        assert!(survivor.axis_position() > 0.0);

        // The lost target is reported on the event stream
        let lost = loop {
            let event = timeout(Duration::from_secs(1), events.recv())
                .await
                .expect("event stream stalled")
                .expect("event stream closed");
            if let MotionEvent::TargetLost { entity } = event {
                break entity;
            }
        };
        assert_eq!(lost, "CarDoomed");
    }

    #[tokio::test]
    async fn test_reversal_emits_event() {
        let config = SchedulerConfig {
            bounds: AxisBounds::new(-1.0, 1.0).unwrap(),
            tick: Duration::from_millis(2),
        };
        let mut scheduler = MotionScheduler::new(config);
        let mut events = scheduler.subscribe();

        let prop = TestProp::new("Boat1", 0.9);
        scheduler.spawn(prop.clone(), 0.2);

        let reversal = loop {
            let event = timeout(Duration::from_secs(1), events.recv())
                .await
                .expect("no reversal before timeout")
                .expect("event stream closed");
            if let MotionEvent::Reversed {
                direction, position, ..
            } = event
            {
                break (direction, position);
            }
        };
        assert_eq!(reversal.0, Direction::Negative);
        // Overshoot is allowed, but only by a single step
        assert!(reversal.1 >= 1.0 && reversal.1 <= 1.2);
    }

    #[tokio::test]
    async fn test_shutdown_stops_everything() {
        let mut scheduler = MotionScheduler::new(fast_config());
        let props = [TestProp::new("Car1", 0.0), TestProp::new("Boat1", 0.0)];
        for prop in &props {
            scheduler.spawn(prop.clone(), 1.0);
        }
        sleep(Duration::from_millis(20)).await;

        scheduler.shutdown();
        sleep(Duration::from_millis(10)).await;
        let positions = [props[0].axis_position(), props[1].axis_position()];

        sleep(Duration::from_millis(50)).await;
        assert_eq!(props[0].axis_position(), positions[0]);
        assert_eq!(props[1].axis_position(), positions[1]);
        assert_eq!(scheduler.spawned(), 0);
    }
}
