use {
    crate::{
        anchor::Anchor,
        config::Config,
        scene::{Global3, SceneSystem, WorldAnchor},
        session::TrackingSession,
    },
    bumpalo::Bump,
    hecs::{Entity, World},
    nalgebra as na,
};

pub struct SystemContext<'a> {
    pub world: &'a mut World,
    pub bump: &'a Bump,
    pub frame: u64,
}

pub trait System {
    fn name(&self) -> &str;

    fn run(&mut self, ctx: SystemContext<'_>);
}

/// Root data structure of the overlay.
///
/// Anchor batches are submitted by the tracking callback
/// and applied on the next `advance`.
pub struct Engine {
    pub world: World,
    pub session: TrackingSession,
    /// Anchor batches delivered since last frame, in arrival order.
    pending: Vec<Vec<Anchor>>,
    schedule: Vec<Box<dyn System>>,
    bump: Bump,
    frame: u64,
}

impl Engine {
    /// Creates engine with world anchor at the origin.
    pub fn new(config: &Config) -> Self {
        Self::with_anchor(config, na::Isometry3::identity())
    }

    /// Creates engine with world anchor at `iso`.
    pub fn with_anchor(config: &Config, iso: na::Isometry3<f32>) -> Self {
        let mut world = World::new();
        let anchor_node = world.spawn((Global3::from_iso(iso), WorldAnchor));

        let mut engine = Engine {
            world,
            session: TrackingSession::new(anchor_node, config.skeleton),
            pending: Vec::new(),
            schedule: Vec::new(),
            bump: Bump::new(),
            frame: 0,
        };

        engine.add_system(SceneSystem);
        engine
    }

    pub fn anchor_node(&self) -> Entity {
        self.session.anchor_node()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Queues anchors updated by the tracking subsystem.
    pub fn submit(&mut self, anchors: Vec<Anchor>) {
        if anchors.is_empty() {
            return;
        }
        self.pending.push(anchors);
    }

    /// Applies queued anchors and runs all systems once.
    pub fn advance(&mut self) {
        for batch in self.pending.drain(..) {
            tracing::trace!("Apply {} anchors", batch.len());
            self.session.did_update(&mut self.world, &batch);
        }

        for system in &mut self.schedule {
            tracing::trace!("Run system '{}'", system.name());
            system.run(SystemContext {
                world: &mut self.world,
                bump: &self.bump,
                frame: self.frame,
            });
        }

        self.bump.reset();
        self.frame += 1;
    }

    /// Adds a system to this engine.
    /// Systems run in order of addition.
    pub fn add_system<S>(&mut self, system: S) -> &mut Self
    where
        S: System + 'static,
    {
        self.schedule.push(Box::new(system));
        self
    }
}
