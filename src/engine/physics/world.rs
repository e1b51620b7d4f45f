use rapier2d::control::KinematicCharacterController;
use rapier2d::prelude::*;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue, CollisionGroups};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Top-down physics world: no gravity, kinematic characters, sensor hitboxes
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    /// Query pipeline for character sweeps
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Slide-along-walls mover shared by every kinematic character
    character_controller: KinematicCharacterController,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a new top-down physics world stepping at 60 Hz
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / 60.0;

        let character_controller = KinematicCharacterController {
            // Top-down: there is no floor to snap to or slope to climb
            up: Vector::y_axis(),
            snap_to_ground: None,
            autostep: None,
            ..KinematicCharacterController::default()
        };

        Self {
            gravity: vector![0.0, 0.0],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            character_controller,
            collision_event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Translation of a body, if it exists
    pub fn body_translation(&self, handle: RigidBodyHandle) -> Option<Vector<Real>> {
        self.rigid_body_set.get(handle).map(|body| *body.translation())
    }

    /// Sweep a kinematic character by `velocity * dt`, sliding along walls.
    ///
    /// The body reaches its new position on the next `step`. Returns the
    /// velocity actually achieved after obstacles were resolved.
    pub fn move_character(
        &mut self,
        body: RigidBodyHandle,
        collider: ColliderHandle,
        velocity: Vector<Real>,
        dt: Real,
    ) -> Vector<Real> {
        if dt <= 0.0 {
            return Vector::zeros();
        }
        let (Some(rigid_body), Some(shape)) =
            (self.rigid_body_set.get(body), self.collider_set.get(collider))
        else {
            return Vector::zeros();
        };
        let position = *rigid_body.position();

        let filter = QueryFilter::default()
            .exclude_rigid_body(body)
            .exclude_sensors()
            .groups(CollisionGroups::Player.to_interaction_groups());

        let movement = self.character_controller.move_shape(
            dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            shape.shape(),
            &position,
            velocity * dt,
            filter,
            |_| {},
        );

        if let Some(rigid_body) = self.rigid_body_set.get_mut(body) {
            rigid_body.set_next_kinematic_translation(position.translation.vector + movement.translation);
        }

        movement.translation / dt
    }

    /// Colliders currently intersecting the given sensor
    pub fn intersections_with(&self, sensor: ColliderHandle) -> Vec<ColliderHandle> {
        self.narrow_phase
            .intersection_pairs_with(sensor)
            .filter(|(_, _, intersecting)| *intersecting)
            .map(|(h1, h2, _)| if h1 == sensor { h2 } else { h1 })
            .collect()
    }

    /// Take all collision events since the last call
    pub fn drain_collision_events(&mut self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.drain()
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::body::presets;
    use super::*;

    #[test]
    fn test_free_movement() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::player_body(0.0, 0.0));
        let collider = world.add_collider(presets::player_collider(4.0, 3.0), body);

        let achieved = world.move_character(body, collider, vector![60.0, 0.0], 1.0 / 60.0);
        world.step();

        assert!((achieved.x - 60.0).abs() < 1e-3);
        let position = world.body_translation(body).unwrap();
        assert!((position.x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::player_body(0.0, 0.0));
        let collider = world.add_collider(presets::player_collider(4.0, 3.0), body);

        let achieved = world.move_character(body, collider, vector![60.0, 0.0], 0.0);
        assert_eq!(achieved, Vector::zeros());
    }

    #[test]
    fn test_wall_blocks_character() {
        let mut world = PhysicsWorld::new();
        let wall_body = world.add_rigid_body(presets::fixed_body(20.0, 0.0));
        world.add_collider(presets::wall_collider(4.0, 100.0), wall_body);

        let body = world.add_rigid_body(presets::player_body(0.0, 0.0));
        let collider = world.add_collider(presets::player_collider(4.0, 3.0), body);

        // Populate the query pipeline before sweeping
        world.step();

        for _ in 0..120 {
            world.move_character(body, collider, vector![200.0, 0.0], 1.0 / 60.0);
            world.step();
        }

        // Wall face is at x = 18, the capsule reaches 7 units to the right
        let position = world.body_translation(body).unwrap();
        assert!(position.x < 11.5, "character went through the wall: {}", position.x);
    }

    #[test]
    fn test_sensor_overlap_reports_events_and_intersections() {
        let mut world = PhysicsWorld::new();
        let hazard = world.add_rigid_body(presets::fixed_body(0.0, 0.0));
        let hitbox = world.add_collider(presets::hitbox_sensor(5.0, 5.0), hazard);

        let body = world.add_rigid_body(presets::player_body(0.0, 0.0));
        let hurtbox = world.add_collider(presets::hurtbox_sensor(4.0, 4.0), body);

        world.step();
        world.step();

        let events = world.drain_collision_events();
        assert!(events.iter().any(|e| e.started_with(hurtbox) == Some(hitbox)));
        assert_eq!(world.intersections_with(hurtbox), vec![hitbox]);
        assert!(world.drain_collision_events().is_empty());
    }
}
