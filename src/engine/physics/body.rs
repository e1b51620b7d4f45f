use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Common rigid body and collider configurations for a top-down scene
pub mod presets {
    use super::*;

    /// Player body: kinematic, driven by the character controller
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        RigidBodyBuilder::kinematic_position_based()
            .translation(vector![x, y])
            .lock_rotations()
            .can_sleep(false)
            .build()
    }

    /// Solid player collider (capsule lying on its side, like a shadow blob)
    pub fn player_collider(radius: Real, half_width: Real) -> Collider {
        ColliderBuilder::capsule_x(half_width, radius)
            .collision_groups(CollisionGroups::Player.to_interaction_groups())
            .friction(0.0)
            .build()
    }

    /// Hurtbox sensor that receives hits for its parent body
    pub fn hurtbox_sensor(half_width: Real, half_height: Real) -> Collider {
        sensor(half_width, half_height, CollisionGroups::Hurtbox)
    }

    /// Hitbox sensor that deals damage to hurtboxes
    pub fn hitbox_sensor(half_width: Real, half_height: Real) -> Collider {
        sensor(half_width, half_height, CollisionGroups::Hitbox)
    }

    /// Static body for walls and hazards
    pub fn fixed_body(x: Real, y: Real) -> RigidBody {
        RigidBodyBuilder::fixed().translation(vector![x, y]).build()
    }

    /// Solid wall collider
    pub fn wall_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::World.to_interaction_groups())
            .build()
    }

    fn sensor(half_width: Real, half_height: Real, group: CollisionGroups) -> Collider {
        ColliderBuilder::cuboid(half_width, half_height)
            .sensor(true)
            .collision_groups(group.to_interaction_groups())
            .active_events(ActiveEvents::COLLISION_EVENTS)
            // Hurtboxes ride kinematic bodies and hitboxes may be fixed
            .active_collision_types(ActiveCollisionTypes::all())
            .build()
    }
}
