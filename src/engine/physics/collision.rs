use rapier2d::prelude::*;
use std::sync::Mutex;

/// Collision layers of a top-down room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Static level geometry (walls, cliffs, props)
    World = 0b0001,

    /// Solid body of a character, blocked by the world
    Player = 0b0010,

    /// Sensor on a character that receives hits
    Hurtbox = 0b0100,

    /// Sensor that deals damage (hazards, enemy attacks)
    Hitbox = 0b1000,
}

impl CollisionGroups {
    fn bit(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// The layer this one interacts with. Solids pair with solids and
    /// sensors with sensors, never across.
    pub fn counterpart(self) -> CollisionGroups {
        match self {
            CollisionGroups::World => CollisionGroups::Player,
            CollisionGroups::Player => CollisionGroups::World,
            CollisionGroups::Hurtbox => CollisionGroups::Hitbox,
            CollisionGroups::Hitbox => CollisionGroups::Hurtbox,
        }
    }

    pub fn to_interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(self.bit(), self.counterpart().bit())
    }
}

/// Intersection change between two colliders, as seen after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    Started(ColliderHandle, ColliderHandle),
    Stopped(ColliderHandle, ColliderHandle),
}

impl CollisionEvent {
    /// The collider paired with `collider` in this event, if it takes part
    pub fn other(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        let (a, b) = match *self {
            CollisionEvent::Started(a, b) | CollisionEvent::Stopped(a, b) => (a, b),
        };
        if a == collider {
            Some(b)
        } else if b == collider {
            Some(a)
        } else {
            None
        }
    }

    /// If this is a start event involving `collider`, return the other collider
    pub fn started_with(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        match self {
            CollisionEvent::Started(..) => self.other(collider),
            CollisionEvent::Stopped(..) => None,
        }
    }
}

impl From<rapier2d::prelude::CollisionEvent> for CollisionEvent {
    fn from(event: rapier2d::prelude::CollisionEvent) -> Self {
        match event {
            rapier2d::prelude::CollisionEvent::Started(a, b, _) => CollisionEvent::Started(a, b),
            rapier2d::prelude::CollisionEvent::Stopped(a, b, _) => CollisionEvent::Stopped(a, b),
        }
    }
}

/// Collects events raised during a step until the world drains them
#[derive(Default)]
pub struct CollisionEventQueue {
    events: Mutex<Vec<CollisionEvent>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued events, leaving the queue empty
    pub fn drain(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.push(event.into());
    }

    // Nothing here reacts to contact forces
    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CollisionGroups; 4] = [
        CollisionGroups::World,
        CollisionGroups::Player,
        CollisionGroups::Hurtbox,
        CollisionGroups::Hitbox,
    ];

    #[test]
    fn test_layers_pair_symmetrically() {
        for group in ALL {
            assert_eq!(group.counterpart().counterpart(), group);
            assert!(group
                .to_interaction_groups()
                .test(group.counterpart().to_interaction_groups()));
        }
    }

    #[test]
    fn test_sensors_never_touch_solids() {
        for sensor in [CollisionGroups::Hurtbox, CollisionGroups::Hitbox] {
            for solid in [CollisionGroups::World, CollisionGroups::Player] {
                assert!(!sensor
                    .to_interaction_groups()
                    .test(solid.to_interaction_groups()));
            }
        }
    }

    #[test]
    fn test_event_other_side() {
        let a = ColliderHandle::from_raw_parts(0, 0);
        let b = ColliderHandle::from_raw_parts(1, 0);
        let c = ColliderHandle::from_raw_parts(2, 0);

        let started = CollisionEvent::Started(a, b);
        assert_eq!(started.started_with(b), Some(a));
        assert_eq!(started.started_with(c), None);

        let stopped = CollisionEvent::Stopped(a, b);
        assert_eq!(stopped.other(a), Some(b));
        assert_eq!(stopped.started_with(a), None);
    }

    #[test]
    fn test_queue_drain_empties() {
        let queue = CollisionEventQueue::new();
        let a = ColliderHandle::from_raw_parts(0, 0);
        let b = ColliderHandle::from_raw_parts(1, 0);
        queue.push(CollisionEvent::Started(a, b));

        assert_eq!(queue.drain(), vec![CollisionEvent::Started(a, b)]);
        assert!(queue.drain().is_empty());
    }
}
