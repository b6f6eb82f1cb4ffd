//! Minimal 2D physics: gravity integration for the flyer and AABB contact
//! tests against pipes and the floor.

use crate::core::config::{FlyerConfig, WorldConfig};
use crate::level::pipe::PipeId;

/// Whether the body is integrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    Static,
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_center(center: Vec2, half_width: f64, half_height: f64) -> Self {
        Self::new(
            center.x - half_width,
            center.y - half_height,
            center.x + half_width,
            center.y + half_height,
        )
    }

    /// Strict overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }
}

/// Position, velocity and integration mode of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mode: BodyMode,
}

impl Body {
    pub fn new_static(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            mode: BodyMode::Static,
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_mode(&mut self, mode: BodyMode) {
        self.mode = mode;
        if mode == BodyMode::Static {
            self.velocity = Vec2::ZERO;
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.mode == BodyMode::Dynamic
    }
}

/// What the flyer ran into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    Pipe(PipeId),
    Floor,
}

/// Gravity and world bounds for integration.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsWorld {
    gravity: f64,
    terminal_velocity: f64,
    floor_y: f64,
    ceiling_y: f64,
    half_width: f64,
    half_height: f64,
    /// Set while a contact persists, so the trigger fires on entry only.
    touching: bool,
}

impl PhysicsWorld {
    pub fn new(world: &WorldConfig, flyer: &FlyerConfig) -> Self {
        Self {
            gravity: flyer.gravity,
            terminal_velocity: flyer.terminal_velocity,
            floor_y: world.floor_y(),
            ceiling_y: world.ceiling_y(),
            half_width: flyer.half_width,
            half_height: flyer.half_height,
            touching: false,
        }
    }

    /// Semi-implicit Euler step. Static bodies are left untouched.
    pub fn integrate(&self, body: &mut Body, dt: f64) {
        if !body.is_dynamic() {
            return;
        }
        body.velocity.y = (body.velocity.y + self.gravity * dt).max(self.terminal_velocity);
        body.position.x += body.velocity.x * dt;
        body.position.y += body.velocity.y * dt;

        let ceiling = self.ceiling_y - self.half_height;
        if body.position.y > ceiling {
            body.position.y = ceiling;
            body.velocity.y = body.velocity.y.min(0.0);
        }
    }

    pub fn bounds_of(&self, body: &Body) -> Aabb {
        Aabb::from_center(body.position, self.half_width, self.half_height)
    }

    /// First overlap between the body and any of the given colliders, or the floor.
    pub fn find_contact<I>(&self, body: &Body, colliders: I) -> Option<Contact>
    where
        I: IntoIterator<Item = (PipeId, Aabb)>,
    {
        let bounds = self.bounds_of(body);
        if bounds.min_y <= self.floor_y {
            return Some(Contact::Floor);
        }
        colliders
            .into_iter()
            .find(|(_, collider)| !collider.is_empty() && bounds.overlaps(collider))
            .map(|(id, _)| Contact::Pipe(id))
    }

    /// Contact detection with trigger-enter semantics: returns a contact only
    /// on the step where overlap begins.
    pub fn trigger_enter<I>(&mut self, body: &Body, colliders: I) -> Option<Contact>
    where
        I: IntoIterator<Item = (PipeId, Aabb)>,
    {
        let contact = self.find_contact(body, colliders);
        let entered = contact.is_some() && !self.touching;
        self.touching = contact.is_some();
        if entered {
            contact
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(&WorldConfig::default(), &FlyerConfig::default())
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut body = Body::new_static(Vec2::new(0.0, 10.0));
        world().integrate(&mut body, 0.5);
        assert_eq!(body.position, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_gravity_pulls_dynamic_body_down() {
        let mut body = Body::new_static(Vec2::ZERO);
        body.set_mode(BodyMode::Dynamic);
        world().integrate(&mut body, 0.1);
        assert!(body.velocity.y < 0.0);
        assert!(body.position.y < 0.0);
    }

    #[test]
    fn test_terminal_velocity_caps_fall() {
        let mut body = Body::new_static(Vec2::ZERO);
        body.set_mode(BodyMode::Dynamic);
        body.set_velocity(Vec2::new(0.0, -1000.0));
        world().integrate(&mut body, 0.1);
        assert!(body.velocity.y >= FlyerConfig::default().terminal_velocity);
    }

    #[test]
    fn test_ceiling_clamps_position() {
        let mut body = Body::new_static(Vec2::new(0.0, 45.0));
        body.set_mode(BodyMode::Dynamic);
        body.set_velocity(Vec2::new(0.0, 500.0));
        world().integrate(&mut body, 0.1);
        assert!(body.position.y <= 50.0 - FlyerConfig::default().half_height + 1e-9);
        assert!(body.velocity.y <= 0.0);
    }

    #[test]
    fn test_switching_to_static_clears_velocity() {
        let mut body = Body::new_static(Vec2::ZERO);
        body.set_mode(BodyMode::Dynamic);
        body.set_velocity(Vec2::new(0.0, 100.0));
        body.set_mode(BodyMode::Static);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(0.0, 0.0, 2.0, 2.0);
        assert!(a.overlaps(&Aabb::new(1.0, 1.0, 3.0, 3.0)));
        assert!(!a.overlaps(&Aabb::new(2.0, 0.0, 4.0, 2.0)));
        assert!(!a.overlaps(&Aabb::new(5.0, 5.0, 6.0, 6.0)));
    }

    #[test]
    fn test_floor_contact() {
        let body = Body::new_static(Vec2::new(0.0, -48.0));
        assert_eq!(world().find_contact(&body, Vec::new()), Some(Contact::Floor));
    }

    #[test]
    fn test_pipe_contact() {
        let body = Body::new_static(Vec2::new(0.0, 0.0));
        let colliders = vec![
            (1, Aabb::new(50.0, -50.0, 60.0, 0.0)),
            (2, Aabb::new(-5.0, -50.0, 5.0, 1.0)),
        ];
        assert_eq!(world().find_contact(&body, colliders), Some(Contact::Pipe(2)));
    }

    #[test]
    fn test_empty_collider_ignored() {
        let body = Body::new_static(Vec2::new(0.0, 0.0));
        let colliders = vec![(1, Aabb::new(-5.0, 0.0, 5.0, 0.0))];
        assert_eq!(world().find_contact(&body, colliders), None);
    }

    #[test]
    fn test_trigger_fires_on_enter_only() {
        let mut physics = world();
        let body = Body::new_static(Vec2::new(0.0, 0.0));
        let collider = || vec![(7, Aabb::new(-5.0, -5.0, 5.0, 5.0))];
        assert_eq!(physics.trigger_enter(&body, collider()), Some(Contact::Pipe(7)));
        assert_eq!(physics.trigger_enter(&body, collider()), None);
        assert_eq!(physics.trigger_enter(&body, Vec::new()), None);
        assert_eq!(physics.trigger_enter(&body, collider()), Some(Contact::Pipe(7)));
    }
}
