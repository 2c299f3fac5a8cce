use glam::Vec2;
use rapier2d::prelude::*;

use super::collision::CollisionGroups;
use crate::game::player::{BodyController, ForceMode};

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    linear_damping: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            gravity_scale: 1.0,
            linear_damping: 0.5, // Some air resistance
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            gravity_scale: 0.0,
            linear_damping: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn linear_damping(mut self, damping: Real) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (useful for player characters)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    friction_combine_rule: CoefficientCombineRule,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder2D {
    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::from_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a capsule-shaped collider (good for characters)
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        let a = point![0.0, -half_height];
        let b = point![0.0, half_height];
        Self::from_shape(SharedShape::capsule(a, b, radius))
    }

    fn from_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            friction: 0.5,
            friction_combine_rule: CoefficientCombineRule::Average,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// How this collider's friction mixes with the other collider's
    pub fn friction_combine_rule(mut self, rule: CoefficientCombineRule) -> Self {
        self.friction_combine_rule = rule;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .friction_combine_rule(self.friction_combine_rule)
            .restitution(self.restitution)
            .density(self.density)
            .build()
    }
}

/// Common rigid body configurations for the level and the player
pub mod presets {
    use super::*;

    /// Create a player character body (dynamic, rotation locked)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .gravity_scale(1.0)
            .linear_damping(0.0) // Movement states own horizontal speed
            .can_sleep(false) // Players should never sleep
            .build()
    }

    /// Create a player character collider (capsule shape)
    pub fn player_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = ((height / 2.0) - radius).max(0.0); // Subtract radius to get capsule half-height

        ColliderBuilder2D::capsule(half_height, radius)
            .collision_groups(CollisionGroups::Player)
            .friction(0.0)
            // Contacts stay frictionless whatever the other collider uses
            .friction_combine_rule(CoefficientCombineRule::Min)
            .restitution(0.0)
            .density(1.0)
            .build()
    }

    /// Create a platform body (fixed/static)
    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a platform collider (box shape)
    pub fn platform_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Platform)
            .friction(0.3)
            .restitution(0.0)
            .build()
    }
}

/// [`BodyController`] over a rapier rigid body, borrowed for one call
pub struct RapierBody<'w> {
    body: &'w mut RigidBody,
}

impl<'w> RapierBody<'w> {
    pub fn new(body: &'w mut RigidBody) -> Self {
        Self { body }
    }

    /// Clear forces accumulated by previous steps.
    /// Rapier keeps user forces until they are reset.
    pub fn reset_forces(&mut self) {
        self.body.reset_forces(true);
    }
}

impl BodyController for RapierBody<'_> {
    fn velocity(&self) -> Vec2 {
        let linvel = self.body.linvel();
        Vec2::new(linvel.x, linvel.y)
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.body.set_linvel(vector![velocity.x, velocity.y], true);
    }

    fn gravity_scale(&self) -> f32 {
        self.body.gravity_scale()
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.body.set_gravity_scale(scale, true);
    }

    fn apply_force(&mut self, force: Vec2, mode: ForceMode) {
        let force = vector![force.x, force.y];
        match mode {
            ForceMode::Continuous => self.body.add_force(force, true),
            ForceMode::Impulse => self.body.apply_impulse(force, true),
        }
    }

    fn mass(&self) -> f32 {
        self.body.mass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::PhysicsWorld;
    use approx::assert_relative_eq;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic().position(10.0, 20.0).build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
    }

    #[test]
    fn test_player_preset() {
        let body = presets::player_body(0.0, 0.0);
        let collider = presets::player_collider(1.0, 2.0);

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert_eq!(body.linear_damping(), 0.0);
        assert_eq!(collider.friction(), 0.0);
        assert_eq!(collider.friction_combine_rule(), CoefficientCombineRule::Min);
    }

    #[test]
    fn test_player_slides_down_wall_it_is_pushed_into() {
        let mut world = PhysicsWorld::new();
        let wall = world.add_rigid_body(presets::platform_body(1.5, 5.0));
        world.add_collider(presets::platform_collider(1.0, 20.0), wall);
        let handle = world.add_rigid_body(presets::player_body(0.0, 5.0));
        world.add_collider(presets::player_collider(1.0, 2.0), handle);

        for _ in 0..60 {
            let body = world.get_rigid_body_mut(handle).unwrap();
            RapierBody::new(body).set_velocity_x(10.0);
            world.step();
        }

        let body = world.get_rigid_body(handle).unwrap();
        assert!(body.translation().x < 0.6, "held back by the wall");
        assert!(body.translation().y < 3.0, "friction must not hold the player up");
    }

    #[test]
    fn test_rapier_body_velocity_and_gravity() {
        let mut body = presets::player_body(0.0, 0.0);
        let mut adapter = RapierBody::new(&mut body);

        adapter.set_velocity(Vec2::new(3.0, -1.0));
        adapter.set_velocity_y(4.0);
        adapter.set_gravity_scale(2.0);

        assert_eq!(adapter.velocity(), Vec2::new(3.0, 4.0));
        assert_eq!(adapter.gravity_scale(), 2.0);
    }

    #[test]
    fn test_rapier_body_impulse_changes_velocity() {
        let mut world = PhysicsWorld::with_gravity(vector![0.0, 0.0]);
        let handle = world.add_rigid_body(presets::player_body(0.0, 0.0));
        world.add_collider(presets::player_collider(1.0, 2.0), handle);
        // Mass properties are computed by the pipeline
        world.step();

        let body = world.get_rigid_body_mut(handle).unwrap();
        let mut adapter = RapierBody::new(body);
        let mass = adapter.mass();
        assert!(mass > 0.0);

        adapter.apply_force(Vec2::new(0.0, 5.0 * mass), ForceMode::Impulse);
        assert_relative_eq!(adapter.velocity().y, 5.0, epsilon = 1e-4);
    }
}
