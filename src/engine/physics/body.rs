use rapier3d::na::Unit;
use rapier3d::prelude::*;

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    can_sleep: bool,
    linear_damping: Real,
    angular_damping: Real,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            can_sleep: true,
            linear_damping: 0.01,
            angular_damping: 0.01,
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            can_sleep: false,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real, z: Real) -> Self {
        self.position = Isometry::translation(x, y, z);
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Set linear damping (air resistance)
    pub fn linear_damping(mut self, damping: Real) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .can_sleep(self.can_sleep)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder3D {
    shape: SharedShape,
    friction: Real,
    restitution: Real,
    density: Option<Real>,
    mass: Option<Real>,
}

impl ColliderBuilder3D {
    /// Create a box-shaped collider
    pub fn box_shape(half_x: Real, half_y: Real, half_z: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(half_x, half_y, half_z),
            friction: 0.5,
            restitution: 0.0,
            density: Some(1.0),
            mass: None,
        }
    }

    /// Create an infinite plane collider facing `normal`
    pub fn half_space(normal: Unit<Vector<Real>>) -> Self {
        Self {
            shape: SharedShape::halfspace(normal),
            friction: 0.5,
            restitution: 0.0,
            density: None,
            mass: None,
        }
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set mass directly (overrides density)
    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = Some(mass);
        self.density = None;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        let mut builder = rapier3d::prelude::ColliderBuilder::new(self.shape)
            .friction(self.friction)
            .restitution(self.restitution);

        if let Some(mass) = self.mass {
            builder = builder.mass(mass);
        } else if let Some(density) = self.density {
            builder = builder.density(density);
        }

        builder.build()
    }
}

/// Rigid body configurations for the game's objects
pub mod presets {
    use super::*;

    /// The ground: a fixed body at the origin
    pub fn ground_body() -> RigidBody {
        BodyBuilder::new_fixed().build()
    }

    /// The ground collider: an infinite horizontal plane facing up
    pub fn ground_collider(friction: Real) -> Collider {
        ColliderBuilder3D::half_space(Vector::y_axis())
            .friction(friction)
            .build()
    }

    /// The car body (dynamic, never sleeps so controls always apply)
    pub fn car_body(x: Real, y: Real, z: Real, linear_damping: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y, z)
            .can_sleep(false)
            .linear_damping(linear_damping)
            .build()
    }

    /// The car collider (box shape with a fixed total mass)
    pub fn car_collider(half_extents: [Real; 3], mass: Real, friction: Real) -> Collider {
        let [hx, hy, hz] = half_extents;
        ColliderBuilder3D::box_shape(hx, hy, hz)
            .mass(mass)
            .friction(friction)
            .restitution(0.0)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic()
            .position(10.0, 20.0, 30.0)
            .can_sleep(false)
            .linear_damping(0.5)
            .build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
        assert_eq!(body.translation().z, 30.0);
        assert!(!body.is_sleeping());
        assert_eq!(body.linear_damping(), 0.5);
        assert_eq!(body.gravity_scale(), 1.0);
    }

    #[test]
    fn test_collider_builder_box() {
        let collider = ColliderBuilder3D::box_shape(1.0, 2.0, 3.0)
            .friction(0.3)
            .build();

        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.3);
        let cuboid = collider.shape().as_cuboid().unwrap();
        assert_eq!(cuboid.half_extents, Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_car_preset() {
        let body = presets::car_body(0.0, 1.0, 0.0, 0.01);
        let collider = presets::car_collider([1.0, 0.5, 2.0], 150.0, 0.3);

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!((collider.mass() - 150.0).abs() < 1e-3);
        assert_eq!(collider.friction(), 0.3);
    }

    #[test]
    fn test_ground_preset() {
        let body = presets::ground_body();
        let collider = presets::ground_collider(0.3);

        assert_eq!(body.body_type(), RigidBodyType::Fixed);
        assert!(collider.shape().as_halfspace().is_some());
    }
}
