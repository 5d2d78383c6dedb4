use log::trace;
use crate::models::{BodyContact, GroundContact, RigidBody};
use crate::utils::{
    add_vectors, cross_product, dot_product, matrix_vector_multiply, scale_vector,
    subtract_vectors, SimulationConfig, Vector3,
};

/// Velocity of the material point at `contact_arm` from the center of mass.
pub fn point_velocity(body: &RigidBody, contact_arm: Vector3) -> Vector3 {
    add_vectors(body.velocity(), cross_product(body.angular_velocity(), contact_arm))
}

/// Rotational share of the effective inverse mass along `normal`:
/// `n · ((I⁻¹ (r × n)) × r)`.
fn angular_inverse_mass(body: &RigidBody, contact_arm: Vector3, normal: Vector3) -> f64 {
    let inverse_inertia = body.world_inverse_inertia();
    let rotated = matrix_vector_multiply(&inverse_inertia, cross_product(contact_arm, normal));
    dot_product(normal, cross_product(rotated, contact_arm))
}

/// Applies the restitution impulse of a ground contact.
///
/// The impulse magnitude is `−(1 + e)·v_n / (1/m + n·((I⁻¹(r × n)) × r))`,
/// scaled by `config.ground_impulse_scale`, after which angular momentum is
/// multiplied by `config.ground_angular_damping`.
///
/// Returns the impulse applied, or `None` when the contact point is already
/// separating (`v_n >= 0`) and nothing was changed.
pub fn resolve_ground_contact(
    body: &mut RigidBody,
    contact: &GroundContact,
    config: &SimulationConfig,
) -> Option<Vector3> {
    let GroundContact { normal, contact_arm, .. } = *contact;
    let normal_velocity = dot_product(point_velocity(body, contact_arm), normal);
    if normal_velocity >= 0.0 {
        return None;
    }

    let denominator = body.inverse_mass() + angular_inverse_mass(body, contact_arm, normal);
    let magnitude = -(1.0 + body.restitution()) * normal_velocity / denominator;
    let impulse = scale_vector(normal, config.ground_impulse_scale * magnitude);

    body.apply_impulse(impulse, contact_arm);
    body.scale_angular_momentum(config.ground_angular_damping);

    trace!("Ground impulse {:?} at arm {:?} (v_n = {:.6})", impulse, contact_arm, normal_velocity);
    Some(impulse)
}

/// Applies equal and opposite restitution impulses to two touching bodies.
///
/// Uses the mean of the two restitution coefficients. The contact normal
/// points from `b` toward `a`, so `a` receives `+j·n` and `b` receives `−j·n`.
///
/// Returns the impulse applied to `a`, or `None` when the bodies are already
/// separating at the contact point.
pub fn resolve_body_contact(a: &mut RigidBody, b: &mut RigidBody, contact: &BodyContact) -> Option<Vector3> {
    let BodyContact { normal, contact_arm_a, contact_arm_b, .. } = *contact;

    let relative_velocity = subtract_vectors(point_velocity(a, contact_arm_a), point_velocity(b, contact_arm_b));
    let normal_velocity = dot_product(relative_velocity, normal);
    if normal_velocity >= 0.0 {
        return None;
    }

    let restitution = (a.restitution() + b.restitution()) / 2.0;
    let denominator = a.inverse_mass()
        + b.inverse_mass()
        + angular_inverse_mass(a, contact_arm_a, normal)
        + angular_inverse_mass(b, contact_arm_b, normal);
    let magnitude = -(1.0 + restitution) * normal_velocity / denominator;
    let impulse = scale_vector(normal, magnitude);

    a.apply_impulse(impulse, contact_arm_a);
    b.apply_impulse(scale_vector(impulse, -1.0), contact_arm_b);

    trace!("Body impulse {:?} (v_n = {:.6}, e = {})", impulse, normal_velocity, restitution);
    Some(impulse)
}

/// Lifts a resting ground contact to `target_velocity` along the normal.
///
/// Replaces the bounce when the contact point arrives too slowly to bounce.
/// The caller picks the target so that gravity brings the point back onto
/// the plane by the end of the sub-step. No restitution, impulse scale or
/// angular damping is applied.
///
/// Returns the impulse applied, or `None` when the point already moves away
/// from the plane at least that fast.
pub fn support_ground_contact(body: &mut RigidBody, contact: &GroundContact, target_velocity: f64) -> Option<Vector3> {
    let GroundContact { normal, contact_arm, .. } = *contact;
    let normal_velocity = dot_product(point_velocity(body, contact_arm), normal);
    let deficit = target_velocity - normal_velocity;
    if deficit <= 0.0 {
        return None;
    }

    let denominator = body.inverse_mass() + angular_inverse_mass(body, contact_arm, normal);
    let impulse = scale_vector(normal, deficit / denominator);
    body.apply_impulse(impulse, contact_arm);

    trace!("Ground support {:?} at arm {:?} (v_n = {:.6})", impulse, contact_arm, normal_velocity);
    Some(impulse)
}

/// Which bodies of a resting contact the support impulse may move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movable {
    Both,
    /// `b` is held up by something else and acts as immovable.
    OnlyA,
    /// `a` is held up by something else and acts as immovable.
    OnlyB,
}

/// Cancels the approach of two bodies in resting contact.
///
/// The relative normal velocity at the contact point is brought to zero.
/// A body excluded by `movable` contributes nothing to the effective mass and
/// receives no impulse, so a body resting on a supported one simply takes on
/// its motion.
///
/// Returns the impulse on `a` (the one `b` would receive is its negation), or
/// `None` when the bodies are not approaching.
pub fn support_body_contact(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &BodyContact,
    movable: Movable,
) -> Option<Vector3> {
    let BodyContact { normal, contact_arm_a, contact_arm_b, .. } = *contact;

    let relative_velocity = subtract_vectors(point_velocity(a, contact_arm_a), point_velocity(b, contact_arm_b));
    let normal_velocity = dot_product(relative_velocity, normal);
    if normal_velocity >= 0.0 {
        return None;
    }

    let (moves_a, moves_b) = match movable {
        Movable::Both => (true, true),
        Movable::OnlyA => (true, false),
        Movable::OnlyB => (false, true),
    };
    let mut denominator = 0.0;
    if moves_a {
        denominator += a.inverse_mass() + angular_inverse_mass(a, contact_arm_a, normal);
    }
    if moves_b {
        denominator += b.inverse_mass() + angular_inverse_mass(b, contact_arm_b, normal);
    }
    let impulse = scale_vector(normal, -normal_velocity / denominator);

    if moves_a {
        a.apply_impulse(impulse, contact_arm_a);
    }
    if moves_b {
        b.apply_impulse(scale_vector(impulse, -1.0), contact_arm_b);
    }

    trace!("Body support {:?} ({:?}, v_n = {:.6})", impulse, movable, normal_velocity);
    Some(impulse)
}
