use log::{debug, info, trace, warn};
use crate::interactions::{
    collect_candidate_pairs, point_velocity, resolve_body_contact, resolve_ground_contact,
    support_body_contact, support_ground_contact, Aabb, ContinuousDetection, Movable, NarrowPhase,
};
use crate::models::{BodyInit, Collision, Geometry, RigidBody};
use crate::simulation::{FrameReport, ResolverState, SimulationStats};
use crate::utils::{
    add_vectors, dot_product, subtract_vectors, vector_magnitude, PhysicsError, SimulationConfig,
    Vector3, ZERO_VECTOR,
};

/// A frame is finished once less than this fraction of the step is left.
const TIME_EPSILON: f64 = 1e-9;

/// Contacts within this fraction of the step from the sub-step start happen
/// "now" and cannot advance time on their own.
const INSTANT_FRACTION: f64 = 1e-6;

/// Contacts approaching slower than the speed gravity adds over this many
/// steps come to rest instead of bouncing.
const RESTING_STEPS: f64 = 2.0;

/// The bodies a contact involves, used to remember contacts within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactKey {
    Ground(usize),
    Pair(usize, usize),
}

impl ContactKey {
    fn of(collision: &Collision) -> Self {
        match *collision {
            Collision::Ground { body, .. } => ContactKey::Ground(body),
            Collision::Body { body_a, body_b, .. } => ContactKey::Pair(body_a.min(body_b), body_a.max(body_b)),
        }
    }
}

/// How the resolver handled one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactOutcome {
    /// A restitution impulse was applied.
    Bounced,
    /// A slow contact was held up by a support impulse.
    Supported,
    /// Nothing needed to change.
    Unchanged,
}

/// A world of rigid bodies above an optional ground plane, advanced one fixed
/// frame at a time.
///
/// Each frame is cut into sub-steps at contact instants: every body is
/// integrated over the remaining time, the earliest contact is found, all
/// bodies are rewound and re-integrated to that instant, and an impulse is
/// applied before the next sub-step.
///
/// Contacts that arrive too slowly to bounce are treated as resting: the
/// body gets just enough speed along the normal for gravity to bring it back
/// onto the surface by the end of the sub-step, and bodies resting on a
/// supported body follow it. A contact found at the very start of a sub-step
/// that needs no impulse is ignored for the rest of the frame, so it cannot
/// stall the clock.
///
/// The narrow phase is pluggable through `D`; the default is
/// [`ContinuousDetection`].
#[derive(Debug)]
pub struct Simulation<D: NarrowPhase = ContinuousDetection> {
    config: SimulationConfig,
    bodies: Vec<RigidBody>,
    detector: D,
    state: ResolverState,
    elapsed: f64,
    stats: SimulationStats,
    bounds: Vec<Aabb>,
    candidate_pairs: Vec<(usize, usize)>,
    supported: Vec<bool>,
    settled: Vec<ContactKey>,
}

impl Simulation<ContinuousDetection> {
    /// Creates an empty simulation.
    ///
    /// # Errors
    /// Any error from [`SimulationConfig::validate`].
    ///
    /// # Example
    /// ```
    /// use rs_rigid_body::{BodyInit, Geometry, Simulation, SimulationConfig};
    ///
    /// let mut simulation = Simulation::new(SimulationConfig::default()).unwrap();
    /// let cube = Geometry::cube(1.0).unwrap();
    /// simulation.add_body(cube, 1.0, BodyInit::at((0.0, 3.0, 0.0))).unwrap();
    ///
    /// let report = simulation.step_frame();
    /// assert_eq!(report.contacts_resolved, 0);
    /// assert!(simulation.bodies()[0].position().1 < 3.0);
    /// ```
    pub fn new(config: SimulationConfig) -> Result<Self, PhysicsError> {
        Self::with_detector(config, ContinuousDetection)
    }
}

impl<D: NarrowPhase> Simulation<D> {
    /// Creates an empty simulation with a custom narrow phase.
    pub fn with_detector(config: SimulationConfig, detector: D) -> Result<Self, PhysicsError> {
        config.validate()?;
        info!(
            "Simulation created: {:?} integration, step {:.6} s, {} iterations per frame",
            config.integration_method, config.step_size, config.max_iterations
        );
        Ok(Simulation {
            config,
            bodies: Vec::new(),
            detector,
            state: ResolverState::Idle,
            elapsed: 0.0,
            stats: SimulationStats::default(),
            bounds: Vec::new(),
            candidate_pairs: Vec::new(),
            supported: Vec::new(),
            settled: Vec::new(),
        })
    }

    /// Builds a body with the configured sampling resolution and adds it.
    ///
    /// Returns the body's index. A body that fails construction is not added.
    pub fn add_body(&mut self, geometry: Geometry, mass: f64, init: BodyInit) -> Result<usize, PhysicsError> {
        let body = RigidBody::new(geometry, mass, init, self.config.sample_resolution)?;
        Ok(self.insert_body(body))
    }

    /// Adds an already constructed body and returns its index.
    pub fn insert_body(&mut self, body: RigidBody) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Removes and returns the body at `index`; later bodies shift down by one.
    pub fn remove_body(&mut self, index: usize) -> Option<RigidBody> {
        if index < self.bodies.len() {
            Some(self.bodies.remove(index))
        } else {
            None
        }
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&RigidBody> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut RigidBody> {
        self.bodies.get_mut(index)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Simulated seconds advanced so far, excluding dropped time.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Sum of the linear momenta of all bodies.
    pub fn total_linear_momentum(&self) -> Vector3 {
        self.bodies
            .iter()
            .fold(ZERO_VECTOR, |sum, body| add_vectors(sum, body.state().linear_momentum))
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(RigidBody::kinetic_energy).sum()
    }

    /// Appends the world-space triangles of every body, in body order.
    pub fn write_world_triangles(&self, out: &mut Vec<f64>) {
        for body in &self.bodies {
            body.write_world_triangles(out);
        }
    }

    /// Advances the world by one `step_size`, resolving contacts in time order.
    pub fn step_frame(&mut self) -> FrameReport {
        let step = self.config.step_size;
        let instant = INSTANT_FRACTION * step;
        let mut time_remaining = step;
        let mut report = FrameReport::default();
        self.state = ResolverState::SubStepping;
        self.supported.clear();
        self.supported.resize(self.bodies.len(), false);
        self.settled.clear();

        while time_remaining > TIME_EPSILON * step {
            if report.iterations >= self.config.max_iterations {
                report.budget_exceeded = true;
                break;
            }
            report.iterations += 1;

            for body in &mut self.bodies {
                body.snapshot();
                body.integrate(time_remaining, &self.config);
            }

            let collision = match self.find_earliest_collision(time_remaining, instant) {
                Some(collision) => collision,
                None => {
                    time_remaining = 0.0;
                    break;
                }
            };

            let time = collision.time();
            trace!("Iteration {}: earliest contact {:?}", report.iterations, collision);

            for body in &mut self.bodies {
                body.restore_to_previous();
                if time > 0.0 {
                    body.integrate(time, &self.config);
                }
            }
            let collision = collision.rebased(&self.bodies);

            match self.resolve(&collision, time_remaining - time) {
                ContactOutcome::Bounced => report.contacts_resolved += 1,
                ContactOutcome::Supported => report.resting_contacts += 1,
                ContactOutcome::Unchanged if time <= instant => {
                    trace!("Ignoring {:?} for the rest of the frame", ContactKey::of(&collision));
                    self.settled.push(ContactKey::of(&collision));
                }
                ContactOutcome::Unchanged => {}
            }
            report.first_contact_offset.get_or_insert(step - time_remaining + time);
            time_remaining -= time;
        }

        if report.budget_exceeded {
            report.time_dropped = time_remaining;
            warn!(
                "Iteration budget of {} exhausted at t = {:.6} s, dropping {:.3e} s",
                self.config.max_iterations, self.elapsed, time_remaining
            );
        }

        self.elapsed += step - report.time_dropped;
        self.stats.record_frame(&report);
        self.state = ResolverState::Idle;
        report
    }

    /// Runs the broad and narrow phase over the current sub-step of length `h`
    /// and returns the earliest contact, skipping contacts settled earlier in
    /// the frame that again show up within `instant` of the start.
    fn find_earliest_collision(&mut self, h: f64, instant: f64) -> Option<Collision> {
        collect_candidate_pairs(&self.bodies, &mut self.bounds, &mut self.candidate_pairs);

        let settled = &self.settled;
        let mut earliest: Option<Collision> = None;
        let mut consider = |candidate: Option<Collision>| {
            if let Some(collision) = candidate {
                if collision.time() <= instant && settled.contains(&ContactKey::of(&collision)) {
                    return;
                }
                if earliest.map_or(true, |current| collision.time() < current.time()) {
                    earliest = Some(collision);
                }
            }
        };

        if self.config.ground_contact {
            for (index, (body, bounds)) in self.bodies.iter().zip(&self.bounds).enumerate() {
                if bounds.reaches_ground() {
                    consider(self.detector.ground_contact(index, body, h));
                }
            }
        }

        for &(i, j) in &self.candidate_pairs {
            consider(self.detector.body_contact(i, &self.bodies[i], j, &self.bodies[j], h));
        }

        earliest
    }

    /// Approach speed below which a contact rests instead of bouncing.
    fn resting_speed(&self) -> f64 {
        RESTING_STEPS * vector_magnitude(self.config.gravity) * self.config.step_size
    }

    /// Applies the impulse for `collision`, with `remaining` seconds of the
    /// sub-step left after it.
    fn resolve(&mut self, collision: &Collision, remaining: f64) -> ContactOutcome {
        let resting_speed = self.resting_speed();
        match *collision {
            Collision::Ground { body, contact } => {
                let config = self.config;
                let target = match self.bodies.get_mut(body) {
                    Some(target) => target,
                    None => return ContactOutcome::Unchanged,
                };
                let approach = -dot_product(point_velocity(target, contact.contact_arm), contact.normal);

                let outcome = if approach > resting_speed {
                    let impulse = resolve_ground_contact(target, &contact, &config);
                    if let Some(impulse) = impulse {
                        debug!("Ground contact: body {} received impulse {:?}", body, impulse);
                    }
                    impulse.map_or(ContactOutcome::Unchanged, |_| ContactOutcome::Bounced)
                } else {
                    // Speed at which gravity returns the point to the plane after `remaining`
                    let pull = (-dot_product(config.gravity, contact.normal)).max(0.0);
                    let impulse = support_ground_contact(target, &contact, 0.5 * pull * remaining);
                    self.supported[body] = true;
                    if let Some(impulse) = impulse {
                        debug!("Resting ground contact: body {} held up by {:?}", body, impulse);
                    }
                    impulse.map_or(ContactOutcome::Unchanged, |_| ContactOutcome::Supported)
                };
                self.record_contact(outcome, true);
                outcome
            }
            Collision::Body { body_a, body_b, contact } => {
                let held_a = self.supported.get(body_a).copied().unwrap_or(false);
                let held_b = self.supported.get(body_b).copied().unwrap_or(false);
                let (a, b) = match pair_mut(&mut self.bodies, body_a, body_b) {
                    Some(pair) => pair,
                    None => return ContactOutcome::Unchanged,
                };
                let relative_velocity = subtract_vectors(
                    point_velocity(a, contact.contact_arm_a),
                    point_velocity(b, contact.contact_arm_b),
                );
                let approach = -dot_product(relative_velocity, contact.normal);

                let outcome = if approach > resting_speed {
                    let impulse = resolve_body_contact(a, b, &contact);
                    if let Some(impulse) = impulse {
                        debug!(
                            "{:?} contact: bodies {} and {} exchanged impulse {:?}",
                            contact.kind, body_a, body_b, impulse
                        );
                    }
                    impulse.map_or(ContactOutcome::Unchanged, |_| ContactOutcome::Bounced)
                } else {
                    let movable = match (held_a, held_b) {
                        (true, false) => Movable::OnlyB,
                        (false, true) => Movable::OnlyA,
                        _ => Movable::Both,
                    };
                    let impulse = support_body_contact(a, b, &contact, movable);
                    if held_a || held_b {
                        self.supported[body_a] = true;
                        self.supported[body_b] = true;
                    }
                    if let Some(impulse) = impulse {
                        debug!("Resting contact: bodies {} and {} exchanged {:?}", body_a, body_b, impulse);
                    }
                    impulse.map_or(ContactOutcome::Unchanged, |_| ContactOutcome::Supported)
                };
                self.record_contact(outcome, false);
                outcome
            }
        }
    }

    fn record_contact(&mut self, outcome: ContactOutcome, ground: bool) {
        match (outcome, ground) {
            (ContactOutcome::Unchanged, _) => self.stats.separating_contacts += 1,
            (ContactOutcome::Supported, _) => self.stats.resting_contacts += 1,
            (ContactOutcome::Bounced, true) => self.stats.ground_contacts += 1,
            (ContactOutcome::Bounced, false) => self.stats.body_contacts += 1,
        }
    }
}

/// Two distinct bodies borrowed mutably, in the order asked for.
fn pair_mut(bodies: &mut [RigidBody], a: usize, b: usize) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if a == b || a.max(b) >= bodies.len() {
        return None;
    }
    if a < b {
        let (left, right) = bodies.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = bodies.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}
