/// Phase of the resolver; `SubStepping` only while a frame is being advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverState {
    #[default]
    Idle,
    SubStepping,
}

/// What happened during one call to `Simulation::step_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Detect/resolve passes run this frame.
    pub iterations: usize,
    /// Contacts that received a restitution impulse.
    pub contacts_resolved: usize,
    /// Slow contacts held up by a support impulse instead of bouncing.
    pub resting_contacts: usize,
    /// The iteration cap ended the frame before its full step was simulated.
    pub budget_exceeded: bool,
    /// Simulated seconds discarded because of the iteration cap.
    pub time_dropped: f64,
    /// Seconds from the start of the frame to its first contact.
    pub first_contact_offset: Option<f64>,
}

/// Running totals over the lifetime of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationStats {
    pub frames: u64,
    pub iterations: u64,
    pub ground_contacts: u64,
    pub body_contacts: u64,
    pub resting_contacts: u64,
    /// Contacts found already separating, so no impulse was applied.
    pub separating_contacts: u64,
    pub budget_exceeded_frames: u64,
    pub time_dropped: f64,
}

impl SimulationStats {
    pub(crate) fn record_frame(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.iterations += report.iterations as u64;
        if report.budget_exceeded {
            self.budget_exceeded_frames += 1;
            self.time_dropped += report.time_dropped;
        }
    }
}
