//! Fixed timestep simulation tick
//!
//! `Simulation` owns one marble run: the run status, the observable marble
//! state, the collision log and the private progress cursor. Callers drive it
//! by calling [`Simulation::tick`] at whatever cadence they like; nothing
//! advances unless the status is `Running`.

use super::physics::{advance_frame, impact_speeds, snap_to_end};
use super::state::{CollisionEvent, MarbleState, RunStatus, SimSnapshot};
use super::track::Track;
use crate::error::TrackError;
use crate::settings::SimSettings;

/// Called once per run when the marble strikes the bell
pub type FinishHook = Box<dyn FnMut(&CollisionEvent)>;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Skipped,
    /// Marble moved within its segment
    Advanced,
    /// Marble completed a segment and moved on to the next
    Transitioned(CollisionEvent),
    /// Marble completed the last segment
    Finished(CollisionEvent),
}

/// One marble run through a track
pub struct Simulation {
    track: Track,
    settings: SimSettings,
    initial_marble: MarbleState,

    status: RunStatus,
    marble: MarbleState,
    collision_log: Vec<CollisionEvent>,
    active_segment: usize,

    /// Distance covered along the active segment (cm)
    progress_cm: f32,
    /// Simulated seconds since the run started
    clock: f32,
    /// Post-impact speed the marble entered the active segment with (m/s)
    carried_velocity: f32,

    on_finished: Option<FinishHook>,
}

impl Simulation {
    /// Create a simulation at rest on the first segment
    pub fn new(track: Track, settings: SimSettings) -> Result<Self, TrackError> {
        settings.validate()?;
        if track.is_empty() {
            return Err(TrackError::Empty);
        }
        Ok(Self::build(track, settings))
    }

    /// The reference machine with default settings
    pub fn reference() -> Self {
        Self::build(Track::reference(), SimSettings::default())
    }

    fn build(track: Track, settings: SimSettings) -> Self {
        let initial_marble = MarbleState::at_rest(track.first().start, settings.machine_height_cm);
        Self {
            track,
            settings,
            initial_marble,
            status: RunStatus::Idle,
            marble: initial_marble,
            collision_log: Vec::new(),
            active_segment: 0,
            progress_cm: 0.0,
            clock: 0.0,
            carried_velocity: 0.0,
            on_finished: None,
        }
    }

    /// Register the bell hook. It survives resets.
    pub fn set_on_finished<F>(&mut self, hook: F)
    where
        F: FnMut(&CollisionEvent) + 'static,
    {
        self.on_finished = Some(Box::new(hook));
    }

    // === Controls ===

    /// Start from Idle or resume from Paused
    pub fn start(&mut self) {
        match self.status {
            RunStatus::Idle | RunStatus::Paused => {
                log::info!(
                    "{} run at segment {}",
                    if self.status == RunStatus::Idle { "Starting" } else { "Resuming" },
                    self.active_segment + 1
                );
                self.status = RunStatus::Running;
            }
            RunStatus::Running | RunStatus::Finished => {}
        }
    }

    /// Suspend a running simulation, keeping all progress
    pub fn pause(&mut self) {
        if self.status == RunStatus::Running {
            log::info!("Paused at t={:.3}s", self.clock);
            self.status = RunStatus::Paused;
        }
    }

    /// Discard the run and return to the initial state
    pub fn reset(&mut self) {
        self.status = RunStatus::Idle;
        self.marble = self.initial_marble;
        self.collision_log.clear();
        self.active_segment = 0;
        self.progress_cm = 0.0;
        self.clock = 0.0;
        self.carried_velocity = 0.0;
        log::info!("Simulation reset");
    }

    /// Advance one frame by the configured time step
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != RunStatus::Running {
            return TickOutcome::Skipped;
        }

        let dt = self.settings.time_step;
        let segment = &self.track.segments()[self.active_segment];
        let frame = advance_frame(&self.marble, segment, self.progress_cm, dt, &self.settings);
        self.clock += dt;
        log::trace!(
            "t={:.3} seg={} v={:.3} ratio={:.3}",
            self.clock,
            self.active_segment + 1,
            frame.state.velocity,
            frame.progress_ratio
        );

        if !frame.segment_complete() {
            self.progress_cm = frame.progress_cm;
            self.marble = frame.state;
            return TickOutcome::Advanced;
        }

        // Closed-form speed replaces the integrated one at every boundary
        let (pre, mut post) = impact_speeds(segment, self.carried_velocity, &self.settings);
        let completed = self.active_segment;
        let next = completed + 1;
        let finished = next >= self.track.len();

        if finished {
            post = 0.0;
        }
        let event = CollisionEvent {
            segment_index: completed + 1,
            speed_pre_impact: pre,
            speed_post_impact: post,
            timestamp: self.clock,
        };
        log::debug!(
            "Segment {} ({}) complete: v_pre={:.3} v_post={:.3}",
            event.segment_index,
            segment.description,
            pre,
            post
        );

        self.marble = snap_to_end(segment, post, self.settings.machine_height_cm);
        self.progress_cm = 0.0;
        self.carried_velocity = post;
        self.collision_log.push(event);

        if finished {
            self.status = RunStatus::Finished;
            log::info!("Bell struck at t={:.3}s", self.clock);
            if let Some(hook) = self.on_finished.as_mut() {
                hook(&event);
            }
            TickOutcome::Finished(event)
        } else {
            self.active_segment = next;
            TickOutcome::Transitioned(event)
        }
    }

    // === Accessors ===

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn marble(&self) -> MarbleState {
        self.marble
    }

    pub fn collision_log(&self) -> &[CollisionEvent] {
        &self.collision_log
    }

    /// 0-based index of the segment being traversed
    pub fn active_segment_index(&self) -> usize {
        self.active_segment
    }

    /// 1-based "step N of M" for display
    pub fn current_step(&self) -> (usize, usize) {
        ((self.active_segment + 1).min(self.track.len()), self.track.len())
    }

    pub fn simulation_time(&self) -> f32 {
        self.clock
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            status: self.status,
            marble: self.marble,
            active_segment_index: self.active_segment,
            segment_count: self.track.len(),
            collision_log: self.collision_log.clone(),
        }
    }
}
