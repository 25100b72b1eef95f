//! Camera tour animation
//!
//! A tour flies the camera to a target, waits for the flight to settle, then
//! orbits the target one full turn, one bearing step per frame:
//!
//! ```text
//! Idle --start_tour--> FlyingTo --settle delay--> Rotating --360 deg--> Idle
//!                          |                          |
//!                          +------cancel / new tour---+----------> Idle
//! ```
//!
//! Frames are pulled by the host's frame loop through
//! [`CameraAnimator::on_frame`], or by [`CameraAnimator::run`] on a tokio
//! interval. The cancellation flag is checked under the same lock that guards
//! emission, so once [`CameraAnimator::cancel`] returns no bearing update from
//! that tour can reach the surface.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::TourConfig;
use crate::geo::Coordinate;
use crate::surface::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    FlyingTo,
    Rotating,
}

/// Observable animation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub phase: AnimationPhase,
    /// Current bearing, normalized to [0, 360)
    pub bearing: f64,
    pub cancelled: bool,
}

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStatus {
    /// No tour; the host can stop requesting frames
    Idle,
    /// Still flying; nothing emitted
    Waiting,
    /// One rotation step was emitted
    Rotated { bearing: f64 },
    /// Full turn done, bearing snapped back to the start
    Finished,
    /// Tour was cancelled; nothing emitted
    Cancelled,
}

impl FrameStatus {
    /// Whether the host should schedule another frame
    pub fn wants_next_frame(&self) -> bool {
        matches!(self, FrameStatus::Waiting | FrameStatus::Rotated { .. })
    }
}

struct Tour {
    id: u64,
    target: Coordinate,
    started_at: Instant,
    steps: u32,
}

struct Inner {
    state: AnimationState,
    tour: Option<Tour>,
    next_id: u64,
}

/// Drives fly-to-and-rotate tours; at most one is live at a time
pub struct CameraAnimator {
    surface: Arc<dyn RenderSurface>,
    config: TourConfig,
    inner: Mutex<Inner>,
}

impl CameraAnimator {
    pub fn new(surface: Arc<dyn RenderSurface>, config: TourConfig) -> Self {
        let bearing = normalize(config.start_bearing);
        Self {
            surface,
            config,
            inner: Mutex::new(Inner {
                state: AnimationState {
                    phase: AnimationPhase::Idle,
                    bearing,
                    cancelled: false,
                },
                tour: None,
                next_id: 1,
            }),
        }
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Starts a tour of `target`, tearing down any tour in progress first.
    /// Returns the new tour's id.
    pub fn start_tour(&self, target: Coordinate) -> u64 {
        self.start_tour_at(target, Instant::now())
    }

    /// [`start_tour`](Self::start_tour) with an explicit start time
    pub fn start_tour_at(&self, target: Coordinate, now: Instant) -> u64 {
        let mut inner = self.lock();

        if let Some(old) = inner.tour.take() {
            inner.state.cancelled = true;
            inner.state.phase = AnimationPhase::Idle;
            debug!(tour = old.id, "tour superseded by new tour");
        }

        let id = inner.next_id;
        inner.next_id += 1;
        inner.tour = Some(Tour {
            id,
            target,
            started_at: now,
            steps: 0,
        });
        inner.state = AnimationState {
            phase: AnimationPhase::FlyingTo,
            bearing: normalize(self.config.start_bearing),
            cancelled: false,
        };

        self.surface.fly_to(
            target,
            self.config.zoom,
            self.config.pitch,
            self.config.start_bearing,
            self.config.fly_duration.as_millis() as u64,
        );
        info!(tour = id, lat = target.latitude, lng = target.longitude, "tour started");

        id
    }

    /// Requests cancellation; the next frame tears the tour down.
    /// No bearing update is emitted after this returns.
    pub fn cancel(&self) {
        let mut inner = self.lock();
        if let Some(tour) = &inner.tour {
            let id = tour.id;
            inner.state.cancelled = true;
            debug!(tour = id, "tour cancellation requested");
        }
    }

    /// Advances the animation by one frame
    pub fn on_frame(&self, now: Instant) -> FrameStatus {
        let mut inner = self.lock();
        let inner = &mut *inner;

        let Some(tour) = inner.tour.as_mut() else {
            return FrameStatus::Idle;
        };

        if inner.state.cancelled {
            info!(tour = tour.id, "tour cancelled");
            inner.tour = None;
            inner.state.phase = AnimationPhase::Idle;
            return FrameStatus::Cancelled;
        }

        if inner.state.phase == AnimationPhase::FlyingTo {
            if now.saturating_duration_since(tour.started_at) < self.config.settle_delay {
                return FrameStatus::Waiting;
            }
            inner.state.phase = AnimationPhase::Rotating;
            debug!(tour = tour.id, "tour rotating");
        }

        tour.steps += 1;
        if tour.steps >= self.config.frames_per_revolution() {
            // Snap exactly to the start instead of trusting accumulated steps
            self.surface.jump_to(tour.target, self.config.start_bearing);
            info!(tour = tour.id, "tour finished");
            inner.state.bearing = normalize(self.config.start_bearing);
            inner.state.phase = AnimationPhase::Idle;
            inner.tour = None;
            return FrameStatus::Finished;
        }

        let bearing =
            normalize(self.config.start_bearing + tour.steps as f64 * self.config.step_degrees);
        self.surface.jump_to(tour.target, bearing);
        inner.state.bearing = bearing;

        FrameStatus::Rotated { bearing }
    }

    /// Drives frames from a tokio interval until the tour ends or is cancelled
    pub async fn run(&self, frame_interval: Duration) -> FrameStatus {
        let mut ticker = time::interval(frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let now = ticker.tick().await;
            let status = self.on_frame(now);
            if !status.wants_next_frame() {
                return status;
            }
        }
    }

    pub fn state(&self) -> AnimationState {
        self.lock().state
    }

    /// Whether a tour is live and not cancelled
    pub fn is_active(&self) -> bool {
        let inner = self.lock();
        inner.tour.is_some() && !inner.state.cancelled
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn normalize(bearing: f64) -> f64 {
    bearing.rem_euclid(360.0)
}
