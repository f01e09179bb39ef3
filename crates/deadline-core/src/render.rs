//! Render fan-out: one engine state value projected into every visual
//! sink in lockstep.
//!
//! Sinks are dumb consumers of a [`RenderFrame`]; the dispatcher is the
//! only place frames are built, so the text readout, bar offset, ring
//! percentage and animation tier can never disagree about the time.

use serde::{Deserialize, Serialize};

use crate::timer::{Phase, TimeBreakdown, TimerEngine};

/// Full-scale width of the linear progress track, in pixels of the
/// reference artwork. The bar offset sweeps `[-W, 0]` over one run.
pub const DEFAULT_FULL_WIDTH: f64 = 586.0;

/// Horizontal rest offset of the reaper figure.
pub const REAPER_REST_OFFSET: f64 = 25.0;

/// Discrete character-animation speed, selected by elapsed fraction.
///
/// The thresholds reproduce the arm keyframe schedule of the reference
/// animation: a new tier at 0%, 20%, 40%, 60% and 75% elapsed, plus a
/// terminal urgent tier once the engine flags the final 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    Calm,
    Brisk,
    Hurried,
    Frantic,
    Redline,
    Urgent,
}

impl SpeedTier {
    pub fn from_progress(fraction: f64, urgent: bool) -> Self {
        if urgent {
            SpeedTier::Urgent
        } else if fraction >= 0.75 {
            SpeedTier::Redline
        } else if fraction >= 0.60 {
            SpeedTier::Frantic
        } else if fraction >= 0.40 {
            SpeedTier::Hurried
        } else if fraction >= 0.20 {
            SpeedTier::Brisk
        } else {
            SpeedTier::Calm
        }
    }

    /// Animation cycle duration for this tier, in seconds.
    pub fn cycle_secs(self) -> f64 {
        match self {
            SpeedTier::Calm => 1.5,
            SpeedTier::Brisk => 1.0,
            SpeedTier::Hurried => 0.7,
            SpeedTier::Frantic => 0.3,
            SpeedTier::Redline | SpeedTier::Urgent => 0.2,
        }
    }
}

/// One tick's worth of values for every visual sink, all derived from
/// the same `(remaining, total)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub label: Option<String>,
    /// `"DD DAYS | HH HRS | MM MINS | SS SECS"`, fields zero-padded.
    pub readout: String,
    /// Headline day count.
    pub days: u64,
    /// Elapsed fraction in `[0, 1]`.
    pub fraction: f64,
    /// Linear bar x-offset in `[-full_width, 0]`.
    pub bar_offset: f64,
    /// Circular-progress percentage, 0..=100.
    pub ring_pct: u8,
    /// Reaper x-offset: sweeps from its rest position across the track.
    pub reaper_offset: f64,
    pub tier: SpeedTier,
    pub urgent: bool,
}

impl RenderFrame {
    /// Project the engine's current state. Pure: same state, same frame.
    pub fn project(engine: &TimerEngine, full_width: f64) -> Self {
        let remaining = engine.remaining_secs();
        let total = engine.total_secs();
        let fraction = engine.fraction();
        let breakdown = TimeBreakdown::from_secs(remaining);
        let tier = SpeedTier::from_progress(fraction, engine.is_urgent());
        Self {
            phase: engine.phase(),
            remaining_secs: remaining,
            total_secs: total,
            label: engine.label().map(str::to_owned),
            readout: breakdown.readout(),
            days: breakdown.days,
            fraction,
            bar_offset: -full_width + full_width * fraction,
            ring_pct: (fraction * 100.0).round() as u8,
            reaper_offset: fraction * full_width + REAPER_REST_OFFSET,
            tier,
            urgent: engine.is_urgent(),
        }
    }
}

/// A visual consumer of render frames. Sinks must not fail back into
/// the tick path; anything fallible is handled inside the sink.
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame);
}

/// Pushes each frame to every registered sink.
pub struct RenderDispatcher {
    full_width: f64,
    sinks: Vec<Box<dyn RenderSink>>,
}

impl RenderDispatcher {
    pub fn new(full_width: f64) -> Self {
        Self {
            full_width,
            sinks: Vec::new(),
        }
    }

    pub fn register(&mut self, sink: Box<dyn RenderSink>) {
        self.sinks.push(sink);
    }

    pub fn full_width(&self) -> f64 {
        self.full_width
    }

    /// Build one frame from the engine and fan it out. Returns the frame
    /// so callers can log or print it.
    pub fn dispatch(&mut self, engine: &TimerEngine) -> RenderFrame {
        let frame = RenderFrame::project(engine, self.full_width);
        for sink in &mut self.sinks {
            sink.render(&frame);
        }
        frame
    }
}

impl Default for RenderDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FULL_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_at(total: u64, ticks: u64) -> TimerEngine {
        let mut engine = TimerEngine::new();
        let (handle, _) = engine.start(total, None).unwrap();
        for _ in 0..ticks {
            engine.tick(handle);
        }
        engine
    }

    #[test]
    fn idle_frame_sits_at_rest_positions() {
        let frame = RenderFrame::project(&TimerEngine::new(), DEFAULT_FULL_WIDTH);
        assert_eq!(frame.phase, Phase::Idle);
        assert_eq!(frame.readout, "00 DAYS | 00 HRS | 00 MINS | 00 SECS");
        assert_eq!(frame.bar_offset, -DEFAULT_FULL_WIDTH);
        assert_eq!(frame.reaper_offset, REAPER_REST_OFFSET);
        assert_eq!(frame.ring_pct, 0);
        assert_eq!(frame.tier, SpeedTier::Calm);
    }

    #[test]
    fn bar_offset_sweeps_from_minus_width_to_zero() {
        let start = RenderFrame::project(&engine_at(100, 0), DEFAULT_FULL_WIDTH);
        assert_eq!(start.bar_offset, -DEFAULT_FULL_WIDTH);

        let half = RenderFrame::project(&engine_at(100, 50), DEFAULT_FULL_WIDTH);
        assert!((half.bar_offset + DEFAULT_FULL_WIDTH / 2.0).abs() < 1e-9);

        let done = RenderFrame::project(&engine_at(100, 100), DEFAULT_FULL_WIDTH);
        assert_eq!(done.bar_offset, 0.0);
        assert_eq!(done.ring_pct, 100);
    }

    #[test]
    fn ring_pct_tracks_fraction() {
        let frame = RenderFrame::project(&engine_at(200, 50), DEFAULT_FULL_WIDTH);
        assert_eq!(frame.ring_pct, 25);
    }

    #[test]
    fn speed_tier_thresholds() {
        assert_eq!(SpeedTier::from_progress(0.0, false), SpeedTier::Calm);
        assert_eq!(SpeedTier::from_progress(0.19, false), SpeedTier::Calm);
        assert_eq!(SpeedTier::from_progress(0.20, false), SpeedTier::Brisk);
        assert_eq!(SpeedTier::from_progress(0.40, false), SpeedTier::Hurried);
        assert_eq!(SpeedTier::from_progress(0.60, false), SpeedTier::Frantic);
        assert_eq!(SpeedTier::from_progress(0.75, false), SpeedTier::Redline);
        assert_eq!(SpeedTier::from_progress(0.30, true), SpeedTier::Urgent);
    }

    #[test]
    fn tiers_only_speed_up() {
        let mut last = SpeedTier::Calm.cycle_secs();
        for tier in [
            SpeedTier::Brisk,
            SpeedTier::Hurried,
            SpeedTier::Frantic,
            SpeedTier::Redline,
            SpeedTier::Urgent,
        ] {
            assert!(tier.cycle_secs() <= last);
            last = tier.cycle_secs();
        }
    }

    #[test]
    fn urgent_engine_forces_urgent_tier() {
        let engine = engine_at(100, 91);
        assert!(engine.is_urgent());
        let frame = RenderFrame::project(&engine, DEFAULT_FULL_WIDTH);
        assert_eq!(frame.tier, SpeedTier::Urgent);
    }

    #[test]
    fn dispatcher_pushes_to_every_sink() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Recorder(Rc<RefCell<Vec<String>>>);
        impl RenderSink for Recorder {
            fn render(&mut self, frame: &RenderFrame) {
                self.0.borrow_mut().push(frame.readout.clone());
            }
        }

        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = RenderDispatcher::default();
        dispatcher.register(Box::new(Recorder(Rc::clone(&seen_a))));
        dispatcher.register(Box::new(Recorder(Rc::clone(&seen_b))));

        let engine = engine_at(60, 0);
        dispatcher.dispatch(&engine);
        assert_eq!(seen_a.borrow().len(), 1);
        assert_eq!(seen_a.borrow()[0], "00 DAYS | 00 HRS | 01 MINS | 00 SECS");
        assert_eq!(*seen_a.borrow(), *seen_b.borrow());
    }
}
