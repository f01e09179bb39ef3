//! Countdown session: the single wiring point between the engine, the
//! render dispatcher and the completion handler.
//!
//! Renders are dispatched from exactly three places -- the end of
//! `start`, `tick` and `reset` -- so every sink observes the same
//! sequence of states. Pause and resume freeze the display rather than
//! repainting it.

use crate::completion::CompletionHandler;
use crate::duration::DurationSpec;
use crate::error::CoreError;
use crate::events::Event;
use crate::render::{RenderDispatcher, RenderFrame};
use crate::timer::TimerEngine;

pub struct CountdownSession {
    engine: TimerEngine,
    dispatcher: RenderDispatcher,
    completion: CompletionHandler,
}

impl CountdownSession {
    pub fn new(dispatcher: RenderDispatcher, completion: CompletionHandler) -> Self {
        Self::with_engine(TimerEngine::new(), dispatcher, completion)
    }

    /// Wrap an existing engine, e.g. one restored from the kv store.
    pub fn with_engine(
        engine: TimerEngine,
        dispatcher: RenderDispatcher,
        completion: CompletionHandler,
    ) -> Self {
        Self {
            engine,
            dispatcher,
            completion,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn into_engine(self) -> TimerEngine {
        self.engine
    }

    /// The frame the sinks would be shown right now.
    pub fn current_frame(&self) -> RenderFrame {
        RenderFrame::project(&self.engine, self.dispatcher.full_width())
    }

    /// Validate the duration and start a fresh run, discarding any prior
    /// one. Dispatches one render immediately so the display shows the
    /// full duration before the first tick elapses.
    ///
    /// # Errors
    /// Validation failure leaves the engine untouched and nothing is
    /// rendered.
    pub fn start(&mut self, spec: &DurationSpec, label: Option<String>) -> Result<Event, CoreError> {
        let total = spec.total_seconds()?;
        let (_handle, event) = self.engine.start(total, label)?;
        self.dispatcher.dispatch(&self.engine);
        Ok(event)
    }

    /// Apply one elapsed second and repaint. On the terminal tick the
    /// completion handler fires (exactly once per run) and the
    /// completion event is returned.
    pub fn tick(&mut self) -> Option<Event> {
        let handle = self.engine.driver()?;
        let event = self.engine.tick(handle);
        self.dispatcher.dispatch(&self.engine);
        if let Some(Event::TimerCompleted { ref label, .. }) = event {
            let label = label.clone();
            self.completion.fire(label.as_deref());
        }
        event
    }

    /// Tick through the wall-clock seconds a persisted engine missed
    /// while no process was driving it. Completion fires normally if the
    /// countdown ran out in the meantime.
    pub fn catch_up(&mut self) -> Vec<Event> {
        let pending = self.engine.pending_ticks();
        let mut events = Vec::new();
        for _ in 0..pending {
            if let Some(event) = self.tick() {
                events.push(event);
            }
        }
        events
    }

    /// Freeze the countdown. No repaint; the display keeps the frozen
    /// value. No-op unless running.
    pub fn pause(&mut self) -> Option<Event> {
        self.engine.pause()
    }

    /// Resume a paused countdown at its preserved remaining time.
    pub fn resume(&mut self) -> Option<Event> {
        self.engine.resume().map(|(_handle, event)| event)
    }

    /// Silently clear the run and repaint every sink at its rest
    /// position.
    pub fn reset(&mut self) -> Event {
        let event = self.engine.reset();
        self.dispatcher.dispatch(&self.engine);
        event
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }
}
