//! Completion side effects: chime, desktop notification, operator
//! acknowledgment.
//!
//! All three collaborators are best-effort and independently failable.
//! Failures are logged and swallowed here so nothing can throw back
//! into the tick path.

/// Fixed notification title for every completed run.
pub const COMPLETION_TITLE: &str = "Timer Complete!";

/// Notification body used when the run has no label.
pub const COMPLETION_FALLBACK_BODY: &str = "Your countdown timer has finished.";

/// Message surfaced by the blocking acknowledgment.
pub const COMPLETION_PROMPT: &str = "Time is up!";

pub type EffectResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Audible alert backend.
pub trait Chime {
    fn play(&self) -> EffectResult;
}

/// System notification backend.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str) -> EffectResult;
}

/// Blocking operator acknowledgment.
pub trait Acknowledger {
    fn acknowledge(&self, message: &str) -> EffectResult;
}

/// No-op collaborators for tests and quiet invocations.
pub struct NullChime;

impl Chime for NullChime {
    fn play(&self) -> EffectResult {
        Ok(())
    }
}

pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) -> EffectResult {
        Ok(())
    }
}

pub struct NullAcknowledger;

impl Acknowledger for NullAcknowledger {
    fn acknowledge(&self, _message: &str) -> EffectResult {
        Ok(())
    }
}

/// Runs the completion side effects for one finished run.
///
/// The muted flag suppresses only the chime; `notifications_enabled`
/// gates the desktop notification. The exactly-once guarantee comes
/// from the engine's completion guard, not from this handler.
pub struct CompletionHandler {
    chime: Box<dyn Chime>,
    notifier: Box<dyn Notifier>,
    acknowledger: Box<dyn Acknowledger>,
    muted: bool,
    notifications_enabled: bool,
}

impl CompletionHandler {
    pub fn new(
        chime: Box<dyn Chime>,
        notifier: Box<dyn Notifier>,
        acknowledger: Box<dyn Acknowledger>,
    ) -> Self {
        Self {
            chime,
            notifier,
            acknowledger,
            muted: false,
            notifications_enabled: true,
        }
    }

    /// Fully silent handler.
    pub fn null() -> Self {
        Self::new(
            Box::new(NullChime),
            Box::new(NullNotifier),
            Box::new(NullAcknowledger),
        )
    }

    pub fn set_muted(&mut self, muted: bool) -> &mut Self {
        self.muted = muted;
        self
    }

    pub fn set_notifications_enabled(&mut self, enabled: bool) -> &mut Self {
        self.notifications_enabled = enabled;
        self
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Run the side effects for a completed run. Never fails; each
    /// collaborator failure is logged at debug and ignored.
    pub fn fire(&mut self, label: Option<&str>) {
        if !self.muted {
            if let Err(e) = self.chime.play() {
                tracing::debug!(error = %e, "completion chime failed");
            }
        }
        if self.notifications_enabled {
            let body = label.unwrap_or(COMPLETION_FALLBACK_BODY);
            if let Err(e) = self.notifier.notify(COMPLETION_TITLE, body) {
                tracing::debug!(error = %e, "completion notification failed");
            }
        }
        if let Err(e) = self.acknowledger.acknowledge(COMPLETION_PROMPT) {
            tracing::debug!(error = %e, "completion acknowledgment failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting(Arc<AtomicUsize>);

    impl Chime for Counting {
        fn play(&self) -> EffectResult {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl Notifier for Counting {
        fn notify(&self, _title: &str, _body: &str) -> EffectResult {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl Acknowledger for Counting {
        fn acknowledge(&self, _message: &str) -> EffectResult {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    impl Chime for Failing {
        fn play(&self) -> EffectResult {
            Err("no audio backend".into())
        }
    }

    fn counters() -> (
        Arc<AtomicUsize>,
        Arc<AtomicUsize>,
        Arc<AtomicUsize>,
        CompletionHandler,
    ) {
        let chimes = Arc::new(AtomicUsize::new(0));
        let notes = Arc::new(AtomicUsize::new(0));
        let acks = Arc::new(AtomicUsize::new(0));
        let handler = CompletionHandler::new(
            Box::new(Counting(Arc::clone(&chimes))),
            Box::new(Counting(Arc::clone(&notes))),
            Box::new(Counting(Arc::clone(&acks))),
        );
        (chimes, notes, acks, handler)
    }

    #[test]
    fn fire_runs_all_three_effects() {
        let (chimes, notes, acks, mut handler) = counters();
        handler.fire(Some("launch"));
        assert_eq!(chimes.load(Ordering::SeqCst), 1);
        assert_eq!(notes.load(Ordering::SeqCst), 1);
        assert_eq!(acks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn muted_suppresses_only_the_chime() {
        let (chimes, notes, acks, mut handler) = counters();
        handler.set_muted(true);
        handler.fire(None);
        assert_eq!(chimes.load(Ordering::SeqCst), 0);
        assert_eq!(notes.load(Ordering::SeqCst), 1);
        assert_eq!(acks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disabled_notifications_still_chime_and_acknowledge() {
        let (chimes, notes, acks, mut handler) = counters();
        handler.set_notifications_enabled(false);
        handler.fire(None);
        assert_eq!(chimes.load(Ordering::SeqCst), 1);
        assert_eq!(notes.load(Ordering::SeqCst), 0);
        assert_eq!(acks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn chime_failure_does_not_block_the_rest() {
        let notes = Arc::new(AtomicUsize::new(0));
        let acks = Arc::new(AtomicUsize::new(0));
        let mut handler = CompletionHandler::new(
            Box::new(Failing),
            Box::new(Counting(Arc::clone(&notes))),
            Box::new(Counting(Arc::clone(&acks))),
        );
        handler.fire(Some("deploy"));
        assert_eq!(notes.load(Ordering::SeqCst), 1);
        assert_eq!(acks.load(Ordering::SeqCst), 1);
    }
}
