use clap::Subcommand;
use deadline_core::completion::{CompletionHandler, NullAcknowledger};
use deadline_core::render::RenderDispatcher;
use deadline_core::storage::{Config, Database};
use deadline_core::timer::{Phase, TimerEngine};
use deadline_core::{CountdownSession, DurationSpec, Event};

use crate::effects::{DesktopNotifier, EnterAcknowledger, SystemChime, TerminalSink};

const ENGINE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a countdown, discarding any prior run
    Start {
        #[arg(long, default_value = "0")]
        days: u64,
        #[arg(long, default_value = "0")]
        hours: u64,
        #[arg(long, default_value = "0")]
        minutes: u64,
        #[arg(long, default_value = "0")]
        seconds: u64,
        /// Label shown alongside the countdown
        #[arg(long)]
        label: Option<String>,
        /// Stay in the foreground and drive the countdown
        #[arg(long)]
        watch: bool,
    },
    /// Freeze the countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Clear the countdown back to idle
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Drive a running countdown in the foreground
    Watch,
}

fn load_engine(db: &Database) -> TimerEngine {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        match serde_json::from_str::<TimerEngine>(&json) {
            Ok(engine) => return engine,
            Err(e) => tracing::debug!(error = %e, "discarding unreadable persisted engine"),
        }
    }
    TimerEngine::new()
}

fn save_engine(db: &Database, engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

/// Wire a session around the persisted engine. Interactive invocations
/// get a terminal render sink and a blocking acknowledgment; one-shot
/// invocations stay non-blocking.
fn build_session(engine: TimerEngine, config: &Config, interactive: bool) -> CountdownSession {
    let mut dispatcher = RenderDispatcher::new(config.render.full_width);
    let acknowledger: Box<dyn deadline_core::Acknowledger> = if interactive {
        dispatcher.register(Box::new(TerminalSink));
        Box::new(EnterAcknowledger)
    } else {
        Box::new(NullAcknowledger)
    };
    let mut completion =
        CompletionHandler::new(Box::new(SystemChime), Box::new(DesktopNotifier), acknowledger);
    completion
        .set_muted(config.notifications.muted)
        .set_notifications_enabled(config.notifications.enabled);
    CountdownSession::with_engine(engine, dispatcher, completion)
}

fn watch_loop(
    session: &mut CountdownSession,
    db: &Database,
) -> Result<(), Box<dyn std::error::Error>> {
    while session.engine().phase() == Phase::Running {
        std::thread::sleep(std::time::Duration::from_secs(1));
        let event = session.tick();
        // Persist every tick so concurrent invocations see progress.
        save_engine(db, session.engine())?;
        if let Some(completed @ Event::TimerCompleted { .. }) = event {
            println!("{}", serde_json::to_string_pretty(&completed)?);
        }
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let engine = load_engine(&db);

    match action {
        TimerAction::Start {
            days,
            hours,
            minutes,
            seconds,
            label,
            watch,
        } => {
            let spec = DurationSpec::new(days, hours, minutes, seconds);
            let mut session = build_session(engine, &config, watch);
            let event = session.start(&spec, label)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
            save_engine(&db, session.engine())?;
            if watch {
                watch_loop(&mut session, &db)?;
            }
        }
        TimerAction::Pause => {
            let mut session = build_session(engine, &config, false);
            session.catch_up();
            match session.pause() {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("{}", serde_json::to_string_pretty(&session.snapshot())?),
            }
            save_engine(&db, session.engine())?;
        }
        TimerAction::Resume => {
            let mut session = build_session(engine, &config, false);
            match session.resume() {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("{}", serde_json::to_string_pretty(&session.snapshot())?),
            }
            save_engine(&db, session.engine())?;
        }
        TimerAction::Reset => {
            let mut session = build_session(engine, &config, false);
            let event = session.reset();
            println!("{}", serde_json::to_string_pretty(&event)?);
            save_engine(&db, session.engine())?;
        }
        TimerAction::Status => {
            let mut session = build_session(engine, &config, false);
            session.catch_up();
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            save_engine(&db, session.engine())?;
        }
        TimerAction::Watch => {
            let mut session = build_session(engine, &config, true);
            session.catch_up();
            save_engine(&db, session.engine())?;
            if session.engine().phase() != Phase::Running {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
                return Ok(());
            }
            watch_loop(&mut session, &db)?;
        }
    }

    Ok(())
}
