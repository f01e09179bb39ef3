//! Concrete completion collaborators and the terminal render sink.

use std::io::Write;

use deadline_core::completion::{Acknowledger, Chime, EffectResult, Notifier};
use deadline_core::render::{RenderFrame, RenderSink};
use deadline_core::timer::Phase;
use notify_rust::{Notification, Urgency};

/// Desktop notification via the freedesktop/macOS notification service.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> EffectResult {
        Notification::new()
            .summary(title)
            .body(body)
            .appname("deadline")
            .icon("alarm-clock")
            .urgency(Urgency::Critical)
            .show()?;
        Ok(())
    }
}

/// Audible chime: spawn a system audio player on a stock completion
/// sound, falling back to the terminal bell.
pub struct SystemChime;

impl Chime for SystemChime {
    fn play(&self) -> EffectResult {
        let candidates = [
            ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
            ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
        ];
        for (cmd, sound_file) in candidates {
            if std::path::Path::new(sound_file).exists() {
                std::process::Command::new(cmd)
                    .arg(sound_file)
                    .stdout(std::process::Stdio::null())
                    .stderr(std::process::Stdio::null())
                    .spawn()?;
                return Ok(());
            }
        }
        let mut err = std::io::stderr();
        err.write_all(b"\x07")?;
        err.flush()?;
        Ok(())
    }
}

/// Blocking acknowledgment on the controlling terminal.
pub struct EnterAcknowledger;

impl Acknowledger for EnterAcknowledger {
    fn acknowledge(&self, message: &str) -> EffectResult {
        eprintln!("{message} Press Enter to acknowledge.");
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(())
    }
}

/// Repaints one status line per frame while watching a countdown.
pub struct TerminalSink;

impl RenderSink for TerminalSink {
    fn render(&mut self, frame: &RenderFrame) {
        let label = frame
            .label
            .as_deref()
            .map(|l| format!("  ({l})"))
            .unwrap_or_default();
        eprint!(
            "\r{}  [{:>3}%] {:?}{}",
            frame.readout, frame.ring_pct, frame.tier, label
        );
        let _ = std::io::stderr().flush();
        if frame.phase == Phase::Completed {
            eprintln!();
        }
    }
}
