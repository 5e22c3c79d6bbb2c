//! Terminal arrival effect: entrance banner plus an audible cue.
//!
//! The banner is printed for the request that was just put on top of the
//! pending list. The cue is either the terminal bell or an external player
//! command (e.g. `paplay notification.wav`), spawned and never awaited here.

use crate::config::SoundSettings;
use crate::effect::NotificationEffect;
use crate::request::{describe_pending, ApprovalRequest};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io::Write;
use std::process::Stdio;

/// Arrival effect for the `watch` and `demo` commands.
pub struct TerminalEffect {
    sound: SoundSettings,
}

impl TerminalEffect {
    pub fn new(sound: SoundSettings) -> Self {
        Self { sound }
    }

    fn play_cue(&self) -> Result<()> {
        match self.sound.command.as_deref() {
            None => {
                let mut stdout = std::io::stdout();
                stdout.write_all(b"\x07")?;
                stdout.flush()?;
                Ok(())
            }
            Some(command) => spawn_player(command),
        }
    }
}

impl NotificationEffect for TerminalEffect {
    fn on_admitted(&self, request: &ApprovalRequest) -> Result<()> {
        println!();
        println!(
            "  {} {}",
            "🔔".yellow(),
            format!("New {}", request.kind.label()).green().bold()
        );
        println!("     {}", describe_pending(&request.kind));

        if self.sound.enabled {
            self.play_cue()?;
        }
        Ok(())
    }
}

/// Start the sound player in the background and reap it on the runtime.
fn spawn_player(command: &str) -> Result<()> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("sound command is empty");
    };

    let mut child = tokio::process::Command::new(program)
        .args(parts)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start sound command: {}", command))?;

    let command = command.to_string();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) if !status.success() => {
                tracing::warn!("Sound command '{}' exited with {}", command, status);
            }
            Err(e) => tracing::warn!("Sound command '{}' failed: {}", command, e),
            Ok(_) => {}
        }
    });
    Ok(())
}
