// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::deploy::{Convergence, Summary};

/// Prefix for fatal errors on stderr.
pub const ERROR_PREFIX: &str = "ecs-deploy error:";

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print the final deployment summary.
    pub fn summary(&self, summary: &Summary) {
        match self.mode {
            OutputMode::Normal => {
                println!();
                println!("Deployed version: {}", summary.task_definition);
                println!("- Previous: {}", summary.previous_task_definition);
                println!("- Image: {}", summary.image);
                println!("- CPU: {}", summary.cpu.as_deref().unwrap_or("-"));
                println!(
                    "- Memory: {} MiB",
                    summary.memory.as_deref().unwrap_or("-")
                );
                println!("- Desired count: {}", summary.desired_count);
                match summary.convergence {
                    Convergence::NotChecked => println!("- Convergence: not checked"),
                    Convergence::Confirmed {
                        polls,
                        elapsed_secs,
                    } => println!(
                        "- Convergence: confirmed after {polls} poll(s), {elapsed_secs}s"
                    ),
                }
                self.success("Deploy is finished");
            }
            OutputMode::Quiet => println!("{}", summary.task_definition),
            OutputMode::Json => {
                let event = SummaryEvent {
                    event: "summary",
                    summary,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "success",
                    message,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a fatal error message, always carrying [`ERROR_PREFIX`].
    pub fn error(&self, message: &str) {
        let message = format!("{ERROR_PREFIX} {message}");
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("{message}"),
            OutputMode::Json => self.emit_stderr("error", &message),
        }
    }

    fn emit_stderr(&self, event: &str, message: &str) {
        let event = JsonEvent {
            event,
            message,
            duration_secs: self.duration(),
        };
        if let Ok(json) = serde_json::to_string(&event) {
            eprintln!("{json}");
        }
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[derive(Serialize)]
struct SummaryEvent<'a> {
    event: &'a str,
    summary: &'a Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
