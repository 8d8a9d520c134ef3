//! Bump-allocating game logger
//!
//! Messages are formatted into a reusable bump arena, then either printed or
//! captured in memory. JSON output writes one object per line.

use crate::game::VerbosityLevel;
use bumpalo::Bump;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt::{self, Write as FmtWrite};
use std::ops::Deref;

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
}

/// A captured log line
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// e.g. "resolution", "rejection", "game_over"
    pub category: Option<String>,
}

/// Read-only access to captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Centralized logger for a game loop
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,

    /// Scratch arena for formatting, reset after every message
    format_bump: RefCell<Bump>,

    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        self.output_mode == OutputMode::Memory
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Print captured entries the verbosity allows, then clear the buffer
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                self.write_stdout(entry.level, entry.category.as_deref(), &entry.message);
            }
        }
        self.clear_logs();
    }

    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
        self.format_bump.borrow_mut().reset();
    }

    /// Format and log a categorized message
    ///
    /// Formatting happens in the bump arena and is skipped entirely when the
    /// message would be neither printed nor captured.
    pub fn log_fmt(&self, level: VerbosityLevel, category: &str, args: fmt::Arguments<'_>) {
        if level > self.verbosity && !self.is_capturing() {
            return;
        }
        let mut bump = self.format_bump.borrow_mut();
        {
            let mut scratch = bumpalo::collections::String::new_in(&bump);
            // Writing into a bump string can't fail
            let _ = scratch.write_fmt(args);
            self.log(level, Some(category), scratch.as_str());
        }
        bump.reset();
    }

    fn log(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        if level == VerbosityLevel::Silent {
            return;
        }
        if self.is_capturing() {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        } else if level <= self.verbosity {
            self.write_stdout(level, category, message);
        }
    }

    fn write_stdout(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        println!("{}", self.render(level, category, message));
    }

    /// One output line in the configured format
    fn render(&self, level: VerbosityLevel, category: Option<&str>, message: &str) -> String {
        match self.output_format {
            OutputFormat::Text if level == VerbosityLevel::Minimal => message.to_string(),
            OutputFormat::Text => format!("  {message}"),
            OutputFormat::Json => serde_json::json!({
                "level": level,
                "category": category,
                "message": message,
            })
            .to_string(),
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_format", &self.output_format)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert_eq!(logger.output_mode(), OutputMode::Stdout);
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.log_fmt(VerbosityLevel::Normal, "test", format_args!("test message"));
        logger.log_fmt(VerbosityLevel::Minimal, "test", format_args!("minimal message"));

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
    }

    #[test]
    fn test_log_fmt_uses_category() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();

        for i in 0..3 {
            logger.log_fmt(VerbosityLevel::Verbose, "resolution", format_args!("effect {i}"));
        }

        let logs = logger.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[2].message, "effect 2");
        assert_eq!(logs[0].category.as_deref(), Some("resolution"));
    }

    #[test]
    fn test_silent_level_is_dropped() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.log_fmt(VerbosityLevel::Silent, "noise", format_args!("ignored"));
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_flush_clears_buffer() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();
        logger.log_fmt(VerbosityLevel::Normal, "test", format_args!("message 1"));
        assert_eq!(logger.logs().len(), 1);

        logger.flush_buffer();
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_render_text_and_json() {
        let mut logger = GameLogger::new();
        assert_eq!(logger.output_format(), OutputFormat::Text);
        assert_eq!(
            logger.render(VerbosityLevel::Minimal, Some("game_over"), "side_a wins"),
            "side_a wins"
        );
        assert_eq!(
            logger.render(VerbosityLevel::Normal, None, "rejected"),
            "  rejected"
        );

        logger.set_output_format(OutputFormat::Json);
        let line = logger.render(VerbosityLevel::Normal, Some("rejection"), "attack rejected");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "level": "normal",
                "category": "rejection",
                "message": "attack rejected",
            })
        );
    }
}
