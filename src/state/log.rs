/// User-facing log panel
///
/// Separate from `tracing` output: this is the list shown in the window and
/// the user can clear it at any time.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub at: DateTime<Local>,
    pub message: String,
}

impl LogLine {
    /// `HH:MM:SS  message`
    pub fn display(&self) -> String {
        format!("{}  {}", self.at.format("%H:%M:%S"), self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogPanel {
    lines: Vec<LogLine>,
}

impl LogPanel {
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "kml_editor::panel", "{}", message);
        self.lines.push(LogLine {
            at: Local::now(),
            message,
        });
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Messages only, oldest first
    #[cfg(test)]
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.message.as_str())
    }
}
