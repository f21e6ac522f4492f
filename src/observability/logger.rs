//! Structured JSON logger
//!
//! One line per event, `event` and `severity` first, remaining fields in
//! key order so identical events always render identically. Writes are
//! synchronous and every line goes to stderr; stdout carries command
//! output only.

use serde_json::Value;
use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info = 0,
    Warn = 1,
    Error = 2,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Line-oriented JSON logger.
pub struct Logger;

impl Logger {
    /// Log an event to stderr.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to(&mut io::stderr(), severity, event, fields);
    }

    /// Log an event to the given writer.
    pub fn log_to<W: Write>(
        writer: &mut W,
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
    ) {
        let line = Self::render(severity, event, fields);
        Self::write_line(&line, writer);
    }

    /// Render one log line, newline included.
    pub(crate) fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        let mut output = String::with_capacity(128);
        output.push_str("{\"event\":");
        output.push_str(&quote(event));
        output.push_str(",\"severity\":");
        output.push_str(&quote(severity.as_str()));
        for (key, value) in sorted {
            output.push(',');
            output.push_str(&quote(key));
            output.push(':');
            output.push_str(&quote(value));
        }
        output.push_str("}\n");
        output
    }

    fn write_line<W: Write>(line: &str, writer: &mut W) {
        // Logging must never fail the caller
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert_eq!(Severity::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_log_to_writer() {
        let mut out = Vec::new();
        Logger::log_to(&mut out, Severity::Info, "TYPE_REGISTERED", &[("type_id", "t1")]);
        Logger::log_to(&mut out, Severity::Warn, "ITEM_REJECTED", &[]);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type_id"], "t1");
    }

    #[test]
    fn test_render_is_json() {
        let line = Logger::render(Severity::Info, "TYPE_VALIDATION_COMPLETE", &[("errors", "0")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "TYPE_VALIDATION_COMPLETE");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["errors"], "0");
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_render_deterministic_ordering() {
        let a = Logger::render(Severity::Warn, "E", &[("zebra", "1"), ("apple", "2")]);
        let b = Logger::render(Severity::Warn, "E", &[("apple", "2"), ("zebra", "1")]);
        assert_eq!(a, b);
        assert!(a.find("apple").unwrap() < a.find("zebra").unwrap());
        assert!(a.find("\"event\"").unwrap() < a.find("\"severity\"").unwrap());
    }

    #[test]
    fn test_render_escapes() {
        let line = Logger::render(Severity::Info, "E", &[("type", "a \"b\"\nc")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["type"], "a \"b\"\nc");
    }
}
