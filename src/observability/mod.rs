//! Observability for gentype
//!
//! Structured JSON logging of validation and catalog lifecycle events,
//! written to stderr. Observability is read-only: nothing logged here
//! influences a validation result.
//!
//! ```ignore
//! use gentype::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::TypeRegistered, &[("type_id", "t1")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Severity an event is logged at.
fn severity_of(event: Event) -> Severity {
    if event.is_error() {
        Severity::Error
    } else if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_of(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_of_events() {
        assert_eq!(severity_of(Event::TypeValidationBegin), Severity::Info);
        assert_eq!(severity_of(Event::ItemRejected), Severity::Warn);
        assert_eq!(severity_of(Event::TypeLoadFailed), Severity::Error);
    }

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::CatalogLoaded);
        log_event_with_fields(Event::TypeRegistered, &[("type_id", "t1")]);
    }
}
