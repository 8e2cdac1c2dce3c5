//! Real-time alert output for rule violations.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use vigil_eval::Violation;
use vigil_rules::Severity;

use crate::reporter::ansi;

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => ansi::BLUE,
        Severity::Warning => ansi::YELLOW,
        Severity::Error => ansi::RED,
        Severity::Critical => ansi::MAGENTA,
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "ℹ",
        Severity::Warning => "⚠",
        Severity::Error => "✖",
        Severity::Critical => "🔥",
    }
}

/// Prints one formatted alert line per violation to stderr.
///
/// Wired into the validator as its violation listener; `quiet` turns it
/// into a no-op, `verbose` adds detail lines under each alert.
pub struct AlertPrinter {
    use_colors: bool,
    verbose: bool,
    quiet: bool,
    count: u64,
}

impl AlertPrinter {
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        AlertPrinter {
            use_colors,
            verbose,
            quiet,
            count: 0,
        }
    }

    /// Number of alerts emitted so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    pub fn alert(&mut self, violation: &Violation) {
        if self.quiet {
            return;
        }
        self.count += 1;

        let severity_tag = self.paint(
            &format!("[{}]", violation.severity.to_string().to_uppercase()),
            severity_color(violation.severity),
        );
        let entity_tag = self.paint(&format!("[{}]", violation.entity_id), ansi::CYAN);
        let rule_tag = self.paint(&violation.rule_name, ansi::BOLD);

        eprintln!(
            "{} {severity_tag} {entity_tag} {rule_tag}: {}",
            severity_icon(violation.severity),
            violation.message,
        );

        if self.verbose {
            let dim = if self.use_colors { ansi::DIM } else { "" };
            let reset = if self.use_colors { ansi::RESET } else { "" };
            eprintln!("   {dim}├─ Field: {}{reset}", violation.field);
            eprintln!("   {dim}├─ Actual: {}{reset}", violation.actual_value);
            eprintln!("   {dim}├─ Expected: {}{reset}", violation.expected);
            eprintln!("   {dim}├─ Timestamp: {}{reset}", violation.timestamp);
            eprintln!("   {dim}└─ Record Index: {}{reset}", violation.record_index);
        }
    }
}

/// A violation alert captured with its arrival time.
#[derive(Debug, Clone, Serialize)]
pub struct CollectedAlert {
    pub received_at: String,
    pub violation: Violation,
}

/// Accumulates alerts for batch consumers instead of printing them.
#[derive(Debug, Default)]
pub struct AlertCollector {
    alerts: Vec<CollectedAlert>,
}

impl AlertCollector {
    pub fn new() -> Self {
        AlertCollector::default()
    }

    pub fn alert(&mut self, violation: &Violation) {
        self.alerts.push(CollectedAlert {
            received_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            violation: violation.clone(),
        });
    }

    pub fn alerts(&self) -> &[CollectedAlert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }
}
