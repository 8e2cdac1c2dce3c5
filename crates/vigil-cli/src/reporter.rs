//! Console rendering and file output for validation reports.

use std::io::{self, Write};
use std::path::Path;

use vigil_eval::{Report, Status};
use vigil_rules::Severity;

pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[91m";
    pub const GREEN: &str = "\x1b[92m";
    pub const YELLOW: &str = "\x1b[93m";
    pub const BLUE: &str = "\x1b[94m";
    pub const MAGENTA: &str = "\x1b[95m";
    pub const CYAN: &str = "\x1b[96m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

const WIDTH: usize = 66;

/// Renders a [`Report`] as a console summary or a JSON file.
pub struct Reporter {
    use_colors: bool,
    max_violations: usize,
}

impl Reporter {
    pub fn new(use_colors: bool, max_violations: usize) -> Self {
        Reporter {
            use_colors,
            max_violations,
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Info => ansi::BLUE,
            Severity::Warning => ansi::YELLOW,
            Severity::Error => ansi::RED,
            Severity::Critical => ansi::MAGENTA,
        }
    }

    /// Print the formatted console summary.
    pub fn print_summary(&self, report: &Report, out: &mut impl Write) -> io::Result<()> {
        let heavy = "═".repeat(WIDTH);
        let light = "─".repeat(WIDTH);

        writeln!(out, "\n{heavy}")?;
        writeln!(
            out,
            "{}",
            self.paint("                    VALIDATION REPORT", ansi::BOLD)
        )?;
        writeln!(out, "{heavy}")?;

        let summary = &report.summary;
        let pass_color = if summary.pass_rate >= 90.0 {
            ansi::GREEN
        } else if summary.pass_rate >= 70.0 {
            ansi::YELLOW
        } else {
            ansi::RED
        };
        let violation_color = if summary.total_violations > 0 {
            ansi::RED
        } else {
            ansi::GREEN
        };

        writeln!(out, "\n  Total Records:     {}", summary.total_records)?;
        writeln!(
            out,
            "  Passed:            {} ({})",
            self.paint(&summary.total_passed.to_string(), ansi::GREEN),
            self.paint(&format!("{:.1}%", summary.pass_rate), pass_color),
        )?;
        writeln!(
            out,
            "  Violations:        {}",
            self.paint(&summary.total_violations.to_string(), violation_color),
        )?;

        writeln!(out, "\n{light}")?;
        writeln!(out, "{}", self.paint("  Entity Status:", ansi::BOLD))?;
        writeln!(out, "{light}")?;
        for (entity_id, entity) in &report.entities {
            let (label, color) = match entity.status {
                Status::Pass => ("PASS", ansi::GREEN),
                Status::Fail => ("FAIL", ansi::RED),
            };
            let detail = if entity.violation_count > 0 {
                format!(" ({} violations)", entity.violation_count)
            } else {
                String::new()
            };
            writeln!(
                out,
                "    {entity_id}: {}{detail}",
                self.paint(label, color)
            )?;
        }

        if !report.violations_by_rule.is_empty() {
            writeln!(out, "\n{light}")?;
            writeln!(out, "{}", self.paint("  Violations by Rule:", ansi::BOLD))?;
            writeln!(out, "{light}")?;
            let mut by_rule: Vec<(&String, &u64)> = report.violations_by_rule.iter().collect();
            by_rule.sort_by(|a, b| b.1.cmp(a.1));
            for (position, (rule_id, count)) in by_rule.iter().take(5).enumerate() {
                writeln!(
                    out,
                    "    {}. {rule_id}: {}",
                    position + 1,
                    self.paint(&count.to_string(), ansi::YELLOW)
                )?;
            }
        }

        if !report.violations_by_severity.is_empty() {
            writeln!(out, "\n{light}")?;
            writeln!(
                out,
                "{}",
                self.paint("  Violations by Severity:", ansi::BOLD)
            )?;
            writeln!(out, "{light}")?;
            for severity in [
                Severity::Critical,
                Severity::Error,
                Severity::Warning,
                Severity::Info,
            ] {
                if let Some(count) = report.violations_by_severity.get(&severity) {
                    writeln!(
                        out,
                        "    {}: {}",
                        severity.to_string().to_uppercase(),
                        self.paint(&count.to_string(), Self::severity_color(severity))
                    )?;
                }
            }
        }

        if !report.violations.is_empty() && self.max_violations > 0 {
            let shown = report.violations.len().min(self.max_violations);
            writeln!(out, "\n{light}")?;
            writeln!(
                out,
                "{}",
                self.paint(&format!("  Recent Violations (showing {shown}):"), ansi::BOLD)
            )?;
            writeln!(out, "{light}")?;
            for violation in report.violations.iter().take(self.max_violations) {
                writeln!(
                    out,
                    "    [{}] {} - {}: {}",
                    self.paint(
                        &violation.severity.to_string().to_uppercase(),
                        Self::severity_color(violation.severity)
                    ),
                    self.paint(&violation.entity_id, ansi::CYAN),
                    violation.rule_name,
                    violation.message,
                )?;
            }
        }

        writeln!(out, "\n{heavy}\n")?;
        Ok(())
    }

    /// Write the full report as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn write_json(&self, report: &Report, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&mut file, report)?;
        writeln!(file)?;
        Ok(())
    }
}
