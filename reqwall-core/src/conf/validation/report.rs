use crate::conf::types::Origin;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Debug;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Serialize)]
struct ValidationReportJson<'a> {
    errors: &'a [ValidationIssue],
    warnings: &'a [ValidationIssue],
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub(crate) fn error(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub(crate) fn warning(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub fn render_json(&self) -> anyhow::Result<()> {
        let json = ValidationReportJson {
            errors: &self.errors,
            warnings: &self.warnings,
        };

        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }

    pub fn render_plain(&self) {
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            println!("{}: {}: {}", issue.origin, severity, issue.message);

            if let Some(help) = &issue.help {
                println!("  help: {}", help);
            }
        }
    }

    pub fn render_pretty(&self) {
        let errors = self.errors.len();
        let warnings = self.warnings.len();

        if errors > 0 || warnings > 0 {
            println!(
                "configuration validation found {} errors, {} warnings\n",
                errors, warnings
            );
        }

        let mut by_file = std::collections::BTreeMap::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            by_file
                .entry(&issue.origin.file)
                .or_insert(Vec::new())
                .push(issue);
        }

        for (file, issues) in by_file {
            println!("{}", file.display());

            for issue in issues {
                let location = match issue.origin.index {
                    Some(i) => format!("{}[{}]", issue.origin.section, i),
                    None => issue.origin.section.clone(),
                };

                match issue.severity {
                    Severity::Error => {
                        println!("  {} {}: {}", "error".red().bold(), location, issue.message);
                    }
                    Severity::Warning => {
                        println!(
                            "  {} {}: {}",
                            "warning".yellow().bold(),
                            location,
                            issue.message
                        );
                    }
                }

                if let Some(help) = &issue.help {
                    println!("    {} {}", "help:".cyan(), help);
                }

                println!();
            }
        }
    }
}

/// Configuration file validation
impl ValidationReport {
    pub fn no_recognized_methods(&mut self, origin: &Origin) {
        self.error(
            "filter.methods is empty; no packet would ever be inspected".to_string(),
            origin,
            Some("List at least one method, e.g. methods = [\"GET\", \"POST\", \"PUT\"]".to_string()),
        )
    }

    pub fn invalid_method(&mut self, method: &str, origin: &Origin) {
        self.error(
            format!("invalid method {:?}: must be non-empty with no whitespace", method),
            origin,
            None,
        )
    }

    pub fn zero_packet_len(&mut self, origin: &Origin) {
        self.error(
            "queue.max_packet_len must be greater than zero".to_string(),
            origin,
            None,
        )
    }

    pub fn zero_queue_len(&mut self, origin: &Origin) {
        self.error(
            "queue.max_queue_len must be greater than zero".to_string(),
            origin,
            None,
        )
    }

    pub fn pid_file_parent_dir_does_not_exist(&mut self, pid_file: std::path::Display, origin: &Origin) {
        self.error(
            format!("pid file parent directory does not exist: {}", pid_file),
            origin,
            None,
        )
    }
}

/// Rule file validation
impl ValidationReport {
    pub fn rules_file_unreadable(&mut self, message: &str, origin: &Origin) {
        self.error(
            format!("rule file could not be loaded: {}", message),
            origin,
            Some("At startup this runs with an empty rule set and accepts every packet.".to_string()),
        )
    }

    pub fn rule_method_never_inspected(&mut self, method: &str, origin: &Origin) {
        self.warning(
            format!("method {:?} does not start with a recognized method; this rule can never match", method),
            origin,
            Some("Add the method to filter.methods or remove the rule.".to_string()),
        )
    }

    pub fn rule_type_not_drop(&mut self, kind: &str, origin: &Origin) {
        self.warning(
            format!("rule type {:?} is not \"delete\"; matching requests are accepted", kind),
            origin,
            Some("Use type = \"delete\" to drop, or \"accept\" to make the exemption explicit.".to_string()),
        )
    }

    pub fn rule_negative_content_len(&mut self, content_len: i64, origin: &Origin) {
        self.warning(
            format!("contentLen {} is not positive and acts as a wildcard", content_len),
            origin,
            None,
        )
    }

    pub fn rule_shadowed(&mut self, by: usize, origin: &Origin) {
        self.warning(
            format!("rule is unreachable: rule {} matches every request first", by),
            origin,
            None,
        )
    }
}
