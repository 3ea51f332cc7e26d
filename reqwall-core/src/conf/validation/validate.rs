use crate::conf::types::{Origin, RuntimeConfig};
use crate::conf::validation::ValidationReport;
use crate::rules::{DROP_TYPE, RuleSet};

/// Rule `type` values that knowingly mean "accept".
const ACCEPT_TYPES: [&str; 2] = ["", "accept"];

/// Check a loaded configuration and its rules for problems.
///
/// Errors make `run` refuse to start. Warnings point at rules that load
/// fine but cannot behave as their author likely intended.
pub fn validate_config(cfg: &RuntimeConfig, rules: &RuleSet) -> ValidationReport {
    let mut report = ValidationReport::default();

    validate_server(cfg, &mut report);
    validate_queue(cfg, &mut report);
    validate_filter(cfg, &mut report);
    validate_rules(cfg, rules, &mut report);

    report
}

fn validate_server(cfg: &RuntimeConfig, report: &mut ValidationReport) {
    let origin = Origin::new(&cfg.source, "server", None);

    if let Some(pid_file) = &cfg.server.pid_file {
        let parent = pid_file.parent().filter(|p| !p.as_os_str().is_empty());
        if parent.is_some_and(|p| !p.is_dir()) {
            report.pid_file_parent_dir_does_not_exist(pid_file.display(), &origin);
        }
    }
}

fn validate_queue(cfg: &RuntimeConfig, report: &mut ValidationReport) {
    let origin = Origin::new(&cfg.source, "queue", None);

    if cfg.queue.max_packet_len == 0 {
        report.zero_packet_len(&origin);
    }

    if cfg.queue.max_queue_len == 0 {
        report.zero_queue_len(&origin);
    }
}

fn validate_filter(cfg: &RuntimeConfig, report: &mut ValidationReport) {
    let origin = Origin::new(&cfg.source, "filter", None);

    if cfg.filter.methods.is_empty() {
        report.no_recognized_methods(&origin);
    }

    for method in cfg.filter.methods.iter() {
        if method.is_empty() || method.chars().any(char::is_whitespace) {
            report.invalid_method(method, &origin);
        }
    }
}

fn validate_rules(cfg: &RuntimeConfig, rules: &RuleSet, report: &mut ValidationReport) {
    let rules_path = cfg.rules_path();
    let mut first_wildcard: Option<usize> = None;

    for (i, rule) in rules.rules().iter().enumerate() {
        let origin = Origin::new(&rules_path, "rule", Some(i));

        if let Some(by) = first_wildcard {
            report.rule_shadowed(by, &origin);
        }

        if !rule.method.is_empty() && !cfg.filter.methods.recognizes(rule.method.as_bytes()) {
            report.rule_method_never_inspected(&rule.method, &origin);
        }

        if rule.kind != DROP_TYPE && !ACCEPT_TYPES.contains(&rule.kind.as_str()) {
            report.rule_type_not_drop(&rule.kind, &origin);
        }

        if rule.content_len < 0 {
            report.rule_negative_content_len(rule.content_len, &origin);
        }

        if first_wildcard.is_none() && rule.is_wildcard() {
            first_wildcard = Some(i);
        }
    }
}
