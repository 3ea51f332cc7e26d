use integration_tests::harness::TestFilter;
use integration_tests::harness::packets::http;
use pretty_assertions::assert_eq;
use reqwall_core::runtime::ReloadError;
use reqwall_core::rules::Verdict;
use tracing::Level;

const RULE_LOAD_FAILED: &str = "rule load failed; continuing with an empty rule set";

#[test]
fn missing_rule_file_runs_fail_open_and_logs_once() {
    // Arrange
    let filter = TestFilter::start("missing_rules");

    // Act
    let verdicts = filter.run_session(vec![
        http("POST", "/admin", &[]),
        http("GET", "/", &[("User-Agent", "curl/8.0")]),
    ]);

    // Assert
    assert_eq!(filter.rule_count(), 0);
    assert_eq!(verdicts, vec![Verdict::Accept, Verdict::Accept]);

    let failures: Vec<_> = filter
        .events()
        .into_iter()
        .filter(|e| e.message() == RULE_LOAD_FAILED)
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].level, Level::ERROR);
}

#[test]
fn unparsable_rule_file_runs_fail_open() {
    let filter = TestFilter::start("broken_rules");

    let verdict = filter.verdict(&http("POST", "/admin", &[]));

    assert_eq!(filter.rule_count(), 0);
    assert_eq!(verdict, Verdict::Accept);
    assert!(
        filter
            .events()
            .iter()
            .any(|e| e.level == Level::ERROR && e.message() == RULE_LOAD_FAILED),
        "expected a rule load failure event"
    );
}

#[test]
fn reload_picks_up_new_rules() {
    // Arrange
    let filter = TestFilter::start("missing_rules");
    let frame = http("GET", "/private", &[]);
    assert_eq!(filter.verdict(&frame), Verdict::Accept);

    // Act
    filter.write_rules(r#"[{"type": "delete", "pathPrefix": "/private"}]"#);
    filter.reload().expect("reload should succeed");

    // Assert
    assert_eq!(filter.rule_count(), 1);
    assert_eq!(filter.verdict(&frame), Verdict::Drop);
}

#[test]
fn failed_reload_keeps_current_rules() {
    // Arrange
    let filter = TestFilter::start("scenarios");
    let frame = http("POST", "/admin", &[]);
    let before = filter.rule_count();

    // Act
    filter.write_rules("not json");
    let result = filter.reload();

    // Assert
    assert!(matches!(result, Err(ReloadError::Load(_))));
    assert_eq!(filter.rule_count(), before);
    assert_eq!(filter.verdict(&frame), Verdict::Drop);
}

#[test]
fn invalid_config_on_reload_keeps_current_rules() {
    let filter = TestFilter::start("scenarios");

    filter.write_config("filter = {\n  methods = []\n}\n");
    let result = filter.reload();

    assert!(matches!(result, Err(ReloadError::InvalidConfig { .. })));
    assert_eq!(filter.verdict(&http("POST", "/admin", &[])), Verdict::Drop);
}
