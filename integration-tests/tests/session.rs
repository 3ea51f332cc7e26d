use integration_tests::harness::TestFilter;
use integration_tests::harness::packets::{self, http};
use pretty_assertions::assert_eq;
use reqwall_core::rules::Verdict;

#[test]
fn session_returns_one_verdict_per_frame_in_order() {
    // Arrange
    let filter = TestFilter::start("scenarios");
    let frames = vec![
        http("POST", "/admin/users", &[("Host", "x")]),
        http("GET", "/admin/users", &[("Host", "x")]),
        packets::tcp(b""),
        packets::udp(b"GET / HTTP/1.1\r\n\r\n"),
        vec![0x45; 12],
        http("GET", "/", &[("User-Agent", "curl/8.0")]),
    ];

    // Act
    let verdicts = filter.run_session(frames);

    // Assert
    assert_eq!(
        verdicts,
        vec![
            Verdict::Drop,
            Verdict::Accept,
            Verdict::Accept,
            Verdict::Accept,
            Verdict::Accept,
            Verdict::Drop,
        ]
    );

    let stats = filter.stats();
    assert_eq!(stats.packets, 6);
    assert_eq!(stats.dropped, 2);
    assert_eq!(stats.accepted, 4);
    assert_eq!(stats.not_http, 2);
    assert_eq!(stats.malformed, 1);
}

#[test]
fn configured_methods_widen_inspection() {
    let filter = TestFilter::start("custom_methods");

    let verdicts = filter.run_session(vec![
        http("DELETE", "/x", &[]),
        http("PATCH", "/users/1", &[]),
        http("PATCH", "/posts/1", &[]),
        http("GET", "/x", &[]),
    ]);

    assert_eq!(
        verdicts,
        vec![Verdict::Drop, Verdict::Drop, Verdict::Accept, Verdict::Accept]
    );
}
