use super::*;

fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once("netwatch").chain(args.iter().copied());
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn parses_capture_arguments() {
    let cli = parse(&["--human", "analysis", "capture", "--protocol", "TCP", "--count", "50", "--timeout", "20"]);
    assert!(cli.human);
    match cli.command {
        Command::Analysis(AnalysisCommand { command: AnalysisSubcommand::Capture { protocol, count, timeout } }) => {
            assert_eq!(protocol, Some(CaptureProtocol::Tcp));
            assert_eq!(count, Some(50));
            assert_eq!(timeout, Some(20));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_alert_status_and_locale() {
    let cli = parse(&["--locale", "en-US", "monitoring", "alerts", "--status", "resolved"]);
    assert_eq!(cli.locale, Locale::EnUs);
    assert!(matches!(
        cli.command,
        Command::Monitoring(MonitoringCommand { command: MonitoringSubcommand::Alerts { status: Some(AlertStatus::Resolved) } })
    ));
}

#[test]
fn rejects_unknown_capture_protocol() {
    let argv = ["netwatch", "analysis", "capture", "--protocol", "icmp"];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn capture_timeout_extends_request_timeout() {
    let cli = parse(&["analysis", "capture", "--timeout", "30"]);
    assert_eq!(request_timeout(Duration::from_secs(10), &cli.command), Duration::from_secs(35));
}

#[test]
fn short_capture_keeps_base_timeout() {
    let cli = parse(&["analysis", "capture", "--timeout", "2"]);
    assert_eq!(request_timeout(Duration::from_secs(10), &cli.command), Duration::from_secs(10));
}

#[test]
fn speed_test_gets_a_minute() {
    let cli = parse(&["monitoring", "speed-test"]);
    assert_eq!(request_timeout(Duration::from_secs(10), &cli.command), Duration::from_secs(60));
}

#[test]
fn plain_commands_keep_base_timeout() {
    let cli = parse(&["devices", "list"]);
    assert_eq!(request_timeout(Duration::from_secs(10), &cli.command), Duration::from_secs(10));
}

#[test]
fn route_probe_reports_guard_redirect() {
    let router = Router::new(Session::in_memory());
    let out = Output { human: false, locale: Locale::default() };
    run_route(&router, "/analytics", out).unwrap();
    assert_eq!(router.location(), "/login");
}
