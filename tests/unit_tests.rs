use gpio_status::{
    board::{Board, PhysicalPin, PhysicalPinLayout},
    gpio::{funcs::parse_function_line, merge, state::parse_state_line},
    services::{check_services, is_enabled},
    status::annotate_pins,
    ScriptedRunner, StatusError, StatusReport, ToolConfig, WebConfig, DEFAULT_WEB_PORT,
};

/// Test the documented `get` line example
#[test]
fn test_state_line_example() {
    let state = parse_state_line("10: level=1 fsel=4 func=ALT0").expect("Should parse state line");
    assert_eq!(state.index, 10);
    assert_eq!(state.level, 1);
    assert_eq!(state.function, "ALT0");
}

/// Test the documented `funcs` line example
#[test]
fn test_function_line_example() {
    let funcs = parse_function_line("10, UP, INPUT, OUTPUT, ALT0").expect("Should parse funcs line");
    assert_eq!(funcs.pull, "UP");
    assert_eq!(funcs.funcs, vec!["INPUT", "OUTPUT", "ALT0"]);
}

/// Test that only an exact "0" means enabled
#[test]
fn test_service_flag_interpretation() {
    assert!(is_enabled("0"));
    assert!(!is_enabled("1"));
    assert!(!is_enabled("enabled"));
    assert!(!is_enabled(""));
}

/// Test service checks through the public runner
#[test]
fn test_check_services_blocking() {
    let runner = ScriptedRunner::new()
        .with_output("raspi-config nonint get_spi", "0")
        .with_output("raspi-config nonint get_ssh", "1");

    let flags = tokio_test::block_on(check_services(&runner, "raspi-config"));
    assert!(flags.spi);
    assert!(!flags.ssh);
    assert!(!flags.camera);
}

/// Test that every merged pin is marked, and nothing else
#[test]
fn test_merge_and_annotate() {
    let layout = PhysicalPinLayout::new(
        2,
        2,
        vec![
            PhysicalPin::new(1, "3V3"),
            PhysicalPin::new(2, "5V"),
            PhysicalPin::new(3, "GPIO2"),
            PhysicalPin::new(4, "GND"),
        ],
    );
    let states = vec![
        parse_state_line("GPIO 2: level=1 fsel=4 func=ALT0").unwrap(),
        parse_state_line("GPIO 0: level=0 fsel=0 func=INPUT").unwrap(),
    ];
    let funcs = vec![
        parse_function_line("0, UP, SDA0").unwrap(),
        parse_function_line("2, UP, SDA1").unwrap(),
    ];

    let bcm = merge(states, funcs, true).expect("Should merge");
    let pins = annotate_pins(&layout, &bcm);

    let flags: Vec<bool> = pins.iter().map(|p| p.is_bcm).collect();
    assert_eq!(flags, vec![false, false, true, false]);
    assert_eq!(pins[2].status.as_ref().unwrap().current_func, "ALT0");
}

/// Test hardware facts serialize with the dashboard's field names
#[test]
fn test_hardware_facts_schema() {
    let board = Board::from_revision("a22082").expect("Should decode revision");
    let json = serde_json::to_value(&board.facts).expect("Should serialize");

    for field in [
        "revision",
        "model",
        "pcb_revision",
        "released",
        "soc",
        "manufacturer",
        "memory",
        "storage",
        "usb",
        "usb3",
        "ethernet",
        "eth_speed",
        "wifi",
        "bluetooth",
        "csi",
        "dsi",
    ] {
        assert!(json.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(json["manufacturer"], "Embest");
    assert_eq!(json.as_object().unwrap().len(), 16);
}

/// Test a degraded report deserializes with absent sections
#[test]
fn test_degraded_report_roundtrip() {
    let json = r#"{"commands": {"raspi_config": true, "raspi_gpio": false}}"#;
    let report: StatusReport = serde_json::from_str(json).expect("Should deserialize");
    assert!(report.is_degraded());
    assert!(report.hardware.is_none());
    assert!(report.services.is_none());
    assert_eq!(serde_json::to_string(&report).unwrap().len(), json.replace(' ', "").len());
}

/// Test StatusError creation and formatting
#[test]
fn test_status_error_types() {
    let parse_error = StatusError::parse_error("No level in `GPIO 3:`");
    assert!(format!("{}", parse_error).contains("GPIO 3:"));
    assert!(parse_error.is_tool_failure());

    let mismatch = StatusError::mismatch_error("GPIO21 has a state but no function list");
    assert!(format!("{}", mismatch).contains("GPIO21"));
    assert!(!mismatch.is_tool_failure());

    let timeout = StatusError::Timeout {
        command: "raspi-gpio get 0-27".to_string(),
        timeout_ms: 5000,
    };
    assert!(format!("{}", timeout).contains("5000ms"));
    assert!(timeout.is_tool_failure());

    let board = StatusError::board_error("no header");
    assert!(!board.is_tool_failure());

    let config_error = StatusError::config_error("Invalid configuration");
    assert!(format!("{}", config_error).contains("Invalid configuration"));
}

/// Test WebConfig construction and dashboard lookup
#[test]
fn test_web_config() {
    let config = WebConfig::new("127.0.0.1", 9090).with_cors(false);
    assert!(!config.enable_cors);
    assert_eq!(config.bind_address(), "127.0.0.1:9090");
    assert!(config.dashboard().is_none());

    let defaults = WebConfig::default();
    assert!(defaults.enable_cors);
    assert_eq!(defaults.bind_address(), format!("0.0.0.0:{}", DEFAULT_WEB_PORT));
}

/// A configured dashboard directory is only served when it exists
#[test]
fn test_web_config_dashboard_dir() {
    let existing = std::env::temp_dir();
    let config = WebConfig::default().with_dashboard_dir(Some(&existing));
    assert_eq!(config.dashboard(), Some(existing.as_path()));

    let missing = existing.join("gpio-status-no-such-dashboard");
    let config = WebConfig::default().with_dashboard_dir(Some(&missing));
    assert_eq!(config.dashboard_dir.as_deref(), Some(missing.as_path()));
    assert!(config.dashboard().is_none());
}

/// Test ToolConfig defaults match the Raspberry Pi OS tool names
#[test]
fn test_tool_config() {
    let config = ToolConfig::default();
    assert_eq!(config.config_tool, "raspi-config");
    assert_eq!(config.gpio_tool, "raspi-gpio");
    assert_eq!(config.command_timeout_ms, 5000);
}
