use clap::Parser;
use pretty_assertions::assert_eq;
use sheet_cli::{fixtures, run_simulator, Cli, Command, SimulatorConfig};
use sheet_model::Role;

#[test]
fn bundled_sample_matches_shared_fixture() {
    assert_eq!(
        fixtures::sample_sheet().unwrap(),
        sheet_test_utils::sample_sheet()
    );
}

#[test]
fn demo_arguments_parse() {
    let cli = Cli::try_parse_from([
        "daily-sheet",
        "demo",
        "--name",
        "Alice",
        "--role",
        "Student",
        "--json",
    ])
    .unwrap();

    let Command::Demo(args) = cli.command else {
        panic!("expected demo");
    };
    assert_eq!(args.name, "Alice");
    assert_eq!(args.role, Role::Student);
    assert!(args.json);
    assert_eq!(cli.log_level, "info");
}

#[test]
fn unknown_role_is_rejected() {
    assert!(Cli::try_parse_from(["daily-sheet", "demo", "--role", "admin"]).is_err());
}

#[test]
fn simulate_arguments_map_to_config() {
    let cli = Cli::try_parse_from([
        "daily-sheet",
        "simulate",
        "--steps",
        "25",
        "--seed",
        "9",
        "--stop-on-violation",
    ])
    .unwrap();

    let Command::Simulate(args) = cli.command else {
        panic!("expected simulate");
    };
    let config = args.to_config();
    assert_eq!(config.steps, 25);
    assert_eq!(config.seed, 9);
    assert!(config.stop_on_first_violation);
}

#[test]
fn demo_reads_sheet_and_config_files() {
    let dir = tempfile::tempdir().unwrap();
    let sheet_path = dir.path().join("sheet.json");
    let config_path = dir.path().join("sheet.toml");
    std::fs::write(
        &sheet_path,
        sheet_test_utils::sample_sheet().to_json_pretty().unwrap(),
    )
    .unwrap();
    std::fs::write(&config_path, "collapsed_preview = 0\n").unwrap();

    let cli = Cli::try_parse_from([
        "daily-sheet",
        "demo",
        "--json",
        "--sheet",
        sheet_path.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
    ])
    .unwrap();
    let Command::Demo(args) = cli.command else {
        panic!("expected demo");
    };

    let output = args.execute().unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["header"]["role"], "mentor");
    // the walkthrough expands the first row; the second stays collapsed
    assert_eq!(value["rows"][0]["others"].as_array().unwrap().len(), 3);
    assert_eq!(value["rows"][1]["others"].as_array().unwrap().len(), 0);
    assert_eq!(value["rows"][1]["othersTotal"], 1);
}

#[test]
fn missing_sheet_file_is_an_error() {
    let cli = Cli::try_parse_from(["daily-sheet", "demo", "--sheet", "/no/such/sheet.json"]).unwrap();
    let Command::Demo(args) = cli.command else {
        panic!("expected demo");
    };
    assert!(args.execute().is_err());
}

#[test]
fn long_simulation_keeps_every_rule() {
    let report = run_simulator(SimulatorConfig {
        seed: 2024,
        steps: 2000,
        stop_on_first_violation: false,
    });
    assert!(report.passed(), "{}", report.generate_text());
}
