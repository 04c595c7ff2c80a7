use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "schemalift",
        "migrate",
        "--project-dir",
        "/srv/app",
        "--database",
        "app.duckdb",
        "-v",
    ])
    .unwrap();

    assert!(matches!(cli.command, Commands::Migrate));
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "/srv/app");
    assert_eq!(cli.global.database.as_deref(), Some("app.duckdb"));
    assert_eq!(cli.global.config, None);
}

#[test]
fn test_status_output_defaults_to_text() {
    let cli = Cli::try_parse_from(["schemalift", "status"]).unwrap();
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, StatusOutput::Text),
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::try_parse_from(["schemalift", "status", "-o", "json"]).unwrap();
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, StatusOutput::Json),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["schemalift", "rollback"]).is_err());
}
