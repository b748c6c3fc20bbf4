use std::time::Duration;

use clap::Parser;

use super::cli::{Command, SmokeArgs};
use super::parsers::parse_duration_arg;
use super::types::{PositiveU64, PositiveUsize};

#[test]
fn duration_parser_accepts_suffixes() -> Result<(), String> {
    let cases = [
        ("60s", Duration::from_secs(60)),
        ("500ms", Duration::from_millis(500)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
        ("30", Duration::from_secs(30)),
    ];
    for (input, expected) in cases {
        let parsed =
            parse_duration_arg(input).map_err(|err| format!("parse '{}' failed: {}", input, err))?;
        assert_eq!(parsed, expected);
    }
    Ok(())
}

#[test]
fn duration_parser_rejects_invalid_values() {
    for input in ["", "0s", "abc", "10d", "s10"] {
        assert!(parse_duration_arg(input).is_err(), "expected '{}' to fail", input);
    }
}

#[test]
fn positive_newtypes_reject_zero() {
    assert!("0".parse::<PositiveU64>().is_err());
    assert!("0".parse::<PositiveUsize>().is_err());
    assert!("5".parse::<PositiveU64>().is_ok());
}

#[test]
fn cli_parses_resolve_subcommand() -> Result<(), String> {
    let args = SmokeArgs::try_parse_from([
        "didsmoke", "resolve", "-u", "http://127.0.0.1:9999", "-t", "2s", "--vus", "3",
    ])
    .map_err(|err| format!("parse failed: {}", err))?;

    match args.command {
        Command::Resolve(resolve) => {
            assert_eq!(resolve.url.as_deref(), Some("http://127.0.0.1:9999"));
            assert_eq!(resolve.common.duration, Some(Duration::from_secs(2)));
            assert_eq!(resolve.common.vus.map(PositiveUsize::get), Some(3));
            Ok(())
        }
        Command::Registrar(_) => Err("expected resolve subcommand".to_owned()),
    }
}

#[test]
fn cli_parses_registrar_subcommand_with_api_key() -> Result<(), String> {
    let args = SmokeArgs::try_parse_from([
        "didsmoke",
        "registrar",
        "--api-key",
        "secret",
        "--rps",
        "7",
    ])
    .map_err(|err| format!("parse failed: {}", err))?;

    match args.command {
        Command::Registrar(registrar) => {
            assert_eq!(registrar.api_key.as_deref(), Some("secret"));
            assert_eq!(registrar.common.rps.map(PositiveU64::get), Some(7));
            Ok(())
        }
        Command::Resolve(_) => Err("expected registrar subcommand".to_owned()),
    }
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(SmokeArgs::try_parse_from(["didsmoke"]).is_err());
}
