use anyhow::Result;
use housing_ledger::{LedgerConfig, PricingPolicy, Registry, Resident, Shell};
use std::io::Cursor;
use std::io::Write;
use tempfile::NamedTempFile;

struct Session {
    registry: Registry,
    stdout: String,
    stderr: String,
}

fn run(config: LedgerConfig, script: &str) -> Result<Session> {
    run_with(config, Registry::new(), script)
}

fn run_with(config: LedgerConfig, registry: Registry, script: &str) -> Result<Session> {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let registry = Shell::new(config, Cursor::new(script.to_string()), &mut stdout, &mut stderr)
        .with_registry(registry)
        .run()?;

    Ok(Session {
        registry,
        stdout: String::from_utf8(stdout)?,
        stderr: String::from_utf8(stderr)?,
    })
}

#[test]
fn test_full_session_computes_total() -> Result<()> {
    let script = "\
a
Alice
w
a
Bob
n
s
Alice
A
50
s
Bob
b
50
c
q
";
    let session = run(LedgerConfig::default(), script)?;

    assert_eq!(session.registry.len(), 2);
    assert!(session.stdout.contains("Available services:"));
    assert!(session.stdout.contains("1. Service A"));
    assert!(session.stdout.contains("Total cost of all services: $90.00"));
    assert!(session.stdout.ends_with("Exiting.\n"));
    assert!(session.stderr.is_empty());
    Ok(())
}

#[test]
fn test_errors_are_reported_and_session_continues() -> Result<()> {
    let script = "\
a Alice n
s Alice a 90
s Alice a 15
s Nobody a 1
s Alice a -3 99
10
c
q
";
    let session = run(LedgerConfig::default(), script)?;

    assert!(session.stderr.contains("Service quantity cannot exceed 100."));
    assert!(session
        .stderr
        .contains("Resident named \"Nobody\" does not exist."));
    assert!(session.stderr.contains("valid service quantity"));
    assert_eq!(session.registry.find_resident("Alice").unwrap().quantity("a"), 100.0);
    assert!(session.stdout.contains("Total cost of all services: $100.00"));
    Ok(())
}

#[test]
fn test_duplicate_names_rejected_by_default() -> Result<()> {
    let session = run(LedgerConfig::default(), "a Alice w a Alice n q\n")?;

    assert_eq!(session.registry.len(), 1);
    assert!(session.stderr.contains("already exists"));
    Ok(())
}

#[test]
fn test_duplicate_names_allowed_keep_first_match() -> Result<()> {
    let config = LedgerConfig::from_toml_str("[registry]\nunique_names = false\n")?;
    let session = run(config, "a Alice w a Alice n s Alice a 10 q\n")?;

    assert_eq!(session.registry.len(), 2);
    let first = session.registry.find_resident("Alice").unwrap();
    assert_eq!(first.pricing_policy(), PricingPolicy::Discounted);
    assert_eq!(first.quantity("a"), 10.0);
    Ok(())
}

#[test]
fn test_json_report_and_listing() -> Result<()> {
    let mut registry = Registry::new();
    let mut alice = Resident::new("Alice", PricingPolicy::Discounted)?;
    alice.add_service("a", 50.0)?;
    registry.add_resident(alice)?;

    let config = LedgerConfig::from_toml_str(
        r#"
[shell]
currency = "€"
report_format = "json"
"#,
    )?;
    let session = run_with(config, registry, "l c q\n")?;

    assert!(session.stdout.contains("Alice (discounted): €40.00"));
    assert!(session.stdout.contains("\"total_cost\": 40.0"));
    Ok(())
}

#[test]
fn test_custom_catalog_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"[services]\ncatalog = [\"Water\", \"Heating\"]\n")?;
    let config = LedgerConfig::from_file(file.path())?;

    let session = run(config, "a Bob n s Bob Heating 20 l q\n")?;

    assert!(session.stdout.contains("2. Service Heating"));
    assert!(session.stdout.contains("Enter service type (Water, Heating): "));
    assert_eq!(session.registry.find_resident("Bob").unwrap().quantity("heating"), 20.0);
    assert!(session.stdout.contains("Bob (standard): $20.00"));
    Ok(())
}

#[test]
fn test_empty_listing() -> Result<()> {
    let session = run(LedgerConfig::default(), "l q\n")?;
    assert!(session.stdout.contains("No residents registered."));
    Ok(())
}
