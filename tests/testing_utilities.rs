//! Tests demonstrating the assertion macros on a small configuration loader.

use attempt::prelude::*;
use attempt::{assert_failed, assert_failed_with, assert_succeeded, Panicked};
use std::collections::HashMap;
use std::fmt;
use std::num::ParseIntError;

#[derive(Debug, Clone, PartialEq)]
struct ServerConfig {
    host: String,
    port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MissingKey(&'static str);

impl fmt::Display for MissingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing key: {}", self.0)
    }
}

impl std::error::Error for MissingKey {}

fn lookup(source: &HashMap<&'static str, &'static str>, key: &'static str) -> Attempt<String> {
    Attempt::from_fn(|| {
        source
            .get(key)
            .map(|value| value.to_string())
            .ok_or(MissingKey(key))
    })
}

fn load(source: &HashMap<&'static str, &'static str>) -> Attempt<ServerConfig> {
    let host = lookup(source, "host");
    let port = lookup(source, "port").try_map(|raw| raw.parse::<u16>());
    host.combine_map(port, |host, port| ServerConfig { host, port })
}

fn source(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    pairs.iter().copied().collect()
}

#[test]
fn test_complete_source_loads() {
    let config = load(&source(&[("host", "localhost"), ("port", "8080")]));
    assert_succeeded!(
        config,
        ServerConfig {
            host: "localhost".to_string(),
            port: 8080,
        }
    );
}

#[test]
fn test_missing_host_fails() {
    let config = load(&source(&[("port", "8080")]));
    assert_failed!(config.clone());
    assert_failed_with!(config, MissingKey);
}

#[test]
fn test_bad_port_fails_with_parse_error() {
    let config = load(&source(&[("host", "localhost"), ("port", "eighty")]));
    assert_failed_with!(config, ParseIntError);
}

#[test]
fn test_recover_missing_port_with_default() {
    let port = lookup(&source(&[]), "port")
        .recover_on(|_: &MissingKey| "80".to_string())
        .try_map(|raw| raw.parse::<u16>());
    assert_succeeded!(port, 80);
}

#[test]
fn test_panicking_validator_is_captured() {
    let validated = load(&source(&[("host", ""), ("port", "8080")])).map(|config| {
        assert!(!config.host.is_empty(), "host must not be empty");
        config
    });
    assert_failed_with!(validated, Panicked);
}

#[test]
fn test_matching_reports_each_problem() {
    let describe = |config: Attempt<ServerConfig>| {
        config
            .matching(|m| {
                m.on_success(|config| format!("{}:{}", config.host, config.port))
                    .on_failure_of(|missing: &MissingKey| format!("set {}", missing.0))
                    .on_failure_of(|_: &ParseIntError| "port must be a number".to_string());
            })
            .map_err(|unmatched| unmatched.to_string())
    };

    assert_succeeded!(
        describe(load(&source(&[("host", "db"), ("port", "5432")]))).unwrap(),
        "db:5432".to_string()
    );
    assert_succeeded!(
        describe(load(&source(&[("port", "5432")]))).unwrap(),
        "set host".to_string()
    );
    assert_succeeded!(
        describe(load(&source(&[("host", "db"), ("port", "x")]))).unwrap(),
        "port must be a number".to_string()
    );
}

#[test]
#[should_panic(expected = "Expected Succeeded, got Failed")]
fn test_assert_succeeded_reports_cause() {
    assert_succeeded!(load(&source(&[])));
}

#[test]
#[should_panic(expected = "Expected Failed with MissingKey, got Failed with")]
fn test_assert_failed_with_reports_other_type() {
    assert_failed_with!(
        load(&source(&[("host", "db"), ("port", "x")])),
        MissingKey
    );
}
