//! End-to-end tests for the smile demo workflow.

use approx::assert_relative_eq;
use pricer_pricing::greeks::GreekKind;
use smile_cli::config::ConfigError;
use smile_cli::prelude::*;
use std::io::Write;
use std::path::Path;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_bundled_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("smile.toml");
    let config = SmileConfig::load(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.strikes.len(), 9);
    assert!(config.greeks.contains(&GreekKind::Vega));
}

#[test]
fn test_missing_file_is_io_error() {
    match SmileConfig::load(Path::new("does/not/exist.toml")) {
        Err(ConfigError::Io(_)) => {}
        _ => panic!("Expected IO error"),
    }
}

#[test]
fn test_forward_and_backward_smiles_agree() {
    let file = write_config(
        r#"
        strikes = [90.0, 100.0, 110.0]
        greeks = ["Price", "Delta", "ImpliedVol"]

        [market]
        spot = 100.0

        [market.surface]
        kind = "flat"
        sigma = 0.2

        [option]
        expiry = 1.0
        type = "put"

        [pde]
        space_steps = 300
        time_steps = 150
        "#,
    );
    let mut config = SmileConfig::load(file.path()).unwrap();
    config.validate().unwrap();

    let forward = run(&config).unwrap();
    config.method = Method::Backward;
    let backward = run(&config).unwrap();

    assert_eq!(forward.kinds, backward.kinds);
    for (f, b) in forward.rows.iter().zip(&backward.rows) {
        assert_eq!(f.strike, b.strike);
        for (fv, bv) in f.values.iter().zip(&b.values) {
            assert_relative_eq!(fv.value().unwrap(), bv.value().unwrap(), max_relative = 2e-2);
        }
        // Implied volatility of a flat surface
        assert_relative_eq!(f.values[2].value().unwrap(), 0.2, epsilon = 2e-3);
    }
}

#[test]
fn test_json_output() {
    let mut config = SmileConfig::default();
    config.strikes = vec![100.0];
    config.greeks = vec![GreekKind::Price];

    let json = run(&config).unwrap().render(OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["method"], "forward");
    assert_eq!(value["kinds"][0], "Price");
    assert!(value["rows"][0]["values"][0]["Available"].as_f64().unwrap() > 0.0);
}
