//! Tests for the Faultline configuration system.

use std::sync::Mutex;

use faultline_core::config::{EngineChoice, FaultlineConfig, LayoutConfig};
use faultline_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all FAULTLINE_ env vars to prevent cross-test contamination.
fn clear_faultline_env_vars() {
    for key in [
        "FAULTLINE_REACHABILITY_ENGINE",
        "FAULTLINE_MATRIX_ENGINE_LIMIT",
        "FAULTLINE_COLUMN_SPACING",
        "FAULTLINE_ROW_HEIGHT",
    ] {
        std::env::remove_var(key);
    }
}

/// T0-CFG-01: env > project file > defaults
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_faultline_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("faultline.toml"),
        r#"
[analysis]
reachability_engine = "matrix"
matrix_engine_limit = 16

[layout]
column_spacing = 5.0
"#,
    )
    .unwrap();

    std::env::set_var("FAULTLINE_REACHABILITY_ENGINE", "bfs");

    let config = FaultlineConfig::load(dir.path()).unwrap();

    // Env wins over the file
    assert_eq!(config.analysis.effective_engine(), EngineChoice::Bfs);
    // File wins over defaults
    assert_eq!(config.analysis.effective_matrix_engine_limit(), 16);
    assert_eq!(config.layout.effective_column_spacing(), 5.0);
    // Untouched values keep their defaults
    assert_eq!(config.layout.effective_row_height(), 2.0);

    clear_faultline_env_vars();
}

/// T0-CFG-02: a missing project file falls back to defaults
#[test]
fn test_load_missing_file_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_faultline_env_vars();

    let dir = tempdir();
    let config = FaultlineConfig::load(dir.path()).unwrap();

    assert_eq!(config.analysis.effective_engine(), EngineChoice::Auto);
    assert_eq!(config.analysis.effective_matrix_engine_limit(), 128);
    assert_eq!(config.layout.effective_column_spacing(), 3.0);
    assert_eq!(config.layout.effective_annotation_offset(), 0.8);
    assert_eq!(config.layout.effective_system_label(), "System");
    assert_eq!(config.layout.effective_annotation_prefix(), "VLK");
}

/// T0-CFG-03: invalid TOML reports ParseError with the file path
#[test]
fn test_invalid_toml_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_faultline_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("faultline.toml"), "[layout\nrow_height = ").unwrap();

    let err = FaultlineConfig::load(dir.path()).unwrap_err();
    match err {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("faultline.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

/// T0-CFG-04: validation rejects non-positive spacing and zero caps
#[test]
fn test_validation_failures() {
    let cases = [
        ("[layout]\ncolumn_spacing = 0.0", "layout.column_spacing"),
        ("[layout]\nrow_height = -1.0", "layout.row_height"),
        ("[layout]\nannotation_offset = -0.5", "layout.annotation_offset"),
        ("[layout]\nsystem_label = \"  \"", "layout.system_label"),
        ("[layout]\nannotation_prefix = \"\"", "layout.annotation_prefix"),
        ("[layout]\nmax_fixup_passes = 0", "layout.max_fixup_passes"),
        ("[analysis]\nmatrix_engine_limit = 0", "analysis.matrix_engine_limit"),
    ];
    for (toml, expected_field) in cases {
        match FaultlineConfig::from_toml(toml) {
            Err(ConfigError::ValidationFailed { field, .. }) => {
                assert_eq!(field, expected_field, "input: {toml}")
            }
            other => panic!("expected ValidationFailed for {toml}, got {other:?}"),
        }
    }
}

/// T0-CFG-05: unparsable env values are ignored
#[test]
fn test_bad_env_values_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_faultline_env_vars();

    std::env::set_var("FAULTLINE_REACHABILITY_ENGINE", "quantum");
    std::env::set_var("FAULTLINE_ROW_HEIGHT", "tall");
    std::env::set_var("FAULTLINE_MATRIX_ENGINE_LIMIT", "8");

    let dir = tempdir();
    let config = FaultlineConfig::load(dir.path()).unwrap();
    assert_eq!(config.analysis.effective_engine(), EngineChoice::Auto);
    assert_eq!(config.layout.effective_row_height(), 2.0);
    assert_eq!(config.analysis.effective_matrix_engine_limit(), 8);

    clear_faultline_env_vars();
}

/// T0-CFG-06: to_toml output parses back to the same values
#[test]
fn test_to_toml_reloads() {
    let config = FaultlineConfig::from_toml(
        "[analysis]\nreachability_engine = \"bfs\"\n[layout]\nsystem_label = \"Plant\"\nrow_height = 1.5",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let reloaded = FaultlineConfig::from_toml(&text).unwrap();
    assert_eq!(reloaded.analysis.effective_engine(), EngineChoice::Bfs);
    assert_eq!(reloaded.layout.effective_system_label(), "Plant");
    assert_eq!(reloaded.layout.effective_row_height(), 1.5);
}

/// T0-CFG-07: the fixup pass cap never exceeds node_count + 1
#[test]
fn test_fixup_pass_cap() {
    let default = LayoutConfig::default();
    assert_eq!(default.effective_fixup_passes(4), 5);

    let low = LayoutConfig {
        max_fixup_passes: Some(2),
        ..Default::default()
    };
    assert_eq!(low.effective_fixup_passes(10), 2);

    let high = LayoutConfig {
        max_fixup_passes: Some(1000),
        ..Default::default()
    };
    assert_eq!(high.effective_fixup_passes(3), 4);
}

/// T0-CFG-08: engine names parse case-insensitively
#[test]
fn test_engine_choice_parse() {
    assert_eq!(EngineChoice::parse(" Matrix "), Some(EngineChoice::Matrix));
    assert_eq!(EngineChoice::parse("BFS"), Some(EngineChoice::Bfs));
    assert_eq!(EngineChoice::parse("auto"), Some(EngineChoice::Auto));
    assert_eq!(EngineChoice::parse("dfs"), None);
}
