use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use cutoff_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("cutoff_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse test config.")
}

fn sample_toml_without_query() -> String {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");

	root.remove("query");

	toml::to_string(&value).expect("Failed to render template config.")
}

#[test]
fn sample_config_loads() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML.to_string());
	let result = cutoff_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected sample config to load.");

	assert_eq!(cfg.service.http_bind, "127.0.0.1:5000");
	assert!(!cfg.service.is_development());
	assert!(cfg.storage.postgres.ensure_schema);
	assert_eq!(cfg.query.default_limit, 25);
}

#[test]
fn query_section_defaults_when_omitted() {
	let path = write_temp_config(sample_toml_without_query());
	let result = cutoff_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected config without [query] to load.");

	assert_eq!(cfg.query.default_limit, 25);
	assert_eq!(cfg.query.max_limit, 500);
	assert_eq!(cfg.query.facet_sample_size, 1_000);
	assert_eq!(cfg.query.top_courses, 5);
}

#[test]
fn environment_is_normalized_before_validation() {
	let payload = SAMPLE_CONFIG_TOML.replace("\"production\"", "\" Development \"");
	let path = write_temp_config(payload);
	let result = cutoff_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected mixed-case environment to load.");

	assert!(cfg.service.is_development());
}

#[test]
fn unknown_environment_is_rejected() {
	let mut cfg = base_config();

	cfg.service.environment = "staging".to_string();

	let err = cutoff_config::validate(&cfg).expect_err("Expected environment validation error.");

	assert!(
		err.to_string().contains("service.environment must be one of production or development."),
		"Unexpected error: {err}"
	);
}

#[test]
fn dsn_must_be_non_empty() {
	let mut cfg = base_config();

	cfg.storage.postgres.dsn = "  ".to_string();

	let err = cutoff_config::validate(&cfg).expect_err("Expected dsn validation error.");

	assert!(matches!(err, Error::Validation { .. }));
	assert!(
		err.to_string().contains("storage.postgres.dsn must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn limits_must_be_positive_and_ordered() {
	let mut cfg = base_config();

	cfg.query.facet_sample_size = 0;

	let err = cutoff_config::validate(&cfg).expect_err("Expected sample size validation error.");

	assert!(
		err.to_string().contains("query.facet_sample_size must be greater than zero."),
		"Unexpected error: {err}"
	);

	cfg = base_config();
	cfg.query.default_limit = 600;

	let err = cutoff_config::validate(&cfg).expect_err("Expected limit ordering error.");

	assert!(
		err.to_string().contains("query.default_limit must not exceed query.max_limit."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("cutoff_config_test_missing_file.toml");

	let err = cutoff_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}
