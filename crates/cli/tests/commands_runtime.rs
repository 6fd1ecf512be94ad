use std::env;
use std::sync::{Mutex, OnceLock};

use catalog_cli::commands::{config, EXIT_CONFIG};

#[test]
fn config_attributes_values_to_env_and_defaults() {
    with_env(&[("PORT", "8123"), ("CATALOG_LOG_LEVEL", "debug")], || {
        let report = config::run();
        assert_eq!(report.exit_code, 0);
        let output = report.output;
        let lines = output.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "effective config (source precedence: env > file > default):");
        assert!(lines.contains(&"- server.bind_address = 0.0.0.0 (source: default)"));
        assert!(lines.contains(&"- server.port = 8123 (source: env (PORT))"));
        assert!(lines.contains(&"- catalog.seed_enabled = true (source: default)"));
        assert!(lines.contains(&"- logging.level = debug (source: env (CATALOG_LOG_LEVEL))"));
        assert!(lines.contains(&"- listen address = 0.0.0.0:8123"));
        assert_eq!(last_line(&output), "- client url = http://127.0.0.1:8123");
    });
}

#[test]
fn config_ignores_blank_env_values_when_attributing_sources() {
    with_env(&[("PORT", ""), ("CATALOG_SERVER_BIND_ADDRESS", "   ")], || {
        let report = config::run();
        assert_eq!(report.exit_code, 0);

        let lines = report.output.lines().collect::<Vec<_>>();
        assert!(lines.contains(&"- server.port = 9000 (source: default)"));
        assert!(lines.contains(&"- server.bind_address = 0.0.0.0 (source: default)"));
    });
}

#[test]
fn config_reports_validation_failure() {
    with_env(&[("CATALOG_LOGGING_LEVEL", "verbose")], || {
        let report = config::run();
        assert_eq!(report.exit_code, EXIT_CONFIG);
        assert!(
            report.output.starts_with("config validation failed:"),
            "unexpected config output: {}",
            report.output
        );
    });
}

fn last_line(output: &str) -> &str {
    output.lines().last().unwrap_or_default()
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "CATALOG_SERVER_BIND_ADDRESS",
        "CATALOG_SERVER_PORT",
        "CATALOG_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "CATALOG_SEED_ENABLED",
        "CATALOG_LOGGING_LEVEL",
        "CATALOG_LOGGING_FORMAT",
        "CATALOG_LOG_LEVEL",
        "CATALOG_LOG_FORMAT",
        "PORT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
