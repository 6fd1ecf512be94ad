use std::env;
use std::fs;
use std::path::Path;

use catalog_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

use crate::commands::{local_base_url, Report, EXIT_CONFIG};

pub fn run() -> Report {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return Report::failed(EXIT_CONFIG, format!("config validation failed: {error}"))
        }
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "server.bind_address",
        &config.server.bind_address,
        source("server.bind_address", &["CATALOG_SERVER_BIND_ADDRESS"]),
    ));
    lines.push(render_line(
        "server.port",
        &config.server.port.to_string(),
        source("server.port", &["CATALOG_SERVER_PORT", "PORT"]),
    ));
    lines.push(render_line(
        "server.graceful_shutdown_secs",
        &config.server.graceful_shutdown_secs.to_string(),
        source("server.graceful_shutdown_secs", &["CATALOG_SERVER_GRACEFUL_SHUTDOWN_SECS"]),
    ));
    lines.push(render_line(
        "catalog.seed_enabled",
        &config.catalog.seed_enabled.to_string(),
        source("catalog.seed_enabled", &["CATALOG_SEED_ENABLED"]),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", &["CATALOG_LOGGING_LEVEL", "CATALOG_LOG_LEVEL"]),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", &["CATALOG_LOGGING_FORMAT", "CATALOG_LOG_FORMAT"]),
    ));
    lines.push(format!("- listen address = {}", config.listen_address()));
    lines.push(format!("- client url = {}", local_base_url(&config)));

    Report::ok(lines.join("\n"))
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    // Matches the loader: blank values count as unset.
    let is_set = |key: &&str| env::var(key).is_ok_and(|value| !value.trim().is_empty());
    if let Some(env_key) = env_keys.iter().copied().find(is_set) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use super::{contains_path, field_source, render_line};
    use std::path::Path;
    use toml::Value;

    #[test]
    fn nested_key_paths_are_found_in_config_document() {
        let doc: Value = "[server]\nport = 8080\n".parse().expect("toml parses");

        assert!(contains_path(&doc, "server.port"));
        assert!(!contains_path(&doc, "server.bind_address"));
        assert!(!contains_path(&doc, "logging.level"));
    }

    #[test]
    fn file_source_names_the_config_path() {
        let doc: Value = "[catalog]\nseed_enabled = false\n".parse().expect("toml parses");

        let source = field_source(
            "catalog.seed_enabled",
            &["CATALOG_TEST_UNSET_SOURCE_KEY"],
            Some(&doc),
            Some(Path::new("catalog.toml")),
        );

        assert_eq!(source, "file (catalog.toml)");
    }

    #[test]
    fn blank_env_values_are_not_credited_as_source() {
        std::env::set_var("CATALOG_TEST_BLANK_SOURCE_KEY", "  ");

        let source = field_source("server.port", &["CATALOG_TEST_BLANK_SOURCE_KEY"], None, None);

        std::env::remove_var("CATALOG_TEST_BLANK_SOURCE_KEY");
        assert_eq!(source, "default");
    }

    #[test]
    fn missing_key_falls_back_to_default_source() {
        let source = field_source("server.port", &["CATALOG_TEST_UNSET_SOURCE_KEY"], None, None);

        assert_eq!(source, "default");
        assert_eq!(
            render_line("server.port", "9000", source),
            "- server.port = 9000 (source: default)"
        );
    }
}
