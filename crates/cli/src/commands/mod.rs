pub mod config;
pub mod products;
pub mod status;

use catalog_core::config::AppConfig;
use serde::Serialize;

use crate::client::ClientError;

/// Not ready, or the requested product does not exist.
pub const EXIT_FAILED: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_RUNTIME: u8 = 3;
pub const EXIT_UNREACHABLE: u8 = 4;

/// Text for stdout plus the process exit code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub exit_code: u8,
    pub output: String,
}

impl Report {
    pub fn ok(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failed(exit_code: u8, output: impl Into<String>) -> Self {
        Self { exit_code, output: output.into() }
    }
}

pub fn request_failed(error: ClientError) -> Report {
    Report::failed(EXIT_UNREACHABLE, format!("catalog-server request failed: {error}"))
}

fn json_report<T: Serialize>(value: &T, exit_code: u8) -> Report {
    match serde_json::to_string_pretty(value) {
        Ok(output) => Report { exit_code, output },
        Err(error) => Report::failed(EXIT_RUNTIME, format!("failed to encode output: {error}")),
    }
}

/// Address a local client should dial for the configured listener. Wildcard
/// binds are reached over loopback.
pub fn local_base_url(config: &AppConfig) -> String {
    let host = match config.server.bind_address.trim() {
        "0.0.0.0" | "" => "127.0.0.1".to_string(),
        "::" | "[::]" => "[::1]".to_string(),
        host if host.contains(':') && !host.starts_with('[') => format!("[{host}]"),
        host => host.to_string(),
    };
    format!("http://{host}:{}", config.server.port)
}
