pub mod client;
pub mod commands;

use std::process::ExitCode;

use catalog_core::config::{AppConfig, LoadOptions};
use catalog_core::ProductId;
use clap::{Parser, Subcommand};

use crate::client::CatalogClient;
use crate::commands::{Report, EXIT_CONFIG, EXIT_RUNTIME};

#[derive(Debug, Parser)]
#[command(
    name = "catalog",
    about = "Query a running catalog-server and inspect its configuration",
    after_help = "Examples:\n  catalog status\n  catalog list --json\n  catalog show 3\n  \
                  catalog --url http://10.0.0.7:9000 status"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "URL",
        help = "catalog-server base URL (defaults to the configured listen address)"
    )]
    url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Show effective configuration values and where each one came from")]
    Config,
    #[command(flatten)]
    Remote(RemoteCommand),
}

#[derive(Debug, Subcommand)]
enum RemoteCommand {
    #[command(about = "Report readiness and catalog counters from /health")]
    Status {
        #[arg(long, help = "Print the raw health report as JSON")]
        json: bool,
    },
    #[command(about = "List every product in insertion order")]
    List {
        #[arg(long, help = "Print the products as JSON")]
        json: bool,
    },
    #[command(about = "Print one product as JSON")]
    Show { id: i64 },
}

pub fn run() -> ExitCode {
    let report = execute(Cli::parse());
    println!("{}", report.output);
    ExitCode::from(report.exit_code)
}

fn execute(cli: Cli) -> Report {
    match cli.command {
        Command::Config => commands::config::run(),
        Command::Remote(command) => run_remote(cli.url, command),
    }
}

fn run_remote(url: Option<String>, command: RemoteCommand) -> Report {
    let base_url = match url {
        Some(url) => url,
        None => match AppConfig::load(LoadOptions::default()) {
            Ok(config) => commands::local_base_url(&config),
            Err(error) => {
                return Report::failed(EXIT_CONFIG, format!("configuration issue: {error}"))
            }
        },
    };

    let client = match CatalogClient::new(base_url) {
        Ok(client) => client,
        Err(error) => return Report::failed(EXIT_RUNTIME, error.to_string()),
    };
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return Report::failed(
                EXIT_RUNTIME,
                format!("failed to initialize async runtime: {error}"),
            )
        }
    };

    runtime.block_on(async {
        match command {
            RemoteCommand::Status { json } => commands::status::run(&client, json).await,
            RemoteCommand::List { json } => commands::products::list(&client, json).await,
            RemoteCommand::Show { id } => commands::products::show(&client, ProductId(id)).await,
        }
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command, RemoteCommand};

    #[test]
    fn global_url_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["catalog", "list", "--json", "--url", "http://h:1"])
            .expect("valid arguments");

        assert_eq!(cli.url.as_deref(), Some("http://h:1"));
        assert!(matches!(cli.command, Command::Remote(RemoteCommand::List { json: true })));
    }

    #[test]
    fn show_requires_an_integer_id() {
        assert!(Cli::try_parse_from(["catalog", "show", "abc"]).is_err());

        let cli = Cli::try_parse_from(["catalog", "show", "4"]).expect("valid arguments");
        assert!(matches!(cli.command, Command::Remote(RemoteCommand::Show { id: 4 })));
    }
}
