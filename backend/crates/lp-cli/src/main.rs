//! lp - loopserve CLI
//!
//! Talks to a running lp-server; never touches the app store directly.
//!
//! # Examples
//!
//! ```bash
//! lp add web 3000 "python3 -m http.server 3000"
//! lp start web
//! lp list --pretty
//! lp logs web
//! lp stop            # every running app
//! ```

use lp_cli::{Cli, Client, Commands};

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Discover server URL: explicit flag > port file > error
    let server_url = match cli.server {
        Some(url) => url,
        None => match discover_server_url() {
            Some(url) => url,
            None => return ExitCode::FAILURE,
        },
    };

    let client = Client::new(&server_url);

    let result = match cli.command {
        // Printed raw, not as JSON
        Commands::Logs { name } => return print_log(client.app_logs(&name).await),
        Commands::List => client.list_apps().await,
        Commands::Add {
            name,
            port,
            command,
        } => client.add_app(&name, port, &command).await,
        Commands::Delete { name } => client.delete_app(&name).await,
        Commands::Start { name: Some(name) } => client.start_app(&name).await,
        Commands::Start { name: None } => client.start_all().await,
        Commands::Stop { name: Some(name) } => client.stop_app(&name).await,
        Commands::Stop { name: None } => client.stop_all().await,
    };

    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    // A bulk run with failures still reports, but exits non-zero
                    if value.get("status").and_then(|s| s.as_str()) == Some("partial") {
                        ExitCode::FAILURE
                    } else {
                        ExitCode::SUCCESS
                    }
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_log(result: lp_cli::CliClientResult<String>) -> ExitCode {
    match result {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Server URL from the port discovery file, verified against a live PID.
///
/// Prints guidance and returns None when no server is found.
fn discover_server_url() -> Option<String> {
    let port_path = lp_config::PortFileInfo::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| ".loopserve/server.json".to_string());

    match lp_config::PortFileInfo::read_live() {
        Ok(Some(info)) => Some(info.url()),
        Ok(None) => {
            eprintln!("Error: No running lp-server found.");
            eprintln!();
            eprintln!("Checked: {}", port_path);
            eprintln!();
            eprintln!("Start the server first:");
            eprintln!("  lp-server");
            eprintln!();
            eprintln!("Or specify a server URL explicitly:");
            eprintln!("  lp --server http://127.0.0.1:9090 <command>");
            None
        }
        Err(e) => {
            eprintln!("Error reading port file ({}): {}", port_path, e);
            eprintln!();
            eprintln!("Specify a server URL explicitly:");
            eprintln!("  lp --server http://127.0.0.1:9090 <command>");
            None
        }
    }
}
