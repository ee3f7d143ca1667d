//! Terminal client for the activities API.
//!
//! Examples:
//!   activities-cli list
//!   activities-cli signup "Chess Club" emma@mergington.edu
//!   activities-cli unregister "Chess Club" emma@mergington.edu
//!   activities-cli paths
//!
//! The API base URL comes from `--url`, then `$ACTIVITIES_API_URL`, then the
//! config file, then http://127.0.0.1:8000.

use std::process;

use activities::config::BASE_URL_ENV;
use activities::{ActivityClient, ClientConfig};
use tracing::{error, info, warn, Level};

mod http;
mod paths;
mod terminal;

use http::ReqwestTransport;
use paths::AppPaths;
use terminal::TerminalView;

struct CliArgs {
    url: Option<String>,
    verbose: bool,
    command: Vec<String>,
}

fn usage() -> ! {
    eprintln!("activities-cli (talks to the activities API @ 127.0.0.1:8000 by default)");
    eprintln!("Usage: activities-cli [--url URL] [--verbose] <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  list                          Show every activity and its participants");
    eprintln!("  signup <activity> <email>     Sign a student up, then show the list");
    eprintln!("  unregister <activity> <email> Remove a participant, then show the list");
    eprintln!("  paths                         Show the config file location");
    process::exit(1);
}

fn parse_args() -> CliArgs {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut url = None;
    let mut verbose = false;

    while let Some(first) = args.first() {
        match first.as_str() {
            "--url" => {
                if args.len() < 2 {
                    usage();
                }
                url = Some(args[1].clone());
                args.drain(0..2);
            }
            "--verbose" | "-v" => {
                verbose = true;
                args.remove(0);
            }
            _ => break,
        }
    }

    if args.is_empty() {
        usage();
    }

    CliArgs {
        url,
        verbose,
        command: args,
    }
}

fn operand(command: &[String], i: usize) -> &str {
    match command.get(i) {
        Some(v) => v.as_str(),
        None => usage(),
    }
}

fn load_file_config(paths: Option<&AppPaths>) -> ClientConfig {
    let Some(paths) = paths else {
        return ClientConfig::default();
    };
    match paths.load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "ignoring config file");
            ClientConfig::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = parse_args();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let paths = match AppPaths::new() {
        Ok(p) => Some(p),
        Err(e) => {
            warn!(error = %e, "no config directory");
            None
        }
    };

    let cmd = args.command[0].as_str();
    if cmd == "paths" {
        match &paths {
            Some(p) => {
                println!("config dir:  {}", p.config_dir().display());
                println!("config file: {}", p.config_file().display());
            }
            None => println!("no config directory on this platform"),
        }
        return;
    }

    let config = load_file_config(paths.as_ref())
        .with_overrides(std::env::var(BASE_URL_ENV).ok(), args.url);
    info!(base_url = %config.base_url, "using API");

    let transport = match ReqwestTransport::new(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("failed to build HTTP client: {e}");
            process::exit(1);
        }
    };
    let client = ActivityClient::new(transport, TerminalView);

    let result = match cmd {
        "list" => client.load_catalog().await,
        "signup" => {
            client
                .submit_signup(operand(&args.command, 1), operand(&args.command, 2))
                .await
        }
        "unregister" => {
            client
                .submit_unregister(operand(&args.command, 1), operand(&args.command, 2))
                .await
        }
        _ => usage(),
    };

    if let Err(e) = result {
        error!(error = %e, status = ?e.status(), "{cmd} failed");
        process::exit(1);
    }
}
