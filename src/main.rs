use std::path::PathBuf;

use contact_import::client::{OAuth2CodeExchange, UreqFetcher};
use contact_import::config::{ImportConfig, OAuthClientConfig};
use contact_import::error::ImportResult;
use contact_import::import::{ImportOrchestrator, ImportOutcome};
use contact_import::model::AccessToken;
use contact_import::model::token::DEFAULT_TOKEN_TYPE;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

enum Credentials {
    Token(AccessToken),
    Grant(String),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contact_import=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let mut token: Option<String> = None;
    let mut token_type: Option<String> = None;
    let mut code: Option<String> = None;
    let mut max_results: Option<u32> = None;
    let mut out_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--token" | "-t" => token = Some(required_value(&mut args, "--token")),
            "--token-type" => token_type = Some(required_value(&mut args, "--token-type")),
            "--code" => code = Some(required_value(&mut args, "--code")),
            "--max-results" | "-n" => {
                let raw = required_value(&mut args, "--max-results");
                match raw.parse() {
                    Ok(n) => max_results = Some(n),
                    Err(_) => {
                        eprintln!("Error: --max-results expects a number, got '{}'", raw);
                        std::process::exit(1);
                    }
                }
            }
            "--out" | "-o" => out_path = Some(PathBuf::from(required_value(&mut args, "--out"))),
            "--help" | "-h" => {
                println!("contact-import - import a contacts directory as normalized JSON");
                println!();
                println!("Usage: contact-import (--token <TOKEN> | --code <GRANT>) [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -t, --token <TOKEN>        Access token to import with");
                println!("      --token-type <TYPE>    Token type (default: Bearer)");
                println!("      --code <GRANT>         Authorization code to exchange first");
                println!("                             (needs CONTACTS_CLIENT_ID, CONTACTS_CLIENT_SECRET,");
                println!("                             CONTACTS_REDIRECT_URI)");
                println!("  -n, --max-results <N>      Contacts to request (default: 100)");
                println!("  -o, --out <PATH>           Write JSON to a file instead of stdout");
                println!("  -h, --help                 Show this help");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    let credentials = match (token, code) {
        (Some(token), None) => Credentials::Token(AccessToken::new(
            token,
            token_type.unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
        )),
        (None, Some(code)) => Credentials::Grant(code),
        _ => {
            eprintln!("Error: pass exactly one of --token or --code");
            std::process::exit(1);
        }
    };

    let mut config = ImportConfig::from_env();
    if let Some(n) = max_results {
        config = config.with_max_results(n);
    }

    match run(config, credentials) {
        Ok(outcome) => {
            if let Err(e) = write_outcome(&outcome, out_path) {
                eprintln!("Could not write output: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Import failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn required_value(args: &mut impl Iterator<Item = String>, flag: &str) -> String {
    match args.next() {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", flag);
            std::process::exit(1);
        }
    }
}

fn run(config: ImportConfig, credentials: Credentials) -> ImportResult<ImportOutcome> {
    let fetcher = UreqFetcher::new(config.timeout);
    let orchestrator = ImportOrchestrator::new(fetcher, config);
    match credentials {
        Credentials::Token(token) => orchestrator.import(&token),
        Credentials::Grant(code) => {
            let agent = ureq::AgentBuilder::new()
                .timeout(orchestrator.config().timeout)
                .build();
            let exchange = OAuth2CodeExchange::new(OAuthClientConfig::from_env()?, agent);
            orchestrator.import_with_grant(&exchange, &code)
        }
    }
}

fn write_outcome(outcome: &ImportOutcome, out_path: Option<PathBuf>) -> ImportResult<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    match out_path {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!(
                "Wrote {} contacts to {}",
                outcome.contacts.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
