mod cli;

use branch_protection_audit::{
    audit,
    config::{Config, Credentials},
    env_file::{self, EnvFile},
    error::Error,
    github::{GitHubClient, ReqwestTransport},
    report::ReportWriter,
};
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() {
    load_env_file();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    });
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    if let Some(output_dir) = cli.output_dir {
        config.report.output_dir = output_dir;
    }

    let credentials = Credentials::resolve_with(cli.token, cli.org_name, |key| {
        std::env::var(key).ok()
    })
    .unwrap_or_else(|_| {
        println!("{} Missing required parameters.", "Error:".red().bold());
        println!("Usage: branch-protection-audit --token <githubToken> --orgName <orgName>");
        println!("Or set the GITHUB_TOKEN and ORG_NAME environment variables.");
        std::process::exit(1);
    });

    let transport = ReqwestTransport::new(&config.api).unwrap_or_else(|e| fatal(&e));
    let client = GitHubClient::new(transport, config.api_base(), &credentials)
        .with_retry_policy(config.rate_limit.policy());

    match client.validate_token() {
        Ok(()) => {}
        Err(Error::Http { .. }) => {
            println!("{} Invalid GitHub token.", "Error:".red().bold());
            std::process::exit(1);
        }
        Err(e) => fatal(&e),
    }

    match client.validate_org(&credentials.org) {
        Ok(()) => {}
        Err(Error::Http { .. }) => {
            println!(
                "{} The organization {} does not exist.",
                "Error:".red().bold(),
                credentials.org
            );
            std::process::exit(1);
        }
        Err(e) => fatal(&e),
    }

    let mut report_path = None;
    let result = audit::run_audit(
        &client,
        &credentials.org,
        || {
            let (writer, path) = ReportWriter::create(&config.report.output_dir, &credentials.org)?;
            report_path = Some(path);
            Ok(writer)
        },
        &mut std::io::stdout().lock(),
    );

    match result {
        Ok(summary) => {
            if let Some(path) = report_path {
                println!("Report written to {}", path.display());
            }
            tracing::info!(
                repositories = summary.repositories,
                protected = summary.protected,
                unprotected = summary.unprotected,
                "audit complete"
            );
        }
        Err(e) => {
            if let Some(path) = report_path {
                eprintln!("Partial report left at {}", path.display());
            }
            fatal(&e);
        }
    }
}

/// Loads the nearest `.env` file, if any. Lines that fail to parse are
/// reported and skipped; the rest still load.
fn load_env_file() {
    let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| env_file::find(&cwd))
    else {
        return;
    };

    match EnvFile::read(&path) {
        Ok(file) => {
            for skipped in &file.skipped {
                eprintln!(
                    "{} {}:{}: skipped line ({})",
                    "Warning:".yellow().bold(),
                    path.display(),
                    skipped.line,
                    skipped.reason
                );
            }
            file.apply();
        }
        Err(e) => eprintln!(
            "{} failed to load {}: {e}",
            "Warning:".yellow().bold(),
            path.display()
        ),
    }
}

/// Reports an error the run cannot recover from and exits with status 2.
fn fatal(error: &Error) -> ! {
    eprintln!("{} {error}", "Error:".red().bold());
    std::process::exit(2);
}

/// Logs go to stderr so stdout carries only the progress lines.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
