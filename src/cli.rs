use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "branch-protection-audit",
    version,
    about = "Report default-branch protection and admin collaborators for every repository of a GitHub organization"
)]
pub struct Cli {
    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub organization name
    #[arg(long = "orgName", env = "ORG_NAME")]
    pub org_name: Option<String>,

    /// GitHub API root (for GitHub Enterprise Server)
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Directory the CSV report is written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Custom config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
