use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use milestone_release_notes::{generate_release_note, Config};

/// Generate milestone release notes from closed GitHub issues.
///
/// The milestone title must equal the release version. Reads GITHUB_TOKEN,
/// GITHUB_REPOSITORY, ACTIONS_RUNTIME_URL and ACTIONS_RUNTIME_TOKEN from the
/// environment (a .env file is honored).
#[derive(Debug, FromArgs)]
struct Args {
    /// release version, equal to the milestone title (e.g. 1.2.0)
    #[argh(positional)]
    version: String,

    /// additional repository to aggregate after the triggering one; may be
    /// given multiple times
    #[argh(option)]
    repo: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Args = argh::from_env();
    let mut config = Config::from_env()?;
    config.repositories.extend(args.repo);

    generate_release_note(&args.version, &config).await?;
    Ok(())
}
