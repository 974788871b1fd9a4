use crate::error::Error;

/// Fixed notification endpoint; overridable through `RELEASE_WEBHOOK_URL`.
pub const DEFAULT_WEBHOOK_URL: &str = "https://hooks.zapier.com/hooks/catch/11137744/b9i402e/";

/// Everything the pipeline needs from the environment, resolved up front so
/// the library never reads ambient process state.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub owner: String,
    /// Repositories to aggregate, in output order. Seeded with the
    /// triggering repository.
    pub repositories: Vec<String>,
    pub artifact_url: String,
    pub artifact_token: String,
    pub webhook_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let token = std::env::var("GITHUB_TOKEN").map_err(|_| Error::InvalidToken)?;
        let repository = require("GITHUB_REPOSITORY")?;
        let (owner, repo) = repository.split_once('/').ok_or_else(|| {
            Error::Config(format!(
                "invalid GITHUB_REPOSITORY '{}', expected owner/repo",
                repository
            ))
        })?;
        Ok(Self {
            token,
            owner: owner.to_string(),
            repositories: vec![repo.to_string()],
            artifact_url: require("ACTIONS_RUNTIME_URL")?,
            artifact_token: require("ACTIONS_RUNTIME_TOKEN")?,
            webhook_url: std::env::var("RELEASE_WEBHOOK_URL")
                .unwrap_or_else(|_| DEFAULT_WEBHOOK_URL.to_string()),
        })
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.token.trim().is_empty() {
            return Err(Error::InvalidToken);
        }
        if self.repositories.is_empty() {
            return Err(Error::Config("no repositories configured".to_string()));
        }
        Ok(())
    }
}

fn require(name: &str) -> Result<String, Error> {
    std::env::var(name).map_err(|_| Error::Config(format!("{} is not set", name)))
}
