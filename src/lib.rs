//! Generate a milestone release-note document from closed GitHub issues.
//!
//! The pipeline resolves the milestone whose title equals the requested
//! version in each configured repository, fetches its closed issues, renders
//! them grouped by label in two dialects, persists the document dialect as a
//! build artifact, and forwards the chat dialect to a notification webhook.

use tracing::debug;

pub mod aggregate;
pub mod config;
pub mod error;
pub mod github;
pub mod model;
pub mod publish;
pub mod render;
pub mod template;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::model::RenderedDescription;

use crate::github::Github;
use crate::publish::{HttpArtifactStore, Publisher, WebhookNotifier};
use crate::render::Renderer;

/// Runs the whole pipeline once for `version`. Input validation happens
/// before any network call.
pub async fn generate_release_note(version: &str, config: &Config) -> Result<(), Error> {
    if version.trim().is_empty() {
        return Err(Error::InvalidVersion);
    }
    config.validate()?;

    let github = Github::new(&config.token)?;
    let renderer = Renderer::new(&config.owner)?;
    let description = aggregate::describe_repositories(
        &github,
        &renderer,
        version,
        &config.owner,
        &config.repositories,
    )
    .await?;
    debug!("description {}", serde_json::to_string_pretty(&description)?);

    let artifacts = HttpArtifactStore::new(&config.artifact_url, &config.artifact_token)?;
    let notifier = WebhookNotifier::new(&config.webhook_url);
    Publisher::new(artifacts, notifier, ".")
        .publish(version, &description)
        .await
}
