use futures::future;
use tracing::info;

use crate::error::Error;
use crate::github::IssueTracker;
use crate::model::RenderedDescription;
use crate::render::Renderer;

/// Builds the two dialects for one repository.
///
/// A milestone resolved to nothing and a milestone with no closed issues are
/// both soft cases: the repository contributes an empty pair. A repository
/// with no milestone listing at all fails hard and aborts the caller.
pub async fn describe_repository<T>(
    tracker: &T,
    renderer: &Renderer,
    version: &str,
    owner: &str,
    repo: &str,
) -> Result<RenderedDescription, Error>
where
    T: IssueTracker + ?Sized,
{
    let milestone = match tracker.resolve_milestone(owner, repo, version).await? {
        Some(milestone) => milestone,
        None => {
            info!("{} has no milestone titled '{}'", repo, version);
            return Ok(RenderedDescription::default());
        }
    };
    info!("Start create release for milestone {}", milestone.title);

    let issues = tracker.closed_issues(owner, repo, milestone.number).await?;
    if issues.is_empty() {
        info!("{} has no issues for milestone {}", repo, milestone.title);
        return Ok(RenderedDescription::default());
    }

    renderer.render(&issues)
}

/// Dispatches every repository at once and joins before combining; the
/// combined result follows input list order, not completion order. The first
/// hard failure aborts the whole batch.
pub async fn describe_repositories<T>(
    tracker: &T,
    renderer: &Renderer,
    version: &str,
    owner: &str,
    repositories: &[String],
) -> Result<RenderedDescription, Error>
where
    T: IssueTracker + ?Sized,
{
    let descriptions = future::try_join_all(
        repositories
            .iter()
            .map(|repo| describe_repository(tracker, renderer, version, owner, repo)),
    )
    .await?;
    Ok(combine(repositories, &descriptions))
}

/// Folds per-repository pairs into one, each block introduced by a leading
/// separator and a repository-name header.
pub fn combine(
    repositories: &[String],
    descriptions: &[RenderedDescription],
) -> RenderedDescription {
    repositories.iter().zip(descriptions).fold(
        RenderedDescription::default(),
        |acc, (repo, description)| RenderedDescription {
            chat: format!("{}\n*{}*\n{}", acc.chat, repo, description.chat),
            document: format!("{}\n# {}\n{}", acc.document, repo, description.document),
        },
    )
}
