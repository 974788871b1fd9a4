use std::str::FromStr;

use async_trait::async_trait;
use headers::{ContentLength, ContentType, HeaderMapExt};
use hyper::client::HttpConnector;
use hyper::header::{HeaderValue, AUTHORIZATION, USER_AGENT};
use hyper::{Body, Client, Method, Request, Uri};
use hyper_tls::HttpsConnector;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::Error;
use crate::model::{Issue, Milestone};

pub(crate) type HttpsClient = Client<HttpsConnector<HttpConnector>>;

const PER_PAGE: usize = 100;

/// Paginated reads against the issue tracker, plus the two derived scans the
/// pipeline needs. The page methods are the seam; the scans are provided so
/// every implementation shares the same pagination policy.
#[async_trait]
pub trait IssueTracker: Sync {
    async fn milestones_page(
        &self,
        owner: &str,
        repo: &str,
        page: usize,
    ) -> Result<Vec<Milestone>, Error>;

    async fn issues_page(
        &self,
        owner: &str,
        repo: &str,
        milestone: u64,
        page: usize,
    ) -> Result<Vec<Issue>, Error>;

    /// Finds the milestone whose title equals `version`.
    ///
    /// A page with no title match ends the scan with `Ok(None)`, even when an
    /// earlier page matched. Only a repository with no milestone pages at all
    /// is a hard `MilestoneNotFound`.
    async fn resolve_milestone(
        &self,
        owner: &str,
        repo: &str,
        version: &str,
    ) -> Result<Option<Milestone>, Error> {
        let mut matched = None;
        let mut page = 1;
        loop {
            let batch = self.milestones_page(owner, repo, page).await?;
            if batch.is_empty() {
                break;
            }
            match batch.into_iter().find(|m| m.title == version) {
                Some(milestone) => matched = Some(milestone),
                None => return Ok(None),
            }
            page += 1;
        }
        match matched {
            Some(milestone) => Ok(Some(milestone)),
            None => {
                info!("{} has not '{}' milestone", repo, version);
                Err(Error::MilestoneNotFound)
            }
        }
    }

    /// Every closed issue assigned to the milestone, all pages concatenated
    /// in returned order. Zero issues is an empty sequence, never an error.
    async fn closed_issues(
        &self,
        owner: &str,
        repo: &str,
        milestone: u64,
    ) -> Result<Vec<Issue>, Error> {
        let mut issues = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.issues_page(owner, repo, milestone, page).await?;
            if batch.is_empty() {
                break;
            }
            let last = batch.len() < PER_PAGE;
            issues.extend(batch);
            if last {
                break;
            }
            page += 1;
        }
        Ok(issues)
    }
}

pub struct Github {
    client: HttpsClient,
    user_agent: HeaderValue,
    token: HeaderValue,
    endpoint: String,
}

impl Github {
    const API_ENDPOINT: &'static str = "https://api.github.com";

    pub fn new(token: &str) -> Result<Self, Error> {
        Ok(Self {
            client: Client::builder().build(HttpsConnector::new()),
            user_agent: HeaderValue::from_str(&format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))?,
            token: HeaderValue::from_str(&format!("token {}", token))?,
            endpoint: Self::API_ENDPOINT.to_string(),
        })
    }

    async fn get<T>(&self, endpoint: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = Uri::from_str(endpoint)?;
        let mut req = Request::builder()
            .method(Method::GET)
            .uri(url)
            .body(Body::empty())?;
        let headers = req.headers_mut();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(AUTHORIZATION, self.token.clone());
        headers.typed_insert(ContentType::json());
        headers.typed_insert(ContentLength(0));
        let resp = self.client.request(req).await?;
        let status = resp.status();
        let chunk = hyper::body::to_bytes(resp.into_body()).await?;
        if !status.is_success() {
            return Err(Error::Request(String::from_utf8_lossy(&chunk).into_owned()));
        }
        Ok(serde_json::from_slice(&chunk)?)
    }
}

#[async_trait]
impl IssueTracker for Github {
    async fn milestones_page(
        &self,
        owner: &str,
        repo: &str,
        page: usize,
    ) -> Result<Vec<Milestone>, Error> {
        self.get(&format!(
            "{}/repos/{}/{}/milestones?page={}",
            self.endpoint, owner, repo, page
        ))
        .await
    }

    async fn issues_page(
        &self,
        owner: &str,
        repo: &str,
        milestone: u64,
        page: usize,
    ) -> Result<Vec<Issue>, Error> {
        self.get(&format!(
            "{}/repos/{}/{}/issues?milestone={}&state=closed&per_page={}&page={}",
            self.endpoint, owner, repo, milestone, PER_PAGE, page
        ))
        .await
    }
}
