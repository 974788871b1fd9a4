use handlebars::Handlebars;
use regex::{NoExpand, Regex};
use serde_derive::Serialize;

use crate::error::Error;
use crate::model::{Issue, RenderedDescription};
use crate::template;

const WEB_BASE_URL: &str = "https://github.com";

#[derive(Debug, Serialize)]
struct IssueLine {
    title: String,
    url: String,
    author: String,
}

#[derive(Debug, Serialize)]
struct LabelSection {
    name: String,
    description: String,
    issues: Vec<IssueLine>,
}

#[derive(Debug, Serialize)]
struct Grouped {
    sections: Vec<LabelSection>,
    unlabeled: Vec<IssueLine>,
}

/// Groups issues by label and renders the chat and document dialects.
/// Pure once constructed; does no I/O.
pub struct Renderer {
    registry: Handlebars<'static>,
    rewrite: Regex,
    canonical: String,
}

impl Renderer {
    pub fn new(owner: &str) -> Result<Self, Error> {
        let mut registry = Handlebars::new();
        registry.register_template_string("document", template::DOCUMENT_TEMPLATE)?;
        registry.register_template_string("chat", template::CHAT_TEMPLATE)?;
        // Matches any API-style prefix up to and including the owner segment.
        let rewrite = Regex::new(&format!(r"(?i)\S*/{}", regex::escape(owner)))?;
        Ok(Self {
            registry,
            rewrite,
            canonical: format!("{}/{}", WEB_BASE_URL, owner),
        })
    }

    pub fn render(&self, issues: &[Issue]) -> Result<RenderedDescription, Error> {
        let grouped = self.group(issues);
        Ok(RenderedDescription {
            chat: self.registry.render("chat", &grouped)?,
            document: self.registry.render("document", &grouped)?,
        })
    }

    /// Normalizes an API-style issue URL into a browsable web URL. URLs
    /// without the owner segment pass through unchanged; already rewritten
    /// URLs come back as-is.
    pub fn rewrite_url(&self, url: &str) -> String {
        self.rewrite
            .replace(url, NoExpand(&self.canonical))
            .into_owned()
    }

    fn group(&self, issues: &[Issue]) -> Grouped {
        // De-duplicated labels in first-occurrence order; the first seen
        // description wins when issues disagree.
        let mut sections: Vec<LabelSection> = Vec::new();
        for issue in issues {
            for label in &issue.labels {
                if !sections.iter().any(|s| s.name == label.name) {
                    sections.push(LabelSection {
                        name: label.name.clone(),
                        description: label.description.clone().unwrap_or_default(),
                        issues: Vec::new(),
                    });
                }
            }
        }
        // Sections are not a partition: an issue with N labels lands in N
        // sections, each time in input order.
        for section in &mut sections {
            section.issues = issues
                .iter()
                .filter(|issue| issue.labels.iter().any(|l| l.name == section.name))
                .map(|issue| self.line(issue))
                .collect();
        }
        let unlabeled = issues
            .iter()
            .filter(|issue| issue.labels.is_empty())
            .map(|issue| self.line(issue))
            .collect();
        Grouped {
            sections,
            unlabeled,
        }
    }

    fn line(&self, issue: &Issue) -> IssueLine {
        IssueLine {
            title: issue.title.clone(),
            url: self.rewrite_url(&issue.url),
            author: issue.user.login.clone(),
        }
    }
}
