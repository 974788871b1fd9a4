use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use headers::{ContentType, HeaderMapExt};
use hyper::header::{HeaderValue, AUTHORIZATION};
use hyper::{Body, Client, Method, Request, Uri};
use hyper_tls::HttpsConnector;
use serde_derive::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Error;
use crate::github::HttpsClient;
use crate::model::RenderedDescription;

/// Webhook payload: the version plus the chat-dialect description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub version: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy)]
pub struct UploadOptions {
    pub continue_on_error: bool,
}

#[async_trait]
pub trait ArtifactStore {
    async fn upload(
        &self,
        name: &str,
        files: &[String],
        root: &Path,
        options: UploadOptions,
    ) -> Result<(), Error>;
}

#[async_trait]
pub trait Notifier {
    async fn notify(&self, notification: &Notification) -> Result<(), Error>;
}

/// Persists the document dialect as a named artifact and forwards the chat
/// dialect to the notification webhook.
pub struct Publisher<A, N> {
    artifacts: A,
    notifier: N,
    root: PathBuf,
}

impl<A, N> Publisher<A, N>
where
    A: ArtifactStore,
    N: Notifier,
{
    pub fn new(artifacts: A, notifier: N, root: impl Into<PathBuf>) -> Self {
        Self {
            artifacts,
            notifier,
            root: root.into(),
        }
    }

    /// The local write is best-effort: a failure is logged and the upload
    /// still runs, which then fails on its own if the file is truly absent.
    pub async fn publish(
        &self,
        version: &str,
        description: &RenderedDescription,
    ) -> Result<(), Error> {
        let artifact_name = format!("{}_description", version);
        let file_name = format!("{}.txt", artifact_name);
        if let Err(error) = std::fs::write(self.root.join(&file_name), &description.document) {
            warn!("write file: {}", error);
        }
        self.artifacts
            .upload(
                &artifact_name,
                &[file_name],
                &self.root,
                UploadOptions {
                    continue_on_error: false,
                },
            )
            .await?;
        self.notifier
            .notify(&Notification {
                version: version.to_string(),
                description: description.chat.clone(),
            })
            .await
    }
}

/// Uploads artifact files to the automation platform's artifact service.
pub struct HttpArtifactStore {
    client: HttpsClient,
    base_url: String,
    token: HeaderValue,
}

impl HttpArtifactStore {
    pub fn new(base_url: &str, token: &str) -> Result<Self, Error> {
        Ok(Self {
            client: Client::builder().build(HttpsConnector::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: HeaderValue::from_str(&format!("Bearer {}", token))?,
        })
    }

    async fn upload_file(&self, name: &str, file: &str, root: &Path) -> Result<(), Error> {
        let bytes = std::fs::read(root.join(file))?;
        let url = Uri::from_str(&format!("{}/artifacts/{}/{}", self.base_url, name, file))?;
        let mut req = Request::builder()
            .method(Method::PUT)
            .uri(url)
            .body(Body::from(bytes))?;
        req.headers_mut().insert(AUTHORIZATION, self.token.clone());
        req.headers_mut().typed_insert(ContentType::octet_stream());
        let resp = self.client.request(req).await?;
        if !resp.status().is_success() {
            return Err(Error::ArtifactUpload(format!(
                "'{}' returned {}",
                file,
                resp.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for HttpArtifactStore {
    async fn upload(
        &self,
        name: &str,
        files: &[String],
        root: &Path,
        options: UploadOptions,
    ) -> Result<(), Error> {
        for file in files {
            match self.upload_file(name, file, root).await {
                Ok(()) => {}
                Err(error) if options.continue_on_error => {
                    warn!("artifact upload: {}", error);
                }
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }
}

/// POSTs the notification as JSON. The response body is never read and a
/// non-success status is not an error; only a transport failure propagates.
pub struct WebhookNotifier {
    client: HttpsClient,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::builder().build(HttpsConnector::new()),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), Error> {
        let body = serde_json::to_vec(notification)?;
        let mut req = Request::builder()
            .method(Method::POST)
            .uri(Uri::from_str(&self.url)?)
            .body(Body::from(body))?;
        req.headers_mut().typed_insert(ContentType::json());
        let resp = self.client.request(req).await?;
        info!("notification webhook responded {}", resp.status());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    type UploadCall = (String, Vec<String>, PathBuf, bool);

    #[derive(Default, Clone)]
    struct RecordingStore {
        calls: Arc<Mutex<Vec<UploadCall>>>,
        fail: bool,
    }

    #[async_trait]
    impl ArtifactStore for RecordingStore {
        async fn upload(
            &self,
            name: &str,
            files: &[String],
            root: &Path,
            options: UploadOptions,
        ) -> Result<(), Error> {
            self.calls.lock().unwrap().push((
                name.to_string(),
                files.to_vec(),
                root.to_path_buf(),
                options.continue_on_error,
            ));
            if self.fail {
                return Err(Error::ArtifactUpload("store unavailable".into()));
            }
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    struct RecordingNotifier {
        notes: Arc<Mutex<Vec<Notification>>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notification: &Notification) -> Result<(), Error> {
            self.notes.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    fn description() -> RenderedDescription {
        RenderedDescription {
            chat: "*bug*: Bug reports\n".into(),
            document: "## bug: Bug reports\n".into(),
        }
    }

    #[tokio::test]
    async fn uploads_artifact_named_after_version() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordingStore::default();
        let notifier = RecordingNotifier::default();
        let publisher = Publisher::new(store.clone(), notifier.clone(), dir.path());

        publisher.publish("1.2.0", &description()).await.unwrap();

        let calls = store.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (name, files, root, continue_on_error) = &calls[0];
        assert_eq!(name, "1.2.0_description");
        assert_eq!(files, &["1.2.0_description.txt".to_string()]);
        assert_eq!(root, dir.path());
        assert!(!*continue_on_error);

        let written = std::fs::read_to_string(dir.path().join("1.2.0_description.txt")).unwrap();
        assert_eq!(written, "## bug: Bug reports\n");
    }

    #[tokio::test]
    async fn webhook_body_is_version_and_chat_description() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = RecordingNotifier::default();
        let publisher = Publisher::new(RecordingStore::default(), notifier.clone(), dir.path());

        publisher.publish("1.2.0", &description()).await.unwrap();

        let notes = notifier.notes.lock().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(
            serde_json::to_value(&notes[0]).unwrap(),
            json!({ "version": "1.2.0", "description": "*bug*: Bug reports\n" })
        );
    }

    #[tokio::test]
    async fn write_failure_does_not_block_upload() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let store = RecordingStore::default();
        let publisher = Publisher::new(store.clone(), RecordingNotifier::default(), missing);

        publisher.publish("1.2.0", &description()).await.unwrap();

        assert_eq!(store.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn upload_failure_propagates_and_skips_notification() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordingStore {
            fail: true,
            ..RecordingStore::default()
        };
        let notifier = RecordingNotifier::default();
        let publisher = Publisher::new(store, notifier.clone(), dir.path());

        let err = publisher.publish("1.2.0", &description()).await.unwrap_err();
        assert!(matches!(err, Error::ArtifactUpload(_)));
        assert!(notifier.notes.lock().unwrap().is_empty());
    }
}
