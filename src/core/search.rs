use crate::error::{Result, SiftError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

/// Largest file the upload host accepts.
const MAX_UPLOAD_BYTES: u64 = 15 * 1024 * 1024;

const SEARCH_URL_PREFIX: &str = "https://www.google.com/searchbyimage?site=search&sa=X&image_url=";

/// Reverse image search helper: uploads the current image to a paste host
/// to obtain a public URL, then builds a search-by-image redirect URL for
/// the frontend to open.
///
/// Exactly one upload runs at a time. Starting a second one while the first
/// is in flight fails with [`SiftError::SearchInFlight`] instead of being
/// silently dropped, and the in-flight task can be cancelled. The outcome is
/// parked in a result slot the frontend polls via [`take_result`].
///
/// [`take_result`]: ReverseImageSearch::take_result
pub struct ReverseImageSearch {
    client: reqwest::Client,
    upload_url: String,
    busy: Arc<Mutex<bool>>,
    result: Arc<Mutex<Option<Result<String>>>>,
    task: Option<JoinHandle<()>>,
}

impl ReverseImageSearch {
    #[must_use]
    pub fn new(upload_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            upload_url: upload_url.into(),
            busy: Arc::new(Mutex::new(false)),
            result: Arc::new(Mutex::new(None)),
            task: None,
        }
    }

    /// Whether a file of this size is eligible for upload.
    #[must_use]
    pub fn can_search(size: u64) -> bool {
        size <= MAX_UPLOAD_BYTES
    }

    pub async fn is_busy(&self) -> bool {
        *self.busy.lock().await
    }

    /// Kicks off the upload in the background and returns immediately. An
    /// untaken result from a previous search is discarded; the slot only
    /// ever holds the outcome of the most recent start.
    pub async fn start(&mut self, image: &Path) -> Result<()> {
        {
            let mut busy = self.busy.lock().await;
            if *busy {
                return Err(SiftError::SearchInFlight);
            }
            *busy = true;
        }
        *self.result.lock().await = None;

        let client = self.client.clone();
        let upload_url = self.upload_url.clone();
        let busy = Arc::clone(&self.busy);
        let slot = Arc::clone(&self.result);
        let image: PathBuf = image.to_path_buf();

        self.task = Some(tokio::spawn(async move {
            let outcome = upload_and_build_url(&client, &upload_url, &image).await;
            if let Err(e) = &outcome {
                warn!("reverse image search for {} failed: {e}", image.display());
            }
            *slot.lock().await = Some(outcome);
            *busy.lock().await = false;
        }));

        Ok(())
    }

    /// Aborts the in-flight upload, if any, and clears the busy flag.
    pub async fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            *self.busy.lock().await = false;
        }
    }

    /// Takes the finished search URL (or error) out of the result slot.
    pub async fn take_result(&self) -> Option<Result<String>> {
        self.result.lock().await.take()
    }
}

async fn upload_and_build_url(client: &reqwest::Client, upload_url: &str, image: &Path) -> Result<String> {
    let bytes = tokio::fs::read(image).await?;
    let file_name = image
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
    let form = reqwest::multipart::Form::new().text("dl_limit", "1").part("file", part);

    let body = client
        .post(upload_url)
        .multipart(form)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let image_url = extract_image_url(&body).ok_or(SiftError::MissingUploadUrl)?;
    Ok(format!("{SEARCH_URL_PREFIX}{image_url}"))
}

/// First `http…` token in the response body. The paste host answers with
/// plain text containing the public URL somewhere in it.
fn extract_image_url(body: &str) -> Option<String> {
    let start = body.find("http")?;
    let tail = &body[start..];
    let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
    let url = &tail[..end];
    if url.len() > "http".len() { Some(url.to_string()) } else { None }
}
