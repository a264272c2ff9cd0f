use std::{future::Future, sync::Arc};

use image::RgbImage;
use indicatif::ProgressBar;
use reqwest::Client;
use tokio::{sync::Semaphore, task::JoinSet};

use crate::{error::MosaicError, info, mosaic::codec};

/// Number of artworks downloaded at the same time.
pub const POOL_WIDTH: usize = 16;

/// Where artwork bytes come from.
pub trait ArtworkSource: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, MosaicError>> + Send;
}

/// Downloads artworks over HTTP. Non-success statuses are failures.
#[derive(Debug, Clone, Default)]
pub struct HttpArtworkSource {
    http: Client,
}

impl HttpArtworkSource {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl ArtworkSource for HttpArtworkSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MosaicError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| MosaicError::fetch(url, e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MosaicError::fetch(url, e))?;
        Ok(bytes.to_vec())
    }
}

/// Downloads and decodes artworks in parallel, returning them in input order.
pub struct ConcurrentFetcher<S> {
    source: Arc<S>,
    width: usize,
}

impl<S: ArtworkSource> ConcurrentFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            width: POOL_WIDTH,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// Fetches every URL and returns the decoded images, `result[i]` for `urls[i]`.
    ///
    /// At most `width` downloads are in flight. Each task carries the index it
    /// was dispatched with and its image is stored in that slot, so completion
    /// order does not matter. The first download or decode failure is returned
    /// and the outstanding tasks are aborted.
    pub async fn fetch_all(
        &self,
        urls: &[String],
        progress: &ProgressBar,
    ) -> Result<Vec<RgbImage>, MosaicError> {
        progress.suspend(|| {
            info!(
                "Requesting {} images, {} at a time.",
                urls.len(),
                self.width
            )
        });

        let semaphore = Arc::new(Semaphore::new(self.width));
        let mut tasks = JoinSet::new();

        for (index, url) in urls.iter().cloned().enumerate() {
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| MosaicError::fetch(&url, e))?;
                let bytes = source.fetch(&url).await?;
                let image = codec::decode(&url, &bytes)?;
                Ok::<_, MosaicError>((index, image))
            });
        }

        let mut slots: Vec<Option<RgbImage>> = (0..urls.len()).map(|_| None).collect();

        // returning early drops `tasks`, which aborts the downloads still running
        while let Some(joined) = tasks.join_next().await {
            let (index, image) = match joined {
                Ok(result) => result?,
                Err(e) => {
                    return Err(MosaicError::FetchFailure {
                        url: "<artwork task>".to_string(),
                        reason: e.to_string(),
                    });
                }
            };
            slots[index] = Some(image);
            progress.inc(1);
        }

        slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| slot.ok_or_else(|| MosaicError::fetch(url, "no image produced")))
            .collect()
    }
}
