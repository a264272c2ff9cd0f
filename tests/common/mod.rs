#![allow(dead_code)]

pub mod http;

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use image::{ImageFormat, Rgb, RgbImage};
use playlist_mosaic::{
    MosaicError,
    mosaic::{ArtworkSource, Catalog, codec},
    types::{AlbumId, AlbumPage, PlaylistRef, ResolutionTier},
};

pub const PLAYLIST: &str = "spotify:playlist:37i9dQZF1DXcBWIGoYBM5M";

/// In-memory catalog: pages are served in order, cursors are page indices.
#[derive(Default)]
pub struct FakeCatalog {
    pub pages: Vec<Vec<AlbumId>>,
    pub missing_playlist: bool,
    pub page_requests: AtomicUsize,
    pub batches: Mutex<Vec<Vec<AlbumId>>>,
}

impl FakeCatalog {
    pub fn with_pages(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|page| page.iter().map(|id| id.to_string()).collect())
                .collect(),
            ..Self::default()
        }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }
}

pub fn artwork_url(id: &str, tier: ResolutionTier) -> String {
    format!("https://img.test/{tier}/{id}")
}

impl Catalog for FakeCatalog {
    async fn album_page(
        &self,
        playlist: &PlaylistRef,
        cursor: Option<&str>,
    ) -> Result<AlbumPage, MosaicError> {
        self.page_requests.fetch_add(1, Ordering::SeqCst);
        if self.missing_playlist {
            return Err(MosaicError::NotFound(format!("playlist {playlist}")));
        }

        let index: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());
        Ok(AlbumPage { items, next_cursor })
    }

    async fn artwork_urls(
        &self,
        ids: &[AlbumId],
        tier: ResolutionTier,
    ) -> Result<Vec<String>, MosaicError> {
        self.batches.lock().unwrap().push(ids.to_vec());
        Ok(ids.iter().map(|id| artwork_url(id, tier)).collect())
    }
}

/// What a [`FakeSource`] does for one URL.
#[derive(Clone)]
pub enum Served {
    Image { delay_ms: u64, bytes: Vec<u8> },
    Failure,
}

/// In-memory artwork source with per-URL latency and failure injection.
#[derive(Clone, Default)]
pub struct FakeSource {
    pub served: Arc<HashMap<String, Served>>,
    pub requests: Arc<AtomicUsize>,
    pub in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn new(served: HashMap<String, Served>) -> Self {
        Self {
            served: Arc::new(served),
            ..Self::default()
        }
    }
}

impl ArtworkSource for FakeSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MosaicError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let served = self.served.get(url).cloned();
        let result = match served {
            Some(Served::Image { delay_ms, bytes }) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(bytes)
            }
            Some(Served::Failure) => Err(MosaicError::fetch(url, "503 Service Unavailable")),
            None => Err(MosaicError::fetch(url, "404 Not Found")),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// A distinct, easily recognizable color for tile `n`.
pub fn color(n: usize) -> Rgb<u8> {
    Rgb([(n * 40 % 256) as u8, (255 - n * 30 % 256) as u8, (n * 17 % 256) as u8])
}

pub fn solid(size: u32, n: usize) -> RgbImage {
    RgbImage::from_pixel(size, size, color(n))
}

pub fn png_bytes(size: u32, n: usize) -> Vec<u8> {
    codec::encode(&solid(size, n), ImageFormat::Png).unwrap()
}

pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "playlist-mosaic-{}-{}",
        std::process::id(),
        name
    ))
}
