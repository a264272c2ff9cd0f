//! # Spotify Integration Module
//!
//! This module is the catalog client of playlist-mosaic. It knows how to
//! authenticate against the Spotify Web API, how to page through a playlist's
//! tracks and how to look up album artworks, and it exposes all of that to the
//! mosaic pipeline through the [`Catalog`] trait.
//!
//! ## Architecture
//!
//! ```text
//! Mosaic Pipeline (dedup, resolve, select, fetch, compose)
//!          ↓  Catalog trait
//! SpotifyCatalog
//!     ├── Session (client-credentials token, one per run)
//!     ├── Playlist paging (album ids per page)
//!     └── Album lookup (≤ 20 ids per request)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - client-credentials grant
//! - `GET /playlists/{id}/tracks` - playlist items, field-filtered to album ids
//! - `GET /albums?ids=...` - several albums, used for their image lists
//!
//! ## Error Mapping
//!
//! Every non-success status is turned into a [`MosaicError`]:
//! - **404** - `NotFound`
//! - **401 / 403** - `AuthFailure`
//! - **400** - `InvalidReference`
//! - **429** - waits for `Retry-After` (up to two minutes) and sends again
//! - anything else - `Catalog`
//!
//! The caller treats all of them as fatal.

pub mod albums;
pub mod auth;
pub mod playlist;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

pub use auth::Session;

use crate::{
    config,
    error::MosaicError,
    mosaic::Catalog,
    types::{AlbumId, AlbumPage, PlaylistRef, ResolutionTier},
    warning,
};

/// Longest `Retry-After` we are willing to sit through.
const MAX_RETRY_AFTER_SECS: u64 = 120;
const MAX_RATE_LIMIT_WAITS: u32 = 5;

/// Sends the request built by `build` and maps the response status.
///
/// `build` is called again for every attempt, since a `RequestBuilder` is
/// consumed by sending it. Only rate-limit responses are sent again.
pub(crate) async fn send<F>(build: F) -> Result<Response, MosaicError>
where
    F: Fn() -> RequestBuilder,
{
    let mut waits = 0;

    loop {
        let response = build()
            .send()
            .await
            .map_err(|e| MosaicError::Catalog(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);

                if retry_after > MAX_RETRY_AFTER_SECS || waits >= MAX_RATE_LIMIT_WAITS {
                    return Err(MosaicError::Catalog(format!(
                        "rate limited by Spotify, retry after {retry_after} seconds"
                    )));
                }

                warning!("Rate limited, waiting {} seconds.", retry_after);
                waits += 1;
                sleep(Duration::from_secs(retry_after)).await;
            }
            StatusCode::NOT_FOUND => return Err(MosaicError::NotFound(url)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(MosaicError::AuthFailure(format!("{status} from {url}")));
            }
            StatusCode::BAD_REQUEST => return Err(MosaicError::InvalidReference(url)),
            _ => {
                return Err(MosaicError::Catalog(format!("{status} from {url}")));
            }
        }
    }
}

/// [`Catalog`] backed by the Spotify Web API.
pub struct SpotifyCatalog<'a> {
    session: &'a Session,
    http: Client,
    api_url: String,
}

impl<'a> SpotifyCatalog<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            http: Client::new(),
            api_url: config::spotify_apiurl(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Catalog for SpotifyCatalog<'_> {
    async fn album_page(
        &self,
        playlist: &PlaylistRef,
        cursor: Option<&str>,
    ) -> Result<AlbumPage, MosaicError> {
        let authorization = self.session.authorization().await?;
        playlist::get_album_page(&self.http, &self.api_url, &authorization, playlist, cursor).await
    }

    async fn artwork_urls(
        &self,
        ids: &[AlbumId],
        tier: ResolutionTier,
    ) -> Result<Vec<String>, MosaicError> {
        let authorization = self.session.authorization().await?;
        albums::get_artwork_urls(&self.http, &self.api_url, &authorization, ids, tier).await
    }
}
