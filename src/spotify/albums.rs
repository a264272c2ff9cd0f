use reqwest::Client;

use crate::{
    error::MosaicError,
    mosaic::resolver::BATCH_LIMIT,
    spotify,
    types::{AlbumId, GetSeveralAlbumsResponse, ResolutionTier},
};

/// Looks up the artwork URL of several albums in a single API request.
///
/// Uses `GET /albums?ids=...`. The API answers with one entry per requested
/// id, in request order, so the returned URLs line up with `ids`.
///
/// # Batch Limit
///
/// Spotify accepts at most 20 ids per call. Larger slices are refused here
/// instead of being sent; splitting is the resolver's job.
///
/// # Errors
///
/// - `NotFound` when an album entry is `null` or lacks an image at the tier's index
/// - `AuthFailure` when the token is rejected
/// - `Catalog` for transport errors, refused or unexpected statuses and short responses
pub async fn get_artwork_urls(
    http: &Client,
    api_url: &str,
    authorization: &str,
    ids: &[AlbumId],
    tier: ResolutionTier,
) -> Result<Vec<String>, MosaicError> {
    if ids.len() > BATCH_LIMIT {
        return Err(MosaicError::Catalog(format!(
            "{} album ids requested, the API accepts at most {BATCH_LIMIT}",
            ids.len()
        )));
    }

    let api_url = format!(
        "{api_url}/albums?ids={album_ids}",
        album_ids = ids.join(",")
    );

    // a 400 here is a bad album id list, not a bad playlist reference
    let response = spotify::send(|| http.get(&api_url).header("Authorization", authorization))
        .await
        .map_err(|e| match e {
            MosaicError::InvalidReference(url) => {
                MosaicError::Catalog(format!("album lookup refused: {url}"))
            }
            other => other,
        })?;

    let json = response
        .json::<GetSeveralAlbumsResponse>()
        .await
        .map_err(|e| MosaicError::Catalog(e.to_string()))?;

    artwork_urls_from(json, ids, tier)
}

pub fn artwork_urls_from(
    response: GetSeveralAlbumsResponse,
    ids: &[AlbumId],
    tier: ResolutionTier,
) -> Result<Vec<String>, MosaicError> {
    if response.albums.len() != ids.len() {
        return Err(MosaicError::Catalog(format!(
            "asked for {} albums, got {}",
            ids.len(),
            response.albums.len()
        )));
    }

    ids.iter()
        .zip(response.albums)
        .map(|(id, album)| {
            let album = album.ok_or_else(|| MosaicError::NotFound(format!("album {id}")))?;
            album
                .images
                .into_iter()
                .nth(tier.index())
                .map(|image| image.url)
                .ok_or_else(|| {
                    MosaicError::NotFound(format!("{tier}px artwork for album {}", album.id))
                })
        })
        .collect()
}
