use reqwest::Client;

use crate::{
    error::MosaicError,
    spotify,
    types::{AlbumPage, PlaylistRef, PlaylistTracksResponse},
};

/// Items per playlist page; the API maximum.
pub const PAGE_LIMIT: u32 = 100;

/// Fetches one page of a playlist's tracks and reduces it to album ids.
///
/// The first page is requested from `/playlists/{id}/tracks` with a field
/// filter so only album ids and the `next` link come back. Later pages follow
/// the `next` URL returned by the API, which is passed in as `cursor`.
///
/// Items without a track (removed tracks) and tracks without an album id
/// (local files, podcast episodes) are skipped. Duplicates are kept; the
/// caller deduplicates across pages.
///
/// # Errors
///
/// - `NotFound` when the playlist doesn't exist
/// - `InvalidReference` when the API refuses the id as malformed
/// - `AuthFailure` when the token is rejected
pub async fn get_album_page(
    http: &Client,
    api_url: &str,
    authorization: &str,
    playlist: &PlaylistRef,
    cursor: Option<&str>,
) -> Result<AlbumPage, MosaicError> {
    let url = match cursor {
        Some(next) => next.to_string(),
        None => format!(
            "{api_url}/playlists/{id}/tracks?fields=items(track(album(id))),next&limit={limit}",
            id = playlist.id,
            limit = PAGE_LIMIT
        ),
    };

    let response = spotify::send(|| http.get(&url).header("Authorization", authorization))
        .await
        .map_err(|e| match e {
            MosaicError::NotFound(_) => MosaicError::NotFound(format!("playlist {playlist}")),
            MosaicError::InvalidReference(_) => {
                MosaicError::InvalidReference(playlist.id.clone())
            }
            other => other,
        })?;

    let json = response
        .json::<PlaylistTracksResponse>()
        .await
        .map_err(|e| MosaicError::Catalog(e.to_string()))?;

    Ok(album_page_from(json))
}

pub fn album_page_from(response: PlaylistTracksResponse) -> AlbumPage {
    AlbumPage {
        items: response
            .items
            .into_iter()
            .filter_map(|item| item.track?.album?.id)
            .collect(),
        next_cursor: response.next,
    }
}
