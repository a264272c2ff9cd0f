use std::collections::HashSet;

use indicatif::ProgressBar;

use crate::{
    error::MosaicError,
    info,
    mosaic::Catalog,
    types::{AlbumId, PlaylistRef},
};

/// Ordered set of album ids: first occurrence wins, later repeats are dropped.
#[derive(Debug, Default)]
pub struct AlbumDeduplicator {
    seen: HashSet<AlbumId>,
    albums: Vec<AlbumId>,
}

impl AlbumDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one page of ids and returns how many of them were new.
    pub fn push_page(&mut self, items: impl IntoIterator<Item = AlbumId>) -> usize {
        let before = self.albums.len();
        for id in items {
            if self.seen.insert(id.clone()) {
                self.albums.push(id);
            }
        }
        self.albums.len() - before
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn into_albums(self) -> Vec<AlbumId> {
        self.albums
    }
}

/// Walks every page of the playlist and returns its distinct album ids in
/// first-seen order.
///
/// Stops when the catalog reports no next cursor. Any catalog error, a
/// missing playlist included, ends the walk without a partial result.
pub async fn collect_unique_albums<C: Catalog>(
    catalog: &C,
    playlist: &PlaylistRef,
    progress: &ProgressBar,
) -> Result<Vec<AlbumId>, MosaicError> {
    progress.suspend(|| info!("Fetching albums from playlist {}.", playlist));
    let mut dedup = AlbumDeduplicator::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;

    loop {
        let page = catalog.album_page(playlist, cursor.as_deref()).await?;
        pages += 1;
        let added = dedup.push_page(page.items);
        progress.set_message(format!(
            "Reading playlist... {} albums on {} pages",
            dedup.len(),
            pages
        ));
        progress.suspend(|| info!("Page {}: {} new albums.", pages, added));

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    progress.suspend(|| info!("Album ids obtained: {} distinct.", dedup.len()));
    Ok(dedup.into_albums())
}
