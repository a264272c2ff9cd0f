use crate::{
    error::MosaicError,
    info,
    mosaic::Catalog,
    types::{AlbumId, ArtworkRef, ResolutionTier},
};

/// Most album ids the catalog accepts in one artwork lookup.
pub const BATCH_LIMIT: usize = 20;

/// Maps album ids to artwork URLs of the requested tier, one per id, in order.
///
/// Ids are sent in consecutive chunks of at most [`BATCH_LIMIT`]. Chunks are
/// issued one after the other and their results appended as they arrive, so
/// the output order is the input order.
pub async fn resolve_artworks<C: Catalog>(
    catalog: &C,
    ids: &[AlbumId],
    tier: ResolutionTier,
) -> Result<Vec<ArtworkRef>, MosaicError> {
    let batches = ids.len().div_ceil(BATCH_LIMIT);
    info!(
        "Fetching {}px artworks for {} albums in {} requests.",
        tier,
        ids.len(),
        batches
    );

    let mut artworks = Vec::with_capacity(ids.len());
    for (n, chunk) in ids.chunks(BATCH_LIMIT).enumerate() {
        info!("Sending album request {}/{}.", n + 1, batches);
        let urls = catalog.artwork_urls(chunk, tier).await?;
        if urls.len() != chunk.len() {
            return Err(MosaicError::Catalog(format!(
                "asked for {} artworks, got {}",
                chunk.len(),
                urls.len()
            )));
        }

        artworks.extend(chunk.iter().zip(urls).map(|(id, url)| ArtworkRef {
            album_id: id.clone(),
            url,
            tier,
        }));
    }

    info!("Album artworks obtained.");
    Ok(artworks)
}
