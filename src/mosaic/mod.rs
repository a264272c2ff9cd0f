//! # Mosaic Pipeline
//!
//! Turns a playlist reference into a square mosaic of its distinct album
//! artworks. The stages run strictly one after the other; only the artwork
//! downloads run in parallel.
//!
//! ```text
//! playlist pages ─▶ dedup ─▶ resolver (≤ 20 ids / request)
//!                                 │
//!                                 ▼
//!                   selector (arrange + truncate to tiles²)
//!                                 │
//!                                 ▼
//!                   fetcher (bounded pool, index-ordered)
//!                                 │
//!                                 ▼
//!                   composer (column-major placement) ─▶ codec
//! ```
//!
//! Every stage returns the first error it meets and nothing after it runs;
//! there is no partial mosaic.

pub mod codec;
pub mod composer;
pub mod dedup;
pub mod fetcher;
pub mod resolver;
pub mod selector;

use std::{future::Future, path::PathBuf, time::Duration};

use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};

pub use fetcher::{ArtworkSource, ConcurrentFetcher, HttpArtworkSource};

use crate::{
    error::MosaicError,
    info,
    types::{AlbumId, AlbumPage, Arrangement, ArtworkRef, Grid, PlaylistRef, ResolutionTier},
    utils, warning,
};

/// The album catalog the pipeline reads from.
pub trait Catalog {
    /// One page of album ids of `playlist`; `cursor` is `None` for the first page.
    fn album_page(
        &self,
        playlist: &PlaylistRef,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<AlbumPage, MosaicError>>;

    /// Artwork URLs for at most 20 albums, in the order of `ids`.
    fn artwork_urls(
        &self,
        ids: &[AlbumId],
        tier: ResolutionTier,
    ) -> impl Future<Output = Result<Vec<String>, MosaicError>>;
}

#[derive(Debug, Clone)]
pub struct MosaicOptions {
    /// Requested grid side, in tiles.
    pub tiles: u32,
    pub tier: ResolutionTier,
    pub arrangement: Arrangement,
    /// Seed for `Arrangement::Random`; the thread RNG is used when absent.
    pub seed: Option<u64>,
    pub blur: f32,
    /// Where to write the mosaic; kept in memory when `None`.
    pub output: Option<PathBuf>,
    pub pool_width: usize,
    pub show_progress: bool,
}

impl Default for MosaicOptions {
    fn default() -> Self {
        Self {
            tiles: 2,
            tier: ResolutionTier::default(),
            arrangement: Arrangement::default(),
            seed: None,
            blur: 0.0,
            output: Some(PathBuf::from("mosaic.png")),
            pool_width: fetcher::POOL_WIDTH,
            show_progress: false,
        }
    }
}

#[derive(Debug)]
pub enum MosaicOutput {
    Written(PathBuf),
    InMemory(RgbImage),
}

#[derive(Debug)]
pub struct MosaicReport {
    pub grid: Grid,
    /// Distinct albums found in the playlist.
    pub albums: usize,
    /// The artworks on the canvas, in placement order.
    pub artworks: Vec<ArtworkRef>,
    pub output: MosaicOutput,
}

/// Runs the whole pipeline for `playlist`.
///
/// The playlist reference and the blur coefficient are checked before
/// anything touches the network. An empty playlist fails with `EmptyInput` before artworks are resolved or
/// downloaded.
pub async fn generate<C, S>(
    catalog: &C,
    source: S,
    playlist: &str,
    options: &MosaicOptions,
) -> Result<MosaicReport, MosaicError>
where
    C: Catalog,
    S: ArtworkSource,
{
    let playlist = utils::parse_playlist_ref(playlist)?;
    composer::check_blur(options.blur)?;

    let spinner = spinner(options.show_progress);
    let albums = dedup::collect_unique_albums(catalog, &playlist, &spinner).await;
    spinner.finish_and_clear();
    let albums = albums?;
    if albums.is_empty() {
        return Err(MosaicError::EmptyInput);
    }

    let artworks = resolver::resolve_artworks(catalog, &albums, options.tier).await?;
    let selection = select(artworks, options)?;
    if selection.tiles < options.tiles {
        warning!(
            "Only {} distinct artworks, using a {n}x{n} grid instead of {r}x{r}.",
            albums.len(),
            n = selection.tiles,
            r = options.tiles
        );
    }

    let grid = Grid::new(selection.tiles, options.tier.pixels());
    let urls: Vec<String> = selection.items.iter().map(|a| a.url.clone()).collect();

    let bar = progress_bar(urls.len() as u64, options.show_progress);
    let images = ConcurrentFetcher::new(source)
        .with_width(options.pool_width)
        .fetch_all(&urls, &bar)
        .await;
    bar.finish_and_clear();
    let images = images?;

    let canvas = composer::compose(grid, images)?;
    let canvas = composer::blur(canvas, grid, options.blur)?;

    let output = match &options.output {
        Some(path) => MosaicOutput::Written(codec::save(&canvas, path).await?),
        None => MosaicOutput::InMemory(canvas),
    };

    Ok(MosaicReport {
        grid,
        albums: albums.len(),
        artworks: selection.items,
        output,
    })
}

fn select(
    artworks: Vec<ArtworkRef>,
    options: &MosaicOptions,
) -> Result<selector::Selection<ArtworkRef>, MosaicError> {
    info!("Selecting artworks ({:?}).", options.arrangement);
    match options.seed {
        Some(seed) => selector::select_tiles(
            artworks,
            options.tiles,
            options.arrangement,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => selector::select_tiles(
            artworks,
            options.tiles,
            options.arrangement,
            &mut rand::rng(),
        ),
    }
}

fn spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message("Reading playlist...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.blue} Downloading artworks [{bar:30.blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
