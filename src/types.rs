use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Opaque catalog identifier of an album. Equality is the dedup key.
pub type AlbumId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Value for the `Authorization` header, e.g. `Bearer BQC...`.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeveralAlbumsResponse {
    pub albums: Vec<Option<AlbumArtwork>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtwork {
    pub id: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A parsed playlist reference; only the catalog id survives parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRef {
    pub id: String,
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spotify:playlist:{}", self.id)
    }
}

/// One page of album ids as returned by the catalog, in track order.
///
/// `next_cursor` is `None` on the last page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumPage {
    pub items: Vec<AlbumId>,
    pub next_cursor: Option<String>,
}

/// Artwork resolution offered by the catalog.
///
/// Each tier maps to a fixed position in an album's image list and to the
/// pixel size of that image. Both come from the same `match`, so they cannot
/// drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionTier {
    #[default]
    High,
    Medium,
    Low,
}

impl ResolutionTier {
    pub const ALL: [ResolutionTier; 3] = [
        ResolutionTier::High,
        ResolutionTier::Medium,
        ResolutionTier::Low,
    ];

    /// Index into the catalog's per-album image list.
    pub const fn index(self) -> usize {
        match self {
            ResolutionTier::High => 0,
            ResolutionTier::Medium => 1,
            ResolutionTier::Low => 2,
        }
    }

    /// Side length in pixels of an artwork at this tier.
    pub const fn pixels(self) -> u32 {
        match self {
            ResolutionTier::High => 640,
            ResolutionTier::Medium => 300,
            ResolutionTier::Low => 64,
        }
    }

    pub fn from_pixels(pixels: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.pixels() == pixels)
    }
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// Which artworks end up in the mosaic once the grid size is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Arrangement {
    /// The first artworks in playlist order.
    #[default]
    First,
    /// The last artworks, keeping playlist order among them.
    Last,
    /// The whole list is shuffled before picking.
    Random,
}

/// A resolved artwork: which album it belongs to and where to download it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRef {
    pub album_id: AlbumId,
    pub url: String,
    pub tier: ResolutionTier,
}

/// Square grid geometry; the canvas side is `tile_count * tile_size_px`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub tile_count: u32,
    pub tile_size_px: u32,
}

impl Grid {
    pub fn new(tile_count: u32, tile_size_px: u32) -> Self {
        Self {
            tile_count,
            tile_size_px,
        }
    }

    pub fn side_px(&self) -> u64 {
        u64::from(self.tile_count) * u64::from(self.tile_size_px)
    }

    pub fn cells(&self) -> usize {
        (self.tile_count as usize).pow(2)
    }
}
