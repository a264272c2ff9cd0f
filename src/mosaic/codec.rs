use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{ImageFormat, RgbImage};

use crate::{error::MosaicError, info};

/// Decodes downloaded artwork bytes to an RGB raster.
///
/// The format is sniffed from the bytes. Corrupt or unsupported data is a
/// `FetchFailure` for `url`.
pub fn decode(url: &str, bytes: &[u8]) -> Result<RgbImage, MosaicError> {
    image::load_from_memory(bytes)
        .map(|image| image.into_rgb8())
        .map_err(|e| MosaicError::fetch(url, e))
}

pub fn encode(canvas: &RgbImage, format: ImageFormat) -> Result<Vec<u8>, MosaicError> {
    let mut buffer = Cursor::new(Vec::new());
    canvas.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}

/// Encodes `canvas` in the format implied by the extension of `path` and
/// writes it, creating missing parent directories.
pub async fn save(canvas: &RgbImage, path: &Path) -> Result<PathBuf, MosaicError> {
    let format = ImageFormat::from_path(path)?;
    let bytes = encode(canvas, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }

    info!("Saving the image to {}.", path.display());
    async_fs::write(path, bytes).await?;
    Ok(path.to_path_buf())
}
