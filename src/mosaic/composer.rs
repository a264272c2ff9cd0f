use image::{
    RgbImage,
    imageops::{self, FilterType},
};

use crate::{error::MosaicError, info, types::Grid};

/// Allocates a black square canvas of `side` pixels.
///
/// The buffer is reserved fallibly: a side whose buffer can't be addressed or
/// allocated is reported as `OutOfMemory` instead of aborting the process.
pub fn allocate_canvas(side: u64) -> Result<RgbImage, MosaicError> {
    let oom = || MosaicError::OutOfMemory { side };

    let side_px = u32::try_from(side).map_err(|_| oom())?;
    let len = side
        .checked_mul(side)
        .and_then(|pixels| pixels.checked_mul(3))
        .and_then(|bytes| usize::try_from(bytes).ok())
        .ok_or_else(oom)?;

    let mut buffer: Vec<u8> = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| oom())?;
    buffer.resize(len, 0);

    RgbImage::from_raw(side_px, side_px, buffer).ok_or_else(oom)
}

/// Places the tiles on a fresh canvas.
///
/// Tiles are consumed in order, column by column: the outer loop walks grid
/// columns `x`, the inner loop grid rows `y`, and tile `n` lands at
/// `(x * tile_size_px, y * tile_size_px)`. With a 2x2 grid that puts tile 0
/// top-left, 1 bottom-left, 2 top-right and 3 bottom-right.
///
/// Tiles that are not exactly `tile_size_px` square are resized first.
pub fn compose(grid: Grid, tiles: Vec<RgbImage>) -> Result<RgbImage, MosaicError> {
    if grid.tile_count == 0 {
        return Err(MosaicError::EmptyInput);
    }
    if tiles.len() != grid.cells() {
        return Err(MosaicError::Config(format!(
            "a {n}x{n} grid needs {} tiles, got {}",
            grid.cells(),
            tiles.len(),
            n = grid.tile_count
        )));
    }

    info!("Creating {}x{} px image.", grid.side_px(), grid.side_px());
    let mut canvas = allocate_canvas(grid.side_px())?;
    let size = grid.tile_size_px;
    let mut tiles = tiles.into_iter();

    for x in 0..grid.tile_count {
        for y in 0..grid.tile_count {
            let Some(tile) = tiles.next() else {
                return Err(MosaicError::EmptyInput);
            };
            let tile = fit_tile(tile, size);
            imageops::replace(
                &mut canvas,
                &tile,
                i64::from(x) * i64::from(size),
                i64::from(y) * i64::from(size),
            );
        }
    }

    Ok(canvas)
}

fn fit_tile(tile: RgbImage, size: u32) -> RgbImage {
    if tile.dimensions() == (size, size) {
        tile
    } else {
        imageops::resize(&tile, size, size, FilterType::Triangle)
    }
}

/// Largest accepted blur coefficient.
pub const MAX_BLUR: f32 = 4.0;

/// Checks that `coefficient` is a finite number in `0.0..=MAX_BLUR`.
pub fn check_blur(coefficient: f32) -> Result<f32, MosaicError> {
    if coefficient.is_finite() && (0.0..=MAX_BLUR).contains(&coefficient) {
        Ok(coefficient)
    } else {
        Err(MosaicError::Config(format!(
            "blur must be between 0 and {MAX_BLUR}, got {coefficient}"
        )))
    }
}

/// Blurs the mosaic with a sigma of half a tile times `coefficient`.
///
/// A coefficient of zero returns the canvas untouched.
pub fn blur(canvas: RgbImage, grid: Grid, coefficient: f32) -> Result<RgbImage, MosaicError> {
    let coefficient = check_blur(coefficient)?;
    if coefficient == 0.0 {
        return Ok(canvas);
    }

    info!("Blurring mosaic ({}).", coefficient);
    Ok(imageops::blur(
        &canvas,
        grid.tile_size_px as f32 * 0.5 * coefficient,
    ))
}
