use rand::{Rng, seq::SliceRandom};

use crate::{error::MosaicError, types::Arrangement};

/// The artworks that made it into the grid, and the grid's side in tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    pub tiles: u32,
    pub items: Vec<T>,
}

/// Largest square grid side that `available` artworks can fill.
pub fn max_tiles(available: usize) -> u32 {
    u32::try_from(available.isqrt()).unwrap_or(u32::MAX)
}

/// Grid side actually used: the requested side, shrunk to what the artworks can fill.
///
/// The user-facing knob is the side length, not the tile count, so a request
/// of `R` needs `R²` artworks.
pub fn tile_count(available: usize, requested: u32) -> u32 {
    requested.min(max_tiles(available))
}

/// Picks the `tiles²` artworks for the grid.
///
/// `Random` shuffles the whole list before truncating, so it changes which
/// artworks are picked and not only where they land. `Last` keeps the tail of
/// the list in its original order.
pub fn select_tiles<T, R>(
    mut items: Vec<T>,
    requested: u32,
    arrangement: Arrangement,
    rng: &mut R,
) -> Result<Selection<T>, MosaicError>
where
    R: Rng + ?Sized,
{
    if requested == 0 {
        return Err(MosaicError::Config(
            "grid size must be at least 1".to_string(),
        ));
    }

    let tiles = tile_count(items.len(), requested);
    if tiles == 0 {
        return Err(MosaicError::EmptyInput);
    }

    let cells = (tiles as usize).pow(2);
    match arrangement {
        Arrangement::First => {}
        Arrangement::Last => {
            let rotation = items.len() - cells;
            items.rotate_left(rotation);
        }
        Arrangement::Random => items.shuffle(rng),
    }
    items.truncate(cells);

    Ok(Selection { tiles, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn max_tiles_is_floor_of_square_root() {
        assert_eq!(max_tiles(0), 0);
        assert_eq!(max_tiles(1), 1);
        assert_eq!(max_tiles(3), 1);
        assert_eq!(max_tiles(4), 2);
        assert_eq!(max_tiles(10), 3);
        assert_eq!(max_tiles(16), 4);
    }

    #[test]
    fn last_keeps_tail_in_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let selection = select_tiles((0..10).collect(), 2, Arrangement::Last, &mut rng).unwrap();
        assert_eq!(selection.tiles, 2);
        assert_eq!(selection.items, vec![6, 7, 8, 9]);
    }

    #[test]
    fn zero_request_is_a_config_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = select_tiles(vec![1, 2, 3, 4], 0, Arrangement::First, &mut rng).unwrap_err();
        assert!(matches!(err, MosaicError::Config(_)));
    }
}
