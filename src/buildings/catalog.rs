//! The 28 building tiles, dealt into four stacks.

use im::Vector;

use crate::core::{ConfigurationError, GameRng, ResourceKind};

use super::building::Building;

/// Number of building stacks (and building slots) on the board.
pub const BUILDING_STACKS: usize = 4;

/// Tiles per stack in the full catalog.
pub const STACK_SIZE: usize = 7;

/// The four stacks in catalog order.
#[must_use]
pub fn building_catalog() -> [Vec<Building>; BUILDING_STACKS] {
    use ResourceKind::*;

    let c = Building::certain;
    let f = Building::flex;

    [
        vec![
            c(&[Wood, Wood, Clay]),
            c(&[Wood, Wood, Stone]),
            c(&[Wood, Clay, Clay]),
            c(&[Wood, Stone, Clay]),
            c(&[Wood, Clay, Gold]),
            c(&[Wood, Stone, Stone]),
            f(4, 2),
        ],
        vec![
            c(&[Wood, Wood, Gold]),
            c(&[Wood, Stone, Stone]),
            c(&[Stone, Clay, Clay]),
            c(&[Wood, Stone, Gold]),
            c(&[Stone, Clay, Gold]),
            f(4, 3),
            f(4, 4),
        ],
        vec![
            c(&[Clay, Clay, Gold]),
            c(&[Stone, Stone, Clay]),
            c(&[Stone, Stone, Gold]),
            c(&[Wood, Clay, Gold]),
            f(5, 1),
            f(5, 2),
            f(5, 4),
        ],
        vec![
            f(5, 3),
            f(7, 1),
            f(4, 1),
            c(&[Stone, Clay, Gold]),
            c(&[Wood, Stone, Gold]),
            c(&[Wood, Stone, Clay]),
            c(&[Wood, Clay, Gold]),
        ],
    ]
}

/// Turn the catalog into draw stacks, shuffling each stack when asked.
///
/// Every stack must hold at least two tiles: one is dealt face up at setup
/// and the game ends as soon as a stack runs dry.
pub fn build_building_stacks(
    catalog: [Vec<Building>; BUILDING_STACKS],
    rng: &mut GameRng,
    shuffle: bool,
) -> Result<[Vector<Building>; BUILDING_STACKS], ConfigurationError> {
    let mut stacks: [Vector<Building>; BUILDING_STACKS] = Default::default();

    for (index, mut tiles) in catalog.into_iter().enumerate() {
        if tiles.len() < 2 {
            return Err(ConfigurationError::MalformedDeck(format!(
                "building stack {index} has {} tile(s), at least 2 required",
                tiles.len()
            )));
        }
        for tile in &tiles {
            tile.validate()?;
        }
        if shuffle {
            rng.shuffle(&mut tiles);
        }
        stacks[index] = tiles.into_iter().collect();
    }

    Ok(stacks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_28_tiles() {
        let catalog = building_catalog();
        assert!(catalog.iter().all(|stack| stack.len() == STACK_SIZE));
        assert_eq!(catalog.iter().map(Vec::len).sum::<usize>(), 28);
    }

    #[test]
    fn test_catalog_tiles_are_valid() {
        for tile in building_catalog().iter().flatten() {
            assert!(tile.validate().is_ok(), "{tile:?}");
        }
    }

    #[test]
    fn test_stacks_keep_their_tiles() {
        let mut rng = GameRng::new(9);
        let stacks = build_building_stacks(building_catalog(), &mut rng, true).unwrap();
        let catalog = building_catalog();
        for (stack, tiles) in stacks.iter().zip(catalog.iter()) {
            assert_eq!(stack.len(), tiles.len());
            for tile in tiles {
                assert!(stack.contains(tile));
            }
        }
    }

    #[test]
    fn test_short_stack_rejected() {
        let mut catalog = building_catalog();
        catalog[2].truncate(1);
        let mut rng = GameRng::new(9);
        assert!(matches!(
            build_building_stacks(catalog, &mut rng, false),
            Err(ConfigurationError::MalformedDeck(_))
        ));
    }
}
