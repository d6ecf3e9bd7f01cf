use std::collections::HashSet;

use crate::{
    MovementError, MovementOptions, NavGrid, NavTile, Pose, TileId, grid::resolve_tile,
    path::{PathSpline, string_pull},
};

/// Follow backpointers from `target` back to the search origin and return the route in
/// travel order (origin first).
pub fn backpointer_chain<G: NavGrid>(grid: &G, target: TileId) -> Result<Vec<TileId>, MovementError> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = Some(target);

    while let Some(id) = cursor {
        if !seen.insert(id) {
            return Err(MovementError::CyclicBackpointers(target));
        }
        let tile = grid.tile(id).ok_or(MovementError::NoPathToTarget(target))?;
        chain.push(id);
        cursor = tile.backpointer();
    }

    chain.reverse();
    Ok(chain)
}

/// Build the path a mover standing at `actor` takes to reach `target`.
///
/// The path starts at the mover's exact position. Every later tile of the (optionally
/// string-pulled) route then adds the points it contributes when entered from the previous
/// tile. Nothing about the caller's state changes here, so a failed build can simply be
/// dropped.
pub fn build_path<G: NavGrid>(
    grid: &G,
    actor: &Pose,
    target: TileId,
    options: &MovementOptions,
) -> Result<PathSpline, MovementError> {
    resolve_tile(grid, actor.position, options.can_climb()).ok_or(MovementError::NotOnGrid)?;

    if !grid.tiles_in_range(actor, true).contains(&target) {
        return Err(MovementError::NoPathToTarget(target));
    }

    let mut chain = backpointer_chain(grid, target)?;
    if options.string_pull {
        chain = string_pull(grid, &chain, &options.footprint, options.max_step_height);
    }

    let mut spline = PathSpline::new();
    spline.add_point(actor.position);

    let last = chain.len().saturating_sub(1);
    for (i, pair) in chain.windows(2).enumerate() {
        let (Some(prev), Some(tile)) = (grid.tile(pair[0]), grid.tile(pair[1])) else {
            log::warn!(
                "path to {target:?}: skipping step {:?} -> {:?}, tile missing from the grid",
                pair[0],
                pair[1]
            );
            continue;
        };
        for point in tile.path_points(prev.location(), i + 1 == last) {
            spline.add_point(point);
        }
    }

    if spline.length() <= 0.0 {
        return Err(MovementError::DegeneratePath);
    }
    Ok(spline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        MovementMode, Rotator, Vec3,
        movement::AvailableModes,
        tile_map::{TileMap, corridor},
    };

    const EPS: f32 = 1.0e-3;

    #[test]
    fn chain_is_returned_origin_first() {
        let (map, tiles) = corridor();
        assert_eq!(backpointer_chain(&map, tiles[3]).unwrap(), tiles);
        assert_eq!(backpointer_chain(&map, tiles[0]).unwrap(), vec![tiles[0]]);
    }

    #[test]
    fn cyclic_backpointers_terminate() {
        let (mut map, tiles) = corridor();
        map.set_backpointer(tiles[0], Some(tiles[2]));

        assert_eq!(
            backpointer_chain(&map, tiles[3]),
            Err(MovementError::CyclicBackpointers(tiles[3]))
        );
        assert_eq!(
            build_path(&map, &Pose::default(), tiles[3], &MovementOptions::default()),
            Err(MovementError::CyclicBackpointers(tiles[3]))
        );
    }

    #[test]
    fn dangling_backpointer_is_not_skipped() {
        let (mut map, tiles) = corridor();
        map.set_backpointer(tiles[1], Some(TileId(99)));

        assert_eq!(
            build_path(&map, &Pose::default(), tiles[3], &MovementOptions::default()),
            Err(MovementError::NoPathToTarget(tiles[3]))
        );
    }

    #[test]
    fn path_starts_at_the_actor_and_ends_on_the_target() {
        let (map, tiles) = corridor();
        let actor = Pose::at(Vec3::new(10.0, 0.0, 5.0));

        let path = build_path(&map, &actor, tiles[3], &MovementOptions::default()).unwrap();
        assert_eq!(path.points().first(), Some(&actor.position));
        assert_eq!(path.points().last(), Some(&Vec3::new(300.0, 0.0, 0.0)));
        // Straight open corridor collapses to a single segment.
        assert_eq!(path.points().len(), 2);
    }

    #[test]
    fn disabling_string_pulling_keeps_every_tile() {
        let (map, tiles) = corridor();
        let options = MovementOptions {
            string_pull: false,
            ..MovementOptions::default()
        };

        let path = build_path(&map, &Pose::default(), tiles[3], &options).unwrap();
        assert_eq!(path.points().len(), 4);
        assert!((path.length() - 300.0).abs() < EPS);
    }

    #[test]
    fn off_grid_actor_is_rejected() {
        let (map, tiles) = corridor();
        let actor = Pose::at(Vec3::new(0.0, 0.0, 900.0));

        assert_eq!(
            build_path(&map, &actor, tiles[3], &MovementOptions::default()),
            Err(MovementError::NotOnGrid)
        );
    }

    #[test]
    fn unreachable_target_is_rejected() {
        let (mut map, tiles) = corridor();
        let island = map.add_floor(Vec3::new(0.0, 0.0, 500.0));

        assert_eq!(
            build_path(&map, &Pose::default(), island, &MovementOptions::default()),
            Err(MovementError::NoPathToTarget(island))
        );
        map.set_reachable(tiles[2], false);
        assert_eq!(
            build_path(&map, &Pose::default(), tiles[2], &MovementOptions::default()),
            Err(MovementError::NoPathToTarget(tiles[2]))
        );
    }

    #[test]
    fn moving_onto_the_current_tile_is_degenerate() {
        let (map, tiles) = corridor();

        assert_eq!(
            build_path(&map, &Pose::default(), tiles[0], &MovementOptions::default()),
            Err(MovementError::DegeneratePath)
        );
    }

    #[test]
    fn ladder_adds_its_climb_points() {
        let mut map = TileMap::new(100.0);
        let start = map.add_floor(Vec3::new(0.0, 0.0, 0.0));
        let ladder = map.add_ladder(Vec3::new(100.0, 100.0, 0.0), 200.0, Rotator::ZERO);
        let top = map.add_floor(Vec3::new(200.0, 200.0, 0.0));
        map.link_chain(&[start, ladder, top]);

        let path = build_path(&map, &Pose::default(), top, &MovementOptions::default()).unwrap();
        assert_eq!(
            path.points(),
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(100.0, 0.0, 0.0),
                Vec3::new(100.0, 200.0, 0.0),
                Vec3::new(200.0, 200.0, 0.0),
            ]
        );
    }

    #[test]
    fn footing_lookup_needs_a_climbing_mode() {
        let (map, tiles) = corridor();
        // Feet hovering above the first tile, as at the top of a climb.
        let actor = Pose::at(Vec3::new(0.0, 60.0, 0.0));

        assert!(build_path(&map, &actor, tiles[3], &MovementOptions::default()).is_ok());

        let walk_only = MovementOptions {
            available_modes: AvailableModes::only(&[MovementMode::Walking]),
            ..MovementOptions::default()
        };
        assert_eq!(
            build_path(&map, &actor, tiles[3], &walk_only),
            Err(MovementError::NotOnGrid)
        );
    }
}
