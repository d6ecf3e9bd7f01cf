use crate::{CapsuleSpec, NavGrid, NavTile, TileId};

/// Drop tiles a mover can skip by walking in a straight line.
///
/// Walks the chain keeping an anchor (the last tile that must stay). Tile `i` forces tile
/// `i - 1` to stay when the step from the anchor to `i` climbs more than `max_step_height`
/// or is obstructed for `footprint`. Ladders are never shortcut: a ladder and both of its
/// neighbours always stay. The first and last tiles always stay.
///
/// Chains of two tiles or fewer come back unchanged. Tiles missing from the grid are kept
/// but never used as a shortcut anchor test.
pub fn string_pull<G: NavGrid>(
    grid: &G,
    chain: &[TileId],
    footprint: &CapsuleSpec,
    max_step_height: f32,
) -> Vec<TileId> {
    if chain.len() <= 2 {
        return chain.to_vec();
    }

    let n = chain.len();
    let is_ladder = |i: usize| grid.tile(chain[i]).is_some_and(|t| t.is_ladder());

    let mut out: Vec<TileId> = Vec::with_capacity(n);
    let keep = |tile: TileId, out: &mut Vec<TileId>| {
        if !out.contains(&tile) {
            out.push(tile);
        }
    };

    keep(chain[0], &mut out);
    let mut anchor = 0usize;
    let mut i = 1usize;
    while i < n {
        if is_ladder(i) {
            keep(chain[i - 1], &mut out);
            keep(chain[i], &mut out);
            if i + 1 < n {
                keep(chain[i + 1], &mut out);
            }
            if i + 1 < n && is_ladder(i + 1) {
                // Back-to-back ladders: the next one still needs its own neighbours kept.
                anchor = i;
                i += 1;
            } else {
                anchor = (i + 1).min(n - 1);
                i += 2;
            }
            continue;
        }

        if needs_waypoint(grid, chain[anchor], chain[i], footprint, max_step_height) {
            keep(chain[i - 1], &mut out);
            anchor = i - 1;
        }
        i += 1;
    }
    keep(chain[n - 1], &mut out);

    out
}

fn needs_waypoint<G: NavGrid>(
    grid: &G,
    anchor: TileId,
    candidate: TileId,
    footprint: &CapsuleSpec,
    max_step_height: f32,
) -> bool {
    let (Some(anchor), Some(candidate)) = (grid.tile(anchor), grid.tile(candidate)) else {
        return true;
    };
    let from = anchor.pawn_location();
    (from.y - candidate.pawn_location().y).abs() > max_step_height
        || candidate.obstructed(from, footprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Rotator, Vec3,
        collision::{Quat, cuboid_from_pose},
        constants::MAX_STEP_HEIGHT,
        tile_map::TileMap,
    };

    const FOOTPRINT: CapsuleSpec = CapsuleSpec::new(30.0, 50.0);

    fn row(map: &mut TileMap, xs: &[f32]) -> Vec<TileId> {
        xs.iter()
            .map(|&x| map.add_floor(Vec3::new(x, 0.0, 0.0)))
            .collect()
    }

    fn assert_no_duplicates(path: &[TileId]) {
        for (i, a) in path.iter().enumerate() {
            assert!(!path[i + 1..].contains(a), "{a:?} repeated in {path:?}");
        }
    }

    #[test]
    fn short_chains_are_returned_unchanged() {
        let mut map = TileMap::new(100.0);
        let tiles = row(&mut map, &[0.0, 100.0]);

        assert_eq!(string_pull(&map, &tiles, &FOOTPRINT, MAX_STEP_HEIGHT), tiles);
        assert_eq!(string_pull(&map, &tiles[..1], &FOOTPRINT, MAX_STEP_HEIGHT), tiles[..1]);
        assert!(string_pull(&map, &[], &FOOTPRINT, MAX_STEP_HEIGHT).is_empty());
    }

    #[test]
    fn open_straight_line_collapses_to_endpoints() {
        let mut map = TileMap::new(100.0);
        let tiles = row(&mut map, &[0.0, 100.0, 200.0, 300.0]);

        let out = string_pull(&map, &tiles, &FOOTPRINT, MAX_STEP_HEIGHT);
        assert_eq!(out, vec![tiles[0], tiles[3]]);
    }

    #[test]
    fn obstruction_keeps_the_corner_tile() {
        // An L-shaped route around a pillar sitting inside the corner.
        let pillar = cuboid_from_pose(
            Vec3::new(20.0, 100.0, 20.0),
            Vec3::new(60.0, 100.0, 100.0),
            Quat::identity(),
        );
        let mut map = TileMap::with_obstacles(100.0, vec![pillar]);
        let a = map.add_floor(Vec3::new(0.0, 0.0, 0.0));
        let b = map.add_floor(Vec3::new(0.0, 0.0, 100.0));
        let c = map.add_floor(Vec3::new(0.0, 0.0, 200.0));
        let d = map.add_floor(Vec3::new(100.0, 0.0, 200.0));
        let e = map.add_floor(Vec3::new(200.0, 0.0, 200.0));

        let out = string_pull(&map, &[a, b, c, d, e], &FOOTPRINT, MAX_STEP_HEIGHT);
        assert_eq!(out, vec![a, c, e]);
    }

    #[test]
    fn height_change_keeps_the_tile_before_the_step() {
        let mut map = TileMap::new(100.0);
        let a = map.add_floor(Vec3::new(0.0, 0.0, 0.0));
        let b = map.add_floor(Vec3::new(100.0, 0.0, 0.0));
        let c = map.add_floor(Vec3::new(200.0, 10.0, 0.0));
        let d = map.add_floor(Vec3::new(300.0, 40.0, 0.0));
        let e = map.add_floor(Vec3::new(400.0, 40.0, 0.0));

        let out = string_pull(&map, &[a, b, c, d, e], &FOOTPRINT, MAX_STEP_HEIGHT);
        // a -> d rises 40 > 30, so c stays; c -> e rises 30 which is allowed.
        assert_eq!(out, vec![a, c, e]);
    }

    #[test]
    fn ladder_and_its_neighbours_are_never_elided() {
        // start -> A -> B -> C(ladder) -> target, all level and open.
        let mut map = TileMap::new(100.0);
        let start = map.add_floor(Vec3::new(0.0, 0.0, 0.0));
        let a = map.add_floor(Vec3::new(100.0, 0.0, 0.0));
        let b = map.add_floor(Vec3::new(200.0, 0.0, 0.0));
        let ladder = map.add_ladder(Vec3::new(300.0, 0.0, 0.0), 20.0, Rotator::ZERO);
        let target = map.add_floor(Vec3::new(400.0, 0.0, 0.0));

        let out = string_pull(
            &map,
            &[start, a, b, ladder, target],
            &FOOTPRINT,
            MAX_STEP_HEIGHT,
        );
        assert_eq!(out, vec![start, b, ladder, target]);
    }

    #[test]
    fn stacked_ladders_keep_every_neighbour() {
        let mut map = TileMap::new(100.0);
        let start = map.add_floor(Vec3::new(0.0, 0.0, 0.0));
        let a = map.add_floor(Vec3::new(100.0, 0.0, 0.0));
        let l1 = map.add_ladder(Vec3::new(200.0, 0.0, 0.0), 20.0, Rotator::ZERO);
        let l2 = map.add_ladder(Vec3::new(300.0, 0.0, 0.0), 20.0, Rotator::ZERO);
        let after = map.add_floor(Vec3::new(400.0, 0.0, 0.0));
        let x = map.add_floor(Vec3::new(500.0, 0.0, 0.0));
        let end = map.add_floor(Vec3::new(600.0, 0.0, 0.0));

        let out = string_pull(
            &map,
            &[start, a, l1, l2, after, x, end],
            &FOOTPRINT,
            MAX_STEP_HEIGHT,
        );
        assert_eq!(out, vec![start, a, l1, l2, after, end]);
        assert_no_duplicates(&out);
    }

    #[test]
    fn ladder_at_the_end_of_the_chain_keeps_both_ends() {
        let mut map = TileMap::new(100.0);
        let start = map.add_floor(Vec3::new(0.0, 0.0, 0.0));
        let a = map.add_floor(Vec3::new(100.0, 0.0, 0.0));
        let ladder = map.add_ladder(Vec3::new(200.0, 0.0, 0.0), 20.0, Rotator::ZERO);

        let out = string_pull(&map, &[start, a, ladder], &FOOTPRINT, MAX_STEP_HEIGHT);
        assert_eq!(out, vec![start, a, ladder]);
    }
}
