//! The grid collaborator, seen from the movement controller.
//!
//! Grids own their tiles, run the path search and fill in backpointers. The controller only
//! reads: it resolves positions to tiles, asks which tiles are reachable this turn and walks
//! backpointer chains.

use std::collections::HashSet;

use crate::{CapsuleSpec, Pose, Rotator, Vec3};

/// Opaque handle to a tile owned by a [`NavGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

pub trait NavTile {
    /// Previous tile on the best known path to this one, `None` at the search origin.
    fn backpointer(&self) -> Option<TileId>;

    fn is_ladder(&self) -> bool;

    /// Whether a mover with `footprint` standing at `from` is blocked from walking straight
    /// to this tile.
    fn obstructed(&self, from: Vec3, footprint: &CapsuleSpec) -> bool;

    /// World location of the tile itself.
    fn location(&self) -> Vec3;

    /// Where a mover occupying this tile stands.
    fn pawn_location(&self) -> Vec3;

    fn rotation(&self) -> Rotator;

    /// Path points contributed when this tile is entered from `from`.
    ///
    /// Plain tiles contribute their pawn location. Tiles with a traversal shape of their own
    /// (ladders) may contribute several.
    fn path_points(&self, _from: Vec3, _is_last: bool) -> Vec<Vec3> {
        vec![self.pawn_location()]
    }
}

pub trait NavGrid {
    type Tile: NavTile;

    fn tile(&self, id: TileId) -> Option<&Self::Tile>;

    /// Resolve a position to a tile.
    ///
    /// A strict match requires the position to be level with the tile. A non-strict match
    /// also accepts tiles below the position, which is how a mover finds its footing at the
    /// top of a climb.
    fn tile_at(&self, position: Vec3, strict: bool) -> Option<TileId>;

    /// Tiles the mover at `actor` can reach this turn.
    fn tiles_in_range(&self, actor: &Pose, use_movement_range: bool) -> HashSet<TileId>;
}

/// Tile under `position`: a strict match first, then (when `allow_footing`) any tile the
/// position stands above. Movers that can climb need the second lookup at the top of a
/// ladder, where the feet are briefly higher than the floor they are stepping onto.
pub fn resolve_tile<G: NavGrid>(grid: &G, position: Vec3, allow_footing: bool) -> Option<TileId> {
    grid.tile_at(position, true).or_else(|| {
        if allow_footing {
            grid.tile_at(position, false)
        } else {
            None
        }
    })
}
