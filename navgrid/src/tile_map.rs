//! In-memory square-tile grid.
//!
//! `TileMap` implements [`NavGrid`] for tools, tests and the sandbox. It stores tiles on a
//! square lattice of `tile_size` cells, answers obstruction queries by sweeping the mover's
//! capsule against a fixed set of static obstacles, and leaves the path search to the caller:
//! backpointers and the reachable set are assigned explicitly.

use std::{collections::HashSet, rc::Rc};

use crate::{
    CapsuleSpec, NavGrid, NavTile, Pose, Rotator, TileId, Vec3,
    collision::{self, StaticShape, WorldAccel},
};

/// Vertical slack when matching a position to a tile's floor (units).
pub const DEFAULT_VERTICAL_TOLERANCE: f32 = 10.0;

/// Static obstacles shared by every tile of a map.
#[derive(Debug, Default)]
pub struct Obstacles {
    statics: Vec<StaticShape>,
    accel: WorldAccel,
}

impl Obstacles {
    pub fn new(statics: Vec<StaticShape>) -> Self {
        let accel = collision::build_world_accel(&statics);
        Self { statics, accel }
    }

    pub fn blocked(&self, footprint: CapsuleSpec, from: Vec3, to: Vec3) -> bool {
        collision::footprint_blocked(&self.statics, &self.accel, footprint, from, to)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileKind {
    Floor,
    /// A vertical ladder centred on the tile location, spanning `height` units.
    Ladder { height: f32 },
}

#[derive(Clone, Debug)]
pub struct MapTile {
    id: TileId,
    location: Vec3,
    rotation: Rotator,
    kind: TileKind,
    backpointer: Option<TileId>,
    obstacles: Rc<Obstacles>,
}

impl MapTile {
    #[inline]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Lowest and highest standing heights on this tile.
    fn vertical_span(&self) -> (f32, f32) {
        match self.kind {
            TileKind::Floor => (self.location.y, self.location.y),
            TileKind::Ladder { height } => (
                self.location.y - height * 0.5,
                self.location.y + height * 0.5,
            ),
        }
    }
}

impl NavTile for MapTile {
    fn backpointer(&self) -> Option<TileId> {
        self.backpointer
    }

    fn is_ladder(&self) -> bool {
        matches!(self.kind, TileKind::Ladder { .. })
    }

    fn obstructed(&self, from: Vec3, footprint: &CapsuleSpec) -> bool {
        self.obstacles
            .blocked(*footprint, from, self.pawn_location())
    }

    fn location(&self) -> Vec3 {
        self.location
    }

    fn pawn_location(&self) -> Vec3 {
        self.location
    }

    fn rotation(&self) -> Rotator {
        self.rotation
    }

    /// Ladders are entered at the end nearest to `from` and left at the other one, so the
    /// mover lines up with the ladder first and then climbs straight.
    fn path_points(&self, from: Vec3, _is_last: bool) -> Vec<Vec3> {
        match self.kind {
            TileKind::Floor => vec![self.pawn_location()],
            TileKind::Ladder { .. } => {
                let (bottom, top) = self.vertical_span();
                let at = |y: f32| Vec3::new(self.location.x, y, self.location.z);
                if from.y <= self.location.y {
                    vec![at(bottom), at(top)]
                } else {
                    vec![at(top), at(bottom)]
                }
            }
        }
    }
}

/// A square-lattice grid with explicit backpointers.
#[derive(Debug)]
pub struct TileMap {
    tile_size: f32,
    vertical_tolerance: f32,
    tiles: Vec<MapTile>,
    reachable: HashSet<TileId>,
    obstacles: Rc<Obstacles>,
}

impl TileMap {
    pub fn new(tile_size: f32) -> Self {
        Self::with_obstacles(tile_size, Vec::new())
    }

    pub fn with_obstacles(tile_size: f32, statics: Vec<StaticShape>) -> Self {
        Self {
            tile_size,
            vertical_tolerance: DEFAULT_VERTICAL_TOLERANCE,
            tiles: Vec::new(),
            reachable: HashSet::new(),
            obstacles: Rc::new(Obstacles::new(statics)),
        }
    }

    pub fn add_floor(&mut self, location: Vec3) -> TileId {
        self.add_tile(location, Rotator::ZERO, TileKind::Floor)
    }

    /// Add a ladder whose centre is `location`. `rotation` faces away from the wall the
    /// ladder leans on.
    pub fn add_ladder(&mut self, location: Vec3, height: f32, rotation: Rotator) -> TileId {
        self.add_tile(location, rotation, TileKind::Ladder { height })
    }

    pub fn add_tile(&mut self, location: Vec3, rotation: Rotator, kind: TileKind) -> TileId {
        let id = TileId(self.tiles.len() as u32);
        self.tiles.push(MapTile {
            id,
            location,
            rotation,
            kind,
            backpointer: None,
            obstacles: Rc::clone(&self.obstacles),
        });
        id
    }

    pub fn set_backpointer(&mut self, tile: TileId, previous: Option<TileId>) {
        if let Some(t) = self.tiles.get_mut(tile.0 as usize) {
            t.backpointer = previous;
        }
    }

    pub fn set_reachable(&mut self, tile: TileId, reachable: bool) {
        if reachable {
            self.reachable.insert(tile);
        } else {
            self.reachable.remove(&tile);
        }
    }

    /// Record `chain` as a search result: each tile points back at its predecessor, the first
    /// tile is the origin, and every tile in the chain becomes reachable.
    pub fn link_chain(&mut self, chain: &[TileId]) {
        let mut previous = None;
        for &tile in chain {
            self.set_backpointer(tile, previous);
            self.set_reachable(tile, true);
            previous = Some(tile);
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = &MapTile> {
        self.tiles.iter()
    }

    fn covers_horizontally(&self, tile: &MapTile, position: Vec3) -> Option<f32> {
        let half = self.tile_size * 0.5;
        let dx = (position.x - tile.location.x).abs();
        let dz = (position.z - tile.location.z).abs();
        (dx <= half && dz <= half).then_some(dx * dx + dz * dz)
    }
}

impl NavGrid for TileMap {
    type Tile = MapTile;

    fn tile(&self, id: TileId) -> Option<&MapTile> {
        self.tiles.get(id.0 as usize)
    }

    fn tile_at(&self, position: Vec3, strict: bool) -> Option<TileId> {
        let tol = self.vertical_tolerance;
        let candidates = self.tiles.iter().filter_map(|tile| {
            let planar = self.covers_horizontally(tile, position)?;
            let (bottom, top) = tile.vertical_span();
            let fits = if strict {
                position.y >= bottom - tol && position.y <= top + tol
            } else {
                position.y >= bottom - tol
            };
            fits.then_some((tile, planar, top))
        });

        if strict {
            candidates
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(tile, ..)| tile.id)
        } else {
            // Footing: the highest surface not above the position.
            candidates
                .max_by(|a, b| a.2.min(position.y).total_cmp(&b.2.min(position.y)))
                .map(|(tile, ..)| tile.id)
        }
    }

    fn tiles_in_range(&self, _actor: &Pose, _use_movement_range: bool) -> HashSet<TileId> {
        self.reachable.clone()
    }
}

/// Four level floor tiles 100 units apart along +X, linked origin first and all reachable.
#[cfg(test)]
pub(crate) fn corridor() -> (TileMap, Vec<TileId>) {
    let mut map = TileMap::new(100.0);
    let tiles: Vec<_> = (0..4)
        .map(|i| map.add_floor(Vec3::new(i as f32 * 100.0, 0.0, 0.0)))
        .collect();
    map.link_chain(&tiles);
    (map, tiles)
}
