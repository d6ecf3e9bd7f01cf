//! Headless driver for the movement controller.
//!
//! Lays out a small map (an L-shaped corridor around a pillar, then a ladder up to a
//! ledge), walks an actor to the ledge, turns it around and logs what happens. Run with
//! `RUST_LOG=debug` to see mode changes as they occur.

use navgrid::{
    GridMovement, MovementEvent, MovementOptions, MovementPhase, Pose, Rotator, TileId, TileMap,
    Vec3,
    collision::{Quat, cuboid_from_pose},
};

const TICK_RATE: f32 = 60.0;
const MAX_TICKS: usize = 60 * 30;
const LOG_EVERY: usize = 15;

fn build_map() -> (TileMap, Vec<TileId>) {
    let pillar = cuboid_from_pose(
        Vec3::new(20.0, 100.0, 20.0),
        Vec3::new(60.0, 100.0, 100.0),
        Quat::identity(),
    );
    let mut map = TileMap::with_obstacles(100.0, vec![pillar]);

    let mut route = vec![
        map.add_floor(Vec3::new(0.0, 0.0, 0.0)),
        map.add_floor(Vec3::new(0.0, 0.0, 100.0)),
        map.add_floor(Vec3::new(0.0, 0.0, 200.0)),
        map.add_floor(Vec3::new(100.0, 0.0, 200.0)),
        map.add_floor(Vec3::new(200.0, 0.0, 200.0)),
    ];
    route.push(map.add_ladder(
        Vec3::new(300.0, 150.0, 200.0),
        300.0,
        Rotator::from_yaw(180.0),
    ));
    route.push(map.add_floor(Vec3::new(400.0, 300.0, 200.0)));
    route.push(map.add_floor(Vec3::new(500.0, 300.0, 200.0)));
    map.link_chain(&route);

    (map, route)
}

/// Tick until the controller settles. Returns the final pose and the number of ticks.
fn run(movement: &mut GridMovement, map: &TileMap, mut pose: Pose) -> (Pose, usize) {
    let dt = 1.0 / TICK_RATE;
    for tick in 1..=MAX_TICKS {
        pose = movement.advance(map, &pose, dt);

        for event in movement.drain_events() {
            match event {
                MovementEvent::ModeChanged { from, to } => {
                    log::info!("tick {tick}: {from:?} -> {to:?}");
                }
                MovementEvent::Arrived => log::info!("tick {tick}: arrived"),
            }
        }
        if tick % LOG_EVERY == 0 {
            let p = pose.position;
            log::debug!(
                "tick {tick}: pos ({:.1}, {:.1}, {:.1}) yaw {:.1} speed {:.1} {:?}/{:?}",
                p.x,
                p.y,
                p.z,
                pose.rotation.yaw,
                movement.velocity().norm(),
                movement.mode(),
                movement.phase(),
            );
        }
        if movement.phase() == MovementPhase::Done {
            return (pose, tick);
        }
    }
    log::warn!("movement did not settle within {MAX_TICKS} ticks");
    (pose, MAX_TICKS)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (map, route) = build_map();
    let target = *route.last().ok_or("empty route")?;
    let mut movement = GridMovement::new(MovementOptions::default());

    let pose = movement.snap_to_grid(&map, &Pose::at(Vec3::new(12.0, 3.0, -8.0)));
    log::info!(
        "{} tiles in range, target {target:?} reachable: {}",
        movement.tiles_in_range(&map, &pose).len(),
        movement.can_move_to(&map, &pose, target)
    );

    movement.move_to(&map, &pose, target)?;
    log::info!(
        "path: {} points, {:.1} units",
        movement.path().points().len(),
        movement.path().length()
    );
    let (pose, ticks) = run(&mut movement, &map, pose);
    let p = pose.position;
    log::info!("reached ({:.1}, {:.1}, {:.1}) after {ticks} ticks", p.x, p.y, p.z);

    movement.turn_to(Rotator::from_yaw(pose.rotation.yaw + 180.0));
    let (pose, ticks) = run(&mut movement, &map, pose);
    log::info!("facing yaw {:.1} after {ticks} ticks", pose.rotation.yaw);

    Ok(())
}
