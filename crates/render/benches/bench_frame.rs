use std::hint::black_box;
use std::time::Instant;

use aimview_common::{Rect, SurfaceSize};
use aimview_render::{AimviewConfig, AimviewRenderer, DrawList, PerspectiveCamera, ViewSource};
use aimview_world::{
    ExitPoint, ExitStatus, Hazard, LootItem, Observer, Player, PlayerKind, Skeleton,
    WorldSnapshot,
};
use glam::Vec3;

const SIZE: SurfaceSize = SurfaceSize::new(512, 512);

fn make_world(entity_count: usize) -> WorldSnapshot {
    let mut world = WorldSnapshot::in_session(Observer::new(Vec3::ZERO, 0.0, 0.0));
    for i in 0..entity_count {
        // Spread entities in a cone in front of the observer, 2..40m out.
        let z = 2.0 + (i % 39) as f32;
        let x = ((i * 7) % 11) as f32 - 5.0;
        let position = Vec3::new(x, 0.0, z);
        match i % 4 {
            0 => {
                let mut player = Player::new(format!("p{i}"), PlayerKind::AiScav, position);
                player.skeleton = Skeleton::standing(position);
                world.players.push(player);
            }
            1 => world.loot.push(LootItem::new(format!("item{i}"), position)),
            2 => world.hazards.push(Hazard::grenade(position)),
            _ => world
                .exits
                .push(ExitPoint::new(format!("exit{i}"), position, ExitStatus::Open)),
        }
    }
    world
}

fn bench_render(label: &str, view: ViewSource, entity_count: usize, iterations: usize) {
    let world = make_world(entity_count);
    let config = AimviewConfig::default();
    let mut renderer = AimviewRenderer::new(view, SIZE, 1.0);

    let start = Instant::now();
    for _ in 0..iterations {
        let mut host = DrawList::with_capacity(entity_count * 24);
        renderer.render(
            black_box(&world),
            &config,
            &mut host,
            black_box(Rect::from_size(SIZE)),
        );
        black_box(host);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    let stats = renderer.last_frame();
    println!(
        "  {label} ({entity_count} entities, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}, drawn {}",
        stats.total_drawn()
    );
}

fn main() {
    println!("=== Aimview Frame Benchmarks ===\n");

    println!("Self-derived view:");
    bench_render("frame", ViewSource::self_derived(), 100, 1000);
    bench_render("frame", ViewSource::self_derived(), 1000, 100);
    bench_render("frame", ViewSource::self_derived(), 10000, 10);

    println!("\nExternal camera:");
    let camera = || ViewSource::external(PerspectiveCamera::default());
    bench_render("frame", camera(), 100, 1000);
    bench_render("frame", camera(), 1000, 100);

    println!("\n=== Done ===");
}
