use std::path::{Path, PathBuf};

use aimview_common::{Rect, ScreenPoint, SurfaceSize};
use aimview_render::{
    AimviewConfig, AimviewRenderer, BasisProjector, DrawList, PerspectiveCamera, Projector,
    ViewBasis, ViewSource,
};
use aimview_world::{
    ExitPoint, ExitStatus, Hazard, LootItem, Observer, Player, PlayerKind, Skeleton,
    WorldSnapshot,
};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aimview-cli", about = "CLI tool for the aimview overlay")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CameraMode {
    /// Build the view basis from the observer's orientation
    #[value(name = "self")]
    SelfDerived,
    /// Project through a perspective camera placed at the observer
    External,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Render one frame of a snapshot file and print the draw list
    Render {
        /// World snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Overlay config (YAML, or JSON by extension)
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "400")]
        width: u32,
        #[arg(long, default_value = "400")]
        height: u32,
        #[arg(long, value_enum, default_value = "self")]
        camera: CameraMode,
    },
    /// Render a built-in scene
    Demo {
        #[arg(long, value_enum, default_value = "self")]
        camera: CameraMode,
        /// Also write the scene as a snapshot file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Project one world point with the self-derived view
    Project {
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        point: Vec<f32>,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        yaw: f32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        pitch: f32,
        #[arg(long, default_value = "400")]
        width: u32,
        #[arg(long, default_value = "400")]
        height: u32,
        /// Overlay config; supplies the projection's fov divisor
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("aimview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", aimview_common::crate_info());
            println!("world: {}", aimview_world::crate_info());
            println!("render: {}", aimview_render::crate_info());
        }
        Commands::Render {
            snapshot,
            config,
            width,
            height,
            camera,
        } => {
            let world = WorldSnapshot::load(&snapshot)
                .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
            let config = load_config(config.as_deref())?;
            tracing::info!(
                snapshot = %snapshot.display(),
                entities = world.entity_count(),
                "rendering snapshot"
            );
            render(&world, &config, SurfaceSize::new(width, height), camera);
        }
        Commands::Demo { camera, out } => {
            let world = demo_scene();
            if let Some(path) = out {
                world
                    .save(&path)
                    .with_context(|| format!("writing snapshot {}", path.display()))?;
                println!("Wrote demo snapshot to {}", path.display());
            }
            render(
                &world,
                &AimviewConfig::default(),
                SurfaceSize::new(400, 400),
                camera,
            );
        }
        Commands::Project {
            point,
            yaw,
            pitch,
            width,
            height,
            config,
        } => {
            let [x, y, z] = point[..] else {
                anyhow::bail!("--point takes exactly three values");
            };
            let config = load_config(config.as_deref())?;
            let size = SurfaceSize::new(width, height);
            match project_point(Vec3::new(x, y, z), yaw, pitch, size, &config) {
                Some(p) => println!("({x}, {y}, {z}) -> ({:.2}, {:.2})", p.x, p.y),
                None => println!("({x}, {y}, {z}) -> not visible"),
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AimviewConfig> {
    match path {
        Some(path) => AimviewConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(AimviewConfig::default()),
    }
}

/// Self-derived projection from an observer at the origin.
fn project_point(
    point: Vec3,
    yaw: f32,
    pitch: f32,
    size: SurfaceSize,
    config: &AimviewConfig,
) -> Option<ScreenPoint> {
    let basis = ViewBasis::from_angles(Vec3::ZERO, yaw, pitch);
    BasisProjector::new(basis, size, config.projection.fov_divisor).project(point)
}

fn render(world: &WorldSnapshot, config: &AimviewConfig, size: SurfaceSize, mode: CameraMode) {
    let view = match (mode, world.observer) {
        (CameraMode::External, Some(observer)) => {
            ViewSource::external(observer_camera(&observer, size))
        }
        _ => ViewSource::SelfDerived {
            fov_divisor: config.projection.fov_divisor,
        },
    };
    let mut renderer = AimviewRenderer::new(view, size, config.ui.ui_scale);
    let mut host = DrawList::new();
    renderer.render(world, config, &mut host, Rect::from_size(size));

    println!(
        "Snapshot: in_session={}, entities={}, view={}",
        world.in_session,
        world.entity_count(),
        renderer.view().label()
    );
    print!("{host}");
    println!("{}", renderer.last_frame());
}

/// A perspective camera standing where the observer stands, looking where it looks.
fn observer_camera(observer: &Observer, size: SurfaceSize) -> PerspectiveCamera {
    let basis = ViewBasis::from_observer(observer);
    let mut camera = PerspectiveCamera {
        position: observer.position,
        viewport: Rect::from_size(size),
        ..PerspectiveCamera::default()
    };
    camera.look_at(observer.position + basis.forward);
    camera
}

fn demo_scene() -> WorldSnapshot {
    let ahead = |x: f32, z: f32| Vec3::new(x, 0.0, z);

    let mut scav = Player::new("Scav", PlayerKind::AiScav, ahead(-2.0, 12.0));
    scav.skeleton = Skeleton::standing(scav.position);
    let mut boss = Player::new("Boss", PlayerKind::AiBoss, ahead(3.0, 30.0));
    boss.skeleton = Skeleton::standing(boss.position);
    boss.is_focused = true;

    let mut gpu = LootItem::new("Graphics card", ahead(1.0, 6.0));
    gpu.short_name = "GPU".into();
    gpu.custom_color = Some("#FFD700".into());
    let mut folder = LootItem::new("Secure folder", ahead(-1.5, 9.0));
    folder.is_quest_item = true;

    WorldSnapshot::in_session(Observer::new(Vec3::new(0.0, 1.6, 0.0), 0.0, 0.0))
        .with_player(scav)
        .with_player(boss)
        .with_loot(gpu)
        .with_loot(folder)
        .with_loot(LootItem::new("Far away bolts", ahead(0.0, 80.0)))
        .with_hazard(Hazard::grenade(ahead(2.0, 5.0)))
        .with_hazard(Hazard::tripwire(ahead(-3.0, 15.0), true))
        .with_exit(ExitPoint::new("Gate", ahead(-4.0, 20.0), ExitStatus::Open))
        .with_exit(ExitPoint::new("Tunnel", ahead(4.0, 18.0), ExitStatus::Pending))
}
