//! Collision demo application
//!
//! Rolls one sphere toward another above a ground plane and reports the
//! first frame each pair of meshes touches, plus the shape of every
//! hierarchy involved.

mod config;
mod shapes;

use std::path::Path;
use std::time::Instant;

use log::{info, warn, LevelFilter};
use sphere_bvh::prelude::*;
use thiserror::Error;

use crate::config::DemoConfig;

const CONFIG_FILES: [&str; 2] = ["collision_demo.toml", "collision_demo.ron"];

#[derive(Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] sphere_bvh::config::ConfigError),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// First frame at which a pair of models was found touching
#[derive(Default)]
struct FirstContact {
    frame: Option<u32>,
}

impl FirstContact {
    fn record(&mut self, label: &str, frame: u32, time: f32, report: &CollisionReport) {
        if !report.colliding || self.frame.is_some() {
            return;
        }
        self.frame = Some(frame);
        info!(
            "{} contact at frame {} (t = {:.3}s): triangles {:?}, {} volume tests, {} leaf tests",
            label, frame, time, report.contact, report.volume_tests, report.leaf_tests
        );
    }
}

fn load_config() -> Result<DemoConfig, DemoError> {
    match CONFIG_FILES.iter().find(|path| Path::new(path).exists()) {
        Some(path) => Ok(DemoConfig::load_from_file(path)?),
        None => Ok(DemoConfig::default()),
    }
}

fn main() -> Result<(), DemoError> {
    let config = load_config()?;
    let level = config.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    info!("=== Sphere BVH Collision Demo ===");
    if CONFIG_FILES.iter().all(|path| !Path::new(path).exists()) {
        info!("No configuration file found, using defaults");
    }

    let sphere_mesh = shapes::uv_sphere(config.sphere_radius, config.rings, config.segments)?;
    let ground_mesh = shapes::grid_plane(config.ground_size, config.ground_divisions)?;

    let build_start = Instant::now();
    let sphere: BvhModel = BvhModel::new(&sphere_mesh);
    let ground: BvhModel = BvhModel::new(&ground_mesh);
    info!("Built hierarchies in {:?}", build_start.elapsed());
    info!("Sphere ({} triangles): {}", sphere_mesh.triangle_count(), sphere.bvh().stats());
    info!("Ground ({} triangles): {}", ground_mesh.triangle_count(), ground.bvh().stats());

    if let Some(path) = &config.dotgraph_path {
        std::fs::write(path, sphere.bvh().dotgraph())?;
        info!("Wrote sphere hierarchy graph to {}", path);
    }

    let query = CollisionQuery::new(config.collision);
    let radius = config.sphere_radius;
    let resting = Transform::identity().to_matrix();
    let ground_height = -(radius + 0.5);
    let ground_transform = Transform::from_position(Vec3::new(0.0, ground_height, 0.0)).to_matrix();

    let mut sphere_contact = FirstContact::default();
    let mut ground_contact = FirstContact::default();
    let mut total_volume_tests = 0;

    for frame in 0..config.max_frames {
        let time = frame as f32 * config.time_step;
        let travelled = config.speed * time;

        // Rolls toward the resting sphere while slowly sinking
        let rolling = Transform::from_position_rotation(
            Vec3::new(config.start_distance - travelled, -config.sink_rate * time, 0.0),
            Quat::from_axis_angle(&Vec3::z_axis(), travelled / radius),
        )
        .to_matrix();

        let against_sphere = query.query(&sphere, &sphere, &resting, &rolling);
        let against_ground = query.query(&sphere, &ground, &rolling, &ground_transform);
        total_volume_tests += against_sphere.volume_tests + against_ground.volume_tests;

        sphere_contact.record("Sphere/sphere", frame, time, &against_sphere);
        ground_contact.record("Sphere/ground", frame, time, &against_ground);

        if sphere_contact.frame.is_some() && ground_contact.frame.is_some() {
            break;
        }
    }

    if sphere_contact.frame.is_none() {
        warn!("Spheres never touched within {} frames", config.max_frames);
    }
    if ground_contact.frame.is_none() {
        warn!("Sphere never reached the ground within {} frames", config.max_frames);
    }
    info!("Simulation finished after {} volume tests", total_volume_tests);

    Ok(())
}
