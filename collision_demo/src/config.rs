//! Demo settings

use serde::{Deserialize, Serialize};
use sphere_bvh::prelude::{CollisionConfig, Config};

/// Scene and simulation settings, loaded from `collision_demo.toml` or `.ron`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Default log filter, still overridable through `RUST_LOG`
    pub log_level: String,
    /// Radius of both spheres
    pub sphere_radius: f32,
    /// Latitude bands per sphere
    pub rings: u32,
    /// Longitude slices per sphere
    pub segments: u32,
    /// Edge length of the ground plane
    pub ground_size: f32,
    /// Grid cells along each ground edge
    pub ground_divisions: u32,
    /// Starting distance between the sphere centers
    pub start_distance: f32,
    /// Approach speed in units per second
    pub speed: f32,
    /// Rate at which the moving sphere sinks toward the ground
    pub sink_rate: f32,
    /// Seconds per simulation step
    pub time_step: f32,
    /// Simulation stops after this many steps
    pub max_frames: u32,
    /// Collision query settings
    pub collision: CollisionConfig,
    /// Where to write the sphere hierarchy as Graphviz, if anywhere
    pub dotgraph_path: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            sphere_radius: 1.0,
            rings: 16,
            segments: 24,
            ground_size: 20.0,
            ground_divisions: 20,
            start_distance: 6.0,
            speed: 1.5,
            sink_rate: 0.1,
            time_step: 1.0 / 60.0,
            max_frames: 600,
            collision: CollisionConfig::default(),
            dotgraph_path: None,
        }
    }
}

impl Config for DemoConfig {}
