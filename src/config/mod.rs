use anyhow::{Context, Result, bail};
use log::{debug, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::GeoCoordinate;
use crate::geometry::{Boundary, simplify_ring};

fn default_name() -> String {
    "fence".to_string()
}
fn default_verbose() -> bool {
    false
}
fn default_json() -> bool {
    false
}

/// Settings file, e.g.
///
/// ```toml
/// verbose = true
///
/// [fence]
/// name = "Office"
/// vertices = [
///     { lat = 40.7120, lon = -74.0070 },
///     { lat = 40.7120, lon = -74.0060 },
///     { lat = 40.7130, lon = -74.0060 },
/// ]
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub fence: Option<FenceConfig>,
    #[serde(default)]
    pub fixes: Option<PathBuf>,
    #[serde(default)]
    pub simplify: Option<f32>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default = "default_json")]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FenceConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub vertices: Vec<GeoCoordinate>,
}

impl FenceConfig {
    /// Vertex ring ready for a `Boundary`
    ///
    /// Fence files exported from mapping tools often repeat the first vertex
    /// at the end; that duplicate is dropped because the ring is closed
    /// implicitly.
    pub fn ring(&self) -> Vec<GeoCoordinate> {
        let mut ring = self.vertices.clone();
        if ring.len() > 1 && ring.first() == ring.last() {
            warn!(
                "Fence '{}' repeats its first vertex at the end, dropping the duplicate",
                self.name
            );
            ring.pop();
        }
        ring
    }
}

impl FileConfig {
    /// Read and parse a config file that the user asked for explicitly
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context(format!("Failed to parse config file: {:?}", path))
    }

    /// Search the usual locations and return the first config that parses
    pub fn load() -> Option<Self> {
        Self::load_from(&get_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> Option<Self> {
        for path in paths {
            if !path.exists() {
                continue;
            }
            let contents = match std::fs::read_to_string(path) {
                Ok(contents) => contents,
                Err(e) => {
                    warn!("Failed to read config file {:?}: {}", path, e);
                    continue;
                }
            };
            match toml::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded config from {:?}", path);
                    return Some(config);
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}", path, e);
                }
            }
        }
        None
    }
}

/// Values given on the command line; they win over the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub fixes: Option<PathBuf>,
    pub simplify: Option<f32>,
    pub verbose: bool,
    pub json: bool,
}

/// Effective settings after merging the command line over the config file
#[derive(Debug, Clone)]
pub struct Settings {
    pub fence: Option<FenceConfig>,
    pub fixes: Option<PathBuf>,
    pub simplify: Option<f32>,
    pub verbose: bool,
    pub json: bool,
}

impl Settings {
    pub fn resolve(file: Option<FileConfig>, cli: Overrides) -> Self {
        let file = file.unwrap_or_default();
        Self {
            fence: file.fence,
            fixes: cli.fixes.or(file.fixes),
            simplify: cli.simplify.or(file.simplify),
            verbose: cli.verbose || file.verbose,
            json: cli.json || file.json,
        }
    }

    /// The configured fence ring, simplified if requested and checked to
    /// enclose an area
    pub fn fence_ring(&self) -> Result<(&str, Vec<GeoCoordinate>)> {
        let Some(fence) = self.fence.as_ref() else {
            bail!(
                "No fence configured. Add a [fence] table with vertices to geofence.toml or pass --config"
            );
        };

        let mut ring = fence.ring();
        if let Some(epsilon) = self.simplify {
            let before = ring.len();
            ring = simplify_ring(&ring, epsilon);
            debug!(
                "Simplified fence '{}': {} -> {} vertices",
                fence.name,
                before,
                ring.len()
            );
        }

        Boundary::try_new(&ring)
            .with_context(|| format!("Fence '{}' is not a usable polygon", fence.name))?;

        Ok((fence.name.as_str(), ring))
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("geofence.toml"));
    paths.push(PathBuf::from(".geofence.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("geofence").join("config.toml"));
        paths.push(config_dir.join("geofence.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".geofence.toml"));
    }

    paths
}
