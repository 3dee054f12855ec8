//! Map catalog loader.
//!
//! The catalog is a TOML file listing every map with its mask and texture
//! images. Image paths are relative to the catalog file:
//!
//! ```toml
//! start = "isle"
//!
//! [[maps]]
//! name = "isle"
//! mask = "isle_mask.png"
//! texture = "isle_texture.png"
//! start_zone = 1
//!
//! [[maps.interiors]]
//! zone = 1
//! entry = 1
//! mask = "isle_1_1_mask.png"
//! texture = "isle_1_1_texture.png"
//! ```

use std::path::{Path, PathBuf};

use isle_core::{Bitmap, InteriorBlueprint, MapBlueprint, Rgb};
use serde::{Deserialize, Serialize};

use crate::catalog::MapCatalog;
use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogToml {
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    maps: Vec<MapToml>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapToml {
    name: String,
    mask: PathBuf,
    texture: PathBuf,
    #[serde(default = "first_zone")]
    start_zone: u32,
    #[serde(default)]
    interiors: Vec<InteriorToml>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InteriorToml {
    zone: u32,
    entry: u8,
    mask: PathBuf,
    texture: PathBuf,
}

fn first_zone() -> u32 {
    1
}

/// Loader for the map catalog and its images.
pub struct MapLoader;

impl MapLoader {
    /// Load the catalog at `path`, decoding every image it references.
    pub fn load(path: &Path) -> LoadResult<MapCatalog> {
        let content = read_file(path)?;
        let data: CatalogToml = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map catalog TOML: {}", e))?;
        let base = path.parent().unwrap_or(Path::new("."));

        let mut catalog = MapCatalog::new();
        for map in data.maps {
            let mut blueprint = MapBlueprint::new(
                map.name.clone(),
                Self::load_bitmap(&base.join(&map.mask))?,
                Self::load_bitmap(&base.join(&map.texture))?,
                map.start_zone,
            );
            for interior in map.interiors {
                blueprint = blueprint.with_interior(InteriorBlueprint {
                    zone: interior.zone,
                    entry: interior.entry,
                    mask: Self::load_bitmap(&base.join(&interior.mask))?,
                    texture: Self::load_bitmap(&base.join(&interior.texture))?,
                });
            }
            if catalog.insert(blueprint).is_some() {
                anyhow::bail!("Map '{}' is listed twice", map.name);
            }
        }

        if let Some(start) = &data.start {
            if !catalog.names().any(|name| name == start) {
                anyhow::bail!("Start map '{}' is not in the catalog", start);
            }
        }
        catalog.set_start(data.start);
        Ok(catalog)
    }

    /// Decode an image file (PNG or BMP) into an RGB bitmap.
    pub fn load_bitmap(path: &Path) -> LoadResult<Bitmap> {
        let image = image::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to decode image {}: {}", path.display(), e))?
            .to_rgb8();
        let (width, height) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|pixel| {
                let [r, g, b] = pixel.0;
                Rgb(r, g, b)
            })
            .collect();

        Bitmap::from_pixels(width, height, pixels)
            .map_err(|e| anyhow::anyhow!("Image {}: {}", path.display(), e))
    }
}
