//! PNG decode/encode of PBR texture sets
//!
//! A texture set is three PNG files sharing a prefix: `<prefix>_d.png` (diffuse RGBA),
//! `<prefix>_n.png` (normal XYZ in RGB) and `<prefix>_hrm.png` (height, roughness and
//! metalness packed into RGB).

use crate::io::configuration::{DIFFUSE_SUFFIX, HRM_SUFFIX, NORMAL_SUFFIX};
use crate::io::error::{Result, TilingError};
use crate::math::interpolation::clamp;
use crate::spatial::geometry::{IndexMapping, Size};
use crate::texture::pbr::PbrMap;
use crate::texture::texel::Texel;
use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File paths of the three images that make up a texture set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSetPaths {
    /// Diffuse color image
    pub diffuse: PathBuf,
    /// Normal map image
    pub normal: PathBuf,
    /// Packed height/roughness/metalness image
    pub hrm: PathBuf,
}

impl TextureSetPaths {
    /// Paths for the set named by `prefix`
    pub fn from_prefix(prefix: &Path) -> Self {
        Self {
            diffuse: with_suffix(prefix, DIFFUSE_SUFFIX),
            normal: with_suffix(prefix, NORMAL_SUFFIX),
            hrm: with_suffix(prefix, HRM_SUFFIX),
        }
    }

    /// Check that all three files exist
    pub fn exists(&self) -> bool {
        self.diffuse.is_file() && self.normal.is_file() && self.hrm.is_file()
    }

    /// Check whether any of the three files exists
    pub fn any_exists(&self) -> bool {
        self.diffuse.exists() || self.normal.exists() || self.hrm.exists()
    }
}

/// Append `suffix` to the final path component without touching extensions
pub fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Convert a byte to `0..1`
pub fn byte_to_unit(value: u8) -> f32 {
    f32::from(value) / 255.0
}

/// Convert a `0..1` value to a byte, clamping and rounding
pub fn unit_to_byte(value: f32) -> u8 {
    (clamp(value, 0.0, 1.0) * 255.0).round() as u8
}

/// Convert a byte to the signed `-1..1` range
pub fn byte_to_signed(value: u8) -> f32 {
    byte_to_unit(value).mul_add(2.0, -1.0)
}

/// Convert a signed `-1..1` value to a byte, clamping and rounding
pub fn signed_to_byte(value: f32) -> u8 {
    unit_to_byte((value + 1.0) * 0.5)
}

/// Scale a vector to unit length, leaving zero vectors alone
pub fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = v[0].mul_add(v[0], v[1].mul_add(v[1], v[2] * v[2])).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

fn read_rgba(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| TilingError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

fn image_size(img: &RgbaImage) -> Size {
    Size::new(img.width() as usize, img.height() as usize)
}

fn rgba_at(raw: &[u8], index: usize) -> [u8; 4] {
    raw.get(index * 4..index * 4 + 4)
        .and_then(|px| <[u8; 4]>::try_from(px).ok())
        .unwrap_or([0, 0, 0, 255])
}

/// Unpack three decoded images into a PBR map
///
/// # Errors
///
/// Returns an error if the images differ in size
pub fn decode_channels(diffuse: &RgbaImage, normal: &RgbaImage, hrm: &RgbaImage) -> Result<PbrMap> {
    let size = image_size(diffuse);
    for (what, img) in [("normal map", normal), ("hrm map", hrm)] {
        if image_size(img) != size {
            return Err(TilingError::DimensionMismatch {
                what,
                expected: size,
                found: image_size(img),
            });
        }
    }

    let mapping = IndexMapping::new(size.width, size.width);
    let (d_raw, n_raw, hrm_raw) = (diffuse.as_raw(), normal.as_raw(), hrm.as_raw());
    let texels = Array2::from_shape_fn(size.shape(), |(y, x)| {
        let i = mapping.local(x, y);
        let d = rgba_at(d_raw, i);
        let n = rgba_at(n_raw, i);
        let p = rgba_at(hrm_raw, i);
        Texel::new(
            d.map(byte_to_unit),
            [byte_to_signed(n[0]), byte_to_signed(n[1]), byte_to_signed(n[2])],
            byte_to_unit(p[0]),
            byte_to_unit(p[1]),
            byte_to_unit(p[2]),
        )
    });

    Ok(PbrMap::from_texels(texels))
}

/// Pack a PBR map into diffuse, normal and hrm images
///
/// Normals are renormalized before packing; the raw height is written, not the
/// noise-perturbed one.
pub fn encode_channels(map: &PbrMap) -> (RgbaImage, RgbaImage, RgbaImage) {
    let (width, height) = (map.width() as u32, map.height() as u32);
    let texel_at = |x: u32, y: u32| map.get(x as usize, y as usize).copied().unwrap_or_default();

    let diffuse = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba(texel_at(x, y).diffuse.map(unit_to_byte))
    });
    let normal = ImageBuffer::from_fn(width, height, |x, y| {
        let [nx, ny, nz] = normalize(texel_at(x, y).normal);
        Rgba([signed_to_byte(nx), signed_to_byte(ny), signed_to_byte(nz), 255])
    });
    let hrm = ImageBuffer::from_fn(width, height, |x, y| {
        let t = texel_at(x, y);
        Rgba([
            unit_to_byte(t.height),
            unit_to_byte(t.roughness),
            unit_to_byte(t.metalness),
            255,
        ])
    });

    (diffuse, normal, hrm)
}

/// Load the texture set named by `prefix`
///
/// The three images are decoded concurrently.
///
/// # Errors
///
/// Returns an error if any image cannot be read or decoded, or their sizes differ
pub fn load_pbr(prefix: &Path) -> Result<PbrMap> {
    let paths = TextureSetPaths::from_prefix(prefix);
    let (diffuse, (normal, hrm)) = rayon::join(
        || read_rgba(&paths.diffuse),
        || rayon::join(|| read_rgba(&paths.normal), || read_rgba(&paths.hrm)),
    );
    decode_channels(&diffuse?, &normal?, &hrm?)
}

fn save_rgba(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| TilingError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save `map` as the texture set named by `prefix`
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - Any image cannot be encoded or written
pub fn save_pbr(prefix: &Path, map: &PbrMap) -> Result<()> {
    let paths = TextureSetPaths::from_prefix(prefix);

    if let Some(parent) = paths.diffuse.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| TilingError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    let (diffuse, normal, hrm) = encode_channels(map);
    save_rgba(&diffuse, &paths.diffuse)?;
    save_rgba(&normal, &paths.normal)?;
    save_rgba(&hrm, &paths.hrm)?;
    Ok(())
}
