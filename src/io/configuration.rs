//! Engine constants and runtime configuration defaults

// Tuning defaults exposed on the command line
/// Exponent applied to the radial influence falloff
pub const DEFAULT_SHARPNESS: f32 = 0.125;
/// Strength of the noise mixed into influence and height
pub const DEFAULT_NOISE_STRENGTH: f32 = 0.8;
/// Half-width of the band over which competing heights blend smoothly
pub const DEFAULT_EPSILON: f32 = 0.03;
/// Fixed seed for reproducible noise
pub const DEFAULT_SEED: u64 = 42;

// Blur kernel
/// Standard deviation of the Gaussian blur kernel
pub const BLUR_SIGMA: f32 = 0.83;
/// Kernel radius; the kernel spans `2 * BLUR_RADIUS + 1` pixels per axis
pub const BLUR_RADIUS: usize = 2;

// Fractal noise
/// Octaves summed by the fractal noise
pub const NOISE_OCTAVES: usize = 8;
/// Amplitude multiplier between octaves
pub const NOISE_GAIN: f64 = 0.5;
/// Frequency multiplier between octaves
pub const NOISE_LACUNARITY: f64 = 2.0;
/// Base noise frequency times tile width
pub const NOISE_FREQUENCY_SCALE: f64 = 1.5;

/// Most layers the priority blend ranks per pixel
pub const MAX_BLEND_LAYERS: usize = 4;

// Texture set file naming
/// Suffix of the diffuse color image
pub const DIFFUSE_SUFFIX: &str = "_d.png";
/// Suffix of the normal map image
pub const NORMAL_SUFFIX: &str = "_n.png";
/// Suffix of the packed height/roughness/metalness image
pub const HRM_SUFFIX: &str = "_hrm.png";
/// Suffix added to output texture set prefixes
pub const OUTPUT_SUFFIX: &str = "_tiled";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
