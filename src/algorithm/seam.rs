//! Pairwise seam blend
//!
//! Composites one tile onto another using a per-pixel weight derived from both
//! influence fields and both heights.

use crate::field::blur::gaussian_blur;
use crate::io::error::{Result, TilingError};
use crate::texture::pixel::{blend_factor, copy_pixel};
use crate::texture::tile::Tile;
use ndarray::{Array2, Zip};

/// Options for a pairwise blend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamOptions {
    /// Half-width of the height comparison band
    pub epsilon: f32,
    /// Smooth the weight field before compositing
    pub blur: bool,
    /// Blend the source influence into the destination influence as well
    pub carry_influence: bool,
}

/// Per-pixel weight with which `src` should replace `dst`
///
/// # Errors
///
/// Returns an error if the tiles differ in size
pub fn pairwise_weights(src: &Tile, dst: &Tile, epsilon: f32) -> Result<Array2<f32>> {
    if src.size() != dst.size() {
        return Err(TilingError::DimensionMismatch {
            what: "pairwise blend source",
            expected: dst.size(),
            found: src.size(),
        });
    }

    let mut weights = Array2::zeros(dst.size().shape());
    Zip::from(&mut weights)
        .and(src.influence.values())
        .and(dst.influence.values())
        .and(src.map.texels())
        .and(dst.map.texels())
        .par_for_each(|weight, &f_src, &f_dst, t_src, t_dst| {
            *weight = blend_factor(f_src, f_dst, t_src.height_noise, t_dst.height_noise, epsilon);
        });

    Ok(weights)
}

/// Composite `src` onto `dst`
///
/// # Errors
///
/// Returns an error if the tiles differ in size
pub fn blend_pair(src: &Tile, dst: &mut Tile, options: &SeamOptions) -> Result<()> {
    let mut weights = pairwise_weights(src, dst, options.epsilon)?;
    if options.blur {
        weights = gaussian_blur(&weights);
    }

    let Tile { map, influence } = dst;
    let zip = Zip::from(map.texels_mut())
        .and(src.map.texels())
        .and(&weights);

    if options.carry_influence {
        zip.and(influence.values_mut())
            .and(src.influence.values())
            .par_for_each(|dst_texel, src_texel, &weight, dst_value, &src_value| {
                copy_pixel(src_texel, dst_texel, Some((src_value, dst_value)), weight);
            });
    } else {
        zip.par_for_each(|dst_texel, src_texel, &weight| {
            copy_pixel(src_texel, dst_texel, None, weight);
        });
    }

    Ok(())
}
