//! Region extraction from the atlas and chunk copies between tiles
//!
//! Both operations establish initial content, so they always fully replace the
//! destination pixels.

use crate::io::error::{Result, TilingError};
use crate::spatial::geometry::{IndexMapping, Point, Rect};
use crate::spatial::layout::Transfer;
use crate::texture::pbr::PbrMap;
use crate::texture::pixel::copy_pixel;
use crate::texture::tile::Tile;
use ndarray::{ArrayView2, ArrayViewMut2, Axis, Slice, Zip};

/// Slice a tile out of the wide atlas
///
/// Every pixel `(x, y)` of `tile` is read from `(x + offset.x, y + offset.y)` of
/// `wide`, addressed with the atlas row stride.
///
/// # Errors
///
/// Returns an error if the tile placed at `offset` does not fit inside the atlas
pub fn copy_from_wide_map(wide: &PbrMap, tile: &mut PbrMap, offset: Point) -> Result<()> {
    let region = Rect::at(offset, tile.size());
    if !region.fits_within(wide.size()) {
        return Err(TilingError::RegionOutOfBounds {
            region,
            bounds: wide.size(),
        });
    }

    let mapping = IndexMapping::new(tile.width(), wide.width());
    let source = wide.texels().as_slice().ok_or_else(|| TilingError::Computation {
        operation: "copy_from_wide_map",
        reason: "atlas texels are not in row-major layout".to_string(),
    })?;

    Zip::indexed(tile.texels_mut()).par_for_each(|(y, x), texel| {
        if let Some(src) = source.get(mapping.wide(x, y, offset)) {
            copy_pixel(src, texel, None, 1.0);
        }
    });

    Ok(())
}

/// Copy the `from` rectangle of `src` to `to` in `dst`, carrying influence values along
///
/// # Errors
///
/// Returns an error if either rectangle falls outside its tile
pub fn copy_chunk(src: &Tile, dst: &mut Tile, from: Rect, to: Point) -> Result<()> {
    if !from.fits_within(src.size()) {
        return Err(TilingError::RegionOutOfBounds {
            region: from,
            bounds: src.size(),
        });
    }
    let target = Rect::at(to, from.size());
    if !target.fits_within(dst.size()) {
        return Err(TilingError::RegionOutOfBounds {
            region: target,
            bounds: dst.size(),
        });
    }

    let src_texels = window(src.map.texels().view(), from);
    let src_influence = window(src.influence.values().view(), from);

    Zip::from(window_mut(dst.map.texels_mut(), target))
        .and(window_mut(dst.influence.values_mut(), target))
        .and(&src_texels)
        .and(&src_influence)
        .par_for_each(|dst_texel, dst_value, src_texel, src_value| {
            copy_pixel(src_texel, dst_texel, Some((*src_value, dst_value)), 1.0);
        });

    Ok(())
}

fn window<T>(view: ArrayView2<'_, T>, rect: Rect) -> ArrayView2<'_, T> {
    view.slice_axis_move(Axis(0), Slice::from(rect.rows()))
        .slice_axis_move(Axis(1), Slice::from(rect.cols()))
}

fn window_mut<T>(view: ArrayViewMut2<'_, T>, rect: Rect) -> ArrayViewMut2<'_, T> {
    view.slice_axis_move(Axis(0), Slice::from(rect.rows()))
        .slice_axis_move(Axis(1), Slice::from(rect.cols()))
}

/// Apply a sequence of transfers from `src` into `dst`
///
/// # Errors
///
/// Returns an error if any transfer falls outside its tile
pub fn apply_transfers(src: &Tile, dst: &mut Tile, transfers: &[Transfer]) -> Result<()> {
    for transfer in transfers {
        copy_chunk(src, dst, transfer.from, transfer.to)?;
    }
    Ok(())
}
