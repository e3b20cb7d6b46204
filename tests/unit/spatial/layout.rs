//! Tests for atlas conventions and half-swap placements

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use seamtile::TilingError;
    use seamtile::spatial::geometry::{Point, Size};
    use seamtile::spatial::layout::{
        AtlasConvention, Transfer, corner_swaps, left_right_swaps, top_bottom_swaps,
    };

    // Marks every destination pixel written by the transfers and records its source
    fn trace(size: Size, transfers: &[Transfer]) -> Array2<Option<(usize, usize)>> {
        let mut written = Array2::from_elem(size.shape(), None);
        for transfer in transfers {
            assert!(transfer.from.fits_within(size), "{} exceeds {size}", transfer.from);
            for dy in 0..transfer.from.height {
                for dx in 0..transfer.from.width {
                    let target = (transfer.to.y + dy, transfer.to.x + dx);
                    let cell = written.get_mut(target).expect("transfer target in bounds");
                    assert!(cell.is_none(), "pixel {target:?} written twice");
                    *cell = Some((transfer.from.y + dy, transfer.from.x + dx));
                }
            }
        }
        written
    }

    // Tests tile sizes for both conventions, including odd atlas sizes
    // Verified by dividing both axes by the column count
    #[test]
    fn test_tile_size() {
        assert_eq!(
            AtlasConvention::Quad.tile_size(Size::new(32, 32)).expect("quad tile"),
            Size::new(16, 16)
        );
        assert_eq!(
            AtlasConvention::Quad.tile_size(Size::new(33, 31)).expect("odd quad tile"),
            Size::new(16, 15)
        );
        assert_eq!(
            AtlasConvention::Strip.tile_size(Size::new(48, 16)).expect("strip tile"),
            Size::new(16, 16)
        );
        assert!(matches!(
            AtlasConvention::Strip.tile_size(Size::new(2, 16)),
            Err(TilingError::InvalidSourceData { .. })
        ));
    }

    // Tests source placements stay inside the atlas
    // Verified by placing the edge source at the tile height for the strip layout
    #[test]
    fn test_placements() {
        let tile = Size::new(16, 16);

        let quad = AtlasConvention::Quad.placements(tile);
        assert_eq!(quad.base, Point::new(0, 0));
        assert_eq!(quad.corner, Point::new(16, 0));
        assert_eq!(quad.top_bottom_edge, Point::new(0, 16));
        assert_eq!(quad.left_right_edge, Some(Point::new(16, 16)));
        assert_eq!(AtlasConvention::Quad.source_count(), 4);

        let strip = AtlasConvention::Strip.placements(tile);
        assert_eq!(strip.corner, Point::new(16, 0));
        assert_eq!(strip.top_bottom_edge, Point::new(32, 0));
        assert_eq!(strip.left_right_edge, None);
        assert_eq!(AtlasConvention::Strip.source_count(), 3);
        assert_eq!(AtlasConvention::Strip.grid(), (3, 1));
    }

    // Tests every swap writes each destination pixel exactly once, for even and odd sizes
    // Verified by rounding the second half down
    #[test]
    fn test_swaps_cover_every_pixel_once() {
        for size in [Size::new(16, 16), Size::new(7, 5), Size::new(1, 3)] {
            for written in [
                trace(size, &corner_swaps(size)),
                trace(size, &top_bottom_swaps(size)),
                trace(size, &left_right_swaps(size)),
            ] {
                assert!(written.iter().all(Option::is_some), "uncovered pixel in {size}");
            }
        }
    }

    // Tests the corner swap moves the source center onto the tile origin
    // Verified by swapping only horizontally
    #[test]
    fn test_corner_swap_moves_center_to_origin() {
        let size = Size::new(16, 16);
        let written = trace(size, &corner_swaps(size));
        assert_eq!(written.get((0, 0)).copied().flatten(), Some((8, 8)));
        assert_eq!(written.get((15, 15)).copied().flatten(), Some((7, 7)));
        assert_eq!(written.get((8, 8)).copied().flatten(), Some((0, 0)));

        let odd = Size::new(5, 5);
        let written = trace(odd, &corner_swaps(odd));
        assert_eq!(written.get((0, 0)).copied().flatten(), Some((2, 2)));
    }

    // Tests the edge swaps only move pixels along their own axis
    // Verified by swapping the axes of the two edge placements
    #[test]
    fn test_edge_swaps_keep_the_other_axis() {
        let size = Size::new(6, 4);

        let top_bottom = trace(size, &top_bottom_swaps(size));
        for ((y, x), source) in top_bottom.indexed_iter() {
            let (sy, sx) = source.expect("covered");
            assert_eq!(sx, x);
            assert_eq!(sy, (y + 2) % 4);
        }

        let left_right = trace(size, &left_right_swaps(size));
        for ((y, x), source) in left_right.indexed_iter() {
            let (sy, sx) = source.expect("covered");
            assert_eq!(sy, y);
            assert_eq!(sx, (x + 3) % 6);
        }
    }
}
