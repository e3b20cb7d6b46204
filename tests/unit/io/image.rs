//! Tests for texture set paths, channel packing and PNG round trips

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use image::{Rgba, RgbaImage};
    use ndarray::Array2;
    use seamtile::TilingError;
    use seamtile::io::image::{
        TextureSetPaths, byte_to_signed, byte_to_unit, decode_channels, encode_channels,
        load_pbr, normalize, save_pbr, signed_to_byte, unit_to_byte, with_suffix,
    };
    use seamtile::spatial::geometry::Size;
    use seamtile::texture::{PbrMap, Texel};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    // Tests suffixes are appended to the full file name, dots included
    // Verified by using Path::with_extension
    #[test]
    fn test_paths_from_prefix() {
        let paths = TextureSetPaths::from_prefix(Path::new("assets/rock.v2"));
        assert_eq!(paths.diffuse, PathBuf::from("assets/rock.v2_d.png"));
        assert_eq!(paths.normal, PathBuf::from("assets/rock.v2_n.png"));
        assert_eq!(paths.hrm, PathBuf::from("assets/rock.v2_hrm.png"));
        assert_eq!(with_suffix(Path::new("x"), "_tiled"), PathBuf::from("x_tiled"));
        assert!(!paths.exists());
        assert!(!paths.any_exists());
    }

    // Tests byte conversions hit their range ends exactly and clamp on the way out
    // Verified by truncating instead of rounding
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_byte_conversions() {
        assert_eq!(byte_to_unit(0), 0.0);
        assert_eq!(byte_to_unit(255), 1.0);
        assert_eq!(byte_to_signed(0), -1.0);
        assert_eq!(byte_to_signed(255), 1.0);
        assert_eq!(unit_to_byte(1.5), 255);
        assert_eq!(unit_to_byte(-0.2), 0);
        assert_eq!(signed_to_byte(0.0), 128);
        assert_eq!(signed_to_byte(-2.0), 0);
        for byte in [0_u8, 1, 77, 128, 254, 255] {
            assert_eq!(unit_to_byte(byte_to_unit(byte)), byte);
            assert_eq!(signed_to_byte(byte_to_signed(byte)), byte);
        }
    }

    // Tests normalization scales to unit length and leaves zero vectors alone
    // Verified by dividing by the squared length
    #[test]
    fn test_normalize() {
        let [x, y, z] = normalize([3.0, 0.0, 4.0]);
        assert_abs_diff_eq!(x, 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(z, 0.8, epsilon = 1e-6);
        assert_eq!(normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }

    // Tests the hrm image packs height, roughness and metalness into RGB
    // Verified by swapping the roughness and metalness channels
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_decode_channel_layout() {
        let diffuse = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 51, 102]));
        let normal = RgbaImage::from_pixel(2, 1, Rgba([128, 128, 255, 255]));
        let hrm = RgbaImage::from_pixel(2, 1, Rgba([255, 51, 0, 255]));

        let map = decode_channels(&diffuse, &normal, &hrm).expect("matching sizes");
        let texel = map.get(1, 0).copied().expect("pixel present");

        assert_eq!(map.size(), Size::new(2, 1));
        assert_eq!(texel.diffuse, [1.0, 0.0, 0.2, 0.4]);
        assert_eq!(texel.normal[2], 1.0);
        assert_eq!(texel.height, 1.0);
        assert_eq!(texel.height_noise, 1.0);
        assert_eq!(texel.roughness, 0.2);
        assert_eq!(texel.metalness, 0.0);
    }

    // Tests images of different sizes are rejected
    // Verified by decoding only the diffuse extent
    #[test]
    fn test_decode_size_mismatch() {
        let diffuse = RgbaImage::new(4, 4);
        let normal = RgbaImage::new(4, 4);
        let hrm = RgbaImage::new(4, 3);
        assert!(matches!(
            decode_channels(&diffuse, &normal, &hrm),
            Err(TilingError::DimensionMismatch { what: "hrm map", .. })
        ));
    }

    // Tests encoding writes the raw height and renormalized normals
    // Verified by writing the noise height
    #[test]
    fn test_encode_channels() {
        let mut texel = Texel::new([0.0, 0.5, 1.0, 1.0], [0.0, 0.0, 0.5], 0.2, 1.0, 0.0);
        texel.height_noise = 0.9;
        let (diffuse, normal, hrm) = encode_channels(&PbrMap::filled(Size::new(3, 2), texel));

        assert_eq!(diffuse.dimensions(), (3, 2));
        assert_eq!(diffuse.get_pixel(2, 1), &Rgba([0, 128, 255, 255]));
        assert_eq!(normal.get_pixel(0, 0), &Rgba([128, 128, 255, 255]));
        assert_eq!(hrm.get_pixel(1, 1), &Rgba([51, 255, 0, 255]));
    }

    // Tests a saved set loads back within byte quantization
    // Verified by saving the normal map into the hrm file
    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let prefix = dir.path().join("nested").join("rock");
        let texels = Array2::from_shape_fn((4, 6), |(y, x)| {
            let u = x as f32 / 5.0;
            let v = y as f32 / 3.0;
            Texel::new([u, v, 1.0 - u, 1.0], [0.0, 0.0, 1.0], v, u, 1.0 - v)
        });
        let map = PbrMap::from_texels(texels);

        save_pbr(&prefix, &map).expect("saved");
        assert!(TextureSetPaths::from_prefix(&prefix).exists());
        let loaded = load_pbr(&prefix).expect("loaded");

        assert_eq!(loaded.size(), map.size());
        for (a, b) in loaded.texels().iter().zip(map.texels()) {
            for (x, y) in a.diffuse.iter().zip(b.diffuse) {
                assert_abs_diff_eq!(*x, y, epsilon = 1.0 / 255.0);
            }
            assert_abs_diff_eq!(a.height, b.height, epsilon = 1.0 / 255.0);
            assert_abs_diff_eq!(a.roughness, b.roughness, epsilon = 1.0 / 255.0);
            assert_abs_diff_eq!(a.metalness, b.metalness, epsilon = 1.0 / 255.0);
            assert_abs_diff_eq!(a.normal[2], 1.0, epsilon = 2.0 / 255.0);
        }
    }

    // Tests loading a missing set names the file that failed
    // Verified by reporting the prefix instead of the file
    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().expect("temp dir");
        let result = load_pbr(&dir.path().join("absent"));
        assert!(matches!(
            result,
            Err(TilingError::ImageLoad { ref path, .. }) if path.ends_with("absent_d.png")
        ));
    }
}
