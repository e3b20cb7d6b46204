//! N-way priority blend
//!
//! Up to four layers compete for every pixel. Layers are ranked by adjusted height;
//! the top-ranked layer takes a weight proportional to how decisively it beats the
//! next one, and each lower rank shares whatever weight is left. Compositing paints
//! the lowest rank first so the winner always ends up on top.

use crate::field::blur::gaussian_blur;
use crate::io::configuration::MAX_BLEND_LAYERS;
use crate::io::error::{Result, TilingError};
use crate::math::interpolation::{adjusted_height, factor_eps};
use crate::spatial::geometry::Size;
use crate::texture::pbr::PbrMap;
use crate::texture::pixel::copy_pixel;
use crate::texture::tile::Tile;
use ndarray::{Array2, Zip};

/// Options for the priority blend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityOptions {
    /// Half-width of the rank comparison band
    pub epsilon: f32,
    /// Smooth each layer's weight field independently before normalizing
    pub blur: bool,
}

/// Ranking of the layers at one pixel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRanking {
    /// Raw weight per layer index
    pub weights: [f32; MAX_BLEND_LAYERS],
    /// Layer indices from highest to lowest priority
    pub order: [u8; MAX_BLEND_LAYERS],
    /// Number of layers with a nonzero claim at this pixel; they occupy the front of `order`
    pub ranked: u8,
}

impl PixelRanking {
    /// Layer indices from lowest to highest priority, for painting
    pub fn painting_order(&self, layer_count: usize) -> impl Iterator<Item = usize> + '_ {
        self.order
            .iter()
            .take(layer_count)
            .rev()
            .map(|&layer| usize::from(layer))
    }
}

/// Rank the `(influence, height)` candidates of one pixel and assign raw weights
///
/// Candidates with zero influence make no claim: they get no weight and rank below
/// every claiming candidate, keeping their input order. Claiming candidates are
/// sorted by adjusted height, ties keeping input order. The weight of rank `j` is
/// `(1 - sum of higher-ranked weights) * factor_eps(score_j, score_j+1, eps)^(1/4)`,
/// with the lowest claiming rank compared against 0.
pub fn rank_pixel(candidates: &[(f32, f32)], epsilon: f32) -> PixelRanking {
    let mut ranking = PixelRanking::default();
    let mut scored = [(0_usize, 0.0_f32); MAX_BLEND_LAYERS];
    let mut claiming = 0;
    let mut idle = [0_usize; MAX_BLEND_LAYERS];
    let mut idle_count = 0;

    for (layer, &(influence, height)) in candidates.iter().enumerate().take(MAX_BLEND_LAYERS) {
        if influence > 0.0 {
            if let Some(slot) = scored.get_mut(claiming) {
                *slot = (layer, adjusted_height(influence, height));
                claiming += 1;
            }
        } else if let Some(slot) = idle.get_mut(idle_count) {
            *slot = layer;
            idle_count += 1;
        }
    }

    let active = scored.get_mut(..claiming).unwrap_or(&mut []);
    active.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut assigned = 0.0;
    for (rank, &(layer, score)) in active.iter().enumerate() {
        let next = active.get(rank + 1).map_or(0.0, |&(_, s)| s);
        let weight = (1.0 - assigned) * factor_eps(score, next, epsilon).sqrt().sqrt();
        if let Some(w) = ranking.weights.get_mut(layer) {
            *w = weight;
        }
        if let Some(o) = ranking.order.get_mut(rank) {
            *o = layer as u8;
        }
        assigned += weight;
    }

    let idle_layers = idle.get(..idle_count).unwrap_or(&[]);
    for (o, &layer) in ranking.order.iter_mut().skip(claiming).zip(idle_layers) {
        *o = layer as u8;
    }

    ranking.ranked = claiming as u8;
    ranking
}

/// Normalized per-layer weight fields plus the per-pixel rankings that order painting
#[derive(Debug, Clone)]
pub struct LayerWeights {
    fields: Vec<Array2<f32>>,
    rankings: Array2<PixelRanking>,
}

impl LayerWeights {
    /// Number of layers
    pub fn layer_count(&self) -> usize {
        self.fields.len()
    }

    /// Weight field of layer `index`
    pub fn field(&self, index: usize) -> Option<&Array2<f32>> {
        self.fields.get(index)
    }

    /// Ranking at `(x, y)`
    pub fn ranking(&self, x: usize, y: usize) -> Option<&PixelRanking> {
        self.rankings.get((y, x))
    }

    /// Sum of all layer weights at `(x, y)`
    pub fn weight_sum(&self, x: usize, y: usize) -> f32 {
        self.fields
            .iter()
            .filter_map(|field| field.get((y, x)))
            .sum()
    }
}

fn validate_layers(layers: &[&Tile]) -> Result<Size> {
    if layers.is_empty() || layers.len() > MAX_BLEND_LAYERS {
        return Err(TilingError::LayerCount {
            count: layers.len(),
            max: MAX_BLEND_LAYERS,
        });
    }

    let size = layers.first().map_or_else(Size::default, |layer| layer.size());
    for layer in layers {
        if layer.size() != size {
            return Err(TilingError::DimensionMismatch {
                what: "priority blend layer",
                expected: size,
                found: layer.size(),
            });
        }
    }
    Ok(size)
}

/// Rank every pixel and build normalized weight fields for `layers`
///
/// After normalization the weights at each pixel sum to 1, except where no layer
/// claims the pixel at all; there every weight stays 0 and the base layer shows.
///
/// # Errors
///
/// Returns an error if there are no layers, more than four, or their sizes differ
pub fn compute_layer_weights(layers: &[&Tile], options: &PriorityOptions) -> Result<LayerWeights> {
    let size = validate_layers(layers)?;
    let epsilon = options.epsilon;

    let mut rankings = Array2::from_elem(size.shape(), PixelRanking::default());
    Zip::indexed(&mut rankings).par_for_each(|(y, x), ranking| {
        let mut candidates = [(0.0_f32, 0.0_f32); MAX_BLEND_LAYERS];
        for (slot, layer) in candidates.iter_mut().zip(layers) {
            let influence = layer.influence.values().get((y, x)).copied().unwrap_or(0.0);
            let height = layer.map.texels().get((y, x)).map_or(0.0, |t| t.height_noise);
            *slot = (influence, height);
        }
        *ranking = rank_pixel(candidates.get(..layers.len()).unwrap_or(&[]), epsilon);
    });

    let mut fields: Vec<Array2<f32>> = (0..layers.len())
        .map(|index| rankings.map(|r| r.weights.get(index).copied().unwrap_or(0.0)))
        .collect();

    if options.blur {
        fields = fields.iter().map(gaussian_blur).collect();
    }

    let mut totals = Array2::<f32>::zeros(size.shape());
    for field in &fields {
        totals += field;
    }
    for field in &mut fields {
        Zip::from(field).and(&totals).par_for_each(|weight, &total| {
            *weight = if total > 0.0 { *weight / total } else { 0.0 };
        });
    }

    Ok(LayerWeights { fields, rankings })
}

/// Paint `layers` into `dst` using precomputed weights
///
/// Every pixel starts as a full copy of layer 0, then layers are applied from the
/// lowest to the highest rank.
///
/// # Errors
///
/// Returns an error if `dst`, the layers and the weights disagree in size or count
pub fn composite_layers(dst: &mut PbrMap, layers: &[&Tile], weights: &LayerWeights) -> Result<()> {
    let size = validate_layers(layers)?;
    if dst.size() != size {
        return Err(TilingError::DimensionMismatch {
            what: "priority blend destination",
            expected: size,
            found: dst.size(),
        });
    }
    if weights.layer_count() != layers.len() {
        return Err(TilingError::LayerCount {
            count: weights.layer_count(),
            max: layers.len(),
        });
    }

    let layer_count = layers.len();
    Zip::indexed(dst.texels_mut())
        .and(&weights.rankings)
        .par_for_each(|(y, x), texel, ranking| {
            if let Some(base) = layers.first().and_then(|layer| layer.map.texels().get((y, x))) {
                copy_pixel(base, texel, None, 1.0);
            }
            for layer_index in ranking.painting_order(layer_count) {
                let source = layers
                    .get(layer_index)
                    .and_then(|layer| layer.map.texels().get((y, x)));
                let weight = weights
                    .fields
                    .get(layer_index)
                    .and_then(|field| field.get((y, x)))
                    .copied()
                    .unwrap_or(0.0);
                if let Some(source) = source {
                    copy_pixel(source, texel, None, weight);
                }
            }
        });

    Ok(())
}

/// Rank, weight and composite `layers` into `dst` in one call
///
/// # Errors
///
/// Returns an error under the same conditions as [`compute_layer_weights`] and
/// [`composite_layers`]
pub fn blend_layers(
    dst: &mut PbrMap,
    layers: &[&Tile],
    options: &PriorityOptions,
) -> Result<LayerWeights> {
    let weights = compute_layer_weights(layers, options)?;
    composite_layers(dst, layers, &weights)?;
    Ok(weights)
}
