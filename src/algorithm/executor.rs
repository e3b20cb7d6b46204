//! Fixed tiling pipeline
//!
//! The pipeline is a stage machine: each call to [`SeamPipeline::execute_stage`]
//! fully consumes the previous stage's buffers before the next stage starts, and
//! drops every buffer as soon as its last reader has run.

use crate::algorithm::priority::{PriorityOptions, blend_layers};
use crate::algorithm::seam::{SeamOptions, blend_pair};
use crate::field::influence::{FalloffProfile, InfluenceField, TileRole};
use crate::field::noise::{FractalNoise, NoiseSeeds, NoiseSettings, perturb_height, perturb_influence};
use crate::io::configuration::{
    DEFAULT_EPSILON, DEFAULT_NOISE_STRENGTH, DEFAULT_SEED, DEFAULT_SHARPNESS,
};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::geometry::Size;
use crate::spatial::layout::{
    AtlasConvention, SourcePlacements, corner_swaps, left_right_swaps, top_bottom_swaps,
};
use crate::spatial::region::{apply_transfers, copy_from_wide_map};
use crate::texture::pbr::PbrMap;
use crate::texture::tile::Tile;
use log::{debug, info};

/// Parameters controlling one tiling run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilingConfig {
    /// Layout of the captured atlas
    pub convention: AtlasConvention,
    /// Exponent shaping the influence falloff; higher concentrates influence at the center
    pub sharpness: f32,
    /// Inner radius choice for the influence falloff
    pub profile: FalloffProfile,
    /// Whether influence and height are perturbed with noise
    pub noise_enabled: bool,
    /// Noise mix strength in `[0, 1]`
    pub noise_strength: f32,
    /// Fractal noise parameters
    pub noise: NoiseSettings,
    /// Half-width of the smooth transition band between competing values
    pub epsilon: f32,
    /// Whether blend weight fields are smoothed
    pub blur: bool,
    /// Seed from which every per-tile noise seed is drawn
    pub seed: u64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            convention: AtlasConvention::default(),
            sharpness: DEFAULT_SHARPNESS,
            profile: FalloffProfile::default(),
            noise_enabled: true,
            noise_strength: DEFAULT_NOISE_STRENGTH,
            noise: NoiseSettings::default(),
            epsilon: DEFAULT_EPSILON,
            blur: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl TilingConfig {
    /// Check every tuning parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the sharpness or epsilon is not a positive finite number,
    /// or the noise strength is outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if !self.sharpness.is_finite() || self.sharpness <= 0.0 {
            return Err(invalid_parameter(
                "sharpness",
                &self.sharpness,
                &"must be a positive finite number",
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(invalid_parameter(
                "epsilon",
                &self.epsilon,
                &"must be a positive finite number",
            ));
        }
        if !(0.0..=1.0).contains(&self.noise_strength) {
            return Err(invalid_parameter(
                "noise",
                &self.noise_strength,
                &"must lie between 0 and 1",
            ));
        }
        if self.noise.octaves == 0 {
            return Err(invalid_parameter(
                "octaves",
                &self.noise.octaves,
                &"must be at least 1",
            ));
        }
        Ok(())
    }

    const fn seam_options(&self, carry_influence: bool) -> SeamOptions {
        SeamOptions {
            epsilon: self.epsilon,
            blur: self.blur,
            carry_influence,
        }
    }
}

/// Pipeline stages in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Allocate working tiles at tile resolution
    Allocate,
    /// Build per-role influence fields
    Influence,
    /// Slice source regions out of the atlas
    Extract,
    /// Perturb influence and height with per-tile noise
    Noise,
    /// Build the corner composite
    Corners,
    /// Build the edge composites
    Edges,
    /// Blend composites onto the base
    Seams,
    /// Output is ready
    Done,
}

impl Stage {
    /// Number of stages that perform work
    pub const WORKING_STAGES: usize = 7;

    /// Stage that follows this one
    pub const fn next(self) -> Self {
        match self {
            Self::Allocate => Self::Influence,
            Self::Influence => Self::Extract,
            Self::Extract => Self::Noise,
            Self::Noise => Self::Corners,
            Self::Corners => Self::Edges,
            Self::Edges => Self::Seams,
            Self::Seams | Self::Done => Self::Done,
        }
    }

    /// Zero-based position in the pipeline
    pub const fn position(self) -> usize {
        match self {
            Self::Allocate => 0,
            Self::Influence => 1,
            Self::Extract => 2,
            Self::Noise => 3,
            Self::Corners => 4,
            Self::Edges => 5,
            Self::Seams => 6,
            Self::Done => 7,
        }
    }

    /// Short human-readable name
    pub const fn label(self) -> &'static str {
        match self {
            Self::Allocate => "allocate",
            Self::Influence => "influence",
            Self::Extract => "extract",
            Self::Noise => "noise",
            Self::Corners => "corners",
            Self::Edges => "edges",
            Self::Seams => "seams",
            Self::Done => "done",
        }
    }
}

/// Source tiles cut from the atlas
#[derive(Debug)]
struct Sources {
    base: Tile,
    corner: Option<Tile>,
    top_bottom: Option<Tile>,
    // None when the top/bottom source also supplies the left/right composite
    left_right: Option<Tile>,
}

/// Composites that carry seamless content to the tile boundary
#[derive(Debug)]
struct Composites {
    corners: Tile,
    top_bottom: Tile,
    left_right: Option<Tile>,
}

/// Stage machine turning one atlas into one seamless tile
#[derive(Debug)]
pub struct SeamPipeline {
    config: TilingConfig,
    stage: Stage,
    tile_size: Size,
    placements: SourcePlacements,
    seeds: NoiseSeeds,
    atlas: Option<PbrMap>,
    sources: Option<Sources>,
    composites: Option<Composites>,
    output: Option<PbrMap>,
}

fn missing(stage: Stage, what: &str) -> crate::io::error::TilingError {
    computation_error(
        "pipeline",
        &format!("{what} is not available during the {} stage", stage.label()),
    )
}

impl SeamPipeline {
    /// Prepare a run over `atlas`
    ///
    /// No working buffer is allocated until the first stage executes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the atlas is too small
    /// for the chosen convention
    pub fn new(atlas: PbrMap, config: TilingConfig) -> Result<Self> {
        config.validate()?;
        let tile_size = config.convention.tile_size(atlas.size())?;
        let placements = config.convention.placements(tile_size);
        info!(
            "atlas {} split as {:?} into {} tiles",
            atlas.size(),
            config.convention,
            tile_size
        );

        Ok(Self {
            config,
            stage: Stage::Allocate,
            tile_size,
            placements,
            seeds: NoiseSeeds::new(config.seed),
            atlas: Some(atlas),
            sources: None,
            composites: None,
            output: None,
        })
    }

    /// Stage that will run on the next call to [`Self::execute_stage`]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Working tile resolution
    pub const fn tile_size(&self) -> Size {
        self.tile_size
    }

    /// Configuration of this run
    pub const fn config(&self) -> &TilingConfig {
        &self.config
    }

    /// Run the current stage and advance
    ///
    /// Returns `false` once the pipeline has finished.
    ///
    /// # Errors
    ///
    /// Returns an error if a region copy or blend fails
    pub fn execute_stage(&mut self) -> Result<bool> {
        let stage = self.stage;
        debug!("stage {}", stage.label());
        match stage {
            Stage::Allocate => self.allocate(),
            Stage::Influence => self.build_influence(),
            Stage::Extract => self.extract()?,
            Stage::Noise => self.apply_noise(),
            Stage::Corners => self.build_corners()?,
            Stage::Edges => self.build_edges()?,
            Stage::Seams => self.blend_seams()?,
            Stage::Done => return Ok(false),
        }
        self.stage = stage.next();
        Ok(self.stage != Stage::Done)
    }

    /// Run every remaining stage and return the output
    ///
    /// # Errors
    ///
    /// Returns the first stage error
    pub fn run(mut self) -> Result<PbrMap> {
        while self.execute_stage()? {}
        self.finish()
    }

    /// Take the finished tile
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline has not reached [`Stage::Done`]
    pub fn finish(self) -> Result<PbrMap> {
        let stage = self.stage;
        self.output.ok_or_else(|| missing(stage, "output"))
    }

    fn allocate(&mut self) {
        let size = self.tile_size;
        let left_right = self.placements.left_right_edge.map(|_| Tile::new(size));
        self.sources = Some(Sources {
            base: Tile::new(size),
            corner: Some(Tile::new(size)),
            top_bottom: Some(Tile::new(size)),
            left_right,
        });
        self.composites = Some(Composites {
            corners: Tile::new(size),
            top_bottom: Tile::new(size),
            left_right: Some(Tile::new(size)),
        });
        debug!(
            "allocated {} source tiles and 3 composites",
            self.config.convention.source_count()
        );
    }

    fn build_influence(&mut self) {
        let size = self.tile_size;
        let profile = self.config.profile;
        let exponent = self.config.sharpness;
        let field = |role| InfluenceField::for_role(role, size, profile, exponent);

        if let Some(sources) = &mut self.sources {
            sources.base.influence = field(TileRole::Base);
            for (tile, role) in [
                (&mut sources.corner, TileRole::Corner),
                (&mut sources.top_bottom, TileRole::Edge),
                (&mut sources.left_right, TileRole::Edge),
            ] {
                if let Some(tile) = tile {
                    tile.influence = field(role);
                }
            }
        }

        if let Some(composites) = &mut self.composites {
            composites.corners.influence = InfluenceField::empty(size);
            composites.top_bottom.influence = InfluenceField::empty(size);
            if let Some(tile) = &mut composites.left_right {
                tile.influence = InfluenceField::empty(size);
            }
        }
    }

    fn extract(&mut self) -> Result<()> {
        let atlas = self
            .atlas
            .take()
            .ok_or_else(|| missing(Stage::Extract, "atlas"))?;
        let sources = self
            .sources
            .as_mut()
            .ok_or_else(|| missing(Stage::Extract, "source tiles"))?;
        let placements = self.placements;

        copy_from_wide_map(&atlas, &mut sources.base.map, placements.base)?;
        if let Some(tile) = &mut sources.corner {
            copy_from_wide_map(&atlas, &mut tile.map, placements.corner)?;
        }
        if let Some(tile) = &mut sources.top_bottom {
            copy_from_wide_map(&atlas, &mut tile.map, placements.top_bottom_edge)?;
        }
        if let (Some(tile), Some(offset)) = (&mut sources.left_right, placements.left_right_edge) {
            copy_from_wide_map(&atlas, &mut tile.map, offset)?;
        }

        info!("extracted source tiles, releasing atlas");
        Ok(())
    }

    fn apply_noise(&mut self) {
        if !self.config.noise_enabled || self.config.noise_strength <= 0.0 {
            info!("noise disabled");
            return;
        }
        let Some(sources) = &mut self.sources else {
            return;
        };

        let width = self.tile_size.width;
        let settings = self.config.noise;
        let strength = self.config.noise_strength;
        let seeds = &mut self.seeds;

        let tiles = [
            Some(&mut sources.base),
            sources.corner.as_mut(),
            sources.top_bottom.as_mut(),
            sources.left_right.as_mut(),
        ];
        for tile in tiles.into_iter().flatten() {
            let influence_noise = FractalNoise::new(seeds.next_seed(), width, &settings);
            perturb_influence(&mut tile.influence, &influence_noise, strength);
            let height_noise = FractalNoise::new(seeds.next_seed(), width, &settings);
            perturb_height(&mut tile.map, &height_noise, strength);
        }
        info!("applied noise at strength {strength}");
    }

    fn build_corners(&mut self) -> Result<()> {
        let sources = self
            .sources
            .as_mut()
            .ok_or_else(|| missing(Stage::Corners, "source tiles"))?;
        let composites = self
            .composites
            .as_mut()
            .ok_or_else(|| missing(Stage::Corners, "composites"))?;
        let corner = sources
            .corner
            .take()
            .ok_or_else(|| missing(Stage::Corners, "corner source"))?;

        apply_transfers(&corner, &mut composites.corners, &corner_swaps(self.tile_size))?;
        debug!("corner composite built");
        Ok(())
    }

    fn build_edges(&mut self) -> Result<()> {
        let size = self.tile_size;
        let sources = self
            .sources
            .as_mut()
            .ok_or_else(|| missing(Stage::Edges, "source tiles"))?;
        let composites = self
            .composites
            .as_mut()
            .ok_or_else(|| missing(Stage::Edges, "composites"))?;
        let top_bottom = sources
            .top_bottom
            .take()
            .ok_or_else(|| missing(Stage::Edges, "top/bottom edge source"))?;
        let left_right_source = sources.left_right.take();
        let mut left_right = composites
            .left_right
            .take()
            .ok_or_else(|| missing(Stage::Edges, "left/right composite"))?;

        apply_transfers(&top_bottom, &mut composites.top_bottom, &top_bottom_swaps(size))?;
        let lr_source = left_right_source.as_ref().unwrap_or(&top_bottom);
        apply_transfers(lr_source, &mut left_right, &left_right_swaps(size))?;
        drop(left_right_source);
        drop(top_bottom);

        match self.config.convention {
            AtlasConvention::Quad => composites.left_right = Some(left_right),
            AtlasConvention::Strip => {
                // One shared source: fold both edge directions into a single composite
                blend_pair(
                    &left_right,
                    &mut composites.top_bottom,
                    &self.config.seam_options(true),
                )?;
            }
        }
        debug!("edge composites built");
        Ok(())
    }

    fn blend_seams(&mut self) -> Result<()> {
        let sources = self
            .sources
            .take()
            .ok_or_else(|| missing(Stage::Seams, "source tiles"))?;
        let composites = self
            .composites
            .take()
            .ok_or_else(|| missing(Stage::Seams, "composites"))?;

        let output = match composites.left_right {
            Some(left_right) => {
                let base = sources.base;
                let mut dst = base.map.clone();
                let layers = [&base, &composites.top_bottom, &left_right, &composites.corners];
                let options = PriorityOptions {
                    epsilon: self.config.epsilon,
                    blur: self.config.blur,
                };
                blend_layers(&mut dst, &layers, &options)?;
                dst
            }
            None => {
                let mut dst = sources.base;
                let options = self.config.seam_options(true);
                blend_pair(&composites.top_bottom, &mut dst, &options)?;
                blend_pair(&composites.corners, &mut dst, &options)?;
                dst.map
            }
        };

        info!("seams blended into {} tile", output.size());
        self.output = Some(output);
        Ok(())
    }
}
