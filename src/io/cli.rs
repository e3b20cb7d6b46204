//! Command-line interface for batch processing PBR texture sets

use crate::algorithm::executor::{SeamPipeline, Stage, TilingConfig};
use crate::field::influence::FalloffProfile;
use crate::field::noise::NoiseSettings;
use crate::io::configuration::{
    DEFAULT_EPSILON, DEFAULT_NOISE_STRENGTH, DEFAULT_SEED, DEFAULT_SHARPNESS, DIFFUSE_SUFFIX,
    OUTPUT_SUFFIX,
};
use crate::io::error::{Result, TilingError, WithContext};
use crate::io::image::{TextureSetPaths, load_pbr, save_pbr, with_suffix};
use crate::io::progress::ProgressManager;
use crate::spatial::layout::AtlasConvention;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "seamtile")]
#[command(
    author,
    version,
    about = "Turn oversized PBR texture captures into seamlessly tileable texture sets"
)]
/// Command-line arguments for the tiling tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Texture set prefix (expects <prefix>_d.png, _n.png, _hrm.png) or directory of sets
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output prefix for a single set, or output directory for a batch
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Atlas layout of the capture
    #[arg(short, long, value_enum, default_value_t = AtlasConvention::Quad)]
    pub layout: AtlasConvention,

    /// Influence falloff exponent; higher values sharpen the falloff
    #[arg(long, default_value_t = DEFAULT_SHARPNESS)]
    pub sharpness: f32,

    /// Inner radius profile of the influence falloff
    #[arg(long, value_enum, default_value_t = FalloffProfile::Soft)]
    pub profile: FalloffProfile,

    /// Noise strength between 0 and 1
    #[arg(short, long, default_value_t = DEFAULT_NOISE_STRENGTH)]
    pub noise: f32,

    /// Disable noise perturbation
    #[arg(long)]
    pub no_noise: bool,

    /// Width of the smooth transition band between competing heights
    #[arg(short, long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f32,

    /// Disable blurring of blend weights
    #[arg(long)]
    pub no_blur: bool,

    /// Random seed for reproducible noise
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process sets even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing outputs should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Tiling configuration described by the arguments
    pub fn tiling_config(&self) -> TilingConfig {
        TilingConfig {
            convention: self.layout,
            sharpness: self.sharpness,
            profile: self.profile,
            noise_enabled: !self.no_noise,
            noise_strength: self.noise,
            noise: NoiseSettings::default(),
            epsilon: self.epsilon,
            blur: !self.no_blur,
            seed: self.seed,
        }
    }
}

/// Orchestrates batch processing of texture sets with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process texture sets according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the target cannot be
    /// resolved, or any set fails to load, tile or save
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.tiling_config();
        config.validate()?;

        let prefixes = self.collect_sets()?;
        if prefixes.is_empty() {
            info!("nothing to process");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(prefixes.len());
        }

        for (index, (input, output)) in prefixes.iter().enumerate() {
            self.process_set(input, output, index, config)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Resolve the target into `(input prefix, output prefix)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a complete texture set nor a directory
    pub fn collect_sets(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let target = &self.cli.target;

        let prefixes = if target.is_dir() {
            let mut prefixes = Vec::new();
            let entries = std::fs::read_dir(target).with_path(target)?;
            for entry in entries {
                let path = entry.with_path(target)?.path();
                if let Some(prefix) = Self::prefix_of(&path) {
                    if TextureSetPaths::from_prefix(&prefix).exists()
                        && !prefix.to_string_lossy().ends_with(OUTPUT_SUFFIX)
                    {
                        prefixes.push(prefix);
                    }
                }
            }
            prefixes.sort();
            prefixes
        } else {
            let prefix = Self::prefix_of(target).unwrap_or_else(|| target.clone());
            if !TextureSetPaths::from_prefix(&prefix).exists() {
                return Err(TilingError::InvalidSourceData {
                    reason: format!(
                        "'{}' is neither a directory nor a complete texture set (_d, _n, _hrm)",
                        target.display()
                    ),
                });
            }
            vec![prefix]
        };

        let batch = target.is_dir();
        Ok(prefixes
            .into_iter()
            .map(|prefix| {
                let output = self.output_prefix(&prefix, batch);
                (prefix, output)
            })
            .filter(|(prefix, output)| self.should_process(prefix, output))
            .collect())
    }

    // Strips the diffuse suffix from a path naming a diffuse image
    fn prefix_of(path: &Path) -> Option<PathBuf> {
        let name = path.file_name()?.to_str()?;
        let stem = name.strip_suffix(DIFFUSE_SUFFIX)?;
        if stem.is_empty() {
            return None;
        }
        Some(path.with_file_name(stem))
    }

    fn output_prefix(&self, input: &Path, batch: bool) -> PathBuf {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        let default_name = format!("{name}{OUTPUT_SUFFIX}");
        match (&self.cli.output, batch) {
            (Some(output), false) => output.clone(),
            (Some(dir), true) => dir.join(default_name),
            (None, _) => input.with_file_name(default_name),
        }
    }

    fn should_process(&self, input: &Path, output: &Path) -> bool {
        if !self.cli.skip_existing() || !TextureSetPaths::from_prefix(output).any_exists() {
            return true;
        }
        warn!("skipping {} (output exists)", input.display());
        false
    }

    fn process_set(
        &mut self,
        input: &Path,
        output: &Path,
        index: usize,
        config: TilingConfig,
    ) -> Result<()> {
        let start_time = Instant::now();
        info!("tiling {} -> {}", input.display(), output.display());

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_set(index, input, Stage::WORKING_STAGES);
        }

        let atlas = load_pbr(input)?;
        let mut pipeline = SeamPipeline::new(atlas, config)?;

        loop {
            if let Some(ref mut pm) = self.progress_manager {
                let stage = pipeline.stage();
                pm.update_stage(index, stage.position(), stage.label());
            }
            if !pipeline.execute_stage()? {
                break;
            }
        }

        let tile = pipeline.finish()?;
        save_pbr(output, &tile)?;
        info!(
            "wrote {} ({}) in {:.2?}",
            with_suffix(output, DIFFUSE_SUFFIX).display(),
            tile.size(),
            start_time.elapsed()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_set(index, start_time.elapsed());
        }

        Ok(())
    }
}
