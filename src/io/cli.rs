//! Command-line interface for palette categorization and batch collage rendering

use crate::color::Color;
use crate::grid::SectionGrid;
use crate::io::configuration::{
    CollageConfig, DEFAULT_CACHE_FILE, DEFAULT_CELL_SIZE, DEFAULT_GRID_COLUMNS,
    DEFAULT_GRID_ROWS, DEFAULT_PENALTY, OUTPUT_EXTENSION, OUTPUT_SUFFIX, default_extensions,
};
use crate::io::error::{MosaicError, Result, input_not_found, invalid_parameter};
use crate::io::image::{export_image, get_image_files, has_supported_extension, load_rgb_image};
use crate::io::progress::{CollageStage, ProgressManager};
use crate::matching::SectionMatcher;
use crate::palette::{categorize_directory, load_palette, palette_entries, save_palette};
use crate::render::{CollageRenderer, prepare_tiles};
use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Clone)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Build photomosaics from a palette of source images"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

/// Subcommands of the mosaic tool
#[derive(Subcommand, Clone)]
pub enum Command {
    /// Compute average colors of source images and store them in the palette cache
    Categorize(CategorizeArgs),
    /// Render a collage for a target image or every image in a directory
    Collage(CollageArgs),
}

/// Arguments of the `categorize` subcommand
#[derive(Args, Clone)]
pub struct CategorizeArgs {
    /// Directory scanned recursively for source images
    #[arg(value_name = "SOURCE_DIR")]
    pub source: PathBuf,

    /// Palette cache file to write
    #[arg(short, long, default_value = DEFAULT_CACHE_FILE)]
    pub cache: PathBuf,

    /// Comma-separated file extensions to include
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,
}

impl CategorizeArgs {
    /// Requested extensions, or the defaults when none were given
    pub fn extensions(&self) -> Vec<String> {
        self.extensions.clone().unwrap_or_else(default_extensions)
    }
}

/// Arguments of the `collage` subcommand
#[derive(Args, Clone)]
pub struct CollageArgs {
    /// Target image file or directory of target images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Palette cache file produced by `categorize`
    #[arg(short, long, default_value = DEFAULT_CACHE_FILE)]
    pub cache: PathBuf,

    /// Grid columns across each target
    #[arg(short = 'x', long, default_value_t = DEFAULT_GRID_COLUMNS)]
    pub columns: u32,

    /// Grid rows down each target
    #[arg(short = 'y', long, default_value_t = DEFAULT_GRID_ROWS)]
    pub rows: u32,

    /// Edge length of one collage cell in pixels
    #[arg(short = 's', long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Score inflation per prior use of a source image
    #[arg(short, long, default_value_t = DEFAULT_PENALTY, allow_negative_numbers = true)]
    pub penalty: f64,

    /// Directory for rendered collages (defaults to each target's directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Render even if the output file already exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Comma-separated target extensions when TARGET is a directory
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,
}

impl CollageArgs {
    /// Run parameters collected from the flags
    pub const fn config(&self) -> CollageConfig {
        CollageConfig {
            columns: self.columns,
            rows: self.rows,
            cell_size: self.cell_size,
            penalty: self.penalty,
        }
    }

    /// Requested extensions, or the defaults when none were given
    pub fn extensions(&self) -> Vec<String> {
        self.extensions.clone().unwrap_or_else(default_extensions)
    }

    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter used when `RUST_LOG` is not set
    pub const fn default_log_filter(&self) -> &'static str {
        if self.quiet {
            "photomosaic=warn"
        } else if self.verbose {
            "photomosaic=debug"
        } else {
            "photomosaic=info"
        }
    }
}

/// Orchestrates categorization and batch collage rendering with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

/// Everything a single collage needs that is shared across a batch
struct CollageJob<'a> {
    args: &'a CollageArgs,
    config: CollageConfig,
    matcher: SectionMatcher,
    renderer: CollageRenderer,
    palette: &'a [(PathBuf, Color)],
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

    /// Run the requested subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if parameter validation, input discovery, palette
    /// loading, or processing of a target fails
    pub fn process(&mut self) -> Result<()> {
        match self.cli.command.clone() {
            Command::Categorize(args) => self.categorize(&args),
            Command::Collage(args) => self.collage(&args),
        }
    }

    fn categorize(&self, args: &CategorizeArgs) -> Result<()> {
        let extensions = args.extensions();
        let progress = self
            .progress_manager
            .as_ref()
            .map_or_else(ProgressBar::hidden, |pm| pm.scan_bar(0));

        let categorization = categorize_directory(&args.source, &extensions, &progress)?;
        save_palette(&categorization.records, &args.cache)?;
        categorization.log_summary();
        Ok(())
    }

    fn collage(&mut self, args: &CollageArgs) -> Result<()> {
        let config = args.config();
        config.validate()?;
        let matcher = SectionMatcher::new(config.penalty)?;
        let renderer = CollageRenderer::new(config.columns, config.rows, config.cell_size)?;

        let files = Self::collect_targets(args)?;
        if files.is_empty() {
            tracing::info!(path = %args.target.display(), "Nothing to render");
            return Ok(());
        }

        let records = load_palette(&args.cache)?;
        let palette = palette_entries(&records);
        if palette.is_empty() {
            return Err(MosaicError::EmptyPalette {
                sections: config.columns as usize * config.rows as usize,
            });
        }

        let job = CollageJob {
            args,
            config,
            matcher,
            renderer,
            palette: &palette,
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let outcome = files
            .iter()
            .enumerate()
            .try_for_each(|(index, file)| self.process_target(&job, file, index));

        // Cleared on failure too
        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        outcome
    }

    fn collect_targets(args: &CollageArgs) -> Result<Vec<PathBuf>> {
        let extensions = args.extensions();

        let candidates = if args.target.is_file() {
            if !has_supported_extension(&args.target, &extensions) {
                return Err(invalid_parameter(
                    "target",
                    &args.target.display(),
                    &format!("expected one of: {}", extensions.join(", ")),
                ));
            }
            vec![args.target.clone()]
        } else if args.target.is_dir() {
            get_image_files(&args.target, &extensions)?
                .into_iter()
                .filter(|path| !Self::is_rendered_output(path))
                .collect()
        } else {
            return Err(input_not_found(&args.target, "Target"));
        };

        Ok(candidates
            .into_iter()
            .filter(|path| Self::should_process_file(args, path))
            .collect())
    }

    fn should_process_file(args: &CollageArgs, input_path: &Path) -> bool {
        if !args.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path, args.output_dir.as_deref());
        if output_path.exists() {
            tracing::info!(
                file = %input_path.display(),
                output = %output_path.display(),
                "Skipping target, output exists"
            );
            false
        } else {
            true
        }
    }

    fn is_rendered_output(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
    }

    fn enter_stage(&mut self, index: usize, stage: CollageStage) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.enter_stage(index, stage);
        }
    }

    fn process_target(&mut self, job: &CollageJob<'_>, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path, job.args.output_dir.as_deref());

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        self.enter_stage(index, CollageStage::Sections);
        let target = load_rgb_image(input_path)?;
        let grid = SectionGrid::from_image(&target, job.config.columns, job.config.rows)?;

        self.enter_stage(index, CollageStage::Matching);
        let result = job.matcher.match_sections(&grid.sections(), job.palette)?;
        if let Some((image, uses)) = result.usage().most_used() {
            tracing::debug!(
                distinct = result.usage().distinct(),
                most_used = %image.display(),
                uses,
                "Palette usage"
            );
        }

        self.enter_stage(index, CollageStage::Tiles);
        let tiles = prepare_tiles(
            result.assignments().iter().map(|(_, image)| image),
            job.renderer.cell_size(),
        );

        self.enter_stage(index, CollageStage::Rendering);
        let canvas = job.renderer.render_matches(&result, &tiles);

        self.enter_stage(index, CollageStage::Export);
        export_image(&canvas, &output_path)?;

        let elapsed = start_time.elapsed();
        tracing::info!(
            file = %input_path.display(),
            output = %output_path.display(),
            sections = result.len(),
            ?elapsed,
            "Collage written"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, elapsed);
        }

        Ok(())
    }

    /// Output path of the collage rendered for `input_path`
    pub fn get_output_path(input_path: &Path, output_dir: Option<&Path>) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            OUTPUT_EXTENSION
        );

        match output_dir.or_else(|| input_path.parent()) {
            Some(dir) => dir.join(output_name),
            None => PathBuf::from(output_name),
        }
    }
}
