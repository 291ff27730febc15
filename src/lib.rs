//! Yoloviz: a viewer for YOLO-annotated image datasets.
//!
//! Yoloviz steps through a directory of images and draws the bounding boxes
//! from their YOLO label files on top of them. Label files are read, never
//! written.
//!
//! # Modules
//!
//! - [`ir`]: Dataset index, image/label descriptors and annotation parsing
//! - [`render`]: Drawing annotation boxes onto images
//! - [`viewer`]: Navigation/zoom state and the window host
//! - [`check`]: Read-only dataset checking
//! - [`error`]: Error types for yoloviz operations

pub mod check;
pub mod color;
pub mod error;
pub mod ir;
pub mod render;
pub mod viewer;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use color::BoxColor;
pub use error::{AnnotationError, YolovizError};

use ir::{Dataset, DatasetLayout};
use render::BoxRenderer;

/// The yoloviz CLI application.
#[derive(Parser)]
#[command(name = "yoloviz")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse a dataset with its bounding boxes drawn.
    View(ViewArgs),
    /// Load every label file of a dataset and report problems.
    Check(CheckArgs),
}

/// Where the dataset lives and how it is laid out.
#[derive(clap::Args)]
struct DatasetArgs {
    /// Dataset root directory.
    dataset_directory: PathBuf,

    /// Name of the images sub-directory.
    #[arg(long, default_value = "images")]
    images_dir: String,

    /// Name of the labels sub-directory.
    #[arg(long, default_value = "labels")]
    labels_dir: String,
}

impl DatasetArgs {
    fn open(&self) -> Result<Dataset, YolovizError> {
        let layout = DatasetLayout {
            images_directory_name: self.images_dir.clone(),
            annotations_directory_name: self.labels_dir.clone(),
        };
        Dataset::open(&self.dataset_directory, &layout)
    }
}

/// Arguments for the view subcommand.
#[derive(clap::Args)]
struct ViewArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Bounding box color, by name ('red') or hex ('#ff0000').
    #[arg(short, long, env = "YOLOVIZ_COLOR", default_value = "red")]
    color: BoxColor,

    /// Bounding box outline thickness in pixels.
    #[arg(
        short,
        long,
        env = "YOLOVIZ_THICKNESS",
        default_value_t = render::DEFAULT_THICKNESS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    thickness: u32,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Also decode every image.
    #[arg(long)]
    decode: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the yoloviz CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), YolovizError> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::View(args)) => run_view(args),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            println!("yoloviz {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("A viewer for YOLO-annotated image datasets.");
            println!();
            println!("Run 'yoloviz --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the view subcommand.
fn run_view(args: ViewArgs) -> Result<(), YolovizError> {
    // The dataset is opened before any window so that a bad directory never
    // shows a display.
    let dataset = args.dataset.open()?;
    let renderer = BoxRenderer::new(args.color, args.thickness);
    viewer::window::run_viewer(&dataset, &renderer, viewer::ViewerOptions::default())
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), YolovizError> {
    let dataset = args.dataset.open()?;
    let opts = check::CheckOptions {
        decode_images: args.decode,
    };
    let report = check::check_dataset(&dataset, &opts);

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| YolovizError::Io(std::io::Error::other(e)))?;
            println!("{}", json);
        }
        _ => print!("{}", report),
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(YolovizError::CheckFailed {
            errors: report.error_count(),
            images: report.image_count,
        })
    }
}
