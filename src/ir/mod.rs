//! Core dataset types for yoloviz.
//!
//! A [`Dataset`] is an ordered index of image files. Indexing it yields a
//! [`Descriptor`], which pairs one image with its optional YOLO label file
//! and loads either on demand. Each label line becomes an [`Annotation`].
//!
//! Pixel and normalized boxes are kept apart at the type level through the
//! [`Pixel`] and [`Normalized`] markers on [`BBoxXYXY`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use yoloviz::ir::Dataset;
//!
//! let dataset = Dataset::open_default(Path::new("datasets/coco8")).unwrap();
//! let last = dataset.get(-1).unwrap();
//! for annotation in last.load_annotations().unwrap() {
//!     println!("{} {:?}", annotation.label, annotation.bbox());
//! }
//! ```

mod annotation;
mod bbox;
mod dataset;
mod descriptor;
mod space;

pub use annotation::Annotation;
#[cfg(feature = "fuzzing")]
pub use annotation::fuzz_parse_line;
pub use bbox::BBoxXYXY;
pub use dataset::{Dataset, DatasetLayout, ALLOWED_IMAGE_EXTENSIONS};
pub use descriptor::Descriptor;
pub use space::{Normalized, Pixel};
