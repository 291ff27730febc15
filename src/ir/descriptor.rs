//! Image/annotation file pairing.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

use super::Annotation;
use crate::error::YolovizError;

/// One image file plus its optional label file.
///
/// Only paths are held. Pixels and annotations are read from disk each time
/// they are asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descriptor {
    image_file: PathBuf,
    annotation_file: Option<PathBuf>,
}

impl Descriptor {
    /// Pairs an image with an optional annotation file.
    ///
    /// Both files must exist, and the annotation file must share the image's
    /// stem.
    pub fn new(
        image_file: impl Into<PathBuf>,
        annotation_file: Option<PathBuf>,
    ) -> Result<Self, YolovizError> {
        let image_file = image_file.into();
        if !image_file.is_file() {
            return Err(YolovizError::MissingFile { path: image_file });
        }

        if let Some(annotation) = &annotation_file {
            if !annotation.is_file() {
                return Err(YolovizError::MissingFile {
                    path: annotation.clone(),
                });
            }
            if image_file.file_stem() != annotation.file_stem() {
                return Err(YolovizError::StemMismatch {
                    image: image_file,
                    annotation: annotation.clone(),
                });
            }
        }

        Ok(Self {
            image_file,
            annotation_file,
        })
    }

    /// Image file name, used for display.
    pub fn name(&self) -> String {
        self.image_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn image_file(&self) -> &Path {
        &self.image_file
    }

    pub fn annotation_file(&self) -> Option<&Path> {
        self.annotation_file.as_deref()
    }

    /// Decodes the image, converting whatever it holds to 8-bit RGB.
    pub fn load_image(&self) -> Result<RgbImage, YolovizError> {
        let decoded = image::open(&self.image_file).map_err(|source| YolovizError::Decode {
            path: self.image_file.clone(),
            source,
        })?;
        Ok(decoded.into_rgb8())
    }

    /// Reads and parses every line of the annotation file, in file order.
    ///
    /// Returns an empty list when no annotation file is attached. The first
    /// line that fails to parse aborts the whole load.
    pub fn load_annotations(&self) -> Result<Vec<Annotation>, YolovizError> {
        let Some(path) = &self.annotation_file else {
            return Ok(Vec::new());
        };

        let text = fs::read_to_string(path).map_err(|source| YolovizError::AnnotationRead {
            path: path.clone(),
            source,
        })?;

        text.lines()
            .enumerate()
            .map(|(line_idx, line)| {
                Annotation::from_line(line).map_err(|source| YolovizError::AnnotationParse {
                    path: path.clone(),
                    line: line_idx + 1,
                    source,
                })
            })
            .collect()
    }
}
