//! Directory-backed YOLO dataset index.
//!
//! A dataset root is either a directory holding `images/` and, optionally,
//! `labels/`, or a flat directory of images with no labels at all. Label
//! files mirror the image paths under the labels directory with a `.txt`
//! extension.

use std::ops::{Bound, RangeBounds};
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use super::Descriptor;
use crate::error::YolovizError;

/// Image extensions picked up by the scan. Matched case-sensitively.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];
const LABEL_EXTENSION: &str = "txt";

/// Names of the sub-directories a dataset root is searched for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetLayout {
    pub images_directory_name: String,
    pub annotations_directory_name: String,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            images_directory_name: "images".to_string(),
            annotations_directory_name: "labels".to_string(),
        }
    }
}

/// An ordered, read-only collection of [`Descriptor`]s.
///
/// The directory is scanned once, in [`Dataset::open`]. Descriptors are built
/// on demand from the stored image list, so a label file added after opening
/// is still picked up, but a new image is not.
#[derive(Clone, Debug)]
pub struct Dataset {
    images_directory: PathBuf,
    annotations_directory: Option<PathBuf>,
    image_files: Vec<PathBuf>,
}

impl Dataset {
    /// Opens a dataset with the default `images`/`labels` layout.
    pub fn open_default(dataset_directory: &Path) -> Result<Self, YolovizError> {
        Self::open(dataset_directory, &DatasetLayout::default())
    }

    /// Resolves the directory layout under `dataset_directory` and scans it
    /// for images.
    pub fn open(dataset_directory: &Path, layout: &DatasetLayout) -> Result<Self, YolovizError> {
        let root = absolute_dir(dataset_directory)?;

        let images_candidate = root.join(&layout.images_directory_name);
        let annotations_candidate = root.join(&layout.annotations_directory_name);

        let (images_directory, annotations_directory) = if images_candidate.is_dir() {
            let annotations = annotations_candidate
                .is_dir()
                .then_some(annotations_candidate);
            (images_candidate, annotations)
        } else if annotations_candidate.is_dir() {
            return Err(YolovizError::NotFound {
                path: images_candidate,
            });
        } else {
            (root.clone(), None)
        };

        debug!(
            "images directory: {}, annotations directory: {}",
            images_directory.display(),
            annotations_directory
                .as_deref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "<none>".to_string())
        );

        let mut image_files = collect_image_files(&images_directory)?;
        image_files.sort();

        if image_files.is_empty() {
            return Err(YolovizError::EmptyDataset { path: root });
        }

        info!(
            "opened dataset {} with {} image(s)",
            root.display(),
            image_files.len()
        );

        Ok(Self {
            images_directory,
            annotations_directory,
            image_files,
        })
    }

    pub fn images_directory(&self) -> &Path {
        &self.images_directory
    }

    pub fn annotations_directory(&self) -> Option<&Path> {
        self.annotations_directory.as_deref()
    }

    /// Image paths in index order.
    pub fn image_files(&self) -> &[PathBuf] {
        &self.image_files
    }

    pub fn len(&self) -> usize {
        self.image_files.len()
    }

    /// Always false for an opened dataset.
    pub fn is_empty(&self) -> bool {
        self.image_files.is_empty()
    }

    /// Returns the descriptor at `index`. Negative indices count from the end.
    pub fn get(&self, index: isize) -> Result<Descriptor, YolovizError> {
        let position = self.resolve_index(index)?;
        self.descriptor_at(position)
    }

    /// Returns the descriptors in `range`, clamped to the dataset bounds.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Result<Vec<Descriptor>, YolovizError> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        }
        .min(len);

        (start..end.max(start))
            .map(|position| self.descriptor_at(position))
            .collect()
    }

    /// Like [`Dataset::slice`], but bounds may be negative and then count from
    /// the end. Both bounds are clamped, so `slice_from(Some(-2), None)` is
    /// the last two descriptors of any dataset with at least two images.
    pub fn slice_from(
        &self,
        start: Option<isize>,
        end: Option<isize>,
    ) -> Result<Vec<Descriptor>, YolovizError> {
        let len = self.len();
        let clamp = |bound: isize| -> usize {
            if bound < 0 {
                len.saturating_sub(bound.unsigned_abs())
            } else {
                (bound as usize).min(len)
            }
        };
        let start = start.map_or(0, clamp);
        let end = end.map_or(len, clamp);
        self.slice(start..end)
    }

    /// Iterates over every descriptor in index order.
    pub fn iter(&self) -> impl Iterator<Item = Result<Descriptor, YolovizError>> + '_ {
        (0..self.len()).map(move |position| self.descriptor_at(position))
    }

    /// Where the label file for `image_file` would live, if there is a labels
    /// directory at all.
    pub fn expected_annotation_file(&self, image_file: &Path) -> Option<PathBuf> {
        let annotations_directory = self.annotations_directory.as_ref()?;
        let rel = image_file
            .strip_prefix(&self.images_directory)
            .unwrap_or(image_file);
        Some(annotations_directory.join(rel.with_extension(LABEL_EXTENSION)))
    }

    fn resolve_index(&self, index: isize) -> Result<usize, YolovizError> {
        let len = self.len();
        let position = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index as usize).filter(|&position| position < len)
        };
        position.ok_or(YolovizError::IndexOutOfRange { index, len })
    }

    fn descriptor_at(&self, position: usize) -> Result<Descriptor, YolovizError> {
        let len = self.len();
        let image_file = self
            .image_files
            .get(position)
            .ok_or(YolovizError::IndexOutOfRange {
                index: position as isize,
                len,
            })?;

        let annotation_file = self
            .expected_annotation_file(image_file)
            .filter(|candidate| candidate.is_file());

        Descriptor::new(image_file.clone(), annotation_file)
    }
}

fn absolute_dir(path: &Path) -> Result<PathBuf, YolovizError> {
    let resolved = std::path::absolute(path).map_err(|_| YolovizError::NotFound {
        path: path.to_path_buf(),
    })?;
    if !resolved.is_dir() {
        return Err(YolovizError::NotFound { path: resolved });
    }
    Ok(resolved)
}

fn collect_image_files(images_directory: &Path) -> Result<Vec<PathBuf>, YolovizError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(images_directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Broken links and unreadable entries only matter when they
            // could have been an image.
            Err(source) if !source.path().is_some_and(has_image_extension) => {
                debug!("skipping unreadable entry: {}", source);
                continue;
            }
            Err(source) => {
                return Err(YolovizError::DirectoryWalk {
                    path: images_directory.to_path_buf(),
                    source,
                })
            }
        };

        if entry.file_type().is_file() && has_image_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    ALLOWED_IMAGE_EXTENSIONS.contains(&ext)
}
