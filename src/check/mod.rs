//! Read-only dataset checking.
//!
//! Walks every image of a [`Dataset`] and loads its label file the same way
//! the viewer would, collecting failures instead of stopping at the first
//! one. Nothing on disk is modified.

mod report;

pub use report::{CheckIssue, CheckReport, IssueCode, Severity};

use log::debug;

use crate::ir::Dataset;

#[derive(Clone, Debug, Default)]
pub struct CheckOptions {
    /// Also decode every image. Slow on large datasets.
    pub decode_images: bool,
}

/// Checks every descriptor in `dataset` and reports what failed to load.
pub fn check_dataset(dataset: &Dataset, opts: &CheckOptions) -> CheckReport {
    let mut report = CheckReport::new();
    report.image_count = dataset.len();

    for (image_file, descriptor) in dataset.image_files().iter().zip(dataset.iter()) {
        let descriptor = match descriptor {
            Ok(descriptor) => descriptor,
            Err(err) => {
                report.add(CheckIssue::from_error(image_file, &err));
                continue;
            }
        };

        if opts.decode_images {
            if let Err(err) = descriptor.load_image() {
                report.add(CheckIssue::from_error(image_file, &err));
            }
        }

        match descriptor.annotation_file() {
            Some(_) => report.annotated_image_count += 1,
            None => {
                if let Some(expected) = dataset.expected_annotation_file(image_file) {
                    report.add(CheckIssue::warning(
                        IssueCode::MissingAnnotation,
                        image_file,
                        format!("no label file at {}", expected.display()),
                    ));
                }
                continue;
            }
        }

        match descriptor.load_annotations() {
            Ok(annotations) => {
                debug!("{}: {} annotation(s)", descriptor.name(), annotations.len());
                report.annotation_count += annotations.len();
            }
            Err(err) => report.add(CheckIssue::from_error(image_file, &err)),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn touch(path: &Path, contents: &[u8]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, contents).expect("write file");
    }

    #[test]
    fn clean_dataset_has_no_issues() {
        let temp = tempfile::tempdir().expect("create temp dir");
        touch(&temp.path().join("images/a.png"), b"x");
        touch(&temp.path().join("labels/a.txt"), b"0 0.5 0.5 0.1 0.1\n1 0.2 0.2 0.1 0.1\n");

        let dataset = Dataset::open_default(temp.path()).expect("open");
        let report = check_dataset(&dataset, &CheckOptions::default());

        assert!(report.issues.is_empty(), "{report}");
        assert_eq!(report.image_count, 1);
        assert_eq!(report.annotated_image_count, 1);
        assert_eq!(report.annotation_count, 2);
    }

    #[test]
    fn reports_parse_failures_and_keeps_going() {
        let temp = tempfile::tempdir().expect("create temp dir");
        touch(&temp.path().join("images/a.png"), b"x");
        touch(&temp.path().join("images/b.png"), b"x");
        touch(&temp.path().join("images/c.png"), b"x");
        touch(&temp.path().join("labels/a.txt"), b"0 0.5 0.5 0.1\n");
        touch(&temp.path().join("labels/b.txt"), b"0 0.5 0.5 0.1 0.1\n0 1.5 0.5 0.1 0.1\n");

        let dataset = Dataset::open_default(temp.path()).expect("open");
        let report = check_dataset(&dataset, &CheckOptions::default());

        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
        assert!(!report.is_ok());

        assert_eq!(report.issues[0].code, IssueCode::MalformedRecord);
        assert_eq!(report.issues[0].line, Some(1));
        assert_eq!(report.issues[1].code, IssueCode::OutOfRange);
        assert_eq!(report.issues[1].line, Some(2));
        assert_eq!(report.issues[2].code, IssueCode::MissingAnnotation);
    }

    #[test]
    fn decode_option_reports_corrupt_images() {
        let temp = tempfile::tempdir().expect("create temp dir");
        touch(&temp.path().join("a.png"), b"not an image");

        let dataset = Dataset::open_default(temp.path()).expect("open");
        let quick = check_dataset(&dataset, &CheckOptions::default());
        assert!(quick.is_ok());

        let thorough = check_dataset(
            &dataset,
            &CheckOptions {
                decode_images: true,
            },
        );
        assert_eq!(thorough.issues.len(), 1);
        assert_eq!(thorough.issues[0].code, IssueCode::DecodeError);
    }
}
