//! Check report types.
//!
//! A report is both printable for humans (`Display`) and serializable to
//! JSON for scripts.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{AnnotationError, YolovizError};

/// Everything found while checking a dataset.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CheckReport {
    /// Number of images in the dataset.
    pub image_count: usize,
    /// Number of images with a label file attached.
    pub annotated_image_count: usize,
    /// Number of annotation lines that parsed successfully.
    pub annotation_count: usize,
    pub issues: Vec<CheckIssue>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: CheckIssue) {
        self.issues.push(issue);
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// True if no errors were found. Warnings do not count.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Checked {} image(s), {} with labels, {} annotation(s)",
            self.image_count, self.annotated_image_count, self.annotation_count
        )?;

        if self.issues.is_empty() {
            return writeln!(f, "Check passed: no issues found");
        }

        writeln!(
            f,
            "Check completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// One problem with one dataset file.
#[derive(Clone, Debug, Serialize)]
pub struct CheckIssue {
    pub severity: Severity,
    pub code: IssueCode,
    /// The file the issue is about.
    pub path: PathBuf,
    /// 1-based line number inside `path`, for annotation parse failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl CheckIssue {
    pub fn warning(code: IssueCode, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            path: path.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Turns a load failure into an error issue, keeping the path and line
    /// it carries.
    pub fn from_error(fallback_path: impl Into<PathBuf>, err: &YolovizError) -> Self {
        let (code, path, line, message) = match err {
            YolovizError::AnnotationParse { path, line, source } => {
                let code = match source {
                    AnnotationError::MalformedRecord { .. } => IssueCode::MalformedRecord,
                    AnnotationError::InvalidValue { .. } => IssueCode::InvalidValue,
                    AnnotationError::OutOfRange { .. } => IssueCode::OutOfRange,
                };
                (code, path.clone(), Some(*line), source.to_string())
            }
            YolovizError::AnnotationRead { path, source } => (
                IssueCode::UnreadableAnnotation,
                path.clone(),
                None,
                source.to_string(),
            ),
            YolovizError::Decode { path, source } => {
                (IssueCode::DecodeError, path.clone(), None, source.to_string())
            }
            other => (
                IssueCode::InvalidDescriptor,
                fallback_path.into(),
                None,
                other.to_string(),
            ),
        };

        Self {
            severity: Severity::Error,
            code,
            path,
            line,
            message,
        }
    }
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(f, "[{}] {:?} in {}", severity, self.code, self.path.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        write!(f, ": {}", self.message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

/// A stable code identifying the kind of issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    /// A label line does not hold exactly five values.
    MalformedRecord,
    /// A label line holds a non-numeric value.
    InvalidValue,
    /// A label line holds a negative class id or a coordinate outside (0, 1].
    OutOfRange,
    /// A label file could not be read as UTF-8 text.
    UnreadableAnnotation,
    /// An image could not be decoded.
    DecodeError,
    /// An image/label pair could not be formed.
    InvalidDescriptor,
    /// A labels directory exists but holds no file for this image.
    MissingAnnotation,
}
