//! YOLO annotation records.
//!
//! One line of a label file describes one object:
//!
//! ```text
//! <class_id> <x_center> <y_center> <width> <height>
//! ```
//!
//! The four geometry values are fractions of the image size in `(0, 1]`.

use std::str::FromStr;

use serde::Serialize;

use super::{BBoxXYXY, Normalized};
use crate::error::AnnotationError;

const VALUE_COUNT: usize = 5;

/// A single validated YOLO annotation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Annotation {
    /// Class id of the object.
    pub label: u64,
    pub norm_x_center: f64,
    pub norm_y_center: f64,
    pub norm_width: f64,
    pub norm_height: f64,
}

impl Annotation {
    /// Parses and validates one label file line.
    ///
    /// Tokens are separated by any run of whitespace. A blank line is a
    /// malformed record, not something to skip.
    pub fn from_line(line: &str) -> Result<Self, AnnotationError> {
        // Take at most 6 tokens so pathological inputs do not allocate unbounded memory.
        let tokens: Vec<&str> = line.split_whitespace().take(VALUE_COUNT + 1).collect();
        if tokens.len() != VALUE_COUNT {
            return Err(AnnotationError::MalformedRecord {
                line: line.to_string(),
                found: tokens.len(),
            });
        }

        // i128 so that negative ids reach the range check below.
        let label = tokens[0]
            .parse::<i128>()
            .map_err(|_| AnnotationError::InvalidValue {
                line: line.to_string(),
                field: "label",
                token: tokens[0].to_string(),
                expected: "integer",
            })?;

        let norm_x_center = parse_real(line, tokens[1], "x_center")?;
        let norm_y_center = parse_real(line, tokens[2], "y_center")?;
        let norm_width = parse_real(line, tokens[3], "width")?;
        let norm_height = parse_real(line, tokens[4], "height")?;

        let label = u64::try_from(label).map_err(|_| AnnotationError::OutOfRange {
            field: "label",
            value: label as f64,
            expected: "an integer in [0, 2^64)",
        })?;

        for (field, value) in [
            ("x_center", norm_x_center),
            ("y_center", norm_y_center),
            ("width", norm_width),
            ("height", norm_height),
        ] {
            // Written so that NaN fails too.
            if !(value > 0.0 && value <= 1.0) {
                return Err(AnnotationError::OutOfRange {
                    field,
                    value,
                    expected: "a value in (0, 1]",
                });
            }
        }

        Ok(Self {
            label,
            norm_x_center,
            norm_y_center,
            norm_width,
            norm_height,
        })
    }

    /// The annotation's box in normalized XYXY form.
    pub fn bbox(&self) -> BBoxXYXY<Normalized> {
        BBoxXYXY::from_cxcywh(
            self.norm_x_center,
            self.norm_y_center,
            self.norm_width,
            self.norm_height,
        )
    }
}

impl FromStr for Annotation {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_line(s)
    }
}

fn parse_real(line: &str, raw: &str, field: &'static str) -> Result<f64, AnnotationError> {
    raw.parse::<f64>()
        .map_err(|_| AnnotationError::InvalidValue {
            line: line.to_string(),
            field,
            token: raw.to_string(),
            expected: "floating-point number",
        })
}

/// Fuzz-only entrypoint for single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_line(input: &str) -> Result<(), AnnotationError> {
    let _ = Annotation::from_line(input)?;
    Ok(())
}
