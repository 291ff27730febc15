#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, Rgb([0, 0, 0]))
        .save(path)
        .expect("write png file");
}

pub fn write_labels(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write label file");
}

/// `images/` + `labels/` dataset with three 40x20 images; only `a` and `b`
/// have label files.
pub fn create_basic_dataset(root: &Path) {
    for name in ["a", "b", "c"] {
        write_png(&root.join("images").join(format!("{name}.png")), 40, 20);
    }
    write_labels(&root.join("labels/a.txt"), "0 0.5 0.5 0.5 0.5\n");
    write_labels(
        &root.join("labels/b.txt"),
        "1 0.25 0.25 0.1 0.1\n2 0.75 0.75 0.2 0.2\n",
    );
}
