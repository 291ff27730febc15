//! Viewer navigation and zoom state.
//!
//! Input is reduced to a small set of logical [`Action`]s before it reaches
//! the [`Navigator`], so the stepping and zoom rules do not depend on any
//! windowing library. [`window`] hosts the navigator in a real window.

pub mod window;

use log::info;

pub const DEFAULT_ZOOM_STEP: f64 = 0.1;
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
const APP_TITLE: &str = "YOLO Dataset Viewer";

/// Logical viewer commands, independent of how they were triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Next,
    Previous,
    ZoomIn,
    ZoomOut,
    Quit,
}

/// What the host has to do after an action was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// The current index changed; render the new image.
    Redraw,
    /// Only the zoom factor changed; rescale the current image.
    Rescale,
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerOptions {
    /// Added to or removed from the zoom factor per zoom action.
    pub zoom_step: f64,
    /// Zooming out never goes below this factor.
    pub min_zoom: f64,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            min_zoom: DEFAULT_MIN_ZOOM,
        }
    }
}

/// Current position and zoom factor over a dataset of `len` images.
#[derive(Clone, Debug, PartialEq)]
pub struct Navigator {
    len: usize,
    index: usize,
    zoom: f64,
    options: ViewerOptions,
}

impl Navigator {
    /// Starts at index 0 with zoom 1.0. `len` must be non-zero.
    pub fn new(len: usize, options: ViewerOptions) -> Self {
        debug_assert!(len > 0, "navigator over an empty dataset");
        Self {
            len,
            index: 0,
            zoom: 1.0,
            options,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Applies `action` and reports what the host has to redo.
    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::Next => {
                self.index = (self.index + 1) % self.len;
                self.reset_zoom();
                info!("showing image {}/{}", self.index + 1, self.len);
                Effect::Redraw
            }
            Action::Previous => {
                self.index = (self.index + self.len - 1) % self.len;
                self.reset_zoom();
                info!("showing image {}/{}", self.index + 1, self.len);
                Effect::Redraw
            }
            Action::ZoomIn => {
                self.zoom += self.options.zoom_step;
                Effect::Rescale
            }
            Action::ZoomOut => {
                self.zoom = (self.zoom - self.options.zoom_step).max(self.options.min_zoom);
                Effect::Rescale
            }
            Action::Quit => Effect::Close,
        }
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Window caption for the image `name` at the current index.
    pub fn caption(&self, name: &str) -> String {
        format!(
            "{} ({}/{}) - {}",
            name,
            self.index + 1,
            self.len,
            APP_TITLE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator(len: usize) -> Navigator {
        Navigator::new(len, ViewerOptions::default())
    }

    #[test]
    fn next_wraps_to_first() {
        let mut nav = navigator(3);
        assert_eq!(nav.apply(Action::Next), Effect::Redraw);
        assert_eq!(nav.apply(Action::Next), Effect::Redraw);
        assert_eq!(nav.index(), 2);
        nav.apply(Action::Next);
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut nav = navigator(3);
        assert_eq!(nav.apply(Action::Previous), Effect::Redraw);
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn single_image_dataset_stays_put() {
        let mut nav = navigator(1);
        nav.apply(Action::Next);
        assert_eq!(nav.index(), 0);
        nav.apply(Action::Previous);
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn navigation_resets_zoom() {
        let mut nav = navigator(2);
        nav.apply(Action::ZoomIn);
        nav.apply(Action::ZoomIn);
        assert!(nav.zoom() > 1.0);
        nav.apply(Action::Next);
        assert_eq!(nav.zoom(), 1.0);

        nav.apply(Action::ZoomOut);
        assert!(nav.zoom() < 1.0);
        nav.apply(Action::Previous);
        assert_eq!(nav.zoom(), 1.0);
    }

    #[test]
    fn zoom_in_has_no_ceiling() {
        let mut nav = navigator(1);
        for _ in 0..100 {
            assert_eq!(nav.apply(Action::ZoomIn), Effect::Rescale);
        }
        assert!((nav.zoom() - 11.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_out_clamps_at_floor() {
        let mut nav = navigator(1);
        nav.zoom = 0.15;
        nav.apply(Action::ZoomOut);
        assert_eq!(nav.zoom(), 0.1);

        for _ in 0..20 {
            nav.apply(Action::ZoomOut);
        }
        assert_eq!(nav.zoom(), 0.1);
    }

    #[test]
    fn zoom_floor_is_configurable() {
        let mut nav = Navigator::new(
            1,
            ViewerOptions {
                zoom_step: 0.5,
                min_zoom: 0.25,
            },
        );
        nav.apply(Action::ZoomOut);
        nav.apply(Action::ZoomOut);
        assert_eq!(nav.zoom(), 0.25);
    }

    #[test]
    fn quit_closes_without_moving() {
        let mut nav = navigator(4);
        nav.apply(Action::Next);
        assert_eq!(nav.apply(Action::Quit), Effect::Close);
        assert_eq!(nav.index(), 1);
    }

    #[test]
    fn caption_is_one_based() {
        let mut nav = navigator(12);
        nav.apply(Action::Next);
        assert_eq!(
            nav.caption("cat.png"),
            "cat.png (2/12) - YOLO Dataset Viewer"
        );
    }
}
