//! `minifb` window host for the [`Navigator`].

use image::{Rgb, RgbImage};
use log::{error, info};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use super::{Action, Effect, Navigator, ViewerOptions};
use crate::error::YolovizError;
use crate::ir::Dataset;
use crate::render::BoxRenderer;

const BACKGROUND: u32 = 0x0020_2020;
const PLACEHOLDER: Rgb<u8> = Rgb([64, 64, 64]);
const PLACEHOLDER_SIZE: (u32, u32) = (640, 480);
const TARGET_FPS: usize = 60;

/// Maps a raw key to the viewer action bound to it.
pub fn key_action(key: Key) -> Option<Action> {
    match key {
        Key::Escape | Key::Q => Some(Action::Quit),
        Key::Right | Key::N => Some(Action::Next),
        Key::Left | Key::P => Some(Action::Previous),
        Key::Equal | Key::NumPadPlus => Some(Action::ZoomIn),
        Key::Minus | Key::NumPadMinus => Some(Action::ZoomOut),
        _ => None,
    }
}

/// The rendered image for the current index plus its caption.
struct Frame {
    image: RgbImage,
    caption: String,
}

/// Renders the image at the navigator's index.
///
/// A failure does not end the session: it is logged, shown in the caption,
/// and a placeholder is drawn instead.
fn render_frame(dataset: &Dataset, renderer: &BoxRenderer, nav: &Navigator) -> Frame {
    let rendered = dataset
        .get(nav.index() as isize)
        .and_then(|descriptor| {
            let image = renderer.render(&descriptor)?;
            Ok((descriptor.name(), image))
        });

    match rendered {
        Ok((name, image)) => Frame {
            caption: nav.caption(&name),
            image,
        },
        Err(err) => {
            let name = dataset.image_files()[nav.index()]
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            error!("failed to render {}: {}", name, err);
            let (width, height) = PLACEHOLDER_SIZE;
            Frame {
                caption: format!("{} - error: {}", nav.caption(&name), err),
                image: RgbImage::from_pixel(width, height, PLACEHOLDER),
            }
        }
    }
}

/// Samples `image` at `zoom` into a `width` x `height` `0x00RRGGBB` buffer,
/// anchored at the top-left corner. Window pixel `(x, y)` shows source pixel
/// `(x / zoom, y / zoom)` (nearest neighbour); whatever falls outside the
/// image is background. The buffer is always exactly `width * height`.
pub fn blit(image: &RgbImage, zoom: f64, buffer: &mut Vec<u32>, width: usize, height: usize) {
    buffer.clear();
    buffer.resize(width * height, BACKGROUND);

    if zoom.is_nan() || zoom <= 0.0 {
        return;
    }
    let inv_zoom = 1.0 / zoom;
    let (src_width, src_height) = (image.width() as usize, image.height() as usize);

    for y in 0..height {
        let src_y = (y as f64 * inv_zoom) as usize;
        if src_y >= src_height {
            break;
        }
        let row = &mut buffer[y * width..(y + 1) * width];
        for (x, slot) in row.iter_mut().enumerate() {
            let src_x = (x as f64 * inv_zoom) as usize;
            if src_x >= src_width {
                break;
            }
            let Rgb([r, g, b]) = *image.get_pixel(src_x as u32, src_y as u32);
            *slot = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
        }
    }
}

/// Window size that shows `image` at 1:1.
fn window_size(image: &RgbImage) -> (usize, usize) {
    ((image.width() as usize).max(1), (image.height() as usize).max(1))
}

fn open_window(caption: &str, image: &RgbImage) -> Result<Window, YolovizError> {
    let (width, height) = window_size(image);
    let mut window = Window::new(
        caption,
        width,
        height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| YolovizError::Window(format!("failed to create window: {}", e)))?;
    window.set_target_fps(TARGET_FPS);
    Ok(window)
}

/// Opens a window on `dataset` and runs until it is closed.
pub fn run_viewer(
    dataset: &Dataset,
    renderer: &BoxRenderer,
    options: ViewerOptions,
) -> Result<(), YolovizError> {
    let mut nav = Navigator::new(dataset.len(), options);
    let mut frame = render_frame(dataset, renderer, &nav);
    let mut window = open_window(&frame.caption, &frame.image)?;
    info!("viewer opened on {} image(s)", dataset.len());

    let mut buffer: Vec<u32> = Vec::new();
    let mut buffer_size = (0, 0);
    let mut dirty = true;

    while window.is_open() {
        for key in window.get_keys_pressed(KeyRepeat::No) {
            let Some(action) = key_action(key) else {
                continue;
            };
            match nav.apply(action) {
                Effect::Close => return Ok(()),
                Effect::Redraw => {
                    let previous = window_size(&frame.image);
                    frame = render_frame(dataset, renderer, &nav);
                    if window_size(&frame.image) != previous {
                        // Recreated so the window matches the new frame.
                        window = open_window(&frame.caption, &frame.image)?;
                    } else {
                        window.set_title(&frame.caption);
                    }
                    dirty = true;
                }
                Effect::Rescale => dirty = true,
            }
        }

        let size = window.get_size();
        if dirty || size != buffer_size {
            let (width, height) = (size.0.max(1), size.1.max(1));
            blit(&frame.image, nav.zoom(), &mut buffer, width, height);
            buffer_size = (width, height);
            dirty = false;
        }

        window
            .update_with_buffer(&buffer, buffer_size.0, buffer_size.1)
            .map_err(|e| YolovizError::Window(format!("failed to update window: {}", e)))?;
    }

    Ok(())
}
