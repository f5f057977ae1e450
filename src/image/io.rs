//! Convenience helpers for decoding and encoding images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{Image, ImageView};
use crate::util::{MorphError, MorphResult};
use image::{ColorType, DynamicImage};
use std::path::Path;

/// Converts a decoded image into an owned buffer with `channels` samples per
/// pixel (1 = luma, 2 = luma+alpha, 3 = RGB, 4 = RGBA).
pub fn image_from_dynamic(img: &DynamicImage, channels: usize) -> MorphResult<Image> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = match channels {
        1 => img.to_luma8().into_raw(),
        2 => img.to_luma_alpha8().into_raw(),
        3 => img.to_rgb8().into_raw(),
        4 => img.to_rgba8().into_raw(),
        _ => return Err(MorphError::InvalidChannels { channels }),
    };
    Image::new(data, width, height, channels)
}

/// Loads an image from disk and converts it to `channels` samples per pixel.
pub fn load_image<P: AsRef<Path>>(path: P, channels: usize) -> MorphResult<Image> {
    let path = path.as_ref();
    if channels == 0 || channels > crate::image::MAX_CHANNELS {
        return Err(MorphError::InvalidChannels { channels });
    }
    let img = image::open(path).map_err(|err| MorphError::ImageIo {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    image_from_dynamic(&img, channels)
}

/// Encodes a view to disk; the format is inferred from the path extension.
pub fn save_view<P: AsRef<Path>>(view: ImageView<'_>, path: P) -> MorphResult<()> {
    let path = path.as_ref();
    let color = match view.channels() {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        channels => return Err(MorphError::InvalidChannels { channels }),
    };
    let width = u32::try_from(view.width()).map_err(|_| MorphError::InvalidDimensions {
        width: view.width(),
        height: view.height(),
    })?;
    let height = u32::try_from(view.height()).map_err(|_| MorphError::InvalidDimensions {
        width: view.width(),
        height: view.height(),
    })?;
    image::save_buffer(path, view.as_slice(), width, height, color).map_err(|err| {
        MorphError::ImageIo {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    })
}

/// Encodes an owned image to disk.
pub fn save_image<P: AsRef<Path>>(img: &Image, path: P) -> MorphResult<()> {
    save_view(img.view(), path)
}
