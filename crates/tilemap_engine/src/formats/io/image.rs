//! Image backed maps: every 8 bit color channel holds one layer.

use std::path::Path;

use ::image::{ColorType, DynamicImage, ImageError, ImageFormat};

use crate::{HeaderError, Result, Size, TileGrid, TileId, TileMapError};

/// Most layers an image can hold (RGBA).
pub const MAX_IMAGE_LAYERS: usize = 4;

fn split_channels(raw: &[u8], channels: usize) -> Vec<Vec<TileId>> {
    (0..channels).map(|c| raw.iter().skip(c).step_by(channels).copied().collect()).collect()
}

/// Decodes an image into a grid, one layer per channel.
///
/// PNG, BMP, GIF and JPEG are recognized by their signature, anything else is
/// tried as TGA. Data the image decoder cannot make sense of is reported as a
/// missing `map:` header, it was neither a text map nor an image.
pub fn decode_image(data: &[u8]) -> Result<TileGrid> {
    let image = ::image::load_from_memory(data)
        .or_else(|_| ::image::load_from_memory_with_format(data, ImageFormat::Tga))
        .map_err(|err| {
            log::debug!("not an image map: {err}");
            TileMapError::MalformedHeader(HeaderError::MissingMapKeyword)
        })?;

    let (Ok(width), Ok(height)) = (i32::try_from(image.width()), i32::try_from(image.height())) else {
        return Err(TileMapError::UnsupportedImage {
            message: format!("{}x{} pixels is too large", image.width(), image.height()),
        });
    };

    let layers = match &image {
        DynamicImage::ImageLuma8(buf) => split_channels(buf.as_raw(), 1),
        DynamicImage::ImageLumaA8(buf) => split_channels(buf.as_raw(), 2),
        DynamicImage::ImageRgb8(buf) => split_channels(buf.as_raw(), 3),
        DynamicImage::ImageRgba8(buf) => split_channels(buf.as_raw(), 4),
        other => {
            return Err(TileMapError::UnsupportedImage {
                message: format!("{:?} has no 8 bit channels", other.color()),
            });
        }
    };
    Ok(TileGrid::from_layers(Size::new(width, height), layers))
}

/// Writes the grid as PNG, interleaving the layers as color channels.
pub fn encode_image(grid: &TileGrid, path: &Path) -> Result<()> {
    let layers = grid.layer_count();
    let color = match layers {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        _ => return Err(TileMapError::UnsupportedLayerCountForImage { layers }),
    };

    let cells = grid.width() as usize * grid.height() as usize;
    let mut pixels = Vec::with_capacity(cells * layers);
    for i in 0..cells {
        for k in 0..layers {
            pixels.push(grid.layer(k).map_or(0, |layer| layer[i]));
        }
    }

    ::image::save_buffer_with_format(path, &pixels, grid.width() as u32, grid.height() as u32, color, ImageFormat::Png).map_err(
        |err| match err {
            ImageError::IoError(source) => TileMapError::io_unavailable(path, source),
            err => TileMapError::Image(err),
        },
    )
}
