use ::image::imageops;
use ::image::{DynamicImage, Rgb, RgbImage};
use log::warn;
use rusttype::{point, Font, GlyphId, Scale};

use crate::config::{Geometry, NameTagConfig};
use crate::error::AppError;
use crate::qr::{generate_qr, profile_url};
use crate::roster::AttendeeRecord;

const BACKGROUND_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT_COLOR: [u8; 3] = [0, 0, 0];

// ============================================================================
// Font Loading & Measurement
// ============================================================================

/// The bold face used for names, loaded once per run.
pub struct NameFont {
    font: Font<'static>,
    scale: Scale,
    ascent: f32,
}

/// Ink extents of a laid-out string in pixels. The origin sits on the
/// font's ascender line at the pen start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl InkBounds {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }
}

impl NameFont {
    /// Loads face `index` of the font file at `path`. `size_px` is the em size.
    pub fn load(path: &str, index: u32, size_px: f32) -> Result<NameFont, AppError> {
        let data = std::fs::read(path).map_err(|e| AppError::Resource(format!("{}: {}", path, e)))?;
        let font = Font::try_from_vec_and_index(data, index).ok_or_else(|| {
            AppError::Resource(format!("{}: not a usable font (face index {})", path, index))
        })?;

        // rusttype scales by ascent-to-descent height; convert the em size into that
        let unscaled = font.v_metrics_unscaled();
        let units_per_em = font.units_per_em() as f32;
        let pixel_height = size_px * (unscaled.ascent - unscaled.descent) / units_per_em;
        let scale = Scale::uniform(pixel_height);
        let ascent = font.v_metrics(scale).ascent;

        Ok(NameFont { font, scale, ascent })
    }

    /// Fails on the first visible character the face has no glyph for.
    pub fn check_coverage(&self, text: &str) -> Result<(), AppError> {
        match text
            .chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .find(|&c| self.font.glyph(c).id() == GlyphId(0))
        {
            Some(c) => Err(AppError::Render(format!(
                "font has no glyph for {:?} (U+{:04X}) in \"{}\"",
                c, c as u32, text
            ))),
            None => Ok(()),
        }
    }

    /// Measures the ink actually produced by `text`, not the nominal line box.
    /// Returns `None` when nothing would be drawn.
    pub fn measure(&self, text: &str) -> Option<InkBounds> {
        self.font
            .layout(text, self.scale, point(0.0, self.ascent))
            .filter_map(|glyph| glyph.pixel_bounding_box())
            .fold(None, |acc: Option<InkBounds>, bb| {
                Some(match acc {
                    None => InkBounds {
                        min_x: bb.min.x,
                        min_y: bb.min.y,
                        max_x: bb.max.x,
                        max_y: bb.max.y,
                    },
                    Some(b) => InkBounds {
                        min_x: b.min_x.min(bb.min.x),
                        min_y: b.min_y.min(bb.min.y),
                        max_x: b.max_x.max(bb.max.x),
                        max_y: b.max_y.max(bb.max.y),
                    },
                })
            })
    }

    /// Draws `text` with its ascender line at `top` and the pen starting at `x`.
    fn draw(&self, image: &mut RgbImage, text: &str, x: i32, top: i32) {
        let (width, height) = image.dimensions();
        let origin = point(x as f32, top as f32 + self.ascent);

        for glyph in self.font.layout(text, self.scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                for (channel, ink) in pixel.0.iter_mut().zip(TEXT_COLOR) {
                    let blended = *channel as f32 * (1.0 - coverage) + ink as f32 * coverage;
                    *channel = blended.round() as u8;
                }
            });
        }
    }
}

// ============================================================================
// Label Rendering
// ============================================================================

/// Renders one name tag of exactly `label_width_px` x `label_height_px`.
///
/// Long names are not wrapped or clipped; they run over the QR code.
pub fn render_label(
    record: &AttendeeRecord,
    font: &NameFont,
    config: &NameTagConfig,
    geometry: &Geometry,
) -> Result<RgbImage, AppError> {
    let width = geometry.label_width_px;
    let height = geometry.label_height_px;
    let mut label = RgbImage::from_pixel(width, height, BACKGROUND_COLOR);

    draw_border(&mut label, config.border_width_px, Rgb(config.border_color));

    // QR code, right-aligned and vertically centred
    let url = profile_url(&config.profile_base_url, &record.handle);
    let qr = DynamicImage::ImageLuma8(generate_qr(&url, geometry.qr_size_px)?).to_rgb8();
    let qr_x = width as i64 - qr.width() as i64 - config.qr_right_margin_px as i64;
    let qr_y = (height as i64 - qr.height() as i64) / 2;
    imageops::replace(&mut label, &qr, qr_x, qr_y);

    // Name, left-aligned and centred on its measured ink height
    font.check_coverage(&record.display_name)?;
    if let Some(bounds) = font.measure(&record.display_name) {
        let text_x = geometry.name_left_margin_px as i32;
        let text_y = (height as i32 - bounds.height()) / 2;

        if text_x as i64 + bounds.max_x as i64 > qr_x {
            warn!(
                "Name \"{}\" is {}px wide and overlaps the QR code",
                record.display_name,
                bounds.width()
            );
        }

        font.draw(&mut label, &record.display_name, text_x, text_y);
    }

    Ok(label)
}

fn draw_border(image: &mut RgbImage, border_width: u32, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let on_edge = x < border_width
            || y < border_width
            || x + border_width >= width
            || y + border_width >= height;
        if on_edge {
            *pixel = color;
        }
    }
}

#[cfg(test)]
pub(crate) const FIXTURE_FONT: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSans-Bold.ttf");

#[cfg(test)]
pub(crate) fn fixture_config() -> NameTagConfig {
    NameTagConfig {
        font_path: FIXTURE_FONT.to_string(),
        font_index: 0,
        ..NameTagConfig::default()
    }
}
