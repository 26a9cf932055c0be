use crate::core::font;
use crate::core::itf;
use crate::core::{BarcodeData, BarcodeImage, BarcodeRenderer, RenderOptions, Result};
use crate::utils::error::BarcodeError;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use std::io::Cursor;

use crate::domain::model::MAX_PIXELS;

/// Height of the human-readable digits, in points.
const TEXT_SIZE: f64 = 10.0;

const BACKGROUND: Luma<u8> = Luma([255]);
const FOREGROUND: Luma<u8> = Luma([0]);

/// Pixel placement of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layout {
    width: u32,
    height: u32,
    bar_top: u32,
    bar_bottom: u32,
    text: Option<TextLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TextLayout {
    x: u32,
    y: u32,
    scale: u32,
}

/// Rasterizes ITF symbols to grayscale PNG.
#[derive(Debug, Clone, Default)]
pub struct PngRenderer {
    options: RenderOptions,
}

impl PngRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn to_px(&self, points: f64) -> f64 {
        (points * self.options.px_per_point()).round().max(0.0)
    }

    fn layout(&self, text: &str, modules: u32) -> Result<Layout> {
        let opts = &self.options;
        let (width, _) = opts.canvas_px(modules as u64);
        let margin = self.to_px(opts.margin);
        let bar_top = margin;
        let bar_bottom = self.to_px(opts.margin + opts.module_height).max(bar_top + 1.0);

        // Shrink the digits until the whole payload fits across the image.
        let mut text_layout = None;
        let mut content_bottom = bar_bottom;
        if opts.write_text {
            let preferred = (self.to_px(TEXT_SIZE) / font::GLYPH_HEIGHT as f64).floor().max(1.0);
            let unit_width = font::text_width(text, 1).max(1) as f64;
            let scale = preferred.min((width / unit_width).floor()).max(1.0);
            let text_width = unit_width * scale;
            let y = bar_bottom + margin;
            text_layout = Some((((width - text_width) / 2.0).max(0.0).floor(), y, scale));
            content_bottom = y + font::GLYPH_HEIGHT as f64 * scale;
        }
        let height = content_bottom + margin;

        let pixels = width * height;
        if width < 1.0 || !pixels.is_finite() || pixels > MAX_PIXELS {
            return Err(BarcodeError::ImageTooLarge {
                width: width as u64,
                height: height as u64,
            });
        }

        Ok(Layout {
            width: width as u32,
            height: height as u32,
            bar_top: bar_top as u32,
            bar_bottom: bar_bottom as u32,
            text: text_layout.map(|(x, y, scale)| TextLayout {
                x: x as u32,
                y: y as u32,
                scale: scale as u32,
            }),
        })
    }

    fn draw(&self, data: &BarcodeData) -> Result<GrayImage> {
        let opts = &self.options;
        let runs = itf::encode_runs(data.as_str(), opts.narrow_modules, opts.wide_modules)?;
        let modules = itf::module_count(&runs);
        let layout = self.layout(data.as_str(), modules)?;

        let mut img = GrayImage::from_pixel(layout.width, layout.height, BACKGROUND);

        // Edges come from absolute positions so rounding never accumulates.
        let mut position = 0u32;
        for (index, run) in runs.iter().enumerate() {
            let start = position;
            position += run;
            if index % 2 != 0 {
                continue;
            }
            let x0 = self.to_px(opts.quiet_zone + start as f64 * opts.module_width) as u32;
            let x1 = (self.to_px(opts.quiet_zone + position as f64 * opts.module_width) as u32)
                .max(x0 + 1)
                .min(layout.width);
            for x in x0..x1 {
                for y in layout.bar_top..layout.bar_bottom {
                    img.put_pixel(x, y, FOREGROUND);
                }
            }
        }

        if let Some(text) = &layout.text {
            font::draw_text(&mut img, data.as_str(), text.x, text.y, text.scale, FOREGROUND);
        }

        tracing::debug!(
            width = layout.width,
            height = layout.height,
            modules,
            dpi = opts.dpi,
            "Rasterized ITF symbol"
        );
        Ok(img)
    }
}

impl BarcodeRenderer for PngRenderer {
    fn render(&self, data: &BarcodeData) -> Result<BarcodeImage> {
        let img = self.draw(data)?;
        let (width, height) = img.dimensions();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(img).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(BarcodeImage { png, width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::BarcodeError;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn payload() -> BarcodeData {
        BarcodeData::new("34199113000000515501090062780430005600006330")
    }

    #[test]
    fn test_render_produces_png() {
        let image = PngRenderer::default().render(&payload()).unwrap();
        assert!(image.png.starts_with(&PNG_SIGNATURE));
        assert!(image.width > 0 && image.height > 0);
    }

    #[test]
    fn test_layout_matches_module_count() {
        let renderer = PngRenderer::default();
        let opts = renderer.options().clone();
        let img = renderer.draw(&payload()).unwrap();

        let scale = opts.dpi as f64 / 72.0;
        let expected_width =
            ((2.0 * opts.quiet_zone + 721.0 * opts.module_width) * scale).round() as u32;
        assert_eq!(img.width(), expected_width);

        let first_bar = (opts.quiet_zone * scale).round() as u32;
        let mid = img.height() / 2;
        assert_eq!(img.get_pixel(first_bar - 1, mid).0[0], 255);
        assert_eq!(img.get_pixel(first_bar, mid).0[0], 0);
        assert_eq!(img.get_pixel(0, mid).0[0], 255);
        assert_eq!(img.get_pixel(img.width() - 1, mid).0[0], 255);
        // margins stay blank
        assert!((0..img.width()).all(|x| img.get_pixel(x, 0).0[0] == 255));
    }

    fn decode_middle_row(img: &GrayImage) -> Option<String> {
        let y = img.height() / 2;
        let row: Vec<u8> = (0..img.width()).map(|x| img.get_pixel(x, y).0[0]).collect();
        itf::decode_runs(&itf::row_runs(&row))
    }

    #[test]
    fn test_bars_decode_to_payload() {
        let img = PngRenderer::default().draw(&payload()).unwrap();
        assert_eq!(decode_middle_row(&img).as_deref(), Some(payload().as_str()));
    }

    #[test]
    fn test_bars_decode_at_lowest_resolvable_dpi() {
        let options = RenderOptions {
            dpi: 196,
            ..RenderOptions::default()
        };
        assert!(options.is_resolvable());
        let img = PngRenderer::new(options).draw(&payload()).unwrap();
        assert_eq!(decode_middle_row(&img).as_deref(), Some(payload().as_str()));

        // the same symbol at 72 dpi loses its narrow spaces
        let options = RenderOptions {
            dpi: 72,
            ..RenderOptions::default()
        };
        assert!(!options.is_resolvable());
        let img = PngRenderer::new(options).draw(&payload()).unwrap();
        assert_ne!(decode_middle_row(&img).as_deref(), Some(payload().as_str()));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let renderer = PngRenderer::new(RenderOptions {
            module_height: 1.0e7,
            ..RenderOptions::default()
        });
        let err = renderer.render(&payload()).unwrap_err();
        assert!(matches!(err, BarcodeError::ImageTooLarge { .. }));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_text_fits_and_is_centred() {
        let renderer = PngRenderer::new(RenderOptions {
            write_text: true,
            ..RenderOptions::default()
        });
        let img = renderer.draw(&payload()).unwrap();
        let layout = renderer.layout(payload().as_str(), 721).unwrap();
        let text = layout.text.clone().unwrap();
        let text_width = font::text_width(payload().as_str(), text.scale);
        assert!(text_width <= img.width());
        assert_eq!(text.x, (img.width() - text_width) / 2);

        // first digit '3' and last digit '0' both ink their outer columns
        let inked_columns: Vec<u32> = (0..img.width())
            .filter(|x| (text.y..img.height()).any(|y| img.get_pixel(*x, y).0[0] == 0))
            .collect();
        assert_eq!(inked_columns.first(), Some(&text.x));
        assert_eq!(inked_columns.last(), Some(&(text.x + text_width - 1)));
        // bars still decode
        assert_eq!(decode_middle_row(&img).as_deref(), Some(payload().as_str()));
    }

    #[test]
    fn test_write_text_adds_digit_row() {
        let plain = PngRenderer::default().draw(&payload()).unwrap();
        let labelled = PngRenderer::new(RenderOptions {
            write_text: true,
            ..RenderOptions::default()
        })
        .draw(&payload())
        .unwrap();

        assert_eq!(plain.width(), labelled.width());
        assert!(labelled.height() > plain.height());
        let text_rows = plain.height()..labelled.height();
        let inked = text_rows
            .flat_map(|y| (0..labelled.width()).map(move |x| (x, y)))
            .any(|(x, y)| labelled.get_pixel(x, y).0[0] == 0);
        assert!(inked);
    }

    #[test]
    fn test_render_rejects_non_digits() {
        let err = PngRenderer::default()
            .render(&BarcodeData::new("1234x"))
            .unwrap_err();
        assert!(matches!(err, BarcodeError::IllegalCharacter { .. }));
    }
}
