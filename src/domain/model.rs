use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points per millimetre.
pub const MM_TO_POINTS: f64 = 2.834645669291339;

pub const DIGIT_LINE_LENGTH: usize = 47;
pub const BARCODE_DATA_LENGTH: usize = 44;

pub const DEFAULT_MODULE_WIDTH_MM: f64 = 0.13;
pub const DEFAULT_MODULE_HEIGHT_MM: f64 = 13.0;
pub const DEFAULT_QUIET_ZONE_MM: f64 = 6.5;
pub const DEFAULT_MARGIN_MM: f64 = 1.0;
pub const DEFAULT_DPI: u32 = 300;
pub const DEFAULT_NARROW_MODULES: u32 = 2;
pub const DEFAULT_WIDE_MODULES: u32 = 5;

pub const POINTS_PER_INCH: f64 = 72.0;
/// Narrowest element a scanner can still resolve once edges are rounded to
/// whole pixels.
pub const MIN_NARROW_PX: f64 = 2.0;
/// Minimum nominal difference between wide and narrow elements, in pixels.
pub const MIN_WIDE_GAP_PX: f64 = 2.0;
/// Largest canvas the renderer will allocate.
pub const MAX_PIXELS: f64 = 40_000_000.0;

pub fn mm_to_points(mm: f64) -> f64 {
    mm * MM_TO_POINTS
}

/// Sanitized 47-character digit line as printed on the slip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitLine(String);

impl DigitLine {
    pub(crate) fn new_unchecked(sanitized: String) -> Self {
        Self(sanitized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DigitLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The 44-character ITF payload derived from a [`DigitLine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeData(String);

impl BarcodeData {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BarcodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encoded PNG plus its pixel dimensions.
#[derive(Debug, Clone)]
pub struct BarcodeImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl BarcodeImage {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.png)
    }
}

/// Rendering parameters. Lengths are in points; the renderer converts them
/// to pixels at `dpi`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub module_width: f64,
    pub module_height: f64,
    pub quiet_zone: f64,
    pub margin: f64,
    pub dpi: u32,
    pub write_text: bool,
    pub narrow_modules: u32,
    pub wide_modules: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_width: mm_to_points(DEFAULT_MODULE_WIDTH_MM),
            module_height: mm_to_points(DEFAULT_MODULE_HEIGHT_MM),
            quiet_zone: mm_to_points(DEFAULT_QUIET_ZONE_MM),
            margin: mm_to_points(DEFAULT_MARGIN_MM),
            dpi: DEFAULT_DPI,
            write_text: false,
            narrow_modules: DEFAULT_NARROW_MODULES,
            wide_modules: DEFAULT_WIDE_MODULES,
        }
    }
}

impl RenderOptions {
    pub fn px_per_point(&self) -> f64 {
        self.dpi as f64 / POINTS_PER_INCH
    }

    /// Nominal narrow and wide element widths, in pixels.
    pub fn element_px(&self) -> (f64, f64) {
        let module_px = self.module_width * self.px_per_point();
        (
            self.narrow_modules as f64 * module_px,
            self.wide_modules as f64 * module_px,
        )
    }

    /// Whether rounded element edges still leave narrow and wide elements
    /// distinguishable.
    pub fn is_resolvable(&self) -> bool {
        let (narrow, wide) = self.element_px();
        narrow >= MIN_NARROW_PX && wide - narrow >= MIN_WIDE_GAP_PX
    }

    /// Canvas size in pixels for a symbol of `modules` modules, text excluded.
    pub fn canvas_px(&self, modules: u64) -> (f64, f64) {
        let scale = self.px_per_point();
        let width = (2.0 * self.quiet_zone + modules as f64 * self.module_width) * scale;
        let height = (2.0 * self.margin + self.module_height) * scale;
        (width.round(), height.round())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    pub base_64: String,
}

/// JSON body returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl BarcodeResponse {
    pub fn success(base_64: String) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(ResponseData { base_64 }),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}
