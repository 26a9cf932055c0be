use crate::domain::model::{BarcodeData, BarcodeImage, RenderOptions};
use crate::utils::error::Result;

/// Turns barcode payloads into encoded images.
pub trait BarcodeRenderer: Send + Sync {
    fn render(&self, data: &BarcodeData) -> Result<BarcodeImage>;
}

pub trait ConfigProvider: Send + Sync {
    fn render_options(&self) -> RenderOptions;
}
