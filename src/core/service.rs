use crate::core::digit_line;
use crate::core::{BarcodeImage, BarcodeRenderer, Result};

/// Digit line in, encoded barcode image out.
pub struct BarcodeService<R: BarcodeRenderer> {
    renderer: R,
}

impl<R: BarcodeRenderer> BarcodeService<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn generate(&self, line: &str) -> Result<BarcodeImage> {
        let data = digit_line::transform(line)?;
        let image = self.renderer.render(&data)?;
        tracing::debug!(
            bytes = image.png.len(),
            width = image.width,
            height = image.height,
            "Barcode rendered"
        );
        Ok(image)
    }

    pub fn generate_base64(&self, line: &str) -> Result<String> {
        Ok(self.generate(line)?.to_base64())
    }
}
