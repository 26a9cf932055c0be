pub mod digit_line;
pub mod font;
pub mod handler;
pub mod itf;
pub mod render;
pub mod service;

pub use crate::domain::model::{BarcodeData, BarcodeImage, DigitLine, RenderOptions};
pub use crate::domain::ports::{BarcodeRenderer, ConfigProvider};
pub use crate::utils::error::Result;
