pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{lambda::LambdaConfig, toml_config::RenderConfig};
pub use crate::core::{
    digit_line::transform,
    handler::{handle_request, BarcodeRequest, HttpResponse},
    render::PngRenderer,
    service::BarcodeService,
};
pub use crate::domain::model::{BarcodeData, BarcodeImage, BarcodeResponse, RenderOptions, MM_TO_POINTS};
pub use crate::domain::ports::{BarcodeRenderer, ConfigProvider};
pub use crate::utils::error::{BarcodeError, Result};
