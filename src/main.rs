use boleto_barcode::utils::{logger, validation::Validate};
use boleto_barcode::{
    handle_request, BarcodeRequest, BarcodeService, CliConfig, ConfigProvider, PngRenderer,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let render_config = match config
        .validate()
        .and_then(|_| config.render_config())
        .and_then(|render| render.validate().map(|_| render))
    {
        Ok(render) => render,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let options = render_config.render_options();
    let service = BarcodeService::new(PngRenderer::new(options));

    let Some(output) = &config.output else {
        // Same JSON body the Lambda function answers with.
        let response = handle_request(&service, &BarcodeRequest::with_line(config.line.clone()));
        println!("{}", response.body);
        std::process::exit(exit_code(response.status_code));
    };

    match service.generate(&config.line) {
        Ok(image) => {
            tokio::fs::write(output, &image.png).await?;
            tracing::info!(
                "✅ Barcode written to {} ({}x{} px)",
                output.display(),
                image.width,
                image.height
            );
            println!("📁 Output saved to: {}", output.display());
        }
        Err(e) => {
            tracing::error!("❌ Barcode generation failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.response_message());
            std::process::exit(exit_code(e.status_code()));
        }
    }

    Ok(())
}

fn exit_code(status: u16) -> i32 {
    match status {
        200 => 0,
        400..=499 => 2,
        _ => 1,
    }
}
