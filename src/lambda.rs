use boleto_barcode::utils::{logger, validation::Validate};
use boleto_barcode::{
    handle_request, BarcodeRequest, BarcodeService, ConfigProvider, HttpResponse, LambdaConfig,
    PngRenderer,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

async fn function_handler(
    service: &BarcodeService<PngRenderer>,
    event: LambdaEvent<BarcodeRequest>,
) -> Result<HttpResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling barcode request");
    Ok(handle_request(service, &event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    // Built once per cold start and shared by every invocation.
    let service = BarcodeService::new(PngRenderer::new(config.render_options()));
    let service = &service;

    run(service_fn(move |event: LambdaEvent<BarcodeRequest>| async move {
        function_handler(service, event).await
    }))
    .await
}
