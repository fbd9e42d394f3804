//! Spin component for the shipping diagnostics endpoint.
//!
//! Routes:
//! - `GET /api/shipping?items=N` - quote for one item count
//! - `GET /api/shipping` - reference quotes with pass/fail
//! - `GET /api/shipping/schedule` - active tiers and boundary report

use wholesale_api::{DiagnosticsService, REQUEST_ID_HEADER};
use wholesale_commerce::shipping::ShippingSchedule;
use wholesale_core::{Method, RequestContext, RequestId};
use wholesale_observability::{LogFormat, LogLevel, StructuredLogger};

/// Workload name used in logs.
pub const WORKLOAD: &str = "shipping-diagnostics";

/// Build the handler context from an incoming request.
///
/// Returns `None` for methods the platform does not model; the caller
/// answers those with 405.
pub fn request_context<B>(req: &http::Request<B>) -> Option<RequestContext> {
    let method = Method::try_from(req.method()).ok()?;
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let mut ctx = RequestContext::new(method, path);
    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            ctx.headers.insert(name.as_str().to_string(), value.to_string());
        }
    }
    if let Some(upstream) = ctx.header(REQUEST_ID_HEADER).map(RequestId::from_string) {
        ctx.request_id = upstream;
    }
    Some(ctx)
}

/// Logger for one request.
pub fn request_logger(ctx: &RequestContext) -> StructuredLogger {
    StructuredLogger::new(ctx.request_id.clone())
        .with_workload(WORKLOAD)
        .with_route(&ctx.path)
        .with_min_level(LogLevel::Info)
        .with_format(LogFormat::Json)
}

/// Handle one request end to end.
pub fn serve<B>(service: &DiagnosticsService, req: &http::Request<B>) -> http::Response<String> {
    match request_context(req) {
        Some(ctx) => {
            let logger = request_logger(&ctx);
            service.handle(&ctx, &logger)
        }
        None => wholesale_api::error_response(
            &wholesale_api::ApiError::MethodNotAllowed(req.method().to_string()),
            &RequestId::generate(),
        ),
    }
}

/// Service over the standard schedule.
pub fn standard_service() -> DiagnosticsService {
    DiagnosticsService::new(ShippingSchedule::standard())
}

#[cfg(target_arch = "wasm32")]
mod component {
    use spin_sdk::http_component;

    /// Main HTTP handler.
    #[http_component]
    fn handle(req: http::Request<Vec<u8>>) -> anyhow::Result<http::Response<String>> {
        Ok(super::serve(&super::standard_service(), &req))
    }
}
