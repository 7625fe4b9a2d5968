//! Spin HTTP entry point.

use anyhow::Context;
use spin_sdk::http::{Fields, IncomingRequest, Method, OutgoingResponse, ResponseOutparam};
use spin_sdk::http_component;

use edge_sdk::edge_core::{self, RequestContext, WorkloadError};
use edge_sdk::edge_data::SpinTransport;
use edge_sdk::edge_observability::StructuredLogger;
use edge_sdk::edge_streaming::StreamingSink;

use crate::config::SiteConfig;
use crate::data::{api_client, load_home_props};
use crate::respond::{reject_method, respond, stream_page};
use crate::WORKLOAD_NAME;

/// Home page handler.
#[http_component]
async fn handle_home(req: IncomingRequest, response_out: ResponseOutparam) {
    let ctx = request_context(&req);
    let (config, issues) = SiteConfig::from_spin();

    let logger = StructuredLogger::new(ctx.request_id.clone())
        .with_workload(WORKLOAD_NAME)
        .with_route(ctx.path.clone())
        .with_min_level(config.log_level)
        .with_format(config.log_format);

    for issue in &issues {
        logger
            .warn_builder("Ignoring invalid configuration")
            .field("variable", issue.variable)
            .field("value", issue.value.as_str())
            .emit();
    }

    if let Err(e) = render_home(ctx, &config, &logger, response_out).await {
        logger.error_builder("Request failed").error(&e).emit();
    }
}

async fn render_home(
    ctx: RequestContext,
    config: &SiteConfig,
    logger: &StructuredLogger,
    response_out: ResponseOutparam,
) -> Result<(), WorkloadError> {
    if let Some(rejected) = reject_method(&ctx, logger) {
        response_out.set(build_response(rejected.status, &rejected.headers)?);
        return Ok(());
    }

    logger.info("Rendering home page");

    let client = api_client(SpinTransport, config, ctx.request_id.clone());
    logger
        .debug_builder("Fetching episodes")
        .field("api_base_url", client.base_url())
        .emit();

    // Nothing is committed until the props are in hand.
    let loaded = load_home_props(&client, config)
        .await
        .context("loading home page props")
        .map_err(WorkloadError::from);

    let decided = respond(&ctx, loaded, config, logger);
    let response = build_response(decided.status, &decided.headers)?;

    let Some(page) = decided.page else {
        response_out.set(response);
        return Ok(());
    };

    let body = response.take_body();
    response_out.set(response);

    // Headers are committed; a failure from here on can only be logged.
    let mut sink = StreamingSink::new(body, ctx.timing);
    if let Err(e) = stream_page(&mut sink, &page, logger).await {
        logger
            .error_builder("Streaming failed")
            .field("phase", sink.phase().label())
            .error(&e)
            .emit();
    }
    Ok(())
}

/// Build the platform request context from the incoming request.
fn request_context(req: &IncomingRequest) -> RequestContext {
    let method = match req.method() {
        Method::Get => edge_core::Method::Get,
        Method::Head => edge_core::Method::Head,
        Method::Post => edge_core::Method::Post,
        Method::Put => edge_core::Method::Put,
        Method::Delete => edge_core::Method::Delete,
        Method::Patch => edge_core::Method::Patch,
        Method::Options => edge_core::Method::Options,
        _ => edge_core::Method::Other,
    };

    let path = req.path_with_query().unwrap_or_default();
    req.headers()
        .entries()
        .into_iter()
        .fold(RequestContext::new(method, path), |ctx, (name, value)| {
            ctx.with_header(&name, String::from_utf8_lossy(&value).into_owned())
        })
}

fn build_response(
    status: u16,
    headers: &[(String, String)],
) -> Result<OutgoingResponse, WorkloadError> {
    let list: Vec<(String, Vec<u8>)> = headers
        .iter()
        .map(|(name, value)| (name.clone(), value.clone().into_bytes()))
        .collect();

    let fields = Fields::from_list(&list)
        .map_err(|e| WorkloadError::StreamError(format!("invalid response headers: {:?}", e)))?;
    let response = OutgoingResponse::new(fields);
    response
        .set_status_code(status)
        .map_err(|()| WorkloadError::StreamError(format!("invalid status code {}", status)))?;

    Ok(response)
}
