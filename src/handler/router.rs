//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route matching, method
//! validation, body size limits, and access logging.

use crate::config::{AppState, RoutesConfig, SmsCredentials};
use crate::handler::estimate;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::error::Error as StdError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let started = Instant::now();
    let logging = &state.config.logging;
    let mut entry = logging
        .access_log
        .then(|| AccessLogEntry::from_request(&req, peer));

    let mut response = route_request(req, &state).await;
    http::apply_common_headers(&mut response, &state.config.http);

    if let Some(entry) = entry.as_mut() {
        entry.finish(&response, started);
        logger::log_access(entry, &logging.access_log_format);
    }
    Ok(response)
}

/// Route request based on path and method
async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let routes = &state.config.routes;
    let method = req.method().clone();
    let path = req.uri().path();

    // 1. Estimate relay endpoint
    if path == routes.estimate_path {
        return match method {
            Method::POST => handle_estimate(req, state).await,
            Method::OPTIONS => http::build_options_response(state.config.http.enable_cors),
            _ => {
                logger::log_warning(&format!("Method not allowed: {method} {path}"));
                http::build_405_response()
            }
        };
    }

    // 2. Health check endpoints
    if let Some(response) = health_check(&method, path, routes, state) {
        return response;
    }

    http::build_404_response()
}

/// Liveness always answers "ok"; readiness reports "degraded" while SMS is not configured
fn health_check(
    method: &Method,
    path: &str,
    routes: &RoutesConfig,
    state: &AppState,
) -> Option<Response<Full<Bytes>>> {
    let health = &routes.health;
    if !health.enabled || !matches!(*method, Method::GET | Method::HEAD) {
        return None;
    }

    if path == health.liveness_path {
        return Some(http::build_health_response("ok"));
    }
    if path == health.readiness_path {
        let status = match SmsCredentials::from_source(state.credentials.as_ref()) {
            Ok(_) => "ok",
            Err(_) => "degraded",
        };
        return Some(http::build_health_response(status));
    }
    None
}

/// Read the body within the size limit, then run the relay
async fn handle_estimate<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let max_body_size = state.config.http.max_body_size;
    if let Some(resp) = check_content_length(&req, max_body_size) {
        return resp;
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let body = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_error(&format!("Request body exceeded {max_body_size} bytes"));
            return http::build_413_response();
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return http::build_error_response(
                StatusCode::BAD_REQUEST,
                &crate::error::RelayError::InvalidPayload.to_string(),
            );
        }
    };

    estimate::serve_estimate(&body, state).await
}

/// Validate Content-Length header and return 413 if exceeded
fn check_content_length<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', relying on streaming limit"
                ));
                None
            }
            _ => None,
        },
    )
}
