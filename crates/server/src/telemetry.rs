use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Runtime for the OTLP gRPC exporters. Tonic spawns onto the ambient
/// Tokio runtime, which may not be entered yet when this runs.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

fn tls_config() -> opentelemetry_otlp::tonic_types::transport::ClientTlsConfig {
    opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots()
}

/// Register OTLP trace and log exporters.
///
/// Dioxus owns the tracing subscriber; this only installs the global
/// tracer provider used by `OtelTraceLayer` and bridges the `log` crate.
///
/// Environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT` collector gRPC address (required)
///   - `OTEL_SERVICE_NAME` service name (default `internhub`)
///   - `DEPLOY_ENV` deployment environment (default `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        eprintln!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "internhub".to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    let rt = match OTEL_RUNTIME.get() {
        Some(rt) => rt,
        None => {
            let built = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .worker_threads(1)
                .build();
            match built {
                Ok(rt) => OTEL_RUNTIME.get_or_init(|| rt),
                Err(e) => {
                    eprintln!("Failed to create telemetry runtime: {e}");
                    return;
                }
            }
        }
    };
    let _guard = rt.enter();

    let tls = endpoint.starts_with("https://");

    let mut span_builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);
    if tls {
        span_builder = span_builder.with_tls_config(tls_config());
    }
    let span_exporter = match span_builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Failed to create OTLP span exporter: {e}");
            return;
        }
    };

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(provider);

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);
    if tls {
        log_builder = log_builder.with_tls_config(tls_config());
    }
    let log_exporter = match log_builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Failed to create OTLP log exporter, exporting traces only: {e}");
            return;
        }
    };

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => eprintln!("Log bridge skipped, a `log` logger is already set"),
    }

    eprintln!("Telemetry initialized v{APP_VERSION}, exporting to {endpoint}");
}

/// Span name for a path: ids are replaced so one route is one series.
pub fn route_label(path: &str) -> String {
    if path == "/" {
        return path.to_string();
    }
    path.split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok()
                || (!segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
            {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that opens one server span per request.
///
/// Must sit inside the auth middleware to see the caller's claims.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer("internhub");
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let route = route_label(&path);

        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let mut attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path),
            KeyValue::new("http.route", route.clone()),
            KeyValue::new("http.request_id", request_id),
        ];
        match req.extensions().get::<Claims>() {
            Some(claims) => attributes.extend([
                KeyValue::new("user.id", claims.sub.to_string()),
                KeyValue::new("user.role", claims.role.clone()),
                KeyValue::new("auth.status", "authenticated"),
            ]),
            None => attributes.push(KeyValue::new("auth.status", "anonymous")),
        }

        let span = tracer
            .span_builder(format!("{method} {route}"))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}
