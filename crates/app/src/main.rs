use dioxus::prelude::*;
use shared_types::FeatureFlags;

mod auth;
mod routes;
use auth::AuthState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use std::sync::Arc;

        let config = server::config::load_config();
        if config.features.telemetry {
            server::telemetry::init_telemetry();
        }
        server::health::record_start_time();

        let pool = server::db::create_pool()?;
        server::db::run_migrations(&pool).await?;

        let store: server::db::SharedStore = Arc::new(server::store::PgStore::new(pool));
        if !server::db::install_store(store.clone()) {
            tracing::warn!("Data store was already installed; keeping the existing one");
        }

        let mut router = dioxus::server::router(App).merge(server::openapi::api_router(store));

        // Inside the session layers so spans can read the caller's claims.
        if config.features.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let router = server::auth::middleware::with_session_layers(router)
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Defaults all-off on error
    let flags_resource =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;

    let flags = flags_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(FeatureFlags::default()))
        .unwrap_or_default();

    use_context_provider(|| flags);
    use_context_provider(AuthState::new);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        SuspenseBoundary {
            fallback: |_| rsx! {
                div { class: "auth-guard-loading",
                    p { "Loading..." }
                }
            },
            Router::<Route> {}
        }
    }
}
