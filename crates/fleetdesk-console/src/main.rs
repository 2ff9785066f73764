#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config {
    use fleetdesk_client::ClientConfig;
    use serde::Deserialize;

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct Config {
        pub server: ServerConfig,
        pub api: ApiConfig,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: "0.0.0.0".into(),
                port: 3000,
            }
        }
    }

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct ApiConfig {
        /// Falls back to `FLEETDESK_API_URL`, then the built-in default.
        pub base_url: Option<String>,
    }

    impl Config {
        pub fn client_config(&self) -> ClientConfig {
            match self.api.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
                Some(url) => ClientConfig::new(url),
                None => ClientConfig::from_env(),
            }
        }

        pub fn socket_addr(&self) -> Option<std::net::SocketAddr> {
            format!("{}:{}", self.server.bind, self.server.port).parse().ok()
        }
    }

    pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => match parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config {path}: {e}, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn partial_file_keeps_defaults() {
            let config = parse("[api]\nbase_url = \"https://fleet.example.com/api/\"\n").unwrap();
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.client_config().base_url, "https://fleet.example.com/api");
        }

        #[test]
        fn server_section_sets_address() {
            let config = parse("[server]\nbind = \"127.0.0.1\"\nport = 8080\n").unwrap();
            assert_eq!(config.socket_addr(), Some("127.0.0.1:8080".parse().unwrap()));
        }

        #[test]
        fn malformed_file_is_an_error() {
            assert!(parse("[server]\nport = \"eighty\"\n").is_err());
        }
    }
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use fleetdesk_gate::{require_page_auth, GateConfig};
    use fleetdesk_ui::{shell, App};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let appConfig = config::load(&configPath);
    let clientConfig = appConfig.client_config();
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} api={}",
        appConfig.server.bind,
        appConfig.server.port,
        clientConfig.base_url
    );

    let conf = match get_configuration(None) {
        Ok(conf) => conf,
        Err(e) => {
            tracing::error!("failed to load Leptos configuration: {e}");
            std::process::exit(1);
        }
    };
    let mut leptosOptions = conf.leptos_options;
    if let Some(addr) = appConfig.socket_addr() {
        leptosOptions.site_addr = addr;
    } else {
        tracing::warn!(
            "invalid bind address {}:{}, keeping {}",
            appConfig.server.bind,
            appConfig.server.port,
            leptosOptions.site_addr
        );
    }
    let addr = leptosOptions.site_addr;

    let routes = generate_route_list(App);

    let pageAuthLayer = axum::middleware::from_fn_with_state(GateConfig::default(), require_page_auth);

    // The rendered shell tells the browser bundle which API to call.
    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            {
                let clientConfig = clientConfig.clone();
                move || provide_context(clientConfig.clone())
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .layer(pageAuthLayer)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind to {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("server exited with error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {}
