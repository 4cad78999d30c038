pub mod dashboard;
pub mod error;
pub mod events;
pub mod openapi;
pub mod palette;
pub mod settings;
pub mod timing;
pub mod tools;
pub mod widgets;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use crate::builtins;
use crate::bus::Bus;
use crate::dashboard::Controller;
use crate::error::CoreResult;
use crate::integrations::dictionary::DictionaryService;
use crate::integrations::translate::TranslateService;
use crate::settings::Settings;
use crate::storage::docs::{self, DocumentSet};
use crate::storage::file::FileStorage;
use crate::storage::SharedStorage;
use crate::widgets::weather::WeatherService;

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

pub(crate) struct ServerState {
    pub(crate) controller: Mutex<Controller>,
    pub(crate) docs: tokio::sync::Mutex<DocumentSet>,
    pub(crate) settings: tokio::sync::Mutex<Settings>,
    pub(crate) storage: SharedStorage,
    pub(crate) bus: Bus,
    pub(crate) weather: WeatherService,
    pub(crate) dictionary: DictionaryService,
    pub(crate) translate: TranslateService,
}

impl Server {
    /// Start the engine over a workspace directory, bound to an ephemeral
    /// localhost port.
    pub async fn new(workspace_dir: PathBuf) -> CoreResult<Self> {
        let storage: SharedStorage = Arc::new(FileStorage::new(workspace_dir));
        let docs = DocumentSet::load_all(storage.as_ref()).await?;
        let settings: Settings = docs::load(storage.as_ref()).await?;

        let bus = Bus::default();
        let registry = builtins::default_registry();
        let controller = Controller::new(registry, bus.clone());

        let state = Arc::new(ServerState {
            controller: Mutex::new(controller),
            docs: tokio::sync::Mutex::new(docs),
            settings: tokio::sync::Mutex::new(settings),
            storage,
            bus,
            weather: WeatherService::new(),
            dictionary: DictionaryService::new(),
            translate: TranslateService::new(),
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .route("/health", get(health))
            .route("/dashboard", get(dashboard::snapshot))
            .route("/dashboard/open", post(dashboard::open))
            .route("/dashboard/close", post(dashboard::close))
            .route("/tools", get(tools::list))
            .route("/tools/invoke", post(tools::invoke))
            .route("/tools/timer/countdown", post(timing::start_countdown))
            .route("/tools/timer/alarm", post(timing::set_alarm))
            .route("/tools/metronome/start", post(timing::start_metronome))
            .route("/tools/pomodoro/start", post(timing::start_pomodoro))
            .route("/palette/query", post(palette::query))
            .route("/widgets/today", get(widgets::today))
            .route("/widgets/weather", get(widgets::weather))
            .route("/widgets/search", get(widgets::search))
            .route("/integrations/dictionary", get(widgets::dictionary))
            .route("/integrations/translate", post(widgets::translate))
            .route(
                "/settings",
                get(settings::get_settings).put(settings::put_settings),
            )
            .route("/openapi.json", get(openapi::document))
            .route("/events", get(events::stream_events))
            .with_state(state)
            .layer(cors);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|error| crate::error::CoreError::Internal(format!("bind failed: {error}")))?;
        let addr = listener
            .local_addr()
            .map_err(|error| crate::error::CoreError::Internal(format!("no local addr: {error}")))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tracing::info!(%addr, "homedeck listening");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn health() -> &'static str {
    "ok"
}
