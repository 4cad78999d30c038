use axum::Json;
use utoipa::OpenApi;

use crate::dashboard::state::{ActiveTool, DashboardState};
use crate::event::{
    CoreEvent, MetronomeBeatPayload, NotificationPayload, PomodoroPhasePayload,
    ToolLifecyclePayload,
};
use crate::integrations::dictionary::{DictionaryEntry, Meaning};
use crate::integrations::qr::QrLinks;
use crate::palette::{Activation, EntryKind, PaletteEntry};
use crate::server::dashboard::OpenToolRequest;
use crate::server::error::{ApiErrorBody, ApiErrorResponse};
use crate::server::palette::{PaletteQueryRequest, PaletteQueryResponse};
use crate::server::timing::{
    AlarmRequest, CountdownRequest, MetronomeRequest, PomodoroRequest, StartedResponse,
};
use crate::server::tools::{InvokeRequest, InvokeResponse, ToolListResponse};
use crate::server::widgets::{
    DictionaryResponse, SearchResponse, TranslateRequest, TranslateResponse,
};
use crate::settings::{Language, Settings, Theme};
use crate::tools::schema::ToolView;
use crate::widgets::clock::TodayView;
use crate::widgets::weather::WeatherView;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Homedeck API",
        version = "0.1.0",
        description = "Local-first personal toolbox engine"
    ),
    paths(
        crate::server::dashboard::snapshot,
        crate::server::dashboard::open,
        crate::server::dashboard::close,
        crate::server::tools::list,
        crate::server::tools::invoke,
        crate::server::timing::start_countdown,
        crate::server::timing::set_alarm,
        crate::server::timing::start_metronome,
        crate::server::timing::start_pomodoro,
        crate::server::palette::query,
        crate::server::widgets::today,
        crate::server::widgets::weather,
        crate::server::widgets::search,
        crate::server::widgets::dictionary,
        crate::server::widgets::translate,
        crate::server::settings::get_settings,
        crate::server::settings::put_settings,
        crate::server::events::stream_events,
    ),
    components(schemas(
        // Error
        ApiErrorResponse,
        ApiErrorBody,
        // Dashboard
        DashboardState,
        ActiveTool,
        OpenToolRequest,
        ToolView,
        // Tools
        ToolListResponse,
        InvokeRequest,
        InvokeResponse,
        // Timing
        CountdownRequest,
        AlarmRequest,
        MetronomeRequest,
        PomodoroRequest,
        StartedResponse,
        // Palette
        PaletteQueryRequest,
        PaletteQueryResponse,
        PaletteEntry,
        EntryKind,
        Activation,
        // Widgets
        TodayView,
        WeatherView,
        SearchResponse,
        DictionaryResponse,
        DictionaryEntry,
        Meaning,
        QrLinks,
        TranslateRequest,
        TranslateResponse,
        // Settings
        Settings,
        Language,
        Theme,
        // Events
        CoreEvent,
        ToolLifecyclePayload,
        NotificationPayload,
        MetronomeBeatPayload,
        PomodoroPhasePayload,
    ))
)]
pub struct ApiDoc;

pub(crate) async fn document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
