//! Core of a single-screen app for reporting local infrastructure problems
//! (water leak, water outage, blocked sewage, uncollected garbage) at a
//! location that is typed, picked from a static suggestion list, or derived
//! from the device's GPS.
//!
//! The crate is a headless [Crux](https://docs.rs/crux_core) app: all state
//! and logic live here, while the native shell fulfils capability requests
//! (positioning, share sheet) and renders the [`ViewModel`] (input field,
//! suggestion list, category picker, map, dialogs).

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capabilities;
pub mod catalog;
pub mod report;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capabilities::{LocationResponse, ShareResponse};
use crate::report::{ProblemCategory, ReportError};

pub use app::App;
pub use capabilities::{Capabilities, Effect};

/// Shown as the marker description until the first fix arrives.
pub const WAITING_MESSAGE: &str = "Aguardando...";
/// Fixed zoom span of the map region around the resolved fix.
pub const MAP_LATITUDE_DELTA: f64 = 0.015;
pub const MAP_LONGITUDE_DELTA: f64 = 0.0121;
pub const MARKER_TITLE: &str = "Minha Localização";

pub const ERROR_DIALOG_TITLE: &str = "Erro";
pub const REPORT_DIALOG_TITLE: &str = "Problema Reportado";
pub const PERMISSION_DENIED_MESSAGE: &str = "Permissão de acesso à localização foi negada";
pub const POSITION_UNAVAILABLE_MESSAGE: &str = "Não foi possível obter a localização atual";
pub const EMPTY_FIELD_MESSAGE: &str =
    "Por favor, insira a localização e selecione um problema.";
pub const SHARE_FAILED_MESSAGE: &str = "Não foi possível compartilhar o problema.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    LocationPermissionDenied,
    LocationUnavailable,
    Validation,
    Share,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::LocationPermissionDenied => "LOCATION_PERMISSION_DENIED",
            Self::LocationUnavailable => "LOCATION_UNAVAILABLE",
            Self::Validation => "VALIDATION_ERROR",
            Self::Share => "SHARE_ERROR",
        }
    }
}

/// An error surfaced to the user. Terminal for the triggering action,
/// never for the session: the UI returns to an interactive idle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::LocationPermissionDenied => PERMISSION_DENIED_MESSAGE.into(),
            ErrorKind::LocationUnavailable => POSITION_UNAVAILABLE_MESSAGE.into(),
            ErrorKind::Validation => self.message.clone(),
            ErrorKind::Share => SHARE_FAILED_MESSAGE.into(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude {0} is out of valid range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is out of valid range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("Coordinate value is not finite (NaN or Infinity)")]
    NonFinite,
}

impl From<CoordinateError> for AppError {
    fn from(e: CoordinateError) -> Self {
        AppError::new(ErrorKind::LocationUnavailable, e.to_string())
    }
}

/// A validated device fix. Produced by the positioning capability, owned
/// transiently by the session, overwritten on each successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lon(self) -> f64 {
        self.lon
    }
}

/// Display string for a resolved fix, using default numeric formatting
/// (10.0 renders as `10`; no fixed precision is imposed).
#[must_use]
pub fn format_fix(coords: Coordinates) -> String {
    format!("Latitude: {}, Longitude: {}", coords.lat, coords.lon)
}

/// Progress of the asynchronous permission-then-fix resolution.
///
/// `Idle -> Pending -> {Resolved, Denied, Unavailable}`; any terminal
/// state transitions back to `Pending` on a new request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionState {
    #[default]
    Idle,
    Pending,
    Resolved,
    Denied,
    Unavailable,
}

impl ResolutionState {
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Denied | Self::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    ReportConfirmation,
    ValidationError,
    ShareError,
}

/// A blocking dialog the shell must present; dismissed via
/// [`Event::DismissDialog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    #[must_use]
    pub fn report_confirmation(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::ReportConfirmation,
            title: REPORT_DIALOG_TITLE.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation_error() -> Self {
        Self {
            kind: DialogKind::ValidationError,
            title: ERROR_DIALOG_TITLE.into(),
            message: EMPTY_FIELD_MESSAGE.into(),
        }
    }

    #[must_use]
    pub fn share_error() -> Self {
        Self {
            kind: DialogKind::ShareError,
            title: ERROR_DIALOG_TITLE.into(),
            message: SHARE_FAILED_MESSAGE.into(),
        }
    }
}

/// Session-scoped state. All fields use overwrite semantics; nothing is
/// persisted past the session.
#[derive(Debug, Clone)]
pub struct Model {
    pub location_input: String,
    pub category: ProblemCategory,
    pub current_fix: Option<Coordinates>,
    pub resolved_display: String,
    pub resolution: ResolutionState,
    /// Incremented on every resolution request; completions carrying an
    /// older generation are ignored, so the newest request always wins.
    pub resolution_generation: u64,
    pub suggestions_visible: bool,
    pub active_error: Option<AppError>,
    pub active_dialog: Option<Dialog>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            location_input: String::new(),
            category: ProblemCategory::Unset,
            current_fix: None,
            resolved_display: WAITING_MESSAGE.into(),
            resolution: ResolutionState::Idle,
            resolution_generation: 0,
            suggestions_visible: false,
            active_error: None,
            active_dialog: None,
        }
    }
}

impl Model {
    pub fn set_error(&mut self, error: AppError) {
        self.active_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.active_error = None;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// View mounted; kicks off the initial resolution.
    Started,

    LocationInputChanged { text: String },
    SuggestionSelected { name: String },
    CategorySelected { category: ProblemCategory },

    UseCurrentLocation,
    LocationResult {
        generation: u64,
        response: LocationResponse,
    },

    ReportRequested,
    ShareRequested,
    ShareCompleted(ShareResponse),

    DismissDialog,
    DismissError,
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::LocationInputChanged { .. } => "location_input_changed",
            Self::SuggestionSelected { .. } => "suggestion_selected",
            Self::CategorySelected { .. } => "category_selected",
            Self::UseCurrentLocation => "use_current_location",
            Self::LocationResult { .. } => "location_result",
            Self::ReportRequested => "report_requested",
            Self::ShareRequested => "share_requested",
            Self::ShareCompleted(_) => "share_completed",
            Self::DismissDialog => "dismiss_dialog",
            Self::DismissError => "dismiss_error",
        }
    }
}

/// One row of the category picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub category: ProblemCategory,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub description: String,
}

/// Rendered only once a fix exists: centered on it, fixed zoom span,
/// one marker labeled with the resolved display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub region: MapRegion,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub location_input: String,
    pub categories: Vec<CategoryOption>,
    /// Catalog matches for the current input; empty whenever the list is
    /// suppressed (empty input or a suggestion was just selected).
    pub suggestions: Vec<String>,
    pub resolving: bool,
    pub error_message: Option<String>,
    pub dialog: Option<Dialog>,
    pub map: Option<MapView>,
}

pub mod app {
    use super::{
        catalog, format_fix, report, AppError, Capabilities, CategoryOption, Coordinates, Dialog,
        ErrorKind, Event, LocationResponse, MapMarker, MapRegion, MapView, Model, ReportError,
        ResolutionState, ShareResponse, ViewModel, MAP_LATITUDE_DELTA, MAP_LONGITUDE_DELTA,
        MARKER_TITLE,
    };
    use crate::report::ProblemCategory;

    #[derive(Default)]
    pub struct App;

    impl App {
        /// Starts (or restarts) a resolution. A newer request supersedes
        /// any in-flight one via the generation counter; no cancellation
        /// is threaded through to the shell.
        fn begin_resolution(model: &mut Model, caps: &Capabilities) {
            model.resolution_generation += 1;
            let generation = model.resolution_generation;
            model.resolution = ResolutionState::Pending;

            tracing::debug!(generation, "resolution started");
            caps.location
                .request_permission(move |response| Event::LocationResult {
                    generation,
                    response,
                });
        }

        fn apply_fix(model: &mut Model, latitude: f64, longitude: f64) {
            match Coordinates::new(latitude, longitude) {
                Ok(coords) => {
                    let display = format_fix(coords);
                    model.resolved_display.clone_from(&display);
                    model.location_input = display;
                    model.current_fix = Some(coords);
                    model.resolution = ResolutionState::Resolved;
                    model.clear_error();
                }
                Err(e) => {
                    tracing::warn!(latitude, longitude, "shell produced an invalid fix");
                    model.resolution = ResolutionState::Unavailable;
                    model.set_error(e.into());
                }
            }
        }

        fn build_map(model: &Model) -> Option<MapView> {
            let coords = model.current_fix?;
            Some(MapView {
                region: MapRegion {
                    latitude: coords.lat(),
                    longitude: coords.lon(),
                    latitude_delta: MAP_LATITUDE_DELTA,
                    longitude_delta: MAP_LONGITUDE_DELTA,
                },
                markers: vec![MapMarker {
                    latitude: coords.lat(),
                    longitude: coords.lon(),
                    title: MARKER_TITLE.into(),
                    description: model.resolved_display.clone(),
                }],
            })
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            tracing::debug!(event = event.name(), "update");

            match event {
                Event::Started | Event::UseCurrentLocation => {
                    Self::begin_resolution(model, caps);
                    caps.render.render();
                }

                Event::LocationInputChanged { text } => {
                    model.suggestions_visible = !text.is_empty();
                    model.location_input = text;
                    caps.render.render();
                }

                Event::SuggestionSelected { name } => {
                    model.location_input = name;
                    model.suggestions_visible = false;
                    caps.render.render();
                }

                Event::CategorySelected { category } => {
                    model.category = category;
                    caps.render.render();
                }

                Event::LocationResult {
                    generation,
                    response,
                } => {
                    if generation != model.resolution_generation {
                        tracing::debug!(
                            generation,
                            current = model.resolution_generation,
                            "stale resolution result ignored"
                        );
                        return;
                    }

                    match response {
                        LocationResponse::PermissionGranted => {
                            caps.location.get_current_fix(move |response| {
                                Event::LocationResult {
                                    generation,
                                    response,
                                }
                            });
                        }
                        LocationResponse::PermissionDenied => {
                            model.resolution = ResolutionState::Denied;
                            model.set_error(AppError::new(
                                ErrorKind::LocationPermissionDenied,
                                "positioning permission refused",
                            ));
                        }
                        LocationResponse::Fix {
                            latitude,
                            longitude,
                        } => {
                            Self::apply_fix(model, latitude, longitude);
                        }
                        LocationResponse::Unavailable { reason } => {
                            model.resolution = ResolutionState::Unavailable;
                            model.set_error(AppError::new(ErrorKind::LocationUnavailable, reason));
                        }
                    }
                    caps.render.render();
                }

                Event::ReportRequested => {
                    match report::validate(&model.location_input, model.category) {
                        Ok(()) => {
                            let body =
                                report::compose_confirmation(&model.location_input, model.category);
                            model.active_dialog = Some(Dialog::report_confirmation(body));
                        }
                        Err(ReportError::EmptyField) => {
                            model.active_dialog = Some(Dialog::validation_error());
                        }
                    }
                    caps.render.render();
                }

                // Deliberately not gated on validate(): the share path
                // sends whatever the fields hold, mirroring the report /
                // share asymmetry of the observed behavior.
                Event::ShareRequested => {
                    let message = report::compose_share(&model.location_input, model.category);
                    caps.share.share_text(message, Event::ShareCompleted);
                }

                Event::ShareCompleted(response) => {
                    match response {
                        ShareResponse::Shared | ShareResponse::Dismissed => {}
                        ShareResponse::Failed { reason } => {
                            tracing::warn!(%reason, "share sheet failed");
                            model.active_dialog = Some(Dialog::share_error());
                        }
                    }
                    caps.render.render();
                }

                Event::DismissDialog => {
                    model.active_dialog = None;
                    caps.render.render();
                }

                Event::DismissError => {
                    model.clear_error();
                    caps.render.render();
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            let suggestions = if model.suggestions_visible && !model.location_input.is_empty() {
                catalog::matches(&model.location_input)
                    .into_iter()
                    .map(String::from)
                    .collect()
            } else {
                Vec::new()
            };

            let categories = ProblemCategory::ALL
                .into_iter()
                .map(|category| CategoryOption {
                    category,
                    label: category.label().into(),
                    selected: category == model.category,
                })
                .collect();

            ViewModel {
                location_input: model.location_input.clone(),
                categories,
                suggestions,
                resolving: model.resolution.is_pending(),
                error_message: model
                    .active_error
                    .as_ref()
                    .map(AppError::user_facing_message),
                dialog: model.active_dialog.clone(),
                map: Self::build_map(model),
            }
        }
    }
}
