// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use live::{LiveEventBroadcaster, live_events_handler};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use wms_topology::Topology;
use wms_topology_api::{
    ApiError, ApiResult, ChangeTargetRequest, CreateLocationGroupRequest, CreateLocationRequest,
    CreateTransportUnitRequest, DeletedResponse, ErrorCodeRequest, GroupQuery, GroupStateRequest,
    LocationGroupView, LocationQuery, LocationView, TargetStateResponse, TopologySeed,
    TransportUnitView, add_child, assign_location, build_topology, change_group_state,
    change_group_state_by_error_code, change_location_state, change_target, create_group,
    create_location, create_transport_unit, delete_group, delete_location, find_groups,
    find_locations, find_transport_unit, load_seed_file, move_transport_unit, remove_child,
};
use wms_topology_domain::{
    Alignment, BarcodeFormat, ErrorCodeTransformer, MaskedErrorCodeTransformer,
};

/// Warehouse topology server - location and location group availability
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// JSON seed file with the initial groups, locations and transport units.
    /// Without it the server starts with an empty topology.
    #[arg(short, long)]
    topology: Option<PathBuf>,

    /// Length barcodes are padded to
    #[arg(long, default_value_t = 20)]
    barcode_length: usize,

    /// Character used to pad barcodes
    #[arg(long, default_value_t = '0')]
    barcode_pad: char,

    /// Side that keeps the significant barcode characters (left or right)
    #[arg(long, default_value = "right")]
    barcode_align: Alignment,
}

impl Args {
    const fn barcode_format(&self) -> BarcodeFormat {
        BarcodeFormat {
            length: self.barcode_length,
            pad: self.barcode_pad,
            alignment: self.barcode_align,
        }
    }
}

/// Application state shared across handlers.
///
/// The topology sits behind a single mutex; every write holds it from
/// reading the current topology until the new one is installed and its
/// events are published.
#[derive(Clone)]
struct AppState {
    topology: Arc<Mutex<Topology>>,
    broadcaster: Arc<LiveEventBroadcaster>,
    barcode_format: BarcodeFormat,
    transformer: Arc<dyn ErrorCodeTransformer + Send + Sync>,
}

impl AppState {
    fn new(topology: Topology, barcode_format: BarcodeFormat) -> Self {
        Self {
            topology: Arc::new(Mutex::new(topology)),
            broadcaster: Arc::new(LiveEventBroadcaster::new()),
            barcode_format,
            transformer: Arc::new(MaskedErrorCodeTransformer),
        }
    }

    /// Runs a topology-changing operation and commits its result.
    async fn mutate<T>(
        &self,
        operation: impl FnOnce(&Topology) -> Result<ApiResult<T>, ApiError>,
    ) -> Result<T, HttpError> {
        let mut topology = self.topology.lock().await;
        let current: &Topology = &topology;
        let result: ApiResult<T> = operation(current)?;
        Ok(result.commit(&mut topology, self.broadcaster.as_ref()))
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.broadcaster)
    }
}

/// Query parameters for the error code endpoint on location groups.
#[derive(Debug, Deserialize)]
struct GroupErrorCodeQuery {
    /// The group to change.
    name: String,
    /// The operation; only `change-state` is supported.
    op: String,
}

/// Query parameters for moving a transport unit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveTransportUnitQuery {
    /// Key of the target location.
    actual_location: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } | ApiError::Unsupported { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/locations`.
async fn handle_find_locations(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Vec<LocationView>>, HttpError> {
    info!(?query, "Handling find_locations request");

    let topology = app_state.topology.lock().await;
    let views: Vec<LocationView> = find_locations(&topology, &query)?;
    drop(topology);

    Ok(Json(views))
}

/// Handler for POST `/locations`.
async fn handle_create_location(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<LocationView>), HttpError> {
    info!(location = %request.location_pk, "Handling create_location request");

    let view: LocationView = app_state
        .mutate(|topology| create_location(topology, request))
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Handler for DELETE `/locations/{pk}`.
async fn handle_delete_location(
    AxumState(app_state): AxumState<AppState>,
    Path(location_pk): Path<String>,
) -> Result<Json<DeletedResponse>, HttpError> {
    info!(location = %location_pk, "Handling delete_location request");

    let response: DeletedResponse = app_state
        .mutate(|topology| delete_location(topology, &location_pk))
        .await?;
    Ok(Json(response))
}

/// Handler for PATCH `/locations/{pk}`.
///
/// The body carries the PLC error code.
async fn handle_change_location_state(
    AxumState(app_state): AxumState<AppState>,
    Path(location_pk): Path<String>,
    Json(request): Json<ErrorCodeRequest>,
) -> Result<Json<LocationView>, HttpError> {
    info!(
        location = %location_pk,
        error_code = %request.error_code,
        "Handling change_location_state request"
    );

    let transformer: Arc<dyn ErrorCodeTransformer + Send + Sync> =
        Arc::clone(&app_state.transformer);
    let view: LocationView = app_state
        .mutate(|topology| {
            change_location_state(topology, &location_pk, &request, transformer.as_ref())
        })
        .await?;
    Ok(Json(view))
}

/// Handler for GET `/location-groups`.
async fn handle_find_groups(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<GroupQuery>,
) -> Result<Json<Vec<LocationGroupView>>, HttpError> {
    info!(?query, "Handling find_groups request");

    let topology = app_state.topology.lock().await;
    let views: Vec<LocationGroupView> = find_groups(&topology, &query)?;
    drop(topology);

    Ok(Json(views))
}

/// Handler for POST `/location-groups`.
async fn handle_create_group(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateLocationGroupRequest>,
) -> Result<(StatusCode, Json<LocationGroupView>), HttpError> {
    info!(group = %request.name, "Handling create_group request");

    let view: LocationGroupView = app_state
        .mutate(|topology| create_group(topology, request))
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Handler for PATCH `/location-groups?name=&op=change-state`.
///
/// The body carries the PLC error code.
async fn handle_change_group_state_by_error_code(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<GroupErrorCodeQuery>,
    Json(request): Json<ErrorCodeRequest>,
) -> Result<Json<LocationGroupView>, HttpError> {
    info!(
        group = %query.name,
        error_code = %request.error_code,
        "Handling change_group_state_by_error_code request"
    );

    if query.op != "change-state" {
        warn!(op = %query.op, "Unsupported location group operation");
        return Err(HttpError::from(ApiError::InvalidInput {
            field: String::from("op"),
            message: format!("Unsupported operation '{}'", query.op),
        }));
    }

    let transformer: Arc<dyn ErrorCodeTransformer + Send + Sync> =
        Arc::clone(&app_state.transformer);
    let view: LocationGroupView = app_state
        .mutate(|topology| {
            change_group_state_by_error_code(topology, &query.name, &request, transformer.as_ref())
        })
        .await?;
    Ok(Json(view))
}

/// Handler for PATCH `/location-groups/{name}?statein=&stateout=`.
async fn handle_change_group_state(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
    Query(request): Query<GroupStateRequest>,
) -> Result<Json<LocationGroupView>, HttpError> {
    info!(
        group = %name,
        statein = ?request.statein,
        stateout = ?request.stateout,
        "Handling change_group_state request"
    );

    let view: LocationGroupView = app_state
        .mutate(|topology| change_group_state(topology, &name, &request))
        .await?;
    Ok(Json(view))
}

/// Handler for DELETE `/location-groups/{name}`.
async fn handle_delete_group(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeletedResponse>, HttpError> {
    info!(group = %name, "Handling delete_group request");

    let response: DeletedResponse = app_state
        .mutate(|topology| delete_group(topology, &name))
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/location-groups/{name}/children/{child}`.
async fn handle_add_child(
    AxumState(app_state): AxumState<AppState>,
    Path((parent, child)): Path<(String, String)>,
) -> Result<Json<LocationGroupView>, HttpError> {
    info!(parent = %parent, child = %child, "Handling add_child request");

    let view: LocationGroupView = app_state
        .mutate(|topology| add_child(topology, &parent, &child))
        .await?;
    Ok(Json(view))
}

/// Handler for DELETE `/location-groups/{name}/children/{child}`.
async fn handle_remove_child(
    AxumState(app_state): AxumState<AppState>,
    Path((parent, child)): Path<(String, String)>,
) -> Result<Json<LocationGroupView>, HttpError> {
    info!(parent = %parent, child = %child, "Handling remove_child request");

    let view: LocationGroupView = app_state
        .mutate(|topology| remove_child(topology, &parent, &child))
        .await?;
    Ok(Json(view))
}

/// Handler for POST `/location-groups/{name}/locations/{pk}`.
async fn handle_assign_location(
    AxumState(app_state): AxumState<AppState>,
    Path((name, location_pk)): Path<(String, String)>,
) -> Result<Json<LocationView>, HttpError> {
    info!(group = %name, location = %location_pk, "Handling assign_location request");

    let view: LocationView = app_state
        .mutate(|topology| assign_location(topology, &name, &location_pk))
        .await?;
    Ok(Json(view))
}

/// Handler for POST `/targets/{business_key}?type=&mode=&reallocation=`.
async fn handle_change_target(
    AxumState(app_state): AxumState<AppState>,
    Path(business_key): Path<String>,
    Query(request): Query<ChangeTargetRequest>,
) -> Result<Json<TargetStateResponse>, HttpError> {
    info!(
        business_key = %business_key,
        lock_type = %request.lock_type,
        mode = %request.mode,
        reallocation = request.reallocation,
        "Handling change_target request"
    );

    let response: TargetStateResponse = app_state
        .mutate(|topology| change_target(topology, &business_key, &request))
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/transport-units`.
async fn handle_create_transport_unit(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateTransportUnitRequest>,
) -> Result<(StatusCode, Json<TransportUnitView>), HttpError> {
    info!(barcode = %request.barcode, "Handling create_transport_unit request");

    let format: BarcodeFormat = app_state.barcode_format;
    let view: TransportUnitView = app_state
        .mutate(|topology| create_transport_unit(topology, request, &format))
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Handler for GET `/transport-units/{barcode}`.
async fn handle_find_transport_unit(
    AxumState(app_state): AxumState<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<TransportUnitView>, HttpError> {
    let topology = app_state.topology.lock().await;
    let view: TransportUnitView =
        find_transport_unit(&topology, &barcode, &app_state.barcode_format)?;
    drop(topology);

    Ok(Json(view))
}

/// Handler for PATCH `/transport-units/{barcode}?actualLocation=`.
async fn handle_move_transport_unit(
    AxumState(app_state): AxumState<AppState>,
    Path(barcode): Path<String>,
    Query(query): Query<MoveTransportUnitQuery>,
) -> Result<Json<TransportUnitView>, HttpError> {
    info!(
        barcode = %barcode,
        location = %query.actual_location,
        "Handling move_transport_unit request"
    );

    let format: BarcodeFormat = app_state.barcode_format;
    let at: OffsetDateTime = OffsetDateTime::now_utc();
    let view: TransportUnitView = app_state
        .mutate(|topology| {
            move_transport_unit(topology, &barcode, &query.actual_location, &format, at)
        })
        .await?;
    Ok(Json(view))
}

/// Builds the application router.
///
/// Location keys contain `/`, so routes ending in a location key or target
/// business key use a catch-all segment.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/locations",
            get(handle_find_locations).post(handle_create_location),
        )
        .route(
            "/locations/{*location_pk}",
            delete(handle_delete_location).patch(handle_change_location_state),
        )
        .route(
            "/location-groups",
            get(handle_find_groups)
                .post(handle_create_group)
                .patch(handle_change_group_state_by_error_code),
        )
        .route(
            "/location-groups/{name}",
            patch(handle_change_group_state).delete(handle_delete_group),
        )
        .route(
            "/location-groups/{name}/children/{child}",
            post(handle_add_child).delete(handle_remove_child),
        )
        .route(
            "/location-groups/{name}/locations/{*location_pk}",
            post(handle_assign_location),
        )
        .route("/targets/{*business_key}", post(handle_change_target))
        .route("/transport-units", post(handle_create_transport_unit))
        .route(
            "/transport-units/{barcode}",
            get(handle_find_transport_unit).patch(handle_move_transport_unit),
        )
        .route("/events/live", get(live_events_handler))
        .with_state(app_state)
}

fn load_topology(
    args: &Args,
    format: &BarcodeFormat,
) -> Result<Topology, Box<dyn std::error::Error>> {
    let Some(path) = &args.topology else {
        info!("No seed file given, starting with an empty topology");
        return Ok(Topology::new());
    };

    info!(path = %path.display(), "Loading topology seed");
    let seed: TopologySeed = load_seed_file(path)?;
    Ok(build_topology(&seed, format)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing warehouse topology server");

    let format: BarcodeFormat = args.barcode_format();
    let topology: Topology = load_topology(&args, &format)?;
    let app: Router = build_router(AppState::new(topology, format));

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
