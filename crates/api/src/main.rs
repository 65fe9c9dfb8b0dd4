mod config;
mod error;
mod state;
mod telemetry;
pub mod routes {
    pub mod allocate;
    pub mod entries;
    pub mod grid;
    pub mod health;
    pub mod jobs;
    pub mod schedule;
    pub mod slots;
    pub mod validate;
}

use axum::{
    routing::{get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            routes::health::health,
            routes::grid::grid,
            routes::validate::validate_handler,
            routes::allocate::allocate,
            routes::jobs::status,
            routes::jobs::result,
            routes::schedule::class_view,
            routes::schedule::teacher_view,
            routes::schedule::load,
            routes::entries::check,
            routes::entries::audit,
            routes::slots::parse,
        ),
        components(schemas(
            types::Demand, types::Assignment, types::Allocation, types::AllocationRequest,
            types::AllocationStats, types::UnsatisfiedDemand, types::Weekday, types::Slot,
            types::TimeBand, types::TeacherLoad, types::DayCount, types::Clash,
            types::ClassId, types::SubjectId, types::TeacherId, types::SessionId,
            jobs::JobId, jobs::JobStatus,
            routes::health::Health,
            routes::grid::GridInfo,
            routes::validate::ValidateIn,
            routes::validate::ValidationReport,
            routes::allocate::JobCreated,
            routes::schedule::ScheduleIn,
            routes::schedule::Grouped,
            routes::schedule::Loads,
            routes::entries::CheckEntryIn,
            routes::entries::CheckEntryOut,
            routes::slots::SlotKeyOut
        )),
        tags(
            (name = "timetable", description = "Weekly timetable allocation API")
        )
    )]
struct ApiDoc;

fn router(app_state: state::AppState) -> Router {
    Router::new()
        .route("/v1/health", get(routes::health::health))
        .route("/v1/grid", get(routes::grid::grid))
        .route("/v1/validate", post(routes::validate::validate_handler))
        .route("/v1/allocate", post(routes::allocate::allocate))
        .route("/v1/jobs/:id", get(routes::jobs::status))
        .route("/v1/jobs/:id/result", get(routes::jobs::result))
        .route("/v1/schedule/by-class", post(routes::schedule::class_view))
        .route("/v1/schedule/by-teacher", post(routes::schedule::teacher_view))
        .route("/v1/schedule/teacher-load", post(routes::schedule::load))
        .route("/v1/entries/check", post(routes::entries::check))
        .route("/v1/audit", post(routes::entries::audit))
        .route("/v1/slots/:key", get(routes::slots::parse))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(telemetry::stack())
        .with_state(app_state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(?e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::from_env()?;
    telemetry::init(config.log_format);

    let app = router(state::AppState::new(&config)?);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, max_lectures = config.max_lectures, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
