use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use schedule_core::{Config, OptimizationRun, PeriodRow, ScheduleRow, StudentRequestRow};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Thin transport shell over `OptimizationRun`: one route per external
/// operation. Holds no scheduling logic of its own; this just gives the
/// engine a way to be exercised standalone.
type SharedRun = Arc<Mutex<Option<OptimizationRun>>>;

#[derive(Deserialize)]
struct RunRequest {
    students: Vec<StudentRequestRow>,
    schedules: Vec<ScheduleRow>,
    periods: Vec<PeriodRow>,
    #[serde(default)]
    config: Option<Config>,
}

#[derive(Serialize)]
struct RunResponse {
    time_limited: bool,
}

async fn run_handler(
    State(state): State<SharedRun>,
    Json(req): Json<RunRequest>,
) -> Result<Json<RunResponse>, (StatusCode, String)> {
    let mut run = OptimizationRun::new(req.config.unwrap_or_default());
    run.run(&req.students, &req.schedules, &req.periods)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let time_limited = run.is_time_limited();
    *state.lock().unwrap() = Some(run);
    Ok(Json(RunResponse { time_limited }))
}

fn with_run<T>(
    state: &SharedRun,
    f: impl FnOnce(&mut OptimizationRun) -> T,
) -> Result<T, (StatusCode, String)> {
    let mut guard = state.lock().unwrap();
    let run = guard
        .as_mut()
        .ok_or((StatusCode::NOT_FOUND, "no run in progress".to_string()))?;
    Ok(f(run))
}

async fn assigned_handler(
    State(state): State<SharedRun>,
) -> Result<Json<Vec<schedule_core::AssignedRow>>, (StatusCode, String)> {
    with_run(&state, |run| run.assigned_courses()).map(Json)
}

async fn unassigned_handler(
    State(state): State<SharedRun>,
) -> Result<Json<Vec<schedule_core::UnassignedRow>>, (StatusCode, String)> {
    with_run(&state, |run| run.unassigned_courses()).map(Json)
}

#[derive(Deserialize)]
struct RosterPath {
    course: String,
    section: u32,
}

async fn roster_handler(
    State(state): State<SharedRun>,
    Path(path): Path<RosterPath>,
) -> Result<Json<schedule_core::RosterQuery>, (StatusCode, String)> {
    with_run(&state, |run| run.class_roster(&path.course, path.section)).map(Json)
}

async fn schedule_handler(
    State(state): State<SharedRun>,
    Path(student): Path<String>,
) -> Result<Json<schedule_core::ScheduleQuery>, (StatusCode, String)> {
    with_run(&state, |run| run.student_schedule(&student)).map(Json)
}

pub async fn run_server() {
    let shared: SharedRun = Arc::new(Mutex::new(None));

    let app = Router::new()
        .route("/v1/schedule/run", post(run_handler))
        .route("/v1/schedule/assigned", get(assigned_handler))
        .route("/v1/schedule/unassigned", get(unassigned_handler))
        .route("/v1/schedule/roster/:course/:section", get(roster_handler))
        .route("/v1/schedule/student/:student", get(schedule_handler))
        .with_state(shared);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
