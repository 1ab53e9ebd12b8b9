use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Local, NaiveDate};
use futures::future::try_join_all;

use crate::{
    AppState,
    bucket::{BucketConfig, bucket_by_day, bucket_by_hour},
    client::{CourseSchedulingInput, StudentRef},
    error::ApiError,
    models::{
        CalendarView, CourseDraft, CourseSession, CourseUpdate, DayView, DeletedCourse, HourView,
        SessionCard, Student, Teacher,
    },
    validation::{resolve_study_house, validate_draft, validate_update},
    window::{Direction, ViewMode, ViewWindow, compute_window, format_range_label, navigate, view_days},
};

#[derive(Debug, serde::Deserialize)]
pub struct CalendarQuery {
    #[serde(default)]
    pub mode: ViewMode,
    pub anchor: Option<NaiveDate>,
    pub study_house: Option<String>,
    pub teacher_uid: Option<i64>,
    pub student_uid: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
pub struct DirectoryQuery {
    pub study_house: Option<String>,
}

#[utoipa::path(get, path = "/", tag = "calendar")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Course Calendar API",
        "endpoints": {
            "/calendar": "Bucketed calendar view as JSON",
            "/calendar.ics": "Download the visible range as an iCal file",
            "/courses": "Create course sessions",
            "/courses/{id}": "Update or delete a course session",
            "/teachers": "Teacher directory for a study house",
            "/students": "Student directory for a study house"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "calendar")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "calendar")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/calendar",
    params(
        ("mode" = Option<ViewMode>, Query, description = "View mode: day, week or month (default week)"),
        ("anchor" = Option<String>, Query, description = "Anchor date as YYYY-MM-DD (default today)"),
        ("study_house" = Option<String>, Query, description = "Study house code (falls back to the configured default)"),
        ("teacher_uid" = Option<i64>, Query, description = "Only sessions taught by this teacher"),
        ("student_uid" = Option<i64>, Query, description = "Only sessions attended by this student")
    ),
    responses(
        (status = 200, description = "Bucketed calendar view", body = CalendarView),
        (status = 400, description = "Missing study house code or malformed parameters"),
        (status = 502, description = "Scheduling service unavailable")
    ),
    tag = "calendar"
)]
pub async fn get_calendar(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<CalendarQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let study_house = resolve_study_house(query.study_house.clone(), &state.settings)?;
    let anchor = query.anchor.unwrap_or_else(|| Local::now().date_naive());
    let window = compute_window(anchor, query.mode);

    let sessions = state
        .scheduling
        .filter_course_scheduling(&window, &study_house, query.teacher_uid, query.student_uid)
        .await?;

    Ok(Json(build_calendar_view(
        anchor, query.mode, window, &sessions,
    )))
}

#[utoipa::path(
    get,
    path = "/calendar.ics",
    params(
        ("mode" = Option<ViewMode>, Query, description = "View mode: day, week or month (default week)"),
        ("anchor" = Option<String>, Query, description = "Anchor date as YYYY-MM-DD (default today)"),
        ("study_house" = Option<String>, Query, description = "Study house code (falls back to the configured default)"),
        ("teacher_uid" = Option<i64>, Query, description = "Only sessions taught by this teacher"),
        ("student_uid" = Option<i64>, Query, description = "Only sessions attended by this student")
    ),
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 400, description = "Missing study house code or malformed parameters"),
        (status = 404, description = "No sessions in the requested range"),
        (status = 502, description = "Scheduling service unavailable")
    ),
    tag = "calendar"
)]
pub async fn get_calendar_ical(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<CalendarQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let study_house = resolve_study_house(query.study_house.clone(), &state.settings)?;
    let anchor = query.anchor.unwrap_or_else(|| Local::now().date_naive());
    let window = compute_window(anchor, query.mode);

    let sessions = state
        .scheduling
        .filter_course_scheduling(&window, &study_house, query.teacher_uid, query.student_uid)
        .await?;

    if sessions.is_empty() {
        return Err(ApiError::NotFound(
            "No course sessions in the requested range".into(),
        ));
    }

    let body = state.exporter.generate(&study_house, &sessions);
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=course_calendar.ics",
            ),
        ],
        body,
    ))
}

#[utoipa::path(
    post,
    path = "/courses",
    request_body = CourseDraft,
    responses(
        (status = 201, description = "Created sessions, one per start time", body = [CourseSession]),
        (status = 400, description = "Invalid course draft"),
        (status = 502, description = "Scheduling service unavailable")
    ),
    tag = "scheduling"
)]
pub async fn create_courses(
    State(state): State<AppState>,
    Json(draft): Json<CourseDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let teacher_uid = validate_draft(&draft)?;
    let study_house = resolve_study_house(draft.study_house_code.clone(), &state.settings)?;

    let inputs: Vec<CourseSchedulingInput> = draft
        .start_times
        .iter()
        .map(|&start_time| {
            let end_time = start_time
                .checked_add_signed(Duration::minutes(draft.duration))
                .ok_or_else(|| ApiError::BadRequest("start time is out of range".into()))?;
            Ok(CourseSchedulingInput {
                id: None,
                study_house_code: study_house.clone(),
                teacher_uid,
                start_time,
                end_time,
                duration: draft.duration,
                description: draft.description.clone(),
                students: draft
                    .student_uids
                    .iter()
                    .map(|&student_uid| StudentRef { student_uid })
                    .collect(),
            })
        })
        .collect::<Result<_, ApiError>>()?;

    let futures = inputs
        .iter()
        .map(|input| state.scheduling.add_course_scheduling(input));
    let created: Vec<CourseSession> = try_join_all(futures).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(("id" = i64, Path, description = "Course session ID")),
    request_body = CourseUpdate,
    responses(
        (status = 200, description = "Updated session", body = CourseSession),
        (status = 400, description = "Invalid course update"),
        (status = 502, description = "Scheduling service unavailable")
    ),
    tag = "scheduling"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<CourseUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let (teacher_uid, start_time) = validate_update(&update)?;
    let study_house = resolve_study_house(update.study_house_code.clone(), &state.settings)?;
    let end_time = start_time
        .checked_add_signed(Duration::minutes(update.duration))
        .ok_or_else(|| ApiError::BadRequest("start time is out of range".into()))?;

    let input = CourseSchedulingInput {
        id: Some(id),
        study_house_code: study_house,
        teacher_uid,
        start_time,
        end_time,
        duration: update.duration,
        description: update.description.clone(),
        students: update
            .student_uids
            .iter()
            .map(|&student_uid| StudentRef { student_uid })
            .collect(),
    };

    let session = state.scheduling.update_course_scheduling(&input).await?;
    Ok(Json(session))
}

#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(("id" = i64, Path, description = "Course session ID")),
    responses(
        (status = 200, description = "Deleted session", body = DeletedCourse),
        (status = 502, description = "Scheduling service unavailable")
    ),
    tag = "scheduling"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.scheduling.delete_course_scheduling(id).await?;
    Ok(Json(deleted))
}

#[utoipa::path(
    get,
    path = "/teachers",
    params(
        ("study_house" = Option<String>, Query, description = "Study house code (falls back to the configured default)")
    ),
    responses(
        (status = 200, description = "Teachers with their study groups", body = [Teacher]),
        (status = 400, description = "Missing study house code"),
        (status = 502, description = "Scheduling service unavailable")
    ),
    tag = "scheduling"
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<DirectoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let study_house = resolve_study_house(query.study_house, &state.settings)?;
    let teachers = state.scheduling.filter_teacher_list(&study_house).await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/students",
    params(
        ("study_house" = Option<String>, Query, description = "Study house code (falls back to the configured default)")
    ),
    responses(
        (status = 200, description = "Distinct students across all study groups", body = [Student]),
        (status = 400, description = "Missing study house code"),
        (status = 502, description = "Scheduling service unavailable")
    ),
    tag = "scheduling"
)]
pub async fn list_students(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<DirectoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let study_house = resolve_study_house(query.study_house, &state.settings)?;
    let teachers = state.scheduling.filter_teacher_list(&study_house).await?;
    Ok(Json(flatten_students(&teachers)))
}

fn build_calendar_view(
    anchor: NaiveDate,
    mode: ViewMode,
    window: ViewWindow,
    sessions: &[CourseSession],
) -> CalendarView {
    let config = BucketConfig::default();
    let days = view_days(anchor, mode);
    let day_views = bucket_by_day(sessions, &days, &config)
        .iter()
        .map(|bucket| DayView {
            date: bucket.day,
            hours: bucket_by_hour(bucket, &config)
                .into_iter()
                .map(|hour| HourView {
                    hour: hour.hour,
                    sessions: hour
                        .displayed
                        .iter()
                        .map(|session| SessionCard::from_session(session))
                        .collect(),
                    hidden_count: hour.hidden_count,
                })
                .collect(),
        })
        .collect();

    CalendarView {
        mode,
        anchor,
        start_time: window.start,
        end_time: window.end,
        range_label: format_range_label(window.start, window.end),
        prev_anchor: navigate(anchor, mode, Direction::Prev),
        next_anchor: navigate(anchor, mode, Direction::Next),
        days: day_views,
    }
}

/// Students reachable through any teacher's study groups. The first
/// occurrence of a UID wins; later duplicates are dropped.
fn flatten_students(teachers: &[Teacher]) -> Vec<Student> {
    let mut seen = HashSet::new();
    let mut students = Vec::new();
    for teacher in teachers {
        for group in &teacher.study_groups {
            for student in &group.students {
                if seen.insert(student.student_uid) {
                    students.push(student.clone());
                }
            }
        }
    }
    students
}
