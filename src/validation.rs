use chrono::NaiveDateTime;

use crate::error::ApiError;
use crate::models::{CourseDraft, CourseUpdate};
use crate::settings::Settings;

pub const MIN_COURSE_DURATION_MIN: i64 = 30;
pub const MAX_COURSE_DURATION_MIN: i64 = 24 * 60;

/// Checks a creation draft and returns the teacher UID it schedules for.
pub fn validate_draft(draft: &CourseDraft) -> Result<i64, ApiError> {
    let teacher_uid = draft
        .teacher_uid
        .ok_or_else(|| ApiError::BadRequest("a teacher must be selected".into()))?;
    if draft.student_uids.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one student must be selected".into(),
        ));
    }
    if draft.start_times.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one start time is required".into(),
        ));
    }
    if !(MIN_COURSE_DURATION_MIN..=MAX_COURSE_DURATION_MIN).contains(&draft.duration) {
        return Err(ApiError::BadRequest(
            "course duration must be between 30 minutes and 24 hours".into(),
        ));
    }
    Ok(teacher_uid)
}

/// Checks an update and returns the teacher UID and new start time.
pub fn validate_update(update: &CourseUpdate) -> Result<(i64, NaiveDateTime), ApiError> {
    let teacher_uid = update
        .teacher_uid
        .ok_or_else(|| ApiError::BadRequest("a teacher must be selected".into()))?;
    if update.student_uids.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one student must be selected".into(),
        ));
    }
    let start_time = update
        .start_time
        .ok_or_else(|| ApiError::BadRequest("a start time is required".into()))?;
    if !(MIN_COURSE_DURATION_MIN..=MAX_COURSE_DURATION_MIN).contains(&update.duration) {
        return Err(ApiError::BadRequest(
            "course duration must be between 30 minutes and 24 hours".into(),
        ));
    }
    Ok((teacher_uid, start_time))
}

/// Study house precedence: explicit request value, then the configured
/// default. No resolvable code is a client error.
pub fn resolve_study_house(
    requested: Option<String>,
    settings: &Settings,
) -> Result<String, ApiError> {
    requested
        .filter(|code| !code.trim().is_empty())
        .or_else(|| settings.study_house_code.clone())
        .ok_or_else(|| ApiError::BadRequest("a study house code is required".into()))
}
