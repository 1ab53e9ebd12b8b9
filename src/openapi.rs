use utoipa::OpenApi;

use crate::models::{
    CalendarView, CourseDraft, CourseSession, CourseUpdate, DayView, DeletedCourse, HourView,
    SessionCard, Student, StudyGroup, Teacher,
};
use crate::window::ViewMode;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_calendar,
        crate::handlers::get_calendar_ical,
        crate::handlers::create_courses,
        crate::handlers::update_course,
        crate::handlers::delete_course,
        crate::handlers::list_teachers,
        crate::handlers::list_students
    ),
    components(schemas(
        ViewMode,
        CalendarView,
        DayView,
        HourView,
        SessionCard,
        CourseSession,
        CourseDraft,
        CourseUpdate,
        DeletedCourse,
        Teacher,
        StudyGroup,
        Student
    )),
    tags(
        (name = "calendar", description = "Bucketed calendar views and exports"),
        (name = "scheduling", description = "Course scheduling passthrough operations")
    ),
)]
pub struct ApiDoc;
