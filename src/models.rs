use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::palette::course_color;
use crate::window::{ViewMode, format_duration, format_time_range};

/// Serde boundary for upstream timestamps. Values are local wall-clock
/// times; a trailing `Z` or offset is accepted and read as written, never
/// converted.
pub mod wall_clock {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let trimmed = raw.trim();
        let bare = trimmed.strip_suffix('Z').unwrap_or(trimmed);
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(bare, format) {
                return Some(parsed);
            }
        }
        DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|offset_time| offset_time.naive_local())
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp: {raw}")))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, de};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp: {raw}"))),
                None => Ok(None),
            }
        }
    }

    pub mod vec {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, de};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Vec::<String>::deserialize(deserializer)?
                .into_iter()
                .map(|raw| {
                    super::parse(&raw)
                        .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp: {raw}")))
                })
                .collect()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    // The upstream schema spells the suffix UID, which camelCase would
    // render as Uid. Same for the other *UID fields below.
    #[serde(rename = "studentUID")]
    pub student_uid: i64,
    pub student_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudyGroup {
    #[serde(rename = "studyGroupUID")]
    pub study_group_uid: i64,
    pub study_group_name: String,
    #[serde(default)]
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(rename = "teacherUID")]
    pub teacher_uid: i64,
    pub teacher_name: String,
    #[serde(default)]
    pub study_groups: Vec<StudyGroup>,
}

/// One scheduled course occurrence, as the upstream GraphQL schema shapes
/// it. `duration` is redundant with the instants but authoritative for
/// display; the two are never reconciled here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSession {
    #[serde(rename = "ID")]
    pub id: i64,
    pub study_house_code: String,
    #[serde(rename = "teacherUID")]
    pub teacher_uid: i64,
    #[serde(with = "wall_clock")]
    #[schema(value_type = String, format = "date-time", example = "2024-03-15T09:00:00.000")]
    pub start_time: NaiveDateTime,
    #[serde(with = "wall_clock")]
    #[schema(value_type = String, format = "date-time", example = "2024-03-15T10:00:00.000")]
    pub end_time: NaiveDateTime,
    pub duration: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub teacher: Option<Teacher>,
}

/// Payload returned by the delete mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCourse {
    #[serde(rename = "ID")]
    pub id: i64,
    pub study_house_code: String,
    #[serde(rename = "teacherUID")]
    pub teacher_uid: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarView {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
    #[schema(value_type = String, format = "date-time")]
    pub start_time: NaiveDateTime,
    #[schema(value_type = String, format = "date-time")]
    pub end_time: NaiveDateTime,
    pub range_label: String,
    pub prev_anchor: NaiveDate,
    pub next_anchor: NaiveDate,
    pub days: Vec<DayView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayView {
    pub date: NaiveDate,
    pub hours: Vec<HourView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HourView {
    pub hour: u32,
    pub sessions: Vec<SessionCard>,
    pub hidden_count: usize,
}

/// Display-ready session entry for one calendar cell.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionCard {
    pub id: i64,
    pub teacher_name: String,
    pub student_names: Vec<String>,
    #[schema(value_type = String, format = "date-time")]
    pub starts_at: NaiveDateTime,
    #[schema(value_type = String, format = "date-time")]
    pub ends_at: NaiveDateTime,
    pub time_range: String,
    pub duration_label: String,
    pub color: String,
    pub description: Option<String>,
}

impl SessionCard {
    pub fn from_session(session: &CourseSession) -> Self {
        let teacher_name = session
            .teacher
            .as_ref()
            .map(|teacher| teacher.teacher_name.clone())
            .unwrap_or_else(|| "Unknown Teacher".to_string());
        let color = course_color(&teacher_name).to_string();
        Self {
            id: session.id,
            student_names: session
                .students
                .iter()
                .map(|student| student.student_name.clone())
                .collect(),
            starts_at: session.start_time,
            ends_at: session.end_time,
            time_range: format_time_range(session.start_time, session.end_time),
            duration_label: format_duration(session.duration),
            color,
            description: session.description.clone(),
            teacher_name,
        }
    }
}

/// Body of `POST /courses`. One course is created per start time, with the
/// end instant derived from `duration` at submission.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CourseDraft {
    #[serde(default)]
    pub study_house_code: Option<String>,
    #[serde(default)]
    pub teacher_uid: Option<i64>,
    #[serde(default)]
    pub student_uids: Vec<i64>,
    #[serde(default, with = "wall_clock::vec")]
    #[schema(value_type = Vec<String>, example = json!(["2024-03-15T09:00:00.000"]))]
    pub start_times: Vec<NaiveDateTime>,
    pub duration: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /courses/{id}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CourseUpdate {
    #[serde(default)]
    pub study_house_code: Option<String>,
    #[serde(default)]
    pub teacher_uid: Option<i64>,
    #[serde(default)]
    pub student_uids: Vec<i64>,
    #[serde(default, with = "wall_clock::option")]
    #[schema(value_type = Option<String>, example = "2024-03-15T09:00:00.000")]
    pub start_time: Option<NaiveDateTime>,
    pub duration: i64,
    #[serde(default)]
    pub description: Option<String>,
}
