use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::models::{CourseSession, DeletedCourse, Teacher, wall_clock};
use crate::window::ViewWindow;

const FILTER_COURSE_SCHEDULING: &str = r#"
query FilterCourseScheduling($input: CourseSchedulingFilterInput!) {
  filterCourseScheduling(input: $input) {
    ID
    studyHouseCode
    teacherUID
    startTime
    endTime
    duration
    description
    students {
      studentUID
      studentName
    }
    teacher {
      teacherUID
      teacherName
      studyGroups {
        studyGroupUID
        studyGroupName
        students {
          studentUID
          studentName
        }
      }
    }
  }
}
"#;

const FILTER_TEACHER_LIST: &str = r#"
query FilterTeacherList($input: StudyHouseInput!) {
  filterTeacherList(input: $input) {
    teacherUID
    teacherName
    studyGroups {
      studyGroupUID
      studyGroupName
      students {
        studentUID
        studentName
      }
    }
  }
}
"#;

const ADD_COURSE_SCHEDULING: &str = r#"
mutation AddCourseScheduling($input: CourseSchedulingInput!) {
  addCourseScheduling(input: $input) {
    ID
    studyHouseCode
    teacherUID
    startTime
    endTime
    duration
    description
    students {
      studentUID
      studentName
    }
    teacher {
      teacherUID
      teacherName
    }
  }
}
"#;

const UPDATE_COURSE_SCHEDULING: &str = r#"
mutation UpdateCourseScheduling($input: CourseSchedulingInput!) {
  updateCourseScheduling(input: $input) {
    ID
    studyHouseCode
    teacherUID
    startTime
    endTime
    duration
    description
    students {
      studentUID
      studentName
    }
    teacher {
      teacherUID
      teacherName
    }
  }
}
"#;

const DELETE_COURSE_SCHEDULING: &str = r#"
mutation DeleteCourseScheduling($id: Int!) {
  deleteCourseScheduling(id: $id) {
    ID
    studyHouseCode
    teacherUID
  }
}
"#;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("scheduling service rejected the request: {0}")]
    Rejected(String),
    #[error("scheduling service response carried no data")]
    MissingData,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    fn into_data(self) -> Result<T, ClientError> {
        if !self.errors.is_empty() {
            let message = self
                .errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ClientError::Rejected(message));
        }
        self.data.ok_or(ClientError::MissingData)
    }
}

#[derive(Debug, Serialize)]
pub struct StudentRef {
    #[serde(rename = "studentUID")]
    pub student_uid: i64,
}

/// Variables for the add and update mutations. The upstream schema takes
/// the same input type for both; `id` is only set on update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSchedulingInput {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub study_house_code: String,
    #[serde(rename = "teacherUID")]
    pub teacher_uid: i64,
    #[serde(with = "wall_clock")]
    pub start_time: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub end_time: NaiveDateTime,
    pub duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub students: Vec<StudentRef>,
}

#[derive(Debug, Deserialize)]
struct FilteredCourses {
    #[serde(rename = "filterCourseScheduling")]
    sessions: Vec<CourseSession>,
}

#[derive(Debug, Deserialize)]
struct FilteredTeachers {
    #[serde(rename = "filterTeacherList")]
    teachers: Vec<Teacher>,
}

#[derive(Debug, Deserialize)]
struct AddedCourse {
    #[serde(rename = "addCourseScheduling")]
    session: CourseSession,
}

#[derive(Debug, Deserialize)]
struct UpdatedCourse {
    #[serde(rename = "updateCourseScheduling")]
    session: CourseSession,
}

#[derive(Debug, Deserialize)]
struct RemovedCourse {
    #[serde(rename = "deleteCourseScheduling")]
    course: DeletedCourse,
}

#[derive(Clone)]
pub struct SchedulingClient {
    client: reqwest::Client,
    endpoint: Arc<Url>,
}

impl SchedulingClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: Arc::new(endpoint),
        }
    }

    async fn execute<T>(&self, query: &str, variables: serde_json::Value) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;
        let envelope: GraphQlResponse<T> = response.json().await?;
        envelope.into_data()
    }

    /// Sessions overlapping the window, in the order the upstream returns
    /// them. Optional teacher/student filters narrow the result server-side.
    pub async fn filter_course_scheduling(
        &self,
        window: &ViewWindow,
        study_house_code: &str,
        teacher_uid: Option<i64>,
        student_uid: Option<i64>,
    ) -> Result<Vec<CourseSession>, ClientError> {
        let mut input = json!({
            "studyHouseCode": study_house_code,
            "startDate": window.start.format(wall_clock::FORMAT).to_string(),
            "endDate": window.end.format(wall_clock::FORMAT).to_string(),
        });
        if let Some(uid) = teacher_uid {
            input["teacherUID"] = json!(uid);
        }
        if let Some(uid) = student_uid {
            input["studentUID"] = json!(uid);
        }
        let data: FilteredCourses = self
            .execute(FILTER_COURSE_SCHEDULING, json!({ "input": input }))
            .await?;
        Ok(data.sessions)
    }

    pub async fn filter_teacher_list(
        &self,
        study_house_code: &str,
    ) -> Result<Vec<Teacher>, ClientError> {
        let data: FilteredTeachers = self
            .execute(
                FILTER_TEACHER_LIST,
                json!({ "input": { "studyHouseCode": study_house_code } }),
            )
            .await?;
        Ok(data.teachers)
    }

    pub async fn add_course_scheduling(
        &self,
        input: &CourseSchedulingInput,
    ) -> Result<CourseSession, ClientError> {
        let data: AddedCourse = self
            .execute(ADD_COURSE_SCHEDULING, json!({ "input": input }))
            .await?;
        Ok(data.session)
    }

    pub async fn update_course_scheduling(
        &self,
        input: &CourseSchedulingInput,
    ) -> Result<CourseSession, ClientError> {
        let data: UpdatedCourse = self
            .execute(UPDATE_COURSE_SCHEDULING, json!({ "input": input }))
            .await?;
        Ok(data.session)
    }

    pub async fn delete_course_scheduling(&self, id: i64) -> Result<DeletedCourse, ClientError> {
        let data: RemovedCourse = self
            .execute(DELETE_COURSE_SCHEDULING, json!({ "id": id }))
            .await?;
        Ok(data.course)
    }
}
