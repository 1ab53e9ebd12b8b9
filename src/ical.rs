use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::{CourseSession, SessionCard};

#[derive(Clone, Default)]
pub struct ICalExporter;

impl ICalExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, study_house_code: &str, sessions: &[CourseSession]) -> Vec<u8> {
        if sessions.is_empty() {
            return Vec::new();
        }

        let mut calendar = Calendar::new();
        calendar.name(&format!("Course Schedule {study_house_code}"));

        for session in sessions {
            let card = SessionCard::from_session(session);

            let mut event = Event::new();
            if card.student_names.is_empty() {
                event.summary(&card.teacher_name);
            } else {
                event.summary(&format!(
                    "{}: {}",
                    card.teacher_name,
                    card.student_names.join(", ")
                ));
            }
            event.starts(session.start_time);
            event.ends(session.end_time);
            let mut description = format!(
                "Course session\nTeacher: {}\nDuration: {}",
                card.teacher_name, card.duration_label
            );
            if let Some(note) = &card.description {
                description.push('\n');
                description.push_str(note);
            }
            event.description(&description);
            event.uid(&format!(
                "{}-{}-course-calendar",
                session.id,
                session.start_time.format("%Y%m%dT%H%M%S")
            ));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use crate::models::{Student, Teacher};

    use super::*;

    fn sample_session() -> CourseSession {
        CourseSession {
            id: 42,
            study_house_code: "SH001".to_string(),
            teacher_uid: 7,
            start_time: NaiveDateTime::parse_from_str("2024-03-15 09:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            end_time: NaiveDateTime::parse_from_str("2024-03-15 10:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            duration: 60,
            description: Some("阅读课".to_string()),
            students: vec![Student {
                student_uid: 1,
                student_name: "张三".to_string(),
            }],
            teacher: Some(Teacher {
                teacher_uid: 7,
                teacher_name: "王老师".to_string(),
                study_groups: vec![],
            }),
        }
    }

    #[test]
    fn test_generate_single_session() {
        let exporter = ICalExporter::new();
        let bytes = exporter.generate("SH001", &[sample_session()]);
        let body = String::from_utf8(bytes).unwrap();
        assert!(body.contains("BEGIN:VEVENT"));
        assert!(body.contains("王老师"));
        assert!(body.contains("张三"));
        assert!(body.contains("DTSTART:20240315T090000"));
        assert!(body.contains("42-20240315T090000-course-calendar"));
    }

    #[test]
    fn test_generate_empty() {
        let exporter = ICalExporter::new();
        let bytes = exporter.generate("SH001", &[]);
        assert!(bytes.is_empty());
    }
}
