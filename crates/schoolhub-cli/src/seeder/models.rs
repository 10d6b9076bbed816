//! Seeding configuration and row seeds.

use chrono::{DateTime, Utc};
use schoolhub_models::Audience;
use uuid::Uuid;

/// Credentials for a hand-made school account.
pub struct SchoolCreds {
    pub school_name: String,
    pub owner_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct SeedConfig {
    pub schools: usize,
    pub classes_per_school: usize,
    pub subjects_per_school: usize,
    pub teachers_per_school: usize,
    pub students_per_class: usize,
    pub schedules_per_class: usize,
    pub notices_per_school: usize,
}

impl SeedConfig {
    pub fn new(schools: usize) -> Self {
        Self {
            schools,
            ..Default::default()
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            schools: 3,
            classes_per_school: 6,
            subjects_per_school: 8,
            teachers_per_school: 5,
            students_per_class: 20,
            schedules_per_class: 4,
            notices_per_school: 5,
        }
    }
}

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub schools: usize,
    pub classes: usize,
    pub subjects: usize,
    pub teachers: usize,
    pub students: usize,
    pub schedules: usize,
    pub notices: usize,
}

pub(crate) struct SchoolSeed {
    pub school_name: String,
    pub owner_name: String,
    pub email: String,
}

pub(crate) struct ClassSeed {
    pub school_id: Uuid,
    pub class_text: String,
    pub class_num: i32,
}

/// A class as inserted, with the label students use to refer to it.
#[derive(Clone)]
pub(crate) struct SeededClass {
    pub id: Uuid,
    pub school_id: Uuid,
    pub class_num: i32,
}

pub(crate) struct SubjectSeed {
    pub school_id: Uuid,
    pub subject_name: String,
    pub subject_codename: String,
}

pub(crate) struct TeacherSeed {
    pub school_id: Uuid,
    pub name: String,
    pub email: String,
    pub qualification: String,
    pub age: i32,
    pub gender: String,
}

pub(crate) struct StudentSeed {
    pub school_id: Uuid,
    pub name: String,
    pub email: String,
    pub student_class: String,
    pub age: i32,
    pub gender: String,
    pub guardian: String,
    pub guardian_phone: String,
    pub student_image: String,
    pub student_image_id: String,
}

pub(crate) struct ScheduleSeed {
    pub school_id: Uuid,
    pub teacher_id: Uuid,
    pub subject_id: Uuid,
    pub class_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

pub(crate) struct NoticeSeed {
    pub school_id: Uuid,
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub audience: Vec<Audience>,
}
