use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use schoolhub_auth::Role;

use crate::modules::auth::{LoginRequest, LoginResponse, LoginUser};
use crate::modules::classes::model::{Class, ClassSummary, CreateClassDto, UpdateClassDto};
use crate::modules::notices::model::{Audience, CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::schedules::model::{
    CreateScheduleDto, Schedule, ScheduleWithDetails, TeacherSummary, UpdateScheduleDto,
};
use crate::modules::schools::model::{PublicSchool, RegisterSchoolForm, School, UpdateSchoolForm};
use crate::modules::students::model::{RegisterStudentForm, Student, UpdateStudentDto};
use crate::modules::subjects::model::{
    CreateSubjectDto, Subject, SubjectSummary, UpdateSubjectDto,
};
use crate::modules::teachers::model::{RegisterTeacherForm, Teacher, UpdateTeacherForm};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_school,
        crate::modules::auth::controller::login_teacher,
        crate::modules::auth::controller::login_student,
        crate::modules::schools::controller::register_school,
        crate::modules::schools::controller::get_all_schools,
        crate::modules::schools::controller::get_own_school,
        crate::modules::schools::controller::update_school,
        crate::modules::teachers::controller::register_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_own_teacher,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::students::controller::register_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_own_student,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::schedules::controller::create_schedule,
        crate::modules::schedules::controller::get_schedules,
        crate::modules::schedules::controller::get_student_schedules,
        crate::modules::schedules::controller::update_schedule,
        crate::modules::schedules::controller::delete_schedule,
        crate::modules::notices::controller::create_notice,
        crate::modules::notices::controller::get_notices,
        crate::modules::notices::controller::get_website_notices,
        crate::modules::notices::controller::update_notice,
        crate::modules::notices::controller::delete_notice,
    ),
    components(
        schemas(
            Role,
            LoginRequest,
            LoginResponse,
            LoginUser,
            School,
            PublicSchool,
            RegisterSchoolForm,
            UpdateSchoolForm,
            Teacher,
            TeacherSummary,
            RegisterTeacherForm,
            UpdateTeacherForm,
            Student,
            RegisterStudentForm,
            UpdateStudentDto,
            Class,
            ClassSummary,
            CreateClassDto,
            UpdateClassDto,
            Subject,
            SubjectSummary,
            CreateSubjectDto,
            UpdateSubjectDto,
            Schedule,
            ScheduleWithDetails,
            CreateScheduleDto,
            UpdateScheduleDto,
            Notice,
            Audience,
            CreateNoticeDto,
            UpdateNoticeDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Per-role login endpoints"),
        (name = "Schools", description = "School registration and profile"),
        (name = "Teachers", description = "Teacher management endpoints"),
        (name = "Students", description = "Student management endpoints"),
        (name = "Classes", description = "Class management endpoints"),
        (name = "Subjects", description = "Subject management endpoints"),
        (name = "Schedules", description = "Timetable endpoints"),
        (name = "Notices", description = "Notice board endpoints")
    ),
    info(
        title = "SchoolHub API",
        version = "0.1.0",
        description = "Multi-tenant school management REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
