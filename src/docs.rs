use utoipa::OpenApi;

use crate::modules::assignment_types::model::{
    AssignmentType, CreateAssignmentTypeDto, PaginatedAssignmentTypesResponse,
    UpdateAssignmentTypeDto,
};
use crate::modules::assignments::model::{
    Assignment, CreateAssignmentDto, PaginatedAssignmentsResponse, UpdateAssignmentDto,
};
use crate::modules::enrollments::model::{
    CreateEnrollmentDto, Enrollment, PaginatedEnrollmentsResponse,
};
use crate::modules::lessons::model::{
    CreateLessonDto, Lesson, PaginatedLessonsResponse, UpdateLessonDto,
};
use crate::modules::schools::model::{
    CreateSchoolDto, PaginatedSchoolsResponse, School, UpdateSchoolDto,
};
use crate::modules::scores::model::{
    CreateScoreDto, PaginatedScoresResponse, Score, UpdateScoreDto,
};
use crate::modules::signup_pins::model::{
    GeneratePinsDto, PaginatedSignupPinsResponse, RedeemPinDto, SignupPin,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, UpdateStudentDto,
};
use crate::modules::subjects::model::{
    CreateSubjectDto, PaginatedSubjectsResponse, Subject, UpdateSubjectDto,
};
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, UpdateTeacherDto,
};
use crate::modules::users::model::{CreateUserDto, PaginatedUsersResponse, User, UserRole};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::schools::controller::create_school,
        crate::modules::schools::controller::get_schools,
        crate::modules::schools::controller::get_school,
        crate::modules::schools::controller::update_school,
        crate::modules::schools::controller::delete_school,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_lessons,
        crate::modules::lessons::controller::get_lesson,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::assignment_types::controller::create_assignment_type,
        crate::modules::assignment_types::controller::get_assignment_types,
        crate::modules::assignment_types::controller::get_assignment_type,
        crate::modules::assignment_types::controller::update_assignment_type,
        crate::modules::assignment_types::controller::delete_assignment_type,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::assignments::controller::get_assignments,
        crate::modules::assignments::controller::get_assignment,
        crate::modules::assignments::controller::update_assignment,
        crate::modules::assignments::controller::delete_assignment,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::get_enrollments,
        crate::modules::enrollments::controller::get_enrollment,
        crate::modules::enrollments::controller::delete_enrollment,
        crate::modules::scores::controller::create_score,
        crate::modules::scores::controller::get_scores,
        crate::modules::scores::controller::get_score,
        crate::modules::scores::controller::update_score,
        crate::modules::scores::controller::delete_score,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::signup_pins::controller::generate_pins,
        crate::modules::signup_pins::controller::get_pins,
        crate::modules::signup_pins::controller::redeem_pin,
    ),
    components(
        schemas(
            School,
            CreateSchoolDto,
            UpdateSchoolDto,
            PaginatedSchoolsResponse,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            PaginatedTeachersResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudentsResponse,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            PaginatedSubjectsResponse,
            Lesson,
            CreateLessonDto,
            UpdateLessonDto,
            PaginatedLessonsResponse,
            AssignmentType,
            CreateAssignmentTypeDto,
            UpdateAssignmentTypeDto,
            PaginatedAssignmentTypesResponse,
            Assignment,
            CreateAssignmentDto,
            UpdateAssignmentDto,
            PaginatedAssignmentsResponse,
            Enrollment,
            CreateEnrollmentDto,
            PaginatedEnrollmentsResponse,
            Score,
            CreateScoreDto,
            UpdateScoreDto,
            PaginatedScoresResponse,
            User,
            UserRole,
            CreateUserDto,
            PaginatedUsersResponse,
            SignupPin,
            GeneratePinsDto,
            RedeemPinDto,
            PaginatedSignupPinsResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    tags(
        (name = "Schools", description = "School management endpoints"),
        (name = "Teachers", description = "Teacher record endpoints"),
        (name = "Students", description = "Student record endpoints"),
        (name = "Subjects", description = "Subject catalogue endpoints"),
        (name = "Lessons", description = "Lesson offering endpoints"),
        (name = "Assignment Types", description = "Grading category endpoints"),
        (name = "Assignments", description = "Assignment endpoints"),
        (name = "Enrollments", description = "Student-lesson enrollment endpoints"),
        (name = "Scores", description = "Score recording endpoints"),
        (name = "Users", description = "Account management endpoints"),
        (name = "Signup PINs", description = "Single-use signup PIN issuance and redemption")
    ),
    info(
        title = "Rollbook API",
        version = "0.1.0",
        description = "A school-management record API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
