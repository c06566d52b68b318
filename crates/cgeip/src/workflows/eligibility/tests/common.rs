use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::eligibility::domain::{
    AdditionalSubject, Course, CourseId, CourseRequirement, RequiredSubject, Transcript,
    TranscriptSubject,
};
use crate::workflows::eligibility::repository::{CourseRepository, TranscriptRepository};
use crate::workflows::eligibility::EligibilityService;
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentId;

pub(super) fn student() -> StudentId {
    StudentId("stu-001".to_string())
}

pub(super) fn transcript() -> Transcript {
    Transcript {
        student_id: student(),
        overall_percentage: Some(75.0),
        subjects: vec![
            TranscriptSubject::with_mark("Mathematics", 80.0),
            TranscriptSubject::with_mark("English", 60.0),
        ],
    }
}

pub(super) fn requirement(minimum_overall: f32) -> CourseRequirement {
    CourseRequirement {
        required_subjects: vec![required("Mathematics", 70.0)],
        additional_subjects: Vec::new(),
        minimum_overall_percentage: minimum_overall,
        minimum_required_subjects_needed: None,
    }
}

pub(super) fn required(name: &str, minimum_mark: f32) -> RequiredSubject {
    RequiredSubject {
        subject_name: name.to_string(),
        minimum_mark,
    }
}

pub(super) fn additional(name: &str, preferred_minimum_mark: f32) -> AdditionalSubject {
    AdditionalSubject {
        subject_name: name.to_string(),
        preferred_minimum_mark,
    }
}

pub(super) fn course(id: &str, name: &str, requirement: CourseRequirement) -> Course {
    Course {
        course_id: CourseId(id.to_string()),
        institution_id: "inst-limkokwing".to_string(),
        name: name.to_string(),
        requirement,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryTranscripts {
    records: Arc<Mutex<HashMap<StudentId, Transcript>>>,
}

impl TranscriptRepository for MemoryTranscripts {
    fn fetch(&self, student_id: &StudentId) -> Result<Option<Transcript>, RepositoryError> {
        let guard = self.records.lock().expect("transcript mutex poisoned");
        Ok(guard.get(student_id).cloned())
    }

    fn replace(&self, transcript: Transcript) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("transcript mutex poisoned");
        guard.insert(transcript.student_id.clone(), transcript);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCourses {
    records: Arc<Mutex<Vec<Course>>>,
}

impl MemoryCourses {
    pub(super) fn with(courses: Vec<Course>) -> Self {
        Self {
            records: Arc::new(Mutex::new(courses)),
        }
    }
}

impl CourseRepository for MemoryCourses {
    fn fetch(&self, course_id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let guard = self.records.lock().expect("course mutex poisoned");
        Ok(guard
            .iter()
            .find(|course| &course.course_id == course_id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Course>, RepositoryError> {
        Ok(self.records.lock().expect("course mutex poisoned").clone())
    }
}

pub(super) struct UnavailableTranscripts;

impl TranscriptRepository for UnavailableTranscripts {
    fn fetch(&self, _student_id: &StudentId) -> Result<Option<Transcript>, RepositoryError> {
        Err(RepositoryError::Unavailable("firestore offline".to_string()))
    }

    fn replace(&self, _transcript: Transcript) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("firestore offline".to_string()))
    }
}

pub(super) fn catalogue() -> Vec<Course> {
    vec![
        course("crs-it", "Diploma in Information Technology", requirement(70.0)),
        course("crs-general", "Certificate in Communication", CourseRequirement::default()),
        course("crs-med", "Bachelor of Medicine", {
            let mut requirement = requirement(85.0);
            requirement.required_subjects.push(required("Biology", 75.0));
            requirement
        }),
    ]
}

pub(super) fn build_service() -> (
    EligibilityService<MemoryTranscripts, MemoryCourses>,
    Arc<MemoryTranscripts>,
) {
    let transcripts = Arc::new(MemoryTranscripts::default());
    let courses = Arc::new(MemoryCourses::with(catalogue()));
    let service = EligibilityService::new(transcripts.clone(), courses);
    (service, transcripts)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
