use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume_file";
/// Multipart field carrying the job description text.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// The uploaded resume as received. `file_name` drives format detection.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub data: Bytes,
}

/// Raw multipart form, before validation. A repeated field keeps the last value.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume_file: Option<ResumeUpload>,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub extracted_text: String,
    pub job_description: String,
    pub ai_analysis: Map<String, Value>,
}
