//! Axum route handler for resume uploads.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentKind};
use crate::state::AppState;
use crate::upload::models::{
    ResumeUpload, UploadForm, UploadResumeResponse, JOB_DESCRIPTION_FIELD, RESUME_FIELD,
};

/// POST /api/upload/
///
/// Multipart fields: `resume_file` (file) and `job_description` (text).
/// Extracts the resume text, sends it to the analysis webhook together with
/// the job description, and returns all three.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let span = info_span!("upload", upload_id = %Uuid::new_v4());
    process_upload(state, multipart).instrument(span).await
}

async fn process_upload(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let multipart = multipart.map_err(|e| AppError::InvalidMultipart {
        status: e.status(),
        message: e.body_text(),
    })?;
    let form = read_upload_form(multipart).await?;

    let resume = form.resume_file.ok_or(AppError::MissingFile)?;
    let job_description = form
        .job_description
        .filter(|jd| !jd.is_empty())
        .ok_or(AppError::MissingJobDescription)?;

    let kind =
        DocumentKind::from_file_name(&resume.file_name).ok_or(AppError::UnsupportedFileType)?;

    info!(
        file_name = %resume.file_name,
        size_bytes = resume.data.len(),
        kind = ?kind,
        "Extracting resume text"
    );
    let extracted_text = extract_text(kind, resume.data).await?;

    let ai_analysis = state
        .analyzer
        .analyze(&extracted_text, &job_description)
        .await?;
    debug!("AI analysis output: {:?}", ai_analysis);

    Ok(Json(UploadResumeResponse {
        extracted_text,
        job_description,
        ai_analysis,
    }))
}

/// Collects the known fields. A `resume_file` part only counts as a file when
/// it carries a non-empty filename (an empty file input still sends the part
/// with `filename=""`); unknown fields are drained and ignored.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .file_name()
            .filter(|file_name| !file_name.is_empty())
            .map(str::to_string);

        match (name.as_str(), file_name) {
            (RESUME_FIELD, Some(file_name)) => {
                let data = field.bytes().await.map_err(invalid_multipart)?;
                form.resume_file = Some(ResumeUpload { file_name, data });
            }
            (JOB_DESCRIPTION_FIELD, _) => {
                form.job_description = Some(field.text().await.map_err(invalid_multipart)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn invalid_multipart(e: MultipartError) -> AppError {
    AppError::InvalidMultipart {
        status: e.status(),
        message: e.body_text(),
    }
}
