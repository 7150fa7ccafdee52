//! Form extraction for `POST /analyze`.
//!
//! Accepts `multipart/form-data` (file upload plus text fields) or
//! `application/x-www-form-urlencoded` (text fields only). Any other body
//! yields an empty form, which the orchestrator rejects as "No resume provided".

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use bytes::Bytes;

use crate::errors::AppError;

pub const RESUME_FILE_FIELD: &str = "resume_file";
pub const RESUME_TEXT_FIELD: &str = "resume_text";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// An uploaded document.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// The raw analyze form, before resume text resolution.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeForm {
    pub resume_file: Option<UploadedFile>,
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
}

impl AnalyzeForm {
    /// The job description, or `None` when absent or empty. Whitespace-only
    /// text is still a job description.
    pub fn job_text(&self) -> Option<&str> {
        self.job_description.as_deref().filter(|v| !v.is_empty())
    }

    /// The raw resume text field, or `None` when absent or blank.
    pub fn raw_resume_text(&self) -> Option<&str> {
        non_blank(self.resume_text.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl<S> FromRequest<S> for AnalyzeForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(mut fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            Ok(AnalyzeForm {
                resume_file: None,
                resume_text: fields.remove(RESUME_TEXT_FIELD),
                job_description: fields.remove(JOB_DESCRIPTION_FIELD),
            })
        } else {
            Ok(AnalyzeForm::default())
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            RESUME_FILE_FIELD => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                form.resume_file = Some(UploadedFile { filename, bytes });
            }
            RESUME_TEXT_FIELD => {
                form.resume_text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?,
                );
            }
            JOB_DESCRIPTION_FIELD => {
                form.job_description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?,
                );
            }
            // Unknown fields are ignored
            _ => {}
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_job_description_is_absent() {
        let form = AnalyzeForm {
            job_description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(form.job_text(), None);
    }

    #[test]
    fn test_whitespace_job_description_is_present() {
        let form = AnalyzeForm {
            job_description: Some("   \n".to_string()),
            ..Default::default()
        };
        assert_eq!(form.job_text(), Some("   \n"));
    }

    #[test]
    fn test_job_description_kept_verbatim() {
        let form = AnalyzeForm {
            job_description: Some("  Rust engineer ".to_string()),
            ..Default::default()
        };
        assert_eq!(form.job_text(), Some("  Rust engineer "));
    }

    #[test]
    fn test_blank_resume_text_is_absent() {
        let form = AnalyzeForm {
            resume_text: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(form.raw_resume_text(), None);
    }
}
