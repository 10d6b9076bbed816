//! Multipart form extraction for the registration and profile endpoints.
//!
//! Text parts are collected by name. File parts must be images; an empty
//! file part (a form submitted without choosing a file) is treated as
//! absent.

use std::collections::HashMap;
use std::str::FromStr;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
};

use schoolhub_core::AppError;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|_| AppError::validation("Request must be multipart/form-data"))?;

        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Invalid form data: {}", e.body_text())))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::validation(format!("Invalid form data: {}", e.body_text()))
                    })?;

                    if bytes.is_empty() {
                        continue;
                    }
                    if !content_type.starts_with("image/") {
                        return Err(AppError::validation(format!("{} must be an image", name)));
                    }

                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        AppError::validation(format!("Invalid form data: {}", e.body_text()))
                    })?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }
}

impl FormData {
    /// Trimmed value of a text part; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn require(&self, name: &str) -> Result<String, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::validation(format!("{} is required", name)))
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, AppError> {
        self.text(name)
            .map(|value| {
                value
                    .parse::<T>()
                    .map_err(|_| AppError::validation(format!("{} must be a number", name)))
            })
            .transpose()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
