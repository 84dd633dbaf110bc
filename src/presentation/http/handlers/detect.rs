use crate::{
    domain::detection::DetectionRequest,
    presentation::http::{errors::ApiError, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, State},
};
use bytes::Bytes;

/// Accept one multipart image upload and forward it to the configured
/// workflow, replying with the remote JSON verbatim.
pub async fn detect_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut image: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Field error".into()))?
    {
        match field.name().unwrap_or("") {
            "image" => {
                // file_name must be captured before bytes() consumes the field
                let filename = field.file_name().unwrap_or("upload.jpg").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::BadRequest("Byte error".into()))?;
                image = Some((filename, data));
            }
            _ => {}
        }
    }

    let (filename, data) = image.ok_or(ApiError::BadRequest("Missing image".into()))?;
    let request =
        DetectionRequest::new(data, filename).map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let result = state.workflow.detect(request).await?;
    Ok(Json(result.into_inner()))
}
