use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;

use crate::di::ServiceContainer;
use crate::entity::TokenCreatorError;
use crate::presenter::ApiError;
use crate::view::ImageUploadView;

const IMAGE_FIELD: &str = "image";

/// POST /api/upload-image
///
/// Pins the multipart `image` field and returns its gateway URL.
pub async fn handle_upload_image(
    State(services): State<Arc<ServiceContainer>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageUploadView>, ApiError> {
    let mut multipart = multipart.map_err(|_| TokenCreatorError::MissingImage)?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or(IMAGE_FIELD).to_string();
        let bytes = field.bytes().await?;
        let image_url = services
            .upload_interactor()
            .upload_image(bytes.to_vec(), &file_name)
            .await?;

        return Ok(Json(ImageUploadView { image_url }));
    }

    Err(TokenCreatorError::MissingImage.into())
}
