use axum::Json;

use crate::view::MessageView;

/// GET /
pub async fn handle_health() -> Json<MessageView> {
    Json(MessageView {
        message: "Solana Token Creator API is running".to_string(),
    })
}
