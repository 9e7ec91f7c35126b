use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::ApiResponse;
use crate::storage::MediaStorage;

#[derive(Debug, Deserialize, IntoParams)]
pub struct UploadQuery {
    /// Original file name; sanitized before storage.
    pub file_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
}

#[utoipa::path(
    post,
    path = "/api/contas/{account_id}/media",
    tag = "media",
    params(
        ("account_id" = String, Path, description = "Owning account"),
        UploadQuery
    ),
    request_body(content = Vec<u8>, description = "Raw image bytes", content_type = "image/*"),
    responses(
        (status = 200, description = "Public URL of the stored object", body = UploadResponse),
        (status = 400, description = "Not an image or over 10MB")
    )
)]
/// Upload campaign media (images only, 10MB cap) and return its public
/// URL for use as a campaign's `url_media`.
pub async fn upload_media(
    storage: web::Data<MediaStorage>,
    path: web::Path<String>,
    query: web::Query<UploadQuery>,
    req: HttpRequest,
    body: web::Bytes,
) -> impl Responder {
    let account_id = path.into_inner();
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match storage
        .upload_campaign_media(&account_id, &query.file_name, &content_type, body.to_vec())
        .await
    {
        Ok(url) => HttpResponse::Ok().json(ApiResponse::success(UploadResponse { url })),
        Err(e) => e.error_response(),
    }
}
