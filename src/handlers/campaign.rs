use actix_web::{HttpResponse, Responder, ResponseError, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::{ApiResponse, CreateCampaignRequest, CreateCampaignResponse};
use crate::services::CampaignService;

#[derive(Debug, Deserialize, IntoParams)]
pub struct CampaignListQuery {
    /// Restrict to one owning account.
    pub account_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/sorteios",
    tag = "sorteios",
    params(CampaignListQuery),
    responses(
        (status = 200, description = "Campaigns, newest first"),
        (status = 502, description = "Store failure")
    )
)]
pub async fn list_campaigns(
    service: web::Data<CampaignService>,
    query: web::Query<CampaignListQuery>,
) -> impl Responder {
    match service.list(query.account_id.as_deref()).await {
        Ok(campaigns) => HttpResponse::Ok().json(ApiResponse::success(campaigns)),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/sorteios",
    tag = "sorteios",
    request_body = CreateCampaignRequest,
    responses(
        (status = 200, description = "Campaign and finalized QR link", body = CreateCampaignResponse),
        (status = 400, description = "Missing required field"),
        (status = 502, description = "Store failure")
    )
)]
/// Create a campaign together with its WhatsApp contact link and QR
/// webhook (two-phase write on the link row). Inline media is uploaded
/// along the way; if that fails the campaign is created without it.
pub async fn create_campaign(
    service: web::Data<CampaignService>,
    body: web::Json<CreateCampaignRequest>,
) -> impl Responder {
    match service.create_with_link(&body).await {
        Ok(created) => HttpResponse::Ok().json(ApiResponse::success(created)),
        Err(e) => e.error_response(),
    }
}
