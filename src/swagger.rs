use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::grid::{GridEmpty, GridState, GridView, Page, Sort, SortColumn, SortDirection};
use crate::handlers;
use crate::handlers::upload::UploadResponse;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::campaign::list_campaigns,
        handlers::campaign::create_campaign,
        handlers::participant::create_participant,
        handlers::participant::grid,
        handlers::participant::export_xlsx,
        handlers::participant::export_pdf,
        handlers::link::list_links,
        handlers::link::create_link,
        handlers::link::edit_link,
        handlers::link::delete_link,
        handlers::link::download_qr,
        handlers::link::repair_links,
        handlers::link::links_feed,
        handlers::upload::upload_media,
    ),
    components(
        schemas(
            Campaign,
            NewCampaignRow,
            CampaignMedia,
            CreateCampaignRequest,
            CreateCampaignResponse,
            Participant,
            NewParticipantRow,
            CreateParticipantRequest,
            GeneratedLink,
            NewLinkRow,
            CreateLinkRequest,
            EditLinkRequest,
            LinkCreated,
            LinkResponse,
            WebhookStatus,
            GridState,
            GridView,
            GridEmpty,
            Sort,
            SortColumn,
            SortDirection,
            Page,
            UploadResponse,
            ApiError,
        )
    ),
    tags(
        (name = "sorteios", description = "Campaign management API"),
        (name = "participantes", description = "Participant grid and export API"),
        (name = "links", description = "WhatsApp link and QR code API"),
        (name = "media", description = "Campaign media upload API"),
    ),
    info(
        title = "Sorteio Console API",
        version = "0.1.0",
        description = "Giveaway campaign console: participant grid, exports and WhatsApp/QR links"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
