use actix_web::{HttpResponse, Responder, ResponseError, web};
use uuid::Uuid;

use crate::models::{ApiResponse, CreateLinkRequest, EditLinkRequest, LinkCreated};
use crate::services::LinkService;
use crate::store::ChangeFeed;

#[utoipa::path(
    get,
    path = "/api/contas/{account_id}/links",
    tag = "links",
    params(("account_id" = i64, Path, description = "Owning account")),
    responses(
        (status = 200, description = "Generated links, newest first"),
        (status = 502, description = "Store failure")
    )
)]
pub async fn list_links(
    service: web::Data<LinkService>,
    path: web::Path<i64>,
) -> impl Responder {
    match service.list(path.into_inner()).await {
        Ok(links) => HttpResponse::Ok().json(ApiResponse::success(links)),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/links",
    tag = "links",
    request_body = CreateLinkRequest,
    responses(
        (status = 200, description = "Link created and finalized", body = LinkCreated),
        (status = 400, description = "Missing required field"),
        (status = 502, description = "Store failure; the row may be left drafted")
    )
)]
pub async fn create_link(
    service: web::Data<LinkService>,
    body: web::Json<CreateLinkRequest>,
) -> impl Responder {
    match service.create(&body).await {
        Ok(created) => HttpResponse::Ok().json(ApiResponse::success(created)),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/links/{id}",
    tag = "links",
    params(("id" = Uuid, Path, description = "Link id")),
    request_body = EditLinkRequest,
    responses(
        (status = 200, description = "Phone, message and WhatsApp link updated"),
        (status = 400, description = "Missing required field"),
        (status = 502, description = "Store failure")
    )
)]
/// Edit recomputes the WhatsApp link only; the webhook URL stays bound to
/// the original id.
pub async fn edit_link(
    service: web::Data<LinkService>,
    path: web::Path<Uuid>,
    body: web::Json<EditLinkRequest>,
) -> impl Responder {
    match service.edit(path.into_inner(), &body).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success_with_message(
            (),
            "Link updated".to_string(),
        )),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/links/{id}",
    tag = "links",
    params(("id" = Uuid, Path, description = "Link id")),
    responses(
        (status = 200, description = "Link deleted"),
        (status = 502, description = "Store failure")
    )
)]
pub async fn delete_link(
    service: web::Data<LinkService>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match service.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success_with_message(
            (),
            "Link deleted".to_string(),
        )),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/links/{id}/qrcode",
    tag = "links",
    params(("id" = Uuid, Path, description = "Link id")),
    responses(
        (status = 200, description = "1080x1080 PNG encoding the webhook URL"),
        (status = 400, description = "Link not finalized yet"),
        (status = 404, description = "Unknown link")
    )
)]
pub async fn download_qr(
    service: web::Data<LinkService>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match service.qr_png(path.into_inner()).await {
        Ok((filename, bytes)) => HttpResponse::Ok()
            .content_type("image/png")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            ))
            .body(bytes),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/contas/{account_id}/links/reparar",
    tag = "links",
    params(("account_id" = i64, Path, description = "Owning account")),
    responses(
        (status = 200, description = "Count of drafted rows finalized"),
        (status = 502, description = "Store failure")
    )
)]
/// Finalize rows left drafted by an interrupted two-phase create.
pub async fn repair_links(
    service: web::Data<LinkService>,
    path: web::Path<i64>,
) -> impl Responder {
    match service.repair_drafted(path.into_inner()).await {
        Ok(repaired) => HttpResponse::Ok().json(ApiResponse::success(repaired)),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/contas/{account_id}/links/feed",
    tag = "links",
    params(("account_id" = i64, Path, description = "Owning account")),
    responses(
        (status = 200, description = "SSE stream; each event signals a changed links collection")
    )
)]
/// Change-notification stream. Carries no payload diff; the client reacts
/// to every event with a full re-fetch of the listing.
pub async fn links_feed(
    feed: web::Data<dyn ChangeFeed>,
    path: web::Path<i64>,
) -> impl Responder {
    let rx = feed.subscribe(path.into_inner());

    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        let body = format!(
            "event: change\ndata: {{\"collection\":\"{}\",\"account_id\":{}}}\n\n",
            event.collection, event.account_id
        );
        Some((
            Ok::<_, crate::error::AppError>(web::Bytes::from(body)),
            rx,
        ))
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(stream)
}
