pub mod campaign;
pub mod link;
pub mod participant;
pub mod upload;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/sorteios", web::get().to(campaign::list_campaigns))
            .route("/sorteios", web::post().to(campaign::create_campaign))
            .route("/participantes", web::post().to(participant::create_participant))
            .route(
                "/participantes/{sorteio_nome}",
                web::get().to(participant::grid),
            )
            .route(
                "/participantes/{sorteio_nome}/export/xlsx",
                web::get().to(participant::export_xlsx),
            )
            .route(
                "/participantes/{sorteio_nome}/export/pdf",
                web::get().to(participant::export_pdf),
            )
            .route("/contas/{account_id}/links", web::get().to(link::list_links))
            .route(
                "/contas/{account_id}/links/feed",
                web::get().to(link::links_feed),
            )
            .route(
                "/contas/{account_id}/links/reparar",
                web::post().to(link::repair_links),
            )
            .route("/links", web::post().to(link::create_link))
            .route("/links/{id}", web::put().to(link::edit_link))
            .route("/links/{id}", web::delete().to(link::delete_link))
            .route("/links/{id}/qrcode", web::get().to(link::download_qr))
            .route(
                "/contas/{account_id}/media",
                web::post().to(upload::upload_media),
            ),
    );
}
