use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use sorteio_console::{
    config::Config,
    handlers,
    middlewares::create_cors,
    services::{CampaignService, LinkService, ParticipantService},
    storage::MediaStorage,
    store::{ChangeFeed, LINKS, PollingChangeFeed, SupabaseStore},
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let store = Arc::new(SupabaseStore::new(config.supabase.clone()));
    let media = Arc::new(MediaStorage::new(
        config.supabase.clone(),
        config.storage.clone(),
    ));

    let link_service = LinkService::new(store.clone(), config.links.webhook_endpoint.clone());
    let participant_service = ParticipantService::new(store.clone());
    let campaign_service =
        CampaignService::new(store.clone(), media.clone(), link_service.clone());

    let change_feed: Arc<dyn ChangeFeed> = Arc::new(PollingChangeFeed::new(
        store.clone(),
        LINKS,
        config.links.feed_poll_secs,
    ));

    let bind_addr = (config.server.host.clone(), config.server.port);
    log::info!(
        "Starting sorteio console on {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(campaign_service.clone()))
            .app_data(web::Data::new(participant_service.clone()))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::from(media.clone()))
            .app_data(web::Data::from(change_feed.clone()))
            .configure(handlers::configure_routes)
            .configure(swagger_config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
