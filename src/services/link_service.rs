use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::link;
use crate::models::{
    CreateLinkRequest, EditLinkRequest, GeneratedLink, LinkCreated, LinkResponse, NewLinkRow,
    WebhookStatus,
};
use crate::store::{LINKS, SupabaseStore};

#[derive(Clone)]
pub struct LinkService {
    store: Arc<SupabaseStore>,
    webhook_endpoint: String,
}

impl LinkService {
    pub fn new(store: Arc<SupabaseStore>, webhook_endpoint: String) -> Self {
        Self {
            store,
            webhook_endpoint,
        }
    }

    pub async fn list(&self, account_id: i64) -> AppResult<Vec<LinkResponse>> {
        let rows: Vec<GeneratedLink> = self
            .store
            .list(LINKS, &[("account_id", account_id.to_string())])
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<GeneratedLink> {
        let mut rows: Vec<GeneratedLink> =
            self.store.list(LINKS, &[("id", id.to_string())]).await?;
        rows.pop()
            .ok_or_else(|| AppError::NotFound(format!("Link {id} not found")))
    }

    /// Two-phase create. The webhook URL embeds the store-assigned id, so
    /// the row is first inserted `drafted` with an empty URL; once the id
    /// is known the URL is written back and the row becomes `finalized`.
    /// If that second write fails the row stays `drafted`. The error is
    /// surfaced to the caller, never rolled back or silently retried
    /// (`repair_drafted` exists to pick such rows up later).
    pub async fn create(&self, req: &CreateLinkRequest) -> AppResult<LinkCreated> {
        if req.telefone.trim().is_empty() || req.mensagem.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Phone and message are required".to_string(),
            ));
        }

        let phone_number = link::normalize_phone(&req.telefone);
        let whatsapp_link = link::whatsapp_link(&phone_number, &req.mensagem);

        let drafted: GeneratedLink = self
            .store
            .insert(
                LINKS,
                &NewLinkRow {
                    account_id: req.account_id,
                    phone_number: phone_number.clone(),
                    message: req.mensagem.clone(),
                    whatsapp_link: whatsapp_link.clone(),
                    qrcode_webhook_url: String::new(),
                    cliques: 0,
                    sorteio_nome: req.sorteio_nome.clone(),
                    webhook_status: WebhookStatus::Drafted,
                },
            )
            .await?;

        let qrcode_webhook_url = link::webhook_url(&self.webhook_endpoint, drafted.id);

        if let Err(e) = self.finalize(drafted.id, &qrcode_webhook_url).await {
            log::error!("link {} left drafted, finalization failed: {e}", drafted.id);
            return Err(e);
        }

        Ok(LinkCreated {
            id: drafted.id,
            phone_number,
            whatsapp_link,
            qrcode_webhook_url,
        })
    }

    /// Recompute phone, message and WhatsApp link. The webhook URL is
    /// bound to the stable row id and is deliberately left untouched.
    pub async fn edit(&self, id: Uuid, req: &EditLinkRequest) -> AppResult<()> {
        if req.telefone.trim().is_empty() || req.mensagem.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Phone and message are required".to_string(),
            ));
        }

        let phone_number = link::normalize_phone(&req.telefone);
        let whatsapp_link = link::whatsapp_link(&phone_number, &req.mensagem);

        self.store
            .update(
                LINKS,
                id,
                &json!({
                    "phone_number": phone_number,
                    "message": req.mensagem,
                    "whatsapp_link": whatsapp_link,
                }),
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store.delete(LINKS, id).await
    }

    /// Recovery pass for rows stuck in `drafted` by a failed finalization:
    /// recompute each webhook URL from the (stable) id and finalize.
    pub async fn repair_drafted(&self, account_id: i64) -> AppResult<usize> {
        let stuck: Vec<GeneratedLink> = self
            .store
            .list(
                LINKS,
                &[
                    ("account_id", account_id.to_string()),
                    ("webhook_status", "drafted".to_string()),
                ],
            )
            .await?;

        let mut repaired = 0;
        for row in stuck {
            let url = link::webhook_url(&self.webhook_endpoint, row.id);
            self.finalize(row.id, &url).await?;
            repaired += 1;
        }
        Ok(repaired)
    }

    /// Render the QR artifact for a finalized link.
    pub async fn qr_png(&self, id: Uuid) -> AppResult<(String, Vec<u8>)> {
        let row = self.get(id).await?;
        if row.qrcode_webhook_url.is_empty() {
            // a drafted row has no webhook URL to encode yet
            return Err(AppError::ValidationError(format!(
                "Link {id} has no finalized webhook URL"
            )));
        }
        let bytes = link::qr_png(&row.qrcode_webhook_url)?;
        let name = link::qr_filename(
            &row.id.to_string(),
            chrono::Utc::now().timestamp_millis(),
        );
        Ok((name, bytes))
    }

    async fn finalize(&self, id: Uuid, url: &str) -> AppResult<()> {
        self.store
            .update(
                LINKS,
                id,
                &json!({
                    "qrcode_webhook_url": url,
                    "webhook_status": WebhookStatus::Finalized,
                }),
            )
            .await
    }
}
