use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of the webhook URL on a generated link. The URL embeds the
/// store-assigned row id, so it can only be written after the insert
/// returns; until that second write lands the row stays `Drafted`.
/// (The in-memory *Identified* step, with the id known and the URL
/// computed but not yet persisted, is deliberately not a stored state.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    Drafted,
    Finalized,
}

impl Default for WebhookStatus {
    fn default() -> Self {
        WebhookStatus::Drafted
    }
}

/// Row shape of the `links_qr_code` collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeneratedLink {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub account_id: i64,
    /// Normalized phone (digits only, `55`-prefixed when 11 digits).
    pub phone_number: String,
    pub message: String,
    pub whatsapp_link: String,
    /// Empty string until the row reaches `Finalized`.
    pub qrcode_webhook_url: String,
    /// Incremented by an external collaborator, never by this console.
    #[serde(default)]
    pub cliques: i64,
    #[serde(default)]
    pub sorteio_nome: Option<String>,
    #[serde(default)]
    pub webhook_status: WebhookStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewLinkRow {
    pub account_id: i64,
    pub phone_number: String,
    pub message: String,
    pub whatsapp_link: String,
    pub qrcode_webhook_url: String,
    pub cliques: i64,
    pub sorteio_nome: Option<String>,
    pub webhook_status: WebhookStatus,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLinkRequest {
    pub account_id: i64,
    pub telefone: String,
    pub mensagem: String,
    #[serde(default)]
    pub sorteio_nome: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EditLinkRequest {
    pub telefone: String,
    pub mensagem: String,
}

/// Result of the two-phase create, returned once the row is finalized.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LinkCreated {
    pub id: Uuid,
    pub phone_number: String,
    pub whatsapp_link: String,
    pub qrcode_webhook_url: String,
}

/// Listing DTO with display-formatted phone and timestamp.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LinkResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub display_date: String,
    pub account_id: i64,
    pub phone_number: String,
    pub display_phone: String,
    pub message: String,
    pub whatsapp_link: String,
    pub qrcode_webhook_url: String,
    pub cliques: i64,
    pub sorteio_nome: Option<String>,
    pub webhook_status: WebhookStatus,
}

impl From<GeneratedLink> for LinkResponse {
    fn from(l: GeneratedLink) -> Self {
        let display_phone = crate::link::format_display_phone(&l.phone_number);
        let display_date = l.created_at.format("%d/%m/%Y, %H:%M").to_string();
        LinkResponse {
            id: l.id,
            created_at: l.created_at,
            display_date,
            account_id: l.account_id,
            phone_number: l.phone_number,
            display_phone,
            message: l.message,
            whatsapp_link: l.whatsapp_link,
            qrcode_webhook_url: l.qrcode_webhook_url,
            cliques: l.cliques,
            sorteio_nome: l.sorteio_nome,
            webhook_status: l.webhook_status,
        }
    }
}
