use super::LinkCreated;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Row shape of the `sorteio_cadastro` collection. Campaigns are immutable
/// after creation (the media URL is set once, at creation) and are never
/// deleted through this console.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub id: Uuid,
    pub account_id: String,
    pub nome_sorteio: String,
    #[serde(default)]
    pub url_media: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape: the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewCampaignRow {
    pub nome_sorteio: String,
    pub account_id: String,
    pub url_media: Option<String>,
}

/// Payload for the combined "create campaign with QR link" operation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCampaignRequest {
    pub nome_sorteio: String,
    pub account_id: String,
    /// Contact phone for the generated WhatsApp link, raw operator input.
    pub telefone: String,
    /// Pre-filled WhatsApp message.
    pub mensagem: String,
    /// Public media URL obtained from a prior upload, if any.
    #[serde(default)]
    pub url_media: Option<String>,
    /// Inline image to upload during creation. Any media failure degrades
    /// gracefully: the campaign is still created, just without media.
    #[serde(default)]
    pub media: Option<CampaignMedia>,
}

/// Image attached to the combined create, transported as base64.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CampaignMedia {
    pub file_name: String,
    pub content_type: String,
    pub data_base64: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateCampaignResponse {
    pub campaign: Campaign,
    pub link: LinkCreated,
}
