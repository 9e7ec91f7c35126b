use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{AppError, AppResult};
use crate::models::{
    Campaign, CreateCampaignRequest, CreateCampaignResponse, CreateLinkRequest, NewCampaignRow,
};
use crate::services::LinkService;
use crate::storage::MediaStorage;
use crate::store::{CAMPAIGNS, SupabaseStore};

#[derive(Clone)]
pub struct CampaignService {
    store: Arc<SupabaseStore>,
    media: Arc<MediaStorage>,
    link_service: LinkService,
}

impl CampaignService {
    pub fn new(
        store: Arc<SupabaseStore>,
        media: Arc<MediaStorage>,
        link_service: LinkService,
    ) -> Self {
        Self {
            store,
            media,
            link_service,
        }
    }

    /// Campaigns, newest first, optionally scoped to one account.
    pub async fn list(&self, account_id: Option<&str>) -> AppResult<Vec<Campaign>> {
        let filters = match account_id {
            Some(id) => vec![("account_id", id.to_string())],
            None => vec![],
        };
        self.store.list(CAMPAIGNS, &filters).await
    }

    /// Create a campaign and its WhatsApp/QR link in one operation.
    ///
    /// Any inline media is uploaded first; a failed upload degrades
    /// gracefully and the campaign is created without media rather than
    /// aborting. The link insert + webhook finalization happen after the
    /// campaign row exists, mirroring the operator flow.
    pub async fn create_with_link(
        &self,
        req: &CreateCampaignRequest,
    ) -> AppResult<CreateCampaignResponse> {
        if req.nome_sorteio.trim().is_empty()
            || req.telefone.trim().is_empty()
            || req.mensagem.trim().is_empty()
        {
            return Err(AppError::ValidationError(
                "Campaign name, phone and message are required".to_string(),
            ));
        }
        // validate before any network round-trip
        let link_account_id: i64 = req.account_id.parse().map_err(|_| {
            AppError::ValidationError(format!("Account id must be numeric: {}", req.account_id))
        })?;

        let url_media = self.resolve_media(req).await;

        let campaign: Campaign = self
            .store
            .insert(
                CAMPAIGNS,
                &NewCampaignRow {
                    nome_sorteio: req.nome_sorteio.clone(),
                    account_id: req.account_id.clone(),
                    url_media,
                },
            )
            .await?;

        let link = self
            .link_service
            .create(&CreateLinkRequest {
                account_id: link_account_id,
                telefone: req.telefone.clone(),
                mensagem: req.mensagem.clone(),
                sorteio_nome: Some(req.nome_sorteio.clone()),
            })
            .await?;

        Ok(CreateCampaignResponse { campaign, link })
    }

    /// Media URL for the new campaign. Inline media that fails to decode
    /// or upload is logged and dropped, never fatal; without inline media
    /// the request's pre-uploaded URL (if any) is used.
    async fn resolve_media(&self, req: &CreateCampaignRequest) -> Option<String> {
        let media = match &req.media {
            Some(media) => media,
            None => return req.url_media.clone(),
        };

        let bytes = match BASE64.decode(&media.data_base64) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("media decode failed, creating campaign without it: {e}");
                return req.url_media.clone();
            }
        };

        match self
            .media
            .upload_campaign_media(&req.account_id, &media.file_name, &media.content_type, bytes)
            .await
        {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("media upload failed, creating campaign without it: {e}");
                req.url_media.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StorageConfig, SupabaseConfig};
    use crate::models::CampaignMedia;

    fn service() -> CampaignService {
        let supabase = SupabaseConfig {
            base_url: "http://localhost:0".to_string(),
            api_key: "test".to_string(),
        };
        let store = Arc::new(SupabaseStore::new(supabase.clone()));
        let media = Arc::new(MediaStorage::new(
            supabase,
            StorageConfig {
                bucket: "campaign-media".to_string(),
            },
        ));
        let link_service = LinkService::new(store.clone(), "http://localhost:0/hook".to_string());
        CampaignService::new(store, media, link_service)
    }

    fn request(media: Option<CampaignMedia>) -> CreateCampaignRequest {
        CreateCampaignRequest {
            nome_sorteio: "Promo1".to_string(),
            account_id: "1".to_string(),
            telefone: "11988887777".to_string(),
            mensagem: "Hi".to_string(),
            url_media: None,
            media,
        }
    }

    #[tokio::test]
    async fn test_rejected_media_degrades_to_no_url() {
        // wrong MIME type is rejected before any upload round-trip; the
        // campaign creation flow must proceed without media
        let media = CampaignMedia {
            file_name: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
            data_base64: BASE64.encode(b"not an image"),
        };
        assert_eq!(service().resolve_media(&request(Some(media))).await, None);
    }

    #[tokio::test]
    async fn test_undecodable_media_degrades_to_no_url() {
        let media = CampaignMedia {
            file_name: "banner.png".to_string(),
            content_type: "image/png".to_string(),
            data_base64: "%%% not base64 %%%".to_string(),
        };
        assert_eq!(service().resolve_media(&request(Some(media))).await, None);
    }

    #[tokio::test]
    async fn test_failed_media_falls_back_to_preuploaded_url() {
        let media = CampaignMedia {
            file_name: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
            data_base64: BASE64.encode(b"not an image"),
        };
        let mut req = request(Some(media));
        req.url_media = Some("https://cdn.example/banner.png".to_string());
        assert_eq!(
            service().resolve_media(&req).await,
            Some("https://cdn.example/banner.png".to_string())
        );
    }

    #[tokio::test]
    async fn test_no_media_passes_preuploaded_url_through() {
        let mut req = request(None);
        req.url_media = Some("https://cdn.example/banner.png".to_string());
        assert_eq!(
            service().resolve_media(&req).await,
            Some("https://cdn.example/banner.png".to_string())
        );
    }
}
