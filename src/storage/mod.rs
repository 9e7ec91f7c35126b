use chrono::Utc;
use regex::Regex;
use reqwest::Client;

use crate::config::{StorageConfig, SupabaseConfig};
use crate::error::{AppError, AppResult};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Object storage client for campaign media: image uploads only, capped at
/// 10 MB, stored under `sorteios/{account}/{timestamp}_{sanitized name}`
/// and served back through the bucket's public URL.
#[derive(Clone)]
pub struct MediaStorage {
    client: Client,
    supabase: SupabaseConfig,
    bucket: String,
}

impl MediaStorage {
    pub fn new(supabase: SupabaseConfig, storage: StorageConfig) -> Self {
        Self {
            client: Client::new(),
            supabase,
            bucket: storage.bucket,
        }
    }

    /// Validate, upload and return the public URL of the stored object.
    pub async fn upload_campaign_media(
        &self,
        account_id: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<String> {
        if !content_type.starts_with("image/") {
            return Err(AppError::UploadError(
                "Only image files are accepted".to_string(),
            ));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::UploadError(
                "Image exceeds the 10MB limit".to_string(),
            ));
        }

        let path = object_path(account_id, file_name, Utc::now().timestamp_millis());
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.supabase.base_url, self.bucket, path
        );

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.supabase.api_key)
            .bearer_auth(&self.supabase.api_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UploadError(format!(
                "storage rejected upload ({status}): {body}"
            )));
        }

        Ok(self.get_public_url(&path))
    }

    pub fn get_public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.supabase.base_url, self.bucket, path
        )
    }
}

/// `sorteios/{account}/{timestamp}_{name}` with everything outside
/// `[a-zA-Z0-9.]` in the file name collapsed to `_`.
fn object_path(account_id: &str, file_name: &str, timestamp_millis: i64) -> String {
    let sanitizer = Regex::new(r"[^a-zA-Z0-9.]").unwrap();
    let sanitized = sanitizer.replace_all(file_name, "_");
    format!("sorteios/{account_id}/{timestamp_millis}_{sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn storage() -> MediaStorage {
        MediaStorage::new(
            SupabaseConfig {
                base_url: "https://acme.supabase.co".to_string(),
                api_key: "key".to_string(),
            },
            StorageConfig {
                bucket: "campaign-media".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_upload_rejects_non_image_before_any_request() {
        let err = storage()
            .upload_campaign_media("1", "notes.txt", "text/plain", vec![1, 2, 3])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UploadError(_)));
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_image_before_any_request() {
        let bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = storage()
            .upload_campaign_media("1", "big.png", "image/png", bytes)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UploadError(_)));
    }

    #[test]
    fn test_object_path_sanitizes_file_name() {
        assert_eq!(
            object_path("42", "minha foto (1).png", 1735689600000),
            "sorteios/42/1735689600000_minha_foto__1_.png"
        );
    }

    #[test]
    fn test_object_path_keeps_safe_names() {
        assert_eq!(
            object_path("7", "banner.jpeg", 1000),
            "sorteios/7/1000_banner.jpeg"
        );
    }

    #[test]
    fn test_public_url_shape() {
        assert_eq!(
            storage().get_public_url("sorteios/42/1_a.png"),
            "https://acme.supabase.co/storage/v1/object/public/campaign-media/sorteios/42/1_a.png"
        );
    }
}
