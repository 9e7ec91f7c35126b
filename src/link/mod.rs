pub mod qr;

pub use qr::{qr_filename, qr_png};

use uuid::Uuid;

/// Normalize an operator-typed phone: strip every non-digit character and,
/// when exactly 11 digits remain (Brazilian DDD + number), prefix the
/// country code `55`. Any other length is passed through stripped but
/// otherwise unchanged. Notably, a 10-digit local number keeps no country
/// code and can yield a malformed WhatsApp link. That behavior is kept
/// on purpose; changing it is an owner decision.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 11 {
        format!("55{digits}")
    } else {
        digits
    }
}

/// Compose the WhatsApp deep link for a normalized phone and message.
pub fn whatsapp_link(normalized_phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalized_phone,
        urlencoding::encode(message)
    )
}

/// Compose the QR webhook target URL from the store-assigned link id.
/// Only valid once the id is known (the insert has returned).
pub fn webhook_url(endpoint: &str, id: Uuid) -> String {
    format!("{endpoint}?id={id}")
}

/// Render a normalized `55`-prefixed phone as `(DD) NNNNN-NNNN` for
/// listings; anything that does not match that shape is shown as stored.
pub fn format_display_phone(phone: &str) -> String {
    let local = phone.strip_prefix("55").unwrap_or(phone);
    if local.len() == 11 && local.chars().all(|c| c.is_ascii_digit()) {
        format!("({}) {}-{}", &local[..2], &local[2..7], &local[7..])
    } else {
        phone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_eleven_digits() {
        assert_eq!(normalize_phone("11999999999"), "5511999999999");
        assert_eq!(normalize_phone("(11) 99999-9999"), "5511999999999");
        assert_eq!(normalize_phone("11 98888-7777"), "5511988887777");
    }

    #[test]
    fn test_normalize_phone_other_lengths_pass_through() {
        // 10 digits: no country code added, documented ambiguous case
        assert_eq!(normalize_phone("1199999999"), "1199999999");
        // already prefixed: 13 digits, left alone
        assert_eq!(normalize_phone("5511999999999"), "5511999999999");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        assert_eq!(
            whatsapp_link("5511988887777", "Hi"),
            "https://wa.me/5511988887777?text=Hi"
        );
        assert_eq!(
            whatsapp_link("5511988887777", "Olá, quero participar!"),
            "https://wa.me/5511988887777?text=Ol%C3%A1%2C%20quero%20participar%21"
        );
    }

    #[test]
    fn test_webhook_url_embeds_id() {
        let id = Uuid::nil();
        assert_eq!(
            webhook_url("https://req.iszap.com.br/webhook/criador-links-qrcode", id),
            format!("https://req.iszap.com.br/webhook/criador-links-qrcode?id={id}")
        );
    }

    #[test]
    fn test_format_display_phone() {
        assert_eq!(format_display_phone("5511999999999"), "(11) 99999-9999");
        // not a normalized shape: shown as stored
        assert_eq!(format_display_phone("1199999999"), "1199999999");
    }

    #[test]
    fn test_create_link_scenario() {
        // end-to-end formatter path for campaign "Promo1"
        let phone = normalize_phone("11988887777");
        assert_eq!(phone, "5511988887777");
        let link = whatsapp_link(&phone, "Hi");
        assert_eq!(link, "https://wa.me/5511988887777?text=Hi");

        let id = Uuid::new_v4();
        let endpoint = "https://req.iszap.com.br/webhook/criador-links-qrcode";
        let url = webhook_url(endpoint, id);
        assert_eq!(url, format!("{endpoint}?id={id}"));
        assert!(!url.is_empty());
    }
}
