//! QR code image URLs via api.qrserver.com.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};

const QR_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
const PREVIEW_SIZE: u32 = 300;
const DOWNLOAD_SIZE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrLinks {
    pub preview_url: String,
    pub download_url: String,
}

fn image_url(text: &str, size: u32) -> String {
    format!(
        "{QR_URL}?size={size}x{size}&data={}",
        urlencoding::encode(text)
    )
}

/// Build preview and download URLs for a non-empty text.
pub fn qr_links(text: &str) -> CoreResult<QrLinks> {
    if text.trim().is_empty() {
        return Err(CoreError::InvalidInput("empty QR text".to_string()));
    }
    Ok(QrLinks {
        preview_url: image_url(text, PREVIEW_SIZE),
        download_url: image_url(text, DOWNLOAD_SIZE),
    })
}
