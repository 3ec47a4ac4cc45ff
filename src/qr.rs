use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, Rgb};
use qrcode::{EcLevel, QrCode};
use serde::Serialize;

use crate::models::Submission;

const MODULE_PIXELS: u32 = 8;
const DARK: Rgb<u8> = Rgb([0x0f, 0x17, 0x2a]);
const LIGHT: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

pub const PAYLOAD_TYPE: &str = "skis_gateway";

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

/// What the QR code carries. Field order is the wire order.
#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub amount: &'a str,
    pub company: &'a str,
    pub rep: &'a str,
    pub app: &'a str,
}

impl<'a> Payload<'a> {
    pub fn for_submission(submission: &'a Submission) -> Self {
        Self {
            kind: PAYLOAD_TYPE,
            amount: &submission.amount,
            company: &submission.company_name,
            rep: &submission.representative_name,
            app: submission.app_software_name.as_deref().unwrap_or(""),
        }
    }

    pub fn to_json(&self) -> Result<String, QrError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Encode `payload` as a PNG QR code and return it as a `data:` URI.
pub fn data_url(payload: &str) -> Result<String, QrError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)?;

    let image = code
        .render::<Rgb<u8>>()
        .dark_color(DARK)
        .light_color(LIGHT)
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}
