//! 送信用の画像前処理
//!
//! デコードできることを確認し、長辺を max_size 以下に縮小して JPEG に再エンコードする。

use crate::error::{DressCodeError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use sha2::{Digest, Sha256};
use std::io::Cursor;

/// 送信用に整えた画像
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

impl PreparedImage {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// 画像内容のSHA-256（キャッシュキー用）
    pub fn content_hash(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

pub fn prepare_image(raw: &[u8], max_size: u32) -> Result<PreparedImage> {
    let decoded = image::load_from_memory(raw)
        .map_err(|e| DressCodeError::ImageLoad(e.to_string()))?;

    let resized = if max_size > 0 && decoded.width().max(decoded.height()) > max_size {
        decoded.resize(max_size, max_size, FilterType::Lanczos3)
    } else {
        decoded
    };

    // JPEGはアルファ非対応
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut cursor = Cursor::new(Vec::new());
    rgb.write_to(&mut cursor, ImageFormat::Jpeg)
        .map_err(|e| DressCodeError::ImageLoad(format!("JPEG encode: {}", e)))?;

    Ok(PreparedImage {
        bytes: cursor.into_inner(),
        mime_type: "image/jpeg",
        width: rgb.width(),
        height: rgb.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([20, 20, 20, 128]));
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_downscale_keeps_aspect_ratio() {
        let prepared = prepare_image(&png_bytes(400, 200), 100).unwrap();
        assert_eq!((prepared.width, prepared.height), (100, 50));
        assert_eq!(prepared.mime_type, "image/jpeg");

        let decoded = image::load_from_memory(&prepared.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let prepared = prepare_image(&png_bytes(40, 30), 100).unwrap();
        assert_eq!((prepared.width, prepared.height), (40, 30));
    }

    #[test]
    fn test_invalid_bytes() {
        let result = prepare_image(b"not an image", 100);
        assert!(matches!(result, Err(DressCodeError::ImageLoad(_))));
    }

    #[test]
    fn test_content_hash_is_stable() {
        let prepared = prepare_image(&png_bytes(10, 10), 100).unwrap();
        assert_eq!(prepared.content_hash(), prepared.content_hash());
        assert_eq!(prepared.content_hash().len(), 64);
        assert!(!prepared.to_base64().is_empty());
    }
}
