//! 画像ソースモジュール
//!
//! ファイル・フォルダ・URLを解析対象の写真一覧に展開し、
//! 画像バイト列を取得する。

mod prepare;

pub use prepare::{prepare_image, PreparedImage};

use crate::error::{DressCodeError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// コマンドラインで指定された画像ソース
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Folder(PathBuf),
    Url(String),
}

/// 解析対象の写真1枚
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRef {
    Path(PathBuf),
    Url(String),
}

impl ImageSource {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return ImageSource::Url(trimmed.to_string());
        }

        let path = PathBuf::from(trimmed);
        if path.is_dir() {
            ImageSource::Folder(path)
        } else {
            ImageSource::File(path)
        }
    }

    /// 写真一覧に展開
    pub fn photos(&self) -> Result<Vec<PhotoRef>> {
        match self {
            ImageSource::Url(url) => Ok(vec![PhotoRef::Url(url.clone())]),
            ImageSource::File(path) => {
                if !path.exists() {
                    return Err(DressCodeError::FileNotFound(path.display().to_string()));
                }
                if !has_image_extension(path) {
                    return Err(DressCodeError::UnsupportedImage(path.display().to_string()));
                }
                Ok(vec![PhotoRef::Path(path.clone())])
            }
            ImageSource::Folder(folder) => {
                let images = scan_folder(folder)?;
                if images.is_empty() {
                    return Err(DressCodeError::NoImagesFound(folder.display().to_string()));
                }
                Ok(images.into_iter().map(PhotoRef::Path).collect())
            }
        }
    }
}

impl PhotoRef {
    /// 表示・レポート用の名前
    pub fn label(&self) -> String {
        match self {
            PhotoRef::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            PhotoRef::Url(url) => url.clone(),
        }
    }

    /// 画像バイト列を取得
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<u8>> {
        match self {
            PhotoRef::Path(path) => Ok(tokio::fs::read(path).await?),
            PhotoRef::Url(url) => {
                tracing::debug!(url = %url, "fetching image");
                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| DressCodeError::ImageFetch(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(DressCodeError::ImageFetch(format!(
                        "{} (HTTP {})",
                        url,
                        response.status()
                    )));
                }

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| DressCodeError::ImageFetch(e.to_string()))?;
                Ok(bytes.to_vec())
            }
        }
    }
}

/// フォルダ直下の画像をファイル名順に列挙
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(DressCodeError::FolderNotFound(folder.display().to_string()));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && has_image_extension(p))
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("gif"));
    }

    #[test]
    fn test_parse_url() {
        assert_eq!(
            ImageSource::parse("https://example.com/foto.jpg"),
            ImageSource::Url("https://example.com/foto.jpg".to_string())
        );
        assert!(matches!(ImageSource::parse("http://x/y.png"), ImageSource::Url(_)));
    }

    #[test]
    fn test_parse_file_and_folder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir_str = temp_dir.path().to_string_lossy().to_string();
        assert!(matches!(ImageSource::parse(&dir_str), ImageSource::Folder(_)));
        assert!(matches!(ImageSource::parse("foto.jpg"), ImageSource::File(_)));
    }

    #[test]
    fn test_photos_file_not_found() {
        let source = ImageSource::File(PathBuf::from("/nonexistent/foto.jpg"));
        assert!(matches!(source.photos(), Err(DressCodeError::FileNotFound(_))));
    }

    #[test]
    fn test_photos_unsupported_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("foto.gif");
        File::create(&path).unwrap();

        let source = ImageSource::File(path);
        assert!(matches!(source.photos(), Err(DressCodeError::UnsupportedImage(_))));
    }

    #[test]
    fn test_photos_empty_folder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = ImageSource::Folder(temp_dir.path().to_path_buf());
        assert!(matches!(source.photos(), Err(DressCodeError::NoImagesFound(_))));
    }

    #[test]
    fn test_scan_folder_sorted_and_filtered() {
        let temp_dir = tempfile::tempdir().unwrap();

        File::create(temp_dir.path().join("c.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.path().join("a.PNG")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.path().join("b.jpeg")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.path().join("readme.txt")).unwrap().write_all(b"text").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        File::create(temp_dir.path().join("sub").join("d.jpg")).unwrap();

        let result = scan_folder(temp_dir.path()).unwrap();
        let names: Vec<String> = result
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.jpeg", "c.jpg"]);
    }

    #[test]
    fn test_label() {
        assert_eq!(PhotoRef::Path(PathBuf::from("/tmp/foto.jpg")).label(), "foto.jpg");
        assert_eq!(PhotoRef::Url("https://x/y.jpg".into()).label(), "https://x/y.jpg");
    }
}
