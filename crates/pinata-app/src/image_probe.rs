use std::path::Path;

use anyhow::Context;
use pinata_core::types::ImageSize;

/// Read an image and its pixel size
pub async fn probe_image(path: &Path) -> anyhow::Result<(Vec<u8>, ImageSize)> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let owned = path.to_path_buf();
    let (width, height) = tokio::task::spawn_blocking(move || image::image_dimensions(&owned))
        .await?
        .with_context(|| format!("Unsupported image {}", path.display()))?;

    let size = ImageSize::new(width as f32, height as f32);
    anyhow::ensure!(size.is_known(), "Image {} has no pixels", path.display());

    tracing::debug!("Probed {}: {width}x{height}", path.display());
    Ok((bytes, size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        image::RgbImage::new(40, 20).save(&path).unwrap();

        let (bytes, size) = probe_image(&path).await.unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(size, ImageSize::new(40.0, 20.0));
    }

    #[tokio::test]
    async fn test_probe_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(probe_image(&path).await.is_err());
    }
}
