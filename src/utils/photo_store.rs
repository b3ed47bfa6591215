use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use uuid::Uuid;

/// Filesystem blob store for attendance photos.
///
/// Keys are relative to the upload root: `sellers/{seller_id}/{date}_{uuid}.{ext}`.
/// The key is what gets persisted in `attendance.photo_path`.

fn sanitized_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .filter(|e| e.len() <= 5 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "jpg".to_string())
}

fn seller_dir(root: &str, seller_id: u64) -> PathBuf {
    Path::new(root).join("sellers").join(seller_id.to_string())
}

/// Writes the photo bytes and returns the storage key.
pub async fn save_photo(
    root: &str,
    seller_id: u64,
    business_date: NaiveDate,
    file_name: Option<&str>,
    bytes: &[u8],
) -> io::Result<String> {
    let ext = sanitized_extension(file_name);
    let key = format!(
        "sellers/{}/{}_{}.{}",
        seller_id,
        business_date,
        Uuid::new_v4(),
        ext
    );

    tokio::fs::create_dir_all(seller_dir(root, seller_id)).await?;
    tokio::fs::write(Path::new(root).join(&key), bytes).await?;

    Ok(key)
}

/// Best-effort removal of a single stored photo (orphan cleanup after a
/// failed insert, or record deletion).
pub async fn remove_photo(root: &str, key: &str) {
    let _ = tokio::fs::remove_file(Path::new(root).join(key)).await;
}

/// Best-effort removal of everything a seller owns under the upload root.
/// Used when an admin deletes the seller account.
pub async fn remove_seller_photos(root: &str, seller_id: u64) {
    let _ = tokio::fs::remove_dir_all(seller_dir(root, seller_id)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_falls_back_to_jpg() {
        assert_eq!(sanitized_extension(Some("sales.PNG")), "png");
        assert_eq!(sanitized_extension(Some("noext")), "jpg");
        assert_eq!(sanitized_extension(Some("../../etc/passwd")), "jpg");
        assert_eq!(sanitized_extension(Some("x.longextension")), "jpg");
        assert_eq!(sanitized_extension(None), "jpg");
    }
}
