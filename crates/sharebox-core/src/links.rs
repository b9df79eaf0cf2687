//! Presentation helpers shared by ingestion and notification.

use uuid::Uuid;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Build the download-page link handed to clients: `<base>/download/<id>`.
pub fn download_page_link(base_url: &str, id: Uuid) -> String {
    format!("{}/download/{}", base_url.trim_end_matches('/'), id)
}

/// Size in megabytes with two decimals, e.g. `"1.50 MB"`.
pub fn human_readable_size(size_in_bytes: i64) -> String {
    format!("{:.2} MB", size_in_bytes as f64 / BYTES_PER_MEGABYTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_has_download_shape() {
        let id = Uuid::new_v4();
        assert_eq!(
            download_page_link("https://share.example.com", id),
            format!("https://share.example.com/download/{}", id)
        );
    }

    #[test]
    fn link_ignores_trailing_slash_on_base() {
        let id = Uuid::new_v4();
        assert_eq!(
            download_page_link("https://share.example.com/", id),
            format!("https://share.example.com/download/{}", id)
        );
    }

    #[test]
    fn small_files_round_to_zero_megabytes() {
        assert_eq!(human_readable_size(10), "0.00 MB");
    }

    #[test]
    fn sizes_use_binary_megabytes() {
        assert_eq!(human_readable_size(1_048_576), "1.00 MB");
        assert_eq!(human_readable_size(1_572_864), "1.50 MB");
        assert_eq!(human_readable_size(5_347_737), "5.10 MB");
    }
}
