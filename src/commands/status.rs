//! Content workflow status

use anyhow::Result;

use crate::Site;

/// Print document counts per category
pub async fn run(site: &Site) -> Result<()> {
    let status = site.content_service().status().await?;

    println!("Research Reports: {}", status.reports);
    println!("Financial Models: {}", status.models);
    if status.skipped > 0 {
        println!("Skipped documents: {} (see warnings above)", status.skipped);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_status_counts_skipped_documents() {
        let dir = TempDir::new().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        fs::write(dir.path().join("content/reports/broken.md"), "---\nid: 9\n").unwrap();
        let site = Site::new(dir.path()).unwrap();

        run(&site).await.unwrap();

        let status = site.content_service().status().await.unwrap();
        assert_eq!(status.reports, 1);
        assert_eq!(status.models, 1);
        assert_eq!(status.skipped, 1);
    }
}
