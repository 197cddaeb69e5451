//! Export resolved content as JSON

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::Site;

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

/// Write list indexes and one record per report and model under the public directory
pub async fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();
    let service = site.content_service();

    let reports = service.list_reports().await?;
    let models = service.list_models().await?;

    write_json(&site.public_dir.join("reports.json"), &reports)?;
    write_json(&site.public_dir.join("models.json"), &models)?;

    for meta in &reports {
        match service.get_report(&meta.id).await? {
            Some(record) => {
                let path = site
                    .public_dir
                    .join("reports")
                    .join(format!("{}.json", slug::slugify(&meta.id)));
                write_json(&path, &record)?;
            }
            None => tracing::warn!("Report {} disappeared during export", meta.id),
        }
    }

    for meta in &models {
        match service.get_model(&meta.id).await? {
            Some(record) => {
                let path = site
                    .public_dir
                    .join("models")
                    .join(format!("{}.json", slug::slugify(&meta.id)));
                write_json(&path, &record)?;
            }
            None => tracing::warn!("Model {} disappeared during export", meta.id),
        }
    }

    tracing::info!(
        "Exported {} reports and {} models in {:.2}s",
        reports.len(),
        models.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_writes_indexes_and_records() {
        let dir = TempDir::new().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let site = Site::new(dir.path()).unwrap();

        run(&site).await.unwrap();

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(site.public_dir.join("reports.json")).unwrap())
                .unwrap();
        assert_eq!(index.as_array().map(Vec::len), Some(1));
        assert!(index[0].get("content").is_none());

        let record: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(site.public_dir.join("reports/1.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(record["slides"].as_array().map(Vec::len), Some(4));
        assert!(record["content"].as_str().unwrap().contains("<h2>Valuation</h2>"));

        assert!(site.public_dir.join("models/1.json").exists());
    }
}
