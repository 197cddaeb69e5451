//! Create a new report or model document

use anyhow::Result;
use serde_yaml::Value;
use std::fs;
use std::path::PathBuf;

use crate::content::{frontmatter, Category, Metadata};
use crate::Site;

/// Next free numeric id: one past the largest numeric id in use
fn next_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0);
    (max + 1).to_string()
}

/// Front-matter for a fresh document, keys in the order authors expect
fn scaffold(category: Category, id: &str, title: &str, date: &str) -> Metadata {
    let text = |s: &str| Value::String(s.to_string());

    let mut metadata = Metadata::new();
    let (layout, type_key) = match category {
        Category::Reports => ("report", "researchType"),
        Category::Models => ("model", "modelType"),
    };
    metadata.insert("layout".into(), text(layout));
    metadata.insert("id".into(), text(id));
    metadata.insert("title".into(), text(title));
    metadata.insert("publishDate".into(), text(date));
    metadata.insert("author".into(), text(""));
    metadata.insert(type_key.into(), text(""));
    metadata.insert("summary".into(), text(""));
    metadata
}

/// Create a new document; returns its path
pub async fn create_document(
    site: &Site,
    category: Category,
    title: &str,
    id: Option<&str>,
) -> Result<PathBuf> {
    let service = site.content_service();

    let id = match id {
        Some(id) => id.to_string(),
        None => match category {
            Category::Reports => {
                let reports = service.list_reports().await?;
                next_id(reports.iter().map(|r| r.id.as_str()))
            }
            Category::Models => {
                let models = service.list_models().await?;
                next_id(models.iter().map(|m| m.id.as_str()))
            }
        },
    };

    let target_dir = site.content_dir.join(category.as_str());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug::slugify(title)));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let metadata = scaffold(category, &id, title, &today);
    let document = frontmatter::render(&metadata, "\n## Summary\n\n")?;

    fs::write(&file_path, document)?;
    tracing::info!("Created {} {} with id {}", category, title, id);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(["1", "7", "abc", "3"].into_iter()), "8");
        assert_eq!(next_id(std::iter::empty()), "1");
    }

    #[tokio::test]
    async fn test_create_document_is_listed() {
        let dir = TempDir::new().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_document(&site, Category::Reports, "Semiconductor Outlook 2024", None)
            .await
            .unwrap();
        assert!(path.ends_with("content/reports/semiconductor-outlook-2024.md"));

        let service = site.content_service();
        let report = service.get_report("2").await.unwrap().unwrap();
        assert_eq!(report.meta.title, "Semiconductor Outlook 2024");
        assert!(report.content.contains("<h2>Summary</h2>"));
        assert!(report.slides.is_empty());

        let duplicate =
            create_document(&site, Category::Reports, "Semiconductor Outlook 2024", None).await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_create_model_with_explicit_id() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        create_document(&site, Category::Models, "LBO Model", Some("lbo"))
            .await
            .unwrap();
        let models = site.content_service().list_models().await.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "lbo");
        assert_eq!(models[0].layout.as_deref(), Some("model"));
    }
}
