//! List site content

use anyhow::Result;

use crate::content::Category;
use crate::helpers::{display_date, BadgeVariant, Difficulty};
use crate::Site;

/// Parse the content type argument
pub fn parse_category(content_type: &str) -> Result<Category> {
    match content_type {
        "report" | "reports" => Ok(Category::Reports),
        "model" | "models" => Ok(Category::Models),
        _ => anyhow::bail!("Unknown type: {}. Available: reports, models", content_type),
    }
}

/// List site content by type
pub async fn run(site: &Site, content_type: &str) -> Result<()> {
    let service = site.content_service();

    match parse_category(content_type)? {
        Category::Reports => {
            let listing = service.scan_reports().await?;
            println!("Reports ({}):", listing.items.len());
            for report in &listing.items {
                println!(
                    "  [{}] {} - {} ({}, {})",
                    report.id,
                    display_date(report.publish_date(), &report.publish_date),
                    report.title,
                    report.research_type,
                    BadgeVariant::for_research_type(&report.research_type)
                );
            }
            for diagnostic in &listing.diagnostics {
                tracing::warn!("Skipped {}: {}", diagnostic.path, diagnostic.error);
            }
        }
        Category::Models => {
            let listing = service.scan_models().await?;
            println!("Models ({}):", listing.items.len());
            for model in &listing.items {
                let difficulty = model
                    .extra
                    .get("difficulty")
                    .and_then(|v| v.as_str())
                    .map(Difficulty::parse)
                    .unwrap_or(Difficulty::Unknown);
                println!(
                    "  [{}] {} - {} ({}, {})",
                    model.id,
                    display_date(model.publish_date(), &model.publish_date),
                    model.title,
                    model.model_type,
                    difficulty.label()
                );
            }
            for diagnostic in &listing.diagnostics {
                tracing::warn!("Skipped {}: {}", diagnostic.path, diagnostic.error);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("reports").unwrap(), Category::Reports);
        assert_eq!(parse_category("model").unwrap(), Category::Models);
        assert!(parse_category("posts").is_err());
    }
}
