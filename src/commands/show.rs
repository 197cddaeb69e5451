//! Show a single report or model

use anyhow::Result;

use crate::commands::list::parse_category;
use crate::content::Category;
use crate::helpers::display_date;
use crate::Site;

/// Print one record as HTML (default) or JSON.
///
/// Returns false when no document has the id.
pub async fn run(site: &Site, content_type: &str, id: &str, json: bool) -> Result<bool> {
    let service = site.content_service();

    match parse_category(content_type)? {
        Category::Reports => {
            let Some(report) = service.get_report(id).await? else {
                println!("Report {} not found", id);
                return Ok(false);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.meta.title);
                println!(
                    "{} | {} | {}",
                    display_date(report.meta.publish_date(), &report.meta.publish_date),
                    report.meta.author,
                    report.meta.research_type
                );
                if !report.slides.is_empty() {
                    println!("Presentation: {} slides", report.slides.len());
                }
                println!();
                print!("{}", report.content);
            }
        }
        Category::Models => {
            let Some(model) = service.get_model(id).await? else {
                println!("Model {} not found", id);
                return Ok(false);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&model)?);
            } else {
                println!("{}", model.meta.title);
                println!(
                    "{} | {} | {}",
                    display_date(model.meta.publish_date(), &model.meta.publish_date),
                    model.meta.author,
                    model.meta.model_type
                );
                for screenshot in model.meta.screenshots.iter().flatten() {
                    println!("Screenshot: {}", screenshot);
                }
                println!();
                print!("{}", model.content);
            }
        }
    }

    Ok(true)
}
