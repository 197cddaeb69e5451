//! Print a report's slide deck

use anyhow::Result;

use crate::content::{Slide, SlideCursor};
use crate::Site;

fn print_slide(cursor: &SlideCursor<'_>, slide: &Slide) {
    println!(
        "── {} ({}% complete) ──",
        cursor.position(),
        cursor.progress()
    );
    println!("{}", slide.title);
    for bullet in slide.bullets() {
        println!("  • {}", bullet);
    }
    if let Some(chart) = &slide.chart_data {
        for (label, value) in chart.points() {
            println!("  {}: {}%", label, value);
        }
    }
    if let Some(image) = &slide.image_url {
        println!("  [image: {}]", image);
    }
    println!();
}

/// Walk a report's deck from first to last slide.
///
/// Returns false when the report does not exist.
pub async fn run(site: &Site, id: &str) -> Result<bool> {
    let Some(report) = site.content_service().get_report(id).await? else {
        println!("Report {} not found", id);
        return Ok(false);
    };

    println!("{} - Presentation", report.meta.title);
    let mut cursor = SlideCursor::new(&report.slides);
    if cursor.is_empty() {
        println!("No slides for this report.");
        return Ok(true);
    }

    loop {
        if let Some(slide) = cursor.current() {
            print_slide(&cursor, slide);
        }
        if !cursor.next() {
            break;
        }
    }

    Ok(true)
}
