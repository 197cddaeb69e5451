//! Initialize a new research site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Research site configuration

# Site
title: Research Desk
description: ''

# Directory
content_dir: content
slides_dir: assets/reports
public_dir: public

# Code highlighting in document bodies
highlight:
  theme: base16-ocean.dark
  line_number: true

# Set escape_html to true if documents may come from untrusted authors
markdown:
  escape_html: false

# Slides: external_only (decks from slides_dir, when slidesSource is set)
# or prefer_inline (slides written in the front-matter win)
slides:
  sourcing: external_only
"#;

const SAMPLE_REPORT: &str = r#"---
layout: report
id: "1"
title: "Apple Inc. (AAPL) Valuation Analysis"
publishDate: "2023-06-15"
author: "John Smith"
researchType: "Equity Research"
summary: "A comprehensive valuation analysis of Apple Inc., examining growth drivers, risks, and fair value estimation."
slidesSource: "assets/reports/1/slides.json"
---

## Executive Summary

Apple Inc. continues to demonstrate strong financial performance driven by its ecosystem of products and services. Our analysis suggests the company is well-positioned for continued growth in the medium term.

### Key Investment Points

- iPhone remains the core revenue driver with strong upgrade cycles
- Services segment growing at double-digit rates, improving margin profile
- Strong balance sheet with significant cash reserves
- Consistent shareholder returns through dividends and share repurchases

## Financial Analysis

Apple reported $394.3 billion in revenue for FY2022, representing a 7.8% year-over-year increase. The company's gross margin expanded to 43.3%, driven by a more favorable product mix and growing high-margin services business.

### Revenue Breakdown by Segment

- iPhone: $205.5 billion (52.1% of total)
- Services: $78.1 billion (19.8% of total)
- Mac: $40.2 billion (10.2% of total)
- Wearables, Home & Accessories: $41.2 billion (10.4% of total)
- iPad: $29.3 billion (7.4% of total)

## Valuation

Based on our DCF analysis and comparative valuation metrics, we establish a fair value estimate of $190 per share. This represents a potential upside of approximately 12% from current levels.
"#;

const SAMPLE_SLIDES: &str = r#"[
  {
    "title": "Apple Inc. (AAPL) Valuation Analysis",
    "content": "Comprehensive equity research and valuation report",
    "type": "title",
    "imageUrl": "/placeholder.svg"
  },
  {
    "title": "Executive Summary",
    "content": "• Market leader in premium smartphones, wearables, and tablets\n• Expanding services ecosystem with high margins\n• Strong cash flow generation and shareholder returns\n• Initiating coverage with BUY rating and $190 price target",
    "type": "content",
    "imageUrl": "/placeholder.svg"
  },
  {
    "title": "Financial Highlights",
    "content": "• FY2022 Revenue: $394.3 billion (+7.8% YoY)\n• Gross Margin: 43.3% (+160 bps YoY)\n• Services Revenue: $78.1 billion (+19% YoY)\n• Cash & Equivalents: $48.3 billion\n• TTM Free Cash Flow: $111.4 billion",
    "type": "content",
    "imageUrl": "/placeholder.svg"
  },
  {
    "title": "Revenue Breakdown",
    "type": "chart",
    "chartData": {
      "labels": ["iPhone", "Services", "Mac", "Wearables & Home", "iPad"],
      "values": [52.1, 19.8, 10.2, 10.4, 7.4]
    },
    "imageUrl": "/placeholder.svg"
  }
]
"#;

const SAMPLE_MODEL: &str = r#"---
layout: model
id: "1"
title: "Discounted Cash Flow (DCF) Model - Tech Companies"
publishDate: "2023-07-10"
author: "Michael Johnson"
modelType: "Valuation Model"
summary: "A comprehensive DCF model template for technology companies with built-in sensitivity analysis."
screenshots:
  - "/placeholder.svg"
  - "/placeholder.svg"
  - "/placeholder.svg"
---

## Model Overview

This DCF valuation model is specifically designed for technology companies with high growth rates, R&D investments, and potentially irregular cash flow patterns.

### Key Features

- Detailed revenue buildup by product/service category
- R&D capitalization adjustment options
- Stock-based compensation handling
- Terminal value calculation with multiple methodologies
- Comprehensive sensitivity analysis

## Model Structure

1. **Instructions** - Detailed guide on how to use the model
2. **Input Sheet** - Central location for all key assumptions
3. **Historical Financials** - Historical data entry and analysis
4. **Projections** - Detailed 5-year financial projections
5. **DCF Valuation** - Core DCF calculations and sensitivity tables
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("content/reports"))?;
    fs::create_dir_all(target_dir.join("content/models"))?;
    fs::create_dir_all(target_dir.join("assets/reports/1"))?;

    fs::write(target_dir.join("_config.yml"), CONFIG)?;
    fs::write(
        target_dir.join("content/reports/apple-valuation.md"),
        SAMPLE_REPORT,
    )?;
    fs::write(target_dir.join("assets/reports/1/slides.json"), SAMPLE_SLIDES)?;
    fs::write(target_dir.join("content/models/dcf-model.md"), SAMPLE_MODEL)?;

    tracing::debug!("Wrote sample report, model and slide deck");
    Ok(())
}
