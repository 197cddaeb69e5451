//! Badge styles for research types and model difficulty

use std::fmt;

/// Badge variant for a report's research type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
}

impl BadgeVariant {
    /// Unrecognized research types get the default badge
    pub fn for_research_type(research_type: &str) -> Self {
        match research_type {
            "Equity Research" => BadgeVariant::Default,
            "Sector Analysis" => BadgeVariant::Secondary,
            "Valuation Report" => BadgeVariant::Outline,
            _ => BadgeVariant::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeVariant::Default => "default",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Outline => "outline",
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty level shown on model cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Unknown,
}

impl Difficulty {
    pub fn parse(label: &str) -> Self {
        match label {
            "Beginner" => Difficulty::Beginner,
            "Intermediate" => Difficulty::Intermediate,
            "Advanced" => Difficulty::Advanced,
            _ => Difficulty::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Unknown => "Unknown",
        }
    }
}
