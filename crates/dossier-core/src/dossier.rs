//! The property dossier returned to callers, plus the source bookkeeping that
//! feeds its `raw_sources` field.

use serde::{Deserialize, Serialize};

/// Upper bound on `raw_sources` entries attached to a finished dossier.
pub const MAX_RAW_SOURCES: usize = 5;

/// A collected search result, numbered to match the `[n]` citation markers
/// in the LLM context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// 1-based, unique and increasing across every fanned-out query.
    pub id: usize,
    pub title: String,
    pub url: String,
}

impl SourceEntry {
    /// Drops the citation id for the public `raw_sources` field.
    #[must_use]
    pub fn to_raw(&self) -> RawSource {
        RawSource {
            title: self.title.clone(),
            url: self.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetTier {
    Economy,
    Standard,
    Premium,
    Luxury,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntelCategory {
    Financial,
    Technical,
    Neighborhood,
    Permits,
}

impl IntelCategory {
    pub const ALL: [IntelCategory; 4] = [
        IntelCategory::Financial,
        IntelCategory::Technical,
        IntelCategory::Neighborhood,
        IntelCategory::Permits,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IntelCategory::Financial => "Financial",
            IntelCategory::Technical => "Technical",
            IntelCategory::Neighborhood => "Neighborhood",
            IntelCategory::Permits => "Permits",
        }
    }
}

/// Icon names the front end knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntelIcon {
    DollarSign,
    AlertTriangle,
    MapPin,
    FileCheck,
    Clock,
}

impl IntelIcon {
    pub const ALL: [IntelIcon; 5] = [
        IntelIcon::DollarSign,
        IntelIcon::AlertTriangle,
        IntelIcon::MapPin,
        IntelIcon::FileCheck,
        IntelIcon::Clock,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IntelIcon::DollarSign => "DollarSign",
            IntelIcon::AlertTriangle => "AlertTriangle",
            IntelIcon::MapPin => "MapPin",
            IntelIcon::FileCheck => "FileCheck",
            IntelIcon::Clock => "Clock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub headline: String,
    /// 0 (no concerns) to 100 (walk away).
    pub risk_score: f64,
    pub budget_tier: BudgetTier,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelPoint {
    pub category: IntelCategory,
    pub icon: IntelIcon,
    pub fact: String,
    pub strategy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dossier {
    pub address: String,
    pub summary: Summary,
    pub intel: Vec<IntelPoint>,
    pub talk_track: String,
    #[serde(default)]
    pub raw_sources: Vec<RawSource>,
}

impl Dossier {
    /// Checks the constraints serde cannot express on its own.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when `risk_score` falls outside
    /// `0..=100` or `raw_sources` exceeds [`MAX_RAW_SOURCES`].
    pub fn check_bounds(&self) -> Result<(), String> {
        let score = self.summary.risk_score;
        if !(0.0..=100.0).contains(&score) {
            return Err(format!("risk_score {score} is outside 0..=100"));
        }
        if self.raw_sources.len() > MAX_RAW_SOURCES {
            return Err(format!(
                "raw_sources has {} entries, at most {MAX_RAW_SOURCES} allowed",
                self.raw_sources.len()
            ));
        }
        Ok(())
    }
}
