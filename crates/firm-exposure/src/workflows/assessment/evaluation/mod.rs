mod band;
mod rules;

pub use band::ExposureBand;

use super::answers::AnswerModel;
use serde::Serialize;

/// Upper bound of the disruption score.
pub const MAX_SCORE: u8 = 100;

/// Computes the 0-100 disruption score for a completed answer set.
pub fn compute_score(model: &AnswerModel) -> u8 {
    score_breakdown(model).score
}

/// Scores the answers and keeps every rule that contributed.
pub fn score_breakdown(model: &AnswerModel) -> ScoreBreakdown {
    ScoreBreakdown::from_components(rules::score_components(model))
}

/// Regulatory or operational driver behind a score contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureFactor {
    CapitalGainsReform,
    ExitTax,
    DigitalInvoicing,
    CrossBorderReporting,
    ClientPortal,
    TimeTracking,
    Automation,
    InternationalClients,
    CorporateConcentration,
}

impl ExposureFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CapitalGainsReform => "Capital gains reform",
            Self::ExitTax => "Exit tax",
            Self::DigitalInvoicing => "Digital invoicing gap",
            Self::CrossBorderReporting => "Cross-border reporting",
            Self::ClientPortal => "Client portal",
            Self::TimeTracking => "Time tracking",
            Self::Automation => "Automation",
            Self::InternationalClients => "International clients",
            Self::CorporateConcentration => "Corporate concentration",
        }
    }
}

/// Discrete contribution to the score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub factor: ExposureFactor,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    fn from_components(components: Vec<ScoreComponent>) -> Self {
        let total: u32 = components
            .iter()
            .map(|component| u32::from(component.points))
            .sum();
        let score = total.min(u32::from(MAX_SCORE)) as u8;

        Self { score, components }
    }

    pub fn points_for(&self, factor: ExposureFactor) -> Option<u8> {
        self.components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.points)
    }
}
