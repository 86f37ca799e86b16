use serde::Serialize;

/// Interpretation bracket shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureBand {
    Controlled,
    Moderate,
    High,
}

impl ExposureBand {
    pub const fn from_score(score: u8) -> Self {
        if score >= 70 {
            Self::High
        } else if score >= 40 {
            Self::Moderate
        } else {
            Self::Controlled
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Controlled => "Controlled",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    pub const fn guidance(self) -> &'static str {
        match self {
            Self::High => "High regulatory exposure. Structural intervention urgently required.",
            Self::Moderate => {
                "Moderate exposure. Priority action plan recommended within 90 days."
            }
            Self::Controlled => {
                "Controlled exposure. Maintain monitoring and continuous optimization."
            }
        }
    }
}
