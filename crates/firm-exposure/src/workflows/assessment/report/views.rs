use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskItem {
    pub level: RiskLevel,
    pub text: &'static str,
}

/// Automation opportunity. `priority` is a fixed label, not a rank, so a
/// report can skip numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpportunityItem {
    pub priority: u8,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PeerReadiness {
    Low,
    Moderate,
    High,
    VeryHigh,
    RequiresStrengthening,
}

impl PeerReadiness {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::RequiresStrengthening => "Requires Strengthening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerGroup {
    LargeFirms,
    MidTierFirms,
    SmallPractices,
}

impl PeerGroup {
    pub const fn ordered() -> [Self; 3] {
        [Self::LargeFirms, Self::MidTierFirms, Self::SmallPractices]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LargeFirms => "Big 4 and International Networks",
            Self::MidTierFirms => "Mid-Tier Regional Firms (10-50 staff)",
            Self::SmallPractices => "Small Independent Practices",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerItem {
    pub group: PeerGroup,
    pub name: &'static str,
    pub readiness: PeerReadiness,
    pub readiness_label: &'static str,
    /// Heat-map emphasis, set once the firm's own score passes 50.
    pub highlighted: bool,
}
