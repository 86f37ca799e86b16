use chrono::{Duration, Months, NaiveDate};
use serde::Serialize;

/// Time window a blueprint phase has to land in, counted from the start of
/// the compliance programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseHorizon {
    WithinDays(u32),
    WithinMonths(u32),
    Ongoing,
}

impl PhaseHorizon {
    pub(crate) fn resolve(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            PhaseHorizon::WithinDays(days) => {
                start.checked_add_signed(Duration::days(i64::from(*days)))
            }
            PhaseHorizon::WithinMonths(months) => start.checked_add_months(Months::new(*months)),
            PhaseHorizon::Ongoing => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintItem {
    pub phase: &'static str,
    pub action: &'static str,
    pub horizon: PhaseHorizon,
}

impl BlueprintItem {
    pub fn target_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        self.horizon.resolve(start)
    }
}

/// Blueprint item with its deadline resolved against a start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledBlueprintItem {
    pub phase: &'static str,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct ComplianceBlueprint {
    items: Vec<BlueprintItem>,
}

impl ComplianceBlueprint {
    pub fn standard() -> Self {
        Self {
            items: standard_blueprint_items(),
        }
    }

    pub fn items(&self) -> &[BlueprintItem] {
        &self.items
    }

    pub fn schedule(&self, start: NaiveDate) -> Vec<ScheduledBlueprintItem> {
        self.items
            .iter()
            .map(|item| ScheduledBlueprintItem {
                phase: item.phase,
                action: item.action,
                target_date: item.target_date(start),
            })
            .collect()
    }
}

/// The four-phase remediation schedule. It does not depend on any answer.
pub fn compliance_blueprint() -> Vec<BlueprintItem> {
    standard_blueprint_items()
}

fn standard_blueprint_items() -> Vec<BlueprintItem> {
    vec![
        BlueprintItem {
            phase: "Immediate (0-30 days)",
            action: "Compliance audit of time-tracking and e-invoicing software",
            horizon: PhaseHorizon::WithinDays(30),
        },
        BlueprintItem {
            phase: "Short-term (1-3 months)",
            action: "RD 12/05/2023 compliance and Peppol connection if applicable",
            horizon: PhaseHorizon::WithinMonths(3),
        },
        BlueprintItem {
            phase: "Medium-term (3-6 months)",
            action: "Preparation for 2026 capital gains reform and team training",
            horizon: PhaseHorizon::WithinMonths(6),
        },
        BlueprintItem {
            phase: "Ongoing",
            action: "Structured regulatory monitoring and legislative change documentation",
            horizon: PhaseHorizon::Ongoing,
        },
    ]
}
