use super::super::answers::AnswerModel;
use super::super::domain::SpecializationTag;
use super::views::{OpportunityItem, RiskItem, RiskLevel};

const INTERNATIONAL_COMPLEXITY_THRESHOLD: i32 = 30;

/// Regulatory risks triggered by the answers, in fixed reporting order.
pub fn risk_breakdown(model: &AnswerModel) -> Vec<RiskItem> {
    let maturity = model.digital_maturity;
    let mut risks = Vec::new();

    if model.has_specialization(&SpecializationTag::CapitalGains) {
        risks.push(RiskItem {
            level: RiskLevel::High,
            text: "Capital Gains Reform (01/01/2026): New corporate capital gains taxation rules",
        });
    }

    if model.has_specialization(&SpecializationTag::ExitTax) {
        risks.push(RiskItem {
            level: RiskLevel::High,
            text: "Exit Tax (07/2025): New declaration and payment obligations on registered office transfers",
        });
    }

    if !maturity.e_invoicing {
        risks.push(RiskItem {
            level: RiskLevel::High,
            text: "B2B E-Invoicing Mandate: Non-compliance with Law of 15 January 2018 implementation orders",
        });
    }

    if !maturity.time_tracking {
        risks.push(RiskItem {
            level: RiskLevel::High,
            text: "Time-Tracking Software (RD 12/05/2023): Legal obligation unfulfilled for VAT-registered businesses",
        });
    }

    if !model.geographic_scope.is_domestic() {
        risks.push(RiskItem {
            level: RiskLevel::Medium,
            text: "DAC7: New reporting obligations for digital platforms and operators",
        });
    }

    if model.client_mix.international > INTERNATIONAL_COMPLEXITY_THRESHOLD {
        risks.push(RiskItem {
            level: RiskLevel::Medium,
            text: "Cross-Border Complexity: Increased automatic exchange of tax information",
        });
    }

    risks
}

/// Tooling recommendations. The reform notification item is always present.
pub fn automation_opportunities(model: &AnswerModel) -> Vec<OpportunityItem> {
    let maturity = model.digital_maturity;
    let mut opportunities = Vec::new();

    if !maturity.e_invoicing {
        opportunities.push(OpportunityItem {
            priority: 1,
            text: "Peppol Integration: Mandatory connection to federal electronic invoicing platform",
        });
    }

    if !maturity.time_tracking {
        opportunities.push(OpportunityItem {
            priority: 2,
            text: "Time-Tracking Software Deployment: Immediate compliance required (criminal sanctions upon audit)",
        });
    }

    if !maturity.portal.is_present() {
        opportunities.push(OpportunityItem {
            priority: 3,
            text: "Secure Client Portal: GDPR risk reduction and client relationship optimization",
        });
    }

    opportunities.push(OpportunityItem {
        priority: 4,
        text: "Reform Notification Automation: Client alert system for regulatory developments",
    });

    if model.has_specialization(&SpecializationTag::CrossBorder)
        || !model.geographic_scope.is_domestic()
    {
        opportunities.push(OpportunityItem {
            priority: 5,
            text: "DAC7 Compliance Workflows: Automation of reporting and consistency checks",
        });
    }

    opportunities
}
