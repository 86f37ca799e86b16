use super::super::answers::AnswerModel;
use super::super::domain::{GeographicScope, SpecializationTag};
use super::{ExposureFactor, ScoreComponent};

const CAPITAL_GAINS_CORPORATE_THRESHOLD: i32 = 30;
const EXIT_TAX_INTERNATIONAL_THRESHOLD: i32 = 20;
const DIGITAL_INVOICING_SME_THRESHOLD: i32 = 40;
const INTERNATIONAL_EXPOSURE_THRESHOLD: i32 = 30;
const CORPORATE_CONCENTRATION_THRESHOLD: i32 = 50;

pub(crate) fn score_components(model: &AnswerModel) -> Vec<ScoreComponent> {
    let mix = model.client_mix;
    let maturity = model.digital_maturity;
    let scope = model.geographic_scope;
    let mut components = Vec::new();

    if model.has_specialization(&SpecializationTag::CapitalGains) {
        let component = if mix.corporate > CAPITAL_GAINS_CORPORATE_THRESHOLD {
            ScoreComponent {
                factor: ExposureFactor::CapitalGainsReform,
                points: 20,
                notes: format!(
                    "capital gains practice with {}% corporate clients",
                    mix.corporate
                ),
            }
        } else {
            ScoreComponent {
                factor: ExposureFactor::CapitalGainsReform,
                points: 15,
                notes: "capital gains practice with a limited corporate base".to_string(),
            }
        };
        components.push(component);
    }

    if model.has_specialization(&SpecializationTag::ExitTax) {
        let component = if mix.international > EXIT_TAX_INTERNATIONAL_THRESHOLD {
            ScoreComponent {
                factor: ExposureFactor::ExitTax,
                points: 18,
                notes: format!(
                    "exit tax practice with {}% international clients",
                    mix.international
                ),
            }
        } else {
            ScoreComponent {
                factor: ExposureFactor::ExitTax,
                points: 12,
                notes: "exit tax practice with a mostly domestic base".to_string(),
            }
        };
        components.push(component);
    }

    if model.has_specialization(&SpecializationTag::DigitalInvoicing)
        || mix.sme > DIGITAL_INVOICING_SME_THRESHOLD
    {
        let component = if maturity.e_invoicing {
            ScoreComponent {
                factor: ExposureFactor::DigitalInvoicing,
                points: 5,
                notes: "e-invoicing in place, residual mandate exposure".to_string(),
            }
        } else {
            ScoreComponent {
                factor: ExposureFactor::DigitalInvoicing,
                points: 15,
                notes: "no e-invoicing capability for an invoicing-heavy client base"
                    .to_string(),
            }
        };
        components.push(component);
    }

    if model.has_specialization(&SpecializationTag::CrossBorder) || !scope.is_domestic() {
        let component = if scope == GeographicScope::GlobalScope {
            ScoreComponent {
                factor: ExposureFactor::CrossBorderReporting,
                points: 12,
                notes: "global client base under cross-border reporting".to_string(),
            }
        } else {
            ScoreComponent {
                factor: ExposureFactor::CrossBorderReporting,
                points: 8,
                notes: format!("cross-border reporting ({})", scope.label()),
            }
        };
        components.push(component);
    }

    if !maturity.portal.is_present() {
        components.push(ScoreComponent {
            factor: ExposureFactor::ClientPortal,
            points: 8,
            notes: format!("no secure client portal ({})", maturity.portal.label()),
        });
    }

    if !maturity.time_tracking {
        components.push(ScoreComponent {
            factor: ExposureFactor::TimeTracking,
            points: 10,
            notes: "no registered time-tracking software".to_string(),
        });
    }

    if !maturity.automation {
        components.push(ScoreComponent {
            factor: ExposureFactor::Automation,
            points: 5,
            notes: "no workflow automation tooling".to_string(),
        });
    }

    if mix.international > INTERNATIONAL_EXPOSURE_THRESHOLD {
        components.push(ScoreComponent {
            factor: ExposureFactor::InternationalClients,
            points: 7,
            notes: format!("{}% international clients", mix.international),
        });
    }

    if mix.corporate > CORPORATE_CONCENTRATION_THRESHOLD {
        components.push(ScoreComponent {
            factor: ExposureFactor::CorporateConcentration,
            points: 5,
            notes: format!("{}% corporate clients", mix.corporate),
        });
    }

    components
}
