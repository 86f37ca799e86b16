//! Firm exposure questionnaire: answer collection, the step wizard, and the
//! scoring and reporting engine that runs once the last step is left.

pub mod answers;
mod blueprint;
pub mod domain;
pub mod evaluation;
pub mod report;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use answers::AnswerModel;
pub use blueprint::{
    compliance_blueprint, BlueprintItem, ComplianceBlueprint, PhaseHorizon,
    ScheduledBlueprintItem,
};
pub use domain::{
    ClientMix, DigitalMaturity, GeographicScope, PortalAnswer, Specialization, SpecializationTag,
};
pub use evaluation::{
    compute_score, score_breakdown, ExposureBand, ExposureFactor, ScoreBreakdown, ScoreComponent,
};
pub use report::views::{
    OpportunityItem, PeerGroup, PeerItem, PeerReadiness, RiskItem, RiskLevel,
};
pub use report::{
    automation_opportunities, peer_positioning, risk_breakdown, run_assessment, Assessment,
};
pub use wizard::{
    ClientMixInput, DigitalMaturityInput, RawAnswers, StepInput, StepProgress, StepProgressEntry,
    StepStatus, Transition, TransitionDirection, WizardError, WizardSession, WizardStep,
};
