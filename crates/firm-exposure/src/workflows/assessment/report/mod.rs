mod findings;
mod peers;
pub mod views;

pub use findings::{automation_opportunities, risk_breakdown};
pub use peers::peer_positioning;

use super::answers::AnswerModel;
use super::blueprint::{compliance_blueprint, BlueprintItem};
use super::evaluation::{score_breakdown, ExposureBand, ScoreComponent};
use serde::Serialize;
use views::{OpportunityItem, PeerItem, RiskItem};

/// Everything the results step renders, produced fresh from one answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub score: u8,
    pub band: ExposureBand,
    pub band_label: &'static str,
    pub interpretation: &'static str,
    pub components: Vec<ScoreComponent>,
    pub risks: Vec<RiskItem>,
    pub opportunities: Vec<OpportunityItem>,
    pub peers: Vec<PeerItem>,
    pub blueprint: Vec<BlueprintItem>,
}

pub fn run_assessment(model: &AnswerModel) -> Assessment {
    let breakdown = score_breakdown(model);
    let band = ExposureBand::from_score(breakdown.score);

    Assessment {
        score: breakdown.score,
        band,
        band_label: band.label(),
        interpretation: band.guidance(),
        risks: risk_breakdown(model),
        opportunities: automation_opportunities(model),
        peers: peer_positioning(breakdown.score),
        blueprint: compliance_blueprint(),
        components: breakdown.components,
    }
}
