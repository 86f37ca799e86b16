use super::views::{PeerGroup, PeerItem, PeerReadiness};

const HEATMAP_HIGHLIGHT_THRESHOLD: u8 = 50;

impl PeerGroup {
    /// Readiness of this peer category relative to a firm with `score`.
    pub const fn readiness_for(self, score: u8) -> PeerReadiness {
        match self {
            Self::LargeFirms => {
                if score < 30 {
                    PeerReadiness::High
                } else {
                    PeerReadiness::VeryHigh
                }
            }
            Self::MidTierFirms => {
                if score < 50 {
                    PeerReadiness::Moderate
                } else {
                    PeerReadiness::RequiresStrengthening
                }
            }
            Self::SmallPractices => {
                if score > 60 {
                    PeerReadiness::Low
                } else {
                    PeerReadiness::Moderate
                }
            }
        }
    }
}

/// Always three entries: large, mid-tier, then small practices.
pub fn peer_positioning(score: u8) -> Vec<PeerItem> {
    let highlighted = score > HEATMAP_HIGHLIGHT_THRESHOLD;

    PeerGroup::ordered()
        .into_iter()
        .map(|group| {
            let readiness = group.readiness_for(score);
            PeerItem {
                group,
                name: group.label(),
                readiness,
                readiness_label: readiness.label(),
                highlighted,
            }
        })
        .collect()
}
