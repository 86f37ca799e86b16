use super::domain::{
    parse_percent, ClientMix, DigitalMaturity, GeographicScope, PortalAnswer, Specialization,
    SpecializationTag,
};
use serde::{Deserialize, Serialize};

/// Answers gathered by the questionnaire, one field group per step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerModel {
    pub client_mix: ClientMix,
    pub specialization: Specialization,
    pub digital_maturity: DigitalMaturity,
    pub geographic_scope: GeographicScope,
}

impl AnswerModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalises the three allocation fields and stores them unconditionally.
    /// Returns whether the allocation totals exactly 100%.
    pub fn set_client_mix(
        &mut self,
        sme: Option<&str>,
        corporate: Option<&str>,
        international: Option<&str>,
    ) -> bool {
        self.client_mix = ClientMix::new(
            parse_percent(sme),
            parse_percent(corporate),
            parse_percent(international),
        );
        self.client_mix.is_complete()
    }

    pub fn set_specialization<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<SpecializationTag>,
    {
        self.specialization = Specialization::from_tags(tags);
    }

    pub fn set_digital_maturity(
        &mut self,
        portal_selection: Option<&str>,
        e_invoicing: bool,
        time_tracking: bool,
        automation: bool,
    ) {
        self.digital_maturity = DigitalMaturity {
            portal: PortalAnswer::from_selection(portal_selection),
            e_invoicing,
            time_tracking,
            automation,
        };
    }

    pub fn set_geographic_scope(&mut self, selection: Option<&str>) {
        self.geographic_scope = GeographicScope::from_selection(selection);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_specialization(&self, tag: &SpecializationTag) -> bool {
        self.specialization.contains(tag)
    }
}
