use crate::workflows::assessment::answers::AnswerModel;
use crate::workflows::assessment::domain::{
    ClientMix, DigitalMaturity, GeographicScope, PortalAnswer, Specialization,
};
use crate::workflows::assessment::wizard::{
    ClientMixInput, DigitalMaturityInput, StepInput, WizardSession,
};

pub(super) fn model(
    mix: ClientMix,
    tags: &[&str],
    digital_maturity: DigitalMaturity,
    geographic_scope: GeographicScope,
) -> AnswerModel {
    AnswerModel {
        client_mix: mix,
        specialization: Specialization::from_tags(tags.iter().copied()),
        digital_maturity,
        geographic_scope,
    }
}

/// Domestic firm with every tool in place; only the mix and tags drive the score.
pub(super) fn equipped_domestic(mix: ClientMix, tags: &[&str]) -> AnswerModel {
    model(
        mix,
        tags,
        DigitalMaturity::fully_equipped(),
        GeographicScope::BelgiumOnly,
    )
}

/// 50/30/20 capital gains practice without any tooling, Belgium only.
pub(super) fn unequipped_capital_gains_firm() -> AnswerModel {
    model(
        ClientMix::new(50, 30, 20),
        &["capitalGains"],
        DigitalMaturity::default(),
        GeographicScope::BelgiumOnly,
    )
}

/// Every rule fires at its upper contribution.
pub(super) fn maximum_exposure_firm() -> AnswerModel {
    model(
        ClientMix::new(0, 60, 40),
        &["capitalGains", "exitTax", "digitalInvoicing", "crossBorder"],
        DigitalMaturity {
            portal: PortalAnswer::No,
            e_invoicing: false,
            time_tracking: false,
            automation: false,
        },
        GeographicScope::GlobalScope,
    )
}

pub(super) fn client_mix(sme: &str, corporate: &str, international: &str) -> StepInput {
    StepInput::ClientMix(ClientMixInput::new(sme, corporate, international))
}

pub(super) fn specialization(tags: &[&str]) -> StepInput {
    StepInput::Specialization(tags.iter().map(|tag| tag.to_string()).collect())
}

pub(super) fn digital_maturity(
    portal: Option<&str>,
    e_invoicing: bool,
    time_tracking: bool,
    automation: bool,
) -> StepInput {
    StepInput::DigitalMaturity(DigitalMaturityInput {
        portal: portal.map(str::to_string),
        e_invoicing,
        time_tracking,
        automation,
    })
}

pub(super) fn geographic_scope(selection: Option<&str>) -> StepInput {
    StepInput::GeographicScope(selection.map(str::to_string))
}

/// Session advanced to the digital maturity step (3).
pub(super) fn session_at_digital_maturity() -> WizardSession {
    let mut session = WizardSession::new();
    session
        .attempt_advance(1, client_mix("50", "30", "20"))
        .expect("client mix step accepts input");
    session
        .attempt_advance(2, specialization(&["capitalGains"]))
        .expect("specialization step accepts input");
    assert_eq!(session.current_step(), 3);
    session
}

/// Session that reached the results step with the capital gains firm answers.
pub(super) fn completed_session() -> WizardSession {
    let mut session = session_at_digital_maturity();
    session
        .attempt_advance(3, digital_maturity(None, false, false, false))
        .expect("digital maturity step accepts input");
    session
        .attempt_advance(4, geographic_scope(Some("belgiumOnly")))
        .expect("geographic scope step accepts input");
    session
}
