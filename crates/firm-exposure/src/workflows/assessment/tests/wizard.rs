use super::common::*;
use crate::workflows::assessment::answers::AnswerModel;
use crate::workflows::assessment::domain::{
    ClientMix, GeographicScope, PortalAnswer, SpecializationTag,
};
use crate::workflows::assessment::wizard::{
    ClientMixInput, RawAnswers, StepProgress, StepStatus, Transition, TransitionDirection,
    WizardError, WizardSession, WizardStep,
};

#[test]
fn new_session_starts_on_client_mix_with_gate_closed() {
    let session = WizardSession::new();

    assert_eq!(session.current_step(), 1);
    assert_eq!(session.step(), WizardStep::ClientMix);
    assert!(!session.can_advance());
    assert_eq!(session.answers(), &AnswerModel::new());
    assert!(session.assessment().is_none());
}

#[test]
fn client_mix_gate_blocks_incomplete_allocation() {
    let mut session = WizardSession::new();

    let transition = session
        .attempt_advance(1, client_mix("50", "30", "19"))
        .expect("step 1 accepts client mix");

    assert_eq!(transition, Transition::blocked(WizardStep::ClientMix));
    assert_eq!(transition.direction, TransitionDirection::Forward);
    assert!(transition.is_blocked());
    assert_eq!(session.current_step(), 1);
    assert_eq!(session.answers().client_mix, ClientMix::new(50, 30, 19));
    assert!(!session.can_advance());
}

#[test]
fn client_mix_gate_opens_at_exactly_one_hundred() {
    let mut session = WizardSession::new();

    let transition = session
        .attempt_advance(1, client_mix("50", "30", "20"))
        .expect("step 1 accepts client mix");

    assert!(transition.advanced);
    assert_eq!(transition.new_step, 2);
    assert_eq!(session.step(), WizardStep::Specialization);
}

#[test]
fn client_mix_gate_uses_the_typed_values() {
    let mut session = WizardSession::new();

    let oversized = session
        .attempt_advance(1, client_mix("200", "0", "0"))
        .expect("step 1 accepts client mix");
    assert!(!oversized.advanced);
    assert_eq!(session.answers().client_mix, ClientMix::new(200, 0, 0));

    let overshoot = session
        .attempt_advance(1, client_mix("150", "0", "0"))
        .expect("step 1 accepts client mix");
    assert!(!overshoot.advanced);

    let with_negative = session
        .attempt_advance(1, client_mix("-20", "60", "60"))
        .expect("step 1 accepts client mix");
    assert!(with_negative.advanced, "-20 + 60 + 60 totals 100");
    assert_eq!(session.answers().client_mix, ClientMix::new(-20, 60, 60));
}

#[test]
fn live_client_mix_updates_toggle_the_gate() {
    let mut session = WizardSession::new();

    assert!(session
        .input_client_mix(&ClientMixInput::new("60", "", "40x"))
        .expect("live update on step 1"));
    assert_eq!(session.answers().client_mix, ClientMix::new(60, 0, 40));
    assert!(session.can_advance());

    assert!(!session
        .input_client_mix(&ClientMixInput::new("60", "10", "40"))
        .expect("live update on step 1"));
    assert!(!session.can_advance());

    session
        .attempt_advance(1, client_mix("60", "0", "40"))
        .expect("advance");
    assert_eq!(
        session.input_client_mix(&ClientMixInput::default()),
        Err(WizardError::InputMismatch { step: 2, input: 1 })
    );
}

#[test]
fn leaving_each_step_collects_its_answers() {
    let mut session = session_at_digital_maturity();
    assert!(session
        .answers()
        .has_specialization(&SpecializationTag::CapitalGains));

    session
        .attempt_advance(3, digital_maturity(Some("false"), true, false, true))
        .expect("step 3 accepts maturity");
    assert_eq!(session.answers().digital_maturity.portal, PortalAnswer::No);
    assert!(session.answers().digital_maturity.e_invoicing);
    assert_eq!(session.answers().geographic_scope, GeographicScope::Unknown);
    assert!(session.assessment().is_none());

    session
        .attempt_advance(4, geographic_scope(Some("europeScope")))
        .expect("step 4 accepts scope");
    assert_eq!(session.current_step(), 5);
    assert_eq!(
        session.answers().geographic_scope,
        GeographicScope::EuropeScope
    );
    assert!(session.assessment().is_some());
}

#[test]
fn completing_step_four_runs_the_assessment() {
    let session = completed_session();

    let assessment = session.assessment().expect("assessment available");
    assert_eq!(assessment.score, 53);
    assert_eq!(session.progress().current, 5);
    assert!(!session.can_advance());
}

#[test]
fn going_back_keeps_previous_answers() {
    let mut session = session_at_digital_maturity();

    let transition = session.go_back(3).expect("3 -> 2 allowed");
    assert_eq!(transition, Transition::backward(WizardStep::Specialization));
    assert_eq!(transition.direction, TransitionDirection::Backward);
    assert!(!transition.is_blocked(), "stepping back is not a closed gate");
    assert!(session
        .answers()
        .has_specialization(&SpecializationTag::CapitalGains));

    session.go_back(2).expect("2 -> 1 allowed");
    assert_eq!(session.current_step(), 1);
    assert!(session.can_advance(), "gate keeps its last evaluation");
    assert_eq!(session.answers().client_mix, ClientMix::new(50, 30, 20));

    session
        .attempt_advance(1, client_mix("50", "30", "20"))
        .expect("forward again");
    session
        .attempt_advance(2, specialization(&["exitTax"]))
        .expect("re-collect specialization");
    assert!(session
        .answers()
        .has_specialization(&SpecializationTag::ExitTax));
    assert!(!session
        .answers()
        .has_specialization(&SpecializationTag::CapitalGains));
}

#[test]
fn navigation_misuse_is_reported() {
    let mut session = WizardSession::new();

    assert_eq!(session.go_back(1), Err(WizardError::NoPreviousStep));
    assert_eq!(
        session.attempt_advance(3, digital_maturity(None, false, false, false)),
        Err(WizardError::StaleStep {
            current: 1,
            requested: 3
        })
    );
    assert_eq!(session.go_back(0), Err(WizardError::UnknownStep(0)));
    assert_eq!(
        session.attempt_advance(1, specialization(&["exitTax"])),
        Err(WizardError::InputMismatch { step: 1, input: 2 })
    );
    assert_eq!(session.current_step(), 1);
}

#[test]
fn results_step_is_terminal() {
    let mut session = completed_session();
    let answers = session.answers().clone();

    assert_eq!(session.go_back(5), Err(WizardError::AlreadyComplete));
    assert_eq!(
        session.attempt_advance(5, geographic_scope(Some("globalScope"))),
        Err(WizardError::AlreadyComplete)
    );
    assert_eq!(session.answers(), &answers);
}

#[test]
fn restart_resets_everything_and_is_idempotent() {
    let mut session = completed_session();

    let first = session.restart();
    assert_eq!(first, AnswerModel::new());
    assert_eq!(session, WizardSession::new());
    assert!(!session.can_advance());
    assert!(session.assessment().is_none());

    let second = session.restart();
    assert_eq!(first, second);
    assert_eq!(session, WizardSession::new());
}

#[test]
fn progress_marks_completed_and_active_steps() {
    let progress = StepProgress::for_step(WizardStep::DigitalMaturity);

    let statuses: Vec<StepStatus> = progress.steps.iter().map(|entry| entry.status).collect();
    assert_eq!(
        statuses,
        vec![
            StepStatus::Completed,
            StepStatus::Completed,
            StepStatus::Active,
            StepStatus::Pending,
            StepStatus::Pending,
        ]
    );
    assert_eq!(progress.completed_lines, 2);
    assert_eq!(progress.steps[2].label, "Digital Maturity");

    let first = StepProgress::for_step(WizardStep::ClientMix);
    assert_eq!(first.completed_lines, 0);
    let last = StepProgress::for_step(WizardStep::Results);
    assert_eq!(last.completed_lines, 4);
    assert_eq!(last.steps[4].status, StepStatus::Active);
}

#[test]
fn replay_accepts_numbers_and_strings() {
    let answers: RawAnswers = serde_json::from_value(serde_json::json!({
        "clientMix": { "sme": 50, "corporate": "30", "international": 20 },
        "specialization": ["capitalGains"],
        "digitalMaturity": { "portal": null, "eInvoicing": false },
        "geographicScope": "belgiumOnly"
    }))
    .expect("raw answers deserialize");

    let assessment = WizardSession::replay(answers).expect("replay completes");

    assert_eq!(assessment.score, 53);
}

#[test]
fn replay_rejects_an_oversized_allocation() {
    let answers = RawAnswers {
        client_mix: ClientMixInput::new("200", "0", "0"),
        ..RawAnswers::default()
    };

    assert_eq!(
        WizardSession::replay(answers),
        Err(WizardError::ClientMixIncomplete { total: 200 })
    );
}

#[test]
fn replay_rejects_an_incomplete_allocation() {
    let answers = RawAnswers {
        client_mix: ClientMixInput::new("50", "20", "20"),
        ..RawAnswers::default()
    };

    assert_eq!(
        WizardSession::replay(answers),
        Err(WizardError::ClientMixIncomplete { total: 90 })
    );
}
