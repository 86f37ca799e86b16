use super::answers::AnswerModel;
use super::report::{run_assessment, Assessment};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

/// Questionnaire steps. `Results` is terminal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    ClientMix = 1,
    Specialization = 2,
    DigitalMaturity = 3,
    GeographicScope = 4,
    Results = 5,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ClientMix,
            Self::Specialization,
            Self::DigitalMaturity,
            Self::GeographicScope,
            Self::Results,
        ]
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::ClientMix),
            2 => Some(Self::Specialization),
            3 => Some(Self::DigitalMaturity),
            4 => Some(Self::GeographicScope),
            5 => Some(Self::Results),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ClientMix => "Client Mix",
            Self::Specialization => "Specialization",
            Self::DigitalMaturity => "Digital Maturity",
            Self::GeographicScope => "Geographic Scope",
            Self::Results => "Results",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::ClientMix => Some(Self::Specialization),
            Self::Specialization => Some(Self::DigitalMaturity),
            Self::DigitalMaturity => Some(Self::GeographicScope),
            Self::GeographicScope => Some(Self::Results),
            Self::Results => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::ClientMix => None,
            Self::Specialization => Some(Self::ClientMix),
            Self::DigitalMaturity => Some(Self::Specialization),
            Self::GeographicScope => Some(Self::DigitalMaturity),
            Self::Results => Some(Self::GeographicScope),
        }
    }
}

/// Raw allocation fields as typed into the form. Numbers and strings are both
/// accepted; anything else reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMixInput {
    #[serde(default, deserialize_with = "deserialize_raw_field")]
    pub sme: Option<String>,
    #[serde(default, deserialize_with = "deserialize_raw_field")]
    pub corporate: Option<String>,
    #[serde(default, deserialize_with = "deserialize_raw_field")]
    pub international: Option<String>,
}

impl ClientMixInput {
    pub fn new(
        sme: impl Into<String>,
        corporate: impl Into<String>,
        international: impl Into<String>,
    ) -> Self {
        Self {
            sme: Some(sme.into()),
            corporate: Some(corporate.into()),
            international: Some(international.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalMaturityInput {
    /// `None` when no portal radio was chosen.
    #[serde(default)]
    pub portal: Option<String>,
    #[serde(default)]
    pub e_invoicing: bool,
    #[serde(default)]
    pub time_tracking: bool,
    #[serde(default)]
    pub automation: bool,
}

/// Raw input for the step being left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput {
    ClientMix(ClientMixInput),
    Specialization(Vec<String>),
    DigitalMaturity(DigitalMaturityInput),
    GeographicScope(Option<String>),
}

impl StepInput {
    pub const fn step(&self) -> WizardStep {
        match self {
            Self::ClientMix(_) => WizardStep::ClientMix,
            Self::Specialization(_) => WizardStep::Specialization,
            Self::DigitalMaturity(_) => WizardStep::DigitalMaturity,
            Self::GeographicScope(_) => WizardStep::GeographicScope,
        }
    }
}

/// A full set of raw answers, for callers that submit everything at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswers {
    #[serde(default)]
    pub client_mix: ClientMixInput,
    #[serde(default)]
    pub specialization: Vec<String>,
    #[serde(default)]
    pub digital_maturity: DigitalMaturityInput,
    #[serde(default)]
    pub geographic_scope: Option<String>,
}

impl RawAnswers {
    pub fn into_steps(self) -> [StepInput; 4] {
        [
            StepInput::ClientMix(self.client_mix),
            StepInput::Specialization(self.specialization),
            StepInput::DigitalMaturity(self.digital_maturity),
            StepInput::GeographicScope(self.geographic_scope),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    Forward,
    Backward,
}

/// Outcome of a navigation request. `advanced` answers whether a forward
/// request passed its gate; backward moves always report `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub direction: TransitionDirection,
    pub advanced: bool,
    pub new_step: u8,
}

impl Transition {
    pub const fn blocked(step: WizardStep) -> Self {
        Self {
            direction: TransitionDirection::Forward,
            advanced: false,
            new_step: step.number(),
        }
    }

    pub const fn forward(to: WizardStep) -> Self {
        Self {
            direction: TransitionDirection::Forward,
            advanced: true,
            new_step: to.number(),
        }
    }

    pub const fn backward(to: WizardStep) -> Self {
        Self {
            direction: TransitionDirection::Backward,
            advanced: false,
            new_step: to.number(),
        }
    }

    /// True when a forward request was held back by the step's gate.
    pub const fn is_blocked(&self) -> bool {
        matches!(self.direction, TransitionDirection::Forward) && !self.advanced
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepProgressEntry {
    pub step: WizardStep,
    pub number: u8,
    pub label: &'static str,
    pub status: StepStatus,
}

/// Progress indicator state, derived only from the active step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepProgress {
    pub current: u8,
    pub steps: Vec<StepProgressEntry>,
    /// Connectors between steps that are drawn as completed.
    pub completed_lines: usize,
}

impl StepProgress {
    pub fn for_step(current: WizardStep) -> Self {
        let steps = WizardStep::ordered()
            .into_iter()
            .map(|step| {
                let status = if step == current {
                    StepStatus::Active
                } else if step < current {
                    StepStatus::Completed
                } else {
                    StepStatus::Pending
                };
                StepProgressEntry {
                    step,
                    number: step.number(),
                    label: step.label(),
                    status,
                }
            })
            .collect();

        Self {
            current: current.number(),
            steps,
            completed_lines: usize::from(current.number() - 1),
        }
    }
}

/// Misuse of the wizard by its caller. A closed gate is not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("step {0} is outside the questionnaire (1-5)")]
    UnknownStep(u8),
    #[error("wizard is on step {current}, not step {requested}")]
    StaleStep { current: u8, requested: u8 },
    #[error("step {step} cannot collect answers meant for step {input}")]
    InputMismatch { step: u8, input: u8 },
    #[error("step 1 has no previous step")]
    NoPreviousStep,
    #[error("assessment already completed; restart to answer again")]
    AlreadyComplete,
    #[error("client allocation totals {total}%, it must total exactly 100%")]
    ClientMixIncomplete { total: i64 },
}

/// One questionnaire run: active step, collected answers, and the step-1 gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardSession {
    step: WizardStep,
    answers: AnswerModel,
    gate_open: bool,
    assessment: Option<Assessment>,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives a fresh session through all four steps.
    pub fn replay(answers: RawAnswers) -> Result<Assessment, WizardError> {
        let mut session = Self::new();

        for input in answers.into_steps() {
            let from_step = session.current_step();
            let transition = session.attempt_advance(from_step, input)?;
            if !transition.advanced {
                return Err(WizardError::ClientMixIncomplete {
                    total: session.answers.client_mix.total(),
                });
            }
        }

        session.assessment.ok_or(WizardError::AlreadyComplete)
    }

    pub fn current_step(&self) -> u8 {
        self.step.number()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn answers(&self) -> &AnswerModel {
        &self.answers
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    pub fn progress(&self) -> StepProgress {
        StepProgress::for_step(self.step)
    }

    /// Whether the forward control of the active step is enabled.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::ClientMix => self.gate_open,
            WizardStep::Results => false,
            _ => true,
        }
    }

    /// Live update of the allocation fields while step 1 is shown. Returns the
    /// new state of the gate.
    pub fn input_client_mix(&mut self, input: &ClientMixInput) -> Result<bool, WizardError> {
        if self.step != WizardStep::ClientMix {
            return Err(WizardError::InputMismatch {
                step: self.step.number(),
                input: WizardStep::ClientMix.number(),
            });
        }

        self.gate_open = self.answers.set_client_mix(
            input.sme.as_deref(),
            input.corporate.as_deref(),
            input.international.as_deref(),
        );
        debug!(
            total = self.answers.client_mix.total(),
            gate_open = self.gate_open,
            "client mix updated"
        );

        Ok(self.gate_open)
    }

    /// Collects the answers of the step being left, then moves forward if the
    /// step's gate allows it. Leaving step 4 runs the assessment.
    pub fn attempt_advance(
        &mut self,
        from_step: u8,
        input: StepInput,
    ) -> Result<Transition, WizardError> {
        let step = self.expect_step(from_step)?;

        match (step, input) {
            (WizardStep::Results, _) => return Err(WizardError::AlreadyComplete),
            (WizardStep::ClientMix, StepInput::ClientMix(mix)) => {
                if !self.input_client_mix(&mix)? {
                    debug!(
                        total = self.answers.client_mix.total(),
                        "client mix gate closed"
                    );
                    return Ok(Transition::blocked(step));
                }
            }
            (WizardStep::Specialization, StepInput::Specialization(tags)) => {
                self.answers.set_specialization(tags);
            }
            (WizardStep::DigitalMaturity, StepInput::DigitalMaturity(maturity)) => {
                self.answers.set_digital_maturity(
                    maturity.portal.as_deref(),
                    maturity.e_invoicing,
                    maturity.time_tracking,
                    maturity.automation,
                );
            }
            (WizardStep::GeographicScope, StepInput::GeographicScope(selection)) => {
                self.answers.set_geographic_scope(selection.as_deref());
            }
            (step, input) => {
                return Err(WizardError::InputMismatch {
                    step: step.number(),
                    input: input.step().number(),
                })
            }
        }

        let next = step.next().ok_or(WizardError::AlreadyComplete)?;
        self.step = next;
        debug!(from = step.number(), to = next.number(), "wizard advanced");

        if next == WizardStep::Results {
            let assessment = run_assessment(&self.answers);
            info!(
                score = assessment.score,
                band = assessment.band.label(),
                risks = assessment.risks.len(),
                "assessment completed"
            );
            self.assessment = Some(assessment);
        }

        Ok(Transition::forward(next))
    }

    /// Steps back without re-validating or re-collecting anything.
    pub fn go_back(&mut self, from_step: u8) -> Result<Transition, WizardError> {
        let step = self.expect_step(from_step)?;
        if step == WizardStep::Results {
            return Err(WizardError::AlreadyComplete);
        }

        let previous = step.previous().ok_or(WizardError::NoPreviousStep)?;
        self.step = previous;
        debug!(from = step.number(), to = previous.number(), "wizard stepped back");

        Ok(Transition::backward(previous))
    }

    /// Back to step 1 with an empty model and a closed gate.
    pub fn restart(&mut self) -> AnswerModel {
        *self = Self::new();
        debug!("wizard restarted");
        self.answers.clone()
    }

    fn expect_step(&self, from_step: u8) -> Result<WizardStep, WizardError> {
        let requested =
            WizardStep::from_number(from_step).ok_or(WizardError::UnknownStep(from_step))?;
        if requested != self.step {
            return Err(WizardError::StaleStep {
                current: self.step.number(),
                requested: from_step,
            });
        }
        Ok(requested)
    }
}

fn deserialize_raw_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(raw)) => Some(raw),
        Some(other) => Some(other.to_string()),
    })
}
