use crate::infra::parse_yes_no;
use chrono::{Local, NaiveDate};
use clap::Args;
use firm_exposure::config::{AppConfig, ConsoleConfig};
use firm_exposure::error::AppError;
use firm_exposure::workflows::assessment::{
    Assessment, ClientMixInput, ComplianceBlueprint, DigitalMaturityInput, GeographicScope,
    RawAnswers, ScheduledBlueprintItem, SpecializationTag, StepInput, StepProgress, StepStatus,
    WizardSession, WizardStep,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct WizardArgs {
    /// Print the final score at once instead of counting up to it.
    #[arg(long)]
    pub(crate) no_animation: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// JSON file with the full answer set; overrides the individual flags.
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Share of SME clients (%)
    #[arg(long)]
    pub(crate) sme: Option<String>,
    /// Share of corporate clients (%)
    #[arg(long)]
    pub(crate) corporate: Option<String>,
    /// Share of international clients (%)
    #[arg(long)]
    pub(crate) international: Option<String>,
    /// Specialization tags, comma separated (capitalGains, exitTax, ...)
    #[arg(long, value_delimiter = ',')]
    pub(crate) specialization: Vec<String>,
    /// Whether a client portal is in place; omit when unknown.
    #[arg(long)]
    pub(crate) portal: Option<bool>,
    #[arg(long)]
    pub(crate) e_invoicing: bool,
    #[arg(long)]
    pub(crate) time_tracking: bool,
    #[arg(long)]
    pub(crate) automation: bool,
    /// belgiumOnly, europeScope or globalScope
    #[arg(long)]
    pub(crate) scope: Option<String>,
    /// Emit the assessment as JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct BlueprintArgs {
    /// Programme start date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
}

pub(crate) fn run_wizard(args: WizardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();

    let mut console = ConsoleWizard::new(&config.console, !args.no_animation);
    console.drive(&mut input, &mut out)?;
    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let json = args.json;
    let answers = match args.answers.clone() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<RawAnswers>(&raw)?
        }
        None => answers_from_flags(args),
    };

    let assessment = WizardSession::replay(answers)?;
    let mut out = std::io::stdout().lock();
    if json {
        let payload = serde_json::to_string_pretty(&assessment)?;
        writeln!(out, "{payload}")?;
    } else {
        writeln!(out, "Exposure score: {}/100", assessment.score)?;
        render_assessment(&mut out, &assessment)?;
    }
    Ok(())
}

pub(crate) fn run_blueprint(args: BlueprintArgs) -> Result<(), AppError> {
    let start = args.start.unwrap_or_else(|| Local::now().date_naive());
    let schedule = ComplianceBlueprint::standard().schedule(start);

    let mut out = std::io::stdout().lock();
    writeln!(out, "Compliance blueprint starting {start}")?;
    render_schedule(&mut out, &schedule)?;
    Ok(())
}

fn answers_from_flags(args: AssessArgs) -> RawAnswers {
    RawAnswers {
        client_mix: ClientMixInput {
            sme: args.sme,
            corporate: args.corporate,
            international: args.international,
        },
        specialization: args.specialization,
        digital_maturity: DigitalMaturityInput {
            portal: args.portal.map(|present| present.to_string()),
            e_invoicing: args.e_invoicing,
            time_tracking: args.time_tracking,
            automation: args.automation,
        },
        geographic_scope: args.scope,
    }
}

/// What the user typed at a prompt.
enum Flow<T> {
    Answer(T),
    Back,
    Restart,
    Quit,
}

/// Terminal rendition of the questionnaire, one session at a time.
pub(crate) struct ConsoleWizard {
    session: WizardSession,
    reveal_steps: u8,
    reveal_tick: std::time::Duration,
    animate: bool,
}

impl ConsoleWizard {
    pub(crate) fn new(config: &ConsoleConfig, animate: bool) -> Self {
        Self {
            session: WizardSession::new(),
            reveal_steps: config.reveal_steps,
            reveal_tick: config.reveal_tick(),
            animate,
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Runs until the user quits or input ends. Returns the last assessment
    /// shown, if any.
    pub(crate) fn drive<R, W>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<Assessment>, AppError>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(
            out,
            "Type :back to return to the previous step, :restart to start over, :quit to leave."
        )?;

        loop {
            render_progress(out, &self.session.progress())?;

            let flow = match self.session.step() {
                WizardStep::ClientMix => prompt_client_mix(input, out)?,
                WizardStep::Specialization => prompt_specialization(input, out)?,
                WizardStep::DigitalMaturity => prompt_digital_maturity(input, out)?,
                WizardStep::GeographicScope => prompt_geographic_scope(input, out)?,
                WizardStep::Results => {
                    match self.show_results(input, out)? {
                        Flow::Restart => {
                            self.session.restart();
                            writeln!(out, "Starting a new assessment.")?;
                            continue;
                        }
                        _ => return Ok(self.session.assessment().cloned()),
                    }
                }
            };

            match flow {
                Flow::Answer(step_input) => {
                    let from_step = self.session.step();
                    let transition = self
                        .session
                        .attempt_advance(from_step.number(), step_input)?;
                    if from_step == WizardStep::ClientMix {
                        let total = self.session.answers().client_mix.total();
                        if transition.is_blocked() {
                            writeln!(
                                out,
                                "Client allocation must total 100% (currently {total}%)."
                            )?;
                        } else {
                            writeln!(out, "Total: {total}%")?;
                        }
                    }
                }
                Flow::Back => {
                    if let Err(err) = self.session.go_back(self.session.current_step()) {
                        writeln!(out, "{err}")?;
                    }
                }
                Flow::Restart => {
                    self.session.restart();
                    writeln!(out, "Starting a new assessment.")?;
                }
                Flow::Quit => return Ok(self.session.assessment().cloned()),
            }
        }
    }

    fn show_results<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow<()>, AppError> {
        if let Some(assessment) = self.session.assessment() {
            self.reveal_score(out, assessment.score)?;
            render_assessment(out, assessment)?;
        }

        loop {
            match prompt(input, out, "Press enter to finish or :restart for a new assessment")? {
                Flow::Back => writeln!(
                    out,
                    "The assessment is complete; use :restart to answer again."
                )?,
                Flow::Answer(_) | Flow::Quit => return Ok(Flow::Quit),
                Flow::Restart => return Ok(Flow::Restart),
            }
        }
    }

    fn reveal_score<W: Write>(&self, out: &mut W, score: u8) -> Result<(), AppError> {
        if !self.animate {
            writeln!(out, "Exposure score: {score}/100")?;
            return Ok(());
        }

        for value in reveal_frames(score, self.reveal_steps) {
            write!(out, "\rExposure score: {value}/100")?;
            out.flush()?;
            std::thread::sleep(self.reveal_tick);
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Counter values shown while the score counts up: `ceil(score / steps)` per
/// tick, never past the score.
pub(crate) fn reveal_frames(score: u8, steps: u8) -> Vec<u8> {
    if score == 0 {
        return vec![0];
    }

    let increment = score.div_ceil(steps.max(1));
    let mut frames = Vec::new();
    let mut current = 0u8;
    while current < score {
        current = current.saturating_add(increment).min(score);
        frames.push(current);
    }
    frames
}

fn prompt_client_mix<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Flow<StepInput>, AppError> {
    let mut fields = Vec::with_capacity(3);
    for label in [
        "SME clients (%)",
        "Corporate clients (%)",
        "International clients (%)",
    ] {
        match prompt(input, out, label)? {
            Flow::Answer(value) => fields.push(value),
            Flow::Back => return Ok(Flow::Back),
            Flow::Restart => return Ok(Flow::Restart),
            Flow::Quit => return Ok(Flow::Quit),
        }
    }

    let mut fields = fields.into_iter();
    Ok(Flow::Answer(StepInput::ClientMix(ClientMixInput {
        sme: fields.next(),
        corporate: fields.next(),
        international: fields.next(),
    })))
}

fn prompt_specialization<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Flow<StepInput>, AppError> {
    let vocabulary = SpecializationTag::vocabulary();
    for (index, tag) in vocabulary.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, tag.label())?;
    }

    let answer = match prompt(input, out, "Specializations (numbers, comma separated)")? {
        Flow::Answer(answer) => answer,
        Flow::Back => return Ok(Flow::Back),
        Flow::Restart => return Ok(Flow::Restart),
        Flow::Quit => return Ok(Flow::Quit),
    };

    let tags = answer
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| vocabulary.get(index))
                .map(|tag| tag.as_str().to_string())
                .unwrap_or_else(|| token.to_string())
        })
        .collect();

    Ok(Flow::Answer(StepInput::Specialization(tags)))
}

fn prompt_digital_maturity<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Flow<StepInput>, AppError> {
    let mut answers = Vec::with_capacity(4);
    for label in [
        "Client portal in place? (y/n, blank to skip)",
        "E-invoicing in place? (y/n)",
        "Time tracking in place? (y/n)",
        "Workflow automation in place? (y/n)",
    ] {
        match prompt(input, out, label)? {
            Flow::Answer(value) => answers.push(parse_yes_no(&value)),
            Flow::Back => return Ok(Flow::Back),
            Flow::Restart => return Ok(Flow::Restart),
            Flow::Quit => return Ok(Flow::Quit),
        }
    }

    let flag = |index: usize| answers.get(index).copied().flatten().unwrap_or(false);
    let maturity = DigitalMaturityInput {
        portal: answers
            .first()
            .copied()
            .flatten()
            .map(|present| present.to_string()),
        e_invoicing: flag(1),
        time_tracking: flag(2),
        automation: flag(3),
    };

    Ok(Flow::Answer(StepInput::DigitalMaturity(maturity)))
}

fn prompt_geographic_scope<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Flow<StepInput>, AppError> {
    let scopes = GeographicScope::ordered();
    for (index, scope) in scopes.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, scope.label())?;
    }

    let answer = match prompt(input, out, "Geographic scope (number)")? {
        Flow::Answer(answer) => answer,
        Flow::Back => return Ok(Flow::Back),
        Flow::Restart => return Ok(Flow::Restart),
        Flow::Quit => return Ok(Flow::Quit),
    };

    let selection = if answer.is_empty() {
        None
    } else {
        let chosen = answer
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| scopes.get(index))
            .map(|scope| scope.as_str().to_string());
        Some(chosen.unwrap_or(answer))
    };

    Ok(Flow::Answer(StepInput::GeographicScope(selection)))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> Result<Flow<String>, AppError> {
    write!(out, "{label}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Flow::Quit);
    }

    let answer = line.trim();
    Ok(match answer {
        ":back" => Flow::Back,
        ":restart" => Flow::Restart,
        ":quit" => Flow::Quit,
        _ => Flow::Answer(answer.to_string()),
    })
}

fn render_progress<W: Write>(out: &mut W, progress: &StepProgress) -> Result<(), AppError> {
    let markers: Vec<String> = progress
        .steps
        .iter()
        .map(|entry| match entry.status {
            StepStatus::Completed => format!("[x] {}", entry.label),
            StepStatus::Active => format!("[>] {}", entry.label),
            StepStatus::Pending => format!("[ ] {}", entry.label),
        })
        .collect();

    writeln!(out)?;
    writeln!(out, "Step {} of {}", progress.current, progress.steps.len())?;
    writeln!(out, "{}", markers.join(" - "))?;
    Ok(())
}

pub(crate) fn render_assessment<W: Write>(
    out: &mut W,
    assessment: &Assessment,
) -> Result<(), AppError> {
    writeln!(
        out,
        "{} exposure: {}",
        assessment.band_label, assessment.interpretation
    )?;

    writeln!(out, "\nScore components:")?;
    for component in &assessment.components {
        writeln!(
            out,
            "  - {}: +{} ({})",
            component.factor.label(),
            component.points,
            component.notes
        )?;
    }

    writeln!(out, "\nRisk breakdown:")?;
    if assessment.risks.is_empty() {
        writeln!(out, "  - none identified")?;
    }
    for risk in &assessment.risks {
        writeln!(out, "  - [{}] {}", risk.level.label(), risk.text)?;
    }

    writeln!(out, "\nAutomation opportunities:")?;
    for opportunity in &assessment.opportunities {
        writeln!(out, "  {}. {}", opportunity.priority, opportunity.text)?;
    }

    writeln!(out, "\nPeer positioning:")?;
    for peer in &assessment.peers {
        let marker = if peer.highlighted { " *" } else { "" };
        writeln!(
            out,
            "  - {}: {}{}",
            peer.name, peer.readiness_label, marker
        )?;
    }

    writeln!(out, "\nCompliance blueprint:")?;
    for item in &assessment.blueprint {
        writeln!(out, "  - {}: {}", item.phase, item.action)?;
    }
    Ok(())
}

fn render_schedule<W: Write>(
    out: &mut W,
    schedule: &[ScheduledBlueprintItem],
) -> Result<(), AppError> {
    for item in schedule {
        match item.target_date {
            Some(date) => writeln!(out, "  - {} (by {}): {}", item.phase, date, item.action)?,
            None => writeln!(out, "  - {} (continuous): {}", item.phase, item.action)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quiet_wizard() -> ConsoleWizard {
        ConsoleWizard::new(&ConsoleConfig::default(), false)
    }

    fn drive(script: &str) -> (ConsoleWizard, Option<Assessment>, String) {
        let mut wizard = quiet_wizard();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let assessment = wizard.drive(&mut input, &mut out).expect("console runs");
        let transcript = String::from_utf8(out).expect("utf8 output");
        (wizard, assessment, transcript)
    }

    #[test]
    fn full_walkthrough_renders_results() {
        let (_, assessment, transcript) = drive("50\n30\n20\n1\n\nn\nn\nn\n1\n\n");

        let assessment = assessment.expect("assessment produced");
        assert_eq!(assessment.score, 53);
        assert!(transcript.contains("Step 5 of 5"));
        assert!(transcript.contains("Exposure score: 53/100"));
        assert!(transcript.contains("[High] Capital Gains Reform"));
        assert!(transcript.contains("Requires Strengthening *"));
    }

    #[test]
    fn incomplete_allocation_keeps_step_one() {
        let (wizard, assessment, transcript) = drive("50\n30\n10\n50\n30\n20\n:quit\n");

        assert!(assessment.is_none());
        assert!(transcript.contains("Client allocation must total 100% (currently 90%)."));
        assert_eq!(wizard.session().current_step(), 2);
    }

    #[test]
    fn allocation_total_is_reported_once_per_attempt() {
        let (wizard, _, transcript) = drive("200\n0\n0\n-20\n60\n60\n:quit\n");

        assert_eq!(transcript.matches("(currently 200%)").count(), 1);
        assert_eq!(transcript.matches("Total: 100%").count(), 1);
        assert!(!transcript.contains("Total: 200%"));
        assert_eq!(wizard.session().current_step(), 2);
    }

    #[test]
    fn back_and_restart_commands_navigate() {
        let (wizard, _, transcript) = drive("50\n30\n20\n:back\n:restart\n");

        assert_eq!(transcript.matches("Step 1 of 5").count(), 3);
        assert!(transcript.contains("Starting a new assessment."));
        assert_eq!(wizard.session(), &WizardSession::new());
    }

    #[test]
    fn restart_after_results_begins_a_new_session() {
        let (wizard, assessment, transcript) =
            drive("100\n0\n0\n\ny\ny\ny\ny\n1\n:restart\n");

        assert!(transcript.contains("Starting a new assessment."));
        assert!(assessment.is_none());
        assert_eq!(wizard.session().current_step(), 1);
    }

    #[test]
    fn reveal_counts_up_in_even_steps() {
        assert_eq!(reveal_frames(0, 20), vec![0]);
        let expected: Vec<u8> = (1..=18).map(|tick: u8| (tick * 3).min(53)).collect();
        assert_eq!(reveal_frames(53, 20), expected);
        assert_eq!(reveal_frames(100, 20).len(), 20);
        assert_eq!(reveal_frames(7, 20), (1..=7).collect::<Vec<u8>>());
    }

    #[test]
    fn assess_flags_build_raw_answers() {
        let args = AssessArgs {
            sme: Some("50".to_string()),
            corporate: Some("30".to_string()),
            international: Some("20".to_string()),
            specialization: vec!["capitalGains".to_string()],
            portal: Some(false),
            scope: Some("belgiumOnly".to_string()),
            ..AssessArgs::default()
        };

        let answers = answers_from_flags(args);
        assert_eq!(answers.digital_maturity.portal.as_deref(), Some("false"));
        let assessment = WizardSession::replay(answers).expect("replay completes");
        assert_eq!(assessment.score, 53);
    }

    #[test]
    fn schedule_marks_ongoing_phase() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
        let schedule = ComplianceBlueprint::standard().schedule(start);
        let mut out = Vec::new();

        render_schedule(&mut out, &schedule).expect("schedule renders");

        let text = String::from_utf8(out).expect("utf8 output");
        assert!(text.contains("(by 2026-02-14)"));
        assert!(text.contains("Ongoing (continuous)"));
    }
}
