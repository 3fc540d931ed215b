//! Run Translation use case
//!
//! Drives one request through the pipeline state machine:
//!
//! | State | Action | Success | Agent failure |
//! |-------|--------|---------|---------------|
//! | Pending | | Analyzing | |
//! | Analyzing | analyzer, store analysis | Translating | FailedError |
//! | Translating | translator, store draft | Reviewing | FailedError |
//! | Reviewing | reviewer, append review | Passed, or budget check | FailedError |
//! | budget check | | Optimizing (+1 iteration), or FailedMaxIterations | |
//! | Optimizing | optimizer, store suggestions | Translating | FailedError |
//!
//! A request is strictly sequential and suspends only while an agent is
//! running. Cancellation is checked at each of those suspension points: the
//! in-flight agent call is dropped and the request ends as `FailedError`
//! with [`FailureReason::Cancelled`].

mod types;

pub use types::{AgentRun, FailureReason, RunTranslationError, TerminalOutcome, TranslationInput};

use crate::agents::{Agent, AgentPayload, AgentRoster};
use crate::config::PipelineConfig;
use crate::ports::status::{NoStatus, StatusEvent, StatusSink};
use crate::ports::text_generator::TextGenerator;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use transcrew_domain::core::string::preview;
use transcrew_domain::{
    AgentRole, GenerationParams, SourceText, TranslationContext, TranslationStatus,
};
use uuid::Uuid;

/// Characters of a draft shown in status summaries
const SUMMARY_PREVIEW_LEN: usize = 60;

/// Per-request state owned by one execution
struct PipelineRun<'a> {
    request_id: String,
    context: TranslationContext,
    agent_runs: Vec<AgentRun>,
    status: &'a dyn StatusSink,
}

/// Use case for translating one text through the quality-gated pipeline.
///
/// Holds no per-request state: one instance serves any number of
/// concurrent requests.
pub struct RunTranslationUseCase {
    roster: AgentRoster,
    config: Arc<PipelineConfig>,
}

impl RunTranslationUseCase {
    pub fn new(roster: AgentRoster, config: Arc<PipelineConfig>) -> Self {
        Self { roster, config }
    }

    /// Standard agents backed by `generator`, scored by the config's evaluator
    pub fn with_generator(generator: Arc<dyn TextGenerator>, config: Arc<PipelineConfig>) -> Self {
        let roster = AgentRoster::standard(generator, config.evaluator().clone());
        Self::new(roster, config)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Translate `source_text` into `target_language`.
    ///
    /// Returns `Err` only for invalid input; every pipeline failure is a
    /// [`TerminalOutcome`].
    pub async fn translate(
        &self,
        source_text: impl Into<String>,
        target_language: impl Into<String>,
        generation_params: GenerationParams,
    ) -> Result<TerminalOutcome, RunTranslationError> {
        let input = TranslationInput::new(source_text, target_language).with_params(generation_params);
        self.execute(input).await
    }

    /// Execute the use case with default (no-op) status reporting
    pub async fn execute(
        &self,
        input: TranslationInput,
    ) -> Result<TerminalOutcome, RunTranslationError> {
        self.execute_with_status(input, &NoStatus, &CancellationToken::new())
            .await
    }

    /// Execute the use case with status callbacks and cancellation
    pub async fn execute_with_status(
        &self,
        input: TranslationInput,
        status: &dyn StatusSink,
        cancel: &CancellationToken,
    ) -> Result<TerminalOutcome, RunTranslationError> {
        let source_text = SourceText::new(input.source_text)?;
        let context =
            TranslationContext::new(source_text, input.target_language, input.generation_params)?;

        let mut run = PipelineRun {
            request_id: input
                .request_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            context,
            agent_runs: Vec::new(),
            status,
        };

        info!(
            "Starting translation {} into {} ({} chars, budget {})",
            run.request_id,
            run.context.target_language(),
            run.context.source_text().char_count(),
            self.config.effective_max_iterations()
        );

        let failure = match self.drive(&mut run, cancel).await {
            Ok(()) => None,
            Err(reason) => {
                warn!("Translation {} failed: {}", run.request_id, reason);
                self.fail(&mut run, &reason);
                Some(reason)
            }
        };

        let outcome = Self::outcome(run.request_id, run.context, run.agent_runs, failure);
        info!(
            "Translation {} finished: {} after {} iteration(s), {} review(s)",
            outcome.request_id,
            outcome.status,
            outcome.iteration_count,
            outcome.review_history.len()
        );
        status.on_outcome(&outcome);
        Ok(outcome)
    }

    /// Run the state machine until it reaches `Passed` or
    /// `FailedMaxIterations`. Any `Err` ends the request as `FailedError`.
    async fn drive(
        &self,
        run: &mut PipelineRun<'_>,
        cancel: &CancellationToken,
    ) -> Result<(), FailureReason> {
        let budget = self.config.effective_max_iterations();
        let threshold = self.config.evaluator().threshold();

        // Analyzing
        self.advance(run, TranslationStatus::Analyzing, "analyzing source text")?;
        let analysis = match self.invoke(run, AgentRole::Analyzer, cancel).await? {
            AgentPayload::Analysis(analysis) => analysis,
            other => return Err(unexpected(AgentRole::Analyzer, &other)),
        };
        let summary = format!(
            "source {} ({}, {} key terms)",
            analysis.source_language,
            analysis.complexity,
            analysis.key_terms.len()
        );
        run.context.set_analysis(analysis)?;
        self.advance(run, TranslationStatus::Translating, summary)?;

        loop {
            // Translating
            let translation = match self.invoke(run, AgentRole::Translator, cancel).await? {
                AgentPayload::Translation(text) => text,
                other => return Err(unexpected(AgentRole::Translator, &other)),
            };
            let summary = format!("draft: {}", preview(&translation, SUMMARY_PREVIEW_LEN));
            run.context.set_translation(translation)?;
            self.advance(run, TranslationStatus::Reviewing, summary)?;

            // Reviewing
            let review = match self.invoke(run, AgentRole::Reviewer, cancel).await? {
                AgentPayload::Review(review) => review,
                other => return Err(unexpected(AgentRole::Reviewer, &other)),
            };
            run.context.record_review(review)?;

            let Some(latest) = run.context.latest_review() else {
                return Err(FailureReason::Contract {
                    message: "budget check reached with an empty review history".to_string(),
                });
            };
            let composite = latest.composite;

            if latest.passed {
                self.advance(
                    run,
                    TranslationStatus::Passed,
                    format!("composite {} >= {}", composite, threshold),
                )?;
                return Ok(());
            }

            // Budget check
            if run.context.iteration_count() >= budget {
                self.advance(
                    run,
                    TranslationStatus::FailedMaxIterations,
                    format!(
                        "composite {} < {}, {} of {} iterations used",
                        composite,
                        threshold,
                        run.context.iteration_count(),
                        budget
                    ),
                )?;
                return Ok(());
            }
            let iteration = run.context.begin_iteration(budget)?;
            self.advance(
                run,
                TranslationStatus::Optimizing,
                format!(
                    "composite {} < {}, iteration {}/{}",
                    composite, threshold, iteration, budget
                ),
            )?;

            // Optimizing
            let suggestions = match self.invoke(run, AgentRole::Optimizer, cancel).await? {
                AgentPayload::Suggestions(suggestions) => suggestions,
                other => return Err(unexpected(AgentRole::Optimizer, &other)),
            };
            let summary = format!(
                "{} suggestion(s), focus {}",
                suggestions.len(),
                suggestions.focus
            );
            run.context.set_suggestions(suggestions)?;
            self.advance(run, TranslationStatus::Translating, summary)?;
        }
    }

    /// Invoke one agent, racing it against cancellation
    async fn invoke(
        &self,
        run: &mut PipelineRun<'_>,
        role: AgentRole,
        cancel: &CancellationToken,
    ) -> Result<AgentPayload, FailureReason> {
        let agent: &dyn Agent = self.roster.get(role);
        debug!("Request {}: invoking {}", run.request_id, role);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = agent.invoke(&run.context) => Some(result),
        };

        let Some(result) = result else {
            info!("Request {} cancelled during {}", run.request_id, role);
            return Err(FailureReason::Cancelled);
        };

        let record = AgentRun::new(role, result.success, result.elapsed);
        run.status.on_agent_finished(&run.request_id, &record);
        run.agent_runs.push(record);

        match result.into_payload() {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!("{} failed: {}", role, error);
                Err(FailureReason::Agent { role, error })
            }
        }
    }

    /// Transition the context and emit the status event
    fn advance(
        &self,
        run: &mut PipelineRun<'_>,
        to: TranslationStatus,
        summary: impl Into<String>,
    ) -> Result<(), FailureReason> {
        let from = run.context.transition(to)?;
        let event = StatusEvent::new(
            run.request_id.clone(),
            from,
            to,
            summary,
            run.context.iteration_count(),
        );
        debug!("Request {}: {} -> {}", run.request_id, from, to);
        run.status.on_transition(&event);
        Ok(())
    }

    /// Move to `FailedError` unless the context already ended
    fn fail(&self, run: &mut PipelineRun<'_>, reason: &FailureReason) {
        if run.context.is_terminal() {
            return;
        }
        if let Err(e) = self.advance(run, TranslationStatus::FailedError, reason.to_string()) {
            warn!("Could not record failure for {}: {}", run.request_id, e);
        }
    }

    fn outcome(
        request_id: String,
        context: TranslationContext,
        agent_runs: Vec<AgentRun>,
        failure: Option<FailureReason>,
    ) -> TerminalOutcome {
        let status = context.status();
        let last_draft = context.current_translation().map(str::to_string);
        TerminalOutcome {
            request_id,
            status,
            final_translation: last_draft.clone().filter(|_| status == TranslationStatus::Passed),
            last_draft,
            analysis: context.analysis().cloned(),
            review_history: context.review_history().to_vec(),
            iteration_count: context.iteration_count(),
            failure,
            agent_runs,
        }
    }
}

fn unexpected(role: AgentRole, payload: &AgentPayload) -> FailureReason {
    FailureReason::Contract {
        message: format!("{} returned a {} payload", role, payload.kind()),
    }
}
