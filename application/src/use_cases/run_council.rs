//! Run Council use case
//!
//! Orchestrates the full three-stage council pipeline: independent
//! answers, anonymous peer ranking, and lead synthesis. Stages are hard
//! barriers — every issued call resolves (success or failure) before the
//! next stage starts, because stage 2 needs the complete anonymized
//! answer set and stage 3 needs the complete aggregate ranking.
//!
//! Per-member failures are absorbed as data (a dropped slot), never
//! raised; only run-level conditions (too few surviving answers, a
//! failed synthesis, cancellation) surface as typed errors.

use crate::ports::inference::{InferenceClient, InferenceError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::generate_title::{TitleResult, generate_title};
use council_domain::council::label::LABEL_ALPHABET_SIZE;
use council_domain::{
    CouncilBundle, JudgeRanking, Label, LabelMap, MemberAnswer, Message, Model, PromptTemplate,
    Question, Stage, SynthesisResult, calculate_aggregate_rankings,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can end a council run
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("At least two unique members are required, got {0}")]
    TooFewMembers(usize),

    #[error("Too many members: {0} (label alphabet supports up to {LABEL_ALPHABET_SIZE})")]
    TooManyMembers(usize),

    #[error("Lead model {0} is not a council member")]
    LeadNotMember(String),

    #[error("Insufficient candidates: only {survivors} of {asked} members answered")]
    InsufficientCandidates { survivors: usize, asked: usize },

    #[error("Synthesis failed: {0}")]
    SynthesisFailed(#[source] InferenceError),

    #[error("Run cancelled")]
    Cancelled,
}

impl RunCouncilError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunCouncilError::Cancelled)
    }
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The question to put before the council
    pub question: Question,
    /// Participating models, in declared order
    pub members: Vec<Model>,
    /// Member that performs stage-3 synthesis
    pub lead: Model,
    /// Also produce a conversation title (off the critical path)
    pub generate_title: bool,
    /// Checked at stage boundaries; cancelling stops further spend
    pub cancellation_token: Option<CancellationToken>,
}

impl RunCouncilInput {
    pub fn new(question: impl Into<Question>, members: Vec<Model>, lead: Model) -> Self {
        Self {
            question: question.into(),
            members,
            lead,
            generate_title: false,
            cancellation_token: None,
        }
    }

    /// Request a conversation title alongside the run
    pub fn with_title(mut self) -> Self {
        self.generate_title = true;
        self
    }

    /// Attach a cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }
}

/// Check if cancellation has been requested.
fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), RunCouncilError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(RunCouncilError::Cancelled);
    }
    Ok(())
}

/// Use case for running the three-stage council pipeline
pub struct RunCouncilUseCase<C: InferenceClient + 'static> {
    client: Arc<C>,
}

impl<C: InferenceClient + 'static> RunCouncilUseCase<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunCouncilInput) -> Result<CouncilBundle, RunCouncilError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunCouncilInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<CouncilBundle, RunCouncilError> {
        let members = validate_members(&input.members, &input.lead)?;

        info!(
            "Starting council with {} members, lead {}",
            members.len(),
            input.lead
        );

        // Title generation runs concurrently with the whole pipeline and
        // is only joined after synthesis, so a slow title never delays
        // the answer.
        let title_task: Option<JoinHandle<TitleResult>> = if input.generate_title {
            let client = Arc::clone(&self.client);
            let lead = input.lead.clone();
            let question = input.question.clone();
            Some(tokio::spawn(async move {
                generate_title(client.as_ref(), &lead, &question).await
            }))
        } else {
            None
        };

        let result = self
            .run_stages(&input.question, &members, &input.lead, &input.cancellation_token, progress)
            .await;

        let (stage1, stage2, stage3, aggregate, label_to_model) = match result {
            Ok(parts) => parts,
            Err(e) => {
                // The run is over; don't let the title call spend further.
                if let Some(task) = &title_task {
                    task.abort();
                }
                return Err(e);
            }
        };

        let title = match title_task {
            Some(task) => match task.await {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Title task join error: {}", e);
                    None
                }
            },
            None => None,
        };

        let mut usage_ids: Vec<String> = Vec::new();
        usage_ids.extend(stage1.iter().filter_map(|a| a.usage_id.clone()));
        usage_ids.extend(stage2.iter().filter_map(|r| r.usage_id.clone()));
        usage_ids.extend(stage3.usage_id.clone());
        if let Some(t) = &title {
            usage_ids.extend(t.usage_id.clone());
        }

        Ok(CouncilBundle {
            question: input.question.content().to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
            stage1,
            stage2,
            stage3,
            aggregate,
            label_to_model,
            title: title.map(|t| t.title),
            usage_ids,
        })
    }

    /// The three barrier stages, in order.
    #[allow(clippy::type_complexity)]
    async fn run_stages(
        &self,
        question: &Question,
        members: &[Model],
        lead: &Model,
        token: &Option<CancellationToken>,
        progress: &dyn ProgressNotifier,
    ) -> Result<
        (
            Vec<MemberAnswer>,
            Vec<JudgeRanking>,
            SynthesisResult,
            Vec<council_domain::AggregateEntry>,
            LabelMap,
        ),
        RunCouncilError,
    > {
        check_cancelled(token)?;
        let stage1 = self.stage_responses(question, members, progress).await;

        if stage1.len() < 2 {
            // Peer review is meaningless with one candidate; fail the
            // run rather than synthesize from a single voice.
            return Err(RunCouncilError::InsufficientCandidates {
                survivors: stage1.len(),
                asked: members.len(),
            });
        }

        let models: Vec<&str> = stage1.iter().map(|a| a.model.as_str()).collect();
        let label_to_model = LabelMap::assign(&models);

        check_cancelled(token)?;
        let stage2 = self
            .stage_rankings(question, members, &stage1, &label_to_model, progress)
            .await;

        let aggregate = calculate_aggregate_rankings(&stage2, &label_to_model);
        if aggregate.is_empty() {
            info!("No usable rankings; synthesizing from raw answers only");
        }

        check_cancelled(token)?;
        let stage3 = self
            .stage_synthesis(question, lead, &stage1, &aggregate, progress)
            .await?;

        Ok((stage1, stage2, stage3, aggregate, label_to_model))
    }

    /// Stage 1: every member answers independently, in parallel.
    ///
    /// Returns surviving answers in declared member order. Each worker
    /// writes into its pre-assigned slot, so completion order cannot
    /// reorder the result (and thus cannot perturb label assignment).
    async fn stage_responses(
        &self,
        question: &Question,
        members: &[Model],
        progress: &dyn ProgressNotifier,
    ) -> Vec<MemberAnswer> {
        info!("Stage 1: collecting answers from {} members", members.len());
        progress.on_stage_start(&Stage::Responses, members.len());

        let mut join_set = JoinSet::new();

        for (index, model) in members.iter().enumerate() {
            let client = Arc::clone(&self.client);
            let model = model.clone();
            let messages = vec![
                Message::system(PromptTemplate::answer_system()),
                Message::user(PromptTemplate::answer_prompt(question.content())),
            ];

            join_set.spawn(async move {
                let result = client.query(&model, &messages).await;
                (index, model, result)
            });
        }

        let mut slots: Vec<Option<MemberAnswer>> = vec![None; members.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, model, Ok(completion))) => {
                    debug!("Member {} answered", model);
                    progress.on_task_complete(&Stage::Responses, &model, true);
                    slots[index] = Some(MemberAnswer::new(
                        model.to_string(),
                        completion.content,
                        completion.usage_id,
                    ));
                }
                Ok((_, model, Err(e))) => {
                    warn!("Member {} failed to answer: {}", model, e);
                    progress.on_task_complete(&Stage::Responses, &model, false);
                }
                Err(e) => {
                    warn!("Stage 1 task join error: {}", e);
                }
            }
        }

        progress.on_stage_complete(&Stage::Responses);
        slots.into_iter().flatten().collect()
    }

    /// Stage 2: every declared member judges the anonymized answer set.
    ///
    /// Judges include members whose own stage-1 call failed. A failed
    /// judge call is dropped; zero surviving judges is tolerated.
    async fn stage_rankings(
        &self,
        question: &Question,
        members: &[Model],
        answers: &[MemberAnswer],
        label_to_model: &LabelMap,
        progress: &dyn ProgressNotifier,
    ) -> Vec<JudgeRanking> {
        info!("Stage 2: collecting rankings from {} judges", members.len());
        progress.on_stage_start(&Stage::Rankings, members.len());

        let labeled: Vec<(Label, String)> = label_to_model
            .iter()
            .zip(answers)
            .map(|((label, _), answer)| (label.clone(), answer.content.clone()))
            .collect();

        let mut join_set = JoinSet::new();

        for (index, model) in members.iter().enumerate() {
            let client = Arc::clone(&self.client);
            let model = model.clone();
            let messages = vec![
                Message::system(PromptTemplate::ranking_system()),
                Message::user(PromptTemplate::ranking_prompt(question.content(), &labeled)),
            ];

            join_set.spawn(async move {
                let result = client.query(&model, &messages).await;
                (index, model, result)
            });
        }

        let mut slots: Vec<Option<JudgeRanking>> = vec![None; members.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, model, Ok(completion))) => {
                    progress.on_task_complete(&Stage::Rankings, &model, true);
                    let ranking = JudgeRanking::new(
                        model.to_string(),
                        completion.content,
                        completion.usage_id,
                    );
                    if !ranking.has_ranking() {
                        debug!("Judge {} produced no parsable ranking", model);
                    }
                    slots[index] = Some(ranking);
                }
                Ok((_, model, Err(e))) => {
                    warn!("Judge {} failed to rank: {}", model, e);
                    progress.on_task_complete(&Stage::Rankings, &model, false);
                }
                Err(e) => {
                    warn!("Stage 2 task join error: {}", e);
                }
            }
        }

        progress.on_stage_complete(&Stage::Rankings);
        slots.into_iter().flatten().collect()
    }

    /// Stage 3: a single synthesis call to the lead. Fatal on failure.
    async fn stage_synthesis(
        &self,
        question: &Question,
        lead: &Model,
        answers: &[MemberAnswer],
        aggregate: &[council_domain::AggregateEntry],
        progress: &dyn ProgressNotifier,
    ) -> Result<SynthesisResult, RunCouncilError> {
        info!("Stage 3: synthesis by {}", lead);
        progress.on_stage_start(&Stage::Synthesis, 1);

        let messages = vec![
            Message::system(PromptTemplate::synthesis_system()),
            Message::user(PromptTemplate::synthesis_prompt(
                question.content(),
                answers,
                aggregate,
            )),
        ];

        match self.client.query(lead, &messages).await {
            Ok(completion) => {
                progress.on_task_complete(&Stage::Synthesis, lead, true);
                progress.on_stage_complete(&Stage::Synthesis);
                Ok(SynthesisResult::new(
                    lead.to_string(),
                    completion.content,
                    completion.usage_id,
                ))
            }
            Err(e) => {
                warn!("Synthesis by {} failed: {}", lead, e);
                progress.on_task_complete(&Stage::Synthesis, lead, false);
                progress.on_stage_complete(&Stage::Synthesis);
                Err(RunCouncilError::SynthesisFailed(e))
            }
        }
    }
}

/// Deduplicate members preserving declared order and validate the roster.
fn validate_members(members: &[Model], lead: &Model) -> Result<Vec<Model>, RunCouncilError> {
    let mut unique: Vec<Model> = Vec::with_capacity(members.len());
    for model in members {
        if !unique.contains(model) {
            unique.push(model.clone());
        }
    }

    if unique.len() < 2 {
        return Err(RunCouncilError::TooFewMembers(unique.len()));
    }
    if unique.len() > LABEL_ALPHABET_SIZE {
        return Err(RunCouncilError::TooManyMembers(unique.len()));
    }
    if !unique.contains(lead) {
        return Err(RunCouncilError::LeadNotMember(lead.to_string()));
    }

    Ok(unique)
}
