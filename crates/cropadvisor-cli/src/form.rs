//! Recommendation form controller.
//!
//! The form starts in `AwaitingInput`, moves to `Submitted` on every submission and
//! to `Rendered` once the outcome has been shown. Nothing carries over between
//! submissions except the shared context.

use anyhow::Result;
use cropadvisor_core::models::QueryInput;
use cropadvisor_model::{recommend, PredictionFailure, Recommendation, RecommenderContext};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    AwaitingInput,
    Submitted,
    Rendered,
}

/// Where submissions come from: prompts, or values given up front
pub trait InputSource {
    /// Next submission, or `None` when the user is done
    fn next_submission(&mut self) -> Result<Option<QueryInput>>;
}

/// Submissions fixed in advance
pub struct ScriptedInput {
    queue: VecDeque<QueryInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = QueryInput>) -> Self {
        Self { queue: inputs.into_iter().collect() }
    }

    pub fn once(input: QueryInput) -> Self {
        Self::new([input])
    }
}

impl InputSource for ScriptedInput {
    fn next_submission(&mut self) -> Result<Option<QueryInput>> {
        Ok(self.queue.pop_front())
    }
}

/// Outcome of one submission
pub type Outcome = std::result::Result<Recommendation, PredictionFailure>;

pub struct FormController<'a> {
    context: &'a RecommenderContext,
    state: FormState,
    submissions: usize,
}

impl<'a> FormController<'a> {
    pub fn new(context: &'a RecommenderContext) -> Self {
        Self { context, state: FormState::AwaitingInput, submissions: 0 }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn submissions(&self) -> usize {
        self.submissions
    }

    /// Handle one submission
    pub fn submit(&mut self, input: &QueryInput) -> Outcome {
        self.state = FormState::Submitted;
        self.submissions += 1;
        tracing::info!("Submission {} ({:?} mode)", self.submissions, input.mode());
        recommend(self.context, input)
    }

    /// Mark the last outcome as shown
    pub fn mark_rendered(&mut self) {
        self.state = FormState::Rendered;
    }

    /// Drive the form until the source runs dry, rendering each outcome
    pub fn run<S, R>(&mut self, source: &mut S, mut render: R) -> Result<()>
    where
        S: InputSource + ?Sized,
        R: FnMut(&Outcome) -> Result<()>,
    {
        while let Some(input) = source.next_submission()? {
            let outcome = self.submit(&input);
            render(&outcome)?;
            self.mark_rendered();
        }
        Ok(())
    }
}
