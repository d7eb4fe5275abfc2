//! Turns free-text (typed or dictated) commands into widget mutations.
//!
//! Interpretation is a pure step: [`Interpreter::interpret`] reads a snapshot
//! of the widgets and produces an [`Intent`] holding the complete replacement
//! for every collection it touches. [`Interpreter::run`] then applies the
//! intent through a [`WidgetHost`], creating the target widget first if it
//! does not exist yet.

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use thiserror::Error;

use crate::{
    config::InterpreterConfig,
    host::{HostError, Notice, WidgetHost, WidgetUpdate},
    widget::{IdGenerator, Position, Widget, WidgetData, WidgetId, WidgetKind},
};

mod parse;
mod rules;

use rules::{CommandContext, RULES};

/// Error type for interpreting commands.
#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum CommandError {
    /// An alarm command without a recognizable time.
    #[error("Could not understand the time format")]
    UnparseableTime,
    /// No rule matched, or the matching rule found nothing to record.
    #[error("the command did not match any known pattern")]
    NoMatch,
}

impl CommandError {
    /// Whether the user is told about this failure. Commands that simply do
    /// not match are dropped without feedback.
    pub fn is_reported(&self) -> bool {
        matches!(self, CommandError::UnparseableTime)
    }
}

/// The widget an [`Intent`] applies to.
#[derive(Debug, PartialEq, Clone)]
pub enum Target {
    Existing(WidgetId),
    /// No widget of the kind exists yet; one has to be created first.
    Create { kind: WidgetKind, position: Position },
}

/// The result of interpreting a command.
#[derive(Debug, PartialEq, Clone)]
pub struct Intent {
    pub target: Target,
    /// Full replacements for the collections the command changes.
    pub data: WidgetData,
    /// Shown to the user once the update went through.
    pub notice: String,
}

/// What [`Interpreter::run`] did with a command.
#[derive(Debug, PartialEq, Clone)]
pub enum Outcome {
    Applied { widget: WidgetId, created: bool },
    /// The command was understood as an alarm but could not be carried out;
    /// the user has been notified.
    Rejected(CommandError),
    Ignored,
}

pub struct Interpreter<R = StdRng> {
    config: InterpreterConfig,
    ids: IdGenerator,
    /// Source for the colors of new expense categories.
    rng: R,
}

impl Interpreter<StdRng> {
    pub fn new(config: InterpreterConfig) -> Self {
        Interpreter::with_rng(config, StdRng::from_entropy())
    }
}

impl Default for Interpreter<StdRng> {
    fn default() -> Self {
        Interpreter::new(InterpreterConfig::default())
    }
}

impl<R: RngCore> Interpreter<R> {
    pub fn with_rng(config: InterpreterConfig, rng: R) -> Self {
        Interpreter { config, ids: IdGenerator::new(), rng }
    }

    pub fn interpret(&mut self, text: &str, widgets: &[Widget]) -> Result<Intent, CommandError> {
        self.interpret_at(text, widgets, Utc::now())
    }

    /// Same as `interpret`, with `now` as the current time for new record ids
    /// and timestamps.
    pub fn interpret_at(
        &mut self,
        text: &str,
        widgets: &[Widget],
        now: DateTime<Utc>,
    ) -> Result<Intent, CommandError> {
        let lowered = text.to_lowercase();
        tracing::debug!(command = %lowered, "processing command");

        let rule = RULES.iter().find(|rule| rule.matches(&lowered)).ok_or(CommandError::NoMatch)?;
        let mut cx = CommandContext {
            text,
            lowered: &lowered,
            widgets,
            now,
            spawn_position: self.config.spawn_position,
            ids: &mut self.ids,
            rng: &mut self.rng,
        };
        (rule.handler)(&mut cx)
    }

    pub async fn run<H: WidgetHost>(&mut self, text: &str, host: &mut H) -> Result<Outcome, HostError> {
        self.run_at(text, host, Utc::now()).await
    }

    /// Interprets `text` against the host's current widgets and applies the
    /// result. A widget that has to be created is awaited before its data is
    /// updated, so the update always goes to the id the host handed out.
    pub async fn run_at<H: WidgetHost>(
        &mut self,
        text: &str,
        host: &mut H,
        now: DateTime<Utc>,
    ) -> Result<Outcome, HostError> {
        let Intent { target, data, notice } = match self.interpret_at(text, host.widgets(), now) {
            Ok(intent) => intent,
            Err(error) if error.is_reported() => {
                tracing::warn!(%error, "rejected command");
                host.notify(Notice::error(error.to_string()));
                return Ok(Outcome::Rejected(error));
            }
            Err(_) => return Ok(Outcome::Ignored),
        };

        let (widget, created) = match target {
            Target::Existing(id) => (id, false),
            Target::Create { kind, position } => {
                let id = host.add_widget(kind, Some(position)).await?;
                tracing::info!(%id, %kind, "created widget for command");
                (id, true)
            }
        };
        host.update_widget(&widget, WidgetUpdate { data }).await?;
        tracing::info!(%widget, "{notice}");
        host.notify(Notice::success(notice));

        Ok(Outcome::Applied { widget, created })
    }
}
