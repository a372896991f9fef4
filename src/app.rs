//! Interactive session — the user-facing surface.
//!
//! # Actions
//!
//! Each line typed by the user parses into a [`Command`]; each command maps
//! to exactly one workflow transition (or a read-only query).
//!
//! | Command            | Effect                                           |
//! |--------------------|--------------------------------------------------|
//! | `select <path>`    | validate + select a file (Upload)                |
//! | `remove`           | clear the selection (Upload)                     |
//! | `language <code>`  | pick the source language                         |
//! | `task <mode>`      | `transcribe` or `translate`                      |
//! | `submit`           | send the selected file (Ready → Processing)      |
//! | `retry`            | Error → Upload, selection kept                   |
//! | `new`              | any → Upload, selection and result cleared       |
//! | `languages`        | list selectable languages                        |
//! | `show` / `help`    | redraw / usage                                   |
//! | `quit`             | leave                                            |

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::config::DefaultsConfig;
use crate::input::CandidateFile;
use crate::service::{
    load_languages, DownloadLinks, LanguageSelector, Task, TranscriptionOptions,
    TranscriptionService, UnknownLanguage, AUTO_LANGUAGE,
};
use crate::view::{render, View};
use crate::workflow::{
    EventSender, PhaseKind, TranscriptionOrchestrator, WorkflowContext, WorkflowError,
};

pub const HELP: &str = "\
commands:
  select <path>      choose a video or audio file
  remove             drop the selected file
  language <code>    source language (see `languages`)
  task <mode>        transcribe | translate
  submit             start transcription
  retry              back to upload after an error
  new                start a new transcription
  languages          list languages
  show               redraw the current screen
  quit               exit";

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(PathBuf),
    Remove,
    Language(String),
    Task(Task),
    Submit,
    Retry,
    New,
    Languages,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("{0}")]
    InvalidTask(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let required = |name: &'static str| {
            if arg.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(arg)
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "select" | "open" => Ok(Command::Select(PathBuf::from(required("select")?))),
            "remove" => Ok(Command::Remove),
            "language" | "lang" => Ok(Command::Language(required("language")?.to_string())),
            "task" => required("task")?
                .parse()
                .map(Command::Task)
                .map_err(CommandError::InvalidTask),
            "submit" | "transcribe" => Ok(Command::Submit),
            "retry" => Ok(Command::Retry),
            "new" => Ok(Command::New),
            "languages" => Ok(Command::Languages),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Language(#[from] UnknownLanguage),
}

impl SessionError {
    /// `true` when the error is already visible in the Error phase view.
    pub fn is_shown_in_view(&self) -> bool {
        matches!(self, SessionError::Workflow(e) if e.enters_error_phase())
    }
}

/// What the caller should print after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(View),
    Message(String),
    Quit,
}

/// One user session: workflow context, option selectors and orchestrator.
pub struct Session {
    ctx: WorkflowContext,
    languages: LanguageSelector,
    task: Task,
    service: Arc<dyn TranscriptionService>,
    orchestrator: TranscriptionOrchestrator,
    links: DownloadLinks,
}

impl Session {
    pub fn new(
        service: Arc<dyn TranscriptionService>,
        links: DownloadLinks,
        defaults: &DefaultsConfig,
    ) -> Self {
        Self {
            ctx: WorkflowContext::new(),
            languages: LanguageSelector::new(),
            task: defaults.task,
            orchestrator: TranscriptionOrchestrator::new(Arc::clone(&service)),
            service,
            links,
        }
    }

    pub fn with_events(mut self, events: EventSender) -> Self {
        self.orchestrator = self.orchestrator.with_events(events);
        self
    }

    /// Load the language catalog and apply the configured default language.
    ///
    /// Neither step can fail the session: problems are logged and the
    /// selector stays on `auto`.
    pub async fn initialise(&mut self, defaults: &DefaultsConfig) {
        load_languages(self.service.as_ref(), &mut self.languages).await;

        if defaults.language != AUTO_LANGUAGE {
            if let Err(e) = self.languages.select(&defaults.language) {
                log::warn!("default {e}; using {AUTO_LANGUAGE}");
            }
        }
    }

    pub fn context(&self) -> &WorkflowContext {
        &self.ctx
    }

    pub fn languages(&self) -> &LanguageSelector {
        &self.languages
    }

    /// Current selector values.
    pub fn options(&self) -> TranscriptionOptions {
        TranscriptionOptions {
            language: self.languages.selected().to_string(),
            task: self.task,
        }
    }

    pub fn view(&self) -> View {
        render(&self.ctx, &self.links)
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome, SessionError> {
        match command {
            Command::Select(path) => {
                self.ctx.ensure("choose a file", PhaseKind::Upload)?;
                match CandidateFile::from_path(&path).await {
                    Ok(file) => self.ctx.choose_file(file)?,
                    Err(source) => {
                        let err = WorkflowError::FileRead {
                            name: path.display().to_string(),
                            source,
                        };
                        return Err(self.ctx.fail(err).into());
                    }
                }
            }
            Command::Remove => self.ctx.remove_file()?,
            Command::Language(code) => self.languages.select(&code)?,
            Command::Task(task) => self.task = task,
            Command::Submit => {
                let options = self.options();
                self.orchestrator.submit(&mut self.ctx, &options).await?;
            }
            Command::Retry => self.ctx.try_again()?,
            Command::New => self.ctx.new_transcription(),
            Command::Languages => return Ok(Outcome::Message(self.language_list())),
            Command::Show => {}
            Command::Help => return Ok(Outcome::Message(HELP.to_string())),
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Render(self.view()))
    }

    fn language_list(&self) -> String {
        self.languages
            .options()
            .iter()
            .map(|lang| {
                let marker = if lang.code == self.languages.selected() {
                    '*'
                } else {
                    ' '
                };
                format!("{marker} {:<5} {}", lang.code, lang.name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
