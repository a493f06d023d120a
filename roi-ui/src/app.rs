//! Session driver: applies commands to the application state and prints
//! results.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use roi_core::{EditError, InputField, RawInput};

use crate::commands::{Command, CommandParseError, HELP};
use crate::config::AppConfig;
use crate::csv_loader;
use crate::export::{DocumentRenderer, ExportOptions, HtmlRenderer, export_and_log};
use crate::logging;
use crate::state::AppState;
use crate::utils::{format_currency, format_opt_pct};

/// Whether the session keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    state: AppState,
    renderer: Box<dyn DocumentRenderer>,
    export_options: ExportOptions,
}

impl App {
    /// An app exporting through the bundled HTML renderer.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_renderer(config, Box::new(HtmlRenderer))
    }

    pub fn with_renderer(
        config: &AppConfig,
        renderer: Box<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            state: AppState::new(config.calculator.clone()),
            renderer,
            export_options: ExportOptions::from_config(&config.export),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// The full results report as text.
    pub fn report(&self) -> String {
        self.state.view().to_string()
    }

    /// One-line recap printed after each edit.
    pub fn summary_line(&self) -> String {
        let result = self.state.result();
        format!(
            "Total revenue: {} (value added {}, {})",
            format_currency(result.total_revenue),
            format_currency(result.value_added_abs),
            format_opt_pct(result.value_added_pct),
        )
    }

    /// Applies scalar inputs given as raw text, e.g. from command-line flags.
    pub fn apply_overrides(
        &mut self,
        overrides: &[(InputField, String)],
    ) -> Result<(), EditError> {
        for (field, raw) in overrides {
            self.state.apply_field(*field, RawInput::Text(raw))?;
        }
        Ok(())
    }

    /// Replaces the book of business from a CSV file.
    pub fn load_book(
        &mut self,
        path: &Path,
    ) -> anyhow::Result<()> {
        let tiers = csv_loader::load_from_file(path)
            .with_context(|| format!("failed to load book from '{}'", path.display()))?;
        self.state.replace_tiers(tiers)?;
        Ok(())
    }

    /// Exports the current results. Failures are logged, not returned.
    pub async fn export(&self) -> Option<PathBuf> {
        let view = self.state.view();
        export_and_log(
            self.renderer.as_ref(),
            &view,
            &self.export_options,
            self.state.exporting_flag(),
        )
        .await
    }

    /// Runs one command, writing any output to `out`.
    ///
    /// Refused edits are reported to the user and leave the state unchanged.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> io::Result<Flow> {
        let edited: Result<(), String> = match command {
            Command::Set { field, raw } => self
                .state
                .apply_field(field, RawInput::Text(&raw))
                .map_err(|e| e.to_string()),
            Command::Mode(mode) => {
                self.state.set_input_mode(mode);
                Ok(())
            }
            Command::Tier { index, field, raw } => self
                .state
                .update_tier(index, field, &raw)
                .map_err(|e| e.to_string()),
            Command::Add => self
                .state
                .add_tier()
                .map(|index| info!(index, "tier added"))
                .map_err(|e| e.to_string()),
            Command::Remove(index) => self
                .state
                .remove_tier(index)
                .map(|tier| info!(label = %tier.label, "tier removed"))
                .map_err(|e| e.to_string()),
            Command::Load(path) => self.load_book(&path).map_err(|e| format!("{e:#}")),
            Command::Reset => {
                self.state.reset();
                Ok(())
            }
            Command::Show => {
                write!(out, "{}", self.report())?;
                return Ok(Flow::Continue);
            }
            Command::Export => {
                match self.export().await {
                    Some(path) => writeln!(out, "exported to {}", path.display())?,
                    None => writeln!(out, "error: export failed; see log for details")?,
                }
                return Ok(Flow::Continue);
            }
            Command::Log(level) => {
                if let Err(e) = logging::set_log_level(&level) {
                    writeln!(out, "error: {e}")?;
                }
                return Ok(Flow::Continue);
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        match edited {
            Ok(()) => writeln!(out, "{}", self.summary_line())?,
            Err(reason) => {
                warn!(%reason, "edit refused");
                writeln!(out, "error: {reason}")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Reads commands line by line until `quit` or end of input.
    pub async fn run_interactive<R, W>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}", self.summary_line())?;
        writeln!(out, "type 'help' for commands")?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next_line().await.context("failed to read input")? else {
                break;
            };
            match Command::parse(&line) {
                Ok(command) => {
                    if self.execute(command, out).await? == Flow::Quit {
                        break;
                    }
                }
                Err(CommandParseError::Empty) => {}
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        info!("interactive session ended");
        Ok(())
    }
}
