use crate::agents::AgentMode;
use crate::commands::dispatcher::CommandDispatcher;
use crate::config::Config;
use crate::core::error::SiakError;

use console::style;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config as EditorConfig, Context, EditMode, Editor, Helper};

/// Completes command names, mode names after `/mode`, and paths after `/attach`.
pub struct SiakHelper {
    filename_completer: FilenameCompleter,
    history_hinter: HistoryHinter,
    command_registry: CommandDispatcher,
}

impl SiakHelper {
    pub fn new(command_registry: CommandDispatcher) -> Self {
        Self {
            filename_completer: FilenameCompleter::new(),
            history_hinter: HistoryHinter {},
            command_registry,
        }
    }

    fn complete_words(&self, line: &str, pos: usize) -> Option<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        let rest = typed.strip_prefix('/')?;

        if let Some(partial) = rest.strip_prefix("mode ") {
            let start = pos - partial.len();
            let matches = AgentMode::ALL
                .iter()
                .map(|m| m.key())
                .filter(|key| key.starts_with(partial))
                .map(|key| Pair {
                    display: key.to_string(),
                    replacement: key.to_string(),
                })
                .collect();
            return Some((start, matches));
        }

        if rest.contains(' ') {
            return None;
        }

        let matches: Vec<Pair> = self
            .command_registry
            .get_command_names()
            .into_iter()
            .filter(|cmd| cmd.starts_with(rest))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd,
            })
            .collect();
        Some((1, matches))
    }
}

impl Helper for SiakHelper {}

impl Completer for SiakHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if let Some(result) = self.complete_words(line, pos) {
            return Ok(result);
        }

        if line.starts_with("/attach ") {
            return self.filename_completer.complete(line, pos, ctx);
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for SiakHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        if line.starts_with('/') {
            self.history_hinter.hint(line, pos, ctx)
        } else {
            None
        }
    }
}

impl Highlighter for SiakHelper {}

impl Validator for SiakHelper {}

pub fn create_editor(
    command_registry: CommandDispatcher,
) -> Result<Editor<SiakHelper, FileHistory>, SiakError> {
    let config = EditorConfig::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| SiakError::Input(format!("Failed to create line editor: {}", e)))?;

    editor.set_helper(Some(SiakHelper::new(command_registry)));
    let _ = editor.load_history(&Config::history_path());

    Ok(editor)
}

/// Reads one line; `None` on Ctrl-C or Ctrl-D.
pub fn read_input(
    editor: &mut Editor<SiakHelper, FileHistory>,
    mode: AgentMode,
) -> Result<Option<String>, SiakError> {
    let prompt = if cfg!(windows) && std::env::var("PSModulePath").is_ok() {
        format!("{}> ", mode.key())
    } else {
        let accent = mode.profile().accent.color();
        format!("{}{} ", style(mode.key()).fg(accent).bold(), style(">").bold().cyan())
    };

    match editor.readline(&prompt) {
        Ok(line) => {
            // Only commands are remembered; free text may hold patient data
            if !line.trim().is_empty() && line.starts_with('/') {
                editor.add_history_entry(&line).map_err(|e| {
                    SiakError::Input(format!("Failed to add history entry: {}", e))
                })?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Sampai jumpa.");
            Ok(None)
        }
        Err(err) => Err(SiakError::Input(format!("Input error: {}", err))),
    }
}

pub fn save_history(editor: &mut Editor<SiakHelper, FileHistory>) -> Result<(), SiakError> {
    let history_path = Config::history_path();

    if let Some(parent) = history_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SiakError::Input(format!("Failed to create history directory: {}", e))
            })?;
        }
    }

    editor
        .save_history(&history_path)
        .map_err(|e| SiakError::Input(format!("Failed to save history: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create_command_registry;

    fn replacements(result: Option<(usize, Vec<Pair>)>) -> (usize, Vec<String>) {
        let (start, pairs) = result.unwrap();
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn completes_command_names() {
        let helper = SiakHelper::new(create_command_registry());
        let (start, names) = replacements(helper.complete_words("/at", 3));
        assert_eq!(start, 1);
        assert_eq!(names, vec!["attach".to_string()]);
    }

    #[test]
    fn completes_mode_names() {
        let helper = SiakHelper::new(create_command_registry());
        let line = "/mode cl";
        let (start, names) = replacements(helper.complete_words(line, line.len()));
        assert_eq!(start, 6);
        assert_eq!(names, vec!["clinical".to_string()]);
    }

    #[test]
    fn plain_text_gets_no_word_completion() {
        let helper = SiakHelper::new(create_command_registry());
        assert!(helper.complete_words("halo", 4).is_none());
        assert!(helper.complete_words("/attach sc", 10).is_none());
    }
}
