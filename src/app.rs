use crate::cli::Args;
use crate::commands::{ChatState, dispatcher::CommandDispatcher};
use crate::completion::{CompletionClient, CompletionReply};
use crate::config::Config;
use crate::core::error::SiakError;
use crate::display;
use crate::input;
use crate::orchestrator::{Orchestrator, SubmitRejected};
use crate::session::{Message, Session};
use console::style;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::path::Path;
use tokio::task::JoinError;
use tracing::info;

pub struct Application {
    pub args: Args,
    pub orchestrator: Orchestrator,
    pub command_dispatcher: CommandDispatcher,
}

/// How an in-flight completion ended.
enum Settled {
    Reply(CompletionReply),
    Lost(String),
    Cancelled,
}

impl Settled {
    fn from_join(joined: Result<CompletionReply, JoinError>) -> Self {
        match joined {
            Ok(reply) => Settled::Reply(reply),
            Err(e) => Settled::Lost(e.to_string()),
        }
    }

    /// Moves the orchestrator back to Idle with the matching message.
    fn apply(self, orchestrator: &mut Orchestrator) -> Option<&Message> {
        match self {
            Settled::Reply(reply) => Some(orchestrator.complete_submit(reply)),
            Settled::Lost(reason) => Some(orchestrator.fail_submit(&reason)),
            Settled::Cancelled => orchestrator.cancel_submit(),
        }
    }
}

/// Loads `--image` into the pending slot so it goes out with the next submit.
fn preload_image(orchestrator: &mut Orchestrator, image: Option<&Path>) {
    let Some(path) = image else {
        return;
    };
    match orchestrator.attach(path) {
        Ok(attachment) => display::display_attachment_preview(attachment),
        Err(e) => display::display_error(&format!("{} (lampiran diabaikan)", e)),
    }
}

impl Application {
    pub fn new(
        args: Args,
        config: &Config,
        client: CompletionClient,
        command_dispatcher: CommandDispatcher,
    ) -> Self {
        let mode = args.mode.unwrap_or(config.default_mode);
        // A one-shot answer should not be preceded by the greeting
        let session = if config.welcome && args.query.is_none() {
            Session::with_welcome(mode)
        } else {
            Session::new(mode)
        };

        Self {
            args,
            orchestrator: Orchestrator::new(session, client),
            command_dispatcher,
        }
    }

    pub async fn run(self) -> Result<(), SiakError> {
        let context = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| SiakError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer).filter(|b| !b.trim().is_empty())
        } else {
            None
        };

        if self.args.query.is_some() || context.is_some() {
            self.handle_one_shot(context).await
        } else {
            self.handle_interactive().await
        }
    }

    async fn handle_one_shot(mut self, context: Option<String>) -> Result<(), SiakError> {
        preload_image(&mut self.orchestrator, self.args.image.as_deref());

        let query = match (self.args.query.as_deref(), context) {
            (Some(arg_q), Some(stdin_ctx)) => format!("<pipe>{}</pipe>\n\n{}", stdin_ctx, arg_q),
            (None, Some(stdin_ctx)) => format!("<pipe>{}</pipe>", stdin_ctx),
            (Some(arg_q), None) => arg_q.to_string(),
            (None, None) => String::new(),
        };

        let mode = self.orchestrator.active_mode();
        match self.orchestrator.submit(&query).await {
            Ok(reply) => {
                display::display_message(reply, mode);
                Ok(())
            }
            Err(SubmitRejected::Empty) => Err(SiakError::Input("No query provided".to_string())),
            Err(SubmitRejected::Busy) => Err(SiakError::Input(
                "A request is already in progress".to_string(),
            )),
        }
    }

    async fn handle_interactive(self) -> Result<(), SiakError> {
        let Application {
            args,
            orchestrator,
            command_dispatcher,
        } = self;
        let mut state = ChatState::new(orchestrator);

        println!(
            "{} {}",
            style("SIAK-Klinis").bold().green(),
            style("· Ketik /help untuk daftar perintah, Ctrl+D atau /quit untuk keluar.").dim()
        );
        let mode = state.orchestrator.active_mode();
        display::display_mode_header(&mode.profile());
        display::display_disclaimer(mode);
        display::display_history(state.orchestrator.session().messages(), mode);

        if !state.orchestrator.client().has_credential() {
            display::display_error("API key tidak ditemukan; setiap pesan akan dijawab dengan pesan kesalahan.");
        }
        preload_image(&mut state.orchestrator, args.image.as_deref());

        let mut editor = input::create_editor(command_dispatcher.clone())?;
        info!(%mode, "interactive session started");

        loop {
            let line = match input::read_input(&mut editor, state.orchestrator.active_mode())? {
                Some(line) => line,
                None => break,
            };

            if let Some(result) = command_dispatcher.execute_line(&line, &mut state) {
                match result {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) => display::display_error(&e.to_string()),
                }

                if !state.should_continue {
                    break;
                }
                continue;
            }

            Self::send(&mut state.orchestrator, &line).await;
        }

        input::save_history(&mut editor)?;
        Ok(())
    }

    /// One submit round trip as a cancellable task; Ctrl-C aborts it.
    async fn send(orchestrator: &mut Orchestrator, text: &str) {
        let ticket = match orchestrator.begin_submit(text) {
            Ok(ticket) => ticket,
            Err(SubmitRejected::Empty) => return,
            Err(SubmitRejected::Busy) => {
                display::display_notice("Masih menunggu respons sebelumnya.");
                return;
            }
        };

        if ticket.image.is_some() {
            display::display_notice("Gambar terlampir dikirim.");
        }

        let mut handle = tokio::spawn(ticket.run(orchestrator.client().clone()));
        let abort = handle.abort_handle();
        display::display_thinking();

        let settled = tokio::select! {
            joined = &mut handle => Settled::from_join(joined),
            _ = tokio::signal::ctrl_c() => {
                abort.abort();
                Settled::Cancelled
            }
        };
        display::clear_thinking();

        let mode = orchestrator.active_mode();
        if let Some(message) = settled.apply(orchestrator) {
            display::display_message(message, mode);
        }
    }
}
