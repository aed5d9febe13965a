use super::ChatState;
use crate::agents::AgentMode;
use crate::core::error::SiakError;
use crate::display;
use crate::orchestrator::Phase;
use std::path::Path;

use console::style;

pub trait CommandHandler {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, SiakError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct ModeCommand;
pub struct AttachCommand;
pub struct DetachCommand;
pub struct ClearCommand;
pub struct HistoryCommand;
pub struct StatusCommand;

impl CommandHandler for QuitCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, SiakError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Keluar dari sesi"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(&self, _state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, SiakError> {
        let title = style("Perintah yang tersedia").bold().underlined();
        let help_text = [
            title.to_string(),
            ModeCommand.help().to_string(),
            AttachCommand.help().to_string(),
            DetachCommand.help().to_string(),
            ClearCommand.help().to_string(),
            HistoryCommand.help().to_string(),
            StatusCommand.help().to_string(),
            HelpCommand.help().to_string(),
            QuitCommand.help().to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Tampilkan daftar perintah"
    }
}

impl CommandHandler for ModeCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, SiakError> {
        if args.is_empty() {
            let current = state.orchestrator.active_mode();
            let choices = AgentMode::ALL
                .iter()
                .map(|mode| {
                    let marker = if *mode == current { "●" } else { " " };
                    format!("{} {:<12} {}", marker, mode.key(), mode.profile().label)
                })
                .collect::<Vec<_>>()
                .join("\n");
            return Ok(Some(choices));
        }

        let mode = AgentMode::from_str(args[0])
            .ok_or_else(|| SiakError::Input(format!("Unknown mode: {}", args[0])))?;

        let divider = state.orchestrator.switch_mode(mode);
        display::display_message(divider, mode);
        display::display_mode_header(&mode.profile());
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/mode [coordinator|clinical|billing|operational] - Tampilkan atau ganti mode agen"
    }
}

impl CommandHandler for AttachCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, SiakError> {
        if args.is_empty() {
            return Ok(Some("Usage: /attach <path-to-image>".to_string()));
        }

        let path = args.join(" ");
        let attachment = state.orchestrator.attach(Path::new(&path))?;
        display::display_attachment_preview(attachment);
        Ok(Some(
            "Gambar akan dikirim bersama pesan berikutnya.".to_string(),
        ))
    }

    fn help(&self) -> &'static str {
        "/attach <file> - Lampirkan gambar ke pesan berikutnya"
    }
}

impl CommandHandler for DetachCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, SiakError> {
        match state.orchestrator.detach() {
            Some(removed) => Ok(Some(format!("Lampiran dihapus: {}", removed.filename))),
            None => Ok(Some("Tidak ada lampiran.".to_string())),
        }
    }

    fn help(&self) -> &'static str {
        "/detach - Hapus lampiran yang tertunda"
    }
}

impl CommandHandler for ClearCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, SiakError> {
        state.orchestrator.clear_history();
        Ok(Some("Riwayat percakapan dihapus.".to_string()))
    }

    fn help(&self) -> &'static str {
        "/clear - Hapus riwayat percakapan"
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, SiakError> {
        let session = state.orchestrator.session();
        display::display_history(session.messages(), session.active_mode);
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/history - Tampilkan ulang seluruh percakapan"
    }
}

impl CommandHandler for StatusCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, SiakError> {
        let orchestrator = &state.orchestrator;
        let session = orchestrator.session();
        let client = orchestrator.client();

        let provider = match client.provider_name() {
            Some(name) => format!("{} (API key terkonfigurasi)", name),
            None => "tidak tersedia (API key tidak ditemukan)".to_string(),
        };
        let phase = match orchestrator.phase() {
            Phase::Idle => "siap",
            Phase::AwaitingCompletion => "menunggu respons",
        };
        let attachment = session
            .pending_attachment
            .as_ref()
            .map(|a| a.filename.clone())
            .unwrap_or_else(|| "-".to_string());

        Ok(Some(
            [
                format!("Mode     : {}", session.active_mode.profile().label),
                format!("Status   : {}", phase),
                format!("Provider : {}", provider),
                format!(
                    "Model    : {} (gambar: {})",
                    client.models().select(session.active_mode, false),
                    client.models().vision
                ),
                format!("Lampiran : {}", attachment),
                format!("Pesan    : {}", session.messages().len()),
            ]
            .join("\n"),
        ))
    }

    fn help(&self) -> &'static str {
        "/status - Tampilkan mode, provider, dan lampiran aktif"
    }
}
