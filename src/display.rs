use crate::agents::{AgentMode, AgentProfile};
use crate::session::{Message, MessageKind, PendingAttachment, Role};
use crate::utils::text::{centered_rule, wrap_text};
use console::{Term, style};
use termimad::MadSkin;

const DISCLAIMER: &str =
    "SIAK-Klinis mematuhi UU PDP. Hasil analisis AI bukan pengganti diagnosis medis profesional.";

fn rule_width() -> usize {
    let terminal_width = Term::stdout().size().1 as usize;
    std::cmp::min(terminal_width.saturating_sub(4), 100).max(40)
}

/// Header line above a message, e.g. `Anda · 14:02` or `SIAK · 14:02`.
pub fn message_header(message: &Message) -> String {
    let author = match message.role {
        Role::User => "Anda",
        Role::Model => "SIAK",
    };
    format!("{} · {}", author, message.timestamp.format("%H:%M"))
}

pub fn display_message(message: &Message, mode: AgentMode) {
    let accent = mode.profile().accent.color();

    match (message.role, message.kind) {
        (_, MessageKind::Divider) => {
            println!();
            println!(
                "{}",
                style(centered_rule(&strip_emphasis(&message.text), rule_width())).fg(accent)
            );
        }
        (Role::User, _) => {
            println!("\n{}", style(message_header(message)).bold().cyan());
            if message.has_image() {
                println!("{}", style("📎 gambar terlampir").dim());
            }
            if !message.text.trim().is_empty() {
                println!("{}", message.text);
            }
        }
        (Role::Model, MessageKind::Fallback) => {
            println!("\n{}", style(message_header(message)).bold().fg(accent));
            println!("{}", style(strip_emphasis(&message.text)).yellow());
        }
        (Role::Model, MessageKind::Turn) => {
            println!("\n{}", style(message_header(message)).bold().fg(accent));
            display_markdown(&message.text);
        }
    }
}

pub fn display_history(messages: &[Message], mode: AgentMode) {
    if messages.is_empty() {
        println!("{}", style("Riwayat percakapan kosong.").dim());
        return;
    }
    for message in messages {
        display_message(message, mode);
    }
}

pub fn display_markdown(text: &str) {
    let skin = MadSkin::default();
    skin.print_text(text);
}

/// Mode banner: accent dot, label, status line and the input hint.
pub fn display_mode_header(profile: &AgentProfile) {
    let accent = profile.accent.color();
    println!();
    println!(
        "{} {}  {}",
        style("●").fg(accent),
        style(profile.label).bold(),
        style(format!("[{} · {}]", profile.nav_title, profile.nav_subtitle)).dim()
    );
    let width = rule_width().saturating_sub(2);
    for line in wrap_text(profile.status_line, width) {
        println!("  {}", style(line).dim());
    }
    for line in wrap_text(profile.placeholder, width) {
        println!("  {}", style(line).italic().dim());
    }
    for line in wrap_text(&format!("/attach <file> · {}", profile.attach_hint), width) {
        println!("  {}", style(line).dim());
    }
}

pub fn display_disclaimer(mode: AgentMode) {
    for line in wrap_text(DISCLAIMER, rule_width()) {
        println!("{}", style(line).dim());
    }
    if mode == AgentMode::Clinical {
        println!("{}", style("Mode Medis Aktif.").green().bold());
    }
}

pub fn display_attachment_preview(attachment: &PendingAttachment) {
    println!(
        "{} {} {}",
        style("📎").bold(),
        style(&attachment.filename).bold(),
        style(format!("({})", format_size(attachment.approx_size()))).dim()
    );
}

pub fn display_thinking() {
    println!("{}", style("SIAK sedang berpikir... (Ctrl+C untuk membatalkan)").dim());
}

pub fn clear_thinking() {
    Term::stdout().clear_last_lines(1).ok();
}

pub fn display_notice(text: &str) {
    println!("{} {}", style("ℹ").cyan(), text);
}

pub fn display_error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(text).red());
}

pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Removes the `_`/`**` markers the divider and fallback texts carry, for plain styling.
fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").trim_matches('_').to_string()
}
