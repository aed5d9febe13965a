pub mod models;
mod prompts;

use console::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use models::ModelCatalog;

/// The four conversational personas a message can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    #[default]
    Coordinator,
    Clinical,
    Billing,
    Operational,
}

impl AgentMode {
    pub const ALL: [AgentMode; 4] = [
        AgentMode::Coordinator,
        AgentMode::Clinical,
        AgentMode::Billing,
        AgentMode::Operational,
    ];

    /// Parses a mode name as typed in `/mode`, accepting the Indonesian aliases too.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "coordinator" | "koordinator" | "router" => Some(AgentMode::Coordinator),
            "clinical" | "klinis" | "rme" => Some(AgentMode::Clinical),
            "billing" | "keuangan" | "blu" | "bpjs" => Some(AgentMode::Billing),
            "operational" | "operasional" | "jadwal" => Some(AgentMode::Operational),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AgentMode::Coordinator => "coordinator",
            AgentMode::Clinical => "clinical",
            AgentMode::Billing => "billing",
            AgentMode::Operational => "operational",
        }
    }

    pub fn profile(&self) -> AgentProfile {
        profile(*self)
    }
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accent palette used for the mode header and prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Slate,
    Emerald,
    Blue,
    Amber,
}

impl Accent {
    pub fn color(&self) -> Color {
        match self {
            Accent::Slate => Color::Color256(245),
            Accent::Emerald => Color::Color256(35),
            Accent::Blue => Color::Color256(33),
            Accent::Amber => Color::Color256(214),
        }
    }
}

/// Static presentation and conditioning data for one mode.
#[derive(Debug, Clone, Copy)]
pub struct AgentProfile {
    pub mode: AgentMode,
    /// Header label, also used in the mode-switch divider.
    pub label: &'static str,
    pub nav_title: &'static str,
    pub nav_subtitle: &'static str,
    pub accent: Accent,
    pub status_line: &'static str,
    pub placeholder: &'static str,
    pub attach_hint: &'static str,
    pub system_instruction: &'static str,
}

const GENERAL_PLACEHOLDER: &str = "Bagaimana saya dapat membantu operasional rumah sakit hari ini?";
const GENERAL_ATTACH_HINT: &str = "Upload Lampiran";

/// Total lookup from mode to profile; the match keeps every mode covered.
pub fn profile(mode: AgentMode) -> AgentProfile {
    match mode {
        AgentMode::Coordinator => AgentProfile {
            mode,
            label: "Pusat Komando & Perutean",
            nav_title: "Koordinator",
            nav_subtitle: "Pusat & Routing",
            accent: Accent::Slate,
            status_line: "Sistem Aktif",
            placeholder: GENERAL_PLACEHOLDER,
            attach_hint: GENERAL_ATTACH_HINT,
            system_instruction: prompts::COORDINATOR,
        },
        AgentMode::Clinical => AgentProfile {
            mode,
            label: "Rekam Medis & AI Diagnosis",
            nav_title: "Rekam Medis (RME)",
            nav_subtitle: "Diagnosis AI & Data",
            accent: Accent::Emerald,
            status_line: "Mode Aman: Enkripsi E2E Aktif",
            placeholder: "Masukkan catatan klinis atau tanyakan hasil analisis gambar...",
            attach_hint: "Upload Gambar Medis (X-Ray/Lab)",
            system_instruction: prompts::CLINICAL,
        },
        AgentMode::Billing => AgentProfile {
            mode,
            label: "Penagihan, BLU & BPJS",
            nav_title: "Keuangan (BLU)",
            nav_subtitle: "Tagihan & BPJS",
            accent: Accent::Blue,
            status_line: "Koneksi: Cloud SQL Keuangan",
            placeholder: "Tanyakan status klaim, CRR, atau draf laporan keuangan...",
            attach_hint: GENERAL_ATTACH_HINT,
            system_instruction: prompts::BILLING,
        },
        AgentMode::Operational => AgentProfile {
            mode,
            label: "Jadwal & Operasional RS",
            nav_title: "Operasional",
            nav_subtitle: "Jadwal & Logistik",
            accent: Accent::Amber,
            status_line: "Sistem Aktif",
            placeholder: GENERAL_PLACEHOLDER,
            attach_hint: GENERAL_ATTACH_HINT,
            system_instruction: prompts::OPERATIONAL,
        },
    }
}
