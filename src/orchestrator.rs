use crate::agents::AgentMode;
use crate::attachment::{self, IMAGE_MIME_TYPE};
use crate::completion::{CompletionClient, CompletionReply, FAILURE_REPLY};
use crate::core::error::SiakError;
use crate::session::{Attachment, Message, PendingAttachment, Session};
use std::path::Path;
use tracing::{info, warn};

pub const CANCELLED_REPLY: &str = "_Permintaan dibatalkan._";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingCompletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Blank text and nothing attached.
    Empty,
    /// A completion is already in flight.
    Busy,
}

/// Snapshot of what a submit sends to the Completion Client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionTicket {
    pub mode: AgentMode,
    pub text: String,
    pub image: Option<String>,
}

impl CompletionTicket {
    /// Runs the round trip on a client handle, detached from the session.
    pub async fn run(self, client: CompletionClient) -> CompletionReply {
        client
            .complete(self.mode, &self.text, self.image.as_deref())
            .await
    }
}

/// Drives the session: submit, mode switch, clear, attach.
pub struct Orchestrator {
    session: Session,
    client: CompletionClient,
}

impl Orchestrator {
    pub fn new(session: Session, client: CompletionClient) -> Self {
        Self { session, client }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    pub fn phase(&self) -> Phase {
        if self.session.is_busy() {
            Phase::AwaitingCompletion
        } else {
            Phase::Idle
        }
    }

    pub fn active_mode(&self) -> AgentMode {
        self.session.active_mode
    }

    /// Idle -> AwaitingCompletion. Appends the user turn right away and
    /// empties the pending slot.
    pub fn begin_submit(&mut self, text: &str) -> Result<CompletionTicket, SubmitRejected> {
        if self.session.is_busy() {
            return Err(SubmitRejected::Busy);
        }
        if text.trim().is_empty() && self.session.pending_attachment.is_none() {
            return Err(SubmitRejected::Empty);
        }

        let pending = self.session.pending_attachment.take();
        let image = pending.map(|p| p.data);
        let attachment = image.as_ref().map(|data| Attachment::Image {
            mime_type: IMAGE_MIME_TYPE.to_string(),
            data: data.clone(),
        });

        self.session.push(Message::user(text, attachment));
        self.session.set_busy(true);

        Ok(CompletionTicket {
            mode: self.session.active_mode,
            text: text.to_string(),
            image,
        })
    }

    /// AwaitingCompletion -> Idle with whatever the client resolved to.
    pub fn complete_submit(&mut self, reply: CompletionReply) -> &Message {
        self.session.set_busy(false);
        let message = if reply.is_answer() {
            Message::model(reply.text)
        } else {
            Message::fallback(reply.text)
        };
        self.session.push(message)
    }

    /// AwaitingCompletion -> Idle when the round trip itself was lost.
    pub fn fail_submit(&mut self, reason: &str) -> &Message {
        warn!(reason, "completion task did not resolve");
        self.session.set_busy(false);
        self.session.push(Message::fallback(FAILURE_REPLY))
    }

    /// AwaitingCompletion -> Idle after the user aborted the request.
    pub fn cancel_submit(&mut self) -> Option<&Message> {
        if !self.session.is_busy() {
            return None;
        }
        info!("in-flight completion cancelled");
        self.session.set_busy(false);
        Some(self.session.push(Message::fallback(CANCELLED_REPLY)))
    }

    /// Full round trip on the current task.
    pub async fn submit(&mut self, text: &str) -> Result<&Message, SubmitRejected> {
        let ticket = self.begin_submit(text)?;
        let reply = ticket.run(self.client.clone()).await;
        Ok(self.complete_submit(reply))
    }

    /// Legal in any phase; never cancels an in-flight completion.
    pub fn switch_mode(&mut self, mode: AgentMode) -> &Message {
        info!(from = %self.session.active_mode, to = %mode, "switching agent mode");
        self.session.active_mode = mode;
        self.session.push(Message::divider(divider_text(mode)))
    }

    /// Empties the log; the busy flag is left alone.
    pub fn clear_history(&mut self) {
        info!(cleared = self.session.messages().len(), "clearing conversation history");
        self.session.clear_messages();
    }

    /// Encodes `path` into the pending slot, replacing any previous image.
    /// On failure the slot is left empty so a text send is never blocked.
    pub fn attach(&mut self, path: &Path) -> Result<&PendingAttachment, SiakError> {
        match attachment::encode(path) {
            Ok(encoded) => Ok(self.session.pending_attachment.insert(encoded)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "dropping unreadable attachment");
                self.session.pending_attachment = None;
                Err(e)
            }
        }
    }

    pub fn detach(&mut self) -> Option<PendingAttachment> {
        self.session.pending_attachment.take()
    }
}

pub fn divider_text(mode: AgentMode) -> String {
    format!("_Beralih ke mode: **{}**_", mode.profile().label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ModelCatalog;
    use crate::agents::models::DEFAULT_VISION_MODEL;
    use crate::completion::{EMPTY_REPLY, MISSING_CREDENTIAL_REPLY};
    use crate::providers::mock::{Scripted, ScriptedProvider};
    use crate::session::{MessageKind, Role};
    use std::sync::Arc;

    fn orchestrator(provider: Arc<ScriptedProvider>) -> Orchestrator {
        let client = CompletionClient::new(provider, ModelCatalog::default(), 0.4);
        Orchestrator::new(Session::new(AgentMode::Coordinator), client)
    }

    fn offline() -> Orchestrator {
        let client = CompletionClient::without_credential(ModelCatalog::default(), 0.4);
        Orchestrator::new(Session::with_welcome(AgentMode::Coordinator), client)
    }

    #[tokio::test]
    async fn blank_submit_without_attachment_is_a_no_op() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut orch = orchestrator(provider.clone());

        assert_eq!(orch.submit("   ").await.err(), Some(SubmitRejected::Empty));
        assert!(orch.session().messages().is_empty());
        assert_eq!(orch.phase(), Phase::Idle);
        assert!(provider.requests().is_empty());
    }

    #[test]
    fn submit_while_awaiting_is_rejected() {
        let mut orch = orchestrator(Arc::new(ScriptedProvider::default()));
        orch.begin_submit("pertama").unwrap();
        assert_eq!(orch.phase(), Phase::AwaitingCompletion);

        assert_eq!(orch.begin_submit("kedua"), Err(SubmitRejected::Busy));
        assert_eq!(orch.session().messages().len(), 1);
    }

    #[tokio::test]
    async fn successful_submit_appends_user_then_model() {
        let mut orch = orchestrator(Arc::new(ScriptedProvider::replying("Silakan ke mode Klinis.")));
        orch.switch_mode(AgentMode::Coordinator);
        let before = orch.session().messages().len();

        let reply = orch.submit("saya batuk").await.unwrap();
        assert_eq!(reply.text, "Silakan ke mode Klinis.");

        let messages = orch.session().messages();
        assert_eq!(messages.len(), before + 2);
        assert_eq!(messages[before].role, Role::User);
        assert_eq!(messages[before].text, "saya batuk");
        assert_eq!(messages[before + 1].role, Role::Model);
        assert_eq!(messages[before + 1].kind, MessageKind::Turn);
        assert!(!orch.session().is_busy());
    }

    #[tokio::test]
    async fn provider_failure_appends_fixed_string() {
        let provider = Arc::new(ScriptedProvider::new([Scripted::Fail("503".to_string())]));
        let mut orch = orchestrator(provider);

        let reply = orch.submit("halo").await.unwrap();
        assert_eq!(reply.text, FAILURE_REPLY);
        assert_eq!(reply.kind, MessageKind::Fallback);
        assert_eq!(orch.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn empty_provider_reply_appends_apology() {
        let mut orch = orchestrator(Arc::new(ScriptedProvider::new([Scripted::Empty])));
        let reply = orch.submit("halo").await.unwrap();
        assert_eq!(reply.text, EMPTY_REPLY);
    }

    #[test]
    fn lost_task_resolves_to_failure_message() {
        let mut orch = orchestrator(Arc::new(ScriptedProvider::default()));
        orch.begin_submit("halo").unwrap();
        let message = orch.fail_submit("task panicked");
        assert_eq!(message.text, FAILURE_REPLY);
        assert!(!orch.session().is_busy());
    }

    #[test]
    fn cancel_only_applies_while_awaiting() {
        let mut orch = orchestrator(Arc::new(ScriptedProvider::default()));
        assert!(orch.cancel_submit().is_none());

        orch.begin_submit("halo").unwrap();
        let message = orch.cancel_submit().unwrap();
        assert_eq!(message.text, CANCELLED_REPLY);
        assert_eq!(orch.phase(), Phase::Idle);
        assert_eq!(orch.session().messages().len(), 2);
    }

    #[test]
    fn mode_switch_appends_one_divider_in_any_phase() {
        let mut orch = orchestrator(Arc::new(ScriptedProvider::default()));

        for mode in AgentMode::ALL {
            let before = orch.session().messages().len();
            let divider = orch.switch_mode(mode);
            assert_eq!(divider.kind, MessageKind::Divider);
            assert!(divider.text.contains(mode.profile().label));
            assert_eq!(orch.session().messages().len(), before + 1);
            assert_eq!(orch.active_mode(), mode);
        }

        orch.begin_submit("masih menunggu").unwrap();
        orch.switch_mode(AgentMode::Billing);
        assert_eq!(orch.phase(), Phase::AwaitingCompletion);
        assert_eq!(
            orch.session().last_message().map(|m| m.text.clone()),
            Some("_Beralih ke mode: **Penagihan, BLU & BPJS**_".to_string())
        );
    }

    #[test]
    fn clear_history_empties_log_and_keeps_busy() {
        let mut orch = offline();
        orch.switch_mode(AgentMode::Clinical);
        orch.begin_submit("halo").unwrap();

        orch.clear_history();
        assert!(orch.session().messages().is_empty());
        assert!(orch.session().is_busy());

        orch.clear_history();
        assert!(orch.session().messages().is_empty());
    }

    #[tokio::test]
    async fn clinical_xray_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xray.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let provider = Arc::new(ScriptedProvider::replying("Kesan: paru dalam batas normal."));
        let mut orch = orchestrator(provider.clone());
        orch.switch_mode(AgentMode::Clinical);
        assert_eq!(orch.attach(&path).unwrap().filename, "xray.png");

        let before = orch.session().messages().len();
        orch.submit("cek hasil ini").await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, DEFAULT_VISION_MODEL);
        assert_eq!(requests[0].image_count(), 1);
        assert_eq!(requests[0].parts.len(), 2);

        let messages = orch.session().messages();
        assert_eq!(messages.len(), before + 2);
        assert!(messages[before].has_image());
        let models: Vec<_> = messages[before..]
            .iter()
            .filter(|m| m.role == Role::Model)
            .collect();
        assert_eq!(models.len(), 1);
        assert!(models[0].text.contains("paru dalam batas normal"));
        assert!(orch.session().pending_attachment.is_none());
    }

    #[tokio::test]
    async fn attachment_alone_is_enough_to_submit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.jpg");
        std::fs::write(&path, b"jpeg").unwrap();

        let mut orch = orchestrator(Arc::new(ScriptedProvider::replying("ok")));
        orch.attach(&path).unwrap();
        assert!(orch.submit("").await.is_ok());
    }

    #[test]
    fn new_attachment_overwrites_and_failed_one_clears_slot() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.png");
        let second = dir.path().join("b.png");
        std::fs::write(&first, b"a").unwrap();
        std::fs::write(&second, b"b").unwrap();

        let mut orch = offline();
        orch.attach(&first).unwrap();
        orch.attach(&second).unwrap();
        assert_eq!(
            orch.session().pending_attachment.as_ref().map(|a| a.filename.as_str()),
            Some("b.png")
        );

        assert!(orch.attach(&dir.path().join("missing.png")).is_err());
        assert!(orch.session().pending_attachment.is_none());
        assert!(orch.detach().is_none());
    }

    #[tokio::test]
    async fn missing_credential_scenario() {
        let mut orch = offline();
        let reply = orch.submit("halo").await.unwrap();
        assert_eq!(reply.text, MISSING_CREDENTIAL_REPLY);
        assert!(!orch.session().is_busy());
        assert_eq!(orch.session().messages().len(), 3);
    }
}
