//! Update handling
//!
//! Runs one [`InboundEvent`] against the routing engine and answers the
//! sender. Routing errors end here: they become messages and log lines,
//! never a failed update loop.

use crate::output::{messages, report};
use crate::telegram::inbound::{Command, InboundEvent, Sender};
use consult_application::{
    OutboundMessage, Recipient, RoutingEngine, RoutingError, SubmitQuestionInput, Transport,
};
use consult_domain::{ConsultantId, ConversationState, RepliedMessage, ReplyContext, UserId};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct UpdateHandler {
    engine: Arc<RoutingEngine>,
    transport: Arc<dyn Transport>,
}

impl UpdateHandler {
    pub fn new(engine: Arc<RoutingEngine>, transport: Arc<dyn Transport>) -> Self {
        Self { engine, transport }
    }

    pub async fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::Command {
                sender,
                command: Command::Start,
            } => self.on_start(sender).await,
            InboundEvent::Command {
                sender,
                command: Command::Ask,
            }
            | InboundEvent::AskButton { sender } => self.on_ask(sender).await,
            InboundEvent::Command {
                sender,
                command: Command::Stats,
            } => self.on_stats(sender).await,
            InboundEvent::Text {
                sender,
                text,
                replied_to,
            } => {
                if self.engine.config().is_consultant(sender.id) {
                    self.on_consultant_text(sender, text, replied_to).await;
                } else {
                    self.on_user_text(sender, text).await;
                }
            }
        }
    }

    /// Where answers to `sender` go.
    fn recipient(&self, sender: &Sender) -> Recipient {
        if self.engine.config().is_consultant(sender.id) {
            Recipient::Consultant(ConsultantId::new(sender.id))
        } else {
            Recipient::User(UserId::new(sender.id))
        }
    }

    async fn send(&self, recipient: Recipient, message: OutboundMessage) {
        if let Err(e) = self.transport.deliver(recipient, &message).await {
            warn!(%recipient, error = %e, "could not answer sender");
        }
    }

    async fn send_all(&self, recipient: Recipient, messages: Vec<OutboundMessage>) {
        for message in messages {
            self.send(recipient, message).await;
        }
    }

    async fn on_start(&self, sender: Sender) {
        let config = self.engine.config();
        let to = self.recipient(&sender);
        if config.is_owner(sender.id) {
            self.send(to, OutboundMessage::html(&config.messages.owner_greeting))
                .await;
            return;
        }
        if config.is_consultant(sender.id) {
            self.send(to, OutboundMessage::html(&config.messages.consultant_greeting))
                .await;
            return;
        }

        match self.engine.start(UserId::new(sender.id)).await {
            Ok(outcome) => {
                self.send_all(to, messages::start(&config.messages, &outcome))
                    .await
            }
            Err(e) => self.user_failed(to, &e).await,
        }
    }

    async fn on_ask(&self, sender: Sender) {
        let config = self.engine.config();
        let to = self.recipient(&sender);
        if config.is_consultant(sender.id) {
            self.send(to, OutboundMessage::html(&config.messages.consultant_greeting))
                .await;
            return;
        }

        match self.engine.request_question(UserId::new(sender.id)).await {
            Ok(()) => {
                self.send(to, OutboundMessage::html(&config.messages.ask_question))
                    .await
            }
            Err(e) => self.user_failed(to, &e).await,
        }
    }

    async fn on_stats(&self, sender: Sender) {
        let config = self.engine.config();
        if !config.is_owner(sender.id) {
            debug!(chat_id = sender.id, "ignoring /stats from non-owner");
            return;
        }
        let to = self.recipient(&sender);
        match self.engine.consultant_report().await {
            Ok(consultants) => {
                let html = report::stats_html(
                    &consultants,
                    &config.messages.stats_header,
                    &config.messages.stats_empty,
                );
                self.send(to, OutboundMessage::html(html)).await;
            }
            Err(e) => self.user_failed(to, &e).await,
        }
    }

    async fn on_user_text(&self, sender: Sender, text: String) {
        let config = self.engine.config();
        let user = UserId::new(sender.id);
        let to = self.recipient(&sender);

        match self.engine.session(user) {
            ConversationState::AwaitingQuestion => {
                let input = SubmitQuestionInput::new(user, text).with_sender(sender.meta);
                match self.engine.submit_question(input).await {
                    Ok(outcome) => {
                        self.send_all(to, messages::dispatched(&config.messages, &outcome))
                            .await
                    }
                    Err(e) => self.user_failed(to, &e).await,
                }
            }
            ConversationState::Idle => {
                debug!(user_id = %user, "ignoring text outside a dialogue");
            }
            _ => match self.engine.onboard(user, &text).await {
                Ok(step) => {
                    if let Some(prompt) = messages::onboarding(&config.messages, &step) {
                        self.send(to, prompt).await;
                    }
                }
                Err(e) => self.user_failed(to, &e).await,
            },
        }
    }

    async fn on_consultant_text(
        &self,
        sender: Sender,
        text: String,
        replied_to: Option<RepliedMessage>,
    ) {
        if replied_to.is_none() {
            debug!(consultant_id = sender.id, "ignoring consultant message that is not a reply");
            return;
        }
        let config = self.engine.config();
        let consultant = ConsultantId::new(sender.id);
        let to = Recipient::Consultant(consultant);
        let context = ReplyContext {
            consultant,
            sender: sender.meta,
            text,
            replied_to,
        };

        match self.engine.submit_reply(context).await {
            Ok(_) => {
                self.send(to, OutboundMessage::html(&config.messages.reply_sent))
                    .await
            }
            Err(e) => {
                if let RoutingError::Store(ref source) = e {
                    error!(consultant_id = %consultant, error = %source, "reply failed");
                }
                self.send(to, messages::consultant_error(&config.messages, &e))
                    .await;
            }
        }
    }

    async fn user_failed(&self, to: Recipient, e: &RoutingError) {
        if e.is_user_facing() {
            debug!(%to, outcome = %e, "request blocked");
        } else {
            error!(%to, error = %e, "request failed");
        }
        self.send(to, messages::user_error(&self.engine.config().messages, e))
            .await;
    }
}
