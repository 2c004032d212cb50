//! AI actor for async processing of AI requests

use std::sync::Arc;
use tokio::sync::mpsc;

use super::client::CompletionClient;
use super::tasks;
use crate::constants::{AI_COMMAND_CHANNEL_SIZE, AI_EVENT_CHANNEL_SIZE};
use crate::mail::{Draft, EmailRecord, ProcessedResult};
use crate::store::PromptSet;

/// Commands that can be sent to the AI actor
#[derive(Debug)]
pub enum AiCommand {
    /// Categorize and extract action items for the email at `index`
    ProcessEmail {
        index: usize,
        email: EmailRecord,
        prompts: PromptSet,
    },
    /// Question about one processed email
    AskEmail { email: EmailRecord, question: String },
    /// Question about every processed email
    AskInbox { question: String, digest: String },
    /// Draft a reply using the auto-reply rule
    DraftReply { email: EmailRecord, rule: String },
    /// Shutdown the actor
    Shutdown,
}

/// Which action a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Process,
    Ask,
    Draft,
}

impl AiAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Process => "Processing",
            Self::Ask => "Agent",
            Self::Draft => "Drafting",
        }
    }
}

/// What an answer was about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerScope {
    Email { subject: String },
    Inbox,
}

/// Events emitted by the AI actor
#[derive(Debug, Clone)]
pub enum AiEvent {
    Processed {
        index: usize,
        result: ProcessedResult,
    },
    Answer {
        scope: AnswerScope,
        question: String,
        answer: String,
    },
    Drafted(Draft),
    Failed { action: AiAction, message: String },
}

/// Handle for communicating with the AI actor
pub struct AiActorHandle {
    pub cmd_tx: mpsc::Sender<AiCommand>,
    pub event_rx: mpsc::Receiver<AiEvent>,
}

/// Spawn the AI actor task
pub fn spawn_ai_actor(client: Arc<dyn CompletionClient>) -> AiActorHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(AI_COMMAND_CHANNEL_SIZE);
    let (event_tx, event_rx) = mpsc::channel(AI_EVENT_CHANNEL_SIZE);

    tokio::spawn(ai_actor_loop(client, cmd_rx, event_tx));

    AiActorHandle { cmd_tx, event_rx }
}

async fn ai_actor_loop(
    client: Arc<dyn CompletionClient>,
    mut cmd_rx: mpsc::Receiver<AiCommand>,
    event_tx: mpsc::Sender<AiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let event = match cmd {
            AiCommand::ProcessEmail {
                index,
                email,
                prompts,
            } => match tasks::process_email(client.as_ref(), &prompts, &email).await {
                Ok(result) => AiEvent::Processed { index, result },
                Err(e) => failed(AiAction::Process, e),
            },

            AiCommand::AskEmail { email, question } => {
                match tasks::ask_about_email(client.as_ref(), &email, &question).await {
                    Ok(answer) => AiEvent::Answer {
                        scope: AnswerScope::Email {
                            subject: email.subject,
                        },
                        question,
                        answer,
                    },
                    Err(e) => failed(AiAction::Ask, e),
                }
            }

            AiCommand::AskInbox { question, digest } => {
                match tasks::ask_inbox(client.as_ref(), &question, &digest).await {
                    Ok(answer) => AiEvent::Answer {
                        scope: AnswerScope::Inbox,
                        question,
                        answer,
                    },
                    Err(e) => failed(AiAction::Ask, e),
                }
            }

            AiCommand::DraftReply { email, rule } => {
                match tasks::draft_reply(client.as_ref(), &rule, &email).await {
                    Ok(draft) => AiEvent::Drafted(draft),
                    Err(e) => failed(AiAction::Draft, e),
                }
            }

            AiCommand::Shutdown => {
                break;
            }
        };

        if event_tx.send(event).await.is_err() {
            tracing::warn!("AI actor: event receiver dropped");
            break;
        }
    }
}

fn failed(action: AiAction, error: impl std::fmt::Display) -> AiEvent {
    tracing::warn!("{} failed: {}", action.label(), error);
    AiEvent::Failed {
        action,
        message: format!("AI Error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::client::mock::ScriptedClient;
    use crate::ai::CompletionError;

    fn email() -> EmailRecord {
        EmailRecord {
            sender: "hr@example.com".to_string(),
            subject: "Benefits enrollment".to_string(),
            timestamp: "2025-01-16 10:00".to_string(),
            body: "Enrollment closes Friday.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_commands_are_answered_in_order() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok("Reminder about Friday.".to_string()),
            Err(CompletionError::EmptyResponse),
        ]));
        let mut handle = spawn_ai_actor(client.clone());

        handle
            .cmd_tx
            .send(AiCommand::AskEmail {
                email: email(),
                question: "When does it close?".to_string(),
            })
            .await
            .unwrap();
        handle
            .cmd_tx
            .send(AiCommand::DraftReply {
                email: email(),
                rule: "Be brief.".to_string(),
            })
            .await
            .unwrap();

        match handle.event_rx.recv().await.unwrap() {
            AiEvent::Answer { scope, answer, .. } => {
                assert_eq!(
                    scope,
                    AnswerScope::Email {
                        subject: "Benefits enrollment".to_string()
                    }
                );
                assert_eq!(answer, "Reminder about Friday.");
            }
            other => panic!("unexpected event: {:?}", other),
        }

        match handle.event_rx.recv().await.unwrap() {
            AiEvent::Failed { action, message } => {
                assert_eq!(action, AiAction::Draft);
                assert_eq!(message, "AI Error: No response content from AI");
            }
            other => panic!("unexpected event: {:?}", other),
        }

        // No retry: exactly one request per command
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_shutdown_closes_event_channel() {
        let client = Arc::new(ScriptedClient::default());
        let mut handle = spawn_ai_actor(client);

        handle.cmd_tx.send(AiCommand::Shutdown).await.unwrap();
        assert!(handle.event_rx.recv().await.is_none());
    }
}
