//! The four AI actions, each a fixed composition of completion requests

use super::client::{CompletionClient, CompletionError};
use super::prompts;
use super::recover::recover;
use crate::mail::{Draft, EmailRecord, ProcessedResult};
use crate::store::PromptSet;

/// Categorize an email and extract its action items.
///
/// Two sequential requests; the first failure aborts without a result.
pub async fn process_email(
    client: &dyn CompletionClient,
    prompts: &PromptSet,
    email: &EmailRecord,
) -> Result<ProcessedResult, CompletionError> {
    let user_content = prompts::wrap_email_content(&email.body);

    let category = client
        .complete(&prompts.categorization_prompt, &user_content)
        .await?;
    let actions = client
        .complete(&prompts.action_item_prompt, &user_content)
        .await?;

    Ok(ProcessedResult {
        email: email.clone(),
        category: recover(&category),
        actions: recover(&actions),
    })
}

/// Free-form question about a single email
pub async fn ask_about_email(
    client: &dyn CompletionClient,
    email: &EmailRecord,
    question: &str,
) -> Result<String, CompletionError> {
    let system = prompts::email_agent_instruction(&email.body, question);
    client
        .complete(&system, &prompts::wrap_email_content(&email.body))
        .await
}

/// Free-form question about an aggregate of processed emails
pub async fn ask_inbox(
    client: &dyn CompletionClient,
    question: &str,
    digest: &str,
) -> Result<String, CompletionError> {
    let system = prompts::inbox_agent_instruction(question, digest);
    client
        .complete(&system, &prompts::wrap_email_content(digest))
        .await
}

/// Write a reply to `email` following the user's auto-reply rule
pub async fn draft_reply(
    client: &dyn CompletionClient,
    rule: &str,
    email: &EmailRecord,
) -> Result<Draft, CompletionError> {
    let system = prompts::draft_reply_instruction(rule, &email.body);
    let body = client
        .complete(&system, &prompts::wrap_email_content(&email.body))
        .await?;

    Ok(Draft {
        subject: prompts::reply_subject(&email.subject),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::client::mock::ScriptedClient;
    use crate::ai::RecoveredValue;
    use crate::mail::ActionItems;
    use serde_json::json;

    fn email() -> EmailRecord {
        EmailRecord {
            sender: "ops@example.com".to_string(),
            subject: "Server migration".to_string(),
            timestamp: "2025-01-15 08:00".to_string(),
            body: "Please confirm the maintenance window by Thursday.".to_string(),
        }
    }

    fn prompts() -> PromptSet {
        PromptSet {
            categorization_prompt: "CATEGORIZE".to_string(),
            action_item_prompt: "ACTIONS".to_string(),
            auto_reply_prompt: "Accept politely.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_process_email_recovers_both_replies() {
        let client = ScriptedClient::replying(&[
            "Sure! {\"category\": \"To-Do\"} Hope that helps.",
            "```json\n[{\"task\": \"Confirm window\", \"deadline\": \"Thursday\"}]\n```",
        ]);

        let result = process_email(&client, &prompts(), &email()).await.unwrap();

        assert_eq!(
            result.category,
            RecoveredValue::Parsed(json!({ "category": "To-Do" }))
        );
        let ActionItems::List(items) = result.action_items() else {
            panic!("expected list");
        };
        assert_eq!(items[0].task.as_deref(), Some("Confirm window"));

        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "CATEGORIZE");
        assert_eq!(calls[1].0, "ACTIONS");
        assert_eq!(
            calls[0].1,
            "EMAIL CONTENT:\nPlease confirm the maintenance window by Thursday.\n\nNow follow the above instructions."
        );
    }

    #[tokio::test]
    async fn test_process_email_keeps_unparseable_reply() {
        let client = ScriptedClient::replying(&["Important", "nothing to do"]);
        let result = process_email(&client, &prompts(), &email()).await.unwrap();

        assert!(!result.category.is_parsed());
        assert_eq!(result.category.display_text(), "Important");
        assert_eq!(
            result.action_items(),
            ActionItems::Raw("nothing to do".to_string())
        );
    }

    #[tokio::test]
    async fn test_process_email_stops_on_first_failure() {
        let client = ScriptedClient::new(vec![Err(CompletionError::Api {
            status: 500,
            message: "boom".to_string(),
        })]);

        let err = process_email(&client, &prompts(), &email())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_ask_about_email_composition() {
        let client = ScriptedClient::replying(&["It is urgent."]);
        let answer = ask_about_email(&client, &email(), "How urgent is this?")
            .await
            .unwrap();

        assert_eq!(answer, "It is urgent.");
        let (system, user) = &client.calls()[0];
        assert!(system.contains("EMAIL:\nPlease confirm the maintenance window"));
        assert!(system.contains("QUESTION:\nHow urgent is this?"));
        assert!(user.starts_with("EMAIL CONTENT:\n"));
    }

    #[tokio::test]
    async fn test_ask_inbox_wraps_digest() {
        let client = ScriptedClient::replying(&["Two meetings."]);
        let digest = prompts::inbox_digest([&email()]);
        ask_inbox(&client, "What is pending?", &digest).await.unwrap();

        let (system, user) = &client.calls()[0];
        assert!(system.contains("Inbox Analysis Assistant"));
        assert!(system.contains("SUBJECT: Server migration"));
        assert_eq!(user, &prompts::wrap_email_content(&digest));
    }

    #[tokio::test]
    async fn test_draft_reply_subject_and_rule() {
        let client = ScriptedClient::replying(&["Confirmed, thanks."]);
        let draft = draft_reply(&client, "Accept politely.", &email())
            .await
            .unwrap();

        assert_eq!(draft.subject, "Re: Server migration");
        assert_eq!(draft.body, "Confirmed, thanks.");
        assert!(
            client.calls()[0]
                .0
                .starts_with("Write a polite, concise reply using this rule:\nAccept politely.")
        );
    }
}
