//! Prompt templates and request composition for AI features
//!
//! The categorization, action-item and auto-reply templates are user-editable
//! and live in the prompt store. The chat templates below are fixed.

use crate::mail::EmailRecord;

/// Wrap content as the user message of a request
pub fn wrap_email_content(body: &str) -> String {
    format!("EMAIL CONTENT:\n{body}\n\nNow follow the above instructions.")
}

/// System prompt for questions about a single email
pub fn email_agent_instruction(body: &str, question: &str) -> String {
    format!(
        r#"You are an advanced, context-aware Email Intelligence Assistant.

Your goals:
- Understand the sender’s intent
- Explain tone, urgency, meaning
- Identify risks or spam signals
- Extract tasks when asked
- Give human-quality reasoning
- Avoid JSON unless user asks
- Provide intelligent, descriptive answers

EMAIL:
{body}

QUESTION:
{question}

Respond with the clearest, most helpful explanation."#
    )
}

/// System prompt for questions about every processed email
pub fn inbox_agent_instruction(question: &str, digest: &str) -> String {
    format!(
        r#"You are an Inbox Analysis Assistant.

User question:
{question}

All emails:
{digest}

Give helpful, smart insights about the entire inbox."#
    )
}

/// System prompt wrapping the user's auto-reply rule
pub fn draft_reply_instruction(rule: &str, body: &str) -> String {
    format!("Write a polite, concise reply using this rule:\n{rule}\n\nEmail:\n{body}")
}

/// Subject line for a reply to `subject`
pub fn reply_subject(subject: &str) -> String {
    format!("Re: {}", subject)
}

/// Aggregate emails into the text block used by inbox-wide questions
pub fn inbox_digest<'a>(emails: impl IntoIterator<Item = &'a EmailRecord>) -> String {
    emails
        .into_iter()
        .map(|e| {
            format!(
                "\nSUBJECT: {}\nFROM: {}\nBODY: {}\n\n",
                e.subject, e.sender, e.body
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(subject: &str, sender: &str, body: &str) -> EmailRecord {
        EmailRecord {
            sender: sender.to_string(),
            subject: subject.to_string(),
            timestamp: "2025-01-15 09:30".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_wrap_email_content() {
        assert_eq!(
            wrap_email_content("Hi team"),
            "EMAIL CONTENT:\nHi team\n\nNow follow the above instructions."
        );
    }

    #[test]
    fn test_email_agent_instruction_embeds_body_and_question() {
        let prompt = email_agent_instruction("Please send the report.", "Is this urgent?");
        assert!(prompt.starts_with("You are an advanced, context-aware Email Intelligence"));
        assert!(prompt.contains("EMAIL:\nPlease send the report.\n\nQUESTION:\nIs this urgent?"));
        assert!(prompt.contains("- Understand the sender\u{2019}s intent\n"));
    }

    #[test]
    fn test_inbox_agent_instruction() {
        let prompt = inbox_agent_instruction("What needs a reply?", "DIGEST");
        assert!(prompt.contains("User question:\nWhat needs a reply?"));
        assert!(prompt.contains("All emails:\nDIGEST"));
    }

    #[test]
    fn test_draft_reply_instruction() {
        let prompt = draft_reply_instruction("Always thank the sender.", "Can we meet?");
        assert_eq!(
            prompt,
            "Write a polite, concise reply using this rule:\nAlways thank the sender.\n\nEmail:\nCan we meet?"
        );
    }

    #[test]
    fn test_placeholders_in_user_text_are_left_alone() {
        let prompt = email_agent_instruction("Reply to {question} please", "what is {body}?");
        assert!(prompt.contains("EMAIL:\nReply to {question} please\n"));
        assert!(prompt.contains("QUESTION:\nwhat is {body}?\n"));
    }

    #[test]
    fn test_inbox_digest_preserves_order() {
        let emails = [
            email("Standup", "alice@example.com", "At 10."),
            email("Invoice", "billing@example.com", "Due Friday."),
        ];
        let digest = inbox_digest(&emails);
        assert_eq!(
            digest,
            "\nSUBJECT: Standup\nFROM: alice@example.com\nBODY: At 10.\n\n\
             \nSUBJECT: Invoice\nFROM: billing@example.com\nBODY: Due Friday.\n\n"
        );
    }

    #[test]
    fn test_reply_subject() {
        assert_eq!(reply_subject("Budget"), "Re: Budget");
    }
}
