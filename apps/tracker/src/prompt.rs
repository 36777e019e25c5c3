//! Terminal answers for pending intents.

use std::io::{self, BufRead, Write};

use tracker_core::{Confirmation, ConfirmedIntent, PendingIntent};

/// Walks every prompt of `pending`. Returns `None` as soon as one answer is
/// not a yes; `assume_yes` skips the questions entirely.
pub fn resolve_intent<R: BufRead, W: Write>(
    mut pending: PendingIntent,
    assume_yes: bool,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<ConfirmedIntent>> {
    loop {
        if !assume_yes && !ask(pending.prompt(), input, output)? {
            pending.abort();
            return Ok(None);
        }
        match pending.confirm() {
            Confirmation::Ready(confirmed) => return Ok(Some(confirmed)),
            Confirmation::Pending(next) => pending = next,
        }
    }
}

pub fn resolve_intent_on_terminal(
    pending: PendingIntent,
    assume_yes: bool,
) -> io::Result<Option<ConfirmedIntent>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    resolve_intent(pending, assume_yes, &mut input, &mut output)
}

fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, sync::Arc};

    use storage::MemoryStore;
    use tracker_core::{IntentAction, JobTracker};

    use super::*;

    async fn tracker() -> JobTracker {
        JobTracker::load(Arc::new(MemoryStore::new())).await
    }

    #[tokio::test]
    async fn clear_asks_both_questions() {
        let tracker = tracker().await;
        let mut input = Cursor::new("y\nyes\n");
        let mut output = Vec::new();

        let confirmed = resolve_intent(tracker.request_clear(), false, &mut input, &mut output)
            .expect("io")
            .expect("confirmed");
        assert_eq!(confirmed.action(), &IntentAction::ClearAll);

        let transcript = String::from_utf8(output).expect("utf8");
        assert!(transcript.contains("ALL job applications"));
        assert!(transcript.contains("absolutely sure"));
    }

    #[tokio::test]
    async fn second_refusal_aborts_clear() {
        let tracker = tracker().await;
        let mut input = Cursor::new("y\nn\n");
        let mut output = Vec::new();
        let result = resolve_intent(tracker.request_clear(), false, &mut input, &mut output)
            .expect("io");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn assume_yes_skips_prompts() {
        let tracker = tracker().await;
        let pending = tracker
            .request_delete(shared::domain::JobId(1))
            .expect("sample record");
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let result = resolve_intent(pending, true, &mut input, &mut output).expect("io");
        assert!(result.is_some());
        assert!(output.is_empty());
    }
}
