//! Notification delivery.

use std::io::Write;

use crate::error::Result;
use crate::models::Notification;
use crate::services::ChatSender;

/// What happened to a run's notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Written to the output stream
    Printed,
    /// Posted to the chat
    Sent,
    /// Chat delivery requested but there were no reports
    Suppressed,
    /// Chat delivery attempted and failed
    Failed(String),
}

/// Print the notification, or send it when chat delivery is enabled.
///
/// Chat delivery happens only when the notification carries at least one
/// report. A failed delivery is logged and returned as an outcome; by this
/// point the state files are already updated, so the run still completes.
pub async fn dispatch<W: Write>(
    notification: &Notification,
    telegram: bool,
    sender: &dyn ChatSender,
    out: &mut W,
) -> Result<DispatchOutcome> {
    if !telegram {
        writeln!(out, "{}", notification.message)?;
        return Ok(DispatchOutcome::Printed);
    }

    if !notification.has_reports() {
        log::info!("No new reports, nothing sent");
        return Ok(DispatchOutcome::Suppressed);
    }

    match sender.send(&notification.message).await {
        Ok(()) => {
            log::info!("Sent {} report(s) to Telegram", notification.report_count);
            Ok(DispatchOutcome::Sent)
        }
        Err(e) => {
            log::warn!("Telegram delivery failed: {}", e);
            Ok(DispatchOutcome::Failed(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatSender for RecordingSender {
        async fn send(&self, message: &str) -> Result<()> {
            self.sent.lock().unwrap().push(message.to_string());
            if self.fail {
                Err(AppError::delivery("chat not found"))
            } else {
                Ok(())
            }
        }
    }

    fn notification(report_count: usize) -> Notification {
        Notification {
            message: "\u{1F691} Sun 18 October 2026, 14:00:00 - Ambulance\nA1 Dam\n".to_string(),
            report_count,
        }
    }

    #[tokio::test]
    async fn test_prints_without_telegram() {
        let sender = RecordingSender::default();
        let mut out: Vec<u8> = Vec::new();

        let outcome = dispatch(&notification(1), false, &sender, &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Printed);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", notification(1).message)
        );
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sends_when_reports_found() {
        let sender = RecordingSender::default();
        let mut out: Vec<u8> = Vec::new();

        let outcome = dispatch(&notification(2), true, &sender, &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(sender.sent.lock().unwrap().len(), 1);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_suppresses_without_reports() {
        let sender = RecordingSender::default();
        let mut out: Vec<u8> = Vec::new();

        let outcome = dispatch(&notification(0), true, &sender, &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Suppressed);
        assert!(sender.sent.lock().unwrap().is_empty());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_not_fatal() {
        let sender = RecordingSender {
            fail: true,
            ..RecordingSender::default()
        };
        let mut out: Vec<u8> = Vec::new();

        let outcome = dispatch(&notification(1), true, &sender, &mut out)
            .await
            .unwrap();

        assert!(
            matches!(outcome, DispatchOutcome::Failed(ref msg) if msg.contains("chat not found"))
        );
    }
}
