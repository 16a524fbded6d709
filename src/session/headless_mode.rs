//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::{Event, StateUpdate};
use crate::view::PortfolioStats;
use crate::view::format::format_whole;
use std::error::Error;

/// Tracks the newest applied customer fetch so stale results are not summarized.
#[derive(Debug, Default)]
struct SummaryTracker {
    applied_seq: u64,
}

impl SummaryTracker {
    /// The summary line for `event`, if it carries a fresh customer list.
    fn summarize(&mut self, event: &Event) -> Option<String> {
        match &event.update {
            Some(StateUpdate::CustomersLoaded { seq, customers }) if *seq > self.applied_seq => {
                self.applied_seq = *seq;
                let stats = PortfolioStats::from_customers(customers);
                Some(format!(
                    "Customers: {} | Total debt: ${} | Recovered: ${}",
                    stats.customer_count,
                    format_whole(stats.total_debt),
                    format_whole(stats.recovered)
                ))
            }
            _ => None,
        }
    }
}

/// Runs the dashboard in headless mode
///
/// Worker events are printed to the console, followed by a portfolio summary
/// after every customer refresh. Ctrl+C stops the session.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    let api_url = session.environment().api_url();
    print_session_starting("headless", &api_url);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    let mut tracker = SummaryTracker::default();

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
                if let Some(summary) = tracker.summarize(&event) {
                    println!("{}", summary);
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;
    use crate::logging::LogLevel;
    use crate::models::{Customer, CustomerStatus};
    use crate::view::rows::tests::customer;

    fn loaded(seq: u64, customers: Vec<Customer>) -> Event {
        Event::refresher_with_level("Loaded".into(), EventType::Success, LogLevel::Info)
            .with_update(StateUpdate::CustomersLoaded { seq, customers })
    }

    #[test]
    fn test_summary_uses_whole_dollars() {
        let mut tracker = SummaryTracker::default();
        let event = loaded(
            1,
            vec![
                customer("1", "1200.50", CustomerStatus::PromisedToPay),
                customer("2", "300", CustomerStatus::Active),
            ],
        );
        assert_eq!(
            tracker.summarize(&event).as_deref(),
            Some("Customers: 2 | Total debt: $1,501 | Recovered: $1,201")
        );
    }

    #[test]
    fn test_stale_results_are_not_summarized() {
        let mut tracker = SummaryTracker::default();
        assert!(tracker.summarize(&loaded(2, vec![])).is_some());
        assert!(tracker.summarize(&loaded(1, vec![])).is_none());
        assert!(tracker.summarize(&loaded(3, vec![])).is_some());
    }
}
