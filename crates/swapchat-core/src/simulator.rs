use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::SimulatorConfig;
use crate::models::Message;
use crate::service::MessagingService;
use crate::store::{unix_now, InboundMessage};

/// Fixed corpus of counterpart replies the generator draws from.
pub const CANNED_RESPONSES: [&str; 8] = [
    "That sounds perfect!",
    "Can you send me more photos?",
    "What time works best for you?",
    "I'm available this weekend",
    "The item looks great in the photos",
    "Let's meet at the coffee shop downtown",
    "Perfect! I'm excited for this swap",
    "Do you have any other items available?",
];

/// Development stand-in for a real inbound transport: a background task that
/// periodically injects a canned reply into a random conversation through the
/// same `receive_external` path a network listener would use. Swapping it for
/// a genuine listener changes nothing in the store or hub contracts.
pub struct InboundSimulator {
    shutdown: Arc<Notify>,
    stopped: AtomicBool,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl InboundSimulator {
    pub fn spawn(service: Arc<MessagingService>, config: SimulatorConfig) -> Self {
        Self::spawn_with_rng(service, config, StdRng::from_os_rng())
    }

    /// Seeded variant so tests drive cycles deterministically under paused
    /// tokio time.
    pub fn spawn_with_rng(
        service: Arc<MessagingService>,
        config: SimulatorConfig,
        mut rng: StdRng,
    ) -> Self {
        let shutdown = Arc::new(Notify::new());
        let stop = shutdown.clone();

        let handle = tokio::spawn(async move {
            let min = config.min_delay.as_millis() as u64;
            let max = config.max_delay.as_millis() as u64;
            loop {
                let delay = Duration::from_millis(rng.random_range(min..=max.max(min)));
                tokio::select! {
                    _ = stop.notified() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
                if rng.random_bool(config.message_probability) {
                    if let Some(message) = inject_random_message(&service, &mut rng) {
                        tracing::info!(
                            conversation_id = %message.conversation_id,
                            message_id = %message.id,
                            "simulated inbound message"
                        );
                    }
                }
            }
        });

        Self {
            shutdown,
            stopped: AtomicBool::new(false),
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Stop future cycles and cancel any in-flight wait. Safe to call
    /// repeatedly.
    pub fn shutdown(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        // notify_one stores a permit, so the task sees this even if it is
        // mid-injection rather than parked on the sleep.
        self.shutdown.notify_one();
    }

    /// Wait for the background task to finish. Call after [`shutdown`](Self::shutdown).
    pub async fn join(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

/// One injection: pick a conversation and a canned reply uniformly at random,
/// resolve the counterpart's profile name, and feed it through the external
/// receive path. Returns `None` when there is nothing to pick from - an empty
/// conversation set is a normal skipped cycle, not an error.
fn inject_random_message<R: Rng>(service: &MessagingService, rng: &mut R) -> Option<Message> {
    let conversations = service.conversations();
    if conversations.is_empty() {
        return None;
    }
    let conversation = &conversations[rng.random_range(0..conversations.len())];
    let content = CANNED_RESPONSES[rng.random_range(0..CANNED_RESPONSES.len())];

    let local_user = service.local_user_id();
    let sender_id = conversation.counterpart(&local_user)?.to_string();
    let sender_name = service
        .profile_name(&sender_id)
        .unwrap_or_else(|| sender_id.clone());

    let inbound = InboundMessage {
        sender_id,
        sender_name,
        content: content.to_string(),
        created_at: unix_now(),
    };
    service.receive_external(&conversation.id, inbound).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::models::MessageOrigin;

    fn always_firing(period: Duration) -> SimulatorConfig {
        SimulatorConfig {
            min_delay: period,
            max_delay: period,
            message_probability: 1.0,
        }
    }

    fn total_messages(service: &MessagingService) -> usize {
        service
            .conversations()
            .iter()
            .map(|c| service.messages(&c.id).len())
            .sum()
    }

    #[test]
    fn injection_uses_the_external_receive_path() {
        let service = MessagingService::with_fixtures(ServiceConfig::default());
        let mut rng = StdRng::seed_from_u64(7);

        let message = inject_random_message(&service, &mut rng).expect("fixtures are non-empty");
        assert_eq!(message.origin, MessageOrigin::External);
        assert!(CANNED_RESPONSES.contains(&message.content.as_str()));
        assert_ne!(message.sender_id, service.local_user_id());

        let conversation = service.conversation(&message.conversation_id).unwrap();
        assert_eq!(conversation.last_message, Some(message.clone()));
        assert!(conversation.unread_count >= 1);
    }

    #[test]
    fn injection_skips_an_empty_conversation_set() {
        let service = MessagingService::new(ServiceConfig::default());
        let mut rng = StdRng::seed_from_u64(7);
        assert!(inject_random_message(&service, &mut rng).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cycles_deliver_messages_over_time() {
        let service = Arc::new(MessagingService::with_fixtures(ServiceConfig::default()));
        let before = total_messages(&service);

        let simulator = InboundSimulator::spawn_with_rng(
            service.clone(),
            always_firing(Duration::from_secs(1)),
            StdRng::seed_from_u64(7),
        );

        tokio::time::sleep(Duration::from_secs(5)).await;
        simulator.shutdown();
        simulator.join().await;

        let after = total_messages(&service);
        assert!(after > before, "expected injected messages, got none");
    }

    #[tokio::test(start_paused = true)]
    async fn zero_probability_cycles_never_inject() {
        let service = Arc::new(MessagingService::with_fixtures(ServiceConfig::default()));
        let before = total_messages(&service);

        let simulator = InboundSimulator::spawn_with_rng(
            service.clone(),
            SimulatorConfig {
                min_delay: Duration::from_secs(1),
                max_delay: Duration::from_secs(1),
                message_probability: 0.0,
            },
            StdRng::seed_from_u64(7),
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        simulator.shutdown();
        simulator.join().await;

        // Every cycle elapsed but the probability gate suppressed them all.
        assert_eq!(total_messages(&service), before);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_set_cycles_are_harmless() {
        let service = Arc::new(MessagingService::new(ServiceConfig::default()));
        let simulator = InboundSimulator::spawn_with_rng(
            service.clone(),
            always_firing(Duration::from_secs(1)),
            StdRng::seed_from_u64(7),
        );

        tokio::time::sleep(Duration::from_secs(3)).await;
        simulator.shutdown();
        simulator.join().await;

        assert!(service.conversations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_is_idempotent_and_stops_injection() {
        let service = Arc::new(MessagingService::with_fixtures(ServiceConfig::default()));
        let simulator = InboundSimulator::spawn_with_rng(
            service.clone(),
            always_firing(Duration::from_secs(1)),
            StdRng::seed_from_u64(7),
        );

        tokio::time::sleep(Duration::from_millis(2500)).await;
        simulator.shutdown();
        simulator.shutdown();
        simulator.join().await;

        let settled = total_messages(&service);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(total_messages(&service), settled);
    }
}
