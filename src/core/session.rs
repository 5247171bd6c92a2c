//! Chat session: message log, input buffer and the simulated typing cycle.
//!
//! The view owns one `ChatSession` and calls [`ChatSession::poll`] every
//! frame. Replies are produced on the tokio runtime and handed back over a
//! channel.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::message::Message;
use crate::ai::Responder;

/// How pending replies are scheduled relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// One queue per session; replies arrive in submission order.
    Ordered,
    /// One timer per submission; crossing delays may reorder replies.
    Independent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

/// Uniform random delay in `[min, max)`, drawn in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    min: Duration,
    max: Duration,
}

impl TypingDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max: max.max(min) }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample(&self) -> Duration {
        self.sample_with(&mut rand::thread_rng())
    }

    pub fn sample_with<R: Rng>(&self, rng: &mut R) -> Duration {
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        if hi <= lo {
            return self.min;
        }
        Duration::from_millis(rng.gen_range(lo..hi))
    }
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(2000))
    }
}

pub type Notifier = Arc<dyn Fn() + Send + Sync>;

struct Reply {
    generation: u64,
    text: String,
}

/// Everything a background cycle needs to answer one submission.
#[derive(Clone)]
struct Courier {
    responder: Arc<dyn Responder>,
    delay: TypingDelay,
    generation: u64,
    replies: mpsc::UnboundedSender<Reply>,
    cancel: CancellationToken,
    notify: Option<Notifier>,
}

impl Courier {
    /// Waits out the typing delay and sends one reply. Returns false when
    /// cancelled or when the session is gone.
    async fn answer(&self, text: &str) -> bool {
        // Simulated typing; a cancel wins over the timer
        let wait = self.delay.sample();
        tokio::select! {
            _ = self.cancel.cancelled() => return false,
            _ = tokio::time::sleep(wait) => {}
        }

        let reply = Reply {
            generation: self.generation,
            text: self.responder.respond(text),
        };
        if self.replies.send(reply).is_err() {
            return false;
        }
        // Let the view repaint without waiting for input
        if let Some(notify) = &self.notify {
            notify();
        }
        true
    }
}

async fn run_queue(courier: Courier, mut queue: mpsc::UnboundedReceiver<String>) {
    loop {
        let text = tokio::select! {
            _ = courier.cancel.cancelled() => break,
            next = queue.recv() => match next {
                Some(text) => text,
                None => break,
            },
        };
        if !courier.answer(&text).await {
            break;
        }
    }
    log::debug!("reply queue stopped");
}

pub struct ChatSession {
    id: Uuid,
    responder: Arc<dyn Responder>,
    delay: TypingDelay,
    mode: DeliveryMode,
    notify: Option<Notifier>,
    log: Vec<Message>,
    pub input: String,
    pending: usize,
    generation: u64,
    cancel: CancellationToken,
    queue: Option<mpsc::UnboundedSender<String>>,
    reply_tx: mpsc::UnboundedSender<Reply>,
    reply_rx: mpsc::UnboundedReceiver<Reply>,
}

impl ChatSession {
    pub fn new(responder: Arc<dyn Responder>, delay: TypingDelay, mode: DeliveryMode) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        log::info!(
            "session {} started ({}, {:?} delivery, {}-{} ms typing)",
            id,
            responder.name(),
            mode,
            delay.min().as_millis(),
            delay.max().as_millis()
        );

        Self {
            id,
            responder,
            delay,
            mode,
            notify: None,
            log: Vec::new(),
            input: String::new(),
            pending: 0,
            generation: 0,
            cancel: CancellationToken::new(),
            queue: None,
            reply_tx,
            reply_rx,
        }
    }

    /// Called from the background task after every delivered reply.
    pub fn with_notifier<F>(mut self, notify: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notify = Some(Arc::new(notify));
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.log
    }

    pub fn is_typing(&self) -> bool {
        self.pending > 0
    }

    pub fn state(&self) -> SessionState {
        if self.is_typing() {
            SessionState::AwaitingResponse
        } else {
            SessionState::Idle
        }
    }

    /// Appends `text` as a user message and starts a response cycle.
    /// Blank text is ignored and returns false.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        self.log.push(Message::user(text));
        self.input.clear();
        self.pending += 1;
        log::info!(
            "session {}: user message #{} ({} chars), {} pending",
            self.id,
            self.log.len(),
            text.chars().count(),
            self.pending
        );

        self.dispatch(text.to_string());
        true
    }

    /// Submits the input buffer. Whitespace-only input stays in the buffer.
    pub fn submit_input(&mut self) -> bool {
        if self.input.trim().is_empty() {
            return false;
        }
        let text = std::mem::take(&mut self.input);
        self.submit(&text)
    }

    fn courier(&self) -> Courier {
        Courier {
            responder: Arc::clone(&self.responder),
            delay: self.delay,
            generation: self.generation,
            replies: self.reply_tx.clone(),
            cancel: self.cancel.clone(),
            notify: self.notify.clone(),
        }
    }

    fn dispatch(&mut self, text: String) {
        let courier = self.courier();
        match self.mode {
            DeliveryMode::Independent => {
                tokio::spawn(async move {
                    courier.answer(&text).await;
                });
            }
            DeliveryMode::Ordered => {
                // First submission after start or cancel spawns the worker
                let queue = self.queue.get_or_insert_with(|| {
                    let (tx, rx) = mpsc::unbounded_channel();
                    tokio::spawn(run_queue(courier, rx));
                    tx
                });
                if queue.send(text).is_err() {
                    log::error!("session {}: reply queue is gone, dropping submission", self.id);
                    self.queue = None;
                    self.pending = self.pending.saturating_sub(1);
                }
            }
        }
    }

    fn accept(&mut self, reply: Reply) -> bool {
        // Sent before a cancel, received after it
        if reply.generation != self.generation {
            log::debug!("session {}: discarding reply from a cancelled cycle", self.id);
            return false;
        }
        self.pending = self.pending.saturating_sub(1);
        self.log.push(Message::bot(reply.text));
        log::info!(
            "session {}: bot reply #{}, {} pending",
            self.id,
            self.log.len(),
            self.pending
        );
        true
    }

    /// Moves delivered replies into the log; returns how many were added.
    pub fn poll(&mut self) -> usize {
        let mut added = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            if self.accept(reply) {
                added += 1;
            }
        }
        added
    }

    /// Waits for the next reply. Returns `None` when nothing is pending.
    pub async fn next_reply(&mut self) -> Option<Message> {
        while self.pending > 0 {
            let reply = self.reply_rx.recv().await?;
            if self.accept(reply) {
                return self.log.last().cloned();
            }
        }
        None
    }

    /// Abandons every pending cycle. The session stays usable.
    pub fn cancel(&mut self) {
        if self.pending > 0 {
            log::info!("session {}: cancelling {} pending replies", self.id, self.pending);
        }
        self.cancel.cancel();
        // Fresh token and queue for whatever is submitted next
        self.cancel = CancellationToken::new();
        self.queue = None;
        self.generation += 1;
        self.pending = 0;
    }

    pub fn transcript_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.log)
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.cancel.cancel();
        log::info!("session {} closed after {} messages", self.id, self.log.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::responses::Topic;
    use crate::ai::{KeywordResponder, ResponseTable};
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Instant;

    fn session(mode: DeliveryMode) -> ChatSession {
        let responder = Arc::new(KeywordResponder::new(ResponseTable::builtin()));
        ChatSession::new(responder, TypingDelay::default(), mode)
    }

    fn answer(topic: Topic) -> String {
        ResponseTable::builtin().get(topic).to_string()
    }

    #[test]
    fn delay_samples_stay_in_half_open_range() {
        let delay = TypingDelay::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = delay.sample_with(&mut rng);
            assert!(d >= Duration::from_millis(1000));
            assert!(d < Duration::from_millis(2000));
        }
    }

    #[test]
    fn degenerate_delay_is_fixed() {
        let delay = TypingDelay::new(Duration::from_millis(300), Duration::from_millis(100));
        assert_eq!(delay.max(), Duration::from_millis(300));
        assert_eq!(delay.sample(), Duration::from_millis(300));
        assert_eq!(TypingDelay::new(Duration::ZERO, Duration::ZERO).sample(), Duration::ZERO);
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut session = session(DeliveryMode::Ordered);
        assert!(!session.submit(""));
        assert!(!session.submit("   \n\t"));
        session.input = "   ".to_string();
        assert!(!session.submit_input());
        assert_eq!(session.input, "   ");
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn quick_action_phrase_gets_faculty_answer_after_typing_delay() {
        let mut session = session(DeliveryMode::Ordered);
        let started = Instant::now();

        assert!(session.submit("Tell me about faculty"));
        assert_eq!(session.messages().len(), 1);
        assert!(session.messages()[0].is_user());
        assert_eq!(session.messages()[0].text, "Tell me about faculty");
        assert_eq!(session.state(), SessionState::AwaitingResponse);

        let reply = session.next_reply().await.unwrap();
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(1000), "waited {:?}", waited);
        assert!(waited < Duration::from_millis(2000), "waited {:?}", waited);
        assert!(!reply.is_user());
        assert_eq!(reply.text, answer(Topic::Faculty));
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_input_trims_and_clears_buffer() {
        let mut session = session(DeliveryMode::Ordered);
        session.input = "  HELLO there  ".to_string();
        assert!(session.submit_input());
        assert!(session.input.is_empty());
        assert_eq!(session.messages()[0].text, "HELLO there");
        let reply = session.next_reply().await.unwrap();
        assert_eq!(reply.text, answer(Topic::Hello));
    }

    #[tokio::test(start_paused = true)]
    async fn ordered_mode_keeps_submission_order() {
        let mut session = session(DeliveryMode::Ordered);
        for text in ["help", "Dr. Smith", "any news?", "hello"] {
            assert!(session.submit(text));
        }
        assert_eq!(session.state(), SessionState::AwaitingResponse);

        let mut replies = Vec::new();
        while let Some(reply) = session.next_reply().await {
            replies.push(reply.text);
        }
        assert_eq!(
            replies,
            vec![
                answer(Topic::Help),
                answer(Topic::FacultyLookup),
                answer(Topic::Notifications),
                answer(Topic::Hello),
            ]
        );
        assert_eq!(session.messages().len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn independent_mode_delivers_every_reply() {
        let mut session = session(DeliveryMode::Independent);
        session.submit("help");
        session.submit("admission dates");
        session.submit("cappuccino");

        let mut replies = Vec::new();
        while let Some(reply) = session.next_reply().await {
            replies.push(reply.text);
        }
        replies.sort();
        let mut expected = vec![
            answer(Topic::Help),
            answer(Topic::Admission),
            answer(Topic::Default),
        ];
        expected.sort();
        assert_eq!(replies, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_drains_replies_once_the_delay_passed() {
        let mut session = session(DeliveryMode::Ordered);
        session.submit("apply");
        assert_eq!(session.poll(), 0);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(session.poll(), 1);
        assert_eq!(session.poll(), 0);
        assert_eq!(session.messages()[1].text, answer(Topic::Admission));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_cycle_never_appends() {
        let mut session = session(DeliveryMode::Ordered);
        session.submit("hello");
        session.submit("help");
        session.cancel();
        assert_eq!(session.state(), SessionState::Idle);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.poll(), 0);
        assert_eq!(session.messages().len(), 2);

        session.submit("dept");
        let reply = session.next_reply().await.unwrap();
        assert_eq!(reply.text, answer(Topic::Departments));
    }

    #[tokio::test(start_paused = true)]
    async fn notifier_fires_per_reply() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut session =
            session(DeliveryMode::Independent).with_notifier(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        session.submit("hi");
        session.submit("news");
        while session.next_reply().await.is_some() {}
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn next_reply_without_pending_returns_none() {
        let mut session = session(DeliveryMode::Ordered);
        assert!(session.next_reply().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn transcript_lists_messages_in_order() {
        let mut session = session(DeliveryMode::Ordered);
        session.submit("help");
        session.next_reply().await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&session.transcript_json().unwrap()).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["author"], "user");
        assert_eq!(entries[0]["text"], "help");
        assert_eq!(entries[1]["author"], "bot");
    }
}
