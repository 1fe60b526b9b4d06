// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation message buffering with debounced flushing.
//!
//! Each conversation key moves through a small state machine: **Idle** (no
//! buffer, no timer) → **Buffering** (messages queued, one watcher task
//! armed) → **Flushing** (buffer atomically detached and handed to the
//! registered handler, state back to Idle). A new arrival while Buffering
//! re-arms the quiet-period deadline; the optional max-wait ceiling is fixed
//! at the first buffered message and cannot be pushed back.
//!
//! Invariant: at most one live watcher per key. The watcher is spawned when
//! a key leaves Idle and is tied to that buffer generation by an epoch; a
//! stale watcher that wakes after its generation was flushed or cancelled
//! exits without touching the registry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

use frontdesk_core::{BufferedMessage, ConversationKey, FlushHandler, MessageBatch};

use crate::policy::DebouncePolicy;

/// Buffer state for one conversation key while Buffering.
struct KeyState {
    /// Messages in arrival order.
    messages: Vec<BufferedMessage>,
    /// Quiet-period deadline; re-armed on every arrival.
    deadline: Instant,
    /// Ceiling fixed at the first buffered message; never re-armed.
    hard_deadline: Option<Instant>,
    /// Ties the watcher task to this buffer generation.
    epoch: u64,
}

impl KeyState {
    fn effective_deadline(&self) -> Instant {
        match self.hard_deadline {
            Some(hard) => self.deadline.min(hard),
            None => self.deadline,
        }
    }
}

/// Collapses bursts of inbound messages into one batch per conversational turn.
///
/// Keys are independent: a slow handler for one conversation never delays
/// flushes for another. Within one key, messages are flushed in arrival
/// order, exactly one batch per quiet period. Delivery to the handler is
/// at-most-once — a failed handler call is logged and the batch dropped.
pub struct MessageAggregator {
    policy: DebouncePolicy,
    handler: Arc<dyn FlushHandler>,
    registry: Arc<Mutex<HashMap<ConversationKey, KeyState>>>,
    shutdown: CancellationToken,
    epochs: AtomicU64,
}

impl MessageAggregator {
    /// Create an aggregator that flushes into the given handler.
    pub fn new(policy: DebouncePolicy, handler: Arc<dyn FlushHandler>) -> Self {
        Self {
            policy,
            handler,
            registry: Arc::new(Mutex::new(HashMap::new())),
            shutdown: CancellationToken::new(),
            epochs: AtomicU64::new(0),
        }
    }

    /// Queue one inbound message for its conversation.
    ///
    /// Appends to the key's buffer (FIFO) and re-arms the quiet-period
    /// deadline. The first message for an idle key arms the max-wait ceiling
    /// (if configured) and spawns the key's watcher. Never blocks beyond the
    /// registry lock; the flush itself happens on the watcher task.
    pub async fn enqueue(&self, key: ConversationKey, message: BufferedMessage) {
        if self.shutdown.is_cancelled() {
            warn!(%key, "aggregator is shut down; dropping message");
            return;
        }

        if !self.policy.enabled() {
            // Debouncing disabled: dispatch immediately as a singleton batch.
            // Spawned so enqueue never waits on the handler.
            let handler = Arc::clone(&self.handler);
            let batch = MessageBatch {
                key,
                messages: vec![message],
            };
            tokio::spawn(async move {
                let key = batch.key.clone();
                debug!(%key, "dispatching without debounce");
                if let Err(error) = handler.handle_batch(batch).await {
                    error!(%key, %error, "batch handler failed; batch dropped");
                }
            });
            return;
        }

        let now = Instant::now();
        let mut registry = self.registry.lock().await;
        match registry.get_mut(&key) {
            Some(state) => {
                state.messages.push(message);
                state.deadline = now + self.policy.window();
                trace!(%key, buffered = state.messages.len(), "debounce window re-armed");
            }
            None => {
                let epoch = self.epochs.fetch_add(1, Ordering::Relaxed);
                registry.insert(
                    key.clone(),
                    KeyState {
                        messages: vec![message],
                        deadline: now + self.policy.window(),
                        hard_deadline: self.policy.max_wait().map(|wait| now + wait),
                        epoch,
                    },
                );
                drop(registry);
                debug!(%key, "conversation entered buffering");
                self.spawn_watcher(key, epoch);
            }
        }
    }

    /// Immediately flush the key's buffer, if any. Returns `true` when a
    /// batch was delivered.
    pub async fn flush_now(&self, key: &ConversationKey) -> bool {
        let state = self.registry.lock().await.remove(key);
        match state {
            Some(state) => {
                let batch = MessageBatch {
                    key: key.clone(),
                    messages: state.messages,
                };
                self.deliver(batch).await;
                true
            }
            None => false,
        }
    }

    /// Discard the key's buffered messages and pending timer without
    /// invoking the handler. Returns the number of messages discarded.
    ///
    /// For explicit external action only (e.g. the conversation was
    /// archived mid-buffer); the aggregator never cancels on its own.
    pub async fn cancel(&self, key: &ConversationKey) -> usize {
        match self.registry.lock().await.remove(key) {
            Some(state) => {
                debug!(%key, discarded = state.messages.len(), "buffered conversation cancelled");
                state.messages.len()
            }
            None => 0,
        }
    }

    /// Stop all watchers and drop any buffered messages.
    ///
    /// Buffered batches are discarded, not flushed: delivering during
    /// teardown races the handler's own shutdown.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let mut registry = self.registry.lock().await;
        let discarded: usize = registry.values().map(|s| s.messages.len()).sum();
        if discarded > 0 {
            warn!(discarded, "aggregator shut down with buffered messages; dropping");
        }
        registry.clear();
    }

    /// Number of conversations currently buffering.
    pub async fn buffering_count(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// Number of messages buffered for one key.
    pub async fn pending_len(&self, key: &ConversationKey) -> usize {
        self.registry
            .lock()
            .await
            .get(key)
            .map_or(0, |s| s.messages.len())
    }

    /// Spawn the single watcher for one buffer generation.
    fn spawn_watcher(&self, key: ConversationKey, epoch: u64) {
        let registry = Arc::clone(&self.registry);
        let handler = Arc::clone(&self.handler);
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            loop {
                let wake_at = {
                    let registry = registry.lock().await;
                    match registry.get(&key) {
                        Some(state) if state.epoch == epoch => state.effective_deadline(),
                        // Flushed or cancelled elsewhere; this watcher is stale.
                        _ => return,
                    }
                };

                tokio::select! {
                    _ = shutdown.cancelled() => return,
                    _ = tokio::time::sleep_until(wake_at) => {}
                }

                let batch = {
                    let mut registry = registry.lock().await;
                    let expired = match registry.get(&key) {
                        Some(state) if state.epoch == epoch => {
                            state.effective_deadline() <= Instant::now()
                        }
                        _ => return,
                    };
                    if !expired {
                        // New arrivals moved the deadline; keep watching.
                        continue;
                    }
                    let Some(state) = registry.remove(&key) else {
                        return;
                    };
                    MessageBatch {
                        key: key.clone(),
                        messages: state.messages,
                    }
                };

                debug!(key = %batch.key, messages = batch.len(), "flushing debounced batch");
                if let Err(error) = handler.handle_batch(batch).await {
                    error!(%key, %error, "batch handler failed; batch dropped");
                }
                return;
            }
        });
    }

    /// Hand a detached batch to the handler, logging (not raising) failures.
    async fn deliver(&self, batch: MessageBatch) {
        let key = batch.key.clone();
        debug!(%key, messages = batch.len(), "flushing debounced batch");
        if let Err(error) = self.handler.handle_batch(batch).await {
            error!(%key, %error, "batch handler failed; batch dropped");
        }
    }
}
