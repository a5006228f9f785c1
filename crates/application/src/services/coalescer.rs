use arc_swap::ArcSwap;
use funnel_dns_domain::{
    Answer, DomainError, EngineConfig, Question, RawAnswer, RecordClass, RecordType,
};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::ports::{Completion, EngineError, ResolverEngine};

/// Continuation for one lookup. Invoked exactly once: with the shared
/// decorated answer on completion, or with `None` on validation failure or
/// cancellation-by-purge.
pub type LookupCallback = Box<dyn FnOnce(Option<Arc<Answer>>) + Send>;

/// Stable identity of one registered callback. Cancellation removes by id,
/// never by position, so overlapping cancellations cannot misidentify a
/// sibling caller's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CallbackId(u64);

/// Identifies one `(question, callback)` registration for later
/// cancellation.
#[derive(Debug, Clone)]
pub struct Token {
    question: Question,
    id: CallbackId,
}

impl Token {
    pub fn question(&self) -> &Question {
        &self.question
    }
}

/// All callers coalesced onto one engine resolution.
///
/// Exists in the map iff its callback list is non-empty and the resolution
/// has not completed. `handle` stays `None` when the engine refused the
/// issue call; such an entry pends until a purge drains it.
struct PendingQuery {
    callbacks: SmallVec<[(CallbackId, LookupCallback); 1]>,
    created: Instant,
    handle: Option<crate::ports::ResolutionHandle>,
}

type PendingMap = FxHashMap<Question, PendingQuery>;

/// Coalesces concurrent duplicate lookups into single engine resolutions.
///
/// One lock-guarded map from question to pending callbacks; the engine slot
/// is an `ArcSwap` so [`purge`](Self::purge) replaces the whole context
/// rather than mutating it in place. Callbacks always run outside the lock,
/// so they may re-enter `lookup` or `cancel`.
pub struct Coalescer<E: ResolverEngine> {
    engine: ArcSwap<E>,
    config: EngineConfig,
    pending: Mutex<PendingMap>,
    next_id: AtomicU64,
    // Handed to engine completion closures so a late completion cannot keep
    // the coalescer alive.
    weak_self: Weak<Self>,
}

impl<E: ResolverEngine> Coalescer<E> {
    /// Construct the coalescer and its initial engine context.
    pub fn new(config: EngineConfig) -> Result<Arc<Self>, EngineError> {
        let engine = E::construct(&config)?;
        info!("Resolver engine context constructed");
        Ok(Arc::new_cyclic(|weak_self| Self {
            engine: ArcSwap::from_pointee(engine),
            config,
            pending: Mutex::new(PendingMap::default()),
            next_id: AtomicU64::new(1),
            weak_self: weak_self.clone(),
        }))
    }

    /// Snapshot of the current engine context. Replaced wholesale by
    /// [`purge`](Self::purge); event-loop integration watches the snapshot's
    /// readiness descriptor.
    pub fn engine(&self) -> Arc<E> {
        self.engine.load_full()
    }

    /// Number of distinct questions currently pending.
    pub fn pending_queries(&self) -> usize {
        self.lock_pending().len()
    }

    /// Register interest in a lookup.
    ///
    /// Lookups sharing an equal `(qname, qtype, qclass)` are coalesced onto
    /// one engine resolution; every callback receives the same decorated
    /// answer, in registration order. On validation failure the callback is
    /// invoked immediately with `None` (uniform completion path) and the
    /// error is returned; no pending entry is created.
    pub fn lookup(
        &self,
        callback: LookupCallback,
        qname: &str,
        qtype: &str,
        qclass: &str,
    ) -> Result<Token, DomainError> {
        let question = match Question::new(qname, qtype, qclass) {
            Ok(question) => question,
            Err(e) => {
                debug!(qname, qtype, qclass, error = %e, "Rejected lookup");
                callback(None);
                return Err(e);
            }
        };

        let id = CallbackId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let first = {
            let mut pending = self.lock_pending();
            match pending.entry(question.clone()) {
                Entry::Occupied(mut entry) => {
                    entry.get_mut().callbacks.push((id, callback));
                    trace!(
                        qname = %question.qname,
                        qtype = %question.qtype,
                        waiters = entry.get().callbacks.len(),
                        "Coalesced onto in-flight resolution"
                    );
                    false
                }
                Entry::Vacant(slot) => {
                    slot.insert(PendingQuery {
                        callbacks: smallvec![(id, callback)],
                        created: Instant::now(),
                        handle: None,
                    });
                    true
                }
            }
        };

        if first {
            self.issue(&question);
        }

        Ok(Token { question, id })
    }

    /// [`lookup`](Self::lookup) with the common defaults: A record, IN
    /// class.
    pub fn lookup_a(&self, callback: LookupCallback, qname: &str) -> Result<Token, DomainError> {
        self.lookup(callback, qname, "A", "IN")
    }

    /// Issue a resolution for a freshly inserted key. Runs outside the map
    /// lock; if the entry vanished in between (cancelled on a later turn),
    /// the fresh handle is cancelled right back.
    fn issue(&self, question: &Question) {
        let this = self.weak_self.clone();
        let done: Completion = Box::new(move |raw| {
            if let Some(coalescer) = this.upgrade() {
                coalescer.complete(raw);
            }
        });

        let engine = self.engine.load();
        match engine.issue(question, done) {
            Ok(handle) => {
                let mut pending = self.lock_pending();
                match pending.get_mut(question) {
                    Some(entry) => entry.handle = Some(handle),
                    None => {
                        drop(pending);
                        engine.cancel_resolution(handle);
                    }
                }
            }
            Err(e) => {
                // Accepted limitation: the entry stays pending with no path
                // to completion until a purge drains it.
                warn!(
                    qname = %question.qname,
                    qtype = %question.qtype,
                    error = %e,
                    "Failed to issue resolution; query pends until purge"
                );
            }
        }
    }

    /// Completion path, invoked once per issued resolution from the engine's
    /// `process_ready`. A completion for a key no longer in the map (purged
    /// or fully cancelled) is a no-op.
    fn complete(&self, raw: RawAnswer) {
        let question = Question::from_parts(
            Arc::clone(&raw.qname),
            RecordType::from_code(raw.qtype),
            RecordClass::from_code(raw.qclass),
        );
        let answer = Arc::new(Answer::decorate(raw));

        let entry = self.lock_pending().remove(&question);
        let Some(entry) = entry else {
            trace!(qname = %question.qname, "Completion for absent key");
            return;
        };

        debug!(
            qname = %question.qname,
            qtype = %question.qtype,
            status = %answer.status,
            secure = answer.secure,
            waiters = entry.callbacks.len(),
            elapsed_ms = entry.created.elapsed().as_millis() as u64,
            "Resolution complete"
        );

        for (_, callback) in entry.callbacks {
            callback(Some(Arc::clone(&answer)));
        }
    }

    /// Withdraw one caller's interest.
    ///
    /// Removes the callback identified by the token; when the last one for a
    /// key goes, the engine resolution is cancelled and the entry removed.
    /// Returns true iff a callback was actually removed, so a second cancel
    /// of the same token returns false.
    pub fn cancel(&self, token: &Token) -> bool {
        let mut stale_handle = None;
        let removed = {
            let mut pending = self.lock_pending();
            let Some(entry) = pending.get_mut(&token.question) else {
                return false;
            };
            let before = entry.callbacks.len();
            entry.callbacks.retain(|(id, _)| *id != token.id);
            let removed = entry.callbacks.len() != before;
            if removed && entry.callbacks.is_empty() {
                stale_handle = pending
                    .remove(&token.question)
                    .and_then(|entry| entry.handle);
            }
            removed
        };

        if let Some(handle) = stale_handle {
            debug!(
                qname = %token.question.qname,
                qtype = %token.question.qtype,
                "Last waiter cancelled; cancelling engine resolution"
            );
            self.engine.load().cancel_resolution(handle);
        }

        removed
    }

    /// Reset the resolver context.
    ///
    /// Rebuilds the engine from the retained configuration, swaps it into
    /// place (the old context tears down on drop), then atomically takes the
    /// whole pending map and drains it: every waiting callback is invoked
    /// exactly once with `None`. New lookups arriving during the drain land
    /// in the fresh map, including re-entrant ones made from a drained
    /// callback.
    pub fn purge(&self) -> bool {
        match E::construct(&self.config) {
            Ok(engine) => {
                self.engine.store(Arc::new(engine));
                info!("Engine context rebuilt");
            }
            Err(e) => {
                warn!(error = %e, "Engine rebuild failed; keeping previous context");
            }
        }

        let drained = std::mem::take(&mut *self.lock_pending());
        if !drained.is_empty() {
            info!(keys = drained.len(), "Draining pending queries");
        }
        for (question, entry) in drained {
            trace!(
                qname = %question.qname,
                qtype = %question.qtype,
                waiters = entry.callbacks.len(),
                "Drained by purge"
            );
            for (_, callback) in entry.callbacks {
                callback(None);
            }
        }

        true
    }

    fn lock_pending(&self) -> MutexGuard<'_, PendingMap> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
