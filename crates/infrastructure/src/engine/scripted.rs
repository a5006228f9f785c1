use funnel_dns_application::{Completion, EngineError, RawDescriptor, ResolutionHandle, ResolverEngine};
use funnel_dns_domain::{EngineConfig, Question, RawAnswer, RecordClass, RecordType};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::readiness::NotifyReadiness;

struct Issued {
    handle: ResolutionHandle,
    question: Question,
    done: Completion,
}

/// In-process resolver engine with scripted answers.
///
/// Stands in for a real validating engine in integration tests and demos:
/// `issue` queues the resolution, [`script`](Self::script) supplies the raw
/// answer for a question, and `process_ready` delivers whatever has both.
/// Readiness is signalled through a [`NotifyReadiness`] source, so the
/// normal pump drives delivery exactly like a descriptor-based engine.
pub struct ScriptedEngine {
    scripted: Mutex<HashMap<Question, RawAnswer>>,
    queue: Mutex<Vec<Issued>>,
    readiness: Arc<NotifyReadiness>,
    next_handle: AtomicU64,
    issue_count: AtomicUsize,
}

impl ScriptedEngine {
    /// Readiness source for the pump driving this context.
    pub fn readiness(&self) -> Arc<NotifyReadiness> {
        Arc::clone(&self.readiness)
    }

    /// Supply the raw answer delivered for a question. Wakes the pump if a
    /// matching resolution is already queued.
    pub fn script(&self, question: Question, answer: RawAnswer) {
        let waiting = {
            let mut scripted = self.scripted.lock().unwrap_or_else(|p| p.into_inner());
            scripted.insert(question.clone(), answer);
            let queue = self.queue.lock().unwrap_or_else(|p| p.into_inner());
            queue.iter().any(|issued| issued.question == question)
        };
        if waiting {
            self.readiness.signal();
        }
    }

    /// Convenience for the common case: script an A answer with the given
    /// addresses.
    pub fn script_a(&self, qname: &str, addresses: &[[u8; 4]]) {
        let question = Question::from_parts(Arc::from(qname), RecordType::A, RecordClass::In);
        let mut answer = RawAnswer::new(qname, RecordType::A.code(), RecordClass::In.code(), 0);
        for octets in addresses {
            answer = answer.with_record(octets.to_vec());
        }
        self.script(question, answer);
    }

    /// Total `issue` calls accepted by this context.
    pub fn issued(&self) -> usize {
        self.issue_count.load(Ordering::Relaxed)
    }

    /// Resolutions queued but not yet delivered.
    pub fn in_flight(&self) -> usize {
        self.queue.lock().unwrap_or_else(|p| p.into_inner()).len()
    }
}

impl ResolverEngine for ScriptedEngine {
    fn construct(_config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            scripted: Mutex::new(HashMap::new()),
            queue: Mutex::new(Vec::new()),
            readiness: NotifyReadiness::new(),
            next_handle: AtomicU64::new(1),
            issue_count: AtomicUsize::new(0),
        })
    }

    fn issue(
        &self,
        question: &Question,
        done: Completion,
    ) -> Result<ResolutionHandle, EngineError> {
        self.issue_count.fetch_add(1, Ordering::Relaxed);
        let handle = ResolutionHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        // Lock order: scripted before queue, everywhere.
        let scripted = {
            let scripted = self.scripted.lock().unwrap_or_else(|p| p.into_inner());
            let mut queue = self.queue.lock().unwrap_or_else(|p| p.into_inner());
            queue.push(Issued {
                handle,
                question: question.clone(),
                done,
            });
            scripted.contains_key(question)
        };
        debug!(qname = %question.qname, qtype = %question.qtype, "Resolution issued");
        if scripted {
            self.readiness.signal();
        }
        Ok(handle)
    }

    fn cancel_resolution(&self, handle: ResolutionHandle) {
        self.queue
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .retain(|issued| issued.handle != handle);
    }

    fn readiness_descriptor(&self) -> Option<RawDescriptor> {
        None
    }

    fn process_ready(&self) {
        // Deliver every queued resolution that has a scripted answer; keep
        // the rest queued. Completions run outside both locks.
        let deliverable = {
            let scripted = self.scripted.lock().unwrap_or_else(|p| p.into_inner());
            let mut queue = self.queue.lock().unwrap_or_else(|p| p.into_inner());
            let mut ready = Vec::new();
            let mut keep = Vec::new();
            for issued in queue.drain(..) {
                match scripted.get(&issued.question) {
                    Some(answer) => ready.push((issued.done, answer.clone())),
                    None => keep.push(issued),
                }
            }
            *queue = keep;
            ready
        };
        for (done, answer) in deliverable {
            done(answer);
        }
    }
}
