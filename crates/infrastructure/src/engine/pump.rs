use funnel_dns_application::ResolverEngine;
use std::sync::Arc;
use tracing::trace;

use super::readiness::ReadinessSource;

/// Drive one engine context: wait for readiness, let the engine deliver
/// completed resolutions, repeat.
///
/// Runs until the task is dropped. A purge replaces the engine context, so
/// the embedding application aborts the old pump and spawns a new one for
/// the fresh context's readiness source.
pub async fn pump<E: ResolverEngine>(engine: Arc<E>, source: Arc<dyn ReadinessSource>) {
    loop {
        source.ready().await;
        trace!("Engine readiness signalled");
        engine.process_ready();
    }
}
