use async_trait::async_trait;
use funnel_dns_application::RawDescriptor;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::warn;

/// One engine readiness shape, chosen once at construction.
///
/// Engines either expose an OS descriptor to poll ([`FdReadiness`]) or
/// signal readiness in-process ([`NotifyReadiness`]); the pump and the
/// coalescer never see the difference.
#[async_trait]
pub trait ReadinessSource: Send + Sync {
    /// Underlying descriptor, if this source has one.
    fn descriptor(&self) -> Option<RawDescriptor>;

    /// Resolve when the engine has completed resolutions to process.
    async fn ready(&self);
}

/// In-process readiness: the engine calls [`signal`](Self::signal) whenever
/// a resolution finishes.
#[derive(Default)]
pub struct NotifyReadiness {
    notify: Notify,
}

impl NotifyReadiness {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn signal(&self) {
        self.notify.notify_one();
    }
}

#[async_trait]
impl ReadinessSource for NotifyReadiness {
    fn descriptor(&self) -> Option<RawDescriptor> {
        None
    }

    async fn ready(&self) {
        self.notify.notified().await;
    }
}

/// Descriptor-backed readiness for engines that report a pollable fd.
#[cfg(unix)]
pub struct FdReadiness {
    fd: tokio::io::unix::AsyncFd<Descriptor>,
}

#[cfg(unix)]
struct Descriptor(RawDescriptor);

#[cfg(unix)]
impl std::os::fd::AsRawFd for Descriptor {
    fn as_raw_fd(&self) -> std::os::fd::RawFd {
        self.0
    }
}

#[cfg(unix)]
impl FdReadiness {
    pub fn new(fd: RawDescriptor) -> std::io::Result<Self> {
        Ok(Self {
            fd: tokio::io::unix::AsyncFd::with_interest(
                Descriptor(fd),
                tokio::io::Interest::READABLE,
            )?,
        })
    }
}

#[cfg(unix)]
#[async_trait]
impl ReadinessSource for FdReadiness {
    fn descriptor(&self) -> Option<RawDescriptor> {
        Some(self.fd.get_ref().0)
    }

    async fn ready(&self) {
        match self.fd.readable().await {
            Ok(mut guard) => guard.clear_ready(),
            Err(e) => {
                // A dead descriptor means the context went away; park until
                // the embedding application replaces the pump.
                warn!(error = %e, "Readiness descriptor failed");
                std::future::pending::<()>().await;
            }
        }
    }
}
