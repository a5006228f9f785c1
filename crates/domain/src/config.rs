use serde::Deserialize;
use std::path::PathBuf;

/// Configuration the engine context is (re)built from.
///
/// Retained by the coalescer so a purge can construct a fresh context with
/// identical settings. Loading these values from disk is the embedding
/// application's job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// DNSSEC trust anchors, one zone-file-style DS/DNSKEY record each.
    #[serde(default)]
    pub trust_anchors: Vec<String>,
    /// Override for the resolver configuration file (resolv.conf).
    #[serde(default)]
    pub resolv_conf: Option<PathBuf>,
    /// Override for static hosts data.
    #[serde(default)]
    pub hosts_file: Option<PathBuf>,
}
