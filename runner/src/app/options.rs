//! Run configuration options

use crate::deploy::poller;
use crate::http::client::ClientOptions;
use crate::resolve::MatchPolicy;

/// Immutable options for one run, assembled from settings and CLI flags
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Controller connection
    pub client: ClientOptions,

    /// Deployment status polling
    pub poller: poller::Options,

    /// Handling of ambiguous name lookups
    pub match_policy: MatchPolicy,
}

impl RunOptions {
    /// Dump raw responses and loaded input
    pub fn verbose(&self) -> bool {
        self.client.verbose
    }
}
