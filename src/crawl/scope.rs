// src/crawl/scope.rs
// =============================================================================
// Decides which discovered links the crawler is allowed to follow.
//
// The rule is "same scheme as the seed". Hosts are not restricted unless the
// caller opts in with `same_host`, so by default an http crawl can wander
// onto any other http site it finds a link to.
// =============================================================================

use url::Url;

// True iff `candidate` uses the seed's scheme
pub fn in_scope(candidate: &Url, seed_scheme: &str) -> bool {
    candidate.scheme() == seed_scheme
}

// Admission rule for one crawl invocation, fixed from the seed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    scheme: String,
    host: Option<String>,
}

impl Scope {
    pub fn new(seed: &Url, same_host: bool) -> Self {
        Self {
            scheme: seed.scheme().to_string(),
            host: if same_host {
                seed.host_str().map(str::to_string)
            } else {
                None
            },
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn admits(&self, candidate: &Url) -> bool {
        if !in_scope(candidate, &self.scheme) {
            return false;
        }
        match &self.host {
            Some(host) => candidate.host_str() == Some(host.as_str()),
            None => true,
        }
    }
}
