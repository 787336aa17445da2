// src/crawl/queue.rs
// =============================================================================
// The crawl frontier: pages waiting to be fetched, plus the pages already
// taken off the queue.
//
// How it works:
// - push() appends to the back, duplicates allowed
// - next_unvisited() pops from the front, silently discarding entries whose
//   URL was already handed out, and marks the returned one as visited
//
// So the queue itself never deduplicates; the visited set does, at dequeue.
// That is what guarantees each URL is fetched at most once.
//
// Rust concepts:
// - VecDeque: O(1) push_back/pop_front, which gives breadth-first order
// - HashSet: O(1) membership test for visited URLs
// =============================================================================

use std::collections::{HashSet, VecDeque};
use url::Url;

// A page in the crawl queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlItem {
    pub url: Url,
    pub depth: usize, // Link hops from the seed (the seed is depth 0)
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<CrawlItem>,
    visited: HashSet<String>,
}

impl Frontier {
    // A frontier holding only the seed
    pub fn new(seed: Url) -> Self {
        let mut frontier = Self::default();
        frontier.push(CrawlItem { url: seed, depth: 0 });
        frontier
    }

    pub fn push(&mut self, item: CrawlItem) {
        self.queue.push_back(item);
    }

    // Pops entries until one has not been visited, marks it visited, returns it.
    // Returns None once the queue is drained.
    pub fn next_unvisited(&mut self) -> Option<CrawlItem> {
        while let Some(item) = self.queue.pop_front() {
            // insert() is both the membership test and the mark
            if self.visited.insert(item.url.as_str().to_string()) {
                return Some(item);
            }
        }
        None
    }

    // True if some queued entry would still be handed out by next_unvisited().
    // Already-visited entries at the front are dropped along the way.
    pub fn has_unvisited(&mut self) -> bool {
        while let Some(front) = self.queue.front() {
            if !self.visited.contains(front.url.as_str()) {
                return true;
            }
            self.queue.pop_front();
        }
        false
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
