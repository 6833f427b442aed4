// Flow aggregation module
//
// Bounded, time-expiring table of per-flow counters. Expiry and eviction run
// on every write, so the table never holds more than `max_entries` flows and
// never holds a flow idle for longer than `max_age` (table clock).

pub mod rank;

pub use rank::{header_row, rank, RankedRow};

use crate::app::config::FlowTableConfig;
use crate::net::FlowKey;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Point on the capture timeline
pub type Timestamp = Duration;

/// Counters accumulated for one flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowCounters {
    pub packets: u64,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
struct FlowEntry {
    counters: FlowCounters,
    last_touched: Timestamp,
    /// Position in `by_recency`, refreshed on every touch
    recency: u64,
    /// First-observation sequence, fixed for the entry's lifetime
    created: u64,
}

pub struct FlowTable {
    config: FlowTableConfig,
    entries: HashMap<FlowKey, FlowEntry>,
    /// Touch sequence -> key; the first item is the least recently touched
    by_recency: BTreeMap<u64, FlowKey>,
    next_seq: u64,
    /// Latest timestamp seen by `touch`
    clock: Timestamp,
}

impl FlowTable {
    pub fn new(config: FlowTableConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            by_recency: BTreeMap::new(),
            next_seq: 0,
            clock: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &FlowTableConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, key: &FlowKey) -> Option<FlowCounters> {
        self.entries.get(key).map(|e| e.counters)
    }

    /// Record one packet of `len` bytes for `key` observed at `now`
    ///
    /// Creates the entry on first observation. Timestamps older than the
    /// latest one already seen are stamped with the latest one, so recency
    /// order and age order always agree.
    pub fn touch(&mut self, key: FlowKey, len: u64, now: Timestamp) {
        self.clock = self.clock.max(now);
        let seq = self.next_seq;
        self.next_seq += 1;

        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.counters.packets += 1;
                entry.counters.bytes += len;
                entry.last_touched = self.clock;
                self.by_recency.remove(&entry.recency);
                entry.recency = seq;
            }
            None => {
                self.entries.insert(
                    key,
                    FlowEntry {
                        counters: FlowCounters {
                            packets: 1,
                            bytes: len,
                        },
                        last_touched: self.clock,
                        recency: seq,
                        created: seq,
                    },
                );
            }
        }
        self.by_recency.insert(seq, key);

        self.expire(self.clock);
        self.evict_over_capacity();
    }

    /// Drop every entry idle for longer than `max_age` as of `now`
    ///
    /// Returns the number of entries removed.
    pub fn expire(&mut self, now: Timestamp) -> usize {
        let mut removed = 0;
        while let Some((&seq, key)) = self.by_recency.first_key_value() {
            let idle = match self.entries.get(key) {
                Some(entry) => now.saturating_sub(entry.last_touched),
                None => Duration::ZERO,
            };
            if idle <= self.config.max_age {
                break;
            }
            self.remove_seq(seq);
            removed += 1;
        }
        removed
    }

    fn evict_over_capacity(&mut self) {
        while self.entries.len() > self.config.max_entries {
            match self.by_recency.first_key_value() {
                Some((&seq, _)) => self.remove_seq(seq),
                None => break,
            }
        }
    }

    fn remove_seq(&mut self, seq: u64) {
        if let Some(key) = self.by_recency.remove(&seq) {
            self.entries.remove(&key);
        }
    }

    /// Live flows in first-observation order; does not affect recency
    pub fn snapshot(&self) -> Vec<(FlowKey, FlowCounters)> {
        let mut live: Vec<(&FlowKey, &FlowEntry)> = self.entries.iter().collect();
        live.sort_by_key(|(_, entry)| entry.created);
        live.into_iter()
            .map(|(key, entry)| (*key, entry.counters))
            .collect()
    }
}

impl Default for FlowTable {
    fn default() -> Self {
        Self::new(FlowTableConfig::default())
    }
}
