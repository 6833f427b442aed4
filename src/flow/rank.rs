// Flow ranking
//
// Orders a table snapshot by bytes, descending. The sort is stable, so flows
// with equal byte counts keep their snapshot order and rows don't jitter
// between ticks.

use super::FlowCounters;
use crate::net::FlowKey;

/// One line of the ranked view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedRow {
    pub key: FlowKey,
    pub counters: FlowCounters,
}

impl RankedRow {
    /// Fixed-width row text, aligned with [`header_row`]
    pub fn format_row(&self) -> String {
        format!(
            "{:<15} {:<6} -> {:<15} {:<6} {:<10} {:<10}",
            self.key.src.addr.to_string(),
            self.key.src.port,
            self.key.dst.addr.to_string(),
            self.key.dst.port,
            self.counters.packets,
            self.counters.bytes,
        )
    }
}

/// Column labels for the header pane
pub fn header_row() -> String {
    format!(
        "{:<15} {:<6} -> {:<15} {:<6} {:<10} {:<10}",
        "src", "sport", "dst", "dport", "packets", "bytes"
    )
}

/// Top `limit` flows by byte count
pub fn rank<I>(entries: I, limit: usize) -> Vec<RankedRow>
where
    I: IntoIterator<Item = (FlowKey, FlowCounters)>,
{
    let mut rows: Vec<RankedRow> = entries
        .into_iter()
        .map(|(key, counters)| RankedRow { key, counters })
        .collect();
    rows.sort_by(|a, b| b.counters.bytes.cmp(&a.counters.bytes));
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::tests::key;
    use crate::flow::FlowTable;
    use crate::net::Endpoint;
    use proptest::prelude::*;
    use std::time::Duration;

    fn counters(packets: u64, bytes: u64) -> FlowCounters {
        FlowCounters { packets, bytes }
    }

    #[test]
    fn test_rank_orders_by_bytes_descending() {
        let entries = vec![
            (key(1), counters(2, 150)),
            (key(2), counters(1, 500)),
            (key(3), counters(9, 20)),
        ];
        let rows = rank(entries, 10);
        let order: Vec<FlowKey> = rows.iter().map(|r| r.key).collect();
        assert_eq!(order, vec![key(2), key(1), key(3)]);
    }

    #[test]
    fn test_rank_truncates() {
        let entries = vec![
            (key(1), counters(1, 1)),
            (key(2), counters(1, 2)),
            (key(3), counters(1, 3)),
        ];
        assert_eq!(rank(entries.clone(), 2).len(), 2);
        assert_eq!(rank(entries.clone(), 0).len(), 0);
        assert_eq!(rank(entries, 50).len(), 3);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut flows = FlowTable::default();
        flows.touch(key(1), 100, Duration::from_secs(1));
        flows.touch(key(2), 100, Duration::from_secs(2));

        for _ in 0..5 {
            let rows = rank(flows.snapshot(), 2);
            assert_eq!(rows[0].key, key(1));
            assert_eq!(rows[1].key, key(2));
        }

        // Touching B with zero bytes refreshes its recency, not its rank
        flows.touch(key(2), 0, Duration::from_secs(3));
        flows.touch(key(1), 0, Duration::from_secs(4));
        let rows = rank(flows.snapshot(), 2);
        assert_eq!(rows[0].key, key(1));
    }

    #[test]
    fn test_format_row_exact() {
        let row = RankedRow {
            key: FlowKey::new(
                Endpoint::new([192, 168, 100, 200], 51234),
                Endpoint::new([8, 8, 8, 8], 53),
            ),
            counters: counters(3, 1234),
        };
        assert_eq!(
            row.format_row(),
            "192.168.100.200 51234  -> 8.8.8.8         53     3          1234      "
        );
    }

    #[test]
    fn test_header_aligns_with_rows() {
        let header = header_row();
        assert_eq!(
            header,
            "src             sport  -> dst             dport  packets    bytes     "
        );

        let row = RankedRow {
            key: key(1),
            counters: counters(1, 1),
        };
        assert_eq!(header.len(), row.format_row().len());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Ranking is a pure function of its input
        #[test]
        fn prop_rank_is_idempotent(
            bytes in prop::collection::vec(0u64..5, 0..30),
            limit in 0usize..40,
        ) {
            let entries: Vec<(FlowKey, FlowCounters)> = bytes
                .iter()
                .enumerate()
                .map(|(i, b)| (key(i as u8), counters(1, *b)))
                .collect();

            let first = rank(entries.clone(), limit);
            let second = rank(entries.clone(), limit);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), limit.min(entries.len()));

            for pair in first.windows(2) {
                prop_assert!(pair[0].counters.bytes >= pair[1].counters.bytes);
                // Ties keep input order; key(i) encodes the input index
                if pair[0].counters.bytes == pair[1].counters.bytes {
                    prop_assert!(pair[0].key.src.port < pair[1].key.src.port);
                }
            }
        }
    }
}
