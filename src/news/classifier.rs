// =============================================================================
// News Classifier — keyword routing into per-instrument buckets
// =============================================================================
//
// Single pass, deterministic, order-preserving. Each item is assigned to at
// most one bucket: keyword sets are tested in fixed EUR → GBP → JPY priority
// and the first match with spare capacity wins. Unassigned items carrying a
// generic market keyword then backfill under-capacity buckets in original
// order, never duplicating an item already placed anywhere. Buckets are
// finally padded with synthetic placeholders to exactly three entries.

use super::{BucketItem, NewsBuckets, NewsItem};

/// Served bucket size per instrument.
const BUCKET_CAPACITY: usize = 3;

// Keyword sets are fixed and non-overlapping: currency code, common names,
// central-bank abbreviation, and the bank chair's surname.
const EUR_KEYWORDS: &[&str] = &["eur", "euro", "eurozone", "ecb", "lagarde"];
const GBP_KEYWORDS: &[&str] = &["gbp", "pound", "sterling", "uk", "britain", "boe", "bailey"];
const JPY_KEYWORDS: &[&str] = &["jpy", "yen", "japan", "boj", "ueda"];

/// Broad market terms eligible for backfill into any bucket.
const GENERIC_KEYWORDS: &[&str] = &["forex", "dollar", "fx"];

fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Route `items` into per-instrument buckets of exactly [`BUCKET_CAPACITY`].
///
/// Invariants upheld:
/// - the number of real items placed never exceeds `items.len()`
/// - no single item instance appears in two buckets
/// - the same input always yields the same assignment (no hidden state)
pub fn classify(items: &[NewsItem]) -> NewsBuckets {
    let keyword_sets: [&[&str]; 3] = [EUR_KEYWORDS, GBP_KEYWORDS, JPY_KEYWORDS];

    let mut placed = vec![false; items.len()];
    let mut slots: [Vec<usize>; 3] = [Vec::new(), Vec::new(), Vec::new()];

    // --- Pass 1: keyword assignment, first match with capacity wins ---
    for (i, item) in items.iter().enumerate() {
        for (b, keywords) in keyword_sets.iter().enumerate() {
            if slots[b].len() < BUCKET_CAPACITY && matches_any(&item.search_text, keywords) {
                slots[b].push(i);
                placed[i] = true;
                break;
            }
        }
    }

    // --- Pass 2: generic backfill in original item order ---
    let generic: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(i, item)| !placed[*i] && matches_any(&item.search_text, GENERIC_KEYWORDS))
        .map(|(i, _)| i)
        .collect();

    for slot in &mut slots {
        let mut idx = 0;
        while slot.len() < BUCKET_CAPACITY && idx < generic.len() {
            let i = generic[idx];
            // An earlier bucket may have consumed this item during backfill.
            if !placed[i] {
                slot.push(i);
                placed[i] = true;
            }
            idx += 1;
        }
    }

    // --- Pass 3: materialize and pad with placeholders ---
    let mut buckets = NewsBuckets::default();
    for (slot, (instrument, bucket)) in slots.iter().zip(buckets.ordered_mut()) {
        for &i in slot {
            bucket.push(BucketItem::from(&items[i]));
        }
        while bucket.len() < BUCKET_CAPACITY {
            bucket.push(BucketItem {
                time: "Today".to_string(),
                headline: format!("{} News", instrument.key().to_uppercase()),
                url: instrument.default_news_url().to_string(),
            });
        }
    }

    buckets
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> NewsItem {
        NewsItem {
            time: "Just now".to_string(),
            headline: text.to_string(),
            url: format!("https://example.com/{}", text.replace(' ', "-")),
            search_text: text.to_string(),
        }
    }

    #[test]
    fn keyword_sets_do_not_overlap() {
        let sets = [EUR_KEYWORDS, GBP_KEYWORDS, JPY_KEYWORDS];
        for (a, set_a) in sets.iter().enumerate() {
            for (b, set_b) in sets.iter().enumerate() {
                if a == b {
                    continue;
                }
                for kw in *set_a {
                    assert!(!set_b.contains(kw), "keyword {kw} appears in two sets");
                }
            }
        }
    }

    #[test]
    fn routes_each_currency_and_backfills_generic() {
        let items = vec![
            item("ecb euro rate"),
            item("boe pound hike"),
            item("boj yen tokyo"),
            item("forex dollar flat"),
        ];
        let buckets = classify(&items);

        assert_eq!(buckets.eurusd[0].headline, "ecb euro rate");
        assert_eq!(buckets.gbpusd[0].headline, "boe pound hike");
        assert_eq!(buckets.usdjpy[0].headline, "boj yen tokyo");

        // The generic item backfills the first under-capacity bucket (EUR).
        assert_eq!(buckets.eurusd[1].headline, "forex dollar flat");
        assert!(!buckets.gbpusd.iter().any(|e| e.headline == "forex dollar flat"));
        assert!(!buckets.usdjpy.iter().any(|e| e.headline == "forex dollar flat"));

        // Every bucket is padded to exactly three entries.
        assert_eq!(buckets.eurusd.len(), 3);
        assert_eq!(buckets.gbpusd.len(), 3);
        assert_eq!(buckets.usdjpy.len(), 3);
        assert_eq!(buckets.gbpusd[1].headline, "GBPUSD News");
        assert_eq!(buckets.usdjpy[2].headline, "USDJPY News");
    }

    #[test]
    fn first_match_wins_in_priority_order() {
        // Matches both EUR and GBP keywords: EUR is tested first and wins.
        let items = vec![item("euro pound parity talk")];
        let buckets = classify(&items);
        assert_eq!(buckets.eurusd[0].headline, "euro pound parity talk");
        assert_eq!(buckets.gbpusd[0].headline, "GBPUSD News");
    }

    #[test]
    fn full_bucket_falls_through_to_next_match() {
        // Four EUR+GBP items: the first three fill EUR, the fourth falls
        // through the capacity check and lands in GBP.
        let items = vec![
            item("euro pound one"),
            item("euro pound two"),
            item("euro pound three"),
            item("euro pound four"),
        ];
        let buckets = classify(&items);
        assert_eq!(buckets.eurusd.len(), 3);
        assert_eq!(buckets.gbpusd[0].headline, "euro pound four");
    }

    #[test]
    fn no_item_appears_in_two_buckets() {
        let items = vec![
            item("ecb euro rate"),
            item("forex dollar flat"),
            item("dollar steadies"),
            item("fx volumes jump"),
        ];
        let buckets = classify(&items);

        let mut real: Vec<&str> = Vec::new();
        for bucket in [&buckets.eurusd, &buckets.gbpusd, &buckets.usdjpy] {
            for entry in bucket {
                if !entry.headline.ends_with(" News") {
                    real.push(&entry.headline);
                }
            }
        }
        let before = real.len();
        real.sort();
        real.dedup();
        assert_eq!(real.len(), before, "an item was placed twice");
        assert!(before <= items.len());
    }

    #[test]
    fn classification_is_idempotent() {
        let items = vec![
            item("ecb euro rate"),
            item("boe pound hike"),
            item("forex dollar flat"),
            item("yen slides"),
        ];
        let first = classify(&items);
        let second = classify(&items);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_input_yields_all_placeholders() {
        let buckets = classify(&[]);
        assert_eq!(buckets.total_entries(), 9);
        assert_eq!(buckets.eurusd[0].headline, "EURUSD News");
        assert_eq!(buckets.eurusd[0].url, "https://www.forex.com/en-us/news-and-analysis/");
    }

    #[test]
    fn unmatched_items_are_dropped() {
        // Neither currency-specific nor generic: the item is left out.
        let items = vec![item("gold futures rally")];
        let buckets = classify(&items);
        for bucket in [&buckets.eurusd, &buckets.gbpusd, &buckets.usdjpy] {
            assert!(bucket.iter().all(|e| e.headline.ends_with(" News")));
        }
    }

    #[test]
    fn seed_list_classification_is_deterministic() {
        let buckets = classify(&super::super::seed_items());
        assert_eq!(buckets.eurusd.len(), 3);
        assert_eq!(buckets.gbpusd.len(), 3);
        assert_eq!(buckets.usdjpy.len(), 3);
        // The ECB headline lands in the EUR bucket, the pound climb in GBP.
        assert!(buckets.eurusd[0].headline.contains("ECB"));
        assert!(buckets.gbpusd[0].headline.contains("GBP/USD"));
        assert!(buckets.usdjpy[0].headline.contains("USD/JPY"));
    }
}
