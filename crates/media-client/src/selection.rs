//! Cover candidate selection: filter, order, and sample library items.

use chrono::{DateTime, FixedOffset};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::api::MediaItem;

/// Pick up to `count` items whose covers will fill the collage.
///
/// Items without a `Primary` image tag are dropped. When any remaining
/// item carries a date (`DateLastMediaAdded` preferred over
/// `DateCreated`), the dated items are kept in newest-first order and
/// undated ones are ignored. When no item has a date the filtered list is
/// shuffled with the supplied RNG instead.
pub fn select_cover_items(
    items: Vec<MediaItem>,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<MediaItem> {
    let total = items.len();
    let mut filtered: Vec<MediaItem> = items
        .into_iter()
        .filter(MediaItem::has_primary_image)
        .collect();
    info!(
        kept = filtered.len(),
        total, "Filtered items with primary covers"
    );
    if filtered.is_empty() {
        return Vec::new();
    }

    let mut dated: Vec<(MediaItem, DateTime<FixedOffset>)> = filtered
        .iter()
        .filter_map(|item| item_date(item).map(|d| (item.clone(), d)))
        .collect();

    let mut selected = if dated.is_empty() {
        debug!("No date fields found, shuffling candidates");
        filtered.shuffle(rng);
        filtered
    } else {
        dated.sort_by(|a, b| b.1.cmp(&a.1));
        dated.into_iter().map(|(item, _)| item).collect()
    };

    selected.truncate(count);
    selected
}

/// The item's ordering date: last media added when present, otherwise the
/// creation date. Unparseable timestamps count as undated.
fn item_date(item: &MediaItem) -> Option<DateTime<FixedOffset>> {
    item.date_last_media_added
        .as_deref()
        .or(item.date_created.as_deref())
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn item(id: &str, primary: bool, created: Option<&str>, added: Option<&str>) -> MediaItem {
        let mut image_tags = HashMap::new();
        if primary {
            image_tags.insert("Primary".to_string(), "tag".to_string());
        }
        MediaItem {
            id: id.to_string(),
            name: id.to_string(),
            image_tags,
            date_created: created.map(String::from),
            date_last_media_added: added.map(String::from),
        }
    }

    fn ids(items: &[MediaItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn items_without_primary_cover_never_survive() {
        let mut rng = StdRng::seed_from_u64(1);
        let selected = select_cover_items(
            vec![
                item("a", false, Some("2024-01-01T00:00:00Z"), None),
                item("b", true, Some("2024-01-02T00:00:00Z"), None),
            ],
            9,
            &mut rng,
        );
        assert_eq!(ids(&selected), ["b"]);
    }

    #[test]
    fn dated_items_sort_newest_first() {
        let mut rng = StdRng::seed_from_u64(2);
        let selected = select_cover_items(
            vec![
                item("old", true, Some("2023-01-01T00:00:00Z"), None),
                item("new", true, Some("2024-06-01T00:00:00Z"), None),
                item("mid", true, Some("2024-01-01T00:00:00Z"), None),
            ],
            9,
            &mut rng,
        );
        assert_eq!(ids(&selected), ["new", "mid", "old"]);
    }

    #[test]
    fn last_media_added_wins_over_date_created() {
        let mut rng = StdRng::seed_from_u64(3);
        let selected = select_cover_items(
            vec![
                // Created recently but last refreshed long ago.
                item(
                    "stale",
                    true,
                    Some("2024-06-01T00:00:00Z"),
                    Some("2023-01-01T00:00:00Z"),
                ),
                item("fresh", true, Some("2024-01-01T00:00:00Z"), None),
            ],
            9,
            &mut rng,
        );
        assert_eq!(ids(&selected), ["fresh", "stale"]);
    }

    #[test]
    fn undated_items_drop_out_when_any_date_exists() {
        let mut rng = StdRng::seed_from_u64(4);
        let selected = select_cover_items(
            vec![
                item("dated", true, Some("2024-01-01T00:00:00Z"), None),
                item("undated", true, None, None),
            ],
            9,
            &mut rng,
        );
        assert_eq!(ids(&selected), ["dated"]);
    }

    #[test]
    fn all_undated_input_is_shuffled_not_dropped() {
        let mut rng = StdRng::seed_from_u64(5);
        let input: Vec<MediaItem> = (0..8).map(|i| item(&format!("i{i}"), true, None, None)).collect();
        let selected = select_cover_items(input, 20, &mut rng);

        assert_eq!(selected.len(), 8);
        let mut got = ids(&selected);
        got.sort_unstable();
        let mut expected: Vec<String> = (0..8).map(|i| format!("i{i}")).collect();
        expected.sort_unstable();
        assert_eq!(got, expected);
    }

    #[test]
    fn selection_truncates_to_count() {
        let mut rng = StdRng::seed_from_u64(6);
        let input: Vec<MediaItem> = (0..20)
            .map(|i| {
                item(
                    &format!("i{i}"),
                    true,
                    Some(&format!("2024-01-{:02}T00:00:00Z", i + 1)),
                    None,
                )
            })
            .collect();
        let selected = select_cover_items(input, 9, &mut rng);
        assert_eq!(selected.len(), 9);
        assert_eq!(selected[0].id, "i19");
    }

    #[test]
    fn fractional_second_timestamps_parse() {
        let it = item("x", true, None, Some("2024-05-01T10:00:00.1234567Z"));
        assert!(item_date(&it).is_some());
    }
}
