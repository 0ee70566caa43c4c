//! Property-based tests for control-target selection.
//!
//! Selection over an arbitrary tab set: only YouTube tabs are eligible,
//! video pages always beat non-video YouTube pages, recency decides within a
//! pool, and ties resolve to the first tab in query order.

use proptest::prelude::*;
use ytcontrols::managers::tab_coordinator::select_target;
use ytcontrols::types::tab::{is_youtube_url, is_youtube_video_url, TabId, TabInfo, WindowId};

#[derive(Debug, Clone, Copy)]
enum UrlKind {
    Other,
    Home,
    Watch,
    Shorts,
}

fn url_for(kind: UrlKind, n: usize) -> String {
    match kind {
        UrlKind::Other => format!("https://example.com/page/{}", n),
        UrlKind::Home => "https://www.youtube.com/feed/subscriptions".to_string(),
        UrlKind::Watch => format!("https://www.youtube.com/watch?v=v{}", n),
        UrlKind::Shorts => format!("https://www.youtube.com/shorts/s{}", n),
    }
}

fn arb_tabs() -> impl Strategy<Value = Vec<TabInfo>> {
    let kind = prop_oneof![
        Just(UrlKind::Other),
        Just(UrlKind::Home),
        Just(UrlKind::Watch),
        Just(UrlKind::Shorts),
    ];
    prop::collection::vec((kind, proptest::option::of(0u64..1000)), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(idx, (kind, last_accessed))| TabInfo {
                id: TabId(idx as u32 + 1),
                window_id: WindowId(1),
                url: url_for(kind, idx),
                active: false,
                last_accessed,
            })
            .collect()
    })
}

fn find<'a>(tabs: &'a [TabInfo], id: TabId) -> &'a TabInfo {
    tabs.iter().find(|t| t.id == id).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn selection_is_none_iff_no_youtube_tab(tabs in arb_tabs()) {
        let any_youtube = tabs.iter().any(|t| is_youtube_url(&t.url));
        prop_assert_eq!(select_target(&tabs).is_some(), any_youtube);
    }

    #[test]
    fn selected_tab_is_always_youtube(tabs in arb_tabs()) {
        if let Some(id) = select_target(&tabs) {
            prop_assert!(is_youtube_url(&find(&tabs, id).url));
        }
    }

    #[test]
    fn video_pages_beat_home_pages(tabs in arb_tabs()) {
        let any_video = tabs.iter().any(|t| is_youtube_video_url(&t.url));
        if let Some(id) = select_target(&tabs) {
            if any_video {
                prop_assert!(is_youtube_video_url(&find(&tabs, id).url));
            }
        }
    }

    #[test]
    fn selected_tab_is_most_recent_in_its_pool(tabs in arb_tabs()) {
        let Some(id) = select_target(&tabs) else {
            return Ok(());
        };
        let selected = find(&tabs, id);
        let in_pool = |t: &&TabInfo| {
            if is_youtube_video_url(&selected.url) {
                is_youtube_video_url(&t.url)
            } else {
                is_youtube_url(&t.url)
            }
        };
        let best = tabs
            .iter()
            .filter(in_pool)
            .map(|t| t.last_accessed.unwrap_or(0))
            .max()
            .unwrap();
        prop_assert_eq!(selected.last_accessed.unwrap_or(0), best);
    }

    #[test]
    fn ties_keep_the_first_tab_in_query_order(tabs in arb_tabs()) {
        let Some(id) = select_target(&tabs) else {
            return Ok(());
        };
        let selected = find(&tabs, id);
        let recency = selected.last_accessed.unwrap_or(0);
        // No earlier tab in the same pool shares the winning recency.
        for tab in &tabs {
            if tab.id == id {
                break;
            }
            let same_pool = if is_youtube_video_url(&selected.url) {
                is_youtube_video_url(&tab.url)
            } else {
                is_youtube_url(&tab.url) && !is_youtube_video_url(&tab.url)
            };
            if same_pool {
                prop_assert_ne!(tab.last_accessed.unwrap_or(0), recency);
            }
        }
    }

    #[test]
    fn selection_is_deterministic(tabs in arb_tabs()) {
        prop_assert_eq!(select_target(&tabs), select_target(&tabs));
    }
}
