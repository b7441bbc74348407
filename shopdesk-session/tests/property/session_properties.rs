use proptest::prelude::*;

use shopdesk_core::models::{Category, ConversationTurn};
use shopdesk_session::SessionManager;

proptest! {
    #[test]
    fn history_never_exceeds_ten_turns(n in 1usize..60) {
        let manager = SessionManager::new();
        for i in 0..n {
            let len = manager.record_turn("s", ConversationTurn::new(format!("q{i}"), vec![Category::Misc]));
            prop_assert!(len <= 10);
        }
    }

    #[test]
    fn eviction_keeps_the_newest_turns_in_order(n in 1usize..60) {
        let manager = SessionManager::new();
        for i in 0..n {
            manager.record_turn("s", ConversationTurn::new(format!("{i}"), vec![Category::Misc]));
        }
        let kept: Vec<usize> = manager
            .get_session("s")
            .unwrap()
            .turns()
            .iter()
            .map(|t| t.raw_query.parse().unwrap())
            .collect();
        prop_assert_eq!(*kept.last().unwrap(), n - 1);
        prop_assert!(kept.windows(2).all(|w| w[1] == w[0] + 1));
    }
}
