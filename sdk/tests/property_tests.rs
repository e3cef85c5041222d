use proptest::prelude::*;
use sdk::errors::{EngineError, SaraErrorExt};
use sdk::types::SearchResponse;

proptest! {
    #[test]
    fn test_error_user_hint_never_leaks_detail(detail in "[a-z]{12,40}") {
        let errs = vec![
            EngineError::Config(detail.clone()),
            EngineError::Generation(detail.clone()),
            EngineError::Search(detail.clone()),
            EngineError::Network(detail.clone()),
        ];

        for err in errs {
            let hint = err.user_hint();
            prop_assert!(!hint.is_empty());
            prop_assert!(!hint.contains(&detail));
            prop_assert!(err.to_string().contains(&detail));
        }
    }
}

proptest! {
    #[test]
    fn test_first_snippet_is_first_item(snippets in prop::collection::vec("\\PC{0,40}", 0..6)) {
        let items: Vec<_> = snippets
            .iter()
            .map(|s| serde_json::json!({ "title": "t", "snippet": s }))
            .collect();
        let body = serde_json::json!({ "items": items });

        let response: SearchResponse = serde_json::from_value(body).unwrap();

        prop_assert_eq!(response.first_snippet(), Ok(snippets.first().map(String::as_str)));
    }
}
