use proptest::prelude::*;
use sara_engine::intent::{self, Strategy};
use sara_engine::memory::{MemoryBuffer, NO_HISTORY};
use sara_engine::prompt;
use sara_engine::quality;

proptest! {
    #[test]
    fn test_memory_keeps_most_recent_in_order(
        capacity in 1usize..8,
        utterances in prop::collection::vec("[a-z ]{1,12}", 0..20),
    ) {
        let mut memory = MemoryBuffer::with_capacity(capacity);
        for u in &utterances {
            memory.record(u.as_str());
        }

        let keep = utterances.len().min(capacity);
        let expected: Vec<&str> = utterances[utterances.len() - keep..]
            .iter()
            .map(String::as_str)
            .collect();

        prop_assert_eq!(memory.entries().collect::<Vec<_>>(), expected);
        prop_assert!(memory.len() <= capacity);
    }

    #[test]
    fn test_context_never_contains_current_turn(
        earlier in prop::collection::vec("[a-z]{1,8}", 0..4),
        current in "[A-Z]{1,8}",
    ) {
        let mut memory = MemoryBuffer::new();
        for u in &earlier {
            memory.record(u.as_str());
        }

        let context = memory.record(current.as_str());

        prop_assert_eq!(context.entries(), earlier.as_slice());
        if earlier.is_empty() {
            prop_assert_eq!(context.to_string(), NO_HISTORY);
        }
    }

    #[test]
    fn test_identity_beats_everything(
        prefix in "[a-z ]{0,10}",
        suffix in "[a-z ]{0,10}",
    ) {
        let utterance = format!("{}who are you, what time is the weather, my name{}", prefix, suffix);
        prop_assert_eq!(intent::classify(&utterance), Strategy::IdentityQuery);
    }

    #[test]
    fn test_classification_ignores_case(utterance in "[a-zA-Z ]{0,30}") {
        prop_assert_eq!(
            intent::classify(&utterance),
            intent::classify(&utterance.to_uppercase())
        );
    }

    #[test]
    fn test_gate_rejects_any_question_mark(
        before in "[a-zA-Z ]{0,20}",
        after in "[a-zA-Z ]{0,20}",
    ) {
        let answer = format!("{}?{}", before, after);
        prop_assert!(!quality::accept(&answer));
    }

    #[test]
    fn test_question_prompt_ends_with_utterance(utterance in "what [a-z ]{0,20}") {
        let memory = MemoryBuffer::new();
        let built = prompt::build(
            &memory_context(memory),
            sara_engine::persona::Trait::Witty,
            &utterance,
            true,
        );
        prop_assert!(built.ends_with(&utterance));
        prop_assert!(built.contains("witty assistant"));
    }
}

fn memory_context(mut memory: MemoryBuffer) -> sara_engine::memory::Context {
    memory.record("seed")
}
