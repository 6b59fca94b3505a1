//! Property-based tests for sequence resolution.
//!
//! These exercise randomly generated chord paths and count prefixes to catch
//! edge cases the hand-written scenarios miss.

use proptest::prelude::*;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wren_keymap::{
    ActionHandler, Command, CommandArgument, ContextId, ContextRegistry, FeedOutcome, KeyMap,
    KeyPath, WidgetId,
};

const WIDGET: WidgetId = WidgetId(0);

#[derive(Default)]
struct Recorder {
    calls: Vec<(String, u32)>,
}

impl ActionHandler for Recorder {
    fn invoke(&mut self, command: &Command, arg: CommandArgument<'_>) -> anyhow::Result<()> {
        self.calls.push((command.name().to_string(), arg.count));
        Ok(())
    }
}

/// Chord paths of lowercase letters; letters only, so count parsing and
/// digit handling never interfere with the path itself.
fn chord_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

fn registry_with(path: &str) -> ContextRegistry {
    let mut map = KeyMap::new("browser");
    map.bind([KeyPath::chars(path)], Command::new("probe"));
    map.finalize().unwrap();
    let mut registry = ContextRegistry::new();
    registry.install(ContextId::Browser, map).unwrap();
    registry
}

fn feed_str(registry: &mut ContextRegistry, recorder: &mut Recorder, s: &str) -> Vec<FeedOutcome> {
    s.chars()
        .map(|c| {
            registry
                .feed(
                    ContextId::Browser,
                    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
                    WIDGET,
                    recorder,
                )
                .unwrap()
        })
        .collect()
}

proptest! {
    #[test]
    fn feeding_a_bound_chord_dispatches_exactly_once(chord in chord_strategy()) {
        let mut registry = registry_with(&chord);
        let mut recorder = Recorder::default();

        let outcomes = feed_str(&mut registry, &mut recorder, &chord);

        prop_assert_eq!(recorder.calls.len(), 1);
        prop_assert_eq!(recorder.calls[0].clone(), ("probe".to_string(), 1));
        // Every press before the last is pending, the last dispatches.
        for outcome in &outcomes[..outcomes.len() - 1] {
            prop_assert!(matches!(outcome, FeedOutcome::Pending { .. }), "expected Pending outcome");
        }
        prop_assert_eq!(outcomes.last().unwrap().clone(), FeedOutcome::Dispatched);
    }

    #[test]
    fn count_prefix_is_delivered_verbatim(chord in chord_strategy(), count in 1u32..=9999) {
        let mut registry = registry_with(&chord);
        let mut recorder = Recorder::default();

        feed_str(&mut registry, &mut recorder, &format!("{}{}", count, chord));

        prop_assert_eq!(recorder.calls.len(), 1);
        prop_assert_eq!(recorder.calls[0].1, count);
    }

    #[test]
    fn unrelated_first_press_fails_without_dispatch(chord in chord_strategy()) {
        let mut registry = registry_with(&chord);
        let mut recorder = Recorder::default();

        let first = chord.chars().next().unwrap();
        let unrelated = if first == 'z' { 'y' } else { 'z' };
        prop_assume!(!chord.starts_with(unrelated));

        let outcomes = feed_str(&mut registry, &mut recorder, &unrelated.to_string());

        prop_assert_eq!(outcomes, vec![FeedOutcome::Failed]);
        prop_assert!(recorder.calls.is_empty());
    }

    #[test]
    fn resolution_resets_for_the_next_cycle(chord in chord_strategy()) {
        let mut registry = registry_with(&chord);
        let mut recorder = Recorder::default();

        feed_str(&mut registry, &mut recorder, &chord);
        feed_str(&mut registry, &mut recorder, &chord);

        prop_assert_eq!(recorder.calls.len(), 2);
    }
}
