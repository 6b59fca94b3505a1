//! Tests for the assembled default binding tables.
//!
//! Tests cover:
//! - The vim chords and count prefixes in the browser context.
//! - Console typing through the printable-character wildcard.
//! - Bookmark wildcard capture and hint display.
//! - User override application and whole-table rejection.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use wren_config::{KeymapOverrides, OverrideAction};
use wren_input::build_registry;
use wren_keymap::{
    ActionHandler, Command, CommandArgument, ContextId, ContextRegistry, FeedOutcome, KeyPress,
    WidgetId,
};

const WIDGET: WidgetId = WidgetId(7);

#[derive(Default)]
struct Recorder {
    calls: Vec<(Command, u32, Option<KeyPress>)>,
}

impl Recorder {
    fn names(&self) -> Vec<&str> {
        self.calls.iter().map(|(cmd, _, _)| cmd.name()).collect()
    }
}

impl ActionHandler for Recorder {
    fn invoke(&mut self, command: &Command, arg: CommandArgument<'_>) -> anyhow::Result<()> {
        self.calls.push((command.clone(), arg.count, arg.capture));
        Ok(())
    }
}

fn registry() -> ContextRegistry {
    build_registry(&KeymapOverrides::default()).unwrap()
}

fn feed_chars(
    registry: &mut ContextRegistry,
    context: ContextId,
    recorder: &mut Recorder,
    s: &str,
) -> FeedOutcome {
    let mut outcome = FeedOutcome::Failed;
    for c in s.chars() {
        outcome = registry
            .feed(
                context,
                KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
                WIDGET,
                recorder,
            )
            .unwrap();
    }
    outcome
}

fn feed_key(
    registry: &mut ContextRegistry,
    context: ContextId,
    recorder: &mut Recorder,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> FeedOutcome {
    registry
        .feed(context, KeyEvent::new(code, modifiers), WIDGET, recorder)
        .unwrap()
}

#[test]
fn test_browser_vim_chords() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "gg");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "G");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "j");

    assert_eq!(recorder.names(), vec!["move", "move", "move"]);
    assert_eq!(recorder.calls[0].0.param("absolute"), Some(&json!(0)));
    assert_eq!(recorder.calls[1].0.param("absolute"), Some(&json!(-1)));
    assert_eq!(recorder.calls[2].0.param("relative"), Some(&json!(1)));
}

#[test]
fn test_browser_count_prefix() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "23j");

    assert_eq!(recorder.calls.len(), 1);
    assert_eq!(recorder.calls[0].1, 23);
}

#[test]
fn test_browser_file_operations() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "yy");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "dd");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "pp");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "pl");

    assert_eq!(recorder.names(), vec!["copy", "cut", "paste", "paste_symlink"]);
}

#[test]
fn test_browser_paste_hint_is_pending() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    let outcome = feed_chars(&mut registry, ContextId::Browser, &mut recorder, "p");
    match outcome {
        FeedOutcome::Pending { hint: Some(hint) } => {
            assert!(hint.contains("confirm pasting"));
        }
        other => panic!("expected a hinted pending outcome, got {:?}", other),
    }
    assert!(recorder.calls.is_empty());
    registry.reset(ContextId::Browser).unwrap();
}

#[test]
fn test_browser_sort_chords() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "os");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "oS");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "Ot");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "or");

    assert_eq!(
        recorder.names(),
        vec!["sort", "sort", "sort", "toggle_sort_reverse"]
    );
    assert_eq!(recorder.calls[0].0.param("reverse"), Some(&json!(false)));
    assert_eq!(recorder.calls[1].0.param("reverse"), Some(&json!(true)));
    assert_eq!(recorder.calls[2].0.param("reverse"), Some(&json!(true)));
}

#[test]
fn test_browser_directory_jumps() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "ge");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "g/");

    assert_eq!(recorder.names(), vec!["cd", "cd"]);
    assert_eq!(recorder.calls[0].0.param("path"), Some(&json!("/etc")));
    assert_eq!(recorder.calls[1].0.param("path"), Some(&json!("/")));
}

#[test]
fn test_browser_bookmark_wildcards() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "ma");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "'a");
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "umz");

    assert_eq!(
        recorder.names(),
        vec!["set_bookmark", "enter_bookmark", "unset_bookmark"]
    );
    assert_eq!(recorder.calls[0].2, Some(KeyPress::char('a')));
    assert_eq!(recorder.calls[1].2, Some(KeyPress::char('a')));
    assert_eq!(recorder.calls[2].2, Some(KeyPress::char('z')));
}

#[test]
fn test_browser_control_chords() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_key(
        &mut registry,
        ContextId::Browser,
        &mut recorder,
        KeyCode::Char('r'),
        KeyModifiers::CONTROL,
    );
    feed_key(
        &mut registry,
        ContextId::Browser,
        &mut recorder,
        KeyCode::Char('p'),
        KeyModifiers::CONTROL,
    );

    assert_eq!(recorder.names(), vec!["reset", "display_log"]);
}

#[test]
fn test_browser_arrow_keys_match_their_aliased_chords() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_key(
        &mut registry,
        ContextId::Browser,
        &mut recorder,
        KeyCode::Down,
        KeyModifiers::NONE,
    );
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "j");

    assert_eq!(recorder.calls[0].0, recorder.calls[1].0);
}

#[test]
fn test_console_types_printable_characters() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_chars(&mut registry, ContextId::Console, &mut recorder, "cd 23");

    assert_eq!(recorder.calls.len(), 5);
    assert!(recorder.names().iter().all(|name| *name == "console_type"));
    // Digits type instead of starting a count: console disables prefixes.
    assert_eq!(recorder.calls[3].2, Some(KeyPress::char('2')));
    assert_eq!(recorder.calls[4].2, Some(KeyPress::char('3')));
}

#[test]
fn test_console_editing_chords_beat_the_wildcard() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_key(
        &mut registry,
        ContextId::Console,
        &mut recorder,
        KeyCode::Char('w'),
        KeyModifiers::CONTROL,
    );
    feed_key(
        &mut registry,
        ContextId::Console,
        &mut recorder,
        KeyCode::Enter,
        KeyModifiers::NONE,
    );

    assert_eq!(recorder.names(), vec!["console_delete_word", "console_execute"]);
}

#[test]
fn test_pager_scrolling_and_close() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_chars(&mut registry, ContextId::Pager, &mut recorder, "d");
    feed_chars(&mut registry, ContextId::Pager, &mut recorder, "u");
    feed_chars(&mut registry, ContextId::Pager, &mut recorder, "q");

    assert_eq!(recorder.names(), vec!["move", "move", "close_pager"]);
    assert_eq!(recorder.calls[0].0.param("pages"), Some(&json!(1.0)));
    assert_eq!(recorder.calls[1].0.param("pages"), Some(&json!(-1.0)));
}

#[test]
fn test_taskview_operations() {
    let mut registry = registry();
    let mut recorder = Recorder::default();

    feed_chars(&mut registry, ContextId::TaskView, &mut recorder, "dd");
    feed_chars(&mut registry, ContextId::TaskView, &mut recorder, "J");
    feed_chars(&mut registry, ContextId::TaskView, &mut recorder, "w");

    assert_eq!(recorder.names(), vec!["task_remove", "task_move", "close_taskview"]);
}

#[test]
fn test_every_context_is_installed() {
    let registry = registry();
    for context in [
        ContextId::Browser,
        ContextId::Console,
        ContextId::Pager,
        ContextId::TaskView,
    ] {
        assert!(registry.keymap(context).is_some(), "missing {}", context);
    }
}

#[test]
fn test_override_rebinds_quit() {
    let mut overrides = KeymapOverrides::default();
    overrides
        .overrides
        .insert(OverrideAction::Quit, "<f12>".to_string());
    let mut registry = build_registry(&overrides).unwrap();
    let mut recorder = Recorder::default();

    feed_key(
        &mut registry,
        ContextId::Browser,
        &mut recorder,
        KeyCode::F(12),
        KeyModifiers::NONE,
    );

    assert_eq!(recorder.names(), vec!["quit"]);
}

#[test]
fn test_invalid_override_table_keeps_defaults() {
    let mut overrides = KeymapOverrides::default();
    overrides
        .overrides
        .insert(OverrideAction::Quit, "<broken".to_string());
    let mut registry = build_registry(&overrides).unwrap();
    let mut recorder = Recorder::default();

    // Defaults still work, the broken table was rejected wholesale.
    feed_chars(&mut registry, ContextId::Browser, &mut recorder, "Q");
    assert_eq!(recorder.names(), vec!["quit"]);
}
