use arbor::{
    collect_focusable, focusable_sibling, Event, FocusState, Key, Label, Modifiers,
    SiblingDirection, Stack, Tree,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn three_items(tree: &mut Tree) -> (arbor::ComponentId, Vec<arbor::ComponentId>) {
    let root = tree.insert(Stack::column().focusable(true));
    let items: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|t| tree.insert(Label::new(*t).focusable(true)))
        .collect();
    tree.replace_children(root, items.clone());
    (root, items)
}

// ============================================================================
// FocusState
// ============================================================================

#[test]
fn test_focus_state_focus_and_blur() {
    let mut tree = Tree::new();
    let a = tree.insert(Label::new("a"));
    let mut state = FocusState::new();

    assert!(state.focus(a));
    assert!(!state.focus(a));
    assert_eq!(state.focused(), Some(a));
    assert!(state.blur());
    assert!(!state.blur());
}

// ============================================================================
// Focus requests
// ============================================================================

#[test]
fn test_request_focus_queues_events() {
    let mut tree = Tree::new();
    let (_, items) = three_items(&mut tree);

    assert!(tree.request_focus(items[0]));
    assert!(tree.request_focus(items[1]));

    let events = tree.take_events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], Event::FocusIn { target } if target == items[0]));
    assert!(matches!(events[1], Event::FocusOut { target } if target == items[0]));
    assert!(matches!(events[2], Event::FocusIn { target } if target == items[1]));
    assert!(tree.take_events().is_empty());
}

#[test]
fn test_request_focus_again_is_quiet() {
    let mut tree = Tree::new();
    let (_, items) = three_items(&mut tree);
    tree.request_focus(items[0]);
    tree.take_events();

    assert!(tree.request_focus(items[0]));
    assert!(tree.take_events().is_empty());
}

#[test]
fn test_request_focus_without_capability_is_noop() {
    let mut tree = Tree::new();
    let plain = tree.insert(Label::new("plain"));
    let disabled = tree.insert(Label::new("off").focusable(true).disabled(true));

    assert!(!tree.request_focus(plain));
    assert!(!tree.request_focus(disabled));
    assert_eq!(tree.focused(), None);
    assert!(tree.take_events().is_empty());
}

#[test]
fn test_request_focus_siblings() {
    let mut tree = Tree::new();
    let (_, items) = three_items(&mut tree);

    assert!(tree.request_focus_next(items[0]));
    assert_eq!(tree.focused(), Some(items[1]));

    assert!(tree.request_focus_previous(items[1]));
    assert_eq!(tree.focused(), Some(items[0]));

    // No sibling before the first or after the last
    assert!(!tree.request_focus_previous(items[0]));
    assert!(!tree.request_focus_next(items[2]));
    assert_eq!(tree.focused(), Some(items[0]));
}

#[test]
fn test_sibling_search_skips_unfocusable() {
    let mut tree = Tree::new();
    let root = tree.insert(Stack::column());
    let a = tree.insert(Label::new("a").focusable(true));
    let gap = tree.insert(Label::new("-"));
    let off = tree.insert(Label::new("off").focusable(true).disabled(true));
    let d = tree.insert(Label::new("d").focusable(true));
    tree.replace_children(root, vec![a, gap, off, d]);

    assert_eq!(focusable_sibling(&tree, a, SiblingDirection::Next), Some(d));
    assert_eq!(focusable_sibling(&tree, d, SiblingDirection::Previous), Some(a));
    assert_eq!(focusable_sibling(&tree, root, SiblingDirection::Next), None);
}

#[test]
fn test_collect_focusable_tree_order() {
    let mut tree = Tree::new();
    let (root, items) = three_items(&mut tree);

    let focusable = collect_focusable(&tree, root);
    assert_eq!(focusable, vec![root, items[0], items[1], items[2]]);
}

#[test]
fn test_removing_focused_clears_focus() {
    let mut tree = Tree::new();
    let (root, items) = three_items(&mut tree);
    tree.request_focus(items[1]);

    tree.remove(root);

    assert_eq!(tree.focused(), None);
}

#[test]
fn test_blur_queues_focus_out() {
    let mut tree = Tree::new();
    let (_, items) = three_items(&mut tree);
    tree.request_focus(items[2]);
    tree.take_events();

    assert!(tree.blur());
    let events = tree.take_events();
    assert!(matches!(events.as_slice(), [Event::FocusOut { target }] if *target == items[2]));
    assert!(!tree.blur());
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, PartialEq)]
struct Ping(u32);

#[test]
fn test_emitted_event_downcast() {
    let mut tree = Tree::new();
    let a = tree.insert(Label::new("a"));

    tree.emit(a, Ping(7));
    let events = tree.take_events();
    let Event::Emitted(emitted) = &events[0] else {
        panic!("expected emitted event");
    };

    assert_eq!(emitted.source, a);
    assert!(emitted.is::<Ping>());
    assert_eq!(emitted.downcast_ref::<Ping>(), Some(&Ping(7)));
    assert!(emitted.downcast_ref::<String>().is_none());
    assert_eq!(events[0].target(), Some(a));

    let copy = emitted.clone();
    assert!(copy.same_payload(emitted));
}

#[test]
fn test_key_conversion_from_crossterm() {
    let mut tree = Tree::new();
    let a = tree.insert(Label::new("a"));

    let press = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
    let event = Event::from_key_event(&press, Some(a)).unwrap();
    match event {
        Event::Key { target, key, modifiers } => {
            assert_eq!(target, Some(a));
            assert_eq!(key, Key::Down);
            assert!(modifiers.none());
        }
        other => panic!("unexpected {other:?}"),
    }

    let mut release = KeyEvent::new(KeyCode::Up, KeyModifiers::CONTROL);
    release.kind = KeyEventKind::Release;
    assert!(Event::from_key_event(&release, Some(a)).is_none());

    let mods: Modifiers = KeyModifiers::CONTROL.into();
    assert_eq!(mods, Modifiers::ctrl());
}
