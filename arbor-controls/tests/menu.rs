//! Tests for the menu build cycle and selection handling.

use std::cell::RefCell;
use std::rc::Rc;

use arbor::{Element, Event, Label, Tree, Widget};
use arbor_controls::menu::MenuFactory;
use arbor_controls::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Add(String, String),
    Gravity(Gravity),
    Build,
}

/// Builder that records every call and builds plain labels.
struct RecordingBuilder {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl MenuBuilder for RecordingBuilder {
    fn clear(&mut self) {
        self.calls.borrow_mut().push(Call::Clear);
    }

    fn add_option(&mut self, key: &str, text: &str) {
        self.calls
            .borrow_mut()
            .push(Call::Add(key.to_string(), text.to_string()));
    }

    fn set_gravity(&mut self, gravity: Gravity) {
        self.calls.borrow_mut().push(Call::Gravity(gravity));
    }

    fn build(&mut self) -> MenuFactory {
        self.calls.borrow_mut().push(Call::Build);
        Box::new(|| -> Box<dyn Widget> { Box::new(Label::new("menu").focusable(true)) })
    }
}

fn recording_menu() -> (Menu, Rc<RefCell<Vec<Call>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let builder = RecordingBuilder {
        calls: Rc::clone(&calls),
    };
    (Menu::with_builder(Box::new(builder)), calls)
}

fn add(key: &str, text: &str) -> Call {
    Call::Add(key.to_string(), text.to_string())
}

fn noop(_: Option<Element>) {}

// ============================================================================
// Build cycle
// ============================================================================

#[test]
fn test_render_feeds_builder_in_order() {
    let mut tree = Tree::new();
    let (mut menu, calls) = recording_menu();
    menu.add_option("k1", "One").add_option("k2", "Two");

    let built = menu.render(&mut tree, noop);

    assert_eq!(
        *calls.borrow(),
        vec![Call::Clear, add("k1", "One"), add("k2", "Two"), Call::Build]
    );
    assert_eq!(menu.built(), Some(built));
    assert!(tree.contains(built));
}

#[test]
fn test_gravity_is_applied_before_build() {
    let mut tree = Tree::new();
    let (mut menu, calls) = recording_menu();
    menu.add_option("k1", "One");
    menu.set_gravity(Some(Gravity::End));

    menu.render(&mut tree, noop);

    assert_eq!(
        *calls.borrow(),
        vec![
            Call::Clear,
            add("k1", "One"),
            Call::Gravity(Gravity::End),
            Call::Build
        ]
    );
}

#[test]
fn test_build_hooks_run_after_options() {
    let mut tree = Tree::new();
    let (mut menu, calls) = recording_menu();
    menu.add_option("k1", "One");
    menu.on_build(|builder| builder.add_option("extra", "Extra"));

    menu.render(&mut tree, noop);

    assert_eq!(
        *calls.borrow(),
        vec![
            Call::Clear,
            add("k1", "One"),
            add("extra", "Extra"),
            Call::Build
        ]
    );
    assert_eq!(menu.options().len(), 1);
}

#[test]
fn test_rerender_replaces_built_component() {
    let mut tree = Tree::new();
    let (mut menu, calls) = recording_menu();
    menu.add_option("k1", "One");
    let first = menu.render(&mut tree, noop);

    menu.clear_options();
    menu.add_option("k2", "Two");
    let outputs = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&outputs);
    let second = menu.render(&mut tree, move |output| {
        assert!(output.is_some());
        *counter.borrow_mut() += 1;
    });

    assert_ne!(first, second);
    assert!(!tree.contains(first));
    assert!(tree.contains(second));
    assert_eq!(*outputs.borrow(), 1);

    let builds = calls.borrow().iter().filter(|c| **c == Call::Build).count();
    assert_eq!(builds, 2);
    assert_eq!(calls.borrow()[3..], [Call::Clear, add("k2", "Two"), Call::Build]);
}

#[test]
fn test_dispose_releases_built_component() {
    let mut tree = Tree::new();
    let (mut menu, _) = recording_menu();
    let built = menu.render(&mut tree, noop);

    menu.dispose(&mut tree);

    assert!(!tree.contains(built));
    assert_eq!(menu.built(), None);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_selection_is_recorded_and_reemitted() {
    let mut tree = Tree::new();
    let (mut menu, _) = recording_menu();
    menu.add_option("k1", "One").add_option("k2", "Two");
    let built = menu.render(&mut tree, noop);

    tree.emit(built, MenuItemSelectedEvent::new("k2"));
    let events = tree.take_events();
    let reemitted = menu.handle_event(&tree, &events[0]);

    assert_eq!(menu.selected(), Some("k2"));
    let Some(Event::Emitted(reemitted)) = reemitted else {
        panic!("expected re-emitted selection");
    };
    let Event::Emitted(original) = &events[0] else {
        panic!("expected emitted event");
    };
    assert!(reemitted.same_payload(original));
    assert_eq!(reemitted.source, built);
    assert_eq!(
        reemitted.downcast_ref::<MenuItemSelectedEvent>(),
        Some(&MenuItemSelectedEvent::new("k2"))
    );
}

#[test]
fn test_selection_from_nested_component() {
    let mut tree = Tree::new();
    let (mut menu, _) = recording_menu();
    let built = menu.render(&mut tree, noop);
    let item = tree.insert(Label::new("k1"));
    tree.append_child(built, item);

    tree.emit(item, MenuItemSelectedEvent::new("k1"));
    let events = tree.take_events();

    assert!(menu.handle_event(&tree, &events[0]).is_some());
    assert_eq!(menu.selected(), Some("k1"));
}

#[test]
fn test_selection_from_outside_is_ignored() {
    let mut tree = Tree::new();
    let (mut menu, _) = recording_menu();
    menu.render(&mut tree, noop);
    let stranger = tree.insert(Label::new("other"));

    tree.emit(stranger, MenuItemSelectedEvent::new("k1"));
    let events = tree.take_events();

    assert!(menu.handle_event(&tree, &events[0]).is_none());
    assert_eq!(menu.selected(), None);
}

#[test]
fn test_other_events_are_ignored() {
    let mut tree = Tree::new();
    let (mut menu, _) = recording_menu();
    let built = menu.render(&mut tree, noop);

    tree.emit(built, String::from("k1"));
    tree.request_focus(built);
    for event in tree.take_events() {
        assert!(menu.handle_event(&tree, &event).is_none());
    }
    assert_eq!(menu.selected(), None);
}

#[test]
fn test_unbuilt_menu_ignores_selection() {
    let mut tree = Tree::new();
    let (mut menu, _) = recording_menu();
    let source = tree.insert(Label::new("x"));

    tree.emit(source, MenuItemSelectedEvent::new("k1"));
    let events = tree.take_events();

    assert!(menu.handle_event(&tree, &events[0]).is_none());
}

// ============================================================================
// Themes
// ============================================================================

#[test]
fn test_missing_builder_is_an_error() {
    let err = Menu::new(&Theme::new("bare")).unwrap_err();

    assert_eq!(
        err,
        ControlError::MissingMenuBuilder {
            theme: "bare".to_string()
        }
    );
    assert!(err.to_string().contains("'bare'"));
}

#[test]
fn test_default_theme_builds_menu_view() {
    let mut tree = Tree::new();
    let mut menu = Menu::new(&default_theme()).unwrap();
    menu.add_option("open", "Open").add_option("save", "Save");
    menu.set_gravity(Some(Gravity::Stretch));

    let output = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&output);
    let built = menu.render(&mut tree, move |el| *sink.borrow_mut() = el);

    let view = tree.widget::<MenuView>(built).unwrap();
    assert_eq!(view.gravity, Gravity::Stretch);
    assert_eq!(view.options[1], MenuOption::new("save", "Save"));

    let output = output.borrow();
    let element = output.as_ref().unwrap();
    assert_eq!(element.get_data("role").map(String::as_str), Some("menu"));
    assert_eq!(element.get_data("gravity").map(String::as_str), Some("stretch"));
    let keys: Vec<_> = element
        .content
        .children()
        .iter()
        .filter_map(|child| child.get_data("key").cloned())
        .collect();
    assert_eq!(keys, vec!["open", "save"]);
}

#[test]
fn test_menu_view_select() {
    let mut tree = Tree::new();
    let mut menu = Menu::new(&Theme::default()).unwrap();
    menu.add_option("open", "Open");
    let built = menu.render(&mut tree, noop);

    assert!(!MenuView::select(&mut tree, built, "missing"));
    assert!(tree.take_events().is_empty());

    assert!(MenuView::select(&mut tree, built, "open"));
    let events = tree.take_events();
    assert!(menu.handle_event(&tree, &events[0]).is_some());
    assert_eq!(menu.selected(), Some("open"));
}

#[test]
fn test_stack_builder_clears_between_cycles() {
    let mut builder = StackMenuBuilder::new();
    builder.add_option("a", "A");
    builder.set_gravity(Gravity::End);

    builder.clear();

    assert!(builder.options().is_empty());
    assert_eq!(builder.gravity(), Gravity::Start);
}
