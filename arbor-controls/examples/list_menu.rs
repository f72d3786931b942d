//! List + Menu Example
//!
//! A keyed file list with arrow key focus and a popup menu of actions.
//!
//! Keys: Up/Down move focus, `m` opens the menu, `1`-`9` pick a menu
//! option, `a` adds a file, `q` quits. Logs go to `list_menu.log`.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::rc::Rc;

use arbor::{Element, Event, Key, Label, Tree};
use arbor_controls::prelude::*;
use crossterm::event::{self as term, Event as TermEvent};
use crossterm::terminal;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Clone, Debug)]
struct FileItem {
    path: String,
    name: String,
}

impl Item for FileItem {
    type Key = String;

    fn key(&self) -> String {
        self.path.clone()
    }
}

fn file(i: usize) -> FileItem {
    FileItem {
        path: format!("/home/user/file{}.txt", i),
        name: format!("file{}.txt", i),
    }
}

type Screen = Rc<RefCell<Option<Element>>>;

fn draw(list: &Screen, menu: &Screen, status: &str) -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "\x1b[2J\x1b[H")?;
    if let Some(list) = list.borrow().as_ref() {
        for row in list.content.children() {
            let marker = if row.focused { ">" } else { " " };
            write!(out, "{} {}\r\n", marker, row.text_content())?;
        }
    }
    if let Some(menu) = menu.borrow().as_ref() {
        write!(out, "\r\n[menu]\r\n")?;
        for (i, option) in menu.content.children().iter().enumerate() {
            write!(out, "  {}. {}\r\n", i + 1, option.text_content())?;
        }
    }
    write!(out, "\r\n{}\r\n", status)?;
    out.flush()
}

fn run() -> io::Result<()> {
    let mut tree = Tree::new();
    let files = Collection::with_items((1..=5).map(file).collect());
    let mut next = 6;

    let mut list = ListController::new(&mut tree, |f: &FileItem| {
        Label::new(&f.name).focusable(true)
    });
    list.set_items(Some(files.clone()));
    list.set_max_items(Some(8));
    list.update(&mut tree);

    let list_screen: Screen = Rc::default();

    let mut menu = Menu::new(&default_theme()).map_err(io::Error::other)?;
    menu.add_option("open", "Open").add_option("delete", "Delete");
    menu.set_gravity(Some(Gravity::End));
    let menu_screen: Screen = Rc::default();

    let mut status = String::from("Up/Down to move, m for menu, q to quit");
    list.restore_focus(&mut tree);

    loop {
        // Let the list observe focus changes before drawing.
        for event in tree.take_events() {
            list.handle_event(&mut tree, &event);
            if let Some(Event::Emitted(selection)) = menu.handle_event(&tree, &event) {
                log::info!("menu selection {:?}", selection.type_name());
            }
        }
        if list.update(&mut tree) {
            log::debug!("list updated: {:?}", list);
        }
        list.render(&tree, {
            let sink = Rc::clone(&list_screen);
            move |el| *sink.borrow_mut() = el
        });
        draw(&list_screen, &menu_screen, &status)?;

        let TermEvent::Key(key_event) = term::read()? else {
            continue;
        };
        let Some(event) = Event::from_key_event(&key_event, tree.focused()) else {
            continue;
        };
        if list.handle_event(&mut tree, &event).is_handled() {
            continue;
        }

        let Event::Key { key, .. } = event else {
            continue;
        };
        match key {
            Key::Char('q') | Key::Escape => break,
            Key::Char('a') => {
                files.push(file(next));
                next += 1;
                status = format!("added file{}.txt", next - 1);
            }
            Key::Char('m') => {
                let sink = Rc::clone(&menu_screen);
                menu.render(&mut tree, move |el| *sink.borrow_mut() = el);
            }
            Key::Char(c @ '1'..='9') => {
                let Some(built) = menu.built() else {
                    continue;
                };
                let index = c as usize - '1' as usize;
                let Some(option) = menu.options().get(index).cloned() else {
                    continue;
                };
                MenuView::select(&mut tree, built, &option.key);
                for event in tree.take_events() {
                    menu.handle_event(&tree, &event);
                }
                status = apply(&mut tree, &list, &files, menu.selected());
                menu.dispose(&mut tree);
                *menu_screen.borrow_mut() = None;
                list.restore_focus(&mut tree);
            }
            _ => {}
        }
    }
    Ok(())
}

/// Run the selected menu action against the item at the remembered focus.
fn apply(
    tree: &mut Tree,
    list: &ListController<FileItem>,
    files: &Collection<FileItem>,
    action: Option<&str>,
) -> String {
    let index = list.first_index() + list.last_focused_index();
    let Some(item) = files.get(index) else {
        return "nothing focused".to_string();
    };
    match action {
        Some("open") => format!("opening {}", item.path),
        Some("delete") => {
            files.remove_key(&item.key());
            tree.blur();
            format!("deleted {}", item.name)
        }
        other => format!("unknown action {:?}", other),
    }
}

fn main() {
    // Set up file logging
    let log_file = File::create("list_menu.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    terminal::enable_raw_mode().expect("Failed to enable raw mode");
    let result = run();
    let _ = terminal::disable_raw_mode();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
