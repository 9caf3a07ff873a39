//! Scripted terminal demo of the combo controller.
//!
//! Drives one controller through a typing/commit session and a multi-select
//! session with a host-fetched page, printing every emitted signal. Time is
//! virtual; the script advances it explicitly.

use catalog::ComboOption;
use combo_core::{ComboController, ComboEvent, ItemHost, Key};
use core_types::{Align, ScrollInfo};
use std::cell::RefCell;
use std::rc::Rc;

const ROW_HEIGHT: f32 = 20.0;

/// Minimal in-memory host: a fixed option list and a scrollable viewport.
#[derive(Debug)]
struct DemoHost {
    options: Vec<ComboOption>,
    scroll: ScrollInfo,
    active: Option<usize>,
}

impl DemoHost {
    fn new(entries: &[(&str, &str)]) -> Self {
        let options: Vec<ComboOption> = entries
            .iter()
            .map(|(value, text)| ComboOption::new(*value, *text))
            .collect();
        let scroll = ScrollInfo {
            offset: 0.0,
            viewport: 3.0 * ROW_HEIGHT,
            content: options.len() as f32 * ROW_HEIGHT,
        };
        Self {
            options,
            scroll,
            active: None,
        }
    }
}

impl ItemHost for DemoHost {
    fn options(&self) -> Vec<ComboOption> {
        self.options.clone()
    }

    fn rendered_items(&self) -> Vec<ComboOption> {
        Vec::new()
    }

    fn selected_values(&self) -> Vec<String> {
        Vec::new()
    }

    fn scroll_state(&self) -> ScrollInfo {
        self.scroll
    }

    fn item_bounds(&self, index: usize) -> Option<(f32, f32)> {
        let top = index as f32 * ROW_HEIGHT;
        Some((top, top + ROW_HEIGHT))
    }

    fn scroll_item_into_view(&mut self, index: usize, align: Align) {
        let top = index as f32 * ROW_HEIGHT;
        self.scroll.offset = match align {
            Align::Top => top,
            Align::Bottom => (top + ROW_HEIGHT - self.scroll.viewport).max(0.0),
        };
        println!("  [host] scrolled item {index} into view ({align:?})");
    }

    fn set_active_descendant(&mut self, index: Option<usize>) {
        self.active = index;
        println!("  [host] active descendant -> {index:?}");
    }
}

fn print_state(c: &ComboController<DemoHost>) {
    let items: Vec<&str> = c.session().items().iter().map(|o| o.label()).collect();
    println!(
        "  state: phase {:?}, input {:?}, values {:?}, list {items:?}",
        c.phase(),
        c.input_text(),
        c.values(),
    );
}

fn main() {
    let host = DemoHost::new(&[
        ("apple", "Apple"),
        ("apricot", "Apricot"),
        ("banana", "Banana"),
        ("blackberry", "Blackberry"),
        ("cherry", "Cherry"),
    ]);
    let mut combo = ComboController::new(host);
    combo.add_listener(|signal| match signal.payload() {
        ComboEvent::ShowSuggestions { value, start } => {
            println!("  [signal] showsuggestions value={value:?} start={start}");
        }
        ComboEvent::HideSuggestions => println!("  [signal] hidesuggestions"),
        ComboEvent::Change => println!("  [signal] change"),
    });

    println!("-- typing \"ap\", debounced 200ms --");
    combo.input_changed("a", 0);
    combo.input_changed("ap", 90);
    combo.tick(200); // only the second keystroke's deadline survives
    combo.tick(290);
    combo.frame();
    print_state(&combo);

    println!("-- ArrowDown x2, Enter --");
    combo.key_pressed(Key::Down, 300);
    combo.key_pressed(Key::Down, 320);
    combo.frame();
    combo.key_pressed(Key::Enter, 340);
    combo.frame();
    print_state(&combo);

    println!("-- switching to multi-select, committing two values --");
    combo.clear();
    combo.set_multiple(true);
    combo.set_delay_ms(0);
    combo.input_changed("banana", 400);
    combo.key_pressed(Key::Enter, 410);
    combo.input_changed("cherry", 420);
    combo.key_pressed(Key::Enter, 430);
    let tags: Vec<&str> = combo.selection().tags().map(|t| t.label.as_str()).collect();
    println!("  tags: {tags:?}");
    print_state(&combo);

    println!("-- host-fetched page after a prevented request --");
    combo.add_listener(|signal| {
        if matches!(signal.payload(), ComboEvent::ShowSuggestions { .. }) {
            signal.prevent_default();
        }
    });
    combo.input_changed("x", 500);
    println!("  loading: {}", combo.loading());
    combo.add_suggestions(
        vec![
            ComboOption::new("xigua", "Xigua"),
            ComboOption::new("ximenia", "Ximenia"),
        ],
        true,
    );
    print_state(&combo);
    combo.key_pressed(Key::Down, 520);
    combo.key_pressed(Key::Enter, 540);
    combo.frame();
    print_state(&combo);
}
