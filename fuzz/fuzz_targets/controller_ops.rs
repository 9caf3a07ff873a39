//! Random operation sequences against the controller.
//!
//! Checks the structural invariants after every step: unique values, SINGLE
//! cardinality, a consistent loading flag, and in-bounds virtual focus.

#![no_main]

use combo_core::{ComboController, ComboEvent, Key, Phase};
use combo_test_support::{ScriptedHost, options};
use core_types::ScrollInfo;
use libfuzzer_sys::fuzz_target;

const KEYS: [Key; 8] = [
    Key::Down,
    Key::Up,
    Key::Home,
    Key::End,
    Key::Enter,
    Key::Tab,
    Key::ShiftTab,
    Key::Escape,
];

fn check_invariants(c: &ComboController<ScriptedHost>) {
    let values = c.values();
    for (i, value) in values.iter().enumerate() {
        assert!(
            !values[i + 1..].contains(value),
            "duplicate value {value:?}"
        );
    }
    if !c.multiple() {
        assert!(values.len() <= 1, "single mode holds {} values", values.len());
        assert_eq!(c.selection().tags().count(), 0);
    } else {
        for tag in c.selection().tags() {
            assert!(values.contains(&tag.value), "orphan tag {:?}", tag.value);
        }
    }
    if c.loading() {
        // Typing over an in-flight fetch keeps the affordance until the
        // re-debounced query fires.
        assert!(
            matches!(c.phase(), Phase::Loading | Phase::Typing),
            "loading flag in phase {:?}",
            c.phase()
        );
    }
    if let Some(index) = c.focused_item() {
        assert!(index < c.session().len(), "focus out of bounds");
        assert!(!c.session().items()[index].disabled, "focus on disabled");
    }
}

fuzz_target!(|data: &[u8]| {
    let host = ScriptedHost::new(options(&[
        ("a", "Apple"),
        ("b", "Banana"),
        ("c", "Cherry"),
        ("d", "Date"),
    ]));
    let mut c = ComboController::new(host);
    // Every suggestion request is host-driven half the time, so the Loading
    // phase gets exercised.
    c.add_listener(|signal| {
        if let ComboEvent::ShowSuggestions { start, .. } = signal.payload()
            && start % 2 == 1
        {
            signal.prevent_default();
        }
    });

    let mut now: u64 = 0;
    let mut bytes = data.iter().copied();
    while let Some(op) = bytes.next() {
        now += u64::from(bytes.next().unwrap_or(7));
        match op % 10 {
            0 => {
                let len = usize::from(bytes.next().unwrap_or(0)) % 8;
                let text: String = (&mut bytes).take(len).map(|b| (b % 26 + b'a') as char).collect();
                c.input_changed(text, now);
            }
            1 => {
                let key = KEYS[usize::from(bytes.next().unwrap_or(0)) % KEYS.len()];
                c.key_pressed(key, now);
            }
            2 => c.tick(now),
            3 => c.frame(),
            4 => {
                let offset = f32::from(bytes.next().unwrap_or(0)) * 4.0;
                c.scrolled(
                    ScrollInfo {
                        offset,
                        viewport: 100.0,
                        content: 600.0,
                    },
                    now,
                );
            }
            5 => c.add_suggestions(
                options(&[("e", "Elderberry"), ("f", "Fig")]),
                bytes.next().unwrap_or(0) % 2 == 0,
            ),
            6 => c.set_multiple(bytes.next().unwrap_or(0) % 2 == 0),
            7 => c.set_force_selection(bytes.next().unwrap_or(0) % 2 == 0),
            8 => c.blur(now, bytes.next().unwrap_or(0) % 2 == 0),
            _ => {
                c.notify_catalog_changed();
                c.frame();
            }
        }
        check_invariants(&c);
    }
});
