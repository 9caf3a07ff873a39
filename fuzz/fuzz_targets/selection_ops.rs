//! Random mutations of the selection model alone.

#![no_main]

use catalog::{ComboOption, OptionCatalog};
use combo_core::SelectionModel;
use core_types::SelectionMode;
use libfuzzer_sys::fuzz_target;

fn check_invariants(model: &SelectionModel) {
    let values = model.values();
    for (i, value) in values.iter().enumerate() {
        assert!(!values[i + 1..].contains(value), "duplicate {value:?}");
    }
    match model.mode() {
        SelectionMode::Single => {
            assert!(values.len() <= 1);
            assert_eq!(model.tags().count(), 0);
        }
        SelectionMode::Multiple => {
            for value in values {
                assert!(model.tag_count(value) >= 1, "value {value:?} has no tag");
            }
            for tag in model.tags() {
                assert!(model.contains(&tag.value), "orphan tag {:?}", tag.value);
            }
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut catalog = OptionCatalog::new();
    catalog.rebuild([
        ComboOption::new("a", "Apple"),
        ComboOption::new("b", "Banana"),
        ComboOption::new("c", "Cherry"),
    ]);
    let values = ["a", "b", "c", "x", "y", ""];

    let mut model = SelectionModel::new();
    let mut bytes = data.iter().copied();
    while let Some(op) = bytes.next() {
        let value = values[usize::from(bytes.next().unwrap_or(0)) % values.len()];
        match op % 6 {
            0 => {
                model.add_value(value, value);
            }
            1 => {
                model.remove_value(value);
            }
            2 => {
                model.add_tag(value, value);
            }
            3 => {
                let picks: Vec<String> = (&mut bytes)
                    .take(usize::from(op) % 5)
                    .map(|b| values[usize::from(b) % values.len()].to_string())
                    .collect();
                model.set_values(&picks, op % 2 == 0, &catalog);
            }
            4 => {
                let mode = if op % 2 == 0 {
                    SelectionMode::Single
                } else {
                    SelectionMode::Multiple
                };
                model.set_mode(mode);
            }
            _ => {
                model.clear();
            }
        }
        check_invariants(&model);
    }
});
