//! Timing behavior: query debouncing, the loading state, and scroll-driven
//! pagination. All clocks are virtual; tests drive `tick` explicitly.

use combo_core::{ComboController, ComboEvent, Phase};
use combo_test_support::{ScriptedHost, options};
use core_types::ScrollInfo;
use std::cell::RefCell;
use std::rc::Rc;

fn fruits() -> ScriptedHost {
    ScriptedHost::new(options(&[
        ("a", "Apple"),
        ("b", "Banana"),
        ("c", "Cherry"),
    ]))
}

fn record_shows(
    controller: &mut ComboController<ScriptedHost>,
) -> Rc<RefCell<Vec<(String, usize)>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    controller.add_listener(move |signal| {
        if let ComboEvent::ShowSuggestions { value, start } = signal.payload() {
            sink.borrow_mut().push((value.clone(), *start));
        }
    });
    log
}

#[test]
fn rapid_keystrokes_coalesce_into_one_query_with_the_last_text() {
    let mut c = ComboController::new(fruits());
    let shows = record_shows(&mut c);

    c.input_changed("a", 0);
    c.input_changed("ap", 10);
    c.input_changed("app", 20);

    // Superseded deadlines (200, 210) never fire.
    c.tick(210);
    assert!(shows.borrow().is_empty());
    assert_eq!(c.phase(), Phase::Typing);

    c.tick(220);
    assert_eq!(*shows.borrow(), [("app".to_string(), 0)]);
    assert_eq!(c.phase(), Phase::SuggestionsOpen);

    // The consumed deadline cannot fire again.
    c.tick(1_000);
    assert_eq!(shows.borrow().len(), 1);
}

#[test]
fn custom_delay_is_respected_and_zero_is_synchronous() {
    let mut c = ComboController::new(fruits());
    let shows = record_shows(&mut c);

    c.set_delay_ms(500);
    c.input_changed("a", 0);
    c.tick(499);
    assert!(shows.borrow().is_empty());
    c.tick(500);
    assert_eq!(shows.borrow().len(), 1);

    c.set_delay_ms(0);
    c.input_changed("ap", 600);
    assert_eq!(shows.borrow().len(), 2);
}

#[test]
fn prevented_show_enters_loading_until_suggestions_arrive() {
    let mut c = ComboController::new(fruits());
    c.set_delay_ms(0);
    c.add_listener(|signal| {
        if matches!(signal.payload(), ComboEvent::ShowSuggestions { .. }) {
            signal.prevent_default();
        }
    });

    c.input_changed("xi", 0);
    assert_eq!(c.phase(), Phase::Loading);
    assert!(c.loading());
    assert!(c.session().is_empty());

    c.add_suggestions(options(&[("x", "Xigua"), ("y", "Yuzu")]), false);
    assert_eq!(c.phase(), Phase::SuggestionsOpen);
    assert!(!c.loading());
    assert_eq!(c.session().len(), 2);
}

#[test]
fn empty_fetch_raises_the_no_results_placeholder() {
    let mut c = ComboController::new(fruits());
    c.set_delay_ms(0);
    c.add_listener(|signal| {
        if matches!(signal.payload(), ComboEvent::ShowSuggestions { .. }) {
            signal.prevent_default();
        }
    });

    c.input_changed("zzz", 0);
    c.add_suggestions(Vec::new(), true);

    assert!(c.session().no_results());
    assert_eq!(c.phase(), Phase::SuggestionsOpen);
}

#[test]
fn scrolling_near_the_bottom_requests_the_next_page() {
    let mut c = ComboController::new(fruits());
    c.set_delay_ms(0);
    let shows = record_shows(&mut c);

    c.input_changed("", 0);
    assert_eq!(c.session().len(), 3);
    shows.borrow_mut().clear();

    let near_bottom = ScrollInfo {
        offset: 460.0,
        viewport: 100.0,
        content: 600.0,
    };
    c.scrolled(near_bottom, 100);

    // The check itself is debounced.
    c.tick(150);
    assert!(shows.borrow().is_empty());
    c.tick(200);
    assert_eq!(*shows.borrow(), [(String::new(), 3)]);
}

#[test]
fn scroll_far_from_the_bottom_requests_nothing() {
    let mut c = ComboController::new(fruits());
    c.set_delay_ms(0);
    let shows = record_shows(&mut c);

    c.input_changed("", 0);
    shows.borrow_mut().clear();

    let far = ScrollInfo {
        offset: 0.0,
        viewport: 100.0,
        content: 600.0,
    };
    c.scrolled(far, 100);
    c.tick(200);
    assert!(shows.borrow().is_empty());
}

#[test]
fn no_second_page_request_while_one_is_outstanding() {
    let mut c = ComboController::new(fruits());
    c.set_delay_ms(0);
    let shows = record_shows(&mut c);

    // First show self-filters; subsequent page requests get prevented.
    let arm = Rc::new(RefCell::new(false));
    let gate = arm.clone();
    c.add_listener(move |signal| {
        if matches!(signal.payload(), ComboEvent::ShowSuggestions { start, .. } if *start > 0)
            && *gate.borrow()
        {
            signal.prevent_default();
        }
    });
    *arm.borrow_mut() = true;

    c.input_changed("", 0);
    shows.borrow_mut().clear();

    let near_bottom = ScrollInfo {
        offset: 460.0,
        viewport: 100.0,
        content: 600.0,
    };
    c.scrolled(near_bottom, 100);
    c.tick(200);
    assert_eq!(shows.borrow().len(), 1);
    assert_eq!(c.phase(), Phase::Loading);

    // Still loading: further scrolls must not emit another request.
    c.scrolled(near_bottom, 300);
    c.tick(400);
    assert_eq!(shows.borrow().len(), 1);

    // The fetched page lands after the existing items.
    c.add_suggestions(options(&[("d", "Date"), ("e", "Elderberry")]), false);
    assert_eq!(c.session().len(), 5);
    assert_eq!(c.session().start_cursor(), 5);
}

#[test]
fn retyping_over_an_inflight_fetch_clears_loading() {
    let mut c = ComboController::new(fruits());
    c.set_delay_ms(0);
    let shows = record_shows(&mut c);
    let prevent = Rc::new(RefCell::new(true));
    let gate = prevent.clone();
    c.add_listener(move |signal| {
        if matches!(signal.payload(), ComboEvent::ShowSuggestions { .. }) && *gate.borrow() {
            signal.prevent_default();
        }
    });

    c.input_changed("ap", 0);
    assert_eq!(c.phase(), Phase::Loading);
    assert!(c.loading());

    // The host never answers; the user keeps typing and the next query
    // self-filters. No request is outstanding anymore.
    *prevent.borrow_mut() = false;
    c.input_changed("app", 10);
    assert_eq!(c.phase(), Phase::SuggestionsOpen);
    assert!(!c.loading());

    // Pagination must not stay suppressed by the abandoned fetch.
    shows.borrow_mut().clear();
    c.scrolled(
        ScrollInfo {
            offset: 460.0,
            viewport: 100.0,
            content: 600.0,
        },
        100,
    );
    c.tick(200);
    assert_eq!(*shows.borrow(), [("app".to_string(), 1)]);
}

#[test]
fn closing_the_list_clears_loading_and_pending_scroll() {
    let mut c = ComboController::new(fruits());
    c.set_delay_ms(0);
    c.add_listener(|signal| {
        if matches!(signal.payload(), ComboEvent::ShowSuggestions { .. }) {
            signal.prevent_default();
        }
    });

    c.input_changed("a", 0);
    assert!(c.loading());

    c.hide_suggestions();
    assert!(!c.loading());
    assert_eq!(c.phase(), Phase::Idle);
}
