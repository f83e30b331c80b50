//! End-to-end behaviour of the book list through the public API.

use bookshelf::app::{handle_event, AppState, Event, Screen};
use bookshelf::library::{filter_books, FilteredView, Library};
use bookshelf::{Book, Theme};
use std::collections::HashSet;

const QUERIES: &[&str] = &["", "   ", "the", "THE", "o", "r", "herbert", "j.r.r", " the", "zzz", "é"];

fn titles(books: &[&Book]) -> Vec<String> {
    books.iter().map(|b| b.title.clone()).collect()
}

fn library_titles(library: &Library) -> Vec<String> {
    library.books().iter().map(|b| b.title.clone()).collect()
}

fn mixed_library() -> Library {
    let mut library = Library::seeded();
    for (title, author) in [
        ("Les Misérables", "Victor Hugo"),
        ("The Hobbit", "J.R.R. Tolkien"),
        ("Dune", "Frank Herbert"),
        ("Untitled", ""),
    ] {
        library.append(Book::new(title, author, "")).unwrap();
    }
    library
}

#[test]
fn seeded_walkthrough() {
    let mut state = AppState::new(Library::seeded(), Theme::default());
    assert_eq!(library_titles(&state.library), ["1984", "The Lord of the Rings", "Dune"]);

    state.set_query("the");
    assert_eq!(titles(&state.visible_books()), ["The Lord of the Rings"]);

    state.set_query("");
    assert_eq!(titles(&state.visible_books()), ["1984", "The Lord of the Rings", "Dune"]);

    state.set_query("the");
    assert_eq!(state.delete_positions([0]), 1);
    assert_eq!(library_titles(&state.library), ["1984", "Dune"]);

    state.set_query("");
    state.open_form();
    let form = state.form_mut().unwrap();
    form.title = "Foundation".to_string();
    form.author = "Asimov".to_string();
    assert!(state.save_form().unwrap());
    assert_eq!(library_titles(&state.library), ["1984", "Dune", "Foundation"]);

    let added = &state.library.books()[2];
    assert_eq!((added.author.as_str(), added.summary.as_str()), ("Asimov", ""));
}

#[test]
fn blank_query_is_identity() {
    let library = mixed_library();
    for query in ["", " ", "\t\n"] {
        let all: Vec<&Book> = library.books().iter().collect();
        assert_eq!(filter_books(library.books(), query), all);
    }
}

#[test]
fn results_match_and_non_results_do_not() {
    let library = mixed_library();
    for query in QUERIES.iter().filter(|q| !q.trim().is_empty()) {
        let needle = query.to_lowercase();
        let hits: HashSet<_> = filter_books(library.books(), query).iter().map(|b| b.id).collect();
        for book in library.books() {
            let matches = book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle);
            assert_eq!(hits.contains(&book.id), matches, "query {query:?} on {:?}", book.title);
        }
    }
}

#[test]
fn filtering_preserves_order_and_is_idempotent() {
    let library = mixed_library();
    let positions: Vec<_> = library.ids().collect();

    for query in QUERIES {
        let once = filter_books(library.books(), query);
        let indices: Vec<usize> = once
            .iter()
            .map(|b| positions.iter().position(|id| *id == b.id).unwrap())
            .collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]), "order broken for {query:?}");

        let owned: Vec<Book> = once.iter().map(|b| (*b).clone()).collect();
        assert_eq!(titles(&filter_books(&owned, query)), titles(&once), "not idempotent for {query:?}");
    }
}

#[test]
fn case_insensitive_both_ways() {
    let library = mixed_library();
    assert_eq!(
        titles(&filter_books(library.books(), "THE HOBBIT")),
        titles(&filter_books(library.books(), "the hobbit"))
    );
    assert_eq!(titles(&filter_books(library.books(), "MISÉR")), ["Les Misérables"]);
}

#[test]
fn delete_removes_exactly_the_resolved_ids() {
    for query in QUERIES {
        let mut library = mixed_library();
        let view = FilteredView::compute(&library, query);
        let positions = [0, 2, 99];
        let doomed = view.resolve_positions(positions);

        let before: Vec<Book> = library.books().to_vec();
        library.remove_ids(&doomed);

        let expected: Vec<String> = before
            .iter()
            .filter(|b| !doomed.contains(&b.id))
            .map(|b| b.title.clone())
            .collect();
        assert_eq!(library_titles(&library), expected, "query {query:?}");

        for book in &before {
            if !view.ids().contains(&book.id) {
                assert!(library.contains(book.id), "hidden book deleted for {query:?}");
            }
        }
    }
}

#[test]
fn duplicate_texts_are_distinct_books() {
    let mut state = AppState::new(mixed_library(), Theme::default());
    state.set_query("dune");
    assert_eq!(state.view.len(), 2);

    state.delete_positions([1]);
    assert_eq!(state.view.len(), 1);
    assert_eq!(state.library.books().iter().filter(|b| b.title == "Dune").count(), 1);
    assert_eq!(state.library.books()[2].title, "Dune");
}

#[test]
fn add_form_flow_through_events() {
    let mut state = AppState::new(Library::new(), Theme::default());
    let vm = state.compute_viewmodel(24, 80);
    assert_eq!(vm.empty_state.map(|e| e.message), Some("No books yet".to_string()));

    handle_event(&mut state, &Event::OpenForm).unwrap();
    for c in "  Snow Crash  ".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    handle_event(&mut state, &Event::FormNextField).unwrap();
    for c in "Neal Stephenson".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }

    let vm = state.compute_viewmodel(24, 80);
    let form = vm.form.expect("form is open");
    assert!(form.can_save);
    assert!(form.fields[1].is_focused);

    handle_event(&mut state, &Event::FormSave).unwrap();
    assert_eq!(state.screen, Screen::List);
    assert_eq!(state.library.len(), 1);
    assert_eq!(state.library.books()[0].title, "Snow Crash");

    let vm = state.compute_viewmodel(24, 80);
    assert_eq!(vm.header.title, " Books (1/1) ");
    assert!(vm.display_items[0].is_selected);
}

#[test]
fn blank_form_never_mutates() {
    let mut state = AppState::new(Library::seeded(), Theme::default());
    let before = state.library.clone();

    handle_event(&mut state, &Event::OpenForm).unwrap();
    handle_event(&mut state, &Event::FormNextField).unwrap();
    for c in "Anonymous".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    handle_event(&mut state, &Event::FormSave).unwrap();
    handle_event(&mut state, &Event::FormCancel).unwrap();

    assert_eq!(state.library, before);
    assert!(state.screen.is_list());
}

#[test]
fn detail_shows_placeholders() {
    let mut state = AppState::new(mixed_library(), Theme::default());
    state.set_query("untitled");
    handle_event(&mut state, &Event::OpenDetail).unwrap();

    let detail = state.compute_viewmodel(24, 80).detail.expect("detail page");
    assert_eq!(detail.title, "Untitled");
    assert_eq!(detail.author, "Unknown author");
    assert_eq!(detail.summary, "No summary");
    assert!(detail.added.starts_with("added "));
}
