//! Sample books loaded into a fresh library.

use crate::domain::Book;

/// The three fixed sample entries shown when the plugin opens.
#[must_use]
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new(
            "1984",
            "George Orwell",
            "A dystopian novel about surveillance and totalitarianism.",
        ),
        Book::new(
            "The Lord of the Rings",
            "J.R.R. Tolkien",
            "An epic fantasy quest to destroy the One Ring.",
        ),
        Book::new(
            "Dune",
            "Frank Herbert",
            "Politics, religion and ecology on the desert planet Arrakis.",
        ),
    ]
}
