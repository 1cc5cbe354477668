//! Sample library used by tests and by `library.seed_sample_data`.

use super::lending::Lending;
use super::models::{Book, BookFields, BookId, ReadingStatus};
use super::rating::DetailedRating;

/// Four books covering each lending state and most reading states.
pub fn sample_books() -> Vec<Book> {
    let hobbit = Book::new(
        BookId::new(1),
        BookFields {
            description: Some(
                "A fantasy classic about Bilbo Baggins and his unexpected journey.".into(),
            ),
            rating: Some("5".into()),
            detailed_rating: Some(DetailedRating {
                character: Some(5.0),
                plot: Some(5.0),
                writing: Some(5.0),
                world_building: Some(5.0),
                enjoyment: Some(5.0),
                comment: Some("Timeless classic.".into()),
            }),
            isbn: Some("978-0547928227".into()),
            year: Some(1937),
            ..BookFields::new("The Hobbit", "J.R.R. Tolkien", ReadingStatus::Read)
        },
    );

    let mut clean_code = Book::new(
        BookId::new(2),
        BookFields {
            description: Some("Practical guide to writing readable and maintainable code.".into()),
            rating: Some("4.5".into()),
            isbn: Some("978-0132350884".into()),
            year: Some(2008),
            ..BookFields::new("Clean Code", "Robert C. Martin", ReadingStatus::Read)
        },
    );
    clean_code.lending = Lending::LentOut {
        borrower: "Alice".into(),
    };

    let dune = Book::new(
        BookId::new(3),
        BookFields {
            isbn: Some("978-0441172719".into()),
            year: Some(1965),
            ..BookFields::new("Dune", "Frank Herbert", ReadingStatus::WantToReadOwn)
        },
    );

    let hail_mary = Book::new(
        BookId::new(4),
        BookFields {
            year: Some(2021),
            ..BookFields::new(
                "Project Hail Mary",
                "Andy Weir",
                ReadingStatus::CurrentlyReading,
            )
        },
    );

    vec![hobbit, clean_code, dune, hail_mary]
}
