//! Named, tuple and unit structs, with a skipped field.

use shapeq::Structural;

#[derive(Structural, Debug)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

#[derive(Structural, Debug)]
pub struct Token(pub String, pub Span);

#[derive(Structural, Debug)]
pub struct Eof;

#[derive(Structural, Debug)]
pub struct Cached {
    pub key: String,
    #[structural(skip)]
    pub scratch: std::cell::Cell<usize>,
}

fn main() {
    let a = Token("let".to_owned(), Span { start: 0, end: 3 });
    let b = Token("let".to_owned(), Span { start: 0, end: 3 });
    shapeq::assert_structural_eq!(a, b);
    shapeq::assert_structural_eq!(Eof, Eof);
}
