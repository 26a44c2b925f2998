//! Derive macro for `shapeq::Structural`.
//!
//! Use it through the re-export in `shapeq`:
//!
//! ```text
//! #[derive(Structural)]
//! pub struct Order {
//!     pub id: u64,
//!     pub lines: Vec<Line>,
//!     #[structural(skip)]
//!     pub cached_total: Option<u64>,
//! }
//! ```
//!
//! Fields are compared and hashed in declaration order. The generated code
//! refers to `::shapeq`, so the deriving crate must depend on `shapeq`.

mod structural;
mod utils;

use proc_macro::TokenStream;

/// Derive `shapeq::Structural` for a struct or a fieldless enum.
///
/// # Attributes
///
/// ## Container-level
/// - `#[structural(equatable)]` - The type's own `Eq + Hash` is its
///   structural contract. Arrays of it compare through slice equality.
/// - `#[structural(fixed_layout)]` - The struct is padding-free and made
///   only of fixed-layout fields, so arrays of it compare as raw memory.
///   Requires `#[repr(C)]` or `#[repr(transparent)]`, `Copy`, and no
///   generics; the absence of padding is checked at compile time.
///
/// ## Field-level
/// - `#[structural(skip)]` - Exclude the field from equality and hashing.
///
/// # Enums
///
/// Only fieldless enums with an integer `#[repr(..)]` are supported. They
/// must be `Copy` and compare by discriminant.
#[proc_macro_derive(Structural, attributes(structural))]
pub fn derive_structural(input: TokenStream) -> TokenStream {
    structural::derive_structural(input)
}
