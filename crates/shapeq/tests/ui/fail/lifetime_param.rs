//! Error: borrowed data cannot be `Structural`.
#![allow(dead_code)]

use shapeq::Structural;

#[derive(Structural)]
struct Borrowed<'a> {
    name: &'a str,
}

fn main() {}
