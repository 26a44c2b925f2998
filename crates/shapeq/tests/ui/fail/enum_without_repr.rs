//! Error: fieldless enum without an integer representation.
#![allow(dead_code)]

use shapeq::Structural;

#[derive(Structural, Clone, Copy)]
enum Mode {
    Read,
    Write,
}

fn main() {}
