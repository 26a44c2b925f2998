//! Error: unions have no structure to compare.
#![allow(dead_code)]

use shapeq::Structural;

#[derive(Structural)]
union Bits {
    int: u32,
    float: f32,
}

fn main() {}
