//! Error: `fixed_layout` without `repr(C)` or `repr(transparent)`.
#![allow(dead_code)]

use shapeq::Structural;

#[derive(Structural, Clone, Copy)]
#[structural(fixed_layout)]
struct Loose {
    tag: u8,
    len: u32,
}

fn main() {}
