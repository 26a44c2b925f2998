//! Error: `fixed_layout` on a struct with padding between its fields.
#![allow(dead_code)]

use shapeq::Structural;

#[derive(Structural, Clone, Copy)]
#[repr(C)]
#[structural(fixed_layout)]
struct Padded {
    a: u8,
    b: u32,
}

fn main() {}
