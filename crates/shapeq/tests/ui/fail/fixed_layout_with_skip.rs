//! Error: `fixed_layout` with a skipped field.
#![allow(dead_code)]

use shapeq::Structural;

#[derive(Structural, Clone, Copy)]
#[repr(C)]
#[structural(fixed_layout)]
struct Stamped {
    value: u32,
    #[structural(skip)]
    stamp: u32,
}

fn main() {}
