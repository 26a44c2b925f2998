//! Error: enum variant carrying data.
#![allow(dead_code)]

use shapeq::Structural;

#[derive(Structural, Clone, Copy)]
#[repr(u8)]
enum Shape {
    Circle(u8),
    Dot,
}

fn main() {}
