//! `fixed_layout`, `equatable` and fieldless enums.

use shapeq::Structural;

#[derive(Structural, Clone, Copy, Debug)]
#[repr(C)]
#[structural(fixed_layout)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Structural, Clone, Copy, Debug)]
#[repr(transparent)]
#[structural(fixed_layout, equatable)]
#[derive(PartialEq, Eq, Hash)]
pub struct Id(pub u64);

#[derive(Structural, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[structural(equatable)]
pub enum Level {
    Low = 1,
    High = 9,
}

fn main() {
    let a = [Rgba { r: 1, g: 2, b: 3, a: 4 }; 3];
    shapeq::assert_structural_eq!(a, a);
    shapeq::assert_structural_eq!([Id(1), Id(2)], [Id(1), Id(2)]);
    shapeq::assert_structural_ne!([Level::Low], [Level::High]);
}
