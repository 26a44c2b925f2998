//! Type parameters gain a `Structural` bound; const parameters pass through.

use std::collections::HashMap;

use shapeq::Structural;

#[derive(Structural, Debug)]
pub struct Table<K, V, const N: usize>
where
    K: Clone,
{
    pub header: [u8; N],
    pub rows: HashMap<K, Vec<V>>,
}

fn main() {
    let table: Table<String, f32, 2> = Table {
        header: [1, 2],
        rows: HashMap::new(),
    };
    assert!(shapeq::equals(&table, &table).unwrap_or(false));
}
