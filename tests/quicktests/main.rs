//! Property tests for the symbol tables, using `BTreeMap` as the model.

use quickcheck::{Arbitrary, Gen};

mod hibbard;

/// An enum for the various kinds of "things" to do to
/// a symbol table in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K, V> {
    /// Insert the K, V into the data structure
    Insert(K, V),
    /// Remove the K from the data structure
    Remove(K),
    /// Remove the smallest key
    DeleteMin,
    /// Remove the largest key
    DeleteMax,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2, 3]).unwrap() {
            0 => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::DeleteMin,
            3 => Op::DeleteMax,
            _ => unreachable!(),
        }
    }
}
