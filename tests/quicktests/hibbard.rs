use ordered_bst::hibbard::Tree;
use ordered_bst::symbol_table::OrderedSymbolTable;
use ordered_bst::Error;

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a symbol table and a `BTreeMap`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same keys in both.
fn do_ops<K, V, T>(ops: &[Op<K, V>], table: &mut T, map: &mut BTreeMap<K, V>)
where
    K: Ord + Clone,
    V: std::fmt::Debug + PartialEq + Clone,
    T: OrderedSymbolTable<K, V>,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                table.put(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                assert_eq!(table.delete(k), map.remove(k));
            }
            Op::DeleteMin => {
                let min = map.keys().next().cloned();
                let expected = min.and_then(|k| map.remove(&k));
                assert_eq!(table.delete_min().map(|(_, v)| v), expected);
            }
            Op::DeleteMax => {
                let max = map.keys().next_back().cloned();
                let expected = max.and_then(|k| map.remove(&k));
                assert_eq!(table.delete_max().map(|(_, v)| v), expected);
            }
        }
    }
}

fn tree_of(xs: &[i8]) -> Tree<i8, i8> {
    xs.iter().map(|x| (*x, *x)).collect()
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
        let mut tree = Tree::new();
        let mut map = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut map);
        tree.size() == map.len()
            && map.keys().all(|key| tree.get(key) == map.get(key))
            && tree.keys().into_iter().eq(map.keys())
    }

    fn contains(xs: Vec<i8>) -> bool {
        let tree = tree_of(&xs);

        xs.iter().all(|x| tree.get(x) == Some(x) && tree.contains(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = tree_of(&xs);
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.get(x).is_none())
    }

    fn put_twice_is_idempotent(xs: Vec<i8>) -> bool {
        let mut tree = tree_of(&xs);
        let size = tree.size();
        let keys: Vec<i8> = tree.keys().into_iter().copied().collect();

        for x in &xs {
            tree.put(*x, *x);
        }

        tree.size() == size && tree.keys().into_iter().copied().eq(keys)
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = tree_of(&xs);
        for delete in &deletes {
            let before = tree.size();
            let was_present = tree.contains(delete);
            tree.delete(delete);
            let expected = if was_present { before - 1 } else { before };
            if tree.size() != expected {
                return false;
            }
        }

        let deleted: HashSet<_> = deletes.iter().collect();
        deletes.iter().all(|x| !tree.contains(x))
            && xs.iter().filter(|x| !deleted.contains(x)).all(|x| tree.contains(x))
    }

    fn keys_are_strictly_ascending(ops: Vec<Op<i8, i8>>) -> bool {
        let mut tree = Tree::new();
        let mut map = BTreeMap::new();
        do_ops(&ops, &mut tree, &mut map);

        let keys: Vec<_> = tree.keys().into_iter().collect();
        keys.len() == tree.size() && keys.windows(2).all(|w| w[0] < w[1])
    }

    fn rank_and_select_agree(xs: Vec<i8>, probes: Vec<i8>) -> bool {
        let tree = tree_of(&xs);
        let sorted: Vec<_> = tree.keys().into_iter().copied().collect();

        (0..tree.size()).all(|i| tree.select(i).map(|k| tree.rank(k)) == Some(i))
            && sorted.iter().all(|k| tree.select(tree.rank(k)) == Some(k))
            && tree.select(tree.size()).is_none()
            && probes
                .iter()
                .all(|p| tree.rank(p) == sorted.iter().filter(|k| *k < p).count())
    }

    fn floor_and_ceiling_match_model(xs: Vec<i8>, probes: Vec<i8>) -> bool {
        let tree = tree_of(&xs);
        let map: BTreeMap<_, _> = xs.iter().map(|x| (*x, *x)).collect();

        probes.iter().all(|p| {
            tree.floor(p) == map.range(..=*p).next_back().map(|(k, _)| k)
                && tree.ceiling(p) == map.range(*p..).next().map(|(k, _)| k)
        })
    }

    fn range_size_counts_range_keys(xs: Vec<i8>, a: i8, b: i8) -> bool {
        let tree = tree_of(&xs);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let map: BTreeMap<_, _> = xs.iter().map(|x| (*x, *x)).collect();

        let keys = tree.keys_range(&lo, &hi);
        tree.size_range(&lo, &hi) == Ok(keys.len())
            && keys.into_iter().eq(map.range(lo..=hi).map(|(k, _)| k))
    }

    fn inverted_range_is_rejected(xs: Vec<i8>, a: i8, b: i8) -> bool {
        let tree = tree_of(&xs);
        if a == b {
            return true;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };

        tree.size_range(&hi, &lo) == Err(Error::InvalidRange) && tree.keys_range(&hi, &lo).is_empty()
    }
}
