//! Indexing of two-electron integrals.
//!
//! Real two-electron integrals are symmetric under 8 index permutations:
//!   (ij|kl) = (ji|kl) = (ij|lk) = (ji|lk) = (kl|ij) = (lk|ij) = (kl|ji) = (lk|ji)
//!
//! Each such class is assigned a single slot. Pairs are packed into a triangular index,
//! and the two pair indices are packed the same way again.

use std::fmt;

/// An integral index used in the two-electron integrals of a basis set.
///
/// The index represents the four indices (i, j, k, l) of the integral
///   (ij|kl) = <i k | j l>
/// in the order the caller supplied them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IntegralIndex(pub usize, pub usize, pub usize, pub usize);

impl IntegralIndex {
    pub const fn new((i, j, k, l): (usize, usize, usize, usize)) -> Self {
        Self(i, j, k, l)
    }

    /// The storage slot shared by every permutation of this index.
    pub const fn canonical(&self) -> usize {
        let &Self(i, j, k, l) = self;
        canonical_index(i, j, k, l)
    }

    /// Whether all four indices are smaller than `n_basis`.
    pub const fn fits(&self, n_basis: usize) -> bool {
        let &Self(i, j, k, l) = self;
        i < n_basis && j < n_basis && k < n_basis && l < n_basis
    }

    pub const fn as_tuple(&self) -> (usize, usize, usize, usize) {
        let &Self(i, j, k, l) = self;
        (i, j, k, l)
    }
}

impl fmt::Display for IntegralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let &Self(i, j, k, l) = self;
        write!(f, "({} {}|{} {})", i, j, k, l)
    }
}

/// Triangular index of an unordered pair.
#[inline(always)]
pub const fn pair_index(a: usize, b: usize) -> usize {
    let (max, min) = if a > b { (a, b) } else { (b, a) };
    max * (max + 1) / 2 + min
}

/// Inverse of [`pair_index`]: returns `(max, min)`.
pub fn unpair(index: usize) -> (usize, usize) {
    // float estimate, then corrected so the result is exact for any index
    let mut max = ((((8 * index + 1) as f64).sqrt() - 1.0) / 2.0) as usize;
    while max * (max + 1) / 2 > index {
        max -= 1;
    }
    while (max + 1) * (max + 2) / 2 <= index {
        max += 1;
    }
    (max, index - max * (max + 1) / 2)
}

/// Storage slot of the two-electron integral (ij|kl).
#[inline(always)]
pub const fn canonical_index(i: usize, j: usize, k: usize, l: usize) -> usize {
    pair_index(pair_index(i, j), pair_index(k, l))
}

/// Number of unordered pairs over `n_basis` functions.
pub const fn n_pairs(n_basis: usize) -> usize {
    n_basis * (n_basis + 1) / 2
}

/// Number of distinct two-electron integrals over `n_basis` functions.
pub const fn n_canonical(n_basis: usize) -> usize {
    let pairs = n_pairs(n_basis);
    pairs * (pairs + 1) / 2
}

/// One quadruple per permutation class, in ascending order of canonical index.
/// The n-th item has canonical index n.
pub fn representatives(n_basis: usize) -> impl Iterator<Item = IntegralIndex> {
    (0..n_pairs(n_basis)).flat_map(|ij| {
        let (i, j) = unpair(ij);
        (0..=ij).map(move |kl| {
            let (k, l) = unpair(kl);
            IntegralIndex(i, j, k, l)
        })
    })
}

/// All distinct quadruples that share a slot with (ij|kl), sorted.
pub fn equivalent_quadruples(i: usize, j: usize, k: usize, l: usize) -> Vec<IntegralIndex> {
    let mut quadruples = vec![
        IntegralIndex(i, j, k, l),
        IntegralIndex(j, i, k, l),
        IntegralIndex(i, j, l, k),
        IntegralIndex(j, i, l, k),
        IntegralIndex(k, l, i, j),
        IntegralIndex(l, k, i, j),
        IntegralIndex(k, l, j, i),
        IntegralIndex(l, k, j, i),
    ];
    quadruples.sort_unstable_by_key(|index| index.as_tuple());
    quadruples.dedup();
    quadruples
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn permutations_share_a_slot() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let (i, j, k, l) = (
                rng.gen_range(0..20),
                rng.gen_range(0..20),
                rng.gen_range(0..20),
                rng.gen_range(0..20),
            );
            let expected = canonical_index(i, j, k, l);

            assert_eq!(canonical_index(j, i, k, l), expected);
            assert_eq!(canonical_index(i, j, l, k), expected);
            assert_eq!(canonical_index(k, l, i, j), expected);

            for index in equivalent_quadruples(i, j, k, l) {
                assert_eq!(index.canonical(), expected, "{index}");
            }
        }
    }

    #[test]
    fn canonical_index_is_a_bijection_on_classes() {
        for n_basis in 1..=5 {
            let mut classes: HashMap<usize, Vec<IntegralIndex>> = HashMap::new();
            for (i, j, k, l) in itertools::iproduct!(0..n_basis, 0..n_basis, 0..n_basis, 0..n_basis)
            {
                let index = IntegralIndex(i, j, k, l);
                classes.entry(index.canonical()).or_default().push(index);
            }

            // every slot is used and the highest slot is the last one
            assert_eq!(classes.len(), n_canonical(n_basis));
            assert_eq!(classes.keys().max().copied(), Some(n_canonical(n_basis) - 1));

            // quadruples in one slot are all permutations of each other
            for members in classes.values() {
                let IntegralIndex(i, j, k, l) = members[0];
                let allowed = equivalent_quadruples(i, j, k, l);
                for member in members {
                    assert!(allowed.contains(member), "{member} is not equivalent to {}", members[0]);
                }
            }
        }
    }

    #[test]
    fn representatives_cover_every_slot_once() {
        for n_basis in 0..=6 {
            let slots = representatives(n_basis)
                .map(|index| index.canonical())
                .collect::<Vec<_>>();

            assert_eq!(slots, (0..n_canonical(n_basis)).collect::<Vec<_>>());
        }
    }

    #[test]
    fn unpair_inverts_pair_index() {
        for a in 0..200 {
            for b in 0..=a {
                assert_eq!(unpair(pair_index(a, b)), (a, b));
            }
        }
    }

    #[test]
    fn two_functions_have_six_classes() {
        assert_eq!(n_canonical(2), 6);
        assert_eq!(equivalent_quadruples(0, 0, 0, 0).len(), 1);
        assert_eq!(equivalent_quadruples(0, 1, 0, 1).len(), 4);
        assert_eq!(equivalent_quadruples(0, 1, 2, 3).len(), 8);
    }
}
