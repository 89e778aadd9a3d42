/*!

`Hash` for [`Decimal`] (§8, invariant 7): `hash(x) == hash(y)` iff `x == y`,
and — because equality is defined on the reduced rational value, not the
representation — hashing the reduced `(numerator, denominator)` pair
automatically agrees with hashing any other exact-rational type keyed the
same way once its denominator is 1.

*/

use core::hash::{Hash, Hasher};

use crate::decimal::Decimal;

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (num, den) = self.as_integer_ratio();
        num.hash(state);
        den.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use alloc::collections::BTreeSet;

    /// A tiny FNV-1a hasher, used only so these tests don't need `std`.
    struct Fnv(u64);

    impl Hasher for Fnv {
        fn finish(&self) -> u64 {
            self.0
        }
        fn write(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.0 = (self.0 ^ b as u64).wrapping_mul(0x100_0000_01b3);
            }
        }
    }

    fn hash_of(d: &Decimal) -> u64 {
        let mut h = Fnv(0xcbf2_9ce4_8422_2325);
        d.hash(&mut h);
        h.finish()
    }

    #[test]
    fn equal_values_hash_equal_despite_different_precision() {
        let a = parse("3.00").unwrap();
        let b = parse("3").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn distinct_values_can_coexist_in_a_set() {
        let mut set = BTreeSet::new();
        set.insert(parse("1").unwrap());
        set.insert(parse("1.0").unwrap());
        set.insert(parse("2").unwrap());
        assert_eq!(set.len(), 2);
    }
}
