//! Content fingerprint via xxh3-128 over SQL text and tagged binding bytes.

use std::fmt;

use querycraft_core::types::Binding;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

/// Digest identifying one exact (SQL, bindings) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueryFingerprint(pub u128);

impl fmt::Display for QueryFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Fingerprint the raw SQL followed by each binding in tagged form.
///
/// Binding order and exact values are significant: `[1, 2]` and `[2, 1]`
/// differ, as do `1` and `1.0`. Floats hash by bit pattern, so `NaN`,
/// the infinities and `Null` never collide.
pub fn fingerprint(sql: &str, bindings: &[Binding]) -> QueryFingerprint {
    let mut hasher = Xxh3::new();
    write_str(&mut hasher, sql);
    for binding in bindings {
        match binding {
            Binding::Null => hasher.update(&[TAG_NULL]),
            Binding::Bool(b) => hasher.update(&[TAG_BOOL, u8::from(*b)]),
            Binding::Int(i) => {
                hasher.update(&[TAG_INT]);
                hasher.update(&i.to_le_bytes());
            }
            Binding::Float(x) => {
                hasher.update(&[TAG_FLOAT]);
                hasher.update(&x.to_bits().to_le_bytes());
            }
            Binding::Text(s) => {
                hasher.update(&[TAG_TEXT]);
                write_str(&mut hasher, s);
            }
        }
    }
    QueryFingerprint(hasher.digest128())
}

const TAG_NULL: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_INT: u8 = 2;
const TAG_FLOAT: u8 = 3;
const TAG_TEXT: u8 = 4;

/// Length-prefixed so adjacent strings cannot shift bytes between them.
fn write_str(hasher: &mut Xxh3, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_match() {
        let a = fingerprint("select * from users where id = ?", &[Binding::Int(1)]);
        let b = fingerprint("select * from users where id = ?", &[Binding::Int(1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn binding_value_and_order_matter() {
        let sql = "select * from t where a = ? and b = ?";
        let base = fingerprint(sql, &[Binding::Int(1), Binding::Int(2)]);
        assert_ne!(base, fingerprint(sql, &[Binding::Int(2), Binding::Int(1)]));
        assert_ne!(base, fingerprint(sql, &[Binding::Int(1), Binding::Int(3)]));
        assert_ne!(
            fingerprint(sql, &[Binding::Int(1)]),
            fingerprint(sql, &[Binding::Float(1.0)])
        );
    }

    #[test]
    fn non_finite_floats_and_null_are_distinct() {
        let sql = "select * from readings where value = ?";
        let prints: Vec<QueryFingerprint> = [
            Binding::Null,
            Binding::Float(f64::NAN),
            Binding::Float(f64::INFINITY),
            Binding::Float(f64::NEG_INFINITY),
        ]
        .into_iter()
        .map(|b| fingerprint(sql, &[b]))
        .collect();
        for (i, a) in prints.iter().enumerate() {
            for b in &prints[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(
            fingerprint(sql, &[Binding::Float(f64::NAN)]),
            fingerprint(sql, &[Binding::Float(f64::NAN)])
        );
    }

    #[test]
    fn text_boundaries_are_significant() {
        let sql = "select * from t where a = ? and b = ?";
        assert_ne!(
            fingerprint(sql, &[Binding::from("ab"), Binding::from("c")]),
            fingerprint(sql, &[Binding::from("a"), Binding::from("bc")])
        );
    }

    #[test]
    fn sql_text_is_exact() {
        assert_ne!(
            fingerprint("select 1", &[]),
            fingerprint("SELECT 1", &[]),
        );
    }

    #[test]
    fn display_is_fixed_width_hex() {
        assert_eq!(fingerprint("select 1", &[]).to_string().len(), 32);
    }
}
