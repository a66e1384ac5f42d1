use proptest::prelude::*;
use querycraft_analysis::normalizer::{fingerprint, structural_pattern};
use querycraft_core::types::Binding;

proptest! {
    #[test]
    fn integer_literals_collapse(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        prop_assert_eq!(
            structural_pattern(&format!("SELECT * FROM posts WHERE id = {a}")),
            structural_pattern(&format!("select *  from posts\twhere id = {b}"))
        );
    }

    #[test]
    fn string_literals_collapse(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        prop_assert_eq!(
            structural_pattern(&format!("select * from users where name = '{a}'")),
            structural_pattern(&format!("select * from users where name = '{b}'"))
        );
    }

    #[test]
    fn pattern_is_idempotent(sql in "[a-zA-Z0-9 =',*]{0,60}") {
        let once = structural_pattern(&sql);
        prop_assert_eq!(structural_pattern(&once), once.clone());
    }

    #[test]
    fn fingerprint_separates_binding_values(a in any::<i64>(), b in any::<i64>()) {
        let sql = "select * from users where id = ?";
        let fa = fingerprint(sql, &[Binding::Int(a)]);
        let fb = fingerprint(sql, &[Binding::Int(b)]);
        prop_assert_eq!(fa == fb, a == b);
    }
}

#[test]
fn id_shapes_match_but_columns_do_not() {
    assert_eq!(
        structural_pattern("select * from t WHERE id = 5"),
        structural_pattern("select * from t WHERE id = 42")
    );
    assert_ne!(
        structural_pattern("select * from t WHERE id = 5"),
        structural_pattern("select * from t WHERE name = 'x'")
    );
}
