//! Proptest generators shared by the engine tests.

use proptest::prelude::*;

use super::cell_ref::index_to_column;

/// Formula text the parser accepts, written without operator whitespace.
pub fn formula_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..1000, 0u32..100).prop_map(|(a, b)| format!("{}.{}", a, b)),
        (any::<bool>(), 0usize..60, any::<bool>(), 0usize..200).prop_map(
            |(col_abs, col, row_abs, row)| {
                format!(
                    "{}{}{}{}",
                    if col_abs { "$" } else { "" },
                    index_to_column(col),
                    if row_abs { "$" } else { "" },
                    row + 1
                )
            }
        ),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!['+', '-', '*', '/']), inner.clone())
                .prop_map(|(a, op, b)| format!("{}{}{}", a, op, b)),
            inner.clone().prop_map(|a| format!("({})", a)),
            (inner.clone(), inner).prop_map(|(a, b)| format!("power({}, {})", a, b)),
        ]
    })
}
