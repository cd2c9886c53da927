//! Variant generation integration tests.
//!
//! The generator feeds the admin product form; these tests pin the
//! name/SKU derivation and the explosion cap end to end.

use wildfig_core::variants::{MAX_COMBINATIONS, OptionGroup, VariantError, generate};

#[test]
fn size_color_grid_generates_in_nested_iteration_order() {
    let groups = [
        OptionGroup::new("Size", ["S", "M"]),
        OptionGroup::new("Color", ["Red", "Blue"]),
    ];

    let variants = generate("TEE", &groups).expect("2x2 grid generates");

    let names: Vec<&str> = variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["S - Red", "S - Blue", "M - Red", "M - Blue"]);

    let skus: Vec<&str> = variants.iter().map(|v| v.sku.as_str()).collect();
    assert_eq!(skus, vec!["TEE-SR", "TEE-SB", "TEE-MR", "TEE-MB"]);
}

#[test]
fn attributes_carry_the_full_combination() {
    let groups = [
        OptionGroup::new("Size", ["M"]),
        OptionGroup::new("Color", ["Rust"]),
        OptionGroup::new("Fit", ["Relaxed"]),
    ];

    let variants = generate("LINEN", &groups).expect("single combination generates");
    assert_eq!(variants.len(), 1);

    let attrs = &variants[0].attributes;
    assert_eq!(attrs.get("Size").map(String::as_str), Some("M"));
    assert_eq!(attrs.get("Color").map(String::as_str), Some("Rust"));
    assert_eq!(attrs.get("Fit").map(String::as_str), Some("Relaxed"));
    assert_eq!(variants[0].name, "M - Rust - Relaxed");
}

#[test]
fn output_size_is_the_product_of_group_sizes() {
    let groups = [
        OptionGroup::new("A", ["1", "2", "3"]),
        OptionGroup::new("B", ["x", "y"]),
        OptionGroup::new("C", ["p", "q"]),
    ];

    let variants = generate("X", &groups).expect("12 combinations generate");
    assert_eq!(variants.len(), 12);
}

#[test]
fn explosion_is_capped_instead_of_materialized() {
    // 5 options x 10 values each would be 100,000 rows in the original;
    // here it is a typed error.
    let groups: Vec<OptionGroup> = (0..5)
        .map(|g| OptionGroup::new(format!("Opt{g}"), (0..10).map(|v| format!("v{v}"))))
        .collect();

    match generate("BIG", &groups) {
        Err(VariantError::TooManyCombinations { count, max }) => {
            assert!(count > MAX_COMBINATIONS);
            assert_eq!(max, MAX_COMBINATIONS);
        }
        other => panic!("expected TooManyCombinations, got {other:?}"),
    }
}

#[test]
fn empty_option_group_is_rejected_by_name() {
    let groups = [
        OptionGroup::new("Size", ["S"]),
        OptionGroup::new("Color", Vec::<String>::new()),
    ];

    assert!(matches!(
        generate("TEE", &groups),
        Err(VariantError::EmptyGroup(name)) if name == "Color"
    ));
}
