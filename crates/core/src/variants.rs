//! Variant generation: the cartesian product of option value lists.
//!
//! Given N option groups (e.g., Size: [S, M, L] and Color: [Red, Blue]),
//! produces one variant skeleton per combination with a derived name
//! (values joined by " - ") and a derived SKU (base SKU plus one letter
//! per option value). Output size is the product of the group sizes, so
//! generation is capped at [`MAX_COMBINATIONS`] rather than silently
//! materializing an unbounded form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Upper bound on generated combinations.
pub const MAX_COMBINATIONS: usize = 1_000;

/// One option group from the product form, e.g. Size: [S, M, L].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    /// Option name (e.g., "Size").
    pub name: String,
    /// Option values in display order; empty strings are ignored.
    pub values: Vec<String>,
}

impl OptionGroup {
    /// Create a group from a name and values.
    #[must_use]
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    fn usable_values(&self) -> Vec<&str> {
        self.values
            .iter()
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .collect()
    }
}

/// One generated variant skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVariant {
    /// Derived name: option values joined by " - " (e.g., "S - Red").
    pub name: String,
    /// Derived SKU: base SKU plus a one-letter code per value
    /// (e.g., "TEE-SR").
    pub sku: String,
    /// Option name -> selected value for this combination.
    pub attributes: BTreeMap<String, String>,
}

/// Errors from variant generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariantError {
    /// A group contributed no usable values.
    #[error("option group '{0}' has no values")]
    EmptyGroup(String),
    /// The cartesian product exceeds [`MAX_COMBINATIONS`].
    #[error("{count} combinations exceed the limit of {max}")]
    TooManyCombinations { count: usize, max: usize },
}

/// Generate the full cartesian product of the option groups.
///
/// Combinations come out in nested-iteration order: the first group varies
/// slowest, the last fastest. With no groups the result is empty (the
/// product stays a simple product).
///
/// # Errors
///
/// Returns [`VariantError::EmptyGroup`] if any group has no usable values,
/// or [`VariantError::TooManyCombinations`] if the product of the group
/// sizes exceeds [`MAX_COMBINATIONS`].
pub fn generate(
    base_sku: &str,
    groups: &[OptionGroup],
) -> Result<Vec<GeneratedVariant>, VariantError> {
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let mut value_lists: Vec<(&str, Vec<&str>)> = Vec::with_capacity(groups.len());
    let mut count: usize = 1;
    for group in groups {
        let values = group.usable_values();
        if values.is_empty() {
            return Err(VariantError::EmptyGroup(group.name.clone()));
        }
        count = count.saturating_mul(values.len());
        if count > MAX_COMBINATIONS {
            return Err(VariantError::TooManyCombinations {
                count,
                max: MAX_COMBINATIONS,
            });
        }
        value_lists.push((group.name.as_str(), values));
    }

    let mut out = Vec::with_capacity(count);
    let mut chosen: Vec<(&str, &str)> = Vec::with_capacity(value_lists.len());
    walk(base_sku, &value_lists, &mut chosen, &mut out);
    Ok(out)
}

/// Depth-first recursion over the option lists, one level per group.
fn walk<'a>(
    base_sku: &str,
    groups: &'a [(&'a str, Vec<&'a str>)],
    chosen: &mut Vec<(&'a str, &'a str)>,
    out: &mut Vec<GeneratedVariant>,
) {
    let Some(((name, values), rest)) = groups.split_first() else {
        out.push(build_variant(base_sku, chosen));
        return;
    };

    for value in values {
        chosen.push((name, value));
        walk(base_sku, rest, chosen, out);
        chosen.pop();
    }
}

fn build_variant(base_sku: &str, chosen: &[(&str, &str)]) -> GeneratedVariant {
    let name = chosen
        .iter()
        .map(|(_, v)| *v)
        .collect::<Vec<_>>()
        .join(" - ");

    let code: String = chosen
        .iter()
        .filter_map(|(_, v)| v.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    let sku = if code.is_empty() {
        base_sku.to_owned()
    } else {
        format!("{base_sku}-{code}")
    };

    let attributes = chosen
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();

    GeneratedVariant {
        name,
        sku,
        attributes,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two_grid() {
        let groups = [
            OptionGroup::new("Size", ["S", "M"]),
            OptionGroup::new("Color", ["Red", "Blue"]),
        ];

        let variants = generate("TEE", &groups).unwrap();
        let names: Vec<&str> = variants.iter().map(|v| v.name.as_str()).collect();

        assert_eq!(names, vec!["S - Red", "S - Blue", "M - Red", "M - Blue"]);
    }

    #[test]
    fn test_derived_skus() {
        let groups = [
            OptionGroup::new("Size", ["S", "M"]),
            OptionGroup::new("Color", ["Red", "Blue"]),
        ];

        let variants = generate("TEE", &groups).unwrap();
        let skus: Vec<&str> = variants.iter().map(|v| v.sku.as_str()).collect();

        assert_eq!(skus, vec!["TEE-SR", "TEE-SB", "TEE-MR", "TEE-MB"]);
    }

    #[test]
    fn test_attributes_recorded_per_combination() {
        let groups = [
            OptionGroup::new("Size", ["S"]),
            OptionGroup::new("Color", ["Red"]),
        ];

        let variants = generate("TEE", &groups).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].attributes.get("Size").unwrap(), "S");
        assert_eq!(variants[0].attributes.get("Color").unwrap(), "Red");
    }

    #[test]
    fn test_no_groups_yields_no_variants() {
        assert!(generate("TEE", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let groups = [OptionGroup::new("Size", ["S", "", "  ", "M"])];
        let variants = generate("TEE", &groups).unwrap();
        assert_eq!(variants.len(), 2);
    }

    #[test]
    fn test_all_empty_group_rejected() {
        let groups = [OptionGroup::new("Size", [""])];
        assert!(matches!(
            generate("TEE", &groups),
            Err(VariantError::EmptyGroup(name)) if name == "Size"
        ));
    }

    #[test]
    fn test_explosion_capped() {
        // 11 x 10 x 10 = 1100 > 1000
        let groups = [
            OptionGroup::new("A", (0..11).map(|i| i.to_string())),
            OptionGroup::new("B", (0..10).map(|i| i.to_string())),
            OptionGroup::new("C", (0..10).map(|i| i.to_string())),
        ];

        assert!(matches!(
            generate("X", &groups),
            Err(VariantError::TooManyCombinations { count: 1100, .. })
        ));
    }

    #[test]
    fn test_single_group() {
        let groups = [OptionGroup::new("Size", ["S", "M", "L"])];
        let variants = generate("TEE", &groups).unwrap();
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].name, "S");
        assert_eq!(variants[0].sku, "TEE-S");
    }
}
