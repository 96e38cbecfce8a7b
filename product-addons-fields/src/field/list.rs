//! Checkbox, radio and select addons.

use product_addons_common::slugify;
use tracing::{debug, warn};

use super::{AddonField, FieldEnv};
use crate::cart::CartItemData;
use crate::error::{AddonError, Result};
use crate::price::{resolve_price, PriceContext};
use crate::submission::SubmittedValue;
use crate::types::AddonDef;

/// Matches submitted choices against the addon's options.
///
/// Unknown choices are dropped without error. Callers that need strictness
/// compare the selection count with the record count themselves.
#[derive(Debug, Clone)]
pub struct ListField<'a> {
    addon: &'a AddonDef,
    value: Option<SubmittedValue>,
}

impl<'a> ListField<'a> {
    pub fn new(addon: &'a AddonDef, value: Option<SubmittedValue>) -> Self {
        Self { addon, value }
    }

    fn submitted(&self) -> Option<&SubmittedValue> {
        self.value.as_ref().filter(|v| !v.is_empty())
    }
}

/// Flatten a submission into lowercase choice keys.
///
/// A scalar is a single choice. When the first element of a sequence is
/// itself a sequence, only that inner sequence is used and its siblings are
/// ignored; that is the shape a grouped input posts. Deeper nesting is
/// skipped.
fn selected_keys(value: &SubmittedValue) -> Vec<String> {
    let outer: Vec<&SubmittedValue> = match value {
        SubmittedValue::Scalar(_) => vec![value],
        SubmittedValue::Sequence(items) => items.iter().collect(),
    };

    let items = match outer.first() {
        Some(SubmittedValue::Sequence(inner)) => inner.iter().collect(),
        _ => outer,
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            SubmittedValue::Scalar(s) => Some(s.to_lowercase()),
            SubmittedValue::Sequence(_) => None,
        })
        .collect()
}

/// Shapes the storefront produces: a scalar, a flat sequence, or a single
/// flat sequence wrapped in one more sequence.
fn is_regular(value: &SubmittedValue) -> bool {
    let is_flat = |items: &[SubmittedValue]| {
        items
            .iter()
            .all(|item| matches!(item, SubmittedValue::Scalar(_)))
    };

    match value {
        SubmittedValue::Scalar(_) => true,
        SubmittedValue::Sequence(items) => match items.as_slice() {
            [SubmittedValue::Sequence(inner)] => is_flat(inner),
            _ => is_flat(items),
        },
    }
}

impl AddonField for ListField<'_> {
    fn addon(&self) -> &AddonDef {
        self.addon
    }

    fn validate(&self, env: &FieldEnv<'_>) -> Result<()> {
        let Some(value) = self.submitted() else {
            if self.addon.required {
                return Err(AddonError::required(&self.addon.name));
            }
            return Ok(());
        };

        if env.strict_list_nesting && !is_regular(value) {
            return Err(AddonError::IrregularSelection {
                name: self.addon.name.clone(),
            });
        }

        Ok(())
    }

    fn cart_item_data(
        &self,
        env: &FieldEnv<'_>,
        pricing: &PriceContext,
    ) -> Result<Vec<CartItemData>> {
        let Some(value) = self.submitted() else {
            return Ok(Vec::new());
        };

        let selected = selected_keys(value);
        let name = env.sanitizer.sanitize_text(&self.addon.name);

        let records: Vec<CartItemData> = self
            .addon
            .options
            .iter()
            .filter(|option| selected.contains(&slugify(&option.label)))
            .map(|option| {
                CartItemData::for_addon(
                    self.addon,
                    name.clone(),
                    resolve_price(&option.price, option.price_type, pricing),
                )
                .with_value(option.label.clone())
                .with_price_type(option.price_type)
            })
            .collect();

        if records.len() < selected.len() {
            warn!(
                field = %self.addon.field_name,
                selected = selected.len(),
                matched = records.len(),
                "dropping selections with no matching option"
            );
        }
        debug!(field = %self.addon.field_name, records = records.len(), "list cart item data");

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::price::PriceType;
    use crate::types::{AddonOption, AddonType};

    fn gift_options() -> AddonDef {
        AddonDef::new("Gift Options", "gift-options", AddonType::Checkbox)
            .option(AddonOption::new("A", 2.0, PriceType::FlatFee))
            .option(AddonOption::new("B", 5.0, PriceType::FlatFee))
            .option(AddonOption::new("Gift Wrap", 3.0, PriceType::FlatFee))
            .option(AddonOption::new("Rush", 10.0, PriceType::PercentageBased))
    }

    fn derive(addon: &AddonDef, value: SubmittedValue) -> Vec<CartItemData> {
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);
        let field = ListField::new(addon, Some(value));
        field.validate(&env).unwrap();
        field
            .cart_item_data(&env, &PriceContext::new(2.0, 50.0))
            .unwrap()
    }

    #[test]
    fn test_required_missing() {
        let addon = gift_options().required(true);
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        for value in [
            None,
            Some(SubmittedValue::Sequence(vec![])),
            Some(SubmittedValue::from("")),
        ] {
            let err = ListField::new(&addon, value).validate(&env).unwrap_err();
            assert_eq!(err, AddonError::required("Gift Options"));
        }
    }

    #[test]
    fn test_required_present_passes() {
        let addon = gift_options().required(true);
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let field = ListField::new(&addon, Some(SubmittedValue::from(vec!["b"])));
        assert!(field.validate(&env).is_ok());
    }

    #[test]
    fn test_optional_empty_yields_nothing() {
        let addon = gift_options();
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let field = ListField::new(&addon, None);
        field.validate(&env).unwrap();
        assert!(field
            .cart_item_data(&env, &PriceContext::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_single_selection_uses_option_price() {
        let data = derive(&gift_options(), SubmittedValue::from(vec!["B"]));

        assert_eq!(data.len(), 1);
        assert_eq!(data[0].value, "B");
        assert_eq!(data[0].price, 5.0);
        assert_eq!(data[0].name, "Gift Options");
        assert_eq!(data[0].field_name, "gift-options");
        assert_eq!(data[0].field_type, AddonType::Checkbox);
        assert_eq!(data[0].price_type, PriceType::FlatFee);
        assert_eq!(data[0].display, None);
    }

    #[test]
    fn test_slug_and_case_insensitive_match() {
        let data = derive(&gift_options(), SubmittedValue::from("GIFT-wrap"));

        assert_eq!(data.len(), 1);
        assert_eq!(data[0].value, "Gift Wrap");
        assert_eq!(data[0].price, 3.0);
    }

    #[test]
    fn test_labels_and_selections_lowercase_alike() {
        let addon = AddonDef::new("Street", "street", AddonType::Radiobutton).option(
            AddonOption::new("\u{39f}\u{394}\u{39f}\u{3a3}", 1.0, PriceType::FlatFee),
        );

        let records = derive(&addon, SubmittedValue::from("\u{39f}\u{394}\u{39f}\u{3a3}"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "\u{39f}\u{394}\u{39f}\u{3a3}");
    }

    #[test]
    fn test_output_follows_option_order() {
        let data = derive(&gift_options(), SubmittedValue::from(vec!["gift-wrap", "a"]));

        let values: Vec<_> = data.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, vec!["A", "Gift Wrap"]);
    }

    #[test]
    fn test_unmatched_selections_dropped() {
        let data = derive(
            &gift_options(),
            SubmittedValue::from(vec!["b", "discontinued", "also-gone"]),
        );

        assert_eq!(data.len(), 1);
        assert_eq!(data[0].value, "B");
    }

    #[test]
    fn test_option_price_type_is_resolved() {
        let data = derive(&gift_options(), SubmittedValue::from("rush"));

        // 10% of 50
        assert_eq!(data[0].price, 5.0);
        assert_eq!(data[0].price_type, PriceType::PercentageBased);
    }

    #[test]
    fn test_nested_first_sequence_wins() {
        let value = SubmittedValue::Sequence(vec![
            SubmittedValue::from(vec!["a", "b"]),
            SubmittedValue::from("gift-wrap"),
        ]);
        let data = derive(&gift_options(), value);

        let values: Vec<_> = data.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, vec!["A", "B"]);
    }

    #[test]
    fn test_strict_nesting_rejects_irregular_shapes() {
        let addon = gift_options();
        let uploader = RecordingUploader::ok();
        let env = env(&uploader).strict_list_nesting(true);

        let irregular = SubmittedValue::Sequence(vec![
            SubmittedValue::from(vec!["a"]),
            SubmittedValue::from("b"),
        ]);
        let err = ListField::new(&addon, Some(irregular))
            .validate(&env)
            .unwrap_err();
        assert!(matches!(err, AddonError::IrregularSelection { .. }));

        let wrapped = SubmittedValue::Sequence(vec![SubmittedValue::from(vec!["a", "b"])]);
        assert!(ListField::new(&addon, Some(wrapped)).validate(&env).is_ok());
        assert!(ListField::new(&addon, Some(SubmittedValue::from("a")))
            .validate(&env)
            .is_ok());
    }

    #[test]
    fn test_lenient_nesting_accepts_irregular_shapes() {
        let addon = gift_options();
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let irregular = SubmittedValue::Sequence(vec![
            SubmittedValue::from("a"),
            SubmittedValue::from(vec!["b"]),
        ]);
        assert!(ListField::new(&addon, Some(irregular)).validate(&env).is_ok());
    }
}
