//! Evaluating every addon of a product in one pass.

use std::collections::HashMap;

use product_addons_common::Pretty;
use tracing::{debug, info};

use crate::cart::CartItemData;
use crate::error::AddonErrors;
use crate::field::{AddonField, Field, FieldEnv};
use crate::price::PriceContext;
use crate::submission::Submission;
use crate::types::AddonDef;

/// Submissions keyed by addon `field_name`.
pub type Submissions = HashMap<String, Submission>;

/// Validate every addon, then derive cart data for all of them.
///
/// All validation errors are collected before anything is stored; no upload
/// happens for a rejected form. Records come back in addon definition order.
/// Derivation stops at the first failure.
pub fn evaluate_addons(
    addons: &[AddonDef],
    submissions: &Submissions,
    env: &FieldEnv<'_>,
    pricing: &PriceContext,
) -> Result<Vec<CartItemData>, AddonErrors> {
    let fields: Vec<Field<'_>> = addons
        .iter()
        .map(|addon| {
            let submission = submissions
                .get(&addon.field_name)
                .cloned()
                .unwrap_or_default();
            Field::new(addon, submission)
        })
        .collect();

    let errors: Vec<_> = fields
        .iter()
        .filter_map(|field| field.validate(env).err())
        .collect();
    if !errors.is_empty() {
        info!(errors = errors.len(), "addon validation failed");
        return Err(AddonErrors(errors));
    }

    let mut records = Vec::new();
    for field in &fields {
        records.extend(field.cart_item_data(env, pricing)?);
    }

    debug!("cart item data: {}", Pretty(&records));
    Ok(records)
}
