//! Free-text addons (`custom_text`, `custom_textarea`).

use super::{addon_record, scalar_text, AddonField, FieldEnv};
use crate::cart::CartItemData;
use crate::error::{AddonError, Result};
use crate::price::PriceContext;
use crate::submission::SubmittedValue;
use crate::types::{AddonDef, AddonType};

#[derive(Debug, Clone)]
pub struct TextField<'a> {
    addon: &'a AddonDef,
    value: Option<SubmittedValue>,
}

impl<'a> TextField<'a> {
    pub fn new(addon: &'a AddonDef, value: Option<SubmittedValue>) -> Self {
        Self { addon, value }
    }

    fn text(&self, env: &FieldEnv<'_>) -> Option<String> {
        let multiline = self.addon.type_ == AddonType::CustomTextarea;
        scalar_text(self.value.as_ref(), |raw| {
            if multiline {
                env.sanitizer.sanitize_textarea(raw)
            } else {
                env.sanitizer.sanitize_text(raw)
            }
        })
    }
}

impl AddonField for TextField<'_> {
    fn addon(&self) -> &AddonDef {
        self.addon
    }

    fn validate(&self, env: &FieldEnv<'_>) -> Result<()> {
        let Some(text) = self.text(env) else {
            if self.addon.required {
                return Err(AddonError::required(&self.addon.name));
            }
            return Ok(());
        };

        let Some(restrictions) = self.addon.restrictions else {
            return Ok(());
        };
        let length = text.chars().count();

        if let Some(min) = restrictions.min.map(|m| m.max(0.0) as usize) {
            if length < min {
                return Err(AddonError::TooShort {
                    name: self.addon.name.clone(),
                    min,
                });
            }
        }
        if let Some(max) = restrictions.max.map(|m| m.max(0.0) as usize) {
            if length > max {
                return Err(AddonError::TooLong {
                    name: self.addon.name.clone(),
                    max,
                });
            }
        }

        Ok(())
    }

    fn cart_item_data(
        &self,
        env: &FieldEnv<'_>,
        pricing: &PriceContext,
    ) -> Result<Vec<CartItemData>> {
        Ok(self
            .text(env)
            .map(|text| vec![addon_record(self.addon, env, pricing).with_value(text)])
            .unwrap_or_default())
    }
}
