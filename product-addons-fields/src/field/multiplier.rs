//! Quantity addons: the customer enters how many units of the addon they want.

use super::{scalar_text, AddonField, FieldEnv};
use crate::cart::CartItemData;
use crate::error::{AddonError, Result};
use crate::price::{resolve_price, PriceContext, PriceType};
use crate::submission::SubmittedValue;
use crate::types::AddonDef;

#[derive(Debug, Clone)]
pub struct InputMultiplierField<'a> {
    addon: &'a AddonDef,
    value: Option<SubmittedValue>,
}

impl<'a> InputMultiplierField<'a> {
    pub fn new(addon: &'a AddonDef, value: Option<SubmittedValue>) -> Self {
        Self { addon, value }
    }

    fn raw(&self, env: &FieldEnv<'_>) -> Option<String> {
        scalar_text(self.value.as_ref(), |raw| env.sanitizer.sanitize_text(raw))
    }

    fn units(&self, env: &FieldEnv<'_>) -> Option<u32> {
        self.raw(env).and_then(|raw| raw.parse().ok())
    }
}

impl AddonField for InputMultiplierField<'_> {
    fn addon(&self) -> &AddonDef {
        self.addon
    }

    fn validate(&self, env: &FieldEnv<'_>) -> Result<()> {
        let Some(raw) = self.raw(env) else {
            if self.addon.required {
                return Err(AddonError::required(&self.addon.name));
            }
            return Ok(());
        };

        let units: u32 = raw.parse().map_err(|_| AddonError::InvalidNumber {
            name: self.addon.name.clone(),
            value: raw.clone(),
        })?;

        if units == 0 && self.addon.required {
            return Err(AddonError::required(&self.addon.name));
        }

        if let Some(restrictions) = self.addon.restrictions {
            let units = f64::from(units);
            if let Some(min) = restrictions.min.filter(|min| units < *min) {
                return Err(AddonError::BelowMinimum {
                    name: self.addon.name.clone(),
                    min,
                });
            }
            if let Some(max) = restrictions.max.filter(|max| units > *max) {
                return Err(AddonError::AboveMaximum {
                    name: self.addon.name.clone(),
                    max,
                });
            }
        }

        Ok(())
    }

    /// Prices per entered unit, independent of the line quantity.
    fn cart_item_data(
        &self,
        env: &FieldEnv<'_>,
        pricing: &PriceContext,
    ) -> Result<Vec<CartItemData>> {
        let Some(units) = self.units(env).filter(|u| *u > 0) else {
            return Ok(Vec::new());
        };

        let price = if self.addon.adjust_price {
            let per_unit = PriceContext::new(f64::from(units), pricing.base_amount);
            resolve_price(&self.addon.price, PriceType::QuantityBased, &per_unit)
        } else {
            0.0
        };

        let name = env.sanitizer.sanitize_text(&self.addon.name);
        Ok(vec![CartItemData::for_addon(self.addon, name, price)
            .with_value(units.to_string())
            .with_price_type(PriceType::QuantityBased)])
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::types::AddonType;

    fn candles() -> AddonDef {
        AddonDef::new("Candles", "candles", AddonType::InputMultiplier)
            .priced("0.75", PriceType::QuantityBased)
            .restrict(None, Some(12.0))
    }

    #[test]
    fn test_price_per_entered_unit() {
        let addon = candles();
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let field = InputMultiplierField::new(&addon, Some(SubmittedValue::from("8")));
        field.validate(&env).unwrap();
        let data = field
            .cart_item_data(&env, &PriceContext::new(3.0, 0.0))
            .unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(data[0].value, "8");
        assert_eq!(data[0].price, 6.0);
        assert_eq!(data[0].price_type, PriceType::QuantityBased);
    }

    #[test]
    fn test_record_is_quantity_based_whatever_the_addon_says() {
        let addon = AddonDef::new("Balloons", "balloons", AddonType::InputMultiplier)
            .priced(2.0, PriceType::FlatFee);
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let data = InputMultiplierField::new(&addon, Some(SubmittedValue::from("3")))
            .cart_item_data(&env, &PriceContext::default())
            .unwrap();

        assert_eq!(data[0].price, 6.0);
        assert_eq!(data[0].price_type, PriceType::QuantityBased);
    }

    #[test]
    fn test_not_a_whole_number() {
        let addon = candles();
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        for raw in ["2.5", "-1", "a few"] {
            let err = InputMultiplierField::new(&addon, Some(SubmittedValue::from(raw)))
                .validate(&env)
                .unwrap_err();
            assert!(matches!(err, AddonError::InvalidNumber { .. }), "{raw}");
        }
    }

    #[test]
    fn test_above_maximum() {
        let addon = candles();
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let err = InputMultiplierField::new(&addon, Some(SubmittedValue::from("13")))
            .validate(&env)
            .unwrap_err();
        assert_eq!(
            err,
            AddonError::AboveMaximum {
                name: "Candles".into(),
                max: 12.0
            }
        );
    }

    #[test]
    fn test_zero_is_missing_when_required() {
        let addon = candles().required(true);
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let err = InputMultiplierField::new(&addon, Some(SubmittedValue::from("0")))
            .validate(&env)
            .unwrap_err();
        assert_eq!(err, AddonError::required("Candles"));
    }

    #[test]
    fn test_zero_optional_yields_nothing() {
        let addon = candles();
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let field = InputMultiplierField::new(&addon, Some(SubmittedValue::from("0")));
        field.validate(&env).unwrap();
        assert!(field
            .cart_item_data(&env, &PriceContext::default())
            .unwrap()
            .is_empty());
    }
}
