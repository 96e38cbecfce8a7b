//! Customer-entered price addons, e.g. a donation or a tip.

use super::{scalar_text, AddonField, FieldEnv};
use crate::cart::CartItemData;
use crate::error::{AddonError, Result};
use crate::price::{parse_amount, PriceContext, PriceType};
use crate::submission::SubmittedValue;
use crate::types::AddonDef;

#[derive(Debug, Clone)]
pub struct CustomPriceField<'a> {
    addon: &'a AddonDef,
    value: Option<SubmittedValue>,
}

impl<'a> CustomPriceField<'a> {
    pub fn new(addon: &'a AddonDef, value: Option<SubmittedValue>) -> Self {
        Self { addon, value }
    }

    fn raw(&self, env: &FieldEnv<'_>) -> Option<String> {
        scalar_text(self.value.as_ref(), |raw| env.sanitizer.sanitize_text(raw))
    }
}

impl AddonField for CustomPriceField<'_> {
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

        let amount = parse_amount(&raw)
            .filter(|a| *a >= 0.0)
            .ok_or_else(|| AddonError::InvalidNumber {
                name: self.addon.name.clone(),
                value: raw.clone(),
            })?;

        if let Some(restrictions) = self.addon.restrictions {
            if let Some(min) = restrictions.min.filter(|min| amount < *min) {
                return Err(AddonError::BelowMinimum {
                    name: self.addon.name.clone(),
                    min,
                });
            }
            if let Some(max) = restrictions.max.filter(|max| amount > *max) {
                return Err(AddonError::AboveMaximum {
                    name: self.addon.name.clone(),
                    max,
                });
            }
        }

        Ok(())
    }

    /// The entered amount is the price; `adjust_price` and the addon's own
    /// price do not apply.
    fn cart_item_data(
        &self,
        env: &FieldEnv<'_>,
        _pricing: &PriceContext,
    ) -> Result<Vec<CartItemData>> {
        let amount = self
            .raw(env)
            .and_then(|raw| parse_amount(&raw))
            .filter(|a| *a > 0.0);

        Ok(amount
            .map(|amount| {
                let name = env.sanitizer.sanitize_text(&self.addon.name);
                vec![CartItemData::for_addon(self.addon, name, amount)
                    .with_value(format!("{amount:.2}"))
                    .with_price_type(PriceType::FlatFee)]
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::types::AddonType;

    fn donation() -> AddonDef {
        AddonDef::new("Donation", "donation", AddonType::CustomPrice)
            .restrict(Some(1.0), Some(100.0))
    }

    #[test]
    fn test_invalid_number() {
        let addon = donation();
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        for raw in ["lots", "-5"] {
            let err = CustomPriceField::new(&addon, Some(SubmittedValue::from(raw)))
                .validate(&env)
                .unwrap_err();
            assert!(matches!(err, AddonError::InvalidNumber { .. }));
        }
    }

    #[test]
    fn test_range() {
        let addon = donation();
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let low = CustomPriceField::new(&addon, Some(SubmittedValue::from("0.5")));
        assert_eq!(
            low.validate(&env).unwrap_err(),
            AddonError::BelowMinimum {
                name: "Donation".into(),
                min: 1.0
            }
        );

        let high = CustomPriceField::new(&addon, Some(SubmittedValue::from("250")));
        assert!(matches!(
            high.validate(&env),
            Err(AddonError::AboveMaximum { .. })
        ));
    }

    #[test]
    fn test_entered_amount_is_the_price() {
        let addon = donation().priced(99.0, PriceType::PercentageBased);
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        let field = CustomPriceField::new(&addon, Some(SubmittedValue::from("12,5")));
        field.validate(&env).unwrap();
        let data = field
            .cart_item_data(&env, &PriceContext::new(3.0, 40.0))
            .unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(data[0].price, 12.5);
        assert_eq!(data[0].value, "12.50");
        assert_eq!(data[0].price_type, PriceType::FlatFee);
    }

    #[test]
    fn test_required_and_zero() {
        let addon = donation().required(true).restrict(None, None);
        let uploader = RecordingUploader::ok();
        let env = env(&uploader);

        assert_eq!(
            CustomPriceField::new(&addon, None)
                .validate(&env)
                .unwrap_err(),
            AddonError::required("Donation")
        );

        let zero = CustomPriceField::new(&addon, Some(SubmittedValue::from("0")));
        zero.validate(&env).unwrap();
        assert!(zero
            .cart_item_data(&env, &PriceContext::default())
            .unwrap()
            .is_empty());
    }
}
