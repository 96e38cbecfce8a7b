//! Section headings: shown on the product page, never submitted.

use super::{AddonField, FieldEnv};
use crate::cart::CartItemData;
use crate::error::Result;
use crate::price::PriceContext;
use crate::types::AddonDef;

#[derive(Debug, Clone)]
pub struct HeadingField<'a> {
    addon: &'a AddonDef,
}

impl<'a> HeadingField<'a> {
    pub fn new(addon: &'a AddonDef) -> Self {
        Self { addon }
    }
}

impl AddonField for HeadingField<'_> {
    fn addon(&self) -> &AddonDef {
        self.addon
    }

    fn validate(&self, _env: &FieldEnv<'_>) -> Result<()> {
        Ok(())
    }

    fn cart_item_data(
        &self,
        _env: &FieldEnv<'_>,
        _pricing: &PriceContext,
    ) -> Result<Vec<CartItemData>> {
        Ok(Vec::new())
    }
}
