//! Cart item data records.

use serde::{Deserialize, Serialize};

use crate::price::PriceType;
use crate::types::{AddonDef, AddonType};

/// One priced addon value, ready for the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemData {
    pub name: String,
    pub value: String,
    /// Short human-readable form, e.g. the file name of an upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    pub price: f64,
    pub field_name: String,
    pub field_type: AddonType,
    pub price_type: PriceType,
}

impl CartItemData {
    /// A record carrying the addon's identity and price type, with no value yet.
    pub fn for_addon(addon: &AddonDef, name: String, price: f64) -> Self {
        Self {
            name,
            value: String::new(),
            display: None,
            price,
            field_name: addon.field_name.clone(),
            field_type: addon.type_,
            price_type: addon.price_type,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_price_type(mut self, price_type: PriceType) -> Self {
        self.price_type = price_type;
        self
    }
}
