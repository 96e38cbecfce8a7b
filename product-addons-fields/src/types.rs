//! Addon definition types.
//!
//! Definitions are supplied by the catalog loader and are read-only for the
//! whole request. They deserialize from YAML or JSON via serde.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::price::{Amount, PriceType};

/// The kind of input an addon collects. Selects the [`crate::Field`] variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AddonType {
    Checkbox,
    #[serde(alias = "radio")]
    Radiobutton,
    #[serde(alias = "multiple_choice")]
    Select,
    FileUpload,
    CustomText,
    CustomTextarea,
    CustomPrice,
    InputMultiplier,
    /// Display-only section heading
    Heading,
}

impl AddonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddonType::Checkbox => "checkbox",
            AddonType::Radiobutton => "radiobutton",
            AddonType::Select => "select",
            AddonType::FileUpload => "file_upload",
            AddonType::CustomText => "custom_text",
            AddonType::CustomTextarea => "custom_textarea",
            AddonType::CustomPrice => "custom_price",
            AddonType::InputMultiplier => "input_multiplier",
            AddonType::Heading => "heading",
        }
    }

    /// Whether the addon chooses among predefined options.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            AddonType::Checkbox | AddonType::Radiobutton | AddonType::Select
        )
    }
}

impl std::fmt::Display for AddonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One choice of a list addon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddonOption {
    pub label: String,
    #[serde(default)]
    pub price: Amount,
    #[serde(default)]
    pub price_type: PriceType,
}

impl AddonOption {
    pub fn new(label: impl Into<String>, price: impl Into<Amount>, price_type: PriceType) -> Self {
        Self {
            label: label.into(),
            price: price.into(),
            price_type,
        }
    }
}

/// Bounds on a submitted value.
///
/// Character counts for text addons, amounts for custom prices, units for
/// input multipliers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Restrictions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A complete addon definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddonDef {
    /// Display label shown to the customer and interpolated into errors.
    pub name: String,
    /// Stable key the submitted value is looked up by.
    pub field_name: String,
    #[serde(rename = "type")]
    pub type_: AddonType,
    #[serde(default, deserialize_with = "truthy")]
    pub required: bool,
    #[serde(default)]
    pub price: Amount,
    #[serde(default)]
    pub price_type: PriceType,
    /// When false, non-list addons contribute no price.
    #[serde(default, deserialize_with = "truthy")]
    pub adjust_price: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<AddonOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Restrictions>,
}

impl AddonDef {
    pub fn new(name: impl Into<String>, field_name: impl Into<String>, type_: AddonType) -> Self {
        Self {
            name: name.into(),
            field_name: field_name.into(),
            type_,
            required: false,
            price: Amount::default(),
            price_type: PriceType::default(),
            adjust_price: false,
            options: Vec::new(),
            restrictions: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the addon's own price. Also turns on `adjust_price`.
    pub fn priced(mut self, price: impl Into<Amount>, price_type: PriceType) -> Self {
        self.price = price.into();
        self.price_type = price_type;
        self.adjust_price = true;
        self
    }

    pub fn adjust_price(mut self, adjust: bool) -> Self {
        self.adjust_price = adjust;
        self
    }

    pub fn option(mut self, option: AddonOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn restrict(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.restrictions = Some(Restrictions { min, max });
        self
    }
}

/// Accept the loose booleans catalog exports contain: `true`, `1`, `"yes"`,
/// `""`, `"0"` and so on.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "" | "0" | "false" | "no" | "off"
        ),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addon_def_from_yaml() {
        let yaml = r#"
name: Gift Options
field_name: gift-options
type: checkbox
required: 1
options:
  - label: Gift Wrap
    price: 2
    price_type: flat_fee
  - label: Card
    price: "1.50"
"#;
        let addon: AddonDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(addon.type_, AddonType::Checkbox);
        assert!(addon.required);
        assert!(!addon.adjust_price);
        assert_eq!(addon.options.len(), 2);
        assert_eq!(addon.options[0].price.value(), 2.0);
        assert_eq!(addon.options[1].price.value(), 1.5);
        assert_eq!(addon.options[1].price_type, PriceType::FlatFee);
    }

    #[test]
    fn type_renames_to_type_in_json() {
        let addon = AddonDef::new("Engraving", "engraving", AddonType::FileUpload);
        let json = serde_json::to_value(&addon).unwrap();
        assert_eq!(json["type"], "file_upload");
        assert!(json.get("type_").is_none());
        assert!(json.get("options").is_none());
    }

    #[test]
    fn type_aliases() {
        let radio: AddonType = serde_json::from_str("\"radio\"").unwrap();
        let select: AddonType = serde_json::from_str("\"multiple_choice\"").unwrap();
        assert_eq!(radio, AddonType::Radiobutton);
        assert_eq!(select, AddonType::Select);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result: Result<AddonType, _> = serde_json::from_str("\"color_picker\"");
        assert!(result.is_err());
    }

    #[test]
    fn loose_booleans() {
        let json = serde_json::json!({
            "name": "Engraving",
            "field_name": "engraving",
            "type": "file_upload",
            "required": "yes",
            "adjust_price": "0",
        });
        let addon: AddonDef = serde_json::from_value(json).unwrap();
        assert!(addon.required);
        assert!(!addon.adjust_price);
    }

    #[test]
    fn priced_turns_on_adjust_price() {
        let addon = AddonDef::new("Engraving", "engraving", AddonType::FileUpload)
            .priced(5.0, PriceType::FlatFee);
        assert!(addon.adjust_price);
        assert_eq!(addon.price.value(), 5.0);
    }

    #[test]
    fn list_types() {
        assert!(AddonType::Checkbox.is_list());
        assert!(AddonType::Select.is_list());
        assert!(!AddonType::FileUpload.is_list());
        assert_eq!(AddonType::InputMultiplier.to_string(), "input_multiplier");
    }
}
