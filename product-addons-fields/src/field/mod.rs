//! Addon fields: validation and cart data derivation per addon type.
//!
//! [`Field::new`] picks the variant from the addon's [`AddonType`]. Callers
//! must run [`AddonField::validate`] before [`AddonField::cart_item_data`];
//! derivation assumes the submission already passed validation.

mod custom_price;
mod file_upload;
mod heading;
mod list;
mod multiplier;
mod text;

pub use custom_price::CustomPriceField;
pub use file_upload::FileUploadField;
pub use heading::HeadingField;
pub use list::ListField;
pub use multiplier::InputMultiplierField;
pub use text::TextField;

use product_addons_common::TextSanitizer;
use product_addons_config::AddonsConfig;

use crate::cart::CartItemData;
use crate::collaborators::{CustomerId, SizePolicy, Uploader};
use crate::error::Result;
use crate::price::PriceContext;
use crate::submission::Submission;
use crate::types::{AddonDef, AddonType};

/// Runtime behavior for one addon and its submitted value.
pub trait AddonField {
    /// The definition this field was built from.
    fn addon(&self) -> &AddonDef;

    /// Decide whether the submission is admissible. Never stores anything.
    fn validate(&self, env: &FieldEnv<'_>) -> Result<()>;

    /// Build the priced records for a validated submission.
    fn cart_item_data(
        &self,
        env: &FieldEnv<'_>,
        pricing: &PriceContext,
    ) -> Result<Vec<CartItemData>>;
}

/// Collaborators and switches shared by every field of a request.
pub struct FieldEnv<'a> {
    pub size_policy: &'a dyn SizePolicy,
    pub uploader: &'a dyn Uploader,
    pub sanitizer: &'a dyn TextSanitizer,
    pub customer: CustomerId,
    /// Skip storing uploads.
    pub dry_run: bool,
    /// Reject irregularly nested list selections at validation.
    pub strict_list_nesting: bool,
}

impl<'a> FieldEnv<'a> {
    pub fn new(
        size_policy: &'a dyn SizePolicy,
        uploader: &'a dyn Uploader,
        sanitizer: &'a dyn TextSanitizer,
        customer: CustomerId,
    ) -> Self {
        Self {
            size_policy,
            uploader,
            sanitizer,
            customer,
            dry_run: false,
            strict_list_nesting: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn strict_list_nesting(mut self, strict: bool) -> Self {
        self.strict_list_nesting = strict;
        self
    }

    /// Take the switches from loaded configuration.
    pub fn configured(self, config: &AddonsConfig) -> Self {
        self.dry_run(config.dry_run)
            .strict_list_nesting(config.strict_list_nesting)
    }
}

/// A field of any addon type.
#[derive(Debug, Clone)]
pub enum Field<'a> {
    List(ListField<'a>),
    FileUpload(FileUploadField<'a>),
    Text(TextField<'a>),
    CustomPrice(CustomPriceField<'a>),
    InputMultiplier(InputMultiplierField<'a>),
    Heading(HeadingField<'a>),
}

impl<'a> Field<'a> {
    pub fn new(addon: &'a AddonDef, submission: Submission) -> Self {
        match addon.type_ {
            AddonType::Checkbox | AddonType::Radiobutton | AddonType::Select => {
                Field::List(ListField::new(addon, submission.value))
            }
            AddonType::FileUpload => Field::FileUpload(FileUploadField::new(
                addon,
                submission.file,
                submission.value,
            )),
            AddonType::CustomText | AddonType::CustomTextarea => {
                Field::Text(TextField::new(addon, submission.value))
            }
            AddonType::CustomPrice => {
                Field::CustomPrice(CustomPriceField::new(addon, submission.value))
            }
            AddonType::InputMultiplier => {
                Field::InputMultiplier(InputMultiplierField::new(addon, submission.value))
            }
            AddonType::Heading => Field::Heading(HeadingField::new(addon)),
        }
    }

    fn inner(&self) -> &dyn AddonField {
        match self {
            Field::List(f) => f,
            Field::FileUpload(f) => f,
            Field::Text(f) => f,
            Field::CustomPrice(f) => f,
            Field::InputMultiplier(f) => f,
            Field::Heading(f) => f,
        }
    }
}

impl AddonField for Field<'_> {
    fn addon(&self) -> &AddonDef {
        self.inner().addon()
    }

    fn validate(&self, env: &FieldEnv<'_>) -> Result<()> {
        self.inner().validate(env)
    }

    fn cart_item_data(
        &self,
        env: &FieldEnv<'_>,
        pricing: &PriceContext,
    ) -> Result<Vec<CartItemData>> {
        self.inner().cart_item_data(env, pricing)
    }
}

/// Base record for a non-list addon: sanitized name and, when the addon
/// adjusts the price, its resolved price.
fn addon_record(addon: &AddonDef, env: &FieldEnv<'_>, pricing: &PriceContext) -> CartItemData {
    let price = if addon.adjust_price {
        crate::price::resolve_price(&addon.price, addon.price_type, pricing)
    } else {
        0.0
    };
    CartItemData::for_addon(addon, env.sanitizer.sanitize_text(&addon.name), price)
}

/// The submitted scalar, sanitized; `None` when nothing usable was sent.
fn scalar_text(
    value: Option<&crate::submission::SubmittedValue>,
    sanitize: impl Fn(&str) -> String,
) -> Option<String> {
    value
        .and_then(|v| v.as_scalar())
        .map(sanitize)
        .filter(|s| !s.is_empty())
}
