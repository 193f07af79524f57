//! Provider loads declared for a trip

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::validation::{require_id, require_non_blank};
use core_kernel::{ProviderLoadId, UnitPrice, ValidationError, Weight};

/// One provider's documented contribution to a trip
///
/// Immutable once created. Loads carry no settlement reference; the
/// settlement owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLoad {
    id: ProviderLoadId,
    provider_code: String,
    product_code: String,
    documentary_weight: Weight,
    unit_price: UnitPrice,
}

impl ProviderLoad {
    /// Creates a provider load
    ///
    /// # Arguments
    ///
    /// * `id` - Load identifier, must not be nil
    /// * `provider_code` - Provider reference, must not be blank
    /// * `product_code` - Product reference, must not be blank
    /// * `documentary_weight` - Declared weight in kilograms, must be positive
    /// * `unit_price` - Price per kilogram, must be positive
    pub fn new(
        id: ProviderLoadId,
        provider_code: &str,
        product_code: &str,
        documentary_weight: Decimal,
        unit_price: Decimal,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_id("provider_load_id", id)?,
            provider_code: require_non_blank("provider_code", provider_code)?,
            product_code: require_non_blank("product_code", product_code)?,
            documentary_weight: Weight::positive("documentary_weight", documentary_weight)?,
            unit_price: UnitPrice::positive("unit_price", unit_price)?,
        })
    }

    pub fn id(&self) -> ProviderLoadId {
        self.id
    }

    pub fn provider_code(&self) -> &str {
        &self.provider_code
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn documentary_weight(&self) -> Weight {
        self.documentary_weight
    }

    pub fn unit_price(&self) -> UnitPrice {
        self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn load(
        id: ProviderLoadId,
        provider: &str,
        product: &str,
        kg: Decimal,
        price: Decimal,
    ) -> Result<ProviderLoad, ValidationError> {
        ProviderLoad::new(id, provider, product, kg, price)
    }

    #[test]
    fn test_valid_load() {
        let load = load(ProviderLoadId::new_v7(), "PRV-1", "PET", dec!(100), dec!(5)).unwrap();
        assert_eq!(load.provider_code(), "PRV-1");
        assert_eq!(load.documentary_weight().kilograms(), dec!(100));
        assert_eq!(load.unit_price().amount(), dec!(5));
    }

    #[test]
    fn test_each_argument_is_validated() {
        let id = ProviderLoadId::new_v7();
        let field = |r: Result<ProviderLoad, ValidationError>| r.unwrap_err().field;
        let nil = ProviderLoadId::nil();
        let one = dec!(1);

        assert_eq!(field(load(nil, "P", "X", one, one)), "provider_load_id");
        assert_eq!(field(load(id, " ", "X", one, one)), "provider_code");
        assert_eq!(field(load(id, "P", "", one, one)), "product_code");
        assert_eq!(field(load(id, "P", "X", dec!(0), one)), "documentary_weight");
        assert_eq!(field(load(id, "P", "X", one, dec!(-2))), "unit_price");
    }
}
