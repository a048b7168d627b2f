use crate::error::CoreError;
use crate::period::Period;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// A single validated sale.
///
/// Fields are private so a record can only exist with a positive price and
/// quantity whose product fits in a `Decimal`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    date: NaiveDate,
    product: String,
    category: String,
    region: String,
    unit_price: Decimal,
    quantity: Decimal,
    revenue: Decimal,
}

impl SalesRecord {
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        category: impl Into<String>,
        region: impl Into<String>,
        unit_price: Decimal,
        quantity: Decimal,
    ) -> Result<Self, CoreError> {
        if unit_price <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "unit_price".to_string(),
                format!("{unit_price} must be greater than zero"),
            ));
        }
        if quantity <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "quantity".to_string(),
                format!("{quantity} must be greater than zero"),
            ));
        }
        let revenue = unit_price.checked_mul(quantity).ok_or_else(|| {
            CoreError::InvalidInput(
                "revenue".to_string(),
                format!("{unit_price} x {quantity} exceeds the representable range"),
            )
        })?;
        Ok(Self {
            date,
            product: product.into(),
            category: category.into(),
            region: region.into(),
            unit_price,
            quantity,
            revenue,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn revenue(&self) -> Decimal {
        self.revenue
    }

    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }
}
