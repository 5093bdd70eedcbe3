use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::money::{Money, MoneyParseError};
use crate::error::LedgerError;

pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw sale form as submitted by the presentation layer. Every field is
/// free text until [`NewSale::parse`] accepts it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaleSubmission {
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price_per_item: String,
    #[serde(default, alias = "sale_date")]
    pub date: String,
}

/// A validated sale, ready to be appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub item_name: String,
    pub quantity: i64,
    pub price_per_item: Money,
    pub sale_date: NaiveDate,
    pub revenue: Money,
}

impl NewSale {
    pub fn parse(submission: &SaleSubmission) -> Result<Self, LedgerError> {
        Self::from_parts(
            &submission.item_name,
            &submission.quantity,
            &submission.price_per_item,
            &submission.date,
        )
    }

    pub fn from_parts(
        item_name: &str,
        quantity: &str,
        price_per_item: &str,
        sale_date: &str,
    ) -> Result<Self, LedgerError> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            return Err(LedgerError::invalid_input("Item name must not be empty."));
        }

        let quantity = parse_quantity(quantity)?;
        let price_per_item = parse_price(price_per_item)?;
        let sale_date = parse_sale_date(sale_date)?;

        Self::new(item_name.to_string(), quantity, price_per_item, sale_date)
    }

    /// Build from already-typed values, enforcing the same invariants as
    /// [`NewSale::from_parts`].
    pub fn new(
        item_name: String,
        quantity: i64,
        price_per_item: Money,
        sale_date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if item_name.trim().is_empty() {
            return Err(LedgerError::invalid_input("Item name must not be empty."));
        }
        if quantity <= 0 {
            return Err(LedgerError::invalid_input(
                "Quantity must be a positive whole number.",
            ));
        }
        if !price_per_item.is_positive() {
            return Err(LedgerError::invalid_input("Price per item must be positive."));
        }
        check_date_range(sale_date)?;

        let revenue = price_per_item
            .checked_mul(quantity)
            .ok_or_else(|| LedgerError::invalid_input("Revenue is too large to record."))?;

        Ok(Self {
            item_name,
            quantity,
            price_per_item,
            sale_date,
            revenue,
        })
    }
}

fn parse_quantity(raw: &str) -> Result<i64, LedgerError> {
    let quantity: i64 = raw
        .trim()
        .parse()
        .map_err(|_| LedgerError::invalid_input("Quantity must be a positive whole number."))?;
    if quantity <= 0 {
        return Err(LedgerError::invalid_input(
            "Quantity must be a positive whole number.",
        ));
    }
    Ok(quantity)
}

fn parse_price(raw: &str) -> Result<Money, LedgerError> {
    let price = Money::parse(raw).map_err(|e| match e {
        MoneyParseError::TooPrecise => {
            LedgerError::invalid_input("Price per item must have at most two decimal places.")
        }
        MoneyParseError::OutOfRange => LedgerError::invalid_input("Price per item is too large."),
        MoneyParseError::NotANumber => {
            LedgerError::invalid_input("Price per item must be a positive number.")
        }
    })?;
    if !price.is_positive() {
        return Err(LedgerError::invalid_input("Price per item must be positive."));
    }
    Ok(price)
}

fn parse_sale_date(raw: &str) -> Result<NaiveDate, LedgerError> {
    let date = NaiveDate::parse_from_str(raw.trim(), SALE_DATE_FORMAT)
        .map_err(|_| LedgerError::invalid_input("Date must be a valid date in YYYY-MM-DD format."))?;
    check_date_range(date)?;
    Ok(date)
}

// Dates are stored as text; four-digit years keep text order equal to date order.
fn check_date_range(date: NaiveDate) -> Result<(), LedgerError> {
    if !(1..=9999).contains(&date.year()) {
        return Err(LedgerError::invalid_input(
            "Date year must be between 0001 and 9999.",
        ));
    }
    Ok(())
}

/// One row of the `sales` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Sale {
    pub id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub price_per_item: Money,
    pub sale_date: NaiveDate,
    pub revenue: Money,
}

/// Aggregate sums across the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SalesTotals {
    pub total_revenue: Money,
    pub total_quantity: i64,
}
