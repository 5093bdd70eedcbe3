use crate::db::sales::SalesStorage;
use crate::db::sqlite::SqlitePool;
use crate::error::LedgerError;
use crate::types::{NewSale, Sale, SaleSubmission, SalesTotals};
use tracing::{debug, info};

/// Append-only record of sales plus the two read views over it.
#[derive(Clone)]
pub struct SalesLedger {
    storage: SalesStorage,
}

impl SalesLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            storage: SalesStorage::new(pool),
        }
    }

    /// Validate the raw fields and append the sale. Nothing is written when
    /// validation fails.
    pub async fn record_sale(
        &self,
        item_name: &str,
        quantity: &str,
        price_per_item: &str,
        sale_date: &str,
    ) -> Result<Sale, LedgerError> {
        let new_sale = NewSale::from_parts(item_name, quantity, price_per_item, sale_date)
            .inspect_err(|e| debug!(error = %e, "sale rejected"))?;
        self.append(&new_sale).await
    }

    pub async fn record_submission(&self, submission: &SaleSubmission) -> Result<Sale, LedgerError> {
        let new_sale =
            NewSale::parse(submission).inspect_err(|e| debug!(error = %e, "sale rejected"))?;
        self.append(&new_sale).await
    }

    pub async fn append(&self, new_sale: &NewSale) -> Result<Sale, LedgerError> {
        let sale = self.storage.insert(new_sale).await?;
        info!(
            sale_id = sale.id,
            item = %sale.item_name,
            quantity = sale.quantity,
            revenue = %sale.revenue,
            "sale recorded"
        );
        Ok(sale)
    }

    /// Sum of revenue and quantity; zero for an empty ledger.
    pub async fn totals(&self) -> Result<SalesTotals, LedgerError> {
        self.storage.totals().await
    }

    pub async fn history(&self) -> Result<Vec<Sale>, LedgerError> {
        self.storage.list_history().await
    }
}
