use crate::db::sqlite::SqlitePool;
use crate::error::LedgerError;
use crate::types::{Money, NewSale, Sale, SalesTotals};

#[derive(Clone)]
pub struct SalesStorage {
    pool: SqlitePool,
}

impl SalesStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one sale. Single-row insert, so it either lands whole or not at all.
    ///
    /// The row is only written when both ledger sums stay within `i64`;
    /// otherwise SQLite's `SUM` would fail on every later read.
    pub async fn insert(&self, sale: &NewSale) -> Result<Sale, LedgerError> {
        let done = sqlx::query(
            r#"
            INSERT INTO sales (item_name, quantity, price_per_item, sale_date, revenue)
            SELECT ?, ?, ?, ?, ?
            WHERE (SELECT COALESCE(SUM(revenue), 0) FROM sales) <= ?
              AND (SELECT COALESCE(SUM(quantity), 0) FROM sales) <= ?
            "#,
        )
        .bind(&sale.item_name)
        .bind(sale.quantity)
        .bind(sale.price_per_item)
        .bind(sale.sale_date)
        .bind(sale.revenue)
        .bind(i64::MAX - sale.revenue.cents())
        .bind(i64::MAX - sale.quantity)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            return Err(LedgerError::invalid_input(
                "Recording this sale would overflow the ledger totals.",
            ));
        }

        Ok(Sale {
            id: done.last_insert_rowid(),
            item_name: sale.item_name.clone(),
            quantity: sale.quantity,
            price_per_item: sale.price_per_item,
            sale_date: sale.sale_date,
            revenue: sale.revenue,
        })
    }

    pub async fn totals(&self) -> Result<SalesTotals, LedgerError> {
        let (revenue, quantity): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(revenue), 0), COALESCE(SUM(quantity), 0) FROM sales",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(SalesTotals {
            total_revenue: Money::from_cents(revenue),
            total_quantity: quantity,
        })
    }

    /// Newest sale date first; same-day sales newest insertion first.
    pub async fn list_history(&self) -> Result<Vec<Sale>, LedgerError> {
        let rows = sqlx::query_as::<_, Sale>(
            r#"SELECT id, item_name, quantity, price_per_item, sale_date, revenue
               FROM sales ORDER BY sale_date DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
