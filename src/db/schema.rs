//! SQL DDL for initializing the ledger storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `users.username` UNIQUE; `password` holds an Argon2 PHC string
/// - `sales.price_per_item` / `sales.revenue` as INTEGER cents
/// - `sales.sale_date` as `YYYY-MM-DD` text, indexed for history ordering
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sales (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    item_name TEXT NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    price_per_item INTEGER NOT NULL CHECK (price_per_item > 0),
    sale_date TEXT NOT NULL,
    revenue INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sales_date_id ON sales(sale_date DESC, id DESC);
"#;
