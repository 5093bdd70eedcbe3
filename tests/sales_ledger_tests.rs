use chrono::NaiveDate;
use clothing_ledger::types::{Money, SalesTotals};
use clothing_ledger::{LedgerError, SalesLedger};
use tempfile::TempDir;

async fn open_ledger() -> (TempDir, SalesLedger) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite:{}", dir.path().join("sales.sqlite").display());
    let pool = clothing_ledger::db::connect(&database_url)
        .await
        .expect("failed to open database");
    (dir, SalesLedger::new(pool))
}

#[tokio::test]
async fn empty_ledger_totals_are_zero() {
    let (_dir, ledger) = open_ledger().await;
    let totals = ledger.totals().await.unwrap();
    assert_eq!(totals, SalesTotals::default());
    assert_eq!(totals.total_revenue, Money::ZERO);
    assert_eq!(totals.total_quantity, 0);
    assert!(ledger.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn totals_sum_revenue_and_quantity() {
    let (_dir, ledger) = open_ledger().await;
    ledger
        .record_sale("T-Shirt", "5", "10.00", "2024-01-01")
        .await
        .unwrap();
    ledger
        .record_sale("Hoodie", "3", "20.00", "2024-01-02")
        .await
        .unwrap();

    let totals = ledger.totals().await.unwrap();
    assert_eq!(totals.total_revenue, Money::from_cents(11000));
    assert_eq!(totals.total_quantity, 8);
}

#[tokio::test]
async fn totals_stay_readable_near_the_integer_limit() {
    let (_dir, ledger) = open_ledger().await;
    // 4e18 cents each; two fit in an i64 sum, three do not
    let big_price = "40000000000000000";
    ledger
        .record_sale("Coat", "1", big_price, "2024-01-01")
        .await
        .unwrap();
    ledger
        .record_sale("Coat", "1", big_price, "2024-01-02")
        .await
        .unwrap();

    let err = ledger
        .record_sale("Coat", "1", big_price, "2024-01-03")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));

    let totals = ledger.totals().await.expect("totals must stay readable");
    assert_eq!(totals.total_revenue, Money::from_cents(8_000_000_000_000_000_000));
    assert_eq!(totals.total_quantity, 2);
    assert_eq!(ledger.history().await.unwrap().len(), 2);
}

#[tokio::test]
async fn quantity_sum_overflow_is_rejected() {
    let (_dir, ledger) = open_ledger().await;
    let max_qty = i64::MAX.to_string();
    ledger
        .record_sale("Buttons", &max_qty, "0.01", "2024-01-01")
        .await
        .unwrap();

    let err = ledger
        .record_sale("Buttons", "1", "0.01", "2024-01-02")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));

    let totals = ledger.totals().await.unwrap();
    assert_eq!(totals.total_quantity, i64::MAX);
    assert_eq!(totals.total_revenue, Money::from_cents(i64::MAX));
}

#[tokio::test]
async fn stored_revenue_is_exact_product() {
    let (_dir, ledger) = open_ledger().await;
    let cases = [("7", "0.10", 70), ("3", "33.33", 9999), ("12", "49.99", 59988)];
    for (qty, price, cents) in cases {
        let sale = ledger
            .record_sale("Socks", qty, price, "2024-03-15")
            .await
            .unwrap();
        assert_eq!(sale.revenue, Money::from_cents(cents));
        assert_eq!(
            sale.revenue,
            sale.price_per_item.checked_mul(sale.quantity).unwrap()
        );
    }

    let history = ledger.history().await.unwrap();
    assert_eq!(history.len(), 3);
    for sale in history {
        assert_eq!(
            sale.revenue,
            sale.price_per_item.checked_mul(sale.quantity).unwrap()
        );
    }
}

#[tokio::test]
async fn invalid_sales_are_not_written() {
    let (_dir, ledger) = open_ledger().await;
    let bad = [
        ("Jeans", "0", "10", "2024-01-01"),
        ("Jeans", "-2", "10", "2024-01-01"),
        ("Jeans", "1.5", "10", "2024-01-01"),
        ("Jeans", "2", "0", "2024-01-01"),
        ("Jeans", "2", "-4.50", "2024-01-01"),
        ("Jeans", "2", "10", "2024-02-31"),
        ("Jeans", "2", "10", "not-a-date"),
        ("", "2", "10", "2024-01-01"),
    ];
    for (item, qty, price, date) in bad {
        let err = ledger.record_sale(item, qty, price, date).await.unwrap_err();
        assert!(
            matches!(err, LedgerError::InvalidInput(_)),
            "({item:?}, {qty:?}, {price:?}, {date:?}) should be invalid"
        );
    }
    assert!(ledger.history().await.unwrap().is_empty());
    assert_eq!(ledger.totals().await.unwrap(), SalesTotals::default());
}

#[tokio::test]
async fn history_is_newest_date_first_then_newest_insert() {
    let (_dir, ledger) = open_ledger().await;
    let jan = ledger
        .record_sale("Scarf", "1", "15", "2024-01-01")
        .await
        .unwrap();
    let feb = ledger
        .record_sale("Coat", "1", "120", "2024-02-01")
        .await
        .unwrap();
    let jan_later = ledger
        .record_sale("Gloves", "2", "8.50", "2024-01-01")
        .await
        .unwrap();

    let history = ledger.history().await.unwrap();
    let ids: Vec<i64> = history.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![feb.id, jan_later.id, jan.id]);
    assert_eq!(
        history[0].sale_date,
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    );
}

#[tokio::test]
async fn item_name_is_trimmed_on_write() {
    let (_dir, ledger) = open_ledger().await;
    ledger
        .record_sale("  Slim Fit Jeans  ", "1", "49.99", "2024-05-05")
        .await
        .unwrap();
    let history = ledger.history().await.unwrap();
    assert_eq!(history[0].item_name, "Slim Fit Jeans");
}
