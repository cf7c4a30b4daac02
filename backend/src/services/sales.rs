//! Sales ledger: append-only sales history with explicit deletion

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{NewSale, Sale, SalePeriod, SalesSummary};
use uuid::Uuid;

use super::{analytics, InventoryLedger};
use crate::storage::{Collection, Persistence};

/// One page of the sales history view
#[derive(Debug, Clone, PartialEq)]
pub struct SalesHistory<'a> {
    /// Newest `created_at` first
    pub sales: Vec<&'a Sale>,
    pub summary: SalesSummary,
}

/// Owns the in-memory sales collection in creation order
#[derive(Clone)]
pub struct SalesLedger {
    store: Persistence,
    sales: Vec<Sale>,
}

impl SalesLedger {
    /// Load the sales collection; unreadable data starts an empty ledger
    pub fn load(store: Persistence) -> Self {
        let sales = store.load(Collection::Sales);
        Self { store, sales }
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn find(&self, id: Uuid) -> Option<&Sale> {
        self.sales.iter().find(|sale| sale.id == id)
    }

    /// Record a sale stamped with the current time
    pub fn record_sale(&mut self, input: NewSale, inventory: &mut InventoryLedger) -> Sale {
        self.record_sale_at(input, Utc::now(), inventory)
    }

    /// Record a sale and, when it names a stock item, draw its quantity down.
    ///
    /// The sale and the stock change are written in one batch. That batch
    /// is atomic only on a transactional store; elsewhere a failure between
    /// the two writes leaves sales and stock out of step, and nothing is
    /// rolled back.
    pub fn record_sale_at(
        &mut self,
        input: NewSale,
        created_at: DateTime<Utc>,
        inventory: &mut InventoryLedger,
    ) -> Sale {
        let sale = Sale::record(input, created_at);
        self.sales.push(sale.clone());

        tracing::info!(
            sale_id = %sale.id,
            product = %sale.fertilizer_name,
            quantity = %sale.quantity,
            total = %sale.total_price,
            "sale recorded"
        );

        let decremented = sale
            .fertilizer_id
            .map(|item_id| inventory.apply_decrement(item_id, sale.quantity))
            .unwrap_or(false);

        if decremented {
            self.store.save_pair(
                Collection::Sales,
                &self.sales,
                Collection::Stock,
                inventory.items(),
            );
        } else {
            self.persist();
        }

        sale
    }

    /// Remove a sale record. Stock drawn by the sale is not given back.
    pub fn delete_sale(&mut self, sale_id: Uuid) -> bool {
        let before = self.sales.len();
        self.sales.retain(|sale| sale.id != sale_id);
        if self.sales.len() == before {
            tracing::debug!(%sale_id, "delete for unknown sale ignored");
            return false;
        }

        tracing::info!(%sale_id, "sale deleted");
        self.persist();
        true
    }

    /// The `n` newest sales by creation time; equal times keep insertion order
    pub fn recent_sales(&self, n: usize) -> Vec<&Sale> {
        let mut sales: Vec<&Sale> = self.sales.iter().collect();
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sales.truncate(n);
        sales
    }

    pub fn total_revenue(&self) -> Decimal {
        self.sales
            .iter()
            .map(|sale| sale.total_price)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sales whose sale date falls inside `period`, measured back from `reference`
    pub fn filter_by_period(&self, period: SalePeriod, reference: NaiveDate) -> Vec<&Sale> {
        self.sales
            .iter()
            .filter(|sale| in_period(sale.sale_date, period, reference))
            .collect()
    }

    /// Case-insensitive substring search over product and customer names
    pub fn search(&self, text: &str) -> Vec<&Sale> {
        self.sales.iter().filter(|sale| sale.matches_text(text)).collect()
    }

    /// History view: period filter, then text search, newest first, with totals
    pub fn history(&self, period: SalePeriod, text: &str, reference: NaiveDate) -> SalesHistory<'_> {
        let mut sales: Vec<&Sale> = self
            .sales
            .iter()
            .filter(|sale| in_period(sale.sale_date, period, reference))
            .filter(|sale| sale.matches_text(text))
            .collect();
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let summary = analytics::summarize(sales.iter().copied());
        SalesHistory { sales, summary }
    }

    /// Write the whole collection back. `false` means it stayed in memory only.
    pub fn persist(&self) -> bool {
        self.store.save(Collection::Sales, &self.sales)
    }
}

/// Period membership by calendar date.
///
/// `Week` starts seven days before `reference`; `Month` starts on the same
/// day of the previous month, clamped to that month's last day.
pub fn in_period(sale_date: NaiveDate, period: SalePeriod, reference: NaiveDate) -> bool {
    match period {
        SalePeriod::All => true,
        SalePeriod::Today => sale_date == reference,
        SalePeriod::Week => reference
            .checked_sub_days(Days::new(7))
            .is_none_or(|start| sale_date >= start),
        SalePeriod::Month => reference
            .checked_sub_months(Months::new(1))
            .is_none_or(|start| sale_date >= start),
    }
}
