//! Customer roster derived from sales history
//!
//! Customers are never stored. Each call folds the sales it is given into
//! a fresh roster; callers showing one view should compute it once and
//! reuse it for that view.
//!
//! Sales are grouped by phone number, or by name when the phone is blank.
//! Two people sharing a phone (or sharing a name with no phone) collapse
//! into one customer.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::{Customer, Sale};

/// Grouping key: phone if present, else name
pub fn customer_key(sale: &Sale) -> &str {
    if sale.customer_phone.is_empty() {
        &sale.customer_name
    } else {
        &sale.customer_phone
    }
}

/// Fold sales into customers, highest lifetime spend first.
///
/// Name, phone and address come from the first sale seen for each key.
/// Equal spends keep first-seen order.
pub fn derive_customers<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Vec<Customer> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut customers: Vec<Customer> = Vec::new();

    for sale in sales {
        match index.get(customer_key(sale)) {
            Some(&at) => {
                let customer = &mut customers[at];
                customer.total_purchases += 1;
                customer.total_amount = customer.total_amount.saturating_add(sale.total_price);
                if sale.sale_date > customer.last_purchase {
                    customer.last_purchase = sale.sale_date;
                }
            }
            None => {
                index.insert(customer_key(sale), customers.len());
                customers.push(Customer {
                    name: sale.customer_name.clone(),
                    phone: sale.customer_phone.clone(),
                    address: sale.customer_address.clone(),
                    total_purchases: 1,
                    total_amount: sale.total_price,
                    last_purchase: sale.sale_date,
                });
            }
        }
    }

    customers.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    customers
}

/// Case-insensitive name match or raw phone substring
pub fn search_customers<'a>(customers: &'a [Customer], text: &str) -> Vec<&'a Customer> {
    customers.iter().filter(|c| c.matches_text(text)).collect()
}

/// Customers with more than one purchase
pub fn repeat_customer_count(customers: &[Customer]) -> usize {
    customers.iter().filter(|c| c.is_repeat()).count()
}

/// Average revenue per customer; zero when there are none
pub fn customer_lifetime_value<'a>(
    sales: impl IntoIterator<Item = &'a Sale>,
    customers: &[Customer],
) -> Decimal {
    if customers.is_empty() {
        return Decimal::ZERO;
    }
    let revenue = sales
        .into_iter()
        .map(|sale| sale.total_price)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    revenue / Decimal::from(customers.len())
}
