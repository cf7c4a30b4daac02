//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Payment channels accepted at the counter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    /// Sold on account, settled later
    Credit,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::BankTransfer,
        PaymentMethod::Credit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Credit => "Credit",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(wanted))
            .ok_or("Unknown payment method")
    }
}

/// History filter window, measured against the sale date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SalePeriod {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl SalePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalePeriod::All => "all",
            SalePeriod::Today => "today",
            SalePeriod::Week => "week",
            SalePeriod::Month => "month",
        }
    }
}

impl std::str::FromStr for SalePeriod {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(SalePeriod::All),
            "today" => Ok(SalePeriod::Today),
            "week" => Ok(SalePeriod::Week),
            "month" => Ok(SalePeriod::Month),
            _ => Err("Unknown sale period"),
        }
    }
}
