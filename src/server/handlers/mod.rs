pub mod quotes;
pub mod tariff;
