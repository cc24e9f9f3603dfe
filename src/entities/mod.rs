pub mod beverage;
pub mod order;
