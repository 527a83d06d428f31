//! Table names and column value enums shared by the generators and the stores.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tables written by the seeder, in seeding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    Users,
    Products,
    Orders,
    OrderDetails,
    ProductCategories,
}

impl Table {
    pub const SEED_ORDER: [Table; 5] = [
        Self::Users,
        Self::Products,
        Self::Orders,
        Self::OrderDetails,
        Self::ProductCategories,
    ];

    /// Returns the table name as written in SQL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Users => "Users",
            Table::Products => "Products",
            Table::Orders => "Orders",
            Table::OrderDetails => "OrderDetails",
            Table::ProductCategories => "ProductCategories",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer loyalty tier stored in `Users.loyalty_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoyaltyStatus {
    Gold,
    Silver,
    Bronze,
}

impl LoyaltyStatus {
    pub const ALL: [LoyaltyStatus; 3] = [Self::Gold, Self::Silver, Self::Bronze];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyStatus::Gold => "Gold",
            LoyaltyStatus::Silver => "Silver",
            LoyaltyStatus::Bronze => "Bronze",
        }
    }
}

/// Order lifecycle state stored in `Orders.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 2] = [Self::Pending, Self::Completed];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_strings_match_schema_values() {
        let loyalty: Vec<_> = LoyaltyStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(loyalty, ["Gold", "Silver", "Bronze"]);

        let status: Vec<_> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(status, ["Pending", "Completed"]);
    }
}
