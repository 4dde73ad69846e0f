pub use super::customers::Entity as Customers;
pub use super::devotional_plans::Entity as DevotionalPlans;
