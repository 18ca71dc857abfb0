pub const ORDER_ID: &str = "OrderId";
pub const QUANTITY_ORDERED: &str = "QuantityOrdered";
pub const ITEM_PRICE: &str = "ItemPrice";
pub const PROMOTION_DISCOUNT: &str = "PromotionDiscount";

pub const REGION: &str = "region";
pub const PROMOTION_DISCOUNT_AMOUNT: &str = "PromotionDiscountAmount";
pub const TOTAL_SALES: &str = "total_sales";
pub const NET_SALE: &str = "net_sale";

/// Columns every regional source must carry. Anything else rides along untouched.
pub const REQUIRED_COLUMNS: [&str; 4] = [ORDER_ID, QUANTITY_ORDERED, ITEM_PRICE, PROMOTION_DISCOUNT];

pub const DERIVED_COLUMNS: [&str; 3] = [PROMOTION_DISCOUNT_AMOUNT, TOTAL_SALES, NET_SALE];
