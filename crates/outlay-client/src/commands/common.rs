pub const CREATED_AT_FIELD: &str = "createdAt";
pub const AMOUNT_FIELD: &str = "amount";
pub const CATEGORY_FIELD: &str = "categoryId";

/// The trend path drops `categoryId` but still expects it to be present.
pub const TREND_INPUT_FIELDS: [&str; 3] = [CREATED_AT_FIELD, AMOUNT_FIELD, CATEGORY_FIELD];

pub const AGGREGATE_INPUT_FIELDS: [&str; 2] = [CREATED_AT_FIELD, AMOUNT_FIELD];
