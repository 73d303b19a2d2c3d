/// `parent`/`category` value meaning "no parent" / "uncategorized"
pub const ROOT_CATEGORY_ID: i64 = 0;
