use sqlx::FromRow;

/// Database model for category
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub long_name: String,
    /// Id of the parent category, `0` for a root. Not enforced by the schema.
    pub parent: i64,
    pub ctime: i64,
    pub mtime: i64,
}

/// Mutable fields of a category, replaced wholesale on update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
    pub long_name: String,
    pub parent: i64,
}

#[cfg(test)]
impl Category {
    pub fn fields(&self) -> CategoryFields {
        CategoryFields {
            name: self.name.clone(),
            long_name: self.long_name.clone(),
            parent: self.parent,
        }
    }
}
