use crate::sql::{ColumnRef, SQL};

/// Trait for types that can be converted to SQL fragments.
pub trait ToSQL {
    fn to_sql(&self) -> SQL;

    /// Consume self and return SQL without cloning.
    /// Default delegates to `to_sql()` (which clones).
    fn into_sql(self) -> SQL
    where
        Self: Sized,
    {
        self.to_sql()
    }
}

impl ToSQL for SQL {
    fn to_sql(&self) -> SQL {
        self.clone()
    }

    fn into_sql(self) -> SQL {
        self
    }
}

impl ToSQL for ColumnRef {
    fn to_sql(&self) -> SQL {
        SQL::column(self.clone())
    }
}

impl<T: ToSQL> ToSQL for &T {
    fn to_sql(&self) -> SQL {
        (**self).to_sql()
    }
}
