use serde::Serialize;

/// One slice of an ordered result set.
///
/// `total` counts every row matching the filter, not just this page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub skip: i64,
    pub limit: i64,
    pub total: i64,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, skip: i64, limit: i64, total: i64) -> Self {
        Self {
            data,
            skip,
            limit,
            total,
        }
    }
}
