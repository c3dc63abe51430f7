use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::deserializers::parse_lenient_i64;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// The `?page=N` query parameter. Missing, unparsable and non-positive pages
/// all mean page 1; when `page` repeats the first occurrence wins.
#[derive(Debug, Default)]
pub struct Pagination {
    page: Option<i64>,
}

impl Pagination {
    pub fn page(&self) -> usize {
        match self.page {
            Some(page) if page >= 1 => usize::try_from(page).unwrap_or(usize::MAX),
            _ => 1,
        }
    }

    /// Pages past the end are empty.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let start = (self.page() - 1).saturating_mul(QUESTIONS_PER_PAGE);
        items
            .into_iter()
            .skip(start)
            .take(QUESTIONS_PER_PAGE)
            .collect()
    }
}

struct PaginationVisitor;

impl<'de> Visitor<'de> for PaginationVisitor {
    type Value = Pagination;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("query parameters")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut page = None;
        let mut seen = false;
        while let Some(key) = map.next_key::<String>()? {
            if key == "page" && !seen {
                seen = true;
                page = parse_lenient_i64(&map.next_value::<String>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(Pagination { page })
    }
}

impl<'de> Deserialize<'de> for Pagination {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PaginationVisitor)
    }
}
