/// Data layer: core types, encoding-resilient loading, and filtering.
///
/// Architecture:
/// ```text
///  budget.csv / housing.csv / investments.csv
///        │
///        ▼
///   ┌──────────┐
///   │ encoding  │  sniff prefix → fallback chain → decoded text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse ';' CSV → schema checks → Dataset (memoized)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply (year range, entity set) → TableView
///   └──────────┘
/// ```
pub mod encoding;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
