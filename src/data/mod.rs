/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///   shipping-data.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Record>, column index
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  value counts, group stats, numeric sample, histogram
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
