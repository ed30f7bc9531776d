/// Data layer: typed records, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  resolve columns once, parse rows → FvDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ FvDataset  │  Vec<TestRecord>, distinct values per column
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  team → position → sprint → date → row indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
