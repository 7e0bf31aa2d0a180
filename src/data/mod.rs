/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  final_catalogue.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Catalogue
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ Catalogue │  Vec<BookRecord>, facet options, year span
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView (catalogue indices)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ summary  │   │   sort   │  KPIs + chart series / table row order
///   └──────────┘   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod summary;
