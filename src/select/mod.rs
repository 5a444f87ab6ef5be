/// Selection layer: predicates, selectors, and the collection pass.
///
/// ```text
///   &[J] / Vec<J>
///        │
///        ▼
///   ┌──────────┐
///   │ Selector  │  name, limit, one Predicate
///   └──────────┘
///        │  evaluate(jet)
///        ▼
///   ┌──────────────────────────┐
///   │ Cut  |  MomentWindow<T>   │──► AttributeStore (moments only)
///   └──────────────────────────┘
///        │
///        ▼
///   survivors, input order, ≤ limit ──► DiagnosticSink
/// ```

pub mod cut;
pub mod diagnostics;
pub mod moment;
pub mod predicate;
pub mod selector;
