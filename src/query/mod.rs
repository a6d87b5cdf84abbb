//! Composable query engine
//!
//! Pages describe their data needs as a [`Query`] tree. [`evaluate`] checks
//! the tree against the session [`Cache`](crate::cache::Cache), marks missing
//! resources pending, and reports a [`Status`]:
//!
//! | Combinator | Ready when | Failure |
//! |------------|------------|---------|
//! | Leaf | entry is ready | entry failed |
//! | Map | inner ready | passes through |
//! | Combine2/3 | all branches ready | left-most failing branch |
//! | Optional | inner settled | becomes `Ready(None)` |
//! | Constant | always | never |
//!
//! Combinators never short-circuit: every branch is evaluated so all missing
//! leaves are dispatched in a single pass.

pub mod dispatch;
pub mod eval;
pub mod status;
pub mod tree;

pub use dispatch::{dispatch, FetchInstruction};
pub use eval::{evaluate, Evaluation};
pub use status::Status;
pub use tree::{catalog, docs, latest, module, readme, releases, resource, Query, QueryKind};
