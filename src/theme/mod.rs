//! Theme model, defaults, encoding and package discovery
//!
//! - **schema**: the typed `Configuration` and its enumerations
//! - **defaults**: platform baseline every load starts from
//! - **codec**: tolerant JSON reader and nested/flat writer
//! - **discovery**: cheap scan of theme packages for a picker

pub mod codec;
pub mod defaults;
pub mod discovery;
pub mod schema;

// Re-export commonly used types
pub use codec::{
    deserialize, serialize, DocumentShape, FieldProblem, FieldWarning, ParseError, ParseReport,
    Parsed,
};
pub use defaults::{resolve_defaults, Platform};
pub use discovery::{check_candidate, list_available, CandidateOrder};
pub use schema::{ComponentTheme, Configuration, LayoutMode, Palette, RendererKind, ThemeMeta};
