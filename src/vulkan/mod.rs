pub mod extensions_registry;
mod function_table;
pub mod functions;
pub mod instance;
pub mod layers_registry;
mod loader;

pub use function_table::{FunctionTable, RawFunction, ResolvedTier};
pub use loader::{AshLoader, GraphicsLoader};
