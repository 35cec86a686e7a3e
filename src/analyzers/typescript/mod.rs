//! TypeScript type provider
//!
//! Everything the prop extractor needs to know about TypeScript sources:
//!
//! - [`parser`]: tree-sitter parsing of `.ts`/`.tsx` files
//! - [`program`]: the set of loaded files, module and symbol resolution
//! - [`binder`]: conversion of type syntax into the [`TypeTable`]
//! - [`printer`]: canonical display strings of types
//! - [`checker`]: the [`TypeChecker`] capability the extractor is written against
//!
//! # Example
//!
//! ```ignore
//! use propmap::analyzers::typescript::{Program, TypeBinder};
//!
//! let program = Program::load(&files, &compiler_options)?;
//! let mut binder = TypeBinder::new(&program);
//! ```

pub mod binder;
pub mod checker;
pub mod parser;
pub mod printer;
pub mod program;
pub mod types;

pub use binder::TypeBinder;
pub use checker::{LiteralValue, TypeChecker};
pub use printer::type_to_string;
pub use program::{normalize_path, resolve_module_path, Declaration, FileId, Namespace, Program};
pub use types::{
    AliasSymbol, DeclarationSite, Member, ObjectType, Parameter, Primitive, Signature,
    TupleElement, TypeData, TypeId, TypeTable,
};
