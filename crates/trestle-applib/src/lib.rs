//! Trestle Application Library
//!
//! The declaration surface of the framework: domain classes are described
//! to the metamodel through explicit descriptors ([`ObjectDef`] and its
//! member definitions) built with consuming builders, instead of being
//! discovered by runtime scanning. This crate also carries the dynamic
//! [`Value`] model self-describing domain objects are exchanged through,
//! and the SPI traits late-bound services plug into
//! ([`TranslationService`], [`TableColumnOrderService`]).
//!
//! Nothing in here depends on the facet machinery; the metamodel crate
//! consumes these declarations and turns them into specifications.

#![warn(missing_docs)]

pub mod bookmark;
pub mod callback;
pub mod column_order;
pub mod descriptor;
pub mod registry;
pub mod semantics;
pub mod translate;
pub mod value;

pub use bookmark::{Bookmark, BookmarkError};
pub use callback::{
    CallbackError, CallbackResult, ChoicesFn, DefaultFn, DisableFn, GetterFn, HideFn, InvokeFn,
    TitleFn, ValidateArgsFn, ValidateFn, ValueSetFn,
};
pub use column_order::{ColumnOrderDefault, TableColumnOrderService};
pub use descriptor::{ActionDef, CollectionDef, MemberOrder, ObjectDef, ParamDef, PropertyDef};
pub use registry::{DomainRegistry, RegistryError};
pub use semantics::{BeanSort, BookmarkPolicy, Editing, Optionality, SemanticsOf, Where};
pub use translate::{IdentityTranslation, TranslationContext, TranslationError, TranslationService};
pub use value::{DomainObject, Value};
