//! This crate rewrites Kotlin compiler-emitted class metadata so that it
//! follows package/class renames performed by a JAR relocation ("shading")
//! tool.
//!
//! A relocator rewrites bytecode-level names, but the Kotlin metadata blob
//! stored in the `kotlin.Metadata` class-file attribute carries its own copy
//! of every class name, generic type and JVM signature. [`MetadataRemapper`]
//! walks a deserialized metadata tree and rewrites all of them through the
//! same renaming function, leaving the tree's shape untouched. Reading and
//! writing the serialized blob itself is the job of a metadata library, not
//! of this crate.
//!
//! The [`revisions`] module is a separate small collaborator: the version
//! tables the surrounding build tooling uses to pick mapping/loader/forge
//! version combinations.
//!
//! # Examples
//!
//! ```
//! use kotlin_metadata_remap::{Class, Metadata, MetadataRemapper, Remapper, Type};
//!
//! /// Relocates `a.*` into `shaded.a.*`, like a shading tool would.
//! struct Shade;
//!
//! impl Remapper for Shade {
//!     fn map_internal_name(&self, name: &str) -> String {
//!         match name.strip_prefix("a/") {
//!             Some(rest) => format!("shaded/a/{rest}"),
//!             None => name.into(),
//!         }
//!     }
//! }
//!
//! let mut metadata = Metadata::Class(Class {
//!     name: "a.Widget".into(),
//!     supertypes: vec![Type::named("kotlin.Any")],
//!     ..Class::default()
//! });
//!
//! MetadataRemapper::new(&Shade).remap(&mut metadata);
//!
//! let Metadata::Class(class) = &metadata else { unreachable!() };
//! assert_eq!(class.name, "shaded.a.Widget");
//! // names outside the relocation are untouched
//! assert_eq!(class.supertypes[0], Type::named("kotlin.Any"));
//! ```

#![warn(missing_docs)]

mod descriptor;
mod metadata;
mod remapper;
pub mod revisions;

pub use descriptor::remap_descriptor;
pub use metadata::{
    Annotation, Class, ClassExtension, ClassName, Classifier, Constructor, ConstructorExtension,
    FieldSignature, FlexibleTypeUpperBound, Function, FunctionExtension, Lambda, Metadata,
    MethodSignature, Package, PackageExtension, Property, PropertyExtension, Type, TypeAlias,
    TypeExtension, TypeParameter, TypeParameterExtension, TypeProjection, ValueParameter, Variance,
};
pub use remapper::{MetadataRemapper, Remapper};
