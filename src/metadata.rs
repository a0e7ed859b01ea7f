//! The Kotlin metadata node model.
//!
//! This is the deserialized form of the metadata blob a Kotlin compiler
//! attaches to every class file. Only the name-bearing structure is modeled
//! here; flags, versions and other payload that a rename can never touch are
//! carried by the reader/writer and are out of scope for this crate.
//!
//! Names are dot-separated (`kotlin.collections.List`). A leading `.` marks a
//! locally-scoped declaration (a class or function nested inside a function
//! body), which the metadata format renders with that distinguishing marker.

use serde::{Deserialize, Serialize};

/// A fully-qualified, dot-separated class or type-alias name.
///
/// A leading `.` marks a locally-scoped declaration.
pub type ClassName = String;

/// The root of a metadata tree: the annotated declaration's kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Metadata {
    /// Metadata of a class, interface, object or enum.
    Class(Class),
    /// Metadata of a package facade (top-level functions and properties).
    Package(Package),
    /// Metadata of a synthetic class generated for a lambda.
    Lambda(Lambda),
}

/// Metadata of a class-like declaration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Fully-qualified name of the class.
    pub name: ClassName,
    /// Generic type parameters declared on the class.
    pub type_parameters: Vec<TypeParameter>,
    /// Declared supertypes, in declaration order.
    pub supertypes: Vec<Type>,
    /// Context receiver types of the class, if any.
    pub context_receiver_types: Vec<Type>,
    /// The underlying type, if this is an inline (value) class.
    pub inline_class_underlying_type: Option<Type>,
    /// Constructors of the class.
    pub constructors: Vec<Constructor>,
    /// Member and extension functions.
    pub functions: Vec<Function>,
    /// Member and extension properties.
    pub properties: Vec<Property>,
    /// Type aliases declared inside the class.
    pub type_aliases: Vec<TypeAlias>,
    /// Simple (unqualified) names of nested classes.
    pub nested_classes: Vec<String>,
    /// Fully-qualified names of the direct subclasses, if this class is sealed.
    pub sealed_subclasses: Vec<ClassName>,
    /// Platform-specific attachment, if present.
    pub extension: Option<ClassExtension>,
}

/// Metadata of a package facade.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Top-level functions.
    pub functions: Vec<Function>,
    /// Top-level properties.
    pub properties: Vec<Property>,
    /// Top-level type aliases.
    pub type_aliases: Vec<TypeAlias>,
    /// Platform-specific attachment, if present.
    pub extension: Option<PackageExtension>,
}

/// Metadata of a synthetic lambda class.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    /// The function the lambda implements.
    pub function: Function,
}

/// Metadata of a function.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Name of the function. Not a class name and never remapped.
    pub name: String,
    /// Generic type parameters of the function.
    pub type_parameters: Vec<TypeParameter>,
    /// Receiver type, if this is an extension function.
    pub receiver_parameter_type: Option<Type>,
    /// Context receiver types, if any.
    pub context_receiver_types: Vec<Type>,
    /// Declared value parameters, in order.
    pub value_parameters: Vec<ValueParameter>,
    /// Declared return type.
    pub return_type: Type,
    /// Platform-specific attachment, if present.
    pub extension: Option<FunctionExtension>,
}

/// Metadata of a property.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Name of the property.
    pub name: String,
    /// Generic type parameters of the property.
    pub type_parameters: Vec<TypeParameter>,
    /// Receiver type, if this is an extension property.
    pub receiver_parameter_type: Option<Type>,
    /// Context receiver types, if any.
    pub context_receiver_types: Vec<Type>,
    /// The setter's value parameter, if the setter is non-default.
    pub setter_parameter: Option<ValueParameter>,
    /// Declared type of the property.
    pub return_type: Type,
    /// Platform-specific attachment, if present.
    pub extension: Option<PropertyExtension>,
}

/// Metadata of a constructor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    /// Declared value parameters, in order.
    pub value_parameters: Vec<ValueParameter>,
    /// Platform-specific attachment, if present.
    pub extension: Option<ConstructorExtension>,
}

/// Metadata of a type alias.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    /// Name of the type alias.
    pub name: String,
    /// Generic type parameters of the alias.
    pub type_parameters: Vec<TypeParameter>,
    /// The right-hand side of the alias as written.
    pub underlying_type: Type,
    /// The fully expanded right-hand side.
    pub expanded_type: Type,
    /// Annotations on the alias.
    pub annotations: Vec<Annotation>,
}

/// A generic type parameter declaration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeParameter {
    /// Name of the type parameter.
    pub name: String,
    /// Numeric id referenced by [`Classifier::TypeParameter`].
    pub id: u32,
    /// Declared variance.
    pub variance: Variance,
    /// Upper bounds of the parameter.
    pub upper_bounds: Vec<Type>,
    /// Platform-specific attachment, if present.
    pub extension: Option<TypeParameterExtension>,
}

/// A value parameter of a function, constructor or property setter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueParameter {
    /// Name of the parameter.
    pub name: String,
    /// Declared type of the parameter.
    pub parameter_type: Type,
    /// Element type, if the parameter is a `vararg`.
    pub vararg_element_type: Option<Type>,
}

/// A type usage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Type {
    /// What the type refers to.
    pub classifier: Classifier,
    /// Generic arguments, in order.
    pub arguments: Vec<TypeProjection>,
    /// The un-expanded form, if this type came from a type-alias expansion.
    pub abbreviated_type: Option<Box<Type>>,
    /// The enclosing type, if this is an inner class type with outer generics.
    pub outer_type: Option<Box<Type>>,
    /// The upper bound, if this is a flexible (platform) type.
    pub flexible_upper_bound: Option<FlexibleTypeUpperBound>,
    /// Platform-specific attachment, if present.
    pub extension: Option<TypeExtension>,
}

/// The classifier a [`Type`] refers to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Classifier {
    /// A class, by fully-qualified name.
    Class(ClassName),
    /// A type parameter, by the id of its [`TypeParameter`] declaration.
    TypeParameter(u32),
    /// A type alias, by fully-qualified name.
    TypeAlias(ClassName),
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::Class(ClassName::new())
    }
}

/// A generic argument position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TypeProjection {
    /// A star projection (`*`), carrying no type.
    Star,
    /// A concrete argument with its use-site variance.
    Argument {
        /// Use-site variance of the argument.
        variance: Variance,
        /// The projected type.
        projected_type: Type,
    },
}

/// The upper bound of a flexible (platform) type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlexibleTypeUpperBound {
    /// The bound itself.
    pub upper_bound: Box<Type>,
    /// Identifier of the flexibility kind, if the compiler recorded one.
    pub type_flexibility_id: Option<String>,
}

/// Declaration- or use-site variance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variance {
    /// No variance (the default).
    #[default]
    Invariant,
    /// `in` variance (contravariant).
    In,
    /// `out` variance (covariant).
    Out,
}

/// An annotation usage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Fully-qualified name of the annotation class.
    pub class_name: ClassName,
}

/// A JVM method signature: name plus method descriptor, e.g.
/// `("getX", "(La/B;)I")`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodSignature {
    /// Name of the method.
    pub name: String,
    /// JVM method descriptor.
    pub descriptor: String,
}

impl MethodSignature {
    /// Create a new method signature.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// A JVM field signature: name plus type descriptor, e.g. `("x", "La/B;")`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSignature {
    /// Name of the field.
    pub name: String,
    /// JVM type descriptor.
    pub descriptor: String,
}

impl FieldSignature {
    /// Create a new field signature.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// JVM attachment of a [`Class`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassExtension {
    /// Origin name, if this class was produced from an anonymous object.
    /// Usually locally-scoped.
    pub anonymous_object_origin_name: Option<ClassName>,
    /// Metadata of local delegated properties defined inside this class.
    pub local_delegated_properties: Vec<Property>,
    /// Name of the module the class belongs to.
    pub module_name: Option<String>,
}

/// JVM attachment of a [`Package`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageExtension {
    /// Metadata of local delegated properties defined in this facade.
    pub local_delegated_properties: Vec<Property>,
    /// Name of the module the facade belongs to.
    pub module_name: Option<String>,
}

/// JVM attachment of a [`Function`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionExtension {
    /// Signature of the compiled method.
    pub signature: Option<MethodSignature>,
    /// Origin class, if this function was produced from a lambda.
    /// Usually locally-scoped.
    pub lambda_class_origin_name: Option<ClassName>,
}

/// JVM attachment of a [`Property`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyExtension {
    /// Signature of the backing field, if one exists.
    pub field_signature: Option<FieldSignature>,
    /// Signature of the compiled getter, if one exists.
    pub getter_signature: Option<MethodSignature>,
    /// Signature of the compiled setter, if one exists.
    pub setter_signature: Option<MethodSignature>,
    /// Signature of the synthetic method holding the property's annotations.
    pub synthetic_method_for_annotations: Option<MethodSignature>,
    /// Signature of the synthetic method exposing the property's delegate.
    pub synthetic_method_for_delegate: Option<MethodSignature>,
}

/// JVM attachment of a [`Constructor`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorExtension {
    /// Signature of the compiled constructor.
    pub signature: Option<MethodSignature>,
}

/// JVM attachment of a [`Type`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeExtension {
    /// Whether the type is a raw type.
    pub is_raw: bool,
    /// Annotations on the type usage.
    pub annotations: Vec<Annotation>,
}

/// JVM attachment of a [`TypeParameter`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeParameterExtension {
    /// Annotations on the type parameter.
    pub annotations: Vec<Annotation>,
}

impl Type {
    /// A plain, non-generic class type with no optional structure.
    pub fn named(name: impl Into<ClassName>) -> Self {
        Type {
            classifier: Classifier::Class(name.into()),
            ..Type::default()
        }
    }
}
