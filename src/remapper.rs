//! Structural rewrite of metadata trees through an external renaming
//! capability.

use crate::descriptor::remap_descriptor;
use crate::metadata::{
    Annotation, Class, ClassExtension, ClassName, Classifier, Constructor, ConstructorExtension,
    FieldSignature, Function, FunctionExtension, Lambda, Metadata, MethodSignature, Package,
    PackageExtension, Property, PropertyExtension, Type, TypeAlias, TypeParameter,
    TypeParameterExtension, TypeProjection, ValueParameter,
};

/// The renaming capability supplied by a relocation tool.
///
/// Both methods are total: a name that is not affected by the relocation is
/// returned unchanged. The remapper performs no validation of the output; a
/// mapping that is not deterministic over the names actually present in a
/// tree produces inconsistent output, not an error.
pub trait Remapper {
    /// Maps a slash-separated internal class name, e.g. `a/B` → `x/Y`.
    fn map_internal_name(&self, name: &str) -> String;

    /// Maps a JVM field or method descriptor, rewriting every embedded
    /// class name.
    ///
    /// The default implementation walks the descriptor grammar and feeds
    /// each `L<name>;` through [`map_internal_name`](Self::map_internal_name).
    /// Implementors backed by a full bytecode remapper may override this
    /// with their own descriptor handling.
    fn map_descriptor(&self, descriptor: &str) -> String {
        remap_descriptor(descriptor, |name| self.map_internal_name(name))
    }
}

/// Rewrites every class name and descriptor in a metadata tree.
///
/// The rewrite is a single synchronous pass that mutates the tree in place
/// and preserves its shape exactly: same node kinds, same child counts,
/// same ordering. Only name-bearing leaves change.
///
/// # Examples
///
/// ```
/// use kotlin_metadata_remap::{Class, MetadataRemapper, Remapper, Type};
///
/// struct Relocate;
///
/// impl Remapper for Relocate {
///     fn map_internal_name(&self, name: &str) -> String {
///         match name.strip_prefix("com/example/") {
///             Some(rest) => format!("shaded/com/example/{rest}"),
///             None => name.into(),
///         }
///     }
/// }
///
/// let mut class = Class {
///     name: "com.example.Widget".into(),
///     supertypes: vec![Type::named("com.example.Base")],
///     ..Class::default()
/// };
///
/// MetadataRemapper::new(&Relocate).remap_class(&mut class);
///
/// assert_eq!(class.name, "shaded.com.example.Widget");
/// assert_eq!(class.supertypes[0], Type::named("shaded.com.example.Base"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MetadataRemapper<'r, R: Remapper + ?Sized> {
    remapper: &'r R,
}

impl<'r, R: Remapper + ?Sized> MetadataRemapper<'r, R> {
    /// Create a new metadata remapper on top of a renaming capability.
    pub fn new(remapper: &'r R) -> Self {
        Self { remapper }
    }

    /// Rewrites a whole metadata tree, dispatching on the root kind.
    pub fn remap(&self, metadata: &mut Metadata) {
        match metadata {
            Metadata::Class(class) => self.remap_class(class),
            Metadata::Package(package) => self.remap_package(package),
            Metadata::Lambda(lambda) => self.remap_lambda(lambda),
        }
    }

    /// Rewrites class metadata.
    pub fn remap_class(&self, class: &mut Class) {
        self.map_name(&mut class.name);
        for param in &mut class.type_parameters {
            self.remap_type_parameter(param);
        }
        for supertype in &mut class.supertypes {
            self.remap_type(supertype);
        }
        for receiver in &mut class.context_receiver_types {
            self.remap_type(receiver);
        }
        if let Some(underlying) = &mut class.inline_class_underlying_type {
            self.remap_type(underlying);
        }
        for constructor in &mut class.constructors {
            self.remap_constructor(constructor);
        }
        for function in &mut class.functions {
            self.remap_function(function);
        }
        for property in &mut class.properties {
            self.remap_property(property);
        }
        for alias in &mut class.type_aliases {
            self.remap_type_alias(alias);
        }
        // nested_classes hold simple names, which carry no package to rewrite
        for subclass in &mut class.sealed_subclasses {
            self.map_name(subclass);
        }
        if let Some(ext) = &mut class.extension {
            self.remap_class_extension(ext);
        }
    }

    /// Rewrites package facade metadata.
    pub fn remap_package(&self, package: &mut Package) {
        for function in &mut package.functions {
            self.remap_function(function);
        }
        for property in &mut package.properties {
            self.remap_property(property);
        }
        for alias in &mut package.type_aliases {
            self.remap_type_alias(alias);
        }
        if let Some(ext) = &mut package.extension {
            self.remap_package_extension(ext);
        }
    }

    /// Rewrites lambda metadata.
    pub fn remap_lambda(&self, lambda: &mut Lambda) {
        self.remap_function(&mut lambda.function);
    }

    /// Rewrites function metadata.
    pub fn remap_function(&self, function: &mut Function) {
        for param in &mut function.type_parameters {
            self.remap_type_parameter(param);
        }
        if let Some(receiver) = &mut function.receiver_parameter_type {
            self.remap_type(receiver);
        }
        for receiver in &mut function.context_receiver_types {
            self.remap_type(receiver);
        }
        for param in &mut function.value_parameters {
            self.remap_value_parameter(param);
        }
        self.remap_type(&mut function.return_type);
        if let Some(ext) = &mut function.extension {
            self.remap_function_extension(ext);
        }
    }

    /// Rewrites property metadata.
    pub fn remap_property(&self, property: &mut Property) {
        for param in &mut property.type_parameters {
            self.remap_type_parameter(param);
        }
        if let Some(receiver) = &mut property.receiver_parameter_type {
            self.remap_type(receiver);
        }
        for receiver in &mut property.context_receiver_types {
            self.remap_type(receiver);
        }
        if let Some(setter) = &mut property.setter_parameter {
            self.remap_value_parameter(setter);
        }
        self.remap_type(&mut property.return_type);
        if let Some(ext) = &mut property.extension {
            self.remap_property_extension(ext);
        }
    }

    /// Rewrites constructor metadata.
    pub fn remap_constructor(&self, constructor: &mut Constructor) {
        for param in &mut constructor.value_parameters {
            self.remap_value_parameter(param);
        }
        if let Some(ext) = &mut constructor.extension {
            self.remap_constructor_extension(ext);
        }
    }

    /// Rewrites type-alias metadata.
    pub fn remap_type_alias(&self, alias: &mut TypeAlias) {
        for param in &mut alias.type_parameters {
            self.remap_type_parameter(param);
        }
        self.remap_type(&mut alias.underlying_type);
        self.remap_type(&mut alias.expanded_type);
        for annotation in &mut alias.annotations {
            self.remap_annotation(annotation);
        }
    }

    /// Rewrites a type-parameter declaration.
    pub fn remap_type_parameter(&self, param: &mut TypeParameter) {
        for bound in &mut param.upper_bounds {
            self.remap_type(bound);
        }
        if let Some(ext) = &mut param.extension {
            self.remap_type_parameter_extension(ext);
        }
    }

    /// Rewrites a value parameter.
    pub fn remap_value_parameter(&self, param: &mut ValueParameter) {
        self.remap_type(&mut param.parameter_type);
        if let Some(vararg) = &mut param.vararg_element_type {
            self.remap_type(vararg);
        }
    }

    /// Rewrites a type usage, recursing through arguments, the abbreviated
    /// form, the outer type and the flexible upper bound. Absent optional
    /// parts stay absent.
    pub fn remap_type(&self, ty: &mut Type) {
        match &mut ty.classifier {
            Classifier::Class(name) | Classifier::TypeAlias(name) => self.map_name(name),
            // carries only a numeric id
            Classifier::TypeParameter(_) => {}
        }
        for argument in &mut ty.arguments {
            match argument {
                TypeProjection::Star => {}
                TypeProjection::Argument { projected_type, .. } => {
                    self.remap_type(projected_type);
                }
            }
        }
        if let Some(abbreviated) = &mut ty.abbreviated_type {
            self.remap_type(abbreviated);
        }
        if let Some(outer) = &mut ty.outer_type {
            self.remap_type(outer);
        }
        if let Some(bound) = &mut ty.flexible_upper_bound {
            self.remap_type(&mut bound.upper_bound);
        }
        if let Some(ext) = &mut ty.extension {
            for annotation in &mut ext.annotations {
                self.remap_annotation(annotation);
            }
        }
    }

    /// Rewrites an annotation usage.
    pub fn remap_annotation(&self, annotation: &mut Annotation) {
        self.map_name(&mut annotation.class_name);
    }

    fn remap_class_extension(&self, ext: &mut ClassExtension) {
        if let Some(origin) = &mut ext.anonymous_object_origin_name {
            self.map_name(origin);
        }
        for property in &mut ext.local_delegated_properties {
            self.remap_property(property);
        }
    }

    fn remap_package_extension(&self, ext: &mut PackageExtension) {
        for property in &mut ext.local_delegated_properties {
            self.remap_property(property);
        }
    }

    fn remap_function_extension(&self, ext: &mut FunctionExtension) {
        if let Some(signature) = &mut ext.signature {
            self.remap_method_signature(signature);
        }
        if let Some(origin) = &mut ext.lambda_class_origin_name {
            self.map_name(origin);
        }
    }

    fn remap_property_extension(&self, ext: &mut PropertyExtension) {
        if let Some(field) = &mut ext.field_signature {
            self.remap_field_signature(field);
        }
        if let Some(getter) = &mut ext.getter_signature {
            self.remap_method_signature(getter);
        }
        if let Some(setter) = &mut ext.setter_signature {
            self.remap_method_signature(setter);
        }
        if let Some(method) = &mut ext.synthetic_method_for_annotations {
            self.remap_method_signature(method);
        }
        if let Some(method) = &mut ext.synthetic_method_for_delegate {
            self.remap_method_signature(method);
        }
    }

    fn remap_constructor_extension(&self, ext: &mut ConstructorExtension) {
        if let Some(signature) = &mut ext.signature {
            self.remap_method_signature(signature);
        }
    }

    fn remap_type_parameter_extension(&self, ext: &mut TypeParameterExtension) {
        for annotation in &mut ext.annotations {
            self.remap_annotation(annotation);
        }
    }

    /// Rewrites the descriptor of a method signature. The method name itself
    /// is not a class name and stays untouched.
    pub fn remap_method_signature(&self, signature: &mut MethodSignature) {
        signature.descriptor = self.remapper.map_descriptor(&signature.descriptor);
    }

    /// Rewrites the descriptor of a field signature.
    pub fn remap_field_signature(&self, signature: &mut FieldSignature) {
        signature.descriptor = self.remapper.map_descriptor(&signature.descriptor);
    }

    /// Rewrites a single metadata class name through the renaming capability.
    ///
    /// The name is converted to slash-separated internal form (the leading
    /// `.` of a locally-scoped name is stripped first), handed to the
    /// capability, and converted back to the dotted metadata form. Any `$`
    /// the capability left in its output is folded into `.` as well, since
    /// relocators are segment-unaware and may emit binary nested-class
    /// separators. That replacement is unconditional, so a legitimate `$` in
    /// an original simple name does not survive — known sharp edge, kept for
    /// compatibility with the tooling this feeds.
    pub fn map_name(&self, name: &mut ClassName) {
        let local = name.starts_with('.');
        let stripped = if local { &name[1..] } else { name.as_str() };

        let internal = stripped.replace('.', "/");
        let mapped = self.remapper.map_internal_name(&internal);

        let mut dotted = mapped.replace(['/', '$'], ".");
        if local {
            dotted.insert(0, '.');
        }
        *name = dotted;
    }
}
