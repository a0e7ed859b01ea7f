use std::collections::HashMap;

use kotlin_metadata_remap::{
    Annotation, Class, ClassExtension, Classifier, Constructor, ConstructorExtension,
    FieldSignature, FlexibleTypeUpperBound, Function, FunctionExtension, Lambda, Metadata,
    MetadataRemapper, MethodSignature, Package, PackageExtension, Property, PropertyExtension,
    Remapper, Type, TypeAlias, TypeExtension, TypeParameter, TypeParameterExtension,
    TypeProjection, ValueParameter, Variance,
};

/// Table-driven remapper, the shape a relocation tool's rename set has.
struct TableRemapper(HashMap<&'static str, &'static str>);

impl TableRemapper {
    fn of(pairs: &[(&'static str, &'static str)]) -> Self {
        TableRemapper(pairs.iter().copied().collect())
    }
}

impl Remapper for TableRemapper {
    fn map_internal_name(&self, name: &str) -> String {
        self.0.get(name).copied().unwrap_or(name).to_string()
    }
}

/// Maps every name to itself.
struct IdentityRemapper;

impl Remapper for IdentityRemapper {
    fn map_internal_name(&self, name: &str) -> String {
        name.to_string()
    }
}

/// A class tree exercising every node kind and extension attachment.
fn sample_class() -> Class {
    Class {
        name: "a.Container".into(),
        type_parameters: vec![TypeParameter {
            name: "T".into(),
            id: 0,
            variance: Variance::Out,
            upper_bounds: vec![Type::named("a.Bound")],
            extension: Some(TypeParameterExtension {
                annotations: vec![Annotation {
                    class_name: "a.Marker".into(),
                }],
            }),
        }],
        supertypes: vec![Type {
            classifier: Classifier::Class("a.Base".into()),
            arguments: vec![
                TypeProjection::Star,
                TypeProjection::Argument {
                    variance: Variance::Invariant,
                    projected_type: Type::named("a.Element"),
                },
            ],
            extension: Some(TypeExtension {
                is_raw: false,
                annotations: vec![Annotation {
                    class_name: "a.Marker".into(),
                }],
            }),
            ..Type::default()
        }],
        context_receiver_types: vec![Type::named("a.Scope")],
        inline_class_underlying_type: Some(Type::named("a.Element")),
        constructors: vec![Constructor {
            value_parameters: vec![ValueParameter {
                name: "element".into(),
                parameter_type: Type::named("a.Element"),
                vararg_element_type: None,
            }],
            extension: Some(ConstructorExtension {
                signature: Some(MethodSignature::new("<init>", "(La/Element;)V")),
            }),
        }],
        functions: vec![Function {
            name: "combine".into(),
            type_parameters: vec![],
            receiver_parameter_type: Some(Type::named("a.Element")),
            context_receiver_types: vec![],
            value_parameters: vec![ValueParameter {
                name: "others".into(),
                parameter_type: Type::named("kotlin.Array"),
                vararg_element_type: Some(Type::named("a.Element")),
            }],
            return_type: Type::named("a.Element"),
            extension: Some(FunctionExtension {
                signature: Some(MethodSignature::new(
                    "combine",
                    "(La/Element;[La/Element;)La/Element;",
                )),
                lambda_class_origin_name: None,
            }),
        }],
        properties: vec![Property {
            name: "size".into(),
            return_type: Type::named("kotlin.Int"),
            extension: Some(PropertyExtension {
                field_signature: Some(FieldSignature::new("size", "I")),
                getter_signature: Some(MethodSignature::new("getSize", "()I")),
                setter_signature: None,
                synthetic_method_for_annotations: Some(MethodSignature::new(
                    "getSize$annotations",
                    "(La/Element;)V",
                )),
                synthetic_method_for_delegate: Some(MethodSignature::new(
                    "getSize$delegate",
                    "()La/Element;",
                )),
            }),
            ..Property::default()
        }],
        type_aliases: vec![TypeAlias {
            name: "Handler".into(),
            type_parameters: vec![],
            underlying_type: Type::named("a.Element"),
            expanded_type: Type {
                classifier: Classifier::Class("a.Element".into()),
                abbreviated_type: Some(Box::new(Type {
                    classifier: Classifier::TypeAlias("a.Handler".into()),
                    ..Type::default()
                })),
                ..Type::default()
            },
            annotations: vec![Annotation {
                class_name: "a.Marker".into(),
            }],
        }],
        nested_classes: vec!["Inner".into()],
        sealed_subclasses: vec!["a.Container.Empty".into()],
        extension: Some(ClassExtension {
            anonymous_object_origin_name: Some(".a.ContainerKt.make.1".into()),
            local_delegated_properties: vec![Property {
                name: "lazy".into(),
                return_type: Type::named("a.Element"),
                ..Property::default()
            }],
            module_name: Some("main".into()),
        }),
    }
}

/// Counts nodes per level so shape comparisons are structural, not textual.
fn shape(class: &Class) -> Vec<usize> {
    vec![
        class.type_parameters.len(),
        class.supertypes.len(),
        class.supertypes.iter().map(|t| t.arguments.len()).sum(),
        class.context_receiver_types.len(),
        class.constructors.len(),
        class.functions.len(),
        class.properties.len(),
        class.type_aliases.len(),
        class.nested_classes.len(),
        class.sealed_subclasses.len(),
    ]
}

#[test]
fn rewrites_every_name_in_a_class_tree() {
    let remapper = TableRemapper::of(&[
        ("a/Container", "b/Holder"),
        ("a/Container/Empty", "b/Holder/Empty"),
        ("a/Base", "b/Base"),
        ("a/Bound", "b/Bound"),
        ("a/Scope", "b/Scope"),
        ("a/Element", "b/Item"),
        ("a/Handler", "b/Handler"),
        ("a/Marker", "b/Marker"),
        ("a/ContainerKt/make/1", "b/HolderKt/make/1"),
    ]);

    let marker = Annotation {
        class_name: "b.Marker".into(),
    };

    let mut class = sample_class();
    MetadataRemapper::new(&remapper).remap_class(&mut class);

    assert_eq!(class.name, "b.Holder");
    assert_eq!(class.type_parameters[0].upper_bounds[0], Type::named("b.Bound"));
    assert_eq!(
        class.type_parameters[0].extension.as_ref().unwrap().annotations,
        vec![marker.clone()]
    );
    assert_eq!(
        class.supertypes[0].classifier,
        Classifier::Class("b.Base".into())
    );
    assert_eq!(
        class.supertypes[0].extension.as_ref().unwrap().annotations,
        vec![marker.clone()]
    );
    assert_eq!(
        class.supertypes[0].arguments[1],
        TypeProjection::Argument {
            variance: Variance::Invariant,
            projected_type: Type::named("b.Item"),
        }
    );
    assert_eq!(class.context_receiver_types[0], Type::named("b.Scope"));
    assert_eq!(
        class.inline_class_underlying_type,
        Some(Type::named("b.Item"))
    );
    assert_eq!(class.sealed_subclasses, vec!["b.Holder.Empty".to_string()]);
    // nested class entries are simple names and carry nothing to rewrite
    assert_eq!(class.nested_classes, vec!["Inner".to_string()]);

    let function = &class.functions[0];
    assert_eq!(function.name, "combine");
    assert_eq!(
        function.receiver_parameter_type.as_ref().unwrap(),
        &Type::named("b.Item")
    );
    assert_eq!(
        function.value_parameters[0].vararg_element_type.as_ref().unwrap(),
        &Type::named("b.Item")
    );
    assert_eq!(function.return_type, Type::named("b.Item"));
    assert_eq!(
        function.extension.as_ref().unwrap().signature,
        Some(MethodSignature::new(
            "combine",
            "(Lb/Item;[Lb/Item;)Lb/Item;"
        ))
    );

    assert_eq!(
        class.constructors[0].extension.as_ref().unwrap().signature,
        Some(MethodSignature::new("<init>", "(Lb/Item;)V"))
    );

    let alias = &class.type_aliases[0];
    assert_eq!(alias.underlying_type, Type::named("b.Item"));
    assert_eq!(
        alias.expanded_type.abbreviated_type.as_ref().unwrap().classifier,
        Classifier::TypeAlias("b.Handler".into())
    );
    assert_eq!(alias.annotations, vec![marker]);

    let property_ext = class.properties[0].extension.as_ref().unwrap();
    assert_eq!(
        property_ext.synthetic_method_for_annotations,
        Some(MethodSignature::new("getSize$annotations", "(Lb/Item;)V"))
    );
    assert_eq!(
        property_ext.synthetic_method_for_delegate,
        Some(MethodSignature::new("getSize$delegate", "()Lb/Item;"))
    );

    let ext = class.extension.as_ref().unwrap();
    assert_eq!(
        ext.anonymous_object_origin_name.as_deref(),
        Some(".b.HolderKt.make.1")
    );
    assert_eq!(
        ext.local_delegated_properties[0].return_type,
        Type::named("b.Item")
    );
    assert_eq!(ext.module_name.as_deref(), Some("main"));
}

#[test]
fn shape_is_preserved() {
    let remapper = TableRemapper::of(&[("a/Container", "b/Holder"), ("a/Element", "b/Item")]);
    let original = sample_class();
    let mut remapped = original.clone();
    MetadataRemapper::new(&remapper).remap_class(&mut remapped);

    assert_eq!(shape(&original), shape(&remapped));
    assert_eq!(
        original.properties[0].extension.is_some(),
        remapped.properties[0].extension.is_some()
    );
}

#[test]
fn local_marker_is_preserved() {
    let remapper = TableRemapper::of(&[("a/B", "x/Y")]);
    let mut lambda = Lambda {
        function: Function {
            name: "invoke".into(),
            return_type: Type::named("kotlin.Unit"),
            extension: Some(FunctionExtension {
                signature: Some(MethodSignature::new("invoke", "()V")),
                lambda_class_origin_name: Some(".a.B".into()),
            }),
            ..Function::default()
        },
    };

    MetadataRemapper::new(&remapper).remap_lambda(&mut lambda);

    assert_eq!(
        lambda
            .function
            .extension
            .as_ref()
            .unwrap()
            .lambda_class_origin_name
            .as_deref(),
        Some(".x.Y")
    );
}

#[test]
fn dollar_separators_from_the_renamer_are_normalized() {
    let remapper = TableRemapper::of(&[("a/B", "x/Y$Inner")]);
    let mut class = Class {
        name: "a.B".into(),
        ..Class::default()
    };

    MetadataRemapper::new(&remapper).remap_class(&mut class);

    assert_eq!(class.name, "x.Y.Inner");
}

#[test]
fn field_descriptor_follows_class_renames() {
    let remapper = TableRemapper::of(&[("a/B", "x/Y")]);
    let mut property = Property {
        name: "b".into(),
        return_type: Type::named("a.B"),
        extension: Some(PropertyExtension {
            field_signature: Some(FieldSignature::new("b", "La/B;")),
            getter_signature: Some(MethodSignature::new("getB", "()La/B;")),
            setter_signature: Some(MethodSignature::new("setB", "(La/B;)V")),
            ..PropertyExtension::default()
        }),
        ..Property::default()
    };

    MetadataRemapper::new(&remapper).remap_property(&mut property);

    let ext = property.extension.as_ref().unwrap();
    assert_eq!(ext.field_signature, Some(FieldSignature::new("b", "Lx/Y;")));
    assert_eq!(
        ext.getter_signature,
        Some(MethodSignature::new("getB", "()Lx/Y;"))
    );
    assert_eq!(
        ext.setter_signature,
        Some(MethodSignature::new("setB", "(Lx/Y;)V"))
    );
    assert_eq!(property.return_type, Type::named("x.Y"));
}

#[test]
fn absent_optional_fields_stay_absent() {
    let remapper = TableRemapper::of(&[("a/B", "x/Y")]);
    let mut ty = Type {
        classifier: Classifier::Class("a.B".into()),
        arguments: vec![TypeProjection::Star],
        ..Type::default()
    };

    MetadataRemapper::new(&remapper).remap_type(&mut ty);

    assert_eq!(ty.classifier, Classifier::Class("x.Y".into()));
    assert_eq!(ty.arguments, vec![TypeProjection::Star]);
    assert!(ty.abbreviated_type.is_none());
    assert!(ty.outer_type.is_none());
    assert!(ty.flexible_upper_bound.is_none());
}

#[test]
fn flexible_bound_and_outer_type_are_rewritten_when_present() {
    let remapper = TableRemapper::of(&[("a/B", "x/Y"), ("a/Outer", "x/Outer")]);
    let mut ty = Type {
        classifier: Classifier::Class("a.B".into()),
        outer_type: Some(Box::new(Type::named("a.Outer"))),
        flexible_upper_bound: Some(FlexibleTypeUpperBound {
            upper_bound: Box::new(Type::named("a.B")),
            type_flexibility_id: Some("kotlin.jvm.PlatformType".into()),
        }),
        ..Type::default()
    };

    MetadataRemapper::new(&remapper).remap_type(&mut ty);

    assert_eq!(**ty.outer_type.as_ref().unwrap(), Type::named("x.Outer"));
    let bound = ty.flexible_upper_bound.as_ref().unwrap();
    assert_eq!(*bound.upper_bound, Type::named("x.Y"));
    assert_eq!(
        bound.type_flexibility_id.as_deref(),
        Some("kotlin.jvm.PlatformType")
    );
}

#[test]
fn missing_extension_passes_through() {
    let remapper = TableRemapper::of(&[("a/B", "x/Y")]);
    let mut function = Function {
        name: "f".into(),
        return_type: Type::named("a.B"),
        extension: None,
        ..Function::default()
    };

    MetadataRemapper::new(&remapper).remap_function(&mut function);

    assert_eq!(function.return_type, Type::named("x.Y"));
    assert!(function.extension.is_none());
}

#[test]
fn package_facade_is_rewritten() {
    let remapper = TableRemapper::of(&[("a/B", "x/Y")]);
    let mut package = Metadata::Package(Package {
        functions: vec![Function {
            name: "topLevel".into(),
            return_type: Type::named("a.B"),
            ..Function::default()
        }],
        properties: vec![],
        type_aliases: vec![],
        extension: Some(PackageExtension {
            local_delegated_properties: vec![Property {
                name: "p".into(),
                return_type: Type::named("a.B"),
                ..Property::default()
            }],
            module_name: None,
        }),
    });

    MetadataRemapper::new(&remapper).remap(&mut package);

    let Metadata::Package(package) = &package else {
        panic!("kind changed");
    };
    assert_eq!(package.functions[0].return_type, Type::named("x.Y"));
    assert_eq!(
        package.extension.as_ref().unwrap().local_delegated_properties[0].return_type,
        Type::named("x.Y")
    );
}

#[test]
fn identity_renaming_is_a_no_op() {
    let original = Metadata::Class(sample_class());
    let mut remapped = original.clone();

    MetadataRemapper::new(&IdentityRemapper).remap(&mut remapped);

    assert_eq!(original, remapped);
}
