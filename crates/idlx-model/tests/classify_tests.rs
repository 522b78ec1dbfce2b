use super::*;
use crate::model::Model;

fn typedef(model: &mut Model, name: &str, target: TypeId) -> TypeId {
    let lib = model.add_library("typedefs");
    let alias = model.declare_type(lib, name, TypeKind::Alias);
    model.set_supertype(alias, target);
    alias
}

#[test]
fn test_number_types_are_sorted() {
    let mut sorted = NUMBER_TYPES;
    sorted.sort_unstable();
    assert_eq!(sorted, NUMBER_TYPES);
}

#[test]
fn test_numeric_names_strip_markers() {
    assert!(is_numeric_name("long"));
    assert!(is_numeric_name("unsigned long long"));
    assert!(is_numeric_name("octet?"));
    assert!(is_numeric_name("unrestricted double"));
    assert!(is_numeric_name("unrestricted float?"));
    assert!(!is_numeric_name("DOMString"));
    assert!(!is_numeric_name("unsigned"));
    assert!(!is_numeric_name("Long"));
}

#[test]
fn test_base_name() {
    assert_eq!(base_name("unrestricted double?"), "double");
    assert_eq!(base_name("Node?"), "Node");
    assert_eq!(strip_nullable("Node?"), "Node");
    assert_eq!(strip_nullable("Node"), "Node");
}

#[test]
fn test_is_numeric_resolves_alias_chain() {
    let mut model = Model::new();
    let ulong = model.reference("unsigned long");
    let gl_enum = typedef(&mut model, "GLenum", ulong);
    let gl_enum_alias = typedef(&mut model, "GLenumAlias", gl_enum);

    assert!(model.is_numeric(Some(ulong)));
    assert!(model.is_numeric(Some(gl_enum)));
    assert!(model.is_numeric(Some(gl_enum_alias)));
    assert_eq!(model.resolve_alias(gl_enum_alias), ulong);
    assert!(!model.is_numeric(None));
}

#[test]
fn test_alias_without_target_resolves_to_itself() {
    let mut model = Model::new();
    let lib = model.add_library("L");
    let dangling = model.declare_type(lib, "Opaque", TypeKind::Alias);
    assert_eq!(model.resolve_alias(dangling), dangling);
    assert_eq!(model.try_resolve_alias(dangling, 8), Ok(dangling));
}

#[test]
fn test_try_resolve_alias_reports_cycles() {
    let mut model = Model::new();
    let lib = model.add_library("L");
    let a = model.declare_type(lib, "A", TypeKind::Alias);
    let b = model.declare_type(lib, "B", TypeKind::Alias);
    model.set_supertype(a, b);
    model.set_supertype(b, a);

    assert_eq!(
        model.try_resolve_alias(a, 64),
        Err(StructuralError::AliasCycle {
            name: "A".to_string()
        })
    );
    // The infallible resolver terminates anyway.
    let _ = model.resolve_alias(a);
}

#[test]
fn test_try_resolve_alias_reports_deep_chains() {
    let mut model = Model::new();
    let mut target = model.reference("long");
    for i in 0..5 {
        target = typedef(&mut model, &format!("T{i}"), target);
    }
    assert!(model.try_resolve_alias(target, 5).is_ok());
    assert_eq!(
        model.try_resolve_alias(target, 4),
        Err(StructuralError::AliasTooDeep {
            name: "T4".to_string(),
            limit: 4
        })
    );
}

#[test]
fn test_kind_queries_are_alias_transparent() {
    let mut model = Model::new();
    let lib = model.add_library("DOM");
    let element = model.declare_type(lib, "Element", TypeKind::Interface);
    let union = model.declare_type(lib, "ElementOrString", TypeKind::Union);
    let union_alias = typedef(&mut model, "NodeLike", union);

    assert!(model.is_union(Some(union)));
    assert!(model.is_union(Some(union_alias)));
    assert!(!model.is_union(Some(element)));
    assert!(!model.is_union(None));
    assert_eq!(model.resolved_kind(union_alias), TypeKind::Union);
}

#[test]
fn test_is_promise_walks_supertypes() {
    let mut model = Model::new();
    let lib = model.add_library("Fetch");
    let response = model.declare_type(lib, "Response", TypeKind::Interface);
    let promise = model.declare_type(lib, "Promise<Response>", TypeKind::Promise);
    model.set_supertype(promise, response);
    let derived = model.declare_type(lib, "ResponsePromise", TypeKind::Interface);
    model.set_supertype(derived, promise);

    assert!(model.is_promise(Some(promise)));
    assert!(model.is_promise(Some(derived)));
    assert!(!model.is_promise(Some(response)));
    assert_eq!(model.element_type(Some(promise)), Some(response));
}

#[test]
fn test_classify() {
    let mut model = Model::new();
    let lib = model.add_library("DOM");
    let string = model.reference("DOMString");
    let any = model.any_type();
    let boolean = model.reference("boolean");
    let float = model.reference("unrestricted float");
    let element = model.declare_type(lib, "Element", TypeKind::Interface);
    let init = model.declare_type(lib, "EventInit", TypeKind::Dictionary);
    let mode = model.declare_type(lib, "ShadowRootMode", TypeKind::Enum);
    let callback = model.declare_type(lib, "EventHandler", TypeKind::CallbackFunction);
    let seq = model.declare_type(lib, "sequence<Element>", TypeKind::Sequence);
    model.set_supertype(seq, element);
    let array = model.declare_type(lib, "Element[]", TypeKind::Array);
    model.set_supertype(array, element);
    let alias = typedef(&mut model, "Elements", seq);

    assert_eq!(model.classify(None), TypeClass::Void);
    assert_eq!(model.classify(Some(string)), TypeClass::String);
    assert_eq!(model.classify(Some(any)), TypeClass::Any);
    assert_eq!(model.classify(Some(boolean)), TypeClass::Boolean);
    assert_eq!(model.classify(Some(float)), TypeClass::Numeric);
    assert_eq!(model.classify(Some(element)), TypeClass::Interface);
    assert_eq!(model.classify(Some(init)), TypeClass::Dictionary);
    assert_eq!(model.classify(Some(mode)), TypeClass::Enum);
    assert_eq!(model.classify(Some(callback)), TypeClass::Callback);
    assert_eq!(model.classify(Some(seq)), TypeClass::Sequence(Some(element)));
    assert_eq!(model.classify(Some(array)), TypeClass::Array(Some(element)));
    assert_eq!(model.classify(Some(alias)), TypeClass::Sequence(Some(element)));
    assert!(model.is_sequence(Some(alias)));
    assert!(model.is_array(Some(array)));
    assert!(model.is_enum(Some(mode)));
    assert!(model.is_callback(Some(callback)));
}

#[test]
fn test_nullable_is_a_name_marker() {
    let mut model = Model::new();
    let lib = model.add_library("DOM");
    let node = model.declare_type(lib, "Node?", TypeKind::Interface);
    let long = model.reference("long?");
    assert!(model.is_nullable(Some(node)));
    assert!(model.is_nullable(Some(long)));
    assert!(model.is_numeric(Some(long)));
    assert!(!model.is_nullable(None));
}
