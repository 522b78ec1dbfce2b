use super::*;
use crate::common::*;
use idlx_common::WarningKind;
use idlx_model::TypeKind;

#[test]
fn test_pipeline_merges_and_decomposes() {
    let mut model = Model::new();
    let dom = model.add_library("DOM");
    let html = model.add_library("HTML");
    let element = model.declare_type(dom, "Element", TypeKind::Interface);
    let string = model.declare_type(dom, "string", TypeKind::Interface);
    let node_a = model.declare_type(dom, "ParentNode", TypeKind::Interface);
    let node_b = model.declare_type(html, "ParentNode", TypeKind::Interface);
    let union = union_of(&mut model, html, "ElementOrString", &[element, string]);
    model.add_operation(node_a, op("append", &[("child", element)]));
    model.add_operation(node_b, op("append", &[("node", union)]));

    let output = Pipeline::default().run(model).unwrap();

    let frozen = &output.model;
    let node = frozen.lookup("ParentNode").unwrap();
    assert_eq!(node, node_a);
    assert_eq!(
        signatures(frozen, node),
        vec!["append(Element)".to_string(), "append(string)".to_string()]
    );
    assert_eq!(output.merge.folded_types, 1);
    assert_eq!(output.decomposition.variants_expanded, 1);
    assert!(output.warnings.is_empty());
}

#[test]
fn test_pipeline_rejects_cycles_closed_by_merge() {
    // Each library alone is acyclic; merging binds both placeholders.
    let mut model = Model::new();
    let a = model.add_library("A");
    let b = model.add_library("B");
    let second_ref = model.reference("Second");
    let first = model.declare_type(a, "First", TypeKind::Alias);
    model.set_supertype(first, second_ref);
    let first_ref = model.reference("First");
    let second = model.declare_type(b, "Second", TypeKind::Alias);
    model.set_supertype(second, first_ref);

    let err = Pipeline::default().run(model).unwrap_err();

    assert!(matches!(err, StructuralError::AliasCycle { .. }));
}

#[test]
fn test_pipeline_strict_mode_aborts() {
    let mut model = Model::new();
    let lib = model.add_library("DOM");
    let element = model.declare_type(lib, "Element", TypeKind::Interface);
    let long = model.reference("long");
    let string = model.reference("DOMString");
    let first = union_of(&mut model, lib, "A", &[element, long]);
    let second = union_of(&mut model, lib, "B", &[string, long]);
    let target = model.declare_type(lib, "Target", TypeKind::Interface);
    model.add_operation(target, op("set", &[("x", first), ("y", second)]));

    let lenient = Pipeline::default().run(model.clone()).unwrap();
    assert_eq!(lenient.warnings.count(WarningKind::AmbiguousUnion), 1);

    let strict = Pipeline::new(MergeOptions::strict()).run(model);
    assert!(matches!(strict, Err(StructuralError::AmbiguousUnion { count: 2, .. })));
}

#[test]
fn test_pipeline_reports_unresolved_references() {
    let mut model = Model::new();
    let lib = model.add_library("DOM");
    let window = model.declare_type(lib, "Window", TypeKind::Interface);
    let missing = model.reference("Storage");
    model.add_operation(window, op("persist", &[("store", missing)]));

    let output = Pipeline::default().run(model).unwrap();

    assert!(output.model.type_named("Storage").is_some());
    let warning = output
        .warnings
        .of_kind(WarningKind::UnresolvedReference)
        .next()
        .unwrap();
    assert_eq!(warning.type_name, "Storage");
}

#[test]
fn test_alias_chain_deeper_than_classifier_is_rejected() {
    let mut model = Model::new();
    let lib = model.add_library("WebGL");
    let element = model.declare_type(lib, "Element", TypeKind::Interface);
    let string = model.declare_type(lib, "string", TypeKind::Interface);
    let union = union_of(&mut model, lib, "ElementOrString", &[element, string]);
    let mut previous = union;
    for i in 0..70 {
        let alias = model.declare_type(lib, format!("Alias{i}"), TypeKind::Alias);
        model.set_supertype(alias, previous);
        previous = alias;
    }
    let host = model.declare_type(lib, "Host", TypeKind::Interface);
    model.add_operation(host, op("f", &[("x", previous)]));
    let options = MergeOptions {
        max_alias_depth: 100,
        ..MergeOptions::default()
    };

    let err = Pipeline::new(options).run(model).unwrap_err();

    assert!(matches!(
        err,
        StructuralError::AliasTooDeep {
            limit: idlx_common::limits::MAX_ALIAS_DEPTH,
            ..
        }
    ));
}
