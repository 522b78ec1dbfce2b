use crate::members::{Operation, Parameter};
use crate::model::Model;
use crate::types::TypeKind;

#[test]
fn test_signature_joins_parameter_type_names() {
    let mut model = Model::new();
    let lib = model.add_library("Browser");
    let window = model.declare_type(lib, "Window", TypeKind::Interface);
    let string = model.reference("DOMString");
    let long = model.reference("long");

    let op = model.add_operation(
        window,
        Operation::new("open")
            .with_param(Parameter::new("url", string))
            .with_param(Parameter::new("features", long)),
    );
    assert_eq!(model.signature(op), "open(DOMString,long)");

    let none = model.add_operation(window, Operation::new("close"));
    assert_eq!(model.signature(none), "close()");
}

#[test]
fn test_signature_renders_missing_types_as_void() {
    let mut model = Model::new();
    let lib = model.add_library("DOM");
    let node = model.declare_type(lib, "Node", TypeKind::Interface);
    let op = model.add_operation(node, Operation::new("normalize").with_param(Parameter::untyped("x")));
    assert_eq!(model.signature(op), "normalize(void)");
}

#[test]
fn test_main_signature_is_bare_name() {
    let mut model = Model::new();
    let lib = model.add_library("Workers");
    let scope = model.declare_type(lib, "WorkerGlobalScope", TypeKind::Interface);
    let string = model.reference("DOMString");
    let main = model.add_operation(
        scope,
        Operation::main().with_param(Parameter::new("script", string)),
    );
    assert_eq!(model.signature(main), "(main)");
    assert_eq!(model.display_operation(main), "(main)");
}

#[test]
fn test_display_operation_short_forms() {
    let mut model = Model::new();
    let lib = model.add_library("DOM");
    let node = model.declare_type(lib, "Node", TypeKind::Interface);
    let string = model.reference("DOMString");

    let zero = model.add_operation(node, Operation::new("normalize"));
    let one = model.add_operation(node, Operation::new("lookupPrefix").with_param(Parameter::new("ns", string)));
    let many = model.add_operation(
        node,
        Operation::new("insertBefore")
            .with_param(Parameter::new("node", node))
            .with_param(Parameter::new("child", node)),
    );
    let untyped = model.add_operation(node, Operation::new("x").with_param(Parameter::untyped("y")));

    assert_eq!(model.display_operation(zero), "normalize()");
    assert_eq!(model.display_operation(one), "lookupPrefix(DOMString)");
    assert_eq!(model.display_operation(many), "insertBefore(\u{2026})");
    assert_eq!(model.display_operation(untyped), "x(?)");
}
