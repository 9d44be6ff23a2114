//! Signature extraction for callable declarations.

use crate::analyzer::{NodeId, SemanticAnalyzer, ValueDeclaration};
use crate::error::{ExtractError, Result};
use crate::model::{DocMethod, DocParameter, DocTypeParameter};

/// Build the signature part of a method record for `declaration`.
///
/// `name` is the function's resolved name, used for error reporting.
pub fn extract_signature<A: SemanticAnalyzer + ?Sized>(
    analyzer: &A,
    declaration: NodeId,
    name: &str,
) -> Result<DocMethod> {
    let signature = analyzer
        .signature_of(declaration)
        .ok_or_else(|| ExtractError::MissingSignature {
            name: name.to_string(),
        })?;

    let type_parameters = signature
        .type_parameters
        .iter()
        .map(|tp| DocTypeParameter {
            symbol: tp.symbol,
            name: analyzer.symbol_name(tp.symbol),
            summary: analyzer.documentation_of(tp.symbol),
            default: tp.default,
            extends: tp.constraint,
        })
        .collect();

    let mut parameters = Vec::with_capacity(signature.parameters.len());
    for &symbol in &signature.parameters {
        let param_name = analyzer.symbol_name(symbol);
        let Some(ValueDeclaration::Parameter(decl)) = analyzer.value_declaration(symbol) else {
            return Err(ExtractError::NotAParameter {
                function: name.to_string(),
                parameter: param_name,
            });
        };

        let spread = decl.dot_dot_dot;
        let default = decl.initializer;
        parameters.push(DocParameter {
            symbol,
            summary: analyzer.documentation_of(symbol),
            ty: analyzer.type_of_symbol_at(symbol, decl.node),
            optional: spread || default.is_some() || decl.question,
            spread,
            default,
            name: param_name,
        });
    }

    Ok(DocMethod {
        type_parameters,
        parameters,
        return_type: signature.return_type,
        return_summary: analyzer.return_tag_of(declaration),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::memory::{FunctionSpec, MemoryAnalyzer, ParameterSpec, TypeParameterSpec};

    fn analyzer_with(spec: FunctionSpec) -> (MemoryAnalyzer, NodeId) {
        let mut analyzer = MemoryAnalyzer::new();
        let file = analyzer.add_source_file("a.ts");
        let node = analyzer.add_function(file, spec);
        (analyzer, node)
    }

    #[test]
    fn optional_spread_and_default_detection() {
        let (analyzer, node) = analyzer_with(
            FunctionSpec::new("f", "void")
                .parameter(ParameterSpec::new("a", "number"))
                .parameter(ParameterSpec::new("b", "number").default("1"))
                .parameter(ParameterSpec::new("c", "string").optional())
                .parameter(ParameterSpec::new("rest", "number[]").spread()),
        );
        let method = extract_signature(&analyzer, node, "f").unwrap();
        let flags: Vec<_> = method
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.optional, p.spread, p.default.is_some()))
            .collect();
        assert_eq!(
            flags,
            [
                ("a", false, false, false),
                ("b", true, false, true),
                ("c", true, false, false),
                ("rest", true, true, false),
            ]
        );
    }

    #[test]
    fn spread_with_default_keeps_both_flags() {
        let (analyzer, node) = analyzer_with(
            FunctionSpec::new("f", "void")
                .parameter(ParameterSpec::new("rest", "number[]").spread().default("[]")),
        );
        let method = extract_signature(&analyzer, node, "f").unwrap();
        let rest = &method.parameters[0];
        assert!(rest.spread);
        assert!(rest.default.is_some());
        assert!(rest.optional);
    }

    #[test]
    fn type_parameters_in_declared_order() {
        let (mut analyzer, node) = analyzer_with(
            FunctionSpec::new("map", "U[]")
                .doc("/** @template U result element */")
                .type_parameter(TypeParameterSpec::new("T").doc("input element").extends("object"))
                .type_parameter(TypeParameterSpec::new("U").default("T"))
                .parameter(ParameterSpec::new("items", "T[]")),
        );
        let method = extract_signature(&analyzer, node, "map").unwrap();
        let object = analyzer.intern_type("object");
        let t = analyzer.intern_type("T");

        let [first, second] = &method.type_parameters[..] else {
            panic!("expected two type parameters");
        };
        assert_eq!(first.name, "T");
        assert_eq!(first.summary, "input element");
        assert_eq!(first.extends, Some(object));
        assert_eq!(first.default, None);
        assert_eq!(second.name, "U");
        assert_eq!(second.summary, "result element");
        assert_eq!(second.default, Some(t));
        assert_eq!(second.extends, None);
        assert_eq!(analyzer.type_to_string(method.return_type), "U[]");
    }

    #[test]
    fn parameter_types_and_summaries() {
        let (analyzer, node) = analyzer_with(
            FunctionSpec::new("greet", "string")
                .doc("/**\n * @param name who to greet\n * @returns the greeting\n */")
                .parameter(ParameterSpec::new("name", "string")),
        );
        let method = extract_signature(&analyzer, node, "greet").unwrap();
        assert_eq!(method.parameters[0].summary, "who to greet");
        assert_eq!(analyzer.type_to_string(method.parameters[0].ty), "string");
        assert_eq!(method.return_summary.as_deref(), Some("the greeting"));
    }

    #[test]
    fn no_returns_tag_means_no_return_summary() {
        let (analyzer, node) = analyzer_with(FunctionSpec::new("f", "void").doc("/** Does it. */"));
        let method = extract_signature(&analyzer, node, "f").unwrap();
        assert_eq!(method.return_summary, None);
        assert!(method.parameters.is_empty());
        assert!(method.type_parameters.is_empty());
    }

    #[test]
    fn missing_signature_is_an_error() {
        let (mut analyzer, node) = analyzer_with(FunctionSpec::new("f", "void"));
        analyzer.remove_signature(node);
        let err = extract_signature(&analyzer, node, "f").unwrap_err();
        assert!(matches!(err, ExtractError::MissingSignature { ref name } if name == "f"));
    }

    #[test]
    fn parameter_without_parameter_declaration_fails() {
        let (mut analyzer, node) = analyzer_with(
            FunctionSpec::new("f", "void").parameter(ParameterSpec::new("a", "number")),
        );
        let param = analyzer.signature_of(node).unwrap().parameters[0];
        analyzer.set_value_declaration(param, Some(ValueDeclaration::Variable(NodeId(0))));

        let err = extract_signature(&analyzer, node, "f").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::NotAParameter { ref function, ref parameter }
                if function == "f" && parameter == "a"
        ));
    }
}
