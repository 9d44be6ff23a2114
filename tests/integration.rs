use docparser::analyzer::memory::{
    FunctionSpec, MemoryAnalyzer, ParameterSpec, TypeParameterSpec, VariableSpec,
};
use docparser::{extract, extract_with, MemberKind, SemanticAnalyzer, Settings};

fn single_file() -> (MemoryAnalyzer, usize) {
    let mut analyzer = MemoryAnalyzer::new();
    let file = analyzer.add_source_file("fixtures/variable.ts");
    (analyzer, file)
}

// -- end-to-end scenarios --

#[test]
fn exported_variable_with_lead_comment() {
    let (mut analyzer, file) = single_file();
    analyzer.add_variable(
        file,
        VariableSpec::new("x", "number")
            .doc("/** the x value */")
            .exported(),
    );

    let docs = extract(&analyzer).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].file_name, "fixtures/variable.ts");
    assert_eq!(docs[0].members.len(), 1);

    let x = &docs[0].members[0];
    assert!(matches!(x.kind, MemberKind::Field { .. }));
    assert_eq!(x.name, "x");
    assert_eq!(x.summary, "the x value");
    assert_eq!(x.description, None);
    assert!(x.see_also.is_empty());
    assert_eq!(x.example, None);
    assert!(x.custom_tags.is_empty());
    assert!(x.is_exported(&analyzer));
}

#[test]
fn function_with_default_and_rest_parameters() {
    let (mut analyzer, file) = single_file();
    analyzer.add_function(
        file,
        FunctionSpec::new("f", "void")
            .doc("/** @summary Does a thing */")
            .parameter(ParameterSpec::new("a", "number"))
            .parameter(ParameterSpec::new("b", "number").default("1"))
            .parameter(ParameterSpec::new("rest", "number[]").spread())
            .exported(),
    );

    let docs = extract(&analyzer).unwrap();
    let f = &docs[0].members[0];
    assert!(f.summary.contains("Does a thing"));
    assert!(f.custom_tags.is_empty());

    let method = f.as_method().unwrap();
    assert_eq!(method.parameters.len(), 3);
    let [a, b, rest] = &method.parameters[..] else {
        panic!("expected three parameters");
    };
    assert_eq!((a.name.as_str(), a.optional, a.spread), ("a", false, false));
    assert_eq!((b.name.as_str(), b.optional, b.spread), ("b", true, false));
    assert_eq!(analyzer.node_text(b.default.unwrap()), "1");
    assert_eq!((rest.name.as_str(), rest.optional, rest.spread), ("rest", true, true));
    assert_eq!(analyzer.type_to_string(method.return_type), "void");
}

#[test]
fn fenced_and_unfenced_examples() {
    let (mut analyzer, file) = single_file();
    analyzer.add_function(
        file,
        FunctionSpec::new("run", "void").doc(
            r#"/**
 * Runs.
 * @example
 * ```ts
 * run()
 * ```
 * @example run(); run();
 */"#,
        ),
    );

    let docs = extract(&analyzer).unwrap();
    assert_eq!(
        docs[0].members[0].example.as_deref(),
        Some("```ts\nrun()\n```\n\n```js\nrun(); run();\n```\n")
    );
}

// -- tag routing --

#[test]
fn full_doc_comment_routing() {
    let (mut analyzer, file) = single_file();
    analyzer.add_function(
        file,
        FunctionSpec::new("parse", "Ast")
            .doc(
                r#"/**
 * Parses source text.
 * @description Tokenizes first.
 * @remark Then builds the tree.
 * @see tokenize
 * @seealso Ast
 * @since 1.2
 * @since 2.0
 * @param source the text
 * @returns the tree
 * @summary Entry point.
 */"#,
            )
            .parameter(ParameterSpec::new("source", "string")),
    );

    let docs = extract(&analyzer).unwrap();
    let parse = &docs[0].members[0];
    assert_eq!(parse.summary, "Parses source text.\nEntry point.");
    assert_eq!(
        parse.description.as_deref(),
        Some("Tokenizes first.\nThen builds the tree.")
    );
    assert_eq!(parse.see_also, ["tokenize", "Ast"]);
    assert_eq!(parse.custom_tags["since"], "2.0");
    // @param and @returns stay in the raw tag list as well
    assert_eq!(parse.custom_tags["param"], "source the text");
    assert_eq!(parse.custom_tags["returns"], "the tree");

    let method = parse.as_method().unwrap();
    assert_eq!(method.parameters[0].summary, "the text");
    assert_eq!(method.return_summary.as_deref(), Some("the tree"));
}

#[test]
fn generic_function_signature() {
    let (mut analyzer, file) = single_file();
    analyzer.add_function(
        file,
        FunctionSpec::new("first", "T | undefined")
            .doc("/** @template T item type */")
            .type_parameter(TypeParameterSpec::new("T").extends("object").default("{}"))
            .parameter(ParameterSpec::new("items", "T[]"))
            .parameter(ParameterSpec::new("fallback", "T").optional()),
    );

    let docs = extract(&analyzer).unwrap();
    let method = docs[0].members[0].as_method().unwrap();
    let t = &method.type_parameters[0];
    assert_eq!(t.name, "T");
    assert_eq!(t.summary, "item type");
    assert_eq!(analyzer.type_to_string(t.extends.unwrap()), "object");
    assert_eq!(analyzer.type_to_string(t.default.unwrap()), "{}");

    let fallback = &method.parameters[1];
    assert!(fallback.optional);
    assert!(!fallback.spread);
    assert!(fallback.default.is_none());
}

// -- ordering and files --

#[test]
fn members_keep_declaration_order_across_files() {
    let mut analyzer = MemoryAnalyzer::new();
    let a = analyzer.add_source_file("a.ts");
    let b = analyzer.add_source_file("b.ts");
    for name in ["z", "y", "x"] {
        analyzer.add_variable(a, VariableSpec::new(name, "number"));
    }
    analyzer.add_function(b, FunctionSpec::new("overload", "void"));
    analyzer.add_function(b, FunctionSpec::new("overload", "void"));

    let docs = extract(&analyzer).unwrap();
    let a_names: Vec<_> = docs[0].members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(a_names, ["z", "y", "x"]);
    // one record per physical declaration
    assert_eq!(docs[1].members.len(), 2);
}

#[test]
fn settings_change_example_fence() {
    let (mut analyzer, file) = single_file();
    analyzer.add_variable(file, VariableSpec::new("x", "number").doc("/** @demo x + 1 */"));

    let settings = Settings::from_toml_str("example_language = \"ts\"").unwrap();
    let docs = extract_with(&analyzer, settings).unwrap();
    assert_eq!(docs[0].members[0].example.as_deref(), Some("\n```ts\nx + 1\n```\n"));
}

#[test]
fn independent_passes_on_separate_threads() {
    let build = |name: &str| {
        let (mut analyzer, file) = single_file();
        analyzer.add_variable(file, VariableSpec::new(name, "number"));
        analyzer
    };
    let left = build("left");
    let right = build("right");

    let (l, r) = std::thread::scope(|s| {
        let l = s.spawn(|| extract(&left).unwrap());
        let r = s.spawn(|| extract(&right).unwrap());
        (l.join().unwrap(), r.join().unwrap())
    });
    assert_eq!(l[0].members[0].name, "left");
    assert_eq!(r[0].members[0].name, "right");
}

// -- serialized shape --

#[test]
fn model_serializes_with_kind_tag() {
    let (mut analyzer, file) = single_file();
    analyzer.add_variable(file, VariableSpec::new("x", "number").doc("/** @foo bar */"));
    analyzer.add_function(
        file,
        FunctionSpec::new("f", "void").parameter(ParameterSpec::new("rest", "any[]").spread()),
    );

    let docs = extract(&analyzer).unwrap();
    let json = serde_json::to_value(&docs[0]).unwrap();
    let members = json["members"].as_array().unwrap();

    assert_eq!(members[0]["kind"], "field");
    assert_eq!(members[0]["name"], "x");
    assert_eq!(members[0]["custom_tags"]["foo"], "bar");
    assert!(members[0]["ty"].is_u64());

    assert_eq!(members[1]["kind"], "method");
    assert_eq!(members[1]["parameters"][0]["spread"], true);
    assert_eq!(members[1]["parameters"][0]["optional"], true);
    assert!(members[1]["return_summary"].is_null());
}
