use proptest::prelude::*;
use t81lang::{
    compile::CodeGen,
    compile_str,
    config::{CompileOptions, Strictness},
    lex::tokenize,
    parsing::{Program, Stmt},
};

const NAMES: &[&str] = &["a", "b", "count", "x1", "⍺", "βγ"];
const OPERATORS: &[&str] = &["+", "-", "*", "/", "<", ">"];
const ENTROPY: &[&str] = &["0.0", "0.42", "1.0", "3t", "0.125"];

fn operand() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(NAMES).prop_map(str::to_owned),
        (0_u32..1000).prop_map(|n| format!("{}t", n)),
    ]
}

fn expression() -> impl Strategy<Value = String> {
    prop_oneof![
        operand(),
        (operand(), prop::sample::select(OPERATORS), operand())
            .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
    ]
}

fn markers() -> impl Strategy<Value = String> {
    (
        prop::option::of(prop::sample::select(ENTROPY)),
        prop::option::of("[a-z]{1,6}"),
    )
        .prop_map(|(entropy, tag)| {
            let mut text = String::new();
            if let Some(entropy) = entropy {
                text.push_str(&format!(" @entropy({})", entropy));
            }
            if let Some(tag) = tag {
                text.push_str(&format!(" @tag(\"{}\")", tag));
            }
            text
        })
}

fn statement(index: usize) -> impl Strategy<Value = String> {
    (any::<bool>(), expression(), markers()).prop_map(move |(mutable, expr, markers)| {
        let keyword = if mutable { "let mut" } else { "let" };
        format!("    {} v{} = {}{};\n", keyword, index, expr, markers)
    })
}

fn function(index: usize) -> impl Strategy<Value = String> {
    (0..6_usize, expression()).prop_flat_map(move |(count, ret)| {
        let stmts: Vec<_> = (0..count).map(statement).collect();
        stmts.prop_map(move |stmts| {
            format!(
                "fn f{}(a: T81Int, b: T81Int) -> T81Int {{\n{}    return {};\n}}\n",
                index,
                stmts.concat(),
                ret
            )
        })
    })
}

fn program() -> impl Strategy<Value = String> {
    (1..4_usize).prop_flat_map(|count| {
        let functions: Vec<_> = (0..count).map(function).collect();
        functions.prop_map(|functions| functions.join("\n"))
    })
}

fn is_annotated(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Let(stmt) => stmt.entropy.is_some() || stmt.tag.is_some(),
        Stmt::Return(_) => false,
    }
}

proptest! {
    #[test]
    fn compilation_is_deterministic(source in program()) {
        let options = CompileOptions::strict();

        let first = compile_str(&source, &options).unwrap();
        let second = compile_str(&source, &options).unwrap();

        prop_assert_eq!(&first.ir, &second.ir);
        prop_assert_eq!(&first.program, &second.program);
        prop_assert_eq!(&first.annotations, &second.annotations);
    }

    #[test]
    fn syntax_tree_regenerates_same_code(source in program()) {
        let compilation = compile_str(&source, &CompileOptions::strict()).unwrap();

        let json = serde_json::to_string(&compilation.program).unwrap();
        let program: Program = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(CodeGen::new().compile(&program).unwrap(), compilation.ir);
    }

    #[test]
    fn one_record_per_annotated_binding(source in program()) {
        let compilation = compile_str(&source, &CompileOptions::strict()).unwrap();

        let annotated = compilation
            .program
            .functions
            .iter()
            .flat_map(|function| &function.body)
            .filter(|stmt| is_annotated(stmt))
            .count();

        prop_assert_eq!(compilation.annotations.len(), annotated);
    }

    #[test]
    fn blocks_separated_by_one_blank_line(source in program()) {
        let compilation = compile_str(&source, &CompileOptions::strict()).unwrap();
        let functions = compilation.program.functions.len();

        prop_assert_eq!(compilation.ir.matches("\n\nFUNC ").count(), functions - 1);
        prop_assert_eq!(compilation.ir.matches("ENDFUNC").count(), functions);
        prop_assert!(!compilation.ir.ends_with('\n'));
    }

    #[test]
    fn tokenizer_is_deterministic(source in "[ -~⍺βΩ\n]{0,200}") {
        let first = tokenize(&source, Strictness::Lenient).unwrap();
        let second = tokenize(&source, Strictness::Lenient).unwrap();
        prop_assert_eq!(first, second);

        let first = tokenize(&source, Strictness::Strict);
        let second = tokenize(&source, Strictness::Strict);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn lenient_never_panics(source in "[ -~⍺βΩ\n]{0,200}") {
        let _ = compile_str(&source, &CompileOptions::default());
    }
}
