// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! End-to-end tests: locale files in, programs, formatted source and
//! diagnostics out.

use std::io::Write;

use ritam_ast::stmt::StmtKind;
use ritam_ast::Keyword;
use ritam_compiler::{
    json_report, load_locale, parse_source, parse_source_with, render_error, translate_source, CompileError,
    CompileOptions,
};
use ritam_diagnostics::SyntaxError;
use ritam_fmt::FormatConfig;
use ritam_locale::{LocaleDef, LocaleError};
use ritam_parser::ParseError;

const TAMIL: &str = r#"{
    "meta": { "name": "தமிழ்", "code": "ta", "direction": "ltr" },
    "keywords": {
        "var": "மாறி",
        "if": "என்றால்",
        "else": "இல்லையெனில்",
        "print": "அச்சிடு",
        "function": "செயல்",
        "return": "திருப்பு"
    },
    "builtins": { "log": "பதிவு" },
    "messages": {
        "error_expected_token": "{0} எதிர்பார்க்கப்பட்டது, '{1}' கிடைத்தது"
    }
}"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tamil() -> LocaleDef {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TAMIL.as_bytes()).unwrap();
    load_locale(file.path()).unwrap()
}

fn syntax_error(err: CompileError) -> SyntaxError {
    match err {
        CompileError::Parse(ParseError::Syntax(e)) => e,
        other => panic!("Expected syntax error, got {other:?}"),
    }
}

#[test]
fn parses_a_program_from_a_locale_file() {
    init_tracing();
    let ta = tamil();
    let src = "மாறி எண் = 2\nஎன்றால் எண் > 1 {\n    அச்சிடு பதிவு(எண்)\n}";
    let program = parse_source(src, &ta).unwrap();
    assert_eq!(program.body.len(), 2);
    assert!(matches!(&program.body[0].kind, StmtKind::Var(decl) if decl.name == "எண்"));

    let StmtKind::If { then_branch, .. } = &program.body[1].kind else {
        panic!("Expected if statement");
    };
    let StmtKind::Print(call) = &then_branch[0].kind else {
        panic!("Expected print statement");
    };
    let ritam_ast::expr::ExprKind::Call { callee, .. } = &call.kind else {
        panic!("Expected call");
    };
    assert!(matches!(
        &callee.kind,
        ritam_ast::expr::ExprKind::Ident { universal_name: Some(u), .. } if u == "log"
    ));
}

#[test]
fn locale_loading_errors() {
    let err = load_locale("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, CompileError::Locale(LocaleError::Io { .. })));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();
    let err = load_locale(file.path()).unwrap_err();
    assert!(matches!(err, CompileError::Locale(LocaleError::Json(_))));
    assert!(err.to_string().starts_with("invalid locale definition"));
}

#[test]
fn messages_come_from_the_locale() {
    let ta = tamil();
    let err = syntax_error(parse_source("மாறி = 1", &ta).unwrap_err());
    assert_eq!(err.message, "a name எதிர்பார்க்கப்பட்டது, '=' கிடைத்தது");
    assert_eq!(err.line, Some(1));
    assert_eq!(err.column, Some(6));
    assert_eq!(err.snippet.as_deref(), Some("1 | மாறி = 1\n  |      ^"));
}

#[test]
fn strict_lexing_rejects_unknown_characters() {
    let en = LocaleDef::english();
    let src = "var x = 1 @ 2";
    assert!(parse_source(src, &en).is_ok());

    let options = CompileOptions {
        strict_lexing: true,
        ..CompileOptions::default()
    };
    let err = syntax_error(parse_source_with(src, &en, &options).unwrap_err());
    assert_eq!(err.key, "error_unexpected_character");
    assert_eq!(err.message, "Unexpected character '@'");
    assert_eq!((err.line, err.column), (Some(1), Some(11)));
}

#[test]
fn translation_round_trips() {
    let en = LocaleDef::english();
    let ta = tamil();
    let config = FormatConfig::default();
    let src = "// greet\nfunction greet(name) {\n    if name { return name } else { print \"?\" }\n}\n";

    let translated = translate_source(src, &en, &ta, &config).unwrap();
    assert_eq!(
        translated,
        "// greet\nசெயல் greet(name) {\n    என்றால் name {\n        திருப்பு name\n    } இல்லையெனில் {\n        அச்சிடு \"?\"\n    }\n}\n"
    );

    let back = translate_source(&translated, &ta, &en, &config).unwrap();
    assert_eq!(back, ritam_compiler::format_source(src, &en, &config).unwrap());
}

#[test]
fn rendered_error_points_at_the_problem() {
    colored::control::set_override(false);
    let en = LocaleDef::english();
    let src = "var a = 1\nif a {";
    let err = parse_source(src, &en).unwrap_err();
    let options = CompileOptions {
        file_name: Some("main.rt".to_string()),
        ..CompileOptions::default()
    };
    let out = render_error(&err, src, &options);
    assert_eq!(
        out,
        "error[E0101]: Expected '}' but found 'EOF'\n  --> main.rt:2:7\n    |\n  2 | if a {\n    |       ^\n"
    );
}

#[test]
fn json_report_for_failure_and_success() {
    let en = LocaleDef::english();
    let options = CompileOptions {
        file_name: Some("app.rt".to_string()),
        ..CompileOptions::default()
    };

    let src = "var x = 1\nif x { }\nvar y = in";
    let err = parse_source(src, &en).unwrap_err();
    let report: serde_json::Value = serde_json::from_str(&json_report(Some(&err), src, &options)).unwrap();
    assert_eq!(report["file"], "app.rt");
    assert_eq!(report["success"], false);
    assert_eq!(report["error_count"], 1);
    let diag = &report["diagnostics"][0];
    assert_eq!(diag["code"], "E0100");
    assert_eq!(diag["line"], 3);
    assert_eq!(diag["column"], 9);
    assert_eq!(diag["snippet"], "3 | var y = in\n  |         ^");
    assert_eq!(diag["hint"], "Did you mean \"if\"?");

    let ok: serde_json::Value = serde_json::from_str(&json_report(None, "print 1", &options)).unwrap();
    assert_eq!(ok["success"], true);
    assert_eq!(ok["error_count"], 0);
}

#[test]
fn export_errors_are_not_localized() {
    let ta = tamil().with_keyword(Keyword::Export, "ஏற்றுமதி");
    let err = parse_source("ஏற்றுமதி அச்சிடு 1", &ta).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse(ParseError::NotExportable { kind: "PrintStatement", .. })
    ));

    colored::control::set_override(false);
    let out = render_error(&err, "ஏற்றுமதி அச்சிடு 1", &CompileOptions::default());
    assert!(out.starts_with("error[E0200]: cannot export PrintStatement\n  --> <source>:1:10\n"), "{out}");
}

#[test]
fn compiles_on_many_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ritam_ast::Program>();
    assert_send_sync::<CompileError>();
    assert_send_sync::<LocaleDef>();

    let en = &LocaleDef::english();
    let sources: Vec<String> = (0..8).map(|i| format!("var v{i} = {i} * 2\nprint v{i}")).collect();
    std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|src| scope.spawn(move || parse_source(src, en).map(|p| p.body.len())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 2);
        }
    });
}

#[test]
fn parsed_programs_serialize_to_json() {
    let src = "var x = 1\nrender \"button\" { click save }";
    let program = parse_source(src, &LocaleDef::english()).unwrap();

    let json = serde_json::to_string(&program).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["body"][0]["kind"]["Var"]["name"], "x");
    assert_eq!(value["body"][0]["kind"]["Var"]["mutable"], true);
    let view = &value["body"][1]["kind"]["View"];
    assert_eq!(view["tag_name"], "button");
    assert_eq!(view["props"]["click"]["kind"]["Ident"]["name"], "save");
    assert_eq!(view["props"]["click"]["span"]["line"], 2);
    assert_eq!(view["props"]["click"]["span"]["column"], 25);
    assert_eq!(value["span"]["end"], src.len());

    let back: ritam_ast::Program = serde_json::from_str(&json).unwrap();
    assert_eq!(back, program);
}
