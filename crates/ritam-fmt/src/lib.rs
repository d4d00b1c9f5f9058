// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source printer for Ritam programs.
//!
//! Prints a [`Program`] using any locale's spellings, so formatting and
//! translating are the same operation: parse with one locale, print with
//! another.

mod comment;
mod config;
mod printer;

pub use config::FormatConfig;

use ritam_ast::Program;
use ritam_locale::LocaleDef;

/// Print `program` with `locale`'s keyword and builtin spellings.
pub fn format_program(program: &Program, locale: &LocaleDef, config: &FormatConfig) -> String {
    let mut p = printer::Printer::new(locale, config);
    p.format_program(program);
    p.finish()
}

/// Like [`format_program`], keeping the `//` comments and blank lines of
/// `source`, the text `program` was parsed from.
pub fn format_program_with_source(
    program: &Program,
    source: &str,
    locale: &LocaleDef,
    config: &FormatConfig,
) -> String {
    let mut p = printer::Printer::new(locale, config).with_source(source);
    p.format_program(program);
    p.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ritam_ast::Keyword;
    use ritam_diagnostics::Diagnostics;

    fn parse(src: &str, locale: &LocaleDef) -> Program {
        let tokens = ritam_lexer::tokenize(src, locale);
        let diagnostics = Diagnostics::new(src, locale);
        match ritam_parser::parse(tokens, &diagnostics) {
            Ok(program) => program,
            Err(e) => panic!("parse failed for {src:?}: {e}"),
        }
    }

    fn fmt(src: &str) -> String {
        let en = LocaleDef::english();
        format_program_with_source(&parse(src, &en), src, &en, &FormatConfig::default())
    }

    /// Printing is stable: formatting formatted output changes nothing.
    fn assert_stable(src: &str) {
        let once = fmt(src);
        assert_eq!(fmt(&once), once, "unstable output for {src:?}");
    }

    fn spanish() -> LocaleDef {
        LocaleDef::new()
            .with_keyword(Keyword::Var, "sea")
            .with_keyword(Keyword::If, "si")
            .with_keyword(Keyword::ElseIf, "sino si")
            .with_keyword(Keyword::Else, "sino")
            .with_keyword(Keyword::Print, "imprimir")
            .with_keyword(Keyword::Function, "funcion")
            .with_keyword(Keyword::Return, "retornar")
            .with_keyword(Keyword::True, "verdadero")
            .with_builtin("log", "registro")
            .with_builtin("std", "estandar")
    }

    #[test]
    fn normalizes_spacing_and_indentation() {
        let src = "var   x=1\nif x>0{print   x\n}";
        assert_eq!(fmt(src), "var x = 1\nif x > 0 {\n    print x\n}\n");
    }

    #[test]
    fn empty_program_prints_nothing() {
        assert_eq!(fmt(""), "");
        assert_eq!(fmt(";;"), "");
    }

    #[test]
    fn minimal_parentheses() {
        assert_eq!(fmt("print (1 + 2) * 3"), "print (1 + 2) * 3\n");
        assert_eq!(fmt("print 1 + (2 * 3)"), "print 1 + 2 * 3\n");
        assert_eq!(fmt("print a - (b - c)"), "print a - (b - c)\n");
        assert_eq!(fmt("print (a - b) - c"), "print a - b - c\n");
        assert_eq!(fmt("print -(a + b)"), "print -(a + b)\n");
        assert_eq!(fmt("print (!a).b"), "print (!a).b\n");
        assert_eq!(fmt("print (await x) + 1"), "print (await x) + 1\n");
        assert_eq!(fmt("print await x + 1"), "print await x + 1\n");
    }

    #[test]
    fn else_if_chains_stay_flat() {
        let src = "if a { print 1 } else if b { print 2 } else { print 3 }";
        assert_eq!(
            fmt(src),
            "if a {\n    print 1\n} else if b {\n    print 2\n} else {\n    print 3\n}\n"
        );
    }

    #[test]
    fn declarations() {
        let src = "async function load<T: Item>(id: Id, n): Res { return }\nstruct P { x: Number, y }\nenum C { Red, Green }";
        assert_eq!(
            fmt(src),
            "async function load<T: Item>(id: Id, n): Res {\n    return\n}\n\nstruct P { x: Number, y }\n\nenum C { Red, Green }\n"
        );
    }

    #[test]
    fn long_structs_break_across_lines() {
        let config = FormatConfig {
            max_line_width: 20,
            ..FormatConfig::default()
        };
        let en = LocaleDef::english();
        let src = "struct Point { x: Number, y: Number }";
        let out = format_program(&parse(src, &en), &en, &config);
        assert_eq!(out, "struct Point {\n    x: Number\n    y: Number\n}\n");
    }

    #[test]
    fn views_print_props_then_children() {
        let src = "render \"button\" \"Go\" { click save attr \"id\" \"b\" render \"span\" }";
        assert_eq!(
            fmt(src),
            "render \"button\" {\n    click save\n    attr \"id\" \"b\"\n    text \"Go\"\n    render \"span\" {}\n}\n"
        );
    }

    #[test]
    fn strings_pick_a_quote() {
        assert_eq!(fmt("print 'say \"hi\"'"), "print 'say \"hi\"'\n");
        assert_eq!(fmt("print 'plain'"), "print \"plain\"\n");
    }

    #[test]
    fn comments_and_blank_lines_survive() {
        let src = "// header\nvar a = 1  // one\n\n\nvar b = 2\nwhile a {\n    // inside\n    a = b\n}\n// footer\n";
        assert_eq!(
            fmt(src),
            "// header\nvar a = 1  // one\n\nvar b = 2\nwhile a {\n    // inside\n    a = b\n}\n// footer\n"
        );
    }

    #[test]
    fn separators_are_added_where_newlines_would_merge() {
        let en = LocaleDef::english();
        let src = "a; -b\nfunction f() { return; (c) }";
        let out = fmt(src);
        assert_eq!(out, "a;\n-b\n\nfunction f() {\n    return;\n    c\n}\n");
        assert_eq!(parse(&out, &en).body.len(), 3);
    }

    #[test]
    fn translates_keywords_and_builtins() {
        let en = LocaleDef::english().with_builtin("log", "log").with_builtin("std", "std");
        let src = "var x = true\nif x { log(#std.log) } else if y { print 1 }";
        let program = parse(src, &en);
        let out = format_program(&program, &spanish(), &FormatConfig::default());
        assert_eq!(
            out,
            "sea x = verdadero\nsi x {\n    registro(#estandar.registro)\n} sino si y {\n    imprimir 1\n}\n"
        );

        let back = parse(&out, &spanish());
        assert_eq!(format_program(&back, &en, &FormatConfig::default()), format_program(&program, &en, &FormatConfig::default()));
    }

    #[test]
    fn builtin_handlers_are_translated() {
        let en = LocaleDef::english().with_builtin("log", "log");
        let config = FormatConfig::default();
        let event = parse("click log", &en);
        assert_eq!(format_program(&event, &spanish(), &config), "click registro\n");
        let view = parse("render \"button\" { click log }", &en);
        assert_eq!(
            format_program(&view, &spanish(), &config),
            "render \"button\" {\n    click registro\n}\n"
        );
    }

    #[test]
    fn missing_spellings_fall_back_to_universal_keys() {
        let en = LocaleDef::english();
        let program = parse("while x { }", &en);
        assert_eq!(format_program(&program, &spanish(), &FormatConfig::default()), "while x {}\n");
    }

    #[test]
    fn output_is_stable() {
        assert_stable("import { a, b } from \"lib\"\nexport component App { render \"div\" { text title } }");
        assert_stable("try { throw \"x\" } catch (e) { print e }\nmatch v { 1 { print 1 } [2] { } }");
        assert_stable("for i in [1, 2, 3] { total = total + i * 2 }\nprint a.b(c, d).e");
        assert_stable("const n: Number = -(1 + 2) / 3 == 4 || !ok && null != x");
        assert_stable("click go\ntext \"t\"\nattr \"k\" v");
    }
}
