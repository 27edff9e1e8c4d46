//! Debug commands: `lex` and `parse` for inspecting the front end.

use rho_ir::SharedInterner;
use rhoc::render_parse_error;

use super::read_file;

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let interner = SharedInterner::new();
    let tokens = rho_lexer::lex(&content, &interner);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for (span, kind, text) in tokens.triples(&content) {
        println!("  {kind:?} @ {span} {text:?}");
    }
}

/// Parse a file and print each statement back as source.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let interner = SharedInterner::new();
    let tokens = rho_lexer::lex(&content, &interner);

    match rho_parse::parse(&tokens, &interner) {
        Ok(program) => {
            println!("Parse result for '{path}':");
            println!("  Statements: {}", program.len());
            println!();
            for stmt in &program {
                println!("{}", rho_ir::deparse_stmt(stmt, &interner));
            }
        }
        Err(err) => {
            eprint!("{}", render_parse_error(path, &content, &err));
            std::process::exit(1);
        }
    }
}
