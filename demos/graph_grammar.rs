//! Runnable illustration of the graph-edge-binding grammar.
//! The grammar itself lives in `lang_pc::demo::graph` so both this example
//! and the crate's integration tests can share it.
use lang_pc::demo::graph::{build, print_ast};

fn main() {
    let parser = build();
    for line in [
        "//+ a->c;",
        "//+ a->*;",
        "//+ a->{b,c};",
        "//+ a@>c;",
        "//+ a->b;b->c;c->d;d->e;",
        "//+ a->c",
    ] {
        println!("--- {line}");
        match parser.parse_line(line, 1) {
            Ok(results) if results[0].success => print_ast(&results[0].ast),
            Ok(results) => {
                for r in &results {
                    println!("{}", r.error.as_ref().unwrap());
                }
            }
            Err(lex_err) => println!("{lex_err}"),
        }
    }
}
