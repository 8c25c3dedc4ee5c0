use std::{env, fs::read_to_string, process::ExitCode, time::Instant};

use log::{error, info};
use one_syntax::{
    ast::ast::{walk, Node},
    display_error,
    lexer::lexer::tokenize,
    parser::parser::parse_file,
    FileId,
};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: {} <file.one>", args.first().map_or("one_syntax", |arg| arg));
        return ExitCode::FAILURE;
    }

    let file_path: &str = &args[1];
    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {}", file_path, err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let tokens = tokenize(&source, FileId(0));
    info!("Tokenized {} tokens in {:?}", tokens.len(), start.elapsed());

    let parse_start = Instant::now();
    let (file, diagnostics) = parse_file(tokens, file_path);
    info!("Parsed in {:?}", parse_start.elapsed());

    let mut nodes = 0usize;
    walk(&file, &mut |_: &dyn Node| nodes += 1);
    println!(
        "{}: {} imports, {} top-level blocks, {} nodes",
        file.path_base,
        file.imports.len(),
        file.blocks.len(),
        nodes
    );

    for diagnostic in &diagnostics {
        print!("{}", display_error(diagnostic, &source, file_path));
    }

    if diagnostics.has_errors() {
        println!("{} errors", diagnostics.error_count());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
