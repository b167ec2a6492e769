use std::{env, fs, process::exit};

use colored::Colorize;

use reg_ast::ast::AstNode;
use reg_ast::export::{export, Rendered};
use reg_ast::pipeline::compile;
use reg_ast::utils::ReportFlags;

fn main() {
    let mut flags = ReportFlags::default();
    let mut input_path = String::from("input.txt");
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--no-steps" => flags.remove(ReportFlags::TRACE),
            "--no-export" => flags.remove(ReportFlags::EXPORT),
            "--dot-only" => flags.remove(ReportFlags::RENDER),
            path => input_path = path.to_string(),
        }
    }

    let contents = match fs::read_to_string(&input_path) {
        Ok(contents) => contents,
        Err(_) => {
            eprintln!(
                "{} input file not found: {}",
                "error:".red().bold(),
                input_path
            );
            exit(1);
        }
    };

    for (index, raw_line) in contents.lines().enumerate() {
        let raw = raw_line.trim();
        if raw.is_empty() {
            continue;
        }
        report_expression(index + 1, raw, flags);
        println!("{}", "-".repeat(40));
    }
}

fn report_expression(line_number: usize, raw: &str, flags: ReportFlags) {
    println!(
        "\n{} ({}): {:?}",
        "Original expression".bold(),
        line_number,
        raw
    );

    match compile(raw) {
        Ok(compilation) => {
            println!("Preprocessed: {}", compilation.preprocessed_string());
            println!("Postfix result: {}", compilation.postfix_string());
            if flags.contains(ReportFlags::TRACE) {
                println!("Steps:");
                for step in &compilation.trace {
                    println!(" - {}", step);
                }
            }
            if flags.contains(ReportFlags::EXPORT) {
                export_ast(&compilation.root, line_number, flags);
            }
        }
        Err(err) => {
            println!("{}", err);
            if !err.partial_postfix().is_empty() {
                println!("Postfix so far: {}", err.partial_postfix());
            }
        }
    }
}

fn export_ast(root: &AstNode, line_number: usize, flags: ReportFlags) {
    let basename = format!("ast_{}", line_number);
    match export(root, &basename, flags.contains(ReportFlags::RENDER)) {
        Ok(Rendered::Image(path)) => println!("AST exported to: {}", path.display()),
        Ok(Rendered::DotOnly(path)) => {
            if flags.contains(ReportFlags::RENDER) {
                println!(
                    "{} could not render an image, DOT saved as: {}",
                    "warning:".yellow().bold(),
                    path.display()
                );
            } else {
                println!("DOT saved as: {}", path.display());
            }
        }
        Err(err) => eprintln!(
            "{} could not export the AST: {}",
            "error:".red().bold(),
            err
        ),
    }
}
