#![allow(clippy::module_inception)]

use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::ast::{Decl, TexelFile},
    config::FrontendConfig,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse_with_ids,
    scope_checker::scope_checker::ScopeChecker,
    symbols::{
        resolver::{Resolutions, SymbolResolver},
        tree::{NodeId, SymbolTree},
    },
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod logger;
pub mod macros;
pub mod parser;
pub mod scope_checker;
pub mod symbols;

extern crate regex;

/// A point in a source file: byte offset, 1-based line and file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, file: Rc<String>) -> Self {
        Position { offset, line, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the 1-based line number, the text of that line and the column of
/// `position` inside it, or `None` when the offset lies past the end of `content`.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // Offset sits exactly at the end of the source (the EOF token).
    match content.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => {
            Some((line_number - 1, last.to_string(), last.len()))
        }
        _ => Some((line_number, String::new(), 0)),
    }
}

/// Renders a diagnostic with the offending line and a caret under the column.
///
/// ```text
/// Error: UndefinedSymbol (Declare `Missing` or check its spelling)
/// -> geometry.tx
///   |
/// 2 | Missing field;
///   | ^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) else {
        out.push_str(&format!("{}\n", error));
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}

/// One file of a multi-file compilation.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Dotted module path the file's declarations live under, e.g. `["geometry"]`.
    /// An empty path places the declarations at the root.
    pub module_path: Vec<String>,
    pub file_name: String,
    pub source: String,
}

impl SourceUnit {
    pub fn new(module_path: &[&str], file_name: &str, source: &str) -> Self {
        SourceUnit {
            module_path: module_path.iter().map(|s| s.to_string()).collect(),
            file_name: file_name.to_string(),
            source: source.to_string(),
        }
    }
}

/// A single file that passed every front-end stage.
#[derive(Debug)]
pub struct CompiledFile {
    pub ast: TexelFile,
    pub tree: SymbolTree,
    pub resolutions: Resolutions,
}

/// Every file of a compilation, sharing one symbol tree.
#[derive(Debug)]
pub struct CompiledProgram {
    pub files: Vec<TexelFile>,
    pub tree: SymbolTree,
    pub resolutions: Resolutions,
}

pub fn compile(source: &str, file_name: Option<String>) -> Result<CompiledFile, Error> {
    compile_with_config(source, file_name, &FrontendConfig::default())
}

/// Runs lexing, parsing, symbol resolution and scope checking over one file
/// whose declarations live at the root of the symbol tree.
pub fn compile_with_config(
    source: &str,
    file_name: Option<String>,
    config: &FrontendConfig,
) -> Result<CompiledFile, Error> {
    let file_name = file_name.unwrap_or_else(|| config.default_file_name.clone());
    let unit = SourceUnit {
        module_path: vec![],
        file_name,
        source: source.to_string(),
    };

    let CompiledProgram {
        mut files,
        tree,
        resolutions,
    } = compile_units_with_config(std::slice::from_ref(&unit), config)?;

    let ast = files.remove(0);
    Ok(CompiledFile {
        ast,
        tree,
        resolutions,
    })
}

pub fn compile_units(units: &[SourceUnit]) -> Result<CompiledProgram, Error> {
    compile_units_with_config(units, &FrontendConfig::default())
}

/// Compiles several files against one shared symbol tree. Every file is
/// registered before any file is resolved, so declarations may be referenced
/// across files regardless of order.
pub fn compile_units_with_config(
    units: &[SourceUnit],
    config: &FrontendConfig,
) -> Result<CompiledProgram, Error> {
    let mut files = Vec::with_capacity(units.len());
    let mut next_id = 0;

    for unit in units {
        let tokens = tokenize(unit.source.clone(), Some(unit.file_name.clone()))?;
        debug!(file = %unit.file_name, tokens = tokens.len(), "lexed");

        let (file, last_id) = parse_with_ids(tokens, next_id)?;
        debug!(
            file = %unit.file_name,
            declarations = file.declarations.len(),
            "parsed"
        );
        next_id = last_id;
        files.push(file);
    }

    let mut tree = SymbolTree::new();
    let (modules, resolutions) = {
        let mut resolver = SymbolResolver::with_config(&mut tree, config);

        let mut modules: Vec<NodeId> = Vec::with_capacity(files.len());
        for (unit, file) in units.iter().zip(files.iter()) {
            modules.push(resolver.register(&unit.module_path, file)?);
        }
        resolver.register_builtins()?;

        for (module, file) in modules.iter().zip(files.iter()) {
            resolver.resolve(*module, file)?;
        }

        (modules, resolver.finish())
    };

    for (module, file) in modules.iter().zip(files.iter()) {
        for decl in &file.declarations {
            if let Decl::Function(func) = decl {
                ScopeChecker::new(&tree, func).with_module(*module).check()?;
            }
        }
    }

    Ok(CompiledProgram {
        files,
        tree,
        resolutions,
    })
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nfoo\n\n    Testing { }\n";
        let (line_number, line, line_pos) = super::get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 31).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "    Testing { }\n");
        assert_eq!(line_pos, 12);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position("abc", 10).is_none());
        let (line_number, line, line_pos) = super::get_line_at_position("abc", 3).unwrap();
        assert_eq!((line_number, line.as_str(), line_pos), (1, "abc", 3));
    }

    #[test]
    fn test_render_error_caret() {
        let source = "struct A {\n    Missing field;\n}\n";
        let error = Error::new(
            ErrorImpl::UndefinedSymbol {
                name: "Missing".to_string(),
            },
            Position::new(15, 2, Rc::new("a.tx".to_string())),
        );

        let rendered = super::render_error(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines[0],
            "Error: UndefinedSymbol (Declare `Missing` or check its spelling)"
        );
        assert_eq!(lines[1], "-> a.tx");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "2 | Missing field;");
        assert_eq!(lines[4], "  | ^");
    }
}
