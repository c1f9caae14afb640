//! Source file header
//!
//!     [package a.b;] [import [static] a.b.C; | import a.b.*;]* Name(params) { markup }
//!
//! The header is host syntax and is read with the host token cursor; the module body is
//! handed to the markup pipeline. `Name(` at the top level is always a module declaration,
//! never a method invocation.

use crate::jx::ambiguity::Production;
use crate::jx::ast::elements::{
    FormalParameter, ImportDeclaration, ModuleDeclaration, PackageDeclaration, SourceFile,
};
use crate::jx::ast::error::ParseError;
use crate::jx::host::cursor::HostCursor;
use crate::jx::host::java::parse_type;
use crate::jx::host::token::HostToken;
use crate::jx::host::HostParseError;
use crate::jx::parsing::EmbedContext;
use tracing::debug;

fn syntax(cx: &EmbedContext<'_>, err: HostParseError) -> ParseError {
    if let Some(fatal) = err.fatal {
        return *fatal;
    }
    ParseError::Syntax {
        message: err.message,
        location: cx.range(err.offset..err.offset),
    }
}

/// `a.b.c`, optionally ending in `.*` when `allow_wildcard`
fn qualified_name(
    cursor: &mut HostCursor<'_>,
    allow_wildcard: bool,
) -> Result<(String, bool), HostParseError> {
    let (mut name, _) = cursor.expect_identifier()?;
    while cursor.at(&HostToken::Dot) {
        let after_dot = cursor.peek_nth(1).and_then(|lexed| lexed.token);
        if allow_wildcard && after_dot == Some(HostToken::Star) {
            cursor.bump();
            cursor.bump();
            return Ok((name, true));
        }
        cursor.bump();
        let (part, _) = cursor.expect_identifier()?;
        name.push('.');
        name.push_str(&part);
    }
    Ok((name, false))
}

fn package(
    cx: &EmbedContext<'_>,
    cursor: &mut HostCursor<'_>,
) -> Result<Option<PackageDeclaration>, HostParseError> {
    let Some(keyword) = cursor.eat(&HostToken::Package) else {
        return Ok(None);
    };
    let (name, _) = qualified_name(cursor, false)?;
    let semi = cursor.expect(&HostToken::Semicolon, "`;` after package name")?;
    Ok(Some(PackageDeclaration {
        name,
        location: cx.range(keyword.start..semi.end),
    }))
}

fn imports(
    cx: &EmbedContext<'_>,
    cursor: &mut HostCursor<'_>,
) -> Result<Vec<ImportDeclaration>, HostParseError> {
    let mut imports = Vec::new();
    while let Some(keyword) = cursor.eat(&HostToken::Import) {
        let is_static = cursor.eat(&HostToken::Static).is_some();
        let (path, wildcard) = qualified_name(cursor, true)?;
        let semi = cursor.expect(&HostToken::Semicolon, "`;` after import")?;
        imports.push(ImportDeclaration {
            path,
            is_static,
            wildcard,
            location: cx.range(keyword.start..semi.end),
        });
    }
    Ok(imports)
}

fn formal_parameters(
    cx: &EmbedContext<'_>,
    cursor: &mut HostCursor<'_>,
) -> Result<Vec<FormalParameter>, HostParseError> {
    let mut parameters = Vec::new();
    if cursor.at(&HostToken::RParen) {
        return Ok(parameters);
    }
    loop {
        let start = cursor.next_token_start();
        let is_final = cursor.eat(&HostToken::Final).is_some();
        let ty = parse_type(cursor)?;
        let (name, name_span) = cursor.expect_identifier()?;
        parameters.push(FormalParameter {
            is_final,
            ty,
            name,
            location: cx.range(start..name_span.end),
        });
        if cursor.eat(&HostToken::Comma).is_none() {
            return Ok(parameters);
        }
    }
}

pub fn parse_source_file(cx: &mut EmbedContext<'_>) -> Result<SourceFile, ParseError> {
    let source = cx.source();
    let mut cursor = HostCursor::new(source, 0);
    let file_start = cursor.next_token_start();

    let package = package(cx, &mut cursor).map_err(|err| syntax(cx, err))?;
    let imports = imports(cx, &mut cursor).map_err(|err| syntax(cx, err))?;

    let header = (|| {
        let (name, name_span) = cursor.expect_identifier()?;
        if !cursor.at(&HostToken::LParen)
            || !cx
                .table()
                .prefers(Production::ModuleName, Production::MethodInvocation)
        {
            return Err(cursor.error("expected `(` after module name"));
        }
        cursor.bump();
        let parameters = formal_parameters(cx, &mut cursor)?;
        cursor.expect(&HostToken::RParen, "`)` after module parameters")?;
        cursor.expect(&HostToken::LBrace, "`{` before module body")?;
        let body_start = cursor.next_token_start();
        if !source[body_start..].starts_with('<') {
            return Err(HostParseError::new("expected markup in module body", body_start));
        }
        Ok((name, name_span, parameters, body_start))
    })();
    let (name, name_span, parameters, body_start) = header.map_err(|err| syntax(cx, err))?;
    debug!(module = %name, parameters = parameters.len(), "module header");

    let (body, body_end) = cx.parse_markup(body_start)?;
    cursor.set_pos(body_end);
    let close = cursor
        .expect(&HostToken::RBrace, "`}` after module body")
        .map_err(|err| syntax(cx, err))?;
    if !cursor.at_end() {
        let start = cursor.next_token_start();
        return Err(ParseError::TrailingInput {
            location: cx.range(start..source.len()),
        });
    }

    let module = ModuleDeclaration {
        name,
        parameters,
        body,
        location: cx.range(name_span.start..close.end),
    };
    Ok(SourceFile {
        package,
        imports,
        module,
        location: cx.range(file_start..close.end),
    })
}
