//! # jx
//!
//! A parser for jx sources: a Java-like module declaration whose body is a JSX-style markup
//! expression.
//!
//!     package ui;
//!
//!     Greeting(String name) {
//!         <p class="greeting">Hello, {name}!</p>
//!     }
//!
//! Markup and host expressions nest inside each other in both directions. Malformed markup is
//! recovered from where possible: unmatched end tags, auto-closed elements and broken
//! expressions are reported as [Diagnostic](jx::Diagnostic)s next to a complete tree, while
//! unrecoverable input fails with a [ParseError](jx::ParseError).
//!
//! Start with [parse_source](jx::parse_source) or [parse_markup](jx::parse_markup).

pub mod jx;
