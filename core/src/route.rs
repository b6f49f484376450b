//! Candidate paths and the selection/substitution mechanics behind them.
//!
//! # Design
//! An operation on a resource usually has more than one endpoint shape —
//! a flat collection path and one nested under a parent resource, for
//! example. Each shape is a [`PathCandidate`]; an [`Operation`] lists its
//! candidates in declaration order. Selection is a plain ordered scan
//! with an explicit predicate: the first candidate whose placeholders are
//! all present in the call arguments wins. There is no scoring and no
//! most-specific heuristic; tables are expected to order candidates so
//! that the shape they want preferred comes first.
//!
//! Substitution is a separate, total step: placeholders with a matching
//! argument are replaced, everything else is left verbatim. The router
//! re-checks the substituted URL for surviving brace syntax, which also
//! catches malformed templates (an unterminated `{id` contains no
//! complete placeholder, so the subset predicate cannot reject it).

use crate::args::CallArguments;
use crate::http::HttpMethod;

/// One (method, path template) alternative for a logical operation.
///
/// Templates use curly-brace named placeholders (`/hosts/{id}`) matched
/// by exact key against the call arguments. Candidates are
/// const-constructible so entity tables can be `const` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCandidate {
    pub method: HttpMethod,
    pub template: &'static str,
}

impl PathCandidate {
    pub const fn new(method: HttpMethod, template: &'static str) -> Self {
        Self { method, template }
    }

    pub const fn get(template: &'static str) -> Self {
        Self::new(HttpMethod::Get, template)
    }

    pub const fn post(template: &'static str) -> Self {
        Self::new(HttpMethod::Post, template)
    }

    pub const fn put(template: &'static str) -> Self {
        Self::new(HttpMethod::Put, template)
    }

    pub const fn delete(template: &'static str) -> Self {
        Self::new(HttpMethod::Delete, template)
    }
}

impl std::fmt::Display for PathCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}

/// A logical API operation: its endpoint shapes plus the parameter names
/// eligible for the JSON payload.
///
/// `params` mirrors the remote API schema. Arguments outside it still
/// participate in path substitution but never reach the payload.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Qualified name used in logs, e.g. `"hosts.create"`.
    pub name: &'static str,
    /// Endpoint shapes in preference order.
    pub candidates: &'static [PathCandidate],
    /// Parameter names eligible for the payload.
    pub params: &'static [&'static str],
}

/// Extracts the placeholder names of a template, in order.
///
/// Only complete `{name}` spans count; an unterminated brace contributes
/// nothing (and is later caught by the post-substitution check). An empty
/// `{}` yields an empty name, which no argument key can match.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                names.push(&after[..close]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    names
}

/// True if every placeholder in `template` has a key in `args`.
pub fn is_satisfiable(template: &str, args: &CallArguments) -> bool {
    placeholders(template)
        .iter()
        .all(|name| args.contains_key(*name))
}

/// Selects the first candidate whose placeholders are all satisfiable by
/// `args`, scanning in declaration order. Returns the candidate with its
/// template unsubstituted; `None` when no candidate fits.
pub fn select_path<'a>(
    candidates: &'a [PathCandidate],
    args: &CallArguments,
) -> Option<&'a PathCandidate> {
    candidates
        .iter()
        .find(|candidate| is_satisfiable(candidate.template, args))
}

/// Substitutes every placeholder that has a matching argument, leaving
/// unmatched placeholders (and malformed brace runs) verbatim.
pub fn substitute(template: &str, args: &CallArguments) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let braced = &rest[open..];
        match braced.find('}') {
            Some(close) => {
                let name = &braced[1..close];
                match args.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str(&braced[..=close]),
                }
                rest = &braced[close + 1..];
            }
            None => {
                out.push_str(braced);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// True if the string still carries any brace character. Stricter than
/// re-running [`placeholders`]: it also flags unterminated or degenerate
/// brace runs that substitution had to leave behind.
pub fn contains_placeholder_syntax(path: &str) -> bool {
    path.contains('{') || path.contains('}')
}
