//! Glob-style matching for section names.
//!
//! The resolver treats section names as opaque strings. Consumers that give
//! meaning to patterns inside section names (shell globs in a schema, or
//! dotted module selectors like `[mypy-xknx.telegram.*]`) use these helpers.

use regex::Regex;

/// Shell-style glob over a whole section name: `*` matches any run of
/// characters, `?` matches exactly one.
#[derive(Debug, Clone)]
pub struct SectionPattern {
    regex: Regex,
}

impl SectionPattern {
    pub fn new(glob: &str) -> Self {
        let mut expr = String::from("^");
        for c in glob.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(&other.to_string())),
            }
        }
        expr.push('$');

        Self {
            // Every non-wildcard character is escaped, so the expression is always valid
            regex: Regex::new(&expr).expect("escaped glob is a valid regex"),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Dotted module selector in the type-checker style.
///
/// - `a.b` matches only `a.b`
/// - `a.b.*` matches `a.b` and every submodule of it
/// - `a.*.c` matches `a.<any single component>.c`
#[derive(Debug, Clone)]
pub struct ModulePattern {
    regex: Regex,
    components: usize,
    wildcards: usize,
    trailing_wildcard: bool,
}

impl ModulePattern {
    pub fn new(pattern: &str) -> Self {
        let components: Vec<&str> = pattern.split('.').collect();
        let last = components.len() - 1;
        let mut expr = String::from("^");
        let mut wildcards = 0;

        for (i, component) in components.iter().enumerate() {
            if *component == "*" {
                wildcards += 1;
                if i == last {
                    if i == 0 {
                        expr.push_str(".+");
                    } else {
                        expr.push_str(r"(\..+)?");
                    }
                    continue;
                }
                if i > 0 {
                    expr.push_str(r"\.");
                }
                expr.push_str(r"[^.]+");
            } else {
                if i > 0 {
                    expr.push_str(r"\.");
                }
                expr.push_str(&regex::escape(component));
            }
        }
        expr.push('$');

        Self {
            regex: Regex::new(&expr).expect("escaped module pattern is a valid regex"),
            components: components.len(),
            wildcards,
            trailing_wildcard: components[last] == "*",
        }
    }

    pub fn matches(&self, module: &str) -> bool {
        self.regex.is_match(module)
    }

    /// Ordering key, so later entries are more specific: concrete patterns
    /// after wildcard ones, longer after shorter, fewer wildcards after more,
    /// and a middle wildcard (`a.*.c`) after a trailing one (`a.b.*`).
    pub(crate) fn specificity(&self) -> (bool, usize, usize, bool) {
        (
            self.wildcards == 0,
            self.components,
            usize::MAX - self.wildcards,
            !self.trailing_wildcard,
        )
    }
}
