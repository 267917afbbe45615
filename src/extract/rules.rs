//! Ordered, first-match-wins rule tables.
//!
//! A format declares a [`RuleTable`] of `(name, pattern, handler)` triples.
//! For each line the patterns are tried in declaration order and only the
//! first matching rule's handler runs. Handlers have side effects, so the
//! order of a table encodes precedence and must not be rearranged.
//!
//! Patterns are matched with [`Regex::captures`]; every built-in table anchors
//! its patterns with `^`.

use regex::{Captures, Regex};

use super::{Declarations, SourceFile};

/// A matched declaration that violates its own grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed(pub String);

impl Malformed {
    /// Create a new malformed-declaration reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Result of a rule handler.
pub type RuleResult = Result<(), Malformed>;

/// Everything a handler may look at or mutate for the current line.
pub struct Scan<'a> {
    /// The file being scanned and its declared kind.
    pub file: &'a SourceFile,
    /// The accumulator the handler appends to.
    pub decls: &'a mut Declarations,
    /// The full line, without its line terminator.
    pub line: &'a str,
}

/// A rule handler bound to extractor type `E`.
pub type Handler<E> = fn(&mut E, &mut Scan<'_>, &Captures<'_>) -> RuleResult;

/// One `(name, pattern, handler)` entry.
pub struct Rule<E> {
    name: &'static str,
    pattern: Regex,
    handler: Handler<E>,
}

impl<E> Rule<E> {
    /// Compile a rule. Patterns are static literals, so a bad one is a bug.
    ///
    /// # Panics
    ///
    /// Panics when `pattern` is not a valid regular expression.
    #[must_use]
    pub fn new(name: &'static str, pattern: &str, handler: Handler<E>) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("rule patterns are valid regular expressions"),
            handler,
        }
    }

    /// The rule name, used in trace output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// An ordered list of rules.
pub struct RuleTable<E> {
    rules: Vec<Rule<E>>,
}

impl<E> RuleTable<E> {
    /// Build a table; the vector order is the dispatch order.
    #[must_use]
    pub const fn new(rules: Vec<Rule<E>>) -> Self {
        Self {
            rules,
        }
    }

    /// Rule names in dispatch order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(Rule::name)
    }

    /// Run the first rule matching `line`.
    ///
    /// Returns the name of the rule that fired, if any.
    pub fn dispatch(
        &self,
        extractor: &mut E,
        file: &SourceFile,
        decls: &mut Declarations,
        line: &str,
    ) -> Result<Option<&'static str>, Malformed> {
        for rule in &self.rules {
            if let Some(captures) = rule.pattern.captures(line) {
                tracing::trace!("{}: rule `{}` matched {:?}", file.display(), rule.name, line);
                let mut scan = Scan {
                    file,
                    decls,
                    line,
                };
                (rule.handler)(extractor, &mut scan, &captures)?;
                return Ok(Some(rule.name));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DependencyItem;

    #[derive(Default)]
    struct Recorder {
        fired: Vec<&'static str>,
    }

    fn on_specific(rec: &mut Recorder, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        rec.fired.push("specific");
        scan.decls.require(DependencyItem::new("t:specific", &caps[1]));
        Ok(())
    }

    fn on_generic(rec: &mut Recorder, scan: &mut Scan<'_>, _caps: &Captures<'_>) -> RuleResult {
        rec.fired.push("generic");
        scan.decls.require(DependencyItem::new("t:generic", scan.line));
        Ok(())
    }

    fn on_bad(_rec: &mut Recorder, _scan: &mut Scan<'_>, _caps: &Captures<'_>) -> RuleResult {
        Err(Malformed::new("bad line"))
    }

    fn table() -> RuleTable<Recorder> {
        RuleTable::new(vec![
            Rule::new("specific", r"^@use\s+(\w+)", on_specific),
            Rule::new("generic", r"^@", on_generic),
            Rule::new("bad", r"^!", on_bad),
        ])
    }

    #[test]
    fn test_first_match_wins() {
        let table = table();
        let mut rec = Recorder::default();
        let file = SourceFile::default();
        let mut decls = Declarations::default();

        let fired = table.dispatch(&mut rec, &file, &mut decls, "@use foo").unwrap();
        assert_eq!(fired, Some("specific"));
        assert_eq!(rec.fired, vec!["specific"]);
        assert_eq!(decls.requires, vec![DependencyItem::new("t:specific", "foo")]);

        let fired = table.dispatch(&mut rec, &file, &mut decls, "@other").unwrap();
        assert_eq!(fired, Some("generic"));
        assert_eq!(rec.fired, vec!["specific", "generic"]);
    }

    #[test]
    fn test_no_match() {
        let table = table();
        let mut rec = Recorder::default();
        let mut decls = Declarations::default();
        let fired = table.dispatch(&mut rec, &SourceFile::default(), &mut decls, "plain").unwrap();
        assert_eq!(fired, None);
        assert!(decls.requires.is_empty());
    }

    #[test]
    fn test_handler_error_propagates() {
        let table = table();
        let mut rec = Recorder::default();
        let mut decls = Declarations::default();
        let err = table.dispatch(&mut rec, &SourceFile::default(), &mut decls, "!").unwrap_err();
        assert_eq!(err, Malformed::new("bad line"));
    }

    #[test]
    fn test_names_keep_order() {
        let names: Vec<_> = table().names().collect();
        assert_eq!(names, vec!["specific", "generic", "bad"]);
    }
}
