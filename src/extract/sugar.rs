//! Sugar (`.sjs`) extractor.
//!
//! Sugar files declare their module with `@module NAME` and their
//! requirements with `@import`. Files written for the legacy language version
//! implicitly depend on the `extend` runtime; an `@feature sugar 2` line
//! anywhere in the file removes that dependency.

use regex::Captures;
use std::sync::LazyLock;

use super::rules::{Malformed, Rule, RuleResult, RuleTable, Scan};
use super::{Declarations, Extractor, SourceFile};
use crate::core::{DependencyItem, kinds};

/// Runtime module implicitly required by legacy Sugar files.
pub const LEGACY_RUNTIME: &str = "extend";

static RULES: LazyLock<RuleTable<Sugar>> = LazyLock::new(|| {
    RuleTable::new(vec![
        Rule::new("module", r"^@module\s+(\S+)", Sugar::on_module),
        Rule::new("sugar2", r"^@feature\s+sugar\s*[= ]\s*2.*$", Sugar::on_sugar2),
        Rule::new("import", r"^@import", Sugar::on_import),
    ])
});

/// Dependency extractor for Sugar files.
#[derive(Debug)]
pub struct Sugar {
    version: u8,
}

impl Default for Sugar {
    fn default() -> Self {
        Self {
            version: 1,
        }
    }
}

impl Sugar {
    fn on_module(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        let kind = scan.file.kind_or(kinds::JS_MODULE).to_string();
        scan.decls.provide(DependencyItem::new(kind, &caps[1]));
        Ok(())
    }

    fn on_sugar2(&mut self, _scan: &mut Scan<'_>, _caps: &Captures<'_>) -> RuleResult {
        self.version = 2;
        Ok(())
    }

    /// `@import a, b` or `@import x, y from a, b`: only the modules after
    /// `from` are dependencies, and only the first word of each entry counts.
    fn on_import(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        let matched = caps.get(0).map_or(0, |m| m.end());
        let mut rest = &scan.line[matched..];
        if let Some((_, modules)) = rest.split_once(" from ") {
            rest = modules;
        }

        let kind = scan.file.kind_or(kinds::JS_MODULE).to_string();
        for entry in rest.split(',') {
            if let Some(module) = entry.split_whitespace().next() {
                scan.decls.require(DependencyItem::new(kind.clone(), module));
            }
        }
        Ok(())
    }
}

impl Extractor for Sugar {
    fn format(&self) -> &'static str {
        "sjs"
    }

    fn begin_file(&mut self, _file: &SourceFile, _decls: &mut Declarations) {
        self.version = 1;
    }

    fn scan_line(
        &mut self,
        file: &SourceFile,
        decls: &mut Declarations,
        line: &str,
    ) -> Result<(), Malformed> {
        RULES.dispatch(self, file, decls, line).map(|_| ())
    }

    fn end_file(&mut self, file: &SourceFile, decls: &mut Declarations) {
        if self.version == 1 {
            decls.require_first(DependencyItem::new(
                file.kind_or(kinds::JS_MODULE),
                LEGACY_RUNTIME,
            ));
        }
    }
}
