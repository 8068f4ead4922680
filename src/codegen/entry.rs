//! Registry → `main.go` source text.
//!
//! Generation walks the registry's ordered page list, never a hash map, so
//! the same registry always yields byte-identical output.

use std::fmt::Write;

use crate::embed::codegen::{EntryVars, MAIN_GO};
use crate::page::{PageName, Registry};

const ALIAS_PREFIX: &str = "p_";

/// Project directories as seen from the project root, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirLayout {
    pub views: String,
    pub public: String,
    pub output: String,
}

impl Default for DirLayout {
    fn default() -> Self {
        Self {
            views: "views".into(),
            public: "public".into(),
            output: "output".into(),
        }
    }
}

/// One rendered page of the generated program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    /// Import alias, prefixed so it never shadows the program's own names.
    pub alias: String,
    /// Go import path of the page's package.
    pub import_path: String,
    /// Exported component function.
    pub symbol: String,
    /// `/` for home, `<p>/index` otherwise.
    pub route: String,
    /// Rendered file relative to the output directory.
    pub file: String,
}

impl PageEntry {
    pub fn new(page: &PageName, project: &str, views: &str) -> Self {
        let name = page.as_str();
        let (import_path, route, file) = if page.is_home() {
            (
                format!("{project}/{views}"),
                "/".to_string(),
                "index.html".to_string(),
            )
        } else {
            (
                format!("{project}/{views}/{name}"),
                format!("{name}/index"),
                format!("{name}/index.html"),
            )
        };

        Self {
            alias: format!("{ALIAS_PREFIX}{name}"),
            import_path,
            symbol: symbol_for(name),
            route,
            file,
        }
    }
}

/// Exported Go symbol for a page: first character upper-cased, rest kept.
///
/// Uses Unicode case mapping, so `über` becomes `Über` and `ß...` may
/// expand to more than one character.
pub fn symbol_for(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Entries for every registered page in registry order.
pub fn entries(registry: &Registry, dirs: &DirLayout) -> Vec<PageEntry> {
    registry
        .pages()
        .map(|page| PageEntry::new(&page, registry.project_name(), &dirs.views))
        .collect()
}

/// Generate the entrypoint source for `registry`.
///
/// Pure: the same registry and layout always give the same bytes.
pub fn generate(registry: &Registry, dirs: &DirLayout) -> String {
    let entries = entries(registry, dirs);

    let mut imports = String::new();
    let mut pages = String::new();
    for entry in &entries {
        let _ = writeln!(imports, "\t{} {:?}", entry.alias, entry.import_path);
        let _ = writeln!(
            pages,
            "\t\t{{route: {:?}, file: {:?}, component: {}.{}()}},",
            entry.route, entry.file, entry.alias, entry.symbol
        );
    }

    MAIN_GO.render(&EntryVars {
        imports: imports.trim_end_matches('\n'),
        pages: pages.trim_end_matches('\n'),
        output_dir: &dirs.output,
        public_dir: &dirs.public,
    })
}
