//! Embedded static resources for statik.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `scaffold` - Files written by `setup` and `add` (layout, pages, stylesheet)
//! - `codegen` - The `main.go` entrypoint skeleton
//!
//! # Usage
//!
//! ```ignore
//! use embed::scaffold::{PAGE_TEMPL, PageVars};
//!
//! let source = PAGE_TEMPL.render(&PageVars {
//!     page: "about",
//!     symbol: "About",
//!     layout_import: "demo/views/layout",
//! });
//! ```

mod template;

pub use template::{NoVars, Template, TemplateVars};

pub mod scaffold {
    use super::{NoVars, Template, TemplateVars};

    /// Shared layout with the live-reload client.
    pub const LAYOUT_TEMPL: Template<NoVars> = Template::new(include_str!("scaffold/layout.templ"));

    pub const STYLES_CSS: Template<NoVars> = Template::new(include_str!("scaffold/styles.css"));

    /// Variables for home.templ.
    pub struct HomeVars<'a> {
        pub layout_import: &'a str,
    }

    impl TemplateVars for HomeVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__LAYOUT_IMPORT__", self.layout_import)
        }
    }

    pub const HOME_TEMPL: Template<HomeVars<'static>> =
        Template::new(include_str!("scaffold/home.templ"));

    /// Variables for page.templ.
    pub struct PageVars<'a> {
        pub page: &'a str,
        pub symbol: &'a str,
        pub layout_import: &'a str,
    }

    impl TemplateVars for PageVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__LAYOUT_IMPORT__", self.layout_import)
                .replace("__SYMBOL__", self.symbol)
                .replace("__PAGE__", self.page)
        }
    }

    pub const PAGE_TEMPL: Template<PageVars<'static>> =
        Template::new(include_str!("scaffold/page.templ"));
}

pub mod codegen {
    use super::{Template, TemplateVars};

    /// Variables for main.go.
    pub struct EntryVars<'a> {
        /// Import lines, one per page, already indented.
        pub imports: &'a str,
        /// `page{...}` literal lines, already indented.
        pub pages: &'a str,
        pub output_dir: &'a str,
        pub public_dir: &'a str,
    }

    impl TemplateVars for EntryVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__IMPORTS__", self.imports)
                .replace("__PAGES__", self.pages)
                .replace("__OUTPUT_DIR__", self.output_dir)
                .replace("__PUBLIC_DIR__", self.public_dir)
        }
    }

    pub const MAIN_GO: Template<EntryVars<'static>> =
        Template::new(include_str!("codegen/main.go.tmpl"));
}

#[cfg(test)]
mod tests {
    use super::scaffold::*;
    use super::*;

    #[test]
    fn test_layout_has_reload_client() {
        let layout = LAYOUT_TEMPL.render(&NoVars);
        assert!(layout.starts_with("package layout"));
        assert!(layout.contains("\"/ws\""));
        assert!(layout.contains("\"reload\""));
    }

    #[test]
    fn test_page_template() {
        let source = PAGE_TEMPL.render(&PageVars {
            page: "about",
            symbol: "About",
            layout_import: "demo/views/layout",
        });
        assert!(source.starts_with("package about\n"));
        assert!(source.contains("import \"demo/views/layout\""));
        assert!(source.contains("templ About()"));
        assert!(!source.contains("__"));
    }

    #[test]
    fn test_home_template() {
        let source = HOME_TEMPL.render(&HomeVars {
            layout_import: "demo/views/layout",
        });
        assert!(source.starts_with("package home\n"));
        assert!(source.contains("templ Home()"));
    }
}
