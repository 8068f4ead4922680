//! Template types for typed variable injection.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    /// Substitute this set's placeholders into `content`.
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
///
/// Placeholders are `__UPPER_SNAKE__` markers that cannot collide with
/// Go, templ or CSS syntax.
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Placeholder-free content, e.g. the stylesheet.
pub struct NoVars;

impl TemplateVars for NoVars {
    fn apply(&self, content: &str) -> String {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting<'a> {
        name: &'a str,
    }

    impl TemplateVars for Greeting<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__NAME__", self.name)
        }
    }

    #[test]
    fn test_render_substitutes() {
        const T: Template<Greeting<'static>> = Template::new("hello __NAME__, __NAME__");
        assert_eq!(T.render(&Greeting { name: "demo" }), "hello demo, demo");
    }

    #[test]
    fn test_no_vars() {
        const T: Template<NoVars> = Template::new("/* css */");
        assert_eq!(T.render(&NoVars), "/* css */");
    }
}
