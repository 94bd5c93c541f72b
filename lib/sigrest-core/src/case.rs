//! Case conversion between the dashed "snake" form and camel/Pascal case.
//!
//! Resource names travel in snake form (`attribute-avs`) while convention
//! method names carry them in Pascal case (`listAttributeAvs`). The
//! separator is a field of [`CaseConverter`]; the free functions use
//! [`DEFAULT_SEPARATOR`].
//!
//! Only ASCII letters are case-mapped, everything else passes through.
//!
//! # Example
//!
//! ```
//! use sigrest_core::{CaseConverter, pascal_to_snake, snake_to_camel};
//!
//! assert_eq!(snake_to_camel("hello-world"), "helloWorld");
//! assert_eq!(pascal_to_snake("AttributeAvs"), "attribute-avs");
//!
//! let underscore = CaseConverter::new('_');
//! assert_eq!(underscore.pascal_to_snake("AttributeAvs"), "attribute_avs");
//! ```

/// Separator used by the free conversion functions.
pub const DEFAULT_SEPARATOR: char = '-';

/// Converts identifiers between snake, camel and Pascal case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseConverter {
    separator: char,
}

impl Default for CaseConverter {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl CaseConverter {
    /// Creates a converter using the given separator for the snake form.
    #[must_use]
    pub const fn new(separator: char) -> Self {
        Self { separator }
    }

    /// The snake-form separator.
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// `hello-world` → `helloWorld`.
    ///
    /// A separator is consumed only when a letter follows it.
    #[must_use]
    pub fn snake_to_camel(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == self.separator
                && let Some(next) = chars.next_if(char::is_ascii_alphabetic)
            {
                out.push(next.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }

        out
    }

    /// `hello-world` → `HelloWorld`.
    #[must_use]
    pub fn snake_to_pascal(&self, value: &str) -> String {
        upper_first(&self.snake_to_camel(value))
    }

    /// `helloWorld` → `hello-world`.
    ///
    /// Every uppercase letter gets its own separator, so `getHTML` becomes
    /// `get-h-t-m-l`.
    #[must_use]
    pub fn camel_to_snake(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + value.len() / 2);

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                out.push(self.separator);
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
        }

        out
    }

    /// `HelloWorld` → `hello-world`.
    #[must_use]
    pub fn pascal_to_snake(&self, value: &str) -> String {
        self.camel_to_snake(&lower_first(value))
    }
}

/// [`CaseConverter::snake_to_camel`] with the default separator.
#[must_use]
pub fn snake_to_camel(value: &str) -> String {
    CaseConverter::default().snake_to_camel(value)
}

/// [`CaseConverter::snake_to_pascal`] with the default separator.
#[must_use]
pub fn snake_to_pascal(value: &str) -> String {
    CaseConverter::default().snake_to_pascal(value)
}

/// [`CaseConverter::camel_to_snake`] with the default separator.
#[must_use]
pub fn camel_to_snake(value: &str) -> String {
    CaseConverter::default().camel_to_snake(value)
}

/// [`CaseConverter::pascal_to_snake`] with the default separator.
#[must_use]
pub fn pascal_to_snake(value: &str) -> String {
    CaseConverter::default().pascal_to_snake(value)
}

fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn lower_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
