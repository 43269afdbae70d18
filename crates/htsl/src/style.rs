//! Code style configuration.
//!
//! Controls how generated and inserted HTSL text is formatted. Implements
//! [`serde::Deserialize`] so a style can be loaded from an external config
//! file.
//!
//! # Example
//!
//! ```
//! # use htsl::CodeStyle;
//! let style = CodeStyle::default();
//! assert_eq!(style.indent(1), "    ");
//! ```

use serde::Deserialize;

/// Letter casing applied to written (non-symbolic) operator names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capitalization {
    Lowercase,
    Capitalized,
    Uppercase,
}

/// How a written operator name is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WrittenStyle {
    pub capitalization: Capitalization,
    pub quoted: bool,
}

impl Default for WrittenStyle {
    fn default() -> Self {
        Self {
            capitalization: Capitalization::Lowercase,
            quoted: false,
        }
    }
}

/// Symbolic (`+=`, `>=`) or written (`increment`, `greaterThanOrEquals`)
/// operator spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorStyle {
    Symbolic,
    Written(WrittenStyle),
}

/// Whether `%...%` placeholder amounts are wrapped in quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    Normal,
    Quoted,
}

/// Formatting options for generated HTSL.
///
/// Only freshly generated text follows the style; the transformer leaves
/// existing lines exactly as the author wrote them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeStyle {
    /// The indentation string for one nesting level.
    indent: String,

    /// Spelling of stat mutation operators.
    operation_style: OperatorStyle,

    /// Spelling of comparison operators.
    comparison_style: OperatorStyle,

    /// Rendering of `%...%` placeholder amounts.
    placeholder_style: PlaceholderStyle,

    /// Soft wrap threshold for condition lists.
    line_length: usize,

    /// Write the default `and` conditional mode instead of eliding it.
    explicit_conditional_and: bool,

    /// Put `} else {` on one line instead of starting a new one.
    inline_else: bool,

    /// End generated output with a newline.
    trailing_newline: bool,
}

impl CodeStyle {
    /// Spelling of stat mutation operators.
    pub fn operation_style(&self) -> OperatorStyle {
        self.operation_style
    }

    /// Spelling of comparison operators.
    pub fn comparison_style(&self) -> OperatorStyle {
        self.comparison_style
    }

    /// Rendering of `%...%` placeholder amounts.
    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.placeholder_style
    }

    /// Condition lists longer than this wrap onto their own lines.
    pub fn line_length(&self) -> usize {
        self.line_length
    }

    /// Whether the default `and` conditional mode is written out.
    pub fn explicit_conditional_and(&self) -> bool {
        self.explicit_conditional_and
    }

    /// Whether `else` shares a line with the closing brace before it.
    pub fn inline_else(&self) -> bool {
        self.inline_else
    }

    /// Whether generated output ends with a newline.
    pub fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// The indentation string for `depth` nesting levels.
    pub fn indent(&self, depth: usize) -> String {
        self.indent.repeat(depth)
    }
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            operation_style: OperatorStyle::Symbolic,
            comparison_style: OperatorStyle::Symbolic,
            placeholder_style: PlaceholderStyle::Normal,
            line_length: 80,
            explicit_conditional_and: false,
            inline_else: true,
            trailing_newline: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let style: CodeStyle = toml::from_str("indent = \"  \"").unwrap();
        assert_eq!(style.indent(2), "    ");
        assert_eq!(style.line_length(), 80);
        assert!(style.trailing_newline());
    }

    #[test]
    fn written_operator_style_deserializes() {
        let style: CodeStyle = toml::from_str(
            "operation_style = { written = { capitalization = \"uppercase\", quoted = true } }",
        )
        .unwrap();
        assert_eq!(
            style.operation_style(),
            OperatorStyle::Written(WrittenStyle {
                capitalization: Capitalization::Uppercase,
                quoted: true,
            })
        );
        assert_eq!(style.comparison_style(), OperatorStyle::Symbolic);
    }

    #[test]
    fn symbolic_is_spelled_as_a_bare_string() {
        let style: CodeStyle = toml::from_str("comparison_style = \"symbolic\"").unwrap();
        assert_eq!(style.comparison_style(), OperatorStyle::Symbolic);
    }
}
