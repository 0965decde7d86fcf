//! Token category and modifier legend shared with the rendering host.
//!
//! The legend is fixed at compile time. Only `function` + `declaration` is ever
//! emitted; the remaining entries keep indices stable for hosts that expect the
//! full table.

use serde::Serialize;

/// Semantic token categories, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    /// `comment`
    Comment,
    /// `string`
    String,
    /// `keyword`
    Keyword,
    /// `number`
    Number,
    /// `regexp`
    Regexp,
    /// `operator`
    Operator,
    /// `namespace`
    Namespace,
    /// `type`
    Type,
    /// `struct`
    Struct,
    /// `class`
    Class,
    /// `interface`
    Interface,
    /// `enum`
    Enum,
    /// `typeParameter`
    TypeParameter,
    /// `function`
    Function,
    /// `method`
    Method,
    /// `decorator`
    Decorator,
    /// `macro`
    Macro,
    /// `variable`
    Variable,
    /// `parameter`
    Parameter,
    /// `property`
    Property,
    /// `label`
    Label,
}

impl TokenType {
    /// The name the host uses for this category.
    pub const fn as_str(self) -> &'static str {
        return match self {
            Self::Comment => "comment",
            Self::String => "string",
            Self::Keyword => "keyword",
            Self::Number => "number",
            Self::Regexp => "regexp",
            Self::Operator => "operator",
            Self::Namespace => "namespace",
            Self::Type => "type",
            Self::Struct => "struct",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::TypeParameter => "typeParameter",
            Self::Function => "function",
            Self::Method => "method",
            Self::Decorator => "decorator",
            Self::Macro => "macro",
            Self::Variable => "variable",
            Self::Parameter => "parameter",
            Self::Property => "property",
            Self::Label => "label",
        };
    }
}

/// Semantic token modifiers, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenModifier {
    /// `declaration`
    Declaration,
    /// `documentation`
    Documentation,
    /// `readonly`
    Readonly,
    /// `static`
    Static,
    /// `abstract`
    Abstract,
    /// `deprecated`
    Deprecated,
    /// `modification`
    Modification,
    /// `async`
    Async,
}

impl TokenModifier {
    /// The name the host uses for this modifier.
    pub const fn as_str(self) -> &'static str {
        return match self {
            Self::Declaration => "declaration",
            Self::Documentation => "documentation",
            Self::Readonly => "readonly",
            Self::Static => "static",
            Self::Abstract => "abstract",
            Self::Deprecated => "deprecated",
            Self::Modification => "modification",
            Self::Async => "async",
        };
    }
}

/// The category/modifier tables, indexed by position.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Modifiers; a modifier's bit is `1 << index`.
    pub token_modifiers: &'static [TokenModifier],
    /// Categories; a category is encoded as its index.
    pub token_types: &'static [TokenType],
}

/// The one legend every classification is emitted against.
pub const LEGEND: Legend = Legend {
    token_modifiers: &[
        TokenModifier::Declaration,
        TokenModifier::Documentation,
        TokenModifier::Readonly,
        TokenModifier::Static,
        TokenModifier::Abstract,
        TokenModifier::Deprecated,
        TokenModifier::Modification,
        TokenModifier::Async,
    ],
    token_types: &[
        TokenType::Comment,
        TokenType::String,
        TokenType::Keyword,
        TokenType::Number,
        TokenType::Regexp,
        TokenType::Operator,
        TokenType::Namespace,
        TokenType::Type,
        TokenType::Struct,
        TokenType::Class,
        TokenType::Interface,
        TokenType::Enum,
        TokenType::TypeParameter,
        TokenType::Function,
        TokenType::Method,
        TokenType::Decorator,
        TokenType::Macro,
        TokenType::Variable,
        TokenType::Parameter,
        TokenType::Property,
        TokenType::Label,
    ],
};

impl Legend {
    /// Bitset of the given modifiers. Modifiers missing from the legend contribute nothing.
    pub fn modifier_bits(&self, modifiers: &[TokenModifier]) -> u32 {
        return modifiers
            .iter()
            .filter_map(|m| return self.modifier_index(*m))
            .filter_map(|idx| return 1_u32.checked_shl(idx))
            .fold(0, |bits, bit| return bits | bit);
    }

    /// Position of `modifier` in the legend.
    pub fn modifier_index(&self, modifier: TokenModifier) -> Option<u32> {
        let idx = self.token_modifiers.iter().position(|m| return *m == modifier)?;
        return u32::try_from(idx).ok();
    }

    /// Position of `token_type` in the legend.
    pub fn type_index(&self, token_type: TokenType) -> Option<u32> {
        let idx = self.token_types.iter().position(|t| return *t == token_type)?;
        return u32::try_from(idx).ok();
    }
}
