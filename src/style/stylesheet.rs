//! Stylesheet and declaration parsing with `cssparser`.
//!
//! Only top-level style rules are kept. At-rules (`@media`, `@supports`,
//! `@import`, ...) are skipped whole, and a rule whose selector list does not
//! parse is dropped without disturbing the rules after it.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser, ToCss,
};
use selectors::parser::{ParseRelative, Selector, SelectorList};

use super::selector_impl::PageSelectors;

/// Properties the resolver tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Display,
    Visibility,
    Height,
    Width,
}

impl Property {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "display" => Some(Self::Display),
            "visibility" => Some(Self::Visibility),
            "height" => Some(Self::Height),
            "width" => Some(Self::Width),
            _ => None,
        }
    }
}

/// One tracked declaration, value lowercased and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: Property,
    pub value: String,
    pub important: bool,
}

/// CSS specificity as (ids, classes/attributes/pseudo-classes, types).
pub type Specificity = (u32, u32, u32);

fn unpack_specificity(selector: &Selector<PageSelectors>) -> Specificity {
    let spec = selector.specificity();
    // packed as (id << 20) | (class << 10) | elements
    ((spec >> 20) & 0x3FF, (spec >> 10) & 0x3FF, spec & 0x3FF)
}

/// A selector in the form `dom_query` matches, with its specificity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSelector {
    pub css: String,
    pub specificity: Specificity,
}

/// A style rule with at least one tracked declaration.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selectors: Vec<RuleSelector>,
    pub declarations: Vec<Declaration>,
}

/// Parse a stylesheet into its top-level style rules, in source order.
#[must_use]
pub fn parse_stylesheet(css: &str) -> Vec<StyleRule> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules = Vec::new();
    let mut rule_parser = TopLevelRuleParser { rules: &mut rules };

    for result in StyleSheetParser::new(&mut parser, &mut rule_parser) {
        if let Err((_, slice)) = result {
            tracing::trace!(rule = slice, "skipping stylesheet rule");
        }
    }
    rules
}

/// Parse the contents of a `style` attribute.
#[must_use]
pub fn parse_inline(css: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parse_declaration_list(&mut parser)
}

fn parse_declaration_list(input: &mut Parser<'_, '_>) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    let mut decl_parser = DeclarationListParser {
        declarations: &mut declarations,
    };
    // a bad declaration is skipped, the rest of the block still counts
    RuleBodyParser::new(input, &mut decl_parser).for_each(drop);
    declarations
}

/// Parser for top-level stylesheet rules.
struct TopLevelRuleParser<'a> {
    rules: &'a mut Vec<StyleRule>,
}

impl<'i> AtRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = Vec<RuleSelector>;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        parse_selector_list(input)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let declarations = parse_declaration_list(input);
        if !declarations.is_empty() {
            self.rules.push(StyleRule {
                selectors: prelude,
                declarations,
            });
        }
        Ok(())
    }
}

/// Parse a comma-separated list of selectors.
fn parse_selector_list<'i>(input: &mut Parser<'i, '_>) -> Result<Vec<RuleSelector>, ParseError<'i, ()>> {
    let location = input.current_source_location();
    let list = SelectorList::parse(&PageSelectors, input, ParseRelative::No)
        .map_err(|_| location.new_custom_error(()))?;

    Ok(list
        .slice()
        .iter()
        .map(|selector| RuleSelector {
            css: selector.to_css_string(),
            specificity: unpack_specificity(selector),
        })
        .collect())
}

struct DeclarationListParser<'a> {
    declarations: &'a mut Vec<Declaration>,
}

impl<'i> AtRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> DeclarationParser<'i> for DeclarationListParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let Some(property) = Property::from_name(&name) else {
            // untracked property: consume it so the body parser moves on
            while input.next().is_ok() {}
            return Ok(());
        };

        let start = input.position();
        let mut end = start;
        let mut important = false;
        while !input.is_exhausted() {
            if input.try_parse(cssparser::parse_important).is_ok() {
                important = true;
                break;
            }
            input.next()?;
            end = input.position();
        }

        let value = input.slice(start..end).trim().to_ascii_lowercase();
        if !value.is_empty() {
            self.declarations.push(Declaration {
                property,
                value,
                important,
            });
        }
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for DeclarationListParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
