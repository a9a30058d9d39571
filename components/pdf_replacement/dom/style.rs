/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use cssparser::{Delimiter, ParseError, Parser, ParserInput, ToCss, Token, serialize_identifier};

use super::DomError;

/// The declarations of an element's `style` attribute, in insertion order.
///
/// Property names are stored lowercased and values in their serialized form,
/// so every declaration reads back as exactly one declaration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parses the value of a `style` attribute. Declarations that do not
    /// parse are dropped.
    pub fn parse(input: &str) -> InlineStyle {
        let mut input = ParserInput::new(input);
        let mut input = Parser::new(&mut input);
        let mut style = InlineStyle::default();
        while !input.is_exhausted() {
            if let Ok((property, value)) =
                input.parse_until_after(Delimiter::Semicolon, declaration)
            {
                style.insert(property, value);
            }
        }
        style
    }

    pub fn get_property_value(&self, property: &str) -> Option<&str> {
        let property = property.trim();
        self.declarations
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value.as_str())
    }

    /// Setting an empty value removes the declaration, as `setProperty` does.
    /// Anything other than a single property name and a single value, such
    /// as a value carrying further declarations or `!important`, is a
    /// syntax error and leaves the style untouched.
    pub fn set_property(&mut self, property: &str, value: &str) -> Result<(), DomError> {
        let property = parse_entirely(property, property_name).ok_or(DomError::Syntax)?;
        if value.trim().is_empty() {
            self.declarations.retain(|(name, _)| *name != property);
            return Ok(());
        }

        let value = parse_property_value(value).ok_or(DomError::Syntax)?;
        self.insert(property, value);
        Ok(())
    }

    fn insert(&mut self, property: String, value: String) {
        match self
            .declarations
            .iter_mut()
            .find(|(name, _)| *name == property)
        {
            Some(declaration) => declaration.1 = value,
            None => self.declarations.push((property, value)),
        }
    }

    pub fn to_css_string(&self) -> String {
        self.declarations
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Serializes `value` if it parses as the value of one declaration.
pub(crate) fn parse_property_value(value: &str) -> Option<String> {
    parse_entirely(value, property_value)
}

fn parse_entirely<T>(
    input: &str,
    parse: impl for<'i, 't> FnOnce(&mut Parser<'i, 't>) -> Result<T, ParseError<'i, ()>>,
) -> Option<T> {
    let mut input = ParserInput::new(input);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(parse).ok()
}

fn declaration<'i>(input: &mut Parser<'i, '_>) -> Result<(String, String), ParseError<'i, ()>> {
    let property = property_name(input)?;
    input.expect_colon()?;
    Ok((property, property_value(input)?))
}

fn property_name<'i>(input: &mut Parser<'i, '_>) -> Result<String, ParseError<'i, ()>> {
    let ident = input.expect_ident()?.to_ascii_lowercase();
    let mut name = String::new();
    serialize_identifier(&ident, &mut name).map_err(|_| input.new_custom_error(()))?;
    Ok(name)
}

fn property_value<'i>(input: &mut Parser<'i, '_>) -> Result<String, ParseError<'i, ()>> {
    let mut value = String::new();
    serialize_component_values(input, &mut value)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(input.new_custom_error(()));
    }
    Ok(value.to_owned())
}

/// Writes the remaining component values of `input` to `dest`. Blocks are
/// always closed, and tokens that would end the declaration or the enclosing
/// rule are rejected.
fn serialize_component_values<'i>(
    input: &mut Parser<'i, '_>,
    dest: &mut String,
) -> Result<(), ParseError<'i, ()>> {
    loop {
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let closing = match token {
            Token::Semicolon |
            Token::Delim('!') |
            Token::CurlyBracketBlock |
            Token::CloseCurlyBracket |
            Token::CloseParenthesis |
            Token::CloseSquareBracket |
            Token::BadString(_) |
            Token::BadUrl(_) => return Err(input.new_custom_error(())),
            Token::Function(_) | Token::ParenthesisBlock => Some(')'),
            Token::SquareBracketBlock => Some(']'),
            _ => None,
        };

        token
            .to_css(dest)
            .map_err(|_| input.new_custom_error(()))?;
        if let Some(closing) = closing {
            input.parse_nested_block(|input| serialize_component_values(input, dest))?;
            dest.push(closing);
        }
    }
    Ok(())
}
