//! Minimal `{{ name }}` substitution, mostly used to specialize kernel sources by element type.

use std::{collections::HashMap, fmt::Display, iter::Peekable, str::Chars};
use crate::error::{Error, Result};

/// Values substituted into a [`Template`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    subst: HashMap<String, String>
}

impl Params {
    #[inline(always)]
    pub fn new () -> Self {
        Self::default()
    }

    /// Sets `name` to the displayed form of `value`, replacing any previous value.
    #[inline]
    pub fn set (&mut self, name: impl Into<String>, value: impl Display) -> &mut Self {
        self.subst.insert(name.into(), value.to_string());
        self
    }

    #[inline]
    pub fn get (&self, name: &str) -> Result<&str> {
        match self.subst.get(name) {
            Some(x) => Ok(x),
            None => Err(Error::Template(format!("No variable named '{name}'")))
        }
    }
}

pub struct Template;

impl Template {
    /// Replaces every `{{ name }}` in `source` with its value in `params`.
    pub fn build (source: &str, params: &Params) -> Result<String> {
        let mut chars = source.chars().peekable();
        let mut result = String::with_capacity(source.len());

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    let name = read_variable(&mut chars)?;
                    result.push_str(params.get(&name)?);
                },
                other => result.push(other)
            }
        }

        Ok(result)
    }
}

fn read_variable (chars: &mut Peekable<Chars<'_>>) -> Result<String> {
    skip_whitespace(chars);

    let mut name = String::new();
    while let Some(c) = chars.peek() {
        if c.is_whitespace() || *c == '}' {
            break;
        }

        name.push(*c);
        chars.next();
    }

    skip_whitespace(chars);
    if name.is_empty() || chars.next() != Some('}') || chars.next() != Some('}') {
        return Err(malformed());
    }

    Ok(name)
}

#[inline]
fn skip_whitespace (chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

#[inline(always)]
fn malformed () -> Error {
    Error::Template(String::from("Malformed template"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params () -> Params {
        let mut params = Params::new();
        params.set("type", "int");
        params
    }

    #[test]
    fn build () {
        let mut params = params();
        params.set("i", 1234).set("d", format_args!("{:.6}", 0.123456789));

        let s = Template::build("void fn({{ type }} type) { {{ i }}, {{ d }} }", &params).unwrap();
        assert_eq!(s, "void fn(int type) { 1234, 0.123457 }");
    }

    #[test]
    fn tight_braces () {
        assert_eq!(Template::build("{{type}}*", &params()).unwrap(), "int*");
    }

    #[test]
    fn single_braces_are_text () {
        assert_eq!(Template::build("{ x } }}", &params()).unwrap(), "{ x } }}");
    }

    #[test]
    fn non_existing_var () {
        let err = Template::build("void fn({{ type-asdf }} type);", &params()).unwrap_err();
        assert_eq!(err.to_string(), "No variable named 'type-asdf'");
    }

    #[test]
    fn no_var_name () {
        let err = Template::build("void fn({{ }} type);", &params()).unwrap_err();
        assert_eq!(err.to_string(), "Malformed template");
    }

    #[test]
    fn not_closed () {
        let err = Template::build("void fn({{", &params()).unwrap_err();
        assert_eq!(err.to_string(), "Malformed template");

        let err = Template::build("{{ type } x", &params()).unwrap_err();
        assert_eq!(err.to_string(), "Malformed template");
    }

    #[test]
    fn empty () {
        assert_eq!(Template::build("", &Params::new()).unwrap(), "");
    }
}
