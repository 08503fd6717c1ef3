//! Positional filename matching against `$NAME` templates
//!
//! Every placeholder has a declared length, so a template describes exactly one
//! way to cut a filename: literals are compared character by character and each
//! placeholder swallows exactly `length` characters. There is no backtracking.

use crate::core::error::PatternError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A named, fixed-length placeholder declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
  pub name: String,
  pub length: usize,
}

impl Field {
  #[cfg(test)]
  pub fn new(name: impl Into<String>, length: usize) -> Self {
    Self {
      name: name.into(),
      length,
    }
  }
}

/// Field values recovered from a filename, in template order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
  values: Vec<(String, String)>,
}

impl MatchResult {
  /// Value bound to `field`, if the template contains it
  pub fn get(&self, field: &str) -> Option<&str> {
    self
      .values
      .iter()
      .find(|(name, _)| name == field)
      .map(|(_, value)| value.as_str())
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.values.len()
  }

  #[cfg(test)]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// (field, value) pairs in template order
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
  }
}

impl Serialize for MatchResult {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.values.len()))?;
    for (name, value) in &self.values {
      map.serialize_entry(name, value)?;
    }
    map.end()
  }
}

#[derive(Debug)]
enum Segment<'a> {
  Literal(char),
  Placeholder(&'a Field),
}

/// A template resolved against its field declarations
#[derive(Debug)]
pub struct Template<'a> {
  source: &'a str,
  segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
  /// Split `template` into literals and declared placeholders.
  ///
  /// At each `$` the longest declared field name the template continues with
  /// wins. When none does, the undeclared name is the run of ASCII
  /// alphanumerics following the `$`.
  pub fn parse(template: &'a str, fields: &'a [Field]) -> Result<Self, PatternError> {
    let chars: Vec<char> = template.chars().collect();
    let mut segments = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
      if chars[i] != '$' {
        segments.push(Segment::Literal(chars[i]));
        i += 1;
        continue;
      }

      let rest: String = chars[i + 1..].iter().collect();
      let declared = fields
        .iter()
        .filter(|f| !f.name.is_empty() && rest.starts_with(f.name.as_str()))
        .max_by_key(|f| f.name.chars().count());

      match declared {
        Some(field) => {
          segments.push(Segment::Placeholder(field));
          i += 1 + field.name.chars().count();
        }
        None => {
          let token: String = rest.chars().take_while(|c| c.is_ascii_alphanumeric()).collect();
          return Err(PatternError::UndefinedField {
            template: template.to_string(),
            field: token,
          });
        }
      }
    }

    Ok(Self {
      source: template,
      segments,
    })
  }

  /// Filename length once every placeholder is substituted with its declared length
  pub fn expected_len(&self) -> usize {
    self
      .segments
      .iter()
      .map(|s| match s {
        Segment::Literal(_) => 1,
        Segment::Placeholder(f) => f.length,
      })
      .sum()
  }

  /// Decompose `filename`, binding each placeholder to its substring
  pub fn decompose(&self, filename: &str) -> Result<MatchResult, PatternError> {
    let name: Vec<char> = filename.chars().collect();
    let expected = self.expected_len();
    if name.len() != expected {
      return Err(PatternError::LengthMismatch {
        template: self.source.to_string(),
        filename: filename.to_string(),
        expected,
        actual: name.len(),
      });
    }

    let mut result = MatchResult::default();
    let mut offset = 0;

    for segment in &self.segments {
      match segment {
        Segment::Literal(c) => {
          if name[offset] != *c {
            return Err(PatternError::LiteralMismatch {
              template: self.source.to_string(),
              filename: filename.to_string(),
              offset,
              expected: *c,
              found: name[offset],
            });
          }
          offset += 1;
        }
        Segment::Placeholder(field) => {
          let value: String = name[offset..offset + field.length].iter().collect();
          offset += field.length;

          match result.get(&field.name) {
            Some(previous) if previous != value => {
              return Err(PatternError::InconsistentField {
                template: self.source.to_string(),
                field: field.name.clone(),
                first: previous.to_string(),
                second: value,
              });
            }
            Some(_) => {}
            None => result.values.push((field.name.clone(), value)),
          }
        }
      }
    }

    Ok(result)
  }
}

/// Decompose `filename` against `template` using the declared `fields`.
///
/// Fails with `UndefinedField` before looking at the filename, then with
/// `LengthMismatch`, then with `LiteralMismatch` at the first differing literal.
pub fn match_pattern(filename: &str, template: &str, fields: &[Field]) -> Result<MatchResult, PatternError> {
  Template::parse(template, fields)?.decompose(filename)
}
