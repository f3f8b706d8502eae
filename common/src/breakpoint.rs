use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;

use crate::{BUCKET_NAME_REGEX, theme::ConfigurationError};

static BUCKET_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BUCKET_NAME_REGEX).expect("bucket name pattern failed to compile"));

pub const BASE: &str = "base";

// css px per em for the breakpoint widths; media queries resolve em against the initial font
// size, not the root element's
pub const PX_PER_EM: f64 = 16.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoint {
    pub name: String,
    pub min_width: f64,
}

/// Named minimum viewport widths in ascending order; `base` is always first, at 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoints(Vec<Breakpoint>);

impl Default for Breakpoints {
    fn default() -> Self {
        Breakpoints(vec![Breakpoint {
            name: BASE.to_owned(),
            min_width: 0.0,
        }])
    }
}

pub fn parse_width(value: &str) -> Option<f64> {
    let value = value.trim();

    let (number, scale) = if let Some(v) = value.strip_suffix("rem") {
        (v, PX_PER_EM)
    } else if let Some(v) = value.strip_suffix("em") {
        (v, PX_PER_EM)
    } else if let Some(v) = value.strip_suffix("px") {
        (v, 1.0)
    } else if value == "0" {
        (value, 1.0)
    } else {
        return None;
    };

    let number: f64 = number.trim().parse().ok()?;

    (number.is_finite() && number >= 0.0).then_some(number * scale)
}

impl Breakpoints {
    pub fn from_config(table: &BTreeMap<String, String>) -> Result<Self, ConfigurationError> {
        let mut points = Vec::with_capacity(table.len() + 1);

        for (name, width) in table {
            let key = format!("breakpoints.{name}");

            if !BUCKET_NAME.is_match(name) {
                return Err(ConfigurationError::InvalidBreakpoint {
                    key,
                    reason: "names may only contain letters, digits, '_' and '-'".to_owned(),
                });
            }

            let min_width = parse_width(width).ok_or_else(|| ConfigurationError::InvalidBreakpoint {
                key: key.clone(),
                reason: format!("{width:?} is not a width in px, em or rem"),
            })?;

            if name == BASE && min_width != 0.0 {
                return Err(ConfigurationError::InvalidBreakpoint {
                    key,
                    reason: "base must start at 0".to_owned(),
                });
            }

            points.push(Breakpoint {
                name: name.clone(),
                min_width,
            });
        }

        if !table.contains_key(BASE) {
            points.push(Breakpoint {
                name: BASE.to_owned(),
                min_width: 0.0,
            });
        }

        points.sort_by(|a, b| a.min_width.total_cmp(&b.min_width));

        for pair in points.windows(2) {
            if pair[0].min_width == pair[1].min_width {
                return Err(ConfigurationError::InvalidBreakpoint {
                    key: format!("breakpoints.{}", pair[1].name),
                    reason: format!("same width as {}", pair[0].name),
                });
            }
        }

        Ok(Breakpoints(points))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|bp| bp.name.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|bp| bp.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Breakpoint> {
        self.0.iter().find(|bp| bp.name == name)
    }

    // the largest bucket whose minimum fits the width; widths the browser can't report
    // sensibly fall into base
    pub fn bucket_for(&self, width: f64) -> &str {
        self.0
            .iter()
            .rev()
            .find(|bp| width >= bp.min_width)
            .map(|bp| bp.name.as_str())
            .unwrap_or(BASE)
    }
}

/// A per-bucket value with mobile-first fallback.
///
/// A bucket without its own entry takes the entry of the nearest smaller bucket, so
/// `{ base: a, md: b }` resolves to `a` at `sm` and to `b` at `lg`.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointValue<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for BreakpointValue<T> {
    fn default() -> Self {
        BreakpointValue {
            entries: Vec::new(),
        }
    }
}

impl<T> BreakpointValue<T> {
    pub fn new() -> Self {
        BreakpointValue::default()
    }

    pub fn with(mut self, bucket: impl Into<String>, value: T) -> Self {
        self.set(bucket, value);
        self
    }

    pub fn set(&mut self, bucket: impl Into<String>, value: T) {
        let bucket = bucket.into();

        match self.entries.iter_mut().find(|(b, _)| *b == bucket) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((bucket, value)),
        }
    }

    pub fn get(&self, bucket: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(b, _)| b == bucket)
            .map(|(_, v)| v)
    }

    pub fn resolve(&self, bucket: &str, breakpoints: &Breakpoints) -> Option<&T> {
        let index = breakpoints.index_of(bucket)?;

        breakpoints.0[..=index]
            .iter()
            .rev()
            .find_map(|bp| self.get(&bp.name))
    }
}
