use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the raw value stored in a cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.parse().ok(),
            CellValue::Empty => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// Parse raw input (e.g. a CSV field) to determine the value type
///
/// Formulas are not evaluated; input starting with `=` is kept as text.
pub fn parse_cell_input(input: &str) -> CellValue {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return CellValue::Empty;
    }

    // Boolean
    match trimmed.to_uppercase().as_str() {
        "TRUE" => return CellValue::Boolean(true),
        "FALSE" => return CellValue::Boolean(false),
        _ => {}
    }

    // Number
    if let Ok(num) = trimmed.parse::<f64>() {
        if num.is_finite() {
            return CellValue::Number(num);
        }
    }

    // Percentage
    if let Some(body) = trimmed.strip_suffix('%') {
        if let Ok(num) = body.trim_end().parse::<f64>() {
            return CellValue::Number(num / 100.0);
        }
    }

    CellValue::Text(trimmed.to_string())
}
