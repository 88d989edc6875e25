use std::fmt;
use std::num::ParseFloatError;

/// The value held by one grid cell.
///
/// `Empty` covers both never-written cells and cells explicitly cleared. A
/// `Text("")` is treated exactly like `Empty` everywhere, but the constructors
/// below never produce one.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Build a text cell, mapping the empty string to `Empty`.
    pub fn text(content: impl Into<String>) -> Self {
        let content = content.into();
        if content.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(content)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Numeric interpretation of the cell. Empty cells have none.
    pub fn parse_number(&self) -> Result<Option<f64>, ParseFloatError> {
        match self {
            CellValue::Empty => Ok(None),
            CellValue::Number(n) => Ok(Some(*n)),
            CellValue::Text(s) if s.is_empty() => Ok(None),
            CellValue::Text(s) => s.trim().parse::<f64>().map(Some),
        }
    }

    /// Textual form used for display and CSV output.
    pub fn to_content(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::text(s)
    }
}

// Convert 0-indexed column number to a column label (A, B, ..., Z, AA, etc.)
pub fn column_name(col: usize) -> String {
    let mut idx = col;
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    name
}

// Convert (row, col) to a spreadsheet-style name (A1, B2, etc.)
pub fn cell_name(row: usize, col: usize) -> String {
    format!("{}{}", column_name(col), row as u128 + 1)
}

// Convert a spreadsheet-style name to (row, col)
pub fn parse_cell_name(name: &str) -> Option<(usize, usize)> {
    let name = name.trim();
    let split = name
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(name.len());
    let (letters, digits) = name.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    let row = digits.parse::<usize>().ok()?;
    Some((row.checked_sub(1)?, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_constructor_maps_empty_string() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::from("abc"), CellValue::Text("abc".to_string()));
        assert!(CellValue::Text(String::new()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(CellValue::Empty.parse_number(), Ok(None));
        assert_eq!(CellValue::Number(2.5).parse_number(), Ok(Some(2.5)));
        assert_eq!(CellValue::text(" 42 ").parse_number(), Ok(Some(42.0)));
        assert_eq!(CellValue::text("1e3").parse_number(), Ok(Some(1000.0)));
        assert!(CellValue::text("abc").parse_number().is_err());
        assert!(CellValue::text("   ").parse_number().is_err());
    }

    #[test]
    fn test_to_content() {
        assert_eq!(CellValue::Number(5.0).to_content(), "5");
        assert_eq!(CellValue::Number(0.1).to_content(), "0.1");
        assert_eq!(CellValue::Number(-2.25).to_string(), "-2.25");
        assert_eq!(CellValue::Empty.to_content(), "");
        assert_eq!(CellValue::text("x y").to_content(), "x y");
    }

    #[test]
    fn test_cell_names() {
        assert_eq!(cell_name(0, 0), "A1");
        assert_eq!(cell_name(1, 25), "Z2");
        assert_eq!(cell_name(1, 27), "AB2");
        assert_eq!(parse_cell_name("A1"), Some((0, 0)));
        assert_eq!(parse_cell_name("ab2"), Some((1, 27)));
        assert_eq!(parse_cell_name(&cell_name(41, 701)), Some((41, 701)));
    }

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_cell_name_at_index_limit() {
        let name = cell_name(usize::MAX, usize::MAX);
        assert!(name.ends_with(&(usize::MAX as u128 + 1).to_string()));
        assert!(name.starts_with(&column_name(usize::MAX)));
    }

    #[test]
    fn test_parse_cell_name_rejects_malformed() {
        assert_eq!(parse_cell_name(""), None);
        assert_eq!(parse_cell_name("12"), None);
        assert_eq!(parse_cell_name("AB"), None);
        assert_eq!(parse_cell_name("A0"), None);
        assert_eq!(parse_cell_name("A1B"), None);
        assert_eq!(parse_cell_name("A-1"), None);
    }
}
