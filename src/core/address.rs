//! A1-style cell addressing
//!
//! All positions are 1-based, as they appear to a spreadsheet user.

/// Convert a 1-based column position to its letter form
///
/// Examples:
/// - 1 → A
/// - 26 → Z
/// - 27 → AA
/// - 702 → ZZ
pub fn column_letter(column: u32) -> String {
    debug_assert!(column >= 1, "column positions are 1-based");

    let mut result = String::new();
    let mut idx = column.saturating_sub(1);

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Inverse of [`column_letter`]; `None` for anything that is not plain letters
pub fn column_position(letters: &str) -> Option<u32> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, c| {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Single cell address, e.g. `(5, 2)` → `E2`
pub fn cell_address(column: u32, row: u32) -> String {
    format!("{}{}", column_letter(column), row)
}

/// Rectangular range, e.g. `A1:C10`
pub fn cell_range(first_column: u32, first_row: u32, last_column: u32, last_row: u32) -> String {
    format!(
        "{}:{}",
        cell_address(first_column, first_row),
        cell_address(last_column, last_row)
    )
}

/// Whole-column range, e.g. `E:E`
pub fn column_range(column: u32) -> String {
    let letter = column_letter(column);
    format!("{}:{}", letter, letter)
}

/// Qualify a reference with its worksheet: `'Ratio_51'!E:E`
pub fn sheet_reference(sheet: &str, reference: &str) -> String {
    format!("'{}'!{}", sheet.replace('\'', "''"), reference)
}
