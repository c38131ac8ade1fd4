#[must_use]
pub fn index_to_col_name(index: usize) -> String {
    let mut col_name = String::new();
    let mut n = index;

    while n > 0 {
        let remainder = (n - 1) % 26;
        col_name.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    if col_name.is_empty() {
        col_name.push('A');
    }

    col_name
}

// Format cell reference (e.g., A1, B2)
#[must_use]
pub fn cell_reference(cell: (usize, usize)) -> String {
    format!("{}{}", index_to_col_name(cell.1), cell.0)
}

/// Join the words of `s` in upper camel case.
///
/// Any character that is not alphanumeric separates words, and runs of
/// separators count as one. The first character of every word is
/// upper-cased; the rest is kept as written, so `"URL path"` becomes
/// `"URLPath"`. Leading digits are kept: `"2024 budget"` becomes
/// `"2024Budget"`.
#[must_use]
pub fn camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for word in s.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    result
}

/// [`camel_case`] with only the very first character lower-cased.
#[must_use]
pub fn lower_camel_case(s: &str) -> String {
    let upper = camel_case(s);
    let mut chars = upper.chars();

    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
