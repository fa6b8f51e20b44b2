/// Groups a raw symbol sequence for display.
///
/// The standard 10-symbol code is grouped 4-4-2 (`XXXX-XXXX-XX`); any other
/// length gets a dash every 4 symbols. Callers depend on the 10-symbol
/// layout, so the special case stays even though the generic rule happens to
/// produce the same string for that length.
pub fn group_code(code: &str) -> String {
    let symbols: Vec<char> = code.chars().collect();

    if symbols.len() == 10 {
        let mut grouped = String::with_capacity(12);
        grouped.extend(&symbols[0..4]);
        grouped.push('-');
        grouped.extend(&symbols[4..8]);
        grouped.push('-');
        grouped.extend(&symbols[8..10]);
        return grouped;
    }

    let mut grouped = String::with_capacity(symbols.len() + symbols.len() / 4);
    for (i, chunk) in symbols.chunks(4).enumerate() {
        if i > 0 {
            grouped.push('-');
        }
        grouped.extend(chunk);
    }
    grouped
}

/// Removes display dashes from a code. Dash placement is not validated;
/// separators are pure presentation.
pub fn strip_separators(code: &str) -> String {
    code.chars().filter(|&c| c != '-').collect()
}
