use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Make a user-typed save name safe to join onto a directory, with Turkish
/// character support
/// - Maps Turkish letters: ç→c, ğ→g, ı→i, İ→I, ö→o, ş→s, ü→u
/// - Strips diacritics via Unicode NFD decomposition
/// - Keeps ASCII alphanumerics, `-`, `.`, `_`, `(`, `)` and single spaces
/// - Replaces path separators and other hostile characters with underscores
/// - Collapses separator runs and trims them from both ends
pub fn sanitize_file_name(input: &str) -> String {
    // Pre-allocate with input length as estimate
    let mut result = String::with_capacity(input.len());

    // Single pass through NFD-normalized characters
    for ch in input.nfd() {
        // Skip combining marks (diacritics)
        if is_combining_mark(ch) {
            continue;
        }

        // Map Turkish characters that are NOT handled by Unicode normalization
        // (ı, İ, ğ, Ğ, ş, Ş are unique codepoints, not composed)
        let mapped = match ch {
            // Turkish unique codepoints
            'ğ' => 'g',
            'ı' => 'i', // dotless i
            'ş' => 's',
            'Ğ' => 'G',
            'İ' => 'I', // dotted I
            'Ş' => 'S',
            _ => ch,
        };

        let ends_with_separator = matches!(result.chars().last(), Some(' ') | Some('_'));

        if mapped.is_whitespace() {
            if !ends_with_separator && !result.is_empty() {
                result.push(' ');
            }
        } else if mapped.is_ascii_alphanumeric() || matches!(mapped, '-' | '.' | '_' | '(' | ')') {
            result.push(mapped);
        } else if !mapped.is_control() {
            // Path separators, quotes, wildcards and the rest
            if !ends_with_separator && !result.is_empty() {
                result.push('_');
            }
        }
        // Skip control characters entirely
    }

    while matches!(result.chars().last(), Some(' ') | Some('_')) {
        result.pop();
    }

    result
}
