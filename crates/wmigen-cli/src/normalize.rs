/// Word-case a label: every letter that follows a non-letter is uppercased,
/// the rest are lowercased. NHTSA serves all-caps names; the dictionaries
/// carry them as `"Motor Coach Industries, Inc."`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_alpha = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if prev_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(ch);
            prev_is_alpha = false;
        }
    }
    out
}
