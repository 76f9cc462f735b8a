//! Text normalisation for location matching.

/// Generic street-type words dropped from street names before matching.
pub(crate) const STREET_SUFFIXES: &[&str] = &[
    "street", "st", "avenue", "ave", "lane", "ln", "alley", "highway", "road", "rd", "ქუჩა", "ქ",
    "გამზირი", "გამზ", "შესახვევი", "შეს", "ჩიხი", "გზატკეცილი",
];

/// Trailing words of district names ("Vake District", "ვაკის რაიონი").
const DISTRICT_SUFFIXES: &[&str] = &["district", "რაიონი", "რ-ნი"];

/// Lowercases, maps punctuation to spaces and collapses whitespace.
///
/// Hyphens are kept: they are part of names like "Vazha-Pshavela".
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| match c {
            '\u{a0}' | '.' | ',' | ';' | ':' | '"' | '\'' | '(' | ')' | '«' | '»' | '„' | '“'
            | '”' | '/' => ' ',
            c => c,
        })
        .flat_map(char::to_lowercase)
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalised street name without its street-type words.
pub fn street_key(name: &str) -> String {
    strip_words(&normalize(name), STREET_SUFFIXES)
}

/// Normalised district name without its trailing "district" word.
pub fn district_stem(name: &str) -> String {
    strip_words(&normalize(name), DISTRICT_SUFFIXES)
}

fn strip_words(normalized: &str, words: &[&str]) -> String {
    let kept: Vec<&str> = normalized
        .split(' ')
        .filter(|word| !words.contains(word))
        .collect();
    if kept.is_empty() {
        normalized.to_string()
    } else {
        kept.join(" ")
    }
}

/// Byte offsets of every whole-word occurrence of `needle` in `haystack`.
///
/// Both arguments must already be normalised, so word boundaries are
/// spaces or the ends of the string.
pub fn find_word_matches(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack
        .match_indices(needle)
        .map(|(start, _)| (start, start + needle.len()))
        .filter(|&(start, end)| {
            let before_ok = start == 0 || haystack[..start].ends_with(' ');
            let after_ok = end == haystack.len() || haystack[end..].starts_with(' ');
            before_ok && after_ok
        })
        .collect()
}
