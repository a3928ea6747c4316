//! Text tokenizer for course ranking

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Words carrying no topical signal: Portuguese and English function words,
/// plus academic terms that appear in most course names.
pub const STOP_WORDS: &[&str] = &[
    "de", "da", "do", "das", "dos", "em", "no", "na", "nos", "nas", "e", "ou", "o", "a", "os",
    "as", "um", "uma", "com", "por", "para", "que", "se", "ao", "pelo", "pela", "num", "dum",
    "duma", "the", "and", "of", "in", "to", "for", "licenciatura", "mestrado", "bacharel",
    "ciencias", "artes",
];

/// Tokens this short or shorter are dropped
const MIN_TOKEN_LEN: usize = 2;

/// Returns whether a (folded) token is a stop word
#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Strip diacritics and lowercase; anything outside `[a-z0-9]` becomes a space.
#[must_use]
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Split text into ranking tokens.
///
/// # Examples
/// ```
/// use admission_sim::core::ranking::tokenizer::tokenize;
///
/// assert_eq!(
///     tokenize("Licenciatura em Ciências da Computação"),
///     vec!["computacao"]
/// );
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    fold(text)
        .split_whitespace()
        .filter(|token| token.len() > MIN_TOKEN_LEN && !is_stop_word(token))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_case() {
        assert_eq!(fold("Ção"), "cao");
        assert_eq!(fold("Engenharia-Física!"), "engenharia fisica ");
    }

    #[test]
    fn drops_short_tokens_and_stop_words() {
        assert_eq!(
            tokenize("Gosto de resolver problemas e biologia"),
            vec!["gosto", "resolver", "problemas", "biologia"]
        );
        assert!(tokenize("de a o às").is_empty());
    }

    #[test]
    fn academic_terms_are_stop_words() {
        assert!(tokenize("Licenciatura Mestrado Artes Ciências").is_empty());
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(tokenize("Matemática 2025"), vec!["matematica", "2025"]);
    }

    #[test]
    fn non_latin_letters_split_tokens() {
        assert_eq!(tokenize("dados—análise"), vec!["dados", "analise"]);
    }
}
