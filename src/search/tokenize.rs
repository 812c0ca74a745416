//! Text tokenization for indexing and classification.
//!
//! Two deliberately distinct policies live here. The indexing tokenizer treats
//! every non-alphanumeric character (including `-`) as a separator, so
//! documents are indexed on atomic words. The classifier tokenizer keeps `-`
//! as a token-continuation character so compound keywords like
//! `control-plane` survive as one token. Do not unify them: classification
//! keys on compound phrases, indexing keys on atomic words.

/// Tokenize text for indexing: maximal runs of Unicode letters and digits,
/// lowercased. Everything else is a separator and never appears in output.
pub fn tokenize(text: &str) -> Vec<String> {
    split_tokens(text, |c| c.is_alphanumeric())
}

/// Tokenize text for classification: like [`tokenize`], but `-` continues the
/// current token instead of ending it.
pub fn tokenize_compound(text: &str) -> Vec<String> {
    split_tokens(text, |c| c.is_alphanumeric() || c == '-')
}

fn split_tokens(text: &str, is_token_char: impl Fn(char) -> bool) -> Vec<String> {
    text.split(|c: char| !is_token_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
