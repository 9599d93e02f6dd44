/// Per-token normalization applied by a tokenizer
pub trait TokenPreProcess: Send + Sync {
    fn pre_process(&self, token: &str) -> String;
}

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Strips digits and common punctuation, then lowercases
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonPreprocessor;

impl CommonPreprocessor {
    fn is_stripped(c: char) -> bool {
        c.is_ascii_digit()
            || matches!(
                c,
                '.' | ':' | ',' | '"' | '\'' | '(' | ')' | '[' | ']' | '|' | '/' | '?' | '!' | ';'
            )
    }
}

impl TokenPreProcess for CommonPreprocessor {
    fn pre_process(&self, token: &str) -> String {
        token
            .chars()
            .filter(|c| !Self::is_stripped(*c))
            .collect::<String>()
            .to_lowercase()
    }
}

/// Whitespace tokenizer with an optional token preprocessor.
///
/// `Default` gives the configuration used for tweets : whitespace split
/// followed by [`CommonPreprocessor`]. Tokens left empty by the
/// preprocessor are dropped.
pub struct DefaultTokenizer {
    pre_process: Option<Box<dyn TokenPreProcess>>,
}

impl DefaultTokenizer {
    pub fn new() -> Self {
        Self { pre_process: None }
    }

    pub fn with_pre_processor(pre_process: Box<dyn TokenPreProcess>) -> Self {
        Self {
            pre_process: Some(pre_process),
        }
    }

    fn is_delimiter(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
    }
}

impl Default for DefaultTokenizer {
    fn default() -> Self {
        Self::with_pre_processor(Box::new(CommonPreprocessor))
    }
}

impl Tokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(Self::is_delimiter)
            .filter(|t| !t.is_empty())
            .map(|t| match &self.pre_process {
                Some(pre) => pre.pre_process(t),
                None => t.to_owned(),
            })
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_preprocessor_strips_and_lowercases() {
        let pre = CommonPreprocessor;

        assert_eq!(pre.pre_process("Hello!"), "hello");
        assert_eq!(pre.pre_process("(don't)"), "dont");
        assert_eq!(pre.pre_process("2024"), "");
        assert_eq!(pre.pre_process("#Rust"), "#rust");
    }

    #[test]
    fn default_tokenizer_splits_on_whitespace() {
        let tok = DefaultTokenizer::default();
        let tokens = tok.tokenize("Great  game\ttonight,\r\nTEAM 42 !");

        assert_eq!(tokens, vec!["great", "game", "tonight", "team"]);
    }

    #[test]
    fn raw_tokenizer_keeps_tokens_verbatim() {
        let tok = DefaultTokenizer::new();
        assert_eq!(tok.tokenize(" A, b. "), vec!["A,", "b."]);
    }

    #[test]
    fn empty_text_gives_no_tokens() {
        let tok = DefaultTokenizer::default();
        assert!(tok.tokenize("").is_empty());
        assert!(tok.tokenize(" \t ").is_empty());
    }
}
