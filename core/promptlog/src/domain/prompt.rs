//! ユーザープロンプトのドメイン型（補完 API に送る文字列）

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// 位置引数の単語列を空白 1 つで連結する。単語が無ければ None（stdin から読む）。
    pub fn from_words(words: &[String]) -> Option<Self> {
        if words.is_empty() {
            None
        } else {
            Some(Self(words.join(" ")))
        }
    }

    /// 前後の空白を除き、さらに末尾の `%` を除く（シェルが付ける改行無し出力の印対策）
    pub fn trimmed(&self) -> Self {
        Self(self.0.trim().trim_end_matches('%').to_string())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for Prompt {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words() {
        assert_eq!(Prompt::from_words(&[]), None);
        let words = vec!["What".to_string(), "is".to_string(), "Rust?".to_string()];
        assert_eq!(Prompt::from_words(&words).unwrap().as_str(), "What is Rust?");
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(Prompt::new("  hello %%").trimmed().as_str(), "hello ");
        assert_eq!(Prompt::new("hello\n").trimmed().as_str(), "hello");
        assert_eq!(Prompt::new("50% off").trimmed().as_str(), "50% off");
    }

    #[test]
    fn test_is_blank() {
        assert!(Prompt::new("").is_blank());
        assert!(Prompt::new(" \t").is_blank());
        assert!(!Prompt::new(" a ").is_blank());
    }
}
