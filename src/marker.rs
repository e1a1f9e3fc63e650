use clap::ValueEnum;

/// Replacement text for `Marker::Hide`.
pub const MASK: &str = "***";

/// How a matched wordform is highlighted inside an example.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Marker {
    #[default]
    Upper,
    Hide,
    Bold,
    Ubold,
}

impl Marker {
    pub fn apply(self, wordform: &str) -> String {
        match self {
            Marker::Upper => wordform.to_uppercase(),
            Marker::Hide => MASK.to_string(),
            Marker::Bold => format!("**{wordform}**"),
            Marker::Ubold => format!("**{}**", wordform.to_uppercase()),
        }
    }

    /// Marks every occurrence of `wordforms` in `text`.
    ///
    /// Only whole words are marked: a wordform inside a longer word is left
    /// alone. Single left-to-right pass; at each position the longest matching
    /// wordform wins, and marked output is never scanned again.
    pub fn highlight(self, text: &str, wordforms: &[String]) -> String {
        let mut candidates: Vec<&str> = wordforms
            .iter()
            .map(String::as_str)
            .filter(|w| !w.is_empty())
            .collect();
        if candidates.is_empty() {
            return text.to_string();
        }
        candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        candidates.dedup();

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        let mut prev: Option<char> = None;
        while let Some(c) = rest.chars().next() {
            let at_word_start = !prev.is_some_and(char::is_alphanumeric);
            let matched = at_word_start
                .then(|| {
                    candidates.iter().find(|w| {
                        rest.starts_with(**w)
                            && !rest[w.len()..]
                                .chars()
                                .next()
                                .is_some_and(char::is_alphanumeric)
                    })
                })
                .flatten();
            match matched {
                Some(w) => {
                    out.push_str(&self.apply(w));
                    prev = w.chars().next_back();
                    rest = &rest[w.len()..];
                }
                None => {
                    out.push(c);
                    prev = Some(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        out
    }
}
