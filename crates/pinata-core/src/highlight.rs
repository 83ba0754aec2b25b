use regex::RegexBuilder;

use crate::types::Segment;

/// Split `text` into runs, emphasizing case-insensitive occurrences of any
/// target. Concatenating the runs gives back `text` exactly.
pub fn highlight<S: AsRef<str>>(text: &str, targets: &[S]) -> Vec<Segment> {
    let mut alternatives: Vec<&str> = targets
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .collect();

    if alternatives.is_empty() {
        return vec![Segment::plain(text)];
    }

    // Longest first, so "perros" wins over its prefix "perro"
    alternatives.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    alternatives.dedup();

    let pattern = alternatives
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");

    let matcher = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(matcher) => matcher,
        Err(e) => {
            tracing::warn!("Highlight pattern rejected, rendering plain text: {e}");
            return vec![Segment::plain(text)];
        }
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in matcher.find_iter(text) {
        if found.start() > last {
            segments.push(Segment::plain(&text[last..found.start()]));
        }
        segments.push(Segment::emphasized(found.as_str()));
        last = found.end();
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn emphasized(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .filter(|s| s.emphasized)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_marks_word_case_insensitively() {
        let segments = highlight("El Perro corre y el perro salta", &["perro"]);
        assert_eq!(
            segments,
            vec![
                Segment::plain("El "),
                Segment::emphasized("Perro"),
                Segment::plain(" corre y el "),
                Segment::emphasized("perro"),
                Segment::plain(" salta"),
            ]
        );
    }

    #[test]
    fn test_longer_form_wins() {
        let segments = highlight("Los perros corren", &["perro", "perros"]);
        assert_eq!(emphasized(&segments), vec!["perros"]);
    }

    #[test]
    fn test_no_targets_gives_whole_text() {
        let none: [&str; 0] = [];
        assert_eq!(highlight("El sol", &none), vec![Segment::plain("El sol")]);
        assert_eq!(highlight("El sol", &[""]), vec![Segment::plain("El sol")]);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let segments = highlight("I write C++ (a lot).", &["c++", "(a"]);
        assert_eq!(emphasized(&segments), vec!["C++", "(a"]);
    }

    #[test]
    fn test_unicode_case_folding() {
        let segments = highlight("ÁRBOL grande, árbol pequeño", &["árbol"]);
        assert_eq!(emphasized(&segments), vec!["ÁRBOL", "árbol"]);
    }

    #[test]
    fn test_whole_text_match() {
        assert_eq!(highlight("sol", &["SOL"]), vec![Segment::emphasized("sol")]);
    }

    #[test]
    fn test_reconstruction() {
        let cases: [(&str, &[&str]); 6] = [
            ("", &["perro"]),
            ("perro", &[]),
            ("El perro feo corre en el patio grande", &["perro", "perros"]),
            ("犬が走っている。", &["犬", "いぬ"]),
            ("a.b.c", &[".", "b"]),
            ("The dog runs. Dogs run.", &["dog"]),
        ];
        for (text, targets) in cases {
            assert_eq!(joined(&highlight(text, targets)), text);
        }
    }
}
