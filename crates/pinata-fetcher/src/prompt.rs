//! Prompt text per target language. Treated as opaque by the rest of the
//! crate; only the reply format it asks for matters to the parser.

use pinata_core::TargetLanguage;

/// (word, english, forms, sentence, translation) shown to the model as a
/// sample line
fn sample(language: TargetLanguage) -> (&'static str, &'static str, &'static str, &'static str, &'static str) {
    match language {
        TargetLanguage::Spanish => ("perro", "dog", r#"["perros"]"#, "El perro corre.", "The dog runs."),
        TargetLanguage::French => ("chien", "dog", r#"["chiens"]"#, "Le chien court.", "The dog runs."),
        TargetLanguage::Italian => ("cane", "dog", r#"["cani"]"#, "Il cane corre.", "The dog runs."),
        TargetLanguage::Japanese => ("犬", "dog", r#"["いぬ"]"#, "犬が走っている。", "The dog is running."),
        TargetLanguage::Korean => ("개", "dog", r#"["개들"]"#, "개가 달린다.", "The dog runs."),
        TargetLanguage::Chinese => ("狗", "dog", r#"["小狗"]"#, "狗在跑。", "The dog is running."),
        TargetLanguage::Hindi => ("कुत्ता", "dog", r#"["कुत्ते"]"#, "कुत्ता दौड़ता है।", "The dog runs."),
    }
}

pub fn system_prompt(language: TargetLanguage) -> String {
    format!(
        "You are a helpful assistant that analyzes images and lists vocabulary words in english and {language}."
    )
}

pub fn prompt_for(language: TargetLanguage) -> String {
    let (word, english, forms, sentence, translation) = sample(language);

    format!(
        r#"List the english and {language} vocabulary present in the attached image.
- Extract 7 words for visible objects, actions or themes, plus 2 words for the mood or atmosphere.
- Give the english translation and the word type (noun, verb, adjective, ...).
- Give a simplified phonetic pronunciation.
- For verbs give common conjugations; for nouns and adjectives give plural or gendered forms.
- Give each word's location as ["x%", "y%"] of the image width and height. Assume each word covers 10% width and 5% height and avoid overlaps.
- Use each word in a short sentence and translate the sentence to english.
Reply with one JSON object per line inside a single vocabulary block:
<vocabulary>
{{"type": "description", "wordType": "noun", "word": "{word}", "english": "{english}", "pronunciation": "...", "conjugations": {forms}, "sentence": "{sentence}", "translation": "{translation}", "location": ["12%", "15%"]}}
</vocabulary>
Answer quickly."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_asks_for_block() {
        for language in TargetLanguage::ALL {
            let prompt = prompt_for(language);
            assert!(prompt.contains(language.name()));
            assert!(prompt.contains("<vocabulary>") && prompt.contains("</vocabulary>"));
        }
    }

    #[test]
    fn test_sample_line_parses() {
        for language in TargetLanguage::ALL {
            let records = pinata_core::parse(&prompt_for(language));
            assert_eq!(records.len(), 1, "{language}");
            assert_eq!(records[0].english, "dog");
            assert!(records[0].location.is_some());
        }
    }
}
