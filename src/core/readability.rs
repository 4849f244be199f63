/// Flesch-style reading-ease approximation. Vowel counts stand in for
/// syllables and `.` `!` `?` delimit sentences; the counting rules are
/// kept exactly as-is so scores line up with existing history renders.
pub fn score(text: &str) -> Option<f64> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    let sentences = text
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count()
        .max(1);
    let syllables: usize = words
        .iter()
        .map(|word| word.chars().filter(is_vowel).count())
        .sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    let flesch = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    Some((flesch * 10.0).round() / 10.0)
}

fn is_vowel(c: &char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// One-decimal rendering with `-` standing in for unscorable text.
pub fn display(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.1}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_text_is_unscorable() {
        assert_eq!(score(""), None);
        assert_eq!(score("   \n\t  "), None);
        assert_eq!(display(None), "-");
    }

    #[test]
    fn hello_world_scores_as_expected() {
        // 2 words, 1 sentence, 3 vowels:
        // 206.835 - 1.015 * 2 - 84.6 * 1.5 = 77.905 -> 77.9
        let value = score("Hello world.").unwrap();
        assert!((value - 77.9).abs() < 1e-9);
        assert_eq!(display(Some(value)), "77.9");
    }

    #[test]
    fn sentences_floor_at_one_without_punctuation() {
        assert_eq!(score("Hello world"), score("Hello world."));
    }

    #[test]
    fn punctuation_marks_each_count_as_a_sentence() {
        // 4 words, 2 sentences, 6 vowels:
        // 206.835 - 1.015 * 2 - 84.6 * 1.5 = 77.905 -> 77.9
        let value = score("Hello world. Nice day!").unwrap();
        assert!((value - 77.9).abs() < 1e-9);
    }

    #[test]
    fn vowelless_text_still_scores() {
        // 1 word, 1 sentence, 0 vowels:
        // 206.835 - 1.015 - 0 = 205.82 -> 205.8
        let value = score("Hmm.").unwrap();
        assert!((value - 205.8).abs() < 1e-9);
    }

    #[test]
    fn score_is_rounded_to_one_decimal() {
        let value = score("A bright idea arrives today, ready to share with everyone.").unwrap();
        assert_eq!(value, (value * 10.0).round() / 10.0);
    }
}
