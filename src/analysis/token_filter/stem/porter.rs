//! Porter stemming algorithm implementation.
//!
//! This is the flavour of the Porter algorithm that lunr and elasticlunr use,
//! including the `bli → ble` and `logi → log` rules of the revised algorithm
//! and the trick of upper-casing a leading `y` so it is treated as a
//! consonant. Indexes built with it answer queries that were stemmed in the
//! browser by elasticlunr.
//!
//! # Algorithm
//!
//! 1. Plurals and -ed/-ing suffixes, terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! # Examples
//!
//! ```
//! use lunrdex::analysis::token_filter::stem::Stemmer;
//! use lunrdex::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("consistency"), "consist");
//! assert_eq!(stemmer.stem("relational"), "relat");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[(&str, &str)] = &[
    ("al", ""),
    ("ance", ""),
    ("ence", ""),
    ("er", ""),
    ("ic", ""),
    ("able", ""),
    ("ible", ""),
    ("ant", ""),
    ("ement", ""),
    ("ment", ""),
    ("ent", ""),
    ("ou", ""),
    ("ism", ""),
    ("ate", ""),
    ("iti", ""),
    ("ous", ""),
    ("ive", ""),
    ("ize", ""),
];

/// One element of a word shape, in the classic `[C](VC){m}[V]` notation.
#[derive(Clone, Copy, Debug)]
enum Part {
    /// A consonant followed by any run of non-vowels (`[^aeiou][^aeiouy]*`).
    Consonants,
    /// A vowel followed by any run of strict vowels (`[aeiouy][aeiou]*`).
    Vowels,
    OptConsonants,
    OptVowels,
    /// Exactly one `[aeiouy]`.
    Vowel,
    /// Exactly one `[^aeiouwxy]`.
    Final,
    End,
}

/// `[C]VC...`, measure greater than zero.
const MEASURE_GT0: &[Part] = &[Part::OptConsonants, Part::Vowels, Part::Consonants];
/// `[C]VC[V]`, measure exactly one.
const MEASURE_EQ1: &[Part] = &[
    Part::OptConsonants,
    Part::Vowels,
    Part::Consonants,
    Part::OptVowels,
    Part::End,
];
/// `[C]VCVC...`, measure greater than one.
const MEASURE_GT1: &[Part] = &[
    Part::OptConsonants,
    Part::Vowels,
    Part::Consonants,
    Part::Vowels,
    Part::Consonants,
];
/// The stem contains a vowel.
const HAS_VOWEL: &[Part] = &[Part::OptConsonants, Part::Vowel];
/// Consonant-vowel-consonant where the last consonant is not w, x or y.
const SHORT_CVC: &[Part] = &[Part::Consonants, Part::Vowel, Part::Final, Part::End];

fn is_strict_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_vowel(c: char) -> bool {
    is_strict_vowel(c) || c == 'y'
}

impl Part {
    /// Every position where this part can end when it starts at `pos`.
    fn ends(self, word: &[char], pos: usize) -> Vec<usize> {
        let run = |first: fn(char) -> bool, rest: fn(char) -> bool| -> Vec<usize> {
            match word.get(pos) {
                Some(&c) if first(c) => {
                    let mut end = pos + 1;
                    while end < word.len() && rest(word[end]) {
                        end += 1;
                    }
                    (pos + 1..=end).collect()
                }
                _ => Vec::new(),
            }
        };
        let consonants = || run(|c| !is_strict_vowel(c), |c| !is_vowel(c));
        let vowels = || run(is_vowel, is_strict_vowel);

        match self {
            Part::Consonants => consonants(),
            Part::Vowels => vowels(),
            Part::OptConsonants => std::iter::once(pos).chain(consonants()).collect(),
            Part::OptVowels => std::iter::once(pos).chain(vowels()).collect(),
            Part::Vowel => match word.get(pos) {
                Some(&c) if is_vowel(c) => vec![pos + 1],
                _ => Vec::new(),
            },
            Part::Final => match word.get(pos) {
                Some(&c) if !is_vowel(c) && !matches!(c, 'w' | 'x') => vec![pos + 1],
                _ => Vec::new(),
            },
            Part::End if pos == word.len() => vec![pos],
            Part::End => Vec::new(),
        }
    }
}

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    /// Check whether a prefix of `word` has the given shape.
    fn has_shape(word: &[char], shape: &[Part]) -> bool {
        Self::has_shape_from(word, shape, 0)
    }

    fn has_shape_from(word: &[char], shape: &[Part], pos: usize) -> bool {
        match shape.split_first() {
            None => true,
            Some((part, rest)) => part
                .ends(word, pos)
                .into_iter()
                .any(|end| Self::has_shape_from(word, rest, end)),
        }
    }

    fn ends_with(word: &[char], suffix: &str) -> bool {
        let suffix: Vec<char> = suffix.chars().collect();
        word.len() >= suffix.len() && word[word.len() - suffix.len()..] == suffix[..]
    }

    /// Find the longest suffix from `table` that leaves a non-empty stem.
    ///
    /// Returns the stem length and the replacement for that suffix.
    fn split_suffix(word: &[char], table: &[(&str, &'static str)]) -> Option<(usize, &'static str)> {
        (1..word.len()).find_map(|stem_len| {
            let suffix: String = word[stem_len..].iter().collect();
            table
                .iter()
                .find(|(candidate, _)| *candidate == suffix)
                .map(|(_, replacement)| (stem_len, *replacement))
        })
    }

    fn replace_tail(word: &mut Vec<char>, stem_len: usize, replacement: &str) {
        word.truncate(stem_len);
        word.extend(replacement.chars());
    }

    /// Step 1a: plurals.
    fn step1a(word: &mut Vec<char>) {
        let len = word.len();
        if (Self::ends_with(word, "sses") && len > 4) || (Self::ends_with(word, "ies") && len > 3)
        {
            word.truncate(len - 2);
        } else if len > 2 && word[len - 1] == 's' && word[len - 2] != 's' {
            word.truncate(len - 1);
        }
    }

    /// Step 1b: -eed, -ed and -ing.
    fn step1b(word: &mut Vec<char>) {
        let len = word.len();
        if Self::ends_with(word, "eed") && len > 3 {
            if Self::has_shape(&word[..len - 3], MEASURE_GT0) {
                word.pop();
            }
            return;
        }

        let stem_len = if Self::ends_with(word, "ed") && len > 2 {
            len - 2
        } else if Self::ends_with(word, "ing") && len > 3 {
            len - 3
        } else {
            return;
        };

        if !Self::has_shape(&word[..stem_len], HAS_VOWEL) {
            return;
        }
        word.truncate(stem_len);

        let len = word.len();
        if Self::ends_with(word, "at") || Self::ends_with(word, "bl") || Self::ends_with(word, "iz")
        {
            word.push('e');
        } else if len > 1
            && word[len - 1] == word[len - 2]
            && !matches!(word[len - 1], 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'l' | 's' | 'z')
        {
            word.pop();
        } else if Self::has_shape(word, SHORT_CVC) {
            word.push('e');
        }
    }

    /// Step 1c: terminal y after a consonant becomes i.
    fn step1c(word: &mut [char]) {
        let len = word.len();
        if len > 2 && word[len - 1] == 'y' && !is_strict_vowel(word[len - 2]) {
            word[len - 1] = 'i';
        }
    }

    /// Steps 2 and 3: map double suffixes to single ones when m > 0.
    fn map_suffix(word: &mut Vec<char>, table: &[(&str, &'static str)]) {
        if let Some((stem_len, replacement)) = Self::split_suffix(word, table) {
            if Self::has_shape(&word[..stem_len], MEASURE_GT0) {
                Self::replace_tail(word, stem_len, replacement);
            }
        }
    }

    /// Step 4: drop suffixes when m > 1.
    fn step4(word: &mut Vec<char>) {
        if let Some((stem_len, _)) = Self::split_suffix(word, STEP4_SUFFIXES) {
            if Self::has_shape(&word[..stem_len], MEASURE_GT1) {
                word.truncate(stem_len);
            }
            return;
        }

        let len = word.len();
        if len > 4 && Self::ends_with(word, "ion") && matches!(word[len - 4], 's' | 't') {
            let stem_len = len - 3;
            if Self::has_shape(&word[..stem_len], MEASURE_GT1) {
                word.truncate(stem_len);
            }
        }
    }

    /// Step 5: final -e and -ll.
    fn step5(word: &mut Vec<char>) {
        let len = word.len();
        if len > 1 && word[len - 1] == 'e' {
            let stem = &word[..len - 1];
            if Self::has_shape(stem, MEASURE_GT1)
                || (Self::has_shape(stem, MEASURE_EQ1) && !Self::has_shape(stem, SHORT_CVC))
            {
                word.pop();
            }
        }

        if Self::ends_with(word, "ll") && Self::has_shape(word, MEASURE_GT1) {
            word.pop();
        }
    }

    /// Measure of a word: the number of vowel-consonant sequences.
    #[cfg(test)]
    fn measure(word: &str) -> usize {
        let chars: Vec<char> = word.chars().collect();
        if Self::has_shape(&chars, MEASURE_GT1) {
            2
        } else if Self::has_shape(&chars, MEASURE_GT0) {
            1
        } else {
            0
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let mut chars: Vec<char> = word.chars().collect();
        if chars.len() < 3 {
            return word.to_string();
        }

        let leading_y = chars[0] == 'y';
        if leading_y {
            chars[0] = 'Y';
        }

        Self::step1a(&mut chars);
        Self::step1b(&mut chars);
        Self::step1c(&mut chars);
        Self::map_suffix(&mut chars, STEP2_SUFFIXES);
        Self::map_suffix(&mut chars, STEP3_SUFFIXES);
        Self::step4(&mut chars);
        Self::step5(&mut chars);

        if leading_y {
            chars[0] = 'y';
        }

        chars.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_stems(pairs: &[(&str, &str)]) {
        let stemmer = PorterStemmer::new();
        for (word, expected) in pairs {
            assert_eq!(stemmer.stem(word), *expected, "stem of {word}");
        }
    }

    #[test]
    fn test_porter_stemmer() {
        assert_stems(&[
            ("running", "run"),
            ("agreed", "agre"),
            ("relational", "relat"),
            ("consolation", "consol"),
            ("consistency", "consist"),
            ("conspicuously", "conspicu"),
            ("constable", "constabl"),
            ("documentation", "document"),
            ("indexes", "index"),
            ("keywords", "keyword"),
        ]);
    }

    #[test]
    fn test_step1_rules() {
        assert_stems(&[
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("cats", "cat"),
            ("knackeries", "knackeri"),
            ("knitted", "knit"),
            ("knives", "knive"),
            ("kneeling", "kneel"),
            ("try", "tri"),
            ("lay", "lay"),
        ]);
    }

    #[test]
    fn test_words_left_alone() {
        assert_stems(&[
            ("dragon", "dragon"),
            ("agent", "agent"),
            ("fake", "fake"),
            ("knocker", "knocker"),
            ("consolingly", "consolingli"),
            ("consolatory", "consolatori"),
            ("go", "go"),
            ("a", "a"),
        ]);
    }

    #[test]
    fn test_leading_y_is_a_consonant() {
        assert_stems(&[("yelling", "yell"), ("youth", "youth")]);
    }

    #[test]
    fn test_porter_measure() {
        assert_eq!(PorterStemmer::measure("tree"), 0);
        assert_eq!(PorterStemmer::measure("trees"), 1);
        assert_eq!(PorterStemmer::measure("trouble"), 1);
        assert_eq!(PorterStemmer::measure("troubles"), 2);
    }
}
