//! Porter (1980) suffix-stripping stemmer.
//!
//! Operates on lowercase ASCII words. Words of two letters or fewer, and
//! words containing anything other than ASCII letters (numbers, non-Latin
//! scripts), are returned unchanged.

const STEP2_RULES: &[(&str, &str)] = &[
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

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

pub fn stem(word: &str) -> String {
    if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return word.to_string();
    }

    let mut w = Word {
        b: word.as_bytes().to_vec(),
    };
    w.step1a();
    w.step1b();
    w.step1c();
    w.step2();
    w.step3();
    w.step4();
    w.step5a();
    w.step5b();

    // Only ASCII bytes were ever written.
    String::from_utf8(w.b).unwrap_or_else(|_| word.to_string())
}

struct Word {
    b: Vec<u8>,
}

impl Word {
    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[..len]`.
    fn measure(&self, len: usize) -> usize {
        let mut n = 0;
        let mut i = 0;
        while i < len && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < len && !self.is_consonant(i) {
                i += 1;
            }
            if i >= len {
                return n;
            }
            while i < len && self.is_consonant(i) {
                i += 1;
            }
            n += 1;
            if i >= len {
                return n;
            }
        }
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.is_consonant(i))
    }

    fn ends_double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.is_consonant(len - 1)
    }

    /// consonant-vowel-consonant ending, where the last consonant is not w, x or y.
    fn ends_cvc(&self, len: usize) -> bool {
        len >= 3
            && self.is_consonant(len - 3)
            && !self.is_consonant(len - 2)
            && self.is_consonant(len - 1)
            && !matches!(self.b[len - 1], b'w' | b'x' | b'y')
    }

    fn ends(&self, suffix: &str) -> bool {
        self.b.ends_with(suffix.as_bytes())
    }

    fn last(&self) -> Option<u8> {
        self.b.last().copied()
    }

    fn replace_suffix(&mut self, suffix_len: usize, replacement: &str) {
        let keep = self.b.len() - suffix_len;
        self.b.truncate(keep);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    /// Applies the first rule whose suffix matches, if the remaining stem has
    /// measure greater than `min_measure`.
    fn apply_rules(&mut self, rules: &[(&str, &str)], min_measure: usize) {
        if let Some((suffix, replacement)) = rules.iter().find(|(suffix, _)| self.ends(suffix)) {
            let stem_len = self.b.len() - suffix.len();
            if self.measure(stem_len) > min_measure {
                self.replace_suffix(suffix.len(), replacement);
            }
        }
    }

    fn step1a(&mut self) {
        if self.ends("sses") || self.ends("ies") {
            self.replace_suffix(2, "");
        } else if self.ends("s") && !self.ends("ss") {
            self.replace_suffix(1, "");
        }
    }

    fn step1b(&mut self) {
        let len = self.b.len();
        if self.ends("eed") {
            if self.measure(len - 3) > 0 {
                self.replace_suffix(1, "");
            }
            return;
        }

        let suffix_len = if self.ends("ed") && self.has_vowel(len - 2) {
            2
        } else if self.ends("ing") && self.has_vowel(len - 3) {
            3
        } else {
            return;
        };
        self.replace_suffix(suffix_len, "");

        let len = self.b.len();
        if self.ends("at") || self.ends("bl") || self.ends("iz") {
            self.b.push(b'e');
        } else if self.ends_double_consonant(len)
            && !matches!(self.last(), Some(b'l' | b's' | b'z'))
        {
            self.b.pop();
        } else if self.measure(len) == 1 && self.ends_cvc(len) {
            self.b.push(b'e');
        }
    }

    fn step1c(&mut self) {
        let len = self.b.len();
        if self.ends("y") && self.has_vowel(len - 1) {
            self.b[len - 1] = b'i';
        }
    }

    fn step2(&mut self) {
        self.apply_rules(STEP2_RULES, 0);
    }

    fn step3(&mut self) {
        self.apply_rules(STEP3_RULES, 0);
    }

    fn step4(&mut self) {
        let Some(suffix) = STEP4_SUFFIXES.iter().find(|suffix| self.ends(suffix)) else {
            return;
        };
        let stem_len = self.b.len() - suffix.len();
        if *suffix == "ion" && !(stem_len > 0 && matches!(self.b[stem_len - 1], b's' | b't')) {
            return;
        }
        if self.measure(stem_len) > 1 {
            self.b.truncate(stem_len);
        }
    }

    fn step5a(&mut self) {
        if !self.ends("e") {
            return;
        }
        let stem_len = self.b.len() - 1;
        let m = self.measure(stem_len);
        if m > 1 || (m == 1 && !self.ends_cvc(stem_len)) {
            self.b.truncate(stem_len);
        }
    }

    fn step5b(&mut self) {
        let len = self.b.len();
        if self.ends("ll") && self.measure(len) > 1 {
            self.b.pop();
        }
    }
}
