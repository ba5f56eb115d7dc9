//! Rule-based English lemmatizer.
//!
//! Reduces inflected nouns and verbs to a dictionary base form: irregular
//! forms come from a lookup table, regular ones go through suffix rules for
//! plurals (`-s`, `-es`, `-ies`) and verb inflections (`-ed`, `-ing`) with the
//! usual spelling repairs (undoubling `stopp` → `stop`, restoring a silent
//! `e` in `updat` → `update`).
//!
//! Rules are reapplied until the word stops changing (`settings` → `setting`
//! → `set`), so every output is a fixed point and lemmatizing twice is the
//! same as once.

use std::collections::{HashMap, HashSet};

const IRREGULAR: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("did", "do"),
    ("does", "do"),
    ("done", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("got", "get"),
    ("gotten", "get"),
    ("made", "make"),
    ("paid", "pay"),
    ("said", "say"),
    ("sent", "send"),
    ("spent", "spend"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("came", "come"),
    ("saw", "see"),
    ("seen", "see"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("told", "tell"),
    ("found", "find"),
    ("lost", "lose"),
    ("kept", "keep"),
    ("left", "leave"),
    ("felt", "feel"),
    ("held", "hold"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("built", "build"),
    ("stuck", "stick"),
    ("understood", "understand"),
    ("wrote", "write"),
    ("written", "write"),
    ("ran", "run"),
    ("began", "begin"),
    ("begun", "begin"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("froze", "freeze"),
    ("frozen", "freeze"),
    ("used", "use"),
    ("using", "use"),
    ("uses", "use"),
    ("changed", "change"),
    ("changing", "change"),
    ("cancelled", "cancel"),
    ("cancelling", "cancel"),
    ("focused", "focus"),
    ("focusing", "focus"),
    ("died", "die"),
    ("dying", "die"),
    ("tied", "tie"),
    ("lied", "lie"),
    ("lying", "lie"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("buses", "bus"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
];

/// Words that look inflected but are already base forms.
const INVARIANT: &[&str] = &[
    "always", "perhaps", "news", "series", "species", "lens", "chaos", "canvas", "atlas", "bias",
    "alias", "sms", "ios", "yes", "its", "this", "plus", "thus", "gas", "bus", "his", "hers",
    "ours", "yours", "theirs", "whereas", "besides", "hundred", "amazing", "interesting",
    "boring", "annoying", "disappointing", "frustrating", "confusing", "outstanding", "existing",
    "pending", "morning", "evening", "nothing", "something", "anything", "everything",
    "ceiling", "during", "wedding",
];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    invariant: HashSet<&'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_vowel_at(chars: &[char], i: usize) -> bool {
    match chars[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => true,
        'y' => i > 0 && !is_vowel_at(chars, i - 1),
        _ => false,
    }
}

fn has_vowel(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    (0..chars.len()).any(|i| is_vowel_at(&chars, i))
}

/// Number of vowel-consonant sequences, as in Porter's `m`.
fn measure(word: &str) -> usize {
    let chars: Vec<char> = word.chars().collect();
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..chars.len() {
        let vowel = is_vowel_at(&chars, i);
        if prev_vowel && !vowel {
            m += 1;
        }
        prev_vowel = vowel;
    }
    m
}

/// Ends consonant-vowel-consonant where the final consonant is not w, x or y.
fn ends_cvc(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    n >= 3
        && !is_vowel_at(&chars, n - 3)
        && is_vowel_at(&chars, n - 2)
        && !is_vowel_at(&chars, n - 1)
        && !matches!(chars[n - 1], 'w' | 'x' | 'y')
}

fn ends_double_consonant(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 2
        && bytes[n - 1] == bytes[n - 2]
        && !matches!(bytes[n - 1], b'a' | b'e' | b'i' | b'o' | b'u' | b'l' | b's' | b'z')
}

/// `suffix` preceded by a consonant.
fn ends_consonant_then(word: &str, suffix: &str) -> bool {
    word.strip_suffix(suffix)
        .and_then(|rest| rest.chars().last())
        .is_some_and(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

/// Stem endings that drop a silent `e` before `-ed` / `-ing`.
const E_AFTER: &[&str] = &[
    "bl", "iz", "v", "z", "uc", "rc", "rg", "dg", "anc", "enc", "uir", "rs", "clin", "vid",
    "cid",
];

/// Same, but only when the ending follows a consonant (`updat`, not `treat`).
const E_AFTER_CONSONANT: &[&str] = &["at", "ad", "ut", "ur", "ir"];

/// Repairs the stem left after removing `-ed` / `-ing`.
fn repair_stem(stem: &str) -> String {
    if stem.len() >= 4 && ends_double_consonant(stem) {
        return stem[..stem.len() - 1].to_string();
    }

    let needs_e = E_AFTER.iter().any(|s| stem.ends_with(s))
        || E_AFTER_CONSONANT
            .iter()
            .any(|s| ends_consonant_then(stem, s))
        || (stem.ends_with('s') && !stem.ends_with("ss") && {
            let before = stem.chars().rev().nth(1);
            matches!(before, Some('a' | 'e' | 'i' | 'o' | 'u'))
        })
        || (measure(stem) == 1 && ends_cvc(stem));

    if needs_e {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

fn strip_verb_suffix(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ied") {
        if word.len() > 4 {
            return Some(format!("{stem}y"));
        }
    }
    if word.ends_with("eed") {
        return None;
    }

    let stem = word
        .strip_suffix("ing")
        .or_else(|| word.strip_suffix("ed"))?;

    if stem.len() < 2 || !has_vowel(stem) {
        return None;
    }
    Some(repair_stem(stem))
}

fn strip_plural(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies") {
        if word.len() > 4 {
            return Some(format!("{stem}y"));
        }
    }
    for suffix in ["sses", "shes", "ches", "xes", "zzes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    word.strip_suffix('s').map(str::to_string)
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR.iter().copied().collect(),
            invariant: INVARIANT.iter().copied().collect(),
        }
    }

    /// One rule application, or `None` when no rule matches.
    fn reduce(&self, word: &str) -> Option<String> {
        if let Some(base) = self.irregular.get(word) {
            return (*base != word).then(|| base.to_string());
        }
        if word.len() <= 3
            || self.invariant.contains(word)
            || !word.chars().all(|c| c.is_ascii_lowercase())
        {
            return None;
        }

        strip_verb_suffix(word)
            .or_else(|| strip_plural(word))
            .filter(|reduced| reduced != word)
    }

    /// Returns the base form of a lowercase word.
    ///
    /// Words with digits, non-ASCII letters, or three letters or fewer are
    /// returned unchanged.
    pub fn lemmatize(&self, word: &str) -> String {
        let mut current = word.to_string();
        // Every suffix rule shortens the word, so this terminates.
        for _ in 0..word.len() {
            match self.reduce(&current) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        Lemmatizer::new().lemmatize(word)
    }

    #[test]
    fn test_verb_inflections() {
        assert_eq!(lemma("crashing"), "crash");
        assert_eq!(lemma("crashed"), "crash");
        assert_eq!(lemma("transferred"), "transfer");
        assert_eq!(lemma("transferring"), "transfer");
        assert_eq!(lemma("stopped"), "stop");
        assert_eq!(lemma("logging"), "log");
        assert_eq!(lemma("loading"), "load");
        assert_eq!(lemma("added"), "add");
        assert_eq!(lemma("opened"), "open");
        assert_eq!(lemma("called"), "call");
    }

    #[test]
    fn test_silent_e_restored() {
        assert_eq!(lemma("updating"), "update");
        assert_eq!(lemma("charged"), "charge");
        assert_eq!(lemma("making"), "make");
        assert_eq!(lemma("receiving"), "receive");
        assert_eq!(lemma("closed"), "close");
        assert_eq!(lemma("required"), "require");
        assert_eq!(lemma("upgraded"), "upgrade");
    }

    #[test]
    fn test_plurals() {
        assert_eq!(lemma("crashes"), "crash");
        assert_eq!(lemma("services"), "service");
        assert_eq!(lemma("replies"), "reply");
        assert_eq!(lemma("fees"), "fee");
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("updates"), "update");
        assert_eq!(lemma("ties"), "tie");
    }

    #[test]
    fn test_ied_to_y() {
        assert_eq!(lemma("tried"), "try");
        assert_eq!(lemma("verified"), "verify");
    }

    #[test]
    fn test_irregular_forms() {
        assert_eq!(lemma("paid"), "pay");
        assert_eq!(lemma("sent"), "send");
        assert_eq!(lemma("used"), "use");
        assert_eq!(lemma("children"), "child");
    }

    #[test]
    fn test_non_inflected_words_unchanged() {
        for word in [
            "access", "status", "bonus", "analysis", "need", "speed", "thing", "string", "news",
            "otp", "2fa", "birr", "nothing",
        ] {
            assert_eq!(lemma(word), word, "{word} should be unchanged");
        }
    }

    #[test]
    fn test_plural_of_inflected_form_reduces_fully() {
        assert_eq!(lemma("settings"), "set");
        assert_eq!(lemma("savings"), "save");
        assert_eq!(lemma("ratings"), "rate");
        assert_eq!(lemma("feelings"), "feel");
        assert_eq!(lemma("meetings"), "meet");
    }

    #[test]
    fn test_outputs_are_fixed_points() {
        let lemmatizer = Lemmatizer::new();
        for word in [
            "settings", "savings", "ratings", "feelings", "meetings", "crashes", "transferred",
            "updating", "replies", "verified", "pulsed", "uses", "buses", "closed", "paid",
        ] {
            let once = lemmatizer.lemmatize(word);
            assert_eq!(lemmatizer.lemmatize(&once), once, "{word} -> {once}");
        }
    }

    #[test]
    fn test_base_forms_are_fixed_points() {
        let lemmatizer = Lemmatizer::new();
        for word in [
            "crash", "transfer", "update", "freeze", "charge", "login", "error", "slow",
            "service", "reply", "balance", "account", "network", "support", "customer", "keep",
            "close", "receive", "require", "upgrade", "load", "open", "stop", "fee", "time",
        ] {
            let once = lemmatizer.lemmatize(word);
            assert_eq!(once, word);
            assert_eq!(lemmatizer.lemmatize(&once), once);
        }
    }
}
