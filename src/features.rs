//! Per-record stylometric feature bundle: lengths, word-length histogram,
//! case-shape partition, vocabulary-richness buckets, Yule's K, and
//! character/function-word frequencies.

use ahash::AHashMap;

use crate::schema::FUNCTION_WORD_PREFIX;
use crate::tokenize::{char_class_counts, word_tokens};

/// Capitalization pattern of a single word token.
///
/// Naive predicates overlap (a single capital letter is simultaneously
/// all-upper and title-case), so classification applies a fixed priority:
/// AllUpper > Camel > FirstUpper > AllLower > Other. Every token lands in
/// exactly one class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseShape {
    AllUpper = 0,
    AllLower = 1,
    FirstUpper = 2,
    Camel = 3,
    Other = 4,
}

impl CaseShape {
    pub fn classify(token: &str) -> CaseShape {
        let has_upper = token.chars().any(|c| c.is_uppercase());
        let has_lower = token.chars().any(|c| c.is_lowercase());
        if has_upper && !has_lower {
            return CaseShape::AllUpper;
        }
        if has_lower && token.chars().skip(1).any(|c| c.is_uppercase()) {
            return CaseShape::Camel;
        }
        let mut chars = token.chars();
        let first_upper = chars.next().map_or(false, |c| c.is_uppercase());
        if first_upper && chars.all(|c| !c.is_alphabetic() || c.is_lowercase()) {
            return CaseShape::FirstUpper;
        }
        if has_lower && !has_upper {
            return CaseShape::AllLower;
        }
        // No cased characters at all (e.g. digit-only tokens).
        CaseShape::Other
    }
}

/// The full per-record feature bundle. Word-length buckets fold lengths >= 20
/// into the last slot; legomena buckets fold frequencies >= 10 likewise.
#[derive(Clone, Debug, Default)]
pub struct FeatureBundle {
    pub length_char: u64,
    pub length_words: u64,
    pub word_len: [u64; 20],
    pub case: [u64; 5],
    pub lego: [u64; 10],
    pub yules_k: f64,
    pub chars: AHashMap<char, u64>,
    pub function_words: AHashMap<String, u64>,
}

impl FeatureBundle {
    /// Compute the bundle for one comment body. `function_words` must be the
    /// sorted list from `schema::load_function_words`. An empty body yields
    /// an all-zero bundle.
    pub fn compute(body: &str, function_words: &[String]) -> FeatureBundle {
        let (tokens, lower) = word_tokens(body);

        let mut b = FeatureBundle {
            length_char: body.chars().count() as u64,
            length_words: tokens.len() as u64,
            ..FeatureBundle::default()
        };

        for t in &tokens {
            let len = t.chars().count().min(20);
            b.word_len[len - 1] += 1;
            b.case[CaseShape::classify(t) as usize] += 1;
        }

        // Frequency distribution over the lowercased word multiset drives the
        // legomena buckets, the function-word counts, and Yule's K. K uses
        // the unfolded per-frequency counts; the buckets are a folded view.
        let mut freq: AHashMap<&str, u64> = AHashMap::new();
        for w in &lower {
            *freq.entry(w.as_str()).or_insert(0) += 1;
        }
        let mut sum_m2 = 0u64;
        for (w, m) in &freq {
            b.lego[(*m).min(10) as usize - 1] += 1;
            sum_m2 += m * m;
            if function_words.binary_search_by(|fw| fw.as_str().cmp(*w)).is_ok() {
                b.function_words.insert((*w).to_string(), *m);
            }
        }
        let n = b.length_words as f64;
        b.yules_k = if b.length_words > 0 {
            1e4 * (sum_m2 as f64 - n) / (n * n)
        } else {
            0.0
        };

        b.chars = char_class_counts(body);
        b
    }

    /// Value for one schema column, serialized for the writer. Returns None
    /// for columns this bundle has no count for (the writer defaults to 0).
    pub fn value(&self, col: &str) -> Option<String> {
        match col {
            "length_char" => return Some(self.length_char.to_string()),
            "length_words" => return Some(self.length_words.to_string()),
            "all_upper" => return Some(self.case[CaseShape::AllUpper as usize].to_string()),
            "all_lower" => return Some(self.case[CaseShape::AllLower as usize].to_string()),
            "first_upper" => return Some(self.case[CaseShape::FirstUpper as usize].to_string()),
            "camel" => return Some(self.case[CaseShape::Camel as usize].to_string()),
            "other_case" => return Some(self.case[CaseShape::Other as usize].to_string()),
            "yules_k" => return Some(self.yules_k.to_string()),
            _ => {}
        }
        if let Some(rest) = col.strip_prefix("word_") {
            return bucket_value(&self.word_len, rest, "20p").map(|v| v.to_string());
        }
        if let Some(rest) = col.strip_prefix("lego_") {
            return bucket_value(&self.lego, rest, "10p").map(|v| v.to_string());
        }
        if let Some(w) = col.strip_prefix(FUNCTION_WORD_PREFIX) {
            return self.function_words.get(w).map(u64::to_string);
        }
        let mut it = col.chars();
        if let (Some(c), None) = (it.next(), it.next()) {
            return self.chars.get(&c).map(u64::to_string);
        }
        None
    }
}

fn bucket_value(buckets: &[u64], suffix: &str, fold: &str) -> Option<u64> {
    if suffix == fold {
        return buckets.last().copied();
    }
    match suffix.parse::<usize>() {
        Ok(n) if n >= 1 && n < buckets.len() => Some(buckets[n - 1]),
        _ => None,
    }
}
