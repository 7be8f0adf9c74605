//! Ordered rewrite-rule tables for OCR text correction.
//!
//! Tables are plain data: `(pattern, replacement)` pairs compiled once into
//! [`RewriteRule`]s. Order within a table is significant; rules run top to
//! bottom and later rules may rely on earlier ones having fired.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Upper bound on re-applications of a single rule to its own output.
const MAX_RULE_ITERATIONS: usize = 16;

/// Arabic letters (hamza through yeh, plus the extended letters), no digits.
const AR_LETTER: &str = r"[\x{0621}-\x{063A}\x{0641}-\x{064A}\x{0671}-\x{06D3}]";

/// ASCII and Arabic-Indic digits.
const DIGIT: &str = r"[0-9\x{0660}-\x{0669}]";

/// Which stage family a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Literal concatenation split into its spaced form.
    PhraseSplit,
    /// `NOUNرقم` rewritten to `رقم NOUN`.
    NumberReorder,
    /// Letters glued to digits.
    LetterDigitSplit,
    /// Misrecognized legal/administrative term.
    LegalTerm,
    /// Date phrase normalization.
    DatePhrase,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhraseSplit => "phrase_split",
            Self::NumberReorder => "number_reorder",
            Self::LetterDigitSplit => "letter_digit_split",
            Self::LegalTerm => "legal_term",
            Self::DatePhrase => "date_phrase",
        }
    }
}

/// What a rule substitutes for each match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// Regex replacement template (`$1` style group references).
    Template(&'static str),
    /// Noun in group 1, glued `رقم` run in group 2: emit every `رقم`, then the noun.
    NumberFirst,
}

/// One compiled substitution.
#[derive(Debug)]
pub struct RewriteRule {
    pub pattern: Regex,
    pub replacement: Replacement,
    pub category: RuleCategory,
    pub description: String,
}

impl RewriteRule {
    fn compile(pattern: &str, replacement: Replacement, category: RuleCategory, description: String) -> Self {
        Self {
            pattern: Regex::new(pattern)
                .unwrap_or_else(|e| panic!("invalid rewrite rule pattern {pattern:?}: {e}")),
            replacement,
            category,
            description,
        }
    }

    /// Apply the rule repeatedly until its output stops changing.
    ///
    /// Returns `None` when the rule does not change the text.
    pub fn apply(&self, text: &str) -> Option<String> {
        let mut current: Cow<'_, str> = Cow::Borrowed(text);
        for _ in 0..MAX_RULE_ITERATIONS {
            let replaced = match self.replacement {
                Replacement::Template(template) => self.pattern.replace_all(&current, template),
                Replacement::NumberFirst => self.pattern.replace_all(&current, number_first),
            };
            let next = match replaced {
                Cow::Owned(next) if next != *current => next,
                _ => break,
            };
            current = Cow::Owned(next);
        }
        match current {
            Cow::Owned(changed) => Some(changed),
            Cow::Borrowed(_) => None,
        }
    }
}

/// `NOUNرقمرقم` → `رقم رقم NOUN`, the whole glued run in one step.
fn number_first(caps: &Captures<'_>) -> String {
    let count = caps[2].matches(NUMBER_WORD).count();
    let mut out = vec![NUMBER_WORD; count].join(" ");
    out.push(' ');
    out.push_str(&caps[1]);
    out
}

const NUMBER_WORD: &str = "رقم";

/// Concatenations of common legal/administrative terms and their spaced form.
const PHRASE_SPLITS: &[(&str, &str)] = &[
    ("الجمهوريةالجزائرية", "الجمهورية الجزائرية"),
    ("الجزائريةالديمقراطية", "الجزائرية الديمقراطية"),
    ("الديمقراطيةالشعبية", "الديمقراطية الشعبية"),
    ("رئيسالجمهورية", "رئيس الجمهورية"),
    ("الوزيرالأول", "الوزير الأول"),
    ("مجلسالوزراء", "مجلس الوزراء"),
    ("مجلسالأمة", "مجلس الأمة"),
    ("المجلسالشعبي", "المجلس الشعبي"),
    ("الشعبيالوطني", "الشعبي الوطني"),
    ("الشعبيالولائي", "الشعبي الولائي"),
    ("الشعبيالبلدي", "الشعبي البلدي"),
    ("المجلسالدستوري", "المجلس الدستوري"),
    ("المحكمةالعليا", "المحكمة العليا"),
    ("مجلسالدولة", "مجلس الدولة"),
    ("وزارةالعدل", "وزارة العدل"),
    ("وزارةالداخلية", "وزارة الداخلية"),
    ("وزارةالمالية", "وزارة المالية"),
    ("وزارةالتجارة", "وزارة التجارة"),
    ("الجريدةالرسمية", "الجريدة الرسمية"),
    ("السجلالتجاري", "السجل التجاري"),
    ("الشركةذات", "الشركة ذات"),
    ("ذاتالمسؤولية", "ذات المسؤولية"),
    ("المسؤوليةالمحدودة", "المسؤولية المحدودة"),
    ("الجماعاتالمحلية", "الجماعات المحلية"),
    ("RépubliqueAlgérienne", "République Algérienne"),
    ("AlgérienneDémocratique", "Algérienne Démocratique"),
    ("DémocratiqueetPopulaire", "Démocratique et Populaire"),
    ("JournalOfficiel", "Journal Officiel"),
];

/// Legal-document nouns that the engine emits glued to a following `رقم`.
/// Longer variants come first so the alternation prefers them.
const NUMBERED_NOUNS: &[&str] = &[
    "مرسوم رئاسي",
    "مرسوم تنفيذي",
    "مرسوم تشريعي",
    "قرار وزاري مشترك",
    "قرار وزاري",
    "قرار ولائي",
    "قرار بلدي",
    "قرار قضائي",
    "قرار إداري",
    "قانون عضوي",
    "أمر تشريعي",
    "مرسوم",
    "قرار",
    "مقرر",
    "قانون",
    "أمر",
    "حكم",
];

/// Misrecognized spellings of high-frequency legal terms.
const LEGAL_TERMS: &[(&str, &str)] = &[
    (r"\b(?:الجمهوريه|الجمهرية|الجمهوربة)\b", "الجمهورية"),
    (r"\b(?:الجزائريه|الجزايرية)\b", "الجزائرية"),
    (r"\b(?:الديموقراطية|الديمقراطيه|الديمقرطية)\b", "الديمقراطية"),
    (r"\b(?:الشعبيه|الشعببة)\b", "الشعبية"),
    (r"\bالجريده\b", "الجريدة"),
    (r"\bالرسميه\b", "الرسمية"),
    (r"\bوزاره\b", "وزارة"),
    (r"\bالوزير الاول\b", "الوزير الأول"),
    (r"\bحافظ الاختام\b", "حافظ الأختام"),
    (r"\bولايه\b", "ولاية"),
    (r"\b(?:دائره|دايرة)\b", "دائرة"),
    (r"\bبلديه\b", "بلدية"),
    (r"\b(?:Republique|Repubiique|Répubiique)\b", "République"),
    (r"\b(?:Algerienne|AIgérienne)\b", "Algérienne"),
    (r"\b(?:Democratique|Démocratlque)\b", "Démocratique"),
    (r"\b(?:Popuiaire|Populalre)\b", "Populaire"),
    (r"\b(?:Ministere|Ministére)\b", "Ministère"),
    (r"\b(?:OffIciel|Officiei|Off1ciel)\b", "Officiel"),
    (r"\bJournai\b", "Journal"),
    (r"\b(?:Wiiaya|Wi1aya)\b", "Wilaya"),
    (r"\bDaira\b", "Daïra"),
    (r"\bCornmune\b", "Commune"),
];

/// Date phrase normalization.
const DATE_PHRASES: &[(&str, &str)] = &[
    (r"\bالمؤرخفي\b", "المؤرخ في"),
    (r"\b(?:المورخ|المؤرح)\b", "المؤرخ"),
    (r"\bالموافقل\b", "الموافق ل"),
    (r"\bجانفى\b", "جانفي"),
    (r"\bفيفرى\b", "فيفري"),
    (r"\bماى\b", "ماي"),
    (r"\bjanvler\b", "janvier"),
    (r"\bfévrler\b", "février"),
    (r"\ben date dn\b", "en date du"),
    (r"\b(\d{1,2})\s*/\s*(\d{1,2})\s*/\s*(\d{4})\b", "$1/$2/$3"),
];

/// Stage-2 rules: phrase splits, then number reordering, then the
/// letter/digit fallback.
pub static WORD_SPLIT_RULES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    let mut rules: Vec<RewriteRule> = PHRASE_SPLITS
        .iter()
        .map(|&(from, to)| {
            RewriteRule::compile(
                &regex::escape(from),
                Replacement::Template(to),
                RuleCategory::PhraseSplit,
                format!("Word separation: {from} → {to}"),
            )
        })
        .collect();

    let nouns = NUMBERED_NOUNS
        .iter()
        .map(|noun| regex::escape(noun))
        .collect::<Vec<_>>()
        .join("|");
    rules.push(RewriteRule::compile(
        &format!(r"\b((?:ال)?(?:{nouns}))((?:{NUMBER_WORD})+)"),
        Replacement::NumberFirst,
        RuleCategory::NumberReorder,
        "Reordered legal reference: number placed before noun".to_string(),
    ));

    rules.push(RewriteRule::compile(
        &format!("({AR_LETTER}{{2,}})({DIGIT}+)"),
        Replacement::Template("$1 $2"),
        RuleCategory::LetterDigitSplit,
        "Separated Arabic text from following digits".to_string(),
    ));
    rules.push(RewriteRule::compile(
        &format!("({DIGIT}+)({AR_LETTER}{{2,}})"),
        Replacement::Template("$1 $2"),
        RuleCategory::LetterDigitSplit,
        "Separated digits from following Arabic text".to_string(),
    ));

    rules
});

/// Stage-4 rules: legal terms, then date phrases.
pub static LEGAL_RULES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    LEGAL_TERMS
        .iter()
        .map(|&(pattern, to)| (pattern, to, RuleCategory::LegalTerm))
        .chain(
            DATE_PHRASES
                .iter()
                .map(|&(pattern, to)| (pattern, to, RuleCategory::DatePhrase)),
        )
        .map(|(pattern, to, category)| {
            RewriteRule::compile(
                pattern,
                Replacement::Template(to),
                category,
                format!("{} → {to}", category.as_str()),
            )
        })
        .collect()
});

/// Bidirectional control characters stripped in stage 1.
pub const BIDI_CONTROLS: &[char] = &[
    '\u{200E}', // LRM
    '\u{200F}', // RLM
    '\u{202A}', // LRE
    '\u{202B}', // RLE
    '\u{202C}', // PDF
    '\u{202D}', // LRO
    '\u{202E}', // RLO
    '\u{2066}', // LRI
    '\u{2067}', // RLI
    '\u{2068}', // FSI
    '\u{2069}', // PDI
];

/// Arabic presentation-form code points and their base-letter sequences.
pub fn ligature_expansion(c: char) -> Option<&'static str> {
    match c {
        '\u{FEFB}' | '\u{FEFC}' => Some("لا"),
        '\u{FEF5}' | '\u{FEF6}' => Some("لآ"),
        '\u{FEF7}' | '\u{FEF8}' => Some("لأ"),
        '\u{FEF9}' | '\u{FEFA}' => Some("لإ"),
        '\u{FDF2}' => Some("الله"),
        '\u{FE8D}' | '\u{FE8E}' => Some("ا"),
        '\u{FEDD}' | '\u{FEDE}' | '\u{FEDF}' | '\u{FEE0}' => Some("ل"),
        _ => None,
    }
}
