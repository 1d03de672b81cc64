use std::collections::BTreeMap;

use nightowl_core::models::answer::{AnswerSet, QuestionId, RawAnswer};
use nightowl_core::models::language::Language;

use crate::catalog::OptionCatalog;

/// Map a raw answer to its canonical code.
///
/// Decimal digit strings in any script ("3", "३", "৩") are taken as the code itself and never touch the
/// catalog. Anything else is matched, trimmed and case-sensitively, against
/// the question's option labels for `language`, falling back to the default
/// language. Returns `None` when the answer is absent, cannot be coerced to
/// text, or is not one of the options.
pub fn normalize(
    catalog: &OptionCatalog,
    question: &str,
    answer: Option<&RawAnswer>,
    language: Language,
) -> Option<i64> {
    let text = answer?.as_text()?;
    let text = text.trim();

    if let Some(code) = parse_decimal(text) {
        return Some(code);
    }

    let Some(resolved) = catalog.resolve(language, question) else {
        tracing::trace!(question, %language, "no options for question");
        return None;
    };
    let code = resolved.code_of(text);
    if code.is_none() {
        tracing::trace!(
            question,
            %language,
            catalog_language = %resolved.language,
            answer = text,
            "answer is not one of the options"
        );
    }
    code
}

/// Codes for every answered question. Unresolvable answers map to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedAnswers(BTreeMap<QuestionId, Option<i64>>);

impl NormalizedAnswers {
    pub fn code(&self, question: &str) -> Option<i64> {
        self.0.get(question).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, Option<i64>)> + '_ {
        self.0.iter().map(|(q, c)| (q, *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn normalize_all(
    catalog: &OptionCatalog,
    answers: &AnswerSet,
    language: Language,
) -> NormalizedAnswers {
    NormalizedAnswers(
        answers
            .iter()
            .map(|(q, a)| (q.clone(), normalize(catalog, q.as_str(), Some(a), language)))
            .collect(),
    )
}

/// Parse a string made only of Unicode decimal digits (ASCII "42",
/// Devanagari "४२", Bengali, fullwidth, ...). Empty strings and values that
/// overflow `i64` yield `None`.
fn parse_decimal(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    s.chars().try_fold(0i64, |acc, c| {
        let digit = decimal_digit(c)?;
        acc.checked_mul(10)?.checked_add(digit)
    })
}

/// Zero of every decimal digit run (general category Nd, Unicode 14). Each
/// run holds the digits 0 through 9 at consecutive code points.
const DIGIT_ZEROS: [char; 66] = [
    '\u{0030}', '\u{0660}', '\u{06F0}', '\u{07C0}', '\u{0966}', '\u{09E6}', '\u{0A66}',
    '\u{0AE6}', '\u{0B66}', '\u{0BE6}', '\u{0C66}', '\u{0CE6}', '\u{0D66}', '\u{0DE6}',
    '\u{0E50}', '\u{0ED0}', '\u{0F20}', '\u{1040}', '\u{1090}', '\u{17E0}', '\u{1810}',
    '\u{1946}', '\u{19D0}', '\u{1A80}', '\u{1A90}', '\u{1B50}', '\u{1BB0}', '\u{1C40}',
    '\u{1C50}', '\u{A620}', '\u{A8D0}', '\u{A900}', '\u{A9D0}', '\u{A9F0}', '\u{AA50}',
    '\u{ABF0}', '\u{FF10}', '\u{104A0}', '\u{10D30}', '\u{11066}', '\u{110F0}',
    '\u{11136}', '\u{111D0}', '\u{112F0}', '\u{11450}', '\u{114D0}', '\u{11650}',
    '\u{116C0}', '\u{11730}', '\u{118E0}', '\u{11950}', '\u{11C50}', '\u{11D50}',
    '\u{11DA0}', '\u{16A60}', '\u{16AC0}', '\u{16B50}', '\u{1D7CE}', '\u{1D7D8}',
    '\u{1D7E2}', '\u{1D7EC}', '\u{1D7F6}', '\u{1E140}', '\u{1E2F0}', '\u{1E950}',
    '\u{1FBF0}',
];

fn decimal_digit(c: char) -> Option<i64> {
    let index = DIGIT_ZEROS.partition_point(|&zero| zero <= c).checked_sub(1)?;
    let offset = u32::from(c) - u32::from(DIGIT_ZEROS[index]);
    (offset < 10).then(|| i64::from(offset))
}
