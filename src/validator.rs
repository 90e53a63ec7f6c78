//! Quality validation for generated listing documents
//!
//! Pure, deterministic scoring of a generated TZ document: structural
//! section detection via regex, quality-signal counting (HEX colors,
//! concrete detail markers), template-phrase penalties. No I/O; the
//! same input and configuration always produce the same result.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

use crate::types::ValidationResult;

/// Default minimum document length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 2000;

// Required sections with detection patterns. Patterns are matched anywhere
// in the document, case-insensitive, so numbered or decorated headers and
// synonymous wordings all count.
const REQUIRED_SECTIONS: &[(&str, &str)] = &[
    (
        "Заголовок",
        r"(?i)заголовок|название\s+товара|наименовани[ея]",
    ),
    ("Описание", r"(?i)описани[ея]"),
    (
        "Характеристики",
        r"(?i)характеристик[а-яё]*|параметр[а-яё]*|свойств[а-яё]*",
    ),
    (
        "Преимущества",
        r"(?i)преимуществ[а-яё]*|достоинств[а-яё]*|\bутп\b|выгод[а-яё]*",
    ),
    (
        "Целевая аудитория",
        r"(?i)целевая\s+аудитория|для\s+кого|портрет\s+покупателя",
    ),
    (
        "Цветовая палитра",
        r"(?i)цветовая\s+(?:палитра|гамма|схема)|цветовое\s+решение|\bцвета\b",
    ),
    (
        "Структура слайдов",
        r"(?i)структура\s+слайдов|слайд[а-яё]*|инфографик[а-яё]*|карточк[а-яё]*",
    ),
    (
        "Ключевые слова",
        r"(?i)ключевые\s+слова|\bseo\b|поисков[а-яё]*\s+запрос[а-яё]*",
    ),
];

// Concrete-detail markers: measurement units, warranty/gift wording,
// premium-material adjectives. Each regex match counts once.
const QUALITY_INDICATOR_PATTERNS: &[&str] = &[
    r"(?i)\d+\s*(?:мм|см|м|кг|г|мл|л)\b",
    r"(?i)гаранти[а-яё]*",
    r"(?i)в\s+подарок|подарочн[а-яё]*",
    r"(?i)премиум|премиальн[а-яё]*",
    r"(?i)натуральн[а-яё]*|экологичн[а-яё]*",
    r"(?i)износостойк[а-яё]*|ударопрочн[а-яё]*",
];

// Generic filler that marketplaces are tired of; counted as lowercase
// substrings, every occurrence penalized.
const TEMPLATE_PHRASES: &[&str] = &[
    "высокое качество",
    "лучший выбор",
    "доступная цена",
    "широкий ассортимент",
    "отличное решение",
    "идеально подходит",
    "незаменимый помощник",
    "порадует вас",
];

lazy_static! {
    static ref SECTION_REGEXES: Vec<(&'static str, Regex)> = REQUIRED_SECTIONS
        .iter()
        .map(|(name, pattern)| {
            (
                *name,
                Regex::new(pattern).expect("section pattern should be valid"),
            )
        })
        .collect();
    static ref HEX_COLOR_REGEX: Regex =
        Regex::new(r"#[0-9A-Fa-f]{6}\b").expect("hex color pattern should be valid");
    static ref QUALITY_REGEXES: Vec<Regex> = QUALITY_INDICATOR_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("quality pattern should be valid"))
        .collect();
}

/// Canonical names of the required sections, in report order.
pub fn required_section_names() -> Vec<&'static str> {
    REQUIRED_SECTIONS.iter().map(|(name, _)| *name).collect()
}

/// Deterministic scorer for generated TZ documents.
///
/// Scoring rubric (f64 math, rounded and clamped to `0..=100`):
/// - sections: `found/8 × 50`
/// - length: `min(chars/min_length, 1.5) × 16.7`, capped at 25
/// - detail: `min(hex×2 + indicators, 15)`
/// - anti-template: `10 − min(templates×2.5, 10)`
///
/// A document is valid when at most one section is missing, its length is
/// at least `0.8 × min_length` characters and the score reaches 60. The
/// three gates are independent on purpose: a long keyword-stuffed text or
/// a short complete one both fail.
#[derive(Debug, Clone)]
pub struct QualityValidator {
    min_length: usize,
}

impl Default for QualityValidator {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl QualityValidator {
    /// Create a validator with the default minimum length.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum document length in characters.
    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Score one document. Pure function of the input string.
    pub fn validate(&self, text: &str) -> ValidationResult {
        let char_len = text.chars().count();

        let mut found_sections = BTreeSet::new();
        let mut missing_sections = BTreeSet::new();
        for (name, regex) in SECTION_REGEXES.iter() {
            if regex.is_match(text) {
                found_sections.insert((*name).to_string());
            } else {
                missing_sections.insert((*name).to_string());
            }
        }

        let hex_colors = HEX_COLOR_REGEX.find_iter(text).count();
        let indicators: usize = QUALITY_REGEXES
            .iter()
            .map(|regex| regex.find_iter(text).count())
            .sum();
        let lower = text.to_lowercase();
        let template_phrases: usize = TEMPLATE_PHRASES
            .iter()
            .map(|phrase| lower.matches(phrase).count())
            .sum();

        let min_length = self.min_length.max(1);
        let section_score =
            found_sections.len() as f64 / REQUIRED_SECTIONS.len() as f64 * 50.0;
        let length_score = ((char_len as f64 / min_length as f64).min(1.5) * 16.7).min(25.0);
        let detail_score = ((hex_colors * 2 + indicators) as f64).min(15.0);
        let template_score = 10.0 - (template_phrases as f64 * 2.5).min(10.0);

        let total = section_score + length_score + detail_score + template_score;
        let score = total.round().clamp(0.0, 100.0) as u8;

        let is_valid = missing_sections.len() <= 1
            && char_len as f64 >= 0.8 * min_length as f64
            && score >= 60;

        // Warning order is fixed; the retry loop keyword-matches these strings
        let mut warnings = Vec::new();
        if char_len < min_length {
            warnings.push(format!(
                "Текст слишком короткий: {char_len} символов (минимум {min_length})"
            ));
        }
        if hex_colors == 0 {
            warnings.push("Не указаны конкретные цвета в HEX-формате".to_string());
        }
        if template_phrases > 0 {
            warnings.push(format!("Обнаружены шаблонные фразы: {template_phrases}"));
        }
        if !missing_sections.is_empty() {
            let list = missing_sections
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            warnings.push(format!("Отсутствуют разделы: {list}"));
        }

        tracing::debug!(
            score,
            sections = found_sections.len(),
            hex_colors,
            indicators,
            template_phrases,
            chars = char_len,
            "document validated"
        );

        ValidationResult {
            is_valid,
            score,
            found_sections,
            missing_sections,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // All 8 sections, 3 HEX colors, no template phrases, padded past the
    // configured minimum.
    fn complete_document(target_chars: usize) -> String {
        let mut text = String::from(
            "Заголовок: Рюкзак городской из экокожи\n\
             Описание: вместительная модель на каждый день\n\
             Характеристики: два отделения, усиленное дно\n\
             Преимущества: держит форму, не промокает\n\
             Целевая аудитория: студенты и городские жители\n\
             Цветовая палитра: #1A1A2E, #16213E, #E94560\n\
             Структура слайдов: обложка, детали, сравнение\n\
             Ключевые слова: рюкзак, городской, повседневный\n",
        );
        while text.chars().count() < target_chars {
            text.push_str(
                "Подробное наполнение из реальных свойств изделия помогает покупателю принять решение быстрее. ",
            );
        }
        text
    }

    #[test]
    fn validate_is_deterministic() {
        let validator = QualityValidator::new();
        let doc = complete_document(2100);
        let a = validator.validate(&doc);
        let b = validator.validate(&doc);
        assert_eq!(a.score, b.score);
        assert_eq!(a.found_sections, b.found_sections);
        assert_eq!(a.missing_sections, b.missing_sections);
        assert_eq!(a.warnings, b.warnings);
    }

    #[test]
    fn score_stays_in_bounds() {
        let validator = QualityValidator::new();
        let long = complete_document(5000);
        let hex_only = "#FF5733 ".repeat(400);
        let template_only = "высокое качество ".repeat(50);
        for input in ["", "короткий", long.as_str(), hex_only.as_str(), template_only.as_str()] {
            let result = validator.validate(input);
            assert!(result.score <= 100, "score {} for {input:.40}", result.score);
        }
    }

    #[test]
    fn complete_long_document_is_valid_and_high_scoring() {
        let validator = QualityValidator::new();
        let result = validator.validate(&complete_document(2500));
        assert!(result.is_valid, "warnings: {:?}", result.warnings);
        assert!(result.score >= 85, "score was {}", result.score);
        assert!(result.missing_sections.is_empty());
    }

    #[test]
    fn short_incomplete_document_fails_the_section_gate() {
        let validator = QualityValidator::new();
        // 5 sections present, 3 missing, ~300 chars
        let mut doc = String::from(
            "Заголовок: стильная сумка\n\
             Описание: компактная модель для города\n\
             Характеристики: экокожа, два отделения\n\
             Целевая аудитория: студенты\n\
             Структура слайдов: обложка, детали, финал\n",
        );
        while doc.chars().count() < 300 {
            doc.push_str("Материал приятный на ощупь и лёгкий в уходе. ");
        }

        let result = validator.validate(&doc);
        assert!(!result.is_valid);
        assert_eq!(result.missing_count(), 3);
        assert!(result.missing_sections.contains("Преимущества"));
        assert!(result.missing_sections.contains("Цветовая палитра"));
        assert!(result.missing_sections.contains("Ключевые слова"));
    }

    #[test]
    fn numbered_and_synonymous_headers_count() {
        let validator = QualityValidator::new();
        let doc = "2. Название товара: кружка\n3) SEO-запросы: кружка керамическая";
        let result = validator.validate(doc);
        assert!(result.found_sections.contains("Заголовок"));
        assert!(result.found_sections.contains("Ключевые слова"));
    }

    #[test]
    fn detail_score_is_capped() {
        let validator = QualityValidator::new();
        // Base is long enough that the length sub-score saturates for both
        let base = complete_document(3200);
        let eight_hex = format!("{base} #111111 #222222 #333333 #444444 #555555");
        let twenty_hex = format!(
            "{eight_hex} #666666 #777777 #888888 #999999 #AAAAAA #BBBBBB #CCCCCC #DDDDDD \
             #EEEEEE #ABCDEF #FEDCBA #123456"
        );
        // Both sit far past the 15-point detail cap
        let a = validator.validate(&eight_hex);
        let b = validator.validate(&twenty_hex);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn eight_digit_hex_is_not_a_color() {
        let validator = QualityValidator::new();
        let with = validator.validate("Цветовая гамма: #AABBCCDD");
        let without = validator.validate("Цветовая гамма: без кодов");
        assert_eq!(with.score, without.score);
    }

    #[test]
    fn warnings_carry_the_retry_keywords() {
        let validator = QualityValidator::new();
        let result = validator.validate("Высокое качество и лучший выбор");

        assert!(result.warnings.iter().any(|w| w.contains("коротк")));
        assert!(result.warnings.iter().any(|w| w.contains("цвет")));
        assert!(result.warnings.iter().any(|w| w.contains("шаблон")));
        assert!(result.warnings.iter().any(|w| w.contains("Отсутствуют разделы")));
    }

    #[test]
    fn complete_document_has_no_warnings() {
        let validator = QualityValidator::new();
        let result = validator.validate(&complete_document(2500));
        assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
    }

    #[test]
    fn zero_min_length_does_not_panic() {
        let validator = QualityValidator::new().with_min_length(0);
        let result = validator.validate("любой текст");
        assert!(result.score <= 100);
    }
}
