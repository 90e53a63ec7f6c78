//! Prompt templates for analysis, generation and regeneration
//!
//! Pure string construction, no I/O. The domain text is Russian because
//! the produced documents target Russian marketplaces; the corrective
//! instructions are derived from [`ValidationResult`] warnings by keyword,
//! so the wording here and in [`crate::validator`] must stay in sync.

use crate::types::ValidationResult;
use crate::validator::{DEFAULT_MIN_LENGTH, required_section_names};

/// Longest feedback we forward into a regeneration prompt, in characters.
pub const FEEDBACK_MAX_CHARS: usize = 500;

// Literal substrings removed from user feedback before it reaches a prompt.
const STRIPPED_MARKERS: &[&str] = &["```", "---", "###", "SYSTEM:", "USER:", "ASSISTANT:"];

/// Best-effort cleanup of free-form user feedback before prompt embedding.
///
/// Truncates to [`FEEDBACK_MAX_CHARS`] characters, strips common prompt
/// delimiters and role markers, trims whitespace. This reduces accidental
/// prompt breakage and casual injection; it is not a security boundary.
pub fn sanitize_feedback(raw: &str) -> String {
    let mut text: String = raw.chars().take(FEEDBACK_MAX_CHARS).collect();
    for marker in STRIPPED_MARKERS {
        text = text.replace(marker, "");
    }
    text.trim().to_string()
}

/// Builder for every prompt the orchestrator sends.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Fixed instruction for the vision stage.
    pub fn analysis_prompt(&self) -> String {
        "Проанализируй фотографии товара для маркетплейса.\n\
         Опиши строго по фактам:\n\
         1. Что это за товар и его назначение\n\
         2. Материалы и цвета (насколько видно на фото)\n\
         3. Особенности конструкции и детали\n\
         4. Комплектация, если она видна\n\
         Без рекламных оценок, только наблюдаемые свойства."
            .to_string()
    }

    /// System role for the text stage.
    pub fn system_prompt(&self) -> String {
        "Ты опытный маркетолог-копирайтер. Ты готовишь техническое задание (ТЗ) \
         на дизайн карточки товара для маркетплейсов Wildberries и Ozon. \
         Пишешь конкретно, с цифрами и фактами, без воды."
            .to_string()
    }

    /// Base TZ prompt for the first generation attempt.
    pub fn generation_prompt(&self, category: &str, analysis: &str) -> String {
        let sections = required_section_names()
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}. {}", i + 1, name))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Составь подробное ТЗ на дизайн карточки товара.\n\n\
             Категория товара: {category}\n\n\
             Результат анализа фотографий:\n{analysis}\n\n\
             ТЗ обязательно содержит разделы:\n{sections}\n\n\
             Требования: минимум {DEFAULT_MIN_LENGTH} символов, конкретные цвета \
             в HEX-формате (#RRGGBB), размеры и материалы из анализа фотографий."
        )
    }

    /// Retry prompt: the base prompt plus mandatory corrections.
    pub fn improved_prompt(&self, category: &str, analysis: &str, corrections: &[String]) -> String {
        let base = self.generation_prompt(category, analysis);
        if corrections.is_empty() {
            return base;
        }
        let numbered = corrections
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}", i + 1, c))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{base}\n\nОБЯЗАТЕЛЬНЫЕ ИСПРАВЛЕНИЯ:\n{numbered}")
    }

    /// Regeneration prompt: rework a previous document per user wishes.
    ///
    /// Feedback is passed through [`sanitize_feedback`] here, at the single
    /// point where it enters a prompt.
    pub fn regeneration_prompt(
        &self,
        category: &str,
        analysis: &str,
        previous_tz: &str,
        feedback: &str,
    ) -> String {
        let base = self.generation_prompt(category, analysis);
        let wishes = sanitize_feedback(feedback);
        format!(
            "{base}\n\n\
             Предыдущая версия ТЗ:\n{previous_tz}\n\n\
             Пожелания клиента к новой версии:\n{wishes}\n\n\
             Перепиши ТЗ целиком с учётом пожеланий, сохранив сильные места предыдущей версии."
        )
    }

    /// Map validation findings to corrective instructions for the retry
    /// prompt: one demand per missing section, then one per warning keyword.
    pub fn corrective_instructions(&self, validation: &ValidationResult) -> Vec<String> {
        let mut instructions = Vec::new();

        for section in &validation.missing_sections {
            instructions.push(format!("Обязательно добавь раздел \"{section}\""));
        }

        let warnings = validation.warnings.join("\n").to_lowercase();
        if warnings.contains("коротк") {
            instructions.push(format!(
                "Сделай текст значительно длиннее, минимум {DEFAULT_MIN_LENGTH} символов"
            ));
        }
        if warnings.contains("цвет") {
            instructions.push("Укажи конкретные цвета в HEX-формате, например #2E86AB".to_string());
        }
        if warnings.contains("шаблон") {
            instructions
                .push("Убери шаблонные фразы, описывай только настоящие свойства товара".to_string());
        }

        instructions
    }
}
