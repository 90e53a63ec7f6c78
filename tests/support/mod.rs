//! Shared scripted providers and progress sinks for integration tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use tzgen::orchestrator::{GenerationStage, ProgressSink};
use tzgen::traits::{ProviderCore, TextCapability, VisionCapability};
use tzgen::types::{ProviderResponse, ProviderStatus};

/// Vision provider that fails the first `fail_first` calls, then returns
/// a fixed analysis. Single- and multi-image calls are counted separately
/// so tests can assert which entry point the orchestrator picked.
pub struct ScriptedVision {
    pub name: &'static str,
    pub analysis: String,
    pub fail_first: u32,
    pub single_calls: AtomicU32,
    pub multi_calls: AtomicU32,
}

impl ScriptedVision {
    pub fn ok(name: &'static str, analysis: &str) -> Self {
        Self {
            name,
            analysis: analysis.to_string(),
            fail_first: 0,
            single_calls: AtomicU32::new(0),
            multi_calls: AtomicU32::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            analysis: String::new(),
            fail_first: u32::MAX,
            single_calls: AtomicU32::new(0),
            multi_calls: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.single_calls.load(Ordering::SeqCst) + self.multi_calls.load(Ordering::SeqCst)
    }

    fn respond(&self, done: u32) -> ProviderResponse {
        if done < self.fail_first {
            ProviderResponse::failure(self.name, "scripted vision failure")
        } else {
            ProviderResponse::success(self.name, self.analysis.clone())
        }
    }
}

#[async_trait]
impl ProviderCore for ScriptedVision {
    fn name(&self) -> &str {
        self.name
    }

    async fn health_check(&self) -> ProviderStatus {
        ProviderStatus::Available
    }
}

#[async_trait]
impl VisionCapability for ScriptedVision {
    async fn analyze_image(&self, _image: &[u8], _prompt: &str) -> ProviderResponse {
        let done = self.call_count();
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(done)
    }

    async fn analyze_images(&self, _images: &[Vec<u8>], _prompt: &str) -> ProviderResponse {
        let done = self.call_count();
        self.multi_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(done)
    }
}

/// Text provider that returns its scripted bodies in order, repeating the
/// last one once the script runs out. An empty script always fails, and an
/// empty string in the script marks that call (and repeats of it) as a
/// failure, which models a provider going down mid-run.
pub struct SequenceText {
    pub name: &'static str,
    pub bodies: Vec<String>,
    pub calls: AtomicU32,
    pub status: ProviderStatus,
    pub prompts: Mutex<Vec<String>>,
}

impl SequenceText {
    pub fn new(name: &'static str, bodies: Vec<String>) -> Self {
        Self {
            name,
            bodies,
            calls: AtomicU32::new(0),
            status: ProviderStatus::Available,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn with_status(mut self, status: ProviderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderCore for SequenceText {
    fn name(&self) -> &str {
        self.name
    }

    async fn health_check(&self) -> ProviderStatus {
        self.status
    }
}

#[async_trait]
impl TextCapability for SequenceText {
    async fn generate(
        &self,
        prompt: &str,
        _system_prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> ProviderResponse {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        self.prompts.lock().unwrap().push(prompt.to_string());

        let idx = call.min(self.bodies.len().saturating_sub(1));
        match self.bodies.get(idx) {
            Some(body) if !body.is_empty() => ProviderResponse::success(self.name, body.clone()),
            _ => ProviderResponse::failure(self.name, "scripted text failure"),
        }
    }
}

/// Progress sink that records `(stage index, substage)` pairs.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<(u8, Option<String>)>>,
}

impl RecordingProgress {
    pub fn stages(&self) -> Vec<u8> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(idx, _)| *idx)
            .collect()
    }

    pub fn events(&self) -> Vec<(u8, Option<String>)> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressSink for RecordingProgress {
    async fn report(&self, stage: GenerationStage, substage: Option<&str>) {
        self.events
            .lock()
            .unwrap()
            .push((stage.index(), substage.map(String::from)));
    }
}

/// Build a document that passes validation: every required section, enough
/// text, concrete HEX colors, measurable details, no stock phrases.
pub fn valid_document() -> String {
    let mut doc = String::from(
        "Заголовок: Керамическая кружка с двойными стенками 350 мл\n\n\
         Описание: Кружка из белой глины с матовой глазурью держит напиток \
         горячим заметно дольше обычной за счет воздушной прослойки между \
         стенками. Вес 280 г, высота 95 мм, гарантия производителя 12 месяцев.\n\n\
         Характеристики: объем 350 мл, диаметр 82 мм, вес 280 г, материал \
         натуральная глина, покрытие пищевая глазурь.\n\n\
         Преимущества: двойные стенки, износостойкое покрытие, подходит для \
         посудомоечной машины, упаковка в подарок к каждому заказу.\n\n\
         Целевая аудитория: офисные сотрудники 25-45 лет, покупающие посуду \
         для рабочего стола, и те, кто ищет подарок коллеге.\n\n\
         Цветовая палитра: основной #2E86AB, акцент #F6F5F1, текст #1B1B1B.\n\n\
         Структура слайдов: слайд 1 герой-фото, слайд 2 размеры в мм, слайд 3 \
         сценарий использования в офисе, слайд 4 сравнение с обычной кружкой.\n\n\
         Ключевые слова: кружка с двойными стенками, керамическая кружка 350 мл, \
         кружка для офиса, seo подбор по частотности.\n\n",
    );

    let filler = "Дополнительно про сценарии: напиток остывает медленнее, \
                  ручка не нагревается, глазурь не впитывает запахи кофе. ";
    while doc.chars().count() < 2100 {
        doc.push_str(filler);
    }
    doc
}

/// Document scoring in the middle of the scale: section coverage is partial
/// so it never validates, but it beats an obviously thin draft.
pub fn mid_document() -> String {
    let mut doc = String::from(
        "Заголовок: Керамическая кружка 350 мл\n\n\
         Описание: Кружка с двойными стенками из глины, вес 280 г.\n\n\
         Характеристики: объем 350 мл, высота 95 мм.\n\n\
         Преимущества: держит тепло, износостойкая глазурь.\n\n\
         Цветовая палитра: основной #2E86AB, фон #F6F5F1.\n\n\
         Ключевые слова: кружка керамическая, кружка 350 мл.\n\n",
    );

    let filler = "Сценарий использования: горячий чай на рабочем месте, кофе \
                  из рожковой машины, какао вечером дома у окна. ";
    while doc.chars().count() < 2100 {
        doc.push_str(filler);
    }
    doc
}

/// Thin draft: few sections, short, no specifics.
pub fn thin_document() -> String {
    "Описание: хорошая кружка для дома.\n\nПреимущества: красивая и удобная.".to_string()
}
