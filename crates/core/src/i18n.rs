//! UI string lookup with per-language tables.
//!
//! Lookup order: selected language, then English, then the key itself.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Japanese,
    Hindi,
    Odia,
    Tamil,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Japanese,
        Language::Hindi,
        Language::Odia,
        Language::Tamil,
        Language::Telugu,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Japanese => "Japanese",
            Language::Hindi => "Hindi",
            Language::Odia => "Odia",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Source of translated strings.
pub trait Catalog: Send + Sync {
    fn lookup(&self, language: Language, key: &str) -> Option<&str>;
}

/// Tables compiled into the binary: full English and Spanish, the rest empty.
pub struct BuiltinCatalog {
    tables: HashMap<Language, HashMap<&'static str, &'static str>>,
}

impl BuiltinCatalog {
    #[must_use]
    pub fn new() -> Self {
        let mut tables: HashMap<Language, HashMap<&'static str, &'static str>> = Language::ALL
            .into_iter()
            .map(|lang| (lang, HashMap::new()))
            .collect();
        for (key, english, spanish) in ENTRIES {
            if let Some(table) = tables.get_mut(&Language::English) {
                table.insert(key, english);
            }
            if let Some(table) = tables.get_mut(&Language::Spanish) {
                table.insert(key, spanish);
            }
        }
        Self { tables }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for BuiltinCatalog {
    fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .copied()
    }
}

/// A catalog bound to the selected language.
#[derive(Clone)]
pub struct Translator {
    catalog: Arc<dyn Catalog>,
    language: Language,
}

impl Translator {
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, language: Language) -> Self {
        Self { catalog, language }
    }

    #[must_use]
    pub fn builtin(language: Language) -> Self {
        Self::new(Arc::new(BuiltinCatalog::new()), language)
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn with_language(&self, language: Language) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            language,
        }
    }

    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.catalog
            .lookup(self.language, key)
            .or_else(|| self.catalog.lookup(Language::English, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Like [`Self::t`], then swaps the first `{name}` for each replacement.
    ///
    /// Replacements are only applied to catalog text, never to a raw-key fallback.
    #[must_use]
    pub fn t_with(&self, key: &str, replacements: &[(&str, String)]) -> String {
        let found = self
            .catalog
            .lookup(self.language, key)
            .or_else(|| self.catalog.lookup(Language::English, key));
        let Some(text) = found else {
            return key.to_string();
        };
        let mut text = text.to_string();
        for (name, value) in replacements {
            text = text.replacen(&format!("{{{name}}}"), value, 1);
        }
        text
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Translator {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language && Arc::ptr_eq(&self.catalog, &other.catalog)
    }
}

#[rustfmt::skip]
const ENTRIES: [(&str, &str, &str); 100] = [
    // Sidebar
    ("Modes", "Modes", "Modos"),
    ("Explain Topic", "Explain Topic", "Explicar Tema"),
    ("Generate Quiz", "Generate Quiz", "Generar Cuestionario"),
    ("Summarize Text", "Summarize Text", "Resumir Texto"),
    ("Create a Story", "Create a Story", "Crear una Historia"),
    ("Clear Chat", "Clear Chat", "Limpiar Chat"),
    ("Configuration", "Configuration", "Configuración"),
    ("Language", "Language", "Idioma"),
    ("Select language", "Select language", "Seleccionar idioma"),
    ("App Name", "ORIoN : AI STUDY BUDDY", "ORIoN : COMPAÑERO DE ESTUDIO IA"),
    ("Profile", "Profile", "Perfil"),
    // Chat page
    ("Hello! I am your AI Study Buddy. Select a mode on the left and let's start learning.",
     "Hello! I am ORIoN : AI STUDY BUDDY. Select a mode on the left and let's start learning.",
     "¡Hola! Soy ORIoN : COMPAÑERO DE ESTUDIO IA. Selecciona un modo a la izquierda y empecemos a aprender."),
    ("Thinking...", "Thinking...", "Pensando..."),
    ("Error: ", "Error: ", "Error: "),
    ("Read Aloud", "Read Aloud", "Leer en voz alta"),
    ("Stop", "Stop", "Detener"),
    ("Copy", "Copy", "Copiar"),
    ("Copied to clipboard!", "Copied to clipboard!", "¡Copiado al portapapeles!"),
    ("Could not copy to clipboard.", "Could not copy to clipboard.", "No se pudo copiar al portapapeles."),
    ("Dark Mode", "Dark Mode", "Modo oscuro"),
    ("Pin", "Pin", "Fijar"),
    ("Unpin", "Unpin", "Desfijar"),
    ("Pinned", "Pinned", "Fijados"),
    ("Send", "Send", "Enviar"),
    ("Type a topic or concept...", "Type a topic or concept...", "Escribe un tema o concepto..."),
    ("AI can make mistakes. Always verify important information.",
     "AI can make mistakes. Always verify important information.",
     "La IA puede cometer errores. Verifica siempre la información importante."),
    ("Query must be at least 2 characters.", "Query must be at least 2 characters.",
     "La consulta debe tener al menos 2 caracteres."),
    ("Question must be at least 10 characters.", "Question must be at least 10 characters.",
     "La pregunta debe tener al menos 10 caracteres."),
    ("Use the quiz page to generate a quiz.", "Use the quiz page to generate a quiz.",
     "Usa la página de cuestionarios para generar un cuestionario."),
    ("There is no text to read aloud.", "There is no text to read aloud.",
     "No hay texto para leer en voz alta."),
    // Quiz page
    ("Practice Quiz Generator", "Practice Quiz Generator", "Generador de Cuestionarios de Práctica"),
    ("Generate custom quizzes on any subject to reinforce your learning and prepare for exams.",
     "Generate custom quizzes on any subject to reinforce your learning and prepare for exams.",
     "Genera cuestionarios personalizados sobre cualquier tema para reforzar tu aprendizaje y prepararte para los exámenes."),
    ("Create a Practice Quiz", "Create a Practice Quiz", "Crear un Cuestionario de Práctica"),
    ("Test your knowledge on any topic.", "Test your knowledge on any topic.",
     "Pon a prueba tus conocimientos sobre cualquier tema."),
    ("Topic", "Topic", "Tema"),
    ("Topic must be at least 2 characters.", "Topic must be at least 2 characters.",
     "El tema debe tener al menos 2 caracteres."),
    ("e.g., The Roman Empire", "e.g., The Roman Empire", "p. ej., El Imperio Romano"),
    ("Number of Questions", "Number of Questions", "Número de Preguntas"),
    ("Must have at least 3 questions.", "Must have at least 3 questions.",
     "Debe tener al menos 3 preguntas."),
    ("Cannot have more than 10 questions.", "Cannot have more than 10 questions.",
     "No puede tener más de 10 preguntas."),
    ("Select number of questions", "Select number of questions", "Selecciona el número de preguntas"),
    ("Generating your quiz...", "Generating your quiz...", "Generando tu cuestionario..."),
    ("Question {currentQuestionIndex} of {quizLength}", "Question {currentQuestionIndex} of {quizLength}",
     "Pregunta {currentQuestionIndex} de {quizLength}"),
    ("Next Question", "Next Question", "Siguiente Pregunta"),
    ("Submit Quiz", "Submit Quiz", "Enviar Cuestionario"),
    ("Quiz Complete!", "Quiz Complete!", "¡Cuestionario Completo!"),
    ("You scored", "You scored", "Obtuviste"),
    ("Take Another Quiz", "Take Another Quiz", "Hacer Otro Cuestionario"),
    ("Error", "Error", "Error"),
    // Story page
    ("AI Story Generator", "AI Story Generator", "Generador de Historias con IA"),
    ("Unleash your imagination. Provide a topic, and our AI will weave a unique story for you.",
     "Unleash your imagination. Provide a topic, and our AI will weave a unique story for you.",
     "Da rienda suelta a tu imaginación. Proporciona un tema y nuestra IA tejerá una historia única para ti."),
    ("Story Topic", "Story Topic", "Tema de la Historia"),
    ("e.g., A robot who discovers music", "e.g., A robot who discovers music",
     "p. ej., Un robot que descubre la música"),
    ("Generate Story", "Generate Story", "Generar Historia"),
    ("Generating Story...", "Generating Story...", "Generando historia..."),
    ("The Story", "The Story", "La Historia"),
    ("Story Generation Error", "Story Generation Error", "Error en la Generación de la Historia"),
    ("An error occurred. Please try again.", "An error occurred. Please try again.",
     "Ocurrió un error. Por favor, inténtalo de nuevo."),
    ("Text-to-Speech Error", "Text-to-Speech Error", "Error de Texto a Voz"),
    ("An error occurred during text-to-speech.", "An error occurred during text-to-speech.",
     "Ocurrió un error durante la conversión de texto a voz."),
    ("Audio Error", "Audio Error", "Error de Audio"),
    ("Could not play audio. Your browser might be blocking it.",
     "Could not play audio. Your browser might be blocking it.",
     "No se pudo reproducir el audio. Tu navegador podría estar bloqueándolo."),
    // Summarizer page
    ("AI Text Summarizer", "AI Text Summarizer", "Resumidor de Texto con IA"),
    ("Paste in any long text, article, or document, and get a quick, easy-to-read summary of the key points.",
     "Paste in any long text, article, or document, and get a quick, easy-to-read summary of the key points.",
     "Pega cualquier texto largo, artículo o documento y obtén un resumen rápido y fácil de leer de los puntos clave."),
    ("Summarize Your Text", "Summarize Your Text", "Resume Tu Texto"),
    ("Text to Summarize", "Text to Summarize", "Texto a Resumir"),
    ("Text must be at least 100 characters to summarize.", "Text must be at least 100 characters to summarize.",
     "El texto debe tener al menos 100 caracteres para resumirlo."),
    ("Paste your text here...", "Paste your text here...", "Pega tu texto aquí..."),
    ("Summarize", "Summarize", "Resumir"),
    ("Generating Summary...", "Generating Summary...", "Generando resumen..."),
    ("Summary", "Summary", "Resumen"),
    // Ask page
    ("AI Study Buddy", "AI Study Buddy", "Compañero de Estudio IA"),
    ("Ask any question on any topic, and our AI will provide a clear, concise explanation to help you learn.",
     "Ask any question on any topic, and our AI will provide a clear, concise explanation to help you learn.",
     "Haz cualquier pregunta sobre cualquier tema y nuestra IA te dará una explicación clara y concisa."),
    ("Ask a Question", "Ask a Question", "Haz una Pregunta"),
    ("Your Question", "Your Question", "Tu Pregunta"),
    ("e.g., Photosynthesis", "e.g., Photosynthesis", "p. ej., Fotosíntesis"),
    ("e.g., What are the main inputs and outputs of the Calvin Cycle?",
     "e.g., What are the main inputs and outputs of the Calvin Cycle?",
     "p. ej., ¿Cuáles son las principales entradas y salidas del Ciclo de Calvin?"),
    ("Get Answer", "Get Answer", "Obtener Respuesta"),
    ("Generating Answer...", "Generating Answer...", "Generando respuesta..."),
    ("AI Answer", "AI Answer", "Respuesta de la IA"),
    // Profile page
    ("User Profile", "User Profile", "Perfil de Usuario"),
    ("View your details, track your progress, and see how you're improving.",
     "View your details, track your progress, and see how you're improving.",
     "Consulta tus datos, sigue tu progreso y observa cómo mejoras."),
    ("Progress Tracking", "Progress Tracking", "Seguimiento del Progreso"),
    ("Your performance across different topics and over time.",
     "Your performance across different topics and over time.",
     "Tu rendimiento en distintos temas y a lo largo del tiempo."),
    ("Quiz Scores by Topic", "Quiz Scores by Topic", "Puntuaciones por Tema"),
    ("Progress Over Time", "Progress Over Time", "Progreso en el Tiempo"),
    ("No quizzes completed yet.", "No quizzes completed yet.", "Aún no has completado cuestionarios."),
    ("Profiles are not configured.", "Profiles are not configured.", "Los perfiles no están configurados."),
    ("Not signed in.", "Not signed in.", "No has iniciado sesión."),
    ("You do not have access to this profile.", "You do not have access to this profile.",
     "No tienes acceso a este perfil."),
    ("Loading...", "Loading...", "Cargando..."),
    ("Retry", "Retry", "Reintentar"),
    ("Something went wrong. Please try again.", "Something went wrong. Please try again.",
     "Algo salió mal. Por favor, inténtalo de nuevo."),
    ("User id cannot be empty.", "User id cannot be empty.", "El id de usuario no puede estar vacío."),
    ("Photo URL is not a valid URL.", "Photo URL is not a valid URL.", "La URL de la foto no es válida."),
    ("Member since {date}", "Member since {date}", "Miembro desde {date}"),
    ("Your answer: {answer}", "Your answer: {answer}", "Tu respuesta: {answer}"),
    ("Correct answer: {answer}", "Correct answer: {answer}", "Respuesta correcta: {answer}"),
    ("Some questions could not be generated.", "Some questions could not be generated.",
     "No se pudieron generar algunas preguntas."),
    ("The AI service is not configured. Set BUDDY_AI_API_KEY in your .env file.",
     "The AI service is not configured. Set BUDDY_AI_API_KEY in your .env file.",
     "El servicio de IA no está configurado. Define BUDDY_AI_API_KEY en tu archivo .env."),
];

#[cfg(test)]
mod tests {
    use super::*;

    struct SparseCatalog;

    impl Catalog for SparseCatalog {
        fn lookup(&self, language: Language, key: &str) -> Option<&str> {
            match (language, key) {
                (Language::English, "Topic") => Some("Topic"),
                (Language::German, "Topic") => Some("Thema"),
                (Language::English, "Question {n} of {m}") => Some("Question {n} of {m}"),
                _ => None,
            }
        }
    }

    #[test]
    fn selected_language_wins() {
        let t = Translator::builtin(Language::Spanish);
        assert_eq!(t.t("Summary"), "Resumen");
        assert_eq!(t.t("App Name"), "ORIoN : COMPAÑERO DE ESTUDIO IA");
    }

    #[test]
    fn falls_back_to_english_then_key() {
        let t = Translator::builtin(Language::Japanese);
        assert_eq!(t.t("Summary"), "Summary");
        assert_eq!(t.t("Not a real key"), "Not a real key");

        let sparse = Translator::new(Arc::new(SparseCatalog), Language::German);
        assert_eq!(sparse.t("Topic"), "Thema");
        assert_eq!(sparse.with_language(Language::French).t("Topic"), "Topic");
    }

    #[test]
    fn replacements_fill_placeholders() {
        let t = Translator::builtin(Language::Spanish);
        let text = t.t_with(
            "Question {currentQuestionIndex} of {quizLength}",
            &[
                ("currentQuestionIndex", 2.to_string()),
                ("quizLength", 5.to_string()),
            ],
        );
        assert_eq!(text, "Pregunta 2 de 5");

        let sparse = Translator::new(Arc::new(SparseCatalog), Language::Tamil);
        assert_eq!(
            sparse.t_with("Question {n} of {m}", &[("n", "1".into())]),
            "Question 1 of {m}"
        );
        assert_eq!(sparse.t_with("{missing}", &[("missing", "x".into())]), "{missing}");
    }

    #[test]
    fn parses_language_names() {
        assert_eq!("spanish".parse::<Language>(), Ok(Language::Spanish));
        assert_eq!(" Odia ".parse::<Language>(), Ok(Language::Odia));
        assert!("Klingon".parse::<Language>().is_err());
    }

    #[test]
    fn builtin_tables_have_no_duplicate_keys() {
        let mut seen = std::collections::HashSet::new();
        for (key, _, _) in ENTRIES {
            assert!(seen.insert(key), "duplicate key {key}");
        }
    }
}
