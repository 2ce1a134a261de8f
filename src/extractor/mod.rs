pub mod quote_extractor;
pub mod truth;

pub use quote_extractor::{
    QuoteExtractor,
    build_audio_text_map,
    has_words_before_voice,
    infer_episode
};
pub use truth::detect_truth;
