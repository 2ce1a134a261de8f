pub mod token;
pub mod ast;
pub mod quote;
pub mod conf;
pub mod characters;

pub use token::{Token, TokenKind, Position};
pub use ast::{
    Script,
    Line,
    CommentLine,
    LabelLine,
    CommandLine,
    PresetDefineLine,
    EpisodeMarkerLine,
    EpisodeKind,
    DialogueLine,
    DialogueCommand,
    DialogueElement,
    FormatTag,
    VoiceCommand,
    ClickWaitKind
};
pub use quote::{ExtractedQuote, ParsedQuote, SemanticClass, TruthFlags};
pub use conf::{Conf, ConfError, ConfResult};
pub use characters::{character_name, all_characters};
