pub mod narration;
pub mod tts;

pub use narration::{hindi_narration, split_chunks};
pub use tts::GoogleTtsRenderer;
