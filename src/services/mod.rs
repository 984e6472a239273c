pub mod backend;
pub mod fallback;
pub mod openai_client;
pub mod parser;
pub mod prompt;

pub use backend::{Completion, ItineraryBackend, StaticBackend};
pub use fallback::generate_fallback_itinerary;
pub use openai_client::OpenAIClient;
pub use parser::{parse_itinerary, strip_code_fence};
pub use prompt::generate_itinerary_prompt;
