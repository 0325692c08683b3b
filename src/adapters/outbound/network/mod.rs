/// Network adapters for external API calls
mod story_api_client;

pub use story_api_client::{StoryApiClient, DEFAULT_API_URL};
