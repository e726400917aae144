pub mod openai;
pub mod vectorize;

pub use openai::OpenAiEngine;
pub use vectorize::VectorizeRetriever;
