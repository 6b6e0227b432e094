//! Models module

mod request;
mod response;

pub use request::TextRequest;
pub use response::{
  EntityDto, HealthResponse, NerResponse, PosTagDto, PosTagResponse, SentimentResponse,
  TokenizeResponse,
};
