//! Templating subsystem.
//!
//! # Data Flow
//! ```text
//! MicroPresenter::create_template
//!     → engine from caller factory or container (SharedEngineFactory)
//!     → Template populated with request params, presenter, context, baseUrl/basePath
//!     → callback params merged, file or inline source set
//!     → rendered lazily when the TextResponse is sent
//! ```

pub mod engine;
pub mod template;

pub use engine::{
    SharedEngineFactory, TemplateEngine, TemplateEngineFactory, TemplateError, TemplateSource,
};
pub use template::Template;
