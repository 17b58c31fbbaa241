use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid progress bar template: {0}")]
    Template(#[from] indicatif::style::TemplateError),
}
