mod formatter_factory;
mod presenter_factory;

pub use formatter_factory::{FormatterFactory, TextOptions};
pub use presenter_factory::{PresenterFactory, PresenterType};
