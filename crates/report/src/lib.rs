pub mod bundle;
pub mod render;

pub use bundle::{bundle, bundle_name, BundleError};
pub use render::{render_report, RenderError, RenderedReport};
