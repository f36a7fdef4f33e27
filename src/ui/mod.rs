mod dashboard;
mod detail;
mod filters;
mod help;
mod loading;
mod pagination;
mod pane;
mod table;
mod toast;
mod tooltip;

pub use dashboard::*;
pub use detail::*;
pub use filters::*;
pub use help::*;
pub use loading::*;
pub use pagination::*;
pub use pane::*;
pub use table::*;
pub use toast::*;
pub use tooltip::*;
