pub mod completions;
pub mod inspect;
pub mod plan;
pub mod util;
pub mod validate;
