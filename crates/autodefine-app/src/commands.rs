pub mod add;
pub mod bulk_define;
pub mod define;
pub mod highlight;
pub mod install_model;
pub mod preview;

pub use add::handle_add;
pub use bulk_define::handle_bulk;
pub use define::handle_define;
pub use highlight::handle_highlight;
pub use install_model::handle_install_model;
pub use preview::handle_preview;
