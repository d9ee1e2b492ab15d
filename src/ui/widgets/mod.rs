pub mod panel;
pub mod status;
