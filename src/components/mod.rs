pub mod api_key_form;
pub mod image_comparison;
pub mod image_uploader;
pub mod restoration_controls;
